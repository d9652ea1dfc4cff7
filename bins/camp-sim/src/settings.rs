//! Simulator configuration: an optional TOML file layered under `CAMP_*`
//! environment variables.

use std::path::Path;

use anyhow::{Context, Result};
use camp_core::config::CampConfig;
use config::{Config, Environment, File};

/// Load the camp configuration.
///
/// Precedence, lowest first: built-in defaults, `file`, environment
/// (`CAMP_DECAY_INTERVAL_SECS`, `CAMP_TYPE_CAP`, ...).
pub fn load(file: Option<&Path>) -> Result<CampConfig> {
    let mut builder = Config::builder();
    if let Some(path) = file {
        builder = builder.add_source(File::from(path));
    }
    builder = builder.add_source(Environment::with_prefix("CAMP").try_parsing(true));

    let camp: CampConfig = builder
        .build()
        .context("failed to read camp configuration")?
        .try_deserialize()
        .context("invalid camp configuration")?;
    camp.validate()?;
    Ok(camp)
}
