//! Tunables for camp caps and decay.

use serde::{Deserialize, Serialize};

use crate::constants::{AREA_CAP, DECAY_INTERVAL_SECS, REST_CAP, TYPE_CAP};
use crate::error::CampError;
use crate::types::{CampKind, CategoryId};

/// Cap and decay configuration for a registry.
///
/// Missing fields fall back to the protocol defaults, so a partial config
/// file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampConfig {
    /// Seconds per decayed interaction point. `0` disables decay.
    pub decay_interval_secs: u64,
    pub rest_cap: u32,
    pub type_cap: u32,
    pub area_cap: u32,
}

impl Default for CampConfig {
    fn default() -> Self {
        Self {
            decay_interval_secs: DECAY_INTERVAL_SECS,
            rest_cap: REST_CAP,
            type_cap: TYPE_CAP,
            area_cap: AREA_CAP,
        }
    }
}

impl CampConfig {
    /// Cap for a category under this configuration.
    pub fn max_interactions(&self, category: CategoryId) -> u32 {
        match category.kind() {
            CampKind::Rest => self.rest_cap,
            CampKind::Type => self.type_cap,
            CampKind::Area => self.area_cap,
        }
    }

    /// Reject configurations that would make the bonus formula divide by zero.
    pub fn validate(&self) -> Result<(), CampError> {
        for (name, cap) in [
            ("rest_cap", self.rest_cap),
            ("type_cap", self.type_cap),
            ("area_cap", self.area_cap),
        ] {
            if cap == 0 {
                return Err(CampError::InvalidConfig(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }
}

/// Cap for a category under the default configuration.
///
/// # Examples
///
/// ```
/// use camp_core::config::max_interactions;
/// use camp_core::types::CategoryId;
///
/// assert_eq!(max_interactions(CategoryId::REST), 3000);
/// assert_eq!(max_interactions(CategoryId(12)), 2000);
/// assert_eq!(max_interactions(CategoryId(0x2_0000)), 500);
/// ```
pub fn max_interactions(category: CategoryId) -> u32 {
    match category.kind() {
        CampKind::Rest => REST_CAP,
        CampKind::Type => TYPE_CAP,
        CampKind::Area => AREA_CAP,
    }
}
