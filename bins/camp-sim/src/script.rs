//! Replayable event scripts.
//!
//! A script is a JSON array of steps run in order against one registry with
//! a simulated clock:
//!
//! ```json
//! [
//!   {"op": "interact", "subject": {"kind": 12, "zone": {"id": 3}}},
//!   {"op": "wait", "secs": 120},
//!   {"op": "set", "category": 0, "value": 250}
//! ]
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use camp_core::config::CampConfig;
use camp_core::record::CampRecord;
use camp_core::traits::DirtyFlag;
use camp_core::types::{ActorId, CategoryId, InteractionBonus, InteractionSubject};
use camp_registry::CampRegistry;
use serde::{Deserialize, Serialize};

fn one() -> u32 {
    1
}

/// One scripted action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Advance the simulated clock.
    Wait { secs: u64 },
    /// A gameplay interaction. `null` subject exercises the rejection path.
    Interact { subject: Option<InteractionSubject> },
    Set { category: u32, value: u32 },
    Increment {
        category: u32,
        #[serde(default = "one")]
        amount: u32,
    },
    Decrement {
        category: u32,
        #[serde(default = "one")]
        amount: u32,
    },
    /// Decay one category, or every record when `category` is absent.
    Decay {
        #[serde(default)]
        category: Option<u32>,
    },
    Erase { category: u32 },
    EraseAll,
}

/// What a step did.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub now: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<InteractionBonus>,
    /// Whether the step left unsaved changes.
    pub dirty: bool,
}

/// Final state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Replay {
    pub steps: Vec<StepReport>,
    pub records: Vec<CampRecord>,
}

/// Parse a JSON script.
pub fn parse(text: &str) -> Result<Vec<Step>> {
    serde_json::from_str(text).context("malformed event script")
}

/// Run `steps` for `actor`, starting the clock at `start`.
pub fn replay(actor: ActorId, config: CampConfig, start: u64, steps: &[Step]) -> Result<Replay> {
    let clock = Arc::new(AtomicU64::new(start));
    let dirty = Arc::new(DirtyFlag::new());
    let tick = Arc::clone(&clock);
    let mut reg = CampRegistry::with_clock(actor, config, dirty.clone(), move || {
        tick.load(Ordering::SeqCst)
    })?;

    let mut reports = Vec::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        let bonus = match step {
            Step::Wait { secs } => {
                clock.fetch_add(*secs, Ordering::SeqCst);
                None
            }
            Step::Interact { subject } => Some(reg.handle_interaction(subject.as_ref())),
            Step::Set { category, value } => {
                reg.set_interactions(CategoryId(*category), *value);
                None
            }
            Step::Increment { category, amount } => {
                reg.increment(CategoryId(*category), *amount);
                None
            }
            Step::Decrement { category, amount } => {
                reg.decrement(CategoryId(*category), *amount);
                None
            }
            Step::Decay { category: Some(category) } => {
                reg.apply_decay(CategoryId(*category));
                None
            }
            Step::Decay { category: None } => {
                reg.decay_all();
                None
            }
            Step::Erase { category } => {
                reg.erase_record(CategoryId(*category));
                None
            }
            Step::EraseAll => {
                reg.erase_all();
                None
            }
        };
        reports.push(StepReport {
            step: i,
            now: clock.load(Ordering::SeqCst),
            bonus,
            dirty: dirty.take(),
        });
    }

    Ok(Replay {
        steps: reports,
        records: reg.records().cloned().collect(),
    })
}
