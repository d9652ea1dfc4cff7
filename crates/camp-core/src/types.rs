//! Identifier and event types shared by the camp crates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AREA_INSTANCE_MASK, AREA_OPEN_MASK, REST_CATEGORY, TYPE_CATEGORY_MAX, ZONE_ID_MASK,
};
use crate::error::CampError;

/// Identifier of the actor a set of camp records belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// Camp category key.
///
/// The numeric value selects the camp kind:
///
/// | value | kind |
/// |-------|------|
/// | `0` | [`CampKind::Rest`] |
/// | `1..=0xFFFF` | [`CampKind::Type`] |
/// | `> 0xFFFF` | [`CampKind::Area`] |
///
/// # Examples
///
/// ```
/// use camp_core::types::{CampKind, CategoryId};
///
/// assert_eq!(CategoryId::REST.kind(), CampKind::Rest);
/// assert_eq!(CategoryId(7).kind(), CampKind::Type);
/// assert_eq!(CategoryId(0x1_0000).kind(), CampKind::Area);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
pub struct CategoryId(pub u32);

impl CategoryId {
    /// The rest camp.
    pub const REST: Self = Self(REST_CATEGORY);

    /// Classify this key.
    pub fn kind(self) -> CampKind {
        match self.0 {
            REST_CATEGORY => CampKind::Rest,
            id if id > TYPE_CATEGORY_MAX => CampKind::Area,
            _ => CampKind::Type,
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Kind of repeated interaction a camp tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampKind {
    /// Passive recovery.
    Rest,
    /// A specific opponent type.
    Type,
    /// A zone.
    Area,
}

/// Zone an interaction happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    /// Enclosed instance rather than open terrain.
    #[serde(default)]
    pub instanced: bool,
}

impl Zone {
    /// Area camp key for this zone.
    ///
    /// Instanced and open-terrain zones are tagged with different masks so a
    /// zone id never maps to the same camp in both modes. Only the low 24 bits
    /// of the zone id are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use camp_core::types::{CampKind, Zone};
    ///
    /// let open = Zone { id: 12, instanced: false }.area_key();
    /// let inst = Zone { id: 12, instanced: true }.area_key();
    /// assert_ne!(open, inst);
    /// assert_eq!(open.kind(), CampKind::Area);
    /// assert_eq!(inst.kind(), CampKind::Area);
    /// ```
    pub fn area_key(&self) -> CategoryId {
        let mask = if self.instanced {
            AREA_INSTANCE_MASK
        } else {
            AREA_OPEN_MASK
        };
        CategoryId(mask | (self.id & ZONE_ID_MASK))
    }
}

/// The thing that triggered an interaction, e.g. a defeated creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSubject {
    /// Opponent type. `0` means no type camp applies.
    #[serde(default)]
    pub kind: u16,
    /// Zone the subject is in. Required.
    pub zone: Option<Zone>,
}

impl InteractionSubject {
    /// Resolve the camp keys this subject charges.
    ///
    /// The rest camp is charged by every valid subject. Fails with [`CampError::InvalidSubject`] when the subject has no zone.
    pub fn category_keys(&self) -> Result<CategoryKeys, CampError> {
        let zone = self
            .zone
            .ok_or_else(|| CampError::InvalidSubject("subject has no zone".into()))?;

        Ok(CategoryKeys {
            type_key: (self.kind != 0).then(|| CategoryId(u32::from(self.kind))),
            area_key: Some(zone.area_key()),
            rest_key: Some(CategoryId::REST),
        })
    }
}

/// Up to three camp keys resolved from one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryKeys {
    pub type_key: Option<CategoryId>,
    pub area_key: Option<CategoryId>,
    pub rest_key: Option<CategoryId>,
}

/// Bonus multipliers returned by the composite interaction handler.
///
/// Each value lies in `[0.0, 1.0]`; `1.0` is fresh, `0.0` fully farmed.
/// A camp that did not apply stays at `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionBonus {
    pub type_bonus: f64,
    pub area_bonus: f64,
    pub rest_bonus: f64,
}
