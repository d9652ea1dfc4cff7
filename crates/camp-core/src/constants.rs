//! Camp constants. All timestamps are Unix seconds.

/// Category id reserved for the rest camp.
pub const REST_CATEGORY: u32 = 0;

/// Largest category id that still classifies as a type camp.
///
/// Any id above this value is an area camp.
pub const TYPE_CATEGORY_MAX: u32 = 0xFFFF;

/// Default interaction cap for the rest camp.
pub const REST_CAP: u32 = 3000;

/// Default interaction cap for type camps.
pub const TYPE_CAP: u32 = 2000;

/// Default interaction cap for area camps.
pub const AREA_CAP: u32 = 500;

/// Seconds of inactivity that decay one interaction point.
pub const DECAY_INTERVAL_SECS: u64 = 60;

/// Bits of a zone id that survive area key derivation.
pub const ZONE_ID_MASK: u32 = 0x00FF_FFFF;

/// Area key tag for open-terrain zones.
pub const AREA_OPEN_MASK: u32 = 0x0100_0000;

/// Area key tag for instanced zones.
pub const AREA_INSTANCE_MASK: u32 = 0x0200_0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_masks_exceed_type_range() {
        assert!(AREA_OPEN_MASK > TYPE_CATEGORY_MAX);
        assert!(AREA_INSTANCE_MASK > TYPE_CATEGORY_MAX);
    }

    #[test]
    fn area_masks_do_not_overlap_zone_bits() {
        assert_eq!(AREA_OPEN_MASK & ZONE_ID_MASK, 0);
        assert_eq!(AREA_INSTANCE_MASK & ZONE_ID_MASK, 0);
        assert_eq!(AREA_OPEN_MASK & AREA_INSTANCE_MASK, 0);
    }

    #[test]
    fn cap_ordering() {
        assert!(AREA_CAP < TYPE_CAP);
        assert!(TYPE_CAP < REST_CAP);
    }
}
