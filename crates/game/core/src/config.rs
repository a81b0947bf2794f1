/// Rules configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Number of slots a freshly created party bag starts with.
    pub default_bag_capacity: usize,

    /// Hard ceiling for bag upgrades.
    pub max_bag_capacity: usize,

    /// Slots granted by one bag-upgrade consumable.
    pub bag_upgrade_step: usize,
}

impl RulesConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of skills a single job can carry.
    pub const MAX_SKILLS: usize = 8;
    /// Number of equipment slots on a mercenary.
    pub const EQUIP_SLOTS: usize = 6;
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 99;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BAG_CAPACITY: usize = 20;
    pub const DEFAULT_MAX_BAG_CAPACITY: usize = 60;
    pub const DEFAULT_BAG_UPGRADE_STEP: usize = 5;

    pub fn new() -> Self {
        Self {
            default_bag_capacity: Self::DEFAULT_BAG_CAPACITY,
            max_bag_capacity: Self::DEFAULT_MAX_BAG_CAPACITY,
            bag_upgrade_step: Self::DEFAULT_BAG_UPGRADE_STEP,
        }
    }

    pub fn with_bag_capacity(default_bag_capacity: usize, max_bag_capacity: usize) -> Self {
        Self {
            default_bag_capacity,
            max_bag_capacity,
            ..Self::new()
        }
    }

    /// Clamps a requested level into the supported range.
    pub const fn clamp_level(level: u32) -> u32 {
        if level < Self::MIN_LEVEL {
            Self::MIN_LEVEL
        } else if level > Self::MAX_LEVEL {
            Self::MAX_LEVEL
        } else {
            level
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
