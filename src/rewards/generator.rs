//! Reward generation.
//!
//! Crystals are always granted. The common item, healing item, capture
//! stone and equipment rolls are independent Bernoulli trials, so a single
//! victory can yield every category at once.
//!
//! ## Roll order
//!
//! 1. crystal jitter
//! 2. common item
//! 3. healing item
//! 4. capture stone
//! 5. equipment (rarity, then slot)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::tables;
use crate::core::{ElementType, RandomSource, RewardConfig};
use crate::equipment::{self, Equipment};
use crate::items::{CaptureStone, Item};

/// Everything a victory grants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub crystals: u32,
    pub items: SmallVec<[Item; 2]>,
    pub capture_stone: Option<CaptureStone>,
    pub equipment: Option<Equipment>,
}

impl Reward {
    /// Every granted item, stone and equipment included, in grant order.
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        let mut out: Vec<Item> = self.items.into_vec();
        if let Some(stone) = self.capture_stone {
            out.push(Item::CaptureStone(stone));
        }
        if let Some(equipment) = self.equipment {
            out.push(Item::Equipment(equipment));
        }
        out
    }

    /// Human-readable summary for the combat log.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} crystals", self.crystals)];
        parts.extend(self.items.iter().map(Item::name));
        if let Some(stone) = &self.capture_stone {
            parts.push(stone.name());
        }
        if let Some(equipment) = &self.equipment {
            parts.push(equipment.name.clone());
        }
        parts.join(", ")
    }
}

/// Crystal base before jitter.
///
/// `10 + 5*level`, plus `10` per level the enemy is above the player.
#[must_use]
pub fn base_crystals(enemy_level: u32, player_level: u32) -> u32 {
    let mut base = 10 + 5 * enemy_level;
    if enemy_level > player_level {
        base += 10 * (enemy_level - player_level);
    }
    base
}

/// Inclusive crystal range for a given jitter fraction.
#[must_use]
pub fn crystal_range(enemy_level: u32, player_level: u32, jitter: f64) -> (u32, u32) {
    let base = base_crystals(enemy_level, player_level);
    let spread = (f64::from(base) * jitter.max(0.0)).floor() as u32;
    (base.saturating_sub(spread), base + spread)
}

/// Rolls rewards against a [`RewardConfig`].
#[derive(Clone, Debug, Default)]
pub struct RewardGenerator {
    config: RewardConfig,
}

impl RewardGenerator {
    #[must_use]
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Roll the reward for defeating a creature.
    pub fn generate(
        &self,
        enemy_level: u32,
        element: ElementType,
        player_level: u32,
        rng: &mut impl RandomSource,
    ) -> Reward {
        let (low, high) = crystal_range(enemy_level, player_level, self.config.crystal_jitter);
        let low = i32::try_from(low).unwrap_or(i32::MAX);
        let high = i32::try_from(high).unwrap_or(i32::MAX);
        let crystals = rng.range_i32(low, high).max(0) as u32;

        let mut reward = Reward {
            crystals,
            ..Reward::default()
        };

        // The healing item only rides along with a common item drop.
        if rng.chance(self.config.item_chance) {
            reward.items.push(tables::common_item(element));
            if rng.chance(self.config.healing_item_chance) {
                reward.items.push(tables::healing_item());
            }
        }
        if rng.chance(self.config.capture_stone_chance) {
            reward.capture_stone = Some(CaptureStone::dropped_by(enemy_level, element));
        }
        if rng.chance(self.config.equipment_chance) {
            reward.equipment = Some(equipment::generate(enemy_level, element, rng));
        }

        debug!(enemy_level, player_level, %element, reward = %reward.summary(), "reward rolled");
        reward
    }
}
