//! Session configuration.
//!
//! Callers configure a combat session at construction time:
//! - `CombatConfig`: timers and turn-logic knobs
//! - `RewardConfig`: drop probabilities for the reward generator
//!
//! Both carry the tuned defaults and `with_*` builders for overrides.

use serde::{Deserialize, Serialize};

/// Reward drop probabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Chance of a type-keyed common item.
    pub item_chance: f64,

    /// Chance of a generic healing item, rolled only when the common item drops.
    pub healing_item_chance: f64,

    /// Independent chance of a capture stone.
    pub capture_stone_chance: f64,

    /// Independent chance of an equipment piece.
    pub equipment_chance: f64,

    /// Relative spread applied to the crystal base (0.2 = ±20%).
    pub crystal_jitter: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            item_chance: 0.40,
            healing_item_chance: 0.30,
            capture_stone_chance: 0.05,
            equipment_chance: 0.15,
            crystal_jitter: 0.20,
        }
    }
}

impl RewardConfig {
    /// Config where every bonus roll succeeds. Useful for previews and tests.
    #[must_use]
    pub fn guaranteed() -> Self {
        Self {
            item_chance: 1.0,
            healing_item_chance: 1.0,
            capture_stone_chance: 1.0,
            equipment_chance: 1.0,
            ..Self::default()
        }
    }

    /// Config with no bonus drops, crystals only.
    #[must_use]
    pub fn crystals_only() -> Self {
        Self {
            item_chance: 0.0,
            healing_item_chance: 0.0,
            capture_stone_chance: 0.0,
            equipment_chance: 0.0,
            ..Self::default()
        }
    }
}

/// Combat session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Seconds a message stays up before the session moves on.
    pub message_duration: f32,

    /// Seconds an executed action is displayed before the next turn.
    pub action_display_duration: f32,

    /// Seconds the enemy "thinks" before acting when its turn starts.
    pub enemy_turn_delay: f32,

    /// Whether the automatic enemy chooser skips abilities on cooldown.
    pub enemy_respects_cooldowns: bool,

    /// Chance a confused combatant strikes itself.
    pub confusion_self_hit_chance: f64,

    /// Who opens when both sides have equal speed.
    pub player_moves_first_on_tie: bool,

    /// Reward drop probabilities.
    pub reward: RewardConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            message_duration: 1.5,
            action_display_duration: 1.0,
            enemy_turn_delay: 0.75,
            enemy_respects_cooldowns: true,
            confusion_self_hit_chance: 0.33,
            player_moves_first_on_tie: true,
            reward: RewardConfig::default(),
        }
    }
}

impl CombatConfig {
    /// Config with all timers at zero; every timed transition fires on the next tick.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            message_duration: 0.0,
            action_display_duration: 0.0,
            enemy_turn_delay: 0.0,
            ..Self::default()
        }
    }

    /// Set the message duration.
    #[must_use]
    pub fn with_message_duration(mut self, seconds: f32) -> Self {
        self.message_duration = seconds;
        self
    }

    /// Set the action display duration.
    #[must_use]
    pub fn with_action_display_duration(mut self, seconds: f32) -> Self {
        self.action_display_duration = seconds;
        self
    }

    /// Set the enemy turn delay.
    #[must_use]
    pub fn with_enemy_turn_delay(mut self, seconds: f32) -> Self {
        self.enemy_turn_delay = seconds;
        self
    }

    /// Let the enemy pick abilities regardless of cooldown.
    #[must_use]
    pub fn with_unfiltered_enemy_choice(mut self) -> Self {
        self.enemy_respects_cooldowns = false;
        self
    }

    /// Set the confusion self-hit chance.
    #[must_use]
    pub fn with_confusion_self_hit_chance(mut self, chance: f64) -> Self {
        self.confusion_self_hit_chance = chance;
        self
    }

    /// Set the reward config.
    #[must_use]
    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }
}
