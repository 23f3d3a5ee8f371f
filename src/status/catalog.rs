//! The status effect catalog.
//!
//! A closed set of named, timed modifiers. Each entry is display data plus a
//! category: statistical entries carry a stat delta (see
//! [`delta`](super::delta)), behavioral entries carry a tag the combat
//! orchestrator branches on.

use serde::{Deserialize, Serialize};

/// Identifies a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusEffectKind {
    Blinded,
    Enraged,
    Slowed,
    Weakened,
    Exposed,
    Hastened,
    Fortified,
    Focused,
    Confused,
    Stunned,
    Asleep,
    Unstable,
}

/// Turn-logic behavior for non-statistical entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorTag {
    /// May hit itself instead of the chosen target.
    Confusion,
    /// Loses its action.
    Incapacitate,
    /// Alternates buff and debuff phases each turn.
    Alternating,
}

/// How callers must dispatch an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectCategory {
    Statistical,
    Behavioral(BehaviorTag),
}

/// Immutable catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusEffectDefinition {
    pub kind: StatusEffectKind,
    pub name: &'static str,
    pub description: &'static str,
    pub max_duration: u32,
    pub category: EffectCategory,
}

impl StatusEffectDefinition {
    #[must_use]
    pub const fn is_statistical(&self) -> bool {
        matches!(self.category, EffectCategory::Statistical)
    }

    #[must_use]
    pub const fn behavior(&self) -> Option<BehaviorTag> {
        match self.category {
            EffectCategory::Behavioral(tag) => Some(tag),
            EffectCategory::Statistical => None,
        }
    }
}

const fn statistical(
    kind: StatusEffectKind,
    name: &'static str,
    description: &'static str,
    max_duration: u32,
) -> StatusEffectDefinition {
    StatusEffectDefinition {
        kind,
        name,
        description,
        max_duration,
        category: EffectCategory::Statistical,
    }
}

const fn behavioral(
    kind: StatusEffectKind,
    name: &'static str,
    description: &'static str,
    max_duration: u32,
    tag: BehaviorTag,
) -> StatusEffectDefinition {
    StatusEffectDefinition {
        kind,
        name,
        description,
        max_duration,
        category: EffectCategory::Behavioral(tag),
    }
}

/// The full catalog, indexed by `StatusEffectKind` discriminant.
pub static CATALOG: [StatusEffectDefinition; 12] = [
    statistical(StatusEffectKind::Blinded, "Blinded", "Accuracy reduced by 30%.", 3),
    statistical(
        StatusEffectKind::Enraged,
        "Enraged",
        "Attack raised by 30%, defense lowered by 20%.",
        3,
    ),
    statistical(StatusEffectKind::Slowed, "Slowed", "Speed halved.", 3),
    statistical(StatusEffectKind::Weakened, "Weakened", "Attack reduced by 25%.", 3),
    statistical(StatusEffectKind::Exposed, "Exposed", "Defense reduced by 30%.", 2),
    statistical(StatusEffectKind::Hastened, "Hastened", "Speed raised by 50%.", 3),
    statistical(StatusEffectKind::Fortified, "Fortified", "Defense raised by 25%.", 3),
    statistical(
        StatusEffectKind::Focused,
        "Focused",
        "Critical chance +20, accuracy raised by 15%.",
        2,
    ),
    behavioral(
        StatusEffectKind::Confused,
        "Confused",
        "May lash out at itself instead of the target.",
        3,
        BehaviorTag::Confusion,
    ),
    behavioral(
        StatusEffectKind::Stunned,
        "Stunned",
        "Cannot act this turn.",
        1,
        BehaviorTag::Incapacitate,
    ),
    behavioral(
        StatusEffectKind::Asleep,
        "Asleep",
        "Cannot act until it wakes.",
        3,
        BehaviorTag::Incapacitate,
    ),
    behavioral(
        StatusEffectKind::Unstable,
        "Unstable",
        "Swings between frenzy and exhaustion every turn.",
        4,
        BehaviorTag::Alternating,
    ),
];

impl StatusEffectKind {
    /// Every kind, in catalog order.
    pub const ALL: [StatusEffectKind; 12] = [
        StatusEffectKind::Blinded,
        StatusEffectKind::Enraged,
        StatusEffectKind::Slowed,
        StatusEffectKind::Weakened,
        StatusEffectKind::Exposed,
        StatusEffectKind::Hastened,
        StatusEffectKind::Fortified,
        StatusEffectKind::Focused,
        StatusEffectKind::Confused,
        StatusEffectKind::Stunned,
        StatusEffectKind::Asleep,
        StatusEffectKind::Unstable,
    ];

    /// Catalog entry for this kind.
    #[must_use]
    pub fn definition(self) -> &'static StatusEffectDefinition {
        &CATALOG[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    #[must_use]
    pub fn max_duration(self) -> u32 {
        self.definition().max_duration
    }

    #[must_use]
    pub fn category(self) -> EffectCategory {
        self.definition().category
    }

    #[must_use]
    pub fn is_statistical(self) -> bool {
        self.definition().is_statistical()
    }

    /// Statistical entries only.
    pub fn statistical() -> impl Iterator<Item = StatusEffectKind> {
        Self::ALL.into_iter().filter(|k| k.is_statistical())
    }

    /// Behavioral entries only.
    pub fn behavioral() -> impl Iterator<Item = StatusEffectKind> {
        Self::ALL.into_iter().filter(|k| !k.is_statistical())
    }
}

impl std::fmt::Display for StatusEffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
