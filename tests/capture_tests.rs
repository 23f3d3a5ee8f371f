//! Capture flow integration tests.
//!
//! A hand-driven `CaptureService` holds the reply so each test decides
//! when, and whether, the attempt resolves.

use std::cell::Cell;

use creature_combat::combat::odds::{capture_chance, capture_chance_with_stone};
use creature_combat::{
    Ability, CaptureReply, CaptureRequest, CaptureResult, CaptureService, CaptureStone, ChanceCapture, CombatConfig,
    CombatError, CombatOutcome, CombatRng, CombatSession, CombatState, Combatant, DamageKind, ElementType, Item,
    NullPresentation, Party, PlayerMenu, PlayerProfile, StatBlock, StatusEffectKind, StoneAffinity, StoneMaterial,
};

/// Capture service driven by the test body.
struct ManualCapture {
    accept: bool,
    pending: Option<(CaptureRequest, CaptureReply)>,
    last_request: Option<CaptureRequest>,
    updates: u32,
    cancels: u32,
    renders: Cell<u32>,
}

impl ManualCapture {
    fn new() -> Self {
        Self {
            accept: true,
            pending: None,
            last_request: None,
            updates: 0,
            cancels: 0,
            renders: Cell::new(0),
        }
    }

    fn rejecting() -> Self {
        Self {
            accept: false,
            ..Self::new()
        }
    }

    fn resolve(&mut self, success: bool) {
        let (request, reply) = self.pending.take().expect("no capture pending");
        reply.resolve(CaptureResult {
            player: request.player,
            creature: request.target,
            success,
        });
    }

    fn drop_reply(&mut self) {
        self.pending = None;
    }
}

impl CaptureService for ManualCapture {
    fn start_capture(&mut self, request: CaptureRequest, reply: CaptureReply) -> bool {
        if !self.accept || self.pending.is_some() {
            return false;
        }
        self.last_request = Some(request.clone());
        self.pending = Some((request, reply));
        true
    }

    fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    fn update(&mut self, _dt: f32) {
        self.updates += 1;
    }

    fn render(&self) {
        self.renders.set(self.renders.get() + 1);
    }

    // Keeps the reply so tests can resolve it late.
    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

type Session<C> = CombatSession<Party, C, NullPresentation, CombatRng>;

fn grass_stone() -> CaptureStone {
    CaptureStone::new(StoneMaterial::Silver, StoneAffinity::Grass)
}

fn hero() -> Combatant {
    Combatant::new(
        "Emberpup",
        10,
        ElementType::Fire,
        StatBlock::new(500).with_attack(20, 20).with_defense(50, 50).with_speed(30),
    )
    .with_ability(Ability::new("Flame Bite", 30, DamageKind::Physical))
}

/// Level 5 grass creature at half health.
fn wounded_wild() -> Combatant {
    let mut wild = Combatant::new(
        "Mosskit",
        5,
        ElementType::Grass,
        StatBlock::new(60).with_attack(10, 10).with_defense(20, 20).with_speed(10),
    );
    wild.stats.take_true_damage(30);
    wild
}

fn start_with<C: CaptureService>(config: CombatConfig, party: Party, capture: C) -> Session<C> {
    let mut session = CombatSession::seeded(config, party, capture, NullPresentation, 17);
    assert!(session.start(PlayerProfile::new("Ash", 5), wounded_wild()));
    session.update(0.0);
    assert_eq!(session.state(), CombatState::PlayerTurn);
    session
}

fn start(capture: ManualCapture) -> Session<ManualCapture> {
    let party = Party::new().with_creature(hero()).with_item(Item::CaptureStone(grass_stone()));
    start_with(CombatConfig::instant(), party, capture)
}

// =============================================================================
// Attempt lifecycle
// =============================================================================

#[test]
fn test_capture_blocks_session_until_resolved() {
    let mut session = start(ManualCapture::new());
    assert!(session.start_capture());
    assert!(session.is_capture_in_progress());
    assert_eq!(session.menu(), PlayerMenu::CaptureSelect);
    assert_eq!(session.message(), Some("Ash is trying to capture Mosskit!"));

    let request = session.capture_service().last_request.clone().unwrap();
    assert_eq!(request.target.name, "Mosskit");
    assert!(request.stone.is_none());
    assert!((request.chance - capture_chance(0.5, 5)).abs() < 1e-12);

    // The collaborator owns every tick while active.
    for _ in 0..3 {
        session.update(5.0);
    }
    assert_eq!(session.state(), CombatState::PlayerTurn);
    assert_eq!(session.capture_service().updates, 3);
    assert_eq!(session.capture_service().renders.get(), 3);

    assert!(!session.basic_attack());
    assert_eq!(session.try_flee(), Err(CombatError::CaptureInProgress));
    assert_eq!(session.try_start_capture(), Err(CombatError::CaptureInProgress));
}

#[test]
fn test_successful_capture_adds_creature() {
    let mut session = start(ManualCapture::new());
    session.start_capture();

    // The collaborator hands back the creature in whatever state it ended.
    let (request, reply) = session.capture_service_mut().pending.take().unwrap();
    let mut creature = request.target;
    creature.stats.add_status_effect(StatusEffectKind::Weakened, 3);
    creature.stats.add_adaptive_shield(10);
    reply.resolve(CaptureResult {
        player: request.player,
        creature,
        success: true,
    });
    session.update(0.0);

    assert_eq!(session.state(), CombatState::Capture);
    assert_eq!(session.outcome(), Some(CombatOutcome::Captured));
    assert_eq!(session.message(), Some("Gotcha! Mosskit was captured!"));
    assert!(!session.is_capture_in_progress());

    let roster = &session.inventory().creatures;
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[1].name, "Mosskit");
    // Wounds persist; battle state does not.
    assert_eq!(roster[1].stats.current_health(), 30);
    assert!(roster[1].stats.active_status_effects().is_empty());
    assert_eq!(roster[1].stats.physical_attack, 10);
    assert_eq!(roster[1].stats.total_shield(), 0);

    session.update(0.0);
    assert_eq!(session.state(), CombatState::Completed);
}

#[test]
fn test_failed_capture_costs_turn() {
    let mut session = start(ManualCapture::new());
    session.start_capture();
    session.capture_service_mut().resolve(false);
    session.update(0.0);

    assert_eq!(session.state(), CombatState::Message);
    assert_eq!(session.message(), Some("Mosskit broke free!"));
    assert_eq!(session.menu(), PlayerMenu::Main);

    session.update(0.0);
    assert_eq!(session.state(), CombatState::EnemyTurn);
    session.update(0.0);
    assert_eq!(session.state(), CombatState::PlayerTurn);
    assert_eq!(session.turn(), 2);
    assert_eq!(session.inventory().creatures.len(), 1);
}

/// Test that a resolved attempt is picked up on the very next tick, even a
/// zero-length one, when message timers are long.
#[test]
fn test_result_applies_on_next_tick_with_long_timers() {
    let config = CombatConfig::instant().with_message_duration(30.0);
    let party = Party::new().with_creature(hero());
    let mut session = CombatSession::seeded(config, party, ManualCapture::new(), NullPresentation, 17);
    session.start(PlayerProfile::new("Ash", 5), wounded_wild());
    session.update(30.0);
    assert_eq!(session.state(), CombatState::PlayerTurn);

    session.start_capture();
    session.capture_service_mut().resolve(true);
    session.update(0.0);
    assert_eq!(session.state(), CombatState::Capture);
    assert_eq!(session.outcome(), Some(CombatOutcome::Captured));
}

#[test]
fn test_rejected_attempt_changes_nothing() {
    let mut session = start(ManualCapture::rejecting());
    assert_eq!(session.try_start_capture(), Err(CombatError::CaptureRejected));
    assert!(!session.is_capture_in_progress());
    assert_eq!(session.state(), CombatState::PlayerTurn);
    assert_eq!(session.menu(), PlayerMenu::Main);

    // Stone stays in the bag.
    assert_eq!(
        session.try_start_capture_with_stone(grass_stone()),
        Err(CombatError::CaptureRejected)
    );
    assert_eq!(session.inventory().count(&Item::CaptureStone(grass_stone())), 1);

    // Turn still usable.
    assert!(session.basic_attack());
}

#[test]
fn test_dropped_reply_counts_as_failure() {
    let mut session = start(ManualCapture::new());
    session.start_capture();
    session.capture_service_mut().drop_reply();
    session.update(0.0);

    assert!(!session.is_capture_in_progress());
    assert_eq!(session.state(), CombatState::Message);
    assert_eq!(session.message(), Some("Mosskit broke free!"));
}

#[test]
fn test_late_reply_after_end_is_ignored() {
    let mut session = start(ManualCapture::new());
    session.start_capture();
    session.end_combat();
    assert_eq!(session.state(), CombatState::Inactive);
    assert!(!session.is_capture_in_progress());
    assert_eq!(session.capture_service().cancels, 1);

    session.capture_service_mut().resolve(true);
    session.update(0.0);
    assert_eq!(session.state(), CombatState::Inactive);
    assert_eq!(session.inventory().creatures.len(), 1);
}

// =============================================================================
// Capture stones
// =============================================================================

#[test]
fn test_stone_consumed_and_boosts_chance() {
    let mut session = start(ManualCapture::new());
    assert!(session.start_capture_with_stone(grass_stone()));
    assert_eq!(session.inventory().count(&Item::CaptureStone(grass_stone())), 0);
    assert_eq!(session.message(), Some("Ash threw a Silver Grass Stone at Mosskit!"));

    let request = session.capture_service().last_request.clone().unwrap();
    assert_eq!(request.stone, Some(grass_stone()));
    let expected = capture_chance_with_stone(0.5, 5, &grass_stone(), ElementType::Grass);
    assert!((request.chance - expected).abs() < 1e-12);
    // 0.1875 * 1.25 * 1.5
    assert!((request.chance - 0.3515625).abs() < 1e-12);
}

#[test]
fn test_stone_not_owned_rejected() {
    let mut session = start(ManualCapture::new());
    let missing = CaptureStone::new(StoneMaterial::Gold, StoneAffinity::Fire);
    assert_eq!(
        session.try_start_capture_with_stone(missing),
        Err(CombatError::StoneNotOwned)
    );
    assert!(session.capture_service().last_request.is_none());
    assert_eq!(session.state(), CombatState::PlayerTurn);
}

// =============================================================================
// Built-in chance capture
// =============================================================================

/// Test that ending combat mid-capture leaves the service usable for the
/// next combat.
#[test]
fn test_teardown_mid_capture_frees_service() {
    let capture = ChanceCapture::new(CombatRng::new(8)).with_shake_duration(1.0);
    let mut session = start_with(CombatConfig::instant(), Party::new().with_creature(hero()), capture);

    assert!(session.start_capture());
    session.update(0.5);
    session.end_combat();
    assert!(!session.capture_service().is_active());

    assert!(session.start(PlayerProfile::new("Ash", 5), wounded_wild()));
    session.update(0.0);
    assert_eq!(session.state(), CombatState::PlayerTurn);
    assert_eq!(session.try_start_capture(), Ok(()));
    assert!(session.is_capture_in_progress());

    session.update(1.0);
    session.update(0.0);
    assert!(!session.is_capture_in_progress());
}

#[test]
fn test_chance_capture_resolves_after_shake() {
    let capture = ChanceCapture::new(CombatRng::new(8)).with_shake_duration(1.0);
    let mut session = start_with(CombatConfig::instant(), Party::new().with_creature(hero()), capture);

    assert!(session.start_capture());
    session.update(0.5);
    assert!(session.is_capture_in_progress());
    session.update(0.6);
    session.update(0.0);

    assert!(!session.is_capture_in_progress());
    assert!(matches!(session.state(), CombatState::Capture | CombatState::Message));
}
