//! The combat orchestrator.
//!
//! A `CombatSession` is a polling state machine ticked once per frame via
//! [`update`](CombatSession::update). Player operations come in two forms:
//! `try_*` returns the [`CombatError`] explaining a rejection, and the plain
//! form logs that reason at debug level and returns a bool. Rejected
//! operations never mutate anything.
//!
//! ## Turn cycle
//!
//! ```text
//! Inactive -> Message(intro) -> PlayerTurn | EnemyTurn
//! PlayerTurn --ability/attack--> EnemyTurn | Victory | Defeat
//! PlayerTurn --item/swap--> ActionExecution -> EnemyTurn
//! PlayerTurn --flee--> Flee | Message -> EnemyTurn
//! PlayerTurn --capture--> (collaborator) -> Capture | Message -> EnemyTurn
//! EnemyTurn -> PlayerTurn | Victory | Defeat
//! Victory | Capture | Defeat | Flee -> Completed
//! ```
//!
//! Any state -> Inactive via [`end_combat`](CombatSession::end_combat).
//!
//! ## Action order
//!
//! Each action: behavioral plan, optional phase effect, the strike itself,
//! then the actor's status effects tick and the opponent's cooldowns tick.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::behavior::{plan_turn, TurnAction, PHASE_DURATION};
use super::capture::{CaptureMailbox, CaptureRequest, CaptureResult, CaptureService};
use super::collaborators::{InputEvent, Inventory, PlayerCommand, Presentation};
use super::combatant::{Combatant, PlayerProfile};
use super::odds::{capture_chance, capture_chance_with_stone, flee_chance};
use super::snapshot::{CombatSnapshot, CombatantSnapshot};
use super::state::{CombatOutcome, CombatState, PlayerMenu};
use super::strike::{resolve_self_hit, resolve_strike, Strike, StrikeOutcome};
use crate::core::{CombatConfig, CombatError, CombatRng, RandomSource, Result};
use crate::items::{CaptureStone, Item};
use crate::rewards::{Reward, RewardGenerator};

type Lines = SmallVec<[String; 4]>;

/// What the acting side intends to do, before behavioral effects interfere.
#[derive(Clone, Copy, Debug)]
enum Intent {
    Ability(usize),
    Basic,
    /// Let the combatant pick among its abilities.
    Auto { respect_cooldowns: bool },
}

/// One combat between the player's active creature and a wild creature.
pub struct CombatSession<I, C, P, R = CombatRng> {
    config: CombatConfig,
    rewards: RewardGenerator,
    rng: R,
    inventory: I,
    capture: C,
    presentation: P,

    state: CombatState,
    menu: PlayerMenu,
    player: Option<PlayerProfile>,
    active: usize,
    enemy: Option<Combatant>,
    player_turn: bool,
    turn: u32,

    message: Option<String>,
    message_timer: f32,
    action_timer: f32,
    after_message: CombatState,

    pending_reward: Option<Reward>,
    outcome: Option<CombatOutcome>,
    mailbox: Option<CaptureMailbox>,
    log: Vector<String>,
}

impl<I, C, P> CombatSession<I, C, P, CombatRng>
where
    I: Inventory,
    C: CaptureService,
    P: Presentation,
{
    /// Session drawing from a freshly seeded [`CombatRng`].
    #[must_use]
    pub fn seeded(config: CombatConfig, inventory: I, capture: C, presentation: P, seed: u64) -> Self {
        Self::new(config, inventory, capture, presentation, CombatRng::new(seed))
    }
}

impl<I, C, P, R> CombatSession<I, C, P, R>
where
    I: Inventory,
    C: CaptureService,
    P: Presentation,
    R: RandomSource,
{
    #[must_use]
    pub fn new(config: CombatConfig, inventory: I, capture: C, presentation: P, rng: R) -> Self {
        let rewards = RewardGenerator::new(config.reward.clone());
        Self {
            config,
            rewards,
            rng,
            inventory,
            capture,
            presentation,
            state: CombatState::Inactive,
            menu: PlayerMenu::Main,
            player: None,
            active: 0,
            enemy: None,
            player_turn: false,
            turn: 0,
            message: None,
            message_timer: 0.0,
            action_timer: 0.0,
            after_message: CombatState::PlayerTurn,
            pending_reward: None,
            outcome: None,
            mailbox: None,
            log: Vector::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> CombatState {
        self.state
    }

    #[must_use]
    pub fn menu(&self) -> PlayerMenu {
        self.menu
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != CombatState::Inactive
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.player_turn
    }

    /// Current turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn is_capture_in_progress(&self) -> bool {
        self.mailbox.is_some()
    }

    #[must_use]
    pub fn player(&self) -> Option<&PlayerProfile> {
        self.player.as_ref()
    }

    #[must_use]
    pub fn enemy(&self) -> Option<&Combatant> {
        self.enemy.as_ref()
    }

    /// Roster index of the creature on the field.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The creature on the field, while combat is active.
    #[must_use]
    pub fn active_creature(&self) -> Option<&Combatant> {
        self.player.as_ref()?;
        self.inventory.creatures().get(self.active)
    }

    #[must_use]
    pub fn pending_reward(&self) -> Option<&Reward> {
        self.pending_reward.as_ref()
    }

    /// How the last combat ended, once it has.
    #[must_use]
    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn log(&self) -> &Vector<String> {
        &self.log
    }

    #[must_use]
    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    #[must_use]
    pub fn capture_service(&self) -> &C {
        &self.capture
    }

    pub fn capture_service_mut(&mut self) -> &mut C {
        &mut self.capture
    }

    #[must_use]
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    #[must_use]
    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            state: self.state,
            menu: self.menu,
            message: self.message.clone(),
            turn: self.turn,
            player_turn: self.player_turn,
            capture_in_progress: self.mailbox.is_some(),
            player: self.active_creature().map(CombatantSnapshot::of),
            enemy: self.enemy.as_ref().map(CombatantSnapshot::of),
            log: self.log.clone(),
        }
    }

    // === Lifecycle ===

    /// Begin combat. Fails on an empty roster or when nothing can fight.
    pub fn start(&mut self, player: PlayerProfile, enemy: Combatant) -> bool {
        accepted("start", self.try_start(player, enemy))
    }

    pub fn try_start(&mut self, player: PlayerProfile, enemy: Combatant) -> Result<()> {
        if self.state != CombatState::Inactive {
            return Err(CombatError::WrongState { state: self.state });
        }
        let creatures = self.inventory.creatures();
        if creatures.is_empty() {
            return Err(CombatError::EmptyRoster);
        }
        let active = creatures
            .iter()
            .position(|c| !c.is_defeated())
            .ok_or(CombatError::NoHealthyCreature)?;
        let player_speed = creatures[active].stats.speed;
        let player_first = if self.config.player_moves_first_on_tie {
            player_speed >= enemy.stats.speed
        } else {
            player_speed > enemy.stats.speed
        };

        info!(
            player = %player.name,
            creature = %creatures[active].name,
            enemy = %enemy.name,
            enemy_level = enemy.level,
            player_first,
            "combat started"
        );

        let intro = format!("A wild {} appeared!", enemy.name);
        self.player = Some(player);
        self.enemy = Some(enemy);
        self.active = active;
        self.player_turn = player_first;
        self.turn = 1;
        self.menu = PlayerMenu::Main;
        self.pending_reward = None;
        self.outcome = None;
        self.mailbox = None;
        self.log = Vector::new();

        self.presentation.show();
        let next = if player_first {
            CombatState::PlayerTurn
        } else {
            CombatState::EnemyTurn
        };
        self.show_message(intro, next);
        self.refresh();
        Ok(())
    }

    /// Tear the session down. Safe from any state; a no-op when inactive.
    ///
    /// Damage, shields and status effects already applied to roster
    /// creatures stay; cooldowns are reset and a pending reward is granted.
    /// A capture still in flight is cancelled on the capture service.
    pub fn end_combat(&mut self) {
        if self.state == CombatState::Inactive {
            return;
        }
        if let Some(creature) = self.inventory.creature_mut(self.active) {
            creature.stats.reset_cooldowns();
        }
        if let Some(enemy) = self.enemy.as_mut() {
            enemy.stats.reset_cooldowns();
        }
        self.grant_reward();
        if self.mailbox.take().is_some() {
            self.capture.cancel();
        }
        self.presentation.hide();

        info!(outcome = ?self.outcome, turns = self.turn, "combat ended");

        self.player = None;
        self.enemy = None;
        self.message = None;
        self.menu = PlayerMenu::Main;
        self.player_turn = false;
        self.set_state(CombatState::Inactive);
    }

    /// Advance timers and the capture collaborator by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.state == CombatState::Inactive {
            return;
        }
        if self.poll_capture(dt) {
            return;
        }

        match self.state {
            CombatState::Message => {
                self.message_timer -= dt;
                if self.message_timer <= 0.0 {
                    self.message = None;
                    self.resume(self.after_message);
                    self.refresh();
                }
            }
            CombatState::EnemyTurn => {
                self.action_timer -= dt;
                if self.action_timer <= 0.0 {
                    self.enemy_action();
                    self.refresh();
                }
            }
            CombatState::ActionExecution => {
                self.action_timer -= dt;
                if self.action_timer <= 0.0 {
                    self.enter_enemy_turn(self.config.enemy_turn_delay);
                    self.refresh();
                }
            }
            CombatState::Victory | CombatState::Capture | CombatState::Defeat | CombatState::Flee => {
                self.message_timer -= dt;
                if self.message_timer <= 0.0 {
                    if self.state == CombatState::Victory {
                        self.grant_reward();
                    }
                    info!(outcome = ?self.outcome, "combat completed");
                    self.set_state(CombatState::Completed);
                    self.refresh();
                }
            }
            CombatState::Inactive | CombatState::PlayerTurn | CombatState::Completed => {}
        }
    }

    // === Player operations ===

    /// Use the ability in `slot`.
    pub fn use_ability(&mut self, slot: usize) -> bool {
        accepted("use_ability", self.try_use_ability(slot))
    }

    pub fn try_use_ability(&mut self, slot: usize) -> Result<()> {
        self.check_player_turn()?;
        let creature = self.active_creature().ok_or(CombatError::NoHealthyCreature)?;
        if slot >= creature.abilities.len() {
            return Err(CombatError::InvalidAbility(slot));
        }
        if !creature.stats.is_skill_ready(slot) {
            return Err(CombatError::AbilityOnCooldown {
                slot,
                remaining: creature.stats.cooldown(slot),
            });
        }
        self.player_action(Intent::Ability(slot));
        Ok(())
    }

    /// Attack with the basic-attack formula. Never on cooldown.
    pub fn basic_attack(&mut self) -> bool {
        accepted("basic_attack", self.try_basic_attack())
    }

    pub fn try_basic_attack(&mut self) -> Result<()> {
        self.check_player_turn()?;
        self.player_action(Intent::Basic);
        Ok(())
    }

    /// Try to run. Failure costs the turn.
    pub fn flee(&mut self) -> bool {
        accepted("flee", self.try_flee())
    }

    pub fn try_flee(&mut self) -> Result<()> {
        self.check_player_turn()?;
        let player_speed = self.active_creature().map_or(0, |c| c.stats.speed);
        let enemy_speed = self.enemy.as_ref().map_or(0, |e| e.stats.speed);
        let chance = flee_chance(player_speed, enemy_speed);

        if self.rng.chance(chance) {
            info!(chance, "fled from combat");
            self.outcome = Some(CombatOutcome::Fled);
            self.announce("Got away safely!".to_string(), CombatState::Flee);
        } else {
            debug!(chance, "flee failed");
            self.end_player_action();
            self.show_message("Couldn't get away!".to_string(), CombatState::EnemyTurn);
        }
        self.refresh();
        Ok(())
    }

    /// Hand a capture attempt to the capture collaborator.
    pub fn start_capture(&mut self) -> bool {
        accepted("start_capture", self.try_start_capture())
    }

    pub fn try_start_capture(&mut self) -> Result<()> {
        self.check_player_turn()?;
        let enemy = self.enemy.as_ref().ok_or(CombatError::Inactive)?;
        let chance = capture_chance(enemy.stats.health_fraction(), enemy.level);
        self.begin_capture(None, chance)
    }

    /// Capture with a stone from the inventory. The stone is consumed once
    /// the collaborator accepts the attempt.
    pub fn start_capture_with_stone(&mut self, stone: CaptureStone) -> bool {
        accepted("start_capture_with_stone", self.try_start_capture_with_stone(stone))
    }

    pub fn try_start_capture_with_stone(&mut self, stone: CaptureStone) -> Result<()> {
        self.check_player_turn()?;
        if !self.inventory.has_capture_stone(&stone) {
            return Err(CombatError::StoneNotOwned);
        }
        let enemy = self.enemy.as_ref().ok_or(CombatError::Inactive)?;
        let chance = capture_chance_with_stone(enemy.stats.health_fraction(), enemy.level, &stone, enemy.element);
        self.begin_capture(Some(stone), chance)?;
        self.inventory.remove_item(&Item::CaptureStone(stone));
        Ok(())
    }

    /// Use a healing item from the inventory on the active creature.
    pub fn use_item(&mut self, index: usize) -> bool {
        accepted("use_item", self.try_use_item(index))
    }

    pub fn try_use_item(&mut self, index: usize) -> Result<()> {
        self.check_player_turn()?;
        let item = self
            .inventory
            .items()
            .get(index)
            .cloned()
            .ok_or(CombatError::InvalidItem(index))?;
        let consumable = item
            .as_consumable()
            .cloned()
            .ok_or_else(|| CombatError::UnusableItem(item.name()))?;
        if self.active_creature().is_none() {
            return Err(CombatError::NoHealthyCreature);
        }

        self.inventory.remove_item(&item);
        let line = match self.inventory.creature_mut(self.active) {
            Some(creature) => {
                let restored = creature.stats.heal(consumable.heal);
                format!("{} used a {} and restored {} HP.", creature.name, consumable.name, restored)
            }
            None => format!("{} was used.", consumable.name),
        };
        self.narrate(line);
        self.end_player_action();
        self.begin_action_display();
        self.refresh();
        Ok(())
    }

    /// Send out another roster creature.
    pub fn swap_creature(&mut self, index: usize) -> bool {
        accepted("swap_creature", self.try_swap_creature(index))
    }

    pub fn try_swap_creature(&mut self, index: usize) -> Result<()> {
        self.check_player_turn()?;
        let eligible = index != self.active
            && self
                .inventory
                .creatures()
                .get(index)
                .is_some_and(|c| !c.is_defeated());
        if !eligible {
            return Err(CombatError::InvalidSwap(index));
        }

        let outgoing = match self.inventory.creature_mut(self.active) {
            Some(creature) => {
                creature.stats.reset_for_swap();
                creature.name.clone()
            }
            None => String::new(),
        };
        self.active = index;
        let incoming = self.active_creature().map(|c| c.name.clone()).unwrap_or_default();
        debug!(%outgoing, %incoming, "creature swapped");

        self.narrate(format!("Come back, {outgoing}! Go, {incoming}!"));
        self.end_player_action();
        self.begin_action_display();
        self.refresh();
        Ok(())
    }

    /// Switch the menu shown during the player's turn.
    pub fn open_menu(&mut self, menu: PlayerMenu) -> bool {
        accepted("open_menu", self.try_open_menu(menu))
    }

    pub fn try_open_menu(&mut self, menu: PlayerMenu) -> Result<()> {
        self.check_player_turn()?;
        self.menu = menu;
        self.refresh();
        Ok(())
    }

    /// Dispatch a command to the matching operation.
    pub fn execute(&mut self, command: PlayerCommand) -> bool {
        accepted("execute", self.try_execute(command))
    }

    pub fn try_execute(&mut self, command: PlayerCommand) -> Result<()> {
        match command {
            PlayerCommand::UseAbility(slot) => self.try_use_ability(slot),
            PlayerCommand::BasicAttack => self.try_basic_attack(),
            PlayerCommand::Flee => self.try_flee(),
            PlayerCommand::Capture => self.try_start_capture(),
            PlayerCommand::CaptureWithStone(stone) => self.try_start_capture_with_stone(stone),
            PlayerCommand::UseItem(index) => self.try_use_item(index),
            PlayerCommand::Swap(index) => self.try_swap_creature(index),
            PlayerCommand::OpenMenu(menu) => self.try_open_menu(menu),
        }
    }

    /// Forward input to the presentation during the player's turn.
    ///
    /// Returns true when the presentation produced a command that was
    /// accepted.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if self.state != CombatState::PlayerTurn || self.mailbox.is_some() {
            return false;
        }
        match self.presentation.handle_input(&event) {
            Some(command) => self.execute(command),
            None => false,
        }
    }

    // === Turn resolution ===

    fn check_player_turn(&self) -> Result<()> {
        if self.state == CombatState::Inactive {
            return Err(CombatError::Inactive);
        }
        if self.mailbox.is_some() {
            return Err(CombatError::CaptureInProgress);
        }
        if self.state != CombatState::PlayerTurn {
            return Err(CombatError::WrongState { state: self.state });
        }
        Ok(())
    }

    fn player_action(&mut self, intent: Intent) {
        let lines = {
            let (Some(creature), Some(enemy)) = (self.inventory.creature_mut(self.active), self.enemy.as_mut())
            else {
                return;
            };
            take_turn(creature, enemy, intent, self.config.confusion_self_hit_chance, &mut self.rng)
        };
        self.narrate_all(lines);
        self.end_player_action();

        if self.enemy.as_ref().is_some_and(Combatant::is_defeated) {
            self.win();
        } else if self.active_creature().is_some_and(Combatant::is_defeated) {
            self.lose();
        } else {
            self.enter_enemy_turn(self.config.action_display_duration);
        }
        self.refresh();
    }

    fn enemy_action(&mut self) {
        let intent = Intent::Auto {
            respect_cooldowns: self.config.enemy_respects_cooldowns,
        };
        let lines = {
            let (Some(creature), Some(enemy)) = (self.inventory.creature_mut(self.active), self.enemy.as_mut())
            else {
                return;
            };
            take_turn(enemy, creature, intent, self.config.confusion_self_hit_chance, &mut self.rng)
        };
        self.narrate_all(lines);
        self.end_enemy_action();

        if self.active_creature().is_some_and(Combatant::is_defeated) {
            self.lose();
        } else if self.enemy.as_ref().is_some_and(Combatant::is_defeated) {
            self.win();
        } else {
            self.turn += 1;
            self.player_turn = true;
            self.menu = PlayerMenu::Main;
            self.set_state(CombatState::PlayerTurn);
        }
    }

    /// The player's creature ticks its statuses; the enemy's cooldowns tick.
    fn end_player_action(&mut self) {
        if let Some(creature) = self.inventory.creature_mut(self.active) {
            for line in tick_statuses(creature) {
                self.log.push_back(line);
            }
        }
        if let Some(enemy) = self.enemy.as_mut() {
            enemy.stats.update_cooldowns();
        }
    }

    /// The enemy ticks its statuses; the player's cooldowns tick.
    fn end_enemy_action(&mut self) {
        if let Some(enemy) = self.enemy.as_mut() {
            for line in tick_statuses(enemy) {
                self.log.push_back(line);
            }
        }
        if let Some(creature) = self.inventory.creature_mut(self.active) {
            creature.stats.update_cooldowns();
        }
    }

    fn win(&mut self) {
        let (Some(enemy), Some(player)) = (self.enemy.as_ref(), self.player.as_ref()) else {
            return;
        };
        let reward = self
            .rewards
            .generate(enemy.level, enemy.element, player.level, &mut self.rng);
        let text = format!("{} was defeated! Earned {}.", enemy.name, reward.summary());
        info!(enemy = %enemy.name, crystals = reward.crystals, "victory");

        self.pending_reward = Some(reward);
        self.outcome = Some(CombatOutcome::Victory);
        self.announce(text, CombatState::Victory);
    }

    fn lose(&mut self) {
        let name = self.active_creature().map(|c| c.name.clone()).unwrap_or_default();
        info!(creature = %name, "defeat");
        self.outcome = Some(CombatOutcome::Defeat);
        self.announce(format!("{name} fainted!"), CombatState::Defeat);
    }

    fn grant_reward(&mut self) {
        let Some(reward) = self.pending_reward.take() else {
            return;
        };
        info!(crystals = reward.crystals, reward = %reward.summary(), "reward granted");
        self.inventory.add_crystals(reward.crystals);
        for item in reward.into_items() {
            self.inventory.add_item(item);
        }
    }

    // === Capture ===

    fn begin_capture(&mut self, stone: Option<CaptureStone>, chance: f64) -> Result<()> {
        let (Some(player), Some(enemy)) = (self.player.as_ref(), self.enemy.as_ref()) else {
            return Err(CombatError::Inactive);
        };
        let line = match &stone {
            Some(stone) => format!("{} threw a {} at {}!", player.name, stone.name(), enemy.name),
            None => format!("{} is trying to capture {}!", player.name, enemy.name),
        };
        let request = CaptureRequest {
            player: player.clone(),
            target: enemy.clone(),
            stone,
            chance,
        };

        let (mailbox, reply) = CaptureMailbox::open();
        if !self.capture.start_capture(request, reply) {
            return Err(CombatError::CaptureRejected);
        }
        debug!(chance, ?stone, "capture started");
        self.mailbox = Some(mailbox);
        self.menu = PlayerMenu::CaptureSelect;
        self.narrate(line);
        self.refresh();
        Ok(())
    }

    /// Returns true when the capture collaborator owns this tick.
    fn poll_capture(&mut self, dt: f32) -> bool {
        let Some(mailbox) = self.mailbox.as_ref() else {
            return false;
        };
        if let Some(result) = mailbox.take() {
            self.mailbox = None;
            self.finish_capture(result);
            return true;
        }
        if self.capture.is_active() {
            self.capture.update(dt);
            self.capture.render();
            return true;
        }
        if mailbox.is_abandoned() {
            debug!("capture reply dropped without a result");
            self.mailbox = None;
            self.capture_failed();
        }
        true
    }

    fn finish_capture(&mut self, result: CaptureResult) {
        self.menu = PlayerMenu::Main;
        if !result.success {
            self.capture_failed();
            return;
        }
        let mut creature = result.creature;
        creature.stats.reset_for_swap();
        let name = creature.name.clone();
        info!(creature = %name, player = %result.player.name, "creature captured");

        self.inventory.add_creature(creature);
        self.outcome = Some(CombatOutcome::Captured);
        self.announce(format!("Gotcha! {name} was captured!"), CombatState::Capture);
        self.refresh();
    }

    fn capture_failed(&mut self) {
        let name = self.enemy.as_ref().map(|e| e.name.clone()).unwrap_or_default();
        self.menu = PlayerMenu::Main;
        self.end_player_action();
        self.show_message(format!("{name} broke free!"), CombatState::EnemyTurn);
        self.refresh();
    }

    // === State plumbing ===

    fn set_state(&mut self, next: CombatState) {
        debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }

    fn resume(&mut self, next: CombatState) {
        match next {
            CombatState::EnemyTurn => self.enter_enemy_turn(self.config.enemy_turn_delay),
            CombatState::PlayerTurn => {
                self.player_turn = true;
                self.menu = PlayerMenu::Main;
                self.set_state(CombatState::PlayerTurn);
            }
            other => self.set_state(other),
        }
    }

    fn enter_enemy_turn(&mut self, delay: f32) {
        self.player_turn = false;
        self.action_timer = delay;
        self.set_state(CombatState::EnemyTurn);
    }

    fn begin_action_display(&mut self) {
        self.action_timer = self.config.action_display_duration;
        self.set_state(CombatState::ActionExecution);
    }

    /// Timed message, then `next`.
    fn show_message(&mut self, text: String, next: CombatState) {
        self.narrate(text);
        self.message_timer = self.config.message_duration;
        self.after_message = next;
        self.set_state(CombatState::Message);
    }

    /// Closing message for a terminal state.
    fn announce(&mut self, text: String, state: CombatState) {
        self.narrate(text);
        self.message_timer = self.config.message_duration;
        self.set_state(state);
    }

    fn narrate(&mut self, text: String) {
        self.log.push_back(text.clone());
        self.message = Some(text);
    }

    fn narrate_all(&mut self, lines: Lines) {
        if lines.is_empty() {
            return;
        }
        self.message = Some(lines.join(" "));
        for line in lines {
            self.log.push_back(line);
        }
    }

    fn refresh(&mut self) {
        let snapshot = self.snapshot();
        self.presentation.refresh(&snapshot);
    }
}

fn accepted(operation: &'static str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(reason) => {
            debug!(operation, %reason, "operation rejected");
            false
        }
    }
}

/// One action by `actor` against `target`. Returns the narration.
fn take_turn(
    actor: &mut Combatant,
    target: &mut Combatant,
    intent: Intent,
    self_hit_chance: f64,
    rng: &mut impl RandomSource,
) -> Lines {
    let mut lines = Lines::new();
    let plan = plan_turn(&actor.stats, self_hit_chance, rng);

    if let Some(phase) = plan.phase_effect {
        actor.stats.add_status_effect(phase, PHASE_DURATION);
        lines.push(format!("{}'s instability leaves it {}!", actor.name, phase));
    }

    match plan.action {
        TurnAction::Skip(kind) => {
            lines.push(format!("{} is {} and cannot act!", actor.name, kind));
        }
        TurnAction::HitSelf => {
            let report = resolve_self_hit(actor, rng);
            lines.push(format!(
                "{} is confused and hurt itself for {} damage!",
                actor.name,
                report.total()
            ));
        }
        TurnAction::Act => {
            let slot = match intent {
                Intent::Ability(slot) => Some(slot),
                Intent::Basic => None,
                Intent::Auto { respect_cooldowns } => actor.choose_ability(respect_cooldowns, rng),
            };
            let ability = slot.and_then(|s| actor.abilities.get(s).cloned().map(|a| (s, a)));
            let (strike, label) = match &ability {
                Some((_, a)) => (Strike::Ability(a), a.name.as_str()),
                None => (Strike::Basic, "Attack"),
            };
            let outcome = resolve_strike(actor, target, strike, rng);
            describe(&mut lines, &actor.name, label, &target.name, &outcome);
            if let Some((slot, a)) = &ability {
                actor.stats.set_cooldown(*slot, a.cooldown);
            }
        }
    }
    lines
}

fn describe(lines: &mut Lines, attacker: &str, label: &str, defender: &str, outcome: &StrikeOutcome) {
    if !outcome.hit {
        lines.push(format!("{attacker} used {label}, but it missed!"));
        return;
    }
    let damage = outcome.report.total();
    if outcome.critical {
        lines.push(format!("{attacker} used {label}! A critical hit on {defender} for {damage} damage!"));
    } else {
        lines.push(format!("{attacker} used {label} on {defender} for {damage} damage!"));
    }
    if let Some(effect) = outcome.inflicted {
        lines.push(format!("{defender} is now {effect}!"));
    }
    for special in &outcome.specials {
        lines.push(format!("{attacker}'s {special} activated!"));
    }
    if outcome.healed > 0 {
        lines.push(format!("{attacker} drained {} HP.", outcome.healed));
    }
}

fn tick_statuses(combatant: &mut Combatant) -> SmallVec<[String; 2]> {
    combatant
        .stats
        .update_status_effects()
        .into_iter()
        .map(|kind| format!("{}'s {} wore off.", combatant.name, kind))
        .collect()
}
