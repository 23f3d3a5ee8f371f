//! Capture collaborator plumbing.
//!
//! The session hands a [`CaptureService`] a request plus a [`CaptureReply`].
//! The service may resolve the reply on any later tick; `resolve` consumes
//! it, so a result is delivered at most once. The session drains the result
//! at the top of its next `update`. A reply dropped unresolved counts as a
//! failed attempt once the service goes idle.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use super::combatant::{Combatant, PlayerProfile};
use crate::core::{CombatRng, RandomSource};
use crate::items::CaptureStone;

type Slot = Rc<RefCell<Option<CaptureResult>>>;

/// What the session asks the capture collaborator to attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureRequest {
    pub player: PlayerProfile,
    pub target: Combatant,
    pub stone: Option<CaptureStone>,
    /// Precomputed success probability.
    pub chance: f64,
}

/// Outcome reported back by the capture collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureResult {
    pub player: PlayerProfile,
    pub creature: Combatant,
    pub success: bool,
}

/// One-shot callback for a capture attempt.
#[derive(Debug)]
pub struct CaptureReply {
    slot: Slot,
}

impl CaptureReply {
    /// Deliver the result.
    pub fn resolve(self, result: CaptureResult) {
        trace!(success = result.success, "capture reply resolved");
        *self.slot.borrow_mut() = Some(result);
    }
}

/// Session side of a [`CaptureReply`].
#[derive(Debug)]
pub(crate) struct CaptureMailbox {
    slot: Slot,
}

impl CaptureMailbox {
    pub(crate) fn open() -> (Self, CaptureReply) {
        let slot: Slot = Rc::new(RefCell::new(None));
        (Self { slot: Rc::clone(&slot) }, CaptureReply { slot })
    }

    pub(crate) fn take(&self) -> Option<CaptureResult> {
        self.slot.borrow_mut().take()
    }

    /// The reply was dropped without resolving.
    pub(crate) fn is_abandoned(&self) -> bool {
        Rc::strong_count(&self.slot) == 1 && self.slot.borrow().is_none()
    }
}

/// External capture collaborator.
pub trait CaptureService {
    /// Begin an attempt. Returns false to refuse it; the reply is then dropped.
    fn start_capture(&mut self, request: CaptureRequest, reply: CaptureReply) -> bool;

    /// Whether an attempt is in progress.
    fn is_active(&self) -> bool;

    /// Advance the attempt by `dt` seconds.
    fn update(&mut self, dt: f32);

    fn render(&self) {}

    /// Abandon the attempt in progress, if any. Called when combat ends
    /// before the reply arrives.
    fn cancel(&mut self) {}
}

/// Seconds [`ChanceCapture`] shakes before rolling.
pub const DEFAULT_SHAKE_DURATION: f32 = 1.5;

struct Attempt {
    request: CaptureRequest,
    reply: CaptureReply,
    remaining: f32,
}

/// Built-in capture service: waits out a shake, then rolls the request's
/// chance on its own RNG.
pub struct ChanceCapture {
    rng: CombatRng,
    shake_duration: f32,
    attempt: Option<Attempt>,
}

impl ChanceCapture {
    #[must_use]
    pub fn new(rng: CombatRng) -> Self {
        Self {
            rng,
            shake_duration: DEFAULT_SHAKE_DURATION,
            attempt: None,
        }
    }

    #[must_use]
    pub fn with_shake_duration(mut self, seconds: f32) -> Self {
        self.shake_duration = seconds;
        self
    }
}

impl CaptureService for ChanceCapture {
    fn start_capture(&mut self, request: CaptureRequest, reply: CaptureReply) -> bool {
        if self.attempt.is_some() {
            return false;
        }
        self.attempt = Some(Attempt {
            request,
            reply,
            remaining: self.shake_duration,
        });
        true
    }

    fn is_active(&self) -> bool {
        self.attempt.is_some()
    }

    fn cancel(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            trace!(creature = %attempt.request.target.name, "capture cancelled");
        }
    }

    fn update(&mut self, dt: f32) {
        let done = match self.attempt.as_mut() {
            Some(attempt) => {
                attempt.remaining -= dt;
                attempt.remaining <= 0.0
            }
            None => false,
        };
        if !done {
            return;
        }
        if let Some(Attempt { request, reply, .. }) = self.attempt.take() {
            let success = self.rng.chance(request.chance);
            reply.resolve(CaptureResult {
                player: request.player,
                creature: request.target,
                success,
            });
        }
    }
}
