use std::time::Duration;

use tracing::{debug, info};

use dt_core::{
    DiceGroup, DiceResult, DieKind, DieKindInfo, Orientation, RollOutcome, RollPhase,
    RollRequest, catalog,
};

use crate::clock::FrameClock;
use crate::config::EngineConfig;
use crate::error::ConfigResult;
use crate::event::Observers;
use crate::generator::OutcomeGenerator;
use crate::ledger::{HistoryEntry, HistoryLedger};
use crate::machine::{PhaseChange, RollMachine, RollState};
use crate::resolver::OrientationResolver;

/// One dice tray: a single in-flight roll, its die's orientation, and the
/// history of completed rolls.
///
/// The engine never sleeps or spawns. The caller drives it by calling
/// [`tick`](Self::tick) (fixed frame delta) or [`tick_with`](Self::tick_with)
/// (measured delta) once per frame; spin time, settling, and history all
/// advance from those calls.
#[derive(Debug)]
pub struct DiceEngine {
    config: EngineConfig,
    clock: FrameClock,
    generator: OutcomeGenerator,
    machine: RollMachine,
    resolver: OrientationResolver,
    ledger: HistoryLedger,
    observers: Observers,
}

impl DiceEngine {
    /// Die shown before anything is rolled.
    pub const DEFAULT_DIE: DieKind = DieKind::D20;

    /// Build an idle engine from a validated config.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        let generator = match config.seed {
            Some(seed) => OutcomeGenerator::seeded(seed),
            None => OutcomeGenerator::from_os(),
        };
        Ok(Self {
            clock: FrameClock::new(config.frame_delta()),
            machine: RollMachine::new(config.spin_duration()),
            resolver: OrientationResolver::from_config(Self::DEFAULT_DIE, &config),
            ledger: HistoryLedger::new(config.history_capacity),
            observers: Observers::new(),
            generator,
            config,
        })
    }

    /// Every supported die kind, in catalog order.
    pub fn list_dice_kinds(&self) -> Vec<DieKindInfo> {
        catalog::list_kinds()
    }

    /// Validate `groups` and freeze them with `modifier` into a request.
    /// Leaves the engine untouched.
    pub fn compose_request(&self, groups: &[DiceGroup], modifier: i32) -> DiceResult<RollRequest> {
        RollRequest::compose(groups, modifier)
    }

    /// Start rolling `request`.
    ///
    /// Fails with `RollAlreadyInProgress` while a roll is spinning or
    /// settling; the in-flight roll is not disturbed.
    pub fn begin_roll(&mut self, request: RollRequest) -> DiceResult<PhaseChange> {
        let die = request.primary_die();
        let expression = request.expression();
        let change = self.machine.begin(request).inspect_err(|err| {
            debug!(%expression, "ignoring roll: {err}");
        })?;
        self.resolver.set_die(die);
        let velocity = self.generator.spin_velocity(self.config.max_spin_speed);
        self.resolver.begin_free_spin(velocity);
        debug!(%expression, %change, "roll started");
        self.observers.emit_phase(change.to);
        Ok(change)
    }

    /// Show `kind` on the tray between rolls. Ignored while a roll is in
    /// flight; returns whether the die was switched.
    pub fn preview_die(&mut self, kind: DieKind) -> bool {
        if self.phase().is_rolling() {
            return false;
        }
        self.resolver.set_die(kind);
        true
    }

    /// Advance one fixed frame.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        self.tick_with(self.clock.frame_delta())
    }

    /// Advance one frame of length `dt`. Returns the phase change this
    /// frame caused, if any.
    pub fn tick_with(&mut self, dt: Duration) -> Option<PhaseChange> {
        self.clock.advance_by(dt);
        let change = match self.machine.phase() {
            RollPhase::Idle | RollPhase::Settled => return None,
            RollPhase::Spinning => self.tick_spinning(dt),
            RollPhase::Settling => self.tick_settling(dt),
        };
        if let Some(change) = change {
            debug!(%change, tick = self.clock.tick(), "phase change");
            self.observers.emit_phase(change.to);
        }
        change
    }

    fn tick_spinning(&mut self, dt: Duration) -> Option<PhaseChange> {
        let orientation = self.resolver.step(dt.as_secs_f32());
        self.observers.emit_orientation(orientation);

        let change = self.machine.elapse(dt, &mut self.generator)?;
        let face = self
            .machine
            .state()
            .outcome()
            .and_then(RollOutcome::primary_face);
        if let Some((die, face)) = face {
            self.resolver.set_die(die);
            // An unknown face is logged by the resolver, which holds its pose.
            let _ = self.resolver.set_target_face(face);
        }
        Some(change)
    }

    fn tick_settling(&mut self, dt: Duration) -> Option<PhaseChange> {
        self.resolver.step(dt.as_secs_f32());
        let converged = self.resolver.has_converged();
        if converged {
            self.resolver.come_to_rest();
        }
        self.observers.emit_orientation(self.resolver.orientation());
        if !converged {
            return None;
        }

        let change = self.machine.converge()?;
        if let RollState::Settled { request, outcome } = self.machine.state() {
            let entry = self.ledger.record(request, outcome.clone());
            info!(
                expression = %entry.expression,
                total = outcome.total(),
                "roll settled: {}",
                outcome.breakdown()
            );
            self.observers.emit_outcome(outcome);
        }
        Some(change)
    }

    /// Drop the current roll from any phase. The die stops where it is and
    /// the history is kept.
    pub fn reset(&mut self) -> Option<PhaseChange> {
        self.resolver.halt();
        let change = self.machine.reset()?;
        debug!(%change, "roll reset");
        self.observers.emit_phase(change.to);
        Some(change)
    }

    /// Tick at the fixed frame delta until the current roll settles, giving
    /// up after `max_ticks`. Returns the displayed outcome.
    pub fn run_until_settled(&mut self, max_ticks: u64) -> Option<&RollOutcome> {
        for _ in 0..max_ticks {
            if !self.phase().is_rolling() {
                break;
            }
            self.tick();
        }
        self.displayed_outcome()
    }

    /// Current phase.
    pub fn phase(&self) -> RollPhase {
        self.machine.phase()
    }

    /// Full roll state.
    pub fn state(&self) -> &RollState {
        self.machine.state()
    }

    /// The die being rendered.
    pub fn die(&self) -> DieKind {
        self.resolver.die()
    }

    /// Current orientation of the rendered die.
    pub fn orientation(&self) -> Orientation {
        self.resolver.orientation()
    }

    /// The outcome on display; only set once the die has settled.
    pub fn displayed_outcome(&self) -> Option<&RollOutcome> {
        match self.machine.state() {
            RollState::Settled { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// The request of the current or last roll.
    pub fn request(&self) -> Option<&RollRequest> {
        self.machine.state().request()
    }

    /// Snapshot of the history, newest first.
    pub fn get_history(&self) -> Vec<HistoryEntry> {
        self.ledger.list()
    }

    /// The history ledger.
    pub fn history(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// The frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register a hook called with the new phase on every phase change.
    pub fn on_phase_change(&mut self, hook: impl FnMut(RollPhase) + 'static) {
        self.observers.on_phase_change(hook);
    }

    /// Register a hook called with the die's orientation on every moving tick.
    pub fn on_orientation_tick(&mut self, hook: impl FnMut(Orientation) + 'static) {
        self.observers.on_orientation_tick(hook);
    }

    /// Register a hook called with each outcome as it is displayed.
    pub fn on_outcome(&mut self, hook: impl FnMut(&RollOutcome) + 'static) {
        self.observers.on_outcome(hook);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DiceEngine {
        DiceEngine::new(
            EngineConfig::default()
                .with_seed(21)
                .with_spin_duration(Duration::from_millis(200)),
        )
        .unwrap()
    }

    fn d20(engine: &DiceEngine) -> RollRequest {
        engine
            .compose_request(&[DiceGroup::new("d20", 1)], 0)
            .unwrap()
    }

    #[test]
    fn new_engine_is_idle() {
        let engine = engine();
        assert_eq!(engine.phase(), RollPhase::Idle);
        assert_eq!(engine.die(), DieKind::D20);
        assert_eq!(engine.orientation(), OrientationResolver::REST_POSE);
        assert!(engine.displayed_outcome().is_none());
        assert_eq!(engine.list_dice_kinds().len(), 7);
    }

    #[test]
    fn rejects_invalid_config() {
        let err = DiceEngine::new(EngineConfig::default().with_settle_rate(1.5)).unwrap_err();
        assert!(err.to_string().contains("settle_rate"));
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut engine = engine();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.orientation(), OrientationResolver::REST_POSE);
        assert_eq!(engine.clock().tick(), 1);
    }

    #[test]
    fn settled_die_shows_rolled_face() {
        let mut engine = engine();
        let request = d20(&engine);
        engine.begin_roll(request).unwrap();
        let outcome = engine.run_until_settled(10_000).cloned().unwrap();
        let (die, face) = outcome.primary_face().unwrap();
        assert_eq!(die, DieKind::D20);
        let target = die.spec().orientation_for(face).unwrap();
        assert!(engine.orientation().distance_to(target) < 1e-6);
    }

    #[test]
    fn spin_lasts_configured_duration() {
        let mut engine = engine();
        engine.begin_roll(d20(&engine)).unwrap();
        let mut ticks = 0;
        while engine.phase() == RollPhase::Spinning {
            engine.tick_with(Duration::from_millis(50));
            ticks += 1;
        }
        assert_eq!(ticks, 4);
        assert_eq!(engine.phase(), RollPhase::Settling);
    }

    #[test]
    fn preview_only_between_rolls() {
        let mut engine = engine();
        assert!(engine.preview_die(DieKind::D6));
        assert_eq!(engine.die(), DieKind::D6);

        engine.begin_roll(d20(&engine)).unwrap();
        assert!(!engine.preview_die(DieKind::D4));
        assert_eq!(engine.die(), DieKind::D20);
    }

    #[test]
    fn reset_keeps_history() {
        let mut engine = engine();
        engine.begin_roll(d20(&engine)).unwrap();
        engine.run_until_settled(10_000);
        assert_eq!(engine.history().len(), 1);

        let change = engine.reset().unwrap();
        assert_eq!(change.from, RollPhase::Settled);
        assert!(engine.request().is_none());
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.reset(), None);
    }
}
