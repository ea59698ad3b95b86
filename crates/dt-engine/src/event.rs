use dt_core::{Orientation, RollOutcome, RollPhase};

type PhaseHook = Box<dyn FnMut(RollPhase)>;
type OrientationHook = Box<dyn FnMut(Orientation)>;
type OutcomeHook = Box<dyn FnMut(&RollOutcome)>;

/// Read-only observation hooks registered on a [`DiceEngine`](crate::DiceEngine).
///
/// Hooks run synchronously inside the tick that produced the event, in
/// registration order.
#[derive(Default)]
pub struct Observers {
    phase: Vec<PhaseHook>,
    orientation: Vec<OrientationHook>,
    outcome: Vec<OutcomeHook>,
}

impl Observers {
    /// No hooks registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `hook` with the new phase after every phase change.
    pub fn on_phase_change(&mut self, hook: impl FnMut(RollPhase) + 'static) {
        self.phase.push(Box::new(hook));
    }

    /// Call `hook` with the die's orientation after every tick that moves it.
    pub fn on_orientation_tick(&mut self, hook: impl FnMut(Orientation) + 'static) {
        self.orientation.push(Box::new(hook));
    }

    /// Call `hook` when a roll settles and its outcome is displayed.
    pub fn on_outcome(&mut self, hook: impl FnMut(&RollOutcome) + 'static) {
        self.outcome.push(Box::new(hook));
    }

    pub(crate) fn emit_phase(&mut self, phase: RollPhase) {
        for hook in &mut self.phase {
            hook(phase);
        }
    }

    pub(crate) fn emit_orientation(&mut self, orientation: Orientation) {
        for hook in &mut self.orientation {
            hook(orientation);
        }
    }

    pub(crate) fn emit_outcome(&mut self, outcome: &RollOutcome) {
        for hook in &mut self.outcome {
            hook(outcome);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("phase", &self.phase.len())
            .field("orientation", &self.orientation.len())
            .field("outcome", &self.outcome.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn hooks_run_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            observers.on_phase_change(move |phase| seen.borrow_mut().push(format!("{tag}:{phase}")));
        }
        observers.emit_phase(RollPhase::Spinning);
        assert_eq!(*seen.borrow(), vec!["first:spinning", "second:spinning"]);
    }

    #[test]
    fn debug_counts_hooks() {
        let mut observers = Observers::new();
        observers.on_outcome(|_| {});
        observers.on_orientation_tick(|_| {});
        observers.on_orientation_tick(|_| {});
        assert_eq!(
            format!("{observers:?}"),
            "Observers { phase: 0, orientation: 2, outcome: 1 }"
        );
    }
}
