use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dt_core::{
    AngularVelocity, DiceGroup, DiceResult, DieKind, GroupResult, RequestGroup, RollOutcome,
    RollRequest, catalog,
};

/// Draws die values, spin velocities, and whole roll outcomes.
///
/// Values are picked uniformly from the die's face table, so every value
/// the generator can produce has an orientation in the catalog.
#[derive(Debug, Clone)]
pub struct OutcomeGenerator<R = StdRng> {
    rng: R,
}

impl OutcomeGenerator<StdRng> {
    /// A generator with a fixed seed, for reproducible rolls.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A generator seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> OutcomeGenerator<R> {
    /// Wrap an existing RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Roll one die by id.
    pub fn roll_one(&mut self, die_id: &str) -> DiceResult<u32> {
        let spec = catalog::lookup(die_id)?;
        Ok(self.roll_kind(spec.kind))
    }

    /// Roll one die of a known kind.
    pub fn roll_kind(&mut self, kind: DieKind) -> u32 {
        let faces = kind.spec().faces;
        faces[self.rng.random_range(0..faces.len())].value
    }

    /// Roll every die in a raw group, validating it first.
    pub fn roll_group(&mut self, group: &DiceGroup) -> DiceResult<Vec<u32>> {
        let resolved = group.resolve()?;
        Ok(self.roll_resolved(resolved).results)
    }

    /// Roll every group of a request in order and total the result.
    pub fn evaluate(&mut self, request: &RollRequest) -> RollOutcome {
        let groups = request
            .groups()
            .iter()
            .map(|g| self.roll_resolved(*g))
            .collect();
        RollOutcome::new(groups, request.modifier())
    }

    /// A random spin with each axis uniform in `[-max_speed, max_speed)`.
    pub fn spin_velocity(&mut self, max_speed: f32) -> AngularVelocity {
        AngularVelocity::new(
            self.rng.random_range(-max_speed..max_speed),
            self.rng.random_range(-max_speed..max_speed),
            self.rng.random_range(-max_speed..max_speed),
        )
    }

    fn roll_resolved(&mut self, group: RequestGroup) -> GroupResult {
        let results = (0..group.count).map(|_| self.roll_kind(group.die)).collect();
        GroupResult {
            die: group.die,
            results,
        }
    }
}
