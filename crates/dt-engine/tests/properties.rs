//! Range and convergence properties over arbitrary requests.

use dt_core::{DiceGroup, DieKind, Orientation, RollRequest};
use dt_engine::OutcomeGenerator;
use dt_engine::resolver::{settle_step, spin_step};
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = DieKind> {
    proptest::sample::select(DieKind::ALL.to_vec())
}

fn any_request() -> impl Strategy<Value = RollRequest> {
    (
        proptest::collection::vec((any_kind(), 1u32..8), 1..4),
        -20i32..20,
    )
        .prop_map(|(groups, modifier)| {
            let groups: Vec<DiceGroup> = groups
                .into_iter()
                .map(|(kind, count)| DiceGroup::new(kind.id(), count))
                .collect();
            RollRequest::compose(&groups, modifier).unwrap()
        })
}

proptest! {
    #[test]
    fn totals_within_request_bounds(request in any_request(), seed in any::<u64>()) {
        let outcome = OutcomeGenerator::seeded(seed).evaluate(&request);
        prop_assert!(outcome.total() >= request.min_total());
        prop_assert!(outcome.total() <= request.max_total());
        prop_assert_eq!(outcome.groups().len(), request.groups().len());
        for (group, rolled) in request.groups().iter().zip(outcome.groups()) {
            prop_assert_eq!(rolled.die, group.die);
            prop_assert_eq!(rolled.results.len() as u32, group.count);
            for value in &rolled.results {
                prop_assert!(group.die.spec().face(*value).is_some());
            }
        }
    }

    #[test]
    fn settle_step_shrinks_distance(
        (x, y, z) in (-20.0f32..20.0, -20.0f32..20.0, -20.0f32..20.0),
        kind in any_kind(),
        pick in any::<prop::sample::Index>(),
        rate in 0.01f32..0.5,
    ) {
        let faces = kind.spec().faces;
        let target = faces[pick.index(faces.len())].orientation;
        let start = Orientation::new(x, y, z).unwrapped_toward(target);
        let before = start.distance_to(target);
        prop_assume!(before > 1e-3);
        let after = settle_step(start, target, rate).distance_to(target);
        prop_assert!(after < before);
        prop_assert!(before <= std::f32::consts::PI + 1e-3);
    }

    #[test]
    fn spin_step_decays_velocity(
        (vx, vy, vz) in (-4.0f32..4.0, -4.0f32..4.0, -4.0f32..4.0),
        decay in 0.5f32..0.999,
    ) {
        let velocity = dt_core::AngularVelocity::new(vx, vy, vz);
        let (orientation, next) = spin_step(Orientation::IDENTITY, velocity, 1.0 / 60.0, decay);
        prop_assert!(orientation.is_finite());
        prop_assert!(next.magnitude() <= velocity.magnitude());
    }
}
