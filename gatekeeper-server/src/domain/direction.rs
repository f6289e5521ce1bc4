use serde::{Deserialize, Serialize};

use crate::domain::shipyard::ActivatorBeacon;

/// Direction of passage inferred from an ordered `(previous, current)`
/// activator-beacon pair, or a reason the pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Entering,
    Leaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Same beacon crossed twice in a row: no movement.
    NoMovement,
    /// The pair spans two different shipyards: cross-yard noise.
    CrossYard,
    /// Both beacons share the same `is_first_when_entering` role.
    AmbiguousRole,
}

/// Given the beacon the tag was last paired with (`previous`) and
/// the beacon it was just seen at (`current`), decide the direction of
/// passage. Rules are applied in a fixed order; the first matching
/// rule wins.
pub fn resolve(
    previous: &ActivatorBeacon,
    current: &ActivatorBeacon,
) -> Result<Direction, RejectReason> {
    if previous.id == current.id {
        return Err(RejectReason::NoMovement);
    }
    if previous.shipyard_id != current.shipyard_id {
        return Err(RejectReason::CrossYard);
    }
    match (previous.is_first_when_entering, current.is_first_when_entering) {
        (true, false) => Ok(Direction::Entering),
        (false, true) => Ok(Direction::Leaving),
        _ => Err(RejectReason::AmbiguousRole),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beacon(id: i64, shipyard_id: i64, is_first: bool) -> ActivatorBeacon {
        ActivatorBeacon {
            id,
            friendly_number: id as i32,
            shipyard_id,
            is_first_when_entering: is_first,
        }
    }

    #[test]
    fn first_then_second_is_entering() {
        let prev = beacon(1, 1, true);
        let cur = beacon(2, 1, false);
        assert_eq!(resolve(&prev, &cur), Ok(Direction::Entering));
    }

    #[test]
    fn second_then_first_is_leaving() {
        let prev = beacon(2, 1, false);
        let cur = beacon(1, 1, true);
        assert_eq!(resolve(&prev, &cur), Ok(Direction::Leaving));
    }

    #[test]
    fn same_beacon_rejects() {
        let prev = beacon(1, 1, true);
        let cur = beacon(1, 1, true);
        assert_eq!(resolve(&prev, &cur), Err(RejectReason::NoMovement));
    }

    #[test]
    fn cross_yard_rejects() {
        let prev = beacon(1, 1, true);
        let cur = beacon(99, 2, false);
        assert_eq!(resolve(&prev, &cur), Err(RejectReason::CrossYard));
    }

    #[test]
    fn two_firsts_rejects() {
        let prev = beacon(1, 1, true);
        let cur = beacon(3, 1, true);
        assert_eq!(resolve(&prev, &cur), Err(RejectReason::AmbiguousRole));
    }

    #[test]
    fn two_seconds_rejects() {
        let prev = beacon(2, 1, false);
        let cur = beacon(4, 1, false);
        assert_eq!(resolve(&prev, &cur), Err(RejectReason::AmbiguousRole));
    }

    /// Swapping the `is_first_when_entering` flags of a gate's two
    /// beacons inverts the emitted direction for every pair.
    #[test]
    fn direction_symmetry_under_role_swap() {
        let a = beacon(1, 1, true);
        let b = beacon(2, 1, false);
        let forward = resolve(&a, &b);
        let a_swapped = beacon(1, 1, false);
        let b_swapped = beacon(2, 1, true);
        let swapped = resolve(&b_swapped, &a_swapped);
        match (forward, swapped) {
            (Ok(Direction::Entering), Ok(Direction::Leaving)) => {}
            (Ok(Direction::Leaving), Ok(Direction::Entering)) => {}
            other => panic!("expected inverted direction, got {other:?}"),
        }
    }
}
