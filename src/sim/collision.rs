//! Runner vs elevator collision detection
//!
//! Two phases per car:
//! - broad: vertical center distance within the sum of the full half-heights
//! - narrow: the car's full box against the runner's box shrunk by the
//!   leniency insets
//!
//! Only the runner is shrunk, so grazing a car is forgiven.

use glam::Vec2;

use super::elevator::Elevator;
use super::player::Player;

/// Conditions that switch collision checks off entirely
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionGate {
    pub invulnerable: bool,
    pub paused: bool,
    /// Developer toggle
    pub ignore_collisions: bool,
}

impl CollisionGate {
    #[inline]
    pub fn is_open(&self) -> bool {
        !(self.invulnerable || self.paused || self.ignore_collisions)
    }
}

/// Vertical broad phase using full heights
#[inline]
pub fn vertically_close(player: &Player, elevator: &Elevator) -> bool {
    let combined_half_heights = player.size.y / 2.0 + elevator.height / 2.0;
    (elevator.y - player.pos.y).abs() <= combined_half_heights
}

/// Returns the id of the first car the runner hits, if any.
///
/// A runner standing still is never hit.
pub fn check(
    player: &Player,
    elevators: &[Elevator],
    leniency: Vec2,
    gate: CollisionGate,
) -> Option<u32> {
    if !gate.is_open() || !player.moving {
        return None;
    }

    let hitbox = player.hitbox(leniency);
    elevators
        .iter()
        .find(|elevator| vertically_close(player, elevator) && hitbox.intersects(&elevator.bounds()))
        .map(|elevator| elevator.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::Direction;
    use crate::settings::PlayerTuning;

    const LENIENCY: Vec2 = Vec2::new(5.0, 3.0);

    fn car(id: u32, x: f32, y: f32) -> Elevator {
        Elevator {
            id,
            x,
            y,
            baseline_y: y,
            amplitude: 0.0,
            angular_speed: 0.0,
            phase: 0.0,
            width: 20.0,
            height: 60.0,
        }
    }

    fn running_at(x: f32, y: f32) -> Player {
        let mut p = Player::new(&PlayerTuning::default(), Vec2::new(x, y));
        p.commit(Direction::Right);
        p
    }

    #[test]
    fn test_direct_hit() {
        let p = running_at(100.0, 300.0);
        let cars = [car(0, 100.0, 300.0)];
        assert_eq!(check(&p, &cars, LENIENCY, CollisionGate::default()), Some(0));
    }

    #[test]
    fn test_first_hit_wins() {
        let p = running_at(100.0, 300.0);
        let cars = [car(0, 500.0, 300.0), car(3, 95.0, 300.0), car(4, 105.0, 300.0)];
        assert_eq!(check(&p, &cars, LENIENCY, CollisionGate::default()), Some(3));
    }

    #[test]
    fn test_gate_disables_checks() {
        let p = running_at(100.0, 300.0);
        let cars = [car(0, 100.0, 300.0)];
        for gate in [
            CollisionGate { invulnerable: true, ..Default::default() },
            CollisionGate { paused: true, ..Default::default() },
            CollisionGate { ignore_collisions: true, ..Default::default() },
        ] {
            assert_eq!(check(&p, &cars, LENIENCY, gate), None);
        }
    }

    #[test]
    fn test_standing_runner_is_safe() {
        let mut p = running_at(100.0, 300.0);
        p.stop();
        let cars = [car(0, 100.0, 300.0)];
        assert_eq!(check(&p, &cars, LENIENCY, CollisionGate::default()), None);
    }

    #[test]
    fn test_horizontal_leniency_forgives_graze() {
        // Runner spans 70..130, hitbox 72.5..127.5. Car spans x-10..x+10.
        let p = running_at(100.0, 300.0);

        // Car left edge at 129: touches full box, misses the hitbox
        let graze = [car(0, 139.0, 300.0)];
        assert_eq!(check(&p, &graze, LENIENCY, CollisionGate::default()), None);

        // Car left edge at 127: inside the hitbox
        let hit = [car(0, 137.0, 300.0)];
        assert_eq!(check(&p, &hit, LENIENCY, CollisionGate::default()), Some(0));
    }

    #[test]
    fn test_vertical_leniency_forgives_graze() {
        // Runner spans 285..315, hitbox 286.5..313.5. Car is 60 tall.
        let p = running_at(100.0, 300.0);

        // Car bottom at 286: overlaps full box only
        let graze = [car(0, 100.0, 256.0)];
        assert!(vertically_close(&p, &graze[0]));
        assert_eq!(check(&p, &graze, LENIENCY, CollisionGate::default()), None);

        // Car bottom at 287: inside the hitbox
        let hit = [car(0, 100.0, 257.0)];
        assert_eq!(check(&p, &hit, LENIENCY, CollisionGate::default()), Some(0));
    }

    #[test]
    fn test_broad_phase_uses_full_heights() {
        let p = running_at(100.0, 300.0);
        // Center distance 45 == 15 + 30
        assert!(vertically_close(&p, &car(0, 100.0, 255.0)));
        assert!(!vertically_close(&p, &car(0, 100.0, 254.0)));
    }
}
