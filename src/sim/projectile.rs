//! Banana flight
//!
//! Semi-implicit Euler: velocity is updated from acceleration first, then
//! position from the new velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Player, PlayerId};
use crate::error::SimError;
use crate::settings::GameSettings;
use crate::{launch_direction, wrap_degrees};

/// The thrown banana
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    /// Presentation spin in degrees, [0, 360)
    pub spin: f32,
    /// Seconds since launch
    pub age: f32,
    /// Who threw it
    pub shooter: PlayerId,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, shooter: PlayerId) -> Result<Self, SimError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self {
            pos,
            vel,
            radius,
            spin: 0.0,
            age: 0.0,
            shooter,
        })
    }

    /// Throw from `shooter` at `angle_deg` above horizontal with `speed` pixels/s
    pub fn launch(
        shooter: &Player,
        angle_deg: f32,
        speed: f32,
        settings: &GameSettings,
    ) -> Result<Self, SimError> {
        if !(settings.angle_min..=settings.angle_max).contains(&angle_deg) {
            return Err(SimError::AngleOutOfRange {
                angle: angle_deg,
                min: settings.angle_min,
                max: settings.angle_max,
            });
        }
        if !(settings.speed_min..=settings.speed_max).contains(&speed) {
            return Err(SimError::SpeedOutOfRange {
                speed,
                min: settings.speed_min,
                max: settings.speed_max,
            });
        }

        let facing = shooter.facing.sign();
        let vel = launch_velocity(angle_deg, speed, facing);
        let radius = settings.banana_radius;
        // Above the head and a little forward so frame one is clear of the shooter
        let pos = Vec2::new(
            shooter.hitbox.center().x + facing * settings.banana_spawn_forward,
            shooter.hitbox.top() - radius - 2.0,
        );
        Self::new(pos, vel, radius, shooter.id)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Advance one timestep under gravity (+y) and wind (+x)
    pub fn step(&mut self, gravity: f32, wind: f32, spin_rate: f32, dt: f32) {
        self.vel += Vec2::new(wind, gravity) * dt;
        self.pos += self.vel * dt;
        self.spin = wrap_degrees(self.spin + spin_rate * dt);
        self.age += dt;
    }
}

/// Initial velocity for a throw; `facing` is +1 toward the right
#[inline]
pub fn launch_velocity(angle_deg: f32, speed: f32, facing: f32) -> Vec2 {
    launch_direction(angle_deg, facing) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BANANA_SPIN_RATE, GRAVITY};
    use crate::sim::geom::Rect;
    use crate::sim::state::Facing;

    fn player(id: PlayerId, facing: Facing) -> Player {
        Player {
            id,
            hitbox: Rect::from_bottom_center(Vec2::new(100.0, 400.0), 28.0, 32.0),
            facing,
        }
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(matches!(
            Projectile::new(Vec2::ZERO, Vec2::ZERO, 0.0, PlayerId::P1),
            Err(SimError::InvalidRadius(_))
        ));
        assert!(Projectile::new(Vec2::ZERO, Vec2::ZERO, f32::NAN, PlayerId::P1).is_err());
    }

    #[test]
    fn test_launch_velocity_components() {
        let v = launch_velocity(45.0, 300.0, 1.0);
        let c = 300.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((v.x - c).abs() < 1e-3);
        assert!((v.y + c).abs() < 1e-3);

        let v = launch_velocity(0.0, 100.0, -1.0);
        assert!((v.x + 100.0).abs() < 1e-4);
        assert!(v.y.abs() < 1e-4);

        let v = launch_velocity(90.0, 100.0, 1.0);
        assert!(v.x.abs() < 1e-3);
        assert!((v.y + 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_launch_validates_ranges() {
        let settings = GameSettings::default();
        let p1 = player(PlayerId::P1, Facing::Right);
        assert!(matches!(
            Projectile::launch(&p1, 95.0, 300.0, &settings),
            Err(SimError::AngleOutOfRange { .. })
        ));
        assert!(matches!(
            Projectile::launch(&p1, 45.0, 10.0, &settings),
            Err(SimError::SpeedOutOfRange { .. })
        ));
        assert!(Projectile::launch(&p1, 90.0, 800.0, &settings).is_ok());
        assert!(Projectile::launch(&p1, 0.0, 20.0, &settings).is_ok());
    }

    #[test]
    fn test_launch_spawns_above_and_forward() {
        let settings = GameSettings::default();
        let p2 = player(PlayerId::P2, Facing::Left);
        let banana = Projectile::launch(&p2, 30.0, 200.0, &settings).unwrap();
        assert!(banana.pos.y < p2.hitbox.top());
        assert!(banana.pos.x < p2.hitbox.center().x);
        assert!(banana.vel.x < 0.0);
        assert_eq!(banana.shooter, PlayerId::P2);
        assert_eq!(banana.age, 0.0);
    }

    #[test]
    fn test_trajectory_matches_closed_form() {
        // 45°, 300 px/s from (100, 400), gravity 260, after 1 s
        let vel = launch_velocity(45.0, 300.0, 1.0);
        let mut banana = Projectile::new(Vec2::new(100.0, 400.0), vel, 6.0, PlayerId::P1).unwrap();
        let dt = 1.0 / 1000.0;
        for _ in 0..1000 {
            banana.step(GRAVITY, 0.0, BANANA_SPIN_RATE, dt);
        }
        let a = 45.0f32.to_radians();
        let expected = Vec2::new(
            100.0 + 300.0 * a.cos(),
            400.0 - 300.0 * a.sin() + 0.5 * 260.0,
        );
        // Semi-implicit Euler overshoots the drop by g*dt*t/2 (0.13 px here)
        assert!(banana.pos.distance(expected) < 0.5, "{:?} vs {:?}", banana.pos, expected);
        assert!((banana.age - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_semi_implicit_order() {
        let mut banana = Projectile::new(Vec2::ZERO, Vec2::ZERO, 1.0, PlayerId::P1).unwrap();
        banana.step(10.0, 4.0, 0.0, 0.5);
        // Velocity first, then position from the new velocity
        assert_eq!(banana.vel, Vec2::new(2.0, 5.0));
        assert_eq!(banana.pos, Vec2::new(1.0, 2.5));
    }

    #[test]
    fn test_spin_wraps() {
        let mut banana = Projectile::new(Vec2::ZERO, Vec2::ZERO, 1.0, PlayerId::P1).unwrap();
        for _ in 0..60 {
            banana.step(0.0, 0.0, 720.0, 1.0 / 60.0);
            assert!((0.0..360.0).contains(&banana.spin));
        }
    }

    #[test]
    fn test_integration_is_deterministic() {
        let start = Projectile::new(
            Vec2::new(50.0, 300.0),
            launch_velocity(60.0, 420.0, 1.0),
            6.0,
            PlayerId::P1,
        )
        .unwrap();
        let dts = [1.0 / 60.0, 1.0 / 120.0, 1.0 / 30.0, 1.0 / 60.0];

        let run = || {
            let mut p = start.clone();
            let mut path = Vec::new();
            for _ in 0..50 {
                for &dt in &dts {
                    p.step(GRAVITY, 12.0, BANANA_SPIN_RATE, dt);
                    path.push(p.pos);
                }
            }
            path
        };

        assert_eq!(run(), run());
    }
}
