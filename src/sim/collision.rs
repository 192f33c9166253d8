//! Per-tick collision resolution for the banana
//!
//! Checks run in a fixed precedence: out of bounds, terrain, then players.
//! The first one that fires decides the tick; a terrain hit always ends the
//! turn as a miss even when a gorilla is right next to the crater.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::circle_rect_hit;
use super::mask::CityMask;
use super::projectile::Projectile;
use super::state::{Player, PlayerId};
use crate::settings::GameSettings;

/// What the banana did this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Still flying
    None,
    /// Left the playfield margins
    OutOfBounds,
    /// Struck solid terrain at this point
    TerrainHit(Vec2),
    /// Struck this player
    PlayerHit(PlayerId),
}

/// Whether `pos` is past the out-of-bounds margins around the screen
pub fn out_of_bounds(pos: Vec2, settings: &GameSettings) -> bool {
    let w = settings.screen_width as f32;
    let h = settings.screen_height as f32;
    !pos.is_finite()
        || pos.x < -settings.oob_side
        || pos.x > w + settings.oob_side
        || pos.y < -settings.oob_top
        || pos.y > h + settings.oob_bottom
}

/// Whether `player` can be hit by `projectile` this tick
fn hittable(projectile: &Projectile, player: &Player, settings: &GameSettings) -> bool {
    if player.id == projectile.shooter && projectile.age <= settings.self_hit_grace {
        return false;
    }
    circle_rect_hit(projectile.pos, projectile.radius(), &player.hitbox)
}

/// Resolve the banana against the playfield after integration
pub fn resolve(
    projectile: &Projectile,
    mask: &CityMask,
    players: &[Player; 2],
    settings: &GameSettings,
) -> Outcome {
    if out_of_bounds(projectile.pos, settings) {
        return Outcome::OutOfBounds;
    }

    if mask.is_opaque_at(projectile.pos) {
        return Outcome::TerrainHit(projectile.pos);
    }

    // Self-hit first: if both overlap the shooter is the one eliminated
    let shooter = projectile.shooter;
    let ordered = [shooter, shooter.other()];
    for id in ordered {
        let player = &players[id.index()];
        if hittable(projectile, player, settings) {
            return Outcome::PlayerHit(id);
        }
    }

    Outcome::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Rect;
    use crate::sim::mask::rasterize;
    use crate::sim::skyline::Building;
    use crate::sim::state::Facing;

    fn players_at(p1: Vec2, p2: Vec2) -> [Player; 2] {
        [
            Player {
                id: PlayerId::P1,
                hitbox: Rect::from_bottom_center(p1, 28.0, 32.0),
                facing: Facing::Right,
            },
            Player {
                id: PlayerId::P2,
                hitbox: Rect::from_bottom_center(p2, 28.0, 32.0),
                facing: Facing::Left,
            },
        ]
    }

    fn banana(pos: Vec2, age: f32, shooter: PlayerId) -> Projectile {
        let mut p = Projectile::new(pos, Vec2::ZERO, 6.0, shooter).unwrap();
        p.age = age;
        p
    }

    fn empty_mask(settings: &GameSettings) -> CityMask {
        CityMask::new(settings.screen_width, settings.screen_height)
    }

    #[test]
    fn test_out_of_bounds_margins() {
        let s = GameSettings::default();
        assert!(!out_of_bounds(Vec2::new(-49.0, 300.0), &s));
        assert!(out_of_bounds(Vec2::new(-51.0, 300.0), &s));
        assert!(out_of_bounds(Vec2::new(951.0, 300.0), &s));
        // Generous headroom above the screen
        assert!(!out_of_bounds(Vec2::new(400.0, -199.0), &s));
        assert!(out_of_bounds(Vec2::new(400.0, -201.0), &s));
        assert!(out_of_bounds(Vec2::new(400.0, 651.0), &s));
        assert!(out_of_bounds(Vec2::new(f32::NAN, 0.0), &s));
    }

    #[test]
    fn test_terrain_hit_beats_player_hit() {
        let s = GameSettings::default();
        let mask = rasterize(&[Building::on_ground(300.0, 100.0, 200.0, 600.0)], 900, 600);
        // P2 standing on the roof, banana inside the roof right under their feet
        let players = players_at(Vec2::new(100.0, 400.0), Vec2::new(350.0, 400.0));
        let b = banana(Vec2::new(350.0, 402.0), 1.0, PlayerId::P1);
        assert_eq!(
            resolve(&b, &mask, &players, &s),
            Outcome::TerrainHit(Vec2::new(350.0, 402.0))
        );
    }

    #[test]
    fn test_opponent_hit() {
        let s = GameSettings::default();
        let players = players_at(Vec2::new(100.0, 400.0), Vec2::new(700.0, 400.0));
        let b = banana(Vec2::new(700.0, 380.0), 2.0, PlayerId::P1);
        assert_eq!(
            resolve(&b, &empty_mask(&s), &players, &s),
            Outcome::PlayerHit(PlayerId::P2)
        );
        // Opponent is eligible immediately
        let b = banana(Vec2::new(700.0, 380.0), 0.0, PlayerId::P1);
        assert_eq!(
            resolve(&b, &empty_mask(&s), &players, &s),
            Outcome::PlayerHit(PlayerId::P2)
        );
    }

    #[test]
    fn test_self_hit_grace_period() {
        let s = GameSettings::default();
        let players = players_at(Vec2::new(100.0, 400.0), Vec2::new(700.0, 400.0));
        let over_shooter = Vec2::new(100.0, 380.0);

        for age in [0.0, 0.05, 0.1, s.self_hit_grace] {
            let b = banana(over_shooter, age, PlayerId::P1);
            assert_eq!(resolve(&b, &empty_mask(&s), &players, &s), Outcome::None);
        }

        let b = banana(over_shooter, s.self_hit_grace + 0.01, PlayerId::P1);
        assert_eq!(
            resolve(&b, &empty_mask(&s), &players, &s),
            Outcome::PlayerHit(PlayerId::P1)
        );
    }

    #[test]
    fn test_self_hit_takes_precedence() {
        let s = GameSettings::default();
        // Gorillas side by side so one banana touches both hitboxes
        let players = players_at(Vec2::new(100.0, 400.0), Vec2::new(130.0, 400.0));
        let b = banana(Vec2::new(115.0, 380.0), 1.0, PlayerId::P2);
        assert_eq!(
            resolve(&b, &empty_mask(&s), &players, &s),
            Outcome::PlayerHit(PlayerId::P2)
        );
        // Within grace the opponent takes it instead
        let b = banana(Vec2::new(115.0, 380.0), 0.0, PlayerId::P2);
        assert_eq!(
            resolve(&b, &empty_mask(&s), &players, &s),
            Outcome::PlayerHit(PlayerId::P1)
        );
    }

    #[test]
    fn test_clear_sky_is_none() {
        let s = GameSettings::default();
        let players = players_at(Vec2::new(100.0, 400.0), Vec2::new(700.0, 400.0));
        let b = banana(Vec2::new(400.0, 100.0), 1.0, PlayerId::P1);
        assert_eq!(resolve(&b, &empty_mask(&s), &players, &s), Outcome::None);
    }
}
