//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (skyline left to right, P1 before P2)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod input;
pub mod mask;
pub mod projectile;
pub mod rooftop;
pub mod skyline;
pub mod state;
pub mod tick;

pub use collision::{Outcome, out_of_bounds, resolve};
pub use geom::{Rect, circle_rect_hit};
pub use input::{InputBuffer, parse_in_range};
pub use mask::{CityMask, rasterize};
pub use projectile::{Projectile, launch_velocity};
pub use rooftop::{RooftopPick, Side, select_rooftop};
pub use skyline::{Building, generate};
pub use state::{
    Explosion, Facing, GameState, MatchState, Phase, Player, PlayerId, RoundState,
};
pub use tick::{Key, TickInput, tick};
