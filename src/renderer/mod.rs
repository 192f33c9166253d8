//! Presentation adapter
//!
//! Turns a [`GameState`] into GPU-ready data: a triangle list for buildings,
//! gorillas, banana and explosions, plus an RGBA terrain image derived from
//! the city mask. Nothing here feeds back into the simulation.

pub mod shapes;
pub mod terrain;
pub mod vertex;

pub use terrain::{Rgba8, terrain_rgba, terrain_texels};
pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::sim::{GameState, Phase, PlayerId};

const CIRCLE_SEGMENTS: u32 = 16;

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Sky color to clear the frame with
    pub clear_color: [f32; 4],
    /// Triangle list in screen pixels
    pub vertices: Vec<Vertex>,
    /// Lines of HUD text, top to bottom
    pub hud: Vec<String>,
    /// Centered status banner, if showing
    pub banner: Option<String>,
}

impl DrawList {
    /// Build the frame for `state`. The terrain image is separate (see
    /// [`terrain_rgba`]) since it only changes on impacts and resets.
    pub fn build(state: &GameState) -> Self {
        let mut vertices = Vec::new();

        for player in &state.round.players {
            let color = match player.id {
                PlayerId::P1 => colors::PLAYER_1,
                PlayerId::P2 => colors::PLAYER_2,
            };
            vertices.extend(shapes::rect(&player.hitbox, color));
        }

        if state.phase() == Phase::Flying
            && let Some(banana) = &state.projectile
        {
            let r = banana.radius();
            vertices.extend(shapes::rotated_rect(
                banana.pos,
                Vec2::new(r * 2.0, r),
                banana.spin,
                colors::BANANA,
            ));
        }

        let lifetime = state.settings().explosion_lifetime.max(f32::EPSILON);
        let max_r = state.settings().explosion_radius;
        for explosion in &state.explosions {
            let t = (explosion.elapsed / lifetime).clamp(0.0, 1.0);
            let mut color = colors::EXPLOSION;
            color[3] = 1.0 - t;
            let outer = max_r * (0.5 + t);
            vertices.extend(shapes::ring(
                explosion.pos,
                outer * 0.6,
                outer,
                color,
                CIRCLE_SEGMENTS,
            ));
            // Hot core shrinks as the blast fades
            let mut core = colors::WINDOW_LIT;
            core[3] = 1.0 - t;
            vertices.extend(shapes::circle(
                explosion.pos,
                outer * 0.6 * (1.0 - t),
                core,
                CIRCLE_SEGMENTS,
            ));
        }

        let mut hud = vec![state.turn_line()];
        if let Some(prompt) = state.prompt() {
            hud.push(prompt);
        }
        hud.push(format!(
            "P1 {} - {} P2   wind {:+.0}",
            state.wins[0], state.wins[1], state.round.wind
        ));

        Self {
            clear_color: colors::BACKGROUND,
            vertices,
            hud,
            banner: state.message().map(|(text, _)| text.to_string()),
        }
    }
}

/// Building outlines as solid rectangles, for frontends that skip the mask
pub fn skyline_vertices(state: &GameState) -> Vec<Vertex> {
    state
        .round
        .skyline
        .iter()
        .flat_map(|b| shapes::rect(&b.rect(), colors::BUILDING))
        .collect()
}
