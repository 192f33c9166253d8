//! Fixed timestep simulation tick
//!
//! One tick: decay timers, apply keystrokes, advance the banana, resolve
//! collisions and run the resulting turn transition.

use serde::{Deserialize, Serialize};

use super::collision::{Outcome, resolve};
use super::projectile::Projectile;
use super::state::{Explosion, GameState, Phase};

/// A keystroke from the text-entry surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Typed character (only digits and '.' are kept)
    Char(char),
    Backspace,
    /// Enter / keypad enter
    Submit,
    /// Throw away the city and start a fresh round
    Reroll,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys pressed since the last tick, oldest first
    pub keys: Vec<Key>,
}

impl TickInput {
    /// Characters of `text` followed by a submit
    pub fn line(text: &str) -> Self {
        let mut keys: Vec<Key> = text.chars().map(Key::Char).collect();
        keys.push(Key::Submit);
        Self { keys }
    }

    pub fn reroll() -> Self {
        Self {
            keys: vec![Key::Reroll],
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    state.match_state.decay_message(dt);

    let lifetime = state.settings.explosion_lifetime;
    for explosion in &mut state.explosions {
        explosion.elapsed += dt;
    }
    state.explosions.retain(|e| e.elapsed < lifetime);

    for &key in &input.keys {
        handle_key(state, key);
    }

    if state.match_state.phase == Phase::Flying {
        advance_flight(state, dt);
    }
}

fn handle_key(state: &mut GameState, key: Key) {
    if key == Key::Reroll {
        log::info!("Reroll requested");
        state.reset_round(None);
        return;
    }

    // Typing is locked while the banana is in the air
    if state.match_state.phase == Phase::Flying {
        return;
    }

    match key {
        Key::Char(c) => {
            state.match_state.input.push(c, state.settings.max_input_len);
        }
        Key::Backspace => state.match_state.input.backspace(),
        Key::Submit => submit(state),
        Key::Reroll => {}
    }
}

/// Validate the typed value for the current phase and move on if it is good
fn submit(state: &mut GameState) {
    let s = &state.settings;
    let m = &mut state.match_state;

    match m.phase {
        Phase::AngleInput => {
            match m.input.parse_in_range(s.angle_min, s.angle_max) {
                Ok(angle) => {
                    m.pending_angle = Some(angle);
                    m.phase = Phase::VelocityInput;
                }
                Err(e) => log::debug!("{} angle rejected: {}", m.turn.name(), e),
            }
            m.input.clear();
        }
        Phase::VelocityInput => {
            let speed = match m.input.parse_in_range(s.speed_min, s.speed_max) {
                Ok(speed) => speed,
                Err(e) => {
                    log::debug!("{} velocity rejected: {}", m.turn.name(), e);
                    m.input.clear();
                    return;
                }
            };
            m.input.clear();

            let Some(angle) = m.pending_angle else {
                m.phase = Phase::AngleInput;
                return;
            };

            let launched = Projectile::launch(state.current_player(), angle, speed, s);
            let m = &mut state.match_state;
            match launched {
                Ok(banana) => {
                    log::debug!(
                        "{} throws: angle {:.1}, speed {:.1}",
                        m.turn.name(),
                        angle,
                        speed
                    );
                    state.projectile = Some(banana);
                    m.phase = Phase::Flying;
                }
                Err(e) => {
                    log::warn!("Launch failed: {}", e);
                    m.pending_angle = None;
                    m.phase = Phase::AngleInput;
                }
            }
        }
        Phase::Flying => {}
    }
}

/// Integrate the banana and apply whatever it hit
fn advance_flight(state: &mut GameState, dt: f32) {
    let Some(banana) = state.projectile.as_mut() else {
        state.match_state.phase = Phase::AngleInput;
        return;
    };

    let s = &state.settings;
    banana.step(s.gravity, state.round.wind, s.banana_spin_rate, dt);
    let outcome = resolve(banana, &state.round.mask, &state.round.players, s);
    apply_outcome(state, outcome);
}

fn apply_outcome(state: &mut GameState, outcome: Outcome) {
    match outcome {
        Outcome::None => {}
        Outcome::OutOfBounds => {
            log::debug!("{} missed (out of bounds)", state.match_state.turn.name());
            state.end_turn("Miss!");
        }
        Outcome::TerrainHit(pos) => {
            let erased = state
                .round
                .mask
                .erase_disk(pos, state.settings.explosion_radius);
            log::debug!(
                "Impact at ({:.0}, {:.0}), {} pixels destroyed",
                pos.x,
                pos.y,
                erased
            );
            state.explosions.push(Explosion { pos, elapsed: 0.0 });
            state.end_turn("Boom!");
        }
        Outcome::PlayerHit(hit) => {
            let winner = hit.other();
            state.wins[winner.index()] += 1;
            log::info!(
                "{} hit, {} wins (score {}-{})",
                hit.name(),
                winner.name(),
                state.wins[0],
                state.wins[1]
            );
            let message = format!("{} wins!  (Press R to reroll)", winner.name());
            let secs = state.settings.win_message_secs;
            state.reset_round(Some((message, secs)));
        }
    }
}
