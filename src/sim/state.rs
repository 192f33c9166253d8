//! Game state and core simulation types
//!
//! A [`RoundState`] holds everything that is regenerated on a round reset;
//! [`GameState`] owns the current round plus turn bookkeeping and the RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::input::InputBuffer;
use super::mask::{CityMask, rasterize};
use super::projectile::Projectile;
use super::rooftop::{Side, select_rooftop};
use super::skyline::{self, Building};
use crate::error::ConfigError;
use crate::settings::{GameSettings, WindSetting};

/// Player identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    P1,
    P2,
}

impl PlayerId {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::P1 => 0,
            PlayerId::P2 => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Self {
        match self {
            PlayerId::P1 => PlayerId::P2,
            PlayerId::P2 => PlayerId::P1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerId::P1 => "P1",
            PlayerId::P2 => "P2",
        }
    }

    /// Side of the city this player spawns on
    pub fn side(self) -> Side {
        match self {
            PlayerId::P1 => Side::Left,
            PlayerId::P2 => Side::Right,
        }
    }
}

/// Which way a gorilla throws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Right,
    Left,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

impl From<Side> for Facing {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Facing::Right,
            Side::Right => Facing::Left,
        }
    }
}

/// A gorilla: stationary target and throw anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub hitbox: Rect,
    pub facing: Facing,
}

impl Player {
    /// Stand `id` on the roof of `building`, centered
    pub fn on_rooftop(id: PlayerId, building: &Building, settings: &GameSettings) -> Self {
        let anchor = Vec2::new(building.roof_center_x(), building.y);
        let hitbox =
            Rect::from_bottom_center(anchor, settings.gorilla_width, settings.gorilla_height);
        Self {
            id,
            hitbox,
            facing: id.side().into(),
        }
    }
}

/// Visual-only impact marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Seconds since impact
    pub elapsed: f32,
}

/// Current phase of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Typing the launch angle
    AngleInput,
    /// Typing the launch velocity
    VelocityInput,
    /// Banana in the air
    Flying,
}

/// Turn and prompt bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub turn: PlayerId,
    pub phase: Phase,
    /// Angle accepted in `AngleInput`, waiting for a velocity
    pub pending_angle: Option<f32>,
    pub input: InputBuffer,
    /// Status banner ("Boom!", "P1 wins!", ...)
    pub message: String,
    /// Seconds the banner stays up
    pub message_timer: f32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            turn: PlayerId::P1,
            phase: Phase::AngleInput,
            pending_angle: None,
            input: InputBuffer::new(),
            message: String::new(),
            message_timer: 0.0,
        }
    }
}

impl MatchState {
    pub fn set_message(&mut self, text: impl Into<String>, secs: f32) {
        self.message = text.into();
        self.message_timer = secs;
    }

    /// Count the banner down; clears it when time runs out
    pub fn decay_message(&mut self, dt: f32) {
        if self.message_timer > 0.0 {
            self.message_timer -= dt;
            if self.message_timer <= 0.0 {
                self.message_timer = 0.0;
                self.message.clear();
            }
        }
    }
}

/// Everything regenerated on a round reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub skyline: Vec<Building>,
    pub mask: CityMask,
    /// Indexed by [`PlayerId::index`]
    pub players: [Player; 2],
    /// Skyline index each player stands on, `None` for the ground
    pub rooftops: [Option<usize>; 2],
    /// Horizontal acceleration this round (pixels/s²)
    pub wind: f32,
}

impl RoundState {
    /// Build a fresh city, mask, rooftops and wind
    pub fn generate<R: Rng>(settings: &GameSettings, rng: &mut R) -> Self {
        let skyline = skyline::generate(settings, rng);
        let mask = rasterize(&skyline, settings.screen_width, settings.screen_height);

        let (p1, roof1) = spawn_player(PlayerId::P1, &skyline, None, settings, rng);
        let (p2, roof2) = spawn_player(PlayerId::P2, &skyline, roof1, settings, rng);

        let wind = match settings.wind {
            WindSetting::Fixed(ax) => ax,
            WindSetting::Random { max } if max > 0.0 => rng.random_range(-max..=max),
            WindSetting::Random { .. } => 0.0,
        };

        Self {
            skyline,
            mask,
            players: [p1, p2],
            rooftops: [roof1, roof2],
            wind,
        }
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }
}

/// Place a player on a selected rooftop other than `taken`. With no building
/// left the player stands on the ground in their third of the screen.
fn spawn_player<R: Rng>(
    id: PlayerId,
    skyline: &[Building],
    taken: Option<usize>,
    settings: &GameSettings,
    rng: &mut R,
) -> (Player, Option<usize>) {
    match select_rooftop(skyline, id.side(), taken, settings, rng) {
        Some(pick) => (
            Player::on_rooftop(id, &skyline[pick.index], settings),
            Some(pick.index),
        ),
        None => {
            let w = settings.screen_width as f32;
            let x = match id.side() {
                Side::Left => w / 6.0,
                Side::Right => w * 5.0 / 6.0,
            };
            let ground = Building::on_ground(x, 0.0, 0.0, settings.screen_height as f32);
            (Player::on_rooftop(id, &ground, settings), None)
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated at construction and fixed for the whole game
    pub(crate) settings: GameSettings,
    /// Game seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub round: RoundState,
    pub match_state: MatchState,
    /// At most one banana in the air
    pub projectile: Option<Projectile>,
    pub explosions: Vec<Explosion>,
    /// Session wins, indexed by [`PlayerId::index`]
    pub wins: [u32; 2],
    /// Rounds started, including the first
    pub round_number: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game with the given seed. Settings are validated first.
    pub fn new(settings: GameSettings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let round = RoundState::generate(&settings, &mut rng);
        log::info!(
            "Round 1: {} buildings, rooftops {:?}, wind {:.1}",
            round.skyline.len(),
            round.rooftops,
            round.wind
        );
        Ok(Self {
            settings,
            seed,
            rng,
            round,
            match_state: MatchState::default(),
            projectile: None,
            explosions: Vec::new(),
            wins: [0, 0],
            round_number: 1,
            time_ticks: 0,
        })
    }

    #[inline]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Player whose turn it is
    pub fn current_player(&self) -> &Player {
        self.round.player(self.match_state.turn)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.match_state.phase
    }

    /// Switch to the other player without touching the city
    pub fn end_turn(&mut self, message: &str) {
        let m = &mut self.match_state;
        m.turn = m.turn.other();
        m.phase = Phase::AngleInput;
        m.pending_angle = None;
        m.input.clear();
        self.projectile = None;
        if !message.is_empty() {
            m.set_message(message, self.settings.turn_message_secs);
        }
    }

    /// Replace the whole round: new city, rooftops, turn back to P1.
    /// `message` of `None` also clears any banner still showing.
    pub fn reset_round(&mut self, message: Option<(String, f32)>) {
        self.round = RoundState::generate(&self.settings, &mut self.rng);
        self.round_number += 1;
        self.projectile = None;
        self.explosions.clear();

        let mut match_state = MatchState::default();
        if let Some((text, secs)) = message {
            match_state.set_message(text, secs);
        }
        self.match_state = match_state;

        log::info!(
            "Round {}: {} buildings, rooftops {:?}, wind {:.1}",
            self.round_number,
            self.round.skyline.len(),
            self.round.rooftops,
            self.round.wind
        );
    }

    /// HUD line naming the active player
    pub fn turn_line(&self) -> String {
        format!(
            "Turn: {}   (R = reroll city)",
            self.match_state.turn.name()
        )
    }

    /// Input prompt for the current phase, `None` while flying
    pub fn prompt(&self) -> Option<String> {
        let s = &self.settings;
        let typed = self.match_state.input.as_str();
        match self.match_state.phase {
            Phase::AngleInput => Some(format!(
                "Enter ANGLE ({}-{}): {}",
                s.angle_min, s.angle_max, typed
            )),
            Phase::VelocityInput => Some(format!(
                "Enter VELOCITY ({}-{}): {}",
                s.speed_min, s.speed_max, typed
            )),
            Phase::Flying => None,
        }
    }

    /// Active status banner and its remaining seconds
    pub fn message(&self) -> Option<(&str, f32)> {
        let m = &self.match_state;
        (!m.message.is_empty()).then(|| (m.message.as_str(), m.message_timer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_with_p1_angle() {
        let state = GameState::new(GameSettings::default(), 12345).unwrap();
        assert_eq!(state.match_state.turn, PlayerId::P1);
        assert_eq!(state.phase(), Phase::AngleInput);
        assert!(state.projectile.is_none());
        assert_eq!(state.round_number, 1);
        assert_eq!(state.prompt().unwrap(), "Enter ANGLE (0-90): ");
        assert_eq!(state.turn_line(), "Turn: P1   (R = reroll city)");
    }

    #[test]
    fn test_players_stand_on_their_rooftops() {
        let settings = GameSettings::default();
        let state = GameState::new(settings.clone(), 777).unwrap();
        for id in [PlayerId::P1, PlayerId::P2] {
            let player = state.round.player(id);
            let roof = state.round.skyline[state.round.rooftops[id.index()].unwrap()];
            assert!((player.hitbox.bottom() - roof.y).abs() < 1e-3);
            assert!((player.hitbox.center().x - roof.roof_center_x()).abs() < 1e-3);
            assert_eq!(player.hitbox.width, settings.gorilla_width);
        }
        assert_eq!(state.round.player(PlayerId::P1).facing, Facing::Right);
        assert_eq!(state.round.player(PlayerId::P2).facing, Facing::Left);
        assert!(state.round.rooftops[0].unwrap() < state.round.rooftops[1].unwrap());
    }

    #[test]
    fn test_same_seed_same_city() {
        let a = GameState::new(GameSettings::default(), 99).unwrap();
        let b = GameState::new(GameSettings::default(), 99).unwrap();
        assert_eq!(a.round, b.round);
    }

    #[test]
    fn test_random_wind_within_bounds() {
        let settings = GameSettings {
            wind: WindSetting::Random { max: 30.0 },
            ..Default::default()
        };
        let mut state = GameState::new(settings, 5).unwrap();
        for _ in 0..20 {
            assert!(state.round.wind.abs() <= 30.0);
            state.reset_round(None);
        }
    }

    #[test]
    fn test_message_decay() {
        let mut m = MatchState::default();
        m.set_message("Boom!", 0.5);
        m.decay_message(0.3);
        assert_eq!(m.message, "Boom!");
        m.decay_message(0.3);
        assert!(m.message.is_empty());
        assert_eq!(m.message_timer, 0.0);
    }

    #[test]
    fn test_empty_skyline_still_places_players() {
        let settings = GameSettings {
            screen_width: 0,
            ..Default::default()
        };
        let round = RoundState::generate(&settings, &mut Pcg32::seed_from_u64(1));
        assert!(round.skyline.is_empty());
        assert_eq!(round.rooftops, [None, None]);
        assert_eq!(round.player(PlayerId::P1).hitbox.bottom(), 600.0);
    }

    #[test]
    fn test_new_game_rejects_unsafe_settings() {
        let settings = GameSettings {
            building_width_min: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(settings, 1),
            Err(ConfigError::UnsafeValue { name: "building_width_min", .. })
        ));

        let settings = GameSettings {
            angle_max: 180.0,
            ..Default::default()
        };
        assert!(GameState::new(settings, 1).is_err());
    }

    #[test]
    fn test_small_city_players_get_separate_roofs() {
        let settings = GameSettings {
            screen_width: 300,
            building_width_min: 100,
            building_width_max: 140,
            ..Default::default()
        };
        for seed in 0..32 {
            let state = GameState::new(settings.clone(), seed).unwrap();
            let [a, b] = state.round.rooftops;
            assert!(a.is_some() && b.is_some());
            assert_ne!(a, b);
        }
    }
}
