//! Skyline Gorillas entry point
//!
//! Headless hot-seat frontend: lines typed on stdin become key presses, the
//! simulation runs on a fixed timestep, and the HUD is printed when it changes.
//!
//! At the prompt type a number and press enter. `r` rerolls the city, `q` quits.

use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use skyline_gorillas::consts::{MAX_SUBSTEPS, SIM_DT};
use skyline_gorillas::renderer::DrawList;
use skyline_gorillas::settings::GameSettings;
use skyline_gorillas::sim::{GameState, Key, Phase, TickInput, tick};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON settings file; missing keys keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the city generator. Overrides the seed in the config file.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Print the effective settings as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn load_settings(path: Option<&PathBuf>) -> GameSettings {
    let Some(path) = path else {
        return GameSettings::default();
    };
    match GameSettings::load(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            GameSettings::default()
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Commands coming from the stdin reader thread
#[derive(Debug, PartialEq)]
enum Command {
    Line(Vec<Key>),
    Quit,
    /// Stdin closed; finish the shot in the air, then exit
    Eof,
}

fn line_to_command(line: &str) -> Command {
    match line.trim() {
        "q" | "Q" => Command::Quit,
        "r" | "R" => Command::Line(vec![Key::Reroll]),
        text => Command::Line(TickInput::line(text).keys),
    }
}

fn spawn_stdin_reader() -> Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line_to_command(&line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Command::Eof);
    });
    rx
}

/// Frontend state wrapped around the simulation
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    /// Lines waiting for the banana to land
    pending: VecDeque<Vec<Key>>,
    input_closed: bool,
    quit: bool,
    last_hud: Vec<String>,
    last_banner: Option<String>,
}

impl Game {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            pending: VecDeque::new(),
            input_closed: false,
            quit: false,
            last_hud: Vec::new(),
            last_banner: None,
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Line(keys) => self.pending.push_back(keys),
            Command::Quit => self.quit = true,
            Command::Eof => self.input_closed = true,
        }
    }

    /// Drain everything the reader thread sent since the last frame
    fn poll(&mut self, commands: &Receiver<Command>) {
        loop {
            match commands.try_recv() {
                Ok(command) => self.handle(command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.input_closed = true;
                    break;
                }
            }
        }
    }

    /// Hand the next typed line to the simulation once the last one is
    /// consumed and nothing is in the air
    fn feed(&mut self) {
        if !self.input.keys.is_empty() || self.state.phase() == Phase::Flying {
            return;
        }
        if let Some(keys) = self.pending.pop_front() {
            self.input.keys = keys;
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        self.feed();

        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Keys are one-shot
            self.input.keys.clear();
        }
    }

    fn finished(&self) -> bool {
        self.quit
            || (self.input_closed
                && self.pending.is_empty()
                && self.input.keys.is_empty()
                && self.state.phase() != Phase::Flying)
    }

    /// Print the HUD and banner when they change
    fn present(&mut self) {
        let frame = DrawList::build(&self.state);
        if frame.banner != self.last_banner {
            if let Some(banner) = &frame.banner {
                println!("*** {} ***", banner);
            }
            self.last_banner = frame.banner;
        }
        // Hide the echoed input; stdin already shows what was typed
        let hud: Vec<String> = frame
            .hud
            .into_iter()
            .map(|l| match l.find(": ") {
                Some(i) if l.starts_with("Enter") => l[..i + 2].to_string(),
                _ => l,
            })
            .collect();
        if hud != self.last_hud && self.state.phase() != Phase::Flying {
            for line in &hud {
                println!("{}", line);
            }
            self.last_hud = hud;
        }
    }
}

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    let mut settings = load_settings(args.config.as_ref());

    if args.dump_config {
        match settings.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize settings: {}", e),
        }
        return;
    }

    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
    settings.seed = Some(seed);
    log::info!("Starting with seed {}", seed);

    let state = match GameState::new(settings, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(2);
        }
    };

    let mut game = Game::new(state);
    let commands = spawn_stdin_reader();
    let mut last = Instant::now();

    loop {
        game.poll(&commands);

        let now = Instant::now();
        game.update(now.duration_since(last).as_secs_f32());
        last = now;

        game.present();
        if game.finished() {
            break;
        }
        thread::sleep(FRAME);
    }

    let wins = game.state.wins;
    println!("Final score  P1 {} - {} P2", wins[0], wins[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyline_gorillas::sim::PlayerId;

    fn new_game() -> Game {
        Game::new(GameState::new(GameSettings::default(), 1).unwrap())
    }

    #[test]
    fn test_line_to_command() {
        assert_eq!(line_to_command("q"), Command::Quit);
        assert_eq!(line_to_command(" r "), Command::Line(vec![Key::Reroll]));
        assert_eq!(
            line_to_command("45"),
            Command::Line(vec![Key::Char('4'), Key::Char('5'), Key::Submit])
        );
    }

    #[test]
    fn test_cli_args() {
        let args = CliArgs::parse_from(["skyline-gorillas", "--seed", "7", "--dump-config"]);
        assert_eq!(args.seed, Some(7));
        assert!(args.dump_config);
        assert!(args.config.is_none());

        // A flag missing its value is an error, not silently dropped
        assert!(CliArgs::try_parse_from(["skyline-gorillas", "--config"]).is_err());
        assert!(CliArgs::try_parse_from(["skyline-gorillas", "--seed", "x"]).is_err());
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut game = new_game();
        game.update(0.1);
        assert!(game.state.time_ticks <= MAX_SUBSTEPS as u64);
        assert!(game.state.time_ticks >= 5);
    }

    #[test]
    fn test_poll_drains_channel() {
        let mut game = new_game();
        let (tx, rx) = mpsc::channel();
        tx.send(line_to_command("45")).unwrap();
        tx.send(line_to_command("300")).unwrap();
        tx.send(Command::Eof).unwrap();
        game.poll(&rx);
        assert_eq!(game.pending.len(), 2);
        assert!(game.input_closed);
    }

    #[test]
    fn test_piped_shot_lands_before_exit() {
        let mut game = new_game();
        game.handle(line_to_command("45"));
        game.handle(line_to_command("300"));
        game.handle(Command::Eof);

        let mut launched = false;
        for _ in 0..10_000 {
            game.update(SIM_DT);
            launched |= game.state.phase() == Phase::Flying;
            if game.finished() {
                break;
            }
        }
        assert!(launched);
        assert!(game.finished());
        assert!(game.state.projectile.is_none());
        // The shot resolved: either the turn passed or someone scored
        let scored = game.state.wins.iter().sum::<u32>() == 1;
        assert!(scored || game.state.match_state.turn == PlayerId::P2);
    }

    #[test]
    fn test_lines_wait_for_landing() {
        let mut game = new_game();
        game.handle(line_to_command("45"));
        game.handle(line_to_command("300"));
        game.handle(line_to_command("60"));
        game.update(SIM_DT);
        game.update(SIM_DT);
        assert_eq!(game.state.phase(), Phase::Flying);
        // Third line is held until the banana is down
        game.update(SIM_DT);
        assert_eq!(game.pending.len(), 1);
    }
}
