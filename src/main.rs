//! Headless simulation runner (default binary).
//!
//! Drives a seeded game for a fixed number of ticks, feeding intents from a
//! small script, then prints the final snapshot as JSON.
//!
//! Usage:
//!   blockfall-sim [--seed N] [--ticks N] [--level N] [--script LIST]
//!
//! `LIST` is a comma separated list of `intent[@tick]` or `intent@from..to`
//! entries, e.g. `soft_drop,rotate_cw@0,move_left@10..40`. An entry without a
//! tick applies for the whole run (rotations fire once, on tick 0).
//!
//! Without `--seed` or `BLOCKFALL_SEED` the game is seeded from entropy and the
//! chosen seed is logged so the run can be replayed.

use anyhow::{anyhow, Result};
use log::{info, warn};

use blockfall::core::GameState;
use blockfall::types::Intent;

const DEFAULT_TICKS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScriptEntry {
    intent: Intent,
    from: u64,
    /// Exclusive end; `None` means until the run ends
    to: Option<u64>,
}

impl ScriptEntry {
    fn active_at(&self, tick: u64) -> bool {
        if self.intent.is_one_shot() {
            return tick == self.from;
        }
        tick >= self.from && self.to.map_or(true, |end| tick < end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SimConfig {
    /// `None` seeds from entropy
    seed: Option<u32>,
    ticks: u64,
    level: u32,
    script: Vec<ScriptEntry>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ticks: DEFAULT_TICKS,
            level: 0,
            script: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Defaults overridden by `BLOCKFALL_*` environment variables
    fn from_env() -> Result<Self> {
        use std::env;

        let mut cfg = Self::default();
        if let Ok(v) = env::var("BLOCKFALL_SEED") {
            cfg.seed = Some(parse_number("BLOCKFALL_SEED", &v)?);
        }
        if let Ok(v) = env::var("BLOCKFALL_TICKS") {
            cfg.ticks = parse_number("BLOCKFALL_TICKS", &v)?;
        }
        if let Ok(v) = env::var("BLOCKFALL_LEVEL") {
            cfg.level = parse_number("BLOCKFALL_LEVEL", &v)?;
        }
        Ok(cfg)
    }

    fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--seed" | "--ticks" | "--level" | "--script" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                    match flag {
                        "--seed" => self.seed = Some(parse_number(flag, v)?),
                        "--ticks" => self.ticks = parse_number(flag, v)?,
                        "--level" => self.level = parse_number(flag, v)?,
                        _ => self.script = parse_script(v)?,
                    }
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", name, value))
}

fn parse_script(list: &str) -> Result<Vec<ScriptEntry>> {
    let mut entries = Vec::new();
    for raw in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, when) = match raw.split_once('@') {
            Some((name, when)) => (name, Some(when)),
            None => (raw, None),
        };
        let intent =
            Intent::from_str(name).ok_or_else(|| anyhow!("unknown intent in script: {}", name))?;

        let (from, to) = match when {
            None => (0, None),
            Some(when) => match when.split_once("..") {
                Some((a, b)) => {
                    let from: u64 = parse_number("script tick", a)?;
                    let to: u64 = parse_number("script tick", b)?;
                    if to <= from {
                        return Err(anyhow!("empty tick range in script: {}", raw));
                    }
                    (from, Some(to))
                }
                None => {
                    let at: u64 = parse_number("script tick", when)?;
                    let end = at
                        .checked_add(1)
                        .ok_or_else(|| anyhow!("script tick out of range: {}", raw))?;
                    (at, Some(end))
                }
            },
        };
        entries.push(ScriptEntry { intent, from, to });
    }
    Ok(entries)
}

fn apply_script(game: &mut GameState, script: &[ScriptEntry], tick: u64) {
    for intent in [Intent::MoveLeft, Intent::MoveRight, Intent::SoftDrop] {
        let held = script
            .iter()
            .any(|e| e.intent == intent && e.active_at(tick));
        game.set_intent(intent, held);
    }
    for entry in script.iter().filter(|e| e.intent.is_one_shot()) {
        if entry.active_at(tick) {
            game.set_intent(entry.intent, true);
        }
    }
}

fn run(cfg: &SimConfig) -> GameState {
    let mut game = match cfg.seed {
        Some(seed) => GameState::new(seed),
        None => GameState::from_entropy(),
    };
    game.set_level(cfg.level);
    info!(
        "simulating seed={} ticks={} level={} script_entries={}",
        game.seed(),
        cfg.ticks,
        cfg.level,
        cfg.script.len()
    );

    for tick in 0..cfg.ticks {
        apply_script(&mut game, &cfg.script, tick);
        if game.tick() {
            if let Some(ev) = game.take_last_event() {
                info!(
                    "tick {}: locked {} lines={} runs={} +{}",
                    tick,
                    ev.kind.as_str(),
                    ev.lines_cleared,
                    ev.runs,
                    ev.score_awarded
                );
            }
        }
        if game.game_over() {
            warn!("game over at tick {} (score {})", tick, game.score());
            break;
        }
    }
    game
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cfg = SimConfig::from_env()?;
    cfg.apply_args(&args)?;

    let game = run(&cfg);
    let json = serde_json::to_string_pretty(&game.snapshot())?;
    println!("{}", json);
    Ok(())
}
