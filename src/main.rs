mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use asteroids_arena::command::{Command, Outcome};
use asteroids_arena::compute::{Arena, DEFAULT_TICK_RATE};

#[derive(Parser, Debug)]
#[command(name = "asteroids_arena")]
#[command(about = "Terminal Asteroids: survive the rocks and the UFO with lasers and a shield")]
struct Cli {
    /// Seed for the simulation RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,
    /// Write logs to this file (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log filter directive, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Held-key detection ────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .with_context(|| format!("invalid log filter {:?}", cli.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Play,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    last_score: Option<u32>,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  ASTEROIDS  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if let Some(score) = last_score {
        let line = format!("Last Score: {}", score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(6),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&line))?;
    }

    let options: &[(&str, &str, Color)] = &[
        ("ENTER", "Play", Color::Green),
        ("Q", "Quit", Color::Red),
    ];
    for (i, (key, label, color)) in options.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{:^5}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*label))?;
    }

    let help: &[(&str, Color, &str)] = &[
        ("▓", Color::Rgb { r: 170, g: 150, b: 120 }, " Asteroids split twice before breaking up"),
        ("<◎>", Color::Green, " The UFO hunts you once you pass 250 points"),
        ("( )", Color::Cyan, " Shield soaks one hit; needs more than 50 charge"),
        ("+", Color::Cyan, " Shield capacity +10"),
        ("♥", Color::Magenta, " Extra life"),
        ("$", Color::Yellow, " 100 bonus points"),
    ];
    for (i, (sym, color, desc)) in help.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(24), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:>3}", sym)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(
        cx.saturating_sub(display::CONTROLS_HINT.chars().count() as u16 / 2),
        cy + 6,
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(display::CONTROLS_HINT))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Play),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum SessionEnd {
    /// Leave the program.
    Exit,
    /// Back to the menu with this score.
    Menu(u32),
}

/// Decode terminal keys into arena commands and drive one session at the
/// configured tick rate.
///
/// One-shot actions (turn, fire, shield, pause, quit) come from `Press`
/// events.  Thrust is a held control tracked through a `key_frame` map
/// recording when each key was last pressed or repeated; it counts as held
/// while that is fresh.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tick_rate: u32,
    rng: &mut StdRng,
) -> std::io::Result<SessionEnd> {
    let frame_budget = Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64);
    let mut arena = Arena::new(tick_rate);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut commands = Vec::new();
        let finished = arena.outcome().is_finished();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(SessionEnd::Exit);
                    }
                    if finished {
                        match code {
                            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                                return Ok(SessionEnd::Menu(arena.score.score));
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(SessionEnd::Exit);
                            }
                            _ => {}
                        }
                        continue;
                    }
                    match code {
                        KeyCode::Left => commands.push(Command::RotateLeft),
                        KeyCode::Right => commands.push(Command::RotateRight),
                        KeyCode::Char(' ') => commands.push(Command::Fire),
                        KeyCode::Char('s') | KeyCode::Char('S') => {
                            commands.push(Command::ToggleShield)
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            commands.push(Command::PauseToggle)
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            commands.push(Command::Quit)
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        commands.push(Command::Thrust(is_held(&key_frame, &KeyCode::Up, frame)));

        let report = arena.step(&commands, rng);
        for cue in &report.cues {
            debug!(?cue, "audio cue");
        }
        if let Outcome::Quit { final_score } = report.outcome {
            info!(final_score, "session abandoned");
            return Ok(SessionEnd::Menu(final_score));
        }
        if !finished {
            if let Outcome::GameOver { final_score } = report.outcome {
                info!(final_score, frames = arena.frame, "session over");
            }
        }

        display::render(out, &arena.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, tick_rate = cli.tick_rate, "starting");
    let mut rng = StdRng::seed_from_u64(seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, cli.tick_rate, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal session failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tick_rate: u32,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut last_score = None;

    loop {
        match show_menu(out, rx, last_score)? {
            MenuResult::Quit => break,
            MenuResult::Play => match game_loop(out, rx, tick_rate, rng)? {
                SessionEnd::Exit => break,
                SessionEnd::Menu(score) => last_score = Some(score),
            },
        }
    }
    Ok(())
}
