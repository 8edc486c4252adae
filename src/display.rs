/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `Frame` snapshot.
/// No game logic is performed; this module only scales the logical field onto
/// the terminal grid and translates sprites into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use asteroids_arena::compute::GameStatus;
use asteroids_arena::entities::PowerupKind;
use asteroids_arena::snapshot::{Frame, Hud, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_SHIP: Color = Color::White;
const C_ASTEROID: Color = Color::Rgb { r: 170, g: 150, b: 120 };
const C_UFO: Color = Color::Green;
const C_SHOT_FRIENDLY: Color = Color::Green;
const C_SHOT_HOSTILE: Color = Color::Red;
const C_SHIELD: Color = Color::Rgb { r: 0, g: 191, b: 225 };
const C_BONUS_SHIELD: Color = Color::Cyan;
const C_BONUS_LIFE: Color = Color::Magenta;
const C_BONUS_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

pub const CONTROLS_HINT: &str =
    "← → : Turn   ↑ : Thrust   SPACE : Fire   S : Shield   P : Pause   Q : Quit";

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Play area inside the border: columns `1..=w-2`, rows `2..=h-3`.
struct Viewport {
    cols: u16,
    rows: u16,
    field_w: f32,
    field_h: f32,
}

impl Viewport {
    fn new(frame: &Frame, width: u16, height: u16) -> Self {
        Viewport {
            cols: width.saturating_sub(3).max(1),
            rows: height.saturating_sub(5).max(1),
            field_w: frame.field_width,
            field_h: frame.field_height,
        }
    }

    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = (x / self.field_w * self.cols as f32).round() as i32;
        let row = (y / self.field_h * self.rows as f32).round() as i32;
        (
            1 + col.clamp(0, self.cols as i32) as u16,
            2 + row.clamp(0, self.rows as i32) as u16,
        )
    }

    /// Terminal cells spanned by a logical width, at least one.
    fn span(&self, w: f32) -> u16 {
        ((w / self.field_w * self.cols as f32).round() as u16).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(frame, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, &frame.hud, width)?;

    for (_, sprites) in &frame.layers {
        for sprite in sprites.iter().filter(|s| s.alive) {
            draw_sprite(out, &view, sprite)?;
        }
    }

    draw_controls_hint(out, height)?;

    match frame.status {
        GameStatus::Paused => draw_banner(out, width, height, &["PAUSED", "P - Resume"])?,
        GameStatus::GameOver => {
            let score_line = format!("Final Score: {:>6}", frame.hud.score);
            draw_banner(
                out,
                width,
                height,
                &["GAME  OVER", score_line.as_str(), "R - Menu  Q - Quit"],
            )?;
        }
        _ => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", hud.score)))?;

    // Shield gauge in the centre: ten cells scaled to the current maximum
    let filled = if hud.shield_max > 0 {
        ((hud.shield_charge / hud.shield_max as f32) * 10.0).round() as usize
    } else {
        0
    };
    let gauge = format!(
        "Shield [{}{}] {:>3}",
        "█".repeat(filled.min(10)),
        "·".repeat(10 - filled.min(10)),
        hud.shield_charge as u32
    );
    let gx = (width / 2).saturating_sub(gauge.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(gx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIELD))?;
    out.queue(Print(&gauge))?;

    let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
    let lx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let (col, row) = view.cell(sprite.x, sprite.y);

    match sprite.kind {
        SpriteKind::Ship { angle } => {
            let glyph = match angle {
                90 => "▲",
                180 => "◄",
                270 => "▼",
                _ => "►",
            };
            put(out, col, row, C_SHIP, glyph)?;
        }
        SpriteKind::Asteroid { size } => {
            // Bigger rocks get a wider, denser body
            let body = match size {
                1 => "▓",
                2 => "▒",
                _ => "░",
            };
            let span = view.span(sprite.w);
            let left = col.saturating_sub(span / 2).max(1);
            put(out, left, row, C_ASTEROID, &body.repeat(span as usize))?;
        }
        SpriteKind::Ufo => {
            put(out, col.saturating_sub(1).max(1), row, C_UFO, "<◎>")?;
        }
        SpriteKind::Shot { friendly, .. } => {
            let color = if friendly { C_SHOT_FRIENDLY } else { C_SHOT_HOSTILE };
            put(out, col, row, color, "•")?;
        }
        SpriteKind::Shield { .. } => {
            let reach = (view.span(sprite.w) / 2).max(1);
            put(out, col.saturating_sub(reach).max(1), row, C_SHIELD, "(")?;
            put(out, col + reach, row, C_SHIELD, ")")?;
        }
        SpriteKind::Powerup(kind) => {
            let (color, glyph) = match kind {
                PowerupKind::ShieldCapacity => (C_BONUS_SHIELD, "+"),
                PowerupKind::ExtraLife => (C_BONUS_LIFE, "♥"),
                PowerupKind::ScoreBonus => (C_BONUS_SCORE, "$"),
            };
            put(out, col, row, color, glyph)?;
        }
    }
    Ok(())
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    lines: &[&str],
) -> std::io::Result<()> {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let top = format!("╔{}╗", "═".repeat(inner));
    let bottom = format!("╚{}╝", "═".repeat(inner));

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub((lines.len() as u16 + 2) / 2);
    let col = cx.saturating_sub((inner as u16 + 2) / 2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(cursor::MoveTo(col, start_row))?;
    out.queue(Print(&top))?;
    for (i, line) in lines.iter().enumerate() {
        let pad = inner - line.chars().count();
        let text = format!(
            "║{}{}{}║",
            " ".repeat(pad / 2),
            line,
            " ".repeat(pad - pad / 2)
        );
        out.queue(cursor::MoveTo(col, start_row + 1 + i as u16))?;
        out.queue(Print(text))?;
    }
    out.queue(cursor::MoveTo(col, start_row + 1 + lines.len() as u16))?;
    out.queue(Print(&bottom))?;
    Ok(())
}
