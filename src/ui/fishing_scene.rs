//! Water scene with the bobber animation.
//!
//! The bobber follows the presentation stage: it drops in while casting,
//! floats while waiting and dips red when a fish bites.

use super::throbber::{idle_message, spinner_char};
use super::{rarity_color, Hud};
use crate::session::{PresentationStage, SessionPhase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// # Layout
/// ```text
/// +---------------------------------------+
/// |     ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~         |
/// |       ~~~~~~ O ~~~~~~                 |
/// |     ~ ~ ~ ~ ~|~ ~ ~ ~ ~ ~ ~           |
/// +---------------------------------------+
/// |  ⠋ Waiting for a bite...  ████░░░░    |
/// +---------------------------------------+
/// ```
pub fn render_fishing_scene(frame: &mut Frame, area: Rect, hud: &Hud) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    draw_water(frame, chunks[0], hud);
    draw_phase_line(frame, chunks[1], hud);
}

fn water(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Blue))
}

fn line_segment(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn bobber(color: Color) -> Span<'static> {
    Span::styled(
        " O ",
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Scene rows for the current phase and stage.
pub fn water_lines(hud: &Hud) -> Vec<Line<'static>> {
    match (hud.phase, hud.stage) {
        (SessionPhase::Presenting, Some(PresentationStage::Casting)) => vec![
            Line::from(line_segment("             |")),
            Line::from(bobber(Color::White)),
            Line::from(water("    ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~")),
            Line::from(water("      ~~~~~~~~~~~~~~~~~~~~~")),
        ],
        (SessionPhase::Presenting, Some(PresentationStage::Biting)) => vec![
            Line::from(water("    ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~")),
            Line::from(vec![
                water("      ~~~"),
                Span::styled("~", Style::default().fg(Color::LightBlue)),
                water("~"),
                bobber(Color::Red),
                water("~"),
                Span::styled("~", Style::default().fg(Color::LightBlue)),
                water("~~~"),
            ]),
            Line::from(vec![
                water("    ~ ~ ~ ~"),
                line_segment(" |"),
                water(" ~ ~ ~ ~ ~ ~"),
            ]),
            Line::from(line_segment("             |")),
        ],
        (SessionPhase::Presenting, _) => vec![
            Line::from(water("    ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~")),
            Line::from(vec![
                water("      ~~~~~~"),
                bobber(Color::White),
                water("~~~~~~"),
            ]),
            Line::from(vec![
                water("    ~ ~ ~ ~ ~"),
                line_segment("|"),
                water("~ ~ ~ ~ ~ ~ ~"),
            ]),
            Line::from(line_segment("             |")),
        ],
        (SessionPhase::Resolved, _) => {
            let color = hud
                .last_result
                .map(|r| rarity_color(r.rarity))
                .unwrap_or(Color::White);
            let fish = hud
                .last_result
                .map(|r| r.emoji.clone())
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "><>".to_string());
            vec![
                Line::from(Span::styled(
                    "  *  SPLASH!  *  ",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(fish, Style::default().fg(color))),
                Line::from(water("    ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~")),
                Line::from(water("      ~~~~~~~~~~~~~~~~~~~~~")),
            ]
        }
        (SessionPhase::Idle, _) => vec![
            Line::from(""),
            Line::from(""),
            Line::from(water("    ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~")),
            Line::from(water("      ~~~~~~~~~~~~~~~~~~~~~")),
        ],
    }
}

fn draw_water(frame: &mut Frame, area: Rect, hud: &Hud) {
    let title = format!(" The Lake ({}) ", hud.table_name);
    let paragraph = Paragraph::new(water_lines(hud))
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Status text for the phase line.
pub fn phase_text(hud: &Hud) -> (String, Color) {
    let spinner = spinner_char();
    match (hud.phase, hud.stage) {
        (SessionPhase::Idle, _) => (
            format!("{}  Press Space to cast", idle_message(hud.rounds)),
            Color::Gray,
        ),
        (SessionPhase::Presenting, Some(PresentationStage::Biting)) => {
            ("🐟 FISH ON! Reeling in!".to_string(), Color::Yellow)
        }
        (SessionPhase::Presenting, Some(PresentationStage::Casting)) => {
            (format!("{} Casting line...", spinner), Color::White)
        }
        (SessionPhase::Presenting, _) => {
            (format!("{} Waiting for a bite...", spinner), Color::Cyan)
        }
        (SessionPhase::Resolved, _) => (
            "Caught! Press Space to cast again".to_string(),
            Color::Green,
        ),
    }
}

fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn draw_phase_line(frame: &mut Frame, area: Rect, hud: &Hud) {
    let (text, color) = phase_text(hud);
    let mut spans = vec![Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(progress) = hud.progress {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            progress_bar(progress, 10),
            Style::default().fg(Color::Cyan),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
