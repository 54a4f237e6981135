//! Terminal rendering for the game binary.

pub mod fishing_scene;
pub mod result_panel;
pub mod stats_panel;
mod throbber;

use crate::reward::{RarityTier, RewardDefinition};
use crate::session::{PresentationStage, SessionPhase};
use crate::stats::PlayerStatistics;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything one frame needs, borrowed from the host loop.
#[derive(Debug, Clone)]
pub struct Hud<'a> {
    pub phase: SessionPhase,
    pub stage: Option<PresentationStage>,
    pub progress: Option<f64>,
    pub last_result: Option<&'a RewardDefinition>,
    pub statistics: PlayerStatistics,
    pub player_name: &'a str,
    pub player_handle: &'a str,
    pub table_name: &'a str,
    /// Tier probabilities of the active table
    pub odds: &'a [(RarityTier, f64)],
    /// One-line feedback, e.g. share results
    pub status: Option<&'a str>,
    /// Rounds started this session; seeds the idle flavor line
    pub rounds: u64,
}

pub fn rarity_color(tier: RarityTier) -> Color {
    match tier {
        RarityTier::Common => Color::White,
        RarityTier::Rare => Color::Cyan,
        RarityTier::Legendary => Color::Rgb(255, 165, 0),
    }
}

/// Main UI drawing function.
///
/// ```text
/// +------------------ Fishy Fortune ------------------+
/// |  water scene                   |  statistics      |
/// |--------------------------------|                  |
/// |  last catch                    |                  |
/// +---------------------------------------------------+
/// |  [Space] Fish  [R] Reset  [S] Share  [Q] Quit      |
/// +---------------------------------------------------+
/// ```
pub fn draw_ui(frame: &mut Frame, hud: &Hud) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Scene + panels
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_title(frame, v_chunks[0], hud);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(v_chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(6)])
        .split(h_chunks[0]);

    fishing_scene::render_fishing_scene(frame, left[0], hud);
    result_panel::draw_result_panel(frame, left[1], hud);
    stats_panel::draw_stats_panel(frame, h_chunks[1], hud);

    draw_footer(frame, v_chunks[2], hud);
}

fn draw_title(frame: &mut Frame, area: ratatui::layout::Rect, hud: &Hud) {
    let line = Line::from(vec![
        Span::styled(
            "🎣 Fishy Fortune",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Angler: {}", hud.player_name),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(" "),
        Span::styled(hud.player_handle, Style::default().fg(Color::DarkGray)),
    ]);
    let title = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn draw_footer(frame: &mut Frame, area: ratatui::layout::Rect, hud: &Hud) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    let mut spans = vec![
        key("[Space]"),
        Span::raw(" Fish  "),
        key("[R]"),
        Span::raw(" Reset  "),
        key("[S]"),
        Span::raw(" Share  "),
        key("[Q]"),
        Span::raw(" Quit"),
    ];
    if let Some(status) = hud.status {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status, Style::default().fg(Color::Green)));
    }
    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
