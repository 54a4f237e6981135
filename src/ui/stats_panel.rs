//! Player statistics and table odds.

use super::{rarity_color, Hud};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn stats_lines(hud: &Hud) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Fish caught: ", label),
            Span::styled(
                hud.statistics.total_catches.to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Tokens:      ", label),
            Span::styled(
                hud.statistics.total_tokens.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    if !hud.odds.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Odds", label)));
        for (tier, weight) in hud.odds {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<10}", tier.label()),
                    Style::default().fg(rarity_color(*tier)),
                ),
                Span::raw(format!("{:>5.1}%", weight * 100.0)),
            ]));
        }
    }
    lines
}

pub fn draw_stats_panel(frame: &mut Frame, area: Rect, hud: &Hud) {
    let paragraph = Paragraph::new(stats_lines(hud))
        .block(Block::default().borders(Borders::ALL).title(" Statistics "));
    frame.render_widget(paragraph, area);
}
