//! Last catch panel.

use super::{rarity_color, Hud};
use crate::reward::RarityTier;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn result_lines(hud: &Hud) -> Vec<Line<'static>> {
    let Some(reward) = hud.last_result else {
        return vec![Line::from(Span::styled(
            "Nothing caught yet this round.",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let color = rarity_color(reward.rarity);
    let mut header = vec![
        Span::styled(
            reward.title(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", reward.rarity.label()),
            Style::default().fg(color),
        ),
    ];
    if reward.token_reward > 0 {
        header.push(Span::styled(
            format!("  +{} tokens", reward.token_reward),
            Style::default().fg(Color::Yellow),
        ));
    }

    let mut lines = vec![Line::from(header)];
    if !reward.description.is_empty() {
        lines.push(Line::from(Span::styled(
            reward.description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if reward.rarity == RarityTier::Legendary {
        lines.push(Line::from(Span::styled(
            "🎉 LEGENDARY CATCH!",
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    }
    lines
}

pub fn draw_result_panel(frame: &mut Frame, area: Rect, hud: &Hud) {
    let paragraph = Paragraph::new(result_lines(hud))
        .block(Block::default().borders(Borders::ALL).title(" Last Catch "))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::RewardTable;
    use crate::session::SessionPhase;
    use crate::ui::test_support::idle_hud;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_result() {
        assert!(text(&result_lines(&idle_hud())).contains("Nothing caught"));
    }

    #[test]
    fn test_common_catch_has_no_token_line() {
        let table = RewardTable::nusantara().unwrap();
        let common = table.fallback();
        let hud = Hud {
            phase: SessionPhase::Resolved,
            last_result: Some(common),
            ..idle_hud()
        };
        let shown = text(&result_lines(&hud));
        assert!(shown.contains(&common.name));
        assert!(!shown.contains("tokens"));
    }

    #[test]
    fn test_legendary_catch_is_celebrated() {
        let table = RewardTable::reference().unwrap();
        let legendary = table.entries().last().unwrap();
        let hud = Hud {
            phase: SessionPhase::Resolved,
            last_result: Some(legendary),
            ..idle_hud()
        };
        let shown = text(&result_lines(&hud));
        assert!(shown.contains("+50 tokens"));
        assert!(shown.contains("LEGENDARY"));
    }
}
