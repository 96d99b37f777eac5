//! Overlay rendering (status notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;

const KEYBINDINGS: &[(&str, &str)] = &[
    ("", "── Player ──"),
    ("Space / click", "Play / Pause"),
    ("← / →", "Seek 5s back / forward"),
    ("double-click side", "Seek 5s back / forward"),
    ("F", "Toggle fullscreen"),
    ("Esc", "Exit fullscreen"),
    ("", ""),
    ("", "── Video ──"),
    ("L / D", "Like / Dislike"),
    ("S", "Subscribe to creator"),
    ("M", "Show more / less"),
    ("", ""),
    ("", "── Comments ──"),
    ("C", "Write a comment"),
    ("Enter / Esc", "Post / Cancel (composer)"),
    ("X / Delete", "Delete your comment"),
    ("", ""),
    ("", "── General ──"),
    ("Tab / Shift+Tab", "Cycle sections"),
    ("↑ / ↓", "Move selection"),
    ("Enter", "Open recommended video"),
    ("H", "Toggle this help"),
    ("Q", "Quit"),
];

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_status_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(message) = ui_state.error_message.as_deref() else {
        return;
    };
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;
    let lines = message.chars().count().div_ceil(inner_width).max(1) as u16;
    let popup_area = centered(area, popup_width, lines + 2);

    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Notice (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered(area, 62, KEYBINDINGS.len() as u16 + 2);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = KEYBINDINGS
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(*desc),
                ])
            }
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (H or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popups_never_exceed_the_frame() {
        let frame = Rect::new(0, 0, 40, 10);
        let popup = centered(frame, 62, 30);
        assert_eq!((popup.width, popup.height), (40, 10));
        let small = centered(frame, 20, 4);
        assert_eq!((small.x, small.y), (10, 3));
    }
}
