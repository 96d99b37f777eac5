//! Player area rendering: scrubbing player, embed placeholder, overlays

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::model::{PlaybackState, ScrubbingView, SeekDirection, SurfaceKind, SurfaceView};
use super::icons::Glyph;
use super::utils::{format_duration, truncate_string};

pub fn render_player(frame: &mut Frame, area: Rect, surface: &SurfaceView, title: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let fullscreen_hint = if surface.fullscreen { " Esc: exit fullscreen " } else { " f: fullscreen " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", truncate_string(title, area.width.saturating_sub(6) as usize)))
        .title_bottom(Line::from(fullscreen_hint).right_aligned())
        .border_style(border_style);

    if surface.fullscreen {
        frame.render_widget(Clear, area);
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &surface.kind {
        SurfaceKind::Scrubbing(view) => render_scrubbing(frame, inner, view),
        SurfaceKind::Embedded { url } => {
            let text = vec![
                Line::from(format!("{} Embedded player", Glyph::Video.symbol())),
                Line::from(""),
                Line::from(url.as_str()).style(Style::default().fg(Color::Blue)),
                Line::from(""),
                Line::from("Playback is controlled by the embedded provider.")
                    .style(Style::default().fg(Color::DarkGray)),
            ];
            render_centered(frame, inner, text);
        }
        SurfaceKind::Unavailable => {
            render_centered(frame, inner, vec![Line::from("Video unavailable")]);
        }
    }
}

fn render_scrubbing(frame: &mut Frame, area: Rect, view: &ScrubbingView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Picture with overlays
            Constraint::Length(1), // Progress gauge
        ])
        .split(area);

    let zones = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(chunks[0]);

    let overlay = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    match view.seek_feedback {
        Some(SeekDirection::Back) => {
            render_centered(frame, zones[0], vec![Line::from(Glyph::SeekBack.symbol()).style(overlay)]);
        }
        Some(SeekDirection::Forward) => {
            render_centered(frame, zones[2], vec![Line::from(Glyph::SeekForward.symbol()).style(overlay)]);
        }
        None => {}
    }

    let center = match view.state {
        PlaybackState::Buffering => Some(
            Line::from(format!("{} Buffering", Glyph::Buffering.symbol())).style(Style::default().fg(Color::Yellow)),
        ),
        PlaybackState::Failed => {
            let reason = view.failure.as_deref().unwrap_or("Playback failed");
            Some(
                Line::from(format!("{} {}. Space to retry", Glyph::Failed.symbol(), reason))
                    .style(Style::default().fg(Color::Red)),
            )
        }
        _ => match view.toggle_feedback {
            Some(PlaybackState::Playing) => Some(Line::from(Glyph::Play.symbol()).style(overlay)),
            Some(_) => Some(Line::from(Glyph::Pause.symbol()).style(overlay)),
            None if view.show_center_play => Some(Line::from(Glyph::Play.symbol()).style(overlay)),
            None => None,
        },
    };
    if let Some(line) = center {
        render_centered(frame, zones[1], vec![line]);
    }

    let ratio = if view.duration_ms > 0 {
        (view.position_ms as f64 / view.duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Red))
        .ratio(ratio)
        .label(format!(
            "{} / {}",
            format_duration(view.position_ms),
            format_duration(view.duration_ms)
        ));
    frame.render_widget(gauge, chunks[1]);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let target = Rect {
        y: area.y + top,
        height: height.min(area.height),
        ..area
    };
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, target);
}
