//! Screen layout and the header bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, Durability};

/// Regions of the detail screen
pub struct DetailLayout {
    pub header: Rect,
    pub player: Rect,
    pub info: Rect,
    pub comments: Rect,
    pub composer: Rect,
    pub recommended: Rect,
}

pub fn detail_layout(area: Rect) -> DetailLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(68), // Player, info and comments
            Constraint::Percentage(32), // Recommended rail
        ])
        .split(rows[1]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45), // Player
            Constraint::Length(8),      // Title, stats, description
            Constraint::Min(3),         // Comments
            Constraint::Length(3),      // Composer
        ])
        .split(columns[0]);

    DetailLayout {
        header: rows[0],
        player: main[0],
        info: main[1],
        comments: main[2],
        composer: main[3],
        recommended: columns[1],
    }
}

/// Where the player is drawn; in fullscreen it takes the whole frame.
pub fn player_area(area: Rect, fullscreen: bool) -> Rect {
    if fullscreen {
        area
    } else {
        detail_layout(area).player
    }
}

/// Player region inside its border, where the tap zones are laid out.
pub fn player_tap_area(area: Rect, fullscreen: bool) -> Rect {
    Block::default().borders(Borders::ALL).inner(player_area(area, fullscreen))
}

pub fn section_border(active: ActiveSection, section: ActiveSection) -> Style {
    if active == section {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

pub fn render_header(frame: &mut Frame, area: Rect, viewer_name: &str, durability: Durability) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Brand
            Constraint::Length(30), // Viewer
        ])
        .split(area);

    let brand = Paragraph::new(Line::from(vec![
        Span::styled("▶ WeTube", Style::default().fg(Color::Red)),
        Span::styled("   h: help  q: quit", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(brand, chunks[0]);

    let (label, color) = match durability {
        Durability::Persistent => (format!("👤 {}", viewer_name), Color::Cyan),
        Durability::MemoryOnly => (format!("👤 {} (not saved)", viewer_name), Color::Yellow),
    };
    let viewer = Paragraph::new(label)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Viewer "));
    frame.render_widget(viewer, chunks[1]);
}
