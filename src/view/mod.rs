//! View module - UI rendering
//!
//! - `utils`: Shared formatting helpers and the scrollable list
//! - `icons`: Glyph lookup table
//! - `layout`: Screen regions and header
//! - `player`: Player area and its overlays
//! - `content`: Video info, comments, composer and recommended rail
//! - `overlays`: Status notification and help popup

mod utils;
mod icons;
mod layout;
mod player;
mod content;
mod overlays;

use ratatui::Frame;
use ratatui::widgets::Paragraph;

use crate::model::{ActiveSection, DetailSnapshot, Durability, UiState};

pub use layout::player_tap_area;

#[cfg(test)]
pub use layout::player_area;

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        snapshot: Option<&DetailSnapshot>,
        ui_state: &UiState,
        viewer_name: &str,
        durability: Durability,
    ) {
        let area = frame.area();
        let regions = layout::detail_layout(area);

        layout::render_header(frame, regions.header, viewer_name, durability);

        match snapshot {
            Some(snapshot) if snapshot.surface.fullscreen => {
                player::render_player(frame, area, &snapshot.surface, &snapshot.video.title, true);
            }
            Some(snapshot) => {
                let player_focused = ui_state.active_section == ActiveSection::Player;
                player::render_player(
                    frame,
                    regions.player,
                    &snapshot.surface,
                    &snapshot.video.title,
                    player_focused,
                );
                content::render_video_info(frame, regions.info, snapshot);
                content::render_comments(frame, regions.comments, &snapshot.comments, ui_state);
                content::render_composer(frame, regions.composer, &snapshot.composer_draft, ui_state);
                content::render_recommended(frame, regions.recommended, &snapshot.recommended, ui_state);
            }
            None => {
                frame.render_widget(Paragraph::new("No video selected"), regions.player);
            }
        }

        if ui_state.error_message.is_some() {
            overlays::render_status_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
