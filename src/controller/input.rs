//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::model::{ActiveSection, SeekDirection, TapZone};
use crate::view::player_tap_area;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Status message blocks everything until dismissed or expired
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Composer captures text input
        if ui_state.active_section == ActiveSection::Composer {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        model.cycle_section_backward().await;
                    } else {
                        model.cycle_section_forward().await;
                    }
                    return Ok(());
                }
                KeyCode::BackTab => {
                    model.cycle_section_backward().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    drop(model);
                    self.submit_comment().await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    drop(model);
                    self.cancel_comment().await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    drop(model);
                    self.composer_backspace().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit(true).await;
                        return Ok(());
                    }
                    drop(model);
                    self.composer_input(c).await;
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }

        drop(model);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.lock().await.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                let model = self.model.lock().await;
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                self.model.lock().await.cycle_section_backward().await;
            }
            KeyCode::Up => {
                self.model.lock().await.move_selection_up().await;
            }
            KeyCode::Down => {
                let len = self.focused_list_len().await;
                self.model.lock().await.move_selection_down(len).await;
            }
            KeyCode::Enter => {
                if ui_state.active_section == ActiveSection::Recommended {
                    self.open_selected_recommended().await;
                }
            }
            KeyCode::Esc => {
                self.exit_fullscreen();
            }
            KeyCode::Char(' ') => {
                self.toggle_playback().await;
            }
            KeyCode::Left => {
                self.seek(SeekDirection::Back).await;
            }
            KeyCode::Right => {
                self.seek(SeekDirection::Forward).await;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.toggle_fullscreen().await;
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.toggle_like().await;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.toggle_dislike().await;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.toggle_subscribe().await;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.toggle_description().await;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.model.lock().await.set_active_section(ActiveSection::Composer).await;
            }
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
                if ui_state.active_section == ActiveSection::Comments {
                    self.delete_selected_comment().await;
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.model.lock().await.show_help_popup().await;
            }
            _ => {}
        }

        Ok(())
    }

    /// Left clicks inside the player are taps; `frame` is the terminal area.
    pub async fn handle_mouse_event(&self, mouse: MouseEvent, frame: Rect) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }

        let fullscreen = {
            let model = self.model.lock().await;
            if model.has_error().await || model.is_help_popup_open().await {
                return Ok(());
            }
            model.detail.lock().await.surface().is_fullscreen()
        };

        let area = player_tap_area(frame, fullscreen);
        let inside = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        if !inside {
            return Ok(());
        }

        let zone = TapZone::from_offset(mouse.column - area.x, area.width);
        self.tap(zone).await;
        Ok(())
    }
}
