//! Utility functions for rendering UI components

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

use crate::model::Comment;

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn format_duration(ms: u32) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// `999`, `25K`, `1.2M`, `3.4B`
pub fn format_count(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];
    for (scale, suffix) in UNITS {
        if n >= scale {
            let whole = n / scale;
            let tenth = (n % scale) * 10 / scale;
            return if tenth == 0 || whole >= 100 {
                format!("{}{}", whole, suffix)
            } else {
                format!("{}.{}{}", whole, tenth, suffix)
            };
        }
    }
    n.to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Display label for a comment; stored labels are used when no instant is known.
pub fn comment_time_label(comment: &Comment, now: DateTime<Utc>) -> String {
    let Some(created_at) = comment.created_at else {
        return comment.timestamp.clone();
    };
    let elapsed = now.signed_duration_since(created_at);
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        plural(elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        plural(elapsed.num_days() / 30, "month")
    } else {
        plural(elapsed.num_days() / 365, "year")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Viewer;
    use chrono::Duration;

    fn comment(created_at: Option<DateTime<Utc>>) -> Comment {
        Comment {
            id: "c".to_string(),
            author: Viewer {
                name: "a".to_string(),
                avatar: String::new(),
            },
            text: "t".to_string(),
            timestamp: "2 days ago".to_string(),
            created_at,
            likes: 0,
            replies: vec![],
        }
    }

    #[test]
    fn counts_are_compact() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(25_000), "25K");
        assert_eq!(format_count(1_250_000), "1.2M");
        assert_eq!(format_count(150_400), "150K");
        assert_eq!(format_count(2_000_000_000), "2B");
    }

    #[test]
    fn durations_show_hours_only_when_needed() {
        assert_eq!(format_duration(754_000), "12:34");
        assert_eq!(format_duration(3_723_000), "1:02:03");
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn relative_labels_follow_elapsed_time() {
        let now = Utc::now();
        assert_eq!(comment_time_label(&comment(Some(now)), now), "just now");
        let five = comment(Some(now - Duration::minutes(5)));
        assert_eq!(comment_time_label(&five, now), "5 minutes ago");
        let hour = comment(Some(now - Duration::minutes(61)));
        assert_eq!(comment_time_label(&hour, now), "1 hour ago");
        assert_eq!(comment_time_label(&comment(None), now), "2 days ago");
    }

    #[test]
    fn long_titles_are_cut() {
        assert_eq!(truncate_string("abcdefgh", 6), "abc...");
        assert_eq!(truncate_string("abc", 6), "abc");
    }
}
