//! Detail screen content: video info, comment thread, composer, recommended rail

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, Comment, CommentEntry, DetailSnapshot, UiState, Video};
use super::icons::Glyph;
use super::layout::section_border;
use super::utils::{comment_time_label, format_count, render_scrollable_list, truncate_string};

pub fn render_video_info(frame: &mut Frame, area: Rect, snapshot: &DetailSnapshot) {
    let video = &snapshot.video;
    let stats = &video.stats;

    let reaction = |active: bool| {
        if active {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let mut creator = vec![Span::styled(
        video.creator.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if video.creator.verified {
        creator.push(Span::styled(format!(" {}", Glyph::Verified.symbol()), Style::default().fg(Color::Cyan)));
    }
    creator.push(Span::styled(
        format!("  {} subscribers  ", video.creator.subscribers),
        Style::default().fg(Color::DarkGray),
    ));
    creator.push(if snapshot.subscribed {
        Span::styled("[Subscribed]", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("[Subscribe]", Style::default().fg(Color::White).bg(Color::Red))
    });

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} {} views", Glyph::Views.symbol(), format_count(stats.views))),
            Span::raw(format!("  ·  {}  ·  ", video.upload_date)),
            Span::raw(format!("{} {}", Glyph::for_category(&video.category).symbol(), video.category)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} {}", Glyph::Like.symbol(), format_count(stats.likes)),
                reaction(snapshot.liked),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{} {}", Glyph::Dislike.symbol(), format_count(stats.dislikes)),
                reaction(snapshot.disliked),
            ),
            Span::raw(format!(
                "   {} {}   {} {}",
                Glyph::Comment.symbol(),
                format_count(stats.comments),
                Glyph::Share.symbol(),
                format_count(stats.shares)
            )),
        ]),
        Line::from(creator),
        Line::from(snapshot.description.clone()).style(Style::default().fg(Color::Gray)),
    ];

    if snapshot.description_expanded && !video.hashtags.is_empty() {
        lines.push(Line::from(video.hashtags.join(" ")).style(Style::default().fg(Color::Blue)));
    }
    if snapshot.description_truncated {
        lines.push(Line::from("m: show more").style(Style::default().fg(Color::DarkGray)));
    } else if snapshot.description_expanded {
        lines.push(Line::from("m: show less").style(Style::default().fg(Color::DarkGray)));
    }

    let info = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", video.title))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(info, area);
}

fn comment_lines(comment: &Comment, own: bool, selected: bool, focused: bool) -> Vec<Line<'static>> {
    let now = Utc::now();
    let name_style = if selected && focused {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut header = vec![
        Span::styled(if selected { "▸ " } else { "  " }, name_style),
        Span::styled(comment.author.name.clone(), name_style),
        Span::styled(format!("  {}", comment_time_label(comment, now)), Style::default().fg(Color::DarkGray)),
    ];
    if own {
        header.push(Span::styled("  (you, x to delete)", Style::default().fg(Color::DarkGray)));
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(format!("    {}", comment.text)),
        Line::from(format!("    {} {}", Glyph::Like.symbol(), format_count(comment.likes)))
            .style(Style::default().fg(Color::DarkGray)),
    ];

    for reply in &comment.replies {
        lines.push(Line::from(vec![
            Span::raw("      ↳ "),
            Span::styled(reply.author.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", comment_time_label(reply, now)), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(format!("        {}", reply.text)));
    }
    lines
}

pub fn render_comments(frame: &mut Frame, area: Rect, comments: &[CommentEntry], ui_state: &UiState) {
    let focused = ui_state.active_section == ActiveSection::Comments;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Comments ({}) ", comments.len()))
        .padding(Padding::horizontal(1))
        .border_style(section_border(ui_state.active_section, ActiveSection::Comments));

    if comments.is_empty() {
        let empty = Paragraph::new("No comments yet. Press c to start the conversation.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = comments
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            ListItem::new(comment_lines(&entry.comment, entry.own, i == ui_state.comment_selected, focused))
        })
        .collect();

    render_scrollable_list(frame, area, items, ui_state.comment_selected, block);
}

pub fn render_composer(frame: &mut Frame, area: Rect, draft: &str, ui_state: &UiState) {
    let focused = ui_state.active_section == ActiveSection::Composer;
    let (text, style) = match (draft.is_empty(), focused) {
        (true, true) => ("Type your comment, Enter to post, Esc to cancel".to_string(), Style::default().fg(Color::DarkGray)),
        (true, false) => ("Add a comment... (c)".to_string(), Style::default().fg(Color::DarkGray)),
        (false, true) => (format!("{}▏", draft), Style::default().fg(Color::White)),
        (false, false) => (draft.to_string(), Style::default().fg(Color::Gray)),
    };

    let composer = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Comment ")
            .padding(Padding::horizontal(1))
            .border_style(section_border(ui_state.active_section, ActiveSection::Composer)),
    );
    frame.render_widget(composer, area);
}

pub fn render_recommended(frame: &mut Frame, area: Rect, videos: &[Video], ui_state: &UiState) {
    let focused = ui_state.active_section == ActiveSection::Recommended;
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            let selected = i == ui_state.recommended_selected;
            let title_style = match (selected, focused) {
                (true, true) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().add_modifier(Modifier::BOLD),
                _ => Style::default().fg(Color::White),
            };
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_string(
                        &format!("{} {}", Glyph::for_category(&video.category).symbol(), video.title),
                        width,
                    ),
                    title_style,
                )),
                Line::from(Span::styled(
                    truncate_string(
                        &format!(
                            "{} · {} views · {}",
                            video.creator.name,
                            format_count(video.stats.views),
                            video.duration
                        ),
                        width,
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Up next ")
        .padding(Padding::horizontal(1))
        .border_style(section_border(ui_state.active_section, ActiveSection::Recommended));

    render_scrollable_list(frame, area, items, ui_state.recommended_selected, block);
}
