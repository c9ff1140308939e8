//! Right-hand side panels opened from a table row.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::DataProvider;
use crate::format::{amount, long_timestamp, short_id};

use super::components::field_line;
use super::{accent, header, text, text_dim};

/// Panel anchored to the right edge, `percent` of the frame wide.
fn side_rect(area: Rect, percent: u16) -> Rect {
    let width = (area.width as u32 * percent as u32 / 100).max(40).min(area.width as u32) as u16;
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: area.height,
    }
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(" Esc close ", Style::default().fg(text_dim()))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()))
}

/// Heading of a collapsible group, with its toggle key.
fn toggle_heading(title: &str, key: char, expanded: bool) -> Line<'static> {
    let marker = if expanded { "▼" } else { "▶" };
    Line::from(vec![
        Span::styled(format!("{} ", marker), Style::default().fg(accent())),
        Span::styled(title.to_string(), Style::default().fg(header()).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  ({})", key), Style::default().fg(text_dim())),
    ])
}

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(header()).add_modifier(Modifier::BOLD),
    ))
}

pub fn draw_transaction_panel<P: DataProvider>(f: &mut Frame, app: &App<P>) {
    let Some(details) = app.tx_details.as_ref() else {
        return;
    };

    let area = side_rect(f.area(), 45);
    f.render_widget(Clear, area);

    let mut lines = vec![toggle_heading("Token Information", 'i', app.token_info_expanded)];
    if app.token_info_expanded {
        lines.push(field_line("  Parent Token ID", short_id(&details.parent_token_id)));
        lines.push(field_line("  Amount", format!("{} RBT", amount(details.amount))));
        lines.push(field_line("  Token Level", details.token_level.clone()));
        lines.push(field_line("  Token Number", details.token_number.clone()));
    }

    lines.push(Line::from(""));
    lines.push(heading("Transaction History"));
    lines.push(field_line("  Transaction ID", details.transaction_id.clone()));
    lines.push(field_line("  Sender ID", details.sender_id.clone()));
    lines.push(field_line("  Receiver ID", details.receiver_id.clone()));
    lines.push(field_line("  Timestamp", long_timestamp(&details.timestamp)));
    lines.push(field_line("  Amount RBT", amount(details.amount_rbt)));
    lines.push(field_line("  Type", details.kind.label()));

    lines.push(Line::from(""));
    lines.push(toggle_heading(
        &format!("Quorum List ({})", details.quorum.len()),
        'u',
        app.quorum_expanded,
    ));
    if app.quorum_expanded {
        for (i, member) in details.quorum.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>2}. ", i + 1), Style::default().fg(text_dim())),
                Span::styled(member.id.clone(), Style::default().fg(text())),
            ]));
        }
    }

    let panel = Paragraph::new(lines)
        .block(panel_block("Transaction Details"))
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

pub fn draw_peer_token_panel<P: DataProvider>(f: &mut Frame, app: &App<P>) {
    let Some(details) = app.peer_token_details.as_ref() else {
        return;
    };

    let area = side_rect(f.area(), 40);
    f.render_widget(Clear, area);

    let token = &details.token;
    let mut lines = vec![
        field_line("Token ID", token.token_id.clone()),
        field_line("Token Value", format!("{} RBT", amount(token.token_value))),
        Line::from(""),
        toggle_heading("Token Information", 'i', app.token_info_expanded),
    ];
    if app.token_info_expanded {
        lines.push(field_line("  Token Level", token.token_level.clone()));
        lines.push(field_line("  Type", "RBT"));
        lines.push(field_line("  Timestamp", long_timestamp(&details.opened_at)));
    }

    let panel = Paragraph::new(lines)
        .block(panel_block("Token Details"))
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_rect_hugs_right_edge() {
        let area = Rect::new(0, 0, 120, 40);
        let panel = side_rect(area, 45);
        assert_eq!(panel.width, 54);
        assert_eq!(panel.x + panel.width, 120);
        assert_eq!(panel.height, 40);
    }

    #[test]
    fn test_side_rect_on_narrow_terminal() {
        let area = Rect::new(0, 0, 30, 10);
        let panel = side_rect(area, 45);
        assert_eq!(panel.width, 30);
        assert_eq!(panel.x, 0);
    }
}
