use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Focus, TokenState};
use crate::data::{DataProvider, TxKind};
use crate::format::{amount, short_id, table_timestamp};

use super::components::{draw_pagination, field_line, header_row, row_style, section_block};
use super::{accent, text, text_dim, warning};

pub fn draw<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let Some(token) = app.token.as_ref() else {
        let empty = Paragraph::new("No token loaded")
            .style(Style::default().fg(text_dim()))
            .block(section_block("Token Details", false));
        f.render_widget(empty, area);
        return;
    };

    let banner_height = if token.info.is_split && !token.viewing_parts { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title + IDs
            Constraint::Length(4),             // Token information
            Constraint::Length(banner_height), // Split notice
            Constraint::Min(6),                // History
            Constraint::Length(2),             // Pagination
        ])
        .split(area);

    draw_header(f, token, chunks[0]);
    draw_information(f, token, chunks[1]);
    if banner_height > 0 {
        draw_split_banner(f, chunks[2]);
    }
    draw_history(f, app, token, chunks[3]);
    draw_pagination(f, &token.pager, app.focus == Focus::Jump, "transactions", chunks[4]);
}

fn draw_header(f: &mut Frame, token: &TokenState, area: Rect) {
    let title = if token.viewing_parts { "Part Token Details" } else { "Token Details" };

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        field_line("Parent ID", token.info.parent_id.clone()),
    ];
    if token.viewing_parts {
        lines.push(field_line("Part Token ID", token.info.token_id.clone()));
    } else {
        lines.push(field_line("Token ID", token.info.token_id.clone()));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_information(f: &mut Frame, token: &TokenState, area: Rect) {
    let info = &token.info;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Paragraph::new(vec![
        field_line("Block ID", info.block_id.clone()),
        field_line("Token Level", info.token_level.clone()),
    ])
    .block(section_block(information_title(token.viewing_parts), false));

    let right = Paragraph::new(vec![
        field_line("Amount", format!("{} RBT", amount(info.amount))),
        field_line("Token Number", info.token_number.clone()),
    ])
    .block(section_block("Token Value", false));

    f.render_widget(left, columns[0]);
    f.render_widget(right, columns[1]);
}

fn information_title(viewing_parts: bool) -> &'static str {
    if viewing_parts {
        "Part Token Information"
    } else {
        "Token Information"
    }
}

fn draw_split_banner(f: &mut Frame, area: Rect) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(" This token is split into parts ", Style::default().fg(warning())),
        Span::styled("(p)", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled(" View Parts", Style::default().fg(text())),
    ]));
    f.render_widget(banner, area);
}

fn draw_history<P: DataProvider>(f: &mut Frame, app: &App<P>, token: &TokenState, area: Rect) {
    let active = app.focus == Focus::Table;
    let title = if token.viewing_parts { "Part Transaction History" } else { "Transaction History" };
    let block = section_block(title, active);

    let header = header_row(&["Transaction ID", "Sender ID", "Receiver ID", "Timestamp", "Subnet", "Amount", "Type"]);

    let rows: Vec<Row> = if token.history.items.is_empty() {
        vec![Row::new(vec![Span::styled(
            "  No transactions for this token",
            Style::default().fg(text_dim()),
        )])]
    } else {
        token
            .history
            .items
            .iter()
            .enumerate()
            .map(|(i, tx)| {
                let selected = i == app.selected_row && active;
                let kind_color = match tx.kind {
                    TxKind::Sent => warning(),
                    TxKind::Received | TxKind::Rbt => accent(),
                };
                Row::new(vec![
                    Span::styled(short_id(&tx.tx_id), Style::default().fg(text())),
                    Span::styled(short_id(&tx.sender_id), Style::default().fg(text())),
                    Span::styled(short_id(&tx.receiver_id), Style::default().fg(text())),
                    Span::styled(table_timestamp(&tx.timestamp), Style::default().fg(text_dim())),
                    Span::styled(tx.subnet_id.clone().unwrap_or_default(), Style::default().fg(text_dim())),
                    Span::styled(amount(tx.amount), Style::default().fg(text())),
                    Span::styled(tx.kind.label(), Style::default().fg(kind_color)),
                ])
                .style(row_style(selected))
            })
            .collect()
    };

    let widths = [
        Constraint::Percentage(14),
        Constraint::Percentage(14),
        Constraint::Percentage(14),
        Constraint::Percentage(22),
        Constraint::Percentage(12),
        Constraint::Percentage(12),
        Constraint::Percentage(12),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
