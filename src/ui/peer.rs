use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Focus, PeerState};
use crate::data::DataProvider;
use crate::format::amount;

use super::components::{draw_pagination, field_line, header_row, row_style, section_block};
use super::{accent, text, text_dim};

pub fn draw<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let Some(peer) = app.peer.as_ref() else {
        let empty = Paragraph::new("No peer loaded")
            .style(Style::default().fg(text_dim()))
            .block(section_block("Peer Details", false));
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Peer summary
            Constraint::Min(6),    // Tokens
            Constraint::Length(2), // Pagination
        ])
        .split(area);

    draw_summary(f, peer, chunks[0]);
    draw_tokens(f, app, peer, chunks[1]);
    draw_pagination(f, &peer.pager, app.focus == Focus::Jump, "tokens", chunks[2]);
}

fn draw_summary(f: &mut Frame, peer: &PeerState, area: Rect) {
    let lines = vec![
        field_line("Peer ID", peer.info.peer_id.clone()),
        Line::from(vec![
            Span::styled("Balance Amount: ", Style::default().fg(text_dim())),
            Span::styled(
                format!("{} RBT", amount(peer.info.balance)),
                Style::default().fg(accent()).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(section_block("Peer Details", false)), area);
}

fn draw_tokens<P: DataProvider>(f: &mut Frame, app: &App<P>, peer: &PeerState, area: Rect) {
    let active = app.focus == Focus::Table;
    let block = section_block("Tokens", active);

    let header = header_row(&["#", "Token ID", "Token Value", "Token Level", "Type", "Action"]);

    let first = peer.tokens.first_index();
    let rows: Vec<Row> = if peer.tokens.items.is_empty() {
        vec![Row::new(vec![Span::styled(
            "  This peer holds no tokens",
            Style::default().fg(text_dim()),
        )])]
    } else {
        peer.tokens
            .items
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let selected = i == app.selected_row && active;
                Row::new(vec![
                    Span::styled(format!("{}", first + i), Style::default().fg(text_dim())),
                    Span::styled(token.token_id.clone(), Style::default().fg(text())),
                    Span::styled(amount(token.token_value), Style::default().fg(text())),
                    Span::styled(token.token_level.clone(), Style::default().fg(text())),
                    Span::styled("RBT", Style::default().fg(accent())),
                    Span::styled("(o) Open ↗", Style::default().fg(accent())),
                ])
                .style(row_style(selected))
            })
            .collect()
    };

    let widths = [
        Constraint::Length(5),
        Constraint::Percentage(25),
        Constraint::Percentage(18),
        Constraint::Percentage(15),
        Constraint::Percentage(10),
        Constraint::Percentage(20),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
