mod components;
mod dashboard;
mod details;
mod peer;
mod token;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, Popup, View};
use crate::config::ThemeOverrides;
use crate::data::DataProvider;
use crate::theme::Theme;

// Theme is resolved once at startup from the config overrides
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(overrides: &ThemeOverrides) {
    let _ = THEME.set(Theme::load(overrides));
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn warning() -> Color { theme().warning }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

pub fn draw<P: DataProvider>(f: &mut Frame, app: &App<P>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(3), // Search bar
            Constraint::Min(10),   // Current view
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    components::draw_search_bar(f, app, chunks[1]);

    match app.view {
        View::Dashboard => dashboard::draw(f, app, chunks[2]),
        View::Token => token::draw(f, app, chunks[2]),
        View::Peer => peer::draw(f, app, chunks[2]),
    }

    draw_footer(f, app, chunks[3]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Transaction => details::draw_transaction_panel(f, app),
        Popup::PeerToken => details::draw_peer_token_panel(f, app),
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let location = match app.view {
        View::Dashboard => "Dashboard".to_string(),
        View::Token => app
            .token
            .as_ref()
            .map(|t| format!("Token {}", crate::format::short_id(&t.info.token_id)))
            .unwrap_or_else(|| "Token".to_string()),
        View::Peer => app
            .peer
            .as_ref()
            .map(|p| format!("Peer {}", p.info.peer_id))
            .unwrap_or_else(|| "Peer".to_string()),
    };

    let mut spans = vec![
        Span::styled("Rubix Explorer", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(text_dim())),
        Span::styled(location, Style::default().fg(text())),
    ];

    if let Some(ref status) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(text_dim())));
        spans.push(Span::styled(status.as_str(), Style::default().fg(warning())));
    }

    let info = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_footer<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let mut hints: Vec<(&str, &str)> = match (app.popup, app.focus) {
        (Popup::Transaction, _) => vec![("i", "Token info"), ("u", "Quorum"), ("Esc", "Close")],
        (Popup::PeerToken, _) => vec![("i", "Token info"), ("Esc", "Close")],
        (Popup::Help, _) => vec![("Esc", "Close")],
        (Popup::None, Focus::Search) => vec![("Enter", "Search"), ("Esc", "Cancel")],
        (Popup::None, Focus::Jump) => vec![("0-9", "Page"), ("Enter", "Go"), ("Esc", "Cancel")],
        (Popup::None, Focus::Table) => vec![
            ("↑↓", "Row"),
            ("←→", "Page"),
            ("g", "Go to"),
            ("Enter", "Details"),
            ("/", "Search"),
        ],
    };

    if app.popup == Popup::None && app.focus == Focus::Table {
        match app.view {
            View::Dashboard => hints.push(("t", "Range")),
            View::Token => hints.push(("p", "Parts")),
            View::Peer => hints.push(("o", "Open token")),
        }
        if app.view != View::Dashboard {
            hints.push(("Esc", "Back"));
        }
        hints.push(("?", "Help"));
        hints.push(("q", "Quit"));
    }

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 90 { 6 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn help_section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(header()).add_modifier(Modifier::BOLD),
    ))
}

fn help_entry(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), Style::default().fg(accent())),
        Span::raw(action.to_string()),
    ])
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 40 { 95 } else { 80 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        help_section("Navigation"),
        help_entry("↑/↓ j/k", "Move between rows"),
        help_entry("←/→ [ ]", "Previous / next page"),
        help_entry("Home/End", "First / last page"),
        help_entry("g", "Go to page (type a number, Enter)"),
        help_entry("Esc/b", "Back to the dashboard"),
        Line::from(""),
        help_section("Search"),
        help_entry("/ or s", "Search by Peer ID or Token ID"),
        Line::from(vec![Span::styled(
            "            Up to 10 characters opens a peer, longer opens a token",
            Style::default().fg(text_dim()),
        )]),
        Line::from(""),
        help_section("Details"),
        help_entry("Enter", "Open transaction / token details"),
        help_entry("i", "Expand token information"),
        help_entry("u", "Expand quorum list"),
        Line::from(""),
        help_section("Views"),
        help_entry("t", "Dashboard: cycle 24 Hours / 30 Days / 12 Months"),
        help_entry("p", "Token: view part tokens"),
        help_entry("o", "Peer: open the selected token"),
        help_entry("R", "Refresh the current view"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Rubix Explorer Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}
