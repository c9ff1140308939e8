//! Building blocks shared by the dashboard, token and peer views.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row},
    Frame,
};

use crate::app::{App, Focus};
use crate::data::DataProvider;
use crate::pagination::Paginator;

use super::{accent, bg_selected, danger, header, inactive, text, text_dim};

/// Bordered block with the accent color when `active`.
pub fn section_block(title: &str, active: bool) -> Block<'static> {
    let (border_color, title_style) = if active {
        (accent(), Style::default().fg(accent()).add_modifier(Modifier::BOLD))
    } else {
        (inactive(), Style::default().fg(text()))
    };

    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

pub fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Span::styled(*t, Style::default().fg(header())))
            .collect::<Vec<_>>(),
    )
}

pub fn row_style(selected: bool) -> Style {
    if selected {
        Style::default().bg(bg_selected()).fg(text())
    } else {
        Style::default()
    }
}

/// `Label: value` line used in information boxes and side panels.
pub fn field_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(text_dim())),
        Span::styled(value.into(), Style::default().fg(text())),
    ])
}

pub fn draw_search_bar<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let focused = app.focus == Focus::Search;
    let block = section_block("Search", focused);

    let line = if app.search_input.is_empty() && !focused {
        Line::from(vec![
            Span::styled("Search by Peer ID or Token ID", Style::default().fg(text_dim())),
            Span::styled("  (/)", Style::default().fg(accent())),
        ])
    } else {
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::styled("󰍉 ", Style::default().fg(accent())),
            Span::styled(format!("{}{}", app.search_input, cursor), Style::default().fg(text())),
        ])
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

/// Prev, page window, Next and the "go to page" form, plus the item summary.
pub fn pagination_lines(pager: &Paginator, jump_focused: bool, noun: &str) -> Vec<Line<'static>> {
    let enabled = Style::default().fg(accent());
    let disabled = Style::default().fg(inactive());

    let mut controls = vec![Span::styled(
        "◀ Prev",
        if pager.is_first() { disabled } else { enabled },
    )];
    controls.push(Span::raw("  "));

    for entry in pager.window() {
        let span = match entry.page() {
            Some(n) if n == pager.current_page() => Span::styled(
                format!("[{}]", n),
                Style::default().fg(accent()).add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            Some(n) => Span::styled(format!(" {} ", n), Style::default().fg(text())),
            None => Span::styled(" … ", Style::default().fg(text_dim())),
        };
        controls.push(span);
    }

    controls.push(Span::raw("  "));
    controls.push(Span::styled(
        "Next ▶",
        if pager.is_last() { disabled } else { enabled },
    ));

    controls.push(Span::styled("   Go to page: ", Style::default().fg(text_dim())));
    let input = if jump_focused {
        format!("[{}_]", pager.jump_input())
    } else if pager.jump_input().is_empty() {
        format!("[{}]", pager.current_page())
    } else {
        format!("[{}]", pager.jump_input())
    };
    let input_style = if jump_focused {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(text_dim())
    };
    controls.push(Span::styled(input, input_style));
    controls.push(Span::styled(
        format!(" of {}", pager.total_pages()),
        Style::default().fg(text_dim()),
    ));

    if let Some(err) = pager.jump_error() {
        controls.push(Span::styled(format!("  {}", err), Style::default().fg(danger())));
    }

    let (first, last) = pager.showing();
    let summary = Line::from(Span::styled(
        format!("Showing {} to {} of {} {}", first, last, pager.total_items(), noun),
        Style::default().fg(text_dim()),
    ));

    vec![Line::from(controls), summary]
}

pub fn draw_pagination(f: &mut Frame, pager: &Paginator, jump_focused: bool, noun: &str, area: Rect) {
    let bar = Paragraph::new(pagination_lines(pager, jump_focused, noun)).alignment(Alignment::Center);
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JumpError;

    fn flatten(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_pagination_lines_show_window_and_summary() {
        let mut pager = Paginator::new(200, 10);
        pager.set_page(10);
        let lines = pagination_lines(&pager, false, "transactions");

        let controls = flatten(&lines[0]);
        assert!(controls.contains(" 1  …  8  9 [10] 11  12  …  20 "), "got {}", controls);
        assert!(controls.starts_with("◀ Prev"));
        assert!(controls.contains("Next ▶"));
        assert_eq!(flatten(&lines[1]), "Showing 91 to 100 of 200 transactions");
    }

    #[test]
    fn test_pagination_lines_show_jump_error() {
        let mut pager = Paginator::new(100, 10);
        assert_eq!(pager.jump("55"), Err(JumpError::OutOfRange { total_pages: 10 }));
        let controls = flatten(&pagination_lines(&pager, true, "transactions")[0]);
        assert!(controls.contains("Enter a number between 1 and 10"));
    }
}
