use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Focus};
use crate::data::{DataProvider, TimeRange};
use crate::format::{amount, short_id, table_timestamp, thousands};

use super::components::{draw_pagination, header_row, row_style, section_block};
use super::{accent, text, text_dim};

pub fn draw<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let chart_height = if area.height < 30 { Constraint::Length(8) } else { Constraint::Percentage(35) };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Network statistics
            chart_height,          // Transaction volume
            Constraint::Min(6),    // Latest transactions
            Constraint::Length(2), // Pagination
        ])
        .split(area);

    draw_stats(f, app, chunks[0]);
    draw_volume_chart(f, app, chunks[1]);
    draw_transactions(f, app, chunks[2]);
    draw_pagination(
        f,
        &app.dashboard.pager,
        app.focus == Focus::Jump,
        "transactions",
        chunks[3],
    );
}

fn draw_stats<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let labels = ["Transactions", "Total Peers", "Total Supply"];

    for ((label, counter), slot) in labels.iter().zip(app.dashboard.counters.iter()).zip(boxes.iter()) {
        let value = Paragraph::new(Line::from(Span::styled(
            thousands(counter.value()),
            Style::default().fg(text()).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(section_block(label, false));
        f.render_widget(value, *slot);
    }
}

fn draw_volume_chart<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let volume = &app.dashboard.volume;

    let range_tabs: Vec<Span> = TimeRange::ALL
        .iter()
        .flat_map(|range| {
            let style = if *range == app.dashboard.time_range {
                Style::default().fg(accent()).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(text_dim())
            };
            vec![Span::styled(format!(" {} ", range.label()), style), Span::raw(" ")]
        })
        .collect();

    let block = section_block("Transaction History (t)", false).title_bottom(Line::from(range_tabs).right_aligned());

    if volume.is_empty() {
        let empty = Paragraph::new("No volume data")
            .style(Style::default().fg(text_dim()))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let points: Vec<(f64, f64)> = volume
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value as f64))
        .collect();

    let max = volume.iter().map(|p| p.value).max().unwrap_or(0);
    let y_top = (max as f64 / 100.0).ceil() * 100.0;

    let last = volume.len() - 1;
    let x_labels: Vec<Span> = [0, last / 2, last]
        .iter()
        .map(|&i| Span::styled(volume[i].label.clone(), Style::default().fg(text_dim())))
        .collect();

    let y_labels: Vec<Span> = [0.0, y_top / 2.0, y_top]
        .iter()
        .map(|v| Span::styled(format!("${}", thousands(*v as u64)), Style::default().fg(text_dim())))
        .collect();

    let dataset = Dataset::default()
        .name("Value")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(accent()))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(text_dim()))
                .bounds([0.0, last as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(text_dim()))
                .bounds([0.0, y_top])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn draw_transactions<P: DataProvider>(f: &mut Frame, app: &App<P>, area: Rect) {
    let active = app.focus == Focus::Table;
    let block = section_block("Latest Transactions", active);

    let header = header_row(&["Transaction ID", "Sender ID", "Receiver ID", "Timestamp", "Amount", "Type", "Action"]);

    let rows: Vec<Row> = if app.dashboard.transactions.items.is_empty() {
        vec![Row::new(vec![Span::styled(
            "  No transactions",
            Style::default().fg(text_dim()),
        )])]
    } else {
        app.dashboard
            .transactions
            .items
            .iter()
            .enumerate()
            .map(|(i, tx)| {
                let selected = i == app.selected_row && active;
                Row::new(vec![
                    Span::styled(short_id(&tx.tx_id), Style::default().fg(text())),
                    Span::styled(short_id(&tx.sender_id), Style::default().fg(text())),
                    Span::styled(short_id(&tx.receiver_id), Style::default().fg(text())),
                    Span::styled(table_timestamp(&tx.timestamp), Style::default().fg(text_dim())),
                    Span::styled(amount(tx.amount), Style::default().fg(text())),
                    Span::styled("RBT", Style::default().fg(accent())),
                    Span::styled("Details ↗", Style::default().fg(accent())),
                ])
                .style(row_style(selected))
            })
            .collect()
    };

    let widths = [
        Constraint::Percentage(15),
        Constraint::Percentage(15),
        Constraint::Percentage(15),
        Constraint::Percentage(21),
        Constraint::Percentage(11),
        Constraint::Percentage(8),
        Constraint::Percentage(15),
    ];

    let table = Table::new(rows, widths).header(header).block(block);

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::data::mock::MockProvider;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_transactions_table_has_type_column() {
        let config = ExplorerConfig::default();
        let provider = MockProvider::new(config.mock.clone(), Some(5));
        let app = App::new(provider, config).await.unwrap();

        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| draw(f, &app, f.area())).unwrap();

        let lines = screen_lines(&terminal);
        let header = lines
            .iter()
            .find(|l| l.contains("Transaction ID"))
            .expect("table header rendered");
        let amount = header.find("Amount").unwrap();
        let kind = header.find("Type").unwrap();
        let action = header.find("Action").unwrap();
        assert!(amount < kind && kind < action, "header: {}", header);

        assert!(lines.iter().any(|l| l.contains("RBT") && l.contains("Details ↗")));
    }
}
