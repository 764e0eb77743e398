use super::App;
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs},
    Frame,
};
use retvol_analytics::{ChartData, ChartSpec, HistogramBin};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Chart tabs
            Constraint::Min(0),    // Chart
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    let titles: Vec<String> = app
        .charts
        .iter()
        .enumerate()
        .map(|(i, chart)| format!("{} {}", i + 1, chart.title))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Charts"));
    f.render_widget(tabs, chunks[0]);

    match app.current() {
        Some(chart) => match &chart.data {
            ChartData::Line { points } => render_line(f, chunks[1], chart, points),
            ChartData::Histogram { bins } => render_histogram(f, chunks[1], chart, bins),
        },
        None => render_empty(f, chunks[1], "No charts"),
    }

    let instructions = Paragraph::new("Tab/←→: Switch chart | 1-3: Jump | q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(instructions, chunks[2]);
}

fn render_empty(f: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_line(f: &mut Frame, area: Rect, chart: &ChartSpec, points: &[(NaiveDate, f64)]) {
    if points.is_empty() {
        render_empty(f, area, "Not enough data to plot");
        return;
    }

    let data: Vec<(f64, f64)> = points
        .iter()
        .map(|(date, y)| (f64::from(date.num_days_from_ce()), *y))
        .collect();

    let x_min = data[0].0;
    let x_max = data[data.len() - 1].0.max(x_min + 1.0);
    let (y_min, y_max) = padded(chart.y_bounds().unwrap_or((0.0, 1.0)));

    let dataset = Dataset::default()
        .name(chart.series_label.clone().unwrap_or_default())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let x_axis = Axis::default()
        .title(chart.x_label.clone())
        .style(Style::default().fg(Color::Gray))
        .bounds([x_min, x_max])
        .labels(vec![
            Span::raw(date_label(x_min)),
            Span::raw(date_label((x_min + x_max) / 2.0)),
            Span::raw(date_label(x_max)),
        ]);

    let y_axis = Axis::default()
        .title(chart.y_label.clone())
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(value_label(y_min)),
            Span::raw(value_label((y_min + y_max) / 2.0)),
            Span::raw(value_label(y_max)),
        ]);

    let widget = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(chart.title.clone()),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(widget, area);
}

fn render_histogram(f: &mut Frame, area: Rect, chart: &ChartSpec, bins: &[HistogramBin]) {
    if bins.is_empty() {
        render_empty(f, area, "Not enough data to plot");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let data: Vec<(&str, u64)> = bins.iter().map(|bin| ("", bin.count)).collect();
    let inner_width = chunks[0].width.saturating_sub(2);
    let bar_width = u16::try_from(usize::from(inner_width) / bins.len())
        .unwrap_or(1)
        .max(1);

    let widget = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({} bins, y: {})", chart.title, bins.len(), chart.y_label)),
        )
        .data(data.as_slice())
        .bar_width(bar_width)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow));
    f.render_widget(widget, chunks[0]);

    let lower = bins[0].lower;
    let upper = bins[bins.len() - 1].upper;
    let axis = Paragraph::new(format!(
        "{}: {} … {}",
        chart.x_label,
        value_label(lower),
        value_label(upper)
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    f.render_widget(axis, chunks[1]);
}

/// Widens (min, max) by 5% each side so lines don't sit on the border.
fn padded((min, max): (f64, f64)) -> (f64, f64) {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    (min - span * 0.05, max + span * 0.05)
}

#[allow(clippy::cast_possible_truncation)]
fn date_label(days_from_ce: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(days_from_ce.round() as i32)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn value_label(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000.0 {
        format!("{value:.0}")
    } else if magnitude >= 1.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.4}")
    }
}
