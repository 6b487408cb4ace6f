//! Plain-text rendering of pages, forms and results.

use warc_core::{
    Chart, ChartKind, Emphasis, FormSchema, FormState, PageKind, ResultView, Status, Table,
};

/// Width of the longest bar in a chart, in characters.
pub const BAR_WIDTH: usize = 40;

/// Joins lines, each terminated by a newline.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Navigation listing for `warc pages`.
pub fn page_list() -> String {
    block(
        PageKind::ALL
            .iter()
            .flat_map(|kind| {
                [
                    format!("{:<12} {}", kind.slug(), kind.title()),
                    format!("{:<12} {}", "", kind.summary()),
                    format!("{:<12} POST {}", "", kind.default_endpoint()),
                ]
            })
            .collect(),
    )
}

/// Field listing for `warc fields <page>`.
pub fn field_list(schema: FormSchema) -> String {
    let state = FormState::new(schema);
    let mut lines = Vec::new();
    for (spec, default) in state.entries() {
        let mut line = format!("{} ({}): {}", spec.label(), spec.name, spec.kind);
        if !default.is_empty() {
            line.push_str(&format!(" [default: {default}]"));
        }
        lines.push(line);
        lines.push(format!("    {}", spec.description));
    }
    block(lines)
}

pub fn status_line(
    status: Status,
    error: Option<&str>,
) -> String {
    match (status, error) {
        (Status::Error, Some(message)) => format!("Status: error\n{message}"),
        (Status::Loading, _) => "Status: loading...".to_string(),
        (status, _) => format!("Status: {status}"),
    }
}

pub fn result_view(view: &ResultView) -> String {
    let mut lines = vec![
        view.heading.clone(),
        "=".repeat(view.heading.chars().count()),
    ];
    for metric in &view.metrics {
        let marker = match metric.emphasis {
            Emphasis::Normal => "",
            Emphasis::Positive => " [ok]",
            Emphasis::Alert => " [!]",
        };
        lines.push(format!("{}: {}{marker}", metric.label, metric.value));
    }

    let mut out = block(lines);
    if let Some(chart) = &view.chart {
        out.push('\n');
        out.push_str(&chart_text(chart));
    }
    if let Some(table) = &view.table {
        out.push('\n');
        out.push_str(&table_text(table));
    }
    out
}

/// One horizontal bar per point, scaled to the largest value.
pub fn chart_text(chart: &Chart) -> String {
    let style = match chart.kind {
        ChartKind::Line => "line",
        ChartKind::Area => "area",
    };
    let mut lines = vec![format!("{} ({style})", chart.title)];
    if let Some(x_label) = &chart.x_label {
        lines.push(format!("x: {x_label}"));
    }

    let label_width = chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

    lines.extend(chart.points.iter().map(|point| {
        format!(
            "{:<label_width$} | {} {}",
            point.label,
            bar(point.value, max),
            trim_number(point.value)
        )
    }));

    if let Some(caption) = &chart.caption {
        lines.push(caption.clone());
    }
    block(lines)
}

fn bar(
    value: f64,
    max: f64,
) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.clamp(1, BAR_WIDTH))
}

/// Two decimals without trailing zeros.
fn trim_number(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Header row, separator and left-aligned cells.
pub fn table_text(table: &Table) -> String {
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.header.chars().count())
        .collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![
        table.title.clone(),
        line(table.columns.iter().map(|c| c.header.as_str()).collect()),
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    ];
    lines.extend(
        table
            .rows
            .iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    lines.push(format!("({} rows)", table.row_count()));
    block(lines)
}
