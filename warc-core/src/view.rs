//! Presentation models derived from page results.
//!
//! Every page maps its response into a [`ResultView`]; front-ends draw the
//! view without looking at the response again.

/// How a metric should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    /// Good news (no leak found).
    Positive,
    /// Needs attention (leak found).
    Alert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub emphasis: Emphasis,
}

impl Metric {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            emphasis: Emphasis::Normal,
        }
    }

    pub fn with_emphasis(
        mut self,
        emphasis: Emphasis,
    ) -> Self {
        self.emphasis = emphasis;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Area,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: Option<String>,
    pub points: Vec<ChartPoint>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: &'static str,
    pub header: String,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Everything a front-end needs to show one successful result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultView {
    pub heading: String,
    pub metrics: Vec<Metric>,
    pub chart: Option<Chart>,
    pub table: Option<Table>,
}

impl ResultView {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Default::default()
        }
    }

    pub fn metric(
        &self,
        label: &str,
    ) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.label == label)
    }
}

/// Formats a number with exactly two decimals.
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats a 0–1 fraction as a percentage with two decimals.
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
