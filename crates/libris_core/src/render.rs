//! Fixed-width text rendering for catalog rows and operator messages.
//!
//! # Responsibility
//! - Define the sink contract records and reports render through.
//! - Provide the default column layout used by the catalog display.
//!
//! # Invariants
//! - Sinks only format; callers decide what and when to render.

/// Width of the availability column.
pub const AVAIL_WIDTH: usize = 7;
/// Width of the title column.
pub const TITLE_WIDTH: usize = 35;
/// Width of the author/month column.
pub const MONTH_AUTHOR_WIDTH: usize = 25;
/// Width of the year column.
pub const YEAR_WIDTH: usize = 4;

/// Horizontal rule printed around a full catalog display.
pub const RULE: &str =
    "--------------------------------------------------------------------------------";

const DEFAULT_WIDTHS: [usize; 4] = [AVAIL_WIDTH, TITLE_WIDTH, MONTH_AUTHOR_WIDTH, YEAR_WIDTH];

/// Destination for rendered rows and free-form lines.
pub trait RenderSink {
    /// Writes one tabular row; cell widths are owned by the sink.
    fn write_row(&mut self, cells: &[&str]);
    /// Writes one free-form line.
    fn write_line(&mut self, line: &str);
}

/// In-memory sink that pads cells to fixed column widths.
#[derive(Debug, Clone)]
pub struct TextSink {
    widths: Vec<usize>,
    output: String,
}

impl Default for TextSink {
    fn default() -> Self {
        Self::with_widths(DEFAULT_WIDTHS.to_vec())
    }
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_widths(widths: Vec<usize>) -> Self {
        Self {
            widths,
            output: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    /// Returns and clears everything written so far.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl RenderSink for TextSink {
    fn write_row(&mut self, cells: &[&str]) {
        for (index, cell) in cells.iter().enumerate() {
            match self.widths.get(index) {
                Some(width) => self.output.push_str(&format!("{cell:<width$}")),
                None => self.output.push_str(cell),
            }
        }
        self.output.push('\n');
    }

    fn write_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Clips `value` to fit a column of `width`, leaving one separating blank.
pub fn clip(value: &str, width: usize) -> String {
    value.chars().take(width.saturating_sub(1)).collect()
}
