//! Concrete catalog record types.
//!
//! Text layouts (after the type discriminant; `,` terminates text fields):
//!
//! | type | canonical | transaction (after the format tag) |
//! |------|-----------|------------------------------------|
//! | `ChildrenBook` | `author, title, year` | `title, author,` |
//! | `FictionBook` | `author, title, year` | `author, title,` |
//! | `Periodical` | `title, month year` | `year month title,` |

use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::record::{Record, HARD_COPY};
use crate::render::{clip, RenderSink, MONTH_AUTHOR_WIDTH, TITLE_WIDTH};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cmp::Ordering;

/// Copies of a newly catalogued book.
pub const BOOK_DEFAULT_STOCK: i32 = 5;
/// Copies of a newly catalogued periodical issue.
pub const PERIODICAL_DEFAULT_STOCK: i32 = 1;

/// Concrete record type a shelf is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    ChildrenBook,
    FictionBook,
    Periodical,
}

impl RecordKind {
    /// Long-lived prototype registered for this kind.
    pub fn prototype(self) -> Box<dyn Record> {
        match self {
            Self::ChildrenBook => Box::new(ChildrenBook::default()),
            Self::FictionBook => Box::new(FictionBook::default()),
            Self::Periodical => Box::new(Periodical::default()),
        }
    }
}

/// Children's book, ordered by title then author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildrenBook {
    pub author: String,
    pub title: String,
    pub year: i32,
    pub format: char,
    pub stock: i32,
}

impl Default for ChildrenBook {
    fn default() -> Self {
        Self {
            author: String::new(),
            title: String::new(),
            year: 0,
            format: HARD_COPY,
            stock: BOOK_DEFAULT_STOCK,
        }
    }
}

impl ChildrenBook {
    pub fn new(author: impl Into<String>, title: impl Into<String>, year: i32) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            year,
            ..Self::default()
        }
    }

    fn sort_key(&self) -> (&str, &str, char) {
        (&self.title, &self.author, self.format)
    }
}

impl Record for ChildrenBook {
    fn spawn(&self) -> Box<dyn Record> {
        Box::new(Self::default())
    }

    fn kind(&self) -> &'static str {
        "children_book"
    }

    fn populate_canonical(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()> {
        self.author = cursor.read_field(',')?;
        self.title = cursor.read_field(',')?;
        self.year = cursor.read_i32()?;
        self.format = HARD_COPY;
        Ok(())
    }

    fn populate_transaction(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()> {
        self.title = cursor.read_field(',')?;
        self.author = cursor.read_field(',')?;
        Ok(())
    }

    fn set_format(&mut self, tag: char) {
        self.format = tag;
    }

    fn format(&self) -> char {
        self.format
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn stock(&self) -> i32 {
        self.stock
    }

    fn adjust_stock(&mut self, delta: i32) {
        self.stock += delta;
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        render_row(sink, self.stock, &self.title, &self.author, self.year);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn compare(&self, other: &dyn Record) -> Option<Ordering> {
        let other = other.as_any().downcast_ref::<Self>()?;
        Some(self.sort_key().cmp(&other.sort_key()))
    }
}

/// Fiction book, ordered by author then title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FictionBook {
    pub author: String,
    pub title: String,
    pub year: i32,
    pub format: char,
    pub stock: i32,
}

impl Default for FictionBook {
    fn default() -> Self {
        Self {
            author: String::new(),
            title: String::new(),
            year: 0,
            format: HARD_COPY,
            stock: BOOK_DEFAULT_STOCK,
        }
    }
}

impl FictionBook {
    pub fn new(author: impl Into<String>, title: impl Into<String>, year: i32) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            year,
            ..Self::default()
        }
    }

    fn sort_key(&self) -> (&str, &str, char) {
        (&self.author, &self.title, self.format)
    }
}

impl Record for FictionBook {
    fn spawn(&self) -> Box<dyn Record> {
        Box::new(Self::default())
    }

    fn kind(&self) -> &'static str {
        "fiction_book"
    }

    fn populate_canonical(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()> {
        self.author = cursor.read_field(',')?;
        self.title = cursor.read_field(',')?;
        self.year = cursor.read_i32()?;
        self.format = HARD_COPY;
        Ok(())
    }

    fn populate_transaction(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()> {
        self.author = cursor.read_field(',')?;
        self.title = cursor.read_field(',')?;
        Ok(())
    }

    fn set_format(&mut self, tag: char) {
        self.format = tag;
    }

    fn format(&self) -> char {
        self.format
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn stock(&self) -> i32 {
        self.stock
    }

    fn adjust_stock(&mut self, delta: i32) {
        self.stock += delta;
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        render_row(sink, self.stock, &self.title, &self.author, self.year);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn compare(&self, other: &dyn Record) -> Option<Ordering> {
        let other = other.as_any().downcast_ref::<Self>()?;
        Some(self.sort_key().cmp(&other.sort_key()))
    }
}

/// Periodical issue, ordered by year, month, then title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Periodical {
    pub title: String,
    pub month: i32,
    pub year: i32,
    pub format: char,
    pub stock: i32,
}

impl Default for Periodical {
    fn default() -> Self {
        Self {
            title: String::new(),
            month: 0,
            year: 0,
            format: HARD_COPY,
            stock: PERIODICAL_DEFAULT_STOCK,
        }
    }
}

impl Periodical {
    pub fn new(title: impl Into<String>, month: i32, year: i32) -> Self {
        Self {
            title: title.into(),
            month,
            year,
            ..Self::default()
        }
    }

    fn sort_key(&self) -> (i32, i32, &str, char) {
        (self.year, self.month, &self.title, self.format)
    }
}

impl Record for Periodical {
    fn spawn(&self) -> Box<dyn Record> {
        Box::new(Self::default())
    }

    fn kind(&self) -> &'static str {
        "periodical"
    }

    fn populate_canonical(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()> {
        self.title = cursor.read_field(',')?;
        self.month = cursor.read_i32()?;
        self.year = cursor.read_i32()?;
        self.format = HARD_COPY;
        Ok(())
    }

    fn populate_transaction(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()> {
        self.year = cursor.read_i32()?;
        self.month = cursor.read_i32()?;
        self.title = cursor.read_field(',')?;
        Ok(())
    }

    fn set_format(&mut self, tag: char) {
        self.format = tag;
    }

    fn format(&self) -> char {
        self.format
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn stock(&self) -> i32 {
        self.stock
    }

    fn adjust_stock(&mut self, delta: i32) {
        self.stock += delta;
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        render_row(
            sink,
            self.stock,
            &self.title,
            &self.month.to_string(),
            self.year,
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn compare(&self, other: &dyn Record) -> Option<Ordering> {
        let other = other.as_any().downcast_ref::<Self>()?;
        Some(self.sort_key().cmp(&other.sort_key()))
    }
}

fn render_row(sink: &mut dyn RenderSink, stock: i32, title: &str, middle: &str, year: i32) {
    sink.write_row(&[
        &stock.to_string(),
        &clip(title, TITLE_WIDTH),
        &clip(middle, MONTH_AUTHOR_WIDTH),
        &year.to_string(),
    ]);
}

#[cfg(test)]
mod tests {
    use super::{ChildrenBook, FictionBook, Periodical, BOOK_DEFAULT_STOCK};
    use crate::input::cursor::InputCursor;
    use crate::model::record::{Record, HARD_COPY};
    use crate::render::TextSink;
    use std::cmp::Ordering;

    fn boxed(record: impl Record) -> Box<dyn Record> {
        Box::new(record)
    }

    #[test]
    fn fiction_orders_by_author_then_title() {
        let a = boxed(FictionBook::new("Adams", "Zebra", 2000));
        let b = boxed(FictionBook::new("Baker", "Apple", 1990));
        let c = boxed(FictionBook::new("Baker", "Banana", 1990));
        assert!(*a < *b);
        assert!(*b < *c);
        assert!(*c > *a);
        assert!(*a <= *a);
        assert!(*a == *boxed(FictionBook::new("Adams", "Zebra", 1800)));
    }

    #[test]
    fn children_orders_by_title_then_author() {
        let a = boxed(ChildrenBook::new("Zed", "Apple", 2000));
        let b = boxed(ChildrenBook::new("Abe", "Banana", 2000));
        assert!(*a < *b);
        assert!(*b >= *a);
    }

    #[test]
    fn periodical_orders_by_year_month_title() {
        let early = boxed(Periodical::new("Zine", 12, 1999));
        let later = boxed(Periodical::new("Another", 1, 2000));
        let same_month = boxed(Periodical::new("Bravo", 1, 2000));
        assert!(*early < *later);
        assert!(*later < *same_month);
    }

    #[test]
    fn cross_type_comparisons_are_unordered() {
        let fiction = boxed(FictionBook::new("Same", "Same", 2000));
        let children = boxed(ChildrenBook::new("Same", "Same", 2000));
        assert_eq!(fiction.compare(children.as_ref()), None);
        assert!(!(*fiction < *children));
        assert!(!(*fiction > *children));
        assert!(!(*fiction <= *children));
        assert!(!(*fiction >= *children));
        assert!(!(*fiction == *children));
        assert!(*fiction != *children);
    }

    #[test]
    fn format_participates_in_equality() {
        let hard = boxed(FictionBook::new("Austen", "Emma", 1815));
        let mut other = FictionBook::new("Austen", "Emma", 1815);
        other.format = 'D';
        let digital = boxed(other);
        assert!(*hard != *digital);
        assert_ne!(hard.compare(digital.as_ref()), Some(Ordering::Equal));
    }

    #[test]
    fn canonical_and_transaction_layouts_differ_per_type() {
        let mut children = ChildrenBook::default();
        let mut cursor = InputCursor::new(" Seuss Dr., Cat in the Hat, 1957\n");
        children.populate_canonical(&mut cursor).expect("canonical");
        assert_eq!(children.author, "Seuss Dr.");
        assert_eq!(children.title, "Cat in the Hat");
        assert_eq!(children.year, 1957);
        assert_eq!(children.format, HARD_COPY);
        assert_eq!(children.stock, BOOK_DEFAULT_STOCK);

        let mut lookup = ChildrenBook::default();
        let mut cursor = InputCursor::new(" Cat in the Hat, Seuss Dr.,\n");
        lookup.populate_transaction(&mut cursor).expect("transaction");
        let stored = boxed(children);
        assert!(*stored == *boxed(lookup));

        let mut issue = Periodical::default();
        let mut cursor = InputCursor::new(" Science, 5 2001\n");
        issue.populate_canonical(&mut cursor).expect("canonical periodical");
        let mut lookup = Periodical::default();
        let mut cursor = InputCursor::new(" 2001 5 Science,\n");
        lookup.populate_transaction(&mut cursor).expect("transaction periodical");
        assert_eq!(issue, lookup);
    }

    #[test]
    fn spawn_returns_empty_record_of_same_type() {
        let prototype = boxed(Periodical::new("Time", 3, 2010));
        let spawned = prototype.spawn();
        assert_eq!(spawned.kind(), "periodical");
        assert_eq!(spawned.title(), "");
        assert_eq!(spawned.stock(), 1);
    }

    #[test]
    fn render_writes_one_row() {
        let mut sink = TextSink::new();
        FictionBook::new("Tolkien", "The Hobbit", 1937).render(&mut sink);
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("5      The Hobbit"));
        assert!(lines[0].trim_end().ends_with("1937"));
    }
}
