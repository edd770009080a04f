//! Record capability contract shared by every catalog item type.
//!
//! # Responsibility
//! - Define the polymorphic record interface the ordered index stores.
//! - Provide relational operators over `dyn Record` that are safe across
//!   concrete types.
//!
//! # Invariants
//! - `compare` returns `None` when the concrete types differ, so `<`, `>`,
//!   `<=`, `>=` and `==` are all false and `!=` is true for mixed types.
//! - Within one concrete type `compare` is a total order and `==` agrees with
//!   `Some(Ordering::Equal)`.

use crate::index::ordered_index::NodeId;
use crate::input::cursor::{CursorResult, InputCursor};
use crate::registry::{Prototype, TypeRegistry};
use crate::render::RenderSink;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Prototype registry for the record family.
pub type RecordRegistry = TypeRegistry<dyn Record>;

/// Format tag for hard-copy holdings; canonical input always uses it.
pub const HARD_COPY: char = 'H';

/// Polymorphic catalog item stored by an ordered index.
pub trait Record: Any + Debug {
    /// Returns a new empty record of the same concrete type.
    fn spawn(&self) -> Box<dyn Record>;

    /// Short type name used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Populates fields from bulk catalog input.
    fn populate_canonical(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()>;

    /// Populates the identifying fields from command input.
    fn populate_transaction(&mut self, cursor: &mut InputCursor<'_>) -> CursorResult<()>;

    fn set_format(&mut self, tag: char);
    fn format(&self) -> char;
    fn title(&self) -> &str;
    fn stock(&self) -> i32;

    /// Changes stock by a signed delta.
    fn adjust_stock(&mut self, delta: i32);

    /// Renders this record as one catalog row.
    fn render(&self, sink: &mut dyn RenderSink);

    fn as_any(&self) -> &dyn Any;

    /// Same-type ordering, `None` across concrete types.
    fn compare(&self, other: &dyn Record) -> Option<Ordering>;
}

impl PartialEq for dyn Record {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for dyn Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl Prototype for dyn Record {
    fn spawn_instance(&self) -> Box<dyn Record> {
        self.spawn()
    }
}

/// Non-owning reference to a record held by one category index.
///
/// Resolves through the owning index; a cleared index invalidates every
/// handle it issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle {
    pub category: char,
    pub node: NodeId,
}

impl RecordHandle {
    pub fn new(category: char, node: NodeId) -> Self {
        Self { category, node }
    }
}
