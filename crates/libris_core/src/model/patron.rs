//! Patron entity: a keyed borrower with holdings and command history.
//!
//! # Responsibility
//! - Track which records a patron currently holds, by handle.
//! - Own the commands that were kept for this patron, in execution order.
//!
//! # Invariants
//! - `held` never owns records; the category index does.
//! - `history` is append-only.

use crate::command::Command;
use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::record::RecordHandle;
use crate::render::RenderSink;
use crate::store::Store;
use std::fmt::{Display, Formatter};

/// Integer identity of a patron.
pub type PatronKey = i32;

#[derive(Debug, Default)]
pub struct Patron {
    key: PatronKey,
    first_name: String,
    last_name: String,
    held: Vec<RecordHandle>,
    history: Vec<Box<dyn Command>>,
}

impl Patron {
    pub fn new(key: PatronKey, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            key,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Populates names from patron input; the key is read by the caller.
    pub fn populate(&mut self, key: PatronKey, cursor: &mut InputCursor<'_>) -> CursorResult<()> {
        self.key = key;
        self.first_name = cursor.expect_token("first name")?.to_string();
        self.last_name = cursor.expect_token("last name")?.to_string();
        Ok(())
    }

    pub fn key(&self) -> PatronKey {
        self.key
    }

    pub fn held(&self) -> &[RecordHandle] {
        &self.held
    }

    pub fn holds(&self, handle: RecordHandle) -> bool {
        self.held.contains(&handle)
    }

    pub fn check_out(&mut self, handle: RecordHandle) {
        self.held.push(handle);
    }

    /// Removes one held copy of `handle`; returns whether one was held.
    pub fn release(&mut self, handle: RecordHandle) -> bool {
        match self.held.iter().position(|held| *held == handle) {
            Some(position) => {
                self.held.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> &[Box<dyn Command>] {
        &self.history
    }

    pub fn append_history(&mut self, command: Box<dyn Command>) {
        self.history.push(command);
    }

    /// Renders every kept command, oldest first.
    pub fn render_history(&self, store: &Store, sink: &mut dyn RenderSink) {
        sink.write_line("");
        if self.history.is_empty() {
            sink.write_line("Patron has no transaction history to display.");
            return;
        }

        sink.write_line(&format!("History for {self}"));
        for command in &self.history {
            command.render(store, sink);
        }
    }
}

impl Display for Patron {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patron: {} {} {}",
            self.key, self.first_name, self.last_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Patron;
    use crate::index::ordered_index::OrderedIndex;
    use crate::input::cursor::{CursorError, InputCursor};
    use crate::model::books::FictionBook;
    use crate::model::record::RecordHandle;

    fn handle() -> RecordHandle {
        let mut index = OrderedIndex::new("FICTION", Vec::new());
        let book = Box::new(FictionBook::new("Ende", "Momo", 1973));
        index.insert(book);
        let node = index
            .find(&FictionBook::new("Ende", "Momo", 1973))
            .expect("stored book");
        RecordHandle::new('F', node)
    }

    #[test]
    fn populate_reads_first_and_last_name() {
        let mut patron = Patron::default();
        let mut cursor = InputCursor::new(" Mouse Mickey\n");
        patron.populate(1000, &mut cursor).expect("patron line");
        assert_eq!(patron.to_string(), "Patron: 1000 Mouse Mickey");
    }

    #[test]
    fn populate_reports_missing_name() {
        let mut patron = Patron::default();
        let mut cursor = InputCursor::new(" Mouse");
        let err = patron.populate(1000, &mut cursor).expect_err("last name missing");
        assert!(matches!(err, CursorError::UnexpectedEnd { expected: "last name", .. }));
    }

    #[test]
    fn holds_tracks_check_out_and_release() {
        let mut patron = Patron::new(1001, "Duck", "Donald");
        let handle = handle();
        assert!(!patron.holds(handle));

        patron.check_out(handle);
        patron.check_out(handle);
        assert!(patron.holds(handle));

        assert!(patron.release(handle));
        assert!(patron.holds(handle));
        assert!(patron.release(handle));
        assert!(!patron.holds(handle));
        assert!(!patron.release(handle));
    }
}
