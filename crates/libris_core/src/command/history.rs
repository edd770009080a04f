//! Report-one command: print a patron's kept command history.

use super::{Command, CommandError, CommandKind, Disposition};
use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::patron::PatronKey;
use crate::model::record::RecordRegistry;
use crate::render::RenderSink;
use crate::store::Store;

#[derive(Debug, Default)]
pub struct History {
    patron_key: PatronKey,
}

impl Command for History {
    fn spawn(&self) -> Box<dyn Command> {
        Box::new(Self::default())
    }

    fn kind(&self) -> CommandKind {
        CommandKind::History
    }

    fn populate(
        &mut self,
        cursor: &mut InputCursor<'_>,
        _records: &RecordRegistry,
    ) -> CursorResult<()> {
        self.patron_key = cursor.read_i32()?;
        Ok(())
    }

    fn execute(
        &mut self,
        store: &mut Store,
        sink: &mut dyn RenderSink,
    ) -> Result<Disposition, CommandError> {
        let store: &Store = store;
        let patron = store
            .patron(self.patron_key)
            .ok_or(CommandError::UnknownPatron {
                action: "print history",
                key: self.patron_key,
            })?;
        patron.render_history(store, sink);
        Ok(Disposition::Discard)
    }

    fn render(&self, _store: &Store, _sink: &mut dyn RenderSink) {}
}
