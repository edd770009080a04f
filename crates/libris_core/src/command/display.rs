//! Report-all command: print every shelf in order.

use super::{Command, CommandError, CommandKind, Disposition};
use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::record::RecordRegistry;
use crate::render::RenderSink;
use crate::store::Store;

#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayCatalog;

impl Command for DisplayCatalog {
    fn spawn(&self) -> Box<dyn Command> {
        Box::new(Self)
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Display
    }

    fn populate(
        &mut self,
        _cursor: &mut InputCursor<'_>,
        _records: &RecordRegistry,
    ) -> CursorResult<()> {
        Ok(())
    }

    fn execute(
        &mut self,
        store: &mut Store,
        sink: &mut dyn RenderSink,
    ) -> Result<Disposition, CommandError> {
        store.render(sink);
        Ok(Disposition::Discard)
    }

    fn render(&self, _store: &Store, _sink: &mut dyn RenderSink) {}
}
