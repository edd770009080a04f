//! Inbound command: take back a record a patron currently holds.

use super::item_request::ItemRequest;
use super::{Command, CommandError, CommandKind, Disposition};
use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::record::{RecordHandle, RecordRegistry};
use crate::render::RenderSink;
use crate::store::Store;

const ACTION: &str = "return";

#[derive(Debug, Default)]
pub struct Return {
    request: ItemRequest,
    item: Option<RecordHandle>,
}

impl Command for Return {
    fn spawn(&self) -> Box<dyn Command> {
        Box::new(Self::default())
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Return
    }

    fn populate(
        &mut self,
        cursor: &mut InputCursor<'_>,
        records: &RecordRegistry,
    ) -> CursorResult<()> {
        self.request.populate(cursor, records)
    }

    fn execute(
        &mut self,
        store: &mut Store,
        sink: &mut dyn RenderSink,
    ) -> Result<Disposition, CommandError> {
        let key = self.request.patron_key;
        let category = self.request.category;

        let patron = store
            .patrons
            .retrieve_mut(key)
            .ok_or(CommandError::UnknownPatron {
                action: ACTION,
                key,
            })?;
        let target = self.request.take_target(ACTION, sink)?;
        let shelf = store
            .shelves
            .get_mut(&category)
            .ok_or(CommandError::UnsupportedCategory {
                action: ACTION,
                discriminant: category,
            })?;

        let not_found = || CommandError::RecordNotFound {
            patron: patron.to_string(),
            action: ACTION,
            title: target.title().to_string(),
        };
        let node = shelf.find(target.as_ref()).ok_or_else(not_found)?;
        let record = shelf.get_mut(node).ok_or_else(not_found)?;

        let handle = RecordHandle::new(category, node);
        if !patron.holds(handle) {
            return Err(CommandError::NotCheckedOut {
                patron: patron.to_string(),
                title: record.title().to_string(),
            });
        }

        patron.release(handle);
        record.adjust_stock(1);
        self.item = Some(handle);
        Ok(Disposition::Keep(key))
    }

    fn render(&self, store: &Store, sink: &mut dyn RenderSink) {
        let title = self
            .item
            .and_then(|handle| store.resolve(handle))
            .map(|record| record.title().to_string())
            .unwrap_or_else(|| "<unavailable>".to_string());
        sink.write_line(&format!("Returned {title}"));
    }
}
