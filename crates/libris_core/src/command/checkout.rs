//! Outbound command: lend one copy of a record to a patron.

use super::item_request::ItemRequest;
use super::{Command, CommandError, CommandKind, Disposition};
use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::record::{RecordHandle, RecordRegistry};
use crate::render::RenderSink;
use crate::store::Store;

const ACTION: &str = "checkout";

#[derive(Debug, Default)]
pub struct Checkout {
    request: ItemRequest,
    item: Option<RecordHandle>,
}

impl Command for Checkout {
    fn spawn(&self) -> Box<dyn Command> {
        Box::new(Self::default())
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Checkout
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
            action: "check out",
            title: target.title().to_string(),
        };
        let node = shelf.find(target.as_ref()).ok_or_else(not_found)?;
        let record = shelf.get_mut(node).ok_or_else(not_found)?;

        if record.stock() <= 0 {
            return Err(CommandError::OutOfStock {
                patron: patron.to_string(),
                title: record.title().to_string(),
            });
        }

        record.adjust_stock(-1);
        let handle = RecordHandle::new(category, node);
        patron.check_out(handle);
        self.item = Some(handle);
        Ok(Disposition::Keep(key))
    }

    fn render(&self, store: &Store, sink: &mut dyn RenderSink) {
        let title = self
            .item
            .and_then(|handle| store.resolve(handle))
            .map(|record| record.title().to_string())
            .unwrap_or_else(|| "<unavailable>".to_string());
        sink.write_line(&format!("Checked out {title}"));
    }
}
