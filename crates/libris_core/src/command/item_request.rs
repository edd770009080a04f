//! Operands shared by commands that target one record for one patron.

use super::CommandError;
use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::patron::PatronKey;
use crate::model::record::{Record, RecordRegistry};
use crate::pipeline::report;
use crate::registry::RegistryError;
use crate::render::RenderSink;

/// `key type format <record transaction fields>`.
#[derive(Debug, Default)]
pub(crate) struct ItemRequest {
    pub(crate) patron_key: PatronKey,
    pub(crate) category: char,
    /// Lookup key; `None` when `category` has no record type.
    target: Option<Box<dyn Record>>,
    rejection: Option<RegistryError>,
}

impl ItemRequest {
    pub(crate) fn populate(
        &mut self,
        cursor: &mut InputCursor<'_>,
        records: &RecordRegistry,
    ) -> CursorResult<()> {
        self.patron_key = cursor.read_i32()?;
        self.category = cursor.expect_char("item type")?;
        let format = cursor.expect_char("item format")?;

        match records.spawn(self.category) {
            Ok(mut lookup) => {
                lookup.populate_transaction(cursor)?;
                lookup.set_format(format);
                self.target = Some(lookup);
            }
            Err(err) => {
                cursor.skip_line();
                self.target = None;
                self.rejection = Some(err);
            }
        }
        Ok(())
    }

    /// Hands out the lookup key once the patron is known to exist.
    ///
    /// An unsupported item type is reported to `sink` before the command's
    /// own error is returned.
    pub(crate) fn take_target(
        &mut self,
        action: &'static str,
        sink: &mut dyn RenderSink,
    ) -> Result<Box<dyn Record>, CommandError> {
        if let Some(target) = self.target.take() {
            return Ok(target);
        }
        if let Some(err) = self.rejection.take() {
            report(sink, &err);
        }
        Err(CommandError::UnsupportedCategory {
            action,
            discriminant: self.category,
        })
    }
}
