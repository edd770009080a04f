//! Catalog store: category shelves, patron table and prototype registries.
//!
//! # Responsibility
//! - Own every record (through its shelf) and every patron.
//! - Bulk-load records and patrons from text input.
//! - Drive command input through the command pipeline.
//!
//! # Invariants
//! - Exactly one shelf exists per configured record discriminant, and the
//!   record registry binds exactly the same discriminants.
//! - Shelves render in ascending discriminant order.

use crate::command::CommandRegistry;
use crate::config::{ConfigError, StoreConfig};
use crate::index::chained_map::ChainedMap;
use crate::index::ordered_index::OrderedIndex;
use crate::input::cursor::InputCursor;
use crate::model::patron::{Patron, PatronKey};
use crate::model::record::{Record, RecordHandle, RecordRegistry};
use crate::pipeline::{CommandPipeline, PipelineSummary};
use crate::registry::TypeRegistry;
use crate::render::{RenderSink, RULE};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

const EMPTY_LIBRARY: &str = "Library is empty, There is nothing to display.";

/// Outcome counts of one bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Entries stored.
    pub accepted: usize,
    /// Malformed entries and duplicates.
    pub rejected: usize,
    /// Lines with an unsupported discriminant.
    pub skipped: usize,
}

#[derive(Debug)]
pub struct Store {
    pub(crate) shelves: BTreeMap<char, OrderedIndex>,
    pub(crate) patrons: ChainedMap<Patron>,
    pub(crate) records: RecordRegistry,
    pub(crate) commands: CommandRegistry,
}

impl Store {
    /// Builds an empty store from a validated configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let records = TypeRegistry::from_bindings(
            "item",
            config
                .shelves
                .iter()
                .map(|shelf| (shelf.discriminant, shelf.kind.prototype())),
        )?;
        let commands = TypeRegistry::from_bindings(
            "transaction",
            config
                .commands
                .iter()
                .map(|binding| (binding.discriminant, binding.kind.prototype())),
        )?;
        let shelves = config
            .shelves
            .iter()
            .map(|shelf| {
                (
                    shelf.discriminant,
                    OrderedIndex::new(shelf.name.clone(), shelf.header.clone()),
                )
            })
            .collect();

        info!(
            "event=store_init module=store status=ok shelves={} commands={} patron_table_size={}",
            config.shelves.len(),
            config.commands.len(),
            config.patron_table_size
        );

        Ok(Self {
            shelves,
            patrons: ChainedMap::with_table_size(config.patron_table_size),
            records,
            commands,
        })
    }

    pub fn shelf(&self, category: char) -> Option<&OrderedIndex> {
        self.shelves.get(&category)
    }

    /// Shelves in ascending discriminant order.
    pub fn shelves(&self) -> impl Iterator<Item = (char, &OrderedIndex)> + '_ {
        self.shelves.iter().map(|(category, shelf)| (*category, shelf))
    }

    /// Inserts `record` into the shelf for `category`.
    ///
    /// Returns `false` when no such shelf exists or the record is a duplicate.
    pub fn insert_record(&mut self, category: char, record: Box<dyn Record>) -> bool {
        match self.shelves.get_mut(&category) {
            Some(shelf) => shelf.insert(record),
            None => false,
        }
    }

    pub fn patron(&self, key: PatronKey) -> Option<&Patron> {
        self.patrons.retrieve(key)
    }

    pub fn patrons(&self) -> &ChainedMap<Patron> {
        &self.patrons
    }

    /// Stores `patron` under its key; `false` when the key is taken.
    pub fn insert_patron(&mut self, patron: Patron) -> bool {
        self.patrons.insert(patron.key(), patron)
    }

    /// Resolves a held-record handle through its shelf.
    pub fn resolve(&self, handle: RecordHandle) -> Option<&dyn Record> {
        self.shelves.get(&handle.category)?.get(handle.node)
    }

    /// Loads canonical records, one per line, until input ends.
    pub fn load_records(
        &mut self,
        cursor: &mut InputCursor<'_>,
        sink: &mut dyn RenderSink,
    ) -> LoadSummary {
        let mut summary = LoadSummary::default();

        while let Some(discriminant) = cursor.read_char() {
            let mut record = match self.records.spawn(discriminant) {
                Ok(record) => record,
                Err(err) => {
                    sink.write_line("");
                    sink.write_line(&format!("ERROR: {err}"));
                    cursor.skip_line();
                    summary.skipped += 1;
                    continue;
                }
            };

            if let Err(err) = record.populate_canonical(cursor) {
                warn!(
                    "event=record_rejected module=store status=malformed line={} error={}",
                    cursor.line(),
                    err
                );
                cursor.skip_line();
                summary.rejected += 1;
                continue;
            }

            if self.insert_record(discriminant, record) {
                summary.accepted += 1;
            } else {
                debug!(
                    "event=record_rejected module=store status=duplicate category={:?}",
                    discriminant
                );
                summary.rejected += 1;
            }
        }

        info!(
            "event=records_loaded module=store status=ok accepted={} rejected={} skipped={}",
            summary.accepted, summary.rejected, summary.skipped
        );
        summary
    }

    /// Loads `key first last` patron lines until input ends.
    pub fn load_patrons(
        &mut self,
        cursor: &mut InputCursor<'_>,
        sink: &mut dyn RenderSink,
    ) -> LoadSummary {
        let mut summary = LoadSummary::default();

        while cursor.seek_unit() {
            let key = match cursor.read_i32() {
                Ok(key) => key,
                Err(err) => {
                    warn!(
                        "event=patron_rejected module=store status=malformed error={}",
                        err
                    );
                    cursor.skip_line();
                    summary.rejected += 1;
                    continue;
                }
            };

            let mut patron = Patron::default();
            if let Err(err) = patron.populate(key, cursor) {
                warn!(
                    "event=patron_rejected module=store status=malformed key={} error={}",
                    key, err
                );
                cursor.skip_line();
                summary.rejected += 1;
                continue;
            }

            if self.insert_patron(patron) {
                summary.accepted += 1;
            } else {
                sink.write_line("");
                sink.write_line(&format!("ERROR: Patron with ID: {key} exists already."));
                summary.rejected += 1;
            }
        }

        info!(
            "event=patrons_loaded module=store status=ok accepted={} rejected={}",
            summary.accepted, summary.rejected
        );
        summary
    }

    /// Runs every command in `cursor` against this store.
    pub fn accept_commands(
        &mut self,
        cursor: &mut InputCursor<'_>,
        sink: &mut dyn RenderSink,
    ) -> PipelineSummary {
        CommandPipeline::new(self).run(cursor, sink)
    }

    /// Renders every shelf in order between two rules.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.write_line(RULE);
        if self.shelves.is_empty() {
            sink.write_line(EMPTY_LIBRARY);
        }
        for (position, shelf) in self.shelves.values().enumerate() {
            if position > 0 {
                sink.write_line("");
            }
            shelf.render(sink);
        }
        sink.write_line(RULE);
    }

    /// Empties every shelf; handles issued before this call stop resolving.
    pub fn clear_shelves(&mut self) {
        for shelf in self.shelves.values_mut() {
            shelf.clear();
        }
    }
}
