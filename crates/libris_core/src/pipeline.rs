//! Command pipeline: discriminant, spawn, populate, execute, keep or drop.
//!
//! # Responsibility
//! - Turn command input into executed commands, one unit at a time.
//! - Move kept commands into their patron's history.
//!
//! # Invariants
//! - Every unit either reaches a terminal outcome or ends the run.
//! - A failed unit never leaves partial state behind: precondition checks
//!   run before any mutation.
//! - Errors are reported to the sink and never stop the run.

use crate::command::{Command, Disposition};
use crate::input::cursor::InputCursor;
use crate::model::patron::PatronKey;
use crate::render::RenderSink;
use crate::store::Store;
use log::{debug, warn};
use serde::Serialize;

/// Terminal state of one pipeline unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Executed and moved into a patron's history.
    Kept,
    /// Executed (or failed a precondition) and dropped.
    Discarded,
    /// Discriminant had no command bound; line skipped.
    Unsupported,
    /// Operands could not be read; line skipped.
    Malformed,
    /// No input remains.
    EndOfInput,
}

/// Outcome counts of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub kept: usize,
    pub discarded: usize,
    pub unsupported: usize,
    pub malformed: usize,
}

impl PipelineSummary {
    fn record(&mut self, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Kept => self.kept += 1,
            UnitOutcome::Discarded => self.discarded += 1,
            UnitOutcome::Unsupported => self.unsupported += 1,
            UnitOutcome::Malformed => self.malformed += 1,
            UnitOutcome::EndOfInput => {}
        }
    }

    /// Units that reached a terminal outcome.
    pub fn total(&self) -> usize {
        self.kept + self.discarded + self.unsupported + self.malformed
    }
}

/// Drives command input against one store.
pub struct CommandPipeline<'s> {
    store: &'s mut Store,
}

impl<'s> CommandPipeline<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Processes units until input ends.
    pub fn run(
        &mut self,
        cursor: &mut InputCursor<'_>,
        sink: &mut dyn RenderSink,
    ) -> PipelineSummary {
        let mut summary = PipelineSummary::default();
        loop {
            let outcome = self.step(cursor, sink);
            if outcome == UnitOutcome::EndOfInput {
                break;
            }
            summary.record(outcome);
        }

        debug!(
            "event=pipeline_done module=pipeline status=ok kept={} discarded={} unsupported={} malformed={}",
            summary.kept, summary.discarded, summary.unsupported, summary.malformed
        );
        summary
    }

    /// Processes exactly one unit.
    pub fn step(&mut self, cursor: &mut InputCursor<'_>, sink: &mut dyn RenderSink) -> UnitOutcome {
        let Some(discriminant) = cursor.read_char() else {
            return UnitOutcome::EndOfInput;
        };

        let mut command = match self.store.commands.spawn(discriminant) {
            Ok(command) => command,
            Err(err) => {
                report(sink, &err);
                cursor.skip_line();
                return UnitOutcome::Unsupported;
            }
        };

        if let Err(err) = command.populate(cursor, &self.store.records) {
            warn!(
                "event=command_rejected module=pipeline status=malformed discriminant={:?} error={}",
                discriminant, err
            );
            report(sink, &err);
            cursor.skip_line();
            return UnitOutcome::Malformed;
        }

        match command.execute(self.store, sink) {
            Ok(Disposition::Keep(key)) => self.keep(key, command),
            Ok(Disposition::Discard) => UnitOutcome::Discarded,
            Err(err) => {
                debug!(
                    "event=command_failed module=pipeline status=precondition kind={:?}",
                    command.kind()
                );
                report(sink, &err);
                UnitOutcome::Discarded
            }
        }
    }

    fn keep(&mut self, key: PatronKey, command: Box<dyn Command>) -> UnitOutcome {
        match self.store.patrons.retrieve_mut(key) {
            Some(patron) => {
                patron.append_history(command);
                UnitOutcome::Kept
            }
            None => {
                warn!(
                    "event=command_dropped module=pipeline status=missing_patron key={}",
                    key
                );
                UnitOutcome::Discarded
            }
        }
    }
}

/// Writes one operator-facing error line.
pub(crate) fn report(sink: &mut dyn RenderSink, err: &dyn std::fmt::Display) {
    sink.write_line("");
    sink.write_line(&format!("ERROR: {err}"));
}
