//! Polymorphic commands executed against the store.
//!
//! # Responsibility
//! - Define the command contract the pipeline drives.
//! - Report precondition failures as typed, non-fatal errors.
//!
//! # Invariants
//! - A command executes at most once.
//! - Only a command that returned `Disposition::Keep` is moved into a
//!   patron's history; every other command is dropped by the pipeline.
//! - Commands reference records only through `RecordHandle`.

mod checkout;
mod display;
mod history;
mod item_request;
mod return_item;

pub use checkout::Checkout;
pub use display::DisplayCatalog;
pub use history::History;
pub use return_item::Return;

use crate::input::cursor::{CursorResult, InputCursor};
use crate::model::patron::PatronKey;
use crate::model::record::RecordRegistry;
use crate::registry::{Prototype, TypeRegistry};
use crate::render::RenderSink;
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Formatter};

/// Prototype registry for the command family.
pub type CommandRegistry = TypeRegistry<dyn Command>;

/// What the pipeline does with a command after it executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Append the command to this patron's history.
    Keep(PatronKey),
    /// Drop the command.
    Discard,
}

/// Unit of store mutation or reporting spawned from command input.
pub trait Command: Debug {
    /// Returns a new unpopulated command of the same concrete type.
    fn spawn(&self) -> Box<dyn Command>;

    fn kind(&self) -> CommandKind;

    /// Reads this command's operands; `records` spawns lookup keys.
    fn populate(
        &mut self,
        cursor: &mut InputCursor<'_>,
        records: &RecordRegistry,
    ) -> CursorResult<()>;

    fn execute(
        &mut self,
        store: &mut Store,
        sink: &mut dyn RenderSink,
    ) -> Result<Disposition, CommandError>;

    /// Renders this command as one history line.
    fn render(&self, store: &Store, sink: &mut dyn RenderSink);
}

impl Prototype for dyn Command {
    fn spawn_instance(&self) -> Box<dyn Command> {
        self.spawn()
    }
}

/// Concrete command type bound to a discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Checkout,
    Return,
    History,
    Display,
}

impl CommandKind {
    /// Long-lived prototype registered for this kind.
    pub fn prototype(self) -> Box<dyn Command> {
        match self {
            Self::Checkout => Box::new(Checkout::default()),
            Self::Return => Box::new(Return::default()),
            Self::History => Box::new(History::default()),
            Self::Display => Box::new(DisplayCatalog),
        }
    }
}

/// Precondition failures reported while executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No patron is stored under `key`.
    UnknownPatron { action: &'static str, key: PatronKey },
    /// No record type or shelf is bound to `discriminant`.
    UnsupportedCategory {
        action: &'static str,
        discriminant: char,
    },
    /// The requested record is not in its shelf.
    RecordNotFound {
        patron: String,
        action: &'static str,
        title: String,
    },
    /// The requested record has no copies left.
    OutOfStock { patron: String, title: String },
    /// The patron does not hold the record being returned.
    NotCheckedOut { patron: String, title: String },
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPatron { action, key } => {
                write!(f, "Cannot {action} for invalid Patron ID: {key}")
            }
            Self::UnsupportedCategory {
                action,
                discriminant,
            } => write!(f, "Cannot {action} for invalid item type: {discriminant}"),
            Self::RecordNotFound {
                patron,
                action,
                title,
            } => write!(f, "{patron} tried to {action} {title} -- can't find in library."),
            Self::OutOfStock { patron, title } => {
                write!(f, "{patron} tried to check out {title} -- item is out of stock.")
            }
            Self::NotCheckedOut { patron, title } => write!(
                f,
                "{patron} tried to return {title} -- doesn't have it checked out."
            ),
        }
    }
}

impl Error for CommandError {}
