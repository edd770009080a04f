//! Core domain logic for libris, a batch library-circulation engine.
//! This crate is the single source of truth for catalog and patron invariants.

pub mod command;
pub mod config;
pub mod index;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod service;
pub mod store;

pub use command::{Command, CommandError, CommandKind, CommandRegistry, Disposition};
pub use config::{CommandBinding, ConfigError, ShelfConfig, StoreConfig};
pub use index::chained_map::ChainedMap;
pub use index::ordered_index::{NodeId, OrderedIndex};
pub use input::cursor::{CursorError, CursorResult, InputCursor};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::books::{ChildrenBook, FictionBook, Periodical, RecordKind};
pub use model::patron::{Patron, PatronKey};
pub use model::record::{Record, RecordHandle, RecordRegistry, HARD_COPY};
pub use pipeline::{CommandPipeline, PipelineSummary, UnitOutcome};
pub use registry::{Prototype, RegistryError, TypeRegistry};
pub use render::{RenderSink, TextSink};
pub use service::library_service::{LibraryService, ServiceError, ServiceResult};
pub use store::{LoadSummary, Store};
