//! Library batch use-case service.
//!
//! # Responsibility
//! - Provide string- and file-based entry points over one `Store`.
//! - Collect every operator-facing line in a single text buffer.
//!
//! # Invariants
//! - File entry points read the whole file before touching the store, so an
//!   unreadable file leaves the store unchanged.

use crate::config::{ConfigError, StoreConfig};
use crate::input::cursor::InputCursor;
use crate::pipeline::PipelineSummary;
use crate::render::TextSink;
use crate::store::{LoadSummary, Store};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level failures.
#[derive(Debug)]
pub enum ServiceError {
    /// An input file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The store configuration was rejected.
    Config(ConfigError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ServiceError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Use-case service wrapping one store and its output buffer.
#[derive(Debug)]
pub struct LibraryService {
    store: Store,
    output: TextSink,
}

impl LibraryService {
    /// Creates a service with an empty store built from `config`.
    pub fn new(config: &StoreConfig) -> ServiceResult<Self> {
        Ok(Self {
            store: Store::new(config)?,
            output: TextSink::new(),
        })
    }

    /// Creates a service with the built-in shelf and command tables.
    pub fn with_defaults() -> ServiceResult<Self> {
        Self::new(&StoreConfig::default())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Output collected so far.
    pub fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Returns and clears the collected output.
    pub fn take_output(&mut self) -> String {
        self.output.take()
    }

    pub fn load_records_from_str(&mut self, input: &str) -> LoadSummary {
        self.store
            .load_records(&mut InputCursor::new(input), &mut self.output)
    }

    pub fn load_records_from_file(&mut self, path: impl AsRef<Path>) -> ServiceResult<LoadSummary> {
        let input = read_input(path.as_ref())?;
        Ok(self.load_records_from_str(&input))
    }

    pub fn load_patrons_from_str(&mut self, input: &str) -> LoadSummary {
        self.store
            .load_patrons(&mut InputCursor::new(input), &mut self.output)
    }

    pub fn load_patrons_from_file(&mut self, path: impl AsRef<Path>) -> ServiceResult<LoadSummary> {
        let input = read_input(path.as_ref())?;
        Ok(self.load_patrons_from_str(&input))
    }

    pub fn accept_commands_from_str(&mut self, input: &str) -> PipelineSummary {
        let summary = self
            .store
            .accept_commands(&mut InputCursor::new(input), &mut self.output);
        info!(
            "event=commands_accepted module=service status=ok kept={} discarded={} unsupported={} malformed={}",
            summary.kept, summary.discarded, summary.unsupported, summary.malformed
        );
        summary
    }

    pub fn accept_commands_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> ServiceResult<PipelineSummary> {
        let input = read_input(path.as_ref())?;
        Ok(self.accept_commands_from_str(&input))
    }

    /// Appends the full library display to the output.
    pub fn render_library(&mut self) {
        self.store.render(&mut self.output);
    }
}

fn read_input(path: &Path) -> ServiceResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        error!(
            "event=input_read module=service status=error path={} error={}",
            path.display(),
            source
        );
        ServiceError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
