//! Store configuration: discriminant tables and index sizing.
//!
//! # Responsibility
//! - Describe which record kinds and command kinds are bound to which
//!   discriminants, and how each shelf is titled.
//! - Load that description from JSON and validate it before use.
//!
//! # Invariants
//! - A validated config has a non-zero patron table size, uppercase ASCII
//!   discriminants unique within each family, and 4-column shelf headers.

use crate::command::CommandKind;
use crate::index::chained_map::DEFAULT_TABLE_SIZE;
use crate::model::books::RecordKind;
use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Number of columns every shelf header must have.
pub const HEADER_COLUMNS: usize = 4;

/// Configuration load and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Patron table size must be non-zero.
    ZeroTableSize,
    /// Discriminant is not an uppercase ASCII letter.
    InvalidDiscriminant { family: &'static str, discriminant: char },
    /// Discriminant appears twice in one family.
    DuplicateDiscriminant { family: &'static str, discriminant: char },
    /// Shelf header does not have `HEADER_COLUMNS` columns.
    HeaderWidth { discriminant: char, columns: usize },
    /// A prototype could not be bound while building a registry.
    Registry(RegistryError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Json(err) => write!(f, "invalid config json: {err}"),
            Self::ZeroTableSize => write!(f, "patron_table_size must be greater than zero"),
            Self::InvalidDiscriminant {
                family,
                discriminant,
            } => write!(
                f,
                "{family} discriminant must be an uppercase letter: {discriminant:?}"
            ),
            Self::DuplicateDiscriminant {
                family,
                discriminant,
            } => write!(f, "{family} discriminant bound twice: {discriminant}"),
            Self::HeaderWidth {
                discriminant,
                columns,
            } => write!(
                f,
                "shelf {discriminant} header has {columns} columns, expected {HEADER_COLUMNS}"
            ),
            Self::Registry(err) => write!(f, "failed to build registry: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RegistryError> for ConfigError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One category shelf: record kind, display name and header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfConfig {
    pub discriminant: char,
    pub kind: RecordKind,
    pub name: String,
    pub header: Vec<String>,
}

impl ShelfConfig {
    pub fn new(discriminant: char, kind: RecordKind, name: &str, header: [&str; 4]) -> Self {
        Self {
            discriminant,
            kind,
            name: name.to_string(),
            header: header.iter().map(|column| column.to_string()).collect(),
        }
    }
}

/// One command discriminant binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBinding {
    pub discriminant: char,
    pub kind: CommandKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub patron_table_size: usize,
    pub shelves: Vec<ShelfConfig>,
    pub commands: Vec<CommandBinding>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let book_header = ["AVAIL", "TITLE", "AUTHOR", "YEAR"];
        Self {
            patron_table_size: DEFAULT_TABLE_SIZE,
            shelves: vec![
                ShelfConfig::new('C', RecordKind::ChildrenBook, "CHILDREN BOOKS", book_header),
                ShelfConfig::new('F', RecordKind::FictionBook, "FICTION BOOKS", book_header),
                ShelfConfig::new(
                    'P',
                    RecordKind::Periodical,
                    "PERIODICALS",
                    ["AVAIL", "TITLE", "MONTH", "YEAR"],
                ),
            ],
            commands: vec![
                CommandBinding {
                    discriminant: 'C',
                    kind: CommandKind::Checkout,
                },
                CommandBinding {
                    discriminant: 'R',
                    kind: CommandKind::Return,
                },
                CommandBinding {
                    discriminant: 'H',
                    kind: CommandKind::History,
                },
                CommandBinding {
                    discriminant: 'D',
                    kind: CommandKind::Display,
                },
            ],
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON config; missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patron_table_size == 0 {
            return Err(ConfigError::ZeroTableSize);
        }

        check_discriminants("item", self.shelves.iter().map(|shelf| shelf.discriminant))?;
        check_discriminants(
            "transaction",
            self.commands.iter().map(|binding| binding.discriminant),
        )?;

        for shelf in &self.shelves {
            if shelf.header.len() != HEADER_COLUMNS {
                return Err(ConfigError::HeaderWidth {
                    discriminant: shelf.discriminant,
                    columns: shelf.header.len(),
                });
            }
        }
        Ok(())
    }
}

fn check_discriminants(
    family: &'static str,
    discriminants: impl Iterator<Item = char>,
) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for discriminant in discriminants {
        if !discriminant.is_ascii_uppercase() {
            return Err(ConfigError::InvalidDiscriminant {
                family,
                discriminant,
            });
        }
        if !seen.insert(discriminant) {
            return Err(ConfigError::DuplicateDiscriminant {
                family,
                discriminant,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig};
    use crate::command::CommandKind;
    use crate::model::books::RecordKind;

    #[test]
    fn default_config_is_valid_and_reproduces_the_catalog_tables() {
        let config = StoreConfig::default();
        config.validate().expect("default config should validate");

        let shelves: Vec<(char, &str)> = config
            .shelves
            .iter()
            .map(|shelf| (shelf.discriminant, shelf.name.as_str()))
            .collect();
        assert_eq!(
            shelves,
            vec![
                ('C', "CHILDREN BOOKS"),
                ('F', "FICTION BOOKS"),
                ('P', "PERIODICALS")
            ]
        );
        assert_eq!(config.shelves[2].header[2], "MONTH");
        assert_eq!(config.commands.len(), 4);
        assert_eq!(config.patron_table_size, 100);
    }

    #[test]
    fn json_missing_fields_fall_back_to_defaults() {
        let config = StoreConfig::from_json_str(r#"{ "patron_table_size": 7 }"#)
            .expect("partial json should load");
        assert_eq!(config.patron_table_size, 7);
        assert_eq!(config.shelves, StoreConfig::default().shelves);
    }

    #[test]
    fn json_kinds_use_snake_case() {
        let config = StoreConfig::from_json_str(
            r#"{
                "shelves": [
                    { "discriminant": "M", "kind": "periodical", "name": "MAGAZINES",
                      "header": ["AVAIL", "TITLE", "MONTH", "YEAR"] }
                ],
                "commands": [ { "discriminant": "X", "kind": "display" } ]
            }"#,
        )
        .expect("custom json should load");
        assert_eq!(config.shelves[0].kind, RecordKind::Periodical);
        assert_eq!(config.commands[0].kind, CommandKind::Display);
    }

    #[test]
    fn validate_rejects_zero_table_size() {
        let config = StoreConfig {
            patron_table_size: 0,
            ..StoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTableSize)));
    }

    #[test]
    fn validate_rejects_lowercase_and_duplicate_discriminants() {
        let mut config = StoreConfig::default();
        config.shelves[0].discriminant = 'c';
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDiscriminant {
                family: "item",
                discriminant: 'c'
            })
        ));

        let mut config = StoreConfig::default();
        config.commands[1].discriminant = 'C';
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateDiscriminant {
                family: "transaction",
                discriminant: 'C'
            })
        ));
    }

    #[test]
    fn validate_rejects_short_header() {
        let mut config = StoreConfig::default();
        config.shelves[1].header.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HeaderWidth {
                discriminant: 'F',
                columns: 3
            })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = StoreConfig::from_json_str("{ not json").expect_err("malformed json");
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
