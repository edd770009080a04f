//! Discriminant-keyed prototype registry.
//!
//! # Responsibility
//! - Map an uppercase discriminant to one long-lived prototype.
//! - Spawn fresh instances by discriminant without branching on type.
//!
//! # Invariants
//! - 26 slots, indexed by `discriminant - 'A'`; at most one prototype each.
//! - `spawn` never hands out the prototype itself and never mutates state.
//!
//! One generic implementation serves both the record and the command family.

use log::warn;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Number of discriminant slots (`'A'..='Z'`).
pub const DISCRIMINANT_SLOTS: usize = 26;

/// Capability to manufacture a new empty instance of one's own concrete type.
pub trait Prototype {
    fn spawn_instance(&self) -> Box<Self>;
}

/// Registry registration and lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Discriminant is not an uppercase ASCII letter.
    InvalidDiscriminant(char),
    /// A prototype is already bound to the discriminant.
    DuplicateDiscriminant(char),
    /// No prototype is bound to the discriminant.
    Unsupported { family: &'static str, discriminant: char },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDiscriminant(value) => {
                write!(f, "discriminant must be an uppercase letter: {value:?}")
            }
            Self::DuplicateDiscriminant(value) => {
                write!(f, "discriminant already registered: {value}")
            }
            Self::Unsupported {
                family,
                discriminant,
            } => write!(f, "{discriminant} is not a valid {family} type."),
        }
    }
}

impl Error for RegistryError {}

/// Fixed table of prototypes for one polymorphic family.
pub struct TypeRegistry<P: ?Sized + Prototype> {
    family: &'static str,
    slots: [Option<Box<P>>; DISCRIMINANT_SLOTS],
}

impl<P: ?Sized + Prototype> Debug for TypeRegistry<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("family", &self.family)
            .field("discriminants", &self.discriminants())
            .finish()
    }
}

impl<P: ?Sized + Prototype> TypeRegistry<P> {
    /// Creates an empty registry; `family` names the type family in messages.
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Builds a registry from `(discriminant, prototype)` bindings.
    pub fn from_bindings<I>(family: &'static str, bindings: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (char, Box<P>)>,
    {
        let mut registry = Self::new(family);
        for (discriminant, prototype) in bindings {
            registry.register(discriminant, prototype)?;
        }
        Ok(registry)
    }

    /// Binds `prototype` to `discriminant`.
    pub fn register(&mut self, discriminant: char, prototype: Box<P>) -> Result<(), RegistryError> {
        let index =
            slot_index(discriminant).ok_or(RegistryError::InvalidDiscriminant(discriminant))?;
        let slot = &mut self.slots[index];
        if slot.is_some() {
            return Err(RegistryError::DuplicateDiscriminant(discriminant));
        }
        *slot = Some(prototype);
        Ok(())
    }

    /// Spawns a new instance of the type bound to `discriminant`.
    pub fn spawn(&self, discriminant: char) -> Result<Box<P>, RegistryError> {
        match self.prototype(discriminant) {
            Some(prototype) => Ok(prototype.spawn_instance()),
            None => {
                warn!(
                    "event=spawn_rejected module=registry status=unsupported family={} discriminant={:?}",
                    self.family, discriminant
                );
                Err(RegistryError::Unsupported {
                    family: self.family,
                    discriminant,
                })
            }
        }
    }

    pub fn contains(&self, discriminant: char) -> bool {
        self.prototype(discriminant).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered discriminants in ascending order.
    pub fn discriminants(&self) -> Vec<char> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| char::from(b'A' + index as u8))
            .collect()
    }

    fn prototype(&self, discriminant: char) -> Option<&P> {
        let index = slot_index(discriminant)?;
        self.slots[index].as_deref()
    }
}

fn slot_index(discriminant: char) -> Option<usize> {
    if discriminant.is_ascii_uppercase() {
        Some((discriminant as u8 - b'A') as usize)
    } else {
        None
    }
}
