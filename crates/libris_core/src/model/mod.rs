//! Domain model for the lending catalog.
//!
//! # Responsibility
//! - `record`: the polymorphic record contract and record handles.
//! - `books`: concrete record types and their text layouts.
//! - `patron`: the keyed borrower entity with holdings and history.
//!
//! # Invariants
//! - Records are owned by exactly one ordered index once inserted.
//! - Patrons reference records only through `RecordHandle`.

pub mod books;
pub mod patron;
pub mod record;
