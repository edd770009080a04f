//! Owning in-memory containers for records and patrons.
//!
//! # Responsibility
//! - `ordered_index`: sorted, duplicate-free storage of catalog records.
//! - `chained_map`: integer-keyed storage with separate chaining.
//!
//! # Invariants
//! - Each container exclusively owns what it stores and releases it on clear
//!   or drop without recursion.

pub mod chained_map;
pub mod ordered_index;
