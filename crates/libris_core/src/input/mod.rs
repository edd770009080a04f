//! Text input plumbing shared by bulk loaders and the command pipeline.
//!
//! # Responsibility
//! - Provide one cursor abstraction over canonical and transaction input.
//! - Report malformed input as typed errors instead of panicking.
//!
//! # Invariants
//! - Field order is owned by each concrete record type, not by the cursor.

pub mod cursor;
