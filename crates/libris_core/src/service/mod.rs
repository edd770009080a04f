//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store loads, command runs and reports into batch APIs.
//! - Keep the CLI decoupled from cursor and sink details.

pub mod library_service;
