//! Domain records written by the dev tool.
//!
//! # Responsibility
//! - Describe rows the tool inserts into application tables.
//!
//! # Invariants
//! - Storage strings match what the web application reads back.

pub mod todo;
