//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: a single in-process store for development and tests.
//!
//! Adapters translate between domain records and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
