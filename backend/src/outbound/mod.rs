//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: process-local stores, used when no database is configured
//!   and by the test harness.
//! - **persistence**: PostgreSQL stores using Diesel.
//!
//! Adapters only translate between domain types and storage representations.

pub mod memory;
pub mod persistence;
