//! Audit logging system
//!
//! Every mutation of user data is appended to a JSONL audit log so changes
//! can be traced after the fact.

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
