//! Persistence layer for daily snapshot records
//!
//! One record per calendar date, stored as a JSON file on disk. The
//! orchestrator only sees the `RecordStore` trait, which keeps the store an
//! external collaborator and lets tests inject doubles.

mod store;

pub use store::{FileStore, RecordStore, StoreError};
