//! Record storage for studio-bot.
//!
//! This crate provides:
//!
//! - **Reservation entries**: `(full_name, class_label)` pairs and their
//!   one-line text form
//! - **Record Store**: append, scan and filtered removal of reservations,
//!   plus an append-only feedback archive
//! - **Backends**: flat text files for production, memory for tests

pub mod entry;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use entry::ReservationEntry;
pub use error::RecordError;
pub use file::FileRecordStore;
pub use memory::InMemoryRecordStore;
pub use store::RecordStore;
