//! The record store abstraction.

use crate::entry::ReservationEntry;
use crate::error::RecordError;
use async_trait::async_trait;
use studio_bot_core::Result;

/// Storage for reservations and feedback.
///
/// Implementations must serialize their own mutations: an append must never
/// interleave with a filtered removal, and once a call returns successfully
/// its effect is visible to every subsequent `list_reservations`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Appends a reservation. Duplicates are allowed.
    async fn append_reservation(&self, entry: &ReservationEntry) -> Result<(), RecordError>;

    /// Returns every reservation in insertion order.
    async fn list_reservations(&self) -> Result<Vec<ReservationEntry>, RecordError>;

    /// Removes every reservation equal to `entry`.
    ///
    /// Returns the number of removed entries; zero is not an error.
    async fn remove_reservations(&self, entry: &ReservationEntry) -> Result<usize, RecordError>;

    /// Appends a feedback message to the archive.
    async fn append_feedback(&self, text: &str) -> Result<(), RecordError>;
}
