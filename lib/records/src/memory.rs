//! In-memory record store.
//!
//! Used by tests and by runs that do not need records to outlive the process.

use crate::entry::ReservationEntry;
use crate::error::RecordError;
use crate::store::RecordStore;
use async_trait::async_trait;
use studio_bot_core::Result;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Records {
    reservations: Vec<ReservationEntry>,
    feedback: Vec<String>,
}

/// Record store that keeps everything in a vector behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Records>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the archived feedback messages in insertion order.
    pub async fn feedback(&self) -> Vec<String> {
        self.records.lock().await.feedback.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn append_reservation(&self, entry: &ReservationEntry) -> Result<(), RecordError> {
        self.records.lock().await.reservations.push(entry.clone());
        Ok(())
    }

    async fn list_reservations(&self) -> Result<Vec<ReservationEntry>, RecordError> {
        Ok(self.records.lock().await.reservations.clone())
    }

    async fn remove_reservations(&self, entry: &ReservationEntry) -> Result<usize, RecordError> {
        let mut records = self.records.lock().await;
        let before = records.reservations.len();
        records.reservations.retain(|existing| existing != entry);
        Ok(before - records.reservations.len())
    }

    async fn append_feedback(&self, text: &str) -> Result<(), RecordError> {
        self.records.lock().await.feedback.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_all_matches() {
        let store = InMemoryRecordStore::new();
        let ivan = ReservationEntry::new("Ivan", "Пятница 18:00 (Народная хор.)");
        store.append_reservation(&ivan).await.unwrap();
        store.append_reservation(&ivan).await.unwrap();

        assert_eq!(store.remove_reservations(&ivan).await.unwrap(), 2);
        assert_eq!(store.remove_reservations(&ivan).await.unwrap(), 0);
        assert!(store.list_reservations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn keeps_feedback_separate() {
        let store = InMemoryRecordStore::new();
        store.append_feedback("Great class").await.unwrap();

        assert_eq!(store.feedback().await, vec!["Great class".to_string()]);
        assert!(store.list_reservations().await.unwrap().is_empty());
    }
}
