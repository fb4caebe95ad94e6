//! Conversation sessions.
//!
//! A session is the per-user state of the dialog state machine: which dialog
//! is active, which step of it, and the scratch data collected so far.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use studio_bot_core::UserId;
use tokio::sync::RwLock;

/// Scratch key holding the class picked at the class-selection step.
pub const SELECTED_CLASS: &str = "selected_class";

/// Steps shared by the reservation and cancellation dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStep {
    /// Waiting for a class label from the schedule.
    SelectClass,
    /// Waiting for "Да" or "Назад".
    Confirm,
    /// Waiting for the user's full name.
    AwaitName,
}

/// Steps of the feedback dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackStep {
    /// Waiting for the feedback text.
    Await,
}

/// The active dialog together with its step.
///
/// Only valid `dialog × step` pairs are representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dialog {
    /// No dialog in progress.
    #[default]
    Idle,
    /// Browsing the schedule and reserving a class.
    Reservation(BookingStep),
    /// Cancelling an existing reservation.
    CancelReservation(BookingStep),
    /// Leaving free-text feedback.
    Feedback(FeedbackStep),
}

impl Dialog {
    /// Returns true if no dialog is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the booking step, if this is a reservation or cancellation.
    #[must_use]
    pub fn booking_step(&self) -> Option<BookingStep> {
        match self {
            Self::Reservation(step) | Self::CancelReservation(step) => Some(*step),
            Self::Idle | Self::Feedback(_) => None,
        }
    }

    /// Returns true if the current step takes arbitrary text as its value.
    #[must_use]
    pub fn accepts_free_text(&self) -> bool {
        matches!(
            self,
            Self::Reservation(BookingStep::AwaitName)
                | Self::CancelReservation(BookingStep::AwaitName)
                | Self::Feedback(FeedbackStep::Await)
        )
    }
}

/// Per-user conversational state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    dialog: Dialog,
    scratch: BTreeMap<String, String>,
}

impl Session {
    /// Returns the active dialog and step.
    #[must_use]
    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    /// Returns the scratch data.
    #[must_use]
    pub fn scratch(&self) -> &BTreeMap<String, String> {
        &self.scratch
    }

    /// Returns the class picked earlier in this dialog, if any.
    #[must_use]
    pub fn selected_class(&self) -> Option<&str> {
        self.scratch.get(SELECTED_CLASS).map(String::as_str)
    }

    /// Moves to another step, keeping scratch data.
    ///
    /// Moving to [`Dialog::Idle`] also drops the scratch data.
    pub fn set_dialog(&mut self, dialog: Dialog) {
        self.dialog = dialog;
        if dialog.is_idle() {
            self.scratch.clear();
        }
    }

    /// Starts a dialog from scratch, discarding whatever was in progress.
    pub fn restart(&mut self, dialog: Dialog) {
        self.scratch.clear();
        self.dialog = dialog;
    }

    /// Stores a scratch value. Ignored while idle: idle sessions hold no data.
    pub fn update_scratch(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.dialog.is_idle() {
            return;
        }
        self.scratch.insert(key.into(), value.into());
    }

    /// Resets to idle with no scratch data.
    pub fn clear(&mut self) {
        self.dialog = Dialog::Idle;
        self.scratch.clear();
    }
}

/// Storage of one session per user.
///
/// All operations are total. The router reads a session at the start of a
/// message and writes it back with [`SessionStore::save`] at the end.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the user's session, or a fresh idle one.
    async fn get(&self, user: UserId) -> Session;

    /// Replaces the user's session as a whole.
    async fn save(&self, user: UserId, session: Session);

    /// Moves the user to another dialog step.
    async fn set_dialog(&self, user: UserId, dialog: Dialog);

    /// Stores a scratch value for the user.
    async fn update_scratch(&self, user: UserId, key: &str, value: &str);

    /// Resets the user to idle.
    async fn clear(&self, user: UserId);
}

/// Session store held in process memory.
///
/// Idle sessions are not kept: they are indistinguishable from absent ones.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<UserId, Session>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users currently in the middle of a dialog.
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn store(sessions: &mut HashMap<UserId, Session>, user: UserId, session: Session) {
        if session.dialog().is_idle() {
            sessions.remove(&user);
        } else {
            sessions.insert(user, session);
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user: UserId) -> Session {
        self.sessions
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    async fn save(&self, user: UserId, session: Session) {
        let mut sessions = self.sessions.write().await;
        Self::store(&mut sessions, user, session);
    }

    async fn set_dialog(&self, user: UserId, dialog: Dialog) {
        let mut sessions = self.sessions.write().await;
        let mut session = sessions.get(&user).cloned().unwrap_or_default();
        session.set_dialog(dialog);
        Self::store(&mut sessions, user, session);
    }

    async fn update_scratch(&self, user: UserId, key: &str, value: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(&user) {
            session.update_scratch(key, value);
        }
    }

    async fn clear(&self, user: UserId) {
        self.sessions.write().await.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONDAY: &str = "Понедельник 19:00 (Современная хор.)";

    #[test]
    fn fresh_session_is_idle() {
        let session = Session::default();
        assert!(session.dialog().is_idle());
        assert!(session.scratch().is_empty());
    }

    #[test]
    fn going_idle_drops_scratch() {
        let mut session = Session::default();
        session.set_dialog(Dialog::Reservation(BookingStep::Confirm));
        session.update_scratch(SELECTED_CLASS, MONDAY);
        assert_eq!(session.selected_class(), Some(MONDAY));

        session.set_dialog(Dialog::Idle);
        assert!(session.scratch().is_empty());
    }

    #[test]
    fn step_change_keeps_scratch() {
        let mut session = Session::default();
        session.set_dialog(Dialog::CancelReservation(BookingStep::Confirm));
        session.update_scratch(SELECTED_CLASS, MONDAY);

        session.set_dialog(Dialog::CancelReservation(BookingStep::AwaitName));
        assert_eq!(session.selected_class(), Some(MONDAY));
    }

    #[test]
    fn restart_discards_previous_dialog() {
        let mut session = Session::default();
        session.set_dialog(Dialog::Reservation(BookingStep::AwaitName));
        session.update_scratch(SELECTED_CLASS, MONDAY);

        session.restart(Dialog::Feedback(FeedbackStep::Await));
        assert_eq!(session.dialog(), Dialog::Feedback(FeedbackStep::Await));
        assert!(session.selected_class().is_none());
    }

    #[test]
    fn scratch_ignored_while_idle() {
        let mut session = Session::default();
        session.update_scratch(SELECTED_CLASS, MONDAY);
        assert!(session.scratch().is_empty());
    }

    #[test]
    fn free_text_steps() {
        assert!(Dialog::Reservation(BookingStep::AwaitName).accepts_free_text());
        assert!(Dialog::CancelReservation(BookingStep::AwaitName).accepts_free_text());
        assert!(Dialog::Feedback(FeedbackStep::Await).accepts_free_text());
        assert!(!Dialog::Reservation(BookingStep::Confirm).accepts_free_text());
        assert!(!Dialog::Idle.accepts_free_text());
    }

    #[tokio::test]
    async fn store_returns_default_for_unknown_user() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(UserId::new(1)).await, Session::default());
    }

    #[tokio::test]
    async fn store_reads_its_writes() {
        let store = InMemorySessionStore::new();
        let user = UserId::new(1);

        store
            .set_dialog(user, Dialog::Reservation(BookingStep::Confirm))
            .await;
        store.update_scratch(user, SELECTED_CLASS, MONDAY).await;

        let session = store.get(user).await;
        assert_eq!(session.dialog(), Dialog::Reservation(BookingStep::Confirm));
        assert_eq!(session.selected_class(), Some(MONDAY));
        assert_eq!(store.active_sessions().await, 1);

        store.clear(user).await;
        assert_eq!(store.get(user).await, Session::default());
        assert_eq!(store.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemorySessionStore::new();
        let alice = UserId::new(1);
        let bob = UserId::new(2);

        store
            .set_dialog(alice, Dialog::Feedback(FeedbackStep::Await))
            .await;

        assert!(store.get(bob).await.dialog().is_idle());
        store.clear(bob).await;
        assert_eq!(
            store.get(alice).await.dialog(),
            Dialog::Feedback(FeedbackStep::Await)
        );
    }

    #[tokio::test]
    async fn saving_idle_session_forgets_user() {
        let store = InMemorySessionStore::new();
        let user = UserId::new(3);
        store
            .set_dialog(user, Dialog::CancelReservation(BookingStep::SelectClass))
            .await;

        store.save(user, Session::default()).await;
        assert_eq!(store.active_sessions().await, 0);
    }
}
