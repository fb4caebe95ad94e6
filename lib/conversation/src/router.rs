//! The dialog router: the per-user state machine.
//!
//! For every inbound message the router
//!
//! 1. takes the sender's turn lock, so one user's messages are handled one
//!    at a time while other users proceed in parallel,
//! 2. reads the session and classifies the text against it,
//! 3. applies the transition to a local copy, running the terminal record
//!    operation if the transition has one,
//! 4. writes the session back only if every step succeeded.
//!
//! A storage failure therefore leaves the session at its pre-transition
//! step, and the user's next message retries the same step.

use crate::error::DialogError;
use crate::intent::{FixedOption, Intent, MenuCommand, classify};
use crate::message::InboundMessage;
use crate::reply::{self, Reply};
use crate::schedule::{Schedule, ScheduleClass};
use crate::session::{BookingStep, Dialog, FeedbackStep, SELECTED_CLASS, Session, SessionStore};
use rootcause::prelude::ResultExt;
use std::collections::HashMap;
use std::sync::{Arc, MutexGuard, PoisonError};
use studio_bot_core::{Result, UserId};
use studio_bot_records::{RecordStore, ReservationEntry};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

/// What a message did, for the reply composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Reservation started; show the schedule.
    ReservationMenu,
    /// Cancellation started; show the schedule.
    CancellationMenu,
    /// Feedback started; ask for the text.
    FeedbackPrompt,
    /// Every reservation, in insertion order.
    ReservationList(Vec<ReservationEntry>),
    /// A class was picked for reservation; show its instructor.
    ClassDetails(ScheduleClass),
    /// A class was picked for cancellation; ask to confirm.
    CancellationConfirm(ScheduleClass),
    /// Reservation confirmed; ask for the name.
    NamePrompt,
    /// Cancellation confirmed; ask for the name.
    CancellationNamePrompt,
    /// A reservation was stored.
    Reserved(ReservationEntry),
    /// Matching reservations were removed. `removed` may be zero.
    Cancelled {
        /// The entry the user asked to cancel.
        entry: ReservationEntry,
        /// How many stored entries matched.
        removed: usize,
    },
    /// Feedback was archived.
    FeedbackRecorded,
    /// The user backed out of a dialog.
    Returned,
    /// The text meant nothing in this dialog; nothing changed.
    NotUnderstood(Dialog),
}

/// Per-user turn locks.
///
/// An entry lives only while some message of that user is being handled or
/// waiting to be; the last turn to finish removes it.
#[derive(Debug, Default)]
struct TurnLocks {
    locks: std::sync::Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl TurnLocks {
    fn map(&self) -> MutexGuard<'_, HashMap<UserId, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn acquire(&self, user: UserId) -> Turn<'_> {
        let lock = Arc::clone(self.map().entry(user).or_default());
        Turn {
            guard: Some(lock.lock_owned().await),
            locks: self,
            user,
        }
    }

    #[cfg(test)]
    fn held(&self) -> usize {
        self.map().len()
    }
}

/// A user's exclusive turn. Dropping it releases the lock and forgets the
/// user once nobody else is queued behind it.
struct Turn<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a TurnLocks,
    user: UserId,
}

impl Drop for Turn<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut map = self.locks.map();
        // Only the map holds the lock once no turn is running or queued.
        if map
            .get(&self.user)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.user);
        }
    }
}

/// Routes inbound messages through the dialog state machine.
pub struct DialogRouter<S, R> {
    sessions: S,
    records: R,
    schedule: Schedule,
    turns: TurnLocks,
}

impl<S: SessionStore, R: RecordStore> DialogRouter<S, R> {
    /// Creates a router over the given stores and schedule.
    #[must_use]
    pub fn new(sessions: S, records: R, schedule: Schedule) -> Self {
        Self {
            sessions,
            records,
            schedule,
            turns: TurnLocks::default(),
        }
    }

    /// The session store.
    #[must_use]
    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// The record store.
    #[must_use]
    pub fn records(&self) -> &R {
        &self.records
    }

    /// The schedule offered to users.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Handles a message and renders the reply.
    ///
    /// `/start` and `/help` are answered without reading or touching the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if a record operation failed. The session is left
    /// unchanged in that case.
    pub async fn respond(&self, message: &InboundMessage) -> Result<Reply, DialogError> {
        if let Some(command) = message.command() {
            debug!(user = %message.user, ?command, "answering command");
            return Ok(reply::command_reply(command));
        }
        let outcome = self.handle(message).await?;
        Ok(reply::compose(&outcome))
    }

    /// Runs one message through the state machine.
    ///
    /// # Errors
    ///
    /// Returns an error if a record operation failed. The session is left
    /// unchanged in that case.
    #[instrument(skip(self, message), fields(user = %message.user))]
    pub async fn handle(&self, message: &InboundMessage) -> Result<Outcome, DialogError> {
        let _turn = self.turns.acquire(message.user).await;

        let mut session = self.sessions.get(message.user).await;
        let before = session.dialog();
        let intent = classify(&message.text, before, &self.schedule);
        debug!(dialog = ?before, ?intent, "classified message");

        let outcome = self.apply(message.user, &mut session, intent).await?;

        let after = session.dialog();
        if after != before {
            info!(from = ?before, to = ?after, "dialog transition");
        }
        self.sessions.save(message.user, session).await;

        Ok(outcome)
    }

    async fn apply(
        &self,
        user: UserId,
        session: &mut Session,
        intent: Intent,
    ) -> Result<Outcome, DialogError> {
        let dialog = session.dialog();

        let outcome = match (dialog, intent) {
            (_, Intent::Menu(MenuCommand::Schedule)) => {
                session.restart(Dialog::Reservation(BookingStep::SelectClass));
                Outcome::ReservationMenu
            }
            (_, Intent::Menu(MenuCommand::Feedback)) => {
                session.restart(Dialog::Feedback(FeedbackStep::Await));
                Outcome::FeedbackPrompt
            }
            (_, Intent::Menu(MenuCommand::CancelReservation)) => {
                session.restart(Dialog::CancelReservation(BookingStep::SelectClass));
                Outcome::CancellationMenu
            }
            // Listing leaves any dialog in progress where it was.
            (_, Intent::Menu(MenuCommand::ListReservations)) => {
                let entries = self
                    .records
                    .list_reservations()
                    .await
                    .context(DialogError::ListingFailed { user })?;
                Outcome::ReservationList(entries)
            }

            (
                Dialog::Reservation(BookingStep::SelectClass),
                Intent::Choice(FixedOption::Class(class)),
            ) => {
                session.set_dialog(Dialog::Reservation(BookingStep::Confirm));
                session.update_scratch(SELECTED_CLASS, class.label.clone());
                Outcome::ClassDetails(class)
            }
            (
                Dialog::CancelReservation(BookingStep::SelectClass),
                Intent::Choice(FixedOption::Class(class)),
            ) => {
                session.set_dialog(Dialog::CancelReservation(BookingStep::Confirm));
                session.update_scratch(SELECTED_CLASS, class.label.clone());
                Outcome::CancellationConfirm(class)
            }

            (Dialog::Reservation(BookingStep::Confirm), Intent::Choice(FixedOption::Yes)) => {
                session.set_dialog(Dialog::Reservation(BookingStep::AwaitName));
                Outcome::NamePrompt
            }
            (
                Dialog::CancelReservation(BookingStep::Confirm),
                Intent::Choice(FixedOption::Yes),
            ) => {
                session.set_dialog(Dialog::CancelReservation(BookingStep::AwaitName));
                Outcome::CancellationNamePrompt
            }
            (
                Dialog::Reservation(BookingStep::Confirm)
                | Dialog::CancelReservation(BookingStep::Confirm),
                Intent::Choice(FixedOption::Back),
            ) => {
                session.clear();
                Outcome::Returned
            }

            (Dialog::Reservation(BookingStep::AwaitName), Intent::FreeText(name)) => {
                let Some(entry) = selected_entry(session, name) else {
                    return Ok(abandon(session));
                };
                self.records
                    .append_reservation(&entry)
                    .await
                    .context(DialogError::ReservationFailed { user })?;
                session.clear();
                Outcome::Reserved(entry)
            }
            (Dialog::CancelReservation(BookingStep::AwaitName), Intent::FreeText(name)) => {
                let Some(entry) = selected_entry(session, name) else {
                    return Ok(abandon(session));
                };
                // No existence check: cancelling an unknown entry still succeeds.
                let removed = self
                    .records
                    .remove_reservations(&entry)
                    .await
                    .context(DialogError::CancellationFailed { user })?;
                session.clear();
                Outcome::Cancelled { entry, removed }
            }
            (Dialog::Feedback(FeedbackStep::Await), Intent::FreeText(text)) => {
                self.records
                    .append_feedback(&text)
                    .await
                    .context(DialogError::FeedbackFailed { user })?;
                session.clear();
                Outcome::FeedbackRecorded
            }

            (dialog, _) => Outcome::NotUnderstood(dialog),
        };

        Ok(outcome)
    }
}

fn selected_entry(session: &Session, full_name: String) -> Option<ReservationEntry> {
    let class_label = session.selected_class()?;
    Some(ReservationEntry::new(full_name, class_label))
}

/// A name step without a selected class cannot complete; drop the dialog.
fn abandon(session: &mut Session) -> Outcome {
    warn!(dialog = ?session.dialog(), "name step reached without a selected class");
    session.clear();
    Outcome::Returned
}
