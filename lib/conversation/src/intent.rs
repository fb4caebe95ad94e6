//! Intent classification.
//!
//! The same literal text means different things depending on the active
//! step, so an inbound text is resolved against the session's dialog before
//! the router sees it. Precedence:
//!
//! 1. Main menu keywords, in any state.
//! 2. The active step's fixed option set (class labels, or "Да"/"Назад").
//! 3. Free text, only at name and feedback steps, and never "Да"/"Назад".
//! 4. Anything else is unrecognized.

use crate::schedule::{Schedule, ScheduleClass};
use crate::session::{BookingStep, Dialog};

/// Confirmation button.
pub const YES: &str = "Да";
/// Back button.
pub const BACK: &str = "Назад";

/// A main menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    /// Browse the schedule and reserve a class.
    Schedule,
    /// Leave feedback.
    Feedback,
    /// Cancel a reservation.
    CancelReservation,
    /// List everybody who has reserved.
    ListReservations,
}

impl MenuCommand {
    /// Every command, in main menu order.
    pub const ALL: [Self; 4] = [
        Self::Schedule,
        Self::Feedback,
        Self::CancelReservation,
        Self::ListReservations,
    ];

    /// Button label of the command.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Schedule => "Расписание",
            Self::Feedback => "Обратная связь",
            Self::CancelReservation => "Отмена записи",
            Self::ListReservations => "Список записанных",
        }
    }

    /// Matches a text against the menu vocabulary exactly.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.label() == text)
    }
}

/// A value from the active step's fixed option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedOption {
    /// A class from the schedule.
    Class(ScheduleClass),
    /// "Да".
    Yes,
    /// "Назад".
    Back,
}

/// What an inbound text means in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A main menu command.
    Menu(MenuCommand),
    /// A fixed option the active step expects.
    Choice(FixedOption),
    /// A free-text value for a name or feedback step.
    FreeText(String),
    /// Nothing the current state can use.
    Unrecognized,
}

/// Resolves `text` against the user's current dialog.
#[must_use]
pub fn classify(text: &str, dialog: Dialog, schedule: &Schedule) -> Intent {
    if let Some(command) = MenuCommand::parse(text) {
        return Intent::Menu(command);
    }

    match dialog.booking_step() {
        Some(BookingStep::SelectClass) => {
            return schedule
                .find(text)
                .map(|class| Intent::Choice(FixedOption::Class(class.clone())))
                .unwrap_or(Intent::Unrecognized);
        }
        Some(BookingStep::Confirm) => {
            return match text {
                YES => Intent::Choice(FixedOption::Yes),
                BACK => Intent::Choice(FixedOption::Back),
                _ => Intent::Unrecognized,
            };
        }
        Some(BookingStep::AwaitName) | None => {}
    }

    // Confirmation words never become a name or a feedback message.
    if text == YES || text == BACK {
        return Intent::Unrecognized;
    }

    if dialog.accepts_free_text() {
        Intent::FreeText(text.to_string())
    } else {
        Intent::Unrecognized
    }
}
