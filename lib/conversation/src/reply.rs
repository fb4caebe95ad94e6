//! Reply composition.
//!
//! Turns a router [`Outcome`] into a message body and a keyboard selector.
//! Nothing here touches state; the text depends only on the outcome and the
//! schedule.

use crate::intent::{BACK, MenuCommand, YES};
use crate::message::SlashCommand;
use crate::router::Outcome;
use crate::schedule::Schedule;
use crate::session::{BookingStep, Dialog};

const GREETING: &str = "Привет! Я бот для танцевальной студии. Чем я могу помочь?";
const HELP: &str = "Я могу помочь вам с следующими командами:\n\
- Расписание: посмотреть расписание занятий\n\
- Обратная связь: оставить обратную связь\n\
- Отмена записи: отменить запись на занятие\n\
- Список записанных: посмотреть список записанных пользователей\n";
const PICK_CLASS: &str = "Выберите одно из занятий:";
const PICK_CLASS_TO_CANCEL: &str = "Выберите занятие для отмены записи:";
const ASK_FEEDBACK: &str = "Пожалуйста, введите ваше сообщение:";
const CONFIRM_RESERVATION: &str = "Хотите записаться на это занятие?";
const CONFIRM_CANCELLATION: &str = "Хотите отменить запись на это занятие?";
const ASK_NAME: &str = "Пожалуйста, введите ваше ФИО:";
const ASK_NAME_TO_CANCEL: &str = "Пожалуйста, введите ваше ФИО для отмены записи:";
const FEEDBACK_THANKS: &str =
    "Спасибо за ваше сообщение. Мы свяжемся с вами в ближайшее время.";
const LIST_HEADER: &str = "Список записанных пользователей:\n";
const LIST_EMPTY: &str = "Нет записанных пользователей.";
const NOT_UNDERSTOOD: &str =
    "Извините, я не понимаю эту команду. Пожалуйста, выберите одну из доступных опций.";
const STORAGE_FAILURE: &str =
    "Не удалось выполнить запрос. Пожалуйста, попробуйте ещё раз.";

/// Which fixed keyboard to attach to a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// The four main menu commands.
    MainMenu,
    /// The class labels of the schedule.
    ScheduleList,
    /// "Да" and "Назад".
    ConfirmYesNo,
    /// Hide any keyboard so the user types free text.
    Remove,
}

impl Keyboard {
    /// Button labels, one per row. `None` for [`Keyboard::Remove`].
    #[must_use]
    pub fn buttons(&self, schedule: &Schedule) -> Option<Vec<String>> {
        match self {
            Self::MainMenu => Some(
                MenuCommand::ALL
                    .iter()
                    .map(|cmd| cmd.label().to_string())
                    .collect(),
            ),
            Self::ScheduleList => Some(schedule.labels().map(str::to_string).collect()),
            Self::ConfirmYesNo => Some(vec![YES.to_string(), BACK.to_string()]),
            Self::Remove => None,
        }
    }
}

/// An outbound reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message body.
    pub text: String,
    /// Keyboard to attach. `None` leaves the user's current keyboard alone.
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Reply to a message whose storage step failed. The session was left in
    /// place, so the current keyboard stays as it is.
    #[must_use]
    pub fn storage_failure() -> Self {
        Self {
            text: STORAGE_FAILURE.to_string(),
            keyboard: None,
        }
    }
}

/// Reply to a slash command.
#[must_use]
pub fn command_reply(command: SlashCommand) -> Reply {
    match command {
        SlashCommand::Start => Reply::new(GREETING, Keyboard::MainMenu),
        SlashCommand::Help => Reply::new(HELP, Keyboard::MainMenu),
    }
}

/// Renders a router outcome.
#[must_use]
pub fn compose(outcome: &Outcome) -> Reply {
    match outcome {
        Outcome::ReservationMenu => Reply::new(PICK_CLASS, Keyboard::ScheduleList),
        Outcome::CancellationMenu => Reply::new(PICK_CLASS_TO_CANCEL, Keyboard::ScheduleList),
        Outcome::FeedbackPrompt => Reply::new(ASK_FEEDBACK, Keyboard::Remove),
        Outcome::ReservationList(entries) if entries.is_empty() => {
            Reply::new(LIST_EMPTY, Keyboard::MainMenu)
        }
        Outcome::ReservationList(entries) => {
            let mut text = String::from(LIST_HEADER);
            for entry in entries {
                text.push_str(&entry.to_line());
                text.push('\n');
            }
            Reply::new(text, Keyboard::MainMenu)
        }
        Outcome::ClassDetails(class) => Reply::new(
            format!("{}\n\n{CONFIRM_RESERVATION}", class.instructor),
            Keyboard::ConfirmYesNo,
        ),
        Outcome::CancellationConfirm(_) => {
            Reply::new(CONFIRM_CANCELLATION, Keyboard::ConfirmYesNo)
        }
        Outcome::NamePrompt => Reply::new(ASK_NAME, Keyboard::Remove),
        Outcome::CancellationNamePrompt => Reply::new(ASK_NAME_TO_CANCEL, Keyboard::Remove),
        Outcome::Reserved(entry) => Reply::new(
            format!(
                "Поздравляем, {}, вы записаны на занятие {}!",
                entry.full_name, entry.class_label
            ),
            Keyboard::MainMenu,
        ),
        Outcome::Cancelled { entry, .. } => Reply::new(
            format!(
                "Запись на занятие {} для {} отменена.",
                entry.class_label, entry.full_name
            ),
            Keyboard::MainMenu,
        ),
        Outcome::FeedbackRecorded => Reply::new(FEEDBACK_THANKS, Keyboard::MainMenu),
        Outcome::Returned => Reply::new(GREETING, Keyboard::MainMenu),
        Outcome::NotUnderstood(dialog) => not_understood(*dialog),
    }
}

/// "Not understood", followed by the current step's prompt again.
fn not_understood(dialog: Dialog) -> Reply {
    let (prompt, keyboard) = match dialog {
        Dialog::Idle => return Reply::new(NOT_UNDERSTOOD, Keyboard::MainMenu),
        Dialog::Reservation(BookingStep::SelectClass) => (PICK_CLASS, Keyboard::ScheduleList),
        Dialog::CancelReservation(BookingStep::SelectClass) => {
            (PICK_CLASS_TO_CANCEL, Keyboard::ScheduleList)
        }
        Dialog::Reservation(BookingStep::Confirm) => {
            (CONFIRM_RESERVATION, Keyboard::ConfirmYesNo)
        }
        Dialog::CancelReservation(BookingStep::Confirm) => {
            (CONFIRM_CANCELLATION, Keyboard::ConfirmYesNo)
        }
        Dialog::Reservation(BookingStep::AwaitName) => (ASK_NAME, Keyboard::Remove),
        Dialog::CancelReservation(BookingStep::AwaitName) => {
            (ASK_NAME_TO_CANCEL, Keyboard::Remove)
        }
        Dialog::Feedback(_) => (ASK_FEEDBACK, Keyboard::Remove),
    };
    Reply::new(format!("{NOT_UNDERSTOOD}\n\n{prompt}"), keyboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FeedbackStep;
    use studio_bot_records::ReservationEntry;

    const MONDAY: &str = "Понедельник 19:00 (Современная хор.)";

    #[test]
    fn empty_list_says_nobody() {
        let reply = compose(&Outcome::ReservationList(Vec::new()));
        assert_eq!(reply.text, "Нет записанных пользователей.");
        assert_eq!(reply.keyboard, Some(Keyboard::MainMenu));
    }

    #[test]
    fn list_keeps_order() {
        let reply = compose(&Outcome::ReservationList(vec![
            ReservationEntry::new("Olga", MONDAY),
            ReservationEntry::new("Ivan", MONDAY),
        ]));
        assert_eq!(
            reply.text,
            format!("Список записанных пользователей:\nOlga - {MONDAY}\nIvan - {MONDAY}\n")
        );
    }

    #[test]
    fn class_details_show_instructor() {
        let schedule = Schedule::default();
        let class = schedule.find(MONDAY).cloned().unwrap();
        let reply = compose(&Outcome::ClassDetails(class));

        assert!(reply.text.starts_with("Хореограф - Ирина Петровна."));
        assert!(reply.text.ends_with("\n\nХотите записаться на это занятие?"));
        assert_eq!(reply.keyboard, Some(Keyboard::ConfirmYesNo));
    }

    #[test]
    fn reserved_and_cancelled_texts() {
        let entry = ReservationEntry::new("Ivan Petrov", MONDAY);
        assert_eq!(
            compose(&Outcome::Reserved(entry.clone())).text,
            format!("Поздравляем, Ivan Petrov, вы записаны на занятие {MONDAY}!")
        );
        assert_eq!(
            compose(&Outcome::Cancelled { entry, removed: 0 }).text,
            format!("Запись на занятие {MONDAY} для Ivan Petrov отменена.")
        );
    }

    #[test]
    fn prompts_for_free_text_hide_keyboard() {
        assert_eq!(compose(&Outcome::NamePrompt).keyboard, Some(Keyboard::Remove));
        assert_eq!(
            compose(&Outcome::FeedbackPrompt).keyboard,
            Some(Keyboard::Remove)
        );
    }

    #[test]
    fn not_understood_reissues_current_prompt() {
        let idle = compose(&Outcome::NotUnderstood(Dialog::Idle));
        assert_eq!(idle.text, NOT_UNDERSTOOD);
        assert_eq!(idle.keyboard, Some(Keyboard::MainMenu));

        let selecting =
            compose(&Outcome::NotUnderstood(Dialog::Reservation(BookingStep::SelectClass)));
        assert!(selecting.text.starts_with(NOT_UNDERSTOOD));
        assert!(selecting.text.ends_with(PICK_CLASS));
        assert_eq!(selecting.keyboard, Some(Keyboard::ScheduleList));

        let feedback = compose(&Outcome::NotUnderstood(Dialog::Feedback(FeedbackStep::Await)));
        assert!(feedback.text.ends_with(ASK_FEEDBACK));
        assert_eq!(feedback.keyboard, Some(Keyboard::Remove));
    }

    #[test]
    fn keyboard_buttons() {
        let schedule = Schedule::default();
        assert_eq!(
            Keyboard::MainMenu.buttons(&schedule).unwrap(),
            vec!["Расписание", "Обратная связь", "Отмена записи", "Список записанных"]
        );
        assert_eq!(Keyboard::ScheduleList.buttons(&schedule).unwrap().len(), 3);
        assert_eq!(
            Keyboard::ConfirmYesNo.buttons(&schedule).unwrap(),
            vec!["Да", "Назад"]
        );
        assert!(Keyboard::Remove.buttons(&schedule).is_none());
    }

    #[test]
    fn commands_show_main_menu() {
        assert_eq!(command_reply(SlashCommand::Start).text, GREETING);
        assert!(command_reply(SlashCommand::Help).text.contains("Отмена записи"));
        assert_eq!(
            command_reply(SlashCommand::Help).keyboard,
            Some(Keyboard::MainMenu)
        );
    }
}
