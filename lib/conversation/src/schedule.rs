//! The studio's class schedule.
//!
//! The schedule is static configuration: the bot offers these labels as
//! buttons and shows the instructor blurb when one is picked.

use serde::{Deserialize, Serialize};

/// A single class offered by the studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleClass {
    /// Button label, also used as the class label in reservations.
    pub label: String,
    /// Instructor blurb shown before asking for confirmation.
    pub instructor: String,
}

impl ScheduleClass {
    /// Creates a class entry.
    #[must_use]
    pub fn new(label: impl Into<String>, instructor: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            instructor: instructor.into(),
        }
    }
}

/// The closed set of classes a user can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    classes: Vec<ScheduleClass>,
}

impl Schedule {
    /// Creates a schedule from a list of classes, keeping their order.
    #[must_use]
    pub fn new(classes: Vec<ScheduleClass>) -> Self {
        Self { classes }
    }

    /// Returns the classes in display order.
    #[must_use]
    pub fn classes(&self) -> &[ScheduleClass] {
        &self.classes
    }

    /// Returns the button labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.label.as_str())
    }

    /// Looks up a class by its exact label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&ScheduleClass> {
        self.classes.iter().find(|c| c.label == label)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(vec![
            ScheduleClass::new(
                "Понедельник 19:00 (Современная хор.)",
                "Хореограф - Ирина Петровна. Опыт - 8 лет. Победитель международных конкурсов по современным танцам.",
            ),
            ScheduleClass::new(
                "Среда 18:00 (Классическая хор.)",
                "Хореограф - Александр Иванович. Опыт - 10 лет. Обладатель премии за лучшие постановки в классическом танце.",
            ),
            ScheduleClass::new(
                "Пятница 18:00 (Народная хор.)",
                "Хореограф - Ольга Сергеевна. Опыт - 6 лет. Участник национальных фестивалей народного танца.",
            ),
        ])
    }
}
