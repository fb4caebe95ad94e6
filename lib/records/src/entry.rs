//! Reservation entries.
//!
//! An entry has no identity beyond its text. It is persisted as a single
//! line `"<full_name> - <class_label>"` with no escaping, so a name that
//! itself contains the separator or a newline is stored as-is.

use std::fmt;

/// Separator between the name and the class label in the line form.
pub const SEPARATOR: &str = " - ";

/// A single reservation of a person for a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReservationEntry {
    /// Name exactly as the user typed it.
    pub full_name: String,
    /// Label of the class from the schedule.
    pub class_label: String,
}

impl ReservationEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(full_name: impl Into<String>, class_label: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            class_label: class_label.into(),
        }
    }

    /// Returns the persisted line form, without a trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}{SEPARATOR}{}", self.full_name, self.class_label)
    }

    /// Parses a persisted line.
    ///
    /// Class labels never contain the separator, so the split happens at its
    /// last occurrence and the name keeps any separators of its own.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let (full_name, class_label) = line.rsplit_once(SEPARATOR)?;
        Some(Self::new(full_name, class_label))
    }

    /// Returns true if a persisted line denotes this entry.
    ///
    /// Surrounding whitespace of the stored line is ignored.
    #[must_use]
    pub fn matches_line(&self, line: &str) -> bool {
        line.trim() == self.to_line()
    }
}

impl fmt::Display for ReservationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.full_name, self.class_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONDAY: &str = "Понедельник 19:00 (Современная хор.)";

    #[test]
    fn line_form() {
        let entry = ReservationEntry::new("Ivan Petrov", MONDAY);
        assert_eq!(
            entry.to_line(),
            "Ivan Petrov - Понедельник 19:00 (Современная хор.)"
        );
        assert_eq!(entry.to_string(), entry.to_line());
    }

    #[test]
    fn parse_keeps_separator_inside_name() {
        let entry = ReservationEntry::from_line("Anna - Maria - Среда 18:00 (Классическая хор.)\n")
            .expect("should parse");
        assert_eq!(entry.full_name, "Anna - Maria");
        assert_eq!(entry.class_label, "Среда 18:00 (Классическая хор.)");
    }

    #[test]
    fn parse_rejects_line_without_separator() {
        assert!(ReservationEntry::from_line("just a name").is_none());
    }

    #[test]
    fn matching_trims_stored_line() {
        let entry = ReservationEntry::new("Ivan", MONDAY);
        assert!(entry.matches_line(&format!("Ivan - {MONDAY}\r\n")));
        assert!(!entry.matches_line(&format!("Ivan  - {MONDAY}")));
        assert!(!entry.matches_line(&format!("Ivanov - {MONDAY}")));
    }
}
