//! Reminders - vaccinations, feeding, medicine and events
//!
//! `ReminderKind` and `RepeatInterval` are Value Objects: two values with the
//! same variant are equal. Their display names double as the stored form.

use std::str::FromStr;

/// What a reminder is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    Vaccination,
    Food,
    Medicine,
    Event,
}

impl ReminderKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ReminderKind::Vaccination => "Vaccination",
            ReminderKind::Food => "Food",
            ReminderKind::Medicine => "Medicine",
            ReminderKind::Event => "Event",
        }
    }

    pub fn all() -> &'static [ReminderKind] {
        &[
            ReminderKind::Vaccination,
            ReminderKind::Food,
            ReminderKind::Medicine,
            ReminderKind::Event,
        ]
    }
}

impl core::fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ReminderKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReminderKind::all()
            .iter()
            .copied()
            .find(|k| k.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("reminder type", s))
    }
}

/// How often a reminder recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatInterval {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatInterval {
    pub fn display_name(&self) -> &'static str {
        match self {
            RepeatInterval::Daily => "Daily",
            RepeatInterval::Weekly => "Weekly",
            RepeatInterval::Monthly => "Monthly",
            RepeatInterval::Yearly => "Yearly",
        }
    }

    pub fn all() -> &'static [RepeatInterval] {
        &[
            RepeatInterval::Daily,
            RepeatInterval::Weekly,
            RepeatInterval::Monthly,
            RepeatInterval::Yearly,
        ]
    }
}

impl core::fmt::Display for RepeatInterval {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for RepeatInterval {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepeatInterval::all()
            .iter()
            .copied()
            .find(|r| r.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("repeat interval", s))
    }
}

/// A dated reminder attached to a pet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub kind: ReminderKind,
    /// ISO date the reminder is due
    pub date: String,
    pub description: String,
    pub repeat: Option<RepeatInterval>,
}

impl Reminder {
    pub fn new(kind: ReminderKind, date: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            date: date.into(),
            description: description.into(),
            repeat: None,
        }
    }

    pub fn repeating(mut self, interval: RepeatInterval) -> Self {
        self.repeat = Some(interval);
        self
    }
}

/// Unknown variant name for `ReminderKind` or `RepeatInterval`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    what: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

impl core::fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unknown {}: '{}'", self.what, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reminder_kind() {
        assert_eq!("Vaccination".parse::<ReminderKind>(), Ok(ReminderKind::Vaccination));
        assert_eq!("medicine".parse::<ReminderKind>(), Ok(ReminderKind::Medicine));
        assert!("Grooming".parse::<ReminderKind>().is_err());
    }

    #[test]
    fn test_parse_repeat_interval() {
        assert_eq!("weekly".parse::<RepeatInterval>(), Ok(RepeatInterval::Weekly));
        let err = "hourly".parse::<RepeatInterval>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown repeat interval: 'hourly'");
    }

    #[test]
    fn test_display_matches_stored_form() {
        for kind in ReminderKind::all() {
            assert_eq!(kind.to_string().parse::<ReminderKind>(), Ok(*kind));
        }
        assert_eq!(RepeatInterval::all().len(), 4);
    }
}
