//! Input validation performed before any repository call

use chrono::NaiveDate;
use petcare_domain::{HealthInfo, PetProfile, PetProfilePatch, Reminder, TrainingEntry, VetVisit};
use thiserror::Error;

/// Dates are stored as ISO calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be a date in YYYY-MM-DD form, got '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("Age must be a non-negative number of years, got {0}")]
    InvalidAge(f64),

    #[error("Weight on {date} must be a positive number, got {weight}")]
    InvalidWeight { date: String, weight: f64 },

    #[error("Progress for '{task}' must be between 0 and 100, got {progress}")]
    ProgressOutOfRange { task: String, progress: f64 },

    #[error("Nothing to update")]
    EmptyPatch,
}

/// Parse an ISO date, naming the field on failure
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

fn check_optional_date(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(field, v).map(|_| ()),
        _ => Ok(()),
    }
}

fn check_age(age: f64) -> Result<(), ValidationError> {
    if !age.is_finite() || age < 0.0 {
        return Err(ValidationError::InvalidAge(age));
    }
    Ok(())
}

pub fn validate_health_info(info: &HealthInfo) -> Result<(), ValidationError> {
    for entry in &info.weight_history {
        parse_date("weight date", &entry.date)?;
        if !entry.weight.is_finite() || entry.weight <= 0.0 {
            return Err(ValidationError::InvalidWeight {
                date: entry.date.clone(),
                weight: entry.weight,
            });
        }
    }
    Ok(())
}

pub fn validate_vet_visit(visit: &VetVisit) -> Result<(), ValidationError> {
    parse_date("visit date", &visit.date)?;
    require("visit reason", &visit.reason)?;
    if let Some(clinic) = &visit.clinic_info {
        require("clinic name", &clinic.clinic_name)?;
    }
    Ok(())
}

pub fn validate_training_entry(entry: &TrainingEntry) -> Result<(), ValidationError> {
    require("training task", &entry.task)?;
    parse_date("training date", &entry.date)?;
    if !(0.0..=100.0).contains(&entry.progress) {
        return Err(ValidationError::ProgressOutOfRange {
            task: entry.task.clone(),
            progress: entry.progress,
        });
    }
    Ok(())
}

pub fn validate_reminder(reminder: &Reminder) -> Result<(), ValidationError> {
    parse_date("reminder date", &reminder.date)?;
    require("reminder description", &reminder.description)
}

/// Checks for a profile about to be created
pub fn validate_profile(profile: &PetProfile) -> Result<(), ValidationError> {
    require("name", &profile.name)?;
    require("breed", &profile.breed)?;
    check_age(profile.age)?;
    check_optional_date("birthdate", profile.birthdate.as_deref())?;
    check_optional_date("adoptionDate", profile.adoption_date.as_deref())?;
    validate_health_info(&profile.health_info)?;
    profile.vet_visits.iter().try_for_each(validate_vet_visit)?;
    profile.training_log.iter().try_for_each(validate_training_entry)?;
    profile.reminders.iter().try_for_each(validate_reminder)
}

/// Checks for the fields a patch sets; unset fields are not looked at
pub fn validate_patch(patch: &PetProfilePatch) -> Result<(), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }
    if let Some(name) = &patch.name {
        require("name", name)?;
    }
    if let Some(breed) = &patch.breed {
        require("breed", breed)?;
    }
    if let Some(age) = patch.age {
        check_age(age)?;
    }
    check_optional_date("birthdate", patch.birthdate.as_deref())?;
    check_optional_date("adoptionDate", patch.adoption_date.as_deref())?;
    if let Some(info) = &patch.health_info {
        validate_health_info(info)?;
    }
    if let Some(visits) = &patch.vet_visits {
        visits.iter().try_for_each(validate_vet_visit)?;
    }
    if let Some(log) = &patch.training_log {
        log.iter().try_for_each(validate_training_entry)?;
    }
    if let Some(reminders) = &patch.reminders {
        reminders.iter().try_for_each(validate_reminder)?;
    }
    Ok(())
}

/// Sort weight history by date ascending
///
/// Stable, so same-day entries keep their recorded order. Call after
/// `validate_health_info`; unparsable dates sort first.
pub fn normalize_health_info(info: &mut HealthInfo) {
    info.weight_history
        .sort_by_key(|entry| NaiveDate::parse_from_str(entry.date.trim(), DATE_FORMAT).ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use petcare_domain::{ClinicInfo, ReminderKind, WeightEntry};

    #[test]
    fn test_name_and_breed_required() {
        let err = validate_profile(&PetProfile::new("  ", "Labrador")).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "name" });

        let err = validate_profile(&PetProfile::new("Browny", "")).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "breed" });

        assert!(validate_profile(&PetProfile::new("Browny", "Labrador")).is_ok());
    }

    #[test]
    fn test_invalid_dates_rejected() {
        let profile = PetProfile::new("Browny", "Labrador").with_birthdate("10/05/2023");
        let err = validate_profile(&profile).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "birthdate", .. }));

        let profile = PetProfile::new("Browny", "Labrador")
            .with_reminder(Reminder::new(ReminderKind::Food, "2025-02-30", "Kibble"));
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_negative_age_rejected() {
        let mut profile = PetProfile::new("Browny", "Labrador");
        profile.age = -0.5;
        assert_eq!(validate_profile(&profile), Err(ValidationError::InvalidAge(-0.5)));
    }

    #[test]
    fn test_training_progress_range() {
        let entry = TrainingEntry::new("Sit", "2025-08-01", 101.0);
        let err = validate_training_entry(&entry).unwrap_err();
        assert_eq!(err.to_string(), "Progress for 'Sit' must be between 0 and 100, got 101");

        assert!(validate_training_entry(&TrainingEntry::new("Stay", "2025-08-01", 0.0)).is_ok());
        assert!(validate_training_entry(&TrainingEntry::new("Stay", "2025-08-01", 100.0)).is_ok());
    }

    #[test]
    fn test_weight_must_be_positive() {
        let info = HealthInfo::new().with_weight(WeightEntry::new("2025-01-01", 0.0));
        assert!(matches!(
            validate_health_info(&info),
            Err(ValidationError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_clinic_name_required() {
        let visit = VetVisit::new("2025-08-10", "Checkup").with_clinic(ClinicInfo::new(""));
        assert_eq!(
            validate_vet_visit(&visit),
            Err(ValidationError::MissingField { field: "clinic name" })
        );
    }

    #[test]
    fn test_patch_only_checks_set_fields() {
        assert_eq!(validate_patch(&PetProfilePatch::new()), Err(ValidationError::EmptyPatch));
        assert!(validate_patch(&PetProfilePatch::new().name("Rex")).is_ok());
        assert_eq!(
            validate_patch(&PetProfilePatch::new().breed(" ")),
            Err(ValidationError::MissingField { field: "breed" })
        );
    }

    #[test]
    fn test_normalize_sorts_weight_history() {
        let mut info = HealthInfo::new()
            .with_weight(WeightEntry::new("2025-03-01", 10.4))
            .with_weight(WeightEntry::new("2024-12-15", 9.1))
            .with_weight(WeightEntry::new("2025-01-20", 9.8));

        normalize_health_info(&mut info);

        let dates: Vec<&str> = info.weight_history.iter().map(|w| w.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-12-15", "2025-01-20", "2025-03-01"]);
        assert_eq!(info.latest_weight().unwrap().weight, 10.4);
    }
}
