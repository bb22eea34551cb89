//! Stored document shapes for pet profiles
//!
//! The store holds camelCase JSON objects. The profile identifier is the
//! document's storage key and is never written into the payload; an `id`
//! key found in a stored payload is ignored.
//!
//! Nested collections default to empty when absent, so documents written
//! by older clients still decode.

use petcare_domain::{
    ClinicInfo, HealthInfo, PetId, PetProfile, PetProfilePatch, Reminder, ReminderKind,
    RepeatInterval, TrainingEntry, VetVisit, WeightEntry,
};
use serde::{Deserialize, Serialize};

use crate::store::{Document, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PetProfileDocument {
    name: String,
    breed: String,
    #[serde(default)]
    age: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    adoption_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday_notes: Option<String>,
    #[serde(default)]
    health_info: HealthInfoDocument,
    #[serde(default)]
    vet_visits: Vec<VetVisitDocument>,
    #[serde(default)]
    training_log: Vec<TrainingEntryDocument>,
    #[serde(default)]
    reminders: Vec<ReminderDocument>,
}

/// Every field optional; absent fields are left out of the merge
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct PetProfilePatchDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adoption_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthday_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    health_info: Option<HealthInfoDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vet_visits: Option<Vec<VetVisitDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    training_log: Option<Vec<TrainingEntryDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminders: Option<Vec<ReminderDocument>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfoDocument {
    #[serde(default)]
    allergies: Vec<String>,
    #[serde(default)]
    conditions: Vec<String>,
    #[serde(default)]
    weight_history: Vec<WeightEntryDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WeightEntryDocument {
    date: String,
    weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VetVisitDocument {
    date: String,
    reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clinic_info: Option<ClinicInfoDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClinicInfoDocument {
    clinic_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doctor_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrainingEntryDocument {
    task: String,
    date: String,
    progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReminderDocument {
    #[serde(rename = "type")]
    kind: ReminderKindDocument,
    date: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repeat: Option<RepeatIntervalDocument>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum ReminderKindDocument {
    Vaccination,
    Food,
    Medicine,
    Event,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum RepeatIntervalDocument {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

// ========== Domain -> Document ==========

impl From<&HealthInfo> for HealthInfoDocument {
    fn from(info: &HealthInfo) -> Self {
        Self {
            allergies: info.allergies.clone(),
            conditions: info.conditions.clone(),
            weight_history: info
                .weight_history
                .iter()
                .map(|w| WeightEntryDocument {
                    date: w.date.clone(),
                    weight: w.weight,
                })
                .collect(),
        }
    }
}

impl From<&VetVisit> for VetVisitDocument {
    fn from(visit: &VetVisit) -> Self {
        Self {
            date: visit.date.clone(),
            reason: visit.reason.clone(),
            notes: visit.notes.clone(),
            clinic_info: visit.clinic_info.as_ref().map(|c| ClinicInfoDocument {
                clinic_name: c.clinic_name.clone(),
                address: c.address.clone(),
                phone: c.phone.clone(),
                doctor_name: c.doctor_name.clone(),
            }),
        }
    }
}

impl From<&TrainingEntry> for TrainingEntryDocument {
    fn from(entry: &TrainingEntry) -> Self {
        Self {
            task: entry.task.clone(),
            date: entry.date.clone(),
            progress: entry.progress,
            notes: entry.notes.clone(),
        }
    }
}

impl From<&Reminder> for ReminderDocument {
    fn from(reminder: &Reminder) -> Self {
        Self {
            kind: reminder.kind.into(),
            date: reminder.date.clone(),
            description: reminder.description.clone(),
            repeat: reminder.repeat.map(Into::into),
        }
    }
}

impl From<ReminderKind> for ReminderKindDocument {
    fn from(kind: ReminderKind) -> Self {
        match kind {
            ReminderKind::Vaccination => Self::Vaccination,
            ReminderKind::Food => Self::Food,
            ReminderKind::Medicine => Self::Medicine,
            ReminderKind::Event => Self::Event,
        }
    }
}

impl From<RepeatInterval> for RepeatIntervalDocument {
    fn from(repeat: RepeatInterval) -> Self {
        match repeat {
            RepeatInterval::Daily => Self::Daily,
            RepeatInterval::Weekly => Self::Weekly,
            RepeatInterval::Monthly => Self::Monthly,
            RepeatInterval::Yearly => Self::Yearly,
        }
    }
}

impl From<&PetProfile> for PetProfileDocument {
    fn from(profile: &PetProfile) -> Self {
        Self {
            name: profile.name.clone(),
            breed: profile.breed.clone(),
            age: profile.age,
            photo: profile.photo.clone(),
            gender: profile.gender.clone(),
            birthdate: profile.birthdate.clone(),
            adoption_date: profile.adoption_date.clone(),
            birthday_notes: profile.birthday_notes.clone(),
            health_info: (&profile.health_info).into(),
            vet_visits: profile.vet_visits.iter().map(Into::into).collect(),
            training_log: profile.training_log.iter().map(Into::into).collect(),
            reminders: profile.reminders.iter().map(Into::into).collect(),
        }
    }
}

impl From<&PetProfilePatch> for PetProfilePatchDocument {
    fn from(patch: &PetProfilePatch) -> Self {
        Self {
            name: patch.name.clone(),
            breed: patch.breed.clone(),
            age: patch.age,
            photo: patch.photo.clone(),
            gender: patch.gender.clone(),
            birthdate: patch.birthdate.clone(),
            adoption_date: patch.adoption_date.clone(),
            birthday_notes: patch.birthday_notes.clone(),
            health_info: patch.health_info.as_ref().map(Into::into),
            vet_visits: patch
                .vet_visits
                .as_ref()
                .map(|v| v.iter().map(Into::into).collect()),
            training_log: patch
                .training_log
                .as_ref()
                .map(|t| t.iter().map(Into::into).collect()),
            reminders: patch
                .reminders
                .as_ref()
                .map(|r| r.iter().map(Into::into).collect()),
        }
    }
}

// ========== Document -> Domain ==========

impl From<HealthInfoDocument> for HealthInfo {
    fn from(doc: HealthInfoDocument) -> Self {
        Self {
            allergies: doc.allergies,
            conditions: doc.conditions,
            weight_history: doc
                .weight_history
                .into_iter()
                .map(|w| WeightEntry::new(w.date, w.weight))
                .collect(),
        }
    }
}

impl From<VetVisitDocument> for VetVisit {
    fn from(doc: VetVisitDocument) -> Self {
        Self {
            date: doc.date,
            reason: doc.reason,
            notes: doc.notes,
            clinic_info: doc.clinic_info.map(|c| ClinicInfo {
                clinic_name: c.clinic_name,
                address: c.address,
                phone: c.phone,
                doctor_name: c.doctor_name,
            }),
        }
    }
}

impl From<TrainingEntryDocument> for TrainingEntry {
    fn from(doc: TrainingEntryDocument) -> Self {
        Self {
            task: doc.task,
            date: doc.date,
            progress: doc.progress,
            notes: doc.notes,
        }
    }
}

impl From<ReminderDocument> for Reminder {
    fn from(doc: ReminderDocument) -> Self {
        Self {
            kind: match doc.kind {
                ReminderKindDocument::Vaccination => ReminderKind::Vaccination,
                ReminderKindDocument::Food => ReminderKind::Food,
                ReminderKindDocument::Medicine => ReminderKind::Medicine,
                ReminderKindDocument::Event => ReminderKind::Event,
            },
            date: doc.date,
            description: doc.description,
            repeat: doc.repeat.map(|r| match r {
                RepeatIntervalDocument::Daily => RepeatInterval::Daily,
                RepeatIntervalDocument::Weekly => RepeatInterval::Weekly,
                RepeatIntervalDocument::Monthly => RepeatInterval::Monthly,
                RepeatIntervalDocument::Yearly => RepeatInterval::Yearly,
            }),
        }
    }
}

// ========== Numeric fields ==========

impl HealthInfoDocument {
    fn numbers(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.weight_history.iter().map(|w| ("weight", w.weight))
    }
}

fn training_numbers(
    log: &[TrainingEntryDocument],
) -> impl Iterator<Item = (&'static str, f64)> + '_ {
    log.iter().map(|t| ("progress", t.progress))
}

impl PetProfilePatchDocument {
    fn numbers(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.age
            .map(|age| ("age", age))
            .into_iter()
            .chain(self.health_info.iter().flat_map(|h| h.numbers()))
            .chain(self.training_log.iter().flat_map(|log| training_numbers(log)))
    }
}

impl PetProfileDocument {
    fn numbers(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        std::iter::once(("age", self.age))
            .chain(self.health_info.numbers())
            .chain(training_numbers(&self.training_log))
    }

    fn into_profile(self, id: PetId) -> PetProfile {
        PetProfile {
            id: Some(id),
            name: self.name,
            breed: self.breed,
            age: self.age,
            photo: self.photo,
            gender: self.gender,
            birthdate: self.birthdate,
            adoption_date: self.adoption_date,
            birthday_notes: self.birthday_notes,
            health_info: self.health_info.into(),
            vet_visits: self.vet_visits.into_iter().map(Into::into).collect(),
            training_log: self.training_log.into_iter().map(Into::into).collect(),
            reminders: self.reminders.into_iter().map(Into::into).collect(),
        }
    }
}

// ========== Public conversions ==========

/// Full document body for a new profile (identifier excluded)
///
/// Fails with `StoreError::Encoding` if any number is NaN or infinite;
/// JSON has no such values and the document could not be read back.
pub fn profile_to_document(profile: &PetProfile) -> Result<Document, StoreError> {
    let document = PetProfileDocument::from(profile);
    ensure_finite(document.numbers())?;
    to_object(&document)
}

/// Only the fields set in `patch`; same number rules as `profile_to_document`
pub fn patch_to_document(patch: &PetProfilePatch) -> Result<Document, StoreError> {
    let document = PetProfilePatchDocument::from(patch);
    ensure_finite(document.numbers())?;
    to_object(&document)
}

/// Decode a stored document, attaching its storage key as the id
pub fn document_to_profile(
    collection: &str,
    id: &str,
    mut document: Document,
) -> Result<PetProfile, StoreError> {
    document.remove("id");
    let decoded: PetProfileDocument = serde_json::from_value(serde_json::Value::Object(document))
        .map_err(|source| StoreError::Malformed {
            collection: collection.to_string(),
            id: id.to_string(),
            source,
        })?;
    Ok(decoded.into_profile(PetId::new(id)))
}

fn ensure_finite(
    mut numbers: impl Iterator<Item = (&'static str, f64)>,
) -> Result<(), StoreError> {
    match numbers.find(|(_, value)| !value.is_finite()) {
        Some((field, value)) => Err(StoreError::Encoding(serde::ser::Error::custom(format!(
            "{} must be a finite number, got {}",
            field, value
        )))),
        None => Ok(()),
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(StoreError::Encoding(serde::ser::Error::custom(format!(
            "expected a JSON object, got {}",
            other
        )))),
    }
}
