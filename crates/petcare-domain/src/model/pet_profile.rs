//! PetProfile - The aggregate root
//!
//! A PetProfile is an Entity. Its identity (`PetId`) is assigned by the
//! store when the profile is first persisted and never changes afterwards.
//! Before that, `id` is `None`.
//!
//! Updates are expressed as a `PetProfilePatch`: only the fields that are
//! set are written, and a nested value (health info, a whole list) replaces
//! the previous one instead of being merged into it.

use super::age::PetAge;
use super::health::HealthInfo;
use super::reminder::Reminder;
use super::training::TrainingEntry;
use super::vet_visit::VetVisit;

/// Store-assigned identifier for a PetProfile
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PetId(String);

impl PetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pet profile aggregate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PetProfile {
    /// Present only once the store has persisted the profile
    pub id: Option<PetId>,
    pub name: String,
    pub breed: String,
    /// Fractional years, see `PetAge`
    pub age: f64,
    pub photo: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<String>,
    pub adoption_date: Option<String>,
    pub birthday_notes: Option<String>,
    pub health_info: HealthInfo,
    pub vet_visits: Vec<VetVisit>,
    pub training_log: Vec<TrainingEntry>,
    pub reminders: Vec<Reminder>,
}

impl PetProfile {
    /// Create an unpersisted profile with empty nested records
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            ..Self::default()
        }
    }

    // ========== Builders ==========

    pub fn with_age(mut self, age: PetAge) -> Self {
        self.age = age.as_years();
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birthdate(mut self, birthdate: impl Into<String>) -> Self {
        self.birthdate = Some(birthdate.into());
        self
    }

    pub fn with_adoption_date(mut self, adoption_date: impl Into<String>) -> Self {
        self.adoption_date = Some(adoption_date.into());
        self
    }

    pub fn with_birthday_notes(mut self, notes: impl Into<String>) -> Self {
        self.birthday_notes = Some(notes.into());
        self
    }

    pub fn with_health_info(mut self, health_info: HealthInfo) -> Self {
        self.health_info = health_info;
        self
    }

    pub fn with_vet_visit(mut self, visit: VetVisit) -> Self {
        self.vet_visits.push(visit);
        self
    }

    pub fn with_training_entry(mut self, entry: TrainingEntry) -> Self {
        self.training_log.push(entry);
        self
    }

    pub fn with_reminder(mut self, reminder: Reminder) -> Self {
        self.reminders.push(reminder);
        self
    }

    // ========== Queries ==========

    pub fn id(&self) -> Option<&PetId> {
        self.id.as_ref()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Years and months for display; `None` if the stored age is invalid
    pub fn age_breakdown(&self) -> Option<PetAge> {
        PetAge::from_years(self.age)
    }

    // ========== Mutations ==========

    /// Merge a patch into this profile, field by field
    ///
    /// Mirrors what the store does on update, so callers can reconstruct
    /// the merged state locally. The identifier is never touched.
    pub fn apply(&mut self, patch: &PetProfilePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(breed) = &patch.breed {
            self.breed = breed.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(photo) = &patch.photo {
            self.photo = Some(photo.clone());
        }
        if let Some(gender) = &patch.gender {
            self.gender = Some(gender.clone());
        }
        if let Some(birthdate) = &patch.birthdate {
            self.birthdate = Some(birthdate.clone());
        }
        if let Some(adoption_date) = &patch.adoption_date {
            self.adoption_date = Some(adoption_date.clone());
        }
        if let Some(notes) = &patch.birthday_notes {
            self.birthday_notes = Some(notes.clone());
        }
        if let Some(health_info) = &patch.health_info {
            self.health_info = health_info.clone();
        }
        if let Some(vet_visits) = &patch.vet_visits {
            self.vet_visits = vet_visits.clone();
        }
        if let Some(training_log) = &patch.training_log {
            self.training_log = training_log.clone();
        }
        if let Some(reminders) = &patch.reminders {
            self.reminders = reminders.clone();
        }
    }
}

/// A partial PetProfile used for updates
///
/// `None` means "leave the stored value alone".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PetProfilePatch {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub photo: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<String>,
    pub adoption_date: Option<String>,
    pub birthday_notes: Option<String>,
    pub health_info: Option<HealthInfo>,
    pub vet_visits: Option<Vec<VetVisit>>,
    pub training_log: Option<Vec<TrainingEntry>>,
    pub reminders: Option<Vec<Reminder>>,
}

impl PetProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn age(mut self, age: PetAge) -> Self {
        self.age = Some(age.as_years());
        self
    }

    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn birthdate(mut self, birthdate: impl Into<String>) -> Self {
        self.birthdate = Some(birthdate.into());
        self
    }

    pub fn adoption_date(mut self, adoption_date: impl Into<String>) -> Self {
        self.adoption_date = Some(adoption_date.into());
        self
    }

    pub fn birthday_notes(mut self, notes: impl Into<String>) -> Self {
        self.birthday_notes = Some(notes.into());
        self
    }

    pub fn health_info(mut self, health_info: HealthInfo) -> Self {
        self.health_info = Some(health_info);
        self
    }

    pub fn vet_visits(mut self, vet_visits: Vec<VetVisit>) -> Self {
        self.vet_visits = Some(vet_visits);
        self
    }

    pub fn training_log(mut self, training_log: Vec<TrainingEntry>) -> Self {
        self.training_log = Some(training_log);
        self
    }

    pub fn reminders(mut self, reminders: Vec<Reminder>) -> Self {
        self.reminders = Some(reminders);
        self
    }

    /// Names (as stored) of the fields this patch will write
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("name", self.name.is_some()),
            ("breed", self.breed.is_some()),
            ("age", self.age.is_some()),
            ("photo", self.photo.is_some()),
            ("gender", self.gender.is_some()),
            ("birthdate", self.birthdate.is_some()),
            ("adoptionDate", self.adoption_date.is_some()),
            ("birthdayNotes", self.birthday_notes.is_some()),
            ("healthInfo", self.health_info.is_some()),
            ("vetVisits", self.vet_visits.is_some()),
            ("trainingLog", self.training_log.is_some()),
            ("reminders", self.reminders.is_some()),
        ];
        flags
            .into_iter()
            .filter(|(_, set)| *set)
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }
}
