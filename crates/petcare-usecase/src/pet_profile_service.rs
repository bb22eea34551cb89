//! PetProfileService - record-keeping flows on top of the repository port
//!
//! Each method maps to one user action. Nested records (weights, visits,
//! training, reminders) are appended by reading the profile, changing the
//! nested collection locally and writing that collection back as a whole;
//! the store merges at top-level field granularity only.

use chrono::NaiveDate;
use petcare_domain::{
    PetId, PetProfile, PetProfilePatch, PetProfileRepository, Reminder, RepositoryError,
    TrainingEntry, VetVisit, WeightEntry,
};
use thiserror::Error;
use tracing::debug;

use crate::validation::{self, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A reminder together with the pet it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingReminder {
    pub pet_id: PetId,
    pub pet_name: String,
    pub due: NaiveDate,
    pub reminder: Reminder,
}

pub struct PetProfileService<R> {
    repository: R,
}

impl<R: PetProfileRepository> PetProfileService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validate and persist a new profile; returns it with `id` set
    pub async fn register_pet(&self, mut profile: PetProfile) -> Result<PetProfile, ServiceError> {
        validation::validate_profile(&profile)?;
        validation::normalize_health_info(&mut profile.health_info);
        let id = self.repository.create_pet_profile(&profile).await?;
        profile.id = Some(id);
        Ok(profile)
    }

    pub async fn list_pets(&self) -> Result<Vec<PetProfile>, ServiceError> {
        Ok(self.repository.get_all_pet_profiles().await?)
    }

    /// Pets whose name or breed contains `query`, ignoring case
    ///
    /// An empty query matches every pet.
    pub async fn search_pets(&self, query: &str) -> Result<Vec<PetProfile>, ServiceError> {
        let needle = query.to_lowercase();
        let pets = self.list_pets().await?;
        Ok(pets
            .into_iter()
            .filter(|pet| {
                pet.name.to_lowercase().contains(&needle)
                    || pet.breed.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub async fn pet(&self, id: &PetId) -> Result<PetProfile, ServiceError> {
        Ok(self.repository.get_pet_profile_by_id(id).await?)
    }

    /// Validate and apply a partial update; returns the merged profile
    pub async fn update_pet(
        &self,
        id: &PetId,
        mut patch: PetProfilePatch,
    ) -> Result<PetProfile, ServiceError> {
        validation::validate_patch(&patch)?;
        if let Some(info) = patch.health_info.as_mut() {
            validation::normalize_health_info(info);
        }
        Ok(self.repository.update_pet_profile(id, &patch).await?)
    }

    pub async fn remove_pet(&self, id: &PetId) -> Result<(), ServiceError> {
        Ok(self.repository.delete_pet_profile(id).await?)
    }

    // ========== Nested record flows ==========

    pub async fn record_weight(
        &self,
        id: &PetId,
        entry: WeightEntry,
    ) -> Result<PetProfile, ServiceError> {
        let mut health_info = self.pet(id).await?.health_info;
        health_info.weight_history.push(entry);
        validation::validate_health_info(&health_info)?;
        validation::normalize_health_info(&mut health_info);
        debug!(id = %id, entries = health_info.weight_history.len(), "recording weight");
        self.write(id, PetProfilePatch::new().health_info(health_info))
            .await
    }

    pub async fn log_vet_visit(&self, id: &PetId, visit: VetVisit) -> Result<PetProfile, ServiceError> {
        validation::validate_vet_visit(&visit)?;
        let mut visits = self.pet(id).await?.vet_visits;
        visits.push(visit);
        self.write(id, PetProfilePatch::new().vet_visits(visits)).await
    }

    pub async fn log_training(
        &self,
        id: &PetId,
        entry: TrainingEntry,
    ) -> Result<PetProfile, ServiceError> {
        validation::validate_training_entry(&entry)?;
        let mut log = self.pet(id).await?.training_log;
        log.push(entry);
        self.write(id, PetProfilePatch::new().training_log(log)).await
    }

    pub async fn add_reminder(
        &self,
        id: &PetId,
        reminder: Reminder,
    ) -> Result<PetProfile, ServiceError> {
        validation::validate_reminder(&reminder)?;
        let mut reminders = self.pet(id).await?.reminders;
        reminders.push(reminder);
        self.write(id, PetProfilePatch::new().reminders(reminders)).await
    }

    /// Reminders across all pets due on or after `from`, soonest first
    ///
    /// Reminders whose stored date does not parse are skipped.
    pub async fn upcoming_reminders(
        &self,
        from: NaiveDate,
    ) -> Result<Vec<UpcomingReminder>, ServiceError> {
        let pets = self.repository.get_all_pet_profiles().await?;
        let mut upcoming: Vec<UpcomingReminder> = pets
            .into_iter()
            .filter_map(|pet| pet.id.clone().map(|id| (id, pet)))
            .flat_map(|(pet_id, pet)| {
                let pet_name = pet.name;
                pet.reminders.into_iter().filter_map(move |reminder| {
                    let due = validation::parse_date("reminder date", &reminder.date).ok()?;
                    (due >= from).then(|| UpcomingReminder {
                        pet_id: pet_id.clone(),
                        pet_name: pet_name.clone(),
                        due,
                        reminder,
                    })
                })
            })
            .collect();
        upcoming.sort_by(|a, b| a.due.cmp(&b.due).then_with(|| a.pet_name.cmp(&b.pet_name)));
        Ok(upcoming)
    }

    async fn write(&self, id: &PetId, patch: PetProfilePatch) -> Result<PetProfile, ServiceError> {
        Ok(self.repository.update_pet_profile(id, &patch).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petcare_domain::{HealthInfo, PetAge, ReminderKind, RepeatInterval};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory implementation for testing
    #[derive(Default)]
    struct InMemoryPetRepo {
        pets: Mutex<BTreeMap<PetId, PetProfile>>,
        next_id: AtomicUsize,
    }

    impl PetProfileRepository for InMemoryPetRepo {
        async fn create_pet_profile(&self, profile: &PetProfile) -> Result<PetId, RepositoryError> {
            let id = PetId::new(format!("pet-{:03}", self.next_id.fetch_add(1, Ordering::SeqCst)));
            let mut stored = profile.clone();
            stored.id = Some(id.clone());
            self.pets.lock().unwrap().insert(id.clone(), stored);
            Ok(id)
        }

        async fn get_all_pet_profiles(&self) -> Result<Vec<PetProfile>, RepositoryError> {
            Ok(self.pets.lock().unwrap().values().cloned().collect())
        }

        async fn get_pet_profile_by_id(&self, id: &PetId) -> Result<PetProfile, RepositoryError> {
            self.pets
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
        }

        async fn update_pet_profile(
            &self,
            id: &PetId,
            patch: &PetProfilePatch,
        ) -> Result<PetProfile, RepositoryError> {
            let mut pets = self.pets.lock().unwrap();
            let pet = pets
                .get_mut(id)
                .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;
            pet.apply(patch);
            Ok(pet.clone())
        }

        async fn delete_pet_profile(&self, id: &PetId) -> Result<(), RepositoryError> {
            self.pets
                .lock()
                .unwrap()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::Rejected {
                    message: format!("no such document: {}", id),
                })
        }
    }

    fn service() -> PetProfileService<InMemoryPetRepo> {
        PetProfileService::new(InMemoryPetRepo::default())
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_register_assigns_id_and_sorts_weights() {
        let service = service();
        let profile = PetProfile::new("Browny", "Labrador")
            .with_age(PetAge::new(2, 6).unwrap())
            .with_health_info(
                HealthInfo::new()
                    .with_weight(WeightEntry::new("2025-03-01", 10.4))
                    .with_weight(WeightEntry::new("2025-01-01", 9.8)),
            );

        let created = service.register_pet(profile).await.unwrap();

        assert_eq!(created.id, Some(PetId::new("pet-000")));
        assert_eq!(created.health_info.weight_history[0].date, "2025-01-01");
        assert_eq!(service.pet(&PetId::new("pet-000")).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_register_rejects_missing_breed() {
        let service = service();

        let err = service
            .register_pet(PetProfile::new("Browny", " "))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::MissingField { field: "breed" })
        ));
        assert!(service.list_pets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_pets_by_name_or_breed() {
        let service = service();
        for (name, breed) in [("Browny", "Labrador"), ("Mochi", "Persian"), ("Labby", "Beagle")] {
            service
                .register_pet(PetProfile::new(name, breed))
                .await
                .unwrap();
        }

        let names = |pets: Vec<PetProfile>| -> Vec<String> {
            let mut names: Vec<String> = pets.into_iter().map(|p| p.name).collect();
            names.sort();
            names
        };

        assert_eq!(names(service.search_pets("moch").await.unwrap()), vec!["Mochi"]);
        assert_eq!(names(service.search_pets("persian").await.unwrap()), vec!["Mochi"]);
        assert_eq!(
            names(service.search_pets("LAB").await.unwrap()),
            vec!["Browny", "Labby"]
        );
        assert_eq!(service.search_pets("").await.unwrap().len(), 3);
        assert!(service.search_pets("corgi").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_pet_merges() {
        let service = service();
        let created = service
            .register_pet(PetProfile::new("Browny", "Labrador"))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let updated = service
            .update_pet(&id, PetProfilePatch::new().name("Rex"))
            .await
            .unwrap();

        assert_eq!(updated.name, "Rex");
        assert_eq!(updated.breed, "Labrador");
    }

    #[tokio::test]
    async fn test_record_weight_keeps_history_ordered() {
        let service = service();
        let id = service
            .register_pet(PetProfile::new("Browny", "Labrador").with_health_info(
                HealthInfo::new()
                    .with_allergy("Dust")
                    .with_weight(WeightEntry::new("2025-05-01", 10.0)),
            ))
            .await
            .unwrap()
            .id
            .unwrap();

        let updated = service
            .record_weight(&id, WeightEntry::new("2025-02-01", 9.5))
            .await
            .unwrap();

        let dates: Vec<&str> = updated
            .health_info
            .weight_history
            .iter()
            .map(|w| w.date.as_str())
            .collect();
        assert_eq!(dates, vec!["2025-02-01", "2025-05-01"]);
        assert_eq!(updated.health_info.allergies, vec!["Dust".to_string()]);
    }

    #[tokio::test]
    async fn test_record_weight_rejects_bad_entry() {
        let service = service();
        let id = service
            .register_pet(PetProfile::new("Browny", "Labrador"))
            .await
            .unwrap()
            .id
            .unwrap();

        let err = service
            .record_weight(&id, WeightEntry::new("yesterday", 9.5))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidDate { .. })));
        assert!(service.pet(&id).await.unwrap().health_info.weight_history.is_empty());
    }

    #[tokio::test]
    async fn test_nested_flows_append() {
        let service = service();
        let id = service
            .register_pet(PetProfile::new("Browny", "Labrador"))
            .await
            .unwrap()
            .id
            .unwrap();

        service
            .log_vet_visit(&id, VetVisit::new("2025-08-10", "Checkup"))
            .await
            .unwrap();
        service
            .log_training(&id, TrainingEntry::new("Sit", "2025-08-11", 80.0))
            .await
            .unwrap();
        let pet = service
            .add_reminder(
                &id,
                Reminder::new(ReminderKind::Medicine, "2025-09-01", "Deworming")
                    .repeating(RepeatInterval::Monthly),
            )
            .await
            .unwrap();

        assert_eq!(pet.vet_visits.len(), 1);
        assert_eq!(pet.training_log.len(), 1);
        assert_eq!(pet.reminders.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_pet_surfaces_not_found() {
        let service = service();

        let err = service
            .log_vet_visit(&PetId::new("ghost"), VetVisit::new("2025-08-10", "Checkup"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_upcoming_reminders() {
        let service = service();
        service
            .register_pet(
                PetProfile::new("Browny", "Labrador")
                    .with_reminder(Reminder::new(ReminderKind::Vaccination, "2025-12-01", "Rabies"))
                    .with_reminder(Reminder::new(ReminderKind::Food, "2025-01-01", "Old")),
            )
            .await
            .unwrap();
        service
            .register_pet(
                PetProfile::new("Mochi", "Persian")
                    .with_reminder(Reminder::new(ReminderKind::Event, "2025-10-15", "Birthday")),
            )
            .await
            .unwrap();

        let upcoming = service.upcoming_reminders(date("2025-06-01")).await.unwrap();

        let summary: Vec<(&str, &str)> = upcoming
            .iter()
            .map(|u| (u.pet_name.as_str(), u.reminder.description.as_str()))
            .collect();
        assert_eq!(summary, vec![("Mochi", "Birthday"), ("Browny", "Rabies")]);
        assert_eq!(upcoming[0].due, date("2025-10-15"));
    }

    #[tokio::test]
    async fn test_remove_pet() {
        let service = service();
        let id = service
            .register_pet(PetProfile::new("Browny", "Labrador"))
            .await
            .unwrap()
            .id
            .unwrap();

        service.remove_pet(&id).await.unwrap();

        assert!(service.list_pets().await.unwrap().is_empty());
        assert!(service.remove_pet(&id).await.is_err());
    }
}
