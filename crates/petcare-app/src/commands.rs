//! Subcommand arguments and their execution

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use petcare_domain::{
    ClinicInfo, HealthInfo, PetAge, PetId, PetProfile, PetProfilePatch, Reminder, ReminderKind,
    RepeatInterval, TrainingEntry, VetVisit, WeightEntry,
};
use petcare_usecase::validation::{self, DATE_FORMAT};

use crate::Service;

fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

fn age_from(years: Option<u32>, months: Option<u32>) -> Result<Option<PetAge>> {
    if years.is_none() && months.is_none() {
        return Ok(None);
    }
    let age = PetAge::new(years.unwrap_or(0), months.unwrap_or(0))?;
    Ok(Some(age))
}

fn age_label(pet: &PetProfile) -> String {
    pet.age_breakdown()
        .map(|age| age.to_string())
        .unwrap_or_else(|| "unknown age".to_string())
}

// ========== Read-only commands ==========

pub async fn list(service: &Service, search: Option<&str>) -> Result<()> {
    let pets = match search {
        Some(query) => service.search_pets(query).await,
        None => service.list_pets().await,
    }
    .context("failed to list pets")?;
    if pets.is_empty() {
        match search {
            Some(query) => println!("No pets match '{}'.", query),
            None => println!("No pets registered yet."),
        }
        return Ok(());
    }
    for pet in &pets {
        let id = pet.id().map(PetId::as_str).unwrap_or("-");
        println!("{}  {} ({}, {})", id, pet.name, pet.breed, age_label(pet));
    }
    Ok(())
}

pub async fn show(service: &Service, id: &str) -> Result<()> {
    let pet = service
        .pet(&PetId::new(id))
        .await
        .with_context(|| format!("failed to load pet {}", id))?;
    print_profile(&pet);
    Ok(())
}

fn print_profile(pet: &PetProfile) {
    println!("{} - {} ({})", pet.name, pet.breed, age_label(pet));
    if let Some(id) = pet.id() {
        println!("  id: {}", id);
    }
    let optional = [
        ("gender", &pet.gender),
        ("birthdate", &pet.birthdate),
        ("adopted", &pet.adoption_date),
        ("birthday notes", &pet.birthday_notes),
        ("photo", &pet.photo),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            println!("  {}: {}", label, value);
        }
    }

    let health = &pet.health_info;
    if !health.allergies.is_empty() {
        println!("  allergies: {}", health.allergies.join(", "));
    }
    if !health.conditions.is_empty() {
        println!("  conditions: {}", health.conditions.join(", "));
    }
    if let Some(latest) = health.latest_weight() {
        println!(
            "  weight: {} kg on {} ({} entries)",
            latest.weight,
            latest.date,
            health.weight_history.len()
        );
    }

    for visit in &pet.vet_visits {
        let clinic = visit
            .clinic_info
            .as_ref()
            .map(|c| format!(" at {}", c.clinic_name))
            .unwrap_or_default();
        println!("  visit {}: {}{}", visit.date, visit.reason, clinic);
    }
    for entry in &pet.training_log {
        let mark = if entry.is_mastered() { " (mastered)" } else { "" };
        println!("  training {}: {} {}%{}", entry.date, entry.task, entry.progress, mark);
    }
    for reminder in &pet.reminders {
        print_reminder(reminder);
    }
}

fn print_reminder(reminder: &Reminder) {
    let repeat = reminder
        .repeat
        .map(|r| format!(" [{}]", r))
        .unwrap_or_default();
    println!(
        "  {} {}: {}{}",
        reminder.date, reminder.kind, reminder.description, repeat
    );
}

// ========== Profile commands ==========

#[derive(Args)]
pub struct AddCommand {
    #[arg(long)]
    name: String,

    #[arg(long)]
    breed: String,

    /// Whole years of age
    #[arg(long)]
    years: Option<u32>,

    /// Remaining months of age (0-11)
    #[arg(long)]
    months: Option<u32>,

    #[arg(long)]
    gender: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    birthdate: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    adoption_date: Option<String>,

    #[arg(long)]
    birthday_notes: Option<String>,

    #[arg(long)]
    photo: Option<String>,

    /// Repeatable
    #[arg(long = "allergy")]
    allergies: Vec<String>,

    /// Repeatable
    #[arg(long = "condition")]
    conditions: Vec<String>,
}

impl AddCommand {
    pub async fn run(self, service: &Service) -> Result<()> {
        let mut profile = PetProfile::new(self.name, self.breed);
        if let Some(age) = age_from(self.years, self.months)? {
            profile = profile.with_age(age);
        }
        if let Some(gender) = self.gender {
            profile = profile.with_gender(gender);
        }
        if let Some(birthdate) = self.birthdate {
            profile = profile.with_birthdate(birthdate);
        }
        if let Some(adoption_date) = self.adoption_date {
            profile = profile.with_adoption_date(adoption_date);
        }
        if let Some(notes) = self.birthday_notes {
            profile = profile.with_birthday_notes(notes);
        }
        if let Some(photo) = self.photo {
            profile = profile.with_photo(photo);
        }
        let health_info = self
            .allergies
            .into_iter()
            .fold(HealthInfo::new(), |info, allergy| info.with_allergy(allergy));
        let health_info = self
            .conditions
            .into_iter()
            .fold(health_info, |info, condition| info.with_condition(condition));
        profile = profile.with_health_info(health_info);

        let created = service
            .register_pet(profile)
            .await
            .context("failed to register pet")?;
        println!(
            "Registered {} with id {}",
            created.name,
            created.id().map(PetId::as_str).unwrap_or("-")
        );
        Ok(())
    }
}

#[derive(Args)]
pub struct UpdateCommand {
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    breed: Option<String>,

    #[arg(long)]
    years: Option<u32>,

    #[arg(long)]
    months: Option<u32>,

    #[arg(long)]
    gender: Option<String>,

    #[arg(long)]
    birthdate: Option<String>,

    #[arg(long)]
    adoption_date: Option<String>,

    #[arg(long)]
    birthday_notes: Option<String>,

    #[arg(long)]
    photo: Option<String>,
}

impl UpdateCommand {
    fn patch(&self) -> Result<PetProfilePatch> {
        let mut patch = PetProfilePatch::new();
        patch.name = self.name.clone();
        patch.breed = self.breed.clone();
        patch.gender = self.gender.clone();
        patch.birthdate = self.birthdate.clone();
        patch.adoption_date = self.adoption_date.clone();
        patch.birthday_notes = self.birthday_notes.clone();
        patch.photo = self.photo.clone();
        if let Some(age) = age_from(self.years, self.months)? {
            patch = patch.age(age);
        }
        Ok(patch)
    }

    pub async fn run(self, service: &Service) -> Result<()> {
        let patch = self.patch()?;
        let updated = service
            .update_pet(&PetId::new(&self.id), patch)
            .await
            .with_context(|| format!("failed to update pet {}", self.id))?;
        print_profile(&updated);
        Ok(())
    }
}

pub async fn delete(service: &Service, id: &str) -> Result<()> {
    service
        .remove_pet(&PetId::new(id))
        .await
        .with_context(|| format!("failed to delete pet {}", id))?;
    println!("Deleted {}", id);
    Ok(())
}

// ========== Record commands ==========

#[derive(Args)]
pub struct WeighCommand {
    id: String,

    /// Kilograms
    #[arg(long)]
    weight: f64,

    /// Defaults to today
    #[arg(long)]
    date: Option<String>,
}

impl WeighCommand {
    pub async fn run(self, service: &Service) -> Result<()> {
        let entry = WeightEntry::new(self.date.unwrap_or_else(today), self.weight);
        let pet = service
            .record_weight(&PetId::new(&self.id), entry)
            .await
            .with_context(|| format!("failed to record weight for pet {}", self.id))?;
        if let Some(latest) = pet.health_info.latest_weight() {
            println!("{} now weighs {} kg ({})", pet.name, latest.weight, latest.date);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct VisitCommand {
    id: String,

    #[arg(long)]
    reason: String,

    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    #[arg(long)]
    clinic: Option<String>,

    #[arg(long, requires = "clinic")]
    address: Option<String>,

    #[arg(long, requires = "clinic")]
    phone: Option<String>,

    #[arg(long, requires = "clinic")]
    doctor: Option<String>,
}

impl VisitCommand {
    fn visit(self) -> VetVisit {
        let mut visit = VetVisit::new(self.date.unwrap_or_else(today), self.reason);
        if let Some(notes) = self.notes {
            visit = visit.with_notes(notes);
        }
        if let Some(name) = self.clinic {
            let mut clinic = ClinicInfo::new(name);
            if let Some(address) = self.address {
                clinic = clinic.with_address(address);
            }
            if let Some(phone) = self.phone {
                clinic = clinic.with_phone(phone);
            }
            if let Some(doctor) = self.doctor {
                clinic = clinic.with_doctor(doctor);
            }
            visit = visit.with_clinic(clinic);
        }
        visit
    }

    pub async fn run(self, service: &Service) -> Result<()> {
        let id = PetId::new(&self.id);
        let pet = service
            .log_vet_visit(&id, self.visit())
            .await
            .with_context(|| format!("failed to log vet visit for pet {}", id))?;
        println!("{} has {} vet visit(s) on record", pet.name, pet.vet_visits.len());
        Ok(())
    }
}

#[derive(Args)]
pub struct TrainCommand {
    id: String,

    #[arg(long)]
    task: String,

    /// Percent complete, 0-100
    #[arg(long)]
    progress: f64,

    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

impl TrainCommand {
    pub async fn run(self, service: &Service) -> Result<()> {
        let mut entry = TrainingEntry::new(self.task, self.date.unwrap_or_else(today), self.progress);
        if let Some(notes) = self.notes {
            entry = entry.with_notes(notes);
        }
        let pet = service
            .log_training(&PetId::new(&self.id), entry)
            .await
            .with_context(|| format!("failed to log training for pet {}", self.id))?;
        println!("{} has {} training entries", pet.name, pet.training_log.len());
        Ok(())
    }
}

#[derive(Args)]
pub struct RemindCommand {
    id: String,

    /// vaccination, food, medicine or event
    #[arg(long)]
    kind: ReminderKind,

    /// YYYY-MM-DD
    #[arg(long)]
    date: String,

    #[arg(long)]
    description: String,

    /// daily, weekly, monthly or yearly
    #[arg(long)]
    repeat: Option<RepeatInterval>,
}

impl RemindCommand {
    pub async fn run(self, service: &Service) -> Result<()> {
        let mut reminder = Reminder::new(self.kind, self.date, self.description);
        if let Some(interval) = self.repeat {
            reminder = reminder.repeating(interval);
        }
        let pet = service
            .add_reminder(&PetId::new(&self.id), reminder)
            .await
            .with_context(|| format!("failed to add reminder for pet {}", self.id))?;
        println!("{} has {} reminder(s)", pet.name, pet.reminders.len());
        Ok(())
    }
}

#[derive(Args)]
pub struct RemindersCommand {
    /// First day to include (YYYY-MM-DD), defaults to today
    #[arg(long)]
    from: Option<String>,
}

impl RemindersCommand {
    fn from_date(&self) -> Result<NaiveDate> {
        match &self.from {
            Some(value) => Ok(validation::parse_date("from", value)?),
            None => Ok(Local::now().date_naive()),
        }
    }

    pub async fn run(self, service: &Service) -> Result<()> {
        let from = self.from_date()?;
        let upcoming = service
            .upcoming_reminders(from)
            .await
            .context("failed to collect reminders")?;
        if upcoming.is_empty() {
            println!("No reminders from {} on.", from.format(DATE_FORMAT));
            return Ok(());
        }
        for item in &upcoming {
            println!("{} ({})", item.pet_name, item.pet_id);
            print_reminder(&item.reminder);
        }
        Ok(())
    }
}
