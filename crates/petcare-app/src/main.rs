//! # Petcare - pet profile records from the command line
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Loads: PetcareConfig (shared)                           │
//! │    ├── Opens: DocumentStore, once per process (adapter)        │
//! │    ├── Creates: DocumentPetProfileRepository (adapter)         │
//! │    ├── Creates: PetProfileService (usecase)                    │
//! │    └── Runs: one subcommand                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   petcare list                          - List all pets
//!   petcare add --name Browny --breed Lab - Register a pet
//!   petcare weigh <id> --weight 10.2      - Record a weight
//!   petcare reminders --from 2025-09-01   - Upcoming reminders

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use petcare_adapter::{store, DocumentCollection, DocumentPetProfileRepository, RetryExecutor, RetryPolicy};
use petcare_usecase::PetProfileService;
use shared::PetcareConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{
    AddCommand, RemindCommand, RemindersCommand, TrainCommand, UpdateCommand, VisitCommand,
    WeighCommand,
};

pub type Service = PetProfileService<DocumentPetProfileRepository>;

#[derive(Parser)]
#[command(name = "petcare")]
#[command(about = "Petcare - pet profiles, health records and reminders")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a petcare.json config file (falls back to $PETCARE_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List pets, optionally filtered by name or breed
    List {
        /// Case-insensitive text to look for in name or breed
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one pet in full
    Show { id: String },
    /// Register a new pet
    Add(AddCommand),
    /// Change top-level fields of a pet
    Update(UpdateCommand),
    /// Record a weight measurement
    Weigh(WeighCommand),
    /// Log a vet visit
    Visit(VisitCommand),
    /// Log training progress
    Train(TrainCommand),
    /// Add a reminder to a pet
    Remind(RemindCommand),
    /// Reminders across all pets, soonest first
    Reminders(RemindersCommand),
    /// Delete a pet
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; diagnostics go to stderr so stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = PetcareConfig::load(cli.config.as_deref())
        .context("failed to load petcare configuration")?;
    let service = build_service(&config);

    match cli.command {
        Commands::List { search } => commands::list(&service, search.as_deref()).await,
        Commands::Show { id } => commands::show(&service, &id).await,
        Commands::Add(cmd) => cmd.run(&service).await,
        Commands::Update(cmd) => cmd.run(&service).await,
        Commands::Weigh(cmd) => cmd.run(&service).await,
        Commands::Visit(cmd) => cmd.run(&service).await,
        Commands::Train(cmd) => cmd.run(&service).await,
        Commands::Remind(cmd) => cmd.run(&service).await,
        Commands::Reminders(cmd) => cmd.run(&service).await,
        Commands::Delete { id } => commands::delete(&service, &id).await,
    }
}

// ========================================
// Dependency Injection - Wire up the system
// ========================================

fn build_service(config: &PetcareConfig) -> Service {
    debug!(collection = %config.collection, store = ?config.store, "wiring services");

    // Adapters (memory or file today; any DocumentStore backend fits here)
    let store = store::open(&config.store);
    let collection = DocumentCollection::new(store, config.collection.clone());
    let retry = RetryExecutor::new(RetryPolicy::from(&config.retry));
    let repository = DocumentPetProfileRepository::new(collection, retry);

    PetProfileService::new(repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petcare_domain::PetProfile;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "petcare", "--config", "pets.json", "weigh", "abc", "--weight", "10.5",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("pets.json")));
        assert!(matches!(cli.command, Commands::Weigh(_)));

        let cli = Cli::try_parse_from(["petcare", "show", "abc"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { id } if id == "abc"));
    }

    #[test]
    fn test_cli_list_search_flag() {
        let cli = Cli::try_parse_from(["petcare", "list", "--search", "lab"]).unwrap();
        assert!(matches!(cli.command, Commands::List { search: Some(s) } if s == "lab"));

        let cli = Cli::try_parse_from(["petcare", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List { search: None }));
    }

    #[test]
    fn test_cli_requires_name_and_breed_for_add() {
        assert!(Cli::try_parse_from(["petcare", "add", "--name", "Browny"]).is_err());
    }

    #[tokio::test]
    async fn test_default_wiring_uses_memory_store() {
        let service = build_service(&PetcareConfig::default());

        let created = service
            .register_pet(PetProfile::new("Browny", "Labrador"))
            .await
            .unwrap();

        assert_eq!(service.repository().collection().name(), "petProfiles");
        assert_eq!(service.list_pets().await.unwrap(), vec![created]);
    }
}
