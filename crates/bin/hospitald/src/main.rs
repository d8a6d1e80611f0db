//! # hospitald — hospital demo runner
//!
//! Composition root that wires the storage adapter into the seed sequences.
//!
//! ## Responsibilities
//! - Load configuration (`hospital.toml`, env vars)
//! - Install the tracing subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct the seeders, injecting repositories via port traits
//! - Run each enabled seeder once, print its report, and exit
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use hospital_adapter_storage_sqlite_sqlx::{
    SqliteAppointmentRepository, SqliteConsultationRepository, SqliteDoctorRepository,
    SqlitePatientRepository, SqliteRoleRepository, SqliteUserRepository,
};
use hospital_app::seed::{AccessSeeder, HospitalSeeder};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Database
    let db = hospital_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("opening database")?;
    let pool = db.pool().clone();
    tracing::info!(url = config.database_url(), "database ready");

    if config.seed.hospital_enabled {
        let seeder = HospitalSeeder::new(
            SqlitePatientRepository::new(pool.clone()),
            SqliteDoctorRepository::new(pool.clone()),
            SqliteAppointmentRepository::new(pool.clone()),
            SqliteConsultationRepository::new(pool.clone()),
        );
        let report = seeder.run().await.context("running hospital seed")?;
        println!("{report}");
    }

    if config.seed.access_enabled {
        let seeder = AccessSeeder::new(
            SqliteUserRepository::new(pool.clone()),
            SqliteRoleRepository::new(pool),
        );
        let report = seeder.run().await.context("running access seed")?;
        println!("{report}");
    }

    tracing::info!("seed complete");
    Ok(())
}
