use std::env;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_cell::services::directory::DirectoryService;
use scheduling_cell::services::availability::{short_day_name, AvailabilityCalculator};
use scheduling_cell::services::clock::{Clock, SystemClock};
use shared_api::HimsClient;
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::from_env();
    if !config.is_configured() {
        bail!("HIMS_API_URL is not set");
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("doctors") => list_doctors(&config).await,
        Some("availability") => {
            let doctor_id = args
                .get(1)
                .context("usage: hims-cli availability <doctor-id>")?;
            show_availability(&config, doctor_id).await
        }
        _ => {
            eprintln!("usage: hims-cli <doctors | availability <doctor-id>>");
            Ok(())
        }
    }
}

/// Print the doctor directory with the days each doctor consults.
async fn list_doctors(config: &AppConfig) -> Result<()> {
    let client = Arc::new(HimsClient::new(config));
    let directory = DirectoryService::new(client);

    let doctors = directory.get_doctors().await?;
    info!("Fetched {} doctors", doctors.len());

    for doctor in &doctors {
        let days: Vec<&str> = doctor
            .available_days
            .iter()
            .map(|d| short_day_name(d))
            .collect();
        println!(
            "{}  {} ({})  [{}]",
            doctor.id,
            doctor.full_name,
            doctor.specialization,
            days.join(", ")
        );
    }
    Ok(())
}

/// Print the bookable dates for one doctor over the configured horizon.
async fn show_availability(config: &AppConfig, doctor_id: &str) -> Result<()> {
    let client = Arc::new(HimsClient::new(config));
    let directory = DirectoryService::new(client);

    let doctors = directory.get_doctors().await?;
    let doctor = doctors
        .iter()
        .find(|d| d.id == doctor_id)
        .with_context(|| format!("No doctor with id {}", doctor_id))?;

    let calculator = AvailabilityCalculator::new(config);
    let now = SystemClock.now();
    let dates: Vec<NaiveDate> = calculator.compute_available_dates(doctor, now);

    println!("{} is bookable on:", doctor.full_name);
    for date in &dates {
        println!("  {}", date.format("%Y-%m-%d (%A)"));
    }
    if dates.is_empty() {
        println!("  no dates in the next {} days", config.availability_horizon_days);
    }
    Ok(())
}
