use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use availability_cell::{
    apply_min_notice, is_within_booking_window, AvailabilityQuery, AvailabilityService,
};
use booking_cell::{
    BookingAdmissionService, BookingInput, BookingResponse, CancelRequest, CancellationService,
};
use shared_config::SchedulingConfig;
use shared_database::{InMemoryRepository, SchedulingRepository};

#[derive(Parser)]
#[command(name = "quickschedule")]
#[command(version = "0.1.0")]
#[command(about = "Appointment availability and booking against a JSON seed file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists active providers
    Providers {
        #[arg(short, long)]
        seed: PathBuf,
    },
    /// Lists active appointment types, optionally only those a provider offers
    AppointmentTypes {
        #[arg(short, long)]
        seed: PathBuf,

        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Lists bookable start times for a provider, appointment type and date
    Availability {
        /// Seed file with providers, appointment types, bookings and blocked times
        #[arg(short, long)]
        seed: PathBuf,

        #[arg(short, long)]
        provider: String,

        #[arg(short, long)]
        appointment_type: String,

        /// YYYY-MM-DD
        #[arg(short, long)]
        date: String,

        /// Drop slots inside the minimum notice period and dates outside the booking window
        #[arg(long)]
        enforce_notice: bool,
    },
    /// Admits a booking request read from a JSON file
    Book {
        #[arg(short, long)]
        seed: PathBuf,

        /// Booking request JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Do not write the admitted booking back to the seed file
        #[arg(long)]
        dry_run: bool,
    },
    /// Cancels a booking with its cancel token
    Cancel {
        #[arg(short, long)]
        seed: PathBuf,

        #[arg(short, long)]
        booking: String,

        #[arg(short, long)]
        token: String,

        #[arg(short, long)]
        reason: Option<String>,

        /// Do not write the cancellation back to the seed file
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Logs go to stderr, stdout carries the JSON result
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SchedulingConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Providers { seed } => {
            let repository = load_repository(&seed).await?;
            print_json(&repository.find_active_providers().await?)
        }
        Commands::AppointmentTypes { seed, provider } => {
            let repository = load_repository(&seed).await?;
            print_json(
                &repository
                    .find_active_appointment_types(provider.as_deref())
                    .await?,
            )
        }
        Commands::Availability {
            seed,
            provider,
            appointment_type,
            date,
            enforce_notice,
        } => {
            let repository = load_repository(&seed).await?;
            availability(repository, config, provider, appointment_type, date, enforce_notice)
                .await
        }
        Commands::Book {
            seed,
            input,
            dry_run,
        } => {
            let repository = load_repository(&seed).await?;
            let response = book(repository.clone(), config, &input).await?;
            persist(&repository, &seed, &response, dry_run).await?;
            print_json(&response)
        }
        Commands::Cancel {
            seed,
            booking,
            token,
            reason,
            dry_run,
        } => {
            let repository = load_repository(&seed).await?;
            let response = cancel(
                repository.clone(),
                CancelRequest {
                    booking_id: booking,
                    token,
                    reason,
                },
            )
            .await?;
            persist(&repository, &seed, &response, dry_run).await?;
            print_json(&response)
        }
    }
}

async fn load_repository(seed: &Path) -> Result<Arc<InMemoryRepository>> {
    let repository = InMemoryRepository::from_seed_file(seed)
        .await
        .with_context(|| format!("failed to load seed file '{}'", seed.display()))?;
    info!("Loaded seed data from {}", seed.display());
    Ok(Arc::new(repository))
}

/// Writes the repository back to the seed file after a successful change.
async fn persist(
    repository: &InMemoryRepository,
    seed: &Path,
    response: &BookingResponse,
    dry_run: bool,
) -> Result<()> {
    if !response.success || dry_run {
        return Ok(());
    }
    repository
        .save_to_file(seed)
        .await
        .with_context(|| format!("failed to save seed file '{}'", seed.display()))?;
    info!("Saved changes to {}", seed.display());
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn availability(
    repository: Arc<InMemoryRepository>,
    config: SchedulingConfig,
    provider_id: String,
    appointment_type_id: String,
    date: String,
    enforce_notice: bool,
) -> Result<()> {
    let service = AvailabilityService::new(repository, config);
    let query = AvailabilityQuery::new(&provider_id, &appointment_type_id, &date);
    let mut result = service.check_availability(&query).await?;

    if enforce_notice {
        let now = Local::now().naive_local();
        let config = service.config();
        if is_within_booking_window(&result.date, config.booking_window, now.date())? {
            result = apply_min_notice(result, config.min_notice, now)?;
        } else {
            warn!(
                "{} is outside the {} day booking window",
                result.date, config.booking_window
            );
            result.available_slots.clear();
        }
    }

    print_json(&result)
}

async fn book(
    repository: Arc<InMemoryRepository>,
    config: SchedulingConfig,
    input: &Path,
) -> Result<BookingResponse> {
    let raw = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read booking request '{}'", input.display()))?;
    let request: BookingInput =
        serde_json::from_str(&raw).context("booking request is not valid JSON")?;

    let service = BookingAdmissionService::new(repository, config);
    Ok(BookingResponse::from_result(
        service.process_booking(request).await,
    )?)
}

async fn cancel(
    repository: Arc<InMemoryRepository>,
    request: CancelRequest,
) -> Result<BookingResponse> {
    let service = CancellationService::new(repository);
    let response = match service.cancel_booking(request).await {
        Ok(booking) => BookingResponse::cancelled(booking),
        Err(error) => BookingResponse::from_error(error)?,
    };
    Ok(response)
}
