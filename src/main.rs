use anyhow::Context;
use clap::Parser;
use field_reservations::app::views::{self, Location};
use field_reservations::config::{AppConfig, CliConfig, Command};
use field_reservations::domain::model::{FieldId, ReservationId, UserId, VenueId};
use field_reservations::utils::error::ErrorCategory;
use field_reservations::utils::{logger, validation::Validate};
use field_reservations::{JsonFileStore, ReservationEngine, ReservationError, SystemClock};
use std::sync::Arc;

type Engine = ReservationEngine<JsonFileStore, SystemClock>;

async fn execute(engine: &Engine, command: Command) -> Result<String, ReservationError> {
    let output = match command {
        Command::Fields => views::render_field_index(&engine.field_index().await?),
        Command::Venues => views::render_venues(&engine.venues().await?),
        Command::Venue { venue_id } => {
            views::render_venue_detail(&engine.venue_detail(VenueId(venue_id)).await?)
        }
        Command::AddVenue { name } => {
            let venue = engine.add_venue(&name).await?;
            format!("Created venue '{}' at {}\n", venue.name, Location::VenueDetail(venue.id))
        }
        Command::AddField { venue_id, name } => {
            let field = engine.add_field(VenueId(venue_id), &name).await?;
            let location = Location::FieldDetail {
                field_id: field.id,
                date: None,
            };
            format!("Created field '{}' at {}\n", field.name, location)
        }
        Command::Field { field_id, date } => {
            views::render_field_detail(&engine.field_detail(FieldId(field_id), date.as_deref()).await?)
        }
        Command::Reserve {
            field_id,
            hour,
            date,
            user,
        } => {
            let outcome = engine
                .reserve(FieldId(field_id), date.as_deref(), hour, user.map(UserId))
                .await?;
            format!(
                "Reserved {} (#{}), see {}\n",
                outcome.reservation.hour,
                outcome.reservation.id,
                Location::from(outcome.redirect)
            )
        }
        Command::Reservations => views::render_reservations(&engine.reservations().await?),
        Command::Reservation { reservation_id } => views::render_reservation(
            &engine.reservation_detail(ReservationId(reservation_id)).await?,
        ),
        Command::Delete { reservation_id } => {
            let redirect = engine.delete_reservation(ReservationId(reservation_id)).await?;
            format!(
                "Deleted reservation #{}, see {}\n",
                reservation_id,
                Location::from(redirect)
            )
        }
    };
    Ok(output)
}

fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Lookup => 4,
        ErrorCategory::Input | ErrorCategory::Conflict => 2,
        ErrorCategory::Storage => 3,
        ErrorCategory::Configuration => 1,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config file '{}'", cli.config))?;
    cli.apply_overrides(&mut config);

    // 初始化日誌
    logger::init_logger(cli.verbose, &config.logging.level, config.logging.format);
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(e.category()));
    }

    let store = JsonFileStore::open(&config.store.path)
        .await
        .with_context(|| format!("failed to open record store '{}'", config.store.path))?;
    let engine = ReservationEngine::with_policy(Arc::new(store), SystemClock, config.slot_policy());

    match execute(&engine, cli.command).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.category()));
        }
    }
}
