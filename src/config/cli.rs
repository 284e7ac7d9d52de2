use crate::config::toml_config::AppConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "reservations")]
#[command(about = "Browse venues and fields, and reserve hourly slots")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "reservations.toml")]
    pub config: String,

    /// Override the record store path from config
    #[arg(long)]
    pub store: Option<String>,

    /// Refuse reservations for slots that are already taken
    #[arg(long)]
    pub strict_slots: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every field
    Fields,
    /// List every venue
    Venues,
    /// Show a venue and its fields
    Venue { venue_id: u64 },
    /// Create a venue
    AddVenue { name: String },
    /// Create a field inside a venue
    AddField { venue_id: u64, name: String },
    /// Show the 24 hourly slots of a field
    Field {
        field_id: u64,
        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Reserve one hourly slot
    Reserve {
        field_id: u64,
        #[arg(allow_negative_numbers = true)]
        hour: i64,
        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Attribute the reservation to a user, anonymous when omitted
        #[arg(long)]
        user: Option<String>,
    },
    /// List every reservation
    Reservations,
    /// Show one reservation
    Reservation { reservation_id: u64 },
    /// Delete one reservation
    Delete { reservation_id: u64 },
}

impl CliConfig {
    /// Command line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(store) = &self.store {
            config.store.path = store.clone();
        }
        if self.strict_slots {
            config.reservations.enforce_unique_slots = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reservation_writer::SlotPolicy;

    #[test]
    fn test_parse_reserve_with_negative_hour() {
        let cli = CliConfig::try_parse_from(["reservations", "reserve", "1", "-1"]).unwrap();
        match cli.command {
            Command::Reserve { field_id, hour, date, user } => {
                assert_eq!(field_id, 1);
                assert_eq!(hour, -1);
                assert!(date.is_none());
                assert!(user.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_win_over_file() {
        let cli = CliConfig::try_parse_from([
            "reservations",
            "--store",
            "/tmp/other.json",
            "--strict-slots",
            "venues",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.store.path, "/tmp/other.json");
        assert_eq!(config.slot_policy(), SlotPolicy::RejectDuplicates);
    }
}
