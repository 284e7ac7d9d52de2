use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid hour {value}: must be between 0 and 23")]
    InvalidHour { value: i64 },

    #[error("Slot {hour}:00 on {date} is already reserved for field {field_id}")]
    SlotTaken {
        field_id: String,
        date: String,
        hour: u8,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error in '{field}': {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Venue,
    Field,
    Reservation,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordKind::Venue => "Venue",
            RecordKind::Field => "Field",
            RecordKind::Reservation => "Reservation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Referenced record does not exist
    Lookup,
    /// Malformed caller input
    Input,
    /// Slot already occupied
    Conflict,
    /// Backing store failure
    Storage,
    Configuration,
}

impl ReservationError {
    pub fn not_found(kind: RecordKind, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::InvalidDate { .. } | Self::InvalidHour { .. } | Self::ValidationError { .. } => {
                ErrorCategory::Input
            }
            Self::SlotTaken { .. } => ErrorCategory::Conflict,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { kind, id } => format!("{} #{} does not exist", kind, id),
            Self::InvalidDate { value } => format!("'{}' is not a valid date", value),
            Self::InvalidHour { value } => format!("{} is not a valid hour of the day", value),
            Self::SlotTaken { hour, date, .. } => {
                format!("The {:02}:00 slot on {} is already taken", hour, date)
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "The reservation store could not be read or written".to_string()
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ValidationError { field, message } => format!("{}: {}", field, message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => "List the available records and use an existing id",
            ErrorCategory::Input => "Use dates in YYYY-MM-DD form and hours from 0 to 23",
            ErrorCategory::Conflict => "Pick a free slot from the field view",
            ErrorCategory::Storage => "Check that the store file exists, is writable and holds valid JSON",
            ErrorCategory::Configuration => "Fix the configuration file or the command line overrides",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
