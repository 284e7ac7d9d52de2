use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::error::{ReservationError, Result};

macro_rules! record_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(VenueId);
record_id!(FieldId);
record_id!(ReservationId);

/// Identity of a signed-in caller. Anonymous callers carry no `UserId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hour of the day, always within 0..=23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Hour(u8);

impl Hour {
    pub const SLOTS_PER_DAY: usize = 24;

    pub fn new(value: i64) -> Result<Self> {
        if (0..Self::SLOTS_PER_DAY as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ReservationError::InvalidHour { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Hour> {
        (0..Self::SLOTS_PER_DAY as u8).map(Hour)
    }
}

impl TryFrom<i64> for Hour {
    type Error = ReservationError;

    fn try_from(value: i64) -> Result<Self> {
        Hour::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub venue_id: VenueId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub field_id: FieldId,
    pub date: NaiveDate,
    pub hour: Hour,
    pub user: Option<UserId>,
}

impl Reservation {
    pub fn is_anonymous(&self) -> bool {
        self.user.is_none()
    }
}

/// Everything a store needs to persist a reservation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub field_id: FieldId,
    pub date: NaiveDate,
    pub hour: Hour,
    pub user: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_bounds() {
        assert_eq!(Hour::new(0).unwrap().value(), 0);
        assert_eq!(Hour::new(23).unwrap().value(), 23);
        assert!(matches!(
            Hour::new(24),
            Err(ReservationError::InvalidHour { value: 24 })
        ));
        assert!(matches!(
            Hour::try_from(-1),
            Err(ReservationError::InvalidHour { value: -1 })
        ));
    }

    #[test]
    fn test_hour_all_covers_day() {
        let hours: Vec<u8> = Hour::all().map(Hour::value).collect();
        assert_eq!(hours.len(), 24);
        assert_eq!(hours.first(), Some(&0));
        assert_eq!(hours.last(), Some(&23));
    }

    #[test]
    fn test_hour_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Hour>("7").is_ok());
        assert!(serde_json::from_str::<Hour>("31").is_err());
    }

    #[test]
    fn test_reservation_serializes_date_and_hour() {
        let reservation = Reservation {
            id: ReservationId(1),
            field_id: FieldId(2),
            date: NaiveDate::from_ymd_opt(2016, 6, 22).unwrap(),
            hour: Hour::new(1).unwrap(),
            user: None,
        };
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["date"], "2016-06-22");
        assert_eq!(json["hour"], 1);
        assert!(json["user"].is_null());
        assert!(reservation.is_anonymous());
    }
}
