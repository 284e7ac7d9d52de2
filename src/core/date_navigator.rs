use crate::domain::ports::Clock;
use crate::utils::error::{ReservationError, Result};
use chrono::NaiveDate;
use serde::Serialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let invalid = || ReservationError::InvalidDate {
        value: value.to_string(),
    };
    // chrono tolerates signs, spaces and unpadded fields; routes carry none of them
    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The requested day together with its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateNav {
    pub current: NaiveDate,
    pub previous: NaiveDate,
    pub next: NaiveDate,
}

impl DateNav {
    pub fn around(current: NaiveDate) -> Result<Self> {
        let out_of_range = || ReservationError::InvalidDate {
            value: format_date(current),
        };
        Ok(Self {
            current,
            previous: current.pred_opt().ok_or_else(out_of_range)?,
            next: current.succ_opt().ok_or_else(out_of_range)?,
        })
    }

    pub fn current_str(&self) -> String {
        format_date(self.current)
    }

    pub fn previous_str(&self) -> String {
        format_date(self.previous)
    }

    pub fn next_str(&self) -> String {
        format_date(self.next)
    }
}

pub struct DateNavigator<'a, C: Clock + ?Sized> {
    clock: &'a C,
}

impl<'a, C: Clock + ?Sized> DateNavigator<'a, C> {
    pub fn new(clock: &'a C) -> Self {
        Self { clock }
    }

    /// Absent means today.
    pub fn resolve_date(&self, requested: Option<&str>) -> Result<NaiveDate> {
        match requested {
            Some(value) => parse_date(value),
            None => Ok(self.clock.today()),
        }
    }

    pub fn navigate(&self, requested: Option<&str>) -> Result<DateNav> {
        DateNav::around(self.resolve_date(requested)?)
    }
}
