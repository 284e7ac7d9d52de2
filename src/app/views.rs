use crate::core::date_navigator::format_date;
use crate::core::engine::{FieldDetail, Redirect, VenueDetail};
use crate::domain::model::{Field, FieldId, Hour, Reservation, ReservationId, Venue, VenueId};
use chrono::NaiveDate;
use std::fmt::{self, Write};

/// Addressable pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Index,
    Venues,
    VenueDetail(VenueId),
    FieldDetail {
        field_id: FieldId,
        date: Option<NaiveDate>,
    },
    Reserve {
        field_id: FieldId,
        date: Option<NaiveDate>,
        hour: Hour,
    },
    Reservations,
    ReservationDetail(ReservationId),
    ReservationDelete(ReservationId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Index => write!(f, "/"),
            Location::Venues => write!(f, "/venues/"),
            Location::VenueDetail(id) => write!(f, "/venues/{}/", id),
            Location::FieldDetail { field_id, date } => match date {
                Some(date) => write!(f, "/fields/{}/{}/", field_id, format_date(*date)),
                None => write!(f, "/fields/{}/", field_id),
            },
            Location::Reserve {
                field_id,
                date,
                hour,
            } => match date {
                Some(date) => write!(
                    f,
                    "/fields/{}/{}/reserve/{}/",
                    field_id,
                    format_date(*date),
                    hour.value()
                ),
                None => write!(f, "/fields/{}/reserve/{}/", field_id, hour.value()),
            },
            Location::Reservations => write!(f, "/reservations/"),
            Location::ReservationDetail(id) => write!(f, "/reservations/{}/", id),
            Location::ReservationDelete(id) => write!(f, "/reservations/{}/delete/", id),
        }
    }
}

impl From<Redirect> for Location {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::FieldDetail { field_id, date } => Location::FieldDetail { field_id, date },
            Redirect::Reservations => Location::Reservations,
        }
    }
}

fn user_label(reservation: &Reservation) -> String {
    reservation
        .user
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "anonymous".to_string())
}

pub fn render_field_index(fields: &[Field]) -> String {
    let mut out = String::from("Reservations\n");
    if fields.is_empty() {
        out.push_str("No fields yet.\n");
    }
    for field in fields {
        let _ = writeln!(
            out,
            "  {}  {}",
            field.name,
            Location::FieldDetail {
                field_id: field.id,
                date: None
            }
        );
    }
    out
}

pub fn render_venues(venues: &[Venue]) -> String {
    let mut out = String::from("Venues\n");
    if venues.is_empty() {
        out.push_str("No venues yet.\n");
    }
    for venue in venues {
        let _ = writeln!(out, "  {}  {}", venue.name, Location::VenueDetail(venue.id));
    }
    out
}

pub fn render_venue_detail(detail: &VenueDetail) -> String {
    let mut out = format!("Venue: {}\n", detail.venue.name);
    if detail.fields.is_empty() {
        out.push_str("No fields yet.\n");
    }
    for field in &detail.fields {
        let _ = writeln!(
            out,
            "  {}  {}",
            field.name,
            Location::FieldDetail {
                field_id: field.id,
                date: None
            }
        );
    }
    out
}

pub fn render_field_detail(detail: &FieldDetail) -> String {
    let field_id = detail.field.id;
    let mut out = format!(
        "Reservations for {} on {}\n",
        detail.field.name,
        detail.nav.current_str()
    );
    let _ = writeln!(
        out,
        "  previous: {}  next: {}",
        Location::FieldDetail {
            field_id,
            date: Some(detail.nav.previous)
        },
        Location::FieldDetail {
            field_id,
            date: Some(detail.nav.next)
        }
    );

    for (hour, slot) in detail.slots.iter() {
        match slot {
            Some(reservation) => {
                let _ = writeln!(
                    out,
                    "  {}  reserved by {}  {}",
                    hour,
                    user_label(reservation),
                    Location::ReservationDetail(reservation.id)
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "  {}  free  {}",
                    hour,
                    Location::Reserve {
                        field_id,
                        date: Some(detail.nav.current),
                        hour
                    }
                );
            }
        }
    }
    out
}

pub fn render_reservations(reservations: &[Reservation]) -> String {
    let mut out = String::from("Reservations\n");
    if reservations.is_empty() {
        out.push_str("No reservations yet.\n");
    }
    for reservation in reservations {
        let _ = writeln!(
            out,
            "  #{}  field {}  {} {}  {}  {}",
            reservation.id,
            reservation.field_id,
            format_date(reservation.date),
            reservation.hour,
            user_label(reservation),
            Location::ReservationDetail(reservation.id)
        );
    }
    out
}

pub fn render_reservation(reservation: &Reservation) -> String {
    let mut out = format!("Reservation #{}\n", reservation.id);
    let _ = writeln!(
        out,
        "  field: {}",
        Location::FieldDetail {
            field_id: reservation.field_id,
            date: Some(reservation.date)
        }
    );
    let _ = writeln!(out, "  date:  {}", format_date(reservation.date));
    let _ = writeln!(out, "  hour:  {}", reservation.hour);
    let _ = writeln!(out, "  user:  {}", user_label(reservation));
    let _ = writeln!(out, "  delete: {}", Location::ReservationDelete(reservation.id));
    out
}
