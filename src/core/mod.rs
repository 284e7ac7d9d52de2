pub mod date_navigator;
pub mod engine;
pub mod reservation_writer;
pub mod slot_resolver;

pub use crate::domain::model::{Field, FieldId, Hour, Reservation, ReservationId, UserId, Venue, VenueId};
pub use crate::domain::ports::{Clock, RecordStore};
pub use crate::utils::error::Result;
