use crate::domain::model::{
    Field, FieldId, NewReservation, Reservation, ReservationId, Venue, VenueId,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence for venues, fields and reservations.
///
/// Lookups return `Ok(None)` for missing records; callers decide whether that
/// is an error. `Err` is reserved for backend failures.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_venues(&self) -> Result<Vec<Venue>>;
    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>>;
    async fn create_venue(&self, name: &str) -> Result<Venue>;

    async fn list_fields(&self) -> Result<Vec<Field>>;
    async fn list_fields_for_venue(&self, venue_id: VenueId) -> Result<Vec<Field>>;
    async fn get_field(&self, id: FieldId) -> Result<Option<Field>>;
    /// Fails with NotFound when the venue does not exist.
    async fn create_field(&self, venue_id: VenueId, name: &str) -> Result<Field>;

    /// Reservations of one field on one date, in no guaranteed order.
    async fn query_reservations(&self, field_id: FieldId, date: NaiveDate)
        -> Result<Vec<Reservation>>;
    async fn list_reservations(&self) -> Result<Vec<Reservation>>;
    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>>;
    async fn create_reservation(&self, new: NewReservation) -> Result<Reservation>;
    /// Returns whether a record was removed.
    async fn delete_reservation(&self, id: ReservationId) -> Result<bool>;
}

pub trait Clock: Send + Sync {
    /// Today's date in the server's local time zone.
    fn today(&self) -> NaiveDate;
}
