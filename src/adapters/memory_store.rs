use crate::domain::model::{
    Field, FieldId, NewReservation, Reservation, ReservationId, Venue, VenueId,
};
use crate::domain::ports::RecordStore;
use crate::utils::error::{RecordKind, ReservationError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Plain record tables shared by the in-memory and file-backed stores.
///
/// Ids are allocated sequentially from 1 and never reused. Tables are keyed
/// by id, so every listing comes back in creation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    next_venue_id: u64,
    next_field_id: u64,
    next_reservation_id: u64,
    venues: BTreeMap<VenueId, Venue>,
    fields: BTreeMap<FieldId, Field>,
    reservations: BTreeMap<ReservationId, Reservation>,
}

fn allocate(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

impl StoreState {
    pub fn list_venues(&self) -> Vec<Venue> {
        self.venues.values().cloned().collect()
    }

    pub fn get_venue(&self, id: VenueId) -> Option<Venue> {
        self.venues.get(&id).cloned()
    }

    pub fn create_venue(&mut self, name: &str) -> Venue {
        let venue = Venue {
            id: VenueId(allocate(&mut self.next_venue_id)),
            name: name.to_string(),
        };
        self.venues.insert(venue.id, venue.clone());
        venue
    }

    pub fn list_fields(&self) -> Vec<Field> {
        self.fields.values().cloned().collect()
    }

    pub fn list_fields_for_venue(&self, venue_id: VenueId) -> Vec<Field> {
        self.fields
            .values()
            .filter(|field| field.venue_id == venue_id)
            .cloned()
            .collect()
    }

    pub fn get_field(&self, id: FieldId) -> Option<Field> {
        self.fields.get(&id).cloned()
    }

    pub fn create_field(&mut self, venue_id: VenueId, name: &str) -> Result<Field> {
        if !self.venues.contains_key(&venue_id) {
            return Err(ReservationError::not_found(RecordKind::Venue, venue_id));
        }
        let field = Field {
            id: FieldId(allocate(&mut self.next_field_id)),
            name: name.to_string(),
            venue_id,
        };
        self.fields.insert(field.id, field.clone());
        Ok(field)
    }

    pub fn query_reservations(&self, field_id: FieldId, date: NaiveDate) -> Vec<Reservation> {
        self.reservations
            .values()
            .filter(|r| r.field_id == field_id && r.date == date)
            .cloned()
            .collect()
    }

    pub fn list_reservations(&self) -> Vec<Reservation> {
        self.reservations.values().cloned().collect()
    }

    pub fn get_reservation(&self, id: ReservationId) -> Option<Reservation> {
        self.reservations.get(&id).cloned()
    }

    pub fn create_reservation(&mut self, new: NewReservation) -> Reservation {
        let reservation = Reservation {
            id: ReservationId(allocate(&mut self.next_reservation_id)),
            field_id: new.field_id,
            date: new.date,
            hour: new.hour,
            user: new.user,
        };
        self.reservations.insert(reservation.id, reservation.clone());
        reservation
    }

    pub fn delete_reservation(&mut self, id: ReservationId) -> bool {
        self.reservations.remove(&id).is_some()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: StoreState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_venues(&self) -> Result<Vec<Venue>> {
        Ok(self.state.lock().await.list_venues())
    }

    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>> {
        Ok(self.state.lock().await.get_venue(id))
    }

    async fn create_venue(&self, name: &str) -> Result<Venue> {
        Ok(self.state.lock().await.create_venue(name))
    }

    async fn list_fields(&self) -> Result<Vec<Field>> {
        Ok(self.state.lock().await.list_fields())
    }

    async fn list_fields_for_venue(&self, venue_id: VenueId) -> Result<Vec<Field>> {
        Ok(self.state.lock().await.list_fields_for_venue(venue_id))
    }

    async fn get_field(&self, id: FieldId) -> Result<Option<Field>> {
        Ok(self.state.lock().await.get_field(id))
    }

    async fn create_field(&self, venue_id: VenueId, name: &str) -> Result<Field> {
        self.state.lock().await.create_field(venue_id, name)
    }

    async fn query_reservations(
        &self,
        field_id: FieldId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        Ok(self.state.lock().await.query_reservations(field_id, date))
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        Ok(self.state.lock().await.list_reservations())
    }

    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.state.lock().await.get_reservation(id))
    }

    async fn create_reservation(&self, new: NewReservation) -> Result<Reservation> {
        Ok(self.state.lock().await.create_reservation(new))
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<bool> {
        Ok(self.state.lock().await.delete_reservation(id))
    }
}
