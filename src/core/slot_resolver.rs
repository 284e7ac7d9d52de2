use crate::domain::model::{FieldId, Hour, Reservation};
use crate::domain::ports::RecordStore;
use crate::utils::error::{RecordKind, ReservationError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Occupancy of one field on one date: one entry per hour, 0 through 23.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotMap {
    slots: Vec<Option<Reservation>>,
}

impl SlotMap {
    pub fn empty() -> Self {
        Self {
            slots: vec![None; Hour::SLOTS_PER_DAY],
        }
    }

    /// Later reservations for the same hour replace earlier ones.
    pub fn from_reservations(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        let mut map = Self::empty();
        for reservation in reservations {
            let index = reservation.hour.index();
            if let Some(previous) = &map.slots[index] {
                tracing::warn!(
                    "Duplicate reservation for field {} on {} at {}: #{} shadows #{}",
                    reservation.field_id,
                    reservation.date,
                    reservation.hour,
                    reservation.id,
                    previous.id
                );
            }
            map.slots[index] = Some(reservation);
        }
        map
    }

    pub fn get(&self, hour: Hour) -> Option<&Reservation> {
        self.slots[hour.index()].as_ref()
    }

    pub fn is_free(&self, hour: Hour) -> bool {
        self.get(hour).is_none()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no hour holds a reservation.
    pub fn all_free(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Hour, Option<&Reservation>)> {
        Hour::all().zip(self.slots.iter().map(Option::as_ref))
    }

    pub fn free_hours(&self) -> Vec<Hour> {
        self.iter()
            .filter(|(_, slot)| slot.is_none())
            .map(|(hour, _)| hour)
            .collect()
    }
}

impl Default for SlotMap {
    fn default() -> Self {
        Self::empty()
    }
}

pub struct SlotResolver<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> SlotResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, field_id: FieldId, date: NaiveDate) -> Result<SlotMap> {
        if self.store.get_field(field_id).await?.is_none() {
            return Err(ReservationError::not_found(RecordKind::Field, field_id));
        }

        self.resolve_field(field_id, date).await
    }

    /// Same as `resolve` for a field the caller has already loaded.
    pub async fn resolve_field(&self, field_id: FieldId, date: NaiveDate) -> Result<SlotMap> {
        let reservations = self.store.query_reservations(field_id, date).await?;
        tracing::debug!(
            "Resolved {} reservations for field {} on {}",
            reservations.len(),
            field_id,
            date
        );

        Ok(SlotMap::from_reservations(reservations))
    }
}
