use crate::domain::model::{FieldId, Hour, NewReservation, Reservation, UserId};
use crate::domain::ports::RecordStore;
use crate::utils::error::{RecordKind, ReservationError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What to do when a slot already holds a reservation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Write anyway. The slot map then shows whichever record the store
    /// returns last.
    #[default]
    AllowDuplicates,
    /// Fail with `SlotTaken`. Not atomic: two concurrent writers can still
    /// both pass the check.
    RejectDuplicates,
}

pub struct ReservationWriter<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    policy: SlotPolicy,
}

impl<'a, S: RecordStore + ?Sized> ReservationWriter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_policy(store, SlotPolicy::default())
    }

    pub fn with_policy(store: &'a S, policy: SlotPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn create(
        &self,
        field_id: FieldId,
        date: NaiveDate,
        hour: i64,
        user: Option<UserId>,
    ) -> Result<Reservation> {
        let hour = Hour::new(hour)?;

        if self.store.get_field(field_id).await?.is_none() {
            return Err(ReservationError::not_found(RecordKind::Field, field_id));
        }

        if self.policy == SlotPolicy::RejectDuplicates {
            let existing = self.store.query_reservations(field_id, date).await?;
            if existing.iter().any(|r| r.hour == hour) {
                return Err(ReservationError::SlotTaken {
                    field_id: field_id.to_string(),
                    date: date.to_string(),
                    hour: hour.value(),
                });
            }
        }

        let reservation = self
            .store
            .create_reservation(NewReservation {
                field_id,
                date,
                hour,
                user,
            })
            .await?;

        tracing::info!(
            "Reserved field {} on {} at {} (reservation #{}, user: {})",
            field_id,
            date,
            hour,
            reservation.id,
            reservation
                .user
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "anonymous".to_string())
        );

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::MemoryStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 6, 22).unwrap()
    }

    async fn store_with_field() -> (MemoryStore, FieldId) {
        let store = MemoryStore::new();
        let venue = store.create_venue("VenueFieldTest01").await.unwrap();
        let field = store
            .create_field(venue.id, "FieldReservationTest01")
            .await
            .unwrap();
        (store, field.id)
    }

    #[tokio::test]
    async fn test_create_stores_user_as_given() {
        let (store, field_id) = store_with_field().await;
        let writer = ReservationWriter::new(&store);

        let named = writer
            .create(field_id, date(), 8, Some(UserId::new("alice")))
            .await
            .unwrap();
        let anonymous = writer.create(field_id, date(), 9, None).await.unwrap();

        assert_eq!(named.user, Some(UserId::new("alice")));
        assert!(anonymous.is_anonymous());
        assert_eq!(store.list_reservations().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_hours_outside_day() {
        let (store, field_id) = store_with_field().await;
        let writer = ReservationWriter::new(&store);

        for hour in [-1, 24, 100] {
            let result = writer.create(field_id, date(), hour, None).await;
            assert!(matches!(result, Err(ReservationError::InvalidHour { value }) if value == hour));
        }
        assert!(store.list_reservations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_unknown_field_is_not_found() {
        let store = MemoryStore::new();
        let result = ReservationWriter::new(&store)
            .create(FieldId(99), date(), 5, None)
            .await;
        assert!(matches!(
            result,
            Err(ReservationError::NotFound {
                kind: RecordKind::Field,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_reject_duplicates_policy() {
        let (store, field_id) = store_with_field().await;
        let writer = ReservationWriter::with_policy(&store, SlotPolicy::RejectDuplicates);

        writer.create(field_id, date(), 5, None).await.unwrap();
        let second = writer.create(field_id, date(), 5, None).await;
        assert!(matches!(second, Err(ReservationError::SlotTaken { hour: 5, .. })));

        // same hour on another day is a different slot
        let next_day = date().succ_opt().unwrap();
        assert!(writer.create(field_id, next_day, 5, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_allow_duplicates_policy_writes_twice() {
        let (store, field_id) = store_with_field().await;
        let writer = ReservationWriter::new(&store);

        let first = writer.create(field_id, date(), 5, None).await.unwrap();
        let second = writer.create(field_id, date(), 5, None).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.query_reservations(field_id, date()).await.unwrap().len(), 2);
    }
}
