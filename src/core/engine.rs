use crate::core::date_navigator::{DateNav, DateNavigator};
use crate::core::reservation_writer::{ReservationWriter, SlotPolicy};
use crate::core::slot_resolver::{SlotMap, SlotResolver};
use crate::domain::model::{Field, FieldId, Reservation, ReservationId, UserId, Venue, VenueId};
use crate::domain::ports::{Clock, RecordStore};
use crate::utils::error::{RecordKind, ReservationError, Result};
use crate::utils::validation::validate_non_empty_string;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// Where the caller should be sent after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Redirect {
    /// Field view; `date` is only set when the caller asked for one explicitly.
    FieldDetail {
        field_id: FieldId,
        date: Option<NaiveDate>,
    },
    Reservations,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub venue: Venue,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDetail {
    pub field: Field,
    /// Date string exactly as requested, `None` for today.
    pub requested_date: Option<String>,
    pub nav: DateNav,
    pub slots: SlotMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReserveOutcome {
    pub reservation: Reservation,
    pub redirect: Redirect,
}

pub struct ReservationEngine<S: RecordStore, C: Clock> {
    store: Arc<S>,
    clock: C,
    policy: SlotPolicy,
}

impl<S: RecordStore, C: Clock> ReservationEngine<S, C> {
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self::with_policy(store, clock, SlotPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, clock: C, policy: SlotPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> DateNavigator<'_, C> {
        DateNavigator::new(&self.clock)
    }

    pub async fn field_index(&self) -> Result<Vec<Field>> {
        self.store.list_fields().await
    }

    pub async fn venues(&self) -> Result<Vec<Venue>> {
        self.store.list_venues().await
    }

    pub async fn venue_detail(&self, venue_id: VenueId) -> Result<VenueDetail> {
        let venue = self
            .store
            .get_venue(venue_id)
            .await?
            .ok_or_else(|| ReservationError::not_found(RecordKind::Venue, venue_id))?;
        let fields = self.store.list_fields_for_venue(venue_id).await?;
        Ok(VenueDetail { venue, fields })
    }

    pub async fn add_venue(&self, name: &str) -> Result<Venue> {
        validate_non_empty_string("venue.name", name)?;
        let venue = self.store.create_venue(name.trim()).await?;
        tracing::info!("Created venue #{} '{}'", venue.id, venue.name);
        Ok(venue)
    }

    pub async fn add_field(&self, venue_id: VenueId, name: &str) -> Result<Field> {
        validate_non_empty_string("field.name", name)?;
        let field = self.store.create_field(venue_id, name.trim()).await?;
        tracing::info!(
            "Created field #{} '{}' in venue #{}",
            field.id,
            field.name,
            venue_id
        );
        Ok(field)
    }

    /// Slot occupancy for one field; `None` means today.
    pub async fn slots(&self, field_id: FieldId, date: Option<&str>) -> Result<SlotMap> {
        let date = self.navigator().resolve_date(date)?;
        SlotResolver::new(self.store.as_ref()).resolve(field_id, date).await
    }

    pub async fn field_detail(&self, field_id: FieldId, date: Option<&str>) -> Result<FieldDetail> {
        let field = self
            .store
            .get_field(field_id)
            .await?
            .ok_or_else(|| ReservationError::not_found(RecordKind::Field, field_id))?;
        let nav = self.navigator().navigate(date)?;
        let slots = SlotResolver::new(self.store.as_ref())
            .resolve_field(field.id, nav.current)
            .await?;

        Ok(FieldDetail {
            field,
            requested_date: date.map(str::to_string),
            nav,
            slots,
        })
    }

    pub async fn reserve(
        &self,
        field_id: FieldId,
        date: Option<&str>,
        hour: i64,
        user: Option<UserId>,
    ) -> Result<ReserveOutcome> {
        let resolved = self.navigator().resolve_date(date)?;
        let reservation = ReservationWriter::with_policy(self.store.as_ref(), self.policy)
            .create(field_id, resolved, hour, user)
            .await?;

        Ok(ReserveOutcome {
            reservation,
            redirect: Redirect::FieldDetail {
                field_id,
                date: date.map(|_| resolved),
            },
        })
    }

    pub async fn reservations(&self) -> Result<Vec<Reservation>> {
        self.store.list_reservations().await
    }

    pub async fn reservation_detail(&self, id: ReservationId) -> Result<Reservation> {
        self.store
            .get_reservation(id)
            .await?
            .ok_or_else(|| ReservationError::not_found(RecordKind::Reservation, id))
    }

    pub async fn delete_reservation(&self, id: ReservationId) -> Result<Redirect> {
        if !self.store.delete_reservation(id).await? {
            return Err(ReservationError::not_found(RecordKind::Reservation, id));
        }
        tracing::info!("Deleted reservation #{}", id);
        Ok(Redirect::Reservations)
    }
}
