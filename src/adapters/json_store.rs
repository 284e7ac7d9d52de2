use crate::adapters::memory_store::StoreState;
use crate::domain::model::{
    Field, FieldId, NewReservation, Reservation, ReservationId, Venue, VenueId,
};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Record store persisted as a single JSON document.
///
/// The whole document is rewritten after each successful write while the
/// lock is held.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl JsonFileStore {
    /// Missing file means an empty store; the file is created on first write.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Store file {} does not exist yet, starting empty", path.display());
                StoreState::default()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Opened record store at {}", path.display());
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next document is written to before it replaces the store.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn persist(&self, state: &StoreState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(state)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, data).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn list_venues(&self) -> Result<Vec<Venue>> {
        Ok(self.state.lock().await.list_venues())
    }

    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>> {
        Ok(self.state.lock().await.get_venue(id))
    }

    async fn create_venue(&self, name: &str) -> Result<Venue> {
        let mut state = self.state.lock().await;
        let mut updated = state.clone();
        let venue = updated.create_venue(name);
        self.persist(&updated).await?;
        *state = updated;
        Ok(venue)
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
        let mut state = self.state.lock().await;
        let mut updated = state.clone();
        let field = updated.create_field(venue_id, name)?;
        self.persist(&updated).await?;
        *state = updated;
        Ok(field)
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
        let mut state = self.state.lock().await;
        let mut updated = state.clone();
        let reservation = updated.create_reservation(new);
        self.persist(&updated).await?;
        *state = updated;
        Ok(reservation)
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<bool> {
        let mut state = self.state.lock().await;
        let mut updated = state.clone();
        if !updated.delete_reservation(id) {
            return Ok(false);
        }
        self.persist(&updated).await?;
        *state = updated;
        Ok(true)
    }
}
