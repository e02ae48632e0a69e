use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::user_record::UserRecord;

/// Durable storage for the whole user record.
#[async_trait]
pub trait RecordBackend: Send + Sync {
    /// Returns Ok(None) if no record was ever saved
    async fn load(&self) -> Result<Option<UserRecord>>;

    async fn save(&self, record: &UserRecord) -> Result<()>;
}

/// In-memory copy of the user record backed by a [RecordBackend].
///
/// The record is loaded once when the store is opened and every read is served from memory.
/// Updates run as read-modify-write of the whole record while holding the lock, including the
/// write to the backend, so concurrent updates can't clobber each other's fields and the
/// backend always sees updates in the same order as the in-memory record.
pub struct RecordStore {
    record: Mutex<UserRecord>,
    backend: Box<dyn RecordBackend>,
}

impl RecordStore {
    pub async fn open(backend: impl RecordBackend + 'static) -> Result<Self> {
        let record = match backend.load().await? {
            Some(record) => record,
            None => {
                log::info!("No user record stored yet, starting with an empty one");
                UserRecord::default()
            }
        };
        Ok(Self::with_record(record, backend))
    }

    pub fn with_record(record: UserRecord, backend: impl RecordBackend + 'static) -> Self {
        Self {
            record: Mutex::new(record),
            backend: Box::new(backend),
        }
    }

    pub async fn read<R>(&self, f: impl FnOnce(&UserRecord) -> R) -> R {
        f(&*self.record.lock().await)
    }

    pub async fn snapshot(&self) -> UserRecord {
        self.read(UserRecord::clone).await
    }

    /// Applies `f` to the record and persists the entire record before returning.
    ///
    /// A failed write is logged but not returned. The in-memory record keeps the update, so it
    /// can be ahead of the persisted one until the next successful write.
    pub async fn update<R>(&self, f: impl FnOnce(&mut UserRecord) -> R) -> R {
        self.update_if_changed(|record| Change::Changed(f(record)))
            .await
            .into_inner()
    }

    /// Like [RecordStore::update], but `f` reports whether it changed the record and unchanged
    /// records aren't written.
    pub async fn update_if_changed<R>(
        &self,
        f: impl FnOnce(&mut UserRecord) -> Change<R>,
    ) -> Change<R> {
        let mut record = self.record.lock().await;
        let change = f(&mut *record);
        if change.is_changed() {
            if let Err(err) = self.backend.save(&record).await {
                log::error!(
                    "Failed to persist user record, keeping the update in memory only: {err:#}"
                );
            }
        }
        change
    }
}

/// Outcome of an update that may have left the record as it was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change<R> {
    Changed(R),
    Unchanged(R),
}

impl<R> Change<R> {
    pub fn is_changed(&self) -> bool {
        matches!(self, Change::Changed(_))
    }

    pub fn into_inner(self) -> R {
        match self {
            Change::Changed(value) | Change::Unchanged(value) => value,
        }
    }
}
