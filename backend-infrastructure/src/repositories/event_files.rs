use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use backend_domain::ports::EventRepository;
use backend_domain::{AppendOutcome, AttendanceRecord, EventId, EventRecord, StoreConfig};

/// Document-per-event JSON store. Appends are serialized behind one lock
/// and written atomically (temp file + rename), with the record version
/// bumped per commit, so `append_attendee_if_absent` is a true set-union
/// on student id for every caller of this engine instance.
pub struct FileEventRepository {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileEventRepository {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            root: PathBuf::from(&config.events_dir),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Seed a new event document. Admin-side only; refuses to clobber an
    /// existing event.
    pub async fn insert_event(&self, event: &EventRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.event_path(&event.id)?;
        if path.exists() {
            bail!("event '{}' already exists", event.id.as_str());
        }
        self.ensure_dir().await?;
        self.write_document(&path, event).await
    }

    fn event_path(&self, id: &EventId) -> Result<PathBuf> {
        let raw = id.as_str();
        let safe = !raw.is_empty()
            && raw
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if !safe {
            bail!("event id '{}' is not storable", raw);
        }
        Ok(self.root.join(format!("{raw}.json")))
    }

    async fn read_event(&self, path: &Path) -> Result<Option<EventRecord>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let event: EventRecord = serde_json::from_str(&content)?;
        Ok(Some(event))
    }

    async fn write_document(&self, path: &Path, event: &EventRecord) -> Result<()> {
        let content = serde_json::to_string_pretty(event)?;
        let tmp = path.with_extension(format!("json.tmp-{}", Uuid::new_v4()));
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl EventRepository for FileEventRepository {
    async fn get(&self, id: &EventId) -> Result<Option<EventRecord>> {
        let path = self.event_path(id)?;
        self.read_event(&path).await
    }

    async fn append_attendee_if_absent(
        &self,
        id: &EventId,
        record: AttendanceRecord,
    ) -> Result<AppendOutcome> {
        let _guard = self.write_lock.lock().await;
        let path = self.event_path(id)?;
        let mut event = self
            .read_event(&path)
            .await?
            .ok_or_else(|| anyhow!("event '{}' not found", id.as_str()))?;

        if event.has_attendee(&record.student_id) {
            return Ok(AppendOutcome::AlreadyPresent);
        }

        event.attendees.push(record);
        event.version += 1;
        self.write_document(&path, &event).await?;
        Ok(AppendOutcome::Committed)
    }
}
