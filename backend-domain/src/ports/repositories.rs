use async_trait::async_trait;

use crate::entities::{AttendanceRecord, EventRecord};
use crate::value_objects::EventId;

/// What an append-if-absent actually did. `AlreadyPresent` is a success
/// from the store's point of view — the set-union semantics held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Committed,
    AlreadyPresent,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn get(&self, id: &EventId) -> anyhow::Result<Option<EventRecord>>;

    /// Atomic set-union append keyed on the record's student id. Two
    /// concurrent scans for the same student must result in at most one
    /// stored record; the append must never be a client-side
    /// read-modify-write race.
    async fn append_attendee_if_absent(
        &self,
        id: &EventId,
        record: AttendanceRecord,
    ) -> anyhow::Result<AppendOutcome>;
}
