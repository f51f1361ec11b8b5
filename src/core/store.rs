use crate::domain::model::StudentRecord;
use crate::domain::ports::{StoreEvent, SubscriptionId};
use crate::utils::error::{Result, RosterError};

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Ordered in-memory collection of records. Position is the only identity a
/// record has; the store never reorders itself.
#[derive(Default)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record the caller has already validated. Returns its index.
    pub fn add(&mut self, record: StudentRecord) -> usize {
        self.records.push(record);
        let index = self.records.len() - 1;
        self.notify(StoreEvent::Added { index });
        index
    }

    pub fn update(&mut self, index: usize, record: StudentRecord) -> Result<()> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(RosterError::IndexOutOfRange { index, len })?;
        *slot = record;
        self.notify(StoreEvent::Updated { index });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<StudentRecord> {
        if index >= self.records.len() {
            return Err(RosterError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        self.notify(StoreEvent::Removed { index });
        Ok(removed)
    }

    /// Swaps in a whole new collection. No validation happens here.
    pub fn replace_all(&mut self, records: Vec<StudentRecord>) {
        self.records = records;
        let count = self.records.len();
        self.notify(StoreEvent::Replaced { count });
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        tracing::debug!("Store changed: {:?}", event);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
