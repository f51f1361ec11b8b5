use crate::core::csv_codec::{parse_csv, serialize_csv};
use crate::core::json_codec::{deserialize_json, serialize_json};
use crate::core::stats::Statistics;
use crate::core::store::RecordStore;
use crate::domain::model::{StudentDraft, StudentRecord};
use crate::domain::ports::{StoreEvent, Storage, SubscriptionId};
use crate::utils::error::{DataFormat, Result, RosterError};
use crate::utils::validation::{validate_draft, ValidationPolicy};

/// One editing session over a roster: the records, where they were last
/// saved, and whether there are unsaved changes.
///
/// Every action either completes or leaves the session exactly as it was.
pub struct RosterSession<S: Storage> {
    store: RecordStore,
    storage: S,
    policy: ValidationPolicy,
    current_path: Option<String>,
    modified: bool,
}

impl<S: Storage> RosterSession<S> {
    pub fn new(storage: S, policy: ValidationPolicy) -> Self {
        Self {
            store: RecordStore::new(),
            storage,
            policy,
            current_path: None,
            modified: false,
        }
    }

    pub fn records(&self) -> &[StudentRecord] {
        self.store.all()
    }

    pub fn record(&self, index: usize) -> Option<&StudentRecord> {
        self.store.get(index)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Validates the draft without storing anything.
    pub fn check(&self, draft: &StudentDraft) -> Result<StudentRecord> {
        validate_draft(draft, &self.policy)
    }

    pub fn add(&mut self, draft: &StudentDraft) -> Result<usize> {
        let record = self.check(draft)?;
        let index = self.store.add(record);
        self.modified = true;
        tracing::info!("Added student #{}", index);
        Ok(index)
    }

    pub fn edit(&mut self, index: usize, draft: &StudentDraft) -> Result<()> {
        if index >= self.store.len() {
            return Err(RosterError::IndexOutOfRange {
                index,
                len: self.store.len(),
            });
        }
        let record = self.check(draft)?;
        self.store.update(index, record)?;
        self.modified = true;
        tracing::info!("Updated student #{}", index);
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<StudentRecord> {
        let removed = self.store.remove(index)?;
        self.modified = true;
        tracing::info!("Deleted student #{} ({} {})", index, removed.last_name, removed.first_name);
        Ok(removed)
    }

    /// Writes the roster as JSON and makes `path` the current file.
    pub fn save(&mut self, path: &str) -> Result<()> {
        let json = serialize_json(self.store.all())?;
        self.storage.write_file(path, json.as_bytes())?;
        self.current_path = Some(path.to_string());
        self.modified = false;
        tracing::info!("Saved {} students to {}", self.store.len(), path);
        Ok(())
    }

    /// Saves to the current file. Fails when nothing has been saved or loaded
    /// yet; the caller has to ask for a path in that case.
    pub fn save_current(&mut self) -> Result<()> {
        let path = self
            .current_path
            .clone()
            .ok_or_else(|| RosterError::config("No file chosen yet; choose where to save the roster"))?;
        self.save(&path)
    }

    pub fn load(&mut self, path: &str) -> Result<()> {
        let text = self.read_text(path, DataFormat::Json)?;
        let records = deserialize_json(&text)?;
        let count = records.len();
        self.store.replace_all(records);
        self.current_path = Some(path.to_string());
        self.modified = false;
        tracing::info!("Loaded {} students from {}", count, path);
        Ok(())
    }

    /// Exporting does not count as saving: the modified flag is untouched.
    pub fn export_csv(&self, path: &str) -> Result<()> {
        let csv = serialize_csv(self.store.all())?;
        self.storage.write_file(path, csv.as_bytes())?;
        tracing::info!("Exported {} students to {}", self.store.len(), path);
        Ok(())
    }

    /// Replaces the roster with the rows of a CSV file. The imported data is
    /// not yet saved, so the session becomes modified.
    pub fn import_csv(&mut self, path: &str) -> Result<usize> {
        let text = self.read_text(path, DataFormat::Csv)?;
        let records = parse_csv(&text)?;
        let count = records.len();
        self.store.replace_all(records);
        self.modified = true;
        tracing::info!("Imported {} students from {}", count, path);
        Ok(count)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_records(self.store.all())
    }

    fn read_text(&self, path: &str, format: DataFormat) -> Result<String> {
        let bytes = self.storage.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| RosterError::parse(format, format!("{} is not UTF-8: {}", path, e)))
    }
}
