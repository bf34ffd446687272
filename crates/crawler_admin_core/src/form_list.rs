use crate::{ConfigField, CrawlTargetConfig, FieldErrors};

/// Stable identity of a record for the lifetime of a session. Unlike the
/// record's position, it survives removals of earlier records.
pub type RecordId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: RecordId,
    config: CrawlTargetConfig,
    errors: FieldErrors,
}

/// Ordered crawl targets, each paired with its own error map.
///
/// A config and its errors live in the same entry, so every insert or
/// removal moves both and the two sequences can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormListState {
    entries: Vec<Entry>,
    next_id: RecordId,
}

impl FormListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly fetched set of configs. Ids keep counting from
    /// where they were, so an id handed out before the swap never names a
    /// record loaded after it.
    pub fn replace_configs(&mut self, configs: impl IntoIterator<Item = CrawlTargetConfig>) {
        self.entries.clear();
        for config in configs {
            self.push(config);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn configs(&self) -> Vec<CrawlTargetConfig> {
        self.entries.iter().map(|e| e.config.clone()).collect()
    }

    pub fn errors(&self) -> Vec<FieldErrors> {
        self.entries.iter().map(|e| e.errors.clone()).collect()
    }

    pub fn config(&self, index: usize) -> Option<&CrawlTargetConfig> {
        self.entries.get(index).map(|e| &e.config)
    }

    pub fn errors_at(&self, index: usize) -> Option<&FieldErrors> {
        self.entries.get(index).map(|e| &e.errors)
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn id_at(&self, index: usize) -> Option<RecordId> {
        self.entries.get(index).map(|e| e.id)
    }

    pub fn index_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Replaces one field of one record and drops that field's error.
    /// Errors on other fields stay. Returns `false` for an unknown index.
    pub fn edit(&mut self, index: usize, field: ConfigField, value: impl Into<String>) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        entry.config.set(field, value);
        entry.errors.remove(field.as_str());
        true
    }

    /// Appends an empty record with an empty error map.
    pub fn add(&mut self) -> RecordId {
        self.push(CrawlTargetConfig::default())
    }

    /// Removes the record and its errors; later records shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<CrawlTargetConfig> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index).config)
    }

    pub fn clear_errors(&mut self) {
        for entry in &mut self.entries {
            entry.errors.clear();
        }
    }

    /// Replaces the error map of one record.
    pub fn set_errors(&mut self, index: usize, errors: FieldErrors) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.errors = errors;
                true
            }
            None => false,
        }
    }

    fn push(&mut self, config: CrawlTargetConfig) -> RecordId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Entry {
            id,
            config,
            errors: FieldErrors::new(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::FormListState;
    use crate::{ConfigField, CrawlTargetConfig};

    #[test]
    fn ids_are_not_reused_after_remove() {
        let mut list = FormListState::new();
        let a = list.add();
        let b = list.add();
        list.remove(1);
        let c = list.add();
        assert_ne!(b, c);
        assert_eq!(list.ids(), vec![a, c]);
    }

    #[test]
    fn replacing_configs_keeps_counting_ids() {
        let mut list = FormListState::new();
        let seed = list.add();
        list.replace_configs([CrawlTargetConfig::default(), CrawlTargetConfig::default()]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.index_of(seed), None);
        assert!(list.ids().iter().all(|id| *id > seed));
    }

    #[test]
    fn edit_out_of_range_is_rejected() {
        let mut list = FormListState::new();
        list.replace_configs([CrawlTargetConfig::default()]);
        assert!(!list.edit(3, ConfigField::Url, "x"));
        assert_eq!(list.configs(), vec![CrawlTargetConfig::default()]);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut list = FormListState::new();
        assert!(list.remove(0).is_none());
        assert!(list.is_empty());
    }
}
