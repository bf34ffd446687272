use crate::view_model::{AppViewModel, Headline, RecordView};
use crate::{AppOptions, CrawlTargetConfig, FormListState, RecordId};

/// Process-wide scheduler switch; one flag governs every crawl target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerState {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    options: AppOptions,
    list: FormListState,
    scheduler: SchedulerState,
    saving: bool,
    pending_removal: Option<RecordId>,
    headline: Option<Headline>,
    dirty: bool,
}

impl AppState {
    /// Starts with one blank record, the same shape an empty load produces.
    pub fn new() -> Self {
        Self::with_options(AppOptions::default())
    }

    pub fn with_options(options: AppOptions) -> Self {
        let mut state = Self {
            options,
            ..Self::default()
        };
        state.ensure_one_record();
        state
    }

    pub fn options(&self) -> AppOptions {
        self.options
    }

    pub fn list(&self) -> &FormListState {
        &self.list
    }

    pub fn scheduler_enabled(&self) -> bool {
        self.scheduler.enabled
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn headline(&self) -> Option<&Headline> {
        self.headline.as_ref()
    }

    pub fn pending_removal(&self) -> Option<usize> {
        self.pending_removal.and_then(|id| self.list.index_of(id))
    }

    pub fn view(&self) -> AppViewModel {
        let errors = self.list.errors();
        let records = self
            .list
            .configs()
            .into_iter()
            .zip(errors)
            .enumerate()
            .map(|(index, (config, errors))| RecordView {
                index,
                config,
                errors,
            })
            .collect();
        AppViewModel {
            scheduler_enabled: self.scheduler.enabled,
            saving: self.saving,
            records,
            headline: self.headline.clone(),
            pending_removal: self.pending_removal(),
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn list_mut(&mut self) -> &mut FormListState {
        &mut self.list
    }

    pub(crate) fn replace_configs(&mut self, configs: Vec<CrawlTargetConfig>) {
        self.list.replace_configs(configs);
        self.pending_removal = None;
        self.ensure_one_record();
    }

    pub(crate) fn set_scheduler(&mut self, enabled: bool) {
        self.scheduler.enabled = enabled;
    }

    pub(crate) fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub(crate) fn set_headline(&mut self, headline: Option<Headline>) {
        self.headline = headline;
    }

    pub(crate) fn set_pending_removal(&mut self, record: Option<RecordId>) {
        self.pending_removal = record;
    }

    pub(crate) fn take_pending_removal(&mut self) -> Option<RecordId> {
        self.pending_removal.take()
    }

    /// The operator always has at least one form to type into.
    pub(crate) fn ensure_one_record(&mut self) {
        if self.list.is_empty() {
            self.list.add();
        }
    }
}
