use crate::reconcile::{reconcile, split_test_messages};
use crate::view_model::Headline;
use crate::{
    AppState, Effect, Msg, RecordId, ResultBinding, SaveOutcome, SchedulerPolicy, TestOutcome,
    WireErrorPayload,
};

pub const SAVED_TEXT: &str = "Saved.";
pub const SAVE_FAILED_TEXT: &str = "Save failed.";
pub const TEST_FAILED_TEXT: &str = "Test failed.";
pub const SCHEDULER_REVERTED_TEXT: &str = "Scheduler change was not applied.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => vec![Effect::LoadConfigs, Effect::LoadScheduler],
        Msg::ConfigsLoaded(configs) => {
            state.replace_configs(configs);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SchedulerLoaded(enabled) => {
            state.set_scheduler(enabled);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FieldEdited {
            index,
            field,
            value,
        } => {
            if state.list_mut().edit(index, field, value) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AddClicked => {
            state.list_mut().add();
            state.mark_dirty();
            Vec::new()
        }
        Msg::RemoveRequested { index } => match state.list().id_at(index) {
            Some(record) => {
                state.set_pending_removal(Some(record));
                state.mark_dirty();
                vec![Effect::ConfirmRemoval { index, record }]
            }
            None => Vec::new(),
        },
        Msg::RemovalConfirmed => {
            if let Some(index) = state
                .take_pending_removal()
                .and_then(|record| state.list().index_of(record))
            {
                state.list_mut().remove(index);
                state.ensure_one_record();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RemovalCancelled => {
            if state.take_pending_removal().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SchedulerToggled => {
            let enabled = !state.scheduler_enabled();
            state.set_scheduler(enabled);
            state.mark_dirty();
            vec![Effect::SetSchedulerRemote { enabled }]
        }
        Msg::SchedulerSyncFinished {
            requested,
            acknowledged,
        } => {
            let revert = !acknowledged
                && state.options().scheduler_policy == SchedulerPolicy::RollbackOnFailure
                && state.scheduler_enabled() == requested;
            if revert {
                state.set_scheduler(!requested);
                state.set_headline(Some(Headline::failure(SCHEDULER_REVERTED_TEXT)));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SaveClicked => {
            if state.is_saving() {
                return (state, Vec::new());
            }
            state.list_mut().clear_errors();
            state.set_headline(None);
            state.set_saving(true);
            state.mark_dirty();
            vec![Effect::SaveAll {
                submitted: state.list().ids(),
                configs: state.list().configs(),
            }]
        }
        Msg::SaveFinished { submitted, outcome } => {
            state.set_saving(false);
            match outcome {
                SaveOutcome::Saved => {
                    state.list_mut().clear_errors();
                    state.set_headline(Some(Headline::success(SAVED_TEXT)));
                }
                SaveOutcome::Rejected(payload) => {
                    let headline = apply_save_errors(&mut state, &submitted, &payload);
                    state.set_headline(headline.map(Headline::failure));
                }
                SaveOutcome::Inconclusive { .. } | SaveOutcome::TransportFailed => {
                    state.set_headline(Some(Headline::failure(SAVE_FAILED_TEXT)));
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::TestClicked { index } => {
            match (state.list().id_at(index), state.list().config(index)) {
                (Some(record), Some(config)) => vec![Effect::TestOne {
                    record,
                    index,
                    config: config.clone(),
                }],
                _ => Vec::new(),
            }
        }
        Msg::TestFinished {
            record,
            index,
            outcome,
        } => {
            apply_test_outcome(&mut state, record, index, outcome);
            state.mark_dirty();
            Vec::new()
        }
        Msg::HeadlineDismissed => {
            if state.headline().is_some() {
                state.set_headline(None);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Writes a rejected save's messages into the list and returns the headline.
fn apply_save_errors(
    state: &mut AppState,
    submitted: &[RecordId],
    payload: &WireErrorPayload,
) -> Option<String> {
    state.list_mut().clear_errors();
    match state.options().result_binding {
        ResultBinding::Identity => {
            let result = reconcile(payload, submitted.len());
            for (record, errors) in submitted.iter().zip(result.errors) {
                if let Some(index) = state.list().index_of(*record) {
                    state.list_mut().set_errors(index, errors);
                }
            }
            result.headline
        }
        ResultBinding::Positional => {
            let result = reconcile(payload, state.list().len());
            for (index, errors) in result.errors.into_iter().enumerate() {
                state.list_mut().set_errors(index, errors);
            }
            result.headline
        }
    }
}

fn apply_test_outcome(state: &mut AppState, record: RecordId, index: usize, outcome: TestOutcome) {
    let target = match state.options().result_binding {
        ResultBinding::Identity => state.list().index_of(record),
        ResultBinding::Positional => (index < state.list().len()).then_some(index),
    };
    match outcome {
        TestOutcome::Sample(rows) => {
            let text = serde_json::to_string_pretty(&rows)
                .unwrap_or_else(|_| format!("{} sample rows", rows.len()));
            state.set_headline(Some(Headline::success(text)));
        }
        TestOutcome::ValidationFailure(messages) => {
            let (fields, global) = split_test_messages(&messages);
            if let Some(index) = target {
                state.list_mut().set_errors(index, fields);
            }
            let text = global.unwrap_or_else(|| TEST_FAILED_TEXT.to_string());
            state.set_headline(Some(Headline::failure(text)));
        }
        TestOutcome::GenericFailure => {
            state.set_headline(Some(Headline::failure(TEST_FAILED_TEXT)));
        }
    }
}
