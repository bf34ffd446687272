use std::sync::Once;

use crawler_admin_core::{
    update, AppOptions, AppState, ConfigField, CrawlTargetConfig, Effect, FieldErrors, Msg,
    SaveOutcome, SchedulerPolicy, WireErrorPayload,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(crawler_logging::initialize_for_tests);
}

fn target(url: &str) -> CrawlTargetConfig {
    CrawlTargetConfig {
        url: url.to_string(),
        ..CrawlTargetConfig::default()
    }
}

fn loaded(urls: &[&str]) -> AppState {
    let configs = urls.iter().map(|url| target(url)).collect();
    let (state, _) = update(AppState::new(), Msg::ConfigsLoaded(configs));
    state
}

fn payload(pairs: &[(&str, &str)]) -> WireErrorPayload {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Runs a save round trip that the backend rejects with `pairs`.
fn rejected(state: AppState, pairs: &[(&str, &str)]) -> AppState {
    let (state, effects) = update(state, Msg::SaveClicked);
    let submitted = match &effects[..] {
        [Effect::SaveAll { submitted, .. }] => submitted.clone(),
        other => panic!("expected SaveAll, got {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::SaveFinished {
            submitted,
            outcome: SaveOutcome::Rejected(payload(pairs)),
        },
    );
    state
}

fn edit(state: AppState, index: usize, field: ConfigField, value: &str) -> AppState {
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            index,
            field,
            value: value.to_string(),
        },
    );
    state
}

#[test]
fn session_start_requests_configs_and_scheduler() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::SessionStarted);
    assert_eq!(effects, vec![Effect::LoadConfigs, Effect::LoadScheduler]);
}

#[test]
fn empty_load_leaves_one_blank_record() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::ConfigsLoaded(Vec::new()));

    let view = state.view();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].config, CrawlTargetConfig::default());
    assert!(view.records[0].errors.is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn edit_touches_only_target_record_and_field_error() {
    init_logging();
    let state = loaded(&["https://a.example", "https://b.example"]);
    let state = rejected(
        state,
        &[
            ("0.url", "Invalid URL"),
            ("0.linkSelector", "Required"),
            ("1.url", "Invalid URL"),
        ],
    );

    let state = edit(state, 0, ConfigField::Url, "https://fixed.example");

    let list = state.list();
    assert_eq!(list.config(0).unwrap().url, "https://fixed.example");
    assert_eq!(list.config(1).unwrap(), &target("https://b.example"));

    let first = list.errors_at(0).unwrap();
    assert!(!first.contains_key("url"));
    assert_eq!(first["linkSelector"], "Required");
    assert_eq!(list.errors_at(1).unwrap()["url"], "Invalid URL");
}

#[test]
fn edit_out_of_range_changes_nothing() {
    init_logging();
    let mut state = loaded(&["https://a.example"]);
    assert!(state.consume_dirty());

    let before = state.clone();
    let mut state = edit(state, 5, ConfigField::Url, "x");
    assert_eq!(state, before);
    assert!(!state.consume_dirty());
}

#[test]
fn add_appends_blank_record_with_empty_errors() {
    init_logging();
    let state = rejected(loaded(&["https://a.example"]), &[("0.url", "Invalid URL")]);
    let (state, effects) = update(state, Msg::AddClicked);

    assert!(effects.is_empty());
    let list = state.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list.errors().len(), 2);
    assert_eq!(list.config(1), Some(&CrawlTargetConfig::default()));
    assert_eq!(list.errors_at(1), Some(&FieldErrors::new()));
    assert_eq!(list.errors_at(0).unwrap()["url"], "Invalid URL");
}

#[test]
fn remove_waits_for_confirmation() {
    init_logging();
    let state = loaded(&["https://a.example", "https://b.example"]);
    let record = state.list().id_at(1).unwrap();

    let (state, effects) = update(state, Msg::RemoveRequested { index: 1 });
    assert_eq!(effects, vec![Effect::ConfirmRemoval { index: 1, record }]);
    assert_eq!(state.list().len(), 2);
    assert_eq!(state.view().pending_removal, Some(1));

    let (state, _) = update(state, Msg::RemovalConfirmed);
    assert_eq!(state.list().configs(), vec![target("https://a.example")]);
    assert_eq!(state.view().pending_removal, None);
}

#[test]
fn cancelled_remove_leaves_records_untouched() {
    init_logging();
    let state = rejected(
        loaded(&["https://a.example", "https://b.example"]),
        &[("1.url", "Invalid URL")],
    );
    let configs = state.list().configs();
    let errors = state.list().errors();

    let (state, _) = update(state, Msg::RemoveRequested { index: 0 });
    let (state, effects) = update(state, Msg::RemovalCancelled);

    assert!(effects.is_empty());
    assert_eq!(state.list().configs(), configs);
    assert_eq!(state.list().errors(), errors);

    // A stray confirmation after cancel has nothing to act on.
    let (state, _) = update(state, Msg::RemovalConfirmed);
    assert_eq!(state.list().len(), 2);
}

#[test]
fn remove_shifts_errors_with_their_records() {
    init_logging();
    let state = rejected(
        loaded(&["https://a.example", "https://b.example", "https://c.example"]),
        &[("0.url", "first"), ("2.url", "third")],
    );

    let (state, _) = update(state, Msg::RemoveRequested { index: 1 });
    let (state, _) = update(state, Msg::RemovalConfirmed);

    let list = state.list();
    assert_eq!(list.config(1).unwrap().url, "https://c.example");
    assert_eq!(list.errors_at(1).unwrap()["url"], "third");
    assert_eq!(list.errors_at(0).unwrap()["url"], "first");
}

#[test]
fn remove_then_add_keeps_length_and_alignment() {
    init_logging();
    let state = loaded(&["https://a.example", "https://b.example"]);

    let (state, _) = update(state, Msg::RemoveRequested { index: 0 });
    let (state, _) = update(state, Msg::RemovalConfirmed);
    let (state, _) = update(state, Msg::AddClicked);

    let list = state.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list.configs().len(), list.errors().len());
    assert_eq!(list.config(0).unwrap().url, "https://b.example");
    assert_eq!(list.config(1), Some(&CrawlTargetConfig::default()));
}

#[test]
fn removing_last_record_leaves_one_blank() {
    init_logging();
    let state = loaded(&["https://a.example"]);

    let (state, _) = update(state, Msg::RemoveRequested { index: 0 });
    let (state, _) = update(state, Msg::RemovalConfirmed);

    assert_eq!(state.list().configs(), vec![CrawlTargetConfig::default()]);
    assert_eq!(state.list().errors(), vec![FieldErrors::new()]);
}

#[test]
fn remove_request_out_of_range_is_ignored() {
    init_logging();
    let state = loaded(&["https://a.example"]);
    let (state, effects) = update(state, Msg::RemoveRequested { index: 3 });
    assert!(effects.is_empty());
    assert_eq!(state.view().pending_removal, None);
}

#[test]
fn scheduler_toggle_is_immediate() {
    init_logging();
    let state = loaded(&["https://a.example"]);
    let (state, _) = update(state, Msg::SaveClicked);
    assert!(state.is_saving());

    let (state, effects) = update(state, Msg::SchedulerToggled);
    assert!(state.scheduler_enabled());
    assert!(state.is_saving());
    assert_eq!(effects, vec![Effect::SetSchedulerRemote { enabled: true }]);

    let (state, effects) = update(state, Msg::SchedulerToggled);
    assert!(!state.scheduler_enabled());
    assert_eq!(effects, vec![Effect::SetSchedulerRemote { enabled: false }]);
}

#[test]
fn optimistic_policy_keeps_unacknowledged_toggle() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SchedulerToggled);
    let (state, _) = update(
        state,
        Msg::SchedulerSyncFinished {
            requested: true,
            acknowledged: false,
        },
    );
    assert!(state.scheduler_enabled());
    assert!(state.headline().is_none());
}

#[test]
fn rollback_policy_reverts_unacknowledged_toggle() {
    init_logging();
    let options = AppOptions {
        scheduler_policy: SchedulerPolicy::RollbackOnFailure,
        ..AppOptions::default()
    };
    let (state, _) = update(AppState::with_options(options), Msg::SchedulerToggled);
    assert!(state.scheduler_enabled());

    let (state, _) = update(
        state,
        Msg::SchedulerSyncFinished {
            requested: true,
            acknowledged: false,
        },
    );
    assert!(!state.scheduler_enabled());
    assert!(state.headline().is_some());
}

#[test]
fn rollback_policy_keeps_acknowledged_or_superseded_toggle() {
    init_logging();
    let options = AppOptions {
        scheduler_policy: SchedulerPolicy::RollbackOnFailure,
        ..AppOptions::default()
    };
    let (state, _) = update(AppState::with_options(options), Msg::SchedulerToggled);
    let (state, _) = update(
        state,
        Msg::SchedulerSyncFinished {
            requested: true,
            acknowledged: true,
        },
    );
    assert!(state.scheduler_enabled());

    // The operator flipped it back before the failed call for `true` returned.
    let (state, _) = update(state, Msg::SchedulerToggled);
    let (state, _) = update(
        state,
        Msg::SchedulerSyncFinished {
            requested: true,
            acknowledged: false,
        },
    );
    assert!(!state.scheduler_enabled());
    assert!(state.headline().is_none());
}

#[test]
fn scheduler_loaded_sets_flag() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SchedulerLoaded(true));
    assert!(state.scheduler_enabled());
    assert!(effects.is_empty());
}
