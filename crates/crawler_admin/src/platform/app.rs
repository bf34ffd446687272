use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crawler_admin_core::{update, AppOptions, AppState, Effect, Msg};
use crawler_gateway::{GatewayHandle, SyncGateway};
use crawler_logging::{crawler_error, crawler_info};
use log::LevelFilter;

use super::config::load_config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{is_confirmation, parse_command, Command, CommandError, HELP};
use super::ui::render::render;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

pub fn run_app(config_path: &Path, base_url: Option<String>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    logging::initialize(config.log_destination, LevelFilter::Info);
    crawler_info!("Starting crawler admin against {}", config.base_url);

    let gateway =
        SyncGateway::connect(&config.gateway_settings()).context("configuring backend client")?;
    let handle = GatewayHandle::new(gateway).context("starting gateway runtime")?;

    let stdin = io::stdin();
    let mut console = Console::new(
        config.app_options(),
        EffectRunner::new(handle),
        stdin.lock(),
        io::stdout(),
    );
    if let Err(err) = console.run() {
        crawler_error!("Console stopped on i/o error: {}", err);
        return Err(err).context("console i/o");
    }
    crawler_info!("Crawler admin stopped");
    Ok(())
}

/// Line-oriented operator console: reads commands, feeds the state machine
/// and prints the forms whenever they change.
pub struct Console<R, W> {
    state: AppState,
    runner: EffectRunner,
    input: R,
    output: W,
    settle_timeout: Duration,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(options: AppOptions, runner: EffectRunner, input: R, output: W) -> Self {
        Self {
            state: AppState::with_options(options),
            runner,
            input,
            output,
            settle_timeout: SETTLE_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.dispatch(Msg::SessionStarted)?;
        self.settle()?;
        self.render_if_dirty()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            // Answers that outlived an earlier settle timeout.
            for msg in self.runner.poll() {
                self.dispatch(msg)?;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(self.output, "{HELP}")?,
                Ok(Command::Show) => {
                    self.state.consume_dirty();
                    write!(self.output, "{}", render(&self.state.view()))?;
                }
                Ok(command) => {
                    if let Some(msg) = command.to_msg() {
                        self.dispatch(msg)?;
                        self.settle()?;
                    }
                    self.render_if_dirty()?;
                }
                Err(CommandError::Empty) => {}
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in self.runner.enqueue(effects) {
                if let Effect::ConfirmRemoval { index, .. } = effect {
                    queue.push_back(self.confirm_removal(index)?);
                }
            }
        }
        Ok(())
    }

    fn settle(&mut self) -> io::Result<()> {
        while self.runner.in_flight() > 0 {
            let msgs = self.runner.settle(self.settle_timeout);
            if msgs.is_empty() {
                break;
            }
            for msg in msgs {
                self.dispatch(msg)?;
            }
        }
        Ok(())
    }

    fn confirm_removal(&mut self, index: usize) -> io::Result<Msg> {
        self.render_if_dirty()?;
        let url = self
            .state
            .list()
            .config(index)
            .map(|config| config.url.clone())
            .unwrap_or_default();
        write!(self.output, "Delete #{index} ({url})? [y/N] ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(if is_confirmation(&answer) {
            Msg::RemovalConfirmed
        } else {
            Msg::RemovalCancelled
        })
    }

    fn render_if_dirty(&mut self) -> io::Result<()> {
        if self.state.consume_dirty() {
            write!(self.output, "{}", render(&self.state.view()))?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use crawler_admin_core::{
        AppOptions, CrawlTargetConfig, FieldErrors, SaveOutcome, SchedulerPolicy, TestOutcome,
    };
    use crawler_gateway::{
        CrawlerBackend, FailureKind, GatewayError, GatewayHandle, SyncGateway,
    };

    use super::Console;
    use crate::platform::effects::EffectRunner;

    #[derive(Default)]
    struct ScriptedBackend {
        saved: Arc<Mutex<Vec<Vec<CrawlTargetConfig>>>>,
    }

    #[async_trait::async_trait]
    impl CrawlerBackend for ScriptedBackend {
        async fn fetch_configs(&self) -> Result<Vec<CrawlTargetConfig>, GatewayError> {
            Ok(vec![CrawlTargetConfig {
                url: "https://a.example".to_string(),
                keywords: "rust".to_string(),
                ..CrawlTargetConfig::default()
            }])
        }

        async fn fetch_scheduler(&self) -> Result<bool, GatewayError> {
            Ok(false)
        }

        async fn post_configs(
            &self,
            configs: &[CrawlTargetConfig],
        ) -> Result<SaveOutcome, GatewayError> {
            self.saved.lock().unwrap().push(configs.to_vec());
            Ok(SaveOutcome::Rejected(
                [
                    ("0.linkSelector".to_string(), "Required".to_string()),
                    ("global".to_string(), "Save failed".to_string()),
                ]
                .into(),
            ))
        }

        async fn post_scheduler(&self, _enabled: bool) -> Result<(), GatewayError> {
            Err(GatewayError {
                kind: FailureKind::HttpStatus(500),
                message: "scheduler offline".to_string(),
            })
        }

        async fn post_test(
            &self,
            _config: &CrawlTargetConfig,
        ) -> Result<TestOutcome, GatewayError> {
            Ok(TestOutcome::GenericFailure)
        }
    }

    fn scripted_console(
        options: AppOptions,
        script: &str,
    ) -> (Console<Cursor<Vec<u8>>, Vec<u8>>, Arc<Mutex<Vec<Vec<CrawlTargetConfig>>>>) {
        crawler_logging::initialize_for_tests();
        let backend = ScriptedBackend::default();
        let saved = backend.saved.clone();
        let handle = GatewayHandle::new(SyncGateway::new(backend)).unwrap();
        let console = Console::new(
            options,
            EffectRunner::new(handle),
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        );
        (console, saved)
    }

    #[test]
    fn scripted_session_edits_removes_and_saves() {
        let script = "add\nedit 1 url https://b.example\nremove 0\ny\nsave\nquit\n";
        let (mut console, saved) = scripted_console(AppOptions::default(), script);
        console.run().unwrap();

        let list = console.state().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list.config(0).unwrap().url, "https://b.example");
        let expected: FieldErrors = [("linkSelector".to_string(), "Required".to_string())].into();
        assert_eq!(list.errors_at(0), Some(&expected));

        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].len(), 1);
        assert_eq!(saved[0][0].url, "https://b.example");

        let output = String::from_utf8(console.output.clone()).unwrap();
        assert!(output.contains("#0  (marked for deletion)\n"));
        assert!(output.contains("Delete #0 (https://a.example)? [y/N] "));
        assert!(output.contains("[!!] Save failed"));
    }

    #[test]
    fn declined_removal_keeps_record() {
        let (mut console, _) = scripted_console(AppOptions::default(), "remove 0\nn\n");
        console.run().unwrap();
        assert_eq!(console.state().list().len(), 1);
        assert_eq!(console.state().list().config(0).unwrap().url, "https://a.example");
    }

    #[test]
    fn unacknowledged_toggle_follows_policy() {
        let (mut console, _) = scripted_console(AppOptions::default(), "scheduler\n");
        console.run().unwrap();
        assert!(console.state().scheduler_enabled());

        let options = AppOptions {
            scheduler_policy: SchedulerPolicy::RollbackOnFailure,
            ..AppOptions::default()
        };
        let (mut console, _) = scripted_console(options, "scheduler\n");
        console.run().unwrap();
        assert!(!console.state().scheduler_enabled());
    }

    #[test]
    fn unknown_command_prints_error() {
        let (mut console, _) = scripted_console(AppOptions::default(), "launch\nquit\n");
        console.run().unwrap();
        let output = String::from_utf8(console.output.clone()).unwrap();
        assert!(output.contains("unknown command `launch`"));
    }
}
