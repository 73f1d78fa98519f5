use fintrack_config::{Config, ConfigManager};
use fintrack_core::{
    storage::KeyValueStore,
    time::{Clock, SystemClock},
    SortOrder, TransactionQuery,
};
use fintrack_storage_json::JsonFileStore;
use strsim::levenshtein;
use tracing::{info, warn};

use crate::{core::Tracker, notice::NoticeBoard, utils};

use super::{
    commands,
    core::{CliError, CliMode, CommandError, LoopControl},
    output,
    registry::{CommandEntry, CommandRegistry},
};

pub type DynStore = Box<dyn KeyValueStore>;

/// Everything a command handler can reach.
pub struct ShellContext {
    pub registry: CommandRegistry,
    pub tracker: Tracker<DynStore>,
    pub config: Config,
    pub clock: Box<dyn Clock>,
    pub notices: NoticeBoard,
    /// Filter and sort of the last `list`, reused by `export transactions`.
    pub query: TransactionQuery,
    pub running: bool,
}

impl ShellContext {
    /// Opens config and data under the application directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let app_dir = utils::app_data_dir();
        let config_manager = ConfigManager::with_base_dir(app_dir.clone())?;
        let config = config_manager.load()?;
        info!(path = %config_manager.config_path().display(), "configuration loaded");

        let data_dir = config.resolve_data_dir(&app_dir);
        let store: DynStore = Box::new(JsonFileStore::new(data_dir)?);
        let tracker = Tracker::open(store, config.seed_demo_data)?;
        Ok(Self::from_parts(mode, tracker, config, Box::new(SystemClock)))
    }

    pub fn from_parts(
        mode: CliMode,
        tracker: Tracker<DynStore>,
        config: Config,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let sort = config.default_sort.parse().unwrap_or_else(|err| {
            warn!(%err, "ignoring configured default sort");
            SortOrder::default()
        });
        let query = TransactionQuery {
            sort,
            ..TransactionQuery::default()
        };

        Self {
            registry,
            tracker,
            notices: NoticeBoard::new(config.notice_duration_ms),
            config,
            clock,
            query,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Prompt text. Carries the current notice until it expires.
    pub fn prompt(&mut self) -> String {
        self.notices.sweep(self.clock.as_ref());
        match self.notices.active(self.clock.as_ref()) {
            Some(notice) => format!("[{}] fintrack> ", notice.message),
            None => "fintrack> ".to_string(),
        }
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and runs one input line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &input.to_lowercase()), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}
