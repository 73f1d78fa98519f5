use std::{env, path::PathBuf, sync::Once};

static TRACING_INIT: Once = Once::new();

const HOME_ENV: &str = "FINTRACK_HOME";
const APP_DIR_NAME: &str = ".fintrack";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env();
        let filter = match "fintrack=info".parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        };

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

/// Base directory for config and data files.
///
/// `FINTRACK_HOME` wins when set; otherwise `~/.fintrack`, or `./.fintrack`
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME),
    }
}
