use civic_desk_db::lifecycle::TransitionMode;
use civic_desk_postgres::PostgresConfig;

/// Binary configuration.
///
/// | Variable | Default |
/// |----------|---------|
/// | LOG_LEVEL | info (ignored when RUST_LOG is set) |
/// | LOG_JSON | false |
/// | STATUS_TRANSITIONS | permissive (`permissive` or `workflow`) |
///
/// Database settings are read by [`PostgresConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: PostgresConfig,
    pub log_level: String,
    pub log_json: bool,
    pub transitions: TransitionMode,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let transitions = match lookup("STATUS_TRANSITIONS") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                eprintln!("warning: {e}; using the permissive transition policy");
                TransitionMode::default()
            }),
            None => TransitionMode::default(),
        };

        Self {
            database: PostgresConfig::from_lookup(&lookup),
            log_level: lookup("LOG_LEVEL")
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            transitions,
        }
    }
}
