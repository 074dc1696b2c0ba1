use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LogFormat, LoggingSettings, ServerSettings, Settings};
pub use telemetry::init_tracing;

/// The optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "storefront.toml";

/// The variables the database connection has always been configured through.
/// They take precedence over every other source.
const DATABASE_ENV_VARS: [(&str, &str); 4] = [
    ("DB_HOST", "database.host"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
];

/// Loads the application settings from defaults, `storefront.toml` and the
/// process environment.
///
/// Callers that want `.env` support should run `dotenvy::dotenv()` first.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let env: config::Map<String, String> = std::env::vars().collect();
    build_settings(Some(Path::new(CONFIG_FILE)), env)
}

/// Builds settings from an explicit file and environment snapshot.
///
/// Layers, lowest precedence first: built-in defaults, the file (if it exists),
/// `APP__SECTION__KEY` variables, then the `DB_*` variables.
pub fn build_settings(
    file: Option<&Path>,
    env: config::Map<String, String>,
) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.cors_origin", "http://localhost:3000")?
        .set_default("server.body_limit_bytes", 1024 * 1024)?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 3307)?
        .set_default("database.user", "")?
        .set_default("database.name", "")?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?;

    if let Some(path) = file {
        builder = builder.add_source(config::File::from(path).required(false));
    }

    for (var, key) in DATABASE_ENV_VARS {
        builder = builder.set_override_option(key, env.get(var).cloned())?;
    }

    builder = builder.add_source(
        config::Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(Some(env)),
    );

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    if settings.server.cors_origin.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "server.cors_origin must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn db_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DB_HOST", "db.internal"),
            ("DB_USER", "shop"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "inventory"),
        ]
    }

    #[test]
    fn defaults_fill_everything_else() {
        let settings = build_settings(None, env(&db_env())).unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.cors_origin, "http://localhost:3000");
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.database.port, 3307);
        assert_eq!(settings.database.user, "shop");
        assert_eq!(settings.database.password, "hunter2");
        assert_eq!(settings.database.name, "inventory");
        assert_eq!(settings.logging.format, LogFormat::Text);
    }

    #[test]
    fn credentials_may_be_absent_until_a_connection_is_made() {
        let settings = build_settings(None, env(&[])).unwrap();
        assert!(settings.database.user.is_empty());
        assert!(settings.database.name.is_empty());
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let mut vars = db_env();
        vars.push(("APP__DATABASE__MAX_CONNECTIONS", "0"));
        let err = build_settings(None, env(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn prefixed_environment_overrides_defaults() {
        let mut vars = db_env();
        vars.push(("APP__SERVER__PORT", "9090"));
        vars.push(("APP__LOGGING__FORMAT", "json"));
        let settings = build_settings(None, env(&vars)).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn db_variables_outrank_prefixed_ones() {
        let mut vars = db_env();
        vars.push(("APP__DATABASE__USER", "someone-else"));
        let settings = build_settings(None, env(&vars)).unwrap();
        assert_eq!(settings.database.user, "shop");
    }

    #[test]
    fn file_values_sit_between_defaults_and_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 7000\ncors_origin = \"http://example.test\"\n\n[database]\nport = 3306"
        )
        .unwrap();

        let mut vars = db_env();
        vars.push(("APP__SERVER__PORT", "7001"));
        let settings = build_settings(Some(file.path()), env(&vars)).unwrap();

        assert_eq!(settings.server.port, 7001);
        assert_eq!(settings.server.cors_origin, "http://example.test");
        assert_eq!(settings.database.port, 3306);
    }

    #[test]
    fn debug_output_hides_the_password() {
        let settings = build_settings(None, env(&db_env())).unwrap();
        let rendered = format!("{:?}", settings.database);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[redacted]"));
    }
}
