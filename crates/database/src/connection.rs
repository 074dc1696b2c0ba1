use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

/// Creates the `product` table if it does not exist yet.
///
/// Existing tables are left untouched; there is no migration step.
const CREATE_PRODUCT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS product (
        id INT NOT NULL,
        name VARCHAR(255) NULL,
        description VARCHAR(255) NULL,
        price DOUBLE NULL,
        quantity INT NULL,
        PRIMARY KEY (id)
    )
"#;

/// Establishes a connection pool to the MySQL/MariaDB server.
///
/// The pool is built once at startup and shared by every request; each store
/// operation borrows one connection from it for its duration.
pub async fn connect(settings: &DatabaseSettings) -> Result<MySqlPool, DbError> {
    if settings.user.trim().is_empty() {
        return Err(DbError::ConnectionConfigError("DB_USER must be set.".to_string()));
    }
    if settings.name.trim().is_empty() {
        return Err(DbError::ConnectionConfigError("DB_NAME must be set.".to_string()));
    }

    let options = MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name);

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        "Connecting to database."
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Makes sure the `product` table exists.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), DbError> {
    sqlx::query(CREATE_PRODUCT_TABLE).execute(pool).await?;
    tracing::debug!("Product table is present.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(user: &str, name: &str) -> DatabaseSettings {
        DatabaseSettings {
            host: "localhost".to_string(),
            port: 3307,
            user: user.to_string(),
            password: String::new(),
            name: name.to_string(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn missing_user_fails_before_dialing() {
        let err = connect(&settings("", "inventory")).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionConfigError(msg) if msg.contains("DB_USER")));
    }

    #[tokio::test]
    async fn missing_database_name_fails_before_dialing() {
        let err = connect(&settings("shop", " ")).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionConfigError(msg) if msg.contains("DB_NAME")));
    }
}
