use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Открыть (или создать) файл SQLite и подготовить схему
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database: {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Минимальная схема: одна таблица для всех коллекций
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let create_record_store_sql = r#"
        CREATE TABLE IF NOT EXISTS record_store (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            position INTEGER NOT NULL,
            payload TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_record_store_sql.to_string(),
    ))
    .await?;

    let create_position_index_sql = r#"
        CREATE INDEX IF NOT EXISTS idx_record_store_position
        ON record_store (collection, position);
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_position_index_sql.to_string(),
    ))
    .await?;

    Ok(())
}
