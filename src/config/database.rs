//! Database configuration module for the plant catalog.
//!
//! This module opens the `SQLite` connection through `SeaORM` and applies the schema.
//! The schema is a single versioned list of `CREATE ... IF NOT EXISTS` statements
//! (tables, triggers, indices and the two reporting views), so it can be applied on
//! every process start regardless of what the storage file already contains.

use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Version of the schema definition below. Bump when a statement changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Named schema statements, applied in order.
///
/// Prices are declared `REAL` rather than `DECIMAL`: `SQLite` gives `DECIMAL` numeric
/// affinity, which would store `10.0` as the integer `10`.
pub const SCHEMA: &[(&str, &str)] = &[
    (
        "table tipos_planta",
        "CREATE TABLE IF NOT EXISTS tipos_planta (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome VARCHAR(100) NOT NULL CHECK (length(trim(nome)) > 0),
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    ),
    (
        "table plantas",
        "CREATE TABLE IF NOT EXISTS plantas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome VARCHAR(100) NOT NULL CHECK (length(trim(nome)) > 0),
            subtitulo VARCHAR(200) NOT NULL,
            etiquetas TEXT NOT NULL,
            preco REAL NOT NULL,
            esta_em_promocao BOOLEAN NOT NULL DEFAULT 0,
            porcentagem_desconto REAL,
            caracteristicas TEXT NOT NULL,
            descricao TEXT NOT NULL,
            url_imagem VARCHAR(255) NOT NULL,
            tipo_planta_id INTEGER NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (tipo_planta_id) REFERENCES tipos_planta (id) ON DELETE CASCADE
        )",
    ),
    (
        "trigger tipos_planta_updated_at",
        "CREATE TRIGGER IF NOT EXISTS tipos_planta_updated_at
        AFTER UPDATE ON tipos_planta
        FOR EACH ROW
        BEGIN
            UPDATE tipos_planta SET updated_at = CURRENT_TIMESTAMP WHERE id = old.id;
        END",
    ),
    (
        "trigger plantas_updated_at",
        "CREATE TRIGGER IF NOT EXISTS plantas_updated_at
        AFTER UPDATE ON plantas
        FOR EACH ROW
        BEGIN
            UPDATE plantas SET updated_at = CURRENT_TIMESTAMP WHERE id = old.id;
        END",
    ),
    (
        "index idx_plantas_tipo_planta_id",
        "CREATE INDEX IF NOT EXISTS idx_plantas_tipo_planta_id ON plantas (tipo_planta_id)",
    ),
    (
        "index idx_plantas_esta_em_promocao",
        "CREATE INDEX IF NOT EXISTS idx_plantas_esta_em_promocao ON plantas (esta_em_promocao)",
    ),
    (
        "index idx_plantas_preco",
        "CREATE INDEX IF NOT EXISTS idx_plantas_preco ON plantas (preco)",
    ),
    (
        "view view_plantas_promocao",
        "CREATE VIEW IF NOT EXISTS view_plantas_promocao AS
        SELECT
            p.*,
            tp.nome AS tipo_planta_nome,
            ROUND(p.preco * (1 - p.porcentagem_desconto / 100.0), 2) AS preco_promocional
        FROM plantas p
        JOIN tipos_planta tp ON p.tipo_planta_id = tp.id
        WHERE p.esta_em_promocao = 1",
    ),
    (
        "view view_relatorio_plantas_por_tipo",
        "CREATE VIEW IF NOT EXISTS view_relatorio_plantas_por_tipo AS
        SELECT
            tp.id AS tipo_planta_id,
            tp.nome AS tipo_planta,
            COUNT(p.id) AS quantidade_plantas,
            ROUND(AVG(p.preco), 2) AS preco_medio,
            COUNT(CASE WHEN p.esta_em_promocao THEN 1 END) AS quantidade_em_promocao
        FROM tipos_planta tp
        LEFT JOIN plantas p ON tp.id = p.tipo_planta_id
        GROUP BY tp.id, tp.nome",
    ),
];

/// Builds the `SeaORM` connection URL for a database file, creating it if missing.
#[must_use]
pub fn database_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

/// Ensures the directory holding the database file exists.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_storage_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            info!("Creating database directory {}", parent.display());
        }
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Opens the database file at `path`, creating the file and its directory when absent.
///
/// The returned connection is the single process-wide handle; callers own it and
/// are expected to `close` it on shutdown.
#[instrument]
pub async fn open(path: &Path) -> Result<DatabaseConnection> {
    ensure_storage_dir(path)?;
    let url = database_url(path);
    debug!("Connecting to {}", url);
    let db = Database::connect(&url).await?;
    info!("Database connection opened at {}", path.display());
    Ok(db)
}

/// Applies every schema statement. Safe to call any number of times.
///
/// # Errors
/// Returns the first statement failure; statements before it stay applied.
#[instrument(skip(db))]
pub async fn init_schema(db: &DatabaseConnection) -> Result<()> {
    for (name, sql) in SCHEMA {
        debug!("Ensuring {}", name);
        db.execute_unprepared(sql).await?;
    }
    info!("Database schema v{} ensured", SCHEMA_VERSION);
    Ok(())
}
