//! Shared test utilities for the plant catalog.
//!
//! This module provides common helper functions for setting up test databases
//! and building plant payloads with sensible defaults.

use crate::{
    config::{SeedConfig, database},
    core::{seed, validation::NovaPlanta},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the schema applied.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    database::init_schema(&db).await?;
    Ok(db)
}

/// Creates an in-memory database holding the seven default plant types
/// (ids 1 to 7, in `DEFAULT_TIPOS_PLANTA` order) and no plants.
pub async fn setup_seeded_tipos_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed::seed_tipos_planta(&db, &SeedConfig::default().tipos_planta).await?;
    Ok(db)
}

/// Builds a valid plant payload with sensible defaults.
///
/// # Defaults
/// * `preco`: 10.5
/// * `esta_em_promocao`: false
/// * `url_imagem`: `"/i.png"`
pub fn nova_planta(nome: &str, tipo_planta_id: i64) -> NovaPlanta {
    NovaPlanta {
        nome: nome.to_string(),
        subtitulo: "x".to_string(),
        etiquetas: "t".to_string(),
        preco: 10.5,
        esta_em_promocao: false,
        porcentagem_desconto: None,
        caracteristicas: "c".to_string(),
        descricao: "d".to_string(),
        url_imagem: "/i.png".to_string(),
        tipo_planta_id,
    }
}
