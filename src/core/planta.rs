//! Plant business logic - Handles all plant listing operations.
//!
//! Each function is a single round-trip to storage (plus a re-read after insert).
//! Storage failures, including foreign-key violations on `tipo_planta_id`, are
//! returned as `Error::Database` without interpretation.

use crate::{
    core::validation::NovaPlanta,
    entities::{Planta, planta},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves every plant in insertion order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_plantas<C: ConnectionTrait>(db: &C) -> Result<Vec<planta::Model>> {
    Planta::find()
        .order_by_asc(planta::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a plant by its id, returning None if it does not exist.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_planta<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<planta::Model>> {
    Planta::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Inserts a validated plant and returns the row as stored.
///
/// The row is re-read after the insert so that the storage-assigned id and
/// timestamps are reflected in the result.
///
/// # Errors
/// Returns an error if:
/// - The insert fails (e.g. `tipo_planta_id` references no plant type)
/// - The inserted row cannot be read back
pub async fn create_planta<C: ConnectionTrait>(db: &C, nova: NovaPlanta) -> Result<planta::Model> {
    let porcentagem_desconto = if nova.esta_em_promocao {
        nova.porcentagem_desconto
    } else {
        None
    };

    let planta = planta::ActiveModel {
        nome: Set(nova.nome),
        subtitulo: Set(nova.subtitulo),
        etiquetas: Set(nova.etiquetas),
        preco: Set(nova.preco),
        esta_em_promocao: Set(nova.esta_em_promocao),
        porcentagem_desconto: Set(porcentagem_desconto),
        caracteristicas: Set(nova.caracteristicas),
        descricao: Set(nova.descricao),
        url_imagem: Set(nova.url_imagem),
        tipo_planta_id: Set(nova.tipo_planta_id),
        ..Default::default()
    };

    let id = Planta::insert(planta).exec(db).await?.last_insert_id;

    get_planta(db, id)
        .await?
        .ok_or(Error::PlantaNotFound { id })
}
