//! Plant type queries.

use crate::{
    entities::{TipoPlanta, tipo_planta},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Retrieves every plant type ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_tipos_planta<C: ConnectionTrait>(db: &C) -> Result<Vec<tipo_planta::Model>> {
    TipoPlanta::find()
        .order_by_asc(tipo_planta::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
