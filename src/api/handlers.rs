//! Request handlers.
//!
//! Each handler parses its input, calls exactly one core operation (validation
//! plus one operation for writes) and maps the outcome to a status and JSON body.

use super::{ApiState, error::ApiError};
use crate::{
    core::{planta, report, tipo_planta, validation},
    entities::{PlantaModel, TipoPlantaModel},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "API de Plantas - Servidor funcionando!" }))
}

/// `GET /api/plantas` - every plant ordered by id.
#[instrument(skip(state))]
pub async fn list_plantas(
    State(state): State<ApiState>,
) -> Result<Json<Vec<PlantaModel>>, ApiError> {
    let plantas = planta::list_plantas(&state.database)
        .await
        .map_err(|e| ApiError::internal("Erro ao buscar plantas", &e))?;
    debug!("Returning {} plantas", plantas.len());
    Ok(Json(plantas))
}

/// `GET /api/plantas/:id` - one plant, 400 for a non-integer id and 404 when absent.
#[instrument(skip(state))]
pub async fn get_planta(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<PlantaModel>, ApiError> {
    let id: i64 = id.trim().parse().map_err(|_| ApiError::InvalidId)?;

    planta::get_planta(&state.database, id)
        .await
        .map_err(|e| ApiError::internal("Erro ao buscar planta", &e))?
        .map(Json)
        .ok_or(ApiError::PlantaNotFound)
}

/// `POST /api/plantas` - validates the payload and answers 201 with the stored row.
#[instrument(skip(state, payload))]
pub async fn create_planta(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PlantaModel>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    let nova = validation::validate_nova_planta(&payload).map_err(ApiError::Validation)?;

    let created = planta::create_planta(&state.database, nova)
        .await
        .map_err(|e| ApiError::internal("Erro ao adicionar planta", &e))?;
    info!("Planta {} created with id {}", created.nome, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/tipos-planta` - every plant type ordered by id.
#[instrument(skip(state))]
pub async fn list_tipos_planta(
    State(state): State<ApiState>,
) -> Result<Json<Vec<TipoPlantaModel>>, ApiError> {
    tipo_planta::list_tipos_planta(&state.database)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Erro ao buscar tipos de plantas", &e))
}

/// `GET /api/promocoes` - plants on promotion with their discounted price.
#[instrument(skip(state))]
pub async fn list_promocoes(
    State(state): State<ApiState>,
) -> Result<Json<Vec<report::PlantaEmPromocao>>, ApiError> {
    report::list_plantas_em_promocao(&state.database)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Erro ao buscar plantas em promoção", &e))
}

/// `GET /api/relatorios/tipos-planta` - per-type counts and average price.
#[instrument(skip(state))]
pub async fn relatorio_por_tipo(
    State(state): State<ApiState>,
) -> Result<Json<Vec<report::RelatorioTipoPlanta>>, ApiError> {
    report::relatorio_por_tipo(&state.database)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Erro ao gerar relatório por tipo", &e))
}
