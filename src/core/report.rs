//! Reporting queries over the derived views.
//!
//! Both views are computed by storage on every read; nothing here is cached.
//! `view_plantas_promocao` adds the type name and the discounted price to every
//! plant on promotion, and `view_relatorio_plantas_por_tipo` aggregates plants
//! per type.

use crate::errors::Result;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement, entity::prelude::DateTime};
use serde::Serialize;

/// A plant on promotion with its computed promotional price.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct PlantaEmPromocao {
    /// Plant id
    pub id: i64,
    /// Plant name
    pub nome: String,
    /// Short tagline
    pub subtitulo: String,
    /// Comma-separated tags
    pub etiquetas: String,
    /// Regular price
    pub preco: f64,
    /// Always true in this view
    pub esta_em_promocao: bool,
    /// Discount percentage
    pub porcentagem_desconto: Option<f64>,
    /// Care and growth characteristics
    pub caracteristicas: String,
    /// Full description
    pub descricao: String,
    /// Image path or URL
    pub url_imagem: String,
    /// ID of the plant's type
    pub tipo_planta_id: i64,
    /// When the plant was created
    pub created_at: DateTime,
    /// When the plant was last modified
    pub updated_at: DateTime,
    /// Name of the plant's type
    pub tipo_planta_nome: String,
    /// `preco * (1 - porcentagem_desconto / 100)` rounded to 2 decimals
    pub preco_promocional: Option<f64>,
}

/// Aggregated numbers for one plant type.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct RelatorioTipoPlanta {
    /// ID of the type
    pub tipo_planta_id: i64,
    /// Name of the type
    pub tipo_planta: String,
    /// Number of plants of this type
    pub quantidade_plantas: i64,
    /// Average price rounded to 2 decimals, None for a type without plants
    pub preco_medio: Option<f64>,
    /// Number of plants of this type on promotion
    pub quantidade_em_promocao: i64,
}

/// Retrieves every plant currently on promotion, ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_plantas_em_promocao<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<PlantaEmPromocao>> {
    let statement = Statement::from_string(
        db.get_database_backend(),
        "SELECT * FROM view_plantas_promocao ORDER BY id",
    );
    PlantaEmPromocao::find_by_statement(statement)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the per-type report, one row per plant type ordered by type id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn relatorio_por_tipo<C: ConnectionTrait>(db: &C) -> Result<Vec<RelatorioTipoPlanta>> {
    let statement = Statement::from_string(
        db.get_database_backend(),
        "SELECT * FROM view_relatorio_plantas_por_tipo ORDER BY tipo_planta_id",
    );
    RelatorioTipoPlanta::find_by_statement(statement)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{planta::create_planta, validation::NovaPlanta};
    use crate::test_utils::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn test_promotion_view_computes_discounted_price() -> Result<()> {
        let db = setup_seeded_tipos_db().await?;
        create_planta(&db, nova_planta("Sem desconto", 1)).await?;
        let em_promocao = create_planta(
            &db,
            NovaPlanta {
                preco: 18.90,
                esta_em_promocao: true,
                porcentagem_desconto: Some(10.0),
                ..nova_planta("Echeveria", 3)
            },
        )
        .await?;

        let promocoes = list_plantas_em_promocao(&db).await?;
        assert_eq!(promocoes.len(), 1);

        let promocao = &promocoes[0];
        assert_eq!(promocao.id, em_promocao.id);
        assert_eq!(promocao.tipo_planta_nome, "Suculentas");
        assert!(approx_eq(promocao.preco_promocional.unwrap(), 17.01));
        Ok(())
    }

    #[tokio::test]
    async fn test_promotion_view_is_empty_without_promotions() -> Result<()> {
        let db = setup_seeded_tipos_db().await?;
        create_planta(&db, nova_planta("Samambaia", 1)).await?;

        assert!(list_plantas_em_promocao(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_report_counts_plants_per_type() -> Result<()> {
        let db = setup_seeded_tipos_db().await?;
        create_planta(
            &db,
            NovaPlanta {
                preco: 10.0,
                ..nova_planta("Jiboia", 1)
            },
        )
        .await?;
        create_planta(
            &db,
            NovaPlanta {
                preco: 15.56,
                esta_em_promocao: true,
                porcentagem_desconto: Some(5.0),
                ..nova_planta("Maranta", 1)
            },
        )
        .await?;

        let relatorio = relatorio_por_tipo(&db).await?;
        assert_eq!(relatorio.len(), 7);

        let interior = &relatorio[0];
        assert_eq!(interior.tipo_planta, "Plantas de Interior");
        assert_eq!(interior.quantidade_plantas, 2);
        assert_eq!(interior.quantidade_em_promocao, 1);
        assert!(approx_eq(interior.preco_medio.unwrap(), 12.78));

        let exterior = &relatorio[1];
        assert_eq!(exterior.quantidade_plantas, 0);
        assert_eq!(exterior.quantidade_em_promocao, 0);
        assert_eq!(exterior.preco_medio, None);
        Ok(())
    }
}
