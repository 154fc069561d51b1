//! Plant entity - A sellable plant listing.
//!
//! Each plant belongs to exactly one plant type. Deleting the type cascades to
//! its plants at the storage level. `porcentagem_desconto` is only populated
//! while `esta_em_promocao` is set.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plantas")]
pub struct Model {
    /// Unique identifier for the plant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the plant (e.g., "Lírio da Paz")
    pub nome: String,
    /// Short tagline shown under the name
    pub subtitulo: String,
    /// Comma-separated tags
    pub etiquetas: String,
    /// Price in reais
    pub preco: f64,
    /// Whether the plant is currently on promotion
    pub esta_em_promocao: bool,
    /// Discount percentage in (0, 100], only set while on promotion
    pub porcentagem_desconto: Option<f64>,
    /// Care and growth characteristics
    pub caracteristicas: String,
    /// Full description
    pub descricao: String,
    /// Image path or URL
    pub url_imagem: String,
    /// ID of the plant type this plant belongs to
    pub tipo_planta_id: i64,
    /// When the plant was created
    pub created_at: DateTime,
    /// When the plant was last modified, maintained by a storage trigger
    pub updated_at: DateTime,
}

/// Defines relationships between Planta and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each plant belongs to one type
    #[sea_orm(
        belongs_to = "super::tipo_planta::Entity",
        from = "Column::TipoPlantaId",
        to = "super::tipo_planta::Column::Id",
        on_delete = "Cascade"
    )]
    TipoPlanta,
}

impl Related<super::tipo_planta::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TipoPlanta.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
