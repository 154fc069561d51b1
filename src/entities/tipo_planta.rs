//! Plant type entity - A category that plant listings belong to.
//!
//! Types are only created by the seed step and are never deleted by the service.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plant type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tipos_planta")]
pub struct Model {
    /// Unique identifier for the type
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Suculentas", "Cactos")
    pub nome: String,
    /// When the type was created
    pub created_at: DateTime,
    /// When the type was last modified, maintained by a storage trigger
    pub updated_at: DateTime,
}

/// Defines relationships between `TipoPlanta` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One type has many plants
    #[sea_orm(has_many = "super::planta::Entity")]
    Plantas,
}

impl Related<super::planta::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plantas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
