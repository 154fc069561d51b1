//! Entity module - Contains the SeaORM entity definitions for the catalog tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod planta;
pub mod tipo_planta;

// Re-export specific types to avoid conflicts
pub use planta::{Column as PlantaColumn, Entity as Planta, Model as PlantaModel};
pub use tipo_planta::{
    Column as TipoPlantaColumn, Entity as TipoPlanta, Model as TipoPlantaModel,
};
