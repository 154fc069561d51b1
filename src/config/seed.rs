//! Seed catalog loading from config.toml
//!
//! The seed catalog lists the plant types and sample plants inserted on first
//! run. When the file is absent the built-in catalog is used, so a fresh checkout
//! starts with the seven default categories and three sample plants.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the seed sections of config.toml
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeedConfig {
    /// Plant types inserted when `tipos_planta` is empty
    #[serde(default)]
    pub tipos_planta: Vec<TipoPlantaSeed>,
    /// Sample plants inserted when `plantas` is empty
    #[serde(default)]
    pub plantas: Vec<PlantaSeed>,
}

/// A single plant type to seed
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TipoPlantaSeed {
    /// Name of the type
    pub nome: String,
}

/// A sample plant to seed. The type is referenced by name, not by id.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlantaSeed {
    /// Name of the plant
    pub nome: String,
    /// Short tagline
    pub subtitulo: String,
    /// Comma-separated tags
    pub etiquetas: String,
    /// Price in reais
    pub preco: f64,
    /// Whether the plant starts on promotion
    #[serde(default)]
    pub esta_em_promocao: bool,
    /// Discount percentage, only meaningful while on promotion
    #[serde(default)]
    pub porcentagem_desconto: Option<f64>,
    /// Care and growth characteristics
    pub caracteristicas: String,
    /// Full description
    pub descricao: String,
    /// Name of the seeded type this plant belongs to
    pub tipo_planta: String,
}

/// Names of the default plant types, in insertion order.
pub const DEFAULT_TIPOS_PLANTA: [&str; 7] = [
    "Plantas de Interior",
    "Plantas de Exterior",
    "Suculentas",
    "Cactos",
    "Árvores Frutíferas",
    "Flores",
    "Ervas Aromáticas",
];

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            tipos_planta: DEFAULT_TIPOS_PLANTA
                .iter()
                .map(|nome| TipoPlantaSeed {
                    nome: (*nome).to_string(),
                })
                .collect(),
            plantas: default_plantas(),
        }
    }
}

fn default_plantas() -> Vec<PlantaSeed> {
    vec![
        PlantaSeed {
            nome: "Espada de São Jorge".to_string(),
            subtitulo: "Planta resistente e de baixa manutenção".to_string(),
            etiquetas: "interior,resistente,ar purificado".to_string(),
            preco: 45.90,
            esta_em_promocao: false,
            porcentagem_desconto: None,
            caracteristicas: "Baixa manutenção; Tolera ambientes secos; Purifica o ar".to_string(),
            descricao: "A Espada de São Jorge é uma das plantas mais resistentes que existem. \
                        Ela suporta longos períodos sem água e pouca luz, sendo perfeita para \
                        iniciantes ou pessoas que viajam com frequência."
                .to_string(),
            tipo_planta: "Plantas de Interior".to_string(),
        },
        PlantaSeed {
            nome: "Suculenta Echeveria".to_string(),
            subtitulo: "Suculenta com roseta em tons de azul e rosa".to_string(),
            etiquetas: "suculenta,baixa manutenção,decorativa".to_string(),
            preco: 18.90,
            esta_em_promocao: true,
            porcentagem_desconto: Some(10.0),
            caracteristicas: "Roseta compacta; Cores variadas; Pouca água".to_string(),
            descricao: "A Echeveria é uma suculenta popular conhecida por suas rosetas \
                        compactas que podem apresentar tons de azul, rosa e verde. Perfeita \
                        para quem busca plantas fáceis de cuidar."
                .to_string(),
            tipo_planta: "Suculentas".to_string(),
        },
        PlantaSeed {
            nome: "Lírio da Paz".to_string(),
            subtitulo: "Planta elegante com flores brancas".to_string(),
            etiquetas: "interior,flores,purificadora".to_string(),
            preco: 39.90,
            esta_em_promocao: false,
            porcentagem_desconto: None,
            caracteristicas: "Flores brancas; Purifica o ar; Pouca luz".to_string(),
            descricao: "O Lírio da Paz é conhecido por suas flores brancas elegantes e \
                        capacidade de purificar o ar. É uma ótima opção para quem busca beleza \
                        e benefícios para a saúde."
                .to_string(),
            tipo_planta: "Plantas de Interior".to_string(),
        },
    ]
}

/// Loads the seed catalog from a TOML file
///
/// # Returns
/// * `Ok(SeedConfig)` - Parsed catalog, or the built-in one when the file does not exist
/// * `Err(Error)` - The file exists but could not be read or parsed
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!(
            "Seed config {} not found, using built-in catalog",
            path.display()
        );
        return Ok(SeedConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read seed config {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed config {}: {e}", path.display()),
    })
}
