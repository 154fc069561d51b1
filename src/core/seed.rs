//! Seeding of reference and sample data.
//!
//! Each seeding step only runs against an empty table and inserts its whole set
//! inside one transaction: either every row is committed or none is. A table that
//! already holds rows is left untouched and the step reports zero inserted rows.

use crate::{
    config::seed::{PlantaSeed, SeedConfig, TipoPlantaSeed},
    entities::{Planta, TipoPlanta, planta, tipo_planta},
    errors::{Error, Result},
};
use sea_orm::{DatabaseTransaction, PaginatorTrait, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Image path stored for sample plants when `default.png` was published.
pub const DEFAULT_IMAGE_PATH: &str = "/images/default.png";
/// Image path stored for sample plants when no default image asset exists.
pub const PLACEHOLDER_IMAGE_PATH: &str = "/images/placeholder.png";

/// Number of rows inserted by each seeding step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Plant types inserted
    pub tipos_planta: usize,
    /// Sample plants inserted
    pub plantas: usize,
}

/// Seeds plant types, resolves the default image, then seeds sample plants.
///
/// # Errors
/// Returns the first failing step. Steps completed before it stay committed.
#[instrument(skip(db, seed))]
pub async fn seed_database(
    db: &DatabaseConnection,
    seed: &SeedConfig,
    assets_dir: &Path,
    public_dir: &Path,
) -> Result<SeedSummary> {
    let tipos_planta = seed_tipos_planta(db, &seed.tipos_planta).await?;
    let image_path = setup_default_image(assets_dir, public_dir)?;
    let plantas = seed_plantas(db, &seed.plantas, &image_path).await?;

    let summary = SeedSummary {
        tipos_planta,
        plantas,
    };
    info!(?summary, "Database seeding completed");
    Ok(summary)
}

/// Inserts the given plant types if `tipos_planta` is empty.
///
/// # Returns
/// The number of inserted types, 0 when the table already had rows.
///
/// # Errors
/// Returns `Error::Seed` if any insert fails; no type is kept in that case.
#[instrument(skip(db, tipos))]
pub async fn seed_tipos_planta(db: &DatabaseConnection, tipos: &[TipoPlantaSeed]) -> Result<usize> {
    let existing = TipoPlanta::find().count(db).await?;
    if existing > 0 {
        info!("Plant types already present ({}), skipping seed", existing);
        return Ok(0);
    }

    info!("Seeding {} plant types", tipos.len());
    let txn = db.begin().await?;
    for tipo in tipos {
        let inserted = tipo_planta::ActiveModel {
            nome: Set(tipo.nome.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        match inserted {
            Ok(model) => debug!("Plant type {:?} inserted with id {}", model.nome, model.id),
            Err(e) => {
                return rollback(
                    txn,
                    format!("failed to insert plant type {:?}: {e}", tipo.nome),
                )
                .await;
            }
        }
    }
    txn.commit().await?;

    info!("All {} plant types seeded", tipos.len());
    Ok(tipos.len())
}

/// Inserts the given sample plants if `plantas` is empty.
///
/// Plants reference their type by name; the name must match a stored type.
///
/// # Returns
/// The number of inserted plants, 0 when the table already had rows.
///
/// # Errors
/// Returns `Error::Seed` if a type name is unknown or any insert fails; no plant
/// is kept in that case.
#[instrument(skip(db, plantas))]
pub async fn seed_plantas(
    db: &DatabaseConnection,
    plantas: &[PlantaSeed],
    image_path: &str,
) -> Result<usize> {
    let existing = Planta::find().count(db).await?;
    if existing > 0 {
        info!("Plants already present ({}), skipping seed", existing);
        return Ok(0);
    }

    let tipo_ids: HashMap<String, i64> = TipoPlanta::find()
        .all(db)
        .await?
        .into_iter()
        .map(|tipo| (tipo.nome, tipo.id))
        .collect();

    info!("Seeding {} sample plants", plantas.len());
    let txn = db.begin().await?;
    for seed in plantas {
        let Some(&tipo_planta_id) = tipo_ids.get(&seed.tipo_planta) else {
            return rollback(
                txn,
                format!(
                    "plant {:?} references unknown type {:?}",
                    seed.nome, seed.tipo_planta
                ),
            )
            .await;
        };

        let inserted = sample_planta(seed, tipo_planta_id, image_path)
            .insert(&txn)
            .await;

        match inserted {
            Ok(model) => debug!("Plant {:?} inserted with id {}", model.nome, model.id),
            Err(e) => {
                return rollback(txn, format!("failed to insert plant {:?}: {e}", seed.nome))
                    .await;
            }
        }
    }
    txn.commit().await?;

    info!("All {} sample plants seeded", plantas.len());
    Ok(plantas.len())
}

/// Publishes `<assets>/default.png` as `<public>/images/default.png` and returns the
/// path sample plants should reference.
///
/// Falls back to the placeholder path when the asset does not exist. An already
/// published image is not overwritten.
///
/// # Errors
/// Returns an error if the image directory cannot be created or the copy fails.
pub fn setup_default_image(assets_dir: &Path, public_dir: &Path) -> Result<String> {
    let source = assets_dir.join("default.png");
    if !source.exists() {
        warn!(
            "{} not found, using {}",
            source.display(),
            PLACEHOLDER_IMAGE_PATH
        );
        return Ok(PLACEHOLDER_IMAGE_PATH.to_string());
    }

    let images_dir = public_dir.join("images");
    std::fs::create_dir_all(&images_dir)?;

    let destination = images_dir.join("default.png");
    if destination.exists() {
        debug!("{} already published", destination.display());
    } else {
        std::fs::copy(&source, &destination)?;
        info!("Default image copied to {}", destination.display());
    }

    Ok(DEFAULT_IMAGE_PATH.to_string())
}

fn sample_planta(seed: &PlantaSeed, tipo_planta_id: i64, image_path: &str) -> planta::ActiveModel {
    planta::ActiveModel {
        nome: Set(seed.nome.clone()),
        subtitulo: Set(seed.subtitulo.clone()),
        etiquetas: Set(seed.etiquetas.clone()),
        preco: Set(seed.preco),
        esta_em_promocao: Set(seed.esta_em_promocao),
        porcentagem_desconto: Set(seed.porcentagem_desconto.filter(|_| seed.esta_em_promocao)),
        caracteristicas: Set(seed.caracteristicas.clone()),
        descricao: Set(seed.descricao.clone()),
        url_imagem: Set(image_path.to_string()),
        tipo_planta_id: Set(tipo_planta_id),
        ..Default::default()
    }
}

async fn rollback<T>(txn: DatabaseTransaction, message: String) -> Result<T> {
    warn!("Rolling back seed: {}", message);
    txn.rollback().await?;
    Err(Error::Seed { message })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::seed::DEFAULT_TIPOS_PLANTA;
    use crate::core::{planta::list_plantas, tipo_planta::list_tipos_planta};
    use crate::test_utils::*;

    fn tipos(nomes: &[&str]) -> Vec<TipoPlantaSeed> {
        nomes
            .iter()
            .map(|nome| TipoPlantaSeed {
                nome: (*nome).to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_seed_tipos_on_empty_table() -> Result<()> {
        let db = setup_test_db().await?;

        let inserted = seed_tipos_planta(&db, &SeedConfig::default().tipos_planta).await?;
        assert_eq!(inserted, 7);

        let stored = list_tipos_planta(&db).await?;
        let nomes: Vec<&str> = stored.iter().map(|t| t.nome.as_str()).collect();
        assert_eq!(nomes, DEFAULT_TIPOS_PLANTA);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_tipos_is_skipped_when_not_empty() -> Result<()> {
        let db = setup_seeded_tipos_db().await?;

        let inserted = seed_tipos_planta(&db, &tipos(&["Bonsais"])).await?;
        assert_eq!(inserted, 0);
        assert_eq!(list_tipos_planta(&db).await?.len(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_tipos_failure_rolls_back_every_insert() -> Result<()> {
        let db = setup_test_db().await?;

        let result = seed_tipos_planta(&db, &tipos(&["Flores", "Cactos", "  "])).await;
        assert!(matches!(result, Err(Error::Seed { .. })));
        assert!(list_tipos_planta(&db).await?.is_empty());

        // The table is still empty, so a later valid seed goes through.
        assert_eq!(seed_tipos_planta(&db, &tipos(&["Flores"])).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_plantas_references_types_by_name() -> Result<()> {
        let db = setup_seeded_tipos_db().await?;

        let inserted =
            seed_plantas(&db, &SeedConfig::default().plantas, PLACEHOLDER_IMAGE_PATH).await?;
        assert_eq!(inserted, 3);

        let plantas = list_plantas(&db).await?;
        assert_eq!(plantas[0].nome, "Espada de São Jorge");
        assert_eq!(plantas[0].tipo_planta_id, 1);
        assert_eq!(plantas[1].tipo_planta_id, 3);
        assert!(plantas[1].esta_em_promocao);
        assert!(
            plantas
                .iter()
                .all(|p| p.url_imagem == PLACEHOLDER_IMAGE_PATH)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_plantas_unknown_type_rolls_back() -> Result<()> {
        let db = setup_seeded_tipos_db().await?;
        let mut plantas = SeedConfig::default().plantas;
        plantas[2].tipo_planta = "Bonsais".to_string();

        let result = seed_plantas(&db, &plantas, DEFAULT_IMAGE_PATH).await;
        assert!(matches!(result, Err(Error::Seed { .. })));
        assert!(list_plantas(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_database_twice_is_a_noop() -> Result<()> {
        let db = setup_test_db().await?;
        let dir = tempfile::tempdir()?;
        let assets = dir.path().join("assets");
        let public = dir.path().join("public");

        let first = seed_database(&db, &SeedConfig::default(), &assets, &public).await?;
        assert_eq!(
            first,
            SeedSummary {
                tipos_planta: 7,
                plantas: 3
            }
        );

        let second = seed_database(&db, &SeedConfig::default(), &assets, &public).await?;
        assert_eq!(second, SeedSummary::default());
        assert_eq!(list_plantas(&db).await?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_default_image_falls_back_to_placeholder() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let public = dir.path().join("public");

        let path = setup_default_image(&dir.path().join("assets"), &public)?;
        assert_eq!(path, PLACEHOLDER_IMAGE_PATH);
        assert!(!public.exists());
        Ok(())
    }

    #[test]
    fn test_default_image_is_published_once() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let assets = dir.path().join("assets");
        let public = dir.path().join("public");
        std::fs::create_dir_all(&assets)?;
        std::fs::write(assets.join("default.png"), b"png")?;

        assert_eq!(setup_default_image(&assets, &public)?, DEFAULT_IMAGE_PATH);
        let published = public.join("images").join("default.png");
        assert_eq!(std::fs::read(&published)?, b"png");

        std::fs::write(&published, b"edited")?;
        assert_eq!(setup_default_image(&assets, &public)?, DEFAULT_IMAGE_PATH);
        assert_eq!(std::fs::read(&published)?, b"edited");
        Ok(())
    }
}
