//! Postgres adapter for `InventoryRepo`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use arenaforge_domain::{Cosmetic, CosmeticId, CosmeticType, OwnedCosmetic, PlayerId, Rarity};

use crate::infrastructure::ports::{InventoryRepo, RepoError};

pub struct PgInventoryRepo {
    pool: PgPool,
}

impl PgInventoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn cosmetic_from_row(row: &PgRow) -> Result<Cosmetic, RepoError> {
    let cosmetic_type: String = row.try_get("cosmetic_type").map_err(RepoError::from)?;
    let rarity: String = row.try_get("rarity").map_err(RepoError::from)?;
    Ok(Cosmetic {
        id: CosmeticId::new(row.try_get("cosmetic_id").map_err(RepoError::from)?),
        name: row.try_get("name").map_err(RepoError::from)?,
        cosmetic_type: CosmeticType::parse(&cosmetic_type),
        rarity: Rarity::parse(&rarity).map_err(|err| RepoError::Serialization(err.to_string()))?,
        cost: row.try_get("cost").map_err(RepoError::from)?,
        equip_group: row.try_get("equip_group").map_err(RepoError::from)?,
    })
}

#[async_trait]
impl InventoryRepo for PgInventoryRepo {
    async fn list(&self, id: &PlayerId) -> Result<Vec<OwnedCosmetic>, RepoError> {
        let rows = sqlx::query(
            "SELECT c.*, pc.equipped
             FROM player_cosmetics pc
             JOIN cosmetics c USING (cosmetic_id)
             WHERE pc.player_id = $1",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(OwnedCosmetic {
                    cosmetic: cosmetic_from_row(row)?,
                    equipped: row.try_get("equipped").map_err(RepoError::from)?,
                })
            })
            .collect()
    }

    async fn count_owned(&self, id: &PlayerId, cosmetic_id: CosmeticId) -> Result<i64, RepoError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM player_cosmetics WHERE player_id = $1 AND cosmetic_id = $2",
        )
        .bind(id.as_str())
        .bind(cosmetic_id.as_i64())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn insert_unit(&self, id: &PlayerId, cosmetic_id: CosmeticId) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO player_cosmetics (player_id, cosmetic_id) VALUES ($1, $2)")
            .bind(id.as_str())
            .bind(cosmetic_id.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_unit(&self, id: &PlayerId, cosmetic_id: CosmeticId) -> Result<bool, RepoError> {
        // One arbitrary unit; the subselect keeps the delete to a
        // single row.
        let result = sqlx::query(
            "DELETE FROM player_cosmetics
             WHERE id IN (
                 SELECT id FROM player_cosmetics
                 WHERE player_id = $1 AND cosmetic_id = $2
                 LIMIT 1
             )",
        )
        .bind(id.as_str())
        .bind(cosmetic_id.as_i64())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_equipped(
        &self,
        id: &PlayerId,
        cosmetic_id: CosmeticId,
        equipped: bool,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_cosmetics SET equipped = $3
             WHERE player_id = $1 AND cosmetic_id = $2",
        )
        .bind(id.as_str())
        .bind(cosmetic_id.as_i64())
        .bind(equipped)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn unequip_group(&self, id: &PlayerId, equip_group: &str) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE player_cosmetics pc
             SET equipped = FALSE
             FROM cosmetics c
             WHERE pc.player_id = $1
               AND c.equip_group = $2
               AND c.cosmetic_id = pc.cosmetic_id",
        )
        .bind(id.as_str())
        .bind(equip_group)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
