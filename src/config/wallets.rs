//! Deposit wallet seeding from config.toml
//!
//! The wallets defined under `[[wallets]]` in config.toml are used to seed
//! the rotation pool on startup. Seeding is idempotent: addresses already
//! present in the database are left untouched.

use crate::core;
use crate::entities::{Wallet, wallet};
use crate::errors::Result;
use sea_orm::{DatabaseConnection, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Configuration for a single deposit wallet
#[derive(Debug, Deserialize, Clone)]
pub struct WalletSeed {
    /// On-chain deposit address
    pub address: String,
    /// Currency the wallet accepts (e.g., "USDC")
    pub currency: String,
    /// Network the address lives on (e.g., "ERC20")
    pub network: String,
}

/// Inserts any configured wallets that are not yet in the pool.
///
/// # Arguments
/// * `db` - Database connection
/// * `seeds` - Wallet entries from config.toml
///
/// # Returns
/// The number of wallets newly inserted
pub async fn seed_wallets(db: &DatabaseConnection, seeds: &[WalletSeed]) -> Result<usize> {
    let mut inserted = 0;

    for seed in seeds {
        let existing = Wallet::find()
            .filter(wallet::Column::Address.eq(seed.address.as_str()))
            .one(db)
            .await?;

        if existing.is_none() {
            core::wallet::add_wallet(db, &seed.address, &seed.currency, &seed.network).await?;
            inserted += 1;
        }
    }

    if inserted > 0 {
        info!("Seeded {inserted} deposit wallet(s) from configuration");
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn sample_seeds() -> Vec<WalletSeed> {
        vec![
            WalletSeed {
                address: "0xseed1".to_string(),
                currency: "USDC".to_string(),
                network: "ERC20".to_string(),
            },
            WalletSeed {
                address: "Tseed2".to_string(),
                currency: "USDT".to_string(),
                network: "TRC20".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_seed_wallets_inserts_missing() -> Result<()> {
        let db = setup_test_db().await?;

        let inserted = seed_wallets(&db, &sample_seeds()).await?;
        assert_eq!(inserted, 2);

        let count = Wallet::find().all(&db).await?.len();
        assert_eq!(count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_wallets_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        seed_wallets(&db, &sample_seeds()).await?;
        let second = seed_wallets(&db, &sample_seeds()).await?;
        assert_eq!(second, 0);

        let count = Wallet::find().all(&db).await?.len();
        assert_eq!(count, 2);

        Ok(())
    }
}
