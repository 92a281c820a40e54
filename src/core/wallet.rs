//! Wallet pool business logic.
//!
//! Deposit wallets stay in rotation permanently; a deposit is assigned any
//! active wallet matching its currency. Administrative operations add
//! wallets and toggle them in or out of the rotation.

use crate::{
    entities::{Wallet, wallet},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Maps a supported currency to the network its deposit addresses live on.
pub fn network_for_currency(currency: &str) -> Result<&'static str> {
    match currency {
        "USDC" => Ok("ERC20"),
        "USDT" => Ok("TRC20"),
        _ => Err(Error::UnsupportedCurrency {
            currency: currency.to_string(),
        }),
    }
}

/// Adds a wallet to the rotation pool, rejecting duplicate addresses and
/// unsupported currencies.
pub async fn add_wallet<C>(
    db: &C,
    address: &str,
    currency: &str,
    network: &str,
) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    if address.trim().is_empty() {
        return Err(Error::Config {
            message: "Wallet address cannot be empty".to_string(),
        });
    }

    network_for_currency(currency)?;

    let existing = Wallet::find()
        .filter(wallet::Column::Address.eq(address))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateWallet {
            address: address.to_string(),
        });
    }

    let model = wallet::ActiveModel {
        address: Set(address.trim().to_string()),
        currency: Set(currency.to_string()),
        network: Set(network.to_string()),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Moves a wallet in or out of the assignment rotation.
pub async fn set_wallet_active(
    db: &DatabaseConnection,
    wallet_id: i64,
    active: bool,
) -> Result<wallet::Model> {
    let existing = Wallet::find_by_id(wallet_id)
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })?;

    let mut model: wallet::ActiveModel = existing.into();
    model.is_active = Set(active);
    model.update(db).await.map_err(Into::into)
}

/// Picks an active wallet for the given currency, or reports that none is
/// available. Wallets are not consumed; repeated assignments may return the
/// same wallet.
pub async fn assign_deposit_wallet<C>(db: &C, currency: &str) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    let network = network_for_currency(currency)?;

    Wallet::find()
        .filter(wallet::Column::Currency.eq(currency))
        .filter(wallet::Column::Network.eq(network))
        .filter(wallet::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or(Error::NoWalletAvailable {
            currency: currency.to_string(),
        })
}

/// Lists the whole wallet pool, newest first, for administrative display.
pub async fn get_all_wallets(db: &DatabaseConnection) -> Result<Vec<wallet::Model>> {
    Wallet::find()
        .order_by_desc(wallet::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_network_for_currency() {
        assert_eq!(network_for_currency("USDC").unwrap(), "ERC20");
        assert_eq!(network_for_currency("USDT").unwrap(), "TRC20");
        assert!(matches!(
            network_for_currency("BTC"),
            Err(Error::UnsupportedCurrency { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_wallet_and_duplicate_rejection() -> Result<()> {
        let db = setup_test_db().await?;

        let wallet = add_wallet(&db, "0xabc", "USDC", "ERC20").await?;
        assert_eq!(wallet.address, "0xabc");
        assert!(wallet.is_active);

        let duplicate = add_wallet(&db, "0xabc", "USDC", "ERC20").await;
        assert!(matches!(duplicate, Err(Error::DuplicateWallet { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_wallet_rejects_empty_address() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_wallet(&db, "   ", "USDC", "ERC20").await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_deposit_wallet_matches_currency() -> Result<()> {
        let db = setup_test_db().await?;

        add_wallet(&db, "0xusdc", "USDC", "ERC20").await?;
        add_wallet(&db, "Tusdt", "USDT", "TRC20").await?;

        let assigned = assign_deposit_wallet(&db, "USDT").await?;
        assert_eq!(assigned.address, "Tusdt");
        assert_eq!(assigned.network, "TRC20");

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_deposit_wallet_skips_inactive() -> Result<()> {
        let db = setup_test_db().await?;

        let wallet = add_wallet(&db, "0xusdc", "USDC", "ERC20").await?;
        set_wallet_active(&db, wallet.id, false).await?;

        let result = assign_deposit_wallet(&db, "USDC").await;
        assert!(matches!(result, Err(Error::NoWalletAvailable { .. })));

        // Back into rotation, assignment succeeds again
        set_wallet_active(&db, wallet.id, true).await?;
        let assigned = assign_deposit_wallet(&db, "USDC").await?;
        assert_eq!(assigned.id, wallet.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_wallet_active_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = set_wallet_active(&db, 999, false).await;
        assert!(matches!(result, Err(Error::WalletNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_wallets_stay_in_rotation_after_assignment() -> Result<()> {
        let db = setup_test_db().await?;

        add_wallet(&db, "0xusdc", "USDC", "ERC20").await?;

        let first = assign_deposit_wallet(&db, "USDC").await?;
        let second = assign_deposit_wallet(&db, "USDC").await?;
        assert_eq!(first.id, second.id);

        Ok(())
    }
}
