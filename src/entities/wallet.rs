//! Wallet entity - A deposit address in the platform's rotation pool.
//!
//! Wallets are never consumed by a deposit; assignment simply picks any
//! active wallet matching the requested currency and network.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wallet database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    /// Unique identifier for the wallet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// On-chain deposit address
    #[sea_orm(unique)]
    pub address: String,
    /// Currency this wallet accepts: `"USDC"` or `"USDT"`
    pub currency: String,
    /// Network the address lives on: `"ERC20"` or `"TRC20"`
    pub network: String,
    /// Whether the wallet is currently in the assignment rotation
    pub is_active: bool,
    /// When the wallet was added to the pool
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Wallet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One wallet is assigned to many investments
    #[sea_orm(has_many = "super::investment::Entity")]
    Investments,
}

impl Related<super::investment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
