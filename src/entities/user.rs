//! User entity - Represents a platform account and a node in the referral forest.
//!
//! `referred_by` points at the user who referred this account. It is resolved
//! from a referral code at registration and never mutated afterwards, so the
//! referral graph is a forest by construction. `has_active_investment` is a
//! fast-path signal consumed by the referral tier calculation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Phone number used as the login identity
    #[sea_orm(unique)]
    pub phone: String,
    /// Country dialing code (e.g., "+1")
    pub country_code: String,
    /// Address the user's payout is sent to, set on first deposit
    pub withdrawal_wallet: Option<String>,
    /// Generated share code other users register with
    #[sea_orm(unique)]
    pub referral_code: String,
    /// Id of the user who referred this account, None for roots of the forest
    pub referred_by: Option<i64>,
    /// Whether the account may log in and deposit
    pub is_active: bool,
    /// Set when an investment of this user is confirmed; counted by the
    /// referrer's tier calculation
    pub has_active_investment: bool,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many investments
    #[sea_orm(has_many = "super::investment::Entity")]
    Investments,
}

impl Related<super::investment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
