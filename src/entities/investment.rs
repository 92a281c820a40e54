//! Investment entity - A user's deposit and its progress toward payout.
//!
//! Status moves monotonically along `pending -> confirmed -> completed`,
//! with `cancelled` reachable only from `pending` or `confirmed`. The
//! timestamps and `final_amount` are populated as the status advances:
//! `start_date`/`completion_date` at confirmation, `final_amount` when the
//! maturation scanner completes the investment.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an investment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum InvestmentStatus {
    /// Deposit created, waiting for the user to send funds and admin review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Admin verified the deposit; the maturation clock is running
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Matured by the scanner; `final_amount` is set
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Rejected or withdrawn before completion
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Investment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    /// Unique identifier for the investment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who made the deposit
    pub user_id: i64,
    /// ID of the deposit wallet assigned to this investment
    pub wallet_id: i64,
    /// Principal deposit amount in dollars
    pub amount: f64,
    /// Current lifecycle status
    pub status: InvestmentStatus,
    /// Whether the user asserted they sent the funds
    pub user_confirmed: bool,
    /// When the investment was confirmed, None while pending
    pub start_date: Option<DateTimeUtc>,
    /// Deadline after which the scanner matures the investment
    pub completion_date: Option<DateTimeUtc>,
    /// Doubled payout, set only when `is_completed` is true
    pub final_amount: Option<f64>,
    /// Whether the maturation scanner has finalized this investment
    pub is_completed: bool,
    /// When the deposit request was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Investment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each investment belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each investment is assigned one deposit wallet
    #[sea_orm(
        belongs_to = "super::wallet::Entity",
        from = "Column::WalletId",
        to = "super::wallet::Column::Id"
    )]
    Wallet,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
