//! Referral earning entity - A commission owed to a referrer.
//!
//! Created by the maturation scanner when a referred user's investment
//! completes. Status moves monotonically `pending -> approved -> paid`;
//! approval is gated on the payout-eligibility date, payment on approval.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a referral earning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum EarningStatus {
    /// Created by the scanner, waiting out the payout delay
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Admin approved after the payout date passed
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Paid out; `paid_at` is set
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Referral earning database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "referral_earnings")]
pub struct Model {
    /// Unique identifier for the earning
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the referrer who receives the commission
    pub user_id: i64,
    /// ID of the referred investor whose maturation triggered this earning
    pub from_user_id: i64,
    /// ID of the matured investment the commission is computed from
    pub investment_id: i64,
    /// Commission amount in dollars
    pub amount: f64,
    /// Commission percentage applied, stored for audit
    pub percentage: i32,
    /// Current lifecycle status
    pub status: EarningStatus,
    /// Earliest time the earning may be approved for payout
    pub payout_date: DateTimeUtc,
    /// When the earning was created
    pub created_at: DateTimeUtc,
    /// When the earning was paid, None until status is `paid`
    pub paid_at: Option<DateTimeUtc>,
}

/// Defines relationships between `ReferralEarning` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each earning belongs to one beneficiary referrer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each earning references the matured investment it derives from
    #[sea_orm(
        belongs_to = "super::investment::Entity",
        from = "Column::InvestmentId",
        to = "super::investment::Column::Id"
    )]
    Investment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::investment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
