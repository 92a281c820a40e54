//! Referral earning business logic - the approve/pay administrative actions.
//!
//! Earnings are created only by the maturation scanner; this module advances
//! them along `pending -> approved -> paid`. Approval is gated on the
//! payout-eligibility date, payment on prior approval.

use crate::{
    entities::{EarningStatus, ReferralEarning, referral_earning},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Approves a pending earning for payout.
///
/// Legal only if the earning is `pending` and its payout-eligibility date
/// has passed.
pub async fn approve_earning(
    db: &DatabaseConnection,
    earning_id: i64,
) -> Result<referral_earning::Model> {
    let existing = ReferralEarning::find_by_id(earning_id)
        .one(db)
        .await?
        .ok_or(Error::EarningNotFound { id: earning_id })?;

    if existing.status != EarningStatus::Pending || Utc::now() < existing.payout_date {
        return Err(Error::TransitionRejected {
            message: format!("earning {earning_id} cannot be approved yet"),
        });
    }

    let mut model: referral_earning::ActiveModel = existing.into();
    model.status = Set(EarningStatus::Approved);
    model.update(db).await.map_err(Into::into)
}

/// Marks an approved earning as paid and records the payment time.
///
/// Legal only from `approved`.
pub async fn pay_earning(
    db: &DatabaseConnection,
    earning_id: i64,
) -> Result<referral_earning::Model> {
    let existing = ReferralEarning::find_by_id(earning_id)
        .one(db)
        .await?
        .ok_or(Error::EarningNotFound { id: earning_id })?;

    if existing.status != EarningStatus::Approved {
        return Err(Error::TransitionRejected {
            message: format!("earning {earning_id} must be approved before it is paid"),
        });
    }

    let mut model: referral_earning::ActiveModel = existing.into();
    model.status = Set(EarningStatus::Paid);
    model.paid_at = Set(Some(Utc::now()));
    model.update(db).await.map_err(Into::into)
}

/// Finds an earning by id.
pub async fn get_earning_by_id(
    db: &DatabaseConnection,
    earning_id: i64,
) -> Result<Option<referral_earning::Model>> {
    ReferralEarning::find_by_id(earning_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a referrer's earnings, newest first.
pub async fn earnings_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<referral_earning::Model>> {
    ReferralEarning::find()
        .filter(referral_earning::Column::UserId.eq(user_id))
        .order_by_desc(referral_earning::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
