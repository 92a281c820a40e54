//! Investment business logic - deposit creation and the state-transition guard.
//!
//! Status moves only along `pending -> confirmed -> completed`, with
//! `cancelled` reachable from `pending` or `confirmed`. Every transition is
//! guarded here; illegal calls return [`Error::TransitionRejected`] and leave
//! the row untouched. The `completed` transition itself belongs to the
//! maturation scanner, not to this module.

use crate::{
    config::settings::AppSettings,
    core::wallet,
    entities::{Investment, InvestmentStatus, User, investment, user},
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Countdown until maturation, for user-facing status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    /// Whole days remaining
    pub days: i64,
    /// Hours remaining within the day
    pub hours: i64,
    /// Minutes remaining within the hour
    pub minutes: i64,
    /// Seconds remaining within the minute
    pub seconds: i64,
}

/// Read-only snapshot of an investment's progress, for the status endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentStatusView {
    /// Current lifecycle status
    pub status: InvestmentStatus,
    /// Whether the scanner has finalized the investment
    pub is_completed: bool,
    /// Countdown to maturation; None unless confirmed with time left
    pub time_remaining: Option<TimeRemaining>,
    /// Doubled payout once completed
    pub final_amount: Option<f64>,
}

/// Creates a pending deposit: validates the amount against the configured
/// limits, stores the user's withdrawal wallet, and assigns an active deposit
/// wallet for the currency. Applied as a single transaction.
pub async fn create_deposit(
    db: &DatabaseConnection,
    settings: &AppSettings,
    user_id: i64,
    amount: f64,
    currency: &str,
    withdrawal_wallet: &str,
) -> Result<investment::Model> {
    if !amount.is_finite() || amount < settings.min_deposit || amount > settings.max_deposit {
        return Err(Error::InvalidAmount { amount });
    }

    if withdrawal_wallet.trim().is_empty() {
        return Err(Error::Config {
            message: "Withdrawal wallet address is required".to_string(),
        });
    }

    let txn = db.begin().await?;

    let owner = User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let assigned = wallet::assign_deposit_wallet(&txn, currency).await?;

    let mut owner_model: user::ActiveModel = owner.into();
    owner_model.withdrawal_wallet = Set(Some(withdrawal_wallet.trim().to_string()));
    owner_model.update(&txn).await?;

    let model = investment::ActiveModel {
        user_id: Set(user_id),
        wallet_id: Set(assigned.id),
        amount: Set(amount),
        status: Set(InvestmentStatus::Pending),
        user_confirmed: Set(false),
        start_date: Set(None),
        completion_date: Set(None),
        final_amount: Set(None),
        is_completed: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = model.insert(&txn).await?;
    txn.commit().await?;

    Ok(result)
}

/// Records the user's assertion that they sent the deposit. The only
/// transition triggerable by the investing user themself.
///
/// Legal only while the investment is `pending` and not already flagged.
pub async fn mark_user_confirmed(
    db: &DatabaseConnection,
    investment_id: i64,
    user_id: i64,
) -> Result<investment::Model> {
    let existing = Investment::find_by_id(investment_id)
        .filter(investment::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::InvestmentNotFound { id: investment_id })?;

    if existing.status != InvestmentStatus::Pending || existing.user_confirmed {
        return Err(Error::TransitionRejected {
            message: format!("investment {investment_id} is already confirmed or not pending"),
        });
    }

    let mut model: investment::ActiveModel = existing.into();
    model.user_confirmed = Set(true);
    model.update(db).await.map_err(Into::into)
}

/// Confirms a pending investment (administrative action): starts the
/// maturation clock and flags the owner as an active investor.
///
/// Legal only if the investment is `pending` and the user asserted they sent
/// funds. Status flip, timestamps, and the owner flag commit atomically.
pub async fn confirm_investment(
    db: &DatabaseConnection,
    settings: &AppSettings,
    investment_id: i64,
) -> Result<investment::Model> {
    let txn = db.begin().await?;

    let existing = Investment::find_by_id(investment_id)
        .one(&txn)
        .await?
        .ok_or(Error::InvestmentNotFound { id: investment_id })?;

    if existing.status != InvestmentStatus::Pending || !existing.user_confirmed {
        return Err(Error::TransitionRejected {
            message: format!(
                "investment {investment_id} cannot be confirmed: it must be pending with the \
                 deposit marked as sent"
            ),
        });
    }

    let owner = User::find_by_id(existing.user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound {
            id: existing.user_id,
        })?;

    let now = Utc::now();
    let mut model: investment::ActiveModel = existing.into();
    model.status = Set(InvestmentStatus::Confirmed);
    model.start_date = Set(Some(now));
    model.completion_date = Set(Some(now + Duration::days(settings.investment_duration_days)));
    let updated = model.update(&txn).await?;

    let mut owner_model: user::ActiveModel = owner.into();
    owner_model.has_active_investment = Set(true);
    owner_model.update(&txn).await?;

    txn.commit().await?;

    Ok(updated)
}

/// Cancels an investment (administrative action).
///
/// Legal only from `pending` or `confirmed`; a completed investment can
/// never be cancelled.
pub async fn cancel_investment(
    db: &DatabaseConnection,
    investment_id: i64,
) -> Result<investment::Model> {
    let existing = Investment::find_by_id(investment_id)
        .one(db)
        .await?
        .ok_or(Error::InvestmentNotFound { id: investment_id })?;

    if !matches!(
        existing.status,
        InvestmentStatus::Pending | InvestmentStatus::Confirmed
    ) {
        return Err(Error::TransitionRejected {
            message: format!(
                "investment {investment_id} cannot be cancelled from status {:?}",
                existing.status
            ),
        });
    }

    let mut model: investment::ActiveModel = existing.into();
    model.status = Set(InvestmentStatus::Cancelled);
    model.update(db).await.map_err(Into::into)
}

/// Returns the owning user's view of an investment: status, completion flag,
/// payout, and the countdown to maturation.
///
/// `time_remaining` is present only while the investment is `confirmed` and
/// its completion deadline lies in the future.
pub async fn investment_status(
    db: &DatabaseConnection,
    investment_id: i64,
    user_id: i64,
) -> Result<InvestmentStatusView> {
    let existing = Investment::find_by_id(investment_id)
        .filter(investment::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::InvestmentNotFound { id: investment_id })?;

    let time_remaining = match (existing.status, existing.completion_date) {
        (InvestmentStatus::Confirmed, Some(deadline)) => {
            let remaining = deadline - Utc::now();
            (remaining.num_seconds() > 0).then(|| {
                let total = remaining.num_seconds();
                TimeRemaining {
                    days: total / 86_400,
                    hours: (total % 86_400) / 3_600,
                    minutes: (total % 3_600) / 60,
                    seconds: total % 60,
                }
            })
        }
        _ => None,
    };

    Ok(InvestmentStatusView {
        status: existing.status,
        is_completed: existing.is_completed,
        time_remaining,
        final_amount: existing.final_amount,
    })
}

/// Finds an investment by id.
pub async fn get_investment_by_id(
    db: &DatabaseConnection,
    investment_id: i64,
) -> Result<Option<investment::Model>> {
    Investment::find_by_id(investment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a user's investments, newest first, for dashboard display.
pub async fn get_investments_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<investment::Model>> {
    Investment::find()
        .filter(investment::Column::UserId.eq(user_id))
        .order_by_desc(investment::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
