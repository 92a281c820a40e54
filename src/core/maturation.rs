//! Maturation scanner business logic.
//!
//! Converts matured investments into realized payouts and cascades referral
//! commissions. A pass selects every confirmed, not-yet-completed investment
//! whose completion deadline has passed, doubles its principal, and creates a
//! pending referral earning for the investor's referrer when the referrer's
//! tier yields a nonzero percentage. The whole pass commits as one
//! transaction; a failure rolls everything back and the next pass retries.
//! The selection predicate excludes already-completed investments, so passes
//! are idempotent.

use crate::{
    config::settings::AppSettings,
    core::referral,
    entities::{EarningStatus, Investment, InvestmentStatus, User, investment, referral_earning},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*};

/// Commission created while maturing a single investment.
#[derive(Debug, Clone)]
pub struct EarningCreated {
    /// The referrer the commission is owed to
    pub referrer_id: i64,
    /// Commission amount in dollars
    pub amount: f64,
    /// Percentage the referrer's tier yielded
    pub percentage: i32,
}

/// Represents the result of maturing a single investment.
#[derive(Debug, Clone)]
pub struct MaturedInvestment {
    /// The investment that was finalized
    pub investment_id: i64,
    /// The investing user
    pub user_id: i64,
    /// Principal deposit amount
    pub principal: f64,
    /// Doubled payout written to the investment
    pub final_amount: f64,
    /// Referral commission, if the owner has a referrer with a nonzero tier
    pub earning: Option<EarningCreated>,
}

/// Represents the result of one full maturation pass.
#[derive(Debug, Clone)]
pub struct MaturationPassResult {
    /// Detailed results for each investment matured this pass
    pub matured: Vec<MaturedInvestment>,
    /// Number of referral earnings created
    pub earnings_created: usize,
    /// When the pass ran
    pub run_at: DateTime<Utc>,
}

/// Runs one maturation pass. This function:
///
/// 1. Selects investments with `status == confirmed`, a completion deadline
///    at or before now, and `is_completed == false`
/// 2. For each: marks it completed and writes `final_amount = amount ×
///    payout_multiplier`
/// 3. If the owner was referred, asks the tier calculator for the referrer's
///    percentage and, when nonzero, creates a pending referral earning with
///    its payout-eligibility delay
///
/// An investment whose owner has no referrer matures with no commission; a
/// referrer below the first tier yields no earning.
pub async fn run_maturation_pass(
    db: &DatabaseConnection,
    settings: &AppSettings,
) -> Result<MaturationPassResult> {
    let txn = db.begin().await?;

    let now = Utc::now();
    let mut matured = Vec::new();
    let mut earnings_created = 0;

    let due = Investment::find()
        .filter(investment::Column::Status.eq(InvestmentStatus::Confirmed))
        .filter(investment::Column::CompletionDate.lte(now))
        .filter(investment::Column::IsCompleted.eq(false))
        .all(&txn)
        .await?;

    for inv in due {
        // The selection predicate guarantees a deadline; a confirmed row
        // without one is a broken invariant, not a runtime condition.
        debug_assert!(
            inv.completion_date.is_some(),
            "confirmed investment {} has no completion date",
            inv.id
        );

        let final_amount = inv.amount * settings.payout_multiplier;

        let mut model: investment::ActiveModel = inv.clone().into();
        model.status = Set(InvestmentStatus::Completed);
        model.is_completed = Set(true);
        model.final_amount = Set(Some(final_amount));
        model.update(&txn).await?;

        let owner = User::find_by_id(inv.user_id)
            .one(&txn)
            .await?
            .ok_or(Error::UserNotFound { id: inv.user_id })?;

        let mut earning = None;
        if let Some(referrer_id) = owner.referred_by {
            if let Some(referrer) = User::find_by_id(referrer_id).one(&txn).await? {
                let active_referrals = referral::active_referral_count(&txn, referrer.id).await?;
                let percentage = referral::commission_percentage_for(active_referrals);

                if percentage > 0 {
                    let amount = inv.amount * f64::from(percentage) / 100.0;
                    let earning_model = referral_earning::ActiveModel {
                        user_id: Set(referrer.id),
                        from_user_id: Set(owner.id),
                        investment_id: Set(inv.id),
                        amount: Set(amount),
                        percentage: Set(percentage),
                        status: Set(EarningStatus::Pending),
                        payout_date: Set(now + Duration::days(settings.referral_payout_days)),
                        created_at: Set(now),
                        paid_at: Set(None),
                        ..Default::default()
                    };
                    earning_model.insert(&txn).await?;

                    earnings_created += 1;
                    earning = Some(EarningCreated {
                        referrer_id: referrer.id,
                        amount,
                        percentage,
                    });
                }
            }
        }

        matured.push(MaturedInvestment {
            investment_id: inv.id,
            user_id: inv.user_id,
            principal: inv.amount,
            final_amount,
            earning,
        });
    }

    // Commit the transaction - the whole pass succeeds or none of it does
    txn.commit().await?;

    Ok(MaturationPassResult {
        matured,
        earnings_created,
        run_at: now,
    })
}

/// Formats a maturation pass result into a human-readable summary string.
/// This is useful for logging the outcome of a scheduled pass.
#[must_use]
pub fn format_maturation_summary(result: &MaturationPassResult) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Maturation pass - matured {} investment(s), created {} referral earning(s)\n",
        result.matured.len(),
        result.earnings_created
    );

    for item in &result.matured {
        // write! is infallible when writing to String, so unwrap is safe
        write!(
            summary,
            "  investment #{} (user {}) | ${:.2} -> ${:.2}",
            item.investment_id, item.user_id, item.principal, item.final_amount
        )
        .unwrap();

        if let Some(earning) = &item.earning {
            write!(
                summary,
                " | {}% commission of ${:.2} to referrer {}",
                earning.percentage, earning.amount, earning.referrer_id
            )
            .unwrap();
        }

        summary.push('\n');
    }

    summary
}
