//! Referral tier business logic.
//!
//! The commission table is the single source of truth for referral
//! percentages: the maturation scanner sizes new commissions with it and the
//! display layer derives tier/progress views from it. A referral counts as
//! active when the referred user currently holds the `has_active_investment`
//! flag.

use crate::{
    config::settings::AppSettings,
    entities::{User, user},
    errors::Result,
};
use rand::Rng;
use sea_orm::prelude::*;

/// Commission tiers as (inclusive lower bound of active referrals, percentage),
/// highest threshold first.
const TIERS: [(u64, i32); 5] = [(50, 25), (30, 20), (15, 12), (5, 8), (1, 3)];

/// Thresholds indexed by tier level, used for progress calculations.
const LEVEL_THRESHOLDS: [u64; 6] = [0, 1, 5, 15, 30, 50];

const REFERRAL_CODE_LEN: usize = 8;
const REFERRAL_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Returns the commission percentage for a referrer with the given number of
/// active downstream referrals.
///
/// Total over all non-negative counts, deterministic, and non-decreasing.
#[must_use]
pub fn commission_percentage_for(active_referral_count: u64) -> i32 {
    for (threshold, percentage) in TIERS {
        if active_referral_count >= threshold {
            return percentage;
        }
    }
    0
}

/// Returns the tier level (0-5) and its commission percentage for the given
/// active referral count.
#[must_use]
pub fn referral_level(active_referral_count: u64) -> (u8, i32) {
    for (index, (threshold, percentage)) in TIERS.iter().enumerate() {
        if active_referral_count >= *threshold {
            // TIERS is ordered highest first, so index 0 is level 5
            let level = (TIERS.len() - index) as u8;
            return (level, *percentage);
        }
    }
    (0, 0)
}

/// Returns the next tier threshold and its commission percentage, or `None`
/// with the maximum percentage once the top tier is reached.
#[must_use]
pub fn next_tier_requirement(active_referral_count: u64) -> (Option<u64>, i32) {
    for (threshold, percentage) in TIERS.iter().rev() {
        if active_referral_count < *threshold {
            return (Some(*threshold), *percentage);
        }
    }
    (None, TIERS[0].1)
}

/// Returns the display name for a tier level.
#[must_use]
pub fn level_name(level: u8) -> &'static str {
    match level {
        0 => "Starter",
        1 => "Bronze",
        2 => "Silver",
        3 => "Gold",
        4 => "Platinum",
        5 => "Diamond",
        _ => "Unknown",
    }
}

/// Returns the benefit description for a tier level.
#[must_use]
pub fn level_benefits(level: u8) -> &'static str {
    match level {
        0 => "Start referring friends to unlock rewards",
        1 => "Earn 3% on all referral investments",
        2 => "Earn 8% on all referral investments",
        3 => "Earn 12% on all referral investments",
        4 => "Earn 20% on all referral investments",
        5 => "Maximum tier: Earn 25% on all referral investments",
        _ => "",
    }
}

/// Builds the referral link users share, based on the configured site URL.
#[must_use]
pub fn referral_link(settings: &AppSettings, referral_code: &str) -> String {
    format!(
        "{}/register?ref={referral_code}",
        settings.site_url.trim_end_matches('/')
    )
}

/// Complete referral standing for a user, used for progress-bar style display.
/// Has no bearing on commission computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferralStatus {
    /// Number of referred users currently flagged as active investors
    pub active_referrals: u64,
    /// Current tier level (0-5)
    pub current_level: u8,
    /// Commission percentage at the current tier
    pub current_percentage: i32,
    /// Active referrals needed for the next tier, None at the top
    pub next_required: Option<u64>,
    /// Commission percentage at the next tier (max percentage at the top)
    pub next_percentage: i32,
    /// Progress through the current tier band, 0-100
    pub progress_percentage: f64,
    /// How many more active referrals reach the next tier
    pub remaining_referrals: u64,
    /// Whether the top tier is reached
    pub is_max_level: bool,
}

/// Computes the full referral standing from an active referral count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn referral_status_for_count(active_referrals: u64) -> ReferralStatus {
    let (current_level, current_percentage) = referral_level(active_referrals);
    let (next_required, next_percentage) = next_tier_requirement(active_referrals);

    let (progress_percentage, remaining_referrals) = match next_required {
        Some(next) => {
            let current_threshold = LEVEL_THRESHOLDS[usize::from(current_level)];
            let progress_in_level = (active_referrals - current_threshold) as f64;
            let level_range = (next - current_threshold) as f64;
            (
                (progress_in_level / level_range * 100.0).min(100.0),
                next - active_referrals,
            )
        }
        None => (100.0, 0),
    };

    ReferralStatus {
        active_referrals,
        current_level,
        current_percentage,
        next_required,
        next_percentage,
        progress_percentage,
        remaining_referrals,
        is_max_level: next_required.is_none(),
    }
}

/// Counts the referrer's downstream referrals currently flagged as holding
/// an active investment. This is the input the commission table is keyed on.
pub async fn active_referral_count<C>(db: &C, referrer_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::ReferredBy.eq(referrer_id))
        .filter(user::Column::HasActiveInvestment.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the complete referral standing for a user.
pub async fn referral_status(db: &DatabaseConnection, user_id: i64) -> Result<ReferralStatus> {
    let count = active_referral_count(db, user_id).await?;
    Ok(referral_status_for_count(count))
}

/// Generates a referral code not yet assigned to any user.
///
/// Codes are 8 uppercase-alphanumeric characters; collisions are retried.
pub async fn generate_referral_code(db: &DatabaseConnection) -> Result<String> {
    loop {
        let code: String = {
            let mut rng = rand::thread_rng();
            (0..REFERRAL_CODE_LEN)
                .map(|_| {
                    let idx = rng.gen_range(0..REFERRAL_CODE_ALPHABET.len());
                    REFERRAL_CODE_ALPHABET[idx] as char
                })
                .collect()
        };

        let taken = User::find()
            .filter(user::Column::ReferralCode.eq(code.as_str()))
            .one(db)
            .await?;

        if taken.is_none() {
            return Ok(code);
        }
    }
}
