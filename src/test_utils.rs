//! Shared test utilities for `DoubleMoney`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::settings::AppSettings,
    core::{investment, user, wallet},
    entities::{self, InvestmentStatus},
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Returns the reference settings used throughout the tests: 100-100000
/// deposit range, 7 day duration, 2x payout, 10 day referral delay.
#[must_use]
pub fn test_settings() -> AppSettings {
    AppSettings::default()
}

/// Adds a default USDC/ERC20 wallet to the rotation pool.
pub async fn create_test_wallet(db: &DatabaseConnection) -> Result<entities::wallet::Model> {
    wallet::add_wallet(db, "0xtestwallet", "USDC", "ERC20").await
}

/// Registers a user with no referrer.
pub async fn create_test_user(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<entities::user::Model> {
    user::register_user(db, phone, "+1", None).await
}

/// Registers a user referred by `referrer` (via the referrer's code).
pub async fn create_referred_user(
    db: &DatabaseConnection,
    phone: &str,
    referrer: &entities::user::Model,
) -> Result<entities::user::Model> {
    user::register_user(db, phone, "+1", Some(&referrer.referral_code)).await
}

/// Flags a user as holding an active investment without running the full
/// deposit flow. Used to build referral counts quickly.
pub async fn set_has_active_investment(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    let existing = entities::User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(crate::errors::Error::UserNotFound { id: user_id })?;

    let mut model: entities::user::ActiveModel = existing.into();
    model.has_active_investment = Set(true);
    model.update(db).await?;
    Ok(())
}

/// Creates a pending deposit with default currency and withdrawal wallet.
/// A wallet must already exist in the rotation pool.
pub async fn create_test_investment(
    db: &DatabaseConnection,
    user_id: i64,
    amount: f64,
) -> Result<entities::investment::Model> {
    investment::create_deposit(db, &test_settings(), user_id, amount, "USDC", "0xwithdraw").await
}

/// Runs the full deposit flow to a confirmed investment: create, mark the
/// deposit as sent, confirm administratively. Flips the owner's
/// `has_active_investment` flag as the real flow does.
pub async fn confirmed_investment(
    db: &DatabaseConnection,
    owner: &entities::user::Model,
    amount: f64,
) -> Result<entities::investment::Model> {
    let created = create_test_investment(db, owner.id, amount).await?;
    investment::mark_user_confirmed(db, created.id, owner.id).await?;
    investment::confirm_investment(db, &test_settings(), created.id).await
}

/// Inserts a confirmed investment directly, without flipping the owner's
/// `has_active_investment` flag. Used to isolate the zero-percentage edge
/// of the referral cascade.
pub async fn confirmed_investment_without_owner_flag(
    db: &DatabaseConnection,
    owner: &entities::user::Model,
    amount: f64,
) -> Result<entities::investment::Model> {
    let created = create_test_investment(db, owner.id, amount).await?;
    let now = Utc::now();

    let mut model: entities::investment::ActiveModel = created.into();
    model.status = Set(InvestmentStatus::Confirmed);
    model.user_confirmed = Set(true);
    model.start_date = Set(Some(now));
    model.completion_date = Set(Some(now + Duration::days(7)));
    model.update(db).await.map_err(Into::into)
}

/// Moves an investment's completion deadline `days_ago` days into the past
/// so a maturation pass picks it up.
pub async fn backdate_completion(
    db: &DatabaseConnection,
    investment_id: i64,
    days_ago: i64,
) -> Result<()> {
    let existing = entities::Investment::find_by_id(investment_id)
        .one(db)
        .await?
        .ok_or(crate::errors::Error::InvestmentNotFound { id: investment_id })?;

    let mut model: entities::investment::ActiveModel = existing.into();
    model.completion_date = Set(Some(Utc::now() - Duration::days(days_ago)));
    model.update(db).await?;
    Ok(())
}

/// Moves an earning's payout-eligibility date `days_ago` days into the past
/// so it becomes approvable.
pub async fn backdate_payout(
    db: &DatabaseConnection,
    earning_id: i64,
    days_ago: i64,
) -> Result<()> {
    let existing = entities::ReferralEarning::find_by_id(earning_id)
        .one(db)
        .await?
        .ok_or(crate::errors::Error::EarningNotFound { id: earning_id })?;

    let mut model: entities::referral_earning::ActiveModel = existing.into();
    model.payout_date = Set(Utc::now() - Duration::days(days_ago));
    model.update(db).await?;
    Ok(())
}

/// Creates a pending referral earning through the real pipeline: a referrer
/// with one active referral whose 1000.0 investment matures (3% tier).
/// Returns the created earning row.
pub async fn create_test_earning(
    db: &DatabaseConnection,
) -> Result<entities::referral_earning::Model> {
    create_test_wallet(db).await.ok();

    let referrer = create_test_user(db, "+19990001").await?;
    let referred = create_referred_user(db, "+19990002", &referrer).await?;

    let confirmed = confirmed_investment(db, &referred, 1000.0).await?;
    backdate_completion(db, confirmed.id, 1).await?;

    crate::core::maturation::run_maturation_pass(db, &test_settings()).await?;

    let earnings = crate::core::earning::earnings_for_user(db, referrer.id).await?;
    earnings
        .into_iter()
        .next()
        .ok_or(crate::errors::Error::Config {
            message: "test earning was not created".to_string(),
        })
}
