//! User account business logic.
//!
//! Registration resolves an optional referral code into the immutable
//! `referred_by` parent link; the referral forest is built here and never
//! re-parented afterwards.

use crate::{
    core::referral,
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Registers a new user, resolving the optional referral code into the
/// referrer's id. The referral link is fixed at creation and never mutated.
///
/// # Arguments
/// * `db` - Database connection
/// * `phone` - Unique phone identity
/// * `country_code` - Country dialing code
/// * `referral_code` - Code of the referring user, if any
pub async fn register_user(
    db: &DatabaseConnection,
    phone: &str,
    country_code: &str,
    referral_code: Option<&str>,
) -> Result<user::Model> {
    if phone.trim().is_empty() {
        return Err(Error::Config {
            message: "Phone number cannot be empty".to_string(),
        });
    }

    let existing = User::find()
        .filter(user::Column::Phone.eq(phone))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::PhoneAlreadyRegistered {
            phone: phone.to_string(),
        });
    }

    let referred_by = match referral_code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => {
            let referrer = get_user_by_referral_code(db, code).await?;
            match referrer {
                Some(r) => Some(r.id),
                None => {
                    return Err(Error::InvalidReferralCode {
                        code: code.to_string(),
                    });
                }
            }
        }
        None => None,
    };

    let code = referral::generate_referral_code(db).await?;

    let model = user::ActiveModel {
        phone: Set(phone.trim().to_string()),
        country_code: Set(country_code.to_string()),
        withdrawal_wallet: Set(None),
        referral_code: Set(code),
        referred_by: Set(referred_by),
        is_active: Set(true),
        has_active_investment: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Finds a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by their unique phone identity.
pub async fn get_user_by_phone(db: &DatabaseConnection, phone: &str) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Phone.eq(phone))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by their referral code.
pub async fn get_user_by_referral_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::ReferralCode.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Enables or disables a user account (administrative action).
pub async fn set_user_active(
    db: &DatabaseConnection,
    user_id: i64,
    active: bool,
) -> Result<user::Model> {
    let existing = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let mut model: user::ActiveModel = existing.into();
    model.is_active = Set(active);
    model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_register_user_without_referrer() -> Result<()> {
        let db = setup_test_db().await?;

        let user = register_user(&db, "+15550001", "+1", None).await?;
        assert_eq!(user.phone, "+15550001");
        assert_eq!(user.referred_by, None);
        assert!(user.is_active);
        assert!(!user.has_active_investment);
        assert_eq!(user.referral_code.len(), 8);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_user_with_referral_code() -> Result<()> {
        let db = setup_test_db().await?;

        let referrer = register_user(&db, "+15550001", "+1", None).await?;
        let referred =
            register_user(&db, "+15550002", "+1", Some(&referrer.referral_code)).await?;

        assert_eq!(referred.referred_by, Some(referrer.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_user_duplicate_phone_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        register_user(&db, "+15550001", "+1", None).await?;
        let duplicate = register_user(&db, "+15550001", "+1", None).await;
        assert!(matches!(
            duplicate,
            Err(Error::PhoneAlreadyRegistered { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_user_invalid_referral_code_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        let result = register_user(&db, "+15550001", "+1", Some("NOPE1234")).await;
        assert!(matches!(result, Err(Error::InvalidReferralCode { .. })));

        // Nothing was created
        assert!(get_user_by_phone(&db, "+15550001").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_register_user_blank_referral_code_means_no_referrer() -> Result<()> {
        let db = setup_test_db().await?;

        let user = register_user(&db, "+15550001", "+1", Some("  ")).await?;
        assert_eq!(user.referred_by, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_referral_codes_are_unique() -> Result<()> {
        let db = setup_test_db().await?;

        let a = register_user(&db, "+15550001", "+1", None).await?;
        let b = register_user(&db, "+15550002", "+1", None).await?;
        assert_ne!(a.referral_code, b.referral_code);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_user_active_toggles_flag() -> Result<()> {
        let db = setup_test_db().await?;

        let user = register_user(&db, "+15550001", "+1", None).await?;
        let disabled = set_user_active(&db, user.id, false).await?;
        assert!(!disabled.is_active);

        let enabled = set_user_active(&db, user.id, true).await?;
        assert!(enabled.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_user_active_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = set_user_active(&db, 42, false).await;
        assert!(matches!(result, Err(Error::UserNotFound { id: 42 })));

        Ok(())
    }
}
