//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod investment;
pub mod referral_earning;
pub mod user;
pub mod wallet;

// Re-export specific types to avoid conflicts
pub use investment::{
    Column as InvestmentColumn, Entity as Investment, InvestmentStatus, Model as InvestmentModel,
};
pub use referral_earning::{
    Column as ReferralEarningColumn, EarningStatus, Entity as ReferralEarning,
    Model as ReferralEarningModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use wallet::{Column as WalletColumn, Entity as Wallet, Model as WalletModel};
