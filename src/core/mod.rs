//! Core business logic - framework-agnostic investment, referral, and
//! maturation operations. These modules are the boundary an interface layer
//! (web or otherwise) calls into; none of them know about HTTP or sessions.

/// Referral earning approval and payment actions
pub mod earning;
/// Deposit creation and the investment state-transition guard
pub mod investment;
/// The recurring maturation scanner pass
pub mod maturation;
/// Referral tier calculation and progress views
pub mod referral;
/// Registration and account management
pub mod user;
/// Deposit wallet pool management and assignment
pub mod wallet;
