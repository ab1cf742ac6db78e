//! Ledger services.
//!
//! These contain the core business logic. The transport layer constructs them
//! once on startup (sharing a single database pool) and invokes their
//! operations with already-authenticated identities.

pub mod accounts;
pub use accounts::AccountService;

pub mod progression;
pub use progression::ProgressionService;
