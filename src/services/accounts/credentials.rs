//! Credential verification schemes.
//!
//! All credential comparison goes through the [`CredentialScheme`] trait so
//! that the storage format can change without touching the account service.
//!
//! The only shipped scheme is [`Plaintext`], which preserves the legacy
//! stored data: passwords are stored verbatim and compared by exact match.
//! This is deferred hardening, not a design endorsement - a real deployment
//! should plug in a scheme that hashes on write and verifies digests on read,
//! then migrate the stored column.

use std::fmt;

/// How to compare a caller-provided credential against the stored one.
pub trait CredentialScheme: fmt::Debug + Send + Sync
{
	/// Checks whether `provided` matches the `stored` credential value.
	fn verify(&self, provided: &str, stored: &str) -> bool;
}

/// Exact-match comparison against plain text storage.
///
/// See the module docs for why this still exists.
#[derive(Debug, Clone, Copy)]
pub struct Plaintext;

impl CredentialScheme for Plaintext
{
	fn verify(&self, provided: &str, stored: &str) -> bool
	{
		provided == stored
	}
}
