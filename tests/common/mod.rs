//! Shared helpers for the integration tests.
//!
//! Every test gets its own freshly migrated database from `#[sqlx::test]`;
//! these helpers only wire the services up on top of it.

use std::sync::Arc;

use cardroom_api::notifications::{self, XpGainedEvent};
use cardroom_api::services::accounts::{CreateAccountRequest, Plaintext, PlayerID};
use cardroom_api::services::{AccountService, ProgressionService};
use sqlx::MySqlPool;
use tokio::sync::mpsc::UnboundedReceiver;

/// Global constructor that will run before tests.
#[ctor::ctor]
fn ctor()
{
	use tracing_subscriber::EnvFilter;

	tracing_subscriber::fmt()
		.compact()
		.with_test_writer()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}

/// Creates an [`AccountService`] with the plain text credential scheme.
pub fn account_service(pool: &MySqlPool) -> AccountService
{
	AccountService::new(pool.clone(), Arc::new(Plaintext))
}

/// Creates a [`ProgressionService`] along with the receiving half of its
/// notification channel.
pub fn progression_service(pool: &MySqlPool)
-> (ProgressionService, UnboundedReceiver<XpGainedEvent>)
{
	let (tx, rx) = notifications::channel();

	(ProgressionService::new(pool.clone(), tx), rx)
}

/// Registers an account and returns the new player's ID.
pub async fn create_player(accounts: &AccountService, name: &str) -> PlayerID
{
	let response = accounts
		.create_account(CreateAccountRequest {
			name: String::from(name),
			password: String::from("pw"),
			email: format!("{name}@example.com"),
		})
		.await
		.expect("create account");

	assert!(response.created, "fixture account `{name}` already existed");

	response.player_id.expect("created account has an id")
}
