//! A service for managing player accounts.
//!
//! This owns the `Players` table: creation, login, session parameters,
//! administrative name/money overwrites, and the leaderboard read-model.

use std::fmt;
use std::sync::Arc;

use sqlx::{MySql, Pool};

use crate::database::SqlErrorExt;

mod queries;

mod error;
pub use error::{Error, Result};

mod credentials;
pub use credentials::{CredentialScheme, Plaintext};

pub(crate) mod models;
pub use models::{
	CreateAccountRequest,
	CreateAccountResponse,
	LoginRequest,
	LoginResponse,
	PlayerID,
	PlayerStatistics,
	RankingEntry,
	RankingsResponse,
	UpdatePlayerResponse,
	UserParameters,
};

use models::CredentialsRow;

/// How many players the leaderboard returns at most.
const RANKINGS_LIMIT: u32 = 50;

/// A service for managing player accounts.
#[derive(Clone)]
pub struct AccountService
{
	/// The database pool, shared with the other services.
	database: Pool<MySql>,

	/// How stored credentials are compared. See [`credentials`] for why the
	/// only shipped scheme is [`Plaintext`].
	credentials: Arc<dyn CredentialScheme>,
}

impl fmt::Debug for AccountService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("AccountService").finish_non_exhaustive()
	}
}

impl AccountService
{
	/// Create a new [`AccountService`].
	#[tracing::instrument]
	pub fn new(database: Pool<MySql>, credentials: Arc<dyn CredentialScheme>) -> Self
	{
		Self { database, credentials }
	}

	/// Creates a new account, unless the name is already taken.
	///
	/// Name uniqueness is enforced by the storage layer (a `UNIQUE` key), so
	/// this is a single conditional insert with no check-then-insert race;
	/// a collision yields `created = false` without modifying anything. New
	/// rows get their starting balance and zeroed counters from the column
	/// defaults.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn create_account(&self, req: CreateAccountRequest)
	-> Result<CreateAccountResponse>
	{
		let insert_result = sqlx::query(
			r"
			INSERT INTO
			  Players (name, password, email)
			VALUES
			  (?, ?, ?)
			",
		)
		.bind(&req.name)
		.bind(&req.password)
		.bind(&req.email)
		.execute(&self.database)
		.await;

		match insert_result {
			Ok(result) => {
				let player_id = PlayerID(result.last_insert_id());

				tracing::info!(%player_id, name = %req.name, "created new account");

				Ok(CreateAccountResponse { created: true, player_id: Some(player_id) })
			}
			Err(error) if error.is_duplicate_entry() => {
				tracing::debug!(name = %req.name, "account name already taken");

				Ok(CreateAccountResponse { created: false, player_id: None })
			}
			Err(error) => Err(error.into()),
		}
	}

	/// Verifies a player's credentials.
	///
	/// This will return `Ok(None)` if no player with that name exists or the
	/// credential does not match; the two cases are deliberately not
	/// distinguishable by the caller.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn login(&self, req: LoginRequest) -> Result<Option<LoginResponse>>
	{
		let res = self
			.fetch_verified(&req.name, &req.password)
			.await?
			.map(|row| LoginResponse { player_id: row.id, name: row.name });

		Ok(res)
	}

	/// Fetches the values needed to populate a client session.
	///
	/// Same lookup as [`login()`], projected to identity, balance, and round
	/// counters. Idempotent for unchanged state.
	///
	/// [`login()`]: AccountService::login
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn logged_in_user_parameters(&self, req: LoginRequest)
	-> Result<Option<UserParameters>>
	{
		let res = self
			.fetch_verified(&req.name, &req.password)
			.await?
			.map(|row| UserParameters {
				player_id: row.id,
				name: row.name,
				money: row.money,
				win_count: row.win_count,
				lose_count: row.lose_count,
			});

		Ok(res)
	}

	/// Overwrites a player's name.
	///
	/// `updated = false` means either no player with that ID exists, or the
	/// new name collided with another player's (the `UNIQUE` key rejects the
	/// write). Either way nothing was modified.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn update_player_name(&self, player_id: PlayerID, new_name: &str)
	-> Result<UpdatePlayerResponse>
	{
		let update_result = sqlx::query(
			r"
			UPDATE
			  Players
			SET
			  name = ?
			WHERE
			  id = ?
			",
		)
		.bind(new_name)
		.bind(player_id)
		.execute(&self.database)
		.await;

		let updated = match update_result {
			Ok(result) => result.rows_affected() > 0,
			Err(error) if error.is_duplicate_entry() => {
				tracing::debug!(%player_id, new_name, "rename collided with existing name");

				false
			}
			Err(error) => return Err(error.into()),
		};

		if updated {
			tracing::info!(%player_id, new_name, "updated player name");
		}

		Ok(UpdatePlayerResponse { updated })
	}

	/// Overwrites a player's currency balance.
	///
	/// This is an absolute set, not a delta; no non-negativity is enforced
	/// here, callers are responsible for the value they write.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn update_player_money(&self, player_id: PlayerID, money: i64)
	-> Result<UpdatePlayerResponse>
	{
		let update_result = sqlx::query(
			r"
			UPDATE
			  Players
			SET
			  money = ?
			WHERE
			  id = ?
			",
		)
		.bind(money)
		.bind(player_id)
		.execute(&self.database)
		.await?;

		let updated = update_result.rows_affected() > 0;

		if updated {
			tracing::info!(%player_id, money, "updated player money");
		}

		Ok(UpdatePlayerResponse { updated })
	}

	/// Fetches a read-only projection of a player's progression values.
	///
	/// This will return `Ok(None)` if the player was not found, but
	/// everything else went fine.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn player_statistics(&self, player_id: PlayerID)
	-> Result<Option<PlayerStatistics>>
	{
		let res = sqlx::query_as::<_, PlayerStatistics>(
			r"
			SELECT
			  id,
			  name,
			  money,
			  win_count,
			  lose_count,
			  xp
			FROM
			  Players
			WHERE
			  id = ?
			",
		)
		.bind(player_id)
		.fetch_optional(&self.database)
		.await?;

		Ok(res)
	}

	/// Fetches the leaderboard.
	///
	/// At most the top 50 players by XP, descending. An empty list is a
	/// normal result when no players exist.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn rankings(&self) -> Result<RankingsResponse>
	{
		let ranks = sqlx::query_as::<_, RankingEntry>(
			r"
			SELECT
			  name,
			  xp,
			  win_count,
			  lose_count
			FROM
			  Players
			ORDER BY
			  xp DESC
			LIMIT
			  ?
			",
		)
		.bind(RANKINGS_LIMIT)
		.fetch_all(&self.database)
		.await?;

		Ok(RankingsResponse { ranks })
	}

	/// Fetches a player row by name and verifies the credential against it.
	async fn fetch_verified(&self, name: &str, password: &str)
	-> Result<Option<CredentialsRow>>
	{
		let Some(row) = sqlx::query_as::<_, CredentialsRow>(queries::SELECT_BY_NAME)
			.bind(name)
			.fetch_optional(&self.database)
			.await?
		else {
			return Ok(None);
		};

		if !self.credentials.verify(password, &row.password) {
			return Ok(None);
		}

		Ok(Some(row))
	}
}
