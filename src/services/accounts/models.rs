//! Request / Response types for this service.

use std::fmt;

use serde::Serialize;

crate::macros::make_id! {
	/// An ID uniquely identifying a player.
	///
	/// Assigned by the database at account creation and immutable afterwards;
	/// all mutations are keyed by it, never by the (mutable) name.
	PlayerID as u64
}

/// Request payload for creating a new account.
pub struct CreateAccountRequest
{
	/// The login / display name. Must be globally unique.
	pub name: String,

	/// The credential value, stored as-is by the configured scheme.
	pub password: String,

	/// Contact address. Not validated for uniqueness.
	pub email: String,
}

impl fmt::Debug for CreateAccountRequest
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("CreateAccountRequest")
			.field("name", &self.name)
			.field("password", &"*****")
			.field("email", &self.email)
			.finish()
	}
}

/// Response payload for creating a new account.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CreateAccountResponse
{
	/// Whether a new account was created.
	///
	/// `false` means the name was already taken; this is a normal outcome,
	/// not an error, and nothing was modified.
	pub created: bool,

	/// The new player's ID, when one was created.
	pub player_id: Option<PlayerID>,
}

/// Request payload for logging in.
pub struct LoginRequest
{
	/// The login name.
	pub name: String,

	/// The credential to verify.
	pub password: String,
}

impl fmt::Debug for LoginRequest
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("LoginRequest")
			.field("name", &self.name)
			.field("password", &"*****")
			.finish()
	}
}

/// Response payload for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse
{
	/// The player's ID.
	pub player_id: PlayerID,

	/// The player's name.
	pub name: String,
}

/// The values needed to populate a client session after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserParameters
{
	/// The player's ID.
	pub player_id: PlayerID,

	/// The player's name.
	pub name: String,

	/// The player's currency balance.
	pub money: i64,

	/// How many rounds the player has won.
	pub win_count: u32,

	/// How many rounds the player has lost.
	pub lose_count: u32,
}

/// Response payload for the conditional update operations.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdatePlayerResponse
{
	/// Whether a row was updated.
	///
	/// `false` means no player with the given ID exists (or, for renames,
	/// that the new name collided with an existing one). Nothing was
	/// modified in that case.
	pub updated: bool,
}

/// A read-only projection of a player's progression values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PlayerStatistics
{
	/// The player's ID.
	#[sqlx(rename = "id")]
	pub player_id: PlayerID,

	/// The player's name.
	pub name: String,

	/// The player's currency balance.
	pub money: i64,

	/// How many rounds the player has won.
	pub win_count: u32,

	/// How many rounds the player has lost.
	pub lose_count: u32,

	/// The player's experience.
	pub xp: u64,
}

/// A single leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RankingEntry
{
	/// The player's name.
	pub name: String,

	/// The player's experience.
	pub xp: u64,

	/// How many rounds the player has won.
	pub win_count: u32,

	/// How many rounds the player has lost.
	pub lose_count: u32,
}

/// Response payload for fetching the leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct RankingsResponse
{
	/// At most the top 50 players, ordered by XP descending.
	///
	/// Empty when no players exist.
	pub ranks: Vec<RankingEntry>,
}

/// The stored row both login-style lookups read.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct CredentialsRow
{
	/// The player's ID.
	pub id: PlayerID,

	/// The player's name.
	pub name: String,

	/// The stored credential value.
	pub password: String,

	/// The player's currency balance.
	pub money: i64,

	/// How many rounds the player has won.
	pub win_count: u32,

	/// How many rounds the player has lost.
	pub lose_count: u32,
}
