//! Request / Response types for this service.

use serde::Serialize;

use crate::notifications::ConnectionID;
use crate::services::accounts::PlayerID;

crate::macros::make_id! {
	/// An ID uniquely identifying a statistic snapshot.
	///
	/// Auto-incremented by the database; insertion order is the only
	/// ordering key the time series has.
	SnapshotID as u64
}

/// Request payload for recording a won round.
#[derive(Debug, Clone, Copy)]
pub struct RecordWinRequest
{
	/// The winning player.
	pub player_id: PlayerID,

	/// The connection the XP notification should be routed to.
	pub connection_id: ConnectionID,

	/// Whether this win is part of a winning streak, doubling the XP award.
	///
	/// Determined by the game-round layer, not here.
	pub is_win_streak: bool,
}

/// Response payload for the increment-style operations.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressionUpdateResponse
{
	/// Whether a row was updated.
	///
	/// `false` means no player with the given ID exists; nothing was
	/// modified and no notification was emitted.
	pub updated: bool,
}

/// Request payload for appending a statistic snapshot.
///
/// The values are a point-in-time copy supplied by the game-round layer;
/// this service does not re-read the player row, so a snapshot and the
/// counter updates around it are deliberately not transactional.
#[derive(Debug, Clone, Copy)]
pub struct AppendSnapshotRequest
{
	/// The owning player.
	pub player_id: PlayerID,

	/// The player's balance at snapshot time.
	pub money: i64,

	/// The player's win count at snapshot time.
	pub win_count: u32,

	/// The player's lose count at snapshot time.
	pub lose_count: u32,
}

/// Response payload for appending a statistic snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AppendSnapshotResponse
{
	/// Whether a snapshot was inserted.
	///
	/// `false` means the player ID is unknown (foreign key rejection).
	pub inserted: bool,

	/// The new snapshot's ID, when one was inserted.
	pub snapshot_id: Option<SnapshotID>,
}

/// A single point of a player's history chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ChartPoint
{
	/// The player's balance at snapshot time.
	pub money: i64,

	/// The player's win count at snapshot time.
	pub win_count: u32,

	/// The player's lose count at snapshot time.
	pub lose_count: u32,
}

/// Response payload for fetching a player's history chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeriesResponse
{
	/// The most recent 150 snapshots, oldest first.
	///
	/// Empty when the player has no snapshots (or does not exist); that is
	/// a normal result, not an error.
	pub points: Vec<ChartPoint>,
}
