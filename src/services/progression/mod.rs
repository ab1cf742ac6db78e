//! A service for recording game progression.
//!
//! This composes account mutations into game-meaningful updates (win/loss
//! processing, rewarded-ad credits) and maintains the append-only statistic
//! time series behind the history charts.
//!
//! Every increment here is a single `UPDATE` statement so that the storage
//! engine's row-level atomicity covers concurrent rounds finishing for the
//! same player; there is no application-level read-modify-write anywhere in
//! this module.

use std::fmt;

use sqlx::{MySql, Pool};

use crate::database::SqlErrorExt;
use crate::notifications::{NotificationSender, XpGainedEvent};
use crate::services::accounts::PlayerID;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{
	AppendSnapshotRequest,
	AppendSnapshotResponse,
	ChartPoint,
	ChartSeriesResponse,
	ProgressionUpdateResponse,
	RecordWinRequest,
	SnapshotID,
};

/// XP awarded for winning a round.
const WIN_XP: u64 = 100;

/// XP awarded for winning a round as part of a winning streak.
const WIN_STREAK_XP: u64 = 200;

/// Currency credited for a rewarded-ad view.
const REWARDED_AD_MONEY: i64 = 2000;

/// XP credited for a rewarded-ad view.
const REWARDED_AD_XP: u64 = 100;

/// How many snapshots the history chart returns at most.
const CHART_LIMIT: u32 = 150;

/// A service for recording game progression.
#[derive(Clone)]
pub struct ProgressionService
{
	/// The database pool, shared with the other services.
	database: Pool<MySql>,

	/// Outbound channel for XP notifications.
	notifications: NotificationSender,
}

impl fmt::Debug for ProgressionService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("ProgressionService").finish_non_exhaustive()
	}
}

impl ProgressionService
{
	/// Create a new [`ProgressionService`].
	#[tracing::instrument]
	pub fn new(database: Pool<MySql>, notifications: NotificationSender) -> Self
	{
		Self { database, notifications }
	}

	/// Records a won round.
	///
	/// Atomically increments the player's win count by 1 and XP by 100 (200
	/// on a winning streak). On success an [`XpGainedEvent`] is emitted for
	/// the originating connection; delivery is fire-and-forget and has no
	/// bearing on this operation's outcome. When the player does not exist,
	/// nothing is changed and no event is emitted.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn record_win(&self, req: RecordWinRequest) -> Result<ProgressionUpdateResponse>
	{
		let xp_gained = if req.is_win_streak { WIN_STREAK_XP } else { WIN_XP };

		let update_result = sqlx::query(
			r"
			UPDATE
			  Players
			SET
			  win_count = win_count + 1,
			  xp = xp + ?
			WHERE
			  id = ?
			",
		)
		.bind(xp_gained)
		.bind(req.player_id)
		.execute(&self.database)
		.await?;

		if update_result.rows_affected() == 0 {
			return Ok(ProgressionUpdateResponse { updated: false });
		}

		tracing::info! {
			player_id = %req.player_id,
			xp_gained,
			win_streak = req.is_win_streak,
			"recorded win",
		};

		self.notifications.emit(XpGainedEvent {
			connection_id: req.connection_id,
			xp_gained,
			message: format!(
				"You won the round{}",
				if req.is_win_streak { " (Win streak bonus)" } else { "" },
			),
		});

		Ok(ProgressionUpdateResponse { updated: true })
	}

	/// Records a lost round.
	///
	/// Atomically increments the player's lose count by 1. No XP, no
	/// notification.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn record_loss(&self, player_id: PlayerID) -> Result<ProgressionUpdateResponse>
	{
		let update_result = sqlx::query(
			r"
			UPDATE
			  Players
			SET
			  lose_count = lose_count + 1
			WHERE
			  id = ?
			",
		)
		.bind(player_id)
		.execute(&self.database)
		.await?;

		let updated = update_result.rows_affected() > 0;

		if updated {
			tracing::info!(%player_id, "recorded loss");
		}

		Ok(ProgressionUpdateResponse { updated })
	}

	/// Credits a rewarded-ad view.
	///
	/// Atomically increments the player's money by 2000, ad counter by 1,
	/// and XP by 100, all in one statement.
	///
	/// This trusts the caller's claim that an ad was actually shown.
	// TODO: require a server-side ad-network callback token before applying
	// the credit; as-is any caller can invoke this as a cheat.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn credit_rewarded_ad(&self, player_id: PlayerID)
	-> Result<ProgressionUpdateResponse>
	{
		let update_result = sqlx::query(
			r"
			UPDATE
			  Players
			SET
			  money = money + ?,
			  rew_ad_count = rew_ad_count + 1,
			  xp = xp + ?
			WHERE
			  id = ?
			",
		)
		.bind(REWARDED_AD_MONEY)
		.bind(REWARDED_AD_XP)
		.bind(player_id)
		.execute(&self.database)
		.await?;

		let updated = update_result.rows_affected() > 0;

		if updated {
			tracing::info!(%player_id, "credited rewarded ad");
		}

		Ok(ProgressionUpdateResponse { updated })
	}

	/// Appends one immutable snapshot to a player's statistic time series.
	///
	/// There is deliberately no shared transaction with the counter updates
	/// that usually precede this call; a missing snapshot after a crash is a
	/// tolerated inconsistency, the counters are the source of truth.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn append_statistic_snapshot(&self, req: AppendSnapshotRequest)
	-> Result<AppendSnapshotResponse>
	{
		let insert_result = sqlx::query(
			r"
			INSERT INTO
			  PlayerStatistics (user_id, money, win_count, lose_count)
			VALUES
			  (?, ?, ?, ?)
			",
		)
		.bind(req.player_id)
		.bind(req.money)
		.bind(req.win_count)
		.bind(req.lose_count)
		.execute(&self.database)
		.await;

		match insert_result {
			Ok(result) => {
				let snapshot_id = SnapshotID(result.last_insert_id());

				tracing::debug!(player_id = %req.player_id, %snapshot_id, "appended snapshot");

				Ok(AppendSnapshotResponse { inserted: true, snapshot_id: Some(snapshot_id) })
			}
			Err(error) if error.is_fk_violation("user_id") => {
				tracing::debug!(player_id = %req.player_id, "snapshot for unknown player");

				Ok(AppendSnapshotResponse { inserted: false, snapshot_id: None })
			}
			Err(error) => Err(error.into()),
		}
	}

	/// Fetches a player's history chart.
	///
	/// The policy is "the most recent 150 data points, in chronological
	/// order": the query pages newest-first (truncating an oldest-first
	/// query would return ancient history instead of the recent window) and
	/// the page is then reversed in memory so the caller sees oldest-first.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn chart_series(&self, player_id: PlayerID) -> Result<ChartSeriesResponse>
	{
		let mut points = sqlx::query_as::<_, ChartPoint>(
			r"
			SELECT
			  money,
			  win_count,
			  lose_count
			FROM
			  PlayerStatistics
			WHERE
			  user_id = ?
			ORDER BY
			  id DESC
			LIMIT
			  ?
			",
		)
		.bind(player_id)
		.bind(CHART_LIMIT)
		.fetch_all(&self.database)
		.await?;

		points.reverse();

		Ok(ChartSeriesResponse { points })
	}
}
