//! This module contains general database utilities.
//!
//! Most notably, it exports [`create_pool()`] and the [`SqlErrorExt`]
//! extension trait, which adds extra methods to [`sqlx::Error`].

use std::num::NonZero;
use std::thread;

use sqlx::pool::PoolOptions;
use sqlx::{MySql, Pool};

use crate::runtime::Config;

mod error;
pub use error::SqlErrorExt;

/// Creates a database connection pool and runs migrations.
pub async fn create_pool(config: &Config) -> sqlx::Result<Pool<MySql>>
{
	let max_connections = config
		.max_connections
		.map_or_else(max_connections, NonZero::get);

	let pool = PoolOptions::new()
		.min_connections(config.min_connections)
		.max_connections(max_connections)
		.connect(config.database_url.as_str())
		.await?;

	sqlx::migrate!("./database/migrations").run(&pool).await?;

	Ok(pool)
}

/// The maximum number of database pool connections to use.
fn max_connections() -> u32
{
	let available = thread::available_parallelism().map_or(1, NonZero::get);

	u32::try_from(available * 2).unwrap_or(u32::MAX)
}
