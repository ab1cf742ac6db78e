//! The errors that can occur when interacting with this service.

use thiserror::Error;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the account service.
///
/// Domain non-results ("name already taken", "no such player") are not
/// errors; they are carried in the response models. This enum only covers
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum Error
{
	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}
