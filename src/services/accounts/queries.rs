//! SQL queries shared between operations in this service.

/// Selects the credential row used by both login and session parameter
/// lookups.
pub(super) const SELECT_BY_NAME: &str = r"
	SELECT
	  id,
	  name,
	  password,
	  money,
	  win_count,
	  lose_count
	FROM
	  Players
	WHERE
	  name = ?
";
