//! Outbound notification events.
//!
//! The ledger does not talk to game clients directly; when an operation has a
//! user-visible side effect (currently only XP awards on wins), it hands an
//! event to an unbounded channel and moves on. The transport layer owns the
//! receiving half and routes events to the right connection.
//!
//! Delivery is strictly fire-and-forget: the sending half never blocks, and a
//! closed channel (transport shut down, connection gone) is logged and
//! swallowed so the underlying mutation stays committed.

use serde::Serialize;
use tokio::sync::mpsc;

crate::macros::make_id! {
	/// An ID identifying a client connection on the transport layer.
	///
	/// Opaque to this crate; it is only carried through so the transport
	/// layer can route events back to the originating connection.
	ConnectionID as u64
}

/// The wire name of the XP-gained event.
pub const XP_GAINED_EVENT: &str = "onXPGained";

/// A notification about experience a player just gained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XpGainedEvent
{
	/// The connection the event should be routed to.
	pub connection_id: ConnectionID,

	/// How much XP was gained.
	pub xp_gained: u64,

	/// A human readable description of the award.
	pub message: String,
}

/// The sending half of the notification channel.
#[derive(Debug, Clone)]
pub struct NotificationSender
{
	/// The underlying channel.
	tx: mpsc::UnboundedSender<XpGainedEvent>,
}

/// Creates a notification channel.
///
/// The [`NotificationSender`] is handed to the services that emit events; the
/// receiver belongs to the transport layer.
pub fn channel() -> (NotificationSender, mpsc::UnboundedReceiver<XpGainedEvent>)
{
	let (tx, rx) = mpsc::unbounded_channel();

	(NotificationSender { tx }, rx)
}

impl NotificationSender
{
	/// Emits an event.
	///
	/// This never blocks and never fails. If the receiving half is gone the
	/// event is dropped; callers must not treat delivery as part of their
	/// success contract.
	pub fn emit(&self, event: XpGainedEvent)
	{
		if self.tx.send(event).is_err() {
			tracing::warn!(event = XP_GAINED_EVENT, "notification channel closed; event dropped");
		}
	}
}
