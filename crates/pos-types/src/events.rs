//! Event types published to the view layer.
//!
//! The core does not call into the view; instead it publishes events on a
//! broadcast bus so the view layer can re-render whatever changed. Events
//! are informational only, never a substitute for the read accessors.

use crate::{Identity, OrderStatus};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all core events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PosEvent {
	/// Events from the session manager.
	Session(SessionEvent),
	/// Events from the order board.
	Board(BoardEvent),
}

/// Events related to the session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
	/// A login attempt succeeded.
	LoggedIn { identity: Identity },
	/// A login attempt was rejected.
	LoginFailed { username: String },
	/// The current session was cleared.
	LoggedOut,
	/// A persisted session was restored at startup.
	Restored { identity: Identity },
}

/// Events related to the order board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoardEvent {
	/// An order moved to the next status collection.
	Advanced {
		order_id: String,
		from: OrderStatus,
		to: OrderStatus,
	},
}
