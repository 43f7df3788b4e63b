//! Identity types for authenticated users.
//!
//! An [`Identity`] is the role-tagged record produced by a successful
//! credential check. It never carries the secret it was authenticated
//! with; the secret is checked and discarded by the session manager.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The functional role a user acts under.
///
/// Roles are tags only; the core performs no authorization beyond
/// carrying the role for the view layer to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
	/// Waiters and other front-of-house staff.
	FrontOfHouse,
	/// Kitchen staff working the order board.
	Kitchen,
	/// Administrators with access to the admin shell.
	Admin,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::FrontOfHouse => write!(f, "front-of-house"),
			Role::Kitchen => write!(f, "kitchen"),
			Role::Admin => write!(f, "admin"),
		}
	}
}

/// The authenticated user record.
///
/// This is the value held as the current session and written to the
/// persisted session slot, so it must serialize cleanly. It is a
/// projection of a credential directory entry with the secret excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	/// Unique identifier for this user.
	pub id: String,
	/// Login name, unique within the directory.
	pub username: String,
	/// Functional role of the user.
	pub role: Role,
	/// Human-readable name shown in the UI chrome.
	pub display_name: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_wire_names() {
		assert_eq!(
			serde_json::to_string(&Role::FrontOfHouse).unwrap(),
			"\"front-of-house\""
		);
		assert_eq!(serde_json::to_string(&Role::Kitchen).unwrap(), "\"kitchen\"");
		assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
		let role: Role = serde_json::from_str("\"front-of-house\"").unwrap();
		assert_eq!(role, Role::FrontOfHouse);
	}

	#[test]
	fn test_identity_round_trip() {
		let identity = Identity {
			id: "u-3".into(),
			username: "kim".into(),
			role: Role::Kitchen,
			display_name: "Kim Lee".into(),
		};
		let json = serde_json::to_string(&identity).unwrap();
		let back: Identity = serde_json::from_str(&json).unwrap();
		assert_eq!(back, identity);
		assert!(!json.contains("secret"));
	}
}
