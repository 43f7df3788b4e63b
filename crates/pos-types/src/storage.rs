//! Storage key tags for persisted data.

use std::str::FromStr;

/// Namespaces for the key-value store.
///
/// Replaces loose string literals in storage calls with typed variants.
/// The session slot is the only durable data in this system; orders live
/// purely in memory and are re-seeded on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Namespace for the persisted session slot.
	Session,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Session => "session",
		}
	}

	/// Returns an iterator over all StorageKey variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[Self::Session].into_iter()
	}
}

impl FromStr for StorageKey {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"session" => Ok(Self::Session),
			_ => Err(()),
		}
	}
}

impl From<StorageKey> for &'static str {
	fn from(key: StorageKey) -> Self {
		key.as_str()
	}
}

/// Fixed id of the single session slot within the [`StorageKey::Session`]
/// namespace.
pub const SESSION_SLOT_ID: &str = "current";
