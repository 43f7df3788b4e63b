//! Secure string type for credential secrets.
//!
//! [`Passcode`] wraps a secret so that the backing memory is zeroed on
//! drop and the value is redacted in logs, debug output, and serialized
//! forms. The session manager compares passcodes during login and never
//! stores them on the resulting identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A login secret that is zeroed on drop and never printed.
#[derive(Clone)]
pub struct Passcode(Zeroizing<String>);

impl Passcode {
	/// Wraps an owned string as a passcode.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the secret for comparison.
	///
	/// Callers must not log or persist the returned slice.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true if the passcode is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for Passcode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Passcode(***)")
	}
}

impl fmt::Display for Passcode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***")
	}
}

impl From<&str> for Passcode {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl PartialEq for Passcode {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for Passcode {}

// Serialization always redacts; a passcode never round-trips through
// storage or logs.
impl Serialize for Passcode {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***")
	}
}

impl<'de> Deserialize<'de> for Passcode {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(Passcode::new(s))
	}
}
