//! Session management for the point-of-service core.
//!
//! The session manager owns the current authenticated identity. Credentials
//! are checked against a fixed directory; a successful login is mirrored
//! into a single persisted storage slot so the session survives a restart,
//! and logout removes the slot again. At most one identity is current at a
//! time.

use pos_storage::{StorageError, StorageService};
use pos_types::{Identity, Passcode, StorageKey, SESSION_SLOT_ID};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

mod directory;

use directory::DIRECTORY;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
	/// The username/secret pair did not match any directory entry.
	///
	/// Deliberately carries no detail about which half was wrong.
	#[error("Authentication failed")]
	AuthenticationFailed,
	/// The session slot could not be written or removed.
	#[error("Storage error: {0}")]
	Storage(String),
}

/// Manages the session lifecycle and the persisted session slot.
///
/// Invariant: while an identity is current, the slot holds exactly that
/// identity; while none is, the slot is absent. `login` persists before
/// updating the in-memory state so a storage failure cannot leave the two
/// disagreeing.
pub struct SessionService {
	/// Storage service holding the persisted session slot.
	storage: Arc<StorageService>,
	/// Artificial latency applied to every login attempt.
	login_delay: Duration,
	/// The current authenticated identity, if any.
	current: RwLock<Option<Identity>>,
}

impl SessionService {
	/// Creates a new SessionService over the given storage.
	pub fn new(storage: Arc<StorageService>, login_delay: Duration) -> Self {
		Self {
			storage,
			login_delay,
			current: RwLock::new(None),
		}
	}

	/// Attempts to log in with the given credentials.
	///
	/// Sleeps for the configured delay first, standing in for the round
	/// trip to an auth service. Both username and secret are compared
	/// exactly and case-sensitively. On success the identity projection of
	/// the matching entry (secret excluded) is persisted and made current.
	/// On failure nothing changes and the caller gets a one-shot
	/// [`SessionError::AuthenticationFailed`]; there is no retry policy.
	///
	/// Dropping the returned future before it completes (e.g. the view is
	/// torn down mid-request) leaves the current identity and the slot
	/// untouched.
	pub async fn login(&self, username: &str, secret: &Passcode) -> Result<Identity, SessionError> {
		tokio::time::sleep(self.login_delay).await;

		let entry = DIRECTORY
			.iter()
			.find(|e| e.username == username && e.secret == secret.expose())
			.ok_or(SessionError::AuthenticationFailed)?;

		let identity = Identity {
			id: entry.id.to_string(),
			username: entry.username.to_string(),
			role: entry.role,
			display_name: entry.display_name.to_string(),
		};

		self.storage
			.store(StorageKey::Session.as_str(), SESSION_SLOT_ID, &identity)
			.await
			.map_err(|e| SessionError::Storage(e.to_string()))?;

		let mut current = self.current.write().await;
		*current = Some(identity.clone());

		tracing::info!(username = %identity.username, role = %identity.role, "Logged in");
		Ok(identity)
	}

	/// Logs out the current identity, if any.
	///
	/// The in-memory identity is cleared unconditionally; a failure to
	/// remove the slot is reported but cannot resurrect the session.
	pub async fn logout(&self) -> Result<(), SessionError> {
		{
			let mut current = self.current.write().await;
			*current = None;
		}

		self.storage
			.remove(StorageKey::Session.as_str(), SESSION_SLOT_ID)
			.await
			.map_err(|e| SessionError::Storage(e.to_string()))?;

		tracing::info!("Logged out");
		Ok(())
	}

	/// Restores a persisted session, if one exists.
	///
	/// Called once at startup. A missing slot means no session. A slot
	/// that fails to deserialize is discarded and the slot cleared; the
	/// caller only ever sees "no session", never an error.
	pub async fn restore(&self) -> Option<Identity> {
		match self
			.storage
			.retrieve::<Identity>(StorageKey::Session.as_str(), SESSION_SLOT_ID)
			.await
		{
			Ok(identity) => {
				let mut current = self.current.write().await;
				*current = Some(identity.clone());
				tracing::info!(username = %identity.username, "Restored session");
				Some(identity)
			},
			Err(StorageError::NotFound) => None,
			Err(StorageError::Serialization(e)) => {
				tracing::warn!(error = %e, "Discarding corrupted session slot");
				if let Err(e) = self
					.storage
					.remove(StorageKey::Session.as_str(), SESSION_SLOT_ID)
					.await
				{
					tracing::warn!(error = %e, "Failed to clear corrupted session slot");
				}
				None
			},
			Err(e) => {
				tracing::warn!(error = %e, "Could not read session slot");
				None
			},
		}
	}

	/// Returns the current identity, if any.
	pub async fn current(&self) -> Option<Identity> {
		self.current.read().await.clone()
	}
}
