//! Core engine for the point-of-service application.
//!
//! This module wires the session manager, the order board, and the storage
//! backend into one [`PosEngine`] handed to the view layer. The view calls
//! the engine's operations and reads its accessors; it never touches the
//! underlying collections directly. State changes are echoed onto a
//! broadcast event bus for the view to react to.

use pos_board::{seed::sample_orders, BoardCounts, BoardSnapshot, OrderBoard, StatusChange};
use pos_config::Config;
use pos_session::{SessionError, SessionService};
use pos_storage::{StorageFactory, StorageService};
use pos_types::{BoardEvent, Identity, Order, Passcode, PosEvent, SessionEvent};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod event_bus;

use event_bus::EventBus;

/// Errors that can occur while building or running the engine.
#[derive(Debug, Error)]
pub enum PosError {
	/// Error related to configuration issues.
	#[error("Configuration error: {0}")]
	Config(String),
	/// Error from one of the underlying services.
	#[error("Service error: {0}")]
	Service(String),
}

/// The assembled point-of-service core.
///
/// Owns the session manager and the order board and exposes the full
/// view-layer contract: `login`, `logout`, `restore_session`,
/// `current_identity`, `advance`, and the read accessors. All accessors
/// hand out clones, so the view cannot mutate core state.
pub struct PosEngine {
	/// Loaded configuration.
	config: Config,
	/// Storage service holding the persisted session slot.
	storage: Arc<StorageService>,
	/// Session manager.
	session: SessionService,
	/// Kitchen order board.
	board: OrderBoard,
	/// Event bus towards the view layer.
	event_bus: EventBus,
}

impl PosEngine {
	/// Attempts a login and publishes the outcome.
	pub async fn login(&self, username: &str, secret: &Passcode) -> Result<Identity, SessionError> {
		match self.session.login(username, secret).await {
			Ok(identity) => {
				self.event_bus
					.publish(PosEvent::Session(SessionEvent::LoggedIn {
						identity: identity.clone(),
					}))
					.ok();
				Ok(identity)
			},
			Err(e) => {
				if matches!(e, SessionError::AuthenticationFailed) {
					self.event_bus
						.publish(PosEvent::Session(SessionEvent::LoginFailed {
							username: username.to_string(),
						}))
						.ok();
				}
				Err(e)
			},
		}
	}

	/// Clears the current session and publishes the logout.
	pub async fn logout(&self) -> Result<(), SessionError> {
		self.session.logout().await?;
		self.event_bus
			.publish(PosEvent::Session(SessionEvent::LoggedOut))
			.ok();
		Ok(())
	}

	/// Restores a persisted session at startup, if one exists.
	pub async fn restore_session(&self) -> Option<Identity> {
		let identity = self.session.restore().await?;
		self.event_bus
			.publish(PosEvent::Session(SessionEvent::Restored {
				identity: identity.clone(),
			}))
			.ok();
		Some(identity)
	}

	/// Returns the current authenticated identity, if any.
	pub async fn current_identity(&self) -> Option<Identity> {
		self.session.current().await
	}

	/// Advances an order to its next stage and publishes the move.
	///
	/// Unknown ids and orders already in the terminal stage are silent
	/// no-ops, mirroring the board.
	pub async fn advance(&self, order_id: &str) -> Option<StatusChange> {
		let change = self.board.advance(order_id).await?;
		self.event_bus
			.publish(PosEvent::Board(BoardEvent::Advanced {
				order_id: change.order_id.clone(),
				from: change.from,
				to: change.to,
			}))
			.ok();
		Some(change)
	}

	/// Returns a cloned view of the three board lanes.
	pub async fn board_snapshot(&self) -> BoardSnapshot {
		self.board.snapshot().await
	}

	/// Returns per-lane and total order counts.
	pub async fn board_counts(&self) -> BoardCounts {
		self.board.counts().await
	}

	/// Looks up a single order by id.
	pub async fn find_order(&self, order_id: &str) -> Option<Order> {
		self.board.find(order_id).await
	}

	/// Creates a new subscription to core events.
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<PosEvent> {
		self.event_bus.subscribe()
	}

	/// Returns a reference to the event bus.
	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}

	/// Returns a reference to the configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Returns a reference to the storage service.
	pub fn storage(&self) -> &Arc<StorageService> {
		&self.storage
	}
}

/// Builder for constructing a [`PosEngine`] with a pluggable storage
/// backend.
///
/// The factory map keys match the implementation names in the
/// `[storage.implementations]` configuration sections.
pub struct PosBuilder {
	config: Config,
}

impl PosBuilder {
	/// Creates a new PosBuilder with the given configuration.
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds the engine using the provided storage factories.
	///
	/// Instantiates the primary storage backend, validates its
	/// configuration section against the backend's own schema, then
	/// assembles the session manager and the seeded order board.
	pub async fn build(
		self,
		storage_factories: HashMap<String, StorageFactory>,
	) -> Result<PosEngine, PosError> {
		let primary = &self.config.storage.primary;
		let section = self
			.config
			.storage
			.implementations
			.get(primary)
			.ok_or_else(|| {
				PosError::Config(format!("Primary storage '{}' not configured", primary))
			})?;
		let factory = storage_factories.get(primary).ok_or_else(|| {
			PosError::Config(format!("No factory registered for storage '{}'", primary))
		})?;

		let backend = factory(section).map_err(|e| {
			tracing::error!(component = "storage", implementation = %primary, error = %e, "Failed to create storage backend");
			PosError::Config(format!("Failed to create storage backend '{}': {}", primary, e))
		})?;
		backend.config_schema().validate(section).map_err(|e| {
			PosError::Config(format!(
				"Invalid configuration for storage '{}': {}",
				primary, e
			))
		})?;
		let storage = Arc::new(StorageService::new(backend));
		tracing::info!(component = "storage", implementation = %primary, "Loaded");

		let session = SessionService::new(
			storage.clone(),
			Duration::from_millis(self.config.pos.login_delay_ms),
		);
		tracing::info!(component = "session", delay_ms = self.config.pos.login_delay_ms, "Loaded");

		let board = OrderBoard::new();
		board.load(sample_orders()).await;
		let counts = board.counts().await;
		tracing::info!(component = "board", orders = counts.total, "Seeded");

		Ok(PosEngine {
			config: self.config,
			storage,
			session,
			board,
			event_bus: EventBus::new(256),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pos_storage::implementations::memory;
	use pos_types::OrderStatus;

	fn test_config() -> Config {
		r#"
[pos]
id = "test-pos"
login_delay_ms = 0

[storage]
primary = "memory"
[storage.implementations.memory]
"#
		.parse()
		.unwrap()
	}

	fn factories() -> HashMap<String, StorageFactory> {
		let mut map: HashMap<String, StorageFactory> = HashMap::new();
		map.insert("memory".to_string(), memory::create_storage);
		map
	}

	async fn engine() -> PosEngine {
		PosBuilder::new(test_config())
			.build(factories())
			.await
			.unwrap()
	}

	#[tokio::test]
	async fn test_build_seeds_board() {
		let engine = engine().await;
		let counts = engine.board_counts().await;
		assert!(counts.total > 0);
		assert!(counts.new > 0);
		assert_eq!(
			counts.total,
			counts.new + counts.in_preparation + counts.ready
		);
	}

	#[tokio::test]
	async fn test_build_rejects_unregistered_backend() {
		let config: Config = r#"
[pos]
id = "test-pos"

[storage]
primary = "redis"
[storage.implementations.redis]
"#
		.parse()
		.unwrap();

		let result = PosBuilder::new(config).build(factories()).await;
		assert!(matches!(result, Err(PosError::Config(_))));
	}

	#[tokio::test]
	async fn test_login_publishes_event() {
		let engine = engine().await;
		let mut rx = engine.subscribe();

		engine
			.login("ana", &Passcode::from("tapas2024"))
			.await
			.unwrap();

		let event = rx.recv().await.unwrap();
		assert!(matches!(
			event,
			PosEvent::Session(SessionEvent::LoggedIn { identity }) if identity.username == "ana"
		));
	}

	#[tokio::test]
	async fn test_failed_login_publishes_failure() {
		let engine = engine().await;
		let mut rx = engine.subscribe();

		let result = engine.login("ana", &Passcode::from("nope")).await;
		assert!(result.is_err());
		assert!(engine.current_identity().await.is_none());

		let event = rx.recv().await.unwrap();
		assert!(matches!(
			event,
			PosEvent::Session(SessionEvent::LoginFailed { username }) if username == "ana"
		));
	}

	#[tokio::test]
	async fn test_advance_publishes_move() {
		let engine = engine().await;
		let snapshot = engine.board_snapshot().await;
		let id = snapshot.new[0].id.clone();

		let mut rx = engine.subscribe();
		let change = engine.advance(&id).await.unwrap();
		assert_eq!(change.from, OrderStatus::New);
		assert_eq!(change.to, OrderStatus::InPreparation);

		let event = rx.recv().await.unwrap();
		assert!(matches!(
			event,
			PosEvent::Board(BoardEvent::Advanced { order_id, .. }) if order_id == id
		));
	}

	#[tokio::test]
	async fn test_advance_unknown_publishes_nothing() {
		let engine = engine().await;
		let mut rx = engine.subscribe();

		assert!(engine.advance("no-such-order").await.is_none());
		assert!(matches!(
			rx.try_recv(),
			Err(tokio::sync::broadcast::error::TryRecvError::Empty)
		));
	}

	#[tokio::test]
	async fn test_logout_round_trip() {
		let engine = engine().await;
		engine
			.login("kim", &Passcode::from("grill4life"))
			.await
			.unwrap();
		assert!(engine.current_identity().await.is_some());

		engine.logout().await.unwrap();
		assert!(engine.current_identity().await.is_none());
		assert!(engine.restore_session().await.is_none());
	}
}
