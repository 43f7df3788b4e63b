//! Broadcast event bus between the core and the view layer.

use pos_types::PosEvent;
use tokio::sync::broadcast;

/// Fan-out channel for core events.
///
/// Publishing never blocks and does not require subscribers; a view that
/// cares subscribes and re-renders on what it receives. Slow subscribers
/// miss events rather than backpressuring the core.
#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<PosEvent>,
}

impl EventBus {
	/// Creates a new event bus with the given buffer capacity.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publishes an event to all current subscribers.
	///
	/// Returns an error only when there are no subscribers, which callers
	/// routinely ignore.
	pub fn publish(&self, event: PosEvent) -> Result<(), Box<broadcast::error::SendError<PosEvent>>> {
		self.sender.send(event).map(|_| ()).map_err(Box::new)
	}

	/// Creates a new subscription to core events.
	pub fn subscribe(&self) -> broadcast::Receiver<PosEvent> {
		self.sender.subscribe()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pos_types::{BoardEvent, OrderStatus};

	#[tokio::test]
	async fn test_subscriber_receives_published_event() {
		let bus = EventBus::new(16);
		let mut rx = bus.subscribe();

		bus.publish(PosEvent::Board(BoardEvent::Advanced {
			order_id: "ord-1".into(),
			from: OrderStatus::New,
			to: OrderStatus::InPreparation,
		}))
		.unwrap();

		let event = rx.recv().await.unwrap();
		assert!(matches!(
			event,
			PosEvent::Board(BoardEvent::Advanced { ref order_id, .. }) if order_id == "ord-1"
		));
	}

	#[tokio::test]
	async fn test_publish_without_subscribers_errors() {
		let bus = EventBus::new(16);
		let result = bus.publish(PosEvent::Session(pos_types::SessionEvent::LoggedOut));
		assert!(result.is_err());
	}
}
