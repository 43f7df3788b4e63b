//! Kitchen order board for the point-of-service core.
//!
//! The board owns three disjoint, ordered collections of orders (new,
//! in-preparation, ready) and the single allowed transition between
//! adjacent stages. Orders arrive as a seed batch at startup; the board
//! only relocates them, it never creates or deletes one.

use pos_types::{Order, OrderStatus};
use tokio::sync::RwLock;

pub mod seed;

/// A completed stage move, reported back for event publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
	pub order_id: String,
	pub from: OrderStatus,
	pub to: OrderStatus,
}

/// Cloned view of the three status collections.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
	pub new: Vec<Order>,
	pub in_preparation: Vec<Order>,
	pub ready: Vec<Order>,
}

/// Per-collection and grand-total order counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCounts {
	pub new: usize,
	pub in_preparation: usize,
	pub ready: usize,
	pub total: usize,
}

/// The three status collections, disjoint by order id.
#[derive(Debug, Default)]
struct Lanes {
	new_orders: Vec<Order>,
	in_preparation: Vec<Order>,
	ready: Vec<Order>,
}

impl Lanes {
	fn lane(&self, status: OrderStatus) -> &Vec<Order> {
		match status {
			OrderStatus::New => &self.new_orders,
			OrderStatus::InPreparation => &self.in_preparation,
			OrderStatus::Ready => &self.ready,
		}
	}

	fn lane_mut(&mut self, status: OrderStatus) -> &mut Vec<Order> {
		match status {
			OrderStatus::New => &mut self.new_orders,
			OrderStatus::InPreparation => &mut self.in_preparation,
			OrderStatus::Ready => &mut self.ready,
		}
	}

	fn contains(&self, order_id: &str) -> bool {
		self.new_orders
			.iter()
			.chain(self.in_preparation.iter())
			.chain(self.ready.iter())
			.any(|o| o.id == order_id)
	}
}

/// The kitchen order board.
///
/// One lock guards all three lanes so a relocation is atomic: an order is
/// never observable in two lanes, or in none.
pub struct OrderBoard {
	lanes: RwLock<Lanes>,
}

impl OrderBoard {
	/// Creates an empty board.
	pub fn new() -> Self {
		Self {
			lanes: RwLock::new(Lanes::default()),
		}
	}

	/// Loads a batch of orders from the external order source.
	///
	/// Each order lands in the lane matching its status, preserving batch
	/// order within each lane. An order whose id is already on the board
	/// is skipped; the lanes stay disjoint.
	pub async fn load(&self, orders: Vec<Order>) {
		let mut lanes = self.lanes.write().await;
		for order in orders {
			if lanes.contains(&order.id) {
				tracing::warn!(order_id = %order.id, "Skipping duplicate order in seed batch");
				continue;
			}
			let status = order.status;
			lanes.lane_mut(status).push(order);
		}
	}

	/// Advances an order to the next stage.
	///
	/// New moves to in-preparation, in-preparation moves to ready. The
	/// order is removed from its lane and appended to the next one with
	/// its status field updated; every other order keeps its lane and its
	/// relative position. An order already in ready, or an unknown id, is
	/// a silent no-op returning `None` - by design, not an error.
	pub async fn advance(&self, order_id: &str) -> Option<StatusChange> {
		let mut lanes = self.lanes.write().await;

		let from = [OrderStatus::New, OrderStatus::InPreparation]
			.into_iter()
			.find(|status| lanes.lane(*status).iter().any(|o| o.id == order_id));

		let Some(from) = from else {
			tracing::debug!(order_id = %order_id, "Advance ignored: order unknown or already ready");
			return None;
		};
		// New and InPreparation always have a successor
		let to = from.next()?;

		let source = lanes.lane_mut(from);
		let position = source.iter().position(|o| o.id == order_id)?;
		let mut order = source.remove(position);
		order.status = to;
		lanes.lane_mut(to).push(order);

		tracing::info!(order_id = %order_id, from = %from, to = %to, "Order advanced");
		Some(StatusChange {
			order_id: order_id.to_string(),
			from,
			to,
		})
	}

	/// Returns a cloned view of all three lanes.
	pub async fn snapshot(&self) -> BoardSnapshot {
		let lanes = self.lanes.read().await;
		BoardSnapshot {
			new: lanes.new_orders.clone(),
			in_preparation: lanes.in_preparation.clone(),
			ready: lanes.ready.clone(),
		}
	}

	/// Returns per-lane counts and the grand total.
	pub async fn counts(&self) -> BoardCounts {
		let lanes = self.lanes.read().await;
		let (new, in_preparation, ready) = (
			lanes.new_orders.len(),
			lanes.in_preparation.len(),
			lanes.ready.len(),
		);
		BoardCounts {
			new,
			in_preparation,
			ready,
			total: new + in_preparation + ready,
		}
	}

	/// Looks up an order by id across all lanes.
	pub async fn find(&self, order_id: &str) -> Option<Order> {
		let lanes = self.lanes.read().await;
		lanes
			.new_orders
			.iter()
			.chain(lanes.in_preparation.iter())
			.chain(lanes.ready.iter())
			.find(|o| o.id == order_id)
			.cloned()
	}
}

impl Default for OrderBoard {
	fn default() -> Self {
		Self::new()
	}
}
