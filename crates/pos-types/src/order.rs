//! Order types for the kitchen order board.
//!
//! An [`Order`] is a table's requested items progressing through a linear
//! status lifecycle: new -> in-preparation -> ready. Status is both a field
//! on the order and the collection the board keeps it in; the two always
//! agree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an order on the board.
///
/// The lifecycle is strictly linear with no back-transitions and no
/// cancellation. `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
	/// Order has arrived and no one has started it.
	New,
	/// Kitchen is working on the order.
	InPreparation,
	/// Order is plated and waiting for pickup.
	Ready,
}

impl OrderStatus {
	/// Returns the single allowed successor status, or `None` for the
	/// terminal state.
	pub fn next(&self) -> Option<OrderStatus> {
		match self {
			OrderStatus::New => Some(OrderStatus::InPreparation),
			OrderStatus::InPreparation => Some(OrderStatus::Ready),
			OrderStatus::Ready => None,
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::New => write!(f, "new"),
			OrderStatus::InPreparation => write!(f, "in-preparation"),
			OrderStatus::Ready => write!(f, "ready"),
		}
	}
}

/// A single line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
	/// Unique identifier of the line within its order.
	pub id: String,
	/// Menu item name.
	pub name: String,
	/// Menu category the item belongs to (e.g. "mains", "drinks").
	pub category: String,
	/// Number of units ordered.
	pub quantity: u32,
	/// Price per unit.
	pub unit_price: Decimal,
	/// Optional preparation note from the waiter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
}

impl OrderItem {
	/// Line total: quantity times unit price.
	pub fn line_total(&self) -> Decimal {
		Decimal::from(self.quantity) * self.unit_price
	}
}

/// A table's order as tracked on the kitchen board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier, stable for the lifetime of the order.
	pub id: String,
	/// Table number the order belongs to.
	pub table: u32,
	/// Number of guests seated at the table.
	pub guests: u32,
	/// Ordered sequence of requested items.
	pub items: Vec<OrderItem>,
	/// Current status; always matches the board collection holding the order.
	pub status: OrderStatus,
	/// Timestamp when the order was taken (Unix seconds).
	pub created_at: u64,
}

impl Order {
	/// Computed order total: the sum of all line totals.
	///
	/// Pure projection; nothing is cached on the order.
	pub fn total(&self) -> Decimal {
		self.items.iter().map(OrderItem::line_total).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::prelude::FromPrimitive;

	fn item(qty: u32, price: f64) -> OrderItem {
		OrderItem {
			id: "i-1".into(),
			name: "Soup".into(),
			category: "starters".into(),
			quantity: qty,
			unit_price: Decimal::from_f64(price).unwrap(),
			note: None,
		}
	}

	#[test]
	fn test_status_progression() {
		assert_eq!(OrderStatus::New.next(), Some(OrderStatus::InPreparation));
		assert_eq!(OrderStatus::InPreparation.next(), Some(OrderStatus::Ready));
		assert_eq!(OrderStatus::Ready.next(), None);
	}

	#[test]
	fn test_status_wire_names() {
		assert_eq!(
			serde_json::to_string(&OrderStatus::InPreparation).unwrap(),
			"\"in-preparation\""
		);
		let status: OrderStatus = serde_json::from_str("\"ready\"").unwrap();
		assert_eq!(status, OrderStatus::Ready);
	}

	#[test]
	fn test_order_total_sums_lines() {
		let order = Order {
			id: "A".into(),
			table: 5,
			guests: 2,
			items: vec![item(2, 10.0), item(1, 4.5)],
			status: OrderStatus::New,
			created_at: 0,
		};
		assert_eq!(order.total(), Decimal::from_f64(24.5).unwrap());
	}

	#[test]
	fn test_empty_order_total_is_zero() {
		let order = Order {
			id: "B".into(),
			table: 1,
			guests: 1,
			items: vec![],
			status: OrderStatus::Ready,
			created_at: 0,
		};
		assert_eq!(order.total(), Decimal::ZERO);
	}
}
