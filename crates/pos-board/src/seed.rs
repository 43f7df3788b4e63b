//! Fixed sample orders used to seed the board at startup.
//!
//! Stand-in for the external order-intake subsystem. In a deployment this
//! is the boundary where real orders would flow in; here the batch is a
//! fixed snapshot of a mid-service evening.

use pos_types::{Order, OrderItem, OrderStatus};
use rust_decimal::Decimal;

/// Base timestamp for the sample batch (Unix seconds).
const SERVICE_START: u64 = 1_754_000_000;

fn item(id: &str, name: &str, category: &str, quantity: u32, cents: i64, note: Option<&str>) -> OrderItem {
	OrderItem {
		id: id.to_string(),
		name: name.to_string(),
		category: category.to_string(),
		quantity,
		unit_price: Decimal::new(cents, 2),
		note: note.map(str::to_string),
	}
}

/// Returns the fixed startup batch, spread across all three stages.
pub fn sample_orders() -> Vec<Order> {
	vec![
		Order {
			id: "ord-1001".into(),
			table: 4,
			guests: 2,
			items: vec![
				item("ord-1001-1", "Burrata", "starters", 1, 1150, None),
				item("ord-1001-2", "Margherita", "mains", 2, 1400, Some("extra basil")),
				item("ord-1001-3", "Sparkling water", "drinks", 2, 350, None),
			],
			status: OrderStatus::New,
			created_at: SERVICE_START + 60,
		},
		Order {
			id: "ord-1002".into(),
			table: 7,
			guests: 4,
			items: vec![
				item("ord-1002-1", "Caesar salad", "starters", 2, 950, Some("no anchovies")),
				item("ord-1002-2", "Ribeye", "mains", 2, 2850, Some("medium rare")),
				item("ord-1002-3", "Gnocchi", "mains", 2, 1600, None),
				item("ord-1002-4", "House red", "drinks", 1, 2400, None),
			],
			status: OrderStatus::New,
			created_at: SERVICE_START + 180,
		},
		Order {
			id: "ord-1003".into(),
			table: 2,
			guests: 1,
			items: vec![
				item("ord-1003-1", "Soup of the day", "starters", 1, 750, None),
				item("ord-1003-2", "Espresso", "drinks", 1, 280, None),
			],
			status: OrderStatus::New,
			created_at: SERVICE_START + 240,
		},
		Order {
			id: "ord-1004".into(),
			table: 11,
			guests: 3,
			items: vec![
				item("ord-1004-1", "Fish and chips", "mains", 3, 1750, None),
				item("ord-1004-2", "Lemonade", "drinks", 3, 450, None),
			],
			status: OrderStatus::InPreparation,
			created_at: SERVICE_START,
		},
		Order {
			id: "ord-1005".into(),
			table: 9,
			guests: 2,
			items: vec![
				item("ord-1005-1", "Risotto", "mains", 1, 1850, Some("vegetarian")),
				item("ord-1005-2", "Tiramisu", "desserts", 2, 850, None),
			],
			status: OrderStatus::InPreparation,
			created_at: SERVICE_START - 120,
		},
		Order {
			id: "ord-1006".into(),
			table: 5,
			guests: 6,
			items: vec![
				item("ord-1006-1", "Sharing platter", "starters", 2, 2200, None),
				item("ord-1006-2", "House white", "drinks", 2, 2200, None),
			],
			status: OrderStatus::Ready,
			created_at: SERVICE_START - 300,
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_seed_ids_are_unique() {
		let orders = sample_orders();
		let ids: HashSet<_> = orders.iter().map(|o| o.id.as_str()).collect();
		assert_eq!(ids.len(), orders.len());
	}

	#[test]
	fn test_seed_covers_all_stages() {
		let orders = sample_orders();
		for status in [
			OrderStatus::New,
			OrderStatus::InPreparation,
			OrderStatus::Ready,
		] {
			assert!(orders.iter().any(|o| o.status == status));
		}
	}

	#[test]
	fn test_seed_totals_are_positive() {
		for order in sample_orders() {
			assert!(order.total() > Decimal::ZERO, "order {}", order.id);
			assert!(!order.items.is_empty());
		}
	}
}
