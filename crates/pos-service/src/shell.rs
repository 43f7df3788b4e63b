//! Interactive shell over the core engine.
//!
//! A line-oriented stand-in for the front-of-house and kitchen views:
//! every command maps to one call on the view-layer contract. The shell
//! renders fresh reads after each command rather than holding any state
//! of its own.

use pos_board::BoardSnapshot;
use pos_core::{PosEngine, PosError};
use pos_types::{Order, Passcode};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Help,
	Login { username: String, secret: String },
	Logout,
	Whoami,
	Board,
	Advance { order_id: String },
	Quit,
	Unknown(String),
}

/// Parses one input line into a command.
///
/// Empty lines parse to `Help` so a stray Enter reprints the usage.
pub fn parse_command(line: &str) -> Command {
	let mut parts = line.split_whitespace();
	let Some(verb) = parts.next() else {
		return Command::Help;
	};

	match (verb, parts.next(), parts.next()) {
		("help", None, None) => Command::Help,
		("login", Some(username), Some(secret)) => Command::Login {
			username: username.to_string(),
			secret: secret.to_string(),
		},
		("logout", None, None) => Command::Logout,
		("whoami", None, None) => Command::Whoami,
		("board", None, None) => Command::Board,
		("advance", Some(order_id), None) => Command::Advance {
			order_id: order_id.to_string(),
		},
		("quit", None, None) | ("exit", None, None) => Command::Quit,
		_ => Command::Unknown(line.trim().to_string()),
	}
}

const USAGE: &str = "\
commands:
  login <username> <secret>   authenticate and start a session
  logout                      end the current session
  whoami                      show the current identity
  board                       show the kitchen order board
  advance <order-id>          move an order to its next stage
  quit                        exit";

/// Runs the shell until `quit`, end of input, or Ctrl-C.
pub async fn run(engine: Arc<PosEngine>) -> Result<(), PosError> {
	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	println!("{}", USAGE);
	loop {
		tokio::select! {
			line = lines.next_line() => {
				let line = line.map_err(|e| PosError::Service(e.to_string()))?;
				let Some(line) = line else {
					break;
				};
				if !dispatch(&engine, parse_command(&line)).await {
					break;
				}
			}

			_ = tokio::signal::ctrl_c() => {
				break;
			}
		}
	}

	Ok(())
}

/// Executes one command. Returns false when the shell should exit.
async fn dispatch(engine: &PosEngine, command: Command) -> bool {
	match command {
		Command::Help => println!("{}", USAGE),
		Command::Login { username, secret } => {
			match engine.login(&username, &Passcode::new(secret)).await {
				Ok(identity) => {
					println!("welcome, {} ({})", identity.display_name, identity.role)
				},
				Err(e) => println!("login failed: {}", e),
			}
		},
		Command::Logout => match engine.logout().await {
			Ok(()) => println!("logged out"),
			Err(e) => println!("logout failed: {}", e),
		},
		Command::Whoami => match engine.current_identity().await {
			Some(identity) => println!(
				"{} ({}, {})",
				identity.username, identity.display_name, identity.role
			),
			None => println!("not logged in"),
		},
		Command::Board => print!("{}", render_board(&engine.board_snapshot().await)),
		Command::Advance { order_id } => match engine.advance(&order_id).await {
			Some(change) => println!("{} moved {} -> {}", change.order_id, change.from, change.to),
			None => println!("{}: nothing to do", order_id),
		},
		Command::Quit => return false,
		Command::Unknown(line) => println!("unknown command: {} (try 'help')", line),
	}
	true
}

/// Renders the three lanes as text.
fn render_board(snapshot: &BoardSnapshot) -> String {
	let mut out = String::new();
	for (title, lane) in [
		("NEW", &snapshot.new),
		("IN PREPARATION", &snapshot.in_preparation),
		("READY", &snapshot.ready),
	] {
		out.push_str(&format!("{} ({})\n", title, lane.len()));
		for order in lane {
			out.push_str(&render_order(order));
		}
	}
	out
}

fn render_order(order: &Order) -> String {
	let mut out = format!(
		"  {}  table {}  {} guests  total {}\n",
		order.id,
		order.table,
		order.guests,
		order.total()
	);
	for item in &order.items {
		out.push_str(&format!("      {} x {}", item.quantity, item.name));
		if let Some(note) = &item.note {
			out.push_str(&format!(" ({})", note));
		}
		out.push('\n');
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use pos_types::{OrderItem, OrderStatus};
	use rust_decimal::Decimal;

	#[test]
	fn test_parse_login() {
		assert_eq!(
			parse_command("login ana tapas2024"),
			Command::Login {
				username: "ana".into(),
				secret: "tapas2024".into(),
			}
		);
	}

	#[test]
	fn test_parse_advance() {
		assert_eq!(
			parse_command("  advance ord-1001 "),
			Command::Advance {
				order_id: "ord-1001".into(),
			}
		);
	}

	#[test]
	fn test_parse_simple_commands() {
		assert_eq!(parse_command("board"), Command::Board);
		assert_eq!(parse_command("whoami"), Command::Whoami);
		assert_eq!(parse_command("logout"), Command::Logout);
		assert_eq!(parse_command("quit"), Command::Quit);
		assert_eq!(parse_command("exit"), Command::Quit);
		assert_eq!(parse_command(""), Command::Help);
	}

	#[test]
	fn test_parse_rejects_extra_arguments() {
		assert!(matches!(parse_command("logout now"), Command::Unknown(_)));
		assert!(matches!(parse_command("login ana"), Command::Unknown(_)));
	}

	#[test]
	fn test_render_board_lists_lanes_and_totals() {
		let snapshot = BoardSnapshot {
			new: vec![Order {
				id: "ord-1".into(),
				table: 3,
				guests: 2,
				items: vec![OrderItem {
					id: "ord-1-1".into(),
					name: "Risotto".into(),
					category: "mains".into(),
					quantity: 2,
					unit_price: Decimal::new(1850, 2),
					note: Some("vegetarian".into()),
				}],
				status: OrderStatus::New,
				created_at: 0,
			}],
			in_preparation: vec![],
			ready: vec![],
		};

		let rendered = render_board(&snapshot);
		assert!(rendered.contains("NEW (1)"));
		assert!(rendered.contains("IN PREPARATION (0)"));
		assert!(rendered.contains("ord-1"));
		assert!(rendered.contains("total 37.00"));
		assert!(rendered.contains("(vegetarian)"));
	}
}
