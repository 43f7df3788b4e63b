//! Main entry point for the point-of-service application.
//!
//! This binary loads configuration, assembles the core engine with the
//! configured storage backend, restores any persisted session, and hands
//! control to an interactive shell standing in for the front-of-house and
//! kitchen views.

use clap::Parser;
use pos_config::Config;
use pos_core::PosBuilder;
use pos_storage::StorageFactory;
use pos_types::ImplementationRegistry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

mod shell;

use pos_storage::implementations::{file, memory};

/// Command-line arguments for the point-of-service application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started point-of-service");

	// Load configuration
	let config = Config::from_file(args.config.to_str().ok_or("Invalid config path")?).await?;
	tracing::info!("Loaded configuration [{}]", config.pos.id);

	// Build the engine with the available storage backends
	let engine = Arc::new(PosBuilder::new(config).build(storage_factories()).await?);

	// Echo core events into the log; the shell renders on demand instead
	// of reacting to the bus
	let mut events = engine.subscribe();
	tokio::spawn(async move {
		while let Ok(event) = events.recv().await {
			tracing::debug!(?event, "Core event");
		}
	});

	// Bring back a session from a previous run, if the slot has one
	match engine.restore_session().await {
		Some(identity) => {
			tracing::info!(username = %identity.username, role = %identity.role, "Session restored")
		},
		None => tracing::info!("No persisted session"),
	}

	let counts = engine.board_counts().await;
	tracing::info!(
		new = counts.new,
		in_preparation = counts.in_preparation,
		ready = counts.ready,
		"Order board ready"
	);

	shell::run(engine).await?;

	tracing::info!("Stopped point-of-service");
	Ok(())
}

/// Collects the factories for every storage backend this binary ships.
fn storage_factories() -> HashMap<String, StorageFactory> {
	let mut factories: HashMap<String, StorageFactory> = HashMap::new();
	factories.insert(file::Registry::NAME.to_string(), file::Registry::factory());
	factories.insert(
		memory::Registry::NAME.to_string(),
		memory::Registry::factory(),
	);
	factories
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_args_default_values() {
		let args = Args::parse_from(["pos"]);
		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_args_custom_values() {
		let args = Args::parse_from(["pos", "--config", "till.toml", "--log-level", "debug"]);
		assert_eq!(args.config, PathBuf::from("till.toml"));
		assert_eq!(args.log_level, "debug");
	}

	#[test]
	fn test_storage_factories_cover_both_backends() {
		let factories = storage_factories();
		assert_eq!(factories.len(), 2);
		assert!(factories.contains_key("memory"));
		assert!(factories.contains_key("file"));
	}

	#[tokio::test]
	async fn test_engine_builds_with_memory_backend() {
		let config: Config = r#"
[pos]
id = "test-till"
login_delay_ms = 0

[storage]
primary = "memory"
[storage.implementations.memory]
"#
		.parse()
		.unwrap();

		let engine = PosBuilder::new(config).build(storage_factories()).await;
		assert!(engine.is_ok());
	}
}
