//! Fixed credential directory.
//!
//! Five built-in staff accounts. There is no runtime interface to add,
//! remove, or modify entries; in a deployment this table is where a real
//! staff directory would attach.

use pos_types::Role;

/// One entry in the credential directory.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CredentialEntry {
	pub id: &'static str,
	pub username: &'static str,
	pub secret: &'static str,
	pub role: Role,
	pub display_name: &'static str,
}

/// The built-in staff directory.
pub(crate) const DIRECTORY: [CredentialEntry; 5] = [
	CredentialEntry {
		id: "u-1",
		username: "ana",
		secret: "tapas2024",
		role: Role::FrontOfHouse,
		display_name: "Ana Costa",
	},
	CredentialEntry {
		id: "u-2",
		username: "bruno",
		secret: "terrace!9",
		role: Role::FrontOfHouse,
		display_name: "Bruno Silva",
	},
	CredentialEntry {
		id: "u-3",
		username: "kim",
		secret: "grill4life",
		role: Role::Kitchen,
		display_name: "Kim Lee",
	},
	CredentialEntry {
		id: "u-4",
		username: "dana",
		secret: "sauce&sear",
		role: Role::Kitchen,
		display_name: "Dana Petrov",
	},
	CredentialEntry {
		id: "u-5",
		username: "admin",
		secret: "backoffice1",
		role: Role::Admin,
		display_name: "Olive Moreau",
	},
];
