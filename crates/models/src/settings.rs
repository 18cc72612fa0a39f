use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// Settings models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub logging: LoggingSettings,
	pub payoff: PayoffSettings,
	pub invites: InviteSettings,
	pub data_dir: PathBuf,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			logging: LoggingSettings::default(),
			payoff: PayoffSettings::default(),
			invites: InviteSettings::default(),
			data_dir: PathBuf::from("data"),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self { host: "127.0.0.1".to_string(), port: 3000 }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
	/// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
	pub filter: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			filter: "backend_api=debug,debt_engine=debug,household=debug,tower_http=debug".to_string(),
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PayoffSettings {
	/// Safety cap for the month-by-month simulation (50 years)
	pub max_months: u32,
}

impl Default for PayoffSettings {
	fn default() -> Self {
		Self { max_months: 600 }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InviteSettings {
	/// HMAC key for invite tokens
	pub secret: String,
	pub validity_days: i64,
}

impl Default for InviteSettings {
	fn default() -> Self {
		Self { secret: String::new(), validity_days: 7 }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_settings_fill_defaults() {
		let raw = r#"{"server":{"port":8080},"invites":{"secret":"s3cret"}}"#;
		let settings: Settings = serde_json::from_str(raw).unwrap();
		assert_eq!(settings.server.port, 8080);
		assert_eq!(settings.server.host, "127.0.0.1");
		assert_eq!(settings.invites.secret, "s3cret");
		assert_eq!(settings.invites.validity_days, 7);
		assert_eq!(settings.payoff.max_months, 600);
		assert_eq!(settings.data_dir, PathBuf::from("data"));
	}
}
