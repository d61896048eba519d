use anyhow::Context;
use dotenv::dotenv;
use std::{env, path::PathBuf};

const DEFAULT_DATABASE_URL: &str = "finance.db";
const DEFAULT_SOCKET_URL: &str = "127.0.0.1:5000";
const DEFAULT_EXPORT_DIR: &str = "exports";

#[derive(Debug, Clone)]
pub struct AppConfig {
	pub database_url: String,
	pub socket_url: String,
	pub jwt_secret: Option<String>,
	pub export_dir: PathBuf,
}

impl AppConfig {
	/// Reads `.env` (if present) and then the process environment.
	pub fn from_env() -> Self {
		dotenv().ok();
		Self {
			database_url: env::var("DATABASE_URL")
				.unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
			socket_url: env::var("SOCKET_URL").unwrap_or_else(|_| DEFAULT_SOCKET_URL.to_string()),
			jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
			export_dir: env::var("EXPORT_DIR")
				.map(PathBuf::from)
				.unwrap_or_else(|_| PathBuf::from(DEFAULT_EXPORT_DIR)),
		}
	}

	pub fn jwt_secret(&self) -> anyhow::Result<&str> {
		self.jwt_secret.as_deref().context("JWT_SECRET can not be found in .env file")
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			database_url: DEFAULT_DATABASE_URL.to_string(),
			socket_url: DEFAULT_SOCKET_URL.to_string(),
			jwt_secret: None,
			export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
		}
	}
}
