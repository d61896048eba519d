mod config;
mod constants;
mod db;
mod error;
mod export;
mod handler;
mod midware;
mod models;
mod password;
mod repo;
mod schema;
mod shell;
#[cfg(test)]
mod tests;
mod transaction_routes;
mod user_routes;
use actix_cors::Cors;
use actix_web::{
	web::{self},
	App, HttpServer,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use config::AppConfig;
use env_logger::Env;
use midware::jwt::{Authentication, JWT};
use std::io;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
	/// SQLite database file (overrides DATABASE_URL)
	#[clap(long, global = true)]
	database: Option<String>,

	#[clap(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Serve the JSON API
	Serve {
		/// Address to listen on (overrides SOCKET_URL)
		#[clap(long)]
		bind: Option<String>,
	},
	/// Interactive terminal session
	Shell,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(Env::default().default_filter_or("info"));
	let cli = Cli::parse();
	let mut config = AppConfig::from_env();
	if let Some(database) = cli.database {
		config.database_url = database;
	}

	let pool = db::get_db_pool(&config.database_url)?;
	db::init(&pool).context("Unable to initialize the db")?;

	match cli.command {
		Command::Serve { bind } => {
			if let Some(bind) = bind {
				config.socket_url = bind;
			}
			serve(pool, config).await
		},
		Command::Shell => {
			let stdin = io::stdin();
			let mut shell = shell::Shell::new(
				&pool,
				config.export_dir.clone(),
				stdin.lock(),
				io::stdout(),
			);
			shell.run().context("terminal session failed")
		},
	}
}

async fn serve(pool: db::DbPool, config: AppConfig) -> anyhow::Result<()> {
	let jwt_secret = config.jwt_secret()?.to_string();
	let sock_url = config.socket_url.clone();
	log::info!("Listening on: {}..", sock_url);

	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(pool.clone()))
			.app_data(web::Data::new(JWT::new(&jwt_secret)))
			.app_data(web::Data::new(config.clone()))
			.wrap(Authentication::new(&jwt_secret))
			.wrap(
				Cors::default()
					.allow_any_origin()
					.allow_any_method()
					.allow_any_header()
					.supports_credentials()
					.max_age(3600),
			)
			.wrap(actix_web::middleware::Logger::default())
			.configure(user_routes::init)
			.configure(transaction_routes::init)
	})
	.bind(&sock_url)
	.with_context(|| format!("Unable to bind {}", sock_url))?
	.run()
	.await?;
	Ok(())
}
