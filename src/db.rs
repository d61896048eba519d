use anyhow::{anyhow, Context};
use diesel::{
	r2d2::{self, ConnectionManager},
	sqlite::SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const IN_MEMORY: &str = ":memory:";

pub fn get_db_pool(database_url: &str) -> anyhow::Result<DbPool> {
	let manager = ConnectionManager::<SqliteConnection>::new(database_url);
	let mut builder = r2d2::Pool::builder();
	// every in-memory connection is its own database
	if database_url == IN_MEMORY {
		builder = builder.max_size(1);
	}
	builder
		.build(manager)
		.with_context(|| format!("Failed to create pool for {}", database_url))
}

pub fn init(pool: &DbPool) -> anyhow::Result<()> {
	let mut pooled = pool.get().context("can not get a connection from the pool")?;
	let conn: &mut SqliteConnection = &mut pooled;
	let applied = conn
		.run_pending_migrations(MIGRATIONS)
		.map_err(|e| anyhow!("Unable to run migrations: {}", e))?;
	for version in applied {
		log::info!("Applied migration {}", version);
	}
	Ok(())
}
