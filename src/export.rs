use crate::{
	constants::CSV_HEADER, db::DbPool, error::LedgerError, models::Session, repo::LedgerRepo,
};
use csv::WriterBuilder;
use std::{
	fs,
	path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
	Written(PathBuf),
	/// Nothing to export; no file was created.
	Empty,
}

pub fn export_path(dir: &Path, username: &str) -> PathBuf {
	dir.join(format!("{}_history.csv", username))
}

/// Writes the session user's history to `<dir>/<username>_history.csv`.
pub fn export_csv(
	pool: &DbPool,
	session: &Session,
	dir: &Path,
) -> Result<ExportOutcome, LedgerError> {
	let entries = LedgerRepo::new(pool).history_of(session.user_id)?;
	if entries.is_empty() {
		log::info!("No history to export for user {}", session.user_id);
		return Ok(ExportOutcome::Empty);
	}

	fs::create_dir_all(dir)?;
	let path = export_path(dir, &session.username);
	let mut writer = WriterBuilder::new().from_path(&path)?;
	writer.write_record(CSV_HEADER)?;
	for entry in &entries {
		writer.write_record(&[
			entry.id.to_string(),
			entry.label.clone().unwrap_or_default(),
			format!("{:.2}", entry.amount),
			entry.timestamp.clone(),
		])?;
	}
	writer.flush()?;

	log::info!("Exported {} entries for user {} to {}", entries.len(), session.user_id, path.display());
	Ok(ExportOutcome::Written(path))
}
