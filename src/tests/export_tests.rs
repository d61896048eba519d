use std::fs;

use crate::{
	export::{export_csv, export_path, ExportOutcome},
	repo::LedgerRepo,
	tests::test_utils::{fund, register_user, setup_pool},
};

#[test]
fn empty_history_writes_nothing() {
	let pool = setup_pool();
	let alice = register_user(&pool, "alice");
	let dir = tempfile::tempdir().unwrap();
	let export_dir = dir.path().join("exports");

	let outcome = export_csv(&pool, &alice, &export_dir).unwrap();

	assert_eq!(outcome, ExportOutcome::Empty);
	assert!(!export_dir.exists());
}

#[test]
fn history_is_written_in_order_with_header() {
	let pool = setup_pool();
	let alice = register_user(&pool, "alice");
	register_user(&pool, "bob");
	fund(&pool, &alice, 100.0);
	LedgerRepo::new(&pool).transfer(&alice, "bob", 30.0).unwrap();
	let dir = tempfile::tempdir().unwrap();
	let export_dir = dir.path().join("exports");

	let outcome = export_csv(&pool, &alice, &export_dir).unwrap();

	let path = export_path(&export_dir, "alice");
	assert_eq!(outcome, ExportOutcome::Written(path.clone()));
	let contents = fs::read_to_string(&path).unwrap();
	let lines: Vec<&str> = contents.lines().collect();
	assert_eq!(lines.len(), 3);
	assert_eq!(lines[0], "No,Label,Amount,Date/Time");
	assert!(lines[1].starts_with("1,Deposit,100.00,"));
	assert!(lines[2].starts_with("2,Sent to bob,-30.00,"));
}

#[test]
fn export_overwrites_previous_file() {
	let pool = setup_pool();
	let alice = register_user(&pool, "alice");
	let dir = tempfile::tempdir().unwrap();
	fund(&pool, &alice, 1.0);
	export_csv(&pool, &alice, dir.path()).unwrap();
	fund(&pool, &alice, 2.0);

	export_csv(&pool, &alice, dir.path()).unwrap();

	let contents = fs::read_to_string(export_path(dir.path(), "alice")).unwrap();
	assert_eq!(contents.lines().count(), 3);
}
