mod export_tests;
mod fixtures;
mod user_tests;
