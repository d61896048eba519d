use crate::schema::*;
use diesel::{prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Sqlite))]
pub struct User {
	pub id: i32,
	pub username: String,
	pub password_hash: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
	pub username: &'a str,
	pub password_hash: &'a str,
}

/// One signed row of the `balances` table.
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = balances)]
#[diesel(check_for_backend(Sqlite))]
pub struct LedgerEntry {
	pub id: i32,
	pub user_id: i32,
	pub amount: f64,
	pub label: Option<String>,
	pub timestamp: String,
}

#[derive(Insertable)]
#[diesel(table_name = balances)]
pub struct NewLedgerEntry<'a> {
	pub user_id: i32,
	pub amount: f64,
	pub label: &'a str,
	pub timestamp: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = transfers)]
pub struct NewTransfer<'a> {
	pub from_user: i32,
	pub to_user: i32,
	pub amount: f64,
	pub timestamp: &'a str,
}

/// Identity of a logged-in user. Passed explicitly to every operation that
/// acts on behalf of someone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub user_id: i32,
	pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
	pub sent_entry_id: i32,
	pub received_entry_id: i32,
	pub recipient: String,
	pub amount: f64,
	pub timestamp: String,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
	#[validate(length(min = 1, message = "Enter username"))]
	pub username: String,
	#[validate(length(min = 1, message = "Enter password"))]
	pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
	#[validate(length(min = 1, message = "Enter username"))]
	pub username: String,
	#[validate(length(min = 1, message = "Enter new password"))]
	pub new_password: String,
}

#[derive(Serialize, Deserialize)]
pub struct AddTransactionRequest {
	pub user_id: i32,
	pub amount: f64,
	#[serde(default)]
	pub label: Option<String>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct TransferRequest {
	#[validate(length(min = 1, message = "Enter recipient"))]
	pub to_username: String,
	pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResp {
	pub user_id: i32,
	pub username: String,
	pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResp {
	pub balance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferResp {
	pub message: String,
	pub balance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResp {
	pub message: String,
	pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
	pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}
