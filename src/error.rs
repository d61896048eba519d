use crate::models::ErrorResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use diesel::r2d2::PoolError;
use thiserror::Error;

/// Everything a ledger operation can fail with. The first group are
/// user-facing conditions; the rest are infrastructure failures.
#[derive(Debug, Error)]
pub enum LedgerError {
	#[error("Username exists")]
	DuplicateUsername,
	#[error("Invalid credentials")]
	InvalidCredentials,
	#[error("Username not found")]
	UserNotFound,
	#[error("Invalid amount")]
	InvalidAmount,
	#[error("Recipient not found")]
	RecipientNotFound,
	#[error("Cannot transfer to yourself")]
	SelfTransfer,
	#[error("Insufficient balance")]
	InsufficientBalance,
	#[error("Enter username and password")]
	MissingCredentials,

	#[error("database error: {0}")]
	Database(#[from] diesel::result::Error),
	#[error("connection pool error: {0}")]
	Pool(#[from] PoolError),
	#[error("password hashing error: {0}")]
	Hash(#[from] bcrypt::BcryptError),
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),
}

impl LedgerError {
	/// True for conditions caused by the caller's input rather than by the
	/// store or the host.
	pub fn is_user_facing(&self) -> bool {
		!matches!(
			self,
			LedgerError::Database(_) |
				LedgerError::Pool(_) |
				LedgerError::Hash(_) |
				LedgerError::Io(_) |
				LedgerError::Csv(_)
		)
	}
}

impl ResponseError for LedgerError {
	fn status_code(&self) -> StatusCode {
		match self {
			LedgerError::DuplicateUsername |
			LedgerError::InvalidAmount |
			LedgerError::SelfTransfer |
			LedgerError::InsufficientBalance |
			LedgerError::MissingCredentials => StatusCode::BAD_REQUEST,
			LedgerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
			LedgerError::UserNotFound | LedgerError::RecipientNotFound => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		let error = if self.is_user_facing() {
			self.to_string()
		} else {
			log::error!("Request failed: {}", self);
			"Internal server error".to_string()
		};
		HttpResponse::build(self.status_code()).json(ErrorResponse { error })
	}
}
