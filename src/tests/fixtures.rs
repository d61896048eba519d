use crate::models::{AddTransactionRequest, RegisterRequest, ResetPasswordRequest, TransferRequest};

pub struct TestFixtures;

impl TestFixtures {
	pub fn registration(username: &str, password: &str) -> RegisterRequest {
		RegisterRequest { username: username.to_string(), password: password.to_string() }
	}

	pub fn reset(username: &str, new_password: &str) -> ResetPasswordRequest {
		ResetPasswordRequest {
			username: username.to_string(),
			new_password: new_password.to_string(),
		}
	}

	pub fn deposit(user_id: i32, amount: f64) -> AddTransactionRequest {
		AddTransactionRequest { user_id, amount, label: Some("Deposit".to_string()) }
	}

	pub fn transfer(to_username: &str, amount: f64) -> TransferRequest {
		TransferRequest { to_username: to_username.to_string(), amount }
	}
}
