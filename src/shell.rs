//! Interactive terminal front end. Offers the same operations as the HTTP
//! API, driven by prompts instead of requests.

use crate::{
	db::DbPool,
	error::LedgerError,
	export::{export_csv, ExportOutcome},
	models::Session,
	repo::{LedgerRepo, UserRepo},
};
use colored::Colorize;
use std::{
	io::{self, BufRead, Write},
	path::PathBuf,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
	LoggedOut,
	LoggedIn(Session),
}

enum Notice {
	Error,
	Success,
	Info,
}

pub struct Shell<'a, R, W> {
	pool: &'a DbPool,
	export_dir: PathBuf,
	input: R,
	output: W,
	state: SessionState,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
	pub fn new(pool: &'a DbPool, export_dir: PathBuf, input: R, output: W) -> Self {
		Self { pool, export_dir, input, output, state: SessionState::LoggedOut }
	}

	pub fn state(&self) -> &SessionState {
		&self.state
	}

	pub fn into_output(self) -> W {
		self.output
	}

	/// Runs until `quit` or end of input.
	pub fn run(&mut self) -> io::Result<()> {
		loop {
			self.print_menu()?;
			let Some(choice) = self.prompt("> ")? else {
				break;
			};
			let keep_going = match self.state.clone() {
				SessionState::LoggedOut => self.logged_out_command(&choice)?,
				SessionState::LoggedIn(session) => self.logged_in_command(&session, &choice)?,
			};
			if !keep_going {
				break;
			}
		}
		writeln!(self.output, "Bye")?;
		Ok(())
	}

	fn print_menu(&mut self) -> io::Result<()> {
		match self.state.clone() {
			SessionState::LoggedOut => {
				writeln!(self.output, "Commands: login, register, forgot, quit")
			},
			SessionState::LoggedIn(session) => {
				writeln!(self.output, "Welcome, {}", session.username)?;
				match LedgerRepo::new(self.pool).balance_of(session.user_id) {
					Ok(balance) => writeln!(self.output, "Balance: ₹{:.2}", balance)?,
					Err(e) => self.report(e)?,
				}
				writeln!(
					self.output,
					"Commands: balance, deposit, transfer, history, export, logout, quit"
				)
			},
		}
	}

	fn logged_out_command(&mut self, choice: &str) -> io::Result<bool> {
		match choice {
			"login" => self.login()?,
			"register" => self.register()?,
			"forgot" => self.forgot_password()?,
			"quit" | "exit" => return Ok(false),
			"" => {},
			other => self.notice(Notice::Error, &format!("Unknown command: {}", other))?,
		}
		Ok(true)
	}

	fn logged_in_command(&mut self, session: &Session, choice: &str) -> io::Result<bool> {
		match choice {
			"balance" => match LedgerRepo::new(self.pool).balance_of(session.user_id) {
				Ok(balance) => self.notice(Notice::Info, &format!("Balance: ₹{:.2}", balance))?,
				Err(e) => self.report(e)?,
			},
			"deposit" => self.deposit(session)?,
			"transfer" => self.transfer(session)?,
			"history" => self.history(session)?,
			"export" => self.export(session)?,
			"logout" => {
				log::info!("User {} logged out", session.user_id);
				self.state = SessionState::LoggedOut;
			},
			"quit" | "exit" => return Ok(false),
			"" => {},
			other => self.notice(Notice::Error, &format!("Unknown command: {}", other))?,
		}
		Ok(true)
	}

	fn login(&mut self) -> io::Result<()> {
		let username = self.prompt("Username: ")?.unwrap_or_default();
		let password = self.prompt("Password: ")?.unwrap_or_default();
		if username.is_empty() || password.is_empty() {
			return self.notice(Notice::Error, "Enter username and password");
		}
		match UserRepo::new(self.pool).verify(&username, &password) {
			Ok(session) => {
				log::info!("User {} logged in", session.user_id);
				self.state = SessionState::LoggedIn(session);
				Ok(())
			},
			Err(e) => self.report(e),
		}
	}

	fn register(&mut self) -> io::Result<()> {
		let username = self.prompt("Username: ")?.unwrap_or_default();
		let password = self.prompt("Password: ")?.unwrap_or_default();
		if username.is_empty() || password.is_empty() {
			return self.notice(Notice::Error, "Enter username and password");
		}
		match UserRepo::new(self.pool).register(&username, &password) {
			Ok(_) => self.notice(Notice::Success, "Registered, please login"),
			Err(LedgerError::DuplicateUsername) => {
				self.notice(Notice::Error, "Username already exists")
			},
			Err(e) => self.report(e),
		}
	}

	fn forgot_password(&mut self) -> io::Result<()> {
		let username = self.prompt("Username: ")?.unwrap_or_default();
		let new_password = self.prompt("New password: ")?.unwrap_or_default();
		if username.is_empty() || new_password.is_empty() {
			return self.notice(Notice::Error, "Enter username and new password");
		}
		match UserRepo::new(self.pool).reset_password(&username, &new_password) {
			Ok(()) => self.notice(Notice::Success, "Password reset successfully"),
			Err(e) => self.report(e),
		}
	}

	fn deposit(&mut self, session: &Session) -> io::Result<()> {
		let amount = self.prompt("Amount: ")?.unwrap_or_default();
		let label = self.prompt("Label: ")?.unwrap_or_default();
		if amount.is_empty() {
			return self.notice(Notice::Error, "Enter amount");
		}
		let Ok(amount) = amount.parse::<f64>() else {
			return self.report(LedgerError::InvalidAmount);
		};
		match LedgerRepo::new(self.pool).deposit(session.user_id, amount, &label) {
			Ok(_) => self.notice(Notice::Success, &format!("₹{:.2} added", amount)),
			Err(e) => self.report(e),
		}
	}

	fn transfer(&mut self, session: &Session) -> io::Result<()> {
		let recipient = self.prompt("Recipient: ")?.unwrap_or_default();
		let amount = self.prompt("Amount: ")?.unwrap_or_default();
		if recipient.is_empty() || amount.is_empty() {
			return self.notice(Notice::Error, "Enter recipient and amount");
		}
		let Ok(amount) = amount.parse::<f64>() else {
			return self.report(LedgerError::InvalidAmount);
		};
		match LedgerRepo::new(self.pool).transfer(session, &recipient, amount) {
			Ok(receipt) => self.notice(
				Notice::Success,
				&format!("₹{:.2} sent to {}", receipt.amount, receipt.recipient),
			),
			Err(e) => self.report(e),
		}
	}

	fn history(&mut self, session: &Session) -> io::Result<()> {
		let entries = match LedgerRepo::new(self.pool).history_of(session.user_id) {
			Ok(entries) => entries,
			Err(e) => return self.report(e),
		};
		if entries.is_empty() {
			return self.notice(Notice::Info, "No transactions yet");
		}
		writeln!(self.output, "{}", "No | Label | Amount | Date/Time".bold())?;
		for entry in entries {
			writeln!(
				self.output,
				"{} | {} | ₹{:.2} | {}",
				entry.id,
				entry.label.unwrap_or_default(),
				entry.amount,
				entry.timestamp
			)?;
		}
		Ok(())
	}

	fn export(&mut self, session: &Session) -> io::Result<()> {
		match export_csv(self.pool, session, &self.export_dir) {
			Ok(ExportOutcome::Written(path)) => {
				self.notice(Notice::Success, &format!("CSV saved at: {}", path.display()))
			},
			Ok(ExportOutcome::Empty) => self.notice(Notice::Info, "No data to export"),
			Err(e) => self.report(e),
		}
	}

	/// Reads one trimmed line; `None` at end of input.
	fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
		write!(self.output, "{}", text)?;
		self.output.flush()?;
		let mut line = String::new();
		if self.input.read_line(&mut line)? == 0 {
			return Ok(None);
		}
		Ok(Some(line.trim().to_string()))
	}

	fn notice(&mut self, kind: Notice, text: &str) -> io::Result<()> {
		let title = match kind {
			Notice::Error => "Error".red(),
			Notice::Success => "Success".green(),
			Notice::Info => "Info".yellow(),
		};
		writeln!(self.output, "{}: {}", title, text)
	}

	fn report(&mut self, err: LedgerError) -> io::Result<()> {
		if err.is_user_facing() {
			self.notice(Notice::Error, &err.to_string())
		} else {
			log::error!("Shell operation failed: {}", err);
			self.notice(Notice::Error, "Something went wrong, see the log for details")
		}
	}
}
