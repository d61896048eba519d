use crate::{
	constants::{DEFAULT_DEPOSIT_LABEL, TIMESTAMP_FORMAT},
	db::DbPool,
	error::LedgerError,
	models::{
		LedgerEntry, NewLedgerEntry, NewTransfer, NewUser, Session, TransferReceipt, User,
	},
	password::{hash_password, verify_password, PasswordCheck},
	schema::{balances, transfers, users},
};
use diesel::{
	dsl::{exists, sum},
	prelude::*,
	result::{DatabaseErrorKind, Error as DieselError},
	sqlite::SqliteConnection,
};

/// Credential store: the `users` table.
pub struct UserRepo<'a> {
	pool: &'a DbPool,
}

impl<'a> UserRepo<'a> {
	pub fn new(pool: &'a DbPool) -> Self {
		Self { pool }
	}

	pub fn find_by_username(&self, username: &str) -> Result<Option<User>, LedgerError> {
		let mut conn = self.pool.get()?;
		find_user(&mut conn, username)
	}

	pub fn register(&self, username: &str, password: &str) -> Result<i32, LedgerError> {
		if username.is_empty() || password.is_empty() {
			return Err(LedgerError::MissingCredentials);
		}
		let mut conn = self.pool.get()?;
		if find_user(&mut conn, username)?.is_some() {
			log::warn!("Registration rejected, username taken: {}", username);
			return Err(LedgerError::DuplicateUsername);
		}

		let password_hash = hash_password(password)?;
		let new_user = NewUser { username, password_hash: &password_hash };
		let user_id = diesel::insert_into(users::table)
			.values(&new_user)
			.returning(users::id)
			.get_result::<i32>(&mut conn)
			.map_err(|e| match e {
				DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
					LedgerError::DuplicateUsername
				},
				other => other.into(),
			})?;

		log::info!("Registered user {} with ID: {}", username, user_id);
		Ok(user_id)
	}

	/// Checks a username/password pair. Unknown usernames and wrong passwords
	/// are reported the same way.
	pub fn verify(&self, username: &str, password: &str) -> Result<Session, LedgerError> {
		let mut conn = self.pool.get()?;
		let user = find_user(&mut conn, username)?.ok_or(LedgerError::InvalidCredentials)?;

		match verify_password(password, &user.password_hash)? {
			PasswordCheck::Match => {},
			PasswordCheck::LegacyMatch => {
				let upgraded = hash_password(password)?;
				diesel::update(users::table.filter(users::id.eq(user.id)))
					.set(users::password_hash.eq(&upgraded))
					.execute(&mut conn)?;
				log::info!("Upgraded legacy password hash for user ID: {}", user.id);
			},
			PasswordCheck::Mismatch => {
				log::warn!("Failed login for username: {}", username);
				return Err(LedgerError::InvalidCredentials);
			},
		}

		Ok(Session { user_id: user.id, username: user.username })
	}

	pub fn reset_password(&self, username: &str, new_password: &str) -> Result<(), LedgerError> {
		if username.is_empty() || new_password.is_empty() {
			return Err(LedgerError::MissingCredentials);
		}
		let password_hash = hash_password(new_password)?;
		let mut conn = self.pool.get()?;
		let updated = diesel::update(users::table.filter(users::username.eq(username)))
			.set(users::password_hash.eq(&password_hash))
			.execute(&mut conn)?;
		if updated == 0 {
			return Err(LedgerError::UserNotFound);
		}
		log::info!("Password reset for username: {}", username);
		Ok(())
	}
}

/// Ledger store: the `balances` table, plus the `transfers` audit table.
pub struct LedgerRepo<'a> {
	pool: &'a DbPool,
}

impl<'a> LedgerRepo<'a> {
	pub fn new(pool: &'a DbPool) -> Self {
		Self { pool }
	}

	/// Sum of every entry for the user; 0 when there are none.
	pub fn balance_of(&self, user_id: i32) -> Result<f64, LedgerError> {
		let mut conn = self.pool.get()?;
		balance_with(&mut conn, user_id)
	}

	pub fn deposit(&self, user_id: i32, amount: f64, label: &str) -> Result<i32, LedgerError> {
		ensure_positive(amount)?;
		let mut conn = self.pool.get()?;
		let user_exists = diesel::select(exists(users::table.filter(users::id.eq(user_id))))
			.get_result::<bool>(&mut conn)?;
		if !user_exists {
			return Err(LedgerError::UserNotFound);
		}
		ensure_finite_total(balance_with(&mut conn, user_id)?, amount)?;

		let label = if label.is_empty() { DEFAULT_DEPOSIT_LABEL } else { label };
		let timestamp = now();
		let entry_id = insert_entry(
			&mut conn,
			&NewLedgerEntry { user_id, amount, label, timestamp: &timestamp },
		)?;
		log::info!("Deposited {:.2} for user {} as entry {}", amount, user_id, entry_id);
		Ok(entry_id)
	}

	pub fn transfer(
		&self,
		sender: &Session,
		recipient: &str,
		amount: f64,
	) -> Result<TransferReceipt, LedgerError> {
		self.prepare_transfer(sender, recipient, amount)?.commit()
	}

	/// Runs every transfer check without writing anything.
	///
	/// The balance is read here, outside the write transaction done by
	/// [`PendingTransfer::commit`]: a second transfer by the same sender
	/// prepared in between passes the check against the same balance.
	pub fn prepare_transfer(
		&self,
		sender: &Session,
		recipient: &str,
		amount: f64,
	) -> Result<PendingTransfer<'a>, LedgerError> {
		ensure_positive(amount)?;
		let mut conn = self.pool.get()?;
		let recipient = find_user(&mut conn, recipient)?.ok_or(LedgerError::RecipientNotFound)?;
		if recipient.id == sender.user_id {
			return Err(LedgerError::SelfTransfer);
		}

		let balance = balance_with(&mut conn, sender.user_id)?;
		if amount > balance {
			log::warn!(
				"Insufficient balance for user {}: {:.2} requested, {:.2} available",
				sender.user_id,
				amount,
				balance
			);
			return Err(LedgerError::InsufficientBalance);
		}
		ensure_finite_total(balance_with(&mut conn, recipient.id)?, amount)?;

		Ok(PendingTransfer { pool: self.pool, sender: sender.clone(), recipient, amount })
	}

	/// Entries for the user in creation order.
	pub fn history_of(&self, user_id: i32) -> Result<Vec<LedgerEntry>, LedgerError> {
		let mut conn = self.pool.get()?;
		let entries = balances::table
			.filter(balances::user_id.eq(user_id))
			.order(balances::id.asc())
			.select(LedgerEntry::as_select())
			.load(&mut conn)?;
		Ok(entries)
	}
}

/// A transfer that passed its checks and has not been written yet.
pub struct PendingTransfer<'a> {
	pool: &'a DbPool,
	sender: Session,
	recipient: User,
	amount: f64,
}

impl PendingTransfer<'_> {
	pub fn commit(self) -> Result<TransferReceipt, LedgerError> {
		let mut conn = self.pool.get()?;
		let receipt = record_transfer(&mut conn, &self.sender, &self.recipient, self.amount)?;
		log::info!(
			"Transferred {:.2} from {} to {} (entries {} / {})",
			self.amount,
			self.sender.username,
			self.recipient.username,
			receipt.sent_entry_id,
			receipt.received_entry_id
		);
		Ok(receipt)
	}
}

/// Writes the debit, the credit and the audit row in one transaction. Does no
/// validation of its own.
fn record_transfer(
	conn: &mut SqliteConnection,
	sender: &Session,
	recipient: &User,
	amount: f64,
) -> Result<TransferReceipt, LedgerError> {
	let timestamp = now();
	let sent_label = format!("Sent to {}", recipient.username);
	let received_label = format!("Received from {}", sender.username);

	conn.transaction::<_, LedgerError, _>(|conn| {
		let sent_entry_id = insert_entry(
			conn,
			&NewLedgerEntry {
				user_id: sender.user_id,
				amount: -amount,
				label: &sent_label,
				timestamp: &timestamp,
			},
		)?;
		let received_entry_id = insert_entry(
			conn,
			&NewLedgerEntry {
				user_id: recipient.id,
				amount,
				label: &received_label,
				timestamp: &timestamp,
			},
		)?;
		diesel::insert_into(transfers::table)
			.values(&NewTransfer {
				from_user: sender.user_id,
				to_user: recipient.id,
				amount,
				timestamp: &timestamp,
			})
			.execute(conn)?;

		Ok(TransferReceipt {
			sent_entry_id,
			received_entry_id,
			recipient: recipient.username.clone(),
			amount,
			timestamp: timestamp.clone(),
		})
	})
}

fn find_user(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>, LedgerError> {
	let user = users::table
		.filter(users::username.eq(username))
		.select(User::as_select())
		.first::<User>(conn)
		.optional()?;
	Ok(user)
}

fn balance_with(conn: &mut SqliteConnection, user_id: i32) -> Result<f64, LedgerError> {
	let total = balances::table
		.filter(balances::user_id.eq(user_id))
		.select(sum(balances::amount))
		.get_result::<Option<f64>>(conn)?;
	Ok(total.unwrap_or(0.0))
}

fn insert_entry(conn: &mut SqliteConnection, entry: &NewLedgerEntry) -> Result<i32, LedgerError> {
	let id = diesel::insert_into(balances::table)
		.values(entry)
		.returning(balances::id)
		.get_result::<i32>(conn)?;
	Ok(id)
}

fn ensure_positive(amount: f64) -> Result<(), LedgerError> {
	if amount.is_finite() && amount > 0.0 {
		Ok(())
	} else {
		Err(LedgerError::InvalidAmount)
	}
}

/// Rejects an amount that would push a balance out of the finite range.
fn ensure_finite_total(balance: f64, amount: f64) -> Result<(), LedgerError> {
	if (balance + amount).is_finite() {
		Ok(())
	} else {
		Err(LedgerError::InvalidAmount)
	}
}

fn now() -> String {
	chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
