pub const AUTHORIZATION: &str = "Authorization";
pub const EMPTY: &str = "";
pub const MESSAGE_INVALID_TOKEN: &str = "Invalid token, please login again";

// seconds
pub const ONE_WEEK: usize = 60 * 60 * 24 * 7;

pub const IGNORE_ROUTES: [&str; 5] =
	["/register", "/login", "/reset_password", "/balance", "/add_transaction"];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_DEPOSIT_LABEL: &str = "Deposit";
pub const CSV_HEADER: [&str; 4] = ["No", "Label", "Amount", "Date/Time"];

#[cfg(not(test))]
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
pub const HASH_COST: u32 = 4;
