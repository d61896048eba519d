//! Password hashing. New hashes are bcrypt; unsalted SHA-256 hex digests
//! written by older versions of the ledger still verify.

use crate::constants::HASH_COST;
use bcrypt::BcryptError;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
	Match,
	/// Matched a legacy SHA-256 digest; the caller should store a fresh hash.
	LegacyMatch,
	Mismatch,
}

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
	bcrypt::hash(password, HASH_COST)
}

pub fn verify_password(password: &str, stored: &str) -> Result<PasswordCheck, BcryptError> {
	if is_legacy_digest(stored) {
		let matches = legacy_digest(password).eq_ignore_ascii_case(stored);
		return Ok(if matches { PasswordCheck::LegacyMatch } else { PasswordCheck::Mismatch });
	}
	if bcrypt::verify(password, stored)? {
		Ok(PasswordCheck::Match)
	} else {
		Ok(PasswordCheck::Mismatch)
	}
}

pub(crate) fn legacy_digest(password: &str) -> String {
	format!("{:x}", Sha256::digest(password.as_bytes()))
}

fn is_legacy_digest(stored: &str) -> bool {
	stored.len() == 64 && stored.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bcrypt_hash_verifies() {
		let hash = hash_password("hunter2").unwrap();
		assert!(hash.starts_with("$2"));
		assert_eq!(verify_password("hunter2", &hash).unwrap(), PasswordCheck::Match);
		assert_eq!(verify_password("hunter3", &hash).unwrap(), PasswordCheck::Mismatch);
	}

	#[test]
	fn legacy_sha256_digest_is_recognised() {
		// sha256("password")
		let stored = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
		assert_eq!(legacy_digest("password"), stored);
		assert_eq!(verify_password("password", stored).unwrap(), PasswordCheck::LegacyMatch);
		assert_eq!(verify_password("Password", stored).unwrap(), PasswordCheck::Mismatch);
	}
}
