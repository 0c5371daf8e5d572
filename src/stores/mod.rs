//! Storage layer for the account keeper. Provides:
//! - The ordered account collection and its operations ([`AccountStore`])
//! - Label parsing into tags ([`parse_label`])
//!
//! Current implementation is synchronous: every mutation is written through
//! to the backend before the call returns.

mod accounts;

pub use accounts::{parse_label, AccountStore, STORAGE_KEY};
