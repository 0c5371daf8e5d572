pub mod backend;
pub mod config;
mod csv_utils;
mod dto;
mod error;
mod ids;
mod runner;
mod stores;
pub mod validation;

pub use dto::{Account, AccountErrors, AccountPatch, AccountRow, AccountType, Tag};
pub use error::{Error, Result};
pub use runner::run;
pub use stores::{parse_label, AccountStore, STORAGE_KEY};
