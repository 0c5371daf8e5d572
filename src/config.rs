//! Command-line and environment configuration.
//!
//! Every global option can also be set through an `ACCOUNT_KEEPER_*`
//! environment variable; flags win over the environment.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::backend::FileBlobStore;
use crate::dto::AccountType;
use crate::stores::AccountStore;
use crate::validation::Locale;

#[derive(Debug, Parser)]
#[command(
    name = "account-keeper",
    about = "Keeps a list of LDAP and local accounts with validated credentials",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the accounts blob
    #[arg(
        long,
        global = true,
        env = "ACCOUNT_KEEPER_DATA_DIR",
        default_value = ".account-keeper"
    )]
    pub data_dir: PathBuf,

    /// Language of validation messages
    #[arg(
        long,
        global = true,
        env = "ACCOUNT_KEEPER_LOCALE",
        value_enum,
        default_value_t = Locale::Ru
    )]
    pub locale: Locale,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print all accounts as CSV
    List,
    /// Add a blank local account and print its id
    Add,
    /// Remove an account
    Remove { id: String },
    /// Change fields of an account
    Update {
        id: String,
        /// Semicolon-delimited label; tags are derived from it
        #[arg(long)]
        label: Option<String>,
        #[arg(long = "type", value_enum)]
        account_type: Option<AccountType>,
        #[arg(long)]
        login: Option<String>,
        #[arg(long, conflicts_with = "clear_password")]
        password: Option<String>,
        /// Store no password at all
        #[arg(long)]
        clear_password: bool,
    },
    /// Validate an account and print its errors
    Validate { id: String },
    /// Write all accounts to a CSV file
    Export { path: PathBuf },
    /// Add every row of a CSV file as a new account
    Import { path: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub locale: Locale,
}

impl Settings {
    pub fn open_store(&self) -> AccountStore<FileBlobStore> {
        AccountStore::with_locale(FileBlobStore::new(&self.data_dir), self.locale)
    }
}

impl Cli {
    /// Splits the parsed arguments into settings and the command to run.
    pub fn into_parts(self) -> (Settings, Command) {
        let settings = Settings {
            data_dir: self.data_dir,
            locale: self.locale,
        };
        (settings, self.command)
    }
}
