use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{
    backend::BlobStore,
    config::Command,
    csv_utils::{read_csv, write_csv},
    dto::{AccountPatch, AccountRow},
    error::{Error, Result},
    stores::{parse_label, AccountStore},
};

/// Runs one command against the store and writes its output to the provided writer.
///
/// # Arguments
/// * `command` - The parsed command to execute
/// * `store` - Store the command reads and mutates
/// * `writer` - Where to write the command's output (e.g. stdout)
///
/// Returns `Ok(false)` when the command ran but its answer is negative
/// (a failed validation), so the caller can exit non-zero.
///
/// # Errors
/// Returns an error if:
/// * The command names an account that does not exist
/// * An update carries no fields to change
/// * An import or export file cannot be read or written
/// * The CSV is malformed
/// * Writing to the output fails
pub fn run<B, W>(command: Command, store: &mut AccountStore<B>, mut writer: W) -> Result<bool>
where
    B: BlobStore,
    W: Write,
{
    match command {
        Command::List => {
            write_csv(writer, store.accounts().iter().map(AccountRow::from))?;
        }
        Command::Add => {
            let id = store.add_account();
            writeln!(writer, "{id}")?;
        }
        Command::Remove { id } => {
            if store.remove_account(&id) {
                writeln!(writer, "removed {id}")?;
            } else {
                writeln!(writer, "no account {id}")?;
            }
        }
        Command::Update {
            id,
            label,
            account_type,
            login,
            password,
            clear_password,
        } => {
            let mut patch = AccountPatch {
                account_type,
                login,
                ..AccountPatch::default()
            };
            if let Some(label) = label {
                patch = patch.tags(parse_label(&label)).label(label);
            }
            if clear_password {
                patch = patch.password(None);
            } else if password.is_some() {
                patch = patch.password(password);
            }
            if patch.is_empty() {
                return Err(Error::EmptyUpdate(id));
            }
            if !store.update_account(&id, patch) {
                return Err(Error::AccountNotFound(id));
            }
        }
        Command::Validate { id } => {
            let valid = store.validate_account(&id);
            let Some(account) = store.get(&id) else {
                return Err(Error::AccountNotFound(id));
            };
            if valid {
                writeln!(writer, "ok")?;
            }
            for (field, message) in account.errors.iter() {
                writeln!(writer, "{field}: {message}")?;
            }
            return Ok(valid);
        }
        Command::Export { path } => {
            let file = File::create(&path)?;
            write_csv(file, store.accounts().iter().map(AccountRow::from))?;
            writeln!(writer, "exported {} accounts", store.len())?;
        }
        Command::Import { path } => {
            let imported = import(store, &path)?;
            writeln!(writer, "imported {imported} accounts")?;
        }
    }
    Ok(true)
}

/// Adds every row as a fresh account. Row ids are ignored; tags are
/// re-derived from the label.
fn import<B: BlobStore>(store: &mut AccountStore<B>, path: &Path) -> Result<usize> {
    let mut imported = 0;
    for row in read_csv::<AccountRow, _>(path)? {
        // CSV parsing errors are critical - stop at the first bad row
        let row = row?;
        let patch = AccountPatch::default()
            .tags(parse_label(&row.label))
            .label(row.label)
            .account_type(row.account_type)
            .login(row.login);
        store.add_account_with(patch);
        imported += 1;
    }
    Ok(imported)
}
