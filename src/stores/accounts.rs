use tracing::{debug, error, warn};

use crate::backend::BlobStore;
use crate::dto::{Account, AccountPatch, Tag};
use crate::ids::IdGenerator;
use crate::validation::{self, Locale, Messages};

/// Key the whole collection is stored under.
pub const STORAGE_KEY: &str = "accounts";

type Listener = Box<dyn FnMut(&[Account])>;

/// Splits a semicolon-delimited label into tags, trimming each part and
/// dropping empty ones.
pub fn parse_label(label: &str) -> Vec<Tag> {
    let label = label.trim();
    if label.is_empty() {
        return Vec::new();
    }
    label
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Tag::new)
        .collect()
}

/// Ordered collection of accounts mirrored into a [`BlobStore`].
///
/// Every mutation rewrites the whole collection to the backend before
/// returning. Backend failures are logged and never surface to the caller:
/// the in-memory collection stays the source of truth for the session.
pub struct AccountStore<B> {
    backend: B,
    accounts: Vec<Account>,
    messages: &'static Messages,
    ids: IdGenerator,
    listeners: Vec<Listener>,
}

impl<B: BlobStore> AccountStore<B> {
    /// Creates a store with Russian validation messages and loads whatever
    /// the backend holds.
    pub fn new(backend: B) -> Self {
        Self::with_locale(backend, Locale::default())
    }

    pub fn with_locale(backend: B, locale: Locale) -> Self {
        let mut store = Self {
            backend,
            accounts: Vec::new(),
            messages: locale.messages(),
            ids: IdGenerator::new(),
            listeners: Vec::new(),
        };
        store.load();
        store
    }

    /// Replaces the collection with the stored one. A missing blob leaves it
    /// empty, and so does a blob that cannot be read or parsed.
    fn load(&mut self) {
        let blob = match self.backend.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(err) => {
                error!(error = %err, "failed to read accounts from storage");
                return;
            }
        };
        match serde_json::from_str::<Vec<Account>>(&blob) {
            Ok(accounts) => {
                for account in &accounts {
                    self.ids.observe(&account.id);
                }
                self.accounts = accounts;
                debug!(count = self.accounts.len(), "accounts loaded");
            }
            Err(err) => error!(error = %err, "failed to parse stored accounts"),
        }
    }

    /// Writes the full collection to the backend, logging any failure.
    pub fn save(&mut self) {
        let blob = match serde_json::to_string(&self.accounts) {
            Ok(blob) => blob,
            Err(err) => {
                error!(error = %err, "failed to serialize accounts");
                return;
            }
        };
        if let Err(err) = self.backend.set(STORAGE_KEY, &blob) {
            error!(error = %err, "failed to save accounts to storage");
        }
    }

    /// Persists and then tells subscribers about the new state.
    fn commit(&mut self) {
        self.save();
        for listener in &mut self.listeners {
            listener(&self.accounts);
        }
    }

    /// Registers a callback run with the whole collection after every
    /// mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Account]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Appends a blank local account and returns its id.
    pub fn add_account(&mut self) -> String {
        self.add_account_with(AccountPatch::default())
    }

    /// Appends a local account with `patch` merged over the blank defaults,
    /// persisting once. Returns the new id.
    pub fn add_account_with(&mut self, patch: AccountPatch) -> String {
        let id = self.fresh_id();
        let mut account = Account::new(id.clone());
        patch.apply(&mut account);
        self.accounts.push(account);
        debug!(id = %id, count = self.accounts.len(), "account added");
        self.commit();
        id
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Removes the first account with `id`. Returns false, without touching
    /// storage, if there is none.
    pub fn remove_account(&mut self, id: &str) -> bool {
        let Some(index) = self.accounts.iter().position(|account| account.id == id) else {
            return false;
        };
        self.accounts.remove(index);
        debug!(id, count = self.accounts.len(), "account removed");
        self.commit();
        true
    }

    /// Merges `patch` into the account with `id`. Returns false, without
    /// touching storage, if there is none.
    pub fn update_account(&mut self, id: &str, patch: AccountPatch) -> bool {
        let Some(account) = self.accounts.iter_mut().find(|account| account.id == id) else {
            return false;
        };
        patch.apply(account);
        debug!(id, "account updated");
        self.commit();
        true
    }

    /// Sets the label and the tags parsed from it in one update.
    pub fn relabel(&mut self, id: &str, label: &str) -> bool {
        let patch = AccountPatch::default()
            .label(label)
            .tags(parse_label(label));
        self.update_account(id, patch)
    }

    /// Validates the account with `id`, replaces its errors with the result
    /// and persists. Returns true iff no field failed. An unknown id is
    /// reported as invalid and nothing is written.
    pub fn validate_account(&mut self, id: &str) -> bool {
        let messages = self.messages;
        let Some(account) = self.accounts.iter_mut().find(|account| account.id == id) else {
            warn!(id, "validation requested for unknown account");
            return false;
        };
        let errors = validation::validate(account, messages);
        let valid = errors.is_empty();
        account.errors = errors;
        debug!(id, valid, "account validated");
        self.commit();
        valid
    }
}
