use serde::{Deserialize, Serialize};

/// Local accounts are stored as `"Локальная"`; existing blobs carry that exact
/// string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum AccountType {
    #[serde(rename = "LDAP")]
    #[value(name = "ldap")]
    Ldap,
    #[default]
    #[serde(rename = "Локальная")]
    #[value(name = "local")]
    Local,
}

impl AccountType {
    /// Only local accounts carry a password that has to be validated.
    pub fn requires_password(&self) -> bool {
        matches!(self, Self::Local)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
}

impl Tag {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Field errors from the most recent validation. Absent entries are omitted
/// from the stored JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AccountErrors {
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.password.is_none()
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("login", &self.login), ("password", &self.password)]
            .into_iter()
            .filter_map(|(field, message)| message.as_deref().map(|m| (field, m)))
    }
}

/// A stored credential record.
///
/// Missing fields in older blobs fall back to their defaults, so a record
/// without `tags` or `errors` still loads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub label: String,
    pub tags: Vec<Tag>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub login: String,
    pub password: Option<String>,
    pub errors: AccountErrors,
}

impl Account {
    /// A blank local account, as created by the store.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: Some(String::new()),
            ..Self::default()
        }
    }
}

/// Partial field set for a shallow merge into an [`Account`].
///
/// Every `Some` field overwrites the record's value; `None` leaves it alone.
/// The id is not part of a patch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub label: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub account_type: Option<AccountType>,
    pub login: Option<String>,
    pub password: Option<Option<String>>,
    pub errors: Option<AccountErrors>,
}

impl AccountPatch {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn password(mut self, password: Option<String>) -> Self {
        self.password = Some(password);
        self
    }

    pub fn errors(mut self, errors: AccountErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, account: &mut Account) {
        if let Some(label) = self.label {
            account.label = label;
        }
        if let Some(tags) = self.tags {
            account.tags = tags;
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
        if let Some(login) = self.login {
            account.login = login;
        }
        if let Some(password) = self.password {
            account.password = password;
        }
        if let Some(errors) = self.errors {
            account.errors = errors;
        }
    }
}

/// Flat CSV row for import and export. Passwords are never written out.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountRow {
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub login: String,
    #[serde(default)]
    pub tags: String,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            label: account.label.clone(),
            account_type: account.account_type,
            login: account.login.clone(),
            tags: account
                .tags
                .iter()
                .map(|tag| tag.text.as_str())
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}
