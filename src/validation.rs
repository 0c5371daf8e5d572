//! Field rules for accounts and their localized messages.
//!
//! Login is always required. Password is required only for local accounts;
//! LDAP passwords are never checked. Both fields are limited to
//! [`MAX_FIELD_LEN`] UTF-16 code units, the unit stored records were
//! validated in.

use crate::dto::{Account, AccountErrors};

/// Counted in UTF-16 code units, so a character outside the Basic
/// Multilingual Plane (an emoji, say) counts twice.
pub const MAX_FIELD_LEN: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

/// Message set for one locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Messages {
    pub login_required: &'static str,
    pub login_too_long: &'static str,
    pub password_required: &'static str,
    pub password_too_long: &'static str,
}

const RU: Messages = Messages {
    login_required: "Логин обязателен для заполнения",
    login_too_long: "Логин не должен превышать 100 символов",
    password_required: "Пароль обязателен для заполнения",
    password_too_long: "Пароль не должен превышать 100 символов",
};

const EN: Messages = Messages {
    login_required: "Login is required",
    login_too_long: "Login must not exceed 100 characters",
    password_required: "Password is required",
    password_too_long: "Password must not exceed 100 characters",
};

impl Locale {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Self::Ru => &RU,
            Self::En => &EN,
        }
    }
}

/// Checks a single field. Blank (after trimming) wins over the length check;
/// length is measured on the untrimmed value in UTF-16 code units.
fn check_field(
    value: Option<&str>,
    required: &'static str,
    too_long: &'static str,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            (v.encode_utf16().count() > MAX_FIELD_LEN).then(|| too_long.to_owned())
        }
        _ => Some(required.to_owned()),
    }
}

/// Computes the full error set for an account without touching it.
pub fn validate(account: &Account, messages: &Messages) -> AccountErrors {
    let login = check_field(
        Some(&account.login),
        messages.login_required,
        messages.login_too_long,
    );
    let password = if account.account_type.requires_password() {
        check_field(
            account.password.as_deref(),
            messages.password_required,
            messages.password_too_long,
        )
    } else {
        None
    };
    AccountErrors { login, password }
}
