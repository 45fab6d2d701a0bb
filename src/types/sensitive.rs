use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Masks a sensitive value for display or logging.
///
/// Keeps the first and last characters and replaces everything between them
/// with `*`. Values of one or two characters keep at most the first one.
pub fn censor(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();

    match chars.len() {
        0 => String::new(),
        1 => "*".to_string(),
        2 => format!("{}*", chars[0]),
        length => format!("{}{}{}", chars[0], "*".repeat(length - 2), chars[length - 1])
    }
}

/// An account reference (IBAN or similar).
///
/// Only ever read from the event log. Every formatted or serialized
/// representation is censored.
#[derive(Clone, Eq, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AccountRef(String);

impl AccountRef {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for AccountRef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&censor(&self.0))
    }
}

impl Debug for AccountRef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "AccountRef({})", censor(&self.0))
    }
}

impl Serialize for AccountRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&censor(&self.0))
    }
}

#[cfg(test)]
impl AccountRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}
