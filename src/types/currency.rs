use crate::types::errors::CurrencyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const CODE_LENGTH: usize = 3;

/// An ISO-4217 style currency code, always three ASCII uppercase letters.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; CODE_LENGTH]);

impl CurrencyCode {
    /// Indonesian rupiah, the read boundary's default base currency.
    pub const IDR: CurrencyCode = CurrencyCode(*b"IDR");

    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII uppercase bytes.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let bytes = value.as_bytes();

        if bytes.len() != CODE_LENGTH || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(CurrencyError::InvalidFormat(value.to_string()));
        }

        let mut code = [0u8; CODE_LENGTH];
        code.copy_from_slice(bytes);

        Ok(CurrencyCode(code))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::from_str(value.trim())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
