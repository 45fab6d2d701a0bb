mod currency;
mod errors;
mod sensitive;

pub use currency::CurrencyCode;
pub use sensitive::{censor, AccountRef};

pub type CustomerId = String;
pub type TransactionId = String;

/// Separates the components of a table key. Never allowed inside a customer id.
pub const KEY_SEPARATOR: char = ':';
