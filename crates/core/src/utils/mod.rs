pub mod currency_format;

pub use currency_format::{format_currency, format_currency_with_symbol};
