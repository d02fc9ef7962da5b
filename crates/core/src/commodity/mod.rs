//! Commodities, prices and currency conversion.

pub mod conversion;
pub mod price;
pub mod types;

pub use conversion::{ConversionError, CurrencyConversion};
pub use price::{PriceDb, latest_price};
pub use types::{CURRENCY_NAMESPACE, Commodity, Price};
