//! Currency conversion primitive.

use rust_decimal::Decimal;
use thiserror::Error;

/// No price links the two commodities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot convert {from} to {to}")]
pub struct ConversionError {
    /// Source commodity, as displayed to users.
    pub from: String,
    /// Target commodity, as displayed to users.
    pub to: String,
}

impl ConversionError {
    /// Creates a conversion error between two named commodities.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Source of conversion factors between commodities.
///
/// Implementations backed by GnuCash price data fail for `from == to`: a
/// commodity has no price in itself. Callers that may see identical
/// commodities must handle that case before asking.
pub trait CurrencyConversion {
    /// Commodity key.
    type Commodity: PartialEq;

    /// Factor converting one unit of `from` into `to`.
    fn currency_conversion(
        &self,
        from: &Self::Commodity,
        to: &Self::Commodity,
    ) -> Result<Decimal, ConversionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError::new("LOYALTY_POINTS", "EUR");
        assert_eq!(err.to_string(), "Cannot convert LOYALTY_POINTS to EUR");
    }
}
