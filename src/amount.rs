use rust_decimal::Decimal;
use serde::de::{Deserialize, Deserializer};
use std::fmt;

use crate::Error;

/// A transfer amount that is known to be non-negative.
///
/// The boundary builds one from user input and rejects negatives there, so
/// the engine can take it as-is. Zero is allowed and transfers nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value < Decimal::ZERO {
            return Err(Error::NegativeAmount);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Scale is preserved, so `100.0` prints as `100.0`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Amount::new(value).map_err(serde::de::Error::custom)
    }
}
