use crate::error::CheckoutError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative unit price.
///
/// Wrapper around `rust_decimal::Decimal` so that a negative price is
/// unrepresentable anywhere in the cart.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, CheckoutError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(CheckoutError::ValidationError(
                "Price must be non-negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// A single line in the shopper's cart.
///
/// Quantity is never stored at zero: any mutation that would leave a line
/// at quantity 0 removes the line instead (see `CheckoutState`).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CartLine {
    /// Unique identifier within the cart.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub restaurant: String,
    pub price: Price,
    pub quantity: u32,
    /// Free-form options chosen by the shopper. Display only.
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl CartLine {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Price, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            restaurant: String::new(),
            price,
            quantity,
            customizations: Vec::new(),
        }
    }

    /// Extended price for this line.
    pub fn line_total(&self) -> Decimal {
        self.price.value() * Decimal::from(self.quantity)
    }
}
