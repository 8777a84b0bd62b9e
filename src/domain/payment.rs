use crate::domain::cart::CartLine;
use crate::domain::catalog::{Address, PaymentMethod};
use crate::domain::summary::OrderSummary;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a single payment attempt. A new attempt replaces the prior one.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentResult {
    pub success: bool,
    /// Provider payment id, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Provider (gateway) order id, present on success. Distinct from the
    /// locally generated order id on `CheckoutState`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentResult {
    pub fn succeeded(payment_id: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            success: true,
            payment_id: Some(payment_id.into()),
            order_id: Some(order_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payment_id: None,
            order_id: None,
            error: Some(error.into()),
        }
    }
}

/// A payment order registered with the external gateway.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct GatewayOrder {
    pub gateway_order_id: String,
    /// Amount in the currency's minor unit, as the gateway expects.
    pub amount_minor: Decimal,
    pub currency: String,
}

/// Success payload delivered once the shopper completes payment in the
/// gateway's hosted UI.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentConfirmation {
    pub provider_payment_id: String,
    pub provider_order_id: Option<String>,
    pub signature: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

/// The completed order record assembled from a confirmed checkout.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: String,
    pub lines: Vec<CartLine>,
    pub delivery_address: Address,
    pub payment_method: PaymentMethod,
    pub summary: OrderSummary,
    pub estimated_delivery: String,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,
}
