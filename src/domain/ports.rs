use crate::domain::catalog::CustomerInfo;
use crate::domain::payment::{GatewayOrder, PaymentConfirmation};
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure arm of the gateway protocol. Cancellation is an error like any
/// other; the gateway exposes no separate cancellation API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Payment cancelled by user")]
    Cancelled,
    #[error("{0}")]
    Declined(String),
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

/// The external payment gateway, narrowed to the three calls the checkout
/// core needs. Injected into the orchestrator so tests can substitute a
/// scripted double.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Registers a payment order with the gateway.
    async fn create_order(
        &self,
        amount: Decimal,
        currency: &str,
    ) -> Result<GatewayOrder, GatewayError>;

    /// Opens the gateway's hosted payment UI and resolves to exactly one of
    /// the two outcomes: the shopper's confirmation, or an error (which
    /// covers declines, SDK failures and user dismissal alike).
    async fn initiate_payment(
        &self,
        amount: Decimal,
        gateway_order_id: &str,
        customer: &CustomerInfo,
    ) -> Result<PaymentConfirmation, GatewayError>;

    /// Verifies a completed payment against the gateway.
    async fn verify_payment(
        &self,
        payment_id: &str,
        order_id: &str,
        signature: &str,
    ) -> Result<bool, GatewayError>;
}

/// Source of locally generated order identifiers. Injectable so tests can
/// pin deterministic ids; implementations must keep the `FE` prefix +
/// numeric suffix format.
pub trait OrderIdGenerator: Send + Sync {
    fn next_order_id(&self) -> String;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type OrderIdGeneratorBox = Box<dyn OrderIdGenerator>;
