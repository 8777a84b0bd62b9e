use crate::domain::catalog::CustomerInfo;
use crate::domain::payment::{GatewayOrder, PaymentConfirmation};
use crate::domain::ports::{GatewayError, OrderIdGenerator, PaymentGateway};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

/// What the scripted shopper does when the hosted payment UI opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopperAction {
    Approve,
    Cancel,
    Decline(String),
}

/// An in-process stand-in for the external payment gateway.
///
/// Behaves like the real client's demo mode: it registers orders, plays a
/// scripted shopper action when payment is initiated, and verifies
/// confirmations against the orders it issued. Latencies default to zero;
/// `with_latency` restores the demo timings (500 ms create, 1 s verify).
#[derive(Clone)]
pub struct SandboxGateway {
    orders: Arc<RwLock<HashMap<String, GatewayOrder>>>,
    counter: Arc<AtomicU64>,
    shopper_action: ShopperAction,
    fail_order_creation: bool,
    verifies: bool,
    create_latency: Duration,
    verify_latency: Duration,
}

impl SandboxGateway {
    fn with_behavior(
        shopper_action: ShopperAction,
        fail_order_creation: bool,
        verifies: bool,
    ) -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
            counter: Arc::new(AtomicU64::new(0)),
            shopper_action,
            fail_order_creation,
            verifies,
            create_latency: Duration::ZERO,
            verify_latency: Duration::ZERO,
        }
    }

    /// Every attempt completes successfully.
    pub fn approving() -> Self {
        Self::with_behavior(ShopperAction::Approve, false, true)
    }

    /// `create_order` fails before the payment UI ever opens.
    pub fn failing_order_creation() -> Self {
        Self::with_behavior(ShopperAction::Approve, true, true)
    }

    /// The shopper dismisses the hosted UI.
    pub fn cancelling() -> Self {
        Self::with_behavior(ShopperAction::Cancel, false, true)
    }

    /// The payment is declined with the given reason.
    pub fn declining(reason: impl Into<String>) -> Self {
        Self::with_behavior(ShopperAction::Decline(reason.into()), false, true)
    }

    /// Payment completes but verification answers `false`.
    pub fn rejecting_verification() -> Self {
        Self::with_behavior(ShopperAction::Approve, false, false)
    }

    pub fn with_latency(mut self, create: Duration, verify: Duration) -> Self {
        self.create_latency = create;
        self.verify_latency = verify;
        self
    }
}

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn create_order(
        &self,
        amount: Decimal,
        currency: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        tokio::time::sleep(self.create_latency).await;
        if self.fail_order_creation {
            return Err(GatewayError::Unavailable(
                "order endpoint rejected the request".to_string(),
            ));
        }
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let order = GatewayOrder {
            gateway_order_id: format!("order_{sequence:06}"),
            // The gateway bills in the currency's minor unit.
            amount_minor: amount * dec!(100),
            currency: currency.to_string(),
        };
        let mut orders = self.orders.write().await;
        orders.insert(order.gateway_order_id.clone(), order.clone());
        Ok(order)
    }

    async fn initiate_payment(
        &self,
        _amount: Decimal,
        gateway_order_id: &str,
        _customer: &CustomerInfo,
    ) -> Result<PaymentConfirmation, GatewayError> {
        let orders = self.orders.read().await;
        if !orders.contains_key(gateway_order_id) {
            return Err(GatewayError::Declined("unknown gateway order".to_string()));
        }
        drop(orders);

        match &self.shopper_action {
            ShopperAction::Approve => {
                let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
                Ok(PaymentConfirmation {
                    provider_payment_id: format!("pay_{sequence:06}"),
                    provider_order_id: Some(gateway_order_id.to_string()),
                    signature: Some(format!("sig_{sequence:06}")),
                })
            }
            ShopperAction::Cancel => Err(GatewayError::Cancelled),
            ShopperAction::Decline(reason) => Err(GatewayError::Declined(reason.clone())),
        }
    }

    async fn verify_payment(
        &self,
        _payment_id: &str,
        order_id: &str,
        _signature: &str,
    ) -> Result<bool, GatewayError> {
        tokio::time::sleep(self.verify_latency).await;
        let orders = self.orders.read().await;
        Ok(self.verifies && orders.contains_key(order_id))
    }
}

/// Production order ids: `FE` followed by the last six digits of the
/// current millisecond timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampOrderIds;

impl OrderIdGenerator for TimestampOrderIds {
    fn next_order_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        format!("FE{:06}", millis % 1_000_000)
    }
}

/// Deterministic ids for tests.
#[derive(Debug, Clone)]
pub struct FixedOrderIds {
    id: String,
}

impl FixedOrderIds {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl OrderIdGenerator for FixedOrderIds {
    fn next_order_id(&self) -> String {
        self.id.clone()
    }
}
