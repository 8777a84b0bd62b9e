use crate::domain::catalog::CustomerInfo;
use crate::domain::payment::{PaymentConfirmation, PaymentResult};
use crate::domain::ports::{OrderIdGenerator, OrderIdGeneratorBox, PaymentGatewayBox};
use crate::domain::state::CheckoutState;
use crate::domain::steps::Step;

/// The only currency the flow charges in.
pub const CURRENCY: &str = "INR";

/// Drives the external payment protocol for one checkout session:
/// create order → hosted payment UI → verify → finalize.
///
/// The gateway and id generator are injected so tests can substitute
/// scripted doubles. Every exit path, success or failure, clears the
/// state's processing flag; failures become `PaymentResult` values stored
/// in state and never propagate to the caller.
pub struct PaymentOrchestrator {
    gateway: PaymentGatewayBox,
    order_ids: OrderIdGeneratorBox,
}

impl PaymentOrchestrator {
    pub fn new(gateway: PaymentGatewayBox, order_ids: OrderIdGeneratorBox) -> Self {
        Self { gateway, order_ids }
    }

    pub fn order_ids(&self) -> &dyn OrderIdGenerator {
        self.order_ids.as_ref()
    }

    /// Runs one full payment attempt against the gateway.
    ///
    /// Each protocol step is awaited before the next runs; the processing
    /// flag guards against a second attempt starting while this one is in
    /// flight.
    pub async fn process_payment(&self, state: &mut CheckoutState, customer: &CustomerInfo) {
        state.set_processing(true);
        let total = state.summary().total;

        let order = match self.gateway.create_order(total, CURRENCY).await {
            Ok(order) => order,
            Err(_) => {
                Self::apply_failure(state, "order creation failed");
                return;
            }
        };
        state.set_gateway_order_id(order.gateway_order_id.clone());

        match self
            .gateway
            .initiate_payment(total, &order.gateway_order_id, customer)
            .await
        {
            Ok(confirmation) => {
                let verified = self
                    .gateway
                    .verify_payment(
                        &confirmation.provider_payment_id,
                        confirmation
                            .provider_order_id
                            .as_deref()
                            .unwrap_or(&order.gateway_order_id),
                        confirmation.signature.as_deref().unwrap_or(""),
                    )
                    .await;
                match verified {
                    Ok(true) => {
                        self.apply_confirmation(state, &confirmation, &order.gateway_order_id);
                    }
                    Ok(false) | Err(_) => Self::apply_failure(state, "verification failed"),
                }
            }
            Err(error) => Self::apply_failure(state, error.to_string()),
        }
    }

    /// Finalizes a verified payment: fresh local order id, success result
    /// carrying the provider ids, step to confirmation.
    ///
    /// Tolerates duplicate delivery: once the attempt has succeeded, a
    /// repeated outcome leaves the result and step untouched.
    pub fn apply_confirmation(
        &self,
        state: &mut CheckoutState,
        confirmation: &PaymentConfirmation,
        created_order_id: &str,
    ) {
        if Self::already_succeeded(state) {
            state.set_processing(false);
            return;
        }
        state.set_order_id(self.order_ids.next_order_id());
        let provider_order_id = confirmation
            .provider_order_id
            .clone()
            .unwrap_or_else(|| created_order_id.to_string());
        state.set_payment_result(PaymentResult::succeeded(
            confirmation.provider_payment_id.clone(),
            provider_order_id,
        ));
        state.set_step(Step::Confirmation);
        state.set_processing(false);
    }

    /// Terminates the attempt with a failure reason, leaving the step where
    /// it was so the shopper can retry from review. Also duplicate-tolerant.
    pub fn apply_failure(state: &mut CheckoutState, reason: impl Into<String>) {
        if Self::already_succeeded(state) {
            state.set_processing(false);
            return;
        }
        state.set_payment_result(PaymentResult::failed(reason));
        state.set_processing(false);
    }

    fn already_succeeded(state: &CheckoutState) -> bool {
        state.last_payment_result().is_some_and(|result| result.success)
    }
}
