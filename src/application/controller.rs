use crate::application::orchestrator::PaymentOrchestrator;
use crate::domain::catalog::{CustomerInfo, PaymentMethodKind};
use crate::domain::ports::{OrderIdGeneratorBox, PaymentGatewayBox};
use crate::domain::state::CheckoutState;
use crate::domain::steps::{Step, can_advance};
use std::time::Duration;

/// How long the locally simulated (non-gateway) payment path takes.
pub const SIMULATED_PAYMENT_DELAY: Duration = Duration::from_secs(2);

/// Result of an `advance` request.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AdvanceOutcome {
    /// Moved forward one step.
    Moved(Step),
    /// The step gate refused, or an attempt is already in flight. No-op.
    Blocked,
    /// A payment attempt ran; inspect the state for its outcome.
    PaymentAttempted,
}

/// Top-level sequencing for one checkout session.
///
/// Owns the state and maps "advance" / "go back" requests onto either a
/// synchronous step transition or a payment attempt. Every operation takes
/// `&mut self`, so nothing can interleave with an in-flight attempt.
pub struct CheckoutFlow {
    state: CheckoutState,
    orchestrator: PaymentOrchestrator,
    customer: CustomerInfo,
    simulated_delay: Duration,
}

impl CheckoutFlow {
    pub fn new(
        state: CheckoutState,
        gateway: PaymentGatewayBox,
        order_ids: OrderIdGeneratorBox,
        customer: CustomerInfo,
    ) -> Self {
        Self {
            state,
            orchestrator: PaymentOrchestrator::new(gateway, order_ids),
            customer,
            simulated_delay: SIMULATED_PAYMENT_DELAY,
        }
    }

    /// Overrides the simulated-payment delay. Tests use zero.
    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = delay;
        self
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The presentation layer mutates cart, selections and tip through this.
    pub fn state_mut(&mut self) -> &mut CheckoutState {
        &mut self.state
    }

    /// Attempts to leave the current step.
    ///
    /// Blocked while an attempt is processing or while the step gate refuses.
    /// At review, dispatches on the selected method: a gateway-redirect
    /// method goes through the orchestrator, every other kind through the
    /// simulated-success path. Payment failures are recorded in the state,
    /// never returned as errors.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        if self.state.is_processing() || !can_advance(&self.state) {
            return AdvanceOutcome::Blocked;
        }

        if self.state.current_step() == Step::Review {
            // The review gate guarantees a selected method.
            let gateway_redirect = self
                .state
                .selected_payment_method()
                .is_some_and(|method| method.kind == PaymentMethodKind::GatewayRedirect);
            if gateway_redirect {
                self.orchestrator
                    .process_payment(&mut self.state, &self.customer)
                    .await;
            } else {
                self.simulate_payment().await;
            }
            return AdvanceOutcome::PaymentAttempted;
        }

        match self.state.current_step().next() {
            Some(next) => {
                self.state.set_step(next);
                AdvanceOutcome::Moved(next)
            }
            None => AdvanceOutcome::Blocked,
        }
    }

    /// Steps back toward the cart. No-op at the cart step. A failed payment
    /// result is cleared first so a retry starts clean.
    pub fn go_back(&mut self) {
        let Some(previous) = self.state.current_step().previous() else {
            return;
        };
        if self
            .state
            .last_payment_result()
            .is_some_and(|result| !result.success)
        {
            self.state.clear_payment_result();
        }
        self.state.set_step(previous);
    }

    /// Direct simulated-success path for non-gateway methods: fixed delay,
    /// fresh order id, straight to confirmation. Only the gateway path
    /// records a `PaymentResult`.
    async fn simulate_payment(&mut self) {
        self.state.set_processing(true);
        tokio::time::sleep(self.simulated_delay).await;
        self.state
            .set_order_id(self.orchestrator.order_ids().next_order_id());
        self.state.set_processing(false);
        self.state.set_step(Step::Confirmation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::{CartLine, Price};
    use crate::domain::catalog::{Address, AddressKind, PaymentMethod};
    use crate::domain::payment::PaymentResult;
    use crate::infrastructure::sandbox::{FixedOrderIds, SandboxGateway};
    use rust_decimal_macros::dec;

    fn flow_with(gateway: SandboxGateway) -> CheckoutFlow {
        let state = CheckoutState::new(vec![CartLine::new(
            "pizza",
            "Margherita Pizza",
            Price::new(dec!(18.99)).unwrap(),
            2,
        )]);
        CheckoutFlow::new(
            state,
            Box::new(gateway),
            Box::new(FixedOrderIds::new("FE000001")),
            CustomerInfo::default(),
        )
        .with_simulated_delay(Duration::ZERO)
    }

    fn select_all(flow: &mut CheckoutFlow, kind: PaymentMethodKind) {
        flow.state_mut().select_address(Address {
            id: "1".to_string(),
            kind: AddressKind::Home,
            street: "123 Main Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            is_default: true,
        });
        flow.state_mut()
            .select_payment_method(PaymentMethod::new("1", kind));
    }

    #[tokio::test]
    async fn test_advance_blocked_without_selection() {
        let mut flow = flow_with(SandboxGateway::approving());
        assert_eq!(flow.advance().await, AdvanceOutcome::Moved(Step::Address));
        // No address selected yet.
        assert_eq!(flow.advance().await, AdvanceOutcome::Blocked);
        assert_eq!(flow.state().current_step(), Step::Address);
    }

    #[tokio::test]
    async fn test_walk_to_review_then_simulated_payment() {
        let mut flow = flow_with(SandboxGateway::approving());
        select_all(&mut flow, PaymentMethodKind::Card);

        assert_eq!(flow.advance().await, AdvanceOutcome::Moved(Step::Address));
        assert_eq!(flow.advance().await, AdvanceOutcome::Moved(Step::Payment));
        assert_eq!(flow.advance().await, AdvanceOutcome::Moved(Step::Review));
        assert_eq!(flow.advance().await, AdvanceOutcome::PaymentAttempted);

        let state = flow.state();
        assert_eq!(state.current_step(), Step::Confirmation);
        assert_eq!(state.order_id(), Some("FE000001"));
        assert!(!state.is_processing());
        // The simulated path records no payment result.
        assert!(state.last_payment_result().is_none());
    }

    #[tokio::test]
    async fn test_review_dispatches_gateway_redirect() {
        let mut flow = flow_with(SandboxGateway::approving());
        select_all(&mut flow, PaymentMethodKind::GatewayRedirect);
        flow.state_mut().set_step(Step::Review);

        assert_eq!(flow.advance().await, AdvanceOutcome::PaymentAttempted);
        let state = flow.state();
        assert_eq!(state.current_step(), Step::Confirmation);
        assert!(state.last_payment_result().unwrap().success);
    }

    #[tokio::test]
    async fn test_failed_gateway_attempt_stays_on_review() {
        let mut flow = flow_with(SandboxGateway::cancelling());
        select_all(&mut flow, PaymentMethodKind::GatewayRedirect);
        flow.state_mut().set_step(Step::Review);

        assert_eq!(flow.advance().await, AdvanceOutcome::PaymentAttempted);
        let state = flow.state();
        assert_eq!(state.current_step(), Step::Review);
        assert!(!state.last_payment_result().unwrap().success);
        assert!(!state.is_processing());
    }

    #[tokio::test]
    async fn test_go_back_noop_at_cart() {
        let mut flow = flow_with(SandboxGateway::approving());
        flow.go_back();
        assert_eq!(flow.state().current_step(), Step::Cart);
    }

    #[tokio::test]
    async fn test_go_back_clears_failed_result() {
        let mut flow = flow_with(SandboxGateway::approving());
        flow.state_mut().set_step(Step::Review);
        flow.state_mut()
            .set_payment_result(PaymentResult::failed("verification failed"));

        flow.go_back();
        assert_eq!(flow.state().current_step(), Step::Payment);
        assert!(flow.state().last_payment_result().is_none());
    }

    #[tokio::test]
    async fn test_go_back_keeps_success_result() {
        let mut flow = flow_with(SandboxGateway::approving());
        flow.state_mut().set_step(Step::Review);
        flow.state_mut()
            .set_payment_result(PaymentResult::succeeded("pay_1", "order_1"));

        flow.go_back();
        assert!(flow.state().last_payment_result().is_some());
    }

    #[tokio::test]
    async fn test_advance_blocked_while_processing() {
        let mut flow = flow_with(SandboxGateway::approving());
        select_all(&mut flow, PaymentMethodKind::Card);
        flow.state_mut().set_step(Step::Review);
        flow.state_mut().set_processing(true);

        assert_eq!(flow.advance().await, AdvanceOutcome::Blocked);
    }

    #[tokio::test]
    async fn test_confirmation_is_terminal_for_advance() {
        let mut flow = flow_with(SandboxGateway::approving());
        select_all(&mut flow, PaymentMethodKind::Card);
        flow.state_mut().set_step(Step::Confirmation);

        assert_eq!(flow.advance().await, AdvanceOutcome::Blocked);
        assert_eq!(flow.state().current_step(), Step::Confirmation);
    }
}
