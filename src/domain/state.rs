use crate::domain::cart::CartLine;
use crate::domain::catalog::{Address, PaymentMethod};
use crate::domain::payment::{Order, OrderStatus, PaymentResult};
use crate::domain::steps::Step;
use crate::domain::summary::{DELIVERY_FEE, OrderSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The single source of truth for one checkout session.
///
/// All mutation goes through the named transition operations below. Each is
/// synchronous and total: it either applies the change (recomputing the
/// summary when the cart or tip moved) or leaves the state untouched.
/// Callers sequence the transitions; none of them validates step ordering.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CheckoutState {
    cart: Vec<CartLine>,
    selected_address: Option<Address>,
    selected_payment_method: Option<PaymentMethod>,
    summary: OrderSummary,
    current_step: Step,
    is_processing: bool,
    /// Locally generated order id, assigned only on confirmed success.
    order_id: Option<String>,
    /// The gateway's order id for the in-flight or completed attempt.
    gateway_order_id: Option<String>,
    last_payment_result: Option<PaymentResult>,
}

impl CheckoutState {
    /// Starts a session with the externally supplied cart.
    pub fn new(lines: Vec<CartLine>) -> Self {
        let mut state = Self {
            cart: Vec::new(),
            selected_address: None,
            selected_payment_method: None,
            summary: OrderSummary::initial(DELIVERY_FEE),
            current_step: Step::Cart,
            is_processing: false,
            order_id: None,
            gateway_order_id: None,
            last_payment_result: None,
        };
        state.set_cart(lines);
        state
    }

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn selected_address(&self) -> Option<&Address> {
        self.selected_address.as_ref()
    }

    pub fn selected_payment_method(&self) -> Option<&PaymentMethod> {
        self.selected_payment_method.as_ref()
    }

    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn gateway_order_id(&self) -> Option<&str> {
        self.gateway_order_id.as_deref()
    }

    pub fn last_payment_result(&self) -> Option<&PaymentResult> {
        self.last_payment_result.as_ref()
    }

    /// Replaces the cart wholesale. Lines already at quantity 0 are dropped
    /// rather than stored.
    pub fn set_cart(&mut self, lines: Vec<CartLine>) {
        self.cart = lines.into_iter().filter(|line| line.quantity > 0).collect();
        self.recompute_summary();
    }

    /// Updates a line's quantity; quantity 0 removes the line. No-op when
    /// the id is not in the cart.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        let Some(line) = self.cart.iter_mut().find(|line| line.id == id) else {
            return;
        };
        line.quantity = quantity;
        self.recompute_summary();
    }

    /// Deletes the line if present.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.cart.len();
        self.cart.retain(|line| line.id != id);
        if self.cart.len() != before {
            self.recompute_summary();
        }
    }

    pub fn select_address(&mut self, address: Address) {
        self.selected_address = Some(address);
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.selected_payment_method = Some(method);
    }

    /// Sets the tip, clamped to zero. The tip never affects tax.
    pub fn set_tip(&mut self, amount: Decimal) {
        let tip = amount.max(Decimal::ZERO);
        self.summary = OrderSummary::recompute(&self.cart, self.summary.delivery_fee, tip);
    }

    pub fn set_step(&mut self, step: Step) {
        self.current_step = step;
    }

    pub fn set_processing(&mut self, processing: bool) {
        self.is_processing = processing;
    }

    pub fn set_order_id(&mut self, id: impl Into<String>) {
        self.order_id = Some(id.into());
    }

    pub fn set_gateway_order_id(&mut self, id: impl Into<String>) {
        self.gateway_order_id = Some(id.into());
    }

    pub fn set_payment_result(&mut self, result: PaymentResult) {
        self.last_payment_result = Some(result);
    }

    pub fn clear_payment_result(&mut self) {
        self.last_payment_result = None;
    }

    /// Returns the session to its initial shape, preserving the cart and its
    /// summary so the same order can be attempted again.
    pub fn reset(&mut self) {
        self.selected_address = None;
        self.selected_payment_method = None;
        self.current_step = Step::Cart;
        self.is_processing = false;
        self.order_id = None;
        self.gateway_order_id = None;
        self.last_payment_result = None;
    }

    /// Assembles the confirmed order record. `None` until the flow reached
    /// confirmation with an assigned order id and both selections present.
    pub fn completed_order(&self, estimated_delivery: impl Into<String>) -> Option<Order> {
        if self.current_step != Step::Confirmation {
            return None;
        }
        let (payment_id, gateway_order_id) = match &self.last_payment_result {
            Some(result) if result.success => {
                (result.payment_id.clone(), result.order_id.clone())
            }
            _ => (None, None),
        };
        Some(Order {
            id: self.order_id.clone()?,
            lines: self.cart.clone(),
            delivery_address: self.selected_address.clone()?,
            payment_method: self.selected_payment_method.clone()?,
            summary: self.summary.clone(),
            estimated_delivery: estimated_delivery.into(),
            status: OrderStatus::Confirmed,
            payment_id,
            gateway_order_id,
        })
    }

    fn recompute_summary(&mut self) {
        self.summary =
            OrderSummary::recompute(&self.cart, self.summary.delivery_fee, self.summary.tip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Price;
    use crate::domain::catalog::{AddressKind, PaymentMethodKind};
    use rust_decimal_macros::dec;

    fn line(id: &str, price: Decimal, quantity: u32) -> CartLine {
        CartLine::new(id, id, Price::new(price).unwrap(), quantity)
    }

    fn reference_state() -> CheckoutState {
        CheckoutState::new(vec![
            line("pizza", dec!(18.99), 2),
            line("salad", dec!(14.50), 1),
        ])
    }

    fn assert_summary_consistent(state: &CheckoutState) {
        let summary = state.summary();
        assert_eq!(
            summary.total,
            summary.subtotal + summary.delivery_fee + summary.tax + summary.tip
        );
        assert_eq!(summary.tax, summary.subtotal * crate::domain::summary::TAX_RATE);
    }

    #[test]
    fn test_new_state_reference_totals() {
        let state = reference_state();
        assert_eq!(state.summary().subtotal, dec!(52.48));
        assert_eq!(state.summary().tax, dec!(4.1984));
        assert_eq!(state.summary().total, dec!(60.6684));
        assert_summary_consistent(&state);
    }

    #[test]
    fn test_set_tip_leaves_tax_alone() {
        let mut state = reference_state();
        state.set_tip(dec!(9.45));
        assert_eq!(state.summary().tax, dec!(4.1984));
        assert_eq!(state.summary().total, dec!(70.1184));
        assert_summary_consistent(&state);
    }

    #[test]
    fn test_set_tip_clamps_negative() {
        let mut state = reference_state();
        state.set_tip(dec!(-5.00));
        assert_eq!(state.summary().tip, Decimal::ZERO);
        assert_eq!(state.summary().total, dec!(60.6684));
    }

    #[test]
    fn test_remove_item_recomputes() {
        let mut state = reference_state();
        state.set_tip(dec!(2.00));
        state.remove_item("pizza");

        assert_eq!(state.summary().subtotal, dec!(14.50));
        assert_eq!(state.summary().tax, dec!(1.16));
        assert_summary_consistent(&state);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut via_quantity = reference_state();
        via_quantity.set_quantity("pizza", 0);

        let mut via_remove = reference_state();
        via_remove.remove_item("pizza");

        assert_eq!(via_quantity, via_remove);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut state = reference_state();
        let before = state.clone();
        state.set_quantity("burger", 3);
        assert_eq!(state, before);
    }

    #[test]
    fn test_set_cart_drops_zero_quantity_lines() {
        let mut state = reference_state();
        state.set_cart(vec![line("pizza", dec!(18.99), 0), line("salad", dec!(14.50), 1)]);
        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.summary().subtotal, dec!(14.50));
    }

    #[test]
    fn test_reset_preserves_cart_and_summary() {
        let mut state = reference_state();
        state.set_tip(dec!(9.45));
        state.select_address(Address {
            id: "1".to_string(),
            kind: AddressKind::Home,
            street: "123 Main Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            is_default: true,
        });
        state.select_payment_method(PaymentMethod::new("1", PaymentMethodKind::Card));
        state.set_step(Step::Review);
        state.set_order_id("FE123456");
        state.set_payment_result(PaymentResult::failed("verification failed"));

        let summary_before = state.summary().clone();
        state.reset();

        assert_eq!(state.summary(), &summary_before);
        assert_eq!(state.cart().len(), 2);
        assert!(state.selected_address().is_none());
        assert!(state.selected_payment_method().is_none());
        assert_eq!(state.current_step(), Step::Cart);
        assert!(!state.is_processing());
        assert!(state.order_id().is_none());
        assert!(state.last_payment_result().is_none());
    }

    #[test]
    fn test_completed_order_requires_confirmation() {
        let mut state = reference_state();
        assert!(state.completed_order("25-35 min").is_none());

        state.select_address(Address {
            id: "1".to_string(),
            kind: AddressKind::Home,
            street: "123 Main Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            is_default: true,
        });
        state.select_payment_method(PaymentMethod::new("1", PaymentMethodKind::Card));
        state.set_order_id("FE123456");
        state.set_step(Step::Confirmation);

        let order = state.completed_order("25-35 min").unwrap();
        assert_eq!(order.id, "FE123456");
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.summary, *state.summary());
    }
}
