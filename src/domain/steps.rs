use crate::domain::state::CheckoutState;
use serde::{Deserialize, Serialize};

/// The five ordered stages of the checkout flow.
///
/// `Confirmation` is terminal for a given order attempt; re-entering the
/// flow requires a fresh [`CheckoutState`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Cart,
    Address,
    Payment,
    Review,
    Confirmation,
}

impl Step {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Cart),
            1 => Some(Self::Address),
            2 => Some(Self::Payment),
            3 => Some(Self::Review),
            4 => Some(Self::Confirmation),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Cart => None,
            _ => Self::from_index(self.index() - 1),
        }
    }
}

/// Whether the flow may leave the state's current step.
///
/// Pure predicate over the state; the flow controller consults it before
/// every forward transition.
pub fn can_advance(state: &CheckoutState) -> bool {
    match state.current_step() {
        Step::Cart => state.cart().iter().any(|line| line.quantity > 0),
        Step::Address => state.selected_address().is_some(),
        Step::Payment => state.selected_payment_method().is_some(),
        Step::Review => {
            state.selected_address().is_some() && state.selected_payment_method().is_some()
        }
        Step::Confirmation => false,
    }
}
