use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Home,
    Work,
    Other,
}

/// A delivery address from the externally supplied catalog.
///
/// Immutable once selected: `CheckoutState` only ever holds a clone of a
/// catalog entry, never a locally edited one.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Address {
    pub id: String,
    pub kind: AddressKind,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub is_default: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Card,
    Paypal,
    ApplePay,
    GooglePay,
    /// Authorization delegated to the external gateway's hosted UI.
    GatewayRedirect,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentMethod {
    pub id: String,
    pub kind: PaymentMethodKind,
    /// Masked number, e.g. `**** **** **** 4242`. Only present for cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub is_default: bool,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>, kind: PaymentMethodKind) -> Self {
        Self {
            id: id.into(),
            kind,
            card_number: None,
            card_holder: None,
            expiry_date: None,
            is_default: false,
        }
    }
}

/// Contact details prefilled into the gateway's hosted UI.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            name: "Customer".to_string(),
            email: "customer@example.com".to_string(),
            contact: "+919999999999".to_string(),
        }
    }
}
