use checkout::application::controller::{AdvanceOutcome, CheckoutFlow};
use checkout::domain::cart::CartLine;
use checkout::domain::catalog::{
    Address, AddressKind, CustomerInfo, PaymentMethod, PaymentMethodKind,
};
use checkout::domain::state::CheckoutState;
use checkout::infrastructure::sandbox::{SandboxGateway, TimestampOrderIds};
use checkout::interfaces::csv::cart_reader::CartReader;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Card,
    Paypal,
    ApplePay,
    GooglePay,
    GatewayRedirect,
}

impl From<MethodArg> for PaymentMethodKind {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Card => Self::Card,
            MethodArg::Paypal => Self::Paypal,
            MethodArg::ApplePay => Self::ApplePay,
            MethodArg::GooglePay => Self::GooglePay,
            MethodArg::GatewayRedirect => Self::GatewayRedirect,
        }
    }
}

/// Drives a full checkout session against the sandbox gateway and prints
/// the final state as JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input cart CSV file (id,name,restaurant,price,quantity)
    cart: PathBuf,

    /// Tip amount added at review
    #[arg(long, default_value = "0")]
    tip: Decimal,

    /// Payment method to select
    #[arg(long, value_enum, default_value = "gateway-redirect")]
    method: MethodArg,

    /// Script the shopper dismissing the hosted payment UI
    #[arg(long)]
    cancel: bool,

    /// Make gateway order creation fail
    #[arg(long)]
    fail_create: bool,

    /// Make payment verification answer false
    #[arg(long)]
    reject_verify: bool,
}

fn address_catalog() -> Vec<Address> {
    vec![
        Address {
            id: "1".to_string(),
            kind: AddressKind::Home,
            street: "123 Main Street, Apt 4B".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            is_default: true,
        },
        Address {
            id: "2".to_string(),
            kind: AddressKind::Work,
            street: "456 Business Ave, Floor 10".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10002".to_string(),
            is_default: false,
        },
    ]
}

fn method_catalog() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: "1".to_string(),
            kind: PaymentMethodKind::GatewayRedirect,
            card_number: None,
            card_holder: None,
            expiry_date: None,
            is_default: true,
        },
        PaymentMethod {
            id: "2".to_string(),
            kind: PaymentMethodKind::Card,
            card_number: Some("**** **** **** 4242".to_string()),
            card_holder: Some("John Doe".to_string()),
            expiry_date: Some("12/26".to_string()),
            is_default: false,
        },
        PaymentMethod::new("3", PaymentMethodKind::Paypal),
        PaymentMethod::new("4", PaymentMethodKind::ApplePay),
        PaymentMethod::new("5", PaymentMethodKind::GooglePay),
    ]
}

fn sandbox(cli: &Cli) -> SandboxGateway {
    if cli.fail_create {
        SandboxGateway::failing_order_creation()
    } else if cli.cancel {
        SandboxGateway::cancelling()
    } else if cli.reject_verify {
        SandboxGateway::rejecting_verification()
    } else {
        SandboxGateway::approving()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(&cli.cart).into_diagnostic()?;
    let mut lines: Vec<CartLine> = Vec::new();
    for line in CartReader::new(file).lines() {
        match line {
            Ok(line) => lines.push(line),
            Err(e) => eprintln!("Error reading cart line: {e}"),
        }
    }

    let wanted: PaymentMethodKind = cli.method.into();
    let address = address_catalog()
        .into_iter()
        .find(|a| a.is_default)
        .ok_or_else(|| miette!("address catalog has no default entry"))?;
    let method = method_catalog()
        .into_iter()
        .find(|m| m.kind == wanted)
        .ok_or_else(|| miette!("no payment method of the requested kind"))?;

    let mut flow = CheckoutFlow::new(
        CheckoutState::new(lines),
        Box::new(sandbox(&cli).with_latency(Duration::from_millis(500), Duration::from_secs(1))),
        Box::new(TimestampOrderIds),
        CustomerInfo::default(),
    );
    flow.state_mut().select_address(address);
    flow.state_mut().select_payment_method(method);
    flow.state_mut().set_tip(cli.tip);

    // Cart → address → payment → review, then the payment attempt.
    loop {
        match flow.advance().await {
            AdvanceOutcome::Moved(_) => {}
            AdvanceOutcome::Blocked => {
                return Err(miette!("cannot proceed past the {:?} step", flow.state().current_step()));
            }
            AdvanceOutcome::PaymentAttempted => break,
        }
    }

    let report = serde_json::json!({
        "state": flow.state(),
        "order": flow.state().completed_order("30-45 min"),
    });
    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);

    Ok(())
}
