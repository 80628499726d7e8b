//! Checkout command.

use mangaba_client::AppState;
use mangaba_client::checkout::{CheckoutRequest, PaymentSelection};
use mangaba_client::services::CardDetails;
use mangaba_core::{AddressId, PaymentMethodKind, format_amount};

use super::CliError;

/// Card fields from the command line; all four are required for card
/// payments.
pub struct CardArgs {
    pub number: Option<String>,
    pub holder: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
}

impl CardArgs {
    fn into_details(self) -> Result<CardDetails, CliError> {
        match (self.number, self.holder, self.expiry, self.cvv) {
            (Some(number), Some(holder), Some(expiry), Some(cvv)) => Ok(CardDetails {
                holder_name: holder,
                number: number.into(),
                expiry,
                cvv: cvv.into(),
            }),
            _ => Err(CliError::InvalidArgument(
                "card payments need --card-number, --card-holder, --card-expiry, and --card-cvv"
                    .to_owned(),
            )),
        }
    }
}

pub async fn run(
    state: &AppState,
    method: &str,
    address: &str,
    card: CardArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    super::require_user(state)?;

    let kind: PaymentMethodKind = method
        .parse()
        .map_err(CliError::InvalidArgument)?;
    let payment = match kind {
        PaymentMethodKind::Card => PaymentSelection::Card(card.into_details()?),
        PaymentMethodKind::Instant => PaymentSelection::Instant,
    };

    // Checkout snapshots the published lines; make sure they are current.
    state.cart().fetch().await?;

    let order = state
        .checkout()
        .checkout(CheckoutRequest {
            payment,
            address: Some(AddressId::new(address)),
        })
        .await?;

    println!(
        "Order {} placed: {} ({} items, {})",
        order.id,
        format_amount(order.total),
        order.items.len(),
        order.payment_method
    );
    Ok(())
}
