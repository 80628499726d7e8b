//! Address book commands, with postal-code autofill.

use clap::Args;

use mangaba_client::AppState;
use mangaba_client::models::NewAddress;
use mangaba_core::{AddressId, PostalCode};

use super::CliError;

pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let user = super::require_user(state)?;
    let addresses = state.backend().addresses(&user.id).await?;

    if addresses.is_empty() {
        println!("No addresses yet");
        return Ok(());
    }

    for address in addresses {
        let marker = if address.primary { "*" } else { " " };
        println!(
            "{marker} {}  {}, {} - {}, {} {} ({})",
            address.id,
            address.street,
            address.number,
            address.neighborhood,
            address.city,
            address.region,
            address.postal_code
        );
    }
    Ok(())
}

/// New-address arguments. Street, neighborhood, city, and region come from
/// the postal lookup unless overridden.
#[derive(Args)]
pub struct AddArgs {
    /// Postal code
    #[arg(long)]
    pub postal_code: String,

    /// Street number
    #[arg(long)]
    pub number: String,

    /// Apartment, unit, etc.
    #[arg(long)]
    pub complement: Option<String>,

    /// Street name, overriding the postal lookup
    #[arg(long)]
    pub street: Option<String>,

    /// Neighborhood, overriding the postal lookup
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// City, overriding the postal lookup
    #[arg(long)]
    pub city: Option<String>,

    /// Region/state code, overriding the postal lookup
    #[arg(long)]
    pub region: Option<String>,

    /// Mark as the primary address
    #[arg(long)]
    pub primary: bool,
}

pub async fn add(state: &AppState, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let user = super::require_user(state)?;

    let postal_code = PostalCode::parse(&args.postal_code)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let resolved = state.postal().lookup(&postal_code).await?;

    let address = NewAddress {
        postal_code,
        street: args.street.unwrap_or(resolved.street),
        number: args.number,
        complement: args.complement,
        neighborhood: args.neighborhood.unwrap_or(resolved.neighborhood),
        city: args.city.unwrap_or(resolved.city),
        region: args.region.unwrap_or(resolved.region),
        primary: args.primary,
    };

    let created = state.backend().create_address(&user.id, &address).await?;
    println!("Address {} saved", created.id);
    Ok(())
}

pub async fn remove(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    super::require_user(state)?;
    state.backend().delete_address(&AddressId::new(id)).await?;
    println!("Address {id} deleted");
    Ok(())
}

pub async fn lookup(state: &AppState, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let postal_code =
        PostalCode::parse(code).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let address = state.postal().lookup(&postal_code).await?;

    println!(
        "{}: {}, {} - {}, {}",
        address.postal_code, address.street, address.neighborhood, address.city, address.region
    );
    Ok(())
}
