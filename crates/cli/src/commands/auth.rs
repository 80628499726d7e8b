//! Session commands: login, logout, registration, whoami.

use chrono::NaiveDate;
use clap::Args;

use mangaba_client::AppState;
use mangaba_client::models::{NewAddress, RegisterProfile};
use mangaba_core::{Email, PostalCode};

use super::CliError;

pub async fn login(
    state: &AppState,
    email: &str,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let session = state.session().login(&email, &password.into()).await?;

    println!("Signed in as {} <{}>", session.name, session.email);
    Ok(())
}

pub async fn logout(state: &AppState) {
    state.session().logout().await;
    println!("Signed out");
}

pub fn whoami(state: &AppState) {
    match state.session().session() {
        Some(session) => println!("{} <{}> ({})", session.name, session.email, session.id),
        None => println!("Not signed in"),
    }
}

/// Registration arguments: profile fields plus the first delivery address.
///
/// Street, neighborhood, city, and region are filled from the postal code
/// unless overridden.
#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,

    /// Tax ID (CPF)
    #[arg(long)]
    pub tax_id: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Postal code of the first address
    #[arg(long)]
    pub postal_code: String,

    /// Street number of the first address
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
}

pub async fn register(
    state: &AppState,
    args: RegisterArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(&args.email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let birth_date = args
        .birth_date
        .as_deref()
        .map(str::parse::<NaiveDate>)
        .transpose()
        .map_err(|e| CliError::InvalidArgument(format!("invalid birth date: {e}")))?;

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
        primary: true,
    };

    let profile = RegisterProfile {
        name: args.name,
        email,
        password: args.password.into(),
        tax_id: args.tax_id,
        phone: args.phone,
        birth_date,
    };

    let session = state.session().register(&profile, &address).await?;
    println!("Account created; signed in as {} ({})", session.name, session.id);
    Ok(())
}

/// Profile fields to change; anything omitted keeps its current value.
#[derive(Args)]
pub struct UpdateArgs {
    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// New tax ID (CPF)
    #[arg(long)]
    pub tax_id: Option<String>,

    /// New birth date, YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,
}

pub async fn update(state: &AppState, args: UpdateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = super::require_user(state)?;

    if let Some(name) = args.name {
        session.name = name;
    }
    if let Some(phone) = args.phone {
        session.phone = Some(phone);
    }
    if let Some(tax_id) = args.tax_id {
        session.tax_id = Some(tax_id);
    }
    if let Some(raw) = args.birth_date {
        let parsed = raw
            .parse::<NaiveDate>()
            .map_err(|e| CliError::InvalidArgument(format!("invalid birth date: {e}")))?;
        session.birth_date = Some(parsed);
    }

    // The server's record is authoritative; republish what it returns.
    let updated = state.backend().update_user(&session).await?;
    state.session().apply_profile(updated.clone()).await;

    println!("Profile updated for {}", updated.name);
    Ok(())
}
