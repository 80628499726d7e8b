//! Cart commands.

use mangaba_client::AppState;
use mangaba_client::models::CartLine;
use mangaba_core::{ProductId, format_amount};

use super::CliError;

pub async fn show(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    super::require_user(state)?;
    let lines = state.cart().fetch().await?;

    if lines.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    for line in &lines {
        println!(
            "{}  {} x{}  {}  {}",
            line.id,
            format_amount(line.unit_price),
            line.quantity,
            format_amount(line.subtotal()),
            line.name
        );
    }
    println!("Total: {}", format_amount(state.cart().total()));
    Ok(())
}

pub async fn add(
    state: &AppState,
    product: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    super::require_user(state)?;

    // The cart needs the product's name and price; fetch it from the catalog.
    let product_id = ProductId::new(product);
    let products = state.backend().products(None, None).await?;
    let product = products
        .into_iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| CliError::InvalidArgument(format!("unknown product: {product_id}")))?;

    state.cart().add(&product, quantity).await?;
    println!("Added {} x{quantity}", product.name);
    Ok(())
}

pub async fn set_quantity(
    state: &AppState,
    line: &str,
    quantity: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    super::require_user(state)?;
    let line = find_line(state, line).await?;

    state.cart().set_quantity(&line, quantity).await?;
    if quantity <= 0 {
        println!("Removed {}", line.name);
    } else {
        println!("Set {} to x{quantity}", line.name);
    }
    Ok(())
}

pub async fn remove(state: &AppState, line: &str) -> Result<(), Box<dyn std::error::Error>> {
    super::require_user(state)?;
    let line = find_line(state, line).await?;

    state.cart().remove(&line).await?;
    println!("Removed {}", line.name);
    Ok(())
}

async fn find_line(state: &AppState, id: &str) -> Result<CartLine, Box<dyn std::error::Error>> {
    let lines = state.cart().fetch().await?;
    let line = lines
        .into_iter()
        .find(|l| l.id.as_str() == id)
        .ok_or_else(|| CliError::InvalidArgument(format!("unknown cart line: {id}")))?;
    Ok(line)
}
