//! Favorites commands.

use mangaba_client::AppState;
use mangaba_core::{ProductId, format_amount};

pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let user = super::require_user(state)?;
    let products = state.backend().favorite_products(&user.id).await?;

    if products.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }

    for product in products {
        println!(
            "{}  {}  {}",
            product.id,
            format_amount(product.price),
            product.name
        );
    }
    Ok(())
}

pub async fn toggle(state: &AppState, product: &str) -> Result<(), Box<dyn std::error::Error>> {
    let user = super::require_user(state)?;
    let product = ProductId::new(product);

    let favorited = state.backend().toggle_favorite(&user.id, &product).await?;
    if favorited {
        println!("Added {product} to favorites");
    } else {
        println!("Removed {product} from favorites");
    }
    Ok(())
}
