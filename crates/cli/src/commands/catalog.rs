//! Catalog browsing commands.

use mangaba_client::AppState;
use mangaba_core::{ShopId, format_amount};

pub async fn products(
    state: &AppState,
    search: Option<&str>,
    shop: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shop = shop.map(ShopId::new);
    let products = state.backend().products(search, shop.as_ref()).await?;

    if products.is_empty() {
        println!("No products found");
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

pub async fn shop(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let shop_id = ShopId::new(id);
    let shop = state.backend().shop(&shop_id).await?;

    println!("{} ({})", shop.name, shop.id);
    if let Some(description) = &shop.description {
        println!("{description}");
    }

    println!();
    let products = state.backend().products(None, Some(&shop_id)).await?;
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
