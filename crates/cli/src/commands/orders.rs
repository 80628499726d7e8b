//! Order history command.

use mangaba_client::AppState;
use mangaba_client::api::OrderApi;
use mangaba_core::format_amount;

pub async fn history(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let user = super::require_user(state)?;
    let orders = state.backend().orders_for_customer(&user.id).await?;

    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    for order in orders {
        println!(
            "{}  {}  {}  {}  {} items",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            order.status,
            format_amount(order.total),
            order.items.len()
        );
    }
    Ok(())
}
