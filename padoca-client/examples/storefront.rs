//! Storefront walkthrough example
//!
//! Browses the catalog, fills a cart, and prints derived pricing.
//! Set PADOCA_SUBMIT=1 to also place the order and follow its status.
//!
//! Run: cargo run --example storefront -- http://localhost:5000/api

use padoca_client::{
    CartStorage, CartStore, CheckoutForm, CheckoutOutcome, ClientConfig, OrderTracker,
    PaymentMethod, ProductQuery, load_storefront, submit_order,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:5000/api".to_string());

    let client = ClientConfig::new(&base_url).build_http_client()?;

    // Catalog + merchant settings, like the storefront home page
    let storefront = load_storefront(&client, &ProductQuery::available()).await?;
    if !storefront.is_open() {
        println!("{}", storefront.closed_message());
        return Ok(());
    }

    println!("{}", storefront.settings.establishment_name);
    for product in &storefront.products {
        println!(
            "  [{}] {} — R$ {:.2}",
            product.category.label(),
            product.name,
            product.price
        );
    }

    if storefront.products.is_empty() {
        println!("No products available.");
        return Ok(());
    }

    // Durable cart with the fee snapshot installed once at startup
    let dir = std::env::temp_dir().join("padoca-example");
    let mut cart = CartStore::open(CartStorage::new(&dir));
    cart.set_fee_config(storefront.settings.convenience_fee);

    for product in storefront.products.iter().take(2).cloned() {
        cart.add_item(product, 1)?;
    }

    let totals = cart.totals();
    println!("\nSubtotal: R$ {:.2}", totals.subtotal);
    if totals.convenience_fee.value > 0.0 {
        println!(
            "Convenience fee ({}%): R$ {:.2}",
            totals.convenience_fee.percent, totals.convenience_fee.value
        );
    }
    println!("Total: R$ {:.2} ({} items)", totals.total, totals.item_count);

    if std::env::var("PADOCA_SUBMIT").as_deref() != Ok("1") {
        println!("\nSet PADOCA_SUBMIT=1 to place this order.");
        return Ok(());
    }

    let form = CheckoutForm::new("Cliente Exemplo", "11999990000")
        .with_payment_method(PaymentMethod::Retirada)
        .with_notes("pedido de demonstração");

    let outcome = submit_order(&client, &mut cart, &form).await?;
    let order = outcome.order().clone();
    println!("\nOrder #{} created, total R$ {:.2}", order.number, order.total);

    if let CheckoutOutcome::PixConfirmation { order } = &outcome {
        println!("Pay the PIX key and confirm: order id {}", order.id);
    }

    // Follow the order for a few ticks
    let tracker = OrderTracker::spawn(client, order.number.clone(), Duration::from_secs(5));
    let mut rx = tracker.subscribe();
    for _ in 0..3 {
        if rx.changed().await.is_err() {
            break;
        }
        let state = rx.borrow_and_update().clone();
        if let Some(order) = &state.order {
            println!("Status: {}", order.status.label());
            if order.status.is_terminal() {
                break;
            }
        }
    }
    tracker.stop();

    Ok(())
}
