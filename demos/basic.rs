//! Basic example demonstrating the pretix API client.
//!
//! Run with:
//! ```
//! PRETIX_API_TOKEN=your-token PRETIX_ORGANIZER=your-org cargo run --example basic
//! ```

use pretixapi::{Entity, ListOptions, PretixClient, ToPlain};

#[tokio::main]
async fn main() -> pretixapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating pretix client...");
    let client = PretixClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List every event of the organizer
    println!("\n--- Listing Events (all pages) ---");
    let events = client.get_events(&ListOptions::all_pages()).await?;
    println!("Found {} events", events.len());

    for event in &events {
        let name = event
            .name()?
            .and_then(|n| n.best(Some("en")).map(str::to_string))
            .unwrap_or_default();
        println!("  - {} ({})", name, event.slug()?.unwrap_or("?"));
    }

    let Some(event) = events.first() else {
        return Ok(());
    };

    // Quotas with their availability attached
    println!("\n--- Quotas ---");
    let mut quotas = client.get_quotas(event, &ListOptions::default()).await?;
    for quota in quotas.iter_mut() {
        let availability = client.get_quota_availability(event, &*quota).await?;
        quota.set_availability(availability);
    }
    for quota in &quotas {
        let available = quota
            .availability()
            .and_then(|a| a.available_number().ok().flatten());
        println!(
            "  - {} (size {:?}, available {:?})",
            quota.name()?.unwrap_or("?"),
            quota.size()?,
            available
        );
    }

    // Orders, each linked back to its event
    println!("\n--- Orders (first page) ---");
    let orders = client.get_orders(event, &ListOptions::default()).await?;
    for order in orders.into_iter().take(5) {
        let mut order = order;
        order.set_event(event.clone());
        let positions = order.positions().map(|p| p.len()).unwrap_or(0);
        println!(
            "  - {} {} ({} positions) {}",
            order.code()?.unwrap_or("?"),
            order.total()?.unwrap_or("?"),
            positions,
            order.control_url()?.unwrap_or_default()
        );
    }

    // Raw field access by accessor name
    println!("\n--- Event Fields ---");
    println!("  hasSubevents: {}", event.call("hasSubevents", None)?);
    println!("  plain: {}", event.to_plain());

    println!("\nDone!");
    Ok(())
}
