//! Checkout walk-through against a running workshop backend
//!
//! Builds an order for a client's vehicle, submits it, then takes a cash
//! payment once the order is finished.
//!
//! Run: cargo run --example checkout -- [--json] <client_id> <vehicle_id> <service_id>...
//!      cargo run --example checkout -- [--json] --pay <order_id> <tendered>
//!
//! Connection settings come from WORKSHOP_API_URL / WORKSHOP_API_TOKEN (or `.env`).
//! `--json` switches log output to JSON lines.

use anyhow::{Context, bail};
use rust_decimal::Decimal;
use shared::models::PaymentMethod;
use std::str::FromStr;
use std::sync::Arc;
use workshop_client::{ClientConfig, WorkshopApi};
use workshop_orders::{ConfirmationDesk, OrderSession, PaymentAllocator, PaymentConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (flags, args): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|a| a == "--json");
    if flags.is_empty() {
        workshop_orders::init_logger(Some("info"));
    } else {
        workshop_orders::init_json_logger(Some("info"));
    }
    let config = ClientConfig::from_env();
    println!("\n🔧 Workshop checkout ({})", config.base_url);

    let api = Arc::new(WorkshopApi::connect(&config).context("building HTTP client")?);

    if let Some(pos) = args.iter().position(|a| a == "--pay") {
        let order_id: i64 = args
            .get(pos + 1)
            .context("--pay needs an order id")?
            .parse()?;
        let tendered = Decimal::from_str(args.get(pos + 2).context("--pay needs a tendered amount")?)?;
        return pay_cash(api, order_id, tendered).await;
    }

    if args.len() < 3 {
        bail!("usage: checkout <client_id> <vehicle_id> <service_id>...");
    }
    let client_id: i64 = args[0].parse()?;
    let vehicle_id: i64 = args[1].parse()?;

    let mut session = OrderSession::start(api.clone(), api.clone()).await?;
    session.select_client(client_id).await?;

    println!("Vehicles:");
    for v in session.draft().eligible_vehicles() {
        println!("  #{} {} {} ({})", v.id, v.make, v.model, v.plate);
    }
    session.draft_mut().select_vehicle(vehicle_id)?;

    for raw in &args[2..] {
        let service_id: i64 = raw.parse()?;
        match session.draft_mut().add_service(service_id) {
            Ok(_) => {}
            Err(e) if e.is_local() => println!("  ⚠️  {}", e),
            Err(e) => return Err(e.into()),
        }
    }

    for item in session.draft().line_items() {
        println!(
            "  {} x{} @ {} = {}",
            item.name,
            item.quantity,
            item.applied_unit_price,
            item.line_total()
        );
    }
    println!("Total: {}", session.draft().computed_total());

    let order = session.submit().await?;
    println!("✅ Order #{} created", order.id);
    Ok(())
}

async fn pay_cash<C>(api: Arc<WorkshopApi<C>>, order_id: i64, tendered: Decimal) -> anyhow::Result<()>
where
    C: workshop_client::HttpClient + 'static,
{
    let allocator = PaymentAllocator::new(
        api,
        Arc::new(ConfirmationDesk::new()),
        PaymentConfig::from_env(),
    );

    let mut attempt = allocator.open(order_id, PaymentMethod::Cash, None).await?;
    println!("Outstanding: {}", attempt.outstanding_balance());

    let change = attempt.set_tendered_amount(tendered)?;
    println!("Change: {}", change);

    let recorded = allocator.submit(&mut attempt).await?;
    println!(
        "✅ Payment #{} recorded, remaining {}",
        recorded.payment.id, recorded.balance.outstanding
    );
    Ok(())
}
