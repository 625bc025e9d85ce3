use std::env;
use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roadtest_admin_client::models::ListQuery;
use roadtest_admin_client::pricing::{
    distance_perks, dollars_to_cents, format_price, pickup_price_cents, price_breakdown,
};
use roadtest_admin_client::utils::geo::haversine_distance;
use roadtest_admin_client::{ApiClient, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadtest_admin_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("quote") if args.len() == 3 => {
            let distance_km: f64 = args[1].parse().expect("distance must be a number");
            let base_dollars: f64 = args[2].parse().expect("base price must be a number");
            print_quote(distance_km, base_dollars);
        }
        Some("distance") if args.len() == 5 => {
            let coords: Vec<f64> = args[1..5]
                .iter()
                .map(|a| a.parse().expect("coordinates must be numbers"))
                .collect();
            let km = haversine_distance(coords[0], coords[1], coords[2], coords[3]);
            println!("{:.2} km", km);
        }
        Some("session") => {
            let client = build_client();
            if client.check_session_valid().await {
                let user = client.current_user().expect("valid session caches a user");
                println!("session valid: {} <{}>", user.name, user.email);
            } else {
                println!("session invalid or expired");
                process::exit(1);
            }
        }
        Some("bookings") => {
            let client = build_client();
            let page = client
                .list_bookings(&ListQuery::page(1))
                .await
                .expect("failed to list bookings");
            println!("{} bookings ({} total)", page.items.len(), page.total);
            for booking in page.items {
                println!(
                    "  {}  {:?}  {}  {}",
                    booking.id,
                    booking.status,
                    booking.test_centre,
                    format_price(booking.pricing.total_price)
                );
            }
        }
        _ => {
            eprintln!("usage: roadtest-admin-client <command>");
            eprintln!("  quote <distance_km> <base_price_dollars>");
            eprintln!("  distance <lat1> <lng1> <lat2> <lng2>");
            eprintln!("  session");
            eprintln!("  bookings");
            process::exit(2);
        }
    }
}

fn build_client() -> ApiClient {
    let config = Config::from_env();
    tracing::info!("using API at {}", config.api_base_url);
    ApiClient::new(config).expect("failed to build API client")
}

fn print_quote(distance_km: f64, base_dollars: f64) {
    let pickup = pickup_price_cents(distance_km);
    let breakdown = price_breakdown(dollars_to_cents(base_dollars), pickup, 0, 0);
    let perks = distance_perks(distance_km);

    println!("pickup distance: {:.1} km", distance_km);
    println!("base price:      {}", format_price(breakdown.base_price));
    println!("pickup price:    {}", format_price(breakdown.pickup_price));
    println!("total:           {}", format_price(breakdown.total_price));
    if perks.free_dropoff {
        println!("perk: free drop-off");
    }
    if perks.free_30min_lesson {
        println!("perk: free 30-minute lesson");
    }
    if perks.free_1hr_lesson {
        println!("perk: free 1-hour lesson");
    }
}
