use serde::{Deserialize, Serialize};

/// Distance covered by the base pickup rate, in kilometers.
const BASE_TIER_KM: f64 = 50.0;
/// Pickup rate for the first tier, in cents per kilometer ($1.00/km).
const BASE_RATE_CENTS: f64 = 100.0;
/// Pickup rate beyond the first tier, in cents per kilometer ($0.50/km).
const REDUCED_RATE_CENTS: f64 = 50.0;

/// Cost components of a booking, all in integer cents.
///
/// `total_price` always equals `max(0, base + pickup + addons - discount)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_price: i64,
    pub pickup_price: i64,
    pub addons_price: i64,
    pub discount_amount: i64,
    pub total_price: i64,
}

/// Non-monetary benefits unlocked by pickup distance.
///
/// The lesson perks are mutually exclusive; `free_dropoff` can co-occur
/// with either of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistancePerks {
    pub free_dropoff: bool,
    pub free_30min_lesson: bool,
    pub free_1hr_lesson: bool,
}

/// Pickup price for a given distance, in cents.
///
/// First 50 km at $1.00/km, anything beyond at $0.50/km. Rounding is
/// half-up (`f64::round` on a non-negative value).
pub fn pickup_price_cents(distance_km: f64) -> i64 {
    if distance_km <= BASE_TIER_KM {
        (distance_km * BASE_RATE_CENTS).round() as i64
    } else {
        let base = BASE_TIER_KM * BASE_RATE_CENTS;
        let remainder = (distance_km - BASE_TIER_KM) * REDUCED_RATE_CENTS;
        (base + remainder).round() as i64
    }
}

/// Perks earned at the given pickup distance.
pub fn distance_perks(distance_km: f64) -> DistancePerks {
    DistancePerks {
        free_dropoff: distance_km >= 50.0,
        free_30min_lesson: (50.0..100.0).contains(&distance_km),
        free_1hr_lesson: distance_km >= 100.0,
    }
}

/// Total booking price: components summed, clamped at zero.
pub fn total_price_cents(
    base_price: i64,
    pickup_price: i64,
    addons_price: i64,
    discount_amount: i64,
) -> i64 {
    (base_price + pickup_price + addons_price - discount_amount).max(0)
}

/// Full breakdown for the given components, with the clamped total filled in.
pub fn price_breakdown(
    base_price: i64,
    pickup_price: i64,
    addons_price: i64,
    discount_amount: i64,
) -> PricingBreakdown {
    PricingBreakdown {
        base_price,
        pickup_price,
        addons_price,
        discount_amount,
        total_price: total_price_cents(base_price, pickup_price, addons_price, discount_amount),
    }
}

/// Format a cent amount as a dollar string, e.g. `1234` -> `"$12.34"`.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// Convert a dollar amount to integer cents, rounding half-up.
pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}
