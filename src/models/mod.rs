pub mod booking;
pub mod coupon;
pub mod customer;
pub mod instructor;
pub mod refund;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use coupon::{Coupon, ReferralCode};
pub use customer::Customer;
pub use instructor::Instructor;
pub use refund::{RefundRequest, RefundStatus};
pub use user::{Identity, Role};

use serde::{Deserialize, Serialize};

/// A geographic point in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Query parameters accepted by every listing endpoint.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }
}

/// One page of a listing response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}
