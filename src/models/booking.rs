use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::{DistancePerks, PricingBreakdown};

use super::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub instructor_id: Option<Uuid>,
    pub test_centre: String,
    pub status: BookingStatus,
    pub pickup: Option<Coordinates>,
    pub distance_km: f64,
    pub pricing: PricingBreakdown,
    pub perks: DistancePerks,
    pub road_test_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
