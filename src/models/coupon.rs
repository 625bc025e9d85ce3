use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    /// Flat discount in cents; exactly one of this and `discount_percent` is set.
    pub discount_cents: Option<i64>,
    pub discount_percent: Option<u8>,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferralCode {
    pub id: Uuid,
    pub code: String,
    pub owner_customer_id: Uuid,
    pub reward_cents: i64,
    pub uses: u32,
    pub created_at: DateTime<Utc>,
}
