use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Approved,
    Denied,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefundRequest {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount_cents: i64,
    pub reason: String,
    pub status: RefundStatus,
    pub requested_at: DateTime<Utc>,
}
