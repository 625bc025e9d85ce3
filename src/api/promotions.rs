use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Coupon, ListQuery, Paginated, ReferralCode};
use crate::utils::codes::generate_code;

/// Payload for creating a coupon. When `code` is left empty a random
/// unambiguous code is generated client-side.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NewCoupon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    pub async fn list_coupons(&self, query: &ListQuery) -> ApiResult<Paginated<Coupon>> {
        self.get_json_query("/coupons", query).await
    }

    pub async fn create_coupon(&self, mut coupon: NewCoupon) -> ApiResult<Coupon> {
        if coupon.code.is_none() {
            coupon.code = Some(generate_code("save", 8));
        }
        self.post_json("/coupons", &coupon).await
    }

    pub async fn delete_coupon(&self, id: Uuid) -> ApiResult<()> {
        self.delete_empty(&format!("/coupons/{}", id)).await
    }

    pub async fn list_referral_codes(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Paginated<ReferralCode>> {
        self.get_json_query("/referral-codes", query).await
    }
}
