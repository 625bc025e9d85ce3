use serde::Serialize;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Booking, BookingStatus, ListQuery, Paginated, RefundRequest};

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: BookingStatus,
}

#[derive(Debug, Serialize)]
struct RefundResolution {
    approve: bool,
}

impl ApiClient {
    pub async fn list_bookings(&self, query: &ListQuery) -> ApiResult<Paginated<Booking>> {
        self.get_json_query("/bookings", query).await
    }

    pub async fn get_booking(&self, id: Uuid) -> ApiResult<Booking> {
        self.get_json(&format!("/bookings/{}", id)).await
    }

    pub async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> ApiResult<Booking> {
        self.put_json(&format!("/bookings/{}/status", id), &StatusUpdate { status })
            .await
    }

    pub async fn list_refund_requests(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Paginated<RefundRequest>> {
        self.get_json_query("/refund-requests", query).await
    }

    /// Approve or deny a pending refund request.
    pub async fn resolve_refund_request(
        &self,
        id: Uuid,
        approve: bool,
    ) -> ApiResult<RefundRequest> {
        self.put_json(
            &format!("/refund-requests/{}/resolve", id),
            &RefundResolution { approve },
        )
        .await
    }
}
