use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::utils::geo::haversine_distance;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct DistanceRequest {
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub test_centre_lat: f64,
    pub test_centre_lng: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceResponse {
    distance: f64,
}

impl ApiClient {
    /// Road distance from pickup to test centre, in kilometers.
    ///
    /// Asks the remote distance service first and falls back to the local
    /// great-circle value when it is unavailable. Never errors.
    pub async fn pickup_distance(&self, req: DistanceRequest) -> f64 {
        match self
            .post_json::<DistanceResponse, DistanceRequest>("/distance", &req)
            .await
        {
            Ok(resp) => resp.distance,
            Err(err) => {
                tracing::warn!(error = %err, "distance service unavailable, using local calculation");
                haversine_distance(
                    req.pickup_lat,
                    req.pickup_lng,
                    req.test_centre_lat,
                    req.test_centre_lng,
                )
            }
        }
    }
}
