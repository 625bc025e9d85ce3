use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Customer, Instructor, ListQuery, Paginated};

impl ApiClient {
    pub async fn list_customers(&self, query: &ListQuery) -> ApiResult<Paginated<Customer>> {
        self.get_json_query("/customers", query).await
    }

    pub async fn get_customer(&self, id: Uuid) -> ApiResult<Customer> {
        self.get_json(&format!("/customers/{}", id)).await
    }

    pub async fn list_instructors(&self, query: &ListQuery) -> ApiResult<Paginated<Instructor>> {
        self.get_json_query("/instructors", query).await
    }

    pub async fn get_instructor(&self, id: Uuid) -> ApiResult<Instructor> {
        self.get_json(&format!("/instructors/{}", id)).await
    }
}
