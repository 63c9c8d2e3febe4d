//! Typed API for marketplace resources
//!
//! Thin facade over `ApiClient`: every method issues one request and returns
//! the envelope unchanged, so call sites keep the single `is_error` branch.

use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    constants::{api_path, item_path},
    http::{ApiClient, RequestOptions},
    model::{
        ApiResponse, Category, CategoryNode, DashboardStats, Listing, Review, Slider, User,
    },
};

/// API client wrapper providing typed access to marketplace resources
#[derive(Clone)]
pub struct MarketplaceClient {
    http_client: ApiClient,
}

impl MarketplaceClient {
    /// Create a new API client with the given HTTP client
    pub fn new(http_client: ApiClient) -> Self {
        Self { http_client }
    }

    /// Get the underlying HTTP client
    pub fn http_client(&self) -> &ApiClient {
        &self.http_client
    }

    // ============== Listing APIs ==============

    pub async fn list_listings(&self, params: &[(String, String)]) -> ApiResponse<Vec<Listing>> {
        self.http_client
            .get_with(api_path::LISTINGS, list_options(params))
            .await
    }

    pub async fn get_listing(&self, id: i64) -> ApiResponse<Listing> {
        self.http_client
            .get(&item_path(api_path::LISTINGS, id))
            .await
    }

    pub async fn create_listing<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse<Listing> {
        self.http_client
            .post(
                api_path::LISTINGS,
                body,
                RequestOptions::new().success_message("Listing created"),
            )
            .await
    }

    pub async fn update_listing<B: Serialize + ?Sized>(
        &self,
        id: i64,
        body: &B,
    ) -> ApiResponse<Listing> {
        self.http_client
            .put(
                &item_path(api_path::LISTINGS, id),
                body,
                RequestOptions::new().success_message("Listing updated"),
            )
            .await
    }

    /// Change the publication status (e.g. "draft", "published", "archived")
    pub async fn update_listing_status(&self, id: i64, status: &str) -> ApiResponse<Listing> {
        self.http_client
            .patch(
                &format!("{}/status", item_path(api_path::LISTINGS, id)),
                &json!({ "status": status }),
                RequestOptions::new().success_message("Listing status updated"),
            )
            .await
    }

    pub async fn delete_listing(&self, id: i64) -> ApiResponse<Value> {
        self.http_client
            .delete(
                &item_path(api_path::LISTINGS, id),
                RequestOptions::new().success_message("Listing deleted"),
            )
            .await
    }

    // ============== Category APIs ==============

    pub async fn list_categories(&self, params: &[(String, String)]) -> ApiResponse<Vec<Category>> {
        self.http_client
            .get_with(api_path::CATEGORIES, list_options(params))
            .await
    }

    /// Full category tree with nested children
    pub async fn category_tree(&self) -> ApiResponse<Vec<CategoryNode>> {
        self.http_client.get(api_path::CATEGORIES_TREE).await
    }

    pub async fn get_category(&self, id: i64) -> ApiResponse<Category> {
        self.http_client
            .get(&item_path(api_path::CATEGORIES, id))
            .await
    }

    pub async fn create_category<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse<Category> {
        self.http_client
            .post(
                api_path::CATEGORIES,
                body,
                RequestOptions::new().success_message("Category created"),
            )
            .await
    }

    pub async fn update_category<B: Serialize + ?Sized>(
        &self,
        id: i64,
        body: &B,
    ) -> ApiResponse<Category> {
        self.http_client
            .put(
                &item_path(api_path::CATEGORIES, id),
                body,
                RequestOptions::new().success_message("Category updated"),
            )
            .await
    }

    pub async fn delete_category(&self, id: i64) -> ApiResponse<Value> {
        self.http_client
            .delete(
                &item_path(api_path::CATEGORIES, id),
                RequestOptions::new().success_message("Category deleted"),
            )
            .await
    }

    // ============== User APIs ==============

    pub async fn list_users(&self, params: &[(String, String)]) -> ApiResponse<Vec<User>> {
        self.http_client
            .get_with(api_path::USERS, list_options(params))
            .await
    }

    pub async fn get_user(&self, id: i64) -> ApiResponse<User> {
        self.http_client.get(&item_path(api_path::USERS, id)).await
    }

    pub async fn create_user<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse<User> {
        self.http_client
            .post(
                api_path::USERS,
                body,
                RequestOptions::new().success_message("User created"),
            )
            .await
    }

    pub async fn update_user<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> ApiResponse<User> {
        self.http_client
            .put(
                &item_path(api_path::USERS, id),
                body,
                RequestOptions::new().success_message("User updated"),
            )
            .await
    }

    pub async fn delete_user(&self, id: i64) -> ApiResponse<Value> {
        self.http_client
            .delete(
                &item_path(api_path::USERS, id),
                RequestOptions::new().success_message("User deleted"),
            )
            .await
    }

    // ============== Slider APIs ==============

    pub async fn list_sliders(&self, params: &[(String, String)]) -> ApiResponse<Vec<Slider>> {
        self.http_client
            .get_with(api_path::SLIDERS, list_options(params))
            .await
    }

    pub async fn get_slider(&self, id: i64) -> ApiResponse<Slider> {
        self.http_client
            .get(&item_path(api_path::SLIDERS, id))
            .await
    }

    pub async fn create_slider<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse<Slider> {
        self.http_client
            .post(
                api_path::SLIDERS,
                body,
                RequestOptions::new().success_message("Slider created"),
            )
            .await
    }

    pub async fn update_slider<B: Serialize + ?Sized>(
        &self,
        id: i64,
        body: &B,
    ) -> ApiResponse<Slider> {
        self.http_client
            .put(
                &item_path(api_path::SLIDERS, id),
                body,
                RequestOptions::new().success_message("Slider updated"),
            )
            .await
    }

    /// Show or hide a slider on the public site
    pub async fn toggle_slider(&self, id: i64, active: bool) -> ApiResponse<Slider> {
        self.http_client
            .patch(
                &format!("{}/toggle", item_path(api_path::SLIDERS, id)),
                &json!({ "is_active": active }),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn delete_slider(&self, id: i64) -> ApiResponse<Value> {
        self.http_client
            .delete(
                &item_path(api_path::SLIDERS, id),
                RequestOptions::new().success_message("Slider deleted"),
            )
            .await
    }

    // ============== Review APIs ==============

    pub async fn list_reviews(&self, params: &[(String, String)]) -> ApiResponse<Vec<Review>> {
        self.http_client
            .get_with(api_path::REVIEWS, list_options(params))
            .await
    }

    pub async fn get_review(&self, id: i64) -> ApiResponse<Review> {
        self.http_client
            .get(&item_path(api_path::REVIEWS, id))
            .await
    }

    pub async fn approve_review(&self, id: i64) -> ApiResponse<Review> {
        self.http_client
            .patch(
                &format!("{}/approve", item_path(api_path::REVIEWS, id)),
                &json!({ "is_approved": true }),
                RequestOptions::new().success_message("Review approved"),
            )
            .await
    }

    pub async fn delete_review(&self, id: i64) -> ApiResponse<Value> {
        self.http_client
            .delete(
                &item_path(api_path::REVIEWS, id),
                RequestOptions::new().success_message("Review deleted"),
            )
            .await
    }

    // ============== Reorder / Dashboard APIs ==============

    /// Move `id` to the position currently held by the row with `sort_key`
    pub async fn reorder(
        &self,
        endpoint: &str,
        id: impl Serialize,
        sort_key: i64,
    ) -> ApiResponse<Value> {
        self.http_client
            .put(
                endpoint,
                &json!({ "id": id, "sort_order": sort_key }),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn dashboard_stats(&self) -> ApiResponse<DashboardStats> {
        self.http_client.get(api_path::DASHBOARD_ANALYTICS).await
    }
}

fn list_options(params: &[(String, String)]) -> RequestOptions {
    RequestOptions::new().params(params.iter().cloned())
}
