// Typed client for the SnapPacker backend endpoints

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{query_key, CacheConfig, CacheStatsReport, ResponseCache};
use crate::catalog::{BudgetEntry, NewReview, Package, Review, ValidationError};
use crate::compare::NotFoundError;
use crate::recommend::RecommendationRequest;

// Error types for backend calls. The core never retries; retry and backoff
// policy belongs to the calling layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `GET /community-average` response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityAverage {
    pub average_amount: f64,
    pub submission_count: usize,
}

/// `GET /ai-prediction` response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPrediction {
    pub predicted_amount: f64,
    /// Model confidence in the 0-1 range.
    pub confidence: f64,
    pub seasonality: String,
}

/// Community and AI insight for one location/category pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInsights {
    pub community: CommunityAverage,
    pub prediction: AiPrediction,
}

/// Backend collaborator seam. The pure aggregation and filtering modules
/// never touch the network; everything that does goes through this trait so
/// it can be swapped out in tests.
#[async_trait]
pub trait TravelApi: Send + Sync + 'static {
    async fn submit_budget_entry(&self, entry: &BudgetEntry) -> Result<BudgetEntry, ApiError>;

    async fn community_average(
        &self,
        location: &str,
        category_id: i32,
    ) -> Result<CommunityAverage, ApiError>;

    async fn ai_prediction(
        &self,
        location: &str,
        category_id: i32,
    ) -> Result<AiPrediction, ApiError>;

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Package>, ApiError>;

    async fn reviews(&self, package_id: u32) -> Result<Vec<Review>, ApiError>;

    async fn submit_review(
        &self,
        package_id: u32,
        review: &NewReview,
    ) -> Result<Review, ApiError>;
}

/// Fetches the community average and the AI prediction for the budget
/// insights panel in one go; the two requests run concurrently.
pub async fn budget_insights<T: TravelApi + ?Sized>(
    api: &T,
    location: &str,
    category_id: i32,
) -> Result<BudgetInsights, ApiError> {
    let (community, prediction) = futures::try_join!(
        api.community_average(location, category_id),
        api.ai_prediction(location, category_id),
    )?;
    Ok(BudgetInsights { community, prediction })
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// reqwest-backed implementation speaking JSON to the backend. Inputs are
/// validated client-side before any request goes out.
pub struct HttpTravelApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpTravelApi {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn check(path: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), "backend request failed");
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(NotFoundError { key: path.to_string() }));
        }
        Err(ApiError::Status { status: status.as_u16(), message })
    }
}

#[async_trait]
impl TravelApi for HttpTravelApi {
    async fn submit_budget_entry(&self, entry: &BudgetEntry) -> Result<BudgetEntry, ApiError> {
        entry.validate()?;
        let path = "/budget-entries";
        debug!(location = entry.location.as_str(), "submitting budget entry");
        let response = self.http.post(self.url(path)).json(entry).send().await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn community_average(
        &self,
        location: &str,
        category_id: i32,
    ) -> Result<CommunityAverage, ApiError> {
        let path = "/community-average";
        let response = self
            .http
            .get(self.url(path))
            .query(&[("location", location.to_string()), ("categoryId", category_id.to_string())])
            .send()
            .await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn ai_prediction(
        &self,
        location: &str,
        category_id: i32,
    ) -> Result<AiPrediction, ApiError> {
        let path = "/ai-prediction";
        let response = self
            .http
            .get(self.url(path))
            .query(&[("location", location.to_string()), ("categoryId", category_id.to_string())])
            .send()
            .await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Package>, ApiError> {
        // Catch malformed enum values before the round trip
        request.validate()?;
        let path = "/recommendations";
        let response = self.http.post(self.url(path)).json(request).send().await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn reviews(&self, package_id: u32) -> Result<Vec<Review>, ApiError> {
        let path = format!("/packages/{}/reviews", package_id);
        let response = self.http.get(self.url(&path)).send().await?;
        Ok(Self::check(&path, response).await?.json().await?)
    }

    async fn submit_review(
        &self,
        package_id: u32,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        review.validate()?;
        let path = format!("/packages/{}/reviews", package_id);
        let response = self.http.post(self.url(&path)).json(review).send().await?;
        Ok(Self::check(&path, response).await?.json().await?)
    }
}

/// Caching decorator over any `TravelApi`. Read endpoints are served from a
/// `ResponseCache`; submitting a review drops the cached review list for
/// that package so the next read sees it.
pub struct CachedTravelApi<T> {
    inner: T,
    cache: ResponseCache,
}

impl<T: TravelApi> CachedTravelApi<T> {
    pub fn new(inner: T, config: CacheConfig) -> Self {
        Self { inner, cache: ResponseCache::new(config) }
    }

    pub fn cache_stats(&self) -> CacheStatsReport {
        self.cache.stats()
    }

    fn cached<V: serde::de::DeserializeOwned>(&self, key: &str) -> Option<Result<V, ApiError>> {
        let body = self.cache.get(key)?;
        Some(serde_json::from_str(&body).map_err(ApiError::from))
    }

    fn store<V: Serialize>(&self, key: &str, value: &V) {
        match serde_json::to_string(value) {
            Ok(body) => {
                self.cache.insert(key, body, None);
            }
            Err(error) => warn!(key, %error, "failed to serialize cache entry"),
        }
    }
}

#[async_trait]
impl<T: TravelApi> TravelApi for CachedTravelApi<T> {
    async fn submit_budget_entry(&self, entry: &BudgetEntry) -> Result<BudgetEntry, ApiError> {
        // Writes pass straight through
        self.inner.submit_budget_entry(entry).await
    }

    async fn community_average(
        &self,
        location: &str,
        category_id: i32,
    ) -> Result<CommunityAverage, ApiError> {
        let key = query_key("community-average", &[location, &category_id.to_string()]);
        if let Some(cached) = self.cached(&key) {
            return cached;
        }
        let value = self.inner.community_average(location, category_id).await?;
        self.store(&key, &value);
        Ok(value)
    }

    async fn ai_prediction(
        &self,
        location: &str,
        category_id: i32,
    ) -> Result<AiPrediction, ApiError> {
        let key = query_key("ai-prediction", &[location, &category_id.to_string()]);
        if let Some(cached) = self.cached(&key) {
            return cached;
        }
        let value = self.inner.ai_prediction(location, category_id).await?;
        self.store(&key, &value);
        Ok(value)
    }

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Package>, ApiError> {
        // Recommendation results depend on the full query; not cached
        self.inner.recommendations(request).await
    }

    async fn reviews(&self, package_id: u32) -> Result<Vec<Review>, ApiError> {
        let key = query_key("reviews", &[&package_id.to_string()]);
        if let Some(cached) = self.cached(&key) {
            return cached;
        }
        let value = self.inner.reviews(package_id).await?;
        self.store(&key, &value);
        Ok(value)
    }

    async fn submit_review(
        &self,
        package_id: u32,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        let created = self.inner.submit_review(package_id, review).await?;
        self.cache
            .invalidate_prefix(&query_key("reviews", &[&package_id.to_string()]));
        Ok(created)
    }
}

// Mock backend for testing the client plumbing without a server
#[cfg(test)]
pub mod mock_server {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockTravelApi {
        reviews: Mutex<HashMap<u32, Vec<Review>>>,
        catalog: Mutex<Vec<Package>>,
        next_review_id: AtomicU32,
        pub call_count: AtomicUsize,
        fail_next_requests: AtomicUsize,
    }

    impl MockTravelApi {
        pub fn new() -> Self {
            Self { next_review_id: AtomicU32::new(1), ..Self::default() }
        }

        pub async fn with_catalog(self, packages: Vec<Package>) -> Self {
            *self.catalog.lock().await = packages;
            self
        }

        pub fn fail_next_requests(&self, count: usize) {
            self.fail_next_requests.store(count, Ordering::SeqCst);
        }

        fn record_call(&self) -> Result<(), ApiError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            let remaining = self.fail_next_requests.load(Ordering::SeqCst);
            if remaining > 0 {
                self.fail_next_requests.store(remaining - 1, Ordering::SeqCst);
                return Err(ApiError::Status {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TravelApi for MockTravelApi {
        async fn submit_budget_entry(&self, entry: &BudgetEntry) -> Result<BudgetEntry, ApiError> {
            self.record_call()?;
            entry.validate()?;
            Ok(entry.clone())
        }

        async fn community_average(
            &self,
            location: &str,
            _category_id: i32,
        ) -> Result<CommunityAverage, ApiError> {
            self.record_call()?;
            Ok(CommunityAverage {
                average_amount: if location == "Sydney" { 52.4 } else { 38.0 },
                submission_count: 128,
            })
        }

        async fn ai_prediction(
            &self,
            _location: &str,
            _category_id: i32,
        ) -> Result<AiPrediction, ApiError> {
            self.record_call()?;
            Ok(AiPrediction {
                predicted_amount: 47.5,
                confidence: 0.82,
                seasonality: "high".to_string(),
            })
        }

        async fn recommendations(
            &self,
            request: &RecommendationRequest,
        ) -> Result<Vec<Package>, ApiError> {
            self.record_call()?;
            let query = request.validate()?;
            let catalog = self.catalog.lock().await;
            Ok(crate::recommend::filter(&catalog, &query)
                .into_iter()
                .cloned()
                .collect())
        }

        async fn reviews(&self, package_id: u32) -> Result<Vec<Review>, ApiError> {
            self.record_call()?;
            let reviews = self.reviews.lock().await;
            Ok(reviews.get(&package_id).cloned().unwrap_or_default())
        }

        async fn submit_review(
            &self,
            package_id: u32,
            review: &NewReview,
        ) -> Result<Review, ApiError> {
            self.record_call()?;
            review.validate()?;
            let created = Review {
                id: self.next_review_id.fetch_add(1, Ordering::SeqCst),
                package_id,
                rating: review.rating,
                comment: review.comment.clone(),
                created_at: Utc::now(),
                author: "Mock User".to_string(),
            };
            let mut reviews = self.reviews.lock().await;
            reviews.entry(package_id).or_default().push(created.clone());
            Ok(created)
        }
    }
}
