// Core library for the SnapPacker travel platform

// Export one module per concern
pub mod cache;
pub mod catalog;
pub mod client;
pub mod compare;
pub mod ratings;
pub mod recommend;

// Re-export key types for convenience
pub use cache::{query_key, CacheConfig, CacheStatsReport, ResponseCache};
pub use catalog::{
    BudgetCategory, BudgetEntry, Country, DurationBucket, NewReview, Package, Review,
    ValidationError, BUDGET_CATEGORIES,
};
pub use client::{
    budget_insights, AiPrediction, ApiError, BudgetInsights, CachedTravelApi, ClientConfig,
    CommunityAverage, HttpTravelApi, TravelApi,
};
pub use compare::{
    ComparisonAssembler, ComparisonRow, DestinationMetrics, MetricValue, NotFoundError, TravelInfo,
    METRIC_ORDER,
};
pub use ratings::{distribution, summarize, RatingSummary};
pub use recommend::{filter, RecommendationQuery, RecommendationRequest};
