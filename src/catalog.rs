// Reference data model for the SnapPacker travel catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Error types for input validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown duration bucket: {0}")]
    UnknownDurationBucket(String),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("Rating {0} is outside the 1-5 range")]
    RatingOutOfRange(u8),

    #[error("Review comment must not be blank")]
    BlankComment,

    #[error("Amount {0} must not be negative")]
    NegativeAmount(f64),

    #[error("Duration must be at least one day, got {0}")]
    NonPositiveDuration(u32),

    #[error("Unknown budget category id: {0}")]
    UnknownCategory(i32),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("At least one interest is required")]
    EmptyInterests,
}

/// Coarse trip-length category used by the recommendation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    Weekend,
    Short,
    Long,
}

impl DurationBucket {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "weekend" => Ok(Self::Weekend),
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            other => Err(ValidationError::UnknownDurationBucket(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekend => "weekend",
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Country {
    Australia,
    NewZealand,
}

impl Country {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "australia" => Ok(Self::Australia),
            "new-zealand" => Ok(Self::NewZealand),
            other => Err(ValidationError::UnknownCountry(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Australia => "australia",
            Self::NewZealand => "new-zealand",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Australia => "Australia",
            Self::NewZealand => "New Zealand",
        }
    }
}

/// A bookable travel offering. Created by the data source and never mutated
/// by callers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: u32,
    pub title: String,
    pub location: String,
    pub country: Country,
    /// Price in AUD/NZD depending on country.
    pub price: f64,
    pub duration: DurationBucket,
    pub description: String,
    /// Ordered list of selling points, also matched against user interests.
    pub highlights: Vec<String>,
    pub image: String,
}

/// A stored user review. Append-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u32,
    pub package_id: u32,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
}

/// Review submission payload for `POST /packages/:id/reviews`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }
        if self.comment.trim().is_empty() {
            return Err(ValidationError::BlankComment);
        }
        Ok(())
    }
}

/// A single spending record submitted to `POST /budget-entries`. Not retained
/// client-side after submission.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    pub category_id: i32,
    pub amount: f64,
    pub location: String,
    /// Trip duration in days.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BudgetEntry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if category_by_id(self.category_id).is_none() {
            return Err(ValidationError::UnknownCategory(self.category_id));
        }
        if self.amount < 0.0 || !self.amount.is_finite() {
            return Err(ValidationError::NegativeAmount(self.amount));
        }
        if self.duration < 1 {
            return Err(ValidationError::NonPositiveDuration(self.duration));
        }
        if !is_known_location(&self.location) {
            return Err(ValidationError::UnknownLocation(self.location.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCategory {
    pub id: i32,
    pub name: &'static str,
}

pub const BUDGET_CATEGORIES: [BudgetCategory; 6] = [
    BudgetCategory { id: 1, name: "Accommodation" },
    BudgetCategory { id: 2, name: "Food & Drinks" },
    BudgetCategory { id: 3, name: "Transportation" },
    BudgetCategory { id: 4, name: "Activities" },
    BudgetCategory { id: 5, name: "Shopping" },
    BudgetCategory { id: 6, name: "Other" },
];

pub fn category_by_id(id: i32) -> Option<&'static BudgetCategory> {
    BUDGET_CATEGORIES.iter().find(|category| category.id == id)
}

/// Cities available in the budget form, per country.
pub fn locations(country: Country) -> &'static [&'static str] {
    match country {
        Country::Australia => &[
            "Sydney",
            "Melbourne",
            "Brisbane",
            "Gold Coast",
            "Perth",
            "Cairns",
        ],
        Country::NewZealand => &[
            "Auckland",
            "Wellington",
            "Queenstown",
            "Christchurch",
            "Rotorua",
            "Dunedin",
        ],
    }
}

pub fn is_known_location(location: &str) -> bool {
    locations(Country::Australia).contains(&location)
        || locations(Country::NewZealand).contains(&location)
}
