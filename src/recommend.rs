// Recommendation filtering for the package catalog

use serde::{Deserialize, Serialize};

use crate::catalog::{Country, DurationBucket, Package, ValidationError};

/// Wire shape of the `POST /recommendations` body, matching the form data
/// the frontend submits. Enum fields arrive as plain strings and must be
/// validated before filtering.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub budget: f64,
    pub duration: String,
    pub interests: Vec<String>,
    pub country: String,
}

impl RecommendationRequest {
    /// Parses the request into a typed query. Unrecognized duration or
    /// country values fail loudly instead of silently matching nothing, and
    /// a request without any usable interest is rejected up front.
    pub fn validate(&self) -> Result<RecommendationQuery, ValidationError> {
        let duration = DurationBucket::parse(&self.duration)?;
        let country = Country::parse(&self.country)?;
        let interests: Vec<String> = self
            .interests
            .iter()
            .map(|interest| interest.trim().to_lowercase())
            .filter(|interest| !interest.is_empty())
            .collect();
        if interests.is_empty() {
            return Err(ValidationError::EmptyInterests);
        }
        Ok(RecommendationQuery {
            budget: self.budget,
            duration,
            interests,
            country,
        })
    }
}

/// Validated query. Interests are trimmed and lowercased.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub budget: f64,
    pub duration: DurationBucket,
    pub interests: Vec<String>,
    pub country: Country,
}

/// Stable filter over the catalog: result order is catalog order, no
/// ranking. A package matches when its price is within budget (inclusive),
/// duration bucket and country match exactly, and at least one highlight
/// equals one of the interests under case-insensitive trimmed comparison.
pub fn filter<'a>(catalog: &'a [Package], query: &RecommendationQuery) -> Vec<&'a Package> {
    catalog
        .iter()
        .filter(|package| matches(package, query))
        .collect()
}

fn matches(package: &Package, query: &RecommendationQuery) -> bool {
    if package.price > query.budget {
        return false;
    }
    if package.duration != query.duration {
        return false;
    }
    if package.country != query.country {
        return false;
    }
    // An empty interest list matches nothing; validate() rejects it earlier.
    package.highlights.iter().any(|highlight| {
        let highlight = highlight.trim().to_lowercase();
        query.interests.iter().any(|interest| *interest == highlight)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn package(
        id: u32,
        price: f64,
        duration: DurationBucket,
        country: Country,
        highlights: &[&str],
    ) -> Package {
        Package {
            id,
            title: format!("Package {}", id),
            location: "Sydney".to_string(),
            country,
            price,
            duration,
            description: "A curated backpacker itinerary".to_string(),
            highlights: highlights.iter().map(|h| h.to_string()).collect(),
            image: format!("/images/package-{}.jpg", id),
        }
    }

    fn catalog() -> Vec<Package> {
        vec![
            package(1, 800.0, DurationBucket::Short, Country::Australia, &["Beaches", "Surfing"]),
            package(2, 1500.0, DurationBucket::Long, Country::Australia, &["Hiking", "Culture"]),
            package(3, 600.0, DurationBucket::Weekend, Country::NewZealand, &["Hiking", "Skiing"]),
            package(4, 950.0, DurationBucket::Short, Country::Australia, &["Culture", "Beaches"]),
            package(5, 2000.0, DurationBucket::Short, Country::Australia, &["Beaches"]),
        ]
    }

    fn query(budget: f64, duration: DurationBucket, interests: &[&str], country: Country) -> RecommendationQuery {
        RecommendationQuery {
            budget,
            duration,
            interests: interests.iter().map(|i| i.to_string()).collect(),
            country,
        }
    }

    #[test_case(1000.0, DurationBucket::Short, &["beaches"], Country::Australia, vec![1, 4]; "#1 budget excludes the expensive option")]
    #[test_case(2000.0, DurationBucket::Short, &["beaches"], Country::Australia, vec![1, 4, 5]; "#2 budget is inclusive at the boundary")]
    #[test_case(2000.0, DurationBucket::Long, &["hiking"], Country::Australia, vec![2]; "#3 duration bucket must match")]
    #[test_case(2000.0, DurationBucket::Weekend, &["hiking"], Country::NewZealand, vec![3]; "#4 country must match")]
    #[test_case(2000.0, DurationBucket::Short, &["culture", "surfing"], Country::Australia, vec![1, 4]; "#5 any interest overlap is enough")]
    #[test_case(2000.0, DurationBucket::Short, &["skiing"], Country::Australia, vec![]; "#6 no interest overlap matches nothing")]
    fn test_filter(
        budget: f64,
        duration: DurationBucket,
        interests: &[&str],
        country: Country,
        expected_ids: Vec<u32>,
    ) {
        let catalog = catalog();
        let results = filter(&catalog, &query(budget, duration, interests, country));
        let ids: Vec<u32> = results.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected_ids);
    }

    #[test]
    fn test_filter_preserves_catalog_order() {
        let catalog = catalog();
        let q = query(2000.0, DurationBucket::Short, &["beaches"], Country::Australia);
        let ids: Vec<u32> = filter(&catalog, &q).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4, 5], "results must keep catalog order");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = catalog();
        let q = query(1000.0, DurationBucket::Short, &["beaches"], Country::Australia);

        let first: Vec<Package> = filter(&catalog, &q).into_iter().cloned().collect();
        let second: Vec<Package> = filter(&first, &q).into_iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_interest_matching_is_case_insensitive_and_trimmed() {
        let catalog = catalog();
        let request = RecommendationRequest {
            budget: 1000.0,
            duration: "short".to_string(),
            interests: vec!["  Beaches ".to_string(), "".to_string()],
            country: "australia".to_string(),
        };
        let q = request.validate().unwrap();
        assert_eq!(q.interests, vec!["beaches".to_string()]);

        let ids: Vec<u32> = filter(&catalog, &q).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_unknown_enum_values_are_rejected() {
        let request = RecommendationRequest {
            budget: 1000.0,
            duration: "bogus".to_string(),
            interests: vec!["beaches".to_string()],
            country: "australia".to_string(),
        };
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::UnknownDurationBucket("bogus".to_string())
        );

        let request = RecommendationRequest {
            duration: "short".to_string(),
            country: "fiji".to_string(),
            ..request
        };
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::UnknownCountry("fiji".to_string())
        );
    }

    #[test]
    fn test_empty_interests_are_rejected() {
        let request = RecommendationRequest {
            budget: 1000.0,
            duration: "short".to_string(),
            interests: vec!["   ".to_string()],
            country: "australia".to_string(),
        };
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::EmptyInterests
        );
    }

    #[test]
    fn test_every_result_is_within_budget() {
        let catalog = catalog();
        for budget in [500.0, 800.0, 950.0, 1500.0, 2500.0] {
            let q = query(budget, DurationBucket::Short, &["beaches"], Country::Australia);
            for package in filter(&catalog, &q) {
                assert!(package.price <= budget);
            }
        }
    }
}
