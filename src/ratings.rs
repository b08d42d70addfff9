// Rating aggregation for package reviews

use serde::Serialize;

use crate::catalog::Review;

/// Aggregate rating for one package.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

impl RatingSummary {
    /// Number of fully filled stars when rendering the summary.
    pub fn full_stars(&self) -> u8 {
        self.average.floor() as u8
    }
}

/// Arithmetic mean and count over a package's reviews. Pure and
/// order-independent. An empty list yields an average of 0 with count 0,
/// which callers must read as "no reviews yet" rather than a one-star score.
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary { average: 0.0, count: 0 };
    }
    let total: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    RatingSummary {
        average: f64::from(total) / reviews.len() as f64,
        count: reviews.len(),
    }
}

/// Review count per star value, index 0 holding one-star reviews.
pub fn distribution(reviews: &[Review]) -> [usize; 5] {
    let mut stars = [0usize; 5];
    for review in reviews {
        if (1..=5).contains(&review.rating) {
            stars[usize::from(review.rating) - 1] += 1;
        }
    }
    stars
}
