// Side-by-side destination comparison

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Country;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown destination: {key}")]
pub struct NotFoundError {
    pub key: String,
}

/// Static comparison data for a named region.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationMetrics {
    pub average_daily_cost: f64,
    pub weather_score: f64,
    pub hostel_price: f64,
    pub transport_score: f64,
    pub coffee_price: f64,
    pub activities: Vec<String>,
    pub backpacker_score: f64,
    pub work_opportunities: f64,
    pub language: String,
    pub visa_requirements: String,
    pub country: Country,
}

/// A comparison cell. Numeric metrics always carry `Number`, never a
/// stringified value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub metric: &'static str,
    pub value_a: MetricValue,
    pub value_b: MetricValue,
}

/// Chart row labels, in the order the comparison page renders them.
pub const METRIC_ORDER: [&str; 7] = [
    "Daily Cost ($)",
    "Weather Score",
    "Hostel Price ($)",
    "Transport Score",
    "Coffee Price ($)",
    "Backpacker Score",
    "Work Opportunities",
];

/// Language and visa details shown beside the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInfo {
    pub language: String,
    pub visa_requirements: String,
}

pub struct ComparisonAssembler {
    table: HashMap<String, DestinationMetrics>,
}

impl Default for ComparisonAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonAssembler {
    /// Assembler over the built-in region table.
    pub fn new() -> Self {
        Self { table: builtin_metrics() }
    }

    /// Assembler over a caller-supplied table, mainly for tests.
    pub fn with_table(table: HashMap<String, DestinationMetrics>) -> Self {
        Self { table }
    }

    /// Known destination names, sorted for stable presentation.
    pub fn destination_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn metrics(&self, name: &str) -> Result<&DestinationMetrics, NotFoundError> {
        self.table
            .get(name)
            .ok_or_else(|| NotFoundError { key: name.to_string() })
    }

    /// Builds the seven chart rows for two destinations, in `METRIC_ORDER`.
    pub fn compare(&self, name_a: &str, name_b: &str) -> Result<Vec<ComparisonRow>, NotFoundError> {
        let a = self.metrics(name_a)?;
        let b = self.metrics(name_b)?;

        let rows = METRIC_ORDER
            .into_iter()
            .zip(numeric_metrics(a))
            .zip(numeric_metrics(b))
            .map(|((metric, value_a), value_b)| ComparisonRow {
                metric,
                value_a: MetricValue::Number(value_a),
                value_b: MetricValue::Number(value_b),
            })
            .collect();
        Ok(rows)
    }

    /// Language and visa rows for the travel-information card.
    pub fn info_rows(&self, name_a: &str, name_b: &str) -> Result<Vec<ComparisonRow>, NotFoundError> {
        let a = self.metrics(name_a)?;
        let b = self.metrics(name_b)?;
        Ok(vec![
            ComparisonRow {
                metric: "Language",
                value_a: MetricValue::Text(a.language.clone()),
                value_b: MetricValue::Text(b.language.clone()),
            },
            ComparisonRow {
                metric: "Visa",
                value_a: MetricValue::Text(a.visa_requirements.clone()),
                value_b: MetricValue::Text(b.visa_requirements.clone()),
            },
        ])
    }

    pub fn activities(&self, name: &str) -> Result<&[String], NotFoundError> {
        Ok(&self.metrics(name)?.activities)
    }

    pub fn travel_info(&self, name: &str) -> Result<TravelInfo, NotFoundError> {
        let metrics = self.metrics(name)?;
        Ok(TravelInfo {
            language: metrics.language.clone(),
            visa_requirements: metrics.visa_requirements.clone(),
        })
    }
}

fn numeric_metrics(metrics: &DestinationMetrics) -> [f64; 7] {
    [
        metrics.average_daily_cost,
        metrics.weather_score,
        metrics.hostel_price,
        metrics.transport_score,
        metrics.coffee_price,
        metrics.backpacker_score,
        metrics.work_opportunities,
    ]
}

fn builtin_metrics() -> HashMap<String, DestinationMetrics> {
    let entries = [
        (
            "Sydney & New South Wales",
            DestinationMetrics {
                average_daily_cost: 75.0,
                weather_score: 8.5,
                hostel_price: 30.0,
                transport_score: 9.0,
                coffee_price: 4.0,
                activities: to_strings(&[
                    "Free City Walking Tours",
                    "Bondi to Coogee Walk",
                    "Blue Mountains Day Trip",
                    "Opera House Visit",
                ]),
                backpacker_score: 9.0,
                work_opportunities: 8.0,
                language: "English".to_string(),
                visa_requirements: "Working Holiday Visa available".to_string(),
                country: Country::Australia,
            },
        ),
        (
            "Melbourne & Victoria",
            DestinationMetrics {
                average_daily_cost: 70.0,
                weather_score: 7.5,
                hostel_price: 28.0,
                transport_score: 9.5,
                coffee_price: 3.8,
                activities: to_strings(&[
                    "Street Art Tours",
                    "Great Ocean Road",
                    "Coffee Culture",
                    "St Kilda Beach",
                ]),
                backpacker_score: 9.5,
                work_opportunities: 8.5,
                language: "English".to_string(),
                visa_requirements: "Working Holiday Visa available".to_string(),
                country: Country::Australia,
            },
        ),
        (
            "Queensland & Great Barrier Reef",
            DestinationMetrics {
                average_daily_cost: 85.0,
                weather_score: 9.0,
                hostel_price: 32.0,
                transport_score: 7.0,
                coffee_price: 4.2,
                activities: to_strings(&[
                    "Reef Snorkeling",
                    "Island Hopping",
                    "Rainforest Tours",
                    "Surfing",
                ]),
                backpacker_score: 8.5,
                work_opportunities: 7.5,
                language: "English".to_string(),
                visa_requirements: "Working Holiday Visa available".to_string(),
                country: Country::Australia,
            },
        ),
        (
            "Wellington & North Island",
            DestinationMetrics {
                average_daily_cost: 65.0,
                weather_score: 7.0,
                hostel_price: 25.0,
                transport_score: 8.0,
                coffee_price: 3.5,
                activities: to_strings(&[
                    "Te Papa Museum",
                    "Tongariro Crossing",
                    "Hobbiton",
                    "Rotorua",
                ]),
                backpacker_score: 8.5,
                work_opportunities: 7.0,
                language: "English".to_string(),
                visa_requirements: "Working Holiday Visa available".to_string(),
                country: Country::NewZealand,
            },
        ),
        (
            "Queenstown & South Island",
            DestinationMetrics {
                average_daily_cost: 80.0,
                weather_score: 8.0,
                hostel_price: 30.0,
                transport_score: 7.0,
                coffee_price: 4.0,
                activities: to_strings(&[
                    "Bungee Jumping",
                    "Skiing/Snowboarding",
                    "Milford Sound",
                    "Hiking",
                ]),
                backpacker_score: 9.0,
                work_opportunities: 8.0,
                language: "English".to_string(),
                visa_requirements: "Working Holiday Visa available".to_string(),
                country: Country::NewZealand,
            },
        ),
    ];

    entries
        .into_iter()
        .map(|(name, metrics)| (name.to_string(), metrics))
        .collect()
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
