//! Core types for the insight pipeline
//!
//! `PropertyInsight` is the record every caller receives. Construction goes
//! through [`assemble`], which guarantees the invariant that every field is
//! populated: missing or unusable fields are substituted from the defaults
//! table, and a failed generation yields the full fallback record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured insight record for a single property address
///
/// Serialized in camelCase to stay wire-compatible with the dashboard
/// clients and with records already sitting in the KV store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInsight {
    /// Address as entered by the user, echoed back verbatim
    pub address: String,
    pub roof_condition: String,
    /// Free-text age range, e.g. "8-10 years"
    pub estimated_age: String,
    pub replacement_cost: String,
    pub storm_risk: String,
    pub maintenance_recommendations: Vec<String>,
    pub property_value_impact: String,
    pub sustainability_options: Vec<String>,
    /// Model self-reported confidence; passed through unclamped
    pub confidence: f64,
}

/// Default field values, used both for per-field substitution and for the
/// full fallback record.
///
/// Two storm-risk literals exist on purpose: `STORM_RISK` is the per-field
/// substitute, `STORM_RISK_FALLBACK` is what the full fallback record
/// carries. Callers downstream key off the exact strings, so both are kept.
pub mod defaults {
    pub const ROOF_CONDITION: &str = "Good condition with minor wear";
    pub const ESTIMATED_AGE: &str = "8-10 years";
    pub const REPLACEMENT_COST: &str = "$12,000 - $15,000";
    pub const STORM_RISK: &str = "Medium risk";
    pub const STORM_RISK_FALLBACK: &str =
        "Medium - property is in an area with occasional severe weather";
    pub const PROPERTY_VALUE_IMPACT: &str =
        "Current roof condition adds approximately $8,000 to property value";
    pub const CONFIDENCE: f64 = 0.85;

    pub fn maintenance_recommendations() -> Vec<String> {
        vec![
            "Clean gutters quarterly".to_string(),
            "Inspect for loose shingles after storms".to_string(),
            "Trim overhanging branches".to_string(),
            "Check attic ventilation annually".to_string(),
        ]
    }

    pub fn sustainability_options() -> Vec<String> {
        vec![
            "Solar panel installation viable".to_string(),
            "Cool roof coating to improve energy efficiency".to_string(),
            "Rainwater collection system compatible".to_string(),
        ]
    }
}

/// Result of one generation attempt, before defaulting is applied
///
/// Separating the transport failure from the parse failure keeps the cache
/// policy explicit: `ProviderError` records are returned but never written
/// to the cache, while `MalformedResponse` records are.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// The completion contained a JSON object; fields may still be missing
    Parsed(Map<String, Value>),
    /// The completion could not be parsed as a JSON object
    MalformedResponse,
    /// The completion call itself failed (network, auth, provider error)
    ProviderError,
}

/// The full fallback record for an address
pub fn fallback_insight(address: &str) -> PropertyInsight {
    PropertyInsight {
        address: address.to_string(),
        roof_condition: defaults::ROOF_CONDITION.to_string(),
        estimated_age: defaults::ESTIMATED_AGE.to_string(),
        replacement_cost: defaults::REPLACEMENT_COST.to_string(),
        storm_risk: defaults::STORM_RISK_FALLBACK.to_string(),
        maintenance_recommendations: defaults::maintenance_recommendations(),
        property_value_impact: defaults::PROPERTY_VALUE_IMPACT.to_string(),
        sustainability_options: defaults::sustainability_options(),
        confidence: defaults::CONFIDENCE,
    }
}

/// Assemble a fully-populated record from a generation outcome
///
/// For `Parsed`, every field is defaulted independently: a response that is
/// valid JSON but missing `stormRisk` still contributes its other fields.
/// A present-but-empty list is kept; a wrong-typed or empty-string field is
/// substituted. `confidence` of exactly 0 is substituted and is otherwise
/// passed through without clamping.
pub fn assemble(address: &str, outcome: &GenerationOutcome) -> PropertyInsight {
    let fields = match outcome {
        GenerationOutcome::Parsed(fields) => fields,
        GenerationOutcome::MalformedResponse | GenerationOutcome::ProviderError => {
            return fallback_insight(address);
        }
    };

    PropertyInsight {
        address: address.to_string(),
        roof_condition: string_field(fields, "roofCondition", defaults::ROOF_CONDITION),
        estimated_age: string_field(fields, "estimatedAge", defaults::ESTIMATED_AGE),
        replacement_cost: string_field(fields, "replacementCost", defaults::REPLACEMENT_COST),
        storm_risk: string_field(fields, "stormRisk", defaults::STORM_RISK),
        maintenance_recommendations: list_field(
            fields,
            "maintenanceRecommendations",
            defaults::maintenance_recommendations,
        ),
        property_value_impact: string_field(
            fields,
            "propertyValueImpact",
            defaults::PROPERTY_VALUE_IMPACT,
        ),
        sustainability_options: list_field(
            fields,
            "sustainabilityOptions",
            defaults::sustainability_options,
        ),
        confidence: confidence_field(fields),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn list_field(
    fields: &Map<String, Value>,
    key: &str,
    default: fn() -> Vec<String>,
) -> Vec<String> {
    match fields.get(key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => default(),
    }
}

fn confidence_field(fields: &Map<String, Value>) -> f64 {
    match fields.get("confidence").and_then(Value::as_f64) {
        Some(c) if c != 0.0 => c,
        _ => defaults::CONFIDENCE,
    }
}
