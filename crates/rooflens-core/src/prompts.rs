//! Prompt templates for insight generation
//!
//! Prompts are embedded at compile time from the workspace `prompts/`
//! directory so binaries stay self-contained.

/// Embedded default prompts (compiled into binary)
mod defaults {
    pub const PROPERTY_INSIGHT: &str = include_str!("../../../prompts/property_insight.md");
}

/// User prompt template for a property analysis request
const USER_TEMPLATE: &str = "Analyze this property: {address}";

/// System prompt instructing the model to emit the insight JSON shape
pub fn insight_system_prompt() -> &'static str {
    defaults::PROPERTY_INSIGHT
}

/// Render the user prompt for the given address
pub fn insight_user_prompt(address: &str) -> String {
    USER_TEMPLATE.replace("{address}", address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_renders_address() {
        let prompt = insight_user_prompt("123 Main St, Springfield");
        assert_eq!(prompt, "Analyze this property: 123 Main St, Springfield");
    }

    #[test]
    fn test_system_prompt_names_every_field() {
        let prompt = insight_system_prompt();
        for key in [
            "roofCondition",
            "estimatedAge",
            "replacementCost",
            "stormRisk",
            "maintenanceRecommendations",
            "propertyValueImpact",
            "sustainabilityOptions",
            "confidence",
        ] {
            assert!(prompt.contains(key), "system prompt missing {}", key);
        }
    }
}
