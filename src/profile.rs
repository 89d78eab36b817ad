//! The traveller profile shared read-only with every agent call.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Snapshot of user attributes for one session.
///
/// Built once and handed around as `Arc<ProfileContext>`; nothing mutates it
/// after construction, so concurrent sessions may share one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileContext {
    pub name: String,
    pub age: u32,
    #[serde(alias = "departure_city")]
    pub preferred_city: String,
    pub budget: f64,
    #[serde(default)]
    pub travel_history: Vec<String>,
}

impl Default for ProfileContext {
    fn default() -> Self {
        Self {
            name: "Mark Willson".to_string(),
            age: 45,
            preferred_city: "Tokyo".to_string(),
            budget: 180.4,
            travel_history: ["China", "UAE", "Iran", "India"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ProfileContext {
    /// Render the profile as a block the main agent reads with its instructions.
    pub fn to_prompt_block(&self) -> String {
        let mut out = String::from("Traveller profile:\n");
        let _ = writeln!(out, "- Name: {}", self.name);
        let _ = writeln!(out, "- Age: {}", self.age);
        let _ = writeln!(out, "- Departure city: {}", self.preferred_city);
        let _ = writeln!(out, "- Budget: ${:.2}", self.budget);
        if self.travel_history.is_empty() {
            out.push_str("- Travel history: none");
        } else {
            let _ = write!(out, "- Travel history: {}", self.travel_history.join(", "));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_sample_traveller() {
        let profile = ProfileContext::default();
        assert_eq!(profile.name, "Mark Willson");
        assert_eq!(profile.preferred_city, "Tokyo");
        assert_eq!(profile.travel_history.len(), 4);
    }

    #[test]
    fn prompt_block_lists_every_attribute() {
        let block = ProfileContext::default().to_prompt_block();
        assert!(block.contains("Name: Mark Willson"));
        assert!(block.contains("Age: 45"));
        assert!(block.contains("Departure city: Tokyo"));
        assert!(block.contains("Budget: $180.40"));
        assert!(block.contains("China, UAE, Iran, India"));
    }

    #[test]
    fn empty_history_is_spelled_out() {
        let profile = ProfileContext {
            travel_history: Vec::new(),
            ..ProfileContext::default()
        };
        assert!(profile.to_prompt_block().ends_with("Travel history: none"));
    }

    #[test]
    fn departure_city_alias_is_accepted() {
        let profile: ProfileContext = toml::from_str(
            r#"
            name = "Ana"
            age = 31
            departure_city = "Lisbon"
            budget = 900.0
            "#,
        )
        .unwrap();
        assert_eq!(profile.preferred_city, "Lisbon");
        assert!(profile.travel_history.is_empty());
    }
}
