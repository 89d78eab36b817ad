//! Classifier instructions and the verdict shapes each classifier returns.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Direction;

pub const INPUT_POLICY: &str = "\
You are an input guardrail agent. Your job is to decide whether the user's request is:
- asking to book travel to an illegal, unsafe or restricted destination,
- OR offensive,
- OR clearly irrelevant to travel planning.
Return:
  is_request_irrelevant_illegal: bool
  reasoning: short explanation";

pub const OUTPUT_POLICY: &str = "\
You are an output guardrail agent. Inspect the assistant's reply text and decide:
- Does it give medical or legal advice? (flag)
- OR does it confirm a booking without showing the total cost first? (flag)
Return:
  is_response_violates: bool
  reasoning: short explanation";

/// Verdict returned by the input classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAssessment {
    pub is_request_irrelevant_illegal: bool,
    #[serde(default)]
    pub reasoning: String,
}

/// Verdict returned by the output classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputAssessment {
    pub is_response_violates: bool,
    #[serde(default)]
    pub reasoning: String,
}

pub fn instructions(direction: Direction) -> &'static str {
    match direction {
        Direction::Input => INPUT_POLICY,
        Direction::Output => OUTPUT_POLICY,
    }
}

/// Reason shown when the classifier flags a message without explaining why.
pub fn default_reason(direction: Direction) -> &'static str {
    match direction {
        Direction::Input => "Illegal or irrelevant request.",
        Direction::Output => "Blocked for safety (medical/legal advice or missing cost).",
    }
}

/// JSON schema and type name requested from the classifier.
pub fn schema(direction: Direction) -> (Value, &'static str) {
    let flag = match direction {
        Direction::Input => "is_request_irrelevant_illegal",
        Direction::Output => "is_response_violates",
    };
    let schema = json!({
        "type": "object",
        "properties": {
            flag: { "type": "boolean" },
            "reasoning": { "type": "string" },
        },
        "required": [flag, "reasoning"],
        "additionalProperties": false,
    });
    let name = match direction {
        Direction::Input => "illegal_and_irrelevant",
        Direction::Output => "control_booking_criteria",
    };
    (schema, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_name_the_direction_flag() {
        let (input, _) = schema(Direction::Input);
        assert_eq!(input["required"][0], "is_request_irrelevant_illegal");
        let (output, name) = schema(Direction::Output);
        assert_eq!(output["properties"]["is_response_violates"]["type"], "boolean");
        assert_eq!(name, "control_booking_criteria");
    }

    #[test]
    fn assessments_tolerate_missing_reasoning() {
        let parsed: OutputAssessment =
            serde_json::from_str(r#"{"is_response_violates": true}"#).unwrap();
        assert!(parsed.is_response_violates);
        assert!(parsed.reasoning.is_empty());
    }
}
