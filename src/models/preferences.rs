//! Traveller preferences captured over the conversation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::BudgetLevel;
use crate::PlannerError;

/// Typed preference set; every attribute is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetLevel>,
    /// Trip length in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    /// Travelling party (solo, couple, family, group)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
}

/// A preference value that was present but could not be accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub field: String,
    pub reason: String,
}

impl RejectedField {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl Preferences {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `update` on top of `self`. Fields present in `update` win;
    /// fields it lacks are kept, so nothing is ever removed.
    #[must_use]
    pub fn merge(self, update: Preferences) -> Preferences {
        Preferences {
            budget: update.budget.or(self.budget),
            duration: update.duration.or(self.duration),
            interests: update.interests.or(self.interests),
            season: update.season.or(self.season),
            party: update.party.or(self.party),
            constraints: update.constraints.or(self.constraints),
        }
    }

    /// Build preferences from an untyped JSON object, validating each field.
    ///
    /// Fields with an unusable value are reported in the returned list and
    /// left unset; the remaining fields are still accepted.
    pub fn from_json(value: &Value) -> Result<(Preferences, Vec<RejectedField>), PlannerError> {
        let object = value.as_object().ok_or_else(|| {
            PlannerError::validation(format!(
                "expected a JSON object of preferences, got {}",
                json_kind(value)
            ))
        })?;

        let mut prefs = Preferences::default();
        let mut rejected = Vec::new();

        for (key, raw) in object {
            if raw.is_null() {
                continue;
            }
            match key.to_lowercase().as_str() {
                "budget" => match raw.as_str().and_then(BudgetLevel::parse) {
                    Some(level) => prefs.budget = Some(level),
                    None => rejected.push(RejectedField::new(
                        "budget",
                        format!("expected low, medium or high, got {raw}"),
                    )),
                },
                "duration" => match parse_duration(raw) {
                    Some(days) => prefs.duration = Some(days),
                    None => rejected.push(RejectedField::new(
                        "duration",
                        format!("expected a positive number of days, got {raw}"),
                    )),
                },
                "interests" => match parse_string_list(raw) {
                    Some(list) if !list.is_empty() => prefs.interests = Some(list),
                    Some(_) => {}
                    None => rejected.push(RejectedField::new(
                        "interests",
                        format!("expected a list of strings, got {}", json_kind(raw)),
                    )),
                },
                "season" => match non_empty_str(raw) {
                    Some(season) => prefs.season = Some(season),
                    None => rejected.push(RejectedField::new(
                        "season",
                        format!("expected text, got {}", json_kind(raw)),
                    )),
                },
                "party" => match non_empty_str(raw) {
                    Some(party) => prefs.party = Some(party),
                    None => rejected.push(RejectedField::new(
                        "party",
                        format!("expected text, got {}", json_kind(raw)),
                    )),
                },
                "constraints" => match parse_constraints(raw) {
                    Some(constraints) => prefs.constraints = Some(constraints),
                    None => rejected.push(RejectedField::new(
                        "constraints",
                        format!("expected text, got {}", json_kind(raw)),
                    )),
                },
                other => debug!(field = other, "ignoring unknown preference field"),
            }
        }

        Ok((prefs, rejected))
    }

    /// Pretty JSON used inside prompts
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn parse_duration(raw: &Value) -> Option<u32> {
    let days = match raw {
        Value::Number(n) => {
            if let Some(int) = n.as_u64() {
                int
            } else {
                let float = n.as_f64()?;
                if float.fract() != 0.0 || float < 0.0 {
                    return None;
                }
                float as u64
            }
        }
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()?
        }
        _ => return None,
    };
    u32::try_from(days).ok().filter(|d| *d > 0)
}

fn parse_string_list(raw: &Value) -> Option<Vec<String>> {
    match raw {
        Value::String(s) => Some(
            non_empty(s)
                .map(|single| vec![single])
                .unwrap_or_default(),
        ),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(non_empty)
                .collect(),
        ),
        _ => None,
    }
}

fn parse_constraints(raw: &Value) -> Option<String> {
    match raw {
        Value::Array(_) => parse_string_list(raw)
            .filter(|list| !list.is_empty())
            .map(|list| list.join("; ")),
        _ => non_empty_str(raw),
    }
}

fn non_empty_str(raw: &Value) -> Option<String> {
    raw.as_str().and_then(non_empty)
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
