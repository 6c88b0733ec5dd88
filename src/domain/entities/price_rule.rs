use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Room scope sentinel meaning "every room".
pub const ALL_ROOMS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[default]
    Fixed,
    Percentage,
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceType::Fixed => write!(f, "fixed"),
            PriceType::Percentage => write!(f, "percentage"),
        }
    }
}

impl std::str::FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fixed" => Ok(PriceType::Fixed),
            "percentage" => Ok(PriceType::Percentage),
            _ => Err(format!("Invalid price type: {}", s)),
        }
    }
}

/// Which rooms a rule targets. Serialized as the room id or `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleScope {
    AllRooms,
    Room(String),
}

impl RuleScope {
    pub fn includes(&self, room_id: &str) -> bool {
        match self {
            RuleScope::AllRooms => true,
            RuleScope::Room(id) => id == room_id,
        }
    }
}

impl From<String> for RuleScope {
    fn from(value: String) -> Self {
        if value == ALL_ROOMS {
            RuleScope::AllRooms
        } else {
            RuleScope::Room(value)
        }
    }
}

impl From<RuleScope> for String {
    fn from(scope: RuleScope) -> Self {
        match scope {
            RuleScope::AllRooms => ALL_ROOMS.to_string(),
            RuleScope::Room(id) => id,
        }
    }
}

impl std::fmt::Display for RuleScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleScope::AllRooms => write!(f, "{}", ALL_ROOMS),
            RuleScope::Room(id) => write!(f, "{}", id),
        }
    }
}

/// Dynamic pricing rule, valid on every day of `[start_date, end_date]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRule {
    pub id: String,
    pub room_id: RuleScope,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price_type: PriceType,
    pub price_value: f64,
    pub name: String,
}

impl PriceRule {
    pub fn covers_day(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Apply this rule to a running price.
    pub fn apply(&self, price: f64) -> f64 {
        match self.price_type {
            PriceType::Fixed => self.price_value,
            PriceType::Percentage => price * (1.0 + self.price_value / 100.0),
        }
    }
}

/// DTO for creating or replacing a pricing rule
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRuleRequest {
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub price_type: PriceType,
    pub price_value: f64,
    #[serde(default)]
    pub name: String,
}

/// DTO for a price quote. Without both dates the rules are applied once to the base price.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteRequest {
    pub room_id: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default)]
    pub selected_rule_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_round_trips_through_string() {
        assert_eq!(RuleScope::from("all".to_string()), RuleScope::AllRooms);
        assert_eq!(
            RuleScope::from("7".to_string()),
            RuleScope::Room("7".to_string())
        );
        assert_eq!(String::from(RuleScope::AllRooms), "all");
    }

    #[test]
    fn test_scope_includes() {
        assert!(RuleScope::AllRooms.includes("3"));
        assert!(RuleScope::Room("3".to_string()).includes("3"));
        assert!(!RuleScope::Room("3".to_string()).includes("4"));
    }

    #[test]
    fn test_scope_serializes_as_plain_string() {
        let json = serde_json::to_value(RuleScope::AllRooms).unwrap();
        assert_eq!(json, serde_json::json!("all"));
    }
}
