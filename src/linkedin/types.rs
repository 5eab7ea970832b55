// src/linkedin/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use super::scoring::StrengthFormula;

/// LinkedIn relationship distance as shown on a search card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionDegree {
    First,
    Second,
    Third,
    ThirdPlus,
    Other(String),
}

impl ConnectionDegree {
    /// Normalise badge text such as "2nd degree connection" or "• 3rd+".
    ///
    /// Only whole tokens count, so "21st Century" stays unknown.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let degree = text
            .split(|c: char| !(c.is_alphanumeric() || c == '+'))
            .find_map(|token| match token {
                "1st" => Some(Self::First),
                "2nd" => Some(Self::Second),
                "3rd+" => Some(Self::ThirdPlus),
                "3rd" => Some(Self::Third),
                _ => None,
            });

        degree.unwrap_or_else(|| Self::Other(text.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
            Self::ThirdPlus => "3rd+",
            Self::Other(label) => label,
        }
    }

    pub fn can_message(&self) -> bool {
        matches!(self, Self::First | Self::Second)
    }

    pub fn can_connect(&self) -> bool {
        matches!(self, Self::Second | Self::Third)
    }
}

impl fmt::Display for ConnectionDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ConnectionDegree {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ConnectionDegree> for String {
    fn from(value: ConnectionDegree) -> Self {
        value.as_str().to_string()
    }
}

/// Raw fields pulled out of one search card, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeCard {
    pub name: String,
    pub title_company: String,
    pub location: String,
    pub profile_url: Option<String>,
    pub mutual_connections: u32,
    pub connection_degree: ConnectionDegree,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub title_company: String,
    pub location: String,
    pub profile_url: Option<String>,
    pub mutual_connections: u32,
    pub connection_degree: ConnectionDegree,
    pub connection_strength: u32,
    pub can_message: bool,
    pub can_connect: bool,
    pub is_verified_account_manager: bool,
}

impl Employee {
    /// Score a card and derive the capability flags from its degree and title.
    pub fn from_card(card: EmployeeCard, formula: &StrengthFormula) -> Self {
        let connection_strength = formula.score(&card.connection_degree, card.mutual_connections);
        let title = card.title_company.to_lowercase();

        Self {
            can_message: card.connection_degree.can_message(),
            can_connect: card.connection_degree.can_connect(),
            is_verified_account_manager: title.contains("manager") || title.contains("director"),
            connection_strength,
            name: card.name,
            title_company: card.title_company,
            location: card.location,
            profile_url: card.profile_url,
            mutual_connections: card.mutual_connections,
            connection_degree: card.connection_degree,
        }
    }
}

/// Static advisory block returned next to scrape results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_search_company_employees: bool,
    pub can_find_mutual_connections: bool,
    pub can_get_connection_degrees: bool,
    pub can_prioritize_by_strength: bool,
    pub can_identify_messaging_capability: bool,
    pub can_identify_connection_capability: bool,
    pub limitations: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            can_search_company_employees: true,
            can_find_mutual_connections: true,
            can_get_connection_degrees: true,
            can_prioritize_by_strength: true,
            can_identify_messaging_capability: true,
            can_identify_connection_capability: true,
            limitations: vec![
                "LinkedIn actively blocks automated scraping".to_string(),
                "Rate limiting prevents large-scale operations".to_string(),
                "Full profile access requires being connected".to_string(),
                "Cannot actually send messages/connections via scraping".to_string(),
                "May violate LinkedIn Terms of Service".to_string(),
                "Session cookies expire regularly".to_string(),
            ],
            recommendations: vec![
                "Use for discovery and prioritization only".to_string(),
                "Redirect users to LinkedIn for actual connections".to_string(),
                "Implement proper rate limiting".to_string(),
                "Consider LinkedIn official APIs for production".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub company: String,
    pub total_found: usize,
    pub employees: Vec<Employee>,
    pub capabilities: Capabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResults {
    pub fn new(company: String, employees: Vec<Employee>) -> Self {
        Self {
            company,
            total_found: employees.len(),
            employees,
            capabilities: Capabilities::default(),
            error: None,
        }
    }

    /// Empty result set carrying the failure message.
    pub fn failed(company: String, error: String) -> Self {
        Self {
            company,
            total_found: 0,
            employees: Vec::new(),
            capabilities: Capabilities::default(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentPosition {
    pub title: Option<String>,
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_parse() {
        assert_eq!(ConnectionDegree::parse("1st"), ConnectionDegree::First);
        assert_eq!(
            ConnectionDegree::parse("2nd degree connection"),
            ConnectionDegree::Second
        );
        assert_eq!(ConnectionDegree::parse(" 3rd "), ConnectionDegree::Third);
        assert_eq!(ConnectionDegree::parse("• 3rd+"), ConnectionDegree::ThirdPlus);
        assert_eq!(
            ConnectionDegree::parse("4th"),
            ConnectionDegree::Other("4th".to_string())
        );
    }

    #[test]
    fn test_degree_parse_ignores_larger_ordinals() {
        assert_eq!(
            ConnectionDegree::parse("21st Century Fox"),
            ConnectionDegree::Other("21st Century Fox".to_string())
        );
        assert_eq!(
            ConnectionDegree::parse("31st"),
            ConnectionDegree::Other("31st".to_string())
        );
        assert_eq!(
            ConnectionDegree::parse("• 1st degree connection"),
            ConnectionDegree::First
        );
        assert!(!ConnectionDegree::parse("102nd").is_known());
        assert!(!ConnectionDegree::parse("31st").can_message());
    }

    #[test]
    fn test_degree_capabilities() {
        assert!(ConnectionDegree::First.can_message());
        assert!(!ConnectionDegree::First.can_connect());
        assert!(ConnectionDegree::Second.can_message());
        assert!(ConnectionDegree::Second.can_connect());
        assert!(!ConnectionDegree::Third.can_message());
        assert!(ConnectionDegree::Third.can_connect());
        assert!(!ConnectionDegree::ThirdPlus.can_message());
        assert!(!ConnectionDegree::ThirdPlus.can_connect());
    }

    #[test]
    fn test_degree_serializes_as_label() {
        let json = serde_json::to_string(&ConnectionDegree::ThirdPlus).unwrap();
        assert_eq!(json, "\"3rd+\"");

        let degree: ConnectionDegree = serde_json::from_str("\"2nd\"").unwrap();
        assert_eq!(degree, ConnectionDegree::Second);
    }

    #[test]
    fn test_employee_from_card_flags_managers() {
        let card = EmployeeCard {
            name: "Ada Lovelace".to_string(),
            title_company: "Engineering DIRECTOR at Acme".to_string(),
            location: "London".to_string(),
            profile_url: None,
            mutual_connections: 4,
            connection_degree: ConnectionDegree::Second,
        };

        let employee = Employee::from_card(card, &StrengthFormula::COMPANY_FACET);
        assert!(employee.is_verified_account_manager);
        assert_eq!(employee.connection_strength, 70);
        assert!(employee.can_message);
        assert!(employee.can_connect);
    }

    #[test]
    fn test_capabilities_advisory() {
        let capabilities = Capabilities::default();
        assert!(capabilities.can_prioritize_by_strength);
        assert_eq!(capabilities.limitations.len(), 6);
        assert_eq!(capabilities.recommendations.len(), 4);
    }
}
