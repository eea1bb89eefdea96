use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Query parameters of `GET /api/event` that map to event columns.
/// Everything else in the query string goes to `extra_params`.
pub const RESERVED_PARAMS: [&str; 4] = ["cid", "event", "email", "domain"];

/// The kinds of user action a landing page can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    EmailClick,
    LandingClick,
    Conversion,
    Unsubscribe,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::EmailClick,
        EventType::LandingClick,
        EventType::Conversion,
        EventType::Unsubscribe,
    ];

    /// Wire and storage name, e.g. `"email_click"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::EmailClick => "email_click",
            EventType::LandingClick => "landing_click",
            EventType::Conversion => "conversion",
            EventType::Unsubscribe => "unsubscribe",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::InvalidEventType(s.to_string()))
    }
}

/// A validated event ready to be written to the `events` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub campaign_id: i64,
    pub event_type: EventType,
    pub email: String,
    pub domain: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    /// Opaque side-channel payload. `None` when the ping carried no extra parameters.
    pub extra_params: Option<serde_json::Map<String, serde_json::Value>>,
}

impl NewEvent {
    /// Serialize `extra_params` for VARCHAR storage; empty maps are stored as NULL.
    pub fn extra_params_json(&self) -> Result<Option<String>, CoreError> {
        match &self.extra_params {
            Some(map) if !map.is_empty() => Ok(Some(serde_json::to_string(map)?)),
            _ => Ok(None),
        }
    }
}

/// Collect the non-reserved query parameters of an event ping.
///
/// Later duplicates overwrite earlier ones. Returns `None` when nothing is left.
pub fn collect_extra_params(
    pairs: &[(String, String)],
) -> Option<serde_json::Map<String, serde_json::Value>> {
    let mut map = serde_json::Map::new();
    for (key, value) in pairs {
        if RESERVED_PARAMS.contains(&key.as_str()) {
            continue;
        }
        map.insert(key.clone(), serde_json::Value::String(value.clone()));
    }
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn parses_every_known_event_type() {
        for t in EventType::ALL {
            assert_eq!(t.as_str().parse::<EventType>().unwrap(), t);
        }
    }

    #[test]
    fn rejects_unknown_event_type() {
        let err = "page_view".parse::<EventType>().unwrap_err();
        assert!(err.to_string().contains("page_view"));
    }

    #[test]
    fn event_type_names_are_case_sensitive() {
        assert!("Email_Click".parse::<EventType>().is_err());
    }

    #[test]
    fn extra_params_skip_reserved_keys() {
        let pairs = vec![
            pair("cid", "1"),
            pair("event", "conversion"),
            pair("email", "a@b.c"),
            pair("domain", "b.c"),
            pair("order_id", "12345"),
            pair("amount", "99.99"),
        ];
        let map = collect_extra_params(&pairs).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["order_id"], "12345");
        assert_eq!(map["amount"], "99.99");
    }

    #[test]
    fn extra_params_none_when_only_reserved() {
        let pairs = vec![pair("cid", "1"), pair("event", "email_click")];
        assert!(collect_extra_params(&pairs).is_none());
    }

    #[test]
    fn extra_params_last_duplicate_wins() {
        let pairs = vec![pair("utm", "a"), pair("utm", "b")];
        let map = collect_extra_params(&pairs).unwrap();
        assert_eq!(map["utm"], "b");
    }

    #[test]
    fn empty_extra_params_serialize_to_none() {
        let event = NewEvent {
            campaign_id: 1,
            event_type: EventType::EmailClick,
            email: "a@b.c".to_string(),
            domain: "b.c".to_string(),
            ip: None,
            user_agent: None,
            extra_params: Some(serde_json::Map::new()),
        };
        assert!(event.extra_params_json().unwrap().is_none());
    }
}
