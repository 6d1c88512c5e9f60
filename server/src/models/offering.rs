use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingKind {
    Event,
    Class,
}

impl OfferingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferingKind::Event => "event",
            OfferingKind::Class => "class",
        }
    }
}

impl fmt::Display for OfferingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(OfferingKind::Event),
            "class" => Ok(OfferingKind::Class),
            other => Err(format!("unknown offering kind '{}'", other)),
        }
    }
}

/// Where an offering takes place.
///
/// Older records store a free-form string, newer ones a structured venue.
/// Both shapes deserialize into this type at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Text(String),
    Structured(StructuredLocation),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredLocation {
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Location {
    /// Single-line rendering, skipping empty parts.
    pub fn display(&self) -> String {
        match self {
            Location::Text(text) => text.trim().to_string(),
            Location::Structured(loc) => [
                &loc.venue_name,
                &loc.address,
                &loc.city,
                &loc.state,
                &loc.zip_code,
                &loc.country,
            ]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    pub id: Uuid,
    pub kind: OfferingKind,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Location,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub tickets_visible: bool,
    pub payment_configured: bool,
}

impl Offering {
    /// An offering without an end time is over once its start time has passed.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_time.unwrap_or(self.start_time) < now
    }

    pub fn is_public(&self, kind: OfferingKind) -> bool {
        self.kind == kind && self.is_published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn offering(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Offering {
        Offering {
            id: Uuid::new_v4(),
            kind: OfferingKind::Event,
            organizer_id: Uuid::new_v4(),
            title: "Launch Party".to_string(),
            description: None,
            location: Location::Text("Main Hall".to_string()),
            start_time: start,
            end_time: end,
            is_published: true,
            tickets_visible: true,
            payment_configured: true,
        }
    }

    #[test]
    fn test_location_deserializes_both_shapes() {
        let text: Location = serde_json::from_str(r#""Warehouse 9""#).unwrap();
        assert_eq!(text, Location::Text("Warehouse 9".to_string()));

        let structured: Location =
            serde_json::from_str(r#"{"venue_name":"The Forum","city":"Austin","state":"TX"}"#)
                .unwrap();
        assert_eq!(structured.display(), "The Forum, Austin, TX");
    }

    #[test]
    fn test_structured_location_skips_blank_parts() {
        let loc = Location::Structured(StructuredLocation {
            venue_name: Some("  ".to_string()),
            city: Some("Lisbon".to_string()),
            country: Some("PT".to_string()),
            ..Default::default()
        });
        assert_eq!(loc.display(), "Lisbon, PT");
    }

    #[test]
    fn test_has_ended_uses_end_time_when_present() {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap();
        let end = start + Duration::hours(4);
        let event = offering(start, Some(end));

        assert!(!event.has_ended(start + Duration::hours(1)));
        assert!(!event.has_ended(end));
        assert!(event.has_ended(end + Duration::seconds(1)));
    }

    #[test]
    fn test_has_ended_falls_back_to_start_time() {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap();
        let event = offering(start, None);

        assert!(!event.has_ended(start));
        assert!(event.has_ended(start + Duration::minutes(1)));
    }

    #[test]
    fn test_offering_kind_round_trips_through_str() {
        assert_eq!("class".parse::<OfferingKind>().unwrap(), OfferingKind::Class);
        assert!("concert".parse::<OfferingKind>().is_err());
        assert_eq!(OfferingKind::Event.to_string(), "event");
    }
}
