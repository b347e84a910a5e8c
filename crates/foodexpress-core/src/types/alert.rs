//! Emergency alert payload model.
//!
//! An [`AlertPayload`] is created by the UI collaborator at send time and
//! immutable thereafter. Ids are UUIDv7 so that insertion order and
//! id order coincide in the pending queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Incident kind that forces [`Urgency::Critical`].
pub const IMMEDIATE_DANGER: &str = "immediate-danger";

/// One reported incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Incident kind (e.g. `"immediate-danger"`, `"harassment"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description.
    pub description: String,
}

impl Incident {
    /// Create a new incident.
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Alert urgency. Serialized as `"HIGH"` / `"CRITICAL"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    /// Standard urgency.
    High,
    /// At least one incident reports immediate danger.
    Critical,
}

impl Urgency {
    /// Derive urgency from a set of incidents: `Critical` iff any incident
    /// has kind [`IMMEDIATE_DANGER`], otherwise `High`.
    pub fn for_incidents(incidents: &[Incident]) -> Self {
        if incidents.iter().any(|i| i.kind == IMMEDIATE_DANGER) {
            Self::Critical
        } else {
            Self::High
        }
    }

    /// String form matching the wire encoding.
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// A geolocation reading captured by the UI collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReading {
    pub latitude: f64,
    pub longitude: f64,
    /// Reading accuracy in meters.
    pub accuracy: f64,
    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,
}

/// Location attached to an alert: a reading, or an explicit not-shared
/// marker. Serializes as the reading object or JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<LocationReading>", into = "Option<LocationReading>")]
pub enum LocationShare {
    /// The user chose to share their location.
    Shared(LocationReading),
    /// The user declined to share their location.
    NotShared,
}

impl LocationShare {
    /// Whether a reading is attached.
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

impl From<Option<LocationReading>> for LocationShare {
    fn from(value: Option<LocationReading>) -> Self {
        match value {
            Some(reading) => Self::Shared(reading),
            None => Self::NotShared,
        }
    }
}

impl From<LocationShare> for Option<LocationReading> {
    fn from(value: LocationShare) -> Self {
        match value {
            LocationShare::Shared(reading) => Some(reading),
            LocationShare::NotShared => None,
        }
    }
}

/// A trusted contact selected to receive the alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// The emergency alert payload delivered to the server.
///
/// Invariant: `urgency` is [`Urgency::Critical`] iff any incident has kind
/// [`IMMEDIATE_DANGER`]. [`AlertPayload::new`] derives it; payloads coming
/// over the boundary channel are trusted to carry it already.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    /// Unique, time-ordered alert id.
    pub id: Uuid,
    /// When the alert was composed.
    pub timestamp: DateTime<Utc>,
    /// Reported incidents, in selection order.
    pub incidents: Vec<Incident>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Location reading or explicit not-shared marker.
    pub location: LocationShare,
    /// Selected trusted contacts, in selection order.
    pub contacts: Vec<Contact>,
    /// Derived urgency.
    pub urgency: Urgency,
}

impl AlertPayload {
    /// Create a new alert, deriving urgency from the incidents.
    pub fn new(
        incidents: Vec<Incident>,
        notes: Option<String>,
        location: LocationShare,
        contacts: Vec<Contact>,
    ) -> Self {
        let urgency = Urgency::for_incidents(&incidents);
        Self {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            incidents,
            notes,
            location,
            contacts,
            urgency,
        }
    }

    /// Whether this alert reports immediate danger.
    pub fn is_critical(&self) -> bool {
        self.urgency == Urgency::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> Contact {
        Contact {
            name: "Maria".to_string(),
            phone: "+55 11 99999-0000".to_string(),
        }
    }

    #[test]
    fn test_urgency_critical_for_immediate_danger() {
        let incidents = vec![Incident::new(IMMEDIATE_DANGER, "Perigo imediato", "")];
        assert_eq!(Urgency::for_incidents(&incidents), Urgency::Critical);
    }

    #[test]
    fn test_urgency_high_otherwise() {
        let incidents = vec![Incident::new("harassment", "Assédio", "")];
        assert_eq!(Urgency::for_incidents(&incidents), Urgency::High);
    }

    #[test]
    fn test_new_derives_urgency() {
        let alert = AlertPayload::new(
            vec![
                Incident::new("harassment", "Assédio", ""),
                Incident::new(IMMEDIATE_DANGER, "Perigo imediato", ""),
            ],
            None,
            LocationShare::NotShared,
            vec![contact()],
        );
        assert!(alert.is_critical());
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let a = AlertPayload::new(vec![], None, LocationShare::NotShared, vec![]);
        let b = AlertPayload::new(vec![], None, LocationShare::NotShared, vec![]);
        assert!(a.id < b.id);
    }

    #[test]
    fn test_location_serializes_as_null_when_not_shared() {
        let alert = AlertPayload::new(
            vec![Incident::new("harassment", "Assédio", "")],
            Some("na saída do trabalho".to_string()),
            LocationShare::NotShared,
            vec![contact()],
        );
        let json = serde_json::to_value(&alert).unwrap();
        assert!(json["location"].is_null());
        assert_eq!(json["urgency"], "HIGH");
        assert_eq!(json["incidents"][0]["type"], "harassment");
    }

    #[test]
    fn test_roundtrip_with_location() {
        let alert = AlertPayload::new(
            vec![Incident::new(IMMEDIATE_DANGER, "Perigo imediato", "")],
            None,
            LocationShare::Shared(LocationReading {
                latitude: -23.55,
                longitude: -46.63,
                accuracy: 12.0,
                timestamp: Utc::now(),
            }),
            vec![contact()],
        );
        let json = serde_json::to_string(&alert).unwrap();
        let back: AlertPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alert);
        assert!(back.location.is_shared());
    }
}
