//! Domain Records
//!
//! Transient, refetched copies of the records owned by the hospital API.
//! Identifiers travel in the `_id` field and are never generated here.
//! Status fields are closed enumerations serialized with the Portuguese
//! labels the API stores.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A closed set of lifecycle values for a record
pub trait StatusEnum:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = UnknownStatus> + Serialize + 'static
{
    /// Every value, in the order choices are offered
    const ALL: &'static [Self];

    /// Wire label, also shown to users
    fn label(&self) -> &'static str;
}

/// Returned when a string names no value of a status enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value '{0}'")]
pub struct UnknownStatus(pub String);

/// Parse a status from its wire label or its variant name.
///
/// Matching ignores case, spaces, dashes and underscores, so `"pendente"`,
/// `"Pending"` and `"awaiting-transport"` all resolve.
fn parse_status<S: StatusEnum>(input: &str) -> Result<S, UnknownStatus> {
    let wanted = normalize(input);
    S::ALL
        .iter()
        .copied()
        .find(|s| normalize(s.label()) == wanted || normalize(&format!("{:?}", s)) == wanted)
        .ok_or_else(|| UnknownStatus(input.trim().to_string()))
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================
// Status enums
// ============================================

/// Patient priority, ordered Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Baixa")]
    Low,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Alta")]
    High,
}

impl StatusEnum for Priority {
    const ALL: &'static [Self] = &[Priority::Low, Priority::Medium, Priority::High];

    fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Baixa",
            Priority::Medium => "Média",
            Priority::High => "Alta",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

/// Transport request lifecycle. Pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Aceita")]
    Accepted,
    #[serde(rename = "Recusada")]
    Rejected,
}

impl StatusEnum for RequestStatus {
    const ALL: &'static [Self] = &[
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
    ];

    fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pendente",
            RequestStatus::Accepted => "Aceita",
            RequestStatus::Rejected => "Recusada",
        }
    }
}

impl RequestStatus {
    /// Transitions offered to the user from this state
    pub fn choices(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[RequestStatus::Accepted, RequestStatus::Rejected],
            RequestStatus::Accepted | RequestStatus::Rejected => &[],
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

/// Where a patient is in the transport flow. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingStatus {
    #[serde(rename = "Aguardando transporte")]
    AwaitingTransport,
    #[serde(rename = "Em transporte")]
    InTransport,
    #[serde(rename = "Chegou ao destino")]
    Arrived,
}

impl StatusEnum for TrackingStatus {
    const ALL: &'static [Self] = &[
        TrackingStatus::AwaitingTransport,
        TrackingStatus::InTransport,
        TrackingStatus::Arrived,
    ];

    fn label(&self) -> &'static str {
        match self {
            TrackingStatus::AwaitingTransport => "Aguardando transporte",
            TrackingStatus::InTransport => "Em transporte",
            TrackingStatus::Arrived => "Chegou ao destino",
        }
    }
}

impl Default for TrackingStatus {
    fn default() -> Self {
        TrackingStatus::AwaitingTransport
    }
}

/// Status type for records without a lifecycle field. It has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NoStatus {}

impl StatusEnum for NoStatus {
    const ALL: &'static [Self] = &[];

    fn label(&self) -> &'static str {
        match *self {}
    }
}

macro_rules! status_text_impls {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownStatus;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_status(s)
                }
            }
        )*
    };
}

status_text_impls!(Priority, RequestStatus, TrackingStatus, NoStatus);

// ============================================
// Records
// ============================================

/// The signed-in identity returned by the API and cached locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// A patient in the priority queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub priority: Priority,
}

/// A request to move a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub patient: String,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Location state of a patient being moved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub status: TrackingStatus,
}

/// A logged incident. Append-only plus delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub description: String,
    pub registered_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Render a record timestamp as `DD/MM/YYYY HH:mm` in the viewer's local time
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

/// Render a record timestamp as `DD/MM/YYYY HH:mm` in `tz`
pub fn format_timestamp_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_status_wire_labels() {
        assert_eq!(
            serde_json::to_string(&Priority::Medium).unwrap(),
            "\"Média\""
        );
        let status: TrackingStatus = serde_json::from_str("\"Em transporte\"").unwrap();
        assert_eq!(status, TrackingStatus::InTransport);
        assert!(serde_json::from_str::<RequestStatus>("\"Pending\"").is_err());
    }

    #[test]
    fn test_parse_status_accepts_label_or_name() {
        assert_eq!("pendente".parse::<RequestStatus>(), Ok(RequestStatus::Pending));
        assert_eq!("Accepted".parse::<RequestStatus>(), Ok(RequestStatus::Accepted));
        assert_eq!(
            "awaiting-transport".parse::<TrackingStatus>(),
            Ok(TrackingStatus::AwaitingTransport)
        );
        assert_eq!(" MÉDIA ".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(UnknownStatus("urgent".to_string()))
        );
        assert!("anything".parse::<NoStatus>().is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert_eq!(Priority::default(), Priority::Low);
    }

    #[test]
    fn test_request_choices() {
        assert_eq!(
            RequestStatus::Pending.choices(),
            &[RequestStatus::Accepted, RequestStatus::Rejected]
        );
        assert!(RequestStatus::Accepted.choices().is_empty());
        assert!(RequestStatus::Rejected.choices().is_empty());
    }

    #[test]
    fn test_record_decoding() {
        let json = r#"{
            "_id": "665f1c",
            "patient": "Maria",
            "status": "Aceita",
            "createdAt": "2024-06-04T13:45:00Z",
            "__v": 0
        }"#;
        let request: TransportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.id, "665f1c");
        assert_eq!(request.status, RequestStatus::Accepted);
        let created_at = request.created_at.unwrap();
        assert_eq!(
            format_timestamp_in(&created_at, &Utc),
            "04/06/2024 13:45"
        );
        assert_eq!(
            format_timestamp(&created_at),
            created_at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
        );

        let incident: Incident = serde_json::from_str(
            r#"{"id": "i1", "description": "Queda", "registeredBy": "Ana"}"#,
        )
        .unwrap();
        assert_eq!(incident.registered_by, "Ana");
        assert!(incident.created_at.is_none());
    }

    #[test]
    fn test_user_round_trip_keeps_wire_names() {
        let user = User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            role: "admin".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["_id"], "u1");

        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();
        assert_eq!(format_timestamp_in(&ts, &Utc), "02/01/2024 03:04");
    }

    #[test]
    fn test_timestamp_uses_viewer_offset() {
        // Bahia runs at UTC-3; early-morning UTC lands on the previous day
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let ts: DateTime<Utc> = "2024-06-04T02:30:00Z".parse().unwrap();
        assert_eq!(format_timestamp_in(&ts, &brt), "03/06/2024 23:30");
    }
}
