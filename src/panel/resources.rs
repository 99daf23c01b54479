//! Panel configurations for the four dashboard collections.

use serde::Serialize;

use super::{Draft, Removable, Resource, Updatable};
use crate::client::Collection;
use crate::model::{
    format_timestamp, Incident, NoStatus, Patient, Priority, RequestStatus, Tracking,
    TrackingStatus, TransportRequest,
};

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

// ============================================
// Gestão de Prioridades
// ============================================

/// New patient form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientDraft {
    pub name: String,
    pub priority: Priority,
}

impl Draft for PatientDraft {
    fn is_ready(&self) -> bool {
        filled(&self.name)
    }
}

impl Resource for Patient {
    const COLLECTION: Collection = Collection::Patients;
    type Status = Priority;
    type Draft = PatientDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<Priority> {
        Some(self.priority)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Paciente", self.name.clone()),
            ("Prioridade", self.priority.to_string()),
        ]
    }
}

impl Updatable for Patient {
    const STATUS_FIELD: &'static str = "priority";
}

impl Removable for Patient {}

// ============================================
// Agendamento de Transporte
// ============================================

/// New transport request form. Requests are created pending by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransportDraft {
    pub patient: String,
}

impl Draft for TransportDraft {
    fn is_ready(&self) -> bool {
        filled(&self.patient)
    }
}

impl Resource for TransportRequest {
    const COLLECTION: Collection = Collection::Requests;
    type Status = RequestStatus;
    type Draft = TransportDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<RequestStatus> {
        Some(self.status)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Paciente", self.patient.clone()),
            ("Status", self.status.to_string()),
            ("Criado em", optional_timestamp(self.created_at.as_ref())),
        ]
    }
}

impl Updatable for TransportRequest {
    const STATUS_FIELD: &'static str = "status";
}

// ============================================
// Rastreamento de Pacientes
// ============================================

/// New tracking form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackingDraft {
    pub name: String,
    pub status: TrackingStatus,
}

impl Draft for TrackingDraft {
    fn is_ready(&self) -> bool {
        filled(&self.name)
    }
}

impl Resource for Tracking {
    const COLLECTION: Collection = Collection::Trackings;
    type Status = TrackingStatus;
    type Draft = TrackingDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<TrackingStatus> {
        Some(self.status)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Paciente", self.name.clone()),
            ("Status", self.status.to_string()),
        ]
    }
}

impl Updatable for Tracking {
    const STATUS_FIELD: &'static str = "status";
}

// ============================================
// Registro de Incidentes
// ============================================

/// New incident form. Both fields are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDraft {
    pub description: String,
    pub registered_by: String,
}

impl Draft for IncidentDraft {
    fn is_ready(&self) -> bool {
        filled(&self.description) && filled(&self.registered_by)
    }
}

impl Resource for Incident {
    const COLLECTION: Collection = Collection::Incidents;
    type Status = NoStatus;
    type Draft = IncidentDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<NoStatus> {
        None
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Descrição", self.description.clone()),
            ("Registrado por", self.registered_by.clone()),
            ("Publicado em", optional_timestamp(self.created_at.as_ref())),
        ]
    }
}

impl Removable for Incident {}

fn optional_timestamp(ts: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(format_timestamp).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_payloads() {
        let draft = IncidentDraft {
            description: "Queda".to_string(),
            registered_by: "Ana".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"description": "Queda", "registeredBy": "Ana"})
        );

        let draft = TrackingDraft {
            name: "Bruno".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"name": "Bruno", "status": "Aguardando transporte"})
        );

        let draft = TransportDraft {
            patient: "Carla".to_string(),
        };
        assert_eq!(serde_json::to_value(&draft).unwrap(), json!({"patient": "Carla"}));
    }

    #[test]
    fn test_draft_readiness() {
        assert!(!PatientDraft::default().is_ready());
        assert!(PatientDraft {
            name: " Ana ".to_string(),
            priority: Priority::High
        }
        .is_ready());
        assert!(!IncidentDraft {
            description: "Queda".to_string(),
            registered_by: String::new(),
        }
        .is_ready());
    }

    #[test]
    fn test_fields() {
        let incident = Incident {
            id: "i1".to_string(),
            description: "Queda".to_string(),
            registered_by: "Ana".to_string(),
            created_at: None,
        };
        assert_eq!(
            incident.fields(),
            vec![
                ("Descrição", "Queda".to_string()),
                ("Registrado por", "Ana".to_string()),
                ("Publicado em", "-".to_string()),
            ]
        );
        assert_eq!(incident.status(), None);

        let patient = Patient {
            id: "p1".to_string(),
            name: "Ana".to_string(),
            priority: Priority::Medium,
        };
        assert_eq!(patient.fields()[1], ("Prioridade", "Média".to_string()));
    }
}
