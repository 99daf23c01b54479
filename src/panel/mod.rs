//! List-Resource Panels
//!
//! One generic view-model, [`ListPanel`], bound to a collection through the
//! [`Resource`] trait and instantiated once per dashboard panel:
//!
//! | Panel | Record | Status field | Remove |
//! |---|---|---|---|
//! | Gestão de Prioridades | [`Patient`] | `priority` | yes |
//! | Agendamento de Transporte | [`TransportRequest`] | `status` | no |
//! | Rastreamento de Pacientes | [`Tracking`] | `status` | no |
//! | Registro de Incidentes | [`Incident`] | – | yes |
//!
//! The panel never patches its list locally. Every successful mutation is
//! followed by exactly one `list` call, so the items are always the last
//! server response.
//!
//! [`Patient`]: crate::model::Patient
//! [`TransportRequest`]: crate::model::TransportRequest
//! [`Tracking`]: crate::model::Tracking
//! [`Incident`]: crate::model::Incident

mod resources;

pub use resources::{IncidentDraft, PatientDraft, TrackingDraft, TransportDraft};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::client::{ClientError, Collection, ResourceClient};
use crate::model::{StatusEnum, UnknownStatus};

/// Input collected by a panel's add form
pub trait Draft: Default + Clone + PartialEq + std::fmt::Debug + Serialize {
    /// True when every required text field has non-whitespace content
    fn is_ready(&self) -> bool;
}

/// Binds a record type to its collection and display schema
pub trait Resource: Clone + DeserializeOwned + 'static {
    const COLLECTION: Collection;

    /// Lifecycle enum used by filters
    type Status: StatusEnum;

    /// Add-form input
    type Draft: Draft;

    /// Server-assigned identifier
    fn id(&self) -> &str;

    /// Current lifecycle value, `None` for records without one
    fn status(&self) -> Option<Self::Status>;

    /// Label/value pairs rendered for one item
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// Resources whose status can be changed with a single-field PATCH
pub trait Updatable: Resource {
    /// JSON field carrying the status in the PATCH body
    const STATUS_FIELD: &'static str;
}

/// Resources that can be deleted by id
pub trait Removable: Resource {}

/// Client-side status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<S> {
    All,
    Only(S),
}

impl<S: StatusEnum> Filter<S> {
    /// Label of the "no filter" choice
    pub const ALL_LABEL: &'static str = "Todos";

    pub fn matches(&self, status: Option<S>) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => status == Some(*wanted),
        }
    }

    /// Every choice offered to the user, `All` first
    pub fn choices() -> Vec<Filter<S>> {
        std::iter::once(Filter::All)
            .chain(S::ALL.iter().copied().map(Filter::Only))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => Self::ALL_LABEL,
            Filter::Only(s) => s.label(),
        }
    }
}

impl<S> Default for Filter<S> {
    fn default() -> Self {
        Filter::All
    }
}

impl<S: StatusEnum> fmt::Display for Filter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<S: StatusEnum> FromStr for Filter<S> {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        trimmed.parse().map(Filter::Only)
    }
}

/// Outcome of a panel mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Nothing was sent (blank required field)
    Skipped,
    /// The API accepted the change and the list was reloaded
    Applied,
    /// The API call failed; the list is unchanged
    Failed(ClientError),
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

/// View-model for one collection panel
#[derive(Debug, Clone)]
pub struct ListPanel<R: Resource> {
    items: Vec<R>,
    filter: Filter<R::Status>,
    /// Add-form input, cleared after a successful add
    pub draft: R::Draft,
}

impl<R: Resource> Default for ListPanel<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ListPanel<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filter: Filter::All,
            draft: R::Draft::default(),
        }
    }

    /// Everything the last fetch returned
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn filter(&self) -> Filter<R::Status> {
        self.filter
    }

    /// Items passing the current filter, in server order
    pub fn visible(&self) -> Vec<&R> {
        self.items
            .iter()
            .filter(|item| self.filter.matches(item.status()))
            .collect()
    }

    /// Change the filter. Pure, no request is issued.
    pub fn apply_filter(&mut self, filter: Filter<R::Status>) {
        self.filter = filter;
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Adopt the items fetched by a copy of this panel that ran a request.
    /// Filter and draft stay as they are here, since they may have been
    /// edited while the request was in flight.
    pub fn take_items_from(&mut self, settled: ListPanel<R>) {
        self.items = settled.items;
    }

    /// Clear the draft after an applied add of `submitted`. A draft edited
    /// since submission is kept.
    pub fn settle_add(&mut self, submitted: &R::Draft, outcome: &Mutation) {
        if outcome.is_applied() && self.draft == *submitted {
            self.draft = R::Draft::default();
        }
    }

    /// Fetch the collection. On failure the panel shows nothing.
    pub async fn load<C>(&mut self, client: &C) -> Result<(), ClientError>
    where
        C: ResourceClient + ?Sized,
    {
        match client.list(R::COLLECTION).await {
            Ok(payload) => {
                self.items = decode_items(R::COLLECTION, payload);
                tracing::debug!(collection = %R::COLLECTION, count = self.items.len(), "Loaded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(collection = %R::COLLECTION, error = %e, "Failed to fetch collection");
                self.items.clear();
                Err(e)
            }
        }
    }

    /// Submit the draft. Blank required fields skip the request entirely.
    pub async fn add<C>(&mut self, client: &C) -> Mutation
    where
        C: ResourceClient + ?Sized,
    {
        if !self.draft.is_ready() {
            return Mutation::Skipped;
        }

        let payload = match serde_json::to_value(&self.draft) {
            Ok(payload) => payload,
            Err(e) => return Mutation::Failed(e.into()),
        };

        match client.create(R::COLLECTION, &payload).await {
            Ok(_) => {
                tracing::info!(collection = %R::COLLECTION, "Record created");
                self.draft = R::Draft::default();
                self.refresh(client).await
            }
            Err(e) => self.failed("create", None, e),
        }
    }

    /// Replace the record's status (priority for patients)
    pub async fn set_status<C>(&mut self, client: &C, id: &str, status: R::Status) -> Mutation
    where
        R: Updatable,
        C: ResourceClient + ?Sized,
    {
        let mut patch = serde_json::Map::new();
        let value = match serde_json::to_value(status) {
            Ok(value) => value,
            Err(e) => return Mutation::Failed(e.into()),
        };
        patch.insert(R::STATUS_FIELD.to_string(), value);

        match client.update(R::COLLECTION, id, &Value::Object(patch)).await {
            Ok(()) => {
                tracing::info!(collection = %R::COLLECTION, id, status = %status, "Status updated");
                self.refresh(client).await
            }
            Err(e) => self.failed("update", Some(id), e),
        }
    }

    /// Delete a record by id
    pub async fn remove<C>(&mut self, client: &C, id: &str) -> Mutation
    where
        R: Removable,
        C: ResourceClient + ?Sized,
    {
        match client.remove(R::COLLECTION, id).await {
            Ok(()) => {
                tracing::info!(collection = %R::COLLECTION, id, "Record removed");
                self.refresh(client).await
            }
            Err(e) => self.failed("remove", Some(id), e),
        }
    }

    async fn refresh<C>(&mut self, client: &C) -> Mutation
    where
        C: ResourceClient + ?Sized,
    {
        // The mutation itself succeeded; a failed reload only empties the view.
        let _ = self.load(client).await;
        Mutation::Applied
    }

    fn failed(&self, op: &'static str, id: Option<&str>, e: ClientError) -> Mutation {
        tracing::warn!(
            collection = %R::COLLECTION,
            op,
            id = id.unwrap_or("-"),
            error = %e,
            "Mutation failed"
        );
        Mutation::Failed(e)
    }
}

/// Decode a list payload, degrading instead of failing
fn decode_items<R: Resource>(collection: Collection, payload: Value) -> Vec<R> {
    let Value::Array(values) = payload else {
        tracing::warn!(%collection, "List response is not an array; showing nothing");
        return Vec::new();
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(%collection, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Incident, Patient, Priority, RequestStatus, Tracking, TrackingStatus, TransportRequest,
    };
    use crate::testing::{Call, MockApi};
    use serde_json::json;

    fn seeded_requests() -> MockApi {
        let api = MockApi::new();
        api.seed(
            Collection::Requests,
            vec![
                json!({"_id": "r1", "patient": "Ana", "status": "Pendente"}),
                json!({"_id": "r2", "patient": "Bruno", "status": "Aceita"}),
                json!({"_id": "r3", "patient": "Carla", "status": "Recusada"}),
            ],
        );
        api
    }

    #[tokio::test]
    async fn test_load_populates_items() {
        let api = seeded_requests();
        let mut panel = ListPanel::<TransportRequest>::new();

        panel.load(&api).await.unwrap();

        assert_eq!(panel.items().len(), 3);
        assert_eq!(panel.items()[0].patient, "Ana");
        assert_eq!(api.calls(), vec![Call::List(Collection::Requests)]);
    }

    #[tokio::test]
    async fn test_filter_pending_renders_one_item() {
        let api = seeded_requests();
        let mut panel = ListPanel::<TransportRequest>::new();
        panel.load(&api).await.unwrap();

        panel.apply_filter("Pendente".parse().unwrap());
        let visible = panel.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "r1");

        panel.apply_filter(Filter::All);
        assert_eq!(panel.visible().len(), 3);

        // Filtering never touches the network
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_matches_exactly_for_every_choice() {
        let api = seeded_requests();
        let mut panel = ListPanel::<TransportRequest>::new();
        panel.load(&api).await.unwrap();

        for filter in Filter::<RequestStatus>::choices() {
            panel.apply_filter(filter);
            let expected: Vec<_> = panel
                .items()
                .iter()
                .filter(|r| filter == Filter::All || Filter::Only(r.status) == filter)
                .map(|r| r.id.clone())
                .collect();
            let visible: Vec<_> = panel.visible().iter().map(|r| r.id.clone()).collect();
            assert_eq!(visible, expected, "filter {}", filter);
        }
    }

    #[tokio::test]
    async fn test_add_refetches_exactly_once() {
        let api = MockApi::new();
        let mut panel = ListPanel::<Patient>::new();
        panel.load(&api).await.unwrap();

        panel.draft.name = "Maria".to_string();
        panel.draft.priority = Priority::High;
        let outcome = panel.add(&api).await;

        assert_eq!(outcome, Mutation::Applied);
        assert_eq!(
            api.calls(),
            vec![
                Call::List(Collection::Patients),
                Call::Create(
                    Collection::Patients,
                    json!({"name": "Maria", "priority": "Alta"})
                ),
                Call::List(Collection::Patients),
            ]
        );
        assert_eq!(panel.items().len(), 1);
        assert_eq!(panel.items()[0].priority, Priority::High);
        assert_eq!(panel.draft.name, "");
        assert_eq!(panel.draft.priority, Priority::Low);
    }

    #[tokio::test]
    async fn test_add_blank_is_skipped_without_requests() {
        let api = MockApi::new();
        let mut panel = ListPanel::<Tracking>::new();

        for blank in ["", "   ", "\t\n"] {
            panel.draft.name = blank.to_string();
            assert_eq!(panel.add(&api).await, Mutation::Skipped);
        }

        let mut incidents = ListPanel::<Incident>::new();
        incidents.draft.description = "Queda no corredor".to_string();
        incidents.draft.registered_by = " ".to_string();
        assert_eq!(incidents.add(&api).await, Mutation::Skipped);

        assert!(api.calls().is_empty());
        assert!(panel.items().is_empty());
    }

    #[tokio::test]
    async fn test_set_status_sends_single_field() {
        let api = MockApi::new();
        api.seed(
            Collection::Trackings,
            vec![json!({"_id": "t1", "name": "Ana", "status": "Aguardando transporte"})],
        );
        let mut panel = ListPanel::<Tracking>::new();
        panel.load(&api).await.unwrap();

        let outcome = panel.set_status(&api, "t1", TrackingStatus::Arrived).await;

        assert!(outcome.is_applied());
        assert_eq!(
            api.calls()[1],
            Call::Update(
                Collection::Trackings,
                "t1".to_string(),
                json!({"status": "Chegou ao destino"})
            )
        );
        assert_eq!(api.calls().len(), 3);
        assert_eq!(panel.find("t1").unwrap().status, TrackingStatus::Arrived);
    }

    #[tokio::test]
    async fn test_set_priority_uses_priority_field() {
        let api = MockApi::new();
        api.seed(
            Collection::Patients,
            vec![json!({"_id": "p1", "name": "Ana", "priority": "Baixa"})],
        );
        let mut panel = ListPanel::<Patient>::new();
        panel.load(&api).await.unwrap();

        panel.set_status(&api, "p1", Priority::Medium).await;

        assert_eq!(
            api.calls()[1],
            Call::Update(
                Collection::Patients,
                "p1".to_string(),
                json!({"priority": "Média"})
            )
        );
    }

    #[tokio::test]
    async fn test_remove_incident_is_absent_after_refresh() {
        let api = MockApi::new();
        api.seed(
            Collection::Incidents,
            vec![
                json!({"_id": "i1", "description": "Queda", "registeredBy": "Ana"}),
                json!({"_id": "i2", "description": "Falta de maca", "registeredBy": "Bruno"}),
            ],
        );
        let mut panel = ListPanel::<Incident>::new();
        panel.load(&api).await.unwrap();

        assert!(panel.remove(&api, "i1").await.is_applied());

        assert!(panel.find("i1").is_none());
        assert_eq!(panel.items().len(), 1);
        assert_eq!(
            api.calls(),
            vec![
                Call::List(Collection::Incidents),
                Call::Remove(Collection::Incidents, "i1".to_string()),
                Call::List(Collection::Incidents),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_list_unchanged() {
        let api = MockApi::new();
        api.seed(
            Collection::Patients,
            vec![json!({"_id": "p1", "name": "Ana", "priority": "Alta"})],
        );
        let mut panel = ListPanel::<Patient>::new();
        panel.load(&api).await.unwrap();

        api.fail_next(ClientError::Status { status: 500, message: None });
        let outcome = panel.remove(&api, "p1").await;

        assert!(matches!(outcome, Mutation::Failed(ClientError::Status { status: 500, .. })));
        assert_eq!(panel.items().len(), 1);
        // No refetch after a failure
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_add_keeps_draft() {
        let api = MockApi::new();
        let mut panel = ListPanel::<TransportRequest>::new();
        panel.draft.patient = "Ana".to_string();

        api.fail_next(ClientError::Network("offline".to_string()));
        assert!(matches!(panel.add(&api).await, Mutation::Failed(_)));
        assert_eq!(panel.draft.patient, "Ana");
    }

    #[tokio::test]
    async fn test_applied_mutation_with_failed_reload_empties_list() {
        let api = MockApi::new();
        api.seed(
            Collection::Patients,
            vec![
                json!({"_id": "p1", "name": "Ana", "priority": "Alta"}),
                json!({"_id": "p2", "name": "Bruno", "priority": "Baixa"}),
            ],
        );
        let mut panel = ListPanel::<Patient>::new();
        panel.load(&api).await.unwrap();

        api.fail_next_list(ClientError::Network("offline".to_string()));
        let outcome = panel.remove(&api, "p1").await;

        assert_eq!(outcome, Mutation::Applied);
        assert!(panel.items().is_empty());
        assert_eq!(
            api.calls(),
            vec![
                Call::List(Collection::Patients),
                Call::Remove(Collection::Patients, "p1".to_string()),
                Call::List(Collection::Patients),
            ]
        );
    }

    #[tokio::test]
    async fn test_take_items_keeps_live_filter_and_draft() {
        let api = seeded_requests();
        let mut live = ListPanel::<TransportRequest>::new();

        // Request runs on a copy while the user keeps editing the live panel
        let mut working = live.clone();
        live.draft.patient = "Queda".to_string();
        live.apply_filter("Pendente".parse().unwrap());
        working.load(&api).await.unwrap();

        live.take_items_from(working);

        assert_eq!(live.items().len(), 3);
        assert_eq!(live.draft.patient, "Queda");
        assert_eq!(live.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_settle_add_clears_only_the_submitted_draft() {
        let api = MockApi::new();
        let mut live = ListPanel::<Incident>::new();
        live.draft.description = "Queda".to_string();
        live.draft.registered_by = "Ana".to_string();

        let mut working = live.clone();
        let submitted = working.draft.clone();
        let outcome = working.add(&api).await;
        live.take_items_from(working);
        live.settle_add(&submitted, &outcome);

        assert_eq!(live.items().len(), 1);
        assert_eq!(live.draft, IncidentDraft::default());

        // Edited while the add was in flight: keep the new text
        live.draft.description = "Vazamento".to_string();
        live.draft.registered_by = "Ana".to_string();
        let mut working = live.clone();
        let submitted = working.draft.clone();
        live.draft.description = "Vazamento no 2º andar".to_string();
        let outcome = working.add(&api).await;
        live.take_items_from(working);
        live.settle_add(&submitted, &outcome);

        assert_eq!(live.items().len(), 2);
        assert_eq!(live.draft.description, "Vazamento no 2º andar");

        // Failed add leaves the draft alone
        let submitted = live.draft.clone();
        live.settle_add(&submitted, &Mutation::Failed(ClientError::Network("offline".to_string())));
        assert_eq!(live.draft.description, "Vazamento no 2º andar");
    }

    #[tokio::test]
    async fn test_failed_load_shows_nothing() {
        let api = seeded_requests();
        let mut panel = ListPanel::<TransportRequest>::new();
        panel.load(&api).await.unwrap();

        api.fail_next(ClientError::Network("offline".to_string()));
        assert!(panel.load(&api).await.is_err());
        assert!(panel.items().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_payload_is_empty() {
        let api = MockApi::new();
        api.respond_list_with(json!({"error": "unexpected"}));
        let mut panel = ListPanel::<Tracking>::new();

        assert!(panel.load(&api).await.is_ok());
        assert!(panel.items().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_elements_are_skipped() {
        let api = MockApi::new();
        api.seed(
            Collection::Trackings,
            vec![
                json!({"_id": "t1", "name": "Ana", "status": "Em transporte"}),
                json!({"_id": "t2", "name": "Bruno", "status": "Teleportado"}),
                json!("not a record"),
            ],
        );
        let mut panel = ListPanel::<Tracking>::new();

        panel.load(&api).await.unwrap();
        assert_eq!(panel.items().len(), 1);
        assert_eq!(panel.items()[0].id, "t1");
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("Todos".parse::<Filter<RequestStatus>>(), Ok(Filter::All));
        assert_eq!("all".parse::<Filter<RequestStatus>>(), Ok(Filter::All));
        assert_eq!(
            "recusada".parse::<Filter<RequestStatus>>(),
            Ok(Filter::Only(RequestStatus::Rejected))
        );
        assert!("nope".parse::<Filter<RequestStatus>>().is_err());
        assert_eq!(Filter::<RequestStatus>::choices().len(), 4);
        assert_eq!(Filter::Only(RequestStatus::Accepted).to_string(), "Aceita");
    }
}
