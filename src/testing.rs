//! In-memory API double shared by the unit tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::client::{
    AuthClient, ClientError, Collection, Credentials, Registration, ResourceClient,
};
use crate::model::User;

/// One request observed by [`MockApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(Collection),
    Create(Collection, Value),
    Update(Collection, String, Value),
    Remove(Collection, String),
    SignIn(Credentials),
    SignUp(Registration),
}

/// Records every call and serves collections from memory
#[derive(Default)]
pub struct MockApi {
    collections: RefCell<HashMap<Collection, Vec<Value>>>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<VecDeque<ClientError>>,
    list_failures: RefCell<VecDeque<ClientError>>,
    list_override: RefCell<Option<Value>>,
    next_id: Cell<u32>,
    sign_in: RefCell<Option<Result<User, ClientError>>>,
    sign_up: RefCell<Option<Result<(), ClientError>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: Collection, records: Vec<Value>) {
        self.collections.borrow_mut().insert(collection, records);
    }

    /// Fail the next call of any kind with `err`
    pub fn fail_next(&self, err: ClientError) {
        self.failures.borrow_mut().push_back(err);
    }

    /// Fail the next `list` call only
    pub fn fail_next_list(&self, err: ClientError) {
        self.list_failures.borrow_mut().push_back(err);
    }

    /// Answer every `list` with this payload
    pub fn respond_list_with(&self, payload: Value) {
        *self.list_override.borrow_mut() = Some(payload);
    }

    pub fn sign_in_returns(&self, result: Result<User, ClientError>) {
        *self.sign_in.borrow_mut() = Some(result);
    }

    pub fn sign_up_returns(&self, result: Result<(), ClientError>) {
        *self.sign_up.borrow_mut() = Some(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found() -> ClientError {
        ClientError::Status {
            status: 404,
            message: Some("Registro não encontrado".to_string()),
        }
    }
}

#[async_trait(?Send)]
impl ResourceClient for MockApi {
    async fn list(&self, collection: Collection) -> Result<Value, ClientError> {
        self.record(Call::List(collection))?;
        if let Some(err) = self.list_failures.borrow_mut().pop_front() {
            return Err(err);
        }
        if let Some(payload) = self.list_override.borrow().clone() {
            return Ok(payload);
        }
        let records = self
            .collections
            .borrow()
            .get(&collection)
            .cloned()
            .unwrap_or_default();
        Ok(Value::Array(records))
    }

    async fn create(&self, collection: Collection, payload: &Value) -> Result<Value, ClientError> {
        self.record(Call::Create(collection, payload.clone()))?;

        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let mut record = payload.clone();
        record["_id"] = json!(format!("id-{}", id));
        if collection == Collection::Requests && record.get("status").is_none() {
            record["status"] = json!("Pendente");
        }

        self.collections
            .borrow_mut()
            .entry(collection)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: &Value,
    ) -> Result<(), ClientError> {
        self.record(Call::Update(collection, id.to_string(), patch.clone()))?;

        let mut collections = self.collections.borrow_mut();
        let record = collections
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|r| r["_id"] == id))
            .ok_or_else(Self::not_found)?;

        if let (Some(target), Some(fields)) = (record.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), ClientError> {
        self.record(Call::Remove(collection, id.to_string()))?;

        let mut collections = self.collections.borrow_mut();
        let records = collections.entry(collection).or_default();
        let before = records.len();
        records.retain(|r| r["_id"] != id);
        if records.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthClient for MockApi {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, ClientError> {
        self.record(Call::SignIn(credentials.clone()))?;
        self.sign_in
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(ClientError::Network("no response configured".to_string())))
    }

    async fn sign_up(&self, registration: &Registration) -> Result<(), ClientError> {
        self.record(Call::SignUp(registration.clone()))?;
        self.sign_up.borrow().clone().unwrap_or(Ok(()))
    }
}
