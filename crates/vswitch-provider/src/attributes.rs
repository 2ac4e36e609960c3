//! Attribute-map boundary for the declarative engine.
//!
//! The engine hands over JSON objects keyed by the names in [`crate::schema`].
//! This module turns them into typed inputs for the reconciler and renders
//! records back into state maps.

use crate::error::{ErrorContext, Operation, VSwitchError};
use crate::reconciler::{DeleteOutcome, VSwitchReconciler};
use crate::record::{DesiredVSwitch, VSwitch};
use crate::schema::{Attribute, AttributeMode, AttributeType, ResourceSchema, VSWITCH_DATA_SOURCE, VSWITCH_RESOURCE};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Why an attribute map was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("attributes must be an object")]
    NotAnObject,

    #[error("unknown attribute `{0}`")]
    Unknown(String),

    #[error("attribute `{0}` is required")]
    Missing(String),

    #[error("attribute `{name}` must be {expected}")]
    WrongType { name: String, expected: &'static str },

    #[error("attribute `{name}` out of range: {value}")]
    OutOfRange { name: String, value: String },
}

/// Parse the declared `name` and `vlan` of a resource configuration.
///
/// Computed attributes may be present (engines often pass the previous state
/// along) and are ignored; unknown keys are refused.
pub fn desired_from_attributes(attrs: &Value) -> Result<DesiredVSwitch, AttributeError> {
    let object = checked_object(&VSWITCH_RESOURCE, attrs)?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| AttributeError::Missing("name".to_string()))?;
    let vlan = object
        .get("vlan")
        .and_then(Value::as_u64)
        .ok_or_else(|| AttributeError::Missing("vlan".to_string()))?;
    let vlan = u16::try_from(vlan).map_err(|_| AttributeError::OutOfRange {
        name: "vlan".to_string(),
        value: vlan.to_string(),
    })?;

    Ok(DesiredVSwitch::new(name, vlan))
}

/// The tracked id of a resource state, if it has one
pub fn vswitch_id_from_attributes(attrs: &Value) -> Result<Option<u64>, AttributeError> {
    let object = attrs.as_object().ok_or(AttributeError::NotAnObject)?;
    match object.get("vswitch_id") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| AttributeError::WrongType {
            name: "vswitch_id".to_string(),
            expected: "a non-negative integer",
        }),
    }
}

/// Render a record as a state map keyed like the schema tables
pub fn state_from_record(record: &VSwitch) -> Result<Value, serde_json::Error> {
    serde_json::to_value(record)
}

/// Parse an import id as typed by the operator
pub fn parse_import_id(id: &str) -> Result<u64, AttributeError> {
    let trimmed = id.trim();
    trimmed.parse::<u64>().map_err(|_| AttributeError::OutOfRange {
        name: "vswitch_id".to_string(),
        value: trimmed.to_string(),
    })
}

fn checked_object<'a>(schema: &ResourceSchema, attrs: &'a Value) -> Result<&'a Map<String, Value>, AttributeError> {
    let object = attrs.as_object().ok_or(AttributeError::NotAnObject)?;

    for (key, value) in object {
        let attribute = schema
            .attribute(key)
            .ok_or_else(|| AttributeError::Unknown(key.clone()))?;
        if attribute.mode.is_settable() && !value.is_null() {
            check_type(attribute, value)?;
        }
    }

    for attribute in schema.attributes.iter().filter(|a| a.mode == AttributeMode::Required) {
        if object.get(attribute.name).map_or(true, Value::is_null) {
            return Err(AttributeError::Missing(attribute.name.to_string()));
        }
    }

    Ok(object)
}

fn check_type(attribute: &Attribute, value: &Value) -> Result<(), AttributeError> {
    let (matches, expected) = match attribute.kind {
        AttributeType::Int => (value.is_u64(), "a non-negative integer"),
        AttributeType::String => (value.is_string(), "a string"),
        AttributeType::Bool => (value.is_boolean(), "a boolean"),
        AttributeType::List(_) => (value.is_array(), "a list"),
    };
    if matches {
        Ok(())
    } else {
        Err(AttributeError::WrongType {
            name: attribute.name.to_string(),
            expected,
        })
    }
}

/// The vSwitch resource and data source as the declarative engine sees them
#[derive(Debug)]
pub struct VSwitchResource {
    reconciler: VSwitchReconciler,
}

impl VSwitchResource {
    pub fn new(reconciler: VSwitchReconciler) -> Self {
        Self { reconciler }
    }

    pub fn reconciler(&self) -> &VSwitchReconciler {
        &self.reconciler
    }

    /// Create from a configuration map and return the new state map
    pub async fn create(&self, config: &Value) -> Result<Value, VSwitchError> {
        let context = ErrorContext::new(Operation::Create, None);
        let desired = desired_from_attributes(config).map_err(|e| VSwitchError::invalid_input(context, e))?;

        let created = self.reconciler.create(&desired).await?;
        render(Operation::Create, &created)
    }

    /// Refresh a state map from the Robot service
    pub async fn read(&self, state: &Value) -> Result<Value, VSwitchError> {
        let id = tracked_id(Operation::Read, state)?;
        let vswitch = self.reconciler.read(id).await?;
        render(Operation::Read, &vswitch)
    }

    /// Apply the configuration to the vSwitch tracked by `state`
    pub async fn update(&self, state: &Value, config: &Value) -> Result<Value, VSwitchError> {
        let id = tracked_id(Operation::Update, state)?;
        let desired = desired_from_attributes(config)
            .map_err(|e| VSwitchError::invalid_input(ErrorContext::new(Operation::Update, Some(id)), e))?;

        let updated = self.reconciler.update(id, &desired).await?;
        render(Operation::Update, &updated)
    }

    pub async fn delete(&self, state: &Value) -> Result<DeleteOutcome, VSwitchError> {
        let id = tracked_id(Operation::Delete, state)?;
        self.reconciler.delete(id).await
    }

    /// Adopt an existing vSwitch by its id string
    pub async fn import(&self, id: &str) -> Result<Value, VSwitchError> {
        let id = parse_import_id(id)
            .map_err(|e| VSwitchError::invalid_input(ErrorContext::new(Operation::Import, None), e))?;
        let vswitch = self.reconciler.import(id).await?;
        render(Operation::Import, &vswitch)
    }

    /// Converge toward `config`, starting from the last known state if there is one
    pub async fn reconcile(&self, config: &Value, state: Option<&Value>) -> Result<Value, VSwitchError> {
        let tracked = match state {
            Some(state) => vswitch_id_from_attributes(state)
                .map_err(|e| VSwitchError::invalid_input(ErrorContext::new(Operation::Reconcile, None), e))?,
            None => None,
        };
        let desired = desired_from_attributes(config)
            .map_err(|e| VSwitchError::invalid_input(ErrorContext::new(Operation::Reconcile, tracked), e))?;

        let vswitch = self.reconciler.reconcile(&desired, tracked).await?;
        render(Operation::Reconcile, &vswitch)
    }

    /// Data source read: `{vswitch_id}` in, every attribute out
    pub async fn read_data_source(&self, config: &Value) -> Result<Value, VSwitchError> {
        let context = ErrorContext::new(Operation::Read, None);
        checked_object(&VSWITCH_DATA_SOURCE, config).map_err(|e| VSwitchError::invalid_input(context, e))?;
        let id = tracked_id(Operation::Read, config)?;

        debug!("Reading vSwitch {} as data source", id);
        let vswitch = self.reconciler.read(id).await?;
        render(Operation::Read, &vswitch)
    }
}

fn tracked_id(operation: Operation, state: &Value) -> Result<u64, VSwitchError> {
    let context = ErrorContext::new(operation, None);
    vswitch_id_from_attributes(state)
        .map_err(|e| VSwitchError::invalid_input(context, e))?
        .ok_or_else(|| VSwitchError::invalid_input(context, AttributeError::Missing("vswitch_id".to_string())))
}

fn render(operation: Operation, vswitch: &VSwitch) -> Result<Value, VSwitchError> {
    state_from_record(vswitch).map_err(|e| VSwitchError::MalformedResponse {
        context: ErrorContext::new(operation, Some(vswitch.id)),
        reason: e.to_string(),
    })
}
