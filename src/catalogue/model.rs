use crate::domain::{AdminState, OperatingState};
use serde::Serialize;

// Field order is part of the rendered output; absent values serialize as null, never omitted.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCatalogue {
    pub name: String,
    pub id: String,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    pub admin_state: AdminState,
    pub operating_state: OperatingState,
    pub last_connected: i64,
    pub last_reported: i64,
    pub location: Option<serde_json::Value>,
    pub commands: Option<Vec<CommandEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandEntry {
    pub id: String,
    pub name: String,
    pub get: Option<ActionEntry>,
    pub put: Option<ActionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionEntry {
    Get(GetEntry),
    Put(PutEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetEntry {
    pub url: String,
    pub responses: Option<Vec<ResponseEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PutEntry {
    pub url: String,
    pub parameter_names: Vec<String>,
    pub responses: Option<Vec<ResponseEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub code: Option<String>,
    pub description: Option<String>,
    pub expected_values: Option<Vec<String>>,
}
