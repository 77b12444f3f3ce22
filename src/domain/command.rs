use serde::Deserialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Command {
    pub id: String,
    pub name: String,
    pub get: Option<Get>,
    pub put: Option<Put>,
}

impl Command {
    pub fn action(&self, direction: Direction) -> Option<Action<'_>> {
        match direction {
            Direction::Get => self.get.as_ref().map(Action::Get),
            Direction::Put => self.put.as_ref().map(Action::Put),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Get {
    pub path: String,
    pub responses: Option<Vec<Response>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Put {
    pub path: String,
    pub responses: Option<Vec<Response>>,
    #[serde(default)]
    pub parameter_names: Vec<String>,
}

/// Borrowed view over either direction of a command, so callers can treat both alike
/// while the parameter list stays reachable only on `Put`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action<'a> {
    Get(&'a Get),
    Put(&'a Put),
}

impl<'a> Action<'a> {
    pub fn path(&self) -> &'a str {
        match self {
            Action::Get(get) => &get.path,
            Action::Put(put) => &put.path,
        }
    }

    pub fn responses(&self) -> Option<&'a [Response]> {
        match self {
            Action::Get(get) => get.responses.as_deref(),
            Action::Put(put) => put.responses.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub code: Option<String>,
    pub description: Option<String>,
    pub expected_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Get,
    Put,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Get => f.write_str("get"),
            Direction::Put => f.write_str("put"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_command_with_both_directions() -> Result<(), serde_json::Error> {
        let json = r#"{
            "id": "cmd-1",
            "name": "setTemp",
            "get": { "path": "/api/v1/device/{deviceId}/temp", "responses": null },
            "put": {
                "path": "/api/v1/device/{deviceId}/temp",
                "parameterNames": ["Temperature"],
                "responses": [{ "code": "200", "description": "ok", "expectedValues": ["temperature"] }]
            }
        }"#;

        let command = serde_json::from_str::<Command>(json)?;

        let expected = Command {
            id: "cmd-1".to_string(),
            name: "setTemp".to_string(),
            get: Some(Get {
                path: "/api/v1/device/{deviceId}/temp".to_string(),
                responses: None,
            }),
            put: Some(Put {
                path: "/api/v1/device/{deviceId}/temp".to_string(),
                responses: Some(vec![Response {
                    code: Some("200".to_string()),
                    description: Some("ok".to_string()),
                    expected_values: Some(vec!["temperature".to_string()]),
                }]),
                parameter_names: vec!["Temperature".to_string()],
            }),
        };
        assert_eq!(command, expected);

        Ok(())
    }

    #[test]
    fn action_returns_none_for_a_missing_direction() {
        let command = Command {
            id: "cmd-1".to_string(),
            name: "readOnly".to_string(),
            get: Some(Get {
                path: "/read".to_string(),
                responses: Some(vec![]),
            }),
            put: None,
        };

        assert_eq!(command.action(Direction::Put), None);
        let get = command.action(Direction::Get);
        assert_eq!(get.map(|a| a.path()), Some("/read"));
        assert_eq!(get.and_then(|a| a.responses()).map(<[Response]>::len), Some(0));
    }
}
