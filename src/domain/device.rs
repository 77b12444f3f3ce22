use crate::domain::command::Command;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A device as recorded by the metadata service. The gateway only ever reads it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    pub admin_state: AdminState,
    pub operating_state: OperatingState,
    #[serde(default)]
    pub last_connected: i64,
    #[serde(default)]
    pub last_reported: i64,
    pub location: Option<serde_json::Value>,
    pub service: Option<DeviceService>,
    pub profile: Option<DeviceProfile>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceService {
    pub name: Option<String>,
    pub addressable: Option<Addressable>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Addressable {
    pub protocol: Protocol,
    pub address: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceProfile {
    pub name: Option<String>,
    pub commands: Option<Vec<Command>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Http,
    Tcp,
    Mac,
    Zmq,
    Mqtt,
    #[serde(other)]
    Other,
}

/// Operator-controlled lock; a locked device accepts no command traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdminState {
    Locked,
    Unlocked,
}

impl AdminState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminState::Locked => "LOCKED",
            AdminState::Unlocked => "UNLOCKED",
        }
    }
}

impl Display for AdminState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminState {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOCKED" => Ok(AdminState::Locked),
            "UNLOCKED" => Ok(AdminState::Unlocked),
            _ => Err(UnknownStateError(s.to_owned())),
        }
    }
}

/// Device-reported health; a disabled device still answers reads but rejects writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatingState {
    Enabled,
    Disabled,
}

impl OperatingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingState::Enabled => "ENABLED",
            OperatingState::Disabled => "DISABLED",
        }
    }
}

impl Display for OperatingState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingState {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENABLED" => Ok(OperatingState::Enabled),
            "DISABLED" => Ok(OperatingState::Disabled),
            _ => Err(UnknownStateError(s.to_owned())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown state '{0}'")]
pub struct UnknownStateError(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("LOCKED", AdminState::Locked)]
    #[case("unlocked", AdminState::Unlocked)]
    #[case("Locked", AdminState::Locked)]
    fn admin_state_parses_case_insensitively(#[case] input: &str, #[case] expected: AdminState) {
        assert_eq!(input.parse::<AdminState>(), Ok(expected));
    }

    #[rstest]
    #[case("ENABLED", OperatingState::Enabled)]
    #[case("disabled", OperatingState::Disabled)]
    fn operating_state_parses_case_insensitively(#[case] input: &str, #[case] expected: OperatingState) {
        assert_eq!(input.parse::<OperatingState>(), Ok(expected));
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert_eq!("broken".parse::<OperatingState>(), Err(UnknownStateError("broken".to_string())));
        assert_eq!("".parse::<AdminState>(), Err(UnknownStateError("".to_string())));
    }

    #[test]
    fn deserializes_a_metadata_device() -> Result<(), serde_json::Error> {
        let json = include_str!("../../tests/resources/device.json");

        let device = serde_json::from_str::<Device>(json)?;

        assert_eq!(device.id, "5b4c4a6ae4b0a8e4a3b1c1a7");
        assert_eq!(device.name, "thermostat-01");
        assert_eq!(device.labels, Some(vec!["MODBUS".to_string(), "TEMP".to_string()]));
        assert_eq!(device.admin_state, AdminState::Unlocked);
        assert_eq!(device.operating_state, OperatingState::Enabled);
        assert_eq!(device.last_connected, 1_000_000);
        assert_eq!(
            device.service.and_then(|s| s.addressable),
            Some(Addressable {
                protocol: Protocol::Http,
                address: "device-modbus".to_string(),
                port: 49991,
            })
        );
        let commands = device.profile.and_then(|p| p.commands).unwrap_or_default();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "setTemp");

        Ok(())
    }
}
