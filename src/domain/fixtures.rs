use crate::domain::command::{Get, Put};
use crate::domain::device::{DeviceProfile, DeviceService};
use crate::domain::{Addressable, AdminState, Command, Device, OperatingState, Protocol, Response};
use tokio::net::TcpListener;

pub const DEVICE_ID: &str = "d1";
pub const DEVICE_NAME: &str = "TEST_DEVICE.NAME";
pub const COMMAND_ID: &str = "c1";

pub fn response() -> Response {
    Response {
        code: Some("200".to_string()),
        description: Some("ok".to_string()),
        expected_values: Some(vec!["temperature".to_string(), "humidity".to_string()]),
    }
}

pub fn set_temp_command() -> Command {
    Command {
        id: COMMAND_ID.to_string(),
        name: "setTemp".to_string(),
        get: Some(Get {
            path: "/api/{deviceId}/temp".to_string(),
            responses: Some(vec![response()]),
        }),
        put: Some(Put {
            path: "/api/{deviceId}/temp".to_string(),
            responses: Some(vec![response()]),
            parameter_names: vec!["Temperature".to_string()],
        }),
    }
}

pub fn device() -> Device {
    Device {
        id: DEVICE_ID.to_string(),
        name: DEVICE_NAME.to_string(),
        description: Some("TEST_DESCRIPTION".to_string()),
        labels: Some(vec!["MODBUS".to_string(), "TEMP".to_string()]),
        admin_state: AdminState::Unlocked,
        operating_state: OperatingState::Enabled,
        last_connected: 1_000_000,
        last_reported: 1_000_000,
        location: Some(serde_json::Value::String("{40lat;45long}".to_string())),
        service: Some(DeviceService {
            name: Some("TEST_SERVICE.NAME".to_string()),
            addressable: Some(Addressable {
                protocol: Protocol::Http,
                address: "localhost".to_string(),
                port: 49991,
            }),
        }),
        profile: Some(DeviceProfile {
            name: Some("TEST_PROFILE.NAME".to_string()),
            commands: Some(vec![set_temp_command()]),
        }),
    }
}

/// Points the device's service at `url` (as produced by `mockito::Server::url`).
pub fn device_served_by(url: &str) -> Device {
    let (address, port) = url
        .trim_start_matches("http://")
        .rsplit_once(':')
        .map(|(address, port)| (address.to_string(), port.parse().unwrap()))
        .unwrap();

    let mut device = device();
    device.service = Some(DeviceService {
        name: Some("TEST_SERVICE.NAME".to_string()),
        addressable: Some(Addressable {
            protocol: Protocol::Http,
            address,
            port,
        }),
    });
    device
}

/// Accepts connections and holds them open without ever answering. Returns the base url.
pub async fn unresponsive_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", address)
}
