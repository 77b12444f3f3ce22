use crate::domain::{AdminState, Command, Device, OperatingState};
use crate::metadata::client::{DeviceRef, MetadataClient, MetadataError};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory metadata service that records the calls made against it.
#[derive(Debug, Default)]
pub struct FakeMetadataClient {
    devices: Vec<Device>,
    commands: Vec<Command>,
    failing: bool,
    command_lookups: AtomicUsize,
    state_updates: Mutex<Vec<String>>,
}

impl FakeMetadataClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn command_lookups(&self) -> usize {
        self.command_lookups.load(Ordering::SeqCst)
    }

    pub fn state_updates(&self) -> Vec<String> {
        self.state_updates.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), MetadataError> {
        if self.failing {
            Err(MetadataError::UnexpectedStatus {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        } else {
            Ok(())
        }
    }

    fn find(&self, device: DeviceRef<'_>) -> Result<&Device, MetadataError> {
        self.check_available()?;
        self.devices
            .iter()
            .find(|d| match device {
                DeviceRef::Id(id) => d.id == id,
                DeviceRef::Name(name) => d.name == name,
            })
            .ok_or_else(|| MetadataError::NotFound {
                resource: format!("device with {}", device),
            })
    }

    fn record(&self, device: DeviceRef<'_>, update: String) -> Result<(), MetadataError> {
        self.find(device)?;
        self.state_updates.lock().unwrap().push(update);
        Ok(())
    }
}

#[async_trait]
impl MetadataClient for FakeMetadataClient {
    async fn devices(&self) -> Result<Vec<Device>, MetadataError> {
        self.check_available()?;
        Ok(self.devices.clone())
    }

    async fn device(&self, id: &str) -> Result<Device, MetadataError> {
        self.find(DeviceRef::Id(id)).cloned()
    }

    async fn device_by_name(&self, name: &str) -> Result<Device, MetadataError> {
        self.find(DeviceRef::Name(name)).cloned()
    }

    async fn command(&self, id: &str) -> Result<Option<Command>, MetadataError> {
        self.command_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.commands.iter().find(|c| c.id == id).cloned())
    }

    async fn update_operating_state(&self, device: DeviceRef<'_>, state: OperatingState) -> Result<(), MetadataError> {
        self.record(device, format!("{} opstate {}", device.value(), state))
    }

    async fn update_admin_state(&self, device: DeviceRef<'_>, state: AdminState) -> Result<(), MetadataError> {
        self.record(device, format!("{} adminstate {}", device.value(), state))
    }
}
