use crate::domain::{AdminState, Command, Device, OperatingState};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

/// Read access to device and command records plus the device state transitions, all owned
/// by the metadata service.
#[async_trait]
pub trait MetadataClient: Debug + Send + Sync {
    async fn devices(&self) -> Result<Vec<Device>, MetadataError>;

    async fn device(&self, id: &str) -> Result<Device, MetadataError>;

    async fn device_by_name(&self, name: &str) -> Result<Device, MetadataError>;

    /// An unknown command is `Ok(None)`, not an error.
    async fn command(&self, id: &str) -> Result<Option<Command>, MetadataError>;

    async fn update_operating_state(&self, device: DeviceRef<'_>, state: OperatingState) -> Result<(), MetadataError>;

    async fn update_admin_state(&self, device: DeviceRef<'_>, state: AdminState) -> Result<(), MetadataError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRef<'a> {
    Id(&'a str),
    Name(&'a str),
}

impl DeviceRef<'_> {
    pub fn value(&self) -> &str {
        match self {
            DeviceRef::Id(id) => id,
            DeviceRef::Name(name) => name,
        }
    }
}

impl Display for DeviceRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceRef::Id(id) => write!(f, "id '{}'", id),
            DeviceRef::Name(name) => write!(f, "name '{}'", name),
        }
    }
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("metadata service responded with status {status}")]
    UnexpectedStatus { status: StatusCode },
    #[error("invalid metadata url '{0}'")]
    InvalidUrl(String),
}
