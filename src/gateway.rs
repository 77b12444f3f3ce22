use crate::catalogue::{CatalogueUrls, DeviceCatalogue, render};
use crate::command::{Access, CommandDispatcher, CommandRequest, DenyReason, DispatchError, ResolveError, UrlResolver, authorize};
use crate::domain::{AdminState, Device, Direction, OperatingState};
use crate::metadata::{DeviceRef, MetadataClient, MetadataError};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

/// The public operation set: catalogue reads, command dispatch and device state changes.
#[derive(Debug)]
pub struct CommandGateway {
    metadata: Arc<dyn MetadataClient>,
    resolver: UrlResolver,
    dispatcher: CommandDispatcher,
    urls: CatalogueUrls,
}

impl CommandGateway {
    pub fn new(metadata: Arc<dyn MetadataClient>, resolver: UrlResolver, dispatcher: CommandDispatcher, urls: CatalogueUrls) -> Self {
        CommandGateway {
            metadata,
            resolver,
            dispatcher,
            urls,
        }
    }

    #[instrument(skip(self))]
    pub async fn devices(&self, host: &str) -> Result<Vec<DeviceCatalogue>, GatewayError> {
        let devices = self
            .metadata
            .devices()
            .await
            .map_err(|e| GatewayError::from(ServiceError::from(e)))
            .inspect_err(|e| log_failure("getting command responses", e))?;

        Ok(devices.iter().map(|device| render(device, host, &self.urls)).collect())
    }

    #[instrument(skip(self))]
    pub async fn device(&self, id: &str, host: &str) -> Result<DeviceCatalogue, GatewayError> {
        let device = self
            .device_record(DeviceRef::Id(id))
            .await
            .inspect_err(|e| log_failure("getting command response", e))?;

        Ok(render(&device, host, &self.urls))
    }

    #[instrument(skip(self))]
    pub async fn device_by_name(&self, name: &str, host: &str) -> Result<DeviceCatalogue, GatewayError> {
        let device = self
            .device_record(DeviceRef::Name(name))
            .await
            .inspect_err(|e| log_failure("getting command response", e))?;

        Ok(render(&device, host, &self.urls))
    }

    #[instrument(skip(self))]
    pub async fn get_command(&self, device_id: &str, command_id: &str) -> Result<String, GatewayError> {
        self.issue(device_id, command_id, CommandRequest::Get)
            .await
            .inspect_err(|e| log_failure("calling get command", e))
    }

    #[instrument(skip(self, body))]
    pub async fn put_command(&self, device_id: &str, command_id: &str, body: &str) -> Result<String, GatewayError> {
        self.issue(device_id, command_id, CommandRequest::Put { body })
            .await
            .inspect_err(|e| log_failure("calling put command", e))
    }

    #[instrument(skip(self), fields(device = %device))]
    pub async fn set_operating_state(&self, device: DeviceRef<'_>, state: OperatingState) -> Result<(), GatewayError> {
        self.metadata
            .update_operating_state(device, state)
            .await
            .map_err(|e| classify(e, ResourceKind::Device, device.value()))
            .inspect_err(|e| log_failure("calling set of op state", e))?;

        info!("Requesting op state for device with {} be set to {}", device, state);
        Ok(())
    }

    #[instrument(skip(self), fields(device = %device))]
    pub async fn set_admin_state(&self, device: DeviceRef<'_>, state: AdminState) -> Result<(), GatewayError> {
        self.metadata
            .update_admin_state(device, state)
            .await
            .map_err(|e| classify(e, ResourceKind::Device, device.value()))
            .inspect_err(|e| log_failure("calling set of admin state", e))?;

        info!("Requesting admin state for device with {} be set to {}", device, state);
        Ok(())
    }

    async fn device_record(&self, device: DeviceRef<'_>) -> Result<Device, GatewayError> {
        let result = match device {
            DeviceRef::Id(id) => self.metadata.device(id).await,
            DeviceRef::Name(name) => self.metadata.device_by_name(name).await,
        };
        result.map_err(|e| classify(e, ResourceKind::Device, device.value()))
    }

    // Check order is fixed: device, command, admin lock, operating state, url, dispatch
    async fn issue(&self, device_id: &str, command_id: &str, request: CommandRequest<'_>) -> Result<String, GatewayError> {
        let device = self.device_record(DeviceRef::Id(device_id)).await?;

        let command = self
            .metadata
            .command(command_id)
            .await
            .map_err(|e| classify(e, ResourceKind::Command, command_id))?
            .ok_or_else(|| GatewayError::NotFound {
                kind: ResourceKind::Command,
                id: command_id.to_owned(),
            })?;

        let direction = match request {
            CommandRequest::Get => Direction::Get,
            CommandRequest::Put { .. } => Direction::Put,
        };

        if let Access::Deny(reason) = authorize(&device, direction == Direction::Put) {
            info!(device_id, "{} request to device '{}' blocked because it is in {}", direction, device.name, reason);
            return Err(GatewayError::Locked {
                device: device.name,
                reason,
            });
        }

        let url = self
            .resolver
            .resolve(&device, device_id, &command, direction)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::UnsupportedProtocol { device: device.name.clone() })?;

        info!(device_id, command_id, "Issuing {} command to: {}", direction, url);
        if let CommandRequest::Put { body } = request {
            info!(device_id, command_id, "Command message body is: {}", body);
        }

        Ok(self.dispatcher.dispatch(&url, request).await.map_err(ServiceError::from)?)
    }
}

fn classify(error: MetadataError, kind: ResourceKind, id: &str) -> GatewayError {
    match error {
        MetadataError::NotFound { .. } => GatewayError::NotFound { kind, id: id.to_owned() },
        other => GatewayError::Service(ServiceError::from(other)),
    }
}

fn log_failure(operation: &str, error: &GatewayError) {
    if let GatewayError::Service(e) = error {
        error!("Error {}: {}", operation, e);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Device,
    Command,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Device => f.write_str("device"),
            ResourceKind::Command => f.write_str("command"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: ResourceKind, id: String },
    #[error("device '{device}' is in {reason}")]
    Locked { device: String, reason: DenyReason },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("device service of '{device}' uses a protocol without a registered transport")]
    UnsupportedProtocol { device: String },
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
