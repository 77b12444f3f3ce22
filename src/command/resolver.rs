use crate::domain::{Addressable, Command, Device, Direction, Protocol};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

const DEVICE_ID_PLACEHOLDER: &str = "{deviceId}";

/// Builds the outbound URL for one protocol family.
pub trait TransportResolver: Debug + Send + Sync {
    fn protocol(&self) -> Protocol;

    fn resolve(&self, addressable: &Addressable, path: &str, device_id: &str) -> String;
}

#[derive(Debug)]
pub struct HttpTransport;

impl TransportResolver for HttpTransport {
    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    fn resolve(&self, addressable: &Addressable, path: &str, device_id: &str) -> String {
        // The placeholder may sit anywhere in the template, so substitute after concatenation
        format!("http://{}:{}{}", addressable.address, addressable.port, path).replace(DEVICE_ID_PLACEHOLDER, device_id)
    }
}

#[derive(Debug)]
pub struct UrlResolver {
    transports: HashMap<Protocol, Arc<dyn TransportResolver>>,
}

impl UrlResolver {
    pub fn empty() -> Self {
        UrlResolver { transports: HashMap::new() }
    }

    pub fn register(&mut self, transport: Arc<dyn TransportResolver>) {
        self.transports.insert(transport.protocol(), transport);
    }

    /// Resolves the URL for `command` on `device`. Returns `Ok(None)` when no transport is
    /// registered for the device service's protocol.
    pub fn resolve(&self, device: &Device, device_id: &str, command: &Command, direction: Direction) -> Result<Option<String>, ResolveError> {
        let addressable = device
            .service
            .as_ref()
            .and_then(|service| service.addressable.as_ref())
            .ok_or_else(|| ResolveError::NotAddressable {
                device: device.name.clone(),
            })?;

        let Some(transport) = self.transports.get(&addressable.protocol) else {
            return Ok(None);
        };

        let action = command.action(direction).ok_or_else(|| ResolveError::MissingAction {
            command: command.name.clone(),
            direction,
        })?;

        Ok(Some(transport.resolve(addressable, action.path(), device_id)))
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        let mut resolver = UrlResolver::empty();
        resolver.register(Arc::new(HttpTransport));
        resolver
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
    #[error("device service of '{device}' is not properly addressable")]
    NotAddressable { device: String },
    #[error("command '{command}' has no {direction} action")]
    MissingAction { command: String, direction: Direction },
}
