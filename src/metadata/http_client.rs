use crate::app_config::AppConfig;
use crate::domain::{AdminState, Command, Device, OperatingState};
use crate::metadata::client::{DeviceRef, MetadataClient, MetadataError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct HttpMetadataClient {
    client: Client,
    base_url: Url,
}

impl HttpMetadataClient {
    pub fn new(config: &AppConfig) -> Result<Self, MetadataError> {
        let base_url = Url::parse(config.metadata().url()).map_err(|e| MetadataError::InvalidUrl(format!("{}: {}", config.metadata().url(), e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MetadataError::InvalidUrl(config.metadata().url().to_owned()));
        }

        let client = Client::builder().timeout(config.metadata().timeout()).build()?;
        Ok(HttpMetadataClient { client, base_url })
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    fn device_endpoint<'a>(&self, device: DeviceRef<'a>, suffix: impl IntoIterator<Item = &'a str>) -> Url {
        match device {
            DeviceRef::Id(id) => self.endpoint(["device", id].into_iter().chain(suffix)),
            DeviceRef::Name(name) => self.endpoint(["device", "name", name].into_iter().chain(suffix)),
        }
    }

    async fn send(&self, request: RequestBuilder, resource: impl FnOnce() -> String) -> Result<Response, MetadataError> {
        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(MetadataError::NotFound { resource: resource() }),
            status if !status.is_success() => Err(MetadataError::UnexpectedStatus { status }),
            _ => Ok(response),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url, resource: impl FnOnce() -> String) -> Result<T, MetadataError> {
        debug!(url = %url, "Fetching metadata");
        let response = self.send(self.client.get(url), resource).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MetadataClient for HttpMetadataClient {
    #[instrument(skip(self))]
    async fn devices(&self) -> Result<Vec<Device>, MetadataError> {
        self.fetch(self.endpoint(["device"]), || "devices".to_string()).await
    }

    #[instrument(skip(self))]
    async fn device(&self, id: &str) -> Result<Device, MetadataError> {
        self.fetch(self.device_endpoint(DeviceRef::Id(id), []), || format!("device with id '{}'", id))
            .await
    }

    #[instrument(skip(self))]
    async fn device_by_name(&self, name: &str) -> Result<Device, MetadataError> {
        self.fetch(self.device_endpoint(DeviceRef::Name(name), []), || format!("device with name '{}'", name))
            .await
    }

    #[instrument(skip(self))]
    async fn command(&self, id: &str) -> Result<Option<Command>, MetadataError> {
        match self.fetch(self.endpoint(["command", id]), || format!("command with id '{}'", id)).await {
            Ok(command) => Ok(Some(command)),
            Err(MetadataError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self), fields(device = %device))]
    async fn update_operating_state(&self, device: DeviceRef<'_>, state: OperatingState) -> Result<(), MetadataError> {
        let url = self.device_endpoint(device, ["opstate", state.as_str()]);
        self.send(self.client.put(url), || format!("device with {}", device)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(device = %device))]
    async fn update_admin_state(&self, device: DeviceRef<'_>, state: AdminState) -> Result<(), MetadataError> {
        let url = self.device_endpoint(device, ["adminstate", state.as_str()]);
        self.send(self.client.put(url), || format!("device with {}", device)).await?;
        Ok(())
    }
}
