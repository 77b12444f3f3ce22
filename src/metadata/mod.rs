mod client;
#[cfg(test)]
pub mod fake;
mod http_client;

pub use client::{DeviceRef, MetadataClient, MetadataError};
pub use http_client::HttpMetadataClient;
