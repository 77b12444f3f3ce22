use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandRequest<'a> {
    Get,
    Put { body: &'a str },
}

/// Issues commands to device services. Every call owns its request; the underlying
/// `Client` only pools connections.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    client: Client,
}

impl CommandDispatcher {
    pub fn new(timeout: Duration) -> Result<Self, DispatchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(CommandDispatcher { client })
    }

    #[instrument(skip(self, request), fields(url = %url))]
    pub async fn dispatch(&self, url: &str, request: CommandRequest<'_>) -> Result<String, DispatchError> {
        let target = Url::parse(url).map_err(|e| DispatchError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let builder = match request {
            CommandRequest::Get => self.client.get(target),
            CommandRequest::Put { body } => self
                .client
                .put(target)
                .header(CONTENT_TYPE, "application/json")
                .header(CONTENT_LENGTH, body.len())
                .body(body.to_owned()),
        };

        let response = builder.send().await?.error_for_status()?;
        debug!(status = %response.status(), "Device service responded");

        let text = response.text().await?;
        Ok(join_lines(&text))
    }
}

// Line terminators from the device service are dropped, the lines themselves are concatenated
fn join_lines(text: &str) -> String {
    text.split(['\r', '\n']).collect()
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid command url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}
