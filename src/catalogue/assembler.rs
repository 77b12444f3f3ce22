use crate::catalogue::model::{ActionEntry, CommandEntry, DeviceCatalogue, GetEntry, PutEntry, ResponseEntry};
use crate::domain::{Action, Command, Device, Response};
use serde::Deserialize;

/// URL segments used to point clients back at this service's command endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogueUrls {
    url_protocol: String,
    device_path: String,
    command_path: String,
}

impl CatalogueUrls {
    #[cfg(test)]
    pub fn new(url_protocol: &str, device_path: &str, command_path: &str) -> Self {
        CatalogueUrls {
            url_protocol: url_protocol.to_owned(),
            device_path: device_path.to_owned(),
            command_path: command_path.to_owned(),
        }
    }

    pub fn command_url(&self, host: &str, device_id: &str, command_id: &str) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.url_protocol, host, self.device_path, device_id, self.command_path, command_id
        )
    }
}

pub fn render(device: &Device, host: &str, urls: &CatalogueUrls) -> DeviceCatalogue {
    let commands = device
        .profile
        .as_ref()
        .and_then(|profile| profile.commands.as_deref())
        .filter(|commands| !commands.is_empty())
        .map(|commands| commands.iter().map(|command| render_command(command, host, &device.id, urls)).collect());

    DeviceCatalogue {
        name: device.name.clone(),
        id: device.id.clone(),
        description: device.description.clone(),
        labels: device.labels.clone(),
        admin_state: device.admin_state,
        operating_state: device.operating_state,
        last_connected: device.last_connected,
        last_reported: device.last_reported,
        location: device.location.clone(),
        commands,
    }
}

fn render_command(command: &Command, host: &str, device_id: &str, urls: &CatalogueUrls) -> CommandEntry {
    let url = urls.command_url(host, device_id, &command.id);

    CommandEntry {
        id: command.id.clone(),
        name: command.name.clone(),
        get: command.get.as_ref().map(|get| render_action(Action::Get(get), url.clone())),
        put: command.put.as_ref().map(|put| render_action(Action::Put(put), url.clone())),
    }
}

fn render_action(action: Action<'_>, url: String) -> ActionEntry {
    let responses = action.responses().map(|responses| responses.iter().map(render_response).collect());

    match action {
        Action::Get(_) => ActionEntry::Get(GetEntry { url, responses }),
        Action::Put(put) => ActionEntry::Put(PutEntry {
            url,
            parameter_names: put.parameter_names.clone(),
            responses,
        }),
    }
}

fn render_response(response: &Response) -> ResponseEntry {
    ResponseEntry {
        code: response.code.clone(),
        description: response.description.clone(),
        expected_values: response.expected_values.clone(),
    }
}
