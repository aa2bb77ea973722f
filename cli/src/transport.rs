//! HTTP implementation of the editor's patch transport.

use canvas::commit::{PatchTransport, TransportError, check_response};
use wire::{ElementSummary, UpdateElementRequest};

use crate::CliError;

/// Posts commits to a running server's update endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    project: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(base_url: &str, project: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            project: project.to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Tagged elements of the project's page, as the server sees them.
    pub async fn elements(&self) -> Result<Vec<ElementSummary>, CliError> {
        let response = self.client.get(self.url(&wire::elements_path(&self.project))).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(CliError::Server { status: status.as_u16(), message: body.trim().to_owned() });
        }
        Ok(response.json::<Vec<ElementSummary>>().await?)
    }
}

impl PatchTransport for HttpTransport {
    async fn send(&self, request: &UpdateElementRequest) -> Result<(), TransportError> {
        let url = self.url(&wire::update_element_path(&self.project));
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError::Network(e.to_string()))?;
        check_response(status, &body)
    }
}
