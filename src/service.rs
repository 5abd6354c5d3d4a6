use anyhow::{Context, Result, bail};

/// Thin collaborator for the remote experiment-management service. Only the
/// two calls the relayout pipeline needs are exposed; the rest of that API
/// is someone else's problem.
#[derive(Debug, Clone)]
pub struct ExperimentsClient {
    http: reqwest::Client,
    endpoint: String,
    workspace_id: String,
    auth_token: String,
}

impl ExperimentsClient {
    pub fn new(
        endpoint: impl Into<String>,
        workspace_id: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        ExperimentsClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            workspace_id: workspace_id.into(),
            auth_token: auth_token.into(),
        }
    }

    fn experiment_url(&self, experiment_id: &str) -> String {
        format!(
            "{}/workspaces/{}/experiments/{}",
            self.endpoint, self.workspace_id, experiment_id
        )
    }

    /// Fetches the raw experiment document text.
    pub async fn get_experiment(&self, experiment_id: &str) -> Result<String> {
        let response = self
            .http
            .get(self.experiment_url(experiment_id))
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .send()
            .await
            .context("Failed to fetch experiment")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Fetching experiment failed with status {status}: {body}");
        }

        response
            .text()
            .await
            .context("Failed to read experiment document")
    }

    /// Persists a raw experiment document, replacing the stored one.
    pub async fn save_experiment(&self, experiment_id: &str, raw_document: &str) -> Result<()> {
        let response = self
            .http
            .put(self.experiment_url(experiment_id))
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .header("Content-Type", "application/json")
            .body(raw_document.to_string())
            .send()
            .await
            .context("Failed to save experiment")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Saving experiment failed with status {status}: {body}");
        }

        Ok(())
    }
}
