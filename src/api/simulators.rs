use reqwest::{Method, Url};
use tracing::info;

use super::{ApiClient, ApiError};
use crate::simulator::{CreateSimulationPayload, SavedSimulation, UpdateSimulationPayload};

const SIMULATORS_PATH: &str = "simulators";

impl ApiClient {
    /// Saved simulations of the logged-in user, optionally filtered by `query`
    pub async fn list_simulations(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<SavedSimulation>, ApiError> {
        let params: Vec<(&str, &str)> = query.map(|q| vec![("query", q)]).unwrap_or_default();
        let url = self.endpoint(SIMULATORS_PATH, &params)?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// Look a simulation up by id in the user's listing
    pub async fn find_simulation(&self, id: &str) -> Result<Option<SavedSimulation>, ApiError> {
        let simulations = self.list_simulations(None).await?;
        Ok(simulations.into_iter().find(|s| s.id == id))
    }

    pub async fn create_simulation(
        &self,
        payload: &CreateSimulationPayload,
    ) -> Result<SavedSimulation, ApiError> {
        info!("Saving new simulation '{}'", payload.title);
        let url = self.endpoint(SIMULATORS_PATH, &[])?;
        self.send_json(self.request(Method::POST, url).json(payload))
            .await
    }

    pub async fn update_simulation(
        &self,
        id: &str,
        payload: &UpdateSimulationPayload,
    ) -> Result<SavedSimulation, ApiError> {
        info!("Updating simulation {}", id);
        let url = self.simulation_url(id)?;
        self.send_json(self.request(Method::PATCH, url).json(payload))
            .await
    }

    pub async fn delete_simulation(&self, id: &str) -> Result<(), ApiError> {
        info!("Deleting simulation {}", id);
        let url = self.simulation_url(id)?;
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    /// `{base}/simulators/{id}`, with the id escaped as a single path segment
    fn simulation_url(&self, id: &str) -> Result<Url, ApiError> {
        let id = id.trim();
        if id.is_empty() || id == "." || id == ".." {
            return Err(ApiError::InvalidUrl(format!("invalid simulation id '{id}'")));
        }
        let mut url = self.endpoint(SIMULATORS_PATH, &[])?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl("base url cannot take a path".to_string()))?
            .push(id);
        Ok(url)
    }
}
