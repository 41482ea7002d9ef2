//! HTTP-backed project service client.

use super::client::{ProjectClient, ProjectError};
use super::types::{CameraMeta, PlateRefs, ProjectMeta};
use crate::http::HttpClient;
use serde::Serialize;
use tracing::trace;

/// Body of the iteration counter update request.
#[derive(Debug, Serialize)]
struct IterationUpdate {
    iteration: u32,
}

/// Client for a project service reachable over HTTP.
///
/// All requests are relative to the project base URL:
///
/// * `GET project` - project description
/// * `GET platefiles` - plate base URLs
/// * `GET cameras/{index}` / `POST cameras/{index}` - per-camera parameters
/// * `POST iteration` - iteration counter
pub struct HttpProjectClient<C: HttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: HttpClient> HttpProjectClient<C> {
    /// Creates a project client for the service at `base_url`.
    pub fn new(http_client: C, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn camera_url(&self, index: u32) -> String {
        format!("{}/cameras/{}", self.base_url, index)
    }
}

impl<C: HttpClient> ProjectClient for HttpProjectClient<C> {
    fn get_project(&self) -> Result<ProjectMeta, ProjectError> {
        let bytes = self.http_client.get(&self.url("project"))?;
        let meta: ProjectMeta = serde_json::from_slice(&bytes)?;
        Ok(meta)
    }

    fn get_platefiles(&self) -> Result<PlateRefs, ProjectError> {
        let bytes = self.http_client.get(&self.url("platefiles"))?;
        let refs: PlateRefs = serde_json::from_slice(&bytes)?;
        Ok(refs)
    }

    fn get_camera(&self, index: u32) -> Result<CameraMeta, ProjectError> {
        let url = self.camera_url(index);
        let bytes = match self.http_client.get(&url) {
            Ok(bytes) => bytes,
            Err(error) if error.is_not_found() => {
                return Err(ProjectError::CameraOutOfRange { index });
            }
            Err(error) => return Err(error.into()),
        };
        let camera: CameraMeta = serde_json::from_slice(&bytes)?;
        Ok(camera)
    }

    fn set_camera(&self, index: u32, camera: &CameraMeta) -> Result<(), ProjectError> {
        let body = serde_json::to_string(camera)?;
        trace!(index, body = %body, "camera write");

        self.http_client.post_json(&self.camera_url(index), &body)?;
        Ok(())
    }

    fn set_iteration(&self, iteration: u32) -> Result<(), ProjectError> {
        let body = serde_json::to_string(&IterationUpdate { iteration })?;

        self.http_client.post_json(&self.url("iteration"), &body)?;
        Ok(())
    }
}
