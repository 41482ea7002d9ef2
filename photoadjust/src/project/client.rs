//! The project service interface.

use super::types::{CameraMeta, PlateRefs, ProjectMeta};
use crate::http::HttpError;
use thiserror::Error;

/// Errors raised by the project service.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The service could not be reached or answered with an error status.
    #[error("project service request failed: {0}")]
    Http(#[from] HttpError),

    /// A response was not the JSON we expect.
    #[error("project service response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A camera index beyond the project's camera count was requested.
    #[error("camera index {index} is out of range")]
    CameraOutOfRange { index: u32 },
}

/// Read and write access to one project's metadata.
///
/// Camera indices run from zero to `ProjectMeta::num_cameras - 1`.
/// Writes take effect immediately; there is no batching.
pub trait ProjectClient {
    /// Fetches the project description.
    fn get_project(&self) -> Result<ProjectMeta, ProjectError>;

    /// Fetches the plates this project works against.
    fn get_platefiles(&self) -> Result<PlateRefs, ProjectError>;

    /// Fetches the parameters of camera `index`.
    fn get_camera(&self, index: u32) -> Result<CameraMeta, ProjectError>;

    /// Stores the parameters of camera `index`.
    fn set_camera(&self, index: u32, camera: &CameraMeta) -> Result<(), ProjectError>;

    /// Advances the project's iteration counter to `iteration`.
    fn set_iteration(&self, iteration: u32) -> Result<(), ProjectError>;
}
