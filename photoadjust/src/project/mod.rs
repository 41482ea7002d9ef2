//! Project service access.
//!
//! The project service is the bookkeeping side of a photometry run: it
//! knows the camera count, the per-camera parameters, the iteration
//! counter, and which plates hold the imagery.

mod client;
mod http;
mod types;

pub use client::{ProjectClient, ProjectError};
pub use http::HttpProjectClient;
pub use types::{CameraMeta, PlateRefs, ProjectMeta, ReflectanceMode};
