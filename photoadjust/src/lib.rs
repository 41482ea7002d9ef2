//! PhotoAdjust - Exposure-time adjustment for photometric mosaics
//!
//! This library implements one step of a photometric optimization loop:
//! refitting every camera's exposure time against the current albedo
//! mosaic. Imagery lives in versioned tile stores ("plates") and project
//! bookkeeping in a small metadata service, both reached over HTTP.
//!
//! # High-Level API
//!
//! The [`exposure`] module drives a whole pass:
//!
//! ```ignore
//! use photoadjust::exposure::{update_exposure_times, UpdateOptions};
//! use photoadjust::http::ReqwestClient;
//! use photoadjust::plate::HttpPlateStore;
//! use photoadjust::project::{HttpProjectClient, ProjectClient};
//!
//! let http = ReqwestClient::new()?;
//! let project = HttpProjectClient::new(http.clone(), "http://ptk/apollo15");
//! let plates = project.get_platefiles()?;
//! let drg = HttpPlateStore::new(http.clone(), &plates.drg);
//! let albedo = HttpPlateStore::new(http, &plates.albedo);
//!
//! let summary = update_exposure_times(&project, &drg, &albedo, &UpdateOptions::default())?;
//! ```

pub mod exposure;
pub mod http;
pub mod job;
pub mod logging;
pub mod plate;
pub mod project;

/// Version of the photoadjust library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty(), "Version should not be empty");
    }

    #[test]
    fn test_job_module_exists() {
        // Verify job module is accessible
        use crate::job::camera_range;
        assert_eq!(camera_range(4, 0, 2), 0..2);
    }
}
