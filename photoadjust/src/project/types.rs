//! Project metadata records exchanged with the project service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reflectance model configured for a project.
///
/// Only [`ReflectanceMode::None`] is supported by the exposure update;
/// the other modes exist in project metadata but have no implementation
/// here yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectanceMode {
    None,
    Lambertian,
    LunarLambert,
}

impl fmt::Display for ReflectanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReflectanceMode::None => "none",
            ReflectanceMode::Lambertian => "lambertian",
            ReflectanceMode::LunarLambert => "lunar_lambert",
        };
        write!(f, "{}", name)
    }
}

/// Top-level description of a photometry project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Human-readable project name.
    pub name: String,
    /// Number of cameras (input images) registered in the project.
    pub num_cameras: u32,
    /// Reflectance model the project was configured with.
    pub reflectance: ReflectanceMode,
    /// Iteration counter of the optimization loop.
    pub current_iteration: u32,
}

/// Base URLs of the plates a project works against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateRefs {
    /// The DRG mosaic: per-camera orthoprojected imagery.
    pub drg: String,
    /// The albedo mosaic, updated by the albedo solver.
    pub albedo: String,
    /// The reflectance plate, present only for projects that model
    /// reflectance.
    #[serde(default)]
    pub reflectance: Option<String>,
}

/// Per-camera parameters stored by the project service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraMeta {
    /// Exposure time estimate for this camera.
    pub exposure_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_meta_parses_service_json() {
        let json = r#"{
            "name": "apollo15_metric",
            "num_cameras": 120,
            "reflectance": "none",
            "current_iteration": 3
        }"#;

        let meta: ProjectMeta = serde_json::from_str(json).unwrap();

        assert_eq!(meta.name, "apollo15_metric");
        assert_eq!(meta.num_cameras, 120);
        assert_eq!(meta.reflectance, ReflectanceMode::None);
        assert_eq!(meta.current_iteration, 3);
    }

    #[test]
    fn test_reflectance_modes_parse_by_snake_case_name() {
        let lambertian: ReflectanceMode = serde_json::from_str(r#""lambertian""#).unwrap();
        let lunar: ReflectanceMode = serde_json::from_str(r#""lunar_lambert""#).unwrap();

        assert_eq!(lambertian, ReflectanceMode::Lambertian);
        assert_eq!(lunar, ReflectanceMode::LunarLambert);
        assert!(serde_json::from_str::<ReflectanceMode>(r#""specular""#).is_err());
    }

    #[test]
    fn test_reflectance_display_matches_wire_name() {
        assert_eq!(ReflectanceMode::None.to_string(), "none");
        assert_eq!(ReflectanceMode::Lambertian.to_string(), "lambertian");
        assert_eq!(ReflectanceMode::LunarLambert.to_string(), "lunar_lambert");
    }

    #[test]
    fn test_plate_refs_reflectance_is_optional() {
        let json = r#"{
            "drg": "http://plates/drg",
            "albedo": "http://plates/albedo"
        }"#;

        let refs: PlateRefs = serde_json::from_str(json).unwrap();

        assert_eq!(refs.drg, "http://plates/drg");
        assert_eq!(refs.albedo, "http://plates/albedo");
        assert_eq!(refs.reflectance, None);
    }

    #[test]
    fn test_camera_meta_round_trips_exposure_time() {
        let camera = CameraMeta {
            exposure_time: 0.003125,
        };

        let json = serde_json::to_string(&camera).unwrap();
        let parsed: CameraMeta = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, camera);
    }
}
