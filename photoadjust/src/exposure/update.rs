//! The exposure-time update pass.

use super::accumulator::TimeDeltaAccumulator;
use crate::job::camera_range;
use crate::plate::{PlateError, PlateStore, TileRegion, TileVersion, TransactionRange};
use crate::project::{ProjectClient, ProjectError, ReflectanceMode};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort an update pass.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The project models reflectance, which this pass cannot handle.
    /// Detected before any tile is read so a misconfigured run fails
    /// without touching anything.
    #[error("reflectance mode '{0}' is not implemented; exposure times can only be updated for projects without reflectance")]
    ReflectanceNotImplemented(ReflectanceMode),

    /// The project service failed.
    #[error("project service error: {0}")]
    Project(#[from] ProjectError),

    /// A plate store failed.
    #[error("plate store error: {0}")]
    Plate(#[from] PlateError),
}

/// Settings for one update pass.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Pyramid level to sample, or `None` for the finest level the DRG
    /// plate has.
    pub level: Option<u32>,
    /// Compute and report corrections without writing anything back.
    pub dry_run: bool,
    /// Index of this job within the cooperating set.
    pub job_id: u32,
    /// Total number of cooperating jobs.
    pub num_jobs: u32,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            level: None,
            dry_run: false,
            job_id: 0,
            num_jobs: 1,
        }
    }
}

/// Outcome for one camera.
#[derive(Debug, Clone)]
pub struct CameraUpdate {
    /// Camera index.
    pub camera: u32,
    /// Exposure time after the pass.
    pub exposure_time: f64,
    /// Correction applied on top of the previous estimate.
    pub delta: f64,
    /// True when the camera had no usable coverage and kept its previous
    /// exposure time.
    pub no_data: bool,
}

/// Outcome of one update pass.
#[derive(Debug, Clone)]
pub struct UpdateSummary {
    /// The pyramid level that was sampled.
    pub level: u32,
    /// Per-camera outcomes, in camera index order.
    pub cameras: Vec<CameraUpdate>,
}

impl UpdateSummary {
    /// Number of cameras that had no usable coverage.
    pub fn no_data_count(&self) -> usize {
        self.cameras.iter().filter(|update| update.no_data).count()
    }
}

/// Runs one exposure-time update pass over this job's share of the
/// cameras.
///
/// For every owned camera the pass reads that camera's DRG tiles at the
/// camera's own transaction, reads the albedo underneath at its latest
/// version, fits the least-squares correction and writes the adjusted
/// exposure time back. A camera whose coverage yields no usable data is
/// written back unchanged so a later pass still sees a complete record.
///
/// Job 0 additionally advances the project's iteration counter, once,
/// alongside its first camera write. With `dry_run` set nothing is
/// written at all. The counter advance is purely positional, with no
/// coordination between jobs: the cooperating jobs must be launched
/// together as one pass, and re-running job 0 alone advances the counter
/// again.
///
/// DRG tiles are keyed by camera: camera `j` writes under transaction
/// `j + 1`, transaction 0 being reserved for the plate itself.
pub fn update_exposure_times(
    project: &dyn ProjectClient,
    drg: &dyn PlateStore,
    albedo: &dyn PlateStore,
    options: &UpdateOptions,
) -> Result<UpdateSummary, UpdateError> {
    let meta = project.get_project()?;

    if meta.reflectance != ReflectanceMode::None {
        return Err(UpdateError::ReflectanceNotImplemented(meta.reflectance));
    }

    let level = match options.level {
        Some(level) => level,
        None => drg.num_levels()?.saturating_sub(1),
    };

    let cameras = camera_range(meta.num_cameras, options.job_id, options.num_jobs);
    info!(
        project = %meta.name,
        num_cameras = meta.num_cameras,
        job_id = options.job_id,
        num_jobs = options.num_jobs,
        first_camera = cameras.start,
        end_camera = cameras.end,
        level,
        dry_run = options.dry_run,
        "starting exposure-time update"
    );

    let region = TileRegion::full_grid(level);
    let mut summary = UpdateSummary {
        level,
        cameras: Vec::with_capacity((cameras.end - cameras.start) as usize),
    };
    let mut iteration_advanced = false;

    for camera in cameras {
        let mut record = project.get_camera(camera)?;
        let previous = record.exposure_time;

        // Tiles written by camera j live under transaction j + 1.
        let transaction = u64::from(camera) + 1;
        let headers = drg.search_by_region(level, region, TransactionRange::exact(transaction))?;
        debug!(camera, tiles = headers.len(), "matched DRG tiles");

        let mut accumulator = TimeDeltaAccumulator::new(previous);
        for header in &headers {
            let Some(drg_tile) =
                drg.read_tile(level, header.col, header.row, TileVersion::Exact(transaction))?
            else {
                warn!(
                    camera,
                    col = header.col,
                    row = header.row,
                    "DRG tile listed by search is gone; skipping"
                );
                continue;
            };
            let Some(albedo_tile) =
                albedo.read_tile(level, header.col, header.row, TileVersion::Latest)?
            else {
                debug!(
                    camera,
                    col = header.col,
                    row = header.row,
                    "no albedo under DRG tile; skipping"
                );
                continue;
            };
            if drg_tile.dimensions() != albedo_tile.dimensions() {
                warn!(
                    camera,
                    col = header.col,
                    row = header.row,
                    drg_size = ?drg_tile.dimensions(),
                    albedo_size = ?albedo_tile.dimensions(),
                    "tile sizes disagree; skipping"
                );
                continue;
            }

            accumulator
                .accumulate_pairs(drg_tile.pixels().copied().zip(albedo_tile.pixels().copied()));
        }

        let (delta, no_data) = match accumulator.delta() {
            Some(delta) => (delta, false),
            None => (0.0, true),
        };
        record.exposure_time = previous + delta;

        if !options.dry_run {
            project.set_camera(camera, &record)?;
            if options.job_id == 0 && !iteration_advanced {
                project.set_iteration(meta.current_iteration + 1)?;
                iteration_advanced = true;
            }
        }

        info!(
            camera,
            exposure_time = record.exposure_time,
            delta,
            samples = accumulator.samples(),
            no_data,
            "camera exposure time updated"
        );
        summary.cameras.push(CameraUpdate {
            camera,
            exposure_time: record.exposure_time,
            delta,
            no_data,
        });
    }

    info!(
        cameras = summary.cameras.len(),
        no_data = summary.no_data_count(),
        level,
        "exposure-time update finished"
    );

    Ok(summary)
}
