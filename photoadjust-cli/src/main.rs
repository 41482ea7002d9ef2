//! PhotoAdjust CLI - Command-line interface
//!
//! This binary runs one exposure-time update pass against a photometry
//! project. Point it at the project service; the DRG and albedo plate
//! URLs are discovered from the project itself.

mod error;

use clap::Parser;
use error::CliError;
use photoadjust::exposure::{update_exposure_times, UpdateOptions, UpdateSummary};
use photoadjust::http::ReqwestClient;
use photoadjust::logging::init_logging;
use photoadjust::plate::HttpPlateStore;
use photoadjust::project::{HttpProjectClient, ProjectClient};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "photoadjust")]
#[command(version = photoadjust::VERSION)]
#[command(about = "Update per-camera exposure times against the current albedo mosaic", long_about = None)]
struct Args {
    /// Project service URL, e.g. http://ptk.example.org/projects/apollo15
    #[arg(value_name = "PROJECT-URL")]
    project_url: String,

    /// Pyramid level to sample (negative selects the finest level)
    #[arg(long, short = 'l', default_value_t = -1, allow_negative_numbers = true)]
    level: i32,

    /// Compute and report corrections without writing anything back
    #[arg(long)]
    dry_run: bool,

    /// Index of this job within the cooperating set
    #[arg(long, short = 'j', alias = "job_id", default_value_t = 0)]
    job_id: u32,

    /// Total number of cooperating jobs
    #[arg(long, short = 'n', alias = "num_jobs", default_value_t = 1)]
    num_jobs: u32,

    /// HTTP timeout in seconds for metadata and tile requests
    #[arg(long, default_value_t = photoadjust::http::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(long)]
    debug: bool,
}

/// Maps the CLI level sentinel onto the library option: negative means
/// "finest level the plate has".
fn level_option(level: i32) -> Option<u32> {
    if level < 0 {
        None
    } else {
        Some(level as u32)
    }
}

/// Rejects job layouts the partitioner cannot act on: a zero job count
/// or a job index outside it. Checked up front so a bad launch fails
/// before anything is fetched.
fn validate_job_args(job_id: u32, num_jobs: u32) -> Result<(), CliError> {
    if num_jobs == 0 {
        return Err(CliError::InvalidArguments(
            "--num-jobs must be at least 1".to_string(),
        ));
    }
    if job_id >= num_jobs {
        return Err(CliError::InvalidArguments(format!(
            "--job-id {} is out of range for {} jobs",
            job_id, num_jobs
        )));
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let _logging = init_logging(args.log_file.as_deref(), args.debug)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    validate_job_args(args.job_id, args.num_jobs)?;

    tracing::info!(
        version = photoadjust::VERSION,
        project_url = %args.project_url,
        "photoadjust starting"
    );

    let http = ReqwestClient::with_timeout(args.timeout_secs).map_err(CliError::HttpClient)?;
    let project = HttpProjectClient::new(http.clone(), &args.project_url);

    let plates = project.get_platefiles().map_err(CliError::Project)?;
    let drg = HttpPlateStore::new(http.clone(), &plates.drg);
    let albedo = HttpPlateStore::new(http, &plates.albedo);
    tracing::info!(
        drg = drg.base_url(),
        albedo = albedo.base_url(),
        "resolved plate stores"
    );

    let options = UpdateOptions {
        level: level_option(args.level),
        dry_run: args.dry_run,
        job_id: args.job_id,
        num_jobs: args.num_jobs,
    };

    let summary = update_exposure_times(&project, &drg, &albedo, &options)?;

    print_report(&summary, args.dry_run);
    Ok(())
}

fn print_report(summary: &UpdateSummary, dry_run: bool) {
    println!();
    println!(
        "Processed {} cameras at level {} ({} with no data)",
        summary.cameras.len(),
        summary.level,
        summary.no_data_count()
    );
    for update in &summary.cameras {
        let marker = if update.no_data { "  [no data]" } else { "" };
        println!(
            "  camera[{:>4}]  exposure time {:>12.6}  delta {:>+12.6}{}",
            update.camera, update.exposure_time, update.delta, marker
        );
    }

    if dry_run {
        println!("✓ Dry run complete, nothing was written");
    } else {
        println!("✓ Exposure-time update complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["photoadjust", "http://ptk/apollo15"]);

        assert_eq!(args.project_url, "http://ptk/apollo15");
        assert_eq!(args.level, -1);
        assert!(!args.dry_run);
        assert_eq!(args.job_id, 0);
        assert_eq!(args.num_jobs, 1);
        assert_eq!(args.timeout_secs, 30);
        assert_eq!(args.log_file, None);
        assert!(!args.debug);
    }

    #[test]
    fn test_all_options_parse() {
        let args = Args::parse_from([
            "photoadjust",
            "http://ptk/apollo15",
            "--level",
            "9",
            "--dry-run",
            "--job-id",
            "2",
            "--num-jobs",
            "8",
            "--timeout-secs",
            "120",
            "--log-file",
            "logs/run.log",
            "--debug",
        ]);

        assert_eq!(args.level, 9);
        assert!(args.dry_run);
        assert_eq!(args.job_id, 2);
        assert_eq!(args.num_jobs, 8);
        assert_eq!(args.timeout_secs, 120);
        assert_eq!(args.log_file, Some(PathBuf::from("logs/run.log")));
        assert!(args.debug);
    }

    #[test]
    fn test_underscore_aliases_accepted() {
        let args = Args::parse_from([
            "photoadjust",
            "http://ptk/apollo15",
            "--job_id",
            "3",
            "--num_jobs",
            "4",
        ]);

        assert_eq!(args.job_id, 3);
        assert_eq!(args.num_jobs, 4);
    }

    #[test]
    fn test_short_flags_parse() {
        let args = Args::parse_from([
            "photoadjust",
            "http://ptk/apollo15",
            "-l",
            "-1",
            "-j",
            "1",
            "-n",
            "2",
        ]);

        assert_eq!(args.level, -1);
        assert_eq!(args.job_id, 1);
        assert_eq!(args.num_jobs, 2);
    }

    #[test]
    fn test_missing_url_is_rejected() {
        assert!(Args::try_parse_from(["photoadjust"]).is_err());
    }

    #[test]
    fn test_level_sentinel_resolution() {
        assert_eq!(level_option(-1), None);
        assert_eq!(level_option(-7), None);
        assert_eq!(level_option(0), Some(0));
        assert_eq!(level_option(12), Some(12));
    }

    #[test]
    fn test_zero_jobs_parses_but_fails_validation() {
        // clap places no constraint on the count; the guard is ours.
        let args = Args::parse_from(["photoadjust", "http://ptk/apollo15", "--num-jobs", "0"]);

        assert!(matches!(
            validate_job_args(args.job_id, args.num_jobs),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_out_of_range_job_id_fails_validation() {
        let args = Args::parse_from([
            "photoadjust",
            "http://ptk/apollo15",
            "--job-id",
            "3",
            "--num-jobs",
            "3",
        ]);

        assert!(matches!(
            validate_job_args(args.job_id, args.num_jobs),
            Err(CliError::InvalidArguments(_))
        ));
        assert!(matches!(
            validate_job_args(7, 3),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_in_range_job_args_validate() {
        assert!(validate_job_args(0, 1).is_ok());
        assert!(validate_job_args(2, 3).is_ok());
        assert!(validate_job_args(0, 5).is_ok());
    }
}
