//! Camera index partitioning for cooperating jobs.
//!
//! A run can be split across several independently launched jobs. Each job
//! owns a contiguous slice of the camera index space so that no camera is
//! processed twice and none is skipped, whatever the job count.

use std::ops::Range;

/// Returns the half-open range of camera indices owned by `job_id`.
///
/// Boundaries are `num_cameras * job / num_jobs` rounded down, computed in
/// 64-bit integers so the result is exact for any `u32` camera count.
/// Consecutive jobs therefore tile `0..num_cameras` with ranges whose
/// lengths differ by at most one; when there are more jobs than cameras
/// the surplus jobs receive empty ranges.
///
/// # Panics
///
/// Panics if `num_jobs` is zero or `job_id` is not below `num_jobs`.
pub fn camera_range(num_cameras: u32, job_id: u32, num_jobs: u32) -> Range<u32> {
    assert!(num_jobs >= 1, "num_jobs must be at least 1");
    assert!(
        job_id < num_jobs,
        "job_id {} out of range for {} jobs",
        job_id,
        num_jobs
    );

    let cameras = u64::from(num_cameras);
    let start = cameras * u64::from(job_id) / u64::from(num_jobs);
    let end = cameras * (u64::from(job_id) + 1) / u64::from(num_jobs);

    // Both bounds are <= num_cameras, so the casts cannot truncate.
    start as u32..end as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_job_owns_every_camera() {
        assert_eq!(camera_range(10, 0, 1), 0..10);
        assert_eq!(camera_range(1, 0, 1), 0..1);
        assert_eq!(camera_range(0, 0, 1), 0..0);
    }

    #[test]
    fn test_ranges_tile_the_index_space() {
        for &(num_cameras, num_jobs) in &[
            (1u32, 1u32),
            (5, 3),
            (16, 4),
            (7, 10),
            (100, 7),
            (3, 8),
            (1000, 13),
        ] {
            let mut next = 0;
            for job_id in 0..num_jobs {
                let range = camera_range(num_cameras, job_id, num_jobs);
                assert_eq!(
                    range.start, next,
                    "gap or overlap at job {} of {} for {} cameras",
                    job_id, num_jobs, num_cameras
                );
                assert!(range.end >= range.start);
                next = range.end;
            }
            assert_eq!(next, num_cameras);
        }
    }

    #[test]
    fn test_ranges_are_near_equal() {
        for job_id in 0..7 {
            let range = camera_range(100, job_id, 7);
            let len = range.end - range.start;
            assert!(len == 14 || len == 15, "job {} got {} cameras", job_id, len);
        }
    }

    #[test]
    fn test_more_jobs_than_cameras_leaves_empty_ranges() {
        let mut nonempty = 0;
        for job_id in 0..10 {
            let range = camera_range(3, job_id, 10);
            if !range.is_empty() {
                assert_eq!(range.end - range.start, 1);
                nonempty += 1;
            }
        }
        assert_eq!(nonempty, 3);
    }

    #[test]
    fn test_zero_cameras_gives_empty_ranges() {
        for job_id in 0..4 {
            assert!(camera_range(0, job_id, 4).is_empty());
        }
    }

    #[test]
    fn test_large_counts_stay_exact() {
        // Single-precision arithmetic would misplace these boundaries.
        let first = camera_range(4_000_000_000, 0, 3);
        let second = camera_range(4_000_000_000, 1, 3);
        let third = camera_range(4_000_000_000, 2, 3);

        assert_eq!(first.start, 0);
        assert_eq!(first.end, second.start);
        assert_eq!(second.end, third.start);
        assert_eq!(third.end, 4_000_000_000);
        assert_eq!(first.end, 1_333_333_333);
    }

    #[test]
    #[should_panic(expected = "num_jobs")]
    fn test_zero_jobs_panics() {
        camera_range(10, 0, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_job_id_beyond_job_count_panics() {
        camera_range(10, 3, 3);
    }
}
