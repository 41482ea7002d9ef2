//! Least-squares accumulation of the exposure-time correction.

use image::LumaA;

/// Running sums for one camera's exposure-time correction.
///
/// Each valid pixel pair contributes to a closed-form least-squares fit of
/// the correction `delta` that minimizes `(I - (T + delta) * A)^2` over the
/// camera's coverage, where `I` is the observed DRG intensity, `A` the
/// albedo underneath it, `S` the DRG alpha acting as sample weight, and `T`
/// the camera's current exposure time:
///
/// ```text
/// delta = sum((I - T * A) * A * S) / sum((A * S)^2)
/// ```
///
/// Sums are kept in `f64` regardless of the `f32` pixel type, so the order
/// in which tiles are visited does not measurably change the result.
#[derive(Debug, Clone)]
pub struct TimeDeltaAccumulator {
    exposure_time: f64,
    numerator: f64,
    denominator: f64,
    samples: u64,
}

impl TimeDeltaAccumulator {
    /// Creates an empty accumulator for a camera whose current exposure
    /// time estimate is `exposure_time`.
    pub fn new(exposure_time: f64) -> Self {
        Self {
            exposure_time,
            numerator: 0.0,
            denominator: 0.0,
            samples: 0,
        }
    }

    /// The exposure time the correction is relative to.
    pub fn exposure_time(&self) -> f64 {
        self.exposure_time
    }

    /// Folds in one DRG/albedo pixel pair.
    ///
    /// A pair where either alpha is zero carries no data and leaves the
    /// sums untouched, whatever the value channels hold.
    pub fn accumulate(&mut self, drg: LumaA<f32>, albedo: LumaA<f32>) {
        let LumaA([intensity, weight]) = drg;
        let LumaA([albedo_value, albedo_alpha]) = albedo;

        if weight == 0.0 || albedo_alpha == 0.0 {
            return;
        }

        let intensity = f64::from(intensity);
        let weight = f64::from(weight);
        let albedo_value = f64::from(albedo_value);

        let weighted_albedo = albedo_value * weight;
        self.numerator += (intensity - self.exposure_time * albedo_value) * weighted_albedo;
        self.denominator += weighted_albedo * weighted_albedo;
        self.samples += 1;
    }

    /// Folds in every pixel pair of an iterator, in order.
    pub fn accumulate_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (LumaA<f32>, LumaA<f32>)>,
    {
        for (drg, albedo) in pairs {
            self.accumulate(drg, albedo);
        }
    }

    /// Number of pixel pairs that entered the sums.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// The fitted correction, or `None` when no usable data was seen.
    ///
    /// The denominator is zero exactly when every contribution had zero
    /// weighted albedo, in which case the fit is undefined and the camera
    /// must keep its current exposure time.
    pub fn delta(&self) -> Option<f64> {
        if self.denominator == 0.0 {
            None
        } else {
            Some(self.numerator / self.denominator)
        }
    }
}
