use crate::math::Point3;

/// Number of chord samples taken along each sub-curve.
pub const ARC_SAMPLES: usize = 100;

/// Cumulative arc-length table for a chain of sub-curves.
///
/// Distances are measured from the start of the whole chain, so the last
/// sample of sub-curve `i` equals `lengths[i]`.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f64>,
    samples: Vec<[f64; ARC_SAMPLES + 1]>,
}

impl ArcLengthTable {
    /// Samples `count` sub-curves through `point(index, t)`, summing chord lengths.
    pub fn sample(count: usize, point: impl Fn(usize, f64) -> Point3) -> Self {
        let mut lengths = Vec::with_capacity(count);
        let mut samples = Vec::with_capacity(count);
        let mut distance = 0.0;
        let mut previous = point(0, 0.0);

        for index in 0..count {
            let mut row = [0.0; ARC_SAMPLES + 1];
            for (step, slot) in row.iter_mut().enumerate() {
                let current = point(index, step_parameter(step));
                distance += (current - previous).norm();
                *slot = distance;
                previous = current;
            }
            samples.push(row);
            lengths.push(distance);
        }

        Self { lengths, samples }
    }

    /// Cumulative length at the end of each sub-curve.
    #[must_use]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Total chain length.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Index of the sub-curve containing `distance`.
    #[must_use]
    pub fn index(&self, distance: f64) -> usize {
        sub_curve_index(&self.lengths, distance)
    }

    /// Local curve parameter for a chain distance on sub-curve `index`.
    ///
    /// Interpolates between the two bracketing samples. Distances before the
    /// first sample give `0.0`; distances past the last give `1.0`.
    #[must_use]
    pub fn local_parameter(&self, index: usize, distance: f64) -> f64 {
        let Some(row) = self.samples.get(index) else {
            return 1.0;
        };
        let Some(next) = row.iter().position(|&s| distance < s) else {
            return 1.0;
        };
        if next == 0 {
            return 0.0;
        }
        let (lo, hi) = (row[next - 1], row[next]);
        let frac = (distance - lo) / (hi - lo);
        #[allow(clippy::cast_precision_loss)]
        let t = (((next - 1) as f64) + frac) / ARC_SAMPLES as f64;
        t.clamp(0.0, 1.0)
    }
}

/// Curve parameter of sample `step`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn step_parameter(step: usize) -> f64 {
    step as f64 / ARC_SAMPLES as f64
}

/// First index whose cumulative length exceeds `distance`, clamped to the chain.
#[must_use]
pub fn sub_curve_index(lengths: &[f64], distance: f64) -> usize {
    if distance < 0.0 {
        return 0;
    }
    lengths
        .iter()
        .position(|&len| distance < len)
        .unwrap_or_else(|| lengths.len().saturating_sub(1))
}

/// Cumulative chord distance of the sample closest to `target`.
///
/// Walks every sample of every sub-curve: O(count × [`ARC_SAMPLES`]).
/// An empty chain yields `0.0`.
pub fn nearest_sample_distance(
    count: usize,
    target: &Point3,
    point: impl Fn(usize, f64) -> Point3,
) -> f64 {
    if count == 0 {
        return 0.0;
    }

    let mut result = 0.0;
    let mut closest = f64::MAX;
    let mut travelled = 0.0;
    let mut previous = point(0, 0.0);

    for index in 0..count {
        for step in 0..=ARC_SAMPLES {
            let current = point(index, step_parameter(step));
            travelled += (current - previous).norm();
            previous = current;

            let d = (current - target).norm();
            if d < closest {
                closest = d;
                result = travelled;
            }
        }
    }
    result
}
