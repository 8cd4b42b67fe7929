//! Time, frequency, and depth grid definitions.
//!
//! Grids are validated at construction and immutable afterwards, so every
//! downstream consumer can rely on uniform spacing and monotonicity. The
//! synthesis path ties its frequency grid to the time grid: a record of `n`
//! samples at spacing `dt` is synthesized from `n` frequency bins at spacing
//! `1/(n*dt)`, which makes the component sum an inverse DFT. The simulated
//! duration should be much longer than the peak period so the periodic
//! wrap-around of that representation carries no energy.

use crate::error::WaveSimError;

/// Centered, uniformly sampled time grid.
///
/// Sample `j` of `n` sits at `t_j = (j - n/2) * dt`, putting `t = 0` at the
/// middle of the record; conditioned crests are focused there.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    values: Vec<f64>,
    dt: f64,
}

impl TimeGrid {
    /// Build a grid covering `duration_secs` at `sample_hz` samples per second.
    ///
    /// The sample rate must sit above the effective bandwidth of the spectrum
    /// being synthesized (4 Hz is ample for typical storm peak periods).
    pub fn new(duration_secs: f64, sample_hz: f64) -> Result<Self, WaveSimError> {
        if !(duration_secs > 0.0) || !duration_secs.is_finite() {
            return Err(WaveSimError::InvalidGrid(format!(
                "time grid duration must be positive and finite, got {}",
                duration_secs
            )));
        }
        if !(sample_hz > 0.0) || !sample_hz.is_finite() {
            return Err(WaveSimError::InvalidGrid(format!(
                "sample rate must be positive and finite, got {}",
                sample_hz
            )));
        }
        let n = (duration_secs * sample_hz).floor() as usize;
        if n < 2 {
            return Err(WaveSimError::InvalidGrid(format!(
                "time grid needs at least 2 samples, got {} ({} s at {} Hz)",
                n, duration_secs, sample_hz
            )));
        }
        let dt = 1.0 / sample_hz;
        let half = n as f64 / 2.0;
        let values = (0..n).map(|j| (j as f64 - half) * dt).collect();
        Ok(Self { values, dt })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the grid is empty (never true for a constructed grid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample spacing [s].
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Record duration [s].
    #[inline]
    pub fn duration(&self) -> f64 {
        self.values.len() as f64 * self.dt
    }

    /// Sample instants [s], centered on zero.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Strictly positive, uniformly spaced frequency grid [Hz].
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    values: Vec<f64>,
    df: f64,
}

/// Fraction of `df` used for the first bin of a synthesis grid, keeping the
/// grid strictly positive without a zero-frequency component.
const FIRST_BIN_FLOOR: f64 = 1e-3;

impl FrequencyGrid {
    /// The synthesis grid matched to a time grid: `n` bins at `df = 1/(n*dt)`.
    ///
    /// Bin `k` sits at `k * df`, except bin 0 which is floored at
    /// `1e-3 * df` so the grid stays strictly positive. Spectral models decay
    /// to zero there, so the bin carries no energy.
    pub fn for_record(time: &TimeGrid) -> Self {
        let n = time.len();
        let df = 1.0 / (n as f64 * time.dt());
        let values = (0..n)
            .map(|k| {
                if k == 0 {
                    FIRST_BIN_FLOOR * df
                } else {
                    k as f64 * df
                }
            })
            .collect();
        Self { values, df }
    }

    /// A free-standing uniform grid from `start` to `stop` inclusive.
    ///
    /// Used for spectral analysis (moments, autocorrelation) detached from
    /// any particular record length.
    pub fn uniform(start: f64, stop: f64, count: usize) -> Result<Self, WaveSimError> {
        if count < 2 {
            return Err(WaveSimError::InvalidGrid(format!(
                "frequency grid needs at least 2 points, got {}",
                count
            )));
        }
        if !(start > 0.0) || !start.is_finite() {
            return Err(WaveSimError::InvalidGrid(format!(
                "frequency grid must be strictly positive, starts at {}",
                start
            )));
        }
        if !(stop > start) || !stop.is_finite() {
            return Err(WaveSimError::InvalidGrid(format!(
                "frequency grid must be increasing, got start {} stop {}",
                start, stop
            )));
        }
        let df = (stop - start) / (count - 1) as f64;
        let values = (0..count).map(|k| start + k as f64 * df).collect();
        Ok(Self { values, df })
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the grid is empty (never true for a constructed grid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bin spacing [Hz].
    #[inline]
    pub fn df(&self) -> f64 {
        self.df
    }

    /// Bin frequencies [Hz].
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Bin angular frequencies [rad/s].
    pub fn angular(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|&f| 2.0 * std::f64::consts::PI * f)
            .collect()
    }

    /// Whether this grid is the synthesis grid of `time` (same bin count,
    /// spacing `1/(n*dt)`).
    pub fn matches_record(&self, time: &TimeGrid) -> bool {
        let n = time.len();
        if self.values.len() != n {
            return false;
        }
        let expected_df = 1.0 / (n as f64 * time.dt());
        (self.df - expected_df).abs() <= 1e-12 * expected_df
    }
}

/// Uniform vertical grid of evaluation levels [m], increasing upward.
///
/// Levels are measured from the still-water line (negative below it). The
/// resolution is a caller decision: load integrals converge as the spacing
/// shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    values: Vec<f64>,
    dz: f64,
}

impl DepthGrid {
    /// Build `count` levels from `z_min` up to `z_max` inclusive.
    ///
    /// A single-level grid is allowed but degenerate: it has zero vertical
    /// measure, so depth integrals over it collapse to zero.
    pub fn new(z_min: f64, z_max: f64, count: usize) -> Result<Self, WaveSimError> {
        if count == 0 {
            return Err(WaveSimError::InvalidGrid(
                "depth grid must have at least 1 level".into(),
            ));
        }
        if !z_min.is_finite() || !z_max.is_finite() {
            return Err(WaveSimError::InvalidGrid(format!(
                "depth grid bounds must be finite, got [{}, {}]",
                z_min, z_max
            )));
        }
        if count == 1 {
            return Ok(Self {
                values: vec![z_min],
                dz: 0.0,
            });
        }
        if !(z_max > z_min) {
            return Err(WaveSimError::InvalidGrid(format!(
                "depth grid must be increasing, got [{}, {}]",
                z_min, z_max
            )));
        }
        let dz = (z_max - z_min) / (count - 1) as f64;
        let values = (0..count).map(|i| z_min + i as f64 * dz).collect();
        Ok(Self { values, dz })
    }

    /// Number of levels.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the grid is empty (never true for a constructed grid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Level spacing [m]; zero for a single-level grid.
    #[inline]
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Level elevations [m], negative below the still-water line.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_grid_centered() {
        let t = TimeGrid::new(60.0, 4.0).unwrap();
        assert_eq!(t.len(), 240);
        assert_eq!(t.dt(), 0.25);
        // t_j = (j - n/2) * dt
        assert_eq!(t.values()[0], -120.0 * 0.25);
        assert_eq!(t.values()[120], 0.0);
        assert_eq!(t.values()[239], 119.0 * 0.25);
    }

    #[test]
    fn test_time_grid_rejects_bad_parameters() {
        assert!(TimeGrid::new(0.0, 4.0).is_err());
        assert!(TimeGrid::new(-10.0, 4.0).is_err());
        assert!(TimeGrid::new(60.0, 0.0).is_err());
        assert!(TimeGrid::new(0.25, 4.0).is_err()); // one sample
        assert!(TimeGrid::new(f64::NAN, 4.0).is_err());
    }

    #[test]
    fn test_frequency_grid_for_record() {
        let t = TimeGrid::new(100.0, 4.0).unwrap();
        let f = FrequencyGrid::for_record(&t);
        assert_eq!(f.len(), t.len());
        let df = 1.0 / (t.len() as f64 * t.dt());
        assert!((f.df() - df).abs() < 1e-15);
        assert!((f.values()[1] - df).abs() < 1e-15);
        assert!((f.values()[7] - 7.0 * df).abs() < 1e-12);
        // first bin floored, strictly positive
        assert!(f.values()[0] > 0.0);
        assert!(f.values()[0] < df);
        assert!(f.matches_record(&t));
    }

    #[test]
    fn test_frequency_grid_strictly_increasing() {
        let t = TimeGrid::new(30.0, 4.0).unwrap();
        let f = FrequencyGrid::for_record(&t);
        for w in f.values().windows(2) {
            assert!(w[1] > w[0], "grid not increasing: {} >= {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_frequency_grid_uniform() {
        let f = FrequencyGrid::uniform(0.01, 1.0, 100).unwrap();
        assert_eq!(f.len(), 100);
        assert!((f.df() - 0.01).abs() < 1e-12);
        assert!((f.values()[99] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_frequency_grid_uniform_rejects_bad_parameters() {
        assert!(FrequencyGrid::uniform(0.0, 1.0, 10).is_err()); // not strictly positive
        assert!(FrequencyGrid::uniform(-0.1, 1.0, 10).is_err());
        assert!(FrequencyGrid::uniform(1.0, 0.5, 10).is_err()); // decreasing
        assert!(FrequencyGrid::uniform(0.1, 1.0, 1).is_err()); // too few
    }

    #[test]
    fn test_frequency_grid_angular() {
        let f = FrequencyGrid::uniform(0.5, 1.5, 3).unwrap();
        let om = f.angular();
        assert!((om[0] - std::f64::consts::PI).abs() < 1e-12);
        assert!((om[2] - 3.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_matches_record_detects_mismatch() {
        let t1 = TimeGrid::new(100.0, 4.0).unwrap();
        let t2 = TimeGrid::new(120.0, 4.0).unwrap();
        let f = FrequencyGrid::for_record(&t1);
        assert!(!f.matches_record(&t2));
    }

    #[test]
    fn test_depth_grid() {
        let z = DepthGrid::new(-100.0, 50.0, 151).unwrap();
        assert_eq!(z.len(), 151);
        assert!((z.dz() - 1.0).abs() < 1e-12);
        assert_eq!(z.values()[0], -100.0);
        assert!((z.values()[150] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_depth_grid_single_level_degenerate() {
        let z = DepthGrid::new(-10.0, -10.0, 1).unwrap();
        assert_eq!(z.len(), 1);
        assert_eq!(z.dz(), 0.0);
    }

    #[test]
    fn test_depth_grid_rejects_bad_parameters() {
        assert!(DepthGrid::new(-10.0, -20.0, 5).is_err()); // decreasing
        assert!(DepthGrid::new(-10.0, -10.0, 5).is_err()); // zero span, several levels
        assert!(DepthGrid::new(-10.0, 0.0, 0).is_err()); // empty
        assert!(DepthGrid::new(f64::INFINITY, 0.0, 5).is_err());
    }
}
