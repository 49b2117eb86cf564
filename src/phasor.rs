//! Power factor, phase angle and harmonic distortion

use crate::table::{MeasurementTable, TableError};

#[derive(thiserror::Error, Debug)]
pub enum PhasorError {
    #[error("apparent power must be positive, found {0}")]
    ApparentPower(f64),
    #[error("active power must be non-negative, found {0}")]
    ActivePower(f64),
    #[error("active power {active} exceeds apparent power {apparent}")]
    Ratio { active: f64, apparent: f64 },
    #[error("no harmonic samples")]
    NoHarmonics,
    #[error(transparent)]
    Table(#[from] TableError),
}
type Result<T> = std::result::Result<T, PhasorError>;

/// Even voltage harmonics orders
pub const EVEN_HARMONICS: [u32; 5] = [2, 4, 6, 8, 10];
/// Odd voltage harmonics orders
pub const ODD_HARMONICS: [u32; 4] = [3, 5, 7, 9];

/// Column name of a voltage harmonic
pub fn harmonic_column(order: u32) -> String {
    format!("MaxU1({})", order)
}

/// Power factor and the angle between voltage and current
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerFactor {
    /// peak active power [W]
    pub active: f64,
    /// peak apparent power [VA]
    pub apparent: f64,
    /// cos θ
    pub cos_theta: f64,
}
impl PowerFactor {
    /// cos θ = P / S, with 0 ≤ P ≤ S and S > 0
    pub fn new(active: f64, apparent: f64) -> Result<Self> {
        if !(apparent > 0.) {
            return Err(PhasorError::ApparentPower(apparent));
        }
        if !(active >= 0.) {
            return Err(PhasorError::ActivePower(active));
        }
        if active > apparent {
            return Err(PhasorError::Ratio { active, apparent });
        }
        Ok(Self {
            active,
            apparent,
            cos_theta: active / apparent,
        })
    }
    /// Builds the power factor from the maxima of two power columns
    pub fn from_table(table: &MeasurementTable, active: &str, apparent: &str) -> Result<Self> {
        let p = table.summary(active)?.max;
        let s = table.summary(apparent)?.max;
        Self::new(p, s)
    }
    /// θ in radians, in [0, π/2]
    pub fn angle_rad(&self) -> f64 {
        self.cos_theta.acos()
    }
    /// θ in degrees
    pub fn angle_deg(&self) -> f64 {
        self.angle_rad().to_degrees()
    }
}

/// Largest value over the union of the even and odd harmonics columns
pub fn total_harmonic_distortion(table: &MeasurementTable) -> Result<f64> {
    let group_max = |orders: &[u32]| -> Result<Option<f64>> {
        orders.iter().try_fold(None, |acc: Option<f64>, &order| {
            let max = table.summary(&harmonic_column(order)).map(|s| s.max);
            match max {
                Ok(max) => Ok(Some(acc.map_or(max, |acc| acc.max(max)))),
                Err(TableError::Empty(_)) => Ok(acc),
                Err(e) => Err(e.into()),
            }
        })
    };
    let even = group_max(&EVEN_HARMONICS)?;
    let odd = group_max(&ODD_HARMONICS)?;
    match (even, odd) {
        (Some(e), Some(o)) => Ok(e.max(o)),
        (Some(x), None) | (None, Some(x)) => Ok(x),
        (None, None) => Err(PhasorError::NoHarmonics),
    }
}

/// The three scalars annotated on the vector diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasorSummary {
    pub power_factor: PowerFactor,
    pub thd: f64,
}
impl PhasorSummary {
    pub fn from_table(table: &MeasurementTable, active: &str, apparent: &str) -> Result<Self> {
        Ok(Self {
            power_factor: PowerFactor::from_table(table, active, apparent)?,
            thd: total_harmonic_distortion(table)?,
        })
    }
    pub fn angle_deg(&self) -> f64 {
        self.power_factor.angle_deg()
    }
}
