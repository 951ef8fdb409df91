/// Crop box definition and observed coordinate bounds tracking
use crate::constants::DEFAULT_CROP_EXTENT;
use crate::error::BoundsError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Inclusive axis-aligned box used to retain points.
/// `min <= max` per axis is the caller's responsibility; inverted axes match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl CropBounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Cube spanning `-extent..=extent` on every axis.
    pub fn cube(extent: f64) -> Self {
        Self::new(-extent, extent, -extent, extent, -extent, extent)
    }

    /// Inclusive containment test on all three axes
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.min_x <= x
            && x <= self.max_x
            && self.min_y <= y
            && y <= self.max_y
            && self.min_z <= z
            && z <= self.max_z
    }
}

impl Default for CropBounds {
    fn default() -> Self {
        Self::cube(DEFAULT_CROP_EXTENT)
    }
}

/// Parses `minX,maxX,minY,maxY,minZ,maxZ`.
impl FromStr for CropBounds {
    type Err = BoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| BoundsError::InvalidNumber(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            &[min_x, max_x, min_y, max_y, min_z, max_z] => {
                Ok(Self::new(min_x, max_x, min_y, max_y, min_z, max_z))
            }
            other => Err(BoundsError::WrongValueCount(other.len())),
        }
    }
}

impl fmt::Display for CropBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {} to {}, Y: {} to {}, Z: {} to {}",
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z
        )
    }
}

/// Observed min/max of point positions, tracked for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl DataBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// Update bounds with a new point
    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    /// True until at least one point has been observed
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }
}

impl Default for DataBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DataBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no points");
        }
        write!(
            f,
            "X: {:.2} to {:.2}, Y: {:.2} to {:.2}, Z: {:.2} to {:.2}",
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z
        )
    }
}
