/// Spatial crop filter
use crate::bounds::{CropBounds, DataBounds};
use crate::point::PointSet;
use serde::Serialize;

/// Counts and observed extents from one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterSummary {
    pub input_points: usize,
    pub retained_points: usize,
    /// Min/max of every input position, before cropping
    pub data_bounds: DataBounds,
}

impl FilterSummary {
    /// Share of points removed by the crop, as a percentage.
    pub fn reduction_percent(&self) -> f64 {
        if self.input_points == 0 {
            return 0.0;
        }
        (1.0 - self.retained_points as f64 / self.input_points as f64) * 100.0
    }
}

/// Keep the points inside `bounds`, preserving their order.
/// Absent x/y/z fields read as 0, so such points are tested at the origin.
pub fn crop_points(points: PointSet, bounds: &CropBounds) -> (PointSet, FilterSummary) {
    let (layout, points) = points.into_parts();
    let [xi, yi, zi] = layout.position_indices();
    let input_points = points.len();
    let mut data_bounds = DataBounds::new();

    let retained: Vec<_> = points
        .into_iter()
        .filter(|point| {
            let x = point.get_f64(xi).unwrap_or(0.0);
            let y = point.get_f64(yi).unwrap_or(0.0);
            let z = point.get_f64(zi).unwrap_or(0.0);
            data_bounds.update(x, y, z);
            bounds.contains(x, y, z)
        })
        .collect();

    let summary = FilterSummary {
        input_points,
        retained_points: retained.len(),
        data_bounds,
    };
    (PointSet::new(layout, retained), summary)
}
