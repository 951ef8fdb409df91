/// Visual importance ranking for progressive splat loading
use crate::point::{Point, PointSet, VertexLayout};

/// Score used when a point has no complete scale triple.
pub const DEFAULT_IMPORTANCE: f64 = 1.0;

/// Splat volume weighted by its opacity.
/// `exp(scale_0) * exp(scale_1) * exp(scale_2) * sigmoid(opacity)`, with the
/// opacity factor at 1.0 when absent and the whole score at 1.0 without scales.
pub fn importance(layout: &VertexLayout, point: &Point) -> f64 {
    let [s0, s1, s2] = layout.scale_indices();
    let (Some(s0), Some(s1), Some(s2)) = (point.get_f64(s0), point.get_f64(s1), point.get_f64(s2))
    else {
        return DEFAULT_IMPORTANCE;
    };

    let size = s0.exp() * s1.exp() * s2.exp();
    let opacity = point
        .get_f64(layout.opacity_index())
        .map_or(1.0, |o| 1.0 / (1.0 + (-o).exp()));
    size * opacity
}

/// Reorder points by descending importance.
/// The sort is stable, so equal scores keep their input order.
pub fn sort_by_importance(points: PointSet) -> PointSet {
    let (layout, points) = points.into_parts();
    let mut scored: Vec<(f64, Point)> = points
        .into_iter()
        .map(|point| (importance(&layout, &point), point))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    PointSet::new(layout, scored.into_iter().map(|(_, point)| point).collect())
}
