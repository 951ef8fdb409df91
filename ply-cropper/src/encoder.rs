/// Binary little-endian PLY writer
use crate::constants::{BINARY_FORMAT_LINE, PROGRESS_INTERVAL};
use crate::point::{PointSet, VertexLayout};
use crate::report::{Phase, Reporter};

/// Header text declaring `vertex_count` rows of `layout`.
pub fn encode_header(layout: &VertexLayout, vertex_count: usize) -> String {
    let mut header = String::from("ply\n");
    header.push_str(BINARY_FORMAT_LINE);
    header.push('\n');
    header.push_str(&format!("element vertex {}\n", vertex_count));
    for field in layout.fields() {
        header.push_str(&format!(
            "property {} {}\n",
            field.scalar_type.ply_name(),
            field.name
        ));
    }
    header.push_str("end_header\n");
    header
}

/// Serialize the set as a complete PLY file.
/// Missing values are written as zero of the field's type, so every row is exactly one stride long.
pub fn encode_points(points: &PointSet, reporter: &dyn Reporter) -> Vec<u8> {
    let layout = points.layout();
    let total = points.len();
    let header = encode_header(layout, total);

    let mut out = Vec::with_capacity(header.len() + total * layout.stride());
    out.extend_from_slice(header.as_bytes());

    for (i, point) in points.points().iter().enumerate() {
        for (index, field) in layout.fields().iter().enumerate() {
            let value = point
                .get(index)
                .map_or_else(|| field.scalar_type.zero(), |v| v.cast(field.scalar_type));
            value.write_le(&mut out);
        }

        if i % PROGRESS_INTERVAL == 0 && i > 0 {
            reporter.progress(Phase::Encode, i, total);
        }
    }
    reporter.progress(Phase::Encode, total, total);

    out
}
