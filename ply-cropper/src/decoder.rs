/// Binary body decoding into fixed-schema points
use crate::constants::PROGRESS_INTERVAL;
use crate::header::PlyHeader;
use crate::point::{Point, PointSet};
use crate::report::{Phase, Reporter};

/// Decode the vertex rows that follow the header.
/// Fields whose bytes run past the end of `data` are left empty on that point,
/// and rows starting past the end are not produced at all. A layout without
/// known fields backs no rows, whatever the declared count.
pub fn decode_points(data: &[u8], header: PlyHeader, reporter: &dyn Reporter) -> PointSet {
    let PlyHeader {
        vertex_count,
        layout,
        body_offset,
    } = header;
    let stride = layout.stride();
    let rows = vertex_count.min(available_rows(data.len(), body_offset, stride));

    let mut points = Vec::with_capacity(rows);
    for i in 0..rows {
        let row_start = body_offset + i * stride;
        let values = layout
            .fields()
            .iter()
            .map(|field| {
                let start = row_start + field.offset;
                data.get(start..start + field.size())
                    .and_then(|bytes| field.scalar_type.decode_le(bytes))
            })
            .collect();
        points.push(Point::new(values));

        if i % PROGRESS_INTERVAL == 0 && i > 0 {
            reporter.progress(Phase::Decode, i, rows);
        }
    }
    reporter.progress(Phase::Decode, rows, rows);

    PointSet::new(layout, points)
}

/// Rows whose first byte lies inside the buffer.
fn available_rows(len: usize, body_offset: usize, stride: usize) -> usize {
    if stride == 0 {
        return 0;
    }
    len.saturating_sub(body_offset).div_ceil(stride)
}
