/// Single file crop pipeline: parse, decode, crop, rank, encode.
use crate::bounds::{CropBounds, DataBounds};
use crate::decoder::decode_points;
use crate::encoder::encode_points;
use crate::error::FormatError;
use crate::filter::crop_points;
use crate::header::parse_header;
use crate::importance::sort_by_importance;
use crate::report::Reporter;
use serde::Serialize;

/// Size and count statistics of a written transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// `(1 - output/input) * 100`
    pub size_reduction_percent: f64,
    /// Vertex count declared by the input header.
    pub declared_points: usize,
    /// Points actually decoded, lower than declared for truncated bodies.
    pub decoded_points: usize,
    pub output_points: usize,
    pub data_bounds: DataBounds,
}

impl TransformStats {
    fn new(
        input_bytes: usize,
        output_bytes: usize,
        declared_points: usize,
        decoded_points: usize,
        output_points: usize,
        data_bounds: DataBounds,
    ) -> Self {
        let size_reduction_percent = if input_bytes == 0 {
            0.0
        } else {
            (1.0 - output_bytes as f64 / input_bytes as f64) * 100.0
        };
        Self {
            input_bytes,
            output_bytes,
            size_reduction_percent,
            declared_points,
            decoded_points,
            output_points,
            data_bounds,
        }
    }
}

/// The crop removed every point; nothing should be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyResult {
    pub input_bytes: usize,
    pub declared_points: usize,
    pub input_points: usize,
    pub data_bounds: DataBounds,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    /// A complete output file.
    Written {
        output: Vec<u8>,
        stats: TransformStats,
    },
    Empty(EmptyResult),
}

/// Crop and reorder configuration applied to each file.
/// Holds no per-file state, so one instance can serve any number of calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropTransform {
    bounds: CropBounds,
    sort_by_importance: bool,
}

impl CropTransform {
    pub fn new(bounds: CropBounds) -> Self {
        Self {
            bounds,
            sort_by_importance: true,
        }
    }

    /// Enable or disable the importance reorder; when off the filtered order is kept.
    pub fn with_importance_sort(mut self, enabled: bool) -> Self {
        self.sort_by_importance = enabled;
        self
    }

    /// Run the whole pipeline over the bytes of one PLY file.
    pub fn transform(
        &self,
        input: &[u8],
        reporter: &dyn Reporter,
    ) -> Result<TransformOutcome, FormatError> {
        reporter.input_loaded(input.len());

        let header = parse_header(input)?;
        reporter.header_parsed(&header);
        let declared_points = header.vertex_count;

        let decoded = decode_points(input, header, reporter);
        let (cropped, summary) = crop_points(decoded, &self.bounds);
        reporter.filtered(&summary, &self.bounds);

        if cropped.is_empty() {
            let result = EmptyResult {
                input_bytes: input.len(),
                declared_points,
                input_points: summary.input_points,
                data_bounds: summary.data_bounds,
            };
            reporter.empty(&result);
            return Ok(TransformOutcome::Empty(result));
        }

        let ordered = if self.sort_by_importance {
            let sorted = sort_by_importance(cropped);
            reporter.sorted(sorted.len());
            sorted
        } else {
            cropped
        };

        let output = encode_points(&ordered, reporter);
        let stats = TransformStats::new(
            input.len(),
            output.len(),
            declared_points,
            summary.input_points,
            ordered.len(),
            summary.data_bounds,
        );
        reporter.completed(&stats);

        Ok(TransformOutcome::Written { output, stats })
    }
}
