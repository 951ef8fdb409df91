//! Crop binary PLY point clouds to a bounding box and reorder the survivors by splat importance.
pub mod batch;
pub mod bounds;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod header;
pub mod importance;
pub mod point;
pub mod report;
pub mod transform;

pub use bounds::{CropBounds, DataBounds};
pub use error::{BoundsError, CropError, FormatError};
pub use point::{FieldSpec, Point, PointSet, Scalar, ScalarType, VertexLayout};
pub use report::{ConsoleReporter, NullReporter, Reporter};
pub use transform::{CropTransform, EmptyResult, TransformOutcome, TransformStats};
