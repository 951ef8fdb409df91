/// Fixed-schema vertex records described by the parsed property layout
use serde::Serialize;

/// Scalar property types understood by the reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarType {
    Float64,
    Int32,
    Uint32,
    Float32,
    Int16,
    Uint16,
    Uint8,
}

impl ScalarType {
    /// Look up the type named by a `property <type> <name>` header line.
    /// Returns `None` for tokens outside the fixed table, including `list`.
    pub fn from_ply_name(token: &str) -> Option<Self> {
        match token {
            "double" => Some(Self::Float64),
            "int" => Some(Self::Int32),
            "uint" => Some(Self::Uint32),
            "float" => Some(Self::Float32),
            "short" => Some(Self::Int16),
            "ushort" => Some(Self::Uint16),
            "uchar" => Some(Self::Uint8),
            _ => None,
        }
    }

    pub fn ply_name(self) -> &'static str {
        match self {
            Self::Float64 => "double",
            Self::Int32 => "int",
            Self::Uint32 => "uint",
            Self::Float32 => "float",
            Self::Int16 => "short",
            Self::Uint16 => "ushort",
            Self::Uint8 => "uchar",
        }
    }

    pub fn size(self) -> usize {
        match self {
            Self::Float64 => 8,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int16 | Self::Uint16 => 2,
            Self::Uint8 => 1,
        }
    }

    /// Decode a little-endian value. `bytes` must be exactly `size()` long.
    pub fn decode_le(self, bytes: &[u8]) -> Option<Scalar> {
        let value = match self {
            Self::Float64 => Scalar::Float64(f64::from_le_bytes(bytes.try_into().ok()?)),
            Self::Int32 => Scalar::Int32(i32::from_le_bytes(bytes.try_into().ok()?)),
            Self::Uint32 => Scalar::Uint32(u32::from_le_bytes(bytes.try_into().ok()?)),
            Self::Float32 => Scalar::Float32(f32::from_le_bytes(bytes.try_into().ok()?)),
            Self::Int16 => Scalar::Int16(i16::from_le_bytes(bytes.try_into().ok()?)),
            Self::Uint16 => Scalar::Uint16(u16::from_le_bytes(bytes.try_into().ok()?)),
            Self::Uint8 => Scalar::Uint8(u8::from_le_bytes(bytes.try_into().ok()?)),
        };
        Some(value)
    }

    pub fn zero(self) -> Scalar {
        match self {
            Self::Float64 => Scalar::Float64(0.0),
            Self::Int32 => Scalar::Int32(0),
            Self::Uint32 => Scalar::Uint32(0),
            Self::Float32 => Scalar::Float32(0.0),
            Self::Int16 => Scalar::Int16(0),
            Self::Uint16 => Scalar::Uint16(0),
            Self::Uint8 => Scalar::Uint8(0),
        }
    }
}

/// A decoded property value kept in its native width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Float64(f64),
    Int32(i32),
    Uint32(u32),
    Float32(f32),
    Int16(i16),
    Uint16(u16),
    Uint8(u8),
}

impl Scalar {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Self::Float64(_) => ScalarType::Float64,
            Self::Int32(_) => ScalarType::Int32,
            Self::Uint32(_) => ScalarType::Uint32,
            Self::Float32(_) => ScalarType::Float32,
            Self::Int16(_) => ScalarType::Int16,
            Self::Uint16(_) => ScalarType::Uint16,
            Self::Uint8(_) => ScalarType::Uint8,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Float64(v) => v,
            Self::Int32(v) => f64::from(v),
            Self::Uint32(v) => f64::from(v),
            Self::Float32(v) => f64::from(v),
            Self::Int16(v) => f64::from(v),
            Self::Uint16(v) => f64::from(v),
            Self::Uint8(v) => f64::from(v),
        }
    }

    /// Convert to `target`, saturating out-of-range integers.
    pub fn cast(self, target: ScalarType) -> Scalar {
        if self.scalar_type() == target {
            return self;
        }
        let v = self.as_f64();
        match target {
            ScalarType::Float64 => Scalar::Float64(v),
            ScalarType::Int32 => Scalar::Int32(v as i32),
            ScalarType::Uint32 => Scalar::Uint32(v as u32),
            ScalarType::Float32 => Scalar::Float32(v as f32),
            ScalarType::Int16 => Scalar::Int16(v as i16),
            ScalarType::Uint16 => Scalar::Uint16(v as u16),
            ScalarType::Uint8 => Scalar::Uint8(v as u8),
        }
    }

    /// Append the little-endian encoding of this value.
    pub fn write_le(&self, out: &mut Vec<u8>) {
        match *self {
            Self::Float64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Int32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Uint32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Float32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Int16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Uint16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Uint8(v) => out.push(v),
        }
    }
}

/// A named, typed column in the row layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub scalar_type: ScalarType,
    /// Byte offset of this field within a row.
    pub offset: usize,
}

impl FieldSpec {
    pub fn size(&self) -> usize {
        self.scalar_type.size()
    }
}

/// Ordered property layout with the well-known field indices resolved once.
/// A repeated property name resolves to its last occurrence; every column is still read and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    fields: Vec<FieldSpec>,
    stride: usize,
    position: [Option<usize>; 3],
    scales: [Option<usize>; 3],
    opacity: Option<usize>,
}

impl VertexLayout {
    /// Build a layout from `(type, name)` pairs in header order.
    /// Offsets are the running sum of preceding field sizes.
    pub fn from_properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = (ScalarType, S)>,
        S: Into<String>,
    {
        let mut fields = Vec::new();
        let mut offset = 0;
        for (scalar_type, name) in properties {
            fields.push(FieldSpec {
                name: name.into(),
                scalar_type,
                offset,
            });
            offset += scalar_type.size();
        }

        let index = |name: &str| fields.iter().rposition(|field| field.name == name);
        let position = [index("x"), index("y"), index("z")];
        let scales = [index("scale_0"), index("scale_1"), index("scale_2")];
        let opacity = index("opacity");

        Self {
            fields,
            stride: offset,
            position,
            scales,
            opacity,
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Bytes per row, the sum of all field sizes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().rposition(|field| field.name == name)
    }

    pub fn position_indices(&self) -> [Option<usize>; 3] {
        self.position
    }

    pub fn scale_indices(&self) -> [Option<usize>; 3] {
        self.scales
    }

    pub fn opacity_index(&self) -> Option<usize> {
        self.opacity
    }
}

/// One vertex: an optional slot per layout field.
/// A `None` slot means the value was cut off by a truncated body.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    values: Vec<Option<Scalar>>,
}

impl Point {
    pub fn new(values: Vec<Option<Scalar>>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<Scalar> {
        self.values.get(index).copied().flatten()
    }

    /// Value of the slot at `index` as f64, if both the field and the value exist.
    pub fn get_f64(&self, index: Option<usize>) -> Option<f64> {
        index.and_then(|i| self.get(i)).map(|v| v.as_f64())
    }

    pub fn values(&self) -> &[Option<Scalar>] {
        &self.values
    }
}

/// Ordered points bound to the layout they were decoded with.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    layout: VertexLayout,
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(layout: VertexLayout, points: Vec<Point>) -> Self {
        Self { layout, points }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of a point, absent coordinates read as 0.
    pub fn position(&self, point: &Point) -> (f64, f64, f64) {
        let [x, y, z] = self.layout.position;
        (
            point.get_f64(x).unwrap_or(0.0),
            point.get_f64(y).unwrap_or(0.0),
            point.get_f64(z).unwrap_or(0.0),
        )
    }

    /// Named value lookup, mainly for inspection and tests.
    pub fn value(&self, point: &Point, name: &str) -> Option<Scalar> {
        self.layout.index_of(name).and_then(|i| point.get(i))
    }

    pub fn into_parts(self) -> (VertexLayout, Vec<Point>) {
        (self.layout, self.points)
    }
}
