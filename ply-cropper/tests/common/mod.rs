#![allow(dead_code)]

/// Hand-assembled binary PLY files for tests.
pub struct PlyBuilder {
    properties: Vec<String>,
    body: Vec<u8>,
    declared: Option<usize>,
    rows: usize,
}

impl PlyBuilder {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            body: Vec::new(),
            declared: None,
            rows: 0,
        }
    }

    /// Add a `property <type> <name>` header line.
    pub fn property(mut self, line: &str) -> Self {
        self.properties.push(format!("property {}", line));
        self
    }

    /// Override the declared vertex count.
    pub fn declare(mut self, count: usize) -> Self {
        self.declared = Some(count);
        self
    }

    /// Append one packed row.
    pub fn row(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self.rows += 1;
        self
    }

    pub fn header(&self) -> String {
        let mut header = String::from("ply\nformat binary_little_endian 1.0\n");
        header.push_str(&format!(
            "element vertex {}\n",
            self.declared.unwrap_or(self.rows)
        ));
        for line in &self.properties {
            header.push_str(line);
            header.push('\n');
        }
        header.push_str("end_header\n");
        header
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = self.header().into_bytes();
        data.extend_from_slice(&self.body);
        data
    }
}

/// Concatenate little-endian f32 values.
pub fn f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// x/y/z floats followed by red/green/blue bytes.
pub fn xyz_rgb_row(x: f32, y: f32, z: f32, rgb: [u8; 3]) -> Vec<u8> {
    let mut row = f32s(&[x, y, z]);
    row.extend_from_slice(&rgb);
    row
}

pub fn xyz_rgb_file(rows: &[(f32, f32, f32, [u8; 3])]) -> Vec<u8> {
    let mut builder = PlyBuilder::new()
        .property("float x")
        .property("float y")
        .property("float z")
        .property("uchar red")
        .property("uchar green")
        .property("uchar blue");
    for &(x, y, z, rgb) in rows {
        builder = builder.row(&xyz_rgb_row(x, y, z, rgb));
    }
    builder.build()
}

/// Byte offset just past `end_header\n`.
pub fn body_start(data: &[u8]) -> usize {
    let terminator = b"end_header\n";
    data.windows(terminator.len())
        .position(|w| w == terminator)
        .map(|i| i + terminator.len())
        .expect("test file has a header terminator")
}
