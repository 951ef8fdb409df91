/// PLY header parsing: vertex count, property layout and body offset
use crate::constants::{HEADER_SCAN_LIMIT, HEADER_TERMINATOR};
use crate::error::FormatError;
use crate::point::{ScalarType, VertexLayout};

const VERTEX_ELEMENT: &str = "element vertex ";
const PROPERTY_PREFIX: &str = "property ";

/// Everything the decoder needs to walk the binary body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyHeader {
    /// Declared number of vertex rows.
    pub vertex_count: usize,
    pub layout: VertexLayout,
    /// Byte offset of the first body row in the input buffer.
    pub body_offset: usize,
}

/// Parse the textual header at the start of `data`.
/// Only the first `HEADER_SCAN_LIMIT` bytes are looked at; the body is never decoded as text.
pub fn parse_header(data: &[u8]) -> Result<PlyHeader, FormatError> {
    let window = &data[..data.len().min(HEADER_SCAN_LIMIT)];
    let terminator_at = find_subslice(window, HEADER_TERMINATOR)
        .ok_or(FormatError::MissingHeaderTerminator)?;

    // Lossy decode keeps junk bytes from failing the parse.
    let text = String::from_utf8_lossy(&window[..terminator_at]);

    let vertex_count = text
        .lines()
        .find_map(vertex_count_in)
        .ok_or(FormatError::MissingVertexCount)??;

    let layout = VertexLayout::from_properties(text.lines().filter_map(property_in));

    Ok(PlyHeader {
        vertex_count,
        layout,
        body_offset: terminator_at + HEADER_TERMINATOR.len(),
    })
}

/// Digits following `element vertex ` on a line, if the line carries any.
fn vertex_count_in(line: &str) -> Option<Result<usize, FormatError>> {
    let start = line.find(VERTEX_ELEMENT)? + VERTEX_ELEMENT.len();
    let rest = &line[start..];
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    // A count too large for usize cannot describe a real file.
    Some(
        rest[..digits_len]
            .parse()
            .map_err(|_| FormatError::MissingVertexCount),
    )
}

/// `property <type> <name>` with a known scalar type.
fn property_in(line: &str) -> Option<(ScalarType, &str)> {
    if !line.starts_with(PROPERTY_PREFIX) {
        return None;
    }
    let mut parts = line.split(' ').skip(1);
    let scalar_type = ScalarType::from_ply_name(parts.next()?)?;
    let name = parts.next()?;
    Some((scalar_type, name))
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
