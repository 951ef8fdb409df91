/// Shared configuration for PLY cropping

/// Number of leading bytes scanned for the textual header
pub const HEADER_SCAN_LIMIT: usize = 10 * 1024;

/// Literal line that closes the header; the binary body starts right after it
pub const HEADER_TERMINATOR: &[u8] = b"end_header\n";

/// Format line emitted in every written header
pub const BINARY_FORMAT_LINE: &str = "format binary_little_endian 1.0";

/// Points processed between progress updates
pub const PROGRESS_INTERVAL: usize = 10_000;

/// Default crop cube half extent on every axis
pub const DEFAULT_CROP_EXTENT: f64 = 3.0;

/// Default CLI locations and file pattern
pub const DEFAULT_SOURCE_DIR: &str = "./original_splats";
pub const DEFAULT_DEST_DIR: &str = "./public/splats";
pub const DEFAULT_CROP: &str = "-3,3,-3,3,-3,3";
pub const DEFAULT_PATTERN: &str = "*.ply";

/// Progress bar layout shared by decode and encode phases
pub const PROGRESS_TEMPLATE: &str = "[{bar:40.green/blue}] {pos}/{len} points ({percent}%) {msg}";
pub const PROGRESS_CHARS: &str = "▉▊▋▌▍▎▏ ";

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
