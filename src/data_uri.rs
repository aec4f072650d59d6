//! `data:` URI wrappers for encoded output.

use alloc::string::String;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const PNG_PREFIX: &str = "data:image/png;base64,";
const OCTET_STREAM_PREFIX: &str = "data:application/octet-stream;base64,";

fn with_prefix(prefix: &str, bytes: &[u8]) -> String {
    let mut uri = String::with_capacity(prefix.len() + bytes.len().div_ceil(3) * 4);
    uri.push_str(prefix);
    STANDARD.encode_string(bytes, &mut uri);
    uri
}

/// Wrap a finished PNG as `data:image/png;base64,...`.
pub fn png_data_uri(png: &[u8]) -> String {
    with_prefix(PNG_PREFIX, png)
}

/// Wrap an attribute map as `data:application/octet-stream;base64,...`.
pub fn attribute_map_data_uri(map: &[u8]) -> String {
    with_prefix(OCTET_STREAM_PREFIX, map)
}
