use super::variant::Variant;

/// Binary operation names.
pub(super) const BINARY_DISPLAY_NAMES: [&str; 2] = ["BinaryEquals", "BinaryEqualsIfExists"];

pub(super) fn parse_binary(name: &str) -> Option<Variant> {
    match BINARY_DISPLAY_NAMES.iter().position(|n| *n == name)? {
        0 => Some(Variant::None),
        _ => Some(Variant::IfExists),
    }
}

/// Encode raw bytes for a `BinaryEquals` condition. IAM compares binary keys against base64 text.
pub fn binary_value<B: AsRef<[u8]>>(bytes: B) -> String {
    base64::encode(bytes)
}
