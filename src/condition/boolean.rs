use {super::variant::Variant, crate::serutil::StringLikeList};

/// Boolean operation names.
pub(super) const BOOL_DISPLAY_NAMES: [&str; 2] = ["Bool", "BoolIfExists"];

pub(super) fn parse_bool(name: &str) -> Option<Variant> {
    match BOOL_DISPLAY_NAMES.iter().position(|n| *n == name)? {
        0 => Some(Variant::None),
        _ => Some(Variant::IfExists),
    }
}

// IAM accepts JSON booleans, but the console writes them as strings; do the same.
impl From<bool> for StringLikeList<String> {
    fn from(value: bool) -> Self {
        Self::Single(value.to_string())
    }
}
