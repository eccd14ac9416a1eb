use super::variant::Variant;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum ArnCmp {
    Equals = 0,
    Like = 4,
}

impl ArnCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        ARN_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }

    /// Look up an ARN operator by name.
    pub(super) fn parse(name: &str) -> Option<(Self, Variant)> {
        let index = ARN_DISPLAY_NAMES.iter().position(|n| *n == name)?;
        match Variant::split_index(index) {
            (0, variant) => Some((Self::Equals, variant)),
            (_, variant) => Some((Self::Like, variant)),
        }
    }
}

// For a given comparison, the if-exists variant must follow, then the negated variant, then the negated if-exists
// variant.

/// ARN operation names.
const ARN_DISPLAY_NAMES: [&str; 8] = [
    "ArnEquals",
    "ArnEqualsIfExists",
    "ArnNotEquals",
    "ArnNotEqualsIfExists",
    "ArnLike",
    "ArnLikeIfExists",
    "ArnNotLike",
    "ArnNotLikeIfExists",
];
