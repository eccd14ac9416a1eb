use {super::variant::Variant, crate::serutil::StringLikeList};

/// Numeric operation names.
pub(super) const NUMERIC_DISPLAY_NAMES: [&str; 12] = [
    "NumericEquals",
    "NumericEqualsIfExists",
    "NumericNotEquals",
    "NumericNotEqualsIfExists",
    "NumericLessThan",
    "NumericLessThanIfExists",
    "NumericGreaterThanEquals",
    "NumericGreaterThanEqualsIfExists",
    "NumericLessThanEquals",
    "NumericLessThanEqualsIfExists",
    "NumericGreaterThan",
    "NumericGreaterThanIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum NumericCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

impl NumericCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        NUMERIC_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }

    pub(super) fn parse(name: &str) -> Option<(Self, Variant)> {
        let index = NUMERIC_DISPLAY_NAMES.iter().position(|n| *n == name)?;
        match Variant::split_index(index) {
            (0, variant) => Some((Self::Equals, variant)),
            (4, variant) => Some((Self::LessThan, variant)),
            (_, variant) => Some((Self::LessThanEquals, variant)),
        }
    }
}

macro_rules! numeric_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StringLikeList<String> {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

numeric_value!(i32, i64, u16, u32, u64, usize, f64);
