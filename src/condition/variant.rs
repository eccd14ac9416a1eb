/// The variant on an operation.
///
/// The discriminants are chosen so that `cmp as usize | variant as usize` indexes each family's display-name table.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Variant {
    None = 0,
    IfExists = 1,
    Negated = 2,
    IfExistsNegated = 3,
}

const VARIANTS: [Variant; 4] = [Variant::None, Variant::IfExists, Variant::Negated, Variant::IfExistsNegated];

impl Variant {
    #[inline]
    pub(super) fn as_usize(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn if_exists(self) -> bool {
        matches!(self, Self::IfExists | Self::IfExistsNegated)
    }

    #[inline]
    pub fn negated(self) -> bool {
        matches!(self, Self::Negated | Self::IfExistsNegated)
    }

    /// The same variant with the `IfExists` suffix applied.
    #[inline]
    pub(super) fn with_if_exists(self) -> Self {
        match self {
            Self::None | Self::IfExists => Self::IfExists,
            Self::Negated | Self::IfExistsNegated => Self::IfExistsNegated,
        }
    }

    /// Split a display-name table index into the comparison bits and the variant.
    #[inline]
    pub(super) fn split_index(index: usize) -> (usize, Self) {
        (index & !3, VARIANTS[index & 3])
    }
}
