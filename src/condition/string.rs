use {super::variant::Variant, crate::serutil::StringLikeList};

/// String operation names.
const STRING_DISPLAY_NAMES: [&str; 12] = [
    "StringEquals",
    "StringEqualsIfExists",
    "StringNotEquals",
    "StringNotEqualsIfExists",
    "StringEqualsIgnoreCase",
    "StringEqualsIgnoreCaseIfExists",
    "StringNotEqualsIgnoreCase",
    "StringNotEqualsIgnoreCaseIfExists",
    "StringLike",
    "StringLikeIfExists",
    "StringNotLike",
    "StringNotLikeIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum StringCmp {
    Equals = 0,
    EqualsIgnoreCase = 4,
    Like = 8,
}

impl StringCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        STRING_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }

    pub(super) fn parse(name: &str) -> Option<(Self, Variant)> {
        let index = STRING_DISPLAY_NAMES.iter().position(|n| *n == name)?;
        match Variant::split_index(index) {
            (0, variant) => Some((Self::Equals, variant)),
            (4, variant) => Some((Self::EqualsIgnoreCase, variant)),
            (_, variant) => Some((Self::Like, variant)),
        }
    }
}

impl From<&str> for StringLikeList<String> {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<&String> for StringLikeList<String> {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<Vec<&str>> for StringLikeList<String> {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for StringLikeList<String> {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StringLikeList<String> {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.iter().map(|v| v.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{super::variant::Variant, StringCmp},
        crate::serutil::{ListKind, StringLikeList},
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_parse() {
        assert_eq!(StringCmp::parse("StringLike"), Some((StringCmp::Like, Variant::None)));
        assert_eq!(
            StringCmp::parse("StringNotEqualsIgnoreCaseIfExists"),
            Some((StringCmp::EqualsIgnoreCase, Variant::IfExistsNegated))
        );
        assert_eq!(StringCmp::parse("stringlike"), None);
    }

    #[test_log::test]
    fn test_values() {
        let single = StringLikeList::<String>::from("ec2.amazonaws.com");
        assert_eq!(single.kind(), ListKind::Single);

        let list = StringLikeList::<String>::from(["a", "b"]);
        assert_eq!(list.kind(), ListKind::List);
        assert_eq!(list.to_vec(), vec!["a", "b"]);

        let slice: &[&str] = &["x"];
        assert_eq!(StringLikeList::<String>::from(slice), StringLikeList::Single("x".to_string()));
        assert_eq!(StringLikeList::<String>::from(vec!["p", "q"]).len(), 2);
    }
}
