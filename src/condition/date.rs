use {
    super::variant::Variant,
    crate::serutil::StringLikeList,
    chrono::{DateTime, SecondsFormat, Utc},
};

/// Date operation names.
pub(super) const DATE_DISPLAY_NAMES: [&str; 12] = [
    "DateEquals",
    "DateEqualsIfExists",
    "DateNotEquals",
    "DateNotEqualsIfExists",
    "DateLessThan",
    "DateLessThanIfExists",
    "DateGreaterThanEquals",
    "DateGreaterThanEqualsIfExists",
    "DateLessThanEquals",
    "DateLessThanEqualsIfExists",
    "DateGreaterThan",
    "DateGreaterThanIfExists",
];

/// Date comparisons. The negated variants flip the comparison: `DateGreaterThanEquals` is a negated `LessThan`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum DateCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

impl DateCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        DATE_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }

    pub(super) fn parse(name: &str) -> Option<(Self, Variant)> {
        let index = DATE_DISPLAY_NAMES.iter().position(|n| *n == name)?;
        match Variant::split_index(index) {
            (0, variant) => Some((Self::Equals, variant)),
            (4, variant) => Some((Self::LessThan, variant)),
            (_, variant) => Some((Self::LessThanEquals, variant)),
        }
    }
}

/// Render a timestamp the way IAM date conditions expect it: ISO 8601, UTC, millisecond precision.
pub fn date_value(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<DateTime<Utc>> for StringLikeList<String> {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Single(date_value(&value))
    }
}

impl From<Vec<DateTime<Utc>>> for StringLikeList<String> {
    fn from(values: Vec<DateTime<Utc>>) -> Self {
        Self::List(values.iter().map(date_value).collect())
    }
}
