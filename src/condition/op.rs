use {
    super::{
        arn::ArnCmp,
        binary::{parse_binary, BINARY_DISPLAY_NAMES},
        boolean::{parse_bool, BOOL_DISPLAY_NAMES},
        date::DateCmp,
        ipaddr::{parse_ip_address, IP_ADDRESS_DISPLAY_NAMES},
        null::NULL_DISPLAY_NAME,
        numeric::NumericCmp,
        string::StringCmp,
        variant::Variant,
    },
    crate::StatementError,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        borrow::Borrow,
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// An operator for a condition clause.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionOp {
    /// Operators for ARNs.
    Arn(ArnCmp, Variant),

    /// Operators for binary values. There are no negated forms; see [ConditionOp::normalized].
    Binary(Variant),

    /// Operators on boolean values. There are no negated forms; see [ConditionOp::normalized].
    Bool(Variant),

    /// Operators for date/time values.
    Date(DateCmp, Variant),

    /// Operators on IP addresses and networks.
    IpAddress(Variant),

    /// Operator on the presence/absence of a value.
    Null,

    /// Operators on numeric values.
    Numeric(NumericCmp, Variant),

    /// Operators on string values.
    String(StringCmp, Variant),
}

macro_rules! condition_ops {
    ($($name:ident => $value:expr,)*) => {
        $(
            #[doc = concat!("The `", stringify!($name), "` operator.")]
            pub const $name: ConditionOp = $value;
        )*

        /// Every operator IAM defines, in declaration order.
        pub(crate) const ALL_OPS: &[ConditionOp] = &[$($name),*];
    };
}

condition_ops! {
    ArnEquals => ConditionOp::Arn(ArnCmp::Equals, Variant::None),
    ArnEqualsIfExists => ConditionOp::Arn(ArnCmp::Equals, Variant::IfExists),
    ArnNotEquals => ConditionOp::Arn(ArnCmp::Equals, Variant::Negated),
    ArnNotEqualsIfExists => ConditionOp::Arn(ArnCmp::Equals, Variant::IfExistsNegated),
    ArnLike => ConditionOp::Arn(ArnCmp::Like, Variant::None),
    ArnLikeIfExists => ConditionOp::Arn(ArnCmp::Like, Variant::IfExists),
    ArnNotLike => ConditionOp::Arn(ArnCmp::Like, Variant::Negated),
    ArnNotLikeIfExists => ConditionOp::Arn(ArnCmp::Like, Variant::IfExistsNegated),
    BinaryEquals => ConditionOp::Binary(Variant::None),
    BinaryEqualsIfExists => ConditionOp::Binary(Variant::IfExists),
    Bool => ConditionOp::Bool(Variant::None),
    BoolIfExists => ConditionOp::Bool(Variant::IfExists),
    DateEquals => ConditionOp::Date(DateCmp::Equals, Variant::None),
    DateEqualsIfExists => ConditionOp::Date(DateCmp::Equals, Variant::IfExists),
    DateNotEquals => ConditionOp::Date(DateCmp::Equals, Variant::Negated),
    DateNotEqualsIfExists => ConditionOp::Date(DateCmp::Equals, Variant::IfExistsNegated),
    DateLessThan => ConditionOp::Date(DateCmp::LessThan, Variant::None),
    DateLessThanIfExists => ConditionOp::Date(DateCmp::LessThan, Variant::IfExists),
    DateGreaterThanEquals => ConditionOp::Date(DateCmp::LessThan, Variant::Negated),
    DateGreaterThanEqualsIfExists => ConditionOp::Date(DateCmp::LessThan, Variant::IfExistsNegated),
    DateLessThanEquals => ConditionOp::Date(DateCmp::LessThanEquals, Variant::None),
    DateLessThanEqualsIfExists => ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExists),
    DateGreaterThan => ConditionOp::Date(DateCmp::LessThanEquals, Variant::Negated),
    DateGreaterThanIfExists => ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExistsNegated),
    IpAddress => ConditionOp::IpAddress(Variant::None),
    IpAddressIfExists => ConditionOp::IpAddress(Variant::IfExists),
    NotIpAddress => ConditionOp::IpAddress(Variant::Negated),
    NotIpAddressIfExists => ConditionOp::IpAddress(Variant::IfExistsNegated),
    Null => ConditionOp::Null,
    NumericEquals => ConditionOp::Numeric(NumericCmp::Equals, Variant::None),
    NumericEqualsIfExists => ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExists),
    NumericNotEquals => ConditionOp::Numeric(NumericCmp::Equals, Variant::Negated),
    NumericNotEqualsIfExists => ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExistsNegated),
    NumericLessThan => ConditionOp::Numeric(NumericCmp::LessThan, Variant::None),
    NumericLessThanIfExists => ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExists),
    NumericGreaterThanEquals => ConditionOp::Numeric(NumericCmp::LessThan, Variant::Negated),
    NumericGreaterThanEqualsIfExists => ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExistsNegated),
    NumericLessThanEquals => ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::None),
    NumericLessThanEqualsIfExists => ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExists),
    NumericGreaterThan => ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::Negated),
    NumericGreaterThanIfExists => ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExistsNegated),
    StringEquals => ConditionOp::String(StringCmp::Equals, Variant::None),
    StringEqualsIfExists => ConditionOp::String(StringCmp::Equals, Variant::IfExists),
    StringNotEquals => ConditionOp::String(StringCmp::Equals, Variant::Negated),
    StringNotEqualsIfExists => ConditionOp::String(StringCmp::Equals, Variant::IfExistsNegated),
    StringEqualsIgnoreCase => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::None),
    StringEqualsIgnoreCaseIfExists => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExists),
    StringNotEqualsIgnoreCase => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::Negated),
    StringNotEqualsIgnoreCaseIfExists => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExistsNegated),
    StringLike => ConditionOp::String(StringCmp::Like, Variant::None),
    StringLikeIfExists => ConditionOp::String(StringCmp::Like, Variant::IfExists),
    StringNotLike => ConditionOp::String(StringCmp::Like, Variant::Negated),
    StringNotLikeIfExists => ConditionOp::String(StringCmp::Like, Variant::IfExistsNegated),
}

impl ConditionOp {
    /// The variant of this operator. [ConditionOp::Null] has none.
    pub fn variant(&self) -> Option<Variant> {
        match self {
            Self::Arn(_, variant)
            | Self::Binary(variant)
            | Self::Bool(variant)
            | Self::Date(_, variant)
            | Self::IpAddress(variant)
            | Self::Numeric(_, variant)
            | Self::String(_, variant) => Some(*variant),
            Self::Null => None,
        }
    }

    /// Drop negation from `Binary` and `Bool`, which have no negated forms in IAM.
    pub const fn normalized(self) -> Self {
        match self {
            Self::Binary(Variant::Negated) => Self::Binary(Variant::None),
            Self::Binary(Variant::IfExistsNegated) => Self::Binary(Variant::IfExists),
            Self::Bool(Variant::Negated) => Self::Bool(Variant::None),
            Self::Bool(Variant::IfExistsNegated) => Self::Bool(Variant::IfExists),
            other => other,
        }
    }

    /// The `...IfExists` form of this operator. `Null` has no such form and is returned unchanged.
    pub fn if_exists(self) -> Self {
        match self {
            Self::Arn(cmp, variant) => Self::Arn(cmp, variant.with_if_exists()),
            Self::Binary(variant) => Self::Binary(variant.with_if_exists()),
            Self::Bool(variant) => Self::Bool(variant.with_if_exists()),
            Self::Date(cmp, variant) => Self::Date(cmp, variant.with_if_exists()),
            Self::IpAddress(variant) => Self::IpAddress(variant.with_if_exists()),
            Self::Null => Self::Null,
            Self::Numeric(cmp, variant) => Self::Numeric(cmp, variant.with_if_exists()),
            Self::String(cmp, variant) => Self::String(cmp, variant.with_if_exists()),
        }
    }
}

impl Borrow<str> for ConditionOp {
    fn borrow(&self) -> &str {
        match self {
            Self::Arn(cmp, variant) => cmp.display_name(variant),
            Self::Binary(variant) => BINARY_DISPLAY_NAMES[variant.if_exists() as usize],
            Self::Bool(variant) => BOOL_DISPLAY_NAMES[variant.if_exists() as usize],
            Self::Date(cmp, variant) => cmp.display_name(variant),
            Self::IpAddress(variant) => IP_ADDRESS_DISPLAY_NAMES[variant.as_usize()],
            Self::Null => NULL_DISPLAY_NAME,
            Self::Numeric(cmp, variant) => cmp.display_name(variant),
            Self::String(cmp, variant) => cmp.display_name(variant),
        }
    }
}

impl PartialEq<str> for ConditionOp {
    fn eq(&self, other: &str) -> bool {
        Borrow::<str>::borrow(self) == other
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.borrow())
    }
}

impl<'de> Deserialize<'de> for ConditionOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ConditionOp::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for ConditionOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.borrow())
    }
}

impl FromStr for ConditionOp {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = if s.starts_with("Arn") {
            ArnCmp::parse(s).map(|(cmp, variant)| Self::Arn(cmp, variant))
        } else if s.starts_with("Binary") {
            parse_binary(s).map(Self::Binary)
        } else if s.starts_with("Bool") {
            parse_bool(s).map(Self::Bool)
        } else if s.starts_with("Date") {
            DateCmp::parse(s).map(|(cmp, variant)| Self::Date(cmp, variant))
        } else if s.starts_with("Numeric") {
            NumericCmp::parse(s).map(|(cmp, variant)| Self::Numeric(cmp, variant))
        } else if s.starts_with("String") {
            StringCmp::parse(s).map(|(cmp, variant)| Self::String(cmp, variant))
        } else if s == NULL_DISPLAY_NAME {
            Some(Self::Null)
        } else {
            parse_ip_address(s).map(Self::IpAddress)
        };

        parsed.ok_or_else(|| StatementError::InvalidConditionOperator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::ALL_OPS,
        crate::{condop, ConditionOp, StatementError, Variant},
        pretty_assertions::assert_eq,
        std::{
            collections::hash_map::DefaultHasher,
            hash::{Hash, Hasher},
            str::FromStr,
        },
    };

    #[test_log::test]
    fn test_display_round_trip() {
        assert_eq!(ALL_OPS.len(), 53);

        for op in ALL_OPS {
            let name = op.to_string();
            assert_eq!(&ConditionOp::from_str(&name).unwrap(), op);
            assert!(op == name.as_str());
            assert_eq!(serde_json::to_string(op).unwrap(), format!("\"{}\"", name));
        }
    }

    #[test_log::test]
    fn test_distinct() {
        let mut hashes = ALL_OPS
            .iter()
            .map(|op| {
                let mut hasher = DefaultHasher::new();
                op.hash(&mut hasher);
                hasher.finish()
            })
            .collect::<Vec<_>>();
        hashes.sort_unstable();
        hashes.dedup();
        assert_eq!(hashes.len(), ALL_OPS.len());

        let mut sorted = ALL_OPS.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ALL_OPS.len());
    }

    #[test_log::test]
    fn test_if_exists() {
        assert_eq!(condop::StringLike.if_exists(), condop::StringLikeIfExists);
        assert_eq!(condop::StringNotEquals.if_exists(), condop::StringNotEqualsIfExists);
        assert_eq!(condop::DateGreaterThan.if_exists(), condop::DateGreaterThanIfExists);
        assert_eq!(condop::NotIpAddress.if_exists(), condop::NotIpAddressIfExists);
        assert_eq!(condop::Bool.if_exists(), condop::BoolIfExists);
        assert_eq!(condop::BinaryEquals.if_exists().if_exists(), condop::BinaryEqualsIfExists);
        assert_eq!(condop::Null.if_exists(), condop::Null);
        assert_eq!(condop::Null.variant(), None);
    }

    #[test_log::test]
    fn test_negated_bool_and_binary() {
        let ops = [
            (ConditionOp::Bool(Variant::Negated), "Bool", condop::Bool),
            (ConditionOp::Bool(Variant::IfExistsNegated), "BoolIfExists", condop::BoolIfExists),
            (ConditionOp::Binary(Variant::Negated), "BinaryEquals", condop::BinaryEquals),
            (ConditionOp::Binary(Variant::IfExistsNegated), "BinaryEqualsIfExists", condop::BinaryEqualsIfExists),
        ];

        for (op, name, normalized) in ops {
            assert_eq!(op.to_string(), name);
            assert_eq!(serde_json::to_string(&op).unwrap(), format!("\"{}\"", name));
            assert_eq!(op.normalized(), normalized);
        }

        assert_eq!(condop::StringNotLike.normalized(), condop::StringNotLike);
        assert_eq!(condop::NotIpAddressIfExists.normalized(), condop::NotIpAddressIfExists);
    }

    #[test_log::test]
    fn test_bad_names() {
        for name in ["", "StringSorta", "BoolNot", "ArnEqual", "NullIfExists", "ipaddress", "BinaryNotEquals"] {
            assert_eq!(
                ConditionOp::from_str(name).unwrap_err(),
                StatementError::InvalidConditionOperator(name.to_string())
            );
        }

        let e = serde_json::from_str::<ConditionOp>("3").unwrap_err();
        assert_eq!(e.to_string(), "invalid type: integer `3`, expected a string at line 1 column 1");

        let c = serde_json::from_str::<ConditionOp>("\"ArnEquals\"").unwrap();
        assert_eq!(c, condop::ArnEquals);
    }
}
