use {
    super::op::{self as condop, ConditionOp},
    crate::StatementError,
    log::debug,
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// How a multivalued condition key is compared against the listed values.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetQualifier {
    /// Every value in the request must match one of the condition values.
    ForAllValues,

    /// At least one value in the request must match one of the condition values.
    ForAnyValue,
}

impl SetQualifier {
    fn prefix(&self) -> &'static str {
        match self {
            Self::ForAllValues => "ForAllValues:",
            Self::ForAnyValue => "ForAnyValue:",
        }
    }

    /// Split a leading qualifier off an operator name.
    fn split(s: &str) -> (Option<Self>, &str) {
        for qualifier in [Self::ForAllValues, Self::ForAnyValue] {
            if let Some(name) = s.strip_prefix(qualifier.prefix()) {
                return (Some(qualifier), name);
            }
        }
        (None, s)
    }
}

/// The operator name following any set qualifier.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
enum OperatorName {
    Builtin(ConditionOp),

    /// A name IAM may accept that isn't in the builtin table. Rendered verbatim.
    Custom(String),
}

/// A complete condition operator as it appears as a key of the `Condition` block, e.g.
/// `ForAnyValue:StringEqualsIfExists`.
///
/// ```
/// # use iam_statement_builder::{condop, Operator};
/// let op = Operator::from(condop::StringEquals).for_any_value().if_exists();
/// assert_eq!(op.to_string(), "ForAnyValue:StringEqualsIfExists");
///
/// let op = Operator::from("ForAnyValue:StringStartsWith");
/// assert!(op.is_custom());
/// assert_eq!(op.to_string(), "ForAnyValue:StringStartsWith");
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Operator {
    qualifier: Option<SetQualifier>,
    name: OperatorName,
}

impl Operator {
    #[inline]
    pub const fn new(op: ConditionOp) -> Self {
        Self {
            qualifier: None,
            name: OperatorName::Builtin(op.normalized()),
        }
    }

    /// An operator from its IAM name, without checking it against the builtin operators. A leading
    /// `ForAllValues:` or `ForAnyValue:` becomes the qualifier.
    pub fn custom<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        let (qualifier, rest) = SetQualifier::split(&name);
        Self {
            qualifier,
            name: OperatorName::Custom(rest.to_string()),
        }
    }

    #[inline]
    pub fn qualifier(&self) -> Option<SetQualifier> {
        self.qualifier
    }

    /// The builtin operator, or `None` for a custom one.
    #[inline]
    pub fn op(&self) -> Option<ConditionOp> {
        match &self.name {
            OperatorName::Builtin(op) => Some(*op),
            OperatorName::Custom(_) => None,
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self.name, OperatorName::Custom(_))
    }

    /// Require every requested value to match.
    #[inline]
    pub fn for_all_values(self) -> Self {
        Self {
            qualifier: Some(SetQualifier::ForAllValues),
            ..self
        }
    }

    /// Require at least one requested value to match.
    #[inline]
    pub fn for_any_value(self) -> Self {
        Self {
            qualifier: Some(SetQualifier::ForAnyValue),
            ..self
        }
    }

    /// Also match when the key is absent from the request. No effect on `Null`. Custom names get the `IfExists`
    /// suffix unless they already end in it.
    pub fn if_exists(self) -> Self {
        let name = match self.name {
            OperatorName::Builtin(op) => OperatorName::Builtin(op.if_exists()),
            OperatorName::Custom(name) if name.ends_with(IF_EXISTS) => OperatorName::Custom(name),
            OperatorName::Custom(name) => OperatorName::Custom(format!("{}{}", name, IF_EXISTS)),
        };
        Self {
            name,
            ..self
        }
    }

    pub fn string_equals() -> Self {
        condop::StringEquals.into()
    }

    pub fn string_like() -> Self {
        condop::StringLike.into()
    }

    pub fn arn_equals() -> Self {
        condop::ArnEquals.into()
    }

    pub fn arn_like() -> Self {
        condop::ArnLike.into()
    }

    pub fn bool() -> Self {
        condop::Bool.into()
    }

    pub fn ip_address() -> Self {
        condop::IpAddress.into()
    }

    pub fn numeric_equals() -> Self {
        condop::NumericEquals.into()
    }

    pub fn date_equals() -> Self {
        condop::DateEquals.into()
    }

    pub fn null() -> Self {
        condop::Null.into()
    }
}

const IF_EXISTS: &str = "IfExists";

impl Default for Operator {
    fn default() -> Self {
        Self::string_like()
    }
}

impl From<ConditionOp> for Operator {
    fn from(op: ConditionOp) -> Self {
        Self::new(op)
    }
}

/// Builtin names parse to their [ConditionOp]; anything else is kept as a custom operator.
impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        match Self::from_str(s) {
            Ok(op) => op,
            Err(_) => {
                debug!("Operator: using custom operator {}", s);
                Self::custom(s)
            }
        }
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&String> for Operator {
    fn from(s: &String) -> Self {
        Self::from(s.as_str())
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(qualifier) = &self.qualifier {
            f.write_str(qualifier.prefix())?;
        }

        match &self.name {
            OperatorName::Builtin(op) => write!(f, "{}", op),
            OperatorName::Custom(name) => f.write_str(name),
        }
    }
}

/// Strict parsing: only the builtin operators are accepted. Use [Operator::from] or [Operator::custom] for other
/// names.
impl FromStr for Operator {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (qualifier, name) = SetQualifier::split(s);

        match ConditionOp::from_str(name) {
            Ok(op) => Ok(Self {
                qualifier,
                name: OperatorName::Builtin(op),
            }),
            Err(_) => Err(StatementError::InvalidConditionOperator(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Operator::from(s))
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
