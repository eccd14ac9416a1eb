use {
    super::{
        op::{self as condop, ConditionOp},
        operator::{Operator, SetQualifier},
    },
    serde::{Deserialize, Serialize},
};

/// The value type of a condition key, as listed in the service authorization reference.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ConditionKeyType {
    #[serde(alias = "ArrayOfString")]
    String,

    #[serde(rename = "ARN", alias = "Arn", alias = "ArrayOfARN")]
    Arn,

    #[serde(alias = "ArrayOfNumeric")]
    Numeric,

    #[serde(alias = "ArrayOfDate")]
    Date,

    #[serde(rename = "IPAddress", alias = "IpAddress")]
    IpAddress,

    Binary,

    #[serde(alias = "Boolean", alias = "ArrayOfBool")]
    Bool,
}

impl ConditionKeyType {
    /// The operator used for a key of this type when the caller doesn't name one.
    pub fn default_operator(&self) -> Operator {
        let op = match self {
            Self::String => condop::StringLike,
            Self::Arn => condop::ArnLike,
            Self::Numeric => condop::NumericEquals,
            Self::Date => condop::DateEquals,
            Self::IpAddress => condop::IpAddress,
            Self::Binary => condop::BinaryEquals,
            Self::Bool => condop::Bool,
        };
        Operator::new(op)
    }
}

/// A condition key available to every service.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GlobalConditionKey {
    name: &'static str,
    key_type: ConditionKeyType,
    default_op: Option<ConditionOp>,
    qualifier: Option<SetQualifier>,
}

impl GlobalConditionKey {
    const fn new(name: &'static str, key_type: ConditionKeyType, default_op: Option<ConditionOp>) -> Self {
        Self {
            name,
            key_type,
            default_op,
            qualifier: None,
        }
    }

    const fn for_any_value(self) -> Self {
        Self {
            qualifier: Some(SetQualifier::ForAnyValue),
            ..self
        }
    }

    /// The key name. Tag keys end in `/` and take the tag name as a suffix.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn key_type(&self) -> ConditionKeyType {
        self.key_type
    }

    #[inline]
    pub fn is_parameterized(&self) -> bool {
        self.name.ends_with('/')
    }

    pub fn default_operator(&self) -> Operator {
        let op = match self.default_op {
            Some(op) => Operator::new(op),
            None => self.key_type.default_operator(),
        };

        match self.qualifier {
            Some(SetQualifier::ForAllValues) => op.for_all_values(),
            Some(SetQualifier::ForAnyValue) => op.for_any_value(),
            None => op,
        }
    }

    fn matches(&self, key: &str) -> bool {
        if self.is_parameterized() {
            key.len() > self.name.len()
                && key.is_char_boundary(self.name.len())
                && key[..self.name.len()].eq_ignore_ascii_case(self.name)
        } else {
            key.eq_ignore_ascii_case(self.name)
        }
    }
}

use ConditionKeyType::*;

// See https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_policies_condition-keys.html
const GLOBAL_KEYS: &[GlobalConditionKey] = &[
    GlobalConditionKey::new("aws:CalledVia", String, Some(condop::StringEquals)).for_any_value(),
    GlobalConditionKey::new("aws:CalledViaFirst", String, None),
    GlobalConditionKey::new("aws:CalledViaLast", String, None),
    GlobalConditionKey::new("aws:CurrentTime", Date, Some(condop::DateLessThanEquals)),
    GlobalConditionKey::new("aws:EpochTime", Date, Some(condop::DateLessThanEquals)),
    GlobalConditionKey::new("aws:FederatedProvider", String, None),
    GlobalConditionKey::new("aws:MultiFactorAuthAge", Numeric, Some(condop::NumericLessThan)),
    GlobalConditionKey::new("aws:MultiFactorAuthPresent", Bool, None),
    GlobalConditionKey::new("aws:PrincipalAccount", String, None),
    GlobalConditionKey::new("aws:PrincipalArn", Arn, None),
    GlobalConditionKey::new("aws:PrincipalIsAWSService", Bool, None),
    GlobalConditionKey::new("aws:PrincipalOrgID", String, None),
    GlobalConditionKey::new("aws:PrincipalOrgPaths", String, None),
    GlobalConditionKey::new("aws:PrincipalServiceName", String, None),
    GlobalConditionKey::new("aws:PrincipalServiceNamesList", String, None),
    GlobalConditionKey::new("aws:PrincipalTag/", String, None),
    GlobalConditionKey::new("aws:PrincipalType", String, None),
    GlobalConditionKey::new("aws:Referer", String, None),
    GlobalConditionKey::new("aws:RequestedRegion", String, None),
    GlobalConditionKey::new("aws:RequestTag/", String, None),
    GlobalConditionKey::new("aws:ResourceAccount", String, None),
    GlobalConditionKey::new("aws:ResourceOrgID", String, None),
    GlobalConditionKey::new("aws:ResourceOrgPaths", String, None),
    GlobalConditionKey::new("aws:ResourceTag/", String, None),
    GlobalConditionKey::new("aws:SecureTransport", Bool, None),
    GlobalConditionKey::new("aws:SourceAccount", String, None),
    GlobalConditionKey::new("aws:SourceArn", Arn, None),
    GlobalConditionKey::new("aws:SourceIdentity", String, None),
    GlobalConditionKey::new("aws:SourceIp", IpAddress, None),
    GlobalConditionKey::new("aws:SourceVpc", String, None),
    GlobalConditionKey::new("aws:SourceVpce", String, None),
    GlobalConditionKey::new("aws:TagKeys", String, None),
    GlobalConditionKey::new("aws:TokenIssueTime", Date, Some(condop::DateGreaterThanEquals)),
    GlobalConditionKey::new("aws:UserAgent", String, None),
    GlobalConditionKey::new("aws:userid", String, None),
    GlobalConditionKey::new("aws:username", String, None),
    GlobalConditionKey::new("aws:ViaAWSService", Bool, None),
    GlobalConditionKey::new("aws:VpcSourceIp", IpAddress, None),
];

/// Find the global definition of `key`, ignoring case. Tag keys match on their prefix.
pub fn global_condition_key(key: &str) -> Option<&'static GlobalConditionKey> {
    GLOBAL_KEYS.iter().find(|global| global.matches(key))
}

/// Iterate over every global condition key.
pub fn global_condition_keys() -> impl Iterator<Item = &'static GlobalConditionKey> {
    GLOBAL_KEYS.iter()
}

#[cfg(test)]
mod tests {
    use {
        super::{global_condition_key, global_condition_keys, ConditionKeyType},
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_type_defaults() {
        let cases = [
            (ConditionKeyType::String, "StringLike"),
            (ConditionKeyType::Arn, "ArnLike"),
            (ConditionKeyType::Numeric, "NumericEquals"),
            (ConditionKeyType::Date, "DateEquals"),
            (ConditionKeyType::IpAddress, "IpAddress"),
            (ConditionKeyType::Binary, "BinaryEquals"),
            (ConditionKeyType::Bool, "Bool"),
        ];

        for (key_type, op) in cases {
            assert_eq!(key_type.default_operator().to_string(), op);
        }
    }

    #[test_log::test]
    fn test_type_names() {
        assert_eq!(serde_json::from_str::<ConditionKeyType>(r#""ARN""#).unwrap(), ConditionKeyType::Arn);
        assert_eq!(serde_json::from_str::<ConditionKeyType>(r#""IPAddress""#).unwrap(), ConditionKeyType::IpAddress);
        assert_eq!(serde_json::from_str::<ConditionKeyType>(r#""Boolean""#).unwrap(), ConditionKeyType::Bool);
        assert_eq!(serde_json::from_str::<ConditionKeyType>(r#""ArrayOfString""#).unwrap(), ConditionKeyType::String);
        assert_eq!(serde_json::to_string(&ConditionKeyType::Arn).unwrap(), r#""ARN""#);
        assert!(serde_json::from_str::<ConditionKeyType>(r#""Text""#).is_err());
    }

    #[test_log::test]
    fn test_global_defaults() {
        let cases = [
            ("aws:CalledVia", "ForAnyValue:StringEquals"),
            ("aws:CalledViaFirst", "StringLike"),
            ("aws:CurrentTime", "DateLessThanEquals"),
            ("aws:EpochTime", "DateLessThanEquals"),
            ("aws:MultiFactorAuthAge", "NumericLessThan"),
            ("aws:MultiFactorAuthPresent", "Bool"),
            ("aws:PrincipalArn", "ArnLike"),
            ("aws:SecureTransport", "Bool"),
            ("aws:SourceArn", "ArnLike"),
            ("aws:SourceIp", "IpAddress"),
            ("aws:TokenIssueTime", "DateGreaterThanEquals"),
            ("aws:ViaAWSService", "Bool"),
            ("aws:VpcSourceIp", "IpAddress"),
            ("aws:username", "StringLike"),
        ];

        for (key, op) in cases {
            let global = global_condition_key(key).unwrap();
            assert_eq!(global.name(), key);
            assert_eq!(global.default_operator().to_string(), op, "{}", key);
        }
    }

    #[test_log::test]
    fn test_global_lookup() {
        assert_eq!(global_condition_key("AWS:SOURCEIP").unwrap().name(), "aws:SourceIp");
        assert_eq!(global_condition_key("aws:ResourceTag/Environment").unwrap().name(), "aws:ResourceTag/");
        assert!(global_condition_key("aws:ResourceTag/").is_none());
        assert!(global_condition_key("aws:ResourceTag").is_none());
        assert!(global_condition_key("aws:NoSuchKey").is_none());
        assert!(global_condition_key("glacier:ArchiveAgeInDays").is_none());

        assert!(global_condition_keys().all(|k| k.name().starts_with("aws:")));
        assert_eq!(global_condition_keys().filter(|k| k.is_parameterized()).count(), 3);
    }
}
