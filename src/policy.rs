use {
    crate::{display_json, from_str_json, Statement, StatementError, StatementList},
    derive_builder::Builder,
    log::error,
    serde::{
        de,
        de::{Deserializer, MapAccess, Visitor},
        ser::{SerializeMap, Serializer},
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Policy versions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PolicyVersion {
    None,
    V2008_10_17,
    V2012_10_17,
}

impl PolicyVersion {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[inline]
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

/// New policies are written as `2012-10-17`, the only version supporting policy variables such as `${aws:username}`.
impl Default for PolicyVersion {
    fn default() -> Self {
        Self::V2012_10_17
    }
}

impl Display for PolicyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::None => Ok(()),
            Self::V2008_10_17 => f.write_str("2008-10-17"),
            Self::V2012_10_17 => f.write_str("2012-10-17"),
        }
    }
}

impl<'de> Deserialize<'de> for PolicyVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        match PolicyVersion::from_str(&value) {
            Ok(v) => Ok(v),
            Err(e) => Err(serde::de::Error::custom(e)),
        }
    }
}

impl FromStr for PolicyVersion {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2008-10-17" => Ok(Self::V2008_10_17),
            "2012-10-17" => Ok(Self::V2012_10_17),
            _ => Err(StatementError::InvalidPolicyVersion(s.to_string())),
        }
    }
}

impl Serialize for PolicyVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// A policy document wrapping one or more statements.
///
/// This does not directly derive Deserialize/Serialize to prevent serde from allowing this to be represented as an
/// array.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    /// The version of the policy, `2012-10-17` unless set otherwise. A policy read without a `Version` element has
    /// [PolicyVersion::None], which IAM treats as `2008-10-17`.
    #[builder(setter(into, strip_option), default)]
    version: PolicyVersion,

    /// An optional identifier for the policy. Some services may require this element and have uniqueness requirements.
    #[builder(setter(into, strip_option), default)]
    id: Option<String>,

    /// One or more statements. A single statement may be encoded directly as a map instead of being enclosed in a
    /// list.
    #[builder(setter(into), default)]
    statement: StatementList,
}

impl Policy {
    #[inline]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    pub fn version(&self) -> PolicyVersion {
        self.version
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn statement(&self) -> &StatementList {
        &self.statement
    }

    pub fn push(&mut self, statement: Statement) -> &mut Self {
        self.statement.push(statement);
        self
    }

    /// The policy as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to serialize policy: {}", e);
                serde_json::Value::Null
            }
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            version: PolicyVersion::default(),
            id: None,
            statement: StatementList::default(),
        }
    }
}

impl From<Statement> for Policy {
    fn from(statement: Statement) -> Self {
        Self {
            statement: StatementList::from(statement),
            ..Self::default()
        }
    }
}

impl From<Vec<Statement>> for Policy {
    fn from(statements: Vec<Statement>) -> Self {
        Self {
            statement: StatementList::from(statements),
            ..Self::default()
        }
    }
}

display_json!(Policy);
from_str_json!(Policy);

impl<'de> Visitor<'de> for PolicyBuilder {
    type Value = Policy;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter.write_str("policy")
    }

    fn visit_map<A: MapAccess<'de>>(mut self, mut access: A) -> Result<Self::Value, A::Error> {
        let builder = &mut self;
        let mut version_seen = false;
        let mut id_seen = false;
        let mut statement_seen = false;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "Version" => {
                    if version_seen {
                        return Err(de::Error::duplicate_field("Version"));
                    }
                    version_seen = true;
                    builder.version(access.next_value::<PolicyVersion>()?);
                }
                "Id" => {
                    if id_seen {
                        return Err(de::Error::duplicate_field("Id"));
                    }
                    id_seen = true;
                    builder.id(access.next_value::<String>()?);
                }
                "Statement" => {
                    if statement_seen {
                        return Err(de::Error::duplicate_field("Statement"));
                    }
                    statement_seen = true;
                    builder.statement(access.next_value::<StatementList>()?);
                }
                _ => return Err(de::Error::unknown_field(&key, &["Version", "Id", "Statement"])),
            }
        }

        if !statement_seen {
            return Err(de::Error::missing_field("Statement"));
        }

        if !version_seen {
            builder.version(PolicyVersion::None);
        }

        self.build().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Policy, D::Error> {
        d.deserialize_map(PolicyBuilder::default())
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        if self.version.is_some() {
            state.serialize_entry("Version", &self.version)?;
        }
        if let Some(id) = &self.id {
            state.serialize_entry("Id", id)?;
        }
        state.serialize_entry("Statement", &self.statement)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            serutil::ListKind, Effect, Operator, Policy, PolicyVersion, Principal, Resource, Statement,
            StatementError, StatementList,
        },
        indoc::indoc,
        pretty_assertions::{assert_eq, assert_ne},
        serde_json::json,
        std::{
            collections::hash_map::DefaultHasher,
            hash::{Hash, Hasher},
            str::FromStr,
        },
    };

    #[test_log::test]
    fn test_typical_policy_import() {
        let policy_str = indoc! { r#"
        {
            "Version": "2012-10-17",
            "Id": "PolicyId",
            "Statement": [
                {
                    "Sid": "1",
                    "Effect": "Allow",
                    "Action": [
                        "ec2:Get*",
                        "ecs:*"
                    ],
                    "Resource": "*",
                    "Principal": {
                        "AWS": "123456789012"
                    },
                    "Condition": {
                        "StringEquals": {
                            "ec2:Region": [
                                "us-west-2",
                                "us-west-1",
                                "us-east-2",
                                "us-east-1"
                            ]
                        }
                    }
                },
                {
                    "Sid": "2",
                    "Effect": "Deny",
                    "Action": "*",
                    "Resource": [
                        "arn:aws:s3:::my-bucket",
                        "arn:aws:s3:::my-bucket/*"
                    ],
                    "Principal": "*"
                }
            ]
        }"# };
        let policy = Policy::from_str(policy_str).unwrap();

        assert_eq!(policy.version(), PolicyVersion::V2012_10_17);
        assert_eq!(policy.id(), Some("PolicyId"));

        assert_eq!(policy.statement().len(), 2);
        let s = &policy.statement()[0];
        assert_eq!(s.get_effect(), Effect::Allow);
        assert_eq!(s.actions().kind(), ListKind::List);
        assert_eq!(s.actions()[0], "ec2:Get*");
        assert_eq!(s.actions()[1], "ecs:*");
        assert_eq!(s.resources()[0], Resource::Any);
        let regions = s.conditions().value(&Operator::string_equals(), "ec2:Region").unwrap();
        assert_eq!(regions.len(), 4);

        let s = &policy.statement()[1];
        assert_eq!(s.get_effect(), Effect::Deny);
        assert_eq!(s.actions().kind(), ListKind::Single);
        assert_eq!(s.principal(), Some(&Principal::Any));

        let new_policy_str = policy.to_string();
        assert_eq!(new_policy_str, policy_str);
    }

    #[test_log::test]
    fn test_built_policy() {
        let mut allow = Statement::with_service("glacier");
        allow.sid("ReadVaults").all_read_actions().unwrap();
        allow.on_resource("vault", &[("VaultName", "examplevault")]).unwrap();

        let mut deny = Statement::with_sid("RequireTls");
        deny.deny().add("glacier:*").if_aws_secure_transport(Some(false));

        let mut policy = Policy::builder().id("VaultPolicy").statement(vec![allow]).build().unwrap();
        policy.push(deny);

        assert_eq!(policy.version(), PolicyVersion::V2012_10_17);
        assert_eq!(policy.statement().len(), 2);
        assert_eq!(
            policy.to_json(),
            json!({
                "Version": "2012-10-17",
                "Id": "VaultPolicy",
                "Statement": [
                    {
                        "Sid": "ReadVaults",
                        "Effect": "Allow",
                        "Action": [
                            "glacier:DescribeJob",
                            "glacier:DescribeVault",
                            "glacier:GetDataRetrievalPolicy",
                            "glacier:GetJobOutput",
                            "glacier:GetVaultAccessPolicy",
                            "glacier:GetVaultLock",
                            "glacier:GetVaultNotifications"
                        ],
                        "Resource": ["arn:aws:glacier:*:*:vaults/examplevault"]
                    },
                    {
                        "Sid": "RequireTls",
                        "Effect": "Deny",
                        "Action": ["glacier:*"],
                        "Resource": ["*"],
                        "Condition": {"Bool": {"aws:SecureTransport": "false"}}
                    }
                ]
            })
        );

        let reparsed = Policy::from_str(&policy.to_string()).unwrap();
        assert_eq!(reparsed.to_json(), policy.to_json());
    }

    #[test_log::test]
    fn test_from_statements() {
        let mut s = Statement::new();
        s.add("s3:ListAllMyBuckets");

        let single = Policy::from(s.clone());
        assert_eq!(single.statement().len(), 1);
        assert_eq!(
            single.to_string(),
            indoc! { r#"
            {
                "Version": "2012-10-17",
                "Statement": {
                    "Effect": "Allow",
                    "Action": [
                        "s3:ListAllMyBuckets"
                    ],
                    "Resource": [
                        "*"
                    ]
                }
            }"# }
        );

        let multiple = Policy::from(vec![s.clone(), s]);
        assert_eq!(multiple.statement().len(), 2);
        assert_eq!(multiple.to_json()["Statement"][1]["Action"][0], "s3:ListAllMyBuckets");

        let empty = Policy::default();
        assert!(empty.statement().is_empty());
        assert_eq!(empty.to_json(), json!({"Version": "2012-10-17", "Statement": []}));
        assert_eq!(StatementList::default().len(), 0);
    }

    #[test_log::test]
    fn test_missing_version() {
        let policy = Policy::from_str(r#"{"Statement": {"Effect": "Allow", "Action": "*"}}"#).unwrap();
        assert_eq!(policy.version(), PolicyVersion::None);
        assert_eq!(policy.to_json(), json!({"Statement": {"Effect": "Allow", "Action": "*", "Resource": ["*"]}}));
    }

    #[test_log::test]
    fn test_bad_field_types() {
        let policy_str = indoc! { r#"
        {
            "Version": "2012-10-17",
            "Id": "PolicyId",
            "Statement": "Deny"
            }
        }"# };
        let e = Policy::from_str(policy_str).unwrap_err();
        assert_eq!(
            e.to_string(),
            r#"invalid type: string "Deny", expected element or list of elements at line 4 column 23"#
        );

        let policy_str = indoc! { r#"
        {
            "Version": "2012-10-17",
            "Id": "PolicyId",
            "Statement": {
                3: "Deny"
            }
        }"# };
        let e = Policy::from_str(policy_str).unwrap_err();
        assert_eq!(e.to_string(), r#"key must be a string at line 5 column 9"#);

        let policy_str = indoc! { r#"
        {
            "Version": "2012-10-17",
            "Statement": {
                "Effect": "Allow",
                "Action": {"ec2": "RunInstances"}
            }
        }"# };
        let e = Policy::from_str(policy_str).unwrap_err();
        assert!(e.to_string().starts_with("invalid type: map, expected string or list of strings at line 5"));
    }

    #[test_log::test]
    fn test_bad_from_str() {
        let e = Policy::from_str("{}").unwrap_err();
        assert_eq!(e.to_string(), "missing field `Statement` at line 1 column 2");

        let e = Policy::from_str("3").unwrap_err();
        assert_eq!(e.to_string(), "invalid type: integer `3`, expected policy at line 1 column 1");

        let e = Policy::from_str(r#"{1: 1}"#).unwrap_err();
        assert_eq!(e.to_string(), "key must be a string at line 1 column 2");

        let policy_str = indoc! { r#"
        {
            "Version": "2012-10-17",
            "Statement": [],
            "Version": "2012-10-17"
        }"# };
        let e = Policy::from_str(policy_str).unwrap_err();
        assert_eq!(e.to_string(), "duplicate field `Version` at line 4 column 13");

        let e = Policy::from_str(r#"{"Statement": [], "Test": 1}"#).unwrap_err();
        assert_eq!(
            e.to_string(),
            "unknown field `Test`, expected one of `Version`, `Id`, `Statement` at line 1 column 24"
        );
    }

    #[test_log::test]
    fn test_policy_version() {
        assert_eq!(PolicyVersion::default(), PolicyVersion::V2012_10_17);

        assert_eq!(format!("{}", PolicyVersion::None), "");
        assert_eq!(format!("{}", PolicyVersion::V2008_10_17), "2008-10-17");
        assert_eq!(format!("{}", PolicyVersion::V2012_10_17), "2012-10-17");
        assert_eq!(format!("{:?}", PolicyVersion::V2008_10_17), "V2008_10_17");
        assert!(PolicyVersion::None.is_none());
        assert!(PolicyVersion::V2008_10_17.is_some());

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        PolicyVersion::V2008_10_17.hash(&mut h1);
        PolicyVersion::V2012_10_17.hash(&mut h2);
        assert_ne!(h1.finish(), h2.finish());

        assert_eq!(PolicyVersion::from_str("2008-10-17").unwrap(), PolicyVersion::V2008_10_17);
        assert_eq!(
            PolicyVersion::from_str("2012-10-18").unwrap_err(),
            StatementError::InvalidPolicyVersion("2012-10-18".to_string())
        );

        let e = serde_json::from_str::<PolicyVersion>(r#""2012-10-18""#).unwrap_err();
        assert_eq!(e.to_string(), "Invalid policy version: 2012-10-18");

        let e = serde_json::from_str::<PolicyVersion>(r#"2012"#).unwrap_err();
        assert_eq!(e.to_string(), "invalid type: integer `2012`, expected a string at line 1 column 4");
    }
}
