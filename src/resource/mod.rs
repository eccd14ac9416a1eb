mod arn;
mod template;

use {
    crate::{serutil::StringLikeList, StatementError},
    log::debug,
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

pub use {
    arn::ResourceArn,
    template::{ArnDefaults, ArnTemplate},
};

pub type ResourceList = StringLikeList<Resource>;

/// An entry of the `Resource` or `NotResource` element.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Resource {
    /// `*`, every resource.
    Any,

    /// A well-formed ARN.
    Arn(ResourceArn),

    /// Anything else, kept verbatim. IAM will reject these when the policy is attached.
    Other(String),
}

impl Resource {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    #[inline]
    pub fn arn(&self) -> Option<&ResourceArn> {
        match self {
            Self::Arn(arn) => Some(arn),
            _ => None,
        }
    }
}

impl From<&str> for Resource {
    /// Convert without validation. Strings that are neither `*` nor ARN-shaped become [Resource::Other].
    fn from(s: &str) -> Self {
        if s == "*" {
            return Self::Any;
        }

        match ResourceArn::from_str(s) {
            Ok(arn) => Self::Arn(arn),
            Err(_) => {
                debug!("Resource is not an ARN: {}", s);
                Self::Other(s.to_string())
            }
        }
    }
}

impl From<String> for Resource {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ResourceArn> for Resource {
    fn from(arn: ResourceArn) -> Self {
        Self::Arn(arn)
    }
}

impl FromStr for Resource {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::Any);
        }

        let arn = ResourceArn::from_str(s)?;
        Ok(Self::Arn(arn))
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Arn(arn) => f.write_str(arn.as_str()),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
