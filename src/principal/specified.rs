use {
    crate::{display_json, serutil::StringLikeList},
    derive_builder::Builder,
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The kinds of principal a statement can name, and the key each is listed under.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PrincipalType {
    Aws,
    CanonicalUser,
    Federated,
    Service,
}

impl PrincipalType {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::CanonicalUser => "CanonicalUser",
            Self::Federated => "Federated",
            Self::Service => "Service",
        }
    }
}

impl Display for PrincipalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpecifiedPrincipal {
    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "AWS", default, skip_serializing_if = "Option::is_none")]
    aws: Option<StringLikeList<String>>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "CanonicalUser", default, skip_serializing_if = "Option::is_none")]
    canonical_user: Option<StringLikeList<String>>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "Federated", default, skip_serializing_if = "Option::is_none")]
    federated: Option<StringLikeList<String>>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "Service", default, skip_serializing_if = "Option::is_none")]
    service: Option<StringLikeList<String>>,
}

display_json!(SpecifiedPrincipal);

impl SpecifiedPrincipal {
    #[inline]
    pub fn builder() -> SpecifiedPrincipalBuilder {
        SpecifiedPrincipalBuilder::default()
    }

    #[inline]
    pub fn aws(&self) -> Option<&StringLikeList<String>> {
        self.aws.as_ref()
    }

    #[inline]
    pub fn canonical_user(&self) -> Option<&StringLikeList<String>> {
        self.canonical_user.as_ref()
    }

    #[inline]
    pub fn federated(&self) -> Option<&StringLikeList<String>> {
        self.federated.as_ref()
    }

    #[inline]
    pub fn service(&self) -> Option<&StringLikeList<String>> {
        self.service.as_ref()
    }

    pub fn get(&self, principal_type: PrincipalType) -> Option<&StringLikeList<String>> {
        match principal_type {
            PrincipalType::Aws => self.aws(),
            PrincipalType::CanonicalUser => self.canonical_user(),
            PrincipalType::Federated => self.federated(),
            PrincipalType::Service => self.service(),
        }
    }

    /// Add a principal of the given type. Values are always rendered as a list.
    pub fn push<S: Into<String>>(&mut self, principal_type: PrincipalType, value: S) {
        let slot = match principal_type {
            PrincipalType::Aws => &mut self.aws,
            PrincipalType::CanonicalUser => &mut self.canonical_user,
            PrincipalType::Federated => &mut self.federated,
            PrincipalType::Service => &mut self.service,
        };

        slot.get_or_insert_with(StringLikeList::default).push(value.into());
    }

    /// Indicates whether no principals of any type are listed.
    pub fn is_empty(&self) -> bool {
        [&self.aws, &self.canonical_user, &self.federated, &self.service].into_iter().all(|slot| match slot {
            Some(values) => values.is_empty(),
            None => true,
        })
    }
}
