use {
    lazy_static::lazy_static,
    log::debug,
    regex::{Captures, Regex},
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

const DEFAULT_PARTITION: &str = "aws";
const DEFAULT_REGION: &str = "*";
const DEFAULT_ACCOUNT: &str = "*";

/// Values substituted for the `${Partition}`, `${Region}` and `${Account}` placeholders when the caller doesn't
/// supply them.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArnDefaults {
    pub partition: String,
    pub region: String,
    pub account: String,
}

impl ArnDefaults {
    pub fn new<P, R, A>(partition: P, region: R, account: A) -> Self
    where
        P: Into<String>,
        R: Into<String>,
        A: Into<String>,
    {
        Self {
            partition: partition.into(),
            region: region.into(),
            account: account.into(),
        }
    }

    fn lookup(&self, token: &str) -> Option<&str> {
        if token.eq_ignore_ascii_case("Partition") {
            Some(&self.partition)
        } else if token.eq_ignore_ascii_case("Region") {
            Some(&self.region)
        } else if token.eq_ignore_ascii_case("Account") || token.eq_ignore_ascii_case("AccountId") {
            Some(&self.account)
        } else {
            None
        }
    }
}

impl Default for ArnDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_PARTITION, DEFAULT_REGION, DEFAULT_ACCOUNT)
    }
}

/// An ARN containing `${Token}` placeholders, e.g.
/// `arn:${Partition}:glacier:${Region}:${Account}:vaults/${VaultName}`.
///
/// ```
/// # use iam_statement_builder::{ArnDefaults, ArnTemplate};
/// let template = ArnTemplate::new("arn:${Partition}:glacier:${Region}:${Account}:vaults/${VaultName}");
/// assert_eq!(template.placeholders(), vec!["Partition", "Region", "Account", "VaultName"]);
///
/// let arn = template.resolve(&[("VaultName", "examplevault"), ("Region", "us-west-2")], &ArnDefaults::default());
/// assert_eq!(arn, "arn:aws:glacier:us-west-2:*:vaults/examplevault");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ArnTemplate {
    template: String,
}

impl ArnTemplate {
    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// The placeholder names in order of appearance, without the surrounding `${` and `}`.
    pub fn placeholders(&self) -> Vec<&str> {
        placeholders(&self.template)
    }

    /// Substitute each placeholder with the matching entry of `values`, falling back to `defaults` for the
    /// partition, region and account. Placeholders with neither are left in place.
    ///
    /// Names in `values` are matched exactly first, then without regard to case.
    pub fn resolve(&self, values: &[(&str, &str)], defaults: &ArnDefaults) -> String {
        let result = PLACEHOLDER.replace_all(&self.template, |caps: &Captures| {
            let token = &caps[1];
            let value = values
                .iter()
                .find(|(name, _)| *name == token)
                .or_else(|| values.iter().find(|(name, _)| name.eq_ignore_ascii_case(token)))
                .map(|(_, value)| *value)
                .or_else(|| defaults.lookup(token));

            match value {
                Some(value) => value.to_string(),
                None => {
                    debug!("No value for placeholder ${{{}}} in {}", token, self.template);
                    caps[0].to_string()
                }
            }
        });

        result.into_owned()
    }
}

impl Display for ArnTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.template)
    }
}

impl From<&str> for ArnTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for ArnTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

/// The placeholder names appearing in `s`.
pub(crate) fn placeholders(s: &str) -> Vec<&str> {
    PLACEHOLDER.captures_iter(s).filter_map(|caps| caps.get(1)).map(|m| m.as_str()).collect()
}
