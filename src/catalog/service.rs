use {
    crate::{ArnTemplate, ConditionKeyType, Operator},
    regex::Regex,
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// The access level AWS assigns each action.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum AccessLevel {
    List,
    Read,
    Write,
    Tagging,

    #[serde(rename = "Permissions management")]
    PermissionsManagement,
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::List => f.write_str("List"),
            Self::Read => f.write_str("Read"),
            Self::Write => f.write_str("Write"),
            Self::Tagging => f.write_str("Tagging"),
            Self::PermissionsManagement => f.write_str("Permissions management"),
        }
    }
}

/// A resource type an action can be scoped to.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResourceType {
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ActionDefinition {
    #[serde(default)]
    url: String,

    #[serde(default)]
    description: String,

    access_level: AccessLevel,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    resource_types: BTreeMap<String, ActionResourceType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependent_actions: Vec<String>,
}

impl ActionDefinition {
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// Resource types the action can be scoped to, keyed by resource type name.
    #[inline]
    pub fn resource_types(&self) -> &BTreeMap<String, ActionResourceType> {
        &self.resource_types
    }

    /// Condition keys the action supports beyond those of its resource types.
    #[inline]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Other actions the caller must also be allowed to perform for this one to succeed.
    #[inline]
    pub fn dependent_actions(&self) -> &[String] {
        &self.dependent_actions
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResourceTypeDefinition {
    name: String,

    #[serde(default)]
    url: String,

    arn: String,

    #[serde(default)]
    condition_keys: Vec<String>,
}

impl ResourceTypeDefinition {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The ARN template, e.g. `arn:${Partition}:glacier:${Region}:${Account}:vaults/${VaultName}`.
    #[inline]
    pub fn arn(&self) -> &str {
        &self.arn
    }

    pub fn template(&self) -> ArnTemplate {
        ArnTemplate::new(self.arn.as_str())
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ConditionKeyDefinition {
    #[serde(default)]
    url: String,

    #[serde(default)]
    description: String,

    #[serde(rename = "type")]
    key_type: ConditionKeyType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_operator: Option<Operator>,
}

impl ConditionKeyDefinition {
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn key_type(&self) -> ConditionKeyType {
        self.key_type
    }

    /// The operator used when a condition on this key doesn't name one: the explicit default if the service
    /// documents one, otherwise the default for the key's type.
    pub fn default_operator(&self) -> Operator {
        match &self.default_operator {
            Some(op) => op.clone(),
            None => self.key_type.default_operator(),
        }
    }
}

/// The actions, resource types, and condition keys of one AWS service.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ServiceDefinition {
    prefix: String,

    #[serde(default)]
    name: String,

    #[serde(default)]
    url: String,

    #[serde(default)]
    actions: BTreeMap<String, ActionDefinition>,

    #[serde(default)]
    resource_types: BTreeMap<String, ResourceTypeDefinition>,

    #[serde(default)]
    conditions: BTreeMap<String, ConditionKeyDefinition>,
}

impl ServiceDefinition {
    /// The service prefix used in actions and ARNs, e.g. `glacier`.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn actions(&self) -> &BTreeMap<String, ActionDefinition> {
        &self.actions
    }

    #[inline]
    pub fn resource_types(&self) -> &BTreeMap<String, ResourceTypeDefinition> {
        &self.resource_types
    }

    #[inline]
    pub fn conditions(&self) -> &BTreeMap<String, ConditionKeyDefinition> {
        &self.conditions
    }

    /// Look up an action by name. Action names are case-insensitive; an exact match is preferred.
    pub fn action(&self, name: &str) -> Option<(&str, &ActionDefinition)> {
        if let Some((name, action)) = self.actions.get_key_value(name) {
            return Some((name.as_str(), action));
        }

        self.actions.iter().find(|(candidate, _)| candidate.eq_ignore_ascii_case(name)).map(|(n, a)| (n.as_str(), a))
    }

    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeDefinition> {
        self.resource_types.get(name)
    }

    /// Look up a condition key, ignoring case.
    ///
    /// Keys documented with a `/` (`aws:ResourceTag/${TagKey}`, `glacier:ResourceTag/`) take a parameter after the
    /// slash, and match any key sharing the text up to and including the slash.
    pub fn condition_key(&self, key: &str) -> Option<&ConditionKeyDefinition> {
        self.conditions.iter().find(|(name, _)| condition_key_matches(name, key)).map(|(_, definition)| definition)
    }

    /// Names of the actions at `level`, in name order.
    pub fn actions_with_access_level(&self, level: AccessLevel) -> impl Iterator<Item = &str> {
        self.actions.iter().filter(move |(_, action)| action.access_level == level).map(|(name, _)| name.as_str())
    }

    /// Names of the actions matching `pattern`, in name order.
    pub fn matching_actions<'a>(&'a self, pattern: &'a Regex) -> impl Iterator<Item = &'a str> {
        self.actions.keys().filter(move |name| pattern.is_match(name)).map(|name| name.as_str())
    }
}

fn condition_key_matches(name: &str, key: &str) -> bool {
    match name.find('/') {
        Some(slash) => {
            let prefix = &name[..=slash];
            key.len() > prefix.len()
                && key.is_char_boundary(prefix.len())
                && key[..prefix.len()].eq_ignore_ascii_case(prefix)
        }
        None => name.eq_ignore_ascii_case(key),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{AccessLevel, ServiceDefinition},
        indoc::indoc,
        pretty_assertions::assert_eq,
        regex::RegexBuilder,
    };

    fn example_service() -> ServiceDefinition {
        serde_json::from_str(indoc! { r#"
            {
                "prefix": "example",
                "name": "Example Service",
                "url": "https://example.com/",
                "actions": {
                    "CreateWidget": {
                        "url": "https://example.com/CreateWidget",
                        "description": "Creates a widget",
                        "accessLevel": "Write",
                        "resourceTypes": {
                            "widget": {
                                "required": true
                            }
                        },
                        "conditions": ["aws:RequestTag/${TagKey}", "aws:TagKeys"],
                        "dependentActions": ["example:DescribeWidget"]
                    },
                    "DescribeWidget": {
                        "url": "https://example.com/DescribeWidget",
                        "description": "Describes a widget",
                        "accessLevel": "Read"
                    },
                    "ListWidgets": {
                        "accessLevel": "List"
                    },
                    "PutWidgetPolicy": {
                        "accessLevel": "Permissions management"
                    },
                    "TagWidget": {
                        "accessLevel": "Tagging"
                    }
                },
                "resourceTypes": {
                    "widget": {
                        "name": "widget",
                        "url": "https://example.com/widget",
                        "arn": "arn:${Partition}:example:${Region}:${Account}:widget/${WidgetId}",
                        "conditionKeys": ["aws:ResourceTag/${TagKey}"]
                    }
                },
                "conditions": {
                    "aws:RequestTag/${TagKey}": {
                        "description": "Filters access by the tags that are passed in the request",
                        "type": "String"
                    },
                    "example:Color": {
                        "type": "String",
                        "defaultOperator": "StringEquals"
                    },
                    "example:Owner": {
                        "type": "ARN"
                    },
                    "example:Size": {
                        "type": "Numeric"
                    }
                }
            }"# })
        .unwrap()
    }

    #[test_log::test]
    fn test_actions() {
        let service = example_service();
        assert_eq!(service.prefix(), "example");
        assert_eq!(service.name(), "Example Service");
        assert_eq!(service.actions().len(), 5);

        let (name, action) = service.action("CreateWidget").unwrap();
        assert_eq!(name, "CreateWidget");
        assert_eq!(action.access_level(), AccessLevel::Write);
        assert_eq!(action.description(), "Creates a widget");
        assert_eq!(action.url(), "https://example.com/CreateWidget");
        assert!(action.resource_types()["widget"].required);
        assert_eq!(action.conditions(), ["aws:RequestTag/${TagKey}", "aws:TagKeys"]);
        assert_eq!(action.dependent_actions(), ["example:DescribeWidget"]);

        let (name, action) = service.action("describewidget").unwrap();
        assert_eq!(name, "DescribeWidget");
        assert!(action.resource_types().is_empty());
        assert!(action.dependent_actions().is_empty());
        assert!(service.action("DeleteWidget").is_none());

        let levels = [
            (AccessLevel::List, vec!["ListWidgets"]),
            (AccessLevel::Read, vec!["DescribeWidget"]),
            (AccessLevel::Write, vec!["CreateWidget"]),
            (AccessLevel::Tagging, vec!["TagWidget"]),
            (AccessLevel::PermissionsManagement, vec!["PutWidgetPolicy"]),
        ];
        for (level, expected) in levels {
            assert_eq!(service.actions_with_access_level(level).collect::<Vec<_>>(), expected);
        }

        let pattern = RegexBuilder::new("widget$").case_insensitive(true).build().unwrap();
        assert_eq!(
            service.matching_actions(&pattern).collect::<Vec<_>>(),
            vec!["CreateWidget", "DescribeWidget", "TagWidget"]
        );
    }

    #[test_log::test]
    fn test_resource_types() {
        let service = example_service();
        let widget = service.resource_type("widget").unwrap();
        assert_eq!(widget.name(), "widget");
        assert_eq!(widget.url(), "https://example.com/widget");
        assert_eq!(widget.arn(), "arn:${Partition}:example:${Region}:${Account}:widget/${WidgetId}");
        assert_eq!(widget.template().placeholders(), vec!["Partition", "Region", "Account", "WidgetId"]);
        assert_eq!(widget.condition_keys(), ["aws:ResourceTag/${TagKey}"]);
        assert!(service.resource_type("gadget").is_none());
    }

    #[test_log::test]
    fn test_condition_keys() {
        let service = example_service();
        assert_eq!(service.condition_key("example:Color").unwrap().default_operator().to_string(), "StringEquals");
        assert_eq!(service.condition_key("EXAMPLE:color").unwrap().default_operator().to_string(), "StringEquals");
        assert_eq!(service.condition_key("example:Owner").unwrap().default_operator().to_string(), "ArnLike");
        assert_eq!(service.condition_key("example:Size").unwrap().default_operator().to_string(), "NumericEquals");

        let tag = service.condition_key("aws:RequestTag/Environment").unwrap();
        assert_eq!(tag.default_operator().to_string(), "StringLike");
        assert_eq!(tag.description(), "Filters access by the tags that are passed in the request");
        assert!(service.condition_key("aws:RequestTag/").is_none());
        assert!(service.condition_key("example:Weight").is_none());
    }

    #[test_log::test]
    fn test_access_level_names() {
        assert_eq!(AccessLevel::PermissionsManagement.to_string(), "Permissions management");
        assert_eq!(
            serde_json::from_str::<AccessLevel>(r#""Permissions management""#).unwrap(),
            AccessLevel::PermissionsManagement
        );
        assert_eq!(serde_json::to_string(&AccessLevel::Tagging).unwrap(), r#""Tagging""#);
        assert!(serde_json::from_str::<AccessLevel>(r#""Admin""#).is_err());
    }
}
