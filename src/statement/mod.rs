mod global;
mod principals;
mod service;

use {
    crate::{
        catalog::{Catalog, ServiceDefinition},
        display_json, from_str_json, global_condition_key,
        serutil::ElementList,
        Action, ActionList, ArnDefaults, ArnTemplate, Condition, ConditionValue, Effect, Operator, Principal,
        PrincipalType, Resource, ResourceList, StatementError,
    },
    log::{debug, error, trace},
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        ser::{SerializeMap, Serializer},
        Deserialize, Serialize,
    },
    std::{
        fmt::{Formatter, Result as FmtResult},
        str::FromStr,
        sync::Arc,
    },
};

/// One statement, or a list of them, as it appears in a policy's `Statement` element.
pub type StatementList = ElementList<Statement>;

const FIELDS: &[&str] =
    &["Sid", "Effect", "Action", "NotAction", "Resource", "NotResource", "Principal", "NotPrincipal", "Condition"];

/// An IAM policy statement, built up through successive calls and serialized as IAM JSON.
///
/// ```
/// # use iam_statement_builder::Statement;
/// let mut statement = Statement::with_service("glacier");
/// statement.allow().to("DeleteArchive").to("DescribeVault").condition("ArchiveAgeInDays", "30");
/// statement.on_resource("vault", &[("VaultName", "examplevault")]).unwrap();
///
/// assert_eq!(
///     statement.to_json(),
///     serde_json::json!({
///         "Effect": "Allow",
///         "Action": ["glacier:DeleteArchive", "glacier:DescribeVault"],
///         "Resource": ["arn:aws:glacier:*:*:vaults/examplevault"],
///         "Condition": {"StringEquals": {"glacier:ArchiveAgeInDays": "30"}},
///     })
/// );
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Statement {
    sid: Option<String>,
    effect: Effect,
    actions: ActionList,
    not_action: bool,
    resources: ResourceList,
    not_resource: bool,
    principal: Option<Principal>,
    not_principal: bool,
    condition: Condition,
    service: Option<String>,
    definition: Option<Arc<ServiceDefinition>>,
    defaults: ArnDefaults,
}

impl Statement {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sid<S: Into<String>>(sid: S) -> Self {
        Self {
            sid: Some(sid.into()),
            ..Self::default()
        }
    }

    /// Create a statement bound to a service prefix, looking the service up in [Catalog::builtin].
    ///
    /// The prefix is bound even when the catalog doesn't know the service; operations that need the service's
    /// actions or resource types then fail with [StatementError::UnknownService].
    pub fn with_service<S: Into<String>>(prefix: S) -> Self {
        Self::with_service_in(prefix, Catalog::builtin())
    }

    /// Create a statement bound to a service prefix, looking the service up in `catalog`.
    pub fn with_service_in<S: Into<String>>(prefix: S, catalog: &Catalog) -> Self {
        let prefix = prefix.into();
        let definition = catalog.shared_service(&prefix);
        if definition.is_none() {
            debug!("Service {} is not in the catalog", prefix);
        }

        Self {
            service: Some(prefix),
            definition,
            ..Self::default()
        }
    }

    /// Set the values substituted for `${Partition}`, `${Region}` and `${Account}` in ARN templates and used in
    /// principal ARNs.
    pub fn with_defaults(&mut self, defaults: ArnDefaults) -> &mut Self {
        self.defaults = defaults;
        self
    }

    pub fn sid<S: Into<String>>(&mut self, sid: S) -> &mut Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn allow(&mut self) -> &mut Self {
        self.effect(Effect::Allow)
    }

    pub fn deny(&mut self) -> &mut Self {
        self.effect(Effect::Deny)
    }

    pub fn effect(&mut self, effect: Effect) -> &mut Self {
        trace!("Statement: effect {}", effect);
        self.effect = effect;
        self
    }

    /// Add an action identifier such as `glacier:DeleteArchive`. Duplicates are kept and nothing is validated.
    pub fn add<S: Into<String>>(&mut self, action: S) -> &mut Self {
        let action = action.into();
        trace!("Statement: add action {}", action);
        self.actions.push(action);
        self
    }

    /// Render the actions as `NotAction`.
    pub fn not_action(&mut self) -> &mut Self {
        self.not_action = true;
        self
    }

    /// Add a resource ARN, or `*`.
    pub fn on<R: Into<Resource>>(&mut self, resource: R) -> &mut Self {
        let resource = resource.into();
        if let Resource::Arn(arn) = &resource {
            let unresolved = arn.unresolved();
            if !unresolved.is_empty() {
                debug!("Resource {} has unsubstituted placeholders: {}", arn, unresolved.join(", "));
            }
        }

        trace!("Statement: add resource {}", resource);
        self.resources.push(resource);
        self
    }

    pub fn on_all_resources(&mut self) -> &mut Self {
        self.on(Resource::Any)
    }

    /// Substitute `values` into an ARN template and add the result as a resource. The partition, region and
    /// account fall back to the statement's [ArnDefaults]; other placeholders without a value are left in place.
    pub fn on_template<T: Into<ArnTemplate>>(&mut self, template: T, values: &[(&str, &str)]) -> &mut Self {
        let arn = template.into().resolve(values, &self.defaults);
        self.on(arn)
    }

    /// Render the resources as `NotResource`.
    pub fn not_resource(&mut self) -> &mut Self {
        self.not_resource = true;
        self
    }

    /// Add a condition on `key`, using the key's default operator.
    ///
    /// A key without a `:` is taken to belong to the bound service. The operator comes from the global `aws:*`
    /// keys, then from the catalog entry for the key's service, and is `StringLike` otherwise.
    pub fn condition<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: AsRef<str>,
        V: Into<ConditionValue>,
    {
        let key = self.qualify_key(key.as_ref());
        let op = self.default_operator(&key);
        self.set_condition(op, key, value.into())
    }

    /// Add a condition on `key` with an explicit operator. A value already set for the same operator and key is
    /// replaced.
    pub fn condition_with<K, V, O>(&mut self, key: K, value: V, operator: O) -> &mut Self
    where
        K: AsRef<str>,
        V: Into<ConditionValue>,
        O: Into<Operator>,
    {
        let key = self.qualify_key(key.as_ref());
        self.set_condition(operator.into(), key, value.into())
    }

    fn set_condition(&mut self, op: Operator, key: String, value: ConditionValue) -> &mut Self {
        let name = op.to_string();
        if let Some(previous) = self.condition.add(op, key.as_str(), value) {
            debug!("Statement: replaced condition {} {} (was {})", name, key, previous);
        }
        self
    }

    fn qualify_key(&self, key: &str) -> String {
        match &self.service {
            Some(prefix) if !key.contains(':') => format!("{}:{}", prefix, key),
            _ => key.to_string(),
        }
    }

    /// The operator [Statement::condition] uses for `key`.
    pub fn default_operator(&self, key: &str) -> Operator {
        if let Some(global) = global_condition_key(key) {
            return global.default_operator();
        }

        let prefix = match key.split_once(':') {
            Some((prefix, _)) => prefix,
            None => return Operator::default(),
        };

        let definition = match &self.definition {
            Some(definition) if definition.prefix() == prefix => definition.condition_key(key),
            _ => Catalog::builtin().service(prefix).and_then(|service| service.condition_key(key)),
        };

        match definition {
            Some(definition) => definition.default_operator(),
            None => Operator::default(),
        }
    }

    /// Render the principals as `NotPrincipal`.
    pub fn not_principal(&mut self) -> &mut Self {
        self.not_principal = true;
        self
    }

    fn add_principal<S: Into<String>>(&mut self, principal_type: PrincipalType, value: S) -> &mut Self {
        let value = value.into();
        trace!("Statement: add principal {} {}", principal_type, value);
        self.principal.get_or_insert_with(Principal::default).push(principal_type, value);
        self
    }

    #[inline]
    pub fn get_sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn get_effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn actions(&self) -> &ActionList {
        &self.actions
    }

    #[inline]
    pub fn is_not_action(&self) -> bool {
        self.not_action
    }

    /// Parse every action, failing on the first that isn't a valid `service:Action` identifier or `*`.
    pub fn parsed_actions(&self) -> Result<Vec<Action>, StatementError> {
        self.actions.iter().map(|action| Action::from_str(action)).collect()
    }

    #[inline]
    pub fn resources(&self) -> &ResourceList {
        &self.resources
    }

    #[inline]
    pub fn is_not_resource(&self) -> bool {
        self.not_resource
    }

    #[inline]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    #[inline]
    pub fn is_not_principal(&self) -> bool {
        self.not_principal
    }

    #[inline]
    pub fn conditions(&self) -> &Condition {
        &self.condition
    }

    /// The bound service prefix, if any.
    #[inline]
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    #[inline]
    pub fn arn_defaults(&self) -> &ArnDefaults {
        &self.defaults
    }

    /// The statement as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to serialize statement: {}", e);
                serde_json::Value::Null
            }
        }
    }
}

display_json!(Statement);
from_str_json!(Statement);

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(sid) = &self.sid {
            map.serialize_entry("Sid", sid)?;
        }

        map.serialize_entry("Effect", &self.effect)?;
        map.serialize_entry(if self.not_action { "NotAction" } else { "Action" }, &self.actions)?;

        let resource_key = if self.not_resource { "NotResource" } else { "Resource" };
        if !self.resources.is_empty() {
            map.serialize_entry(resource_key, &self.resources)?;
        } else if self.principal.is_none() {
            map.serialize_entry(resource_key, &[Resource::Any])?;
        }

        if let Some(principal) = &self.principal {
            map.serialize_entry(if self.not_principal { "NotPrincipal" } else { "Principal" }, principal)?;
        }

        if !self.condition.is_empty() {
            map.serialize_entry("Condition", &self.condition)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatementVisitor {})
    }
}

struct StatementVisitor;

impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
        formatter.write_str("a map of statement properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Statement, A::Error> {
        let mut statement = Statement::new();
        let mut sid_seen = false;
        let mut effect_seen = false;
        let mut action_seen = false;
        let mut not_action_seen = false;
        let mut resource_seen = false;
        let mut not_resource_seen = false;
        let mut principal_seen = false;
        let mut not_principal_seen = false;
        let mut condition_seen = false;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "Sid" => {
                    if sid_seen {
                        return Err(de::Error::duplicate_field("Sid"));
                    }

                    sid_seen = true;
                    statement.sid = Some(access.next_value::<String>()?);
                }
                "Effect" => {
                    if effect_seen {
                        return Err(de::Error::duplicate_field("Effect"));
                    }

                    effect_seen = true;
                    statement.effect = access.next_value::<Effect>()?;
                }
                "Action" => {
                    if action_seen {
                        return Err(de::Error::duplicate_field("Action"));
                    }

                    action_seen = true;
                    statement.actions = access.next_value::<ActionList>()?;
                }
                "NotAction" => {
                    if not_action_seen {
                        return Err(de::Error::duplicate_field("NotAction"));
                    }

                    not_action_seen = true;
                    statement.not_action = true;
                    statement.actions = access.next_value::<ActionList>()?;
                }
                "Resource" => {
                    if resource_seen {
                        return Err(de::Error::duplicate_field("Resource"));
                    }

                    resource_seen = true;
                    statement.resources = access.next_value::<ResourceList>()?;
                }
                "NotResource" => {
                    if not_resource_seen {
                        return Err(de::Error::duplicate_field("NotResource"));
                    }

                    not_resource_seen = true;
                    statement.not_resource = true;
                    statement.resources = access.next_value::<ResourceList>()?;
                }
                "Principal" => {
                    if principal_seen {
                        return Err(de::Error::duplicate_field("Principal"));
                    }

                    principal_seen = true;
                    statement.principal = Some(access.next_value::<Principal>()?);
                }
                "NotPrincipal" => {
                    if not_principal_seen {
                        return Err(de::Error::duplicate_field("NotPrincipal"));
                    }

                    not_principal_seen = true;
                    statement.not_principal = true;
                    statement.principal = Some(access.next_value::<Principal>()?);
                }
                "Condition" => {
                    if condition_seen {
                        return Err(de::Error::duplicate_field("Condition"));
                    }

                    condition_seen = true;
                    statement.condition = access.next_value::<Condition>()?;
                }
                _ => return Err(de::Error::unknown_field(&key, FIELDS)),
            }
        }

        let mut errors = Vec::with_capacity(4);
        if !effect_seen {
            errors.push("Effect must be set.");
        }

        match (action_seen, not_action_seen) {
            (true, true) => errors.push("Action and NotAction cannot both be set."),
            (false, false) => errors.push("Either Action or NotAction must be set."),
            _ => (),
        }

        if resource_seen && not_resource_seen {
            errors.push("Resource and NotResource cannot both be set.");
        }

        if principal_seen && not_principal_seen {
            errors.push("Principal and NotPrincipal cannot both be set.");
        }

        if errors.is_empty() {
            Ok(statement)
        } else {
            let msg = errors.join(" ");
            debug!("Invalid statement: {}", msg);
            Err(de::Error::custom(msg.trim_end_matches('.')))
        }
    }
}
