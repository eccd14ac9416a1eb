mod service;

pub use service::{
    AccessLevel, ActionDefinition, ActionResourceType, ConditionKeyDefinition, ResourceTypeDefinition,
    ServiceDefinition,
};

use {
    crate::{serutil::ElementList, StatementError},
    lazy_static::lazy_static,
    log::{debug, error},
    std::{collections::BTreeMap, sync::Arc},
};

const EMBEDDED: [(&str, &str); 3] = [
    ("elasticfilesystem", include_str!("../../data/services/elasticfilesystem.json")),
    ("events", include_str!("../../data/services/events.json")),
    ("glacier", include_str!("../../data/services/glacier.json")),
];

lazy_static! {
    static ref BUILTIN: Catalog = Catalog::embedded();
}

/// Service reference data, keyed by service prefix.
///
/// ```
/// # use iam_statement_builder::{AccessLevel, Catalog};
/// let glacier = Catalog::builtin().service("glacier").unwrap();
/// assert_eq!(glacier.name(), "Amazon S3 Glacier");
///
/// let action = Catalog::builtin().lookup_action("glacier:DeleteArchive").unwrap();
/// assert_eq!(action.access_level(), AccessLevel::Write);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Catalog {
    services: BTreeMap<String, Arc<ServiceDefinition>>,
}

impl Catalog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of services shipped with this crate.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    fn embedded() -> Self {
        let mut catalog = Self::new();
        for (name, json) in EMBEDDED {
            if let Err(e) = catalog.load_json(json) {
                error!("Failed to load embedded service {}: {}", name, e);
            }
        }

        debug!("Loaded {} embedded services", catalog.services.len());
        catalog
    }

    /// Add a service, replacing any existing service with the same prefix.
    pub fn insert(&mut self, service: ServiceDefinition) -> Option<Arc<ServiceDefinition>> {
        debug!("Catalog: adding service {} ({} actions)", service.prefix(), service.actions().len());
        self.services.insert(service.prefix().to_string(), Arc::new(service))
    }

    /// Parse one service definition, or a JSON array of them, and add them to the catalog.
    ///
    /// Nothing is added if any definition fails to parse.
    pub fn load_json(&mut self, json: &str) -> Result<(), StatementError> {
        let services = match serde_json::from_str::<ElementList<ServiceDefinition>>(json) {
            Ok(services) => services,
            Err(e) => {
                debug!("Failed to parse service definition: {}", e);
                return Err(StatementError::InvalidCatalog(e.to_string()));
            }
        };

        if let Some(service) = services.iter().find(|service| service.prefix().is_empty()) {
            return Err(StatementError::InvalidCatalog(format!("service {:?} has an empty prefix", service.name())));
        }

        for service in services.into_vec() {
            self.insert(service);
        }

        Ok(())
    }

    pub fn service(&self, prefix: &str) -> Option<&ServiceDefinition> {
        self.services.get(prefix).map(|service| service.as_ref())
    }

    /// A shared handle on a service, for statements bound to it.
    pub(crate) fn shared_service(&self, prefix: &str) -> Option<Arc<ServiceDefinition>> {
        self.services.get(prefix).cloned()
    }

    /// All services, in prefix order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.values().map(|service| service.as_ref())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Look up a `service:ActionName` action.
    pub fn lookup_action(&self, action: &str) -> Result<&ActionDefinition, StatementError> {
        let (prefix, name) = match action.split_once(':') {
            Some((prefix, name)) if !prefix.is_empty() && !name.is_empty() => (prefix, name),
            _ => return Err(StatementError::InvalidAction(action.to_string())),
        };

        let service = self.service(prefix).ok_or_else(|| StatementError::UnknownService(prefix.to_string()))?;
        match service.action(name) {
            Some((_, definition)) => Ok(definition),
            None => Err(StatementError::UnknownAction(action.to_string())),
        }
    }
}
