use {
    super::Statement,
    crate::{catalog::ServiceDefinition, AccessLevel, StatementError},
    log::debug,
    regex::RegexBuilder,
    std::sync::Arc,
};

/// Operations on the service a statement was created for.
impl Statement {
    /// Add `{prefix}:{action}` for the bound service, or `action` alone if the statement isn't bound.
    pub fn to<S: AsRef<str>>(&mut self, action: S) -> &mut Self {
        let action = match &self.service {
            Some(prefix) => format!("{}:{}", prefix, action.as_ref()),
            None => action.as_ref().to_string(),
        };
        self.add(action)
    }

    /// Add every action of the bound service, or `*` if the statement isn't bound.
    pub fn all_actions(&mut self) -> &mut Self {
        let action = match &self.service {
            Some(prefix) => format!("{}:*", prefix),
            None => "*".to_string(),
        };
        self.add(action)
    }

    pub fn all_list_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.all_access_level_actions(AccessLevel::List, "all_list_actions")
    }

    pub fn all_read_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.all_access_level_actions(AccessLevel::Read, "all_read_actions")
    }

    pub fn all_write_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.all_access_level_actions(AccessLevel::Write, "all_write_actions")
    }

    pub fn all_tagging_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.all_access_level_actions(AccessLevel::Tagging, "all_tagging_actions")
    }

    pub fn all_permission_management_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.all_access_level_actions(AccessLevel::PermissionsManagement, "all_permission_management_actions")
    }

    fn all_access_level_actions(
        &mut self,
        level: AccessLevel,
        operation: &'static str,
    ) -> Result<&mut Self, StatementError> {
        let definition = self.bound_definition(operation)?;
        let before = self.actions.len();
        for name in definition.actions_with_access_level(level) {
            self.actions.push(format!("{}:{}", definition.prefix(), name));
        }

        debug!("Statement: added {} {} actions for {}", self.actions.len() - before, level, definition.prefix());
        Ok(self)
    }

    /// Add every action of the bound service whose name matches `pattern`, a case-insensitive regular expression.
    pub fn all_matching_actions(&mut self, pattern: &str) -> Result<&mut Self, StatementError> {
        let regex = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => regex,
            Err(e) => {
                debug!("Invalid action pattern {}: {}", pattern, e);
                return Err(StatementError::InvalidPattern(pattern.to_string()));
            }
        };

        let definition = self.bound_definition("all_matching_actions")?;
        let before = self.actions.len();
        for name in definition.matching_actions(&regex) {
            self.actions.push(format!("{}:{}", definition.prefix(), name));
        }

        debug!("Statement: {} actions of {} match {}", self.actions.len() - before, definition.prefix(), pattern);
        Ok(self)
    }

    /// Add the ARN of a resource type of the bound service, filling its template from `values` and the statement's
    /// [ArnDefaults](crate::ArnDefaults).
    pub fn on_resource(&mut self, resource_type: &str, values: &[(&str, &str)]) -> Result<&mut Self, StatementError> {
        let definition = self.bound_definition("on_resource")?;
        let template = match definition.resource_type(resource_type) {
            Some(rt) => rt.template(),
            None => {
                return Err(StatementError::UnknownResourceType {
                    service: definition.prefix().to_string(),
                    resource_type: resource_type.to_string(),
                })
            }
        };

        Ok(self.on_template(template, values))
    }

    fn bound_definition(&self, operation: &'static str) -> Result<Arc<ServiceDefinition>, StatementError> {
        match (&self.service, &self.definition) {
            (None, _) => Err(StatementError::UnboundService(operation)),
            (Some(prefix), None) => Err(StatementError::UnknownService(prefix.clone())),
            (Some(_), Some(definition)) => Ok(definition.clone()),
        }
    }
}
