use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Eq, PartialEq)]
pub enum StatementError {
    InvalidAction(String),
    InvalidCatalog(String),
    InvalidConditionOperator(String),
    InvalidPattern(String),
    InvalidPolicyVersion(String),
    InvalidResource(String),

    /// A service-bound operation was called on a statement created without a service prefix.
    UnboundService(&'static str),
    UnknownAction(String),
    UnknownService(String),
    UnknownResourceType {
        service: String,
        resource_type: String,
    },
}

impl Display for StatementError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidCatalog(msg) => write!(f, "Invalid service catalog: {}", msg),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::InvalidPattern(pattern) => write!(f, "Invalid action pattern: {}", pattern),
            Self::InvalidPolicyVersion(version) => write!(f, "Invalid policy version: {}", version),
            Self::InvalidResource(resource) => write!(f, "Invalid resource: {}", resource),
            Self::UnboundService(operation) => write!(f, "Statement has no service prefix for {}", operation),
            Self::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            Self::UnknownService(service) => write!(f, "Unknown service: {}", service),
            Self::UnknownResourceType {
                service,
                resource_type,
            } => write!(f, "Unknown resource type for {}: {}", service, resource_type),
        }
    }
}

impl Error for StatementError {}
