#![warn(clippy::all)]
//! Build AWS IAM policy statements and render them as IAM JSON.
//!
//! ```
//! use iam_statement_builder::Statement;
//!
//! let mut statement = Statement::with_service("events");
//! statement.allow().to("PutEvents").on_resource("event-bus", &[("EventBusName", "orders")]).unwrap();
//! statement.if_aws_secure_transport(None);
//!
//! assert_eq!(
//!     statement.to_json(),
//!     serde_json::json!({
//!         "Effect": "Allow",
//!         "Action": ["events:PutEvents"],
//!         "Resource": ["arn:aws:events:*:*:event-bus/orders"],
//!         "Condition": {"Bool": {"aws:SecureTransport": "true"}},
//!     })
//! );
//! ```
pub(crate) mod action;
pub(crate) mod catalog;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod policy;
pub(crate) mod principal;
pub(crate) mod resource;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    action::{Action, ActionList},
    catalog::{
        AccessLevel, ActionDefinition, ActionResourceType, Catalog, ConditionKeyDefinition, ResourceTypeDefinition,
        ServiceDefinition,
    },
    condition::{
        binary_value, date_value, global_condition_key, global_condition_keys, op as condop, ArnCmp, Condition,
        ConditionKeyType, ConditionMap, ConditionOp, ConditionValue, DateCmp, GlobalConditionKey, NumericCmp,
        Operator, SetQualifier, StringCmp, Variant,
    },
    effect::Effect,
    error::StatementError,
    policy::{Policy, PolicyBuilder, PolicyBuilderError, PolicyVersion},
    principal::{
        Principal, PrincipalType, SpecifiedPrincipal, SpecifiedPrincipalBuilder, SpecifiedPrincipalBuilderError,
    },
    resource::{ArnDefaults, ArnTemplate, Resource, ResourceArn, ResourceList},
    serutil::{ElementList, ListKind, StringLikeList},
    statement::{Statement, StatementList},
};
