use {
    super::Statement,
    crate::{ConditionValue, Operator},
};

macro_rules! global_conditions {
    ($($(#[$meta:meta])* $name:ident => $key:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<V: Into<ConditionValue>>(&mut self, value: V, operator: Option<Operator>) -> &mut Self {
                self.global_condition($key.to_string(), value.into(), operator)
            }
        )*
    };
}

macro_rules! global_bool_conditions {
    ($($(#[$meta:meta])* $name:ident => $key:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, value: Option<bool>) -> &mut Self {
                self.global_bool_condition($key, value)
            }
        )*
    };
}

macro_rules! global_tag_conditions {
    ($($(#[$meta:meta])* $name:ident => $prefix:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<V: Into<ConditionValue>>(
                &mut self,
                tag_key: &str,
                value: V,
                operator: Option<Operator>,
            ) -> &mut Self {
                self.global_condition(format!("{}{}", $prefix, tag_key), value.into(), operator)
            }
        )*
    };
}

/// Conditions on the `aws:*` keys available to every service.
///
/// Each helper takes an optional operator; without one, the key's documented default is used. The boolean keys
/// always use `Bool`, and a missing value means `true`.
impl Statement {
    fn global_condition(&mut self, key: String, value: ConditionValue, operator: Option<Operator>) -> &mut Self {
        let op = match operator {
            Some(op) => op,
            None => self.default_operator(&key),
        };
        self.set_condition(op, key, value)
    }

    fn global_bool_condition(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        self.set_condition(Operator::bool(), key.to_string(), value.unwrap_or(true).into())
    }

    global_conditions! {
        /// Services that made the request on the principal's behalf. Defaults to `ForAnyValue:StringEquals`.
        if_aws_called_via => "aws:CalledVia";
        if_aws_called_via_first => "aws:CalledViaFirst";
        if_aws_called_via_last => "aws:CalledViaLast";
        /// Defaults to `DateLessThanEquals`.
        if_aws_current_time => "aws:CurrentTime";
        /// Seconds since the epoch. Defaults to `DateLessThanEquals`.
        if_aws_epoch_time => "aws:EpochTime";
        if_aws_federated_provider => "aws:FederatedProvider";
        /// Seconds since the principal last authenticated with MFA. Defaults to `NumericLessThan`.
        if_aws_multi_factor_auth_age => "aws:MultiFactorAuthAge";
        if_aws_principal_account => "aws:PrincipalAccount";
        /// Defaults to `ArnLike`.
        if_aws_principal_arn => "aws:PrincipalArn";
        if_aws_principal_org_id => "aws:PrincipalOrgID";
        if_aws_principal_org_paths => "aws:PrincipalOrgPaths";
        if_aws_principal_service_name => "aws:PrincipalServiceName";
        if_aws_principal_service_names_list => "aws:PrincipalServiceNamesList";
        if_aws_principal_type => "aws:PrincipalType";
        if_aws_referer => "aws:Referer";
        if_aws_requested_region => "aws:RequestedRegion";
        if_aws_resource_account => "aws:ResourceAccount";
        if_aws_resource_org_id => "aws:ResourceOrgID";
        if_aws_resource_org_paths => "aws:ResourceOrgPaths";
        if_aws_source_account => "aws:SourceAccount";
        /// Defaults to `ArnLike`.
        if_aws_source_arn => "aws:SourceArn";
        if_aws_source_identity => "aws:SourceIdentity";
        /// Defaults to `IpAddress`.
        if_aws_source_ip => "aws:SourceIp";
        if_aws_source_vpc => "aws:SourceVpc";
        if_aws_source_vpce => "aws:SourceVpce";
        if_aws_tag_keys => "aws:TagKeys";
        /// Defaults to `DateGreaterThanEquals`.
        if_aws_token_issue_time => "aws:TokenIssueTime";
        if_aws_user_agent => "aws:UserAgent";
        if_aws_userid => "aws:userid";
        if_aws_username => "aws:username";
        /// Defaults to `IpAddress`.
        if_aws_vpc_source_ip => "aws:VpcSourceIp";
    }

    global_bool_conditions! {
        if_aws_multi_factor_auth_present => "aws:MultiFactorAuthPresent";
        if_aws_principal_is_aws_service => "aws:PrincipalIsAWSService";
        /// Whether the request was sent over TLS.
        if_aws_secure_transport => "aws:SecureTransport";
        if_aws_via_aws_service => "aws:ViaAWSService";
    }

    global_tag_conditions! {
        /// A tag attached to the principal making the request, `aws:PrincipalTag/{tag_key}`.
        if_aws_principal_tag => "aws:PrincipalTag/";
        /// A tag passed in the request, `aws:RequestTag/{tag_key}`.
        if_aws_request_tag => "aws:RequestTag/";
        /// A tag attached to the resource, `aws:ResourceTag/{tag_key}`.
        if_aws_resource_tag => "aws:ResourceTag/";
    }
}
