use {
    super::Statement,
    crate::{Principal, PrincipalType},
    log::debug,
};

/// Principal helpers, for resource-based policies and role trust policies.
///
/// ARNs use the partition from the statement's [ArnDefaults](crate::ArnDefaults).
impl Statement {
    /// Every principal in the account, `arn:{partition}:iam::{account}:root`.
    pub fn for_account(&mut self, account: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:root", self.defaults.partition, account);
        self.add_principal(PrincipalType::Aws, arn)
    }

    pub fn for_user(&mut self, account: &str, user: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:user/{}", self.defaults.partition, account, user);
        self.add_principal(PrincipalType::Aws, arn)
    }

    pub fn for_role(&mut self, account: &str, role: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:role/{}", self.defaults.partition, account, role);
        self.add_principal(PrincipalType::Aws, arn)
    }

    pub fn for_assumed_role_session(&mut self, account: &str, role: &str, session: &str) -> &mut Self {
        let arn = format!("arn:{}:sts::{}:assumed-role/{}/{}", self.defaults.partition, account, role, session);
        self.add_principal(PrincipalType::Aws, arn)
    }

    /// A SAML identity provider registered in the account.
    pub fn for_saml(&mut self, account: &str, provider: &str) -> &mut Self {
        let arn = format!("arn:{}:iam::{}:saml-provider/{}", self.defaults.partition, account, provider);
        self.add_principal(PrincipalType::Federated, arn)
    }

    /// A web identity or SAML provider, given as-is.
    pub fn for_federated<S: Into<String>>(&mut self, provider: S) -> &mut Self {
        self.add_principal(PrincipalType::Federated, provider)
    }

    pub fn for_federated_amazon(&mut self) -> &mut Self {
        self.for_federated("www.amazon.com")
    }

    pub fn for_federated_cognito(&mut self) -> &mut Self {
        self.for_federated("cognito-identity.amazonaws.com")
    }

    pub fn for_federated_facebook(&mut self) -> &mut Self {
        self.for_federated("graph.facebook.com")
    }

    pub fn for_federated_google(&mut self) -> &mut Self {
        self.for_federated("accounts.google.com")
    }

    /// An AWS service principal such as `lambda.amazonaws.com`.
    pub fn for_service<S: Into<String>>(&mut self, service: S) -> &mut Self {
        self.add_principal(PrincipalType::Service, service)
    }

    pub fn for_canonical_user<S: Into<String>>(&mut self, user_id: S) -> &mut Self {
        self.add_principal(PrincipalType::CanonicalUser, user_id)
    }

    /// Anyone, `{"AWS": ["*"]}`.
    pub fn for_public(&mut self) -> &mut Self {
        self.add_principal(PrincipalType::Aws, "*")
    }

    /// Anyone, written as `"Principal": "*"`. Principals added afterwards are ignored.
    pub fn for_anyone(&mut self) -> &mut Self {
        if let Some(Principal::Specified(specified)) = &self.principal {
            if !specified.is_empty() {
                debug!("Statement: replacing principals {} with \"*\"", specified);
            }
        }

        self.principal = Some(Principal::Any);
        self
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{ArnDefaults, Principal, PrincipalType, Statement},
        indoc::indoc,
        pretty_assertions::assert_eq,
        serde_json::json,
    };

    #[test_log::test]
    fn test_aws_principals() {
        let mut s = Statement::new();
        s.add("sts:AssumeRole")
            .for_account("123456789012")
            .for_user("123456789012", "alice")
            .for_role("210987654321", "Deploy")
            .for_assumed_role_session("123456789012", "Admin", "session-1")
            .for_public();

        assert_eq!(
            s.to_string(),
            indoc! { r#"
            {
                "Effect": "Allow",
                "Action": [
                    "sts:AssumeRole"
                ],
                "Principal": {
                    "AWS": [
                        "arn:aws:iam::123456789012:root",
                        "arn:aws:iam::123456789012:user/alice",
                        "arn:aws:iam::210987654321:role/Deploy",
                        "arn:aws:sts::123456789012:assumed-role/Admin/session-1",
                        "*"
                    ]
                }
            }"# }
        );
    }

    #[test_log::test]
    fn test_federated() {
        let mut s = Statement::new();
        s.with_defaults(ArnDefaults::new("aws-us-gov", "*", "*"))
            .add("sts:AssumeRoleWithWebIdentity")
            .for_saml("123456789012", "Okta")
            .for_federated_amazon()
            .for_federated_cognito()
            .for_federated_facebook()
            .for_federated_google()
            .for_federated("oidc.example.com");

        assert_eq!(
            s.to_json()["Principal"],
            json!({
                "Federated": [
                    "arn:aws-us-gov:iam::123456789012:saml-provider/Okta",
                    "www.amazon.com",
                    "cognito-identity.amazonaws.com",
                    "graph.facebook.com",
                    "accounts.google.com",
                    "oidc.example.com"
                ]
            })
        );
    }

    #[test_log::test]
    fn test_service_and_canonical_user() {
        let mut s = Statement::new();
        s.add("s3:GetObject")
            .on("arn:aws:s3:::example-bucket/*")
            .for_service("cloudfront.amazonaws.com")
            .for_canonical_user("79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be");

        let principal = s.principal().unwrap();
        match principal {
            Principal::Specified(specified) => {
                assert_eq!(specified.get(PrincipalType::Service).unwrap()[0], "cloudfront.amazonaws.com");
                assert_eq!(specified.canonical_user().unwrap().len(), 1);
                assert!(specified.aws().is_none());
            }
            Principal::Any => panic!("expected specified principals"),
        }

        assert_eq!(s.to_json()["Resource"], json!(["arn:aws:s3:::example-bucket/*"]));
    }

    #[test_log::test]
    fn test_anyone() {
        let mut s = Statement::new();
        s.add("s3:GetObject").for_service("cloudfront.amazonaws.com").for_anyone().for_account("123456789012");
        assert_eq!(s.principal(), Some(&Principal::Any));
        assert_eq!(s.to_json(), json!({"Effect": "Allow", "Action": ["s3:GetObject"], "Principal": "*"}));
    }
}
