use {
    crate::{serutil::StringLikeList, StatementError},
    log::debug,
    serde::{
        de::{self, Deserializer, Unexpected, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The actions accumulated by a statement. Entries are kept exactly as added; see [Action] for a validated view.
pub type ActionList = StringLikeList<String>;

/// A parsed `service:Action` identifier, possibly containing `*` and `?` wildcards in the action part.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Any,
    Specific {
        service: String,
        action: String,
    },
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, StatementError> {
        let service = service.into();
        let action = action.into();

        if service.is_empty() {
            debug!("Action '{service}:{action}' has an empty service.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        if action.is_empty() {
            debug!("Action '{service}:{action}' has an empty action.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        if !service.is_ascii() || !action.is_ascii() {
            debug!("Action '{service}:{action}' is not ASCII.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        for (i, c) in service.bytes().enumerate() {
            if !c.is_ascii_alphanumeric() && !(i > 0 && i < service.len() - 1 && (c == b'-' || c == b'_')) {
                debug!("Action '{service}:{action}' has an invalid service.");
                return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
            }
        }

        for (i, c) in action.bytes().enumerate() {
            if !c.is_ascii_alphanumeric()
                && c != b'*'
                && c != b'?'
                && !(i > 0 && i < action.len() - 1 && (c == b'-' || c == b'_'))
            {
                debug!("Action '{service}:{action}' has an invalid action.");
                return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
            }
        }

        Ok(Action::Specific {
            service,
            action,
        })
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    #[inline]
    pub fn is_specific(&self) -> bool {
        matches!(self, Self::Specific { .. })
    }

    /// Indicates whether the action part contains a wildcard.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        match self {
            Self::Any => true,
            Self::Specific {
                action,
                ..
            } => action.contains(|c| c == '*' || c == '?'),
        }
    }

    #[inline]
    pub fn service(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Specific {
                service,
                ..
            } => service,
        }
    }

    #[inline]
    pub fn action(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Specific {
                action,
                ..
            } => action,
        }
    }
}

impl FromStr for Action {
    type Err = StatementError;
    fn from_str(v: &str) -> Result<Self, Self::Err> {
        if v == "*" {
            return Ok(Self::Any);
        }

        let parts: Vec<&str> = v.split(':').collect();
        if parts.len() != 2 {
            return Err(StatementError::InvalidAction(v.to_string()));
        }

        let service = parts[0];
        let action = parts[1];

        Action::new(service, action)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Specific {
                service,
                action,
            } => write!(f, "{}:{}", service, action),
        }
    }
}

struct ActionVisitor {}
impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "service:action or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match Action::from_str(v) {
            Ok(action) => Ok(action),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ActionVisitor {})
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{Action, ActionList},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_action_list_keeps_duplicates() {
        let mut actions = ActionList::default();
        actions.push("glacier:ListVaults".to_string());
        actions.push("glacier:ListVaults".to_string());
        assert_eq!(actions.len(), 2);
        assert_eq!(
            format!("{}", actions),
            indoc! {r#"
            [
                "glacier:ListVaults",
                "glacier:ListVaults"
            ]"#}
        );
    }

    #[test_log::test]
    fn test_bad_strings() {
        assert_eq!(Action::from_str("").unwrap_err().to_string(), "Invalid action: ");
        assert_eq!(Action::from_str("ec2:").unwrap_err().to_string(), "Invalid action: ec2:");
        assert_eq!(
            Action::from_str(":DescribeInstances").unwrap_err().to_string(),
            "Invalid action: :DescribeInstances"
        );
        assert_eq!(
            Action::from_str("🦀:DescribeInstances").unwrap_err().to_string(),
            "Invalid action: 🦀:DescribeInstances"
        );
        assert_eq!(
            Action::from_str("-ec2:DescribeInstances").unwrap_err().to_string(),
            "Invalid action: -ec2:DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2_:DescribeInstances").unwrap_err().to_string(),
            "Invalid action: ec2_:DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2:DescribeInstances-").unwrap_err().to_string(),
            "Invalid action: ec2:DescribeInstances-"
        );
        assert_eq!(Action::from_str("a:b:c").unwrap_err().to_string(), "Invalid action: a:b:c");

        assert_eq!(Action::from_str("e_c-2:De-scribe_Instances").unwrap().service(), "e_c-2");
        assert_eq!(Action::from_str("e_c-2:De-scribe_Instances").unwrap().action(), "De-scribe_Instances");
        assert!(Action::from_str("e_c-2:De-scribe_Instances").unwrap().is_specific());
        assert!(!Action::from_str("e_c-2:De-scribe_Instances").unwrap().is_wildcard());
        assert!(Action::from_str("*").unwrap().is_any());
        assert!(Action::from_str("*").unwrap().is_wildcard());
        assert_eq!(Action::from_str("*").unwrap().to_string(), "*");
    }

    #[test_log::test]
    fn test_serde() {
        let action: Action = serde_json::from_str(r#""events:PutRule""#).unwrap();
        assert_eq!(action, Action::new("events", "PutRule").unwrap());
        assert_eq!(serde_json::to_string(&action).unwrap(), r#""events:PutRule""#);

        let e = serde_json::from_str::<Action>(r#""events""#).unwrap_err();
        assert!(e.to_string().starts_with(r#"invalid value: string "events", expected service:action or "*""#));
    }
}
