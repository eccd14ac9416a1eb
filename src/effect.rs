use {
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Whether a statement grants or refuses the listed actions. Statements allow unless told otherwise.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

impl Effect {
    #[inline]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Allow => f.write_str("Allow"),
            Self::Deny => f.write_str("Deny"),
        }
    }
}
