/// The null operation name. Null never takes an IfExists suffix.
pub(super) const NULL_DISPLAY_NAME: &str = "Null";
