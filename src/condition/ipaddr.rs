use {
    super::variant::Variant,
    crate::serutil::StringLikeList,
    ipnet::IpNet,
    std::net::IpAddr,
};

/// IP address operation names.
pub(super) const IP_ADDRESS_DISPLAY_NAMES: [&str; 4] =
    ["IpAddress", "IpAddressIfExists", "NotIpAddress", "NotIpAddressIfExists"];

pub(super) fn parse_ip_address(name: &str) -> Option<Variant> {
    let index = IP_ADDRESS_DISPLAY_NAMES.iter().position(|n| *n == name)?;
    Some(Variant::split_index(index).1)
}

impl From<IpNet> for StringLikeList<String> {
    fn from(value: IpNet) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<IpNet>> for StringLikeList<String> {
    fn from(values: Vec<IpNet>) -> Self {
        Self::List(values.iter().map(IpNet::to_string).collect())
    }
}

// A bare address is written as a single-host network, as IAM shows it.
impl From<IpAddr> for StringLikeList<String> {
    fn from(value: IpAddr) -> Self {
        Self::Single(IpNet::from(value).to_string())
    }
}
