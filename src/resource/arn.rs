use {
    super::template::placeholders,
    crate::StatementError,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

const PARTITION_START: usize = 4;

/// An Amazon Resource Name (ARN) appearing in the `Resource` element of a statement, split into its components.
///
/// Components may contain `*` and `?` wildcards and policy variables such as `${aws:username}`, e.g.
/// `arn:aws:s3:::examplebucket/${aws:username}/*`. Only the overall shape (`arn:` followed by five `:`-separated
/// components) is checked.
///
/// [ResourceArn] objects are immutable.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct ResourceArn {
    arn: String,
    service_start: usize,
    region_start: usize,
    account_id_start: usize,
    resource_start: usize,
}

impl ResourceArn {
    /// Create a new ARN from the specified components.
    ///
    /// * `partition` - The partition the resource is in.
    /// * `service` - The service the resource belongs to.
    /// * `region` - The region the resource is in.
    /// * `account_id` - The account ID the resource belongs to.
    /// * `resource` - The resource name.
    pub fn new(partition: &str, service: &str, region: &str, account_id: &str, resource: &str) -> Self {
        let arn = format!("arn:{partition}:{service}:{region}:{account_id}:{resource}");
        let service_start = PARTITION_START + partition.len() + 1;
        let region_start = service_start + service.len() + 1;
        let account_id_start = region_start + region.len() + 1;
        let resource_start = account_id_start + account_id.len() + 1;

        Self {
            arn,
            service_start,
            region_start,
            account_id_start,
            resource_start,
        }
    }

    #[inline]
    pub fn partition(&self) -> &str {
        &self.arn[PARTITION_START..self.service_start - 1]
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.arn[self.service_start..self.region_start - 1]
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.arn[self.region_start..self.account_id_start - 1]
    }

    #[inline]
    pub fn account_id(&self) -> &str {
        &self.arn[self.account_id_start..self.resource_start - 1]
    }

    /// Retrieve the resource portion, everything after the fifth `:`.
    #[inline]
    pub fn resource(&self) -> &str {
        &self.arn[self.resource_start..]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.arn
    }

    /// Template placeholders such as `${VaultName}` left unsubstituted. Policy variables (`${aws:username}`) are
    /// not placeholders and are not reported.
    pub fn unresolved(&self) -> Vec<&str> {
        placeholders(&self.arn).into_iter().filter(|name| !name.contains(':')).collect()
    }
}

impl FromStr for ResourceArn {
    type Err = StatementError;

    /// Create a [ResourceArn] from a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(6, ':').collect();
        if parts.len() != 6 || parts[0] != "arn" {
            return Err(StatementError::InvalidResource(s.to_string()));
        }

        Ok(Self::new(parts[1], parts[2], parts[3], parts[4], parts[5]))
    }
}

impl Display for ResourceArn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.arn)
    }
}
