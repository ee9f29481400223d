use crate::config::{PortalConfig, ResourceFamily};
use crate::error::PortalClientError;

use url::Url;

/// Absolute URLs for one resource family, resolved once from [`PortalConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyEndpoints {
    pub bootstrap_url: Url,
    pub query_url: Url,
    pub cda_path: String,
}

/// Every URL the client talks to, plus the `Origin` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalEndpoints {
    /// Portal scheme + host (+ port), as sent in the `Origin` header.
    pub origin: String,
    pub products: FamilyEndpoints,
    pub freight: FamilyEndpoints,
    pub chart_url: Url,
}

impl PortalEndpoints {
    pub fn resolve(config: &PortalConfig) -> Result<Self, PortalClientError> {
        let base_url = Url::parse(&config.base_url)?;
        let origin = base_url.origin().ascii_serialization();

        let family = |family: ResourceFamily| -> Result<FamilyEndpoints, PortalClientError> {
            let paths = config.family(family);
            Ok(FamilyEndpoints {
                bootstrap_url: base_url.join(&paths.bootstrap_path)?,
                query_url: base_url.join(&paths.query_path)?,
                cda_path: paths.cda_path.clone(),
            })
        };

        Ok(Self {
            origin,
            products: family(ResourceFamily::Products)?,
            freight: family(ResourceFamily::Freight)?,
            chart_url: base_url.join(&config.chart.path)?,
        })
    }

    pub fn family(&self, family: ResourceFamily) -> &FamilyEndpoints {
        match family {
            ResourceFamily::Products => &self.products,
            ResourceFamily::Freight => &self.freight,
        }
    }
}
