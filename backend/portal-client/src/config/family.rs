use serde::{Deserialize, Serialize};

/// Group of datasets sharing one bootstrap page, one `.cda` file and
/// therefore one session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ResourceFamily {
    Products,
    Freight,
}

impl ResourceFamily {
    pub const fn name(&self) -> &'static str {
        match self {
            ResourceFamily::Products => "products",
            ResourceFamily::Freight => "freight",
        }
    }
}

impl std::fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Upstream contract paths for one resource family, relative to the portal base URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyConfig {
    /// Page whose only useful side effect is setting the session cookies.
    pub bootstrap_path: String,
    /// CDA query service endpoint.
    pub query_path: String,
    /// Server-side `.cda` definition file sent as the `path` parameter.
    pub cda_path: String,
}

impl FamilyConfig {
    pub fn products() -> Self {
        Self {
            bootstrap_path: "/pentaho/api/repos/%3Ahome%3AProdutos%3Aprodutos360.wcdf/generatedContent?userid=pentaho&password=password".to_string(),
            query_path: default_query_path(),
            cda_path: "/home/Produtos/produtos360.cda".to_string(),
        }
    }

    pub fn freight() -> Self {
        Self {
            bootstrap_path: "/pentaho/api/repos/%3Ahome%3Afrete%3Afrete.wcdf/generatedContent?userid=pentaho&password=password".to_string(),
            query_path: default_query_path(),
            cda_path: "/home/frete/frete.cda".to_string(),
        }
    }
}

/// Server-side chart renderer used for the supply/demand image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChartConfig {
    pub path: String,
    pub script: String,
    pub output_type: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            path: "/pentaho/plugin/cgg/api/services/draw".to_string(),
            script: "/home/Produtos/ofertaDemanda.js".to_string(),
            output_type: "png".to_string(),
        }
    }
}

fn default_query_path() -> String {
    "/pentaho/plugin/cda/api/doQuery".to_string()
}
