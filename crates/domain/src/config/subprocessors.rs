use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SubprocessorsConfig {
    #[serde(default)]
    pub filtering: FilteringConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilteringConfig {
    #[serde(default = "default_true")]
    pub log_queries: bool,

    #[serde(default = "default_true")]
    pub log_replies: bool,

    /// Symbolic response codes to drop, e.g. `["NXDOMAIN"]`.
    #[serde(default)]
    pub drop_rcodes: Vec<String>,

    /// One query IP per line.
    #[serde(default)]
    pub drop_query_ip_file: Option<String>,

    /// One exact FQDN per line.
    #[serde(default)]
    pub drop_fqdn_file: Option<String>,

    /// One regular expression per line, matched against the qname.
    #[serde(default)]
    pub drop_domain_file: Option<String>,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            log_queries: true,
            log_replies: true,
            drop_rcodes: vec![],
            drop_query_ip_file: None,
            drop_fqdn_file: None,
            drop_domain_file: None,
        }
    }
}

fn default_true() -> bool {
    true
}
