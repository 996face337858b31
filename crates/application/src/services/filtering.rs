use fancy_regex::Regex;
use ferrous_collector_domain::config::FilteringConfig;
use ferrous_collector_domain::{DnsMessage, DomainError, MessageKind};
use rustc_hash::FxHashSet;
use std::borrow::Cow;
use std::net::IpAddr;
use tracing::{error, info, warn};

/// Decides which decoded messages are discarded before delivery.
///
/// List files hold one entry per line; entries are lower-cased and blank
/// lines are skipped. An unreadable file only disables that list.
pub struct FilteringProcessor {
    log_queries: bool,
    log_replies: bool,
    drop_rcodes: FxHashSet<String>,
    drop_query_ips: FxHashSet<IpAddr>,
    drop_fqdns: FxHashSet<String>,
    drop_domain_patterns: Vec<Regex>,
}

impl FilteringProcessor {
    pub fn new(config: &FilteringConfig) -> Self {
        let drop_query_ips = config
            .drop_query_ip_file
            .as_deref()
            .and_then(|path| read_list(path, "query ip"))
            .map(|entries| parse_query_ips(&entries))
            .unwrap_or_default();

        let drop_fqdns = config
            .drop_fqdn_file
            .as_deref()
            .and_then(|path| read_list(path, "fqdn"))
            .map(|entries| entries.into_iter().collect())
            .unwrap_or_default();

        let drop_domain_patterns = config
            .drop_domain_file
            .as_deref()
            .and_then(|path| read_list(path, "domain regex"))
            .map(|entries| compile_patterns(&entries))
            .unwrap_or_default();

        Self::with_lists(config, drop_query_ips, drop_fqdns, drop_domain_patterns)
    }

    /// Builds a processor from lists that are already loaded.
    pub fn with_lists(
        config: &FilteringConfig,
        drop_query_ips: FxHashSet<IpAddr>,
        drop_fqdns: FxHashSet<String>,
        drop_domain_patterns: Vec<Regex>,
    ) -> Self {
        Self {
            log_queries: config.log_queries,
            log_replies: config.log_replies,
            drop_rcodes: config
                .drop_rcodes
                .iter()
                .map(|rcode| rcode.to_ascii_uppercase())
                .collect(),
            drop_query_ips,
            drop_fqdns,
            drop_domain_patterns,
        }
    }

    /// Returns `true` when `message` must not reach the sinks.
    ///
    /// Rules are checked in order: query/reply switches, response code,
    /// query IP, exact qname, qname patterns. The first match wins.
    pub fn check_if_drop(&self, message: &DnsMessage) -> bool {
        match message.kind() {
            MessageKind::Query if !self.log_queries => return true,
            MessageKind::Reply if !self.log_replies => return true,
            _ => {}
        }

        if self.drop_rcodes.contains(message.dns.rcode) {
            return true;
        }

        if self.drop_query_ips.contains(&message.network.query_ip) {
            return true;
        }

        if self.drop_fqdns.is_empty() && self.drop_domain_patterns.is_empty() {
            return false;
        }

        let qname = lowercase(&message.dns.qname);

        if self.drop_fqdns.contains(&*qname) {
            return true;
        }

        self.drop_domain_patterns
            .iter()
            .any(|pattern| pattern.is_match(&qname).unwrap_or(false))
    }
}

fn lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

fn read_list(path: &str, list: &'static str) -> Option<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let entries = parse_list(&contents);
            info!(list, path, entries = entries.len(), "Filtering: drop list loaded");
            Some(entries)
        }
        Err(e) => {
            let err = DomainError::from(e);
            error!(list, path, error = %err, "Filtering: unable to open drop list");
            None
        }
    }
}

/// Trimmed, lower-cased, non-empty lines of a list file.
pub fn parse_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn parse_query_ips(entries: &[String]) -> FxHashSet<IpAddr> {
    entries
        .iter()
        .filter_map(|entry| match entry.parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(_) => {
                let err = DomainError::InvalidIpAddress(entry.clone());
                warn!(error = %err, "Filtering: skipping query ip entry");
                None
            }
        })
        .collect()
}

fn compile_patterns(entries: &[String]) -> Vec<Regex> {
    entries
        .iter()
        .filter_map(|entry| match Regex::new(entry) {
            Ok(regex) => Some(regex),
            Err(e) => {
                let err =
                    DomainError::InvalidFilterRule(format!("Invalid regex pattern '{}': {}", entry, e));
                warn!(error = %err, "Filtering: skipping domain pattern");
                None
            }
        })
        .collect()
}
