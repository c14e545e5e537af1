//! DNS-backed mail provider classification.
//!
//! Looks up a domain's MX records and maps the preferred exchange host to a
//! named provider. Domains that plainly cannot resolve are classified
//! without a lookup; only transport-level resolver failures surface as
//! errors.

use async_trait::async_trait;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::TokioAsyncResolver;

use crate::app::ports::DomainClassifierPort;

/// Exchange host suffix to provider name. Checked in order against the
/// lowercased, dot-trimmed preferred exchange.
const PROVIDER_SUFFIXES: [(&str, &str); 12] = [
    ("google.com", "google"),
    ("googlemail.com", "google"),
    ("outlook.com", "microsoft"),
    ("zoho", "zoho"),
    ("yahoodns.net", "yahoo"),
    ("pphosted.com", "proofpoint"),
    ("mimecast", "mimecast"),
    ("barracudanetworks.com", "barracuda"),
    ("mxlogic.net", "mcafee"),
    ("messagelabs.com", "symantec"),
    ("secureserver.net", "godaddy"),
    ("emailsrvr.com", "rackspace"),
];

fn identify_provider(exchange: &str) -> &'static str {
    let host = exchange.trim_end_matches('.').to_ascii_lowercase();
    for (suffix, provider) in PROVIDER_SUFFIXES {
        if host.ends_with(suffix) || host.contains(&format!(".{}", suffix)) {
            return provider;
        }
    }
    "other"
}

pub struct DnsMxClassifier {
    resolver: TokioAsyncResolver,
}

impl DnsMxClassifier {
    /// Classifier backed by the system's default resolver configuration.
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }
}

impl Default for DnsMxClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainClassifierPort for DnsMxClassifier {
    async fn classify(&self, domain: &str) -> Result<String, String> {
        let domain = domain.trim();
        if domain.is_empty() || !domain.contains('.') {
            return Ok("unknown".to_string());
        }

        let lookup = match self.resolver.mx_lookup(domain).await {
            Ok(lookup) => lookup,
            Err(err) => {
                // No MX records is an answer, not a failure.
                if matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                    return Ok("none".to_string());
                }
                return Err(format!("MX resolution for {} failed: {}", domain, err));
            }
        };

        let preferred = lookup.iter().min_by_key(|mx| mx.preference());
        let provider = match preferred {
            Some(mx) => identify_provider(&mx.exchange().to_utf8()),
            None => return Ok("none".to_string()),
        };

        debug!(%domain, provider, "classified mail provider");
        Ok(provider.to_string())
    }
}
