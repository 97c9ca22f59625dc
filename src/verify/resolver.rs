use std::future::Future;

use tracing::warn;
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    lookup::{MxLookup, TxtLookup},
    proto::op::ResponseCode,
    system_conf::read_system_conf,
};

use super::{LookupError, MxRecord};

pub(crate) const DMARC_LABEL: &str = "_dmarc";

/// DNS queries needed by a verification.
///
/// A name that exists but has no record of the requested type resolves to an
/// empty list; a name that does not exist is a [`LookupError::NoSuchHost`].
pub trait DnsLookup: Send + Sync {
    fn lookup_mx(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<MxRecord>, LookupError>> + Send;

    fn lookup_txt(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<String>, LookupError>> + Send;
}

/// Resolver configured from `/etc/resolv.conf`, or the library's default
/// upstreams when the system configuration can't be loaded. Answers are
/// never cached.
pub fn system_resolver() -> TokioAsyncResolver {
    let (config, opts) = system_config();
    TokioAsyncResolver::tokio(config, opts)
}

pub(crate) fn system_config() -> (ResolverConfig, ResolverOpts) {
    let (config, opts) = match read_system_conf() {
        Ok(conf) => conf,
        Err(err) => {
            warn!(error = %err, "system resolver configuration unavailable, using defaults");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    (config, uncached(opts))
}

fn uncached(mut opts: ResolverOpts) -> ResolverOpts {
    opts.cache_size = 0;
    opts
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, LookupError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(|err| LookupError::idna(trimmed, err))
}

pub(crate) fn fqdn(label: &str, domain: &str) -> String {
    let trimmed = label.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", trimmed, domain)
    }
}

pub fn dmarc_name(domain: &str) -> String {
    fqdn(DMARC_LABEL, domain)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

impl DnsLookup for TokioAsyncResolver {
    async fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, LookupError> {
        match self.mx_lookup(name).await {
            Ok(lookup) => Ok(collect_mx_records(&lookup)),
            Err(err) => empty_or_error(name, err),
        }
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        match self.txt_lookup(name).await {
            Ok(lookup) => Ok(collect_txt_records(&lookup)),
            Err(err) => empty_or_error(name, err),
        }
    }
}

fn collect_mx_records(lookup: &MxLookup) -> Vec<MxRecord> {
    let mut records: Vec<MxRecord> = lookup
        .iter()
        .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(mx.exchange().to_utf8())))
        .collect();
    records.sort();
    records.dedup();
    records
}

// character-strings of one TXT record are joined without separator
fn collect_txt_records(lookup: &TxtLookup) -> Vec<String> {
    lookup
        .iter()
        .map(|txt| {
            txt.txt_data()
                .iter()
                .map(|piece| String::from_utf8_lossy(piece))
                .collect::<String>()
        })
        .collect()
}

// NOERROR without answers is NODATA; SERVFAIL, REFUSED and the other codes
// are reported as NoRecordsFound too but are failures
fn empty_or_error<T>(name: &str, err: ResolveError) -> Result<Vec<T>, LookupError> {
    let response_code = match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => Some(*response_code),
        _ => None,
    };
    match response_code {
        Some(ResponseCode::NoError) => Ok(Vec::new()),
        Some(ResponseCode::NXDomain) => Err(LookupError::no_such_host(name)),
        _ => Err(LookupError::resolve(name, err)),
    }
}
