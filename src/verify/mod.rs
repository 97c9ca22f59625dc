//! MX / SPF / DMARC verification of a domain.
//!
//! The entry point is [`verify_domain`], which runs three DNS lookups in
//! sequence (MX, TXT on the domain, TXT on `_dmarc.<domain>`) and folds them
//! into a [`VerificationResult`]. The first failing lookup stops the run and
//! is reported through [`VerificationResult::error_message`].

mod classifier;
mod error;
mod resolver;
mod types;

pub use classifier::{DMARC_PREFIX, SPF_PREFIX, classify, find_record};
pub use error::{LookupError, LookupStep, VerifyError};
pub use resolver::{DnsLookup, dmarc_name, system_resolver};
pub use types::{MxRecord, VerificationResult};

use resolver::normalize_domain;
use tracing::{debug, instrument, warn};

/// Verify `domain` against `resolver`.
///
/// Never fails: a lookup error is recorded in the returned value together
/// with the results of the steps that completed before it.
#[instrument(level = "debug", skip(resolver))]
pub async fn verify_domain<R>(resolver: &R, domain: &str) -> VerificationResult
where
    R: DnsLookup,
{
    let mut result = VerificationResult::new(domain);
    if let Err(err) = run_lookups(resolver, domain, &mut result).await {
        warn!(domain, step = ?err.step(), error = %err, "verification stopped");
        result.record_error(&err);
    }
    result
}

async fn run_lookups<R>(
    resolver: &R,
    domain: &str,
    result: &mut VerificationResult,
) -> Result<(), VerifyError>
where
    R: DnsLookup,
{
    let ascii = normalize_domain(domain).map_err(VerifyError::mx)?;

    let mx_records = resolver
        .lookup_mx(&ascii)
        .await
        .map_err(VerifyError::mx)?;
    debug!(count = mx_records.len(), "MX records");
    result.has_mx = !mx_records.is_empty();

    let txt_records = resolver
        .lookup_txt(&ascii)
        .await
        .map_err(VerifyError::txt)?;
    result.set_spf(classify(&txt_records, SPF_PREFIX));

    let dmarc_records = resolver
        .lookup_txt(&dmarc_name(&ascii))
        .await
        .map_err(VerifyError::dmarc)?;
    result.set_dmarc(classify(&dmarc_records, DMARC_PREFIX));

    Ok(())
}
