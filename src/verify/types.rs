use serde::{Deserialize, Serialize};

use super::VerifyError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Outcome of one domain verification.
///
/// Lookup failures are carried in `error_message`; the fields set before the
/// failing step keep their values, the later ones stay at their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub domain: String,
    #[serde(rename = "hasMX")]
    pub has_mx: bool,
    #[serde(rename = "hasSPF")]
    pub has_spf: bool,
    #[serde(rename = "spfRecord")]
    pub spf_record: String,
    #[serde(rename = "hasDMARC")]
    pub has_dmarc: bool,
    #[serde(rename = "dmarcRecord")]
    pub dmarc_record: String,
    #[serde(
        rename = "errorMessage",
        default,
        skip_serializing_if = "no_message"
    )]
    pub error_message: Option<String>,
}

impl VerificationResult {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        no_message(&self.error_message)
    }

    pub(crate) fn set_spf(&mut self, (found, record): (bool, String)) {
        self.has_spf = found;
        self.spf_record = record;
    }

    pub(crate) fn set_dmarc(&mut self, (found, record): (bool, String)) {
        self.has_dmarc = found;
        self.dmarc_record = record;
    }

    // only the first failure is kept
    pub(crate) fn record_error(&mut self, err: &VerifyError) {
        if self.error_message.is_none() {
            self.error_message = Some(err.to_string());
        }
    }
}

fn no_message(message: &Option<String>) -> bool {
    message.as_deref().is_none_or(str::is_empty)
}
