use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

/// The lookup step of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    Mx,
    Txt,
    Dmarc,
}

/// Cause of a single failed DNS query.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup: domain is empty")]
    EmptyDomain,
    #[error("lookup {name}: invalid domain name: {source}")]
    InvalidDomain {
        name: String,
        #[source]
        source: idna::Errors,
    },
    #[error("lookup {name}: no such host")]
    NoSuchHost { name: String },
    #[error("lookup {name}: {source}")]
    Resolve {
        name: String,
        #[source]
        source: ResolveError,
    },
}

impl LookupError {
    pub(crate) fn idna(name: impl Into<String>, source: idna::Errors) -> Self {
        Self::InvalidDomain {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn no_such_host(name: impl Into<String>) -> Self {
        Self::NoSuchHost { name: name.into() }
    }

    pub(crate) fn resolve(name: impl Into<String>, source: ResolveError) -> Self {
        Self::Resolve {
            name: name.into(),
            source,
        }
    }
}

/// A verification step that could not complete. The display text is what
/// ends up in the `errorMessage` field.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Error looking up MX records: {source}")]
    MxLookup {
        #[source]
        source: LookupError,
    },
    #[error("Error looking up TXT records: {source}")]
    TxtLookup {
        #[source]
        source: LookupError,
    },
    #[error("Error looking up DMARC records: {source}")]
    DmarcLookup {
        #[source]
        source: LookupError,
    },
}

impl VerifyError {
    pub(crate) fn mx(source: LookupError) -> Self {
        Self::MxLookup { source }
    }

    pub(crate) fn txt(source: LookupError) -> Self {
        Self::TxtLookup { source }
    }

    pub(crate) fn dmarc(source: LookupError) -> Self {
        Self::DmarcLookup { source }
    }

    pub fn step(&self) -> LookupStep {
        match self {
            Self::MxLookup { .. } => LookupStep::Mx,
            Self::TxtLookup { .. } => LookupStep::Txt,
            Self::DmarcLookup { .. } => LookupStep::Dmarc,
        }
    }

    pub fn lookup_error(&self) -> &LookupError {
        match self {
            Self::MxLookup { source } | Self::TxtLookup { source } | Self::DmarcLookup { source } => {
                source
            }
        }
    }
}
