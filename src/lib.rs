#![forbid(unsafe_code)]
//! domaincheck — vérification MX / SPF / DMARC d'un domaine

pub mod config;
pub mod server;
pub mod verify;

pub use config::ServerConfig;
pub use server::{ServerError, router, serve};
pub use verify::{
    DMARC_PREFIX,
    DnsLookup,
    LookupError,
    LookupStep,
    MxRecord,
    SPF_PREFIX,
    VerificationResult,
    VerifyError,
    classify,
    find_record,
    system_resolver,
    verify_domain, // << point d'entrée
};
