//! SOAP 1.1 adapter for the handy web service (`SvcHandy.asmx`).

mod builders;
mod client;
mod envelope;
mod error;
mod parsers;
mod service;
mod xml;

pub use client::{SoapAsmxClient, SoapClientConfig};
pub use error::SoapError;
pub use service::{SoapHandyService, DEFAULT_ENDPOINT};
