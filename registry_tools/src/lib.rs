//! Clients for the Brazilian public registries the storefront depends on: ReceitaWS for company (CNPJ) record
//! lookups and ViaCEP for postal code (CEP) address resolution.

mod api;
mod config;
mod error;
mod helpers;

mod data_objects;

pub use api::RegistryApi;
pub use config::RegistryConfig;
pub use data_objects::{CompanyRecord, DocumentCheck, PostalAddress, PostalLookup};
pub use error::RegistryApiError;
pub use helpers::digits_only;
