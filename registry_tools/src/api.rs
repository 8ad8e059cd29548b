use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::RegistryConfig,
    data_objects::{CompanyRecord, DocumentCheck, PostalAddress, PostalLookup},
    helpers::digits_only,
    RegistryApiError,
};

/// Client for the external registries. Lookups never bubble transport errors to callers; a registry that is down
/// or a record that does not exist both come back as a rejected check, matching what storefront clients expect.
#[derive(Clone)]
pub struct RegistryApi {
    config: RegistryConfig,
    client: Arc<Client>,
}

impl RegistryApi {
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RegistryApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Check a CNPJ against ReceitaWS and confirm that `name` matches the registered company name. The match is
    /// case-insensitive and accepts a substring in either direction.
    pub async fn validate_company_document(&self, cnpj: &str, name: &str) -> DocumentCheck {
        let cnpj = digits_only(cnpj);
        if cnpj.len() != 14 {
            return DocumentCheck::rejected("CNPJ deve ter 14 dígitos");
        }
        if !self.config.has_receita_token() {
            return DocumentCheck::rejected("Token ReceitaWS não configurado");
        }
        let url = format!(
            "{}/cnpj/{cnpj}?token={}",
            self.config.receita_ws_url,
            self.config.receita_ws_token.reveal()
        );
        let record = match self.fetch_json(&url).await {
            Ok(Some(value)) => value,
            Ok(None) => return DocumentCheck::rejected("CNPJ não encontrado ou inválido"),
            Err(e) => {
                warn!("🔎️ ReceitaWS lookup for {cnpj} failed. {e}");
                return DocumentCheck::rejected("Erro ao consultar ReceitaWS");
            },
        };
        let company = match serde_json::from_value::<CompanyRecord>(record) {
            Ok(c) => c,
            Err(_) => return DocumentCheck::rejected("CNPJ não encontrado ou inválido"),
        };
        let check = DocumentCheck::from_record(company, name);
        if check.valid {
            debug!("🔎️ CNPJ {cnpj} confirmed against the registry record");
        }
        check
    }

    /// Resolve a street address from an 8 digit CEP via ViaCEP.
    pub async fn lookup_postal_code(&self, cep: &str) -> PostalLookup {
        let cep = digits_only(cep);
        if cep.len() != 8 {
            return PostalLookup::not_found("CEP deve ter 8 dígitos");
        }
        let url = format!("{}/{cep}/json/", self.config.via_cep_url);
        let value = match self.fetch_json(&url).await {
            Ok(Some(value)) => value,
            Ok(None) => return PostalLookup::not_found("CEP não encontrado"),
            Err(e) => {
                warn!("🔎️ ViaCEP lookup for {cep} failed. {e}");
                return PostalLookup::not_found("Erro ao consultar ViaCEP");
            },
        };
        // ViaCEP reports misses as a 200 response carrying an `erro` flag
        if value.get("erro").map(is_truthy).unwrap_or(false) {
            return PostalLookup::not_found("CEP não encontrado");
        }
        match serde_json::from_value::<PostalAddress>(value) {
            Ok(address) => {
                debug!("🔎️ CEP {cep} resolved to {}/{}", address.localidade, address.uf);
                PostalLookup::Found(address)
            },
            Err(e) => {
                warn!("🔎️ ViaCEP returned an unexpected payload for {cep}. {e}");
                PostalLookup::not_found("CEP não encontrado")
            },
        }
    }

    /// GET a JSON document. `Ok(None)` means the registry answered with a non-success status, which callers treat
    /// as a missing record rather than a fault.
    async fn fetch_json(&self, url: &str) -> Result<Option<Value>, RegistryApiError> {
        trace!("Sending registry query: {url}");
        let response = self.client.get(url).send().await.map_err(|e| RegistryApiError::RequestError(e.to_string()))?;
        if !response.status().is_success() {
            trace!("Registry query returned {}", response.status());
            return Ok(None);
        }
        let value = response.json::<Value>().await.map_err(|e| RegistryApiError::JsonError(e.to_string()))?;
        if value.get("nome").is_none() && value.get("cep").is_none() && value.get("erro").is_none() {
            return Ok(None);
        }
        Ok(Some(value))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
