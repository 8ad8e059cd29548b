use cs_common::Secret;
use log::*;

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub receita_ws_url: String,
    pub receita_ws_token: Secret<String>,
    pub via_cep_url: String,
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            receita_ws_url: "https://www.receitaws.com.br/v1".to_string(),
            receita_ws_token: Secret::new(String::new()),
            via_cep_url: "https://viacep.com.br/ws".to_string(),
            timeout_secs: 10,
        }
    }
}

impl RegistryConfig {
    pub fn new_from_env_or_default() -> Self {
        let defaults = Self::default();
        let receita_ws_url = std::env::var("LJ_RECEITA_WS_URL").unwrap_or_else(|_| {
            debug!("🔎️ LJ_RECEITA_WS_URL not set, using {}", defaults.receita_ws_url);
            defaults.receita_ws_url
        });
        let receita_ws_token = Secret::new(std::env::var("LJ_RECEITA_WS_TOKEN").unwrap_or_else(|_| {
            warn!("🔎️ LJ_RECEITA_WS_TOKEN not set. Company document checks will be rejected until it is configured.");
            String::new()
        }));
        let via_cep_url = std::env::var("LJ_VIA_CEP_URL").unwrap_or_else(|_| {
            debug!("🔎️ LJ_VIA_CEP_URL not set, using {}", defaults.via_cep_url);
            defaults.via_cep_url
        });
        let timeout_secs = std::env::var("LJ_REGISTRY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_secs);
        Self { receita_ws_url, receita_ws_token, via_cep_url, timeout_secs }
    }

    pub fn has_receita_token(&self) -> bool {
        !self.receita_ws_token.reveal().is_empty()
    }
}
