use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A company record as returned by ReceitaWS. Only the registered name is interpreted; the rest of the payload is
/// kept intact so callers can forward it to clients unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub nome: String,
    #[serde(flatten)]
    pub extra: Value,
}

/// The outcome of checking a company document (CNPJ) against the public registry.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentCheck {
    pub valid: bool,
    pub message: String,
    #[serde(rename = "empresa_data", skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRecord>,
}

impl DocumentCheck {
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self { valid: false, message: message.into(), company: None }
    }

    pub fn confirmed<S: Into<String>>(message: S, company: CompanyRecord) -> Self {
        Self { valid: true, message: message.into(), company: Some(company) }
    }

    /// Check the declared account name against a registry record. The match is case-insensitive and accepts a
    /// substring in either direction; a mismatch surfaces the registered name so the caller can correct theirs.
    pub fn from_record(company: CompanyRecord, declared_name: &str) -> Self {
        let registered = company.nome.to_lowercase();
        let declared = declared_name.to_lowercase();
        if registered.contains(&declared) || declared.contains(&registered) {
            Self::confirmed("CNPJ válido", company)
        } else {
            Self::rejected(format!("Nome não confere com CNPJ. Empresa: {}", company.nome))
        }
    }
}

/// A street address resolved from a postal code by ViaCEP. Field names follow the ViaCEP wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalAddress {
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
}

/// The outcome of a postal code lookup. Serializes either as the resolved address or as the
/// `{"erro": true, "message": ...}` shape clients expect for misses.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PostalLookup {
    Found(PostalAddress),
    NotFound { erro: bool, message: String },
}

impl PostalLookup {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound { erro: true, message: message.into() }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
