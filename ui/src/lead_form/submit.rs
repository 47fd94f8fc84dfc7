use serde::Deserialize;
use thiserror::Error;

use super::validate::Attachment;
use crate::config::{AuthMode, LeadFormConfig};
use crate::core::dom::{Dom, Target};
use crate::core::fetch::{FetchError, HttpResponse};
use crate::core::lang::Lang;
use crate::tr;

/// One multipart POST to the form endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRequest {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    /// Text parts, in form order.
    pub fields: Vec<(String, String)>,
    /// File parts, all under the `files` field name.
    pub files: Vec<Attachment>,
}

impl LeadRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Multipart POST transport; no timeout beyond the browser's own.
#[allow(async_fn_in_trait)]
pub trait LeadTransport {
    async fn post(&self, request: &LeadRequest) -> Result<HttpResponse, FetchError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("missing credential element `{0}`")]
    Config(String),
    #[error("server rejected submission (status {status}): {message:?}")]
    Server { status: u16, message: Option<String> },
    #[error("network error: {0}")]
    Network(String),
}

impl SubmitError {
    /// Server-supplied text wins over the generic failure message.
    pub fn message(&self, lang: Lang) -> String {
        match self {
            SubmitError::Config(_) => tr!(lang, "form-config-error"),
            SubmitError::Server { message: Some(message), .. } => message.clone(),
            SubmitError::Server { message: None, .. } => tr!(lang, "form-failed"),
            SubmitError::Network(_) => tr!(lang, "form-network-error"),
        }
    }
}

/// Headers for the configured auth mode. `Credential` reads the key from
/// the `content` attribute of the named page element.
pub fn auth_headers(auth: &AuthMode, dom: &dyn Dom) -> Result<Vec<(String, String)>, SubmitError> {
    match auth {
        AuthMode::Public => Ok(Vec::new()),
        AuthMode::Credential { element_id } => {
            let key = dom
                .attr(&Target::id(element_id.as_str()), "content")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .ok_or_else(|| SubmitError::Config(element_id.clone()))?;
            Ok(vec![
                ("Authorization".to_string(), format!("Bearer {key}")),
                ("apikey".to_string(), key),
            ])
        }
    }
}

/// Consent statement stored with the lead, linking the privacy policy.
pub fn gdpr_text(config: &LeadFormConfig, lang: Lang) -> String {
    tr!(lang, "form-gdpr-text", url = config.privacy_url(lang))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Reply {
    ok: bool,
    #[serde(alias = "message")]
    error: Option<String>,
}

/// Success needs a 2xx status and `{ "ok": true }`. Bodies are read as JSON
/// when labelled so, otherwise tentatively; unparsable text becomes the
/// error message.
pub fn interpret_response(response: &HttpResponse) -> Result<(), SubmitError> {
    let reply = match serde_json::from_str::<Reply>(&response.body) {
        Ok(reply) => reply,
        Err(err) => {
            if response.is_json() {
                tracing::warn!(%err, "form endpoint sent invalid JSON");
            }
            let text = response.body.trim();
            Reply {
                ok: false,
                error: (!text.is_empty()).then(|| text.to_string()),
            }
        }
    };
    if response.is_success() && reply.ok {
        Ok(())
    } else {
        Err(SubmitError::Server {
            status: response.status,
            message: reply.error.filter(|m| !m.trim().is_empty()),
        })
    }
}
