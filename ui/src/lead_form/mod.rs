//! Contact/quote form: validation, hidden fields, one multipart POST per
//! submit, localized status text.
//!
//! The machine is split around the network call so the adapter never holds
//! it across an `await`: [`LeadForm::prepare`] validates and builds the
//! request, [`LeadForm::finish`] turns the outcome into status effects.

pub mod submit;
pub mod validate;

pub use submit::{auth_headers, gdpr_text, interpret_response, LeadRequest, LeadTransport, SubmitError};
pub use validate::{validate, Attachment, LeadFields, ValidationError, ALLOWED_EXTENSIONS, MAX_FILES, MAX_FILE_SIZE};

use crate::config::LeadFormConfig;
use crate::core::dom::{Dom, Effect, Selector, Target};
use crate::core::fetch::{FetchError, HttpResponse};
use crate::core::lang::Lang;
use crate::core::location::Location;
use crate::tr;

pub const FORM_ID: &str = "leadForm";
pub const SUBMIT_ID: &str = "leadSubmitBtn";
pub const STATUS_ID: &str = "leadFormStatus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// Nothing is sent; the effects explain why (or are empty while a
    /// submission is already in flight).
    Blocked(Vec<Effect>),
    Send { request: LeadRequest, effects: Vec<Effect> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadForm {
    config: LeadFormConfig,
    lang: Lang,
    phase: FormPhase,
}

fn named(name: &str) -> Target {
    Target::All(Selector::AttrValue("name", name.to_string()))
}

fn status(text: String, is_error: bool) -> Vec<Effect> {
    let has_text = !text.is_empty();
    vec![
        Effect::text(Target::id(STATUS_ID), text),
        Effect::class(Target::id(STATUS_ID), "text-red-300", is_error),
        Effect::class(Target::id(STATUS_ID), "text-green-300", !is_error && has_text),
    ]
}

fn submit_enabled(enabled: bool) -> Vec<Effect> {
    let button = Target::id(SUBMIT_ID);
    vec![
        Effect::SetDisabled { target: button.clone(), disabled: !enabled },
        Effect::class(button.clone(), "opacity-60", !enabled),
        Effect::class(button, "cursor-not-allowed", !enabled),
    ]
}

fn interpret(outcome: Result<HttpResponse, FetchError>) -> Result<(), SubmitError> {
    outcome
        .map_err(|err| SubmitError::Network(err.to_string()))
        .and_then(|response| interpret_response(&response))
}

impl LeadForm {
    /// `None` when the page has no `#leadForm`.
    pub fn bind(dom: &dyn Dom, config: LeadFormConfig, lang: Lang) -> Option<Self> {
        dom.exists(&Target::id(FORM_ID)).then_some(Self {
            config,
            lang,
            phase: FormPhase::Idle,
        })
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// An in-place language switch rewrites `<html lang>`; follow it.
    fn sync_lang(&mut self, dom: &dyn Dom) {
        if let Some(lang) = dom.attr(&Target::Root, "lang").and_then(|code| Lang::parse(&code)) {
            self.lang = lang;
        }
    }

    /// Validate `fields`, fill the hidden inputs and build the request.
    pub fn prepare(&mut self, dom: &dyn Dom, fields: LeadFields, location: &Location) -> Prepared {
        if self.phase == FormPhase::Submitting {
            return Prepared::Blocked(Vec::new());
        }
        self.sync_lang(dom);
        if let Err(err) = validate(&fields) {
            tracing::debug!(%err, "lead form blocked client-side");
            return Prepared::Blocked(status(err.message(self.lang), true));
        }
        let headers = match auth_headers(&self.config.auth, dom) {
            Ok(headers) => headers,
            Err(err) => {
                tracing::warn!(%err, "lead form misconfigured");
                return Prepared::Blocked(status(err.message(self.lang), true));
            }
        };

        let page_url = location.href().to_string();
        let lang = self.lang.code().to_string();
        let gdpr = gdpr_text(&self.config, self.lang);

        let mut text_fields = vec![
            ("name".to_string(), fields.name.trim().to_string()),
            ("email".to_string(), fields.email.trim().to_string()),
            ("message".to_string(), fields.message.trim().to_string()),
            ("gdpr".to_string(), "on".to_string()),
        ];
        if let Some(topic) = fields.topic.filter(|t| !t.trim().is_empty()) {
            text_fields.push(("topic".to_string(), topic));
        }
        text_fields.extend([
            ("page_url".to_string(), page_url.clone()),
            ("lang".to_string(), lang.clone()),
            ("gdpr_text".to_string(), gdpr.clone()),
        ]);

        let mut effects = vec![
            Effect::value(named("page_url"), page_url),
            Effect::value(named("lang"), lang),
            Effect::value(named("gdpr_text"), gdpr),
        ];
        effects.extend(submit_enabled(false));
        effects.extend(status(tr!(self.lang, "form-sending"), false));

        self.phase = FormPhase::Submitting;
        Prepared::Send {
            request: LeadRequest {
                endpoint: self.config.endpoint.clone(),
                headers,
                fields: text_fields,
                files: fields.files,
            },
            effects,
        }
    }

    /// Status, reset and re-enable after the single attempt completes.
    pub fn finish(&mut self, outcome: Result<HttpResponse, FetchError>) -> Vec<Effect> {
        self.conclude(&interpret(outcome))
    }

    fn conclude(&mut self, result: &Result<(), SubmitError>) -> Vec<Effect> {
        self.phase = FormPhase::Idle;
        let mut effects = match result {
            Ok(()) => {
                tracing::debug!("lead submitted");
                let mut effects = status(tr!(self.lang, "form-success"), false);
                effects.extend([
                    Effect::ResetForm { target: Target::id(FORM_ID) },
                    Effect::value(named("lang"), self.lang.code()),
                    Effect::value(named("page_url"), ""),
                    Effect::value(named("gdpr_text"), ""),
                ]);
                effects
            }
            Err(err) => {
                tracing::warn!(%err, "lead submission failed");
                status(err.message(self.lang), true)
            }
        };
        effects.extend(submit_enabled(true));
        effects
    }

    /// `prepare`, send, `finish`, applying effects as it goes.
    pub async fn submit<T: LeadTransport>(
        &mut self,
        dom: &mut dyn Dom,
        transport: &T,
        fields: LeadFields,
        location: &Location,
    ) -> Result<(), SubmitError> {
        let request = match self.prepare(dom, fields, location) {
            Prepared::Blocked(effects) => {
                dom.apply_all(effects);
                return Ok(());
            }
            Prepared::Send { request, effects } => {
                dom.apply_all(effects);
                request
            }
        };
        let result = interpret(transport.post(&request).await);
        dom.apply_all(self.conclude(&result));
        result
    }
}
