//! Browser entry points for the ForgeMotion Systems site.
//!
//! Pages call `init(options)` once after the DOM is ready. Pages with a lead
//! form also call `initLeadForm(config)`; pages that skip the shared layout
//! can still show the consent banner with `initCookieBanner(config)`.

mod dom;
mod events;
mod http;
mod logging;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::Level;
use ui::config::{ConsentConfig, LeadFormConfig, SiteOptions};
use ui::consent::{BannerEvent, ConsentStore, CookieBanner};
use ui::core::dom::{Dom, Selector, Target};
use ui::core::lang::{self, Lang};
use ui::core::location::Location;
use ui::core::platform::spawn_future;
use ui::layout::{ACCEPT_ID, BANNER_ID, REJECT_ID};
use ui::lead_form::{Attachment, LeadFields, LeadForm, LeadTransport, Prepared, FORM_ID};
use ui::videos;
use ui::{AppContext, SiteLayout};
use wasm_bindgen::prelude::*;
use web_sys::{File, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::WebDom;
use crate::events::{Page, SharedPage};
use crate::http::{FetchClient, FormTransport};
use crate::storage::{DocumentCookies, LocalStore};

/// Late-injected banner markup gets this long to appear before we inject ours.
const BANNER_GRACE_MS: u64 = 250;

fn js_err(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// `undefined`/`null` mean defaults; strings are JSON; objects are
/// serialized through `JSON.stringify` first.
fn options_from_js<T: Default>(
    value: &JsValue,
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    let json = match value.as_string() {
        Some(json) => json,
        None => js_sys::JSON::stringify(value)?.as_string().unwrap_or_default(),
    };
    parse(&json).map_err(js_err)
}

fn current_location() -> Result<Location, JsValue> {
    let href = web_sys::window().ok_or_else(|| js_err("no window"))?.location().href()?;
    Location::parse(&href).map_err(js_err)
}

fn current_dom() -> Result<WebDom, JsValue> {
    WebDom::current().ok_or_else(|| js_err("no document"))
}

/// Shared layout, localization, navigation, modals, video demos and the
/// cookie banner.
#[wasm_bindgen]
pub fn init(options: JsValue) -> Result<(), JsValue> {
    logging::init(Level::INFO);
    let options = options_from_js(&options, SiteOptions::from_json)?;
    let consent = options.consent.clone();
    let ctx = AppContext::new(current_location()?, Rc::new(LocalStore), options);

    let mut dom = current_dom()?;
    let site = SiteLayout::init(&mut dom, ctx);
    let lang = site.lang();
    let manifest = site.manifest_config().cloned();
    let location = site.location().clone();

    let page: SharedPage = Rc::new(RefCell::new(Page { dom, site }));
    events::bind(&page);

    if let Some(config) = manifest {
        let page = page.clone();
        spawn_future(async move {
            let catalog = videos::load_catalog(&FetchClient, &config, &location).await;
            match page.try_borrow_mut() {
                Ok(mut page) => {
                    let Page { dom, site } = &mut *page;
                    site.apply_catalog(dom, catalog);
                }
                Err(_) => tracing::warn!("page busy; video catalog dropped"),
            }
        });
    }

    spawn_future(start_cookie_banner(consent, lang));
    Ok(())
}

/// Consent banner alone, for pages that do not call `init`.
#[wasm_bindgen(js_name = initCookieBanner)]
pub fn init_cookie_banner(config: JsValue) -> Result<(), JsValue> {
    logging::init(Level::INFO);
    let config = options_from_js(&config, ConsentConfig::from_json)?;
    let lang = lang::detect(current_location()?.path(), &LocalStore);
    spawn_future(start_cookie_banner(config, lang));
    Ok(())
}

async fn start_cookie_banner(config: ConsentConfig, lang: Lang) {
    let Ok(mut dom) = current_dom() else { return };
    if !dom.exists(&Target::id(BANNER_ID)) {
        ui::core::timing::sleep_ms(BANNER_GRACE_MS).await;
    }

    let (local, cookies) = (LocalStore, DocumentCookies);
    let store = ConsentStore::new(&local, &cookies, &config);
    let Some((banner, effects)) = CookieBanner::init(&dom, &store, config.clone(), lang) else {
        tracing::debug!("no cookie banner on this page");
        return;
    };
    dom.apply_all(effects);

    let banner = Rc::new(RefCell::new(banner));
    let config = Rc::new(config);
    for (id, event) in [(ACCEPT_ID, BannerEvent::Accept), (REJECT_ID, BannerEvent::Reject)] {
        let Some(button) = dom.document().get_element_by_id(id) else { continue };
        let (banner, config) = (banner.clone(), config.clone());
        events::listen(&button, "click", move |_: web_sys::Event| {
            let (local, cookies) = (LocalStore, DocumentCookies);
            let store = ConsentStore::new(&local, &cookies, &config);
            let Ok(mut banner) = banner.try_borrow_mut() else { return };
            let effects = banner.choose(event, &store);
            if let Ok(mut dom) = current_dom() {
                dom.apply_all(effects);
            }
        });
    }
}

fn control_value(form: &HtmlFormElement, name: &str) -> String {
    let selector = Selector::AttrValue("name", name.to_string()).to_css();
    let Some(element) = form.query_selector(&selector).ok().flatten() else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

fn checkbox(form: &HtmlFormElement, name: &str) -> bool {
    let selector = Selector::AttrValue("name", name.to_string()).to_css();
    form.query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .is_some_and(|input| input.checked())
}

fn picked_files(form: &HtmlFormElement) -> Vec<File> {
    let Some(input) = form
        .query_selector("input[type=\"file\"]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let Some(list) = input.files() else { return Vec::new() };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

fn read_fields(form: &HtmlFormElement, files: &[File]) -> LeadFields {
    let topic = control_value(form, "topic");
    LeadFields {
        name: control_value(form, "name"),
        email: control_value(form, "email"),
        message: control_value(form, "message"),
        consent: checkbox(form, "gdpr"),
        topic: (!topic.trim().is_empty()).then_some(topic),
        files: files.iter().map(|f| Attachment::new(f.name(), f.size() as u64)).collect(),
    }
}

/// Bind `#leadForm`, if the page has one.
#[wasm_bindgen(js_name = initLeadForm)]
pub fn init_lead_form(config: JsValue) -> Result<(), JsValue> {
    logging::init(Level::INFO);
    let config = options_from_js(&config, LeadFormConfig::from_json)?;
    let dom = current_dom()?;
    let lang = lang::detect(current_location()?.path(), &LocalStore);

    let Some(machine) = LeadForm::bind(&dom, config, lang) else {
        tracing::debug!("no lead form on this page");
        return Ok(());
    };
    let form: HtmlFormElement = dom
        .document()
        .get_element_by_id(FORM_ID)
        .ok_or_else(|| js_err("lead form vanished"))?
        .dyn_into()
        .map_err(|_| js_err("#leadForm is not a <form>"))?;

    let machine = Rc::new(RefCell::new(machine));
    let target = form.clone();
    events::listen(&target, "submit", move |event: web_sys::Event| {
        event.prevent_default();
        let Ok(location) = current_location() else { return };
        let Ok(mut dom) = current_dom() else { return };

        let files = picked_files(&form);
        let fields = read_fields(&form, &files);
        let prepared = match machine.try_borrow_mut() {
            Ok(mut machine) => machine.prepare(&dom, fields, &location),
            Err(_) => return,
        };
        let request = match prepared {
            Prepared::Blocked(effects) => {
                dom.apply_all(effects);
                return;
            }
            Prepared::Send { request, effects } => {
                dom.apply_all(effects);
                request
            }
        };

        let machine = machine.clone();
        spawn_future(async move {
            let outcome = FormTransport::new(files).post(&request).await;
            let effects = match machine.try_borrow_mut() {
                Ok(mut machine) => machine.finish(outcome),
                Err(_) => return,
            };
            dom.apply_all(effects);
        });
    });
    Ok(())
}
