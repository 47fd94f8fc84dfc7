//! `window.fetch` behind [`HttpClient`] and [`LeadTransport`].

use ui::core::fetch::{FetchError, HttpClient, HttpResponse};
use ui::lead_form::{LeadRequest, LeadTransport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Headers, RequestCache, RequestInit, Response};

fn js_error(err: JsValue) -> FetchError {
    let text = err
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| "unknown JavaScript error".to_string());
    FetchError::Network(text)
}

/// Aborts the request when the owning future is dropped, which is how
/// `with_timeout` cancels a slow manifest fetch.
struct AbortOnDrop(AbortController);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn send(url: &str, init: &RequestInit) -> Result<HttpResponse, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;
    let value = JsFuture::from(window.fetch_with_str_and_init(url, init))
        .await
        .map_err(js_error)?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| FetchError::Malformed("fetch did not resolve to a Response".into()))?;
    let content_type = response.headers().get("content-type").ok().flatten();
    let body = match response.text() {
        Ok(promise) => JsFuture::from(promise).await.map_err(js_error)?.as_string().unwrap_or_default(),
        Err(err) => return Err(js_error(err)),
    };
    Ok(HttpResponse::new(response.status(), content_type.as_deref(), body))
}

/// GET with `cache: no-store`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchClient;

impl HttpClient for FetchClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let controller = AbortController::new().map_err(js_error)?;
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_cache(RequestCache::NoStore);
        init.set_signal(Some(&controller.signal()));
        let _guard = AbortOnDrop(controller);
        send(url, &init).await
    }
}

/// Multipart POST; text parts come from the request, file parts from the
/// `File` objects picked in the form.
pub struct FormTransport {
    files: Vec<File>,
}

impl FormTransport {
    pub fn new(files: Vec<File>) -> Self {
        Self { files }
    }
}

impl LeadTransport for FormTransport {
    async fn post(&self, request: &LeadRequest) -> Result<HttpResponse, FetchError> {
        let form = FormData::new().map_err(js_error)?;
        for (name, value) in &request.fields {
            form.append_with_str(name, value).map_err(js_error)?;
        }
        for file in &self.files {
            form.append_with_blob_and_filename("files", file, &file.name())
                .map_err(js_error)?;
        }

        let headers = Headers::new().map_err(js_error)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(js_error)?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&form);
        send(&request.endpoint, &init).await
    }
}
