use crate::error::{ApiError, Result};

/// Traduce el status HTTP. 404 se distingue para poder tratar
/// "sin historial" como ausencia y no como fallo.
pub(crate) fn check_status(status: u16, url: &str, body: String) -> Result<String> {
    match status {
        200..=299 => Ok(body),
        404 => Err(ApiError::NotFound(url.to_string())),
        _ => {
            let detail = body.trim();
            Err(ApiError::Network(if detail.is_empty() {
                format!("HTTP {status} en {url}")
            } else {
                format!("HTTP {status} en {url}. Body: {detail}")
            }))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) async fn fetch_text(
    method: &str,
    url: &str,
    body: Option<String>,
    token: Option<&str>,
) -> Result<String> {
    use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

    let client = reqwest::blocking::Client::new();
    let mut request = match method {
        "POST" => client.post(url),
        _ => client.get(url),
    }
    .header(ACCEPT, "application/json");

    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(body) = body {
        request = request.header(CONTENT_TYPE, "application/json").body(body);
    }

    let response = request
        .send()
        .map_err(|err| ApiError::Network(err.to_string()))?;
    let status = response.status().as_u16();
    let text = response
        .text()
        .map_err(|err| ApiError::Network(format!("no se pudo leer la respuesta: {err}")))?;

    check_status(status, url, text)
}

#[cfg(target_arch = "wasm32")]
pub(crate) async fn fetch_text(
    method: &str,
    url: &str,
    body: Option<String>,
    token: Option<&str>,
) -> Result<String> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    fn js_err(err: JsValue) -> ApiError {
        ApiError::Network(format!("{err:?}"))
    }

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
    let headers = request.headers();
    headers.set("Accept", "application/json").map_err(js_err)?;
    if body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(js_err)?;
    }
    if let Some(token) = token {
        headers
            .set("Authorization", &format!("Bearer {token}"))
            .map_err(js_err)?;
    }

    let window =
        web_sys::window().ok_or_else(|| ApiError::Network("no existe window en WASM".into()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| ApiError::Network("la respuesta fetch no es un Response".into()))?;

    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .unwrap_or_default();

    check_status(response.status(), url, text)
}
