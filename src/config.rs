use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
const DEFAULT_API_BASE: &str = "/api";
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080/api";

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "learn_client.yaml";

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base(base_url).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    /// Resuelve la base del API según la plataforma.
    pub fn resolve() -> Self {
        let base = resolve_base();
        log::info!("API base: {base}");
        Self { base_url: base }
    }

    /// Une la base con la ruta de un endpoint (`/lessons/get_lesson.php`).
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Preferencias que sí se guardan entre sesiones (nunca resultados de lecciones).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

fn normalize_base(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "/" {
        return Some(String::new());
    }
    Some(trimmed.trim_end_matches('/').to_string())
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Deserialize, Default)]
struct ClientFile {
    #[serde(default)]
    api_base: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
fn base_from_file(path: &std::path::Path) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_yaml::from_str::<ClientFile>(&text) {
        Ok(file) => file.api_base.as_deref().and_then(normalize_base),
        Err(err) => {
            log::warn!("No se pudo leer {}: {err}", path.display());
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_base() -> String {
    std::env::var("LEARN_API_BASE")
        .ok()
        .and_then(|v| normalize_base(&v))
        .or_else(|| base_from_file(std::path::Path::new(CONFIG_FILE)))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[cfg(target_arch = "wasm32")]
fn resolve_base() -> String {
    base_from_build_env()
        .or_else(base_from_querystring)
        .or_else(base_from_meta)
        .or_else(base_from_local_storage)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[cfg(target_arch = "wasm32")]
fn base_from_build_env() -> Option<String> {
    option_env!("LEARN_API_BASE").and_then(normalize_base)
}

#[cfg(target_arch = "wasm32")]
fn base_from_querystring() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(search.as_str());

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "api_base" {
            let decoded = js_sys::decode_uri_component(value).ok()?;
            return decoded.as_string().as_deref().and_then(normalize_base);
        }
    }
    None
}

#[cfg(target_arch = "wasm32")]
fn base_from_meta() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector("meta[name='learn-api-base']")
        .ok()??;
    meta.get_attribute("content")
        .as_deref()
        .and_then(normalize_base)
}

#[cfg(target_arch = "wasm32")]
fn base_from_local_storage() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item("learn_api_base")
        .ok()?
        .as_deref()
        .and_then(normalize_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let cfg = ApiConfig::new("https://aula.example.com/api///");
        assert_eq!(cfg.base_url, "https://aula.example.com/api");
        assert_eq!(
            cfg.url("/lessons/get_lesson.php?id=3"),
            "https://aula.example.com/api/lessons/get_lesson.php?id=3"
        );
    }

    #[test]
    fn empty_base_falls_back_to_default() {
        assert_eq!(ApiConfig::new("   "), ApiConfig::default());
    }

    #[test]
    fn root_base_yields_absolute_paths() {
        let cfg = ApiConfig::new("/");
        assert_eq!(cfg.url("exercises/submit_answer.php"), "/exercises/submit_answer.php");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn yaml_file_provides_base() {
        let dir = std::env::temp_dir().join(format!("learn_client_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("learn_client.yaml");
        std::fs::write(&path, "api_base: http://10.0.0.2:9000/api/\n").unwrap();

        assert_eq!(
            base_from_file(&path).as_deref(),
            Some("http://10.0.0.2:9000/api")
        );

        std::fs::write(&path, "api_base: [roto\n").unwrap();
        assert_eq!(base_from_file(&path), None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
