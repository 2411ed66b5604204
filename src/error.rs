//! Errores de la capa de red.
//!
//! En la página todas acaban en el mismo panel de error. La variante decide
//! la acción ofrecida (recargar solo si fue la red) y cuándo un 404
//! significa "sin historial".

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Fallo de transporte, HTTP no esperado o cuerpo que no es JSON.
    #[error("No se pudo contactar con el servidor: {0}")]
    Network(String),

    /// El servidor respondió `success: false`.
    #[error("{0}")]
    Server(String),

    /// Recurso inexistente (404 o payload vacío).
    #[error("No encontrado: {0}")]
    NotFound(String),

    /// JSON válido pero con una forma inesperada.
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() {
            ApiError::Network(format!("cuerpo no es JSON ({err})"))
        } else {
            ApiError::Decode(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_are_network_failures() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = ApiError::Server("Completa la lección anterior".into());
        assert_eq!(err.to_string(), "Completa la lección anterior");
        assert!(!err.is_not_found());
        assert!(ApiError::NotFound("lección 4".into()).is_not_found());
    }
}
