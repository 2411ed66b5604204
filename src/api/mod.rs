//! Cliente del API REST (`/api`). Todo el cálculo (corrección, progreso,
//! desbloqueos) vive en el servidor; aquí solo se piden y decodifican JSON.

mod pending;
mod transport;

pub use pending::{Pending, spawn};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::model::{
    AnswerVerdict, Course, CourseId, ExerciseId, Lesson, LessonCompletion, LessonId,
    LessonSummary, PreviousLessonStatus, UserId,
};
use crate::session::AuthSession;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use transport::fetch_text;

pub const GET_LESSON: &str = "/lessons/get_lesson.php";
pub const CHECK_PREVIOUS_LESSON: &str = "/lessons/check_previous_lesson.php";
pub const GET_COMPLETION: &str = "/lessons/get_completion.php";
pub const SUBMIT_ANSWER: &str = "/exercises/submit_answer.php";
pub const RESET_PROGRESS: &str = "/lessons/reset_progress.php";
pub const LOGIN: &str = "/auth/login.php";
pub const GET_COURSES: &str = "/courses/get_courses.php";
pub const GET_COURSE_LESSONS: &str = "/courses/get_lessons.php";

/// Todo lo que necesita la página de lección para pasar de `Loading` a `Ready`.
#[derive(Debug, Clone)]
pub struct LessonBundle {
    pub lesson: Lesson,
    pub previous_completed: bool,
    pub completion: Option<LessonCompletion>,
}

#[derive(Serialize)]
struct SubmitAnswerBody<'a> {
    exercise_id: ExerciseId,
    user_id: UserId,
    answer: &'a str,
}

#[derive(Serialize)]
struct ResetProgressBody {
    lesson_id: LessonId,
    user_id: UserId,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Clone, Debug, Default)]
pub struct ApiClient {
    config: ApiConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            token: None,
        }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = self.config.url(path);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.url(path, query);
        log::debug!("GET {url}");
        let body = fetch_text("GET", &url, None, self.token.as_deref())
            .await
            .inspect_err(|err| log::warn!("GET {url} falló: {err}"))?;
        parse_envelope(&body)
    }

    async fn post<B: Serialize>(&self, path: &str, payload: &B) -> Result<Value> {
        let url = self.url(path, &[]);
        let json = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        log::debug!("POST {url}");
        let body = fetch_text("POST", &url, Some(json), self.token.as_deref())
            .await
            .inspect_err(|err| log::warn!("POST {url} falló: {err}"))?;
        parse_envelope(&body)
    }

    pub async fn get_lesson(&self, lesson_id: LessonId) -> Result<Lesson> {
        let root = self.get(GET_LESSON, &[("id", lesson_id.to_string())]).await?;
        let mut lesson_value = take_field(root.clone(), "lesson")
            .map_err(|_| ApiError::NotFound(format!("lección {lesson_id}")))?;

        // Algunas versiones del backend devuelven los ejercicios fuera del objeto lección.
        if lesson_value.get("exercises").is_none() {
            if let (Some(obj), Some(exercises)) = (lesson_value.as_object_mut(), root.get("exercises")) {
                obj.insert("exercises".into(), exercises.clone());
            }
        }
        Ok(serde_json::from_value(lesson_value)?)
    }

    pub async fn check_previous_lesson(
        &self,
        lesson_id: LessonId,
        user_id: UserId,
    ) -> Result<PreviousLessonStatus> {
        let root = self
            .get(
                CHECK_PREVIOUS_LESSON,
                &[("lesson_id", lesson_id.to_string()), ("user_id", user_id.to_string())],
            )
            .await?;
        decode_payload(root)
    }

    pub async fn get_completion(
        &self,
        lesson_id: LessonId,
        user_id: UserId,
    ) -> Result<LessonCompletion> {
        let root = self
            .get(
                GET_COMPLETION,
                &[("lesson_id", lesson_id.to_string()), ("user_id", user_id.to_string())],
            )
            .await?;
        decode_field(root, "completion")
    }

    /// Las tres peticiones del cargador. Un historial inexistente no es error.
    pub async fn load_lesson_bundle(
        &self,
        lesson_id: LessonId,
        user_id: UserId,
    ) -> Result<LessonBundle> {
        let lesson = self.get_lesson(lesson_id).await?;
        let previous = self.check_previous_lesson(lesson_id, user_id).await?;
        let completion = match self.get_completion(lesson_id, user_id).await {
            Ok(c) => Some(c),
            Err(ApiError::NotFound(_)) => None,
            Err(err) => return Err(err),
        };
        log::info!(
            "Lección {lesson_id} cargada: {} ejercicios, {} intentos previos",
            lesson.exercises.len(),
            completion.as_ref().map(|c| c.attempts.len()).unwrap_or(0)
        );
        Ok(LessonBundle {
            lesson,
            previous_completed: previous.completed,
            completion,
        })
    }

    pub async fn submit_answer(
        &self,
        exercise_id: ExerciseId,
        user_id: UserId,
        answer: &str,
    ) -> Result<AnswerVerdict> {
        let root = self
            .post(
                SUBMIT_ANSWER,
                &SubmitAnswerBody {
                    exercise_id,
                    user_id,
                    answer,
                },
            )
            .await?;
        decode_payload(root)
    }

    pub async fn reset_progress(&self, lesson_id: LessonId, user_id: UserId) -> Result<()> {
        self.post(RESET_PROGRESS, &ResetProgressBody { lesson_id, user_id })
            .await?;
        log::info!("Progreso de la lección {lesson_id} reiniciado");
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let root = self.post(LOGIN, &LoginBody { email, password }).await?;
        let token = root.get("token").and_then(Value::as_str).map(str::to_string);
        let mut session: AuthSession = decode_field(root, "user")?;
        if session.token.is_none() {
            session.token = token;
        }
        Ok(session)
    }

    pub async fn get_courses(&self, user_id: UserId) -> Result<Vec<Course>> {
        let root = self
            .get(GET_COURSES, &[("user_id", user_id.to_string())])
            .await?;
        decode_list(root, "courses")
    }

    pub async fn get_course_lessons(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<Vec<LessonSummary>> {
        let root = self
            .get(
                GET_COURSE_LESSONS,
                &[("course_id", course_id.to_string()), ("user_id", user_id.to_string())],
            )
            .await?;
        let mut lessons: Vec<LessonSummary> = decode_list(root, "lessons")?;
        lessons.sort_by_key(|l| (l.order, l.id));
        Ok(lessons)
    }
}

/// Valida el sobre `{ success, message, ... }` común a todos los endpoints.
pub(crate) fn parse_envelope(body: &str) -> Result<Value> {
    let root: Value = serde_json::from_str(body)?;
    if root.get("success").and_then(Value::as_bool) == Some(false) {
        let message = root
            .get("message")
            .or_else(|| root.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("El servidor rechazó la petición");
        return Err(ApiError::Server(message.to_string()));
    }
    Ok(root)
}

fn take_field(mut root: Value, key: &str) -> Result<Value> {
    let value = root
        .get_mut(key)
        .map(Value::take)
        .or_else(|| root.get_mut("data").map(Value::take))
        .unwrap_or(Value::Null);
    if value.is_null() {
        Err(ApiError::NotFound(key.to_string()))
    } else {
        Ok(value)
    }
}

pub(crate) fn decode_field<T: DeserializeOwned>(root: Value, key: &str) -> Result<T> {
    Ok(serde_json::from_value(take_field(root, key)?)?)
}

/// Respuestas planas: los campos van en la raíz o dentro de `data`. El
/// `message` de la raíz se conserva si `data` no trae uno.
pub(crate) fn decode_payload<T: DeserializeOwned>(mut root: Value) -> Result<T> {
    let message = root.get("message").cloned();
    let payload = match root.get_mut("data").map(Value::take) {
        Some(Value::Object(mut data)) => {
            if let Some(message) = message {
                data.entry("message").or_insert(message);
            }
            Value::Object(data)
        }
        _ => root,
    };
    Ok(serde_json::from_value(payload)?)
}

/// Como `decode_field`, pero una lista ausente es una lista vacía.
pub(crate) fn decode_list<T: DeserializeOwned>(root: Value, key: &str) -> Result<Vec<T>> {
    match take_field(root, key) {
        Ok(value) => Ok(serde_json::from_value(value)?),
        Err(ApiError::NotFound(_)) => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}
