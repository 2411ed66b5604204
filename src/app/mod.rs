use crate::api::{ApiClient, LessonBundle, Pending};
use crate::config::{ApiConfig, Settings};
use crate::lesson::LessonFlow;
use crate::model::{
    AnswerVerdict, AppState, Course, CourseId, ExerciseId, LessonCompletion, LessonId,
    LessonSummary, UserId,
};
use crate::session::{AuthSession, NoticeLevel, NotificationCenter, Notifier};
use eframe::egui;
use egui_commonmark::CommonMarkCache;
use serde::{Deserialize, Serialize};

// Submódulos
pub mod actions;
pub mod catalog;
pub mod navigation;
pub mod polling;
pub mod view_models;

// Re-export de view models
pub use crate::view_models::{CourseInfo, ExerciseRow, LessonInfo};

#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Peticiones en vuelo. Las de lección llevan el id para descartar
/// respuestas de una página que ya no está abierta.
#[derive(Default)]
pub(crate) struct PendingRequests {
    pub login: Option<Pending<AuthSession>>,
    pub courses: Option<Pending<Vec<Course>>>,
    pub lessons: Option<(CourseId, Pending<Vec<LessonSummary>>)>,
    pub bundle: Option<(LessonId, Pending<LessonBundle>)>,
    pub answer: Option<(LessonId, ExerciseId, Pending<AnswerVerdict>)>,
    pub completion: Option<(LessonId, Pending<LessonCompletion>)>,
    pub reset: Option<(LessonId, Pending<()>)>,
}

impl PendingRequests {
    pub fn any(&self) -> bool {
        self.login.is_some()
            || self.courses.is_some()
            || self.lessons.is_some()
            || self.bundle.is_some()
            || self.answer.is_some()
            || self.completion.is_some()
            || self.reset.is_some()
    }
}

/// Solo `settings` y `session` se persisten; el progreso vive en el servidor.
#[derive(Serialize, Deserialize)]
pub struct LearnApp {
    pub settings: Settings,
    pub session: Option<AuthSession>,
    #[serde(skip)]
    pub state: AppState,
    #[serde(skip)]
    pub api: ApiClient,
    #[serde(skip)]
    pub notifications: NotificationCenter,
    #[serde(skip)]
    pub courses: Vec<Course>,
    #[serde(skip)]
    pub lessons: Vec<LessonSummary>,
    #[serde(skip)]
    pub current_course: Option<CourseId>,
    #[serde(skip)]
    pub lesson: Option<LessonFlow>,
    #[serde(skip)]
    pub login_form: LoginForm,
    #[serde(skip)]
    pub catalog_error: Option<String>,
    #[serde(skip)]
    pub message: String,
    #[serde(skip)]
    pub confirm_reset: bool,
    #[serde(skip)]
    pub cm_cache: CommonMarkCache,
    #[serde(skip)]
    pub(crate) pending: PendingRequests,
    #[serde(skip)]
    pub(crate) repaint: Option<egui::Context>,
}

impl LearnApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: LearnApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        app.api = ApiClient::new(ApiConfig::resolve());
        app.repaint = Some(cc.egui_ctx.clone());
        app.restore_session();
        app
    }

    pub fn with_api(api: ApiClient) -> Self {
        Self {
            settings: Settings::default(),
            session: None,
            state: AppState::Login,
            api,
            notifications: NotificationCenter::default(),
            courses: Vec::new(),
            lessons: Vec::new(),
            current_course: None,
            lesson: None,
            login_form: LoginForm::default(),
            catalog_error: None,
            message: String::new(),
            confirm_reset: false,
            cm_cache: CommonMarkCache::default(),
            pending: PendingRequests::default(),
            repaint: None,
        }
    }

    fn restore_session(&mut self) {
        match &self.session {
            Some(session) => {
                log::info!("Sesión restaurada para el usuario {}", session.user_id);
                self.api.set_token(session.token.clone());
                self.open_courses();
            }
            None => self.state = AppState::Login,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.session.as_ref().map(|s| s.user_id)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.any()
    }
}

impl Default for LearnApp {
    fn default() -> Self {
        Self::with_api(ApiClient::default())
    }
}
