use super::*;
use crate::api::spawn;

impl LearnApp {
    pub fn open_courses(&mut self) {
        self.lesson = None;
        self.current_course = None;
        self.confirm_reset = false;
        self.state = AppState::Courses;
        self.message.clear();
        self.fetch_courses();
    }

    pub fn open_course(&mut self, course_id: CourseId) {
        self.lesson = None;
        self.current_course = Some(course_id);
        self.lessons.clear();
        self.state = AppState::Lessons;
        self.message.clear();
        self.fetch_course_lessons(course_id);
    }

    /// Monta la página de lección y lanza las tres peticiones del cargador.
    pub fn open_lesson(&mut self, lesson_id: LessonId) {
        if self.session.is_none() {
            self.state = AppState::Login;
            return;
        }
        log::info!("Abriendo lección {lesson_id}");
        self.lesson = Some(LessonFlow::new(lesson_id));
        self.confirm_reset = false;
        self.state = AppState::Lesson;
        self.message.clear();
        self.start_lesson_load();
    }

    pub(crate) fn start_lesson_load(&mut self) {
        let (Some(user_id), Some(lesson_id)) =
            (self.user_id(), self.lesson.as_ref().map(LessonFlow::lesson_id))
        else {
            return;
        };
        let api = self.api.clone();
        let pending = spawn(self.repaint.clone(), async move {
            api.load_lesson_bundle(lesson_id, user_id).await
        });
        self.pending.bundle = Some((lesson_id, pending));
        // Lo que estuviera en vuelo para la carga anterior ya no sirve.
        self.pending.answer = None;
        self.pending.completion = None;
    }

    /// Sale de la lección hacia la lista del curso (o al catálogo).
    pub fn volver_a_lecciones(&mut self) {
        match self.current_course {
            Some(course_id) => self.open_course(course_id),
            None => self.open_courses(),
        }
    }

    pub fn avanzar_a_siguiente_leccion(&mut self) {
        let next = self.lesson.as_ref().and_then(LessonFlow::next_lesson_id);
        match next {
            Some(next_id) => self.open_lesson(next_id),
            None => {
                self.volver_a_lecciones();
                self.message = "¡Has terminado todas las lecciones de este curso!".to_owned();
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(session) = &self.session {
            log::info!("Cierre de sesión del usuario {}", session.user_id);
        }
        self.session = None;
        self.api.set_token(None);
        self.courses.clear();
        self.lessons.clear();
        self.current_course = None;
        self.lesson = None;
        self.catalog_error = None;
        self.confirm_reset = false;
        self.pending = PendingRequests::default();
        self.message.clear();
        self.state = AppState::Login;
    }
}
