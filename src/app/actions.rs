use super::*;
use crate::api::spawn;

impl LearnApp {
    pub fn login(&mut self) {
        let email = self.login_form.email.trim().to_string();
        let password = self.login_form.password.clone();
        if email.is_empty() || password.is_empty() {
            self.message = "⚠ Escribe tu correo y tu contraseña.".into();
            return;
        }
        if self.pending.login.is_some() {
            return;
        }
        self.message = "⏳ Entrando…".into();
        let api = self.api.clone();
        self.pending.login = Some(spawn(self.repaint.clone(), async move {
            api.login(&email, &password).await
        }));
    }

    pub(crate) fn apply_login(&mut self, result: crate::error::Result<AuthSession>) {
        match result {
            Ok(session) => {
                log::info!("Sesión iniciada: usuario {}", session.user_id);
                self.api.set_token(session.token.clone());
                self.notifications.notify(
                    NoticeLevel::Success,
                    format!("👋 ¡Hola, {}!", session.display_name()),
                );
                self.session = Some(session);
                self.login_form.password.clear();
                self.open_courses();
            }
            Err(err) => self.message = format!("❌ {err}"),
        }
    }

    /// Envía la respuesta del ejercicio actual. Solo un envío por ejercicio.
    pub fn procesar_respuesta(&mut self) {
        let Some(user_id) = self.user_id() else {
            return;
        };
        let Some(flow) = self.lesson.as_mut() else {
            return;
        };
        let Some(submission) = flow.begin_submit() else {
            if !flow.is_awaiting_verdict() {
                flow.message = "⚠ Debes responder antes de enviar.".into();
            }
            return;
        };

        let lesson_id = flow.lesson_id();
        let exercise_id = submission.exercise_id;
        let api = self.api.clone();
        let pending = spawn(self.repaint.clone(), async move {
            api.submit_answer(submission.exercise_id, user_id, &submission.answer)
                .await
        });
        self.pending.answer = Some((lesson_id, exercise_id, pending));
    }

    pub fn next_exercise(&mut self) {
        if let Some(flow) = self.lesson.as_mut() {
            flow.next_exercise(&mut self.notifications);
        }
        self.after_lesson_transition();
    }

    pub fn jump_to_exercise(&mut self, idx: usize) {
        if let Some(flow) = self.lesson.as_mut() {
            flow.jump_to(idx);
        }
    }

    pub fn enter_review(&mut self) {
        if let Some(flow) = self.lesson.as_mut() {
            flow.enter_review();
        }
    }

    pub fn leave_review(&mut self) {
        if let Some(flow) = self.lesson.as_mut() {
            flow.leave_review();
        }
    }

    pub fn retry_lesson(&mut self) {
        if let Some(flow) = self.lesson.as_mut() {
            flow.begin_load();
            self.start_lesson_load();
        }
    }

    pub fn reset_lesson_progress(&mut self) {
        self.confirm_reset = false;
        let (Some(user_id), Some(lesson_id)) =
            (self.user_id(), self.lesson.as_ref().map(LessonFlow::lesson_id))
        else {
            return;
        };
        if self.pending.reset.is_some() {
            return;
        }
        let api = self.api.clone();
        let pending = spawn(self.repaint.clone(), async move {
            api.reset_progress(lesson_id, user_id).await
        });
        self.pending.reset = Some((lesson_id, pending));
    }

    /// Tras completar en esta sesión se pide el resumen actualizado.
    pub(crate) fn after_lesson_transition(&mut self) {
        let (Some(user_id), Some(flow)) = (self.user_id(), self.lesson.as_mut()) else {
            return;
        };
        if !flow.take_completion_refresh() {
            return;
        }
        let lesson_id = flow.lesson_id();
        let api = self.api.clone();
        let pending = spawn(self.repaint.clone(), async move {
            api.get_completion(lesson_id, user_id).await
        });
        self.pending.completion = Some((lesson_id, pending));
    }
}
