use super::*;

impl LearnApp {
    /// Recoge las respuestas que hayan llegado. Se llama una vez por frame.
    pub fn poll_requests(&mut self) {
        if let Some(result) = self.pending.login.as_ref().and_then(Pending::poll) {
            self.pending.login = None;
            self.apply_login(result);
        }

        if let Some(result) = self.pending.courses.as_ref().and_then(Pending::poll) {
            self.pending.courses = None;
            self.apply_courses(result);
        }

        if let Some((course_id, result)) = poll_tagged(&self.pending.lessons) {
            self.pending.lessons = None;
            self.apply_course_lessons(course_id, result);
        }

        if let Some((lesson_id, result)) = poll_tagged(&self.pending.bundle) {
            self.pending.bundle = None;
            self.apply_lesson_bundle(lesson_id, result);
        }

        let answer = self
            .pending
            .answer
            .as_ref()
            .and_then(|(lesson_id, exercise_id, p)| p.poll().map(|r| (*lesson_id, *exercise_id, r)));
        if let Some((lesson_id, exercise_id, result)) = answer {
            self.pending.answer = None;
            self.apply_answer(lesson_id, exercise_id, result);
        }

        if let Some((lesson_id, result)) = poll_tagged(&self.pending.completion) {
            self.pending.completion = None;
            if let Some(flow) = self.open_flow(lesson_id) {
                flow.apply_completion(result);
            }
        }

        if let Some((lesson_id, result)) = poll_tagged(&self.pending.reset) {
            self.pending.reset = None;
            let reload = match self.lesson.as_mut().filter(|f| f.lesson_id() == lesson_id) {
                Some(flow) => flow.apply_reset(result, &mut self.notifications),
                None => false,
            };
            if reload {
                self.start_lesson_load();
            }
        }
    }

    /// La lección abierta, solo si es la que se pidió.
    fn open_flow(&mut self, lesson_id: LessonId) -> Option<&mut LessonFlow> {
        let flow = self.lesson.as_mut().filter(|f| f.lesson_id() == lesson_id);
        if flow.is_none() {
            log::debug!("Respuesta para la lección {lesson_id} descartada: ya no está abierta");
        }
        flow
    }

    pub(crate) fn apply_lesson_bundle(
        &mut self,
        lesson_id: LessonId,
        result: crate::error::Result<LessonBundle>,
    ) {
        let redirect = match self.lesson.as_mut().filter(|f| f.lesson_id() == lesson_id) {
            Some(flow) => {
                flow.apply_bundle(result, &mut self.notifications);
                flow.take_redirect()
            }
            None => {
                log::debug!("Carga de la lección {lesson_id} descartada");
                false
            }
        };
        if redirect {
            self.volver_a_lecciones();
        }
    }

    pub(crate) fn apply_answer(
        &mut self,
        lesson_id: LessonId,
        exercise_id: ExerciseId,
        result: crate::error::Result<AnswerVerdict>,
    ) {
        match self.lesson.as_mut().filter(|f| f.lesson_id() == lesson_id) {
            Some(flow) => flow.apply_verdict(exercise_id, result, &mut self.notifications),
            None => {
                log::debug!("Veredicto del ejercicio {exercise_id} descartado");
                return;
            }
        }
        self.after_lesson_transition();
    }
}

fn poll_tagged<K: Copy, T>(slot: &Option<(K, Pending<T>)>) -> Option<(K, crate::error::Result<T>)> {
    let (key, pending) = slot.as_ref()?;
    pending.poll().map(|result| (*key, result))
}
