use super::input::ExerciseInput;
use super::sequencer::{Advance, ExerciseSequencer};
use crate::api::LessonBundle;
use crate::error::{ApiError, Result};
use crate::model::{AnswerVerdict, Exercise, ExerciseId, Lesson, LessonCompletion, LessonId};
use crate::session::{NoticeLevel, Notifier};

const CELEBRATION_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, PartialEq)]
pub enum LessonPhase {
    Loading,
    Error(String),
    Ready,
    Complete,
    Reviewing,
}

/// Respuesta lista para enviar al servidor.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub exercise_id: ExerciseId,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSummary {
    pub percent: u32,
    pub correct: u32,
    pub total: u32,
    pub points: u32,
    pub celebrate: bool,
}

/// Máquina de estados de la página de lección.
///
/// Todo se recalcula desde el servidor en cada carga; aquí no se guarda nada.
#[derive(Debug)]
pub struct LessonFlow {
    lesson_id: LessonId,
    phase: LessonPhase,
    lesson: Option<Lesson>,
    completion: Option<LessonCompletion>,
    sequencer: ExerciseSequencer,
    input: Option<ExerciseInput>,
    awaiting: Option<ExerciseId>,
    last_verdict: Option<bool>,
    refresh_completion: bool,
    completion_stale: bool,
    redirect_to_courses: bool,
    retryable: bool,
    pub message: String,
}

impl LessonFlow {
    pub fn new(lesson_id: LessonId) -> Self {
        Self {
            lesson_id,
            phase: LessonPhase::Loading,
            lesson: None,
            completion: None,
            sequencer: ExerciseSequencer::default(),
            input: None,
            awaiting: None,
            last_verdict: None,
            refresh_completion: false,
            completion_stale: false,
            redirect_to_courses: false,
            retryable: false,
            message: String::new(),
        }
    }

    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    pub fn phase(&self) -> &LessonPhase {
        &self.phase
    }

    pub fn lesson(&self) -> Option<&Lesson> {
        self.lesson.as_ref()
    }

    pub fn sequencer(&self) -> &ExerciseSequencer {
        &self.sequencer
    }

    pub fn input_mut(&mut self) -> Option<&mut ExerciseInput> {
        self.input.as_mut()
    }

    pub fn input(&self) -> Option<&ExerciseInput> {
        self.input.as_ref()
    }

    pub fn is_awaiting_verdict(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn last_verdict(&self) -> Option<bool> {
        self.last_verdict
    }

    pub fn progress_percent(&self) -> u32 {
        self.sequencer.progress_percent()
    }

    /// En `Error`: `true` si el fallo fue de conexión y tiene sentido
    /// recargar; si no, la única salida es volver a la lista.
    pub fn can_retry(&self) -> bool {
        self.retryable
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        let lesson = self.lesson.as_ref()?;
        lesson.exercises.get(self.sequencer.current_index())
    }

    /// Vuelve a `Loading` (reintento o tras reiniciar el progreso).
    pub fn begin_load(&mut self) {
        *self = Self::new(self.lesson_id);
    }

    pub fn apply_bundle(&mut self, result: Result<LessonBundle>, notifier: &mut dyn Notifier) {
        if self.phase != LessonPhase::Loading {
            log::debug!("Carga de la lección {} ignorada: ya no está cargando", self.lesson_id);
            return;
        }
        let bundle = match result {
            Ok(bundle) => bundle,
            Err(err) => {
                log::warn!("No se pudo cargar la lección {}: {err}", self.lesson_id);
                self.fail(err);
                return;
            }
        };

        if !bundle.previous_completed {
            let msg = "Debes completar la lección anterior antes de empezar esta.".to_string();
            notifier.notify(NoticeLevel::Error, msg.clone());
            self.phase = LessonPhase::Error(msg);
            self.redirect_to_courses = true;
            return;
        }

        let attempts = bundle
            .completion
            .as_ref()
            .map(|c| c.attempts.as_slice())
            .unwrap_or(&[]);
        self.sequencer = ExerciseSequencer::from_history(bundle.lesson.exercise_ids(), attempts);
        self.completion = bundle.completion;
        self.lesson = Some(bundle.lesson);

        if self.sequencer.is_empty() {
            log::warn!("La lección {} no tiene ejercicios", self.lesson_id);
            notifier.notify(NoticeLevel::Warning, "Esta lección todavía no tiene ejercicios.".into());
        }

        if self.sequencer.is_complete() {
            self.phase = LessonPhase::Complete;
        } else {
            self.phase = LessonPhase::Ready;
            self.remount_input();
        }
    }

    fn fail(&mut self, err: ApiError) {
        self.retryable = matches!(err, ApiError::Network(_));
        self.phase = LessonPhase::Error(err.to_string());
    }

    fn remount_input(&mut self) {
        self.input = self.current_exercise().map(ExerciseInput::for_exercise);
        self.last_verdict = None;
    }

    /// Bloquea la entrada y devuelve lo que hay que enviar.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.phase != LessonPhase::Ready || self.awaiting.is_some() {
            return None;
        }
        let exercise = self.current_exercise()?;
        let exercise_id = exercise.id;
        let answer = self.input.as_ref()?.submission(exercise)?;

        if let Some(input) = self.input.as_mut() {
            input.lock();
        }
        self.awaiting = Some(exercise_id);
        self.message = "⏳ Comprobando respuesta…".into();
        Some(Submission {
            exercise_id,
            answer,
        })
    }

    pub fn apply_verdict(
        &mut self,
        exercise_id: ExerciseId,
        result: Result<AnswerVerdict>,
        notifier: &mut dyn Notifier,
    ) {
        if self.awaiting == Some(exercise_id) {
            self.awaiting = None;
        }
        let verdict = match result {
            Ok(v) => v,
            Err(err) => {
                log::warn!("Envío del ejercicio {exercise_id} falló: {err}");
                self.fail(err);
                return;
            }
        };

        self.sequencer.record(exercise_id, verdict.is_correct);
        if self.sequencer.current_id() == Some(exercise_id) {
            self.last_verdict = Some(verdict.is_correct);
            self.message = verdict.message.clone().unwrap_or_else(|| {
                if verdict.is_correct {
                    "✅ ¡Correcto!".into()
                } else {
                    "❌ Incorrecto. Volverás a verlo más adelante.".into()
                }
            });
        }

        if verdict.is_correct && verdict.points_earned > 0 {
            notifier.notify(
                NoticeLevel::Success,
                format!("+{} puntos", verdict.points_earned),
            );
        }

        if self.phase == LessonPhase::Ready && self.sequencer.is_complete() {
            self.enter_complete(notifier);
        }
    }

    fn enter_complete(&mut self, notifier: &mut dyn Notifier) {
        self.phase = LessonPhase::Complete;
        self.input = None;
        self.refresh_completion = true;
        self.completion_stale = true;
        notifier.notify(NoticeLevel::Success, "🎉 ¡Lección completada!".into());
    }

    pub fn next_exercise(&mut self, notifier: &mut dyn Notifier) {
        if self.phase != LessonPhase::Ready || self.awaiting.is_some() {
            return;
        }
        self.message.clear();
        match self.sequencer.next() {
            Advance::Exercise(_) => self.remount_input(),
            Advance::Complete => self.enter_complete(notifier),
        }
    }

    pub fn jump_to(&mut self, idx: usize) {
        if self.phase != LessonPhase::Ready || self.awaiting.is_some() {
            return;
        }
        if self.sequencer.jump_to(idx) {
            self.message.clear();
            self.remount_input();
        }
    }

    /// `true` una sola vez tras completar en esta sesión: hay que pedir el
    /// resumen actualizado al servidor.
    pub fn take_completion_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_completion)
    }

    pub fn take_redirect(&mut self) -> bool {
        std::mem::take(&mut self.redirect_to_courses)
    }

    pub fn apply_completion(&mut self, result: Result<LessonCompletion>) {
        match result {
            Ok(completion) => {
                self.completion = Some(completion);
                self.completion_stale = false;
            }
            Err(err) => log::warn!("Resumen de la lección {} no disponible: {err}", self.lesson_id),
        }
    }

    /// Puntuación agregada. Usa las cifras del servidor salvo que estén
    /// desfasadas (completada en esta sesión y aún sin refrescar).
    pub fn summary(&self) -> Option<CompletionSummary> {
        let lesson = self.lesson.as_ref()?;
        let local_correct = self.sequencer.correct_count() as u32;
        let local_points: u32 = lesson
            .exercises
            .iter()
            .filter(|e| self.sequencer.is_correct(e.id))
            .map(|e| e.points)
            .sum();

        let server = self
            .completion
            .as_ref()
            .filter(|c| !self.completion_stale && c.total_exercises > 0);

        let (correct, total, points) = match server {
            Some(c) => (
                c.correct_exercises.min(c.total_exercises),
                c.total_exercises,
                c.total_points.max(local_points),
            ),
            None => (local_correct, lesson.exercises.len() as u32, local_points),
        };
        // Los contadores vienen del servidor: se multiplica en u64
        let percent = if total == 0 {
            0
        } else {
            (u64::from(correct) * 100 / u64::from(total)) as u32
        };

        Some(CompletionSummary {
            percent,
            correct,
            total,
            points,
            celebrate: percent > CELEBRATION_THRESHOLD,
        })
    }

    pub fn next_lesson_id(&self) -> Option<LessonId> {
        self.completion.as_ref().and_then(|c| c.next_lesson_id)
    }

    pub fn enter_review(&mut self) {
        if self.phase == LessonPhase::Complete {
            self.phase = LessonPhase::Reviewing;
        }
    }

    pub fn leave_review(&mut self) {
        if self.phase == LessonPhase::Reviewing {
            self.phase = LessonPhase::Complete;
        }
    }

    pub fn apply_reset(&mut self, result: Result<()>, notifier: &mut dyn Notifier) -> bool {
        match result {
            Ok(()) => {
                notifier.notify(NoticeLevel::Info, "Progreso de la lección reiniciado".into());
                self.begin_load();
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::lesson::input::AnswerInput;
    use crate::model::{AttemptRecord, ExerciseKind};

    #[derive(Default)]
    struct Recorder(Vec<(NoticeLevel, String)>);

    impl Notifier for Recorder {
        fn notify(&mut self, level: NoticeLevel, message: String) {
            self.0.push((level, message));
        }
    }

    fn blank(id: ExerciseId, answer: &str, points: u32) -> Exercise {
        Exercise {
            id,
            question: format!("pregunta {id}"),
            correct_answer: answer.into(),
            points,
            kind: ExerciseKind::FillInBlank,
        }
    }

    fn bundle(attempts: Vec<AttemptRecord>) -> LessonBundle {
        LessonBundle {
            lesson: Lesson {
                id: 5,
                course_id: Some(1),
                title: "Verbos".into(),
                content: "# Verbos".into(),
                exercises: vec![blank(1, "ser", 10), blank(2, "estar", 10), blank(3, "ir", 5)],
            },
            previous_completed: true,
            completion: Some(LessonCompletion {
                total_exercises: 3,
                next_lesson_id: Some(6),
                attempts,
                ..Default::default()
            }),
        }
    }

    fn type_answer(flow: &mut LessonFlow, text: &str) {
        flow.input_mut().unwrap().value = AnswerInput::Blank { text: text.into() };
    }

    fn verdict(ok: bool) -> Result<AnswerVerdict> {
        Ok(AnswerVerdict {
            is_correct: ok,
            message: None,
            points_earned: if ok { 10 } else { 0 },
        })
    }

    #[test]
    fn prerequisite_incomplete_redirects_with_notice() {
        let mut flow = LessonFlow::new(5);
        let mut n = Recorder::default();
        let mut b = bundle(vec![]);
        b.previous_completed = false;
        flow.apply_bundle(Ok(b), &mut n);

        assert!(matches!(flow.phase(), LessonPhase::Error(_)));
        assert!(flow.take_redirect());
        assert!(!flow.take_redirect());
        assert_eq!(n.0.len(), 1);
        assert_eq!(n.0[0].0, NoticeLevel::Error);
    }

    #[test]
    fn fetch_failure_shows_error() {
        let mut flow = LessonFlow::new(5);
        flow.apply_bundle(Err(ApiError::Network("sin red".into())), &mut Recorder::default());
        assert_eq!(
            flow.phase(),
            &LessonPhase::Error("No se pudo contactar con el servidor: sin red".into())
        );
        assert!(flow.can_retry());
        assert!(!flow.take_redirect());
    }

    #[test]
    fn wrong_answer_keeps_exercise_pending_and_locks_input() {
        let mut flow = LessonFlow::new(5);
        let mut n = Recorder::default();
        flow.apply_bundle(Ok(bundle(vec![])), &mut n);
        assert_eq!(flow.phase(), &LessonPhase::Ready);

        assert_eq!(flow.begin_submit(), None, "sin texto no se envía");
        type_answer(&mut flow, "estar");
        let sub = flow.begin_submit().unwrap();
        assert_eq!(sub, Submission { exercise_id: 1, answer: "estar".into() });
        assert!(flow.input().unwrap().is_locked());
        assert_eq!(flow.begin_submit(), None, "un único envío");

        flow.apply_verdict(1, verdict(false), &mut n);
        assert_eq!(flow.last_verdict(), Some(false));
        assert!(!flow.sequencer().is_correct(1));
        assert_eq!(flow.progress_percent(), 0);

        flow.next_exercise(&mut n);
        assert_eq!(flow.current_exercise().unwrap().id, 2);
        assert!(!flow.input().unwrap().is_locked());
    }

    #[test]
    fn answering_everything_reaches_completion_and_review() {
        let mut flow = LessonFlow::new(5);
        let mut n = Recorder::default();
        flow.apply_bundle(Ok(bundle(vec![])), &mut n);

        for (id, text) in [(1, "ser"), (2, "estar"), (3, "ir")] {
            assert_eq!(flow.current_exercise().unwrap().id, id);
            type_answer(&mut flow, text);
            let sub = flow.begin_submit().unwrap();
            flow.apply_verdict(sub.exercise_id, verdict(true), &mut n);
            if id != 3 {
                flow.next_exercise(&mut n);
            }
        }

        assert_eq!(flow.phase(), &LessonPhase::Complete);
        assert!(flow.take_completion_refresh());
        assert!(!flow.take_completion_refresh());

        // el resumen del servidor aún es el de antes de empezar
        let summary = flow.summary().unwrap();
        assert_eq!((summary.correct, summary.total, summary.percent), (3, 3, 100));
        assert_eq!(summary.points, 25);
        assert!(summary.celebrate);
        assert_eq!(flow.next_lesson_id(), Some(6));

        flow.enter_review();
        assert_eq!(flow.phase(), &LessonPhase::Reviewing);
        flow.next_exercise(&mut n);
        assert_eq!(flow.phase(), &LessonPhase::Reviewing);
        flow.leave_review();
        assert_eq!(flow.phase(), &LessonPhase::Complete);
    }

    #[test]
    fn full_history_opens_on_completion_gate() {
        let attempts = (1..=3)
            .map(|id| AttemptRecord { exercise_id: id, is_correct: true, answer: None })
            .collect();
        let mut flow = LessonFlow::new(5);
        flow.apply_bundle(Ok(bundle(attempts)), &mut Recorder::default());
        assert_eq!(flow.phase(), &LessonPhase::Complete);
        assert!(flow.input().is_none());
        assert!(!flow.take_completion_refresh());
    }

    #[test]
    fn summary_prefers_server_counts_and_celebrates_above_seventy() {
        let mut flow = LessonFlow::new(5);
        let attempts = (1..=3)
            .map(|id| AttemptRecord { exercise_id: id, is_correct: true, answer: None })
            .collect();
        flow.apply_bundle(Ok(bundle(attempts)), &mut Recorder::default());

        flow.apply_completion(Ok(LessonCompletion {
            total_exercises: 3,
            correct_exercises: 2,
            total_points: 40,
            next_lesson_id: None,
            attempts: vec![],
        }));
        let s = flow.summary().unwrap();
        assert_eq!((s.correct, s.total, s.percent, s.points), (2, 3, 66, 40));
        assert!(!s.celebrate);
        assert_eq!(flow.next_lesson_id(), None);

        flow.apply_completion(Err(ApiError::Network("x".into())));
        assert_eq!(flow.summary().unwrap().percent, 66);
    }

    #[test]
    fn failed_submission_is_a_page_error_and_reset_reloads() {
        let mut flow = LessonFlow::new(5);
        let mut n = Recorder::default();
        flow.apply_bundle(Ok(bundle(vec![])), &mut n);
        type_answer(&mut flow, "ser");
        let sub = flow.begin_submit().unwrap();
        flow.apply_verdict(sub.exercise_id, Err(ApiError::Server("sesión caducada".into())), &mut n);
        assert_eq!(flow.phase(), &LessonPhase::Error("sesión caducada".into()));
        assert!(!flow.can_retry());
        assert!(!flow.is_awaiting_verdict());

        assert!(flow.apply_reset(Ok(()), &mut n));
        assert_eq!(flow.phase(), &LessonPhase::Loading);
        assert!(flow.lesson().is_none());
    }

    #[test]
    fn jump_is_refused_while_sending_outside_ready_and_onto_done() {
        let done = vec![AttemptRecord { exercise_id: 1, is_correct: true, answer: None }];

        // Fuera de Ready
        let mut flow = LessonFlow::new(5);
        flow.jump_to(1);
        assert_eq!(flow.phase(), &LessonPhase::Loading);
        assert!(flow.current_exercise().is_none());

        let mut n = Recorder::default();
        flow.apply_bundle(Ok(bundle(done)), &mut n);
        assert_eq!(flow.current_exercise().unwrap().id, 2);

        // Un ejercicio ya acertado no se reabre ni se reenvía
        flow.jump_to(0);
        assert_eq!(flow.current_exercise().unwrap().id, 2);
        type_answer(&mut flow, "estar");
        let sub = flow.begin_submit().unwrap();
        assert_eq!(sub.exercise_id, 2);

        // Con un envío en vuelo tampoco
        flow.jump_to(2);
        assert!(flow.is_awaiting_verdict());
        assert_eq!(flow.current_exercise().unwrap().id, 2);

        flow.apply_verdict(2, verdict(false), &mut n);
        flow.jump_to(2);
        assert_eq!(flow.current_exercise().unwrap().id, 3);
        assert!(!flow.input().unwrap().is_locked());

        let mut flow_done = LessonFlow::new(5);
        let all = (1..=3)
            .map(|id| AttemptRecord { exercise_id: id, is_correct: true, answer: None })
            .collect();
        flow_done.apply_bundle(Ok(bundle(all)), &mut n);
        flow_done.jump_to(1);
        assert_eq!(flow_done.phase(), &LessonPhase::Complete);
        assert!(flow_done.input().is_none());
    }

    #[test]
    fn empty_lesson_warns_and_completes() {
        let mut flow = LessonFlow::new(5);
        let mut n = Recorder::default();
        let mut b = bundle(vec![]);
        b.lesson.exercises.clear();
        b.completion = None;
        flow.apply_bundle(Ok(b), &mut n);

        assert_eq!(flow.phase(), &LessonPhase::Complete);
        assert_eq!(n.0.len(), 1);
        assert_eq!(n.0[0].0, NoticeLevel::Warning);
        assert_eq!(flow.summary().unwrap().percent, 0);
    }

    #[test]
    fn huge_server_counts_do_not_overflow_percent() {
        let mut flow = LessonFlow::new(5);
        let attempts = (1..=3)
            .map(|id| AttemptRecord { exercise_id: id, is_correct: true, answer: None })
            .collect();
        flow.apply_bundle(Ok(bundle(attempts)), &mut Recorder::default());

        flow.apply_completion(Ok(LessonCompletion {
            total_exercises: u32::MAX,
            correct_exercises: u32::MAX,
            total_points: 0,
            next_lesson_id: None,
            attempts: vec![],
        }));
        let s = flow.summary().unwrap();
        assert_eq!((s.correct, s.total, s.percent), (u32::MAX, u32::MAX, 100));

        flow.apply_completion(Ok(LessonCompletion {
            total_exercises: u32::MAX,
            correct_exercises: u32::MAX / 2,
            ..Default::default()
        }));
        assert_eq!(flow.summary().unwrap().percent, 49);
    }

    #[test]
    fn late_bundle_is_ignored_once_ready() {
        let mut flow = LessonFlow::new(5);
        let mut n = Recorder::default();
        flow.apply_bundle(Ok(bundle(vec![])), &mut n);
        flow.apply_bundle(Err(ApiError::Network("tarde".into())), &mut n);
        assert_eq!(flow.phase(), &LessonPhase::Ready);
    }
}
