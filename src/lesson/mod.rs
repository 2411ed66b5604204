//! Flujo de ejercicios de una lección: carga, secuencia, envío, cierre y repaso.

pub mod flow;
pub mod input;
pub mod sequencer;

pub use flow::{CompletionSummary, LessonFlow, LessonPhase, Submission};
pub use input::{AnswerInput, Closeness, ExerciseInput, closeness_hint};
pub use sequencer::{Advance, ExerciseSequencer};
