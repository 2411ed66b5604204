use crate::lesson::{AnswerInput, Closeness, ExerciseInput, closeness_hint};
use crate::model::{Exercise, ExerciseKind};
use egui::{Color32, RichText, ScrollArea, TextEdit, Ui};

/// Pinta el ejercicio según su tipo. La entrada queda deshabilitada
/// tras el envío.
pub fn ui_exercise(ui: &mut Ui, exercise: &Exercise, input: &mut ExerciseInput, width: f32) {
    let locked = input.is_locked();

    ui.horizontal(|ui| {
        ui.label(RichText::new(exercise.kind.label()).weak());
        if exercise.points > 0 {
            ui.label(RichText::new(format!("· {} pts", exercise.points)).weak());
        }
    });
    ui.add_space(4.0);
    ui.label(RichText::new(&exercise.question).size(17.0));
    ui.add_space(8.0);

    match (&exercise.kind, &mut input.value) {
        (ExerciseKind::MultipleChoice { options }, AnswerInput::Choice { selected }) => {
            ui.add_enabled_ui(!locked, |ui| {
                for (i, opt) in options.iter().enumerate() {
                    ui.radio_value(selected, Some(i), opt.text.as_str());
                }
            });
        }
        (ExerciseKind::FillInBlank, AnswerInput::Blank { text }) => {
            ui.add_enabled(
                !locked,
                TextEdit::singleline(text)
                    .hint_text("Escribe la palabra que falta")
                    .desired_width(width),
            );
            if !locked {
                let hint = closeness_hint(text, &exercise.correct_answer);
                let color = match hint {
                    Closeness::Exact => Color32::LIGHT_GREEN,
                    Closeness::Closer => Color32::YELLOW,
                    _ => Color32::GRAY,
                };
                if hint != Closeness::Empty {
                    ui.label(RichText::new(hint.label()).color(color));
                }
            }
        }
        (ExerciseKind::Writing, AnswerInput::Writing { text }) => {
            ScrollArea::vertical()
                .id_salt("writing_input")
                .max_height(200.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.add_enabled(
                        !locked,
                        TextEdit::multiline(text)
                            .hint_text("Escribe tu respuesta…")
                            .desired_rows(6)
                            .desired_width(width),
                    );
                });
        }
        _ => {
            log::warn!("Entrada desajustada para el ejercicio {}", exercise.id);
            ui.label("Este ejercicio no se puede mostrar.");
        }
    }
}
