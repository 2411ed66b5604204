use super::lesson::LessonAction;
use crate::LearnApp;
use crate::model::ExerciseKind;
use crate::ui::layout::simple_panel;
use egui::{Button, Color32, Context, RichText, ScrollArea};
use egui_commonmark::CommonMarkViewer;

/// Revisión de solo lectura: contenido y respuesta correcta de cada ejercicio.
pub(crate) fn ui_review(app: &mut LearnApp, ctx: &Context) -> Option<LessonAction> {
    let flow = app.lesson.as_ref()?;
    let lesson = flow.lesson()?.clone();
    let results: Vec<bool> = lesson
        .exercises
        .iter()
        .map(|e| flow.sequencer().is_correct(e.id))
        .collect();

    let mut action = None;
    simple_panel(ctx, 720.0, egui::Margin::symmetric(24, 12), |ui| {
        let w = ui.available_width();
        ui.vertical_centered(|ui| {
            ui.heading(format!("📝 Revisión: {}", lesson.title));
        });
        ui.add_space(8.0);

        ScrollArea::vertical()
            .id_salt("review_scroll")
            .max_height((ui.available_height() - 60.0).max(160.0))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !lesson.content.trim().is_empty() {
                    CommonMarkViewer::new().show(ui, &mut app.cm_cache, &lesson.content);
                    ui.separator();
                }

                for (i, (exercise, ok)) in lesson.exercises.iter().zip(&results).enumerate() {
                    let mark = if *ok { "✅" } else { "❌" };
                    ui.label(
                        RichText::new(format!("{mark} Ejercicio {}: {}", i + 1, exercise.question))
                            .strong(),
                    );
                    match &exercise.kind {
                        ExerciseKind::MultipleChoice { options } => {
                            for opt in options {
                                if opt.is_correct {
                                    ui.label(
                                        RichText::new(format!("  ✔ {}", opt.text))
                                            .color(Color32::LIGHT_GREEN),
                                    );
                                } else {
                                    ui.label(RichText::new(format!("  • {}", opt.text)).weak());
                                }
                            }
                        }
                        ExerciseKind::FillInBlank | ExerciseKind::Writing => {
                            ui.label(
                                RichText::new(format!("  Respuesta: {}", exercise.correct_answer))
                                    .color(Color32::LIGHT_GREEN),
                            );
                        }
                    }
                    ui.add_space(8.0);
                }
            });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui
                .add_sized([w / 2.0, 36.0], Button::new("⬅ Volver al resumen"))
                .clicked()
            {
                action = Some(LessonAction::LeaveReview);
            }
        });
    });
    action
}
