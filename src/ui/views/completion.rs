use super::lesson::LessonAction;
use crate::LearnApp;
use crate::ui::helpers::split_button_with_restart;
use crate::ui::layout::centered_panel;
use egui::{Button, Color32, Context, RichText};

pub(crate) fn ui_completion(app: &mut LearnApp, ctx: &Context) -> Option<LessonAction> {
    let flow = app.lesson.as_ref()?;
    let summary = flow.summary()?;
    let title = flow.lesson().map(|l| l.title.clone()).unwrap_or_default();
    let has_next = flow.next_lesson_id().is_some();
    let refreshing = app.pending.completion.is_some();
    let resetting = app.pending.reset.is_some();

    let mut action = None;
    centered_panel(ctx, 340.0, 480.0, |ui| {
        let w = ui.available_width();
        ui.vertical_centered(|ui| {
            if summary.celebrate {
                ui.heading("🎉 ¡Enhorabuena!");
            } else {
                ui.heading("Lección terminada");
            }
            ui.label(RichText::new(&title).weak());
            ui.add_space(12.0);

            let color = if summary.celebrate {
                Color32::LIGHT_GREEN
            } else {
                Color32::YELLOW
            };
            ui.label(RichText::new(format!("{}%", summary.percent)).size(42.0).color(color).strong());
            ui.label(format!("Aciertos: {}/{}", summary.correct, summary.total));
            ui.label(format!("Puntos: {}", summary.points));
            if refreshing {
                ui.spinner();
            }
            ui.add_space(16.0);

            let next_label = if has_next {
                "Siguiente lección ➡"
            } else {
                "🏁 Terminar curso"
            };
            if ui
                .add_enabled(!refreshing, Button::new(next_label).min_size([w, 36.0].into()))
                .clicked()
            {
                action = Some(LessonAction::NextLesson);
            }
            ui.add_space(6.0);

            let (review, reset) = split_button_with_restart(ui, "📝 Revisar lección", w, 36.0, !resetting);
            if review {
                action = Some(LessonAction::Review);
            }
            if reset {
                action = Some(LessonAction::AskReset);
            }
            ui.add_space(6.0);

            if ui
                .add_sized([w, 32.0], Button::new("⬅ Volver a lecciones"))
                .clicked()
            {
                action = Some(LessonAction::Back);
            }
        });
    });
    action
}

pub fn confirm_reset(app: &mut LearnApp, ctx: &egui::Context) {
    egui::Window::new("Confirmar reinicio")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("¿Seguro que quieres borrar tus respuestas de esta lección? ¡Esta acción no se puede deshacer!");
            ui.horizontal(|ui| {
                if ui.button("Sí, borrar").clicked() {
                    app.reset_lesson_progress();
                }
                if ui.button("No").clicked() {
                    app.confirm_reset = false;
                }
            });
        });
}
