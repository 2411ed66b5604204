use super::{completion, exercise, review};
use crate::LearnApp;
use crate::lesson::{LessonFlow, LessonPhase};
use crate::ui::layout::{centered_panel, error_panel, simple_panel, two_button_row};
use egui::{Button, Color32, Context, ProgressBar, RichText, ScrollArea};
use egui_commonmark::CommonMarkViewer;

/// Lo que el usuario ha pulsado en este frame. Se aplica al final, fuera
/// de los closures de pintado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LessonAction {
    Submit,
    Next,
    Jump(usize),
    Back,
    Retry,
    Review,
    LeaveReview,
    NextLesson,
    AskReset,
}

pub fn ui_lesson(app: &mut LearnApp, ctx: &Context) {
    let Some(phase) = app.lesson.as_ref().map(|f| f.phase().clone()) else {
        app.volver_a_lecciones();
        return;
    };

    let action = match phase {
        LessonPhase::Loading => {
            centered_panel(ctx, 80.0, 300.0, |ui| {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label("Cargando lección…");
                });
            });
            None
        }
        LessonPhase::Error(msg) => {
            let retry = app.lesson.as_ref().is_some_and(LessonFlow::can_retry);
            let (label, on_click) = if retry {
                ("🔄 Reintentar", LessonAction::Retry)
            } else {
                ("⬅ Volver a lecciones", LessonAction::Back)
            };
            let mut action = None;
            centered_panel(ctx, 180.0, 460.0, |ui| {
                let w = ui.available_width();
                ui.vertical_centered(|ui| {
                    if error_panel(ui, w, &msg, label) {
                        action = Some(on_click);
                    }
                });
            });
            action
        }
        LessonPhase::Ready => ui_ready(app, ctx),
        LessonPhase::Complete => completion::ui_completion(app, ctx),
        LessonPhase::Reviewing => review::ui_review(app, ctx),
    };

    if let Some(action) = action {
        apply_action(app, action);
    }
}

fn apply_action(app: &mut LearnApp, action: LessonAction) {
    match action {
        LessonAction::Submit => app.procesar_respuesta(),
        LessonAction::Next => app.next_exercise(),
        LessonAction::Jump(idx) => app.jump_to_exercise(idx),
        LessonAction::Back => app.volver_a_lecciones(),
        LessonAction::Retry => app.retry_lesson(),
        LessonAction::Review => app.enter_review(),
        LessonAction::LeaveReview => app.leave_review(),
        LessonAction::NextLesson => app.avanzar_a_siguiente_leccion(),
        LessonAction::AskReset => app.confirm_reset = true,
    }
}

fn ui_ready(app: &mut LearnApp, ctx: &Context) -> Option<LessonAction> {
    let rows = app.exercise_rows();
    let flow = app.lesson.as_ref()?;
    let lesson = flow.lesson()?;
    let title = lesson.title.clone();
    let content = lesson.content.clone();
    // Copia para poder tomar la entrada como &mut más abajo
    let current = flow.current_exercise()?.clone();
    let percent = flow.progress_percent();
    let done = flow.sequencer().correct_count();
    let total = flow.sequencer().len();
    let awaiting = flow.is_awaiting_verdict();
    let answered = flow.last_verdict().is_some();
    let message = flow.message.clone();
    let verdict_color = match flow.last_verdict() {
        Some(true) => Color32::LIGHT_GREEN,
        Some(false) => Color32::LIGHT_RED,
        None => Color32::GRAY,
    };

    let mut action = None;
    simple_panel(ctx, 720.0, egui::Margin::symmetric(24, 12), |ui| {
        let w = ui.available_width();
        ui.vertical_centered(|ui| {
            ui.heading(&title);
            ui.add_space(6.0);
            ui.add(
                ProgressBar::new(percent as f32 / 100.0)
                    .desired_width(w)
                    .text(format!("{done}/{total} · {percent}%")),
            );
        });
        ui.add_space(8.0);

        if !content.trim().is_empty() {
            egui::CollapsingHeader::new("📖 Contenido de la lección")
                .default_open(true)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("lesson_content")
                        .max_height(220.0)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            CommonMarkViewer::new().show(ui, &mut app.cm_cache, &content);
                        });
                });
            ui.separator();
        }

        // Tira de ejercicios: salto directo a los pendientes
        ui.horizontal_wrapped(|ui| {
            for row in &rows {
                let btn = Button::new(row.label()).selected(row.current);
                if ui.add_enabled(!awaiting && !row.done, btn).clicked() && !row.current {
                    action = Some(LessonAction::Jump(row.idx));
                }
            }
        });
        ui.add_space(8.0);

        if let Some(input) = app.lesson.as_mut().and_then(LessonFlow::input_mut) {
            exercise::ui_exercise(ui, &current, input, w);
        }

        ui.add_space(8.0);
        if !message.is_empty() {
            ui.label(RichText::new(&message).color(verdict_color).strong());
            ui.add_space(6.0);
        }

        let submit_label = if awaiting { "⏳ Enviando…" } else { "Enviar" };
        let (send, next) = two_button_row(ui, w, submit_label, "Siguiente ➡");
        if send && !awaiting && !answered {
            action = Some(LessonAction::Submit);
        }
        if next && !awaiting {
            action = Some(LessonAction::Next);
        }

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            if ui
                .add_sized([w / 2.0, 32.0], Button::new("⬅ Volver a lecciones"))
                .clicked()
            {
                action = Some(LessonAction::Back);
            }
        });
    });
    action
}
