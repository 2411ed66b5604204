use crate::LearnApp;
use crate::ui::helpers::big_list_button;
use crate::ui::layout::simple_panel;
use egui::{Button, Color32, Context, RichText, ScrollArea};

pub fn ui_lessons(app: &mut LearnApp, ctx: &Context) {
    let infos = app.lesson_infos();
    let title = app
        .current_course()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| "Lecciones".into());
    let loading = app.is_loading_catalog();
    let mut open = None;
    let mut back = false;
    let mut retry = false;

    simple_panel(ctx, 520.0, egui::Margin::symmetric(24, 16), |ui| {
        let w = ui.available_width();
        ui.vertical_centered(|ui| {
            ui.heading(&title);
            ui.add_space(12.0);

            if !app.message.is_empty() {
                ui.label(
                    RichText::new(&app.message)
                        .color(Color32::YELLOW)
                        .strong(),
                );
                ui.add_space(8.0);
            }

            if let Some(err) = &app.catalog_error {
                ui.label(RichText::new(format!("❌ {err}")).color(Color32::LIGHT_RED));
                retry = ui.button("🔄 Reintentar").clicked();
            } else if loading && infos.is_empty() {
                ui.spinner();
            } else if infos.is_empty() {
                ui.label("Este curso aún no tiene lecciones.");
            } else {
                ScrollArea::vertical()
                    .max_height((ui.available_height() - 60.0).max(120.0))
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for info in &infos {
                            if big_list_button(ui, info.label(), w, 36.0, true) {
                                open = Some(info.id);
                            }
                            ui.add_space(6.0);
                        }
                    });
            }

            ui.add_space(16.0);
            back = ui
                .add_sized([w / 2.0, 36.0], Button::new("⬅ Volver a cursos"))
                .clicked();
        });
    });

    if retry {
        if let Some(course_id) = app.current_course {
            app.fetch_course_lessons(course_id);
        }
    }
    if back {
        app.open_courses();
    } else if let Some(lesson_id) = open {
        app.open_lesson(lesson_id);
    }
}
