use crate::LearnApp;
use crate::ui::helpers::big_list_button;
use crate::ui::layout::simple_panel;
use egui::{Color32, Context, RichText, ScrollArea};

pub fn ui_courses(app: &mut LearnApp, ctx: &Context) {
    // Precomputar para no mantener el borrow de `app` durante el pintado
    let infos = app.course_infos();
    let loading = app.is_loading_catalog();
    let mut open = None;
    let mut retry = false;

    simple_panel(ctx, 520.0, egui::Margin::symmetric(24, 16), |ui| {
        let w = ui.available_width();
        ui.vertical_centered(|ui| {
            ui.heading("Selecciona un curso");
            ui.add_space(16.0);

            if let Some(err) = &app.catalog_error {
                ui.label(RichText::new(format!("❌ {err}")).color(Color32::LIGHT_RED));
                if ui.button("🔄 Reintentar").clicked() {
                    retry = true;
                }
                return;
            }
            if loading && infos.is_empty() {
                ui.spinner();
                return;
            }
            if infos.is_empty() {
                ui.label("Todavía no hay cursos disponibles.");
                return;
            }

            ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
                for info in &infos {
                    let clicked = big_list_button(ui, info.label(), w, 40.0, true);
                    if !info.description.is_empty() {
                        ui.label(RichText::new(&info.description).weak());
                    }
                    if clicked {
                        open = Some(info.id);
                    }
                    ui.add_space(8.0);
                }
            });
        });
    });

    if retry {
        app.fetch_courses();
    }
    if let Some(course_id) = open {
        app.open_course(course_id);
    }
}
