use crate::LearnApp;
use crate::model::AppState;
use crate::session::NoticeLevel;
use egui::{Button, CentralPanel, Color32, Context, Frame, RichText, Ui, Visuals};

pub fn top_panel(app: &mut LearnApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            let name = app
                .session
                .as_ref()
                .map(|s| s.display_name().to_owned())
                .unwrap_or_default();
            ui.label(format!("👤 {name}"));

            if app.state != AppState::Courses && ui.button("📚 Cursos").clicked() {
                app.open_courses();
            }

            if app.is_busy() {
                ui.spinner();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🚪 Cerrar sesión").clicked() {
                    app.logout();
                }
            });
        });
    });
}

pub fn bottom_panel(app: &mut LearnApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTONES DE TEMA -----------
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 Modo oscuro").clicked() {
                app.settings.dark_mode = true;
            }
            if ui.button("☀Modo claro").clicked() {
                app.settings.dark_mode = false;
            }
        });
    });
}

pub fn apply_theme(app: &LearnApp, ctx: &Context) {
    if app.settings.dark_mode {
        ctx.set_visuals(Visuals::dark());
    } else {
        ctx.set_visuals(Visuals::light());
    }
}

/// Panel centrado tanto vertical como horizontalmente,
/// con un tamaño de contenido máximo y un bloque interior `inner`.
pub fn centered_panel(ctx: &Context, est_height: f32, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        // Espacio vertical para centrar
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_width(w);
                    inner(ui);
                });
        });
        ui.add_space(extra);
    });
}

pub fn simple_panel(ctx: &Context, max_width: f32, margin: egui::Margin, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        let w = ui.available_width().min(max_width);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(margin)
                .show(ui, |ui| {
                    ui.set_width(w);
                    inner(ui);
                });
        });
    });
}

/// Dibuja dos botones del mismo tamaño en una fila, centrados en el ancho dado.
/// Devuelve (clic izquierdo, clic derecho).
pub fn two_button_row(ui: &mut Ui, panel_width: f32, left_label: &str, right_label: &str) -> (bool, bool) {
    let btn_w = (panel_width - 8.0) / 2.0;
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        // espacio para centrar la fila en su panel
        ui.add_space(((ui.available_width() - panel_width) / 2.0).max(0.0));
        clicked_left = ui.add_sized([btn_w, 36.0], Button::new(left_label)).clicked();
        clicked_right = ui.add_sized([btn_w, 36.0], Button::new(right_label)).clicked();
    });
    (clicked_left, clicked_right)
}

/// Panel de error genérico con una única salida. Devuelve si se pulsó.
pub fn error_panel(ui: &mut Ui, width: f32, message: &str, action_label: &str) -> bool {
    ui.heading("⚠ Algo ha fallado");
    ui.add_space(10.0);
    ui.label(RichText::new(message).color(Color32::LIGHT_RED));
    ui.add_space(16.0);
    ui.add_sized([width / 2.0, 36.0], Button::new(action_label))
        .clicked()
}

/// Avisos flotantes en la esquina inferior derecha. Clic para cerrar.
pub fn toasts(app: &mut LearnApp, ctx: &Context) {
    if app.notifications.is_empty() {
        return;
    }
    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -40.0])
        .show(ctx, |ui| {
            for (i, notice) in app.notifications.notices().enumerate() {
                let color = match notice.level {
                    NoticeLevel::Info => Color32::LIGHT_BLUE,
                    NoticeLevel::Success => Color32::LIGHT_GREEN,
                    NoticeLevel::Warning => Color32::YELLOW,
                    NoticeLevel::Error => Color32::LIGHT_RED,
                };
                let resp = Frame::popup(ui.style())
                    .show(ui, |ui| {
                        ui.label(RichText::new(&notice.message).color(color));
                    })
                    .response
                    .interact(egui::Sense::click());
                if resp.clicked() {
                    dismissed = Some(i);
                }
                ui.add_space(4.0);
            }
        });
    if let Some(i) = dismissed {
        app.notifications.dismiss(i);
    }
}
