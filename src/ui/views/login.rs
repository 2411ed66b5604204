use crate::LearnApp;
use crate::ui::layout::centered_panel;
use egui::{Button, Context, RichText, TextEdit};

pub fn ui_login(app: &mut LearnApp, ctx: &Context) {
    centered_panel(ctx, 260.0, 380.0, |ui| {
        let w = ui.available_width();
        ui.vertical_centered(|ui| {
            ui.heading("👋 Bienvenido al aula");
            ui.add_space(16.0);

            ui.label("Correo electrónico");
            ui.add(TextEdit::singleline(&mut app.login_form.email).desired_width(w));
            ui.add_space(6.0);
            ui.label("Contraseña");
            let pass = ui.add(
                TextEdit::singleline(&mut app.login_form.password)
                    .password(true)
                    .desired_width(w),
            );
            ui.add_space(14.0);

            let enter_pressed = pass.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let busy = app.pending.login.is_some();
            let clicked = ui
                .add_enabled(!busy, Button::new("Entrar").min_size([w, 36.0].into()))
                .clicked();
            if (clicked || enter_pressed) && !busy {
                app.login();
            }

            if !app.message.is_empty() {
                ui.add_space(8.0);
                ui.label(RichText::new(&app.message).strong());
            }
        });
    });
}
