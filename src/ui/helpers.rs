// src/ui/helpers.rs
use egui::{Button, Color32, Ui, Vec2};

pub fn big_list_button(ui: &mut Ui, label: String, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height)))
        .clicked()
}

/// Devuelve (clicked_main, clicked_restart).
/// - Si `show_restart == false`: SOLO se muestra el botón principal.
/// - Si `show_restart == true`: principal + "Reiniciar" en rojo al lado.
pub fn split_button_with_restart(
    ui: &mut Ui,
    label: &str,
    total_width: f32,
    height: f32,
    show_restart: bool,
) -> (bool, bool) {
    if !show_restart {
        let clicked = ui.add_sized([total_width, height], Button::new(label)).clicked();
        return (clicked, false);
    }

    let gap = 8.0;
    let restart_w = (total_width / 3.0).max(80.0);
    let main_w = (total_width - restart_w - gap).max(120.0);

    let mut clicked_main = false;
    let mut clicked_restart = false;
    ui.horizontal(|ui| {
        clicked_main = ui
            .add(Button::new(label).min_size(Vec2::new(main_w, height)))
            .clicked();
        let restart_btn = Button::new("⟲ Reiniciar progreso")
            .min_size(Vec2::new(restart_w, height))
            .fill(Color32::DARK_RED);
        if ui
            .add(restart_btn)
            .on_hover_text("Borra tus respuestas de esta lección")
            .clicked()
        {
            clicked_restart = true;
        }
    });

    (clicked_main, clicked_restart)
}
