mod helpers;
pub mod layout;
pub mod views;

use crate::app::LearnApp;
use crate::model::AppState;
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::{apply_theme, bottom_panel, toasts, top_panel};
use std::time::Duration;

impl App for LearnApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Los avisos de este frame empiezan a contar desde el siguiente
        self.notifications.tick_at(ctx.input(|i| i.time));

        // Respuestas de red antes de pintar nada
        self.poll_requests();

        apply_theme(self, ctx);

        if self.state != AppState::Login {
            top_panel(self, ctx);
        }

        // PANEL INFERIOR TEMA OSCURO O CLARO
        bottom_panel(self, ctx);

        match self.state {
            AppState::Login => views::login::ui_login(self, ctx),
            AppState::Courses => views::courses::ui_courses(self, ctx),
            AppState::Lessons => views::lessons::ui_lessons(self, ctx),
            AppState::Lesson => views::lesson::ui_lesson(self, ctx),
        }

        if self.confirm_reset {
            views::completion::confirm_reset(self, ctx);
        }

        toasts(self, ctx);

        // Sin peticiones ni avisos no hace falta repintar
        if self.is_busy() || !self.notifications.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use crate::session::{NoticeLevel, NotificationCenter, Notifier};
    use egui::{Context, RawInput};

    #[test]
    fn toast_expires_after_four_seconds_of_ui_time() {
        let ctx = Context::default();
        let mut center = NotificationCenter::default();
        center.notify(NoticeLevel::Info, "Progreso guardado".into());

        let mut frames: u32 = 0;
        while !center.is_empty() && frames < 200 {
            let input = RawInput {
                time: Some(f64::from(frames) * 0.1),
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| center.tick_at(ctx.input(|i| i.time)));
            frames += 1;
        }
        // unos 4 s a 10 frames por segundo
        assert!((40..=42).contains(&frames), "caducó tras {frames} frames");
    }
}
