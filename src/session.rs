use crate::model::{UserId, de_id};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Sesión del usuario autenticado. Se pasa explícitamente a quien la necesite.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthSession {
    #[serde(alias = "id", deserialize_with = "de_id")]
    pub user_id: UserId,
    #[serde(default, alias = "username")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl AuthSession {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub ttl: f32,
}

/// Canal de avisos hacia el usuario (toasts).
pub trait Notifier {
    fn notify(&mut self, level: NoticeLevel, message: String);
}

const MAX_NOTICES: usize = 5;
const NOTICE_TTL_SECS: f32 = 4.0;

#[derive(Default)]
pub struct NotificationCenter {
    queue: VecDeque<Notice>,
    /// Reloj de la UI en el último `tick_at`.
    last_time: Option<f64>,
}

impl NotificationCenter {
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Descuenta `dt` segundos y elimina los avisos caducados.
    pub fn tick(&mut self, dt: f32) {
        for notice in &mut self.queue {
            notice.ttl -= dt;
        }
        self.queue.retain(|n| n.ttl > 0.0);
    }

    /// Avanza hasta el instante `now` del reloj de la UI. Mide el tiempo
    /// real entre frames aunque se repinte poco.
    pub fn tick_at(&mut self, now: f64) {
        let dt = self.last_time.map_or(0.0, |prev| (now - prev).max(0.0));
        self.last_time = Some(now);
        self.tick(dt as f32);
    }

    pub fn dismiss(&mut self, idx: usize) {
        self.queue.remove(idx);
    }
}

impl Notifier for NotificationCenter {
    fn notify(&mut self, level: NoticeLevel, message: String) {
        match level {
            NoticeLevel::Error => log::warn!("aviso: {message}"),
            _ => log::debug!("aviso: {message}"),
        }
        if self.queue.len() == MAX_NOTICES {
            self.queue.pop_front();
        }
        self.queue.push_back(Notice {
            level,
            message,
            ttl: NOTICE_TTL_SECS,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_bounded_and_expires() {
        let mut center = NotificationCenter::default();
        for i in 0..7 {
            center.notify(NoticeLevel::Info, format!("aviso {i}"));
        }
        let msgs: Vec<_> = center.notices().map(|n| n.message.clone()).collect();
        assert_eq!(msgs.len(), 5);
        assert_eq!(msgs[0], "aviso 2");

        center.tick(1.0);
        assert_eq!(center.notices().count(), 5);
        center.tick(3.5);
        assert!(center.is_empty());
    }

    #[test]
    fn expiry_follows_the_clock_not_the_frame_count() {
        let mut center = NotificationCenter::default();
        center.tick_at(10.0);
        center.notify(NoticeLevel::Success, "guardado".into());

        // Repintado cada 100 ms
        let mut now = 10.0;
        for _ in 0..38 {
            now += 0.1;
            center.tick_at(now);
        }
        assert!(!center.is_empty());
        for _ in 0..3 {
            now += 0.1;
            center.tick_at(now);
        }
        assert!(center.is_empty());

        // Un hueco largo entre dos frames cuenta entero
        center.notify(NoticeLevel::Info, "hola".into());
        center.tick_at(now + 5.0);
        assert!(center.is_empty());
    }

    #[test]
    fn session_decodes_login_payload() {
        let s: AuthSession = serde_json::from_value(serde_json::json!({
            "id": "42", "username": "ana", "email": "ana@example.com"
        }))
        .unwrap();
        assert_eq!(s.user_id, 42);
        assert_eq!(s.display_name(), "ana");
        assert_eq!(s.token, None);

        // Lo que guarda eframe se vuelve a leer igual
        let stored = serde_json::to_string(&s).unwrap();
        let back: AuthSession = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, s);
    }
}
