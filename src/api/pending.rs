use crate::error::{ApiError, Result};
use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Petición en vuelo. La UI la consulta en cada frame con [`Pending::poll`].
pub struct Pending<T> {
    rx: Receiver<Result<T>>,
}

impl<T> Pending<T> {
    /// `None` mientras no haya respuesta.
    pub fn poll(&self) -> Option<Result<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(ApiError::Network("la petición se interrumpió".into())))
            }
        }
    }

    /// Petición ya resuelta (útil para inyectar respuestas).
    pub fn ready(result: Result<T>) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self { rx }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<T, F>(repaint: Option<egui::Context>, future: F) -> Pending<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let result = futures::executor::block_on(future);
        let _ = tx.send(result);
        if let Some(ctx) = repaint {
            ctx.request_repaint();
        }
    });
    Pending { rx }
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<T, F>(repaint: Option<egui::Context>, future: F) -> Pending<T>
where
    F: Future<Output = Result<T>> + 'static,
    T: 'static,
{
    let (tx, rx) = mpsc::channel();
    wasm_bindgen_futures::spawn_local(async move {
        let result = future.await;
        let _ = tx.send(result);
        if let Some(ctx) = repaint {
            ctx.request_repaint();
        }
    });
    Pending { rx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_yields_once() {
        let pending = Pending::ready(Ok(5));
        assert_eq!(pending.poll(), Some(Ok(5)));
        // el emisor ya no existe
        assert!(matches!(pending.poll(), Some(Err(ApiError::Network(_)))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn spawned_future_delivers_result() {
        let pending = spawn(None, async { Ok::<_, ApiError>("hecho".to_string()) });
        let mut got = None;
        for _ in 0..200 {
            if let Some(r) = pending.poll() {
                got = Some(r);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(got, Some(Ok("hecho".to_string())));
    }
}
