use crate::model::{AttemptRecord, ExerciseId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Exercise(usize),
    Complete,
}

/// Secuenciador de ejercicios de una lección.
///
/// `results` solo contiene ids de la lección, y solo guarda veredictos
/// `true`: un fallo no se anota, el ejercicio sigue pendiente y volverá a
/// salir al avanzar.
#[derive(Debug, Clone, Default)]
pub struct ExerciseSequencer {
    ids: Vec<ExerciseId>,
    current: usize,
    results: HashMap<ExerciseId, bool>,
}

impl ExerciseSequencer {
    pub fn new(ids: Vec<ExerciseId>) -> Self {
        Self {
            ids,
            current: 0,
            results: HashMap::new(),
        }
    }

    /// Reconstruye el mapa desde el historial del servidor y se posiciona en
    /// el primer ejercicio sin acierto.
    pub fn from_history(ids: Vec<ExerciseId>, attempts: &[AttemptRecord]) -> Self {
        let mut seq = Self::new(ids);
        for attempt in attempts {
            seq.record(attempt.exercise_id, attempt.is_correct);
        }
        seq.current = seq.first_pending().unwrap_or(0);
        seq
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_id(&self) -> Option<ExerciseId> {
        self.ids.get(self.current).copied()
    }

    pub fn results(&self) -> &HashMap<ExerciseId, bool> {
        &self.results
    }

    pub fn is_correct(&self, id: ExerciseId) -> bool {
        self.results.get(&id).copied().unwrap_or(false)
    }

    pub fn correct_count(&self) -> usize {
        self.results.values().filter(|ok| **ok).count()
    }

    /// `floor(aciertos / total * 100)`.
    pub fn progress_percent(&self) -> u32 {
        if self.ids.is_empty() {
            return 0;
        }
        (self.correct_count() * 100 / self.ids.len()) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.ids.iter().all(|id| self.is_correct(*id))
    }

    /// Anota un veredicto. Devuelve `true` si el mapa cambió.
    pub fn record(&mut self, id: ExerciseId, correct: bool) -> bool {
        if !correct || !self.ids.contains(&id) {
            return false;
        }
        self.results.insert(id, true) != Some(true)
    }

    pub fn first_pending(&self) -> Option<usize> {
        self.ids.iter().position(|id| !self.is_correct(*id))
    }

    /// Busca hacia delante desde `current + 1` y, si no hay, vuelve a empezar
    /// desde 0. No hay límite de vueltas.
    pub fn next(&mut self) -> Advance {
        if self.is_complete() {
            return Advance::Complete;
        }
        let n = self.ids.len();
        let found = (self.current + 1..n)
            .chain(0..n)
            .find(|&idx| !self.is_correct(self.ids[idx]));

        match found {
            Some(idx) => {
                self.current = idx;
                Advance::Exercise(idx)
            }
            None => Advance::Complete,
        }
    }

    /// Salta directamente a un ejercicio (lista lateral). Los ya acertados
    /// no se reabren.
    pub fn jump_to(&mut self, idx: usize) -> bool {
        match self.ids.get(idx) {
            Some(&id) if !self.is_correct(id) => {
                self.current = idx;
                true
            }
            _ => false,
        }
    }
}
