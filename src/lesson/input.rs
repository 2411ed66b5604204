use crate::model::{Exercise, ExerciseKind};

/// Estado transitorio de la respuesta, uno por tipo de ejercicio.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerInput {
    Choice { selected: Option<usize> },
    Blank { text: String },
    Writing { text: String },
}

/// Entrada de un ejercicio. Se bloquea tras el único envío; volver al
/// ejercicio crea una nueva.
#[derive(Debug, Clone)]
pub struct ExerciseInput {
    pub value: AnswerInput,
    locked: bool,
}

impl ExerciseInput {
    pub fn for_exercise(exercise: &Exercise) -> Self {
        let value = match exercise.kind {
            ExerciseKind::MultipleChoice { .. } => AnswerInput::Choice { selected: None },
            ExerciseKind::FillInBlank => AnswerInput::Blank {
                text: String::new(),
            },
            ExerciseKind::Writing => AnswerInput::Writing {
                text: String::new(),
            },
        };
        Self {
            value,
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Texto a enviar; `None` si está vacío, bloqueado o la opción no existe.
    pub fn submission(&self, exercise: &Exercise) -> Option<String> {
        if self.locked {
            return None;
        }
        match (&self.value, &exercise.kind) {
            (AnswerInput::Choice { selected }, ExerciseKind::MultipleChoice { options }) => {
                selected.and_then(|i| options.get(i)).map(|o| o.text.clone())
            }
            (AnswerInput::Blank { text }, _) | (AnswerInput::Writing { text }, _) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closeness {
    Empty,
    Cold,
    Closer,
    Exact,
}

impl Closeness {
    pub fn label(self) -> &'static str {
        match self {
            Closeness::Empty => "",
            Closeness::Cold => "❄ Frío…",
            Closeness::Closer => "🔥 ¡Te acercas!",
            Closeness::Exact => "🎯 ¡Eso parece!",
        }
    }
}

/// Pista en vivo del hueco: coincidencia de subcadena sin mayúsculas.
pub fn closeness_hint(typed: &str, answer: &str) -> Closeness {
    let typed = typed.trim().to_lowercase();
    if typed.is_empty() {
        return Closeness::Empty;
    }
    let answer = answer.trim().to_lowercase();
    if typed == answer {
        Closeness::Exact
    } else if answer.contains(&typed) {
        Closeness::Closer
    } else {
        Closeness::Cold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExerciseOption;

    fn exercise(kind: ExerciseKind) -> Exercise {
        Exercise {
            id: 1,
            question: "q".into(),
            correct_answer: "Fotosíntesis".into(),
            points: 5,
            kind,
        }
    }

    #[test]
    fn hint_levels() {
        assert_eq!(closeness_hint("  ", "Fotosíntesis"), Closeness::Empty);
        assert_eq!(closeness_hint("foto", "Fotosíntesis"), Closeness::Closer);
        assert_eq!(closeness_hint("FOTOSÍNTESIS ", "Fotosíntesis"), Closeness::Exact);
        assert_eq!(closeness_hint("clorofila", "Fotosíntesis"), Closeness::Cold);
    }

    #[test]
    fn choice_submits_option_text() {
        let ex = exercise(ExerciseKind::MultipleChoice {
            options: vec![
                ExerciseOption { text: "a".into(), is_correct: false },
                ExerciseOption { text: "b".into(), is_correct: true },
            ],
        });
        let mut input = ExerciseInput::for_exercise(&ex);
        assert_eq!(input.submission(&ex), None);

        input.value = AnswerInput::Choice { selected: Some(1) };
        assert_eq!(input.submission(&ex).as_deref(), Some("b"));

        input.value = AnswerInput::Choice { selected: Some(7) };
        assert_eq!(input.submission(&ex), None);
    }

    #[test]
    fn locked_input_submits_nothing() {
        let ex = exercise(ExerciseKind::Writing);
        let mut input = ExerciseInput::for_exercise(&ex);
        input.value = AnswerInput::Writing { text: " Mi redacción ".into() };
        assert_eq!(input.submission(&ex).as_deref(), Some("Mi redacción"));

        input.lock();
        assert!(input.is_locked());
        assert_eq!(input.submission(&ex), None);
    }
}
