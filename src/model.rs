use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type LessonId = u64;
pub type ExerciseId = u64;
pub type CourseId = u64;
pub type UserId = u64;

/// Lección tal y como la devuelve `get_lesson.php`. Inmutable una vez cargada.
#[derive(Deserialize, Debug, Clone)]
pub struct Lesson {
    #[serde(deserialize_with = "de_id")]
    pub id: LessonId,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub course_id: Option<CourseId>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Lesson {
    pub fn exercise_ids(&self) -> Vec<ExerciseId> {
        self.exercises.iter().map(|e| e.id).collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(try_from = "RawExercise")]
pub struct Exercise {
    pub id: ExerciseId,
    pub question: String,
    pub correct_answer: String,
    pub points: u32,
    pub kind: ExerciseKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseKind {
    MultipleChoice { options: Vec<ExerciseOption> },
    FillInBlank,
    Writing,
}

impl ExerciseKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::MultipleChoice { .. } => "Opción múltiple",
            ExerciseKind::FillInBlank => "Completar el hueco",
            ExerciseKind::Writing => "Redacción",
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseOption {
    #[serde(alias = "option_text")]
    pub text: String,
    #[serde(default, deserialize_with = "de_bool")]
    pub is_correct: bool,
}

/// Forma cruda del ejercicio en el JSON: el tipo llega como string.
#[derive(Deserialize)]
struct RawExercise {
    #[serde(deserialize_with = "de_id")]
    id: ExerciseId,
    question: String,
    #[serde(default, alias = "answer")]
    correct_answer: String,
    #[serde(rename = "type", alias = "exercise_type")]
    kind: String,
    #[serde(default, deserialize_with = "de_u32")]
    points: u32,
    #[serde(default)]
    options: Option<Vec<ExerciseOption>>,
}

impl TryFrom<RawExercise> for Exercise {
    type Error = String;

    fn try_from(raw: RawExercise) -> Result<Self, Self::Error> {
        let normalized: String = raw
            .kind
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        let kind = match normalized.as_str() {
            "multiplechoice" => ExerciseKind::MultipleChoice {
                options: raw.options.unwrap_or_default(),
            },
            "fillblank" | "fillinblank" | "fillintheblank" => ExerciseKind::FillInBlank,
            "writing" => ExerciseKind::Writing,
            _ => {
                return Err(format!(
                    "tipo de ejercicio desconocido '{}' (ejercicio {})",
                    raw.kind, raw.id
                ));
            }
        };

        Ok(Exercise {
            id: raw.id,
            question: raw.question,
            correct_answer: raw.correct_answer,
            points: raw.points,
            kind,
        })
    }
}

/// Resumen calculado por el servidor. Solo lectura.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LessonCompletion {
    #[serde(default, deserialize_with = "de_u32")]
    pub total_exercises: u32,
    #[serde(default, alias = "correct_count", deserialize_with = "de_u32")]
    pub correct_exercises: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub total_points: u32,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub next_lesson_id: Option<LessonId>,
    #[serde(default, alias = "history")]
    pub attempts: Vec<AttemptRecord>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AttemptRecord {
    #[serde(deserialize_with = "de_id")]
    pub exercise_id: ExerciseId,
    #[serde(deserialize_with = "de_bool")]
    pub is_correct: bool,
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PreviousLessonStatus {
    #[serde(alias = "is_completed", deserialize_with = "de_bool")]
    pub completed: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnswerVerdict {
    #[serde(deserialize_with = "de_bool")]
    pub is_correct: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "de_u32")]
    pub points_earned: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Course {
    #[serde(deserialize_with = "de_id")]
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "total_lessons", deserialize_with = "de_u32")]
    pub lesson_count: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub completed_lessons: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LessonSummary {
    #[serde(deserialize_with = "de_id")]
    pub id: LessonId,
    pub title: String,
    #[serde(default, alias = "lesson_order", deserialize_with = "de_u32")]
    pub order: u32,
    #[serde(default, alias = "is_completed", deserialize_with = "de_bool")]
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Login,
    Courses,
    Lessons,
    Lesson,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Login
    }
}

// El backend PHP mezcla números y strings numéricos ("12", "1", "0").

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(d)?;
    value_to_u64(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("identificador no válido: {value}")))
}

pub(crate) fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(d)?;
    match value {
        Value::Null => Ok(None),
        Value::String(ref s) if s.trim().is_empty() => Ok(None),
        other => value_to_u64(&other)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("identificador no válido: {other}"))),
    }
}

pub(crate) fn de_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    if value.is_null() {
        return Ok(0);
    }
    value_to_u64(&value)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("número no válido: {value}")))
}

pub(crate) fn de_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(d)?;
    match &value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_u64().unwrap_or(0) != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("booleano no válido: {value}"))),
        },
        _ => Err(serde::de::Error::custom(format!("booleano no válido: {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn multiple_choice_exercise_decodes_options() {
        let ex: Exercise = serde_json::from_value(json!({
            "id": "7",
            "question": "¿Capital de Francia?",
            "correct_answer": "París",
            "type": "multiple_choice",
            "points": "10",
            "options": [
                { "text": "Roma", "is_correct": 0 },
                { "text": "París", "is_correct": "1" }
            ]
        }))
        .unwrap();

        assert_eq!(ex.id, 7);
        assert_eq!(ex.points, 10);
        match ex.kind {
            ExerciseKind::MultipleChoice { options } => {
                assert_eq!(options.len(), 2);
                assert!(!options[0].is_correct);
                assert!(options[1].is_correct);
            }
            other => panic!("tipo inesperado: {other:?}"),
        }
    }

    #[test]
    fn fill_in_blank_accepts_type_spellings() {
        for ty in ["fill_blank", "fill_in_blank", "FillInBlank", "fill-in-blank"] {
            let ex: Exercise = serde_json::from_value(json!({
                "id": 1, "question": "q", "correct_answer": "a", "type": ty
            }))
            .unwrap();
            assert_eq!(ex.kind, ExerciseKind::FillInBlank, "{ty}");
        }
    }

    #[test]
    fn unknown_exercise_type_is_rejected() {
        let res: Result<Exercise, _> = serde_json::from_value(json!({
            "id": 1, "question": "q", "correct_answer": "a", "type": "drag_and_drop"
        }));
        let err = res.unwrap_err().to_string();
        assert!(err.contains("drag_and_drop"));
    }

    #[test]
    fn multiple_choice_without_options_is_empty() {
        let ex: Exercise = serde_json::from_value(json!({
            "id": 3, "question": "q", "answer": "a", "type": "multiple_choice", "options": null
        }))
        .unwrap();
        assert_eq!(ex.correct_answer, "a");
        assert_eq!(ex.kind, ExerciseKind::MultipleChoice { options: vec![] });
    }

    #[test]
    fn completion_defaults_and_history_alias() {
        let c: LessonCompletion = serde_json::from_value(json!({
            "total_exercises": 3,
            "correct_count": "1",
            "next_lesson_id": null,
            "history": [
                { "exercise_id": "1", "is_correct": true, "answer": "x" },
                { "exercise_id": 2, "is_correct": "0" }
            ]
        }))
        .unwrap();
        assert_eq!(c.correct_exercises, 1);
        assert_eq!(c.total_points, 0);
        assert_eq!(c.next_lesson_id, None);
        assert_eq!(c.attempts.len(), 2);
        assert!(!c.attempts[1].is_correct);
        assert_eq!(c.attempts[1].answer, None);
    }

    #[test]
    fn bad_identifier_fails() {
        let res: Result<AttemptRecord, _> =
            serde_json::from_value(json!({ "exercise_id": "abc", "is_correct": true }));
        assert!(res.is_err());
    }
}
