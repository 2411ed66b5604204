// src/view_models.rs

use crate::model::{CourseId, LessonId};

#[derive(Clone, Debug)]
pub struct CourseInfo {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub completed: u32, // lecciones terminadas
    pub total: u32,
}

#[derive(Clone, Debug)]
pub struct LessonInfo {
    pub id: LessonId,
    pub number: usize, // posición "humana" dentro del curso
    pub title: String,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseRow {
    pub idx: usize,
    pub number: usize,
    pub done: bool,
    pub current: bool,
}

impl CourseInfo {
    pub fn is_completed(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }

    pub fn label(&self) -> String {
        if self.is_completed() {
            format!("{} ✅", self.title)
        } else if self.total > 0 {
            format!("{} 🔓 ({}/{})", self.title, self.completed, self.total)
        } else {
            format!("{} 🔓", self.title)
        }
    }
}

impl LessonInfo {
    pub fn label(&self) -> String {
        if self.completed {
            format!("Lección {}: {} ✅", self.number, self.title)
        } else {
            format!("Lección {}: {} 🔓", self.number, self.title)
        }
    }
}

impl ExerciseRow {
    pub fn label(&self) -> String {
        let mark = if self.done { "✅" } else { "⬜" };
        if self.current {
            format!("▶ {} {mark}", self.number)
        } else {
            format!("{} {mark}", self.number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_label_shows_progress() {
        let mut info = CourseInfo {
            id: 1,
            title: "Inglés A1".into(),
            description: String::new(),
            completed: 2,
            total: 5,
        };
        assert_eq!(info.label(), "Inglés A1 🔓 (2/5)");
        info.completed = 5;
        assert_eq!(info.label(), "Inglés A1 ✅");
        info.total = 0;
        info.completed = 0;
        assert_eq!(info.label(), "Inglés A1 🔓");
    }

    #[test]
    fn lesson_and_exercise_labels() {
        let lesson = LessonInfo {
            id: 9,
            number: 3,
            title: "Colores".into(),
            completed: true,
        };
        assert_eq!(lesson.label(), "Lección 3: Colores ✅");

        let row = ExerciseRow {
            idx: 0,
            number: 1,
            done: false,
            current: true,
        };
        assert_eq!(row.label(), "▶ 1 ⬜");
    }
}
