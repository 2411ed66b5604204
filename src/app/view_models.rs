use super::*;

impl LearnApp {
    pub fn course_infos(&self) -> Vec<CourseInfo> {
        self.courses
            .iter()
            .map(|c| CourseInfo {
                id: c.id,
                title: c.title.clone(),
                description: c.description.clone(),
                completed: c.completed_lessons,
                total: c.lesson_count,
            })
            .collect()
    }

    pub fn lesson_infos(&self) -> Vec<LessonInfo> {
        self.lessons
            .iter()
            .enumerate()
            .map(|(i, l)| LessonInfo {
                id: l.id,
                number: i + 1,
                title: l.title.clone(),
                completed: l.completed,
            })
            .collect()
    }

    /// Una fila por ejercicio de la lección abierta, en orden.
    pub fn exercise_rows(&self) -> Vec<ExerciseRow> {
        let Some(flow) = self.lesson.as_ref() else {
            return Vec::new();
        };
        let Some(lesson) = flow.lesson() else {
            return Vec::new();
        };
        let seq = flow.sequencer();
        lesson
            .exercises
            .iter()
            .enumerate()
            .map(|(idx, ex)| ExerciseRow {
                idx,
                number: idx + 1,
                done: seq.is_correct(ex.id),
                current: idx == seq.current_index(),
            })
            .collect()
    }
}
