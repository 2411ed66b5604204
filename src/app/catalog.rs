use super::*;
use crate::api::spawn;

impl LearnApp {
    pub fn fetch_courses(&mut self) {
        let Some(user_id) = self.user_id() else {
            self.state = AppState::Login;
            return;
        };
        self.catalog_error = None;
        let api = self.api.clone();
        self.pending.courses = Some(spawn(self.repaint.clone(), async move {
            api.get_courses(user_id).await
        }));
    }

    pub fn fetch_course_lessons(&mut self, course_id: CourseId) {
        let Some(user_id) = self.user_id() else {
            self.state = AppState::Login;
            return;
        };
        self.catalog_error = None;
        let api = self.api.clone();
        let pending = spawn(self.repaint.clone(), async move {
            api.get_course_lessons(course_id, user_id).await
        });
        self.pending.lessons = Some((course_id, pending));
    }

    pub fn current_course(&self) -> Option<&Course> {
        let id = self.current_course?;
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn is_loading_catalog(&self) -> bool {
        self.pending.courses.is_some() || self.pending.lessons.is_some()
    }

    pub(crate) fn apply_courses(&mut self, result: crate::error::Result<Vec<Course>>) {
        match result {
            Ok(courses) => {
                log::debug!("{} cursos recibidos", courses.len());
                self.courses = courses;
            }
            Err(err) => self.catalog_error = Some(err.to_string()),
        }
    }

    pub(crate) fn apply_course_lessons(
        &mut self,
        course_id: CourseId,
        result: crate::error::Result<Vec<LessonSummary>>,
    ) {
        if self.current_course != Some(course_id) {
            log::debug!("Lecciones del curso {course_id} descartadas");
            return;
        }
        match result {
            Ok(lessons) => self.lessons = lessons,
            Err(err) => self.catalog_error = Some(err.to_string()),
        }
    }
}
