// Course creation editor: course metadata plus an ordered list of modules.

pub mod handlers;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::editor::{merge, remove_item};
use crate::errors::AppError;
use crate::models::course::{Course, CourseModule, CourseStatus};
use crate::models::user::User;

#[derive(Debug, Deserialize)]
pub struct CourseForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<CourseStatus>,
}

fn check_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(())
}

pub fn check_module(module: &CourseModule) -> Result<(), AppError> {
    check_title(&module.title)?;
    if module.duration_minutes == 0 {
        return Err(AppError::Validation(
            "module duration must be at least one minute".to_string(),
        ));
    }
    Ok(())
}

/// New courses start as drafts; every module gets a fresh id.
pub fn new_course(instructor: &User, form: CourseForm) -> Result<Course, AppError> {
    check_title(&form.title)?;
    let mut modules = Vec::with_capacity(form.modules.len());
    for mut module in form.modules {
        check_module(&module)?;
        module.id = Uuid::new_v4();
        modules.push(module);
    }

    let now = Utc::now();
    Ok(Course {
        id: Uuid::new_v4(),
        instructor_id: instructor.id,
        title: form.title.trim().to_string(),
        description: form.description,
        category: form.category,
        status: CourseStatus::Draft,
        modules,
        created_at: now,
        updated_at: now,
    })
}

pub fn apply_patch(course: &mut Course, patch: CoursePatch) -> Result<(), AppError> {
    if let Some(title) = &patch.title {
        check_title(title)?;
    }
    if patch.status == Some(CourseStatus::Published) && course.modules.is_empty() {
        return Err(AppError::Validation(
            "a course needs at least one module before publishing".to_string(),
        ));
    }

    merge(&mut course.title, patch.title.map(|t| t.trim().to_string()));
    merge(&mut course.description, patch.description);
    merge(&mut course.category, patch.category);
    merge(&mut course.status, patch.status);
    course.updated_at = Utc::now();
    Ok(())
}

/// Drops `module_id` from the course. A published course keeps at least one
/// module; unpublish it first to empty it.
pub fn remove_module(course: &mut Course, module_id: Uuid) -> Result<CourseModule, AppError> {
    let last_one = course.modules.len() == 1 && course.modules[0].id == module_id;
    if last_one && course.status == CourseStatus::Published {
        return Err(AppError::Validation(
            "a published course must keep at least one module".to_string(),
        ));
    }
    let removed = remove_item(&mut course.modules, module_id)?;
    course.updated_at = Utc::now();
    Ok(removed)
}
