// Job postings: the employer's post/edit form and the student job board.

pub mod handlers;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::editor::merge;
use crate::errors::AppError;
use crate::models::job::{JobPosting, JobStatus, JobType};
use crate::models::user::{RoleProfile, User};

#[derive(Debug, Deserialize)]
pub struct JobForm {
    pub title: String,
    /// Defaults to the employer's company.
    pub company: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub salary_range: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub status: Option<JobStatus>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub status: Option<JobStatus>,
    pub deadline: Option<NaiveDate>,
}

fn require_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(())
}

/// Builds a new posting owned by `employer`. New postings start as drafts
/// unless the form says otherwise.
pub fn new_posting(employer: &User, form: JobForm) -> Result<JobPosting, AppError> {
    require_title(&form.title)?;

    let company = match (form.company, &employer.profile) {
        (Some(company), _) => company,
        (None, RoleProfile::Employer(profile)) => profile.company.clone(),
        (None, _) => {
            return Err(AppError::Validation(
                "company is required when posting as a non-employer".to_string(),
            ))
        }
    };

    Ok(JobPosting {
        id: Uuid::new_v4(),
        employer_id: employer.id,
        title: form.title.trim().to_string(),
        company,
        location: form.location,
        job_type: form.job_type,
        salary_range: form.salary_range,
        description: form.description,
        requirements: clean_requirements(form.requirements),
        status: form.status.unwrap_or(JobStatus::Draft),
        applications: 0,
        views: 0,
        posted_at: Utc::now(),
        deadline: form.deadline,
    })
}

pub fn apply_patch(job: &mut JobPosting, patch: JobPatch) -> Result<(), AppError> {
    if let Some(title) = &patch.title {
        require_title(title)?;
    }
    merge(&mut job.title, patch.title.map(|t| t.trim().to_string()));
    merge(&mut job.company, patch.company);
    merge(&mut job.location, patch.location);
    merge(&mut job.job_type, patch.job_type);
    merge(&mut job.salary_range, patch.salary_range.map(Some));
    merge(&mut job.description, patch.description);
    merge(&mut job.requirements, patch.requirements.map(clean_requirements));
    merge(&mut job.status, patch.status);
    merge(&mut job.deadline, patch.deadline.map(Some));
    Ok(())
}

/// Copy of `job` as a fresh draft with zeroed counters.
pub fn duplicate(job: &JobPosting) -> JobPosting {
    JobPosting {
        id: Uuid::new_v4(),
        title: format!("{} (Copy)", job.title),
        status: JobStatus::Draft,
        applications: 0,
        views: 0,
        posted_at: Utc::now(),
        ..job.clone()
    }
}

fn clean_requirements(requirements: Vec<String>) -> Vec<String> {
    requirements
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::{ids, SeedData};

    fn seeded_user(id: Uuid) -> User {
        SeedData::mock().users.into_iter().find(|u| u.id == id).unwrap()
    }

    fn form(title: &str) -> JobForm {
        JobForm {
            title: title.to_string(),
            company: None,
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary_range: None,
            description: "Build things".to_string(),
            requirements: vec!["  Rust ".to_string(), "".to_string()],
            status: None,
            deadline: None,
        }
    }

    #[test]
    fn test_new_posting_defaults() {
        let employer = seeded_user(ids::EMPLOYER_JENNIFER);
        let job = new_posting(&employer, form("Backend Engineer")).unwrap();
        assert_eq!(job.company, "TechCorp Inc.");
        assert_eq!(job.status, JobStatus::Draft);
        assert_eq!(job.requirements, vec!["Rust"]);
        assert_eq!(job.employer_id, ids::EMPLOYER_JENNIFER);
    }

    #[test]
    fn test_new_posting_requires_title() {
        let employer = seeded_user(ids::EMPLOYER_JENNIFER);
        assert!(matches!(
            new_posting(&employer, form("   ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_non_employer_needs_company() {
        let admin = seeded_user(ids::ADMIN);
        assert!(new_posting(&admin, form("Ops")).is_err());

        let mut with_company = form("Ops");
        with_company.company = Some("University".to_string());
        assert_eq!(new_posting(&admin, with_company).unwrap().company, "University");
    }

    #[test]
    fn test_patch_is_shallow() {
        let mut job = SeedData::mock().jobs.remove(0);
        let original_location = job.location.clone();
        apply_patch(
            &mut job,
            JobPatch {
                status: Some(JobStatus::Paused),
                salary_range: Some("$50/hour".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(job.status, JobStatus::Paused);
        assert_eq!(job.salary_range.as_deref(), Some("$50/hour"));
        assert_eq!(job.location, original_location);
    }

    #[test]
    fn test_duplicate_resets_counters() {
        let job = SeedData::mock().jobs.remove(0);
        let copy = duplicate(&job);
        assert_ne!(copy.id, job.id);
        assert_eq!(copy.title, "Software Engineer Intern (Copy)");
        assert_eq!(copy.status, JobStatus::Draft);
        assert_eq!(copy.applications, 0);
        assert_eq!(copy.requirements, job.requirements);
    }
}
