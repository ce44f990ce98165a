//! User-profile provider: the caller reads and shallow-merges their own profile.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::editor::merge;
use crate::errors::AppError;
use crate::models::user::{RoleProfile, StudentYear, User};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPatch {
    pub university: Option<String>,
    pub major: Option<String>,
    pub graduation_year: Option<i32>,
    pub year: Option<StudentYear>,
    pub gpa: Option<f64>,
    pub career_interests: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployerPatch {
    pub company: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CounselorPatch {
    pub department: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RolePatch {
    Student(StudentPatch),
    Employer(EmployerPatch),
    CareerCounselor(CounselorPatch),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub profile: Option<RolePatch>,
}

/// Applies `update` to `user`. Fields absent from the patch are untouched;
/// a role patch must match the user's own role.
pub fn apply_update(user: &mut User, update: ProfileUpdate) -> Result<(), AppError> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
    }

    match (update.profile, &mut user.profile) {
        (None, _) => {}
        (Some(RolePatch::Student(p)), RoleProfile::Student(s)) => {
            if let Some(gpa) = p.gpa {
                if !(0.0..=4.0).contains(&gpa) {
                    return Err(AppError::Validation(format!(
                        "gpa must be between 0.0 and 4.0, got {gpa}"
                    )));
                }
            }
            merge(&mut s.university, p.university);
            merge(&mut s.major, p.major);
            merge(&mut s.graduation_year, p.graduation_year);
            merge(&mut s.year, p.year);
            merge(&mut s.gpa, p.gpa.map(Some));
            merge(&mut s.career_interests, p.career_interests);
        }
        (Some(RolePatch::Employer(p)), RoleProfile::Employer(e)) => {
            merge(&mut e.company, p.company);
            merge(&mut e.industry, p.industry);
            merge(&mut e.company_size, p.company_size.map(Some));
        }
        (Some(RolePatch::CareerCounselor(p)), RoleProfile::CareerCounselor(c)) => {
            merge(&mut c.department, p.department);
            merge(&mut c.specialization, p.specialization);
        }
        (Some(_), profile) => {
            return Err(AppError::Validation(format!(
                "profile patch does not match role '{}'",
                profile.role().as_str()
            )));
        }
    }

    merge(&mut user.name, update.name.map(|n| n.trim().to_string()));
    merge(&mut user.phone, update.phone.map(Some));
    merge(&mut user.bio, update.bio.map(Some));
    merge(&mut user.avatar_url, update.avatar_url.map(Some));
    Ok(())
}

/// GET /api/v1/profile
pub async fn handle_get_profile(caller: CurrentUser) -> Json<User> {
    Json(caller.user)
}

/// PATCH /api/v1/profile
///
/// Merged into the stored record, not the snapshot the session resolved, so
/// an admin status change made in between survives.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>, AppError> {
    let user_id = caller.user.id;
    let user = state
        .users
        .try_modify(user_id, &|u: &mut User| apply_update(u, update.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    info!("Updated profile of user {}", user.id);
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::{ids, SeedData};

    fn seeded(id: uuid::Uuid) -> User {
        SeedData::mock()
            .users
            .into_iter()
            .find(|u| u.id == id)
            .unwrap()
    }

    #[test]
    fn test_shallow_merge_keeps_absent_fields() {
        let mut alex = seeded(ids::STUDENT_ALEX);
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({
            "bio": "Looking for backend roles",
            "profile": { "role": "student", "major": "Software Engineering" }
        }))
        .unwrap();

        apply_update(&mut alex, update).unwrap();

        assert_eq!(alex.name, "Alex Johnson");
        assert_eq!(alex.bio.as_deref(), Some("Looking for backend roles"));
        let student = alex.student().unwrap();
        assert_eq!(student.major, "Software Engineering");
        assert_eq!(student.university, "State University");
        assert_eq!(student.gpa, Some(3.7));
    }

    #[test]
    fn test_role_mismatch_rejected() {
        let mut alex = seeded(ids::STUDENT_ALEX);
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({
            "name": "Changed",
            "profile": { "role": "employer", "company": "Nope" }
        }))
        .unwrap();

        let err = apply_update(&mut alex, update).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(alex.name, "Alex Johnson");
    }

    #[test]
    fn test_gpa_out_of_range() {
        let mut alex = seeded(ids::STUDENT_ALEX);
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({
            "profile": { "role": "student", "gpa": 4.5 }
        }))
        .unwrap();
        assert!(apply_update(&mut alex, update).is_err());
    }

    #[tokio::test]
    async fn test_update_merges_into_stored_record() {
        use crate::config::Config;
        use crate::models::user::UserStatus;

        let state = AppState::from_seed(Config::default(), SeedData::mock());
        let snapshot = seeded(ids::STUDENT_ALEX);
        state
            .users
            .modify(ids::STUDENT_ALEX, &|u: &mut User| {
                u.status = UserStatus::Suspended
            })
            .await;

        let caller = CurrentUser {
            token: uuid::Uuid::new_v4(),
            user: snapshot.clone(),
        };
        let update = ProfileUpdate {
            bio: Some("Open to internships".into()),
            ..Default::default()
        };
        let Json(user) = handle_update_profile(State(state.clone()), caller, Json(update))
            .await
            .unwrap();
        assert_eq!(user.status, UserStatus::Suspended);
        assert_eq!(user.bio.as_deref(), Some("Open to internships"));

        state.users.remove(ids::STUDENT_ALEX).await;
        let caller = CurrentUser {
            token: uuid::Uuid::new_v4(),
            user: snapshot,
        };
        let err = handle_update_profile(State(state.clone()), caller, Json(ProfileUpdate::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(state.users.get(ids::STUDENT_ALEX).await.is_none());
    }
}
