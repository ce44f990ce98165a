// Client page table: which role may open which path, and where a visitor is
// sent when they may not.

pub mod handlers;

use serde::Serialize;

use crate::models::user::Role;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageEntry {
    pub path: &'static str,
    pub title: &'static str,
    /// `None` for public pages.
    pub role: Option<Role>,
    /// Listed in the role's navigation menu.
    #[serde(skip)]
    pub in_menu: bool,
}

const fn public(path: &'static str, title: &'static str) -> PageEntry {
    PageEntry {
        path,
        title,
        role: None,
        in_menu: false,
    }
}

const fn page(role: Role, path: &'static str, title: &'static str) -> PageEntry {
    PageEntry {
        path,
        title,
        role: Some(role),
        in_menu: true,
    }
}

const fn hidden(role: Role, path: &'static str, title: &'static str) -> PageEntry {
    PageEntry {
        path,
        title,
        role: Some(role),
        in_menu: false,
    }
}

pub const LOGIN_PATH: &str = "/login";

pub static PAGES: &[PageEntry] = &[
    public("/", "Home"),
    public(LOGIN_PATH, "Sign In"),
    public("/register", "Create Account"),
    page(Role::Student, "/app", "Dashboard"),
    page(Role::Student, "/app/resume", "Resume Builder"),
    page(Role::Student, "/app/jobs", "Job Board"),
    page(Role::Student, "/app/events", "Events"),
    page(Role::Student, "/app/appointments", "Appointments"),
    page(Role::Student, "/app/saved", "Saved Items"),
    page(Role::Student, "/app/profile", "Profile"),
    page(Role::Employer, "/app/employer", "Dashboard"),
    page(Role::Employer, "/app/employer/jobs", "Job Postings"),
    hidden(Role::Employer, "/app/employer/jobs/new", "Post a Job"),
    page(Role::Employer, "/app/employer/candidates", "Candidates"),
    page(Role::Employer, "/app/employer/events", "Events"),
    page(Role::Employer, "/app/employer/profile", "Company Profile"),
    page(Role::CareerCounselor, "/app/counselor", "Dashboard"),
    page(Role::CareerCounselor, "/app/counselor/students", "Students"),
    page(Role::CareerCounselor, "/app/counselor/consultations", "Consultations"),
    page(Role::CareerCounselor, "/app/counselor/events", "Events"),
    page(Role::CareerCounselor, "/app/counselor/courses", "Courses"),
    hidden(Role::CareerCounselor, "/app/counselor/courses/new", "Create Course"),
    page(Role::CareerCounselor, "/app/counselor/profile", "Profile"),
    page(Role::Admin, "/app/admin", "Dashboard"),
    page(Role::Admin, "/app/admin/users", "Users"),
    page(Role::Admin, "/app/admin/moderation", "Content Moderation"),
    page(Role::Admin, "/app/admin/events", "Events"),
    page(Role::Admin, "/app/admin/profile", "Profile"),
];

pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Student => "/app",
        Role::Employer => "/app/employer",
        Role::CareerCounselor => "/app/counselor",
        Role::Admin => "/app/admin",
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Render { page: PageEntry },
    Redirect { to: &'static str },
    NotFound { path: String },
}

fn normalize(path: &str) -> &str {
    let trimmed = path.split(['?', '#']).next().unwrap_or(path);
    match trimmed.trim_end_matches('/') {
        "" => "/",
        p => p,
    }
}

/// Decides what a visitor with `role` (or no session) sees at `path`.
pub fn resolve(path: &str, role: Option<Role>) -> Resolution {
    let path = normalize(path);
    let Some(entry) = PAGES.iter().find(|p| p.path == path) else {
        return Resolution::NotFound {
            path: path.to_string(),
        };
    };

    match (entry.role, role) {
        (None, _) => Resolution::Render { page: *entry },
        (Some(_), None) => Resolution::Redirect { to: LOGIN_PATH },
        (Some(required), Some(actual)) if required == actual => {
            Resolution::Render { page: *entry }
        }
        (Some(_), Some(actual)) => Resolution::Redirect {
            to: home_path(actual),
        },
    }
}

/// Navigation menu entries for `role`, in page-table order.
pub fn menu(role: Role) -> Vec<PageEntry> {
    PAGES
        .iter()
        .filter(|p| p.in_menu && p.role == Some(role))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_pages_render_for_anyone() {
        for role in [None, Some(Role::Admin)] {
            assert!(matches!(resolve("/login", role), Resolution::Render { .. }));
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            resolve("/nowhere", Some(Role::Student)),
            Resolution::NotFound {
                path: "/nowhere".into()
            }
        );
    }

    #[test]
    fn test_protected_page_without_session_redirects_to_login() {
        assert_eq!(
            resolve("/app/resume", None),
            Resolution::Redirect { to: "/login" }
        );
    }

    #[test]
    fn test_wrong_role_goes_home() {
        assert_eq!(
            resolve("/app/admin/users", Some(Role::Employer)),
            Resolution::Redirect { to: "/app/employer" }
        );
        assert_eq!(
            resolve("/app/employer/candidates", Some(Role::Student)),
            Resolution::Redirect { to: "/app" }
        );
    }

    #[test]
    fn test_trailing_slash_and_query_ignored() {
        match resolve("/app/jobs/?q=rust", Some(Role::Student)) {
            Resolution::Render { page } => assert_eq!(page.path, "/app/jobs"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_every_home_is_a_page_of_its_role() {
        for role in Role::ALL {
            match resolve(home_path(role), Some(role)) {
                Resolution::Render { page } => assert_eq!(page.role, Some(role)),
                other => panic!("{role:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_menu_excludes_hidden_pages() {
        let employer = menu(Role::Employer);
        assert_eq!(employer.len(), 5);
        assert!(employer.iter().all(|p| p.path != "/app/employer/jobs/new"));
        assert_eq!(menu(Role::Student).len(), 7);
    }
}
