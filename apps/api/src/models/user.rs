use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listable, SortKey};
use crate::store::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Employer,
    CareerCounselor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Employer => "employer",
            Role::CareerCounselor => "career_counselor",
            Role::Admin => "admin",
        }
    }

    pub const ALL: [Role; 4] = [
        Role::Student,
        Role::Employer,
        Role::CareerCounselor,
        Role::Admin,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudentYear {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Graduate,
}

impl StudentYear {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentYear::Freshman => "freshman",
            StudentYear::Sophomore => "sophomore",
            StudentYear::Junior => "junior",
            StudentYear::Senior => "senior",
            StudentYear::Graduate => "graduate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentProfile {
    pub university: String,
    pub major: String,
    pub graduation_year: i32,
    pub year: StudentYear,
    pub gpa: Option<f64>,
    #[serde(default)]
    pub career_interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployerProfile {
    pub company: String,
    pub industry: String,
    pub company_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounselorProfile {
    pub department: String,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminProfile {
    pub permissions_level: String,
}

/// Role-specific user fields. The tag doubles as the user's role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleProfile {
    Student(StudentProfile),
    Employer(EmployerProfile),
    CareerCounselor(CounselorProfile),
    Admin(AdminProfile),
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Student(_) => Role::Student,
            RoleProfile::Employer(_) => Role::Employer,
            RoleProfile::CareerCounselor(_) => Role::CareerCounselor,
            RoleProfile::Admin(_) => Role::Admin,
        }
    }

    /// Blank profile for a freshly registered user of `role`.
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Student => RoleProfile::Student(StudentProfile {
                university: String::new(),
                major: String::new(),
                graduation_year: 0,
                year: StudentYear::Freshman,
                gpa: None,
                career_interests: Vec::new(),
            }),
            Role::Employer => RoleProfile::Employer(EmployerProfile {
                company: String::new(),
                industry: String::new(),
                company_size: None,
            }),
            Role::CareerCounselor => RoleProfile::CareerCounselor(CounselorProfile {
                department: String::new(),
                specialization: String::new(),
            }),
            Role::Admin => RoleProfile::Admin(AdminProfile {
                permissions_level: "standard".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Mock credential; never serialized back out.
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub status: UserStatus,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile: RoleProfile,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn student(&self) -> Option<&StudentProfile> {
        match &self.profile {
            RoleProfile::Student(p) => Some(p),
            _ => None,
        }
    }
}

impl Record for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for User {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        if let Some(student) = self.student() {
            fields.push(student.major.as_str());
            fields.push(student.university.as_str());
        }
        fields
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "role" => Some(self.role().as_str().to_string()),
            "status" => Some(self.status.as_str().to_string()),
            "major" => self.student().map(|s| s.major.clone()),
            "year" => self.student().map(|s| s.year.as_str().to_string()),
            "university" => self.student().map(|s| s.university.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::text(&self.name)),
            "email" => Some(SortKey::text(&self.email)),
            "created_at" => Some(SortKey::Time(self.created_at)),
            "last_login" => Some(SortKey::optional(self.last_login, SortKey::Time)),
            "gpa" => Some(SortKey::optional(
                self.student().and_then(|s| s.gpa),
                SortKey::number,
            )),
            "graduation_year" => Some(SortKey::optional(
                self.student().map(|s| s.graduation_year),
                SortKey::number,
            )),
            _ => None,
        }
    }
}

/// Public view of a user, safe to return from any endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role(),
            status: user.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_tag_is_role() {
        let profile = RoleProfile::empty(Role::CareerCounselor);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "career_counselor");
        assert_eq!(profile.role(), Role::CareerCounselor);
    }

    #[test]
    fn test_password_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Sam".into(),
            email: "sam@example.edu".into(),
            password: "hunter22".into(),
            status: UserStatus::Active,
            avatar_url: None,
            phone: None,
            bio: None,
            profile: RoleProfile::empty(Role::Student),
            created_at: Utc::now(),
            last_login: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hunter22"));
    }
}
