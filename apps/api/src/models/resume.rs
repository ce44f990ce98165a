use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::SubRecord;
use crate::listing::{Listable, SortKey};
use crate::store::Record;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Education {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

macro_rules! impl_sub_record {
    ($($ty:ty),*) => {
        $(impl SubRecord for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
            fn set_id(&mut self, id: Uuid) {
                self.id = id;
            }
        })*
    };
}

impl_sub_record!(Education, Experience, Skill, Project);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experience,
    Skills,
    Projects,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Projects => "projects",
        }
    }
}

/// One sub-record submitted to a resume section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SectionItem {
    Education(Education),
    Experience(Experience),
    Skills(Skill),
    Projects(Project),
}

impl SectionItem {
    pub fn section(&self) -> Section {
        match self {
            SectionItem::Education(_) => Section::Education,
            SectionItem::Experience(_) => Section::Experience,
            SectionItem::Skills(_) => Section::Skills,
            SectionItem::Projects(_) => Section::Projects,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_template() -> String {
    "modern".to_string()
}

impl Resume {
    pub fn blank(user_id: Uuid, title: String) -> Self {
        let now = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            user_id,
            title,
            template: default_template(),
            personal_info: PersonalInfo::default(),
            education: Vec::new(),
            experience: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Education => self.education.len(),
            Section::Experience => self.experience.len(),
            Section::Skills => self.skills.len(),
            Section::Projects => self.projects.len(),
        }
    }
}

impl Record for Resume {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Listable for Resume {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.personal_info.full_name.as_str()]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "template" => Some(self.template.clone()),
            "user_id" => Some(self.user_id.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "title" => Some(SortKey::text(&self.title)),
            "created_at" => Some(SortKey::Time(self.created_at)),
            "updated_at" => Some(SortKey::Time(self.updated_at)),
            _ => None,
        }
    }
}
