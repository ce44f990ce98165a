//! Initial dataset. The service starts from the built-in mock data unless
//! `SEED_PATH` points at a JSON file with the same shape as `SeedData`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::appointment::{Consultation, ConsultationStatus, Counselor};
use crate::models::candidate::{Candidate, CandidateStatus, InterviewNote};
use crate::models::course::{Course, CourseModule, CourseStatus};
use crate::models::event::{Event, EventStatus, EventType, Registration};
use crate::models::job::{JobPosting, JobStatus, JobType};
use crate::models::moderation::{ContentItem, ContentKind, ModerationStatus};
use crate::models::resume::{
    Education, Experience, PersonalInfo, Project, Resume, Skill, SkillLevel,
};
use crate::models::user::{
    AdminProfile, CounselorProfile, EmployerProfile, RoleProfile, StudentProfile, StudentYear,
    User, UserStatus,
};

/// Stable ids of the built-in accounts and records, shared with tests.
pub mod ids {
    use uuid::Uuid;

    pub const STUDENT_ALEX: Uuid = Uuid::from_u128(0x1000_0000_0000_0000_0000_0000_0000_0001);
    pub const STUDENT_EMILY: Uuid = Uuid::from_u128(0x1000_0000_0000_0000_0000_0000_0000_0002);
    pub const STUDENT_MARCUS: Uuid = Uuid::from_u128(0x1000_0000_0000_0000_0000_0000_0000_0003);
    pub const STUDENT_PRIYA: Uuid = Uuid::from_u128(0x1000_0000_0000_0000_0000_0000_0000_0004);
    pub const STUDENT_JORDAN: Uuid = Uuid::from_u128(0x1000_0000_0000_0000_0000_0000_0000_0005);
    pub const EMPLOYER_JENNIFER: Uuid = Uuid::from_u128(0x2000_0000_0000_0000_0000_0000_0000_0001);
    pub const COUNSELOR_MICHAEL: Uuid = Uuid::from_u128(0x3000_0000_0000_0000_0000_0000_0000_0001);
    pub const ADMIN: Uuid = Uuid::from_u128(0x4000_0000_0000_0000_0000_0000_0000_0001);

    pub const RESUME_ALEX: Uuid = Uuid::from_u128(0x5000_0000_0000_0000_0000_0000_0000_0001);

    pub const JOB_SWE_INTERN: Uuid = Uuid::from_u128(0x6000_0000_0000_0000_0000_0000_0000_0001);
    pub const JOB_FRONTEND: Uuid = Uuid::from_u128(0x6000_0000_0000_0000_0000_0000_0000_0002);
    pub const JOB_DATA_ANALYST: Uuid = Uuid::from_u128(0x6000_0000_0000_0000_0000_0000_0000_0003);
    pub const JOB_PM_INTERN: Uuid = Uuid::from_u128(0x6000_0000_0000_0000_0000_0000_0000_0004);
    pub const JOB_DEVOPS: Uuid = Uuid::from_u128(0x6000_0000_0000_0000_0000_0000_0000_0005);

    pub const EVENT_CAREER_FAIR: Uuid = Uuid::from_u128(0x7000_0000_0000_0000_0000_0000_0000_0001);
    pub const EVENT_RESUME_WORKSHOP: Uuid =
        Uuid::from_u128(0x7000_0000_0000_0000_0000_0000_0000_0002);
    pub const EVENT_TECH_WEBINAR: Uuid = Uuid::from_u128(0x7000_0000_0000_0000_0000_0000_0000_0003);
    pub const EVENT_NETWORKING: Uuid = Uuid::from_u128(0x7000_0000_0000_0000_0000_0000_0000_0004);
}

/// Password shared by every built-in account.
pub const MOCK_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub resumes: Vec<Resume>,
    pub jobs: Vec<JobPosting>,
    pub candidates: Vec<Candidate>,
    pub events: Vec<Event>,
    pub registrations: Vec<Registration>,
    pub counselors: Vec<Counselor>,
    pub consultations: Vec<Consultation>,
    pub courses: Vec<Course>,
    pub content: Vec<ContentItem>,
}

impl SeedData {
    /// Loads `path` when given, otherwise the built-in mock dataset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read seed file {}", path.display()))?;
                let seed: SeedData = serde_json::from_str(&raw)
                    .with_context(|| format!("Seed file {} is not valid JSON", path.display()))?;
                info!(
                    "Loaded seed file {} ({} users, {} jobs, {} events)",
                    path.display(),
                    seed.users.len(),
                    seed.jobs.len(),
                    seed.events.len()
                );
                Ok(seed)
            }
            None => {
                info!("Using built-in mock dataset");
                Ok(Self::mock())
            }
        }
    }

    pub fn mock() -> Self {
        SeedData {
            users: mock_users(),
            resumes: mock_resumes(),
            jobs: mock_jobs(),
            candidates: mock_candidates(),
            events: mock_events(),
            registrations: mock_registrations(),
            counselors: mock_counselors(),
            consultations: mock_consultations(),
            courses: mock_courses(),
            content: mock_content(),
        }
    }
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn user(id: Uuid, name: &str, email: &str, profile: RoleProfile, created: DateTime<Utc>) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password: MOCK_PASSWORD.to_string(),
        status: UserStatus::Active,
        avatar_url: None,
        phone: None,
        bio: None,
        profile,
        created_at: created,
        last_login: None,
    }
}

fn student(
    university: &str,
    major: &str,
    graduation_year: i32,
    year: StudentYear,
    gpa: f64,
    interests: &[&str],
) -> RoleProfile {
    RoleProfile::Student(StudentProfile {
        university: university.to_string(),
        major: major.to_string(),
        graduation_year,
        year,
        gpa: Some(gpa),
        career_interests: strings(interests),
    })
}

fn mock_users() -> Vec<User> {
    let mut jordan = user(
        ids::STUDENT_JORDAN,
        "Jordan Kim",
        "jordan.kim@university.edu",
        student(
            "State University",
            "Psychology",
            2026,
            StudentYear::Sophomore,
            2.9,
            &["Human Resources"],
        ),
        at(2024, 1, 20, 10),
    );
    jordan.status = UserStatus::Suspended;

    vec![
        user(
            ids::STUDENT_ALEX,
            "Alex Johnson",
            "alex.johnson@university.edu",
            student(
                "State University",
                "Computer Science",
                2025,
                StudentYear::Senior,
                3.7,
                &["Software Engineering", "Machine Learning"],
            ),
            at(2023, 9, 1, 9),
        ),
        user(
            ids::STUDENT_EMILY,
            "Emily Davis",
            "emily.davis@university.edu",
            student(
                "State University",
                "Business Administration",
                2026,
                StudentYear::Junior,
                3.5,
                &["Consulting", "Marketing"],
            ),
            at(2023, 9, 3, 14),
        ),
        user(
            ids::STUDENT_MARCUS,
            "Marcus Lee",
            "marcus.lee@university.edu",
            student(
                "State University",
                "Mechanical Engineering",
                2027,
                StudentYear::Sophomore,
                3.2,
                &["Automotive", "Robotics"],
            ),
            at(2024, 2, 11, 11),
        ),
        user(
            ids::STUDENT_PRIYA,
            "Priya Patel",
            "priya.patel@university.edu",
            student(
                "State University",
                "Computer Science",
                2025,
                StudentYear::Graduate,
                3.9,
                &["Data Science", "Research"],
            ),
            at(2023, 8, 28, 16),
        ),
        jordan,
        user(
            ids::EMPLOYER_JENNIFER,
            "Jennifer Smith",
            "jennifer.smith@techcorp.com",
            RoleProfile::Employer(EmployerProfile {
                company: "TechCorp Inc.".to_string(),
                industry: "Technology".to_string(),
                company_size: Some("1000-5000".to_string()),
            }),
            at(2023, 7, 15, 10),
        ),
        user(
            ids::COUNSELOR_MICHAEL,
            "Dr. Michael Rodriguez",
            "m.rodriguez@university.edu",
            RoleProfile::CareerCounselor(CounselorProfile {
                department: "Career Services".to_string(),
                specialization: "Technology & Engineering Careers".to_string(),
            }),
            at(2022, 6, 1, 9),
        ),
        user(
            ids::ADMIN,
            "Admin User",
            "admin@careerhub.edu",
            RoleProfile::Admin(AdminProfile {
                permissions_level: "super".to_string(),
            }),
            at(2022, 1, 1, 9),
        ),
    ]
}

fn mock_resumes() -> Vec<Resume> {
    vec![Resume {
        id: ids::RESUME_ALEX,
        user_id: ids::STUDENT_ALEX,
        title: "Software Engineering Resume".to_string(),
        template: "modern".to_string(),
        personal_info: PersonalInfo {
            full_name: "Alex Johnson".to_string(),
            email: "alex.johnson@university.edu".to_string(),
            phone: "(555) 123-4567".to_string(),
            location: "Boston, MA".to_string(),
            website: "alexjohnson.dev".to_string(),
            linkedin: "linkedin.com/in/alexjohnson".to_string(),
            summary: "Computer science senior focused on backend systems.".to_string(),
        },
        education: vec![Education {
            id: Uuid::from_u128(0x5100_0000_0000_0000_0000_0000_0000_0001),
            institution: "State University".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2021-09".to_string(),
            end_date: "2025-05".to_string(),
            gpa: Some("3.7".to_string()),
            description: "Dean's List, ACM chapter treasurer".to_string(),
        }],
        experience: vec![Experience {
            id: Uuid::from_u128(0x5200_0000_0000_0000_0000_0000_0000_0001),
            company: "Campus IT".to_string(),
            position: "Student Developer".to_string(),
            location: "Boston, MA".to_string(),
            start_date: "2023-01".to_string(),
            end_date: String::new(),
            current: true,
            description: "Maintain the course registration portal.".to_string(),
        }],
        skills: vec![
            Skill {
                id: Uuid::from_u128(0x5300_0000_0000_0000_0000_0000_0000_0001),
                name: "Rust".to_string(),
                level: SkillLevel::Intermediate,
            },
            Skill {
                id: Uuid::from_u128(0x5300_0000_0000_0000_0000_0000_0000_0002),
                name: "TypeScript".to_string(),
                level: SkillLevel::Advanced,
            },
        ],
        projects: vec![Project {
            id: Uuid::from_u128(0x5400_0000_0000_0000_0000_0000_0000_0001),
            name: "Study Group Finder".to_string(),
            description: "Matches classmates into study groups by schedule.".to_string(),
            technologies: strings(&["Rust", "PostgreSQL"]),
            link: Some("github.com/alexj/study-groups".to_string()),
        }],
        created_at: at(2024, 9, 10, 12),
        updated_at: at(2024, 10, 2, 18),
    }]
}

#[allow(clippy::too_many_arguments)]
fn job(
    id: Uuid,
    title: &str,
    location: &str,
    job_type: JobType,
    salary: &str,
    status: JobStatus,
    applications: u32,
    views: u32,
    posted_at: DateTime<Utc>,
    requirements: &[&str],
) -> JobPosting {
    JobPosting {
        id,
        employer_id: ids::EMPLOYER_JENNIFER,
        title: title.to_string(),
        company: "TechCorp Inc.".to_string(),
        location: location.to_string(),
        job_type,
        salary_range: Some(salary.to_string()),
        description: format!("Join TechCorp as a {title}."),
        requirements: strings(requirements),
        status,
        applications,
        views,
        posted_at,
        deadline: Some(day(2025, 7, 31)),
    }
}

fn mock_jobs() -> Vec<JobPosting> {
    vec![
        job(
            ids::JOB_SWE_INTERN,
            "Software Engineer Intern",
            "San Francisco, CA",
            JobType::Internship,
            "$35-45/hour",
            JobStatus::Active,
            45,
            320,
            at(2025, 5, 1, 9),
            &["Data structures", "One of Rust, Java or Python"],
        ),
        job(
            ids::JOB_FRONTEND,
            "Frontend Developer",
            "Remote",
            JobType::FullTime,
            "$95,000-115,000",
            JobStatus::Active,
            28,
            210,
            at(2025, 5, 12, 10),
            &["React", "TypeScript", "Accessibility"],
        ),
        job(
            ids::JOB_DATA_ANALYST,
            "Data Analyst",
            "New York, NY",
            JobType::FullTime,
            "$80,000-95,000",
            JobStatus::Draft,
            0,
            0,
            at(2025, 6, 2, 15),
            &["SQL", "Statistics"],
        ),
        job(
            ids::JOB_PM_INTERN,
            "Product Manager Intern",
            "Seattle, WA",
            JobType::Internship,
            "$30-40/hour",
            JobStatus::Closed,
            62,
            540,
            at(2025, 3, 3, 9),
            &["Communication", "User research"],
        ),
        job(
            ids::JOB_DEVOPS,
            "DevOps Engineer",
            "Austin, TX",
            JobType::Contract,
            "$60-75/hour",
            JobStatus::Paused,
            9,
            88,
            at(2025, 4, 20, 13),
            &["Kubernetes", "Terraform"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn candidate(
    n: u128,
    job_id: Uuid,
    name: &str,
    major: &str,
    gpa: f64,
    status: CandidateStatus,
    rating: Option<u8>,
    applied_at: DateTime<Utc>,
    skills: &[&str],
) -> Candidate {
    let email = format!("{}@university.edu", name.to_lowercase().replace(' ', "."));
    Candidate {
        id: Uuid::from_u128(0x8000_0000_0000_0000_0000_0000_0000_0000 + n),
        job_id,
        name: name.to_string(),
        email,
        university: "State University".to_string(),
        major: major.to_string(),
        gpa: Some(gpa),
        skills: strings(skills),
        status,
        rating,
        notes: Vec::new(),
        applied_at,
    }
}

fn mock_candidates() -> Vec<Candidate> {
    let mut sarah = candidate(
        1,
        ids::JOB_SWE_INTERN,
        "Sarah Wilson",
        "Computer Science",
        3.8,
        CandidateStatus::Interview,
        Some(5),
        at(2025, 5, 3, 10),
        &["Python", "Rust", "SQL"],
    );
    sarah.notes.push(InterviewNote {
        id: Uuid::from_u128(0x8100_0000_0000_0000_0000_0000_0000_0001),
        author: "Jennifer Smith".to_string(),
        body: "Strong systems design answer, follow up on team fit.".to_string(),
        created_at: at(2025, 5, 10, 15),
    });

    vec![
        sarah,
        candidate(
            2,
            ids::JOB_SWE_INTERN,
            "Michael Brown",
            "Software Engineering",
            3.4,
            CandidateStatus::Applied,
            None,
            at(2025, 5, 4, 9),
            &["Java", "Spring"],
        ),
        candidate(
            3,
            ids::JOB_SWE_INTERN,
            "Emma Garcia",
            "Computer Engineering",
            3.6,
            CandidateStatus::Review,
            Some(4),
            at(2025, 5, 5, 11),
            &["C++", "Embedded"],
        ),
        candidate(
            4,
            ids::JOB_FRONTEND,
            "David Kim",
            "Information Systems",
            3.2,
            CandidateStatus::Offer,
            Some(4),
            at(2025, 5, 14, 16),
            &["React", "TypeScript"],
        ),
        candidate(
            5,
            ids::JOB_FRONTEND,
            "Olivia Martinez",
            "Graphic Design",
            3.9,
            CandidateStatus::Rejected,
            Some(2),
            at(2025, 5, 15, 8),
            &["Figma", "CSS"],
        ),
        candidate(
            6,
            ids::JOB_DEVOPS,
            "Ethan Nguyen",
            "Computer Science",
            3.5,
            CandidateStatus::Hired,
            Some(5),
            at(2025, 4, 22, 12),
            &["Kubernetes", "Go"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: Uuid,
    organizer_id: Uuid,
    title: &str,
    event_type: EventType,
    location: &str,
    is_virtual: bool,
    starts_at: DateTime<Utc>,
    hours: i64,
    capacity: u32,
    registered: u32,
    status: EventStatus,
) -> Event {
    Event {
        id,
        organizer_id,
        title: title.to_string(),
        description: format!("{title} hosted by Career Services."),
        event_type,
        location: location.to_string(),
        is_virtual,
        starts_at,
        ends_at: starts_at + chrono::Duration::hours(hours),
        capacity,
        registered,
        status,
    }
}

fn mock_events() -> Vec<Event> {
    vec![
        event(
            ids::EVENT_CAREER_FAIR,
            ids::COUNSELOR_MICHAEL,
            "Fall Career Fair",
            EventType::CareerFair,
            "Student Union Ballroom",
            false,
            at(2025, 9, 18, 10),
            6,
            500,
            2,
            EventStatus::Upcoming,
        ),
        event(
            ids::EVENT_RESUME_WORKSHOP,
            ids::COUNSELOR_MICHAEL,
            "Resume Writing Workshop",
            EventType::Workshop,
            "Library Room 204",
            false,
            at(2025, 7, 8, 14),
            2,
            30,
            1,
            EventStatus::Upcoming,
        ),
        event(
            ids::EVENT_TECH_WEBINAR,
            ids::EMPLOYER_JENNIFER,
            "Life at TechCorp",
            EventType::Webinar,
            "Online",
            true,
            at(2025, 5, 20, 17),
            1,
            200,
            143,
            EventStatus::Completed,
        ),
        event(
            ids::EVENT_NETWORKING,
            ids::COUNSELOR_MICHAEL,
            "Alumni Networking Night",
            EventType::Networking,
            "Faculty Club",
            false,
            at(2025, 6, 12, 18),
            3,
            80,
            0,
            EventStatus::Cancelled,
        ),
    ]
}

fn registration(n: u128, event_id: Uuid, student_id: Uuid, name: &str, email: &str) -> Registration {
    Registration {
        id: Uuid::from_u128(0x7100_0000_0000_0000_0000_0000_0000_0000 + n),
        event_id,
        student_id,
        student_name: name.to_string(),
        email: email.to_string(),
        registered_at: at(2025, 6, 1, 9),
        attended: false,
    }
}

fn mock_registrations() -> Vec<Registration> {
    vec![
        registration(
            1,
            ids::EVENT_CAREER_FAIR,
            ids::STUDENT_ALEX,
            "Alex Johnson",
            "alex.johnson@university.edu",
        ),
        registration(
            2,
            ids::EVENT_CAREER_FAIR,
            ids::STUDENT_EMILY,
            "Emily Davis",
            "emily.davis@university.edu",
        ),
        registration(
            3,
            ids::EVENT_RESUME_WORKSHOP,
            ids::STUDENT_MARCUS,
            "Marcus Lee",
            "marcus.lee@university.edu",
        ),
    ]
}

fn availability(days: &[(NaiveDate, &[&str])]) -> BTreeMap<NaiveDate, Vec<String>> {
    days.iter().map(|(d, slots)| (*d, strings(slots))).collect()
}

fn mock_counselors() -> Vec<Counselor> {
    vec![
        Counselor {
            id: "1".to_string(),
            name: "Dr. Michael Rodriguez".to_string(),
            title: "Senior Career Counselor".to_string(),
            specialization: "Technology & Engineering Careers".to_string(),
            availability: availability(&[
                (day(2025, 6, 25), &["9:00 AM", "10:30 AM", "2:00 PM"]),
                (day(2025, 6, 27), &["10:00 AM", "11:30 AM", "2:00 PM", "3:30 PM"]),
                (day(2025, 6, 30), &["9:30 AM", "1:00 PM"]),
            ]),
        },
        Counselor {
            id: "2".to_string(),
            name: "Sarah Thompson".to_string(),
            title: "Career Counselor".to_string(),
            specialization: "Business & Finance".to_string(),
            availability: availability(&[
                (day(2025, 6, 26), &["11:00 AM", "1:30 PM"]),
                (day(2025, 6, 28), &["9:00 AM", "10:00 AM", "4:00 PM"]),
            ]),
        },
        Counselor {
            id: "3".to_string(),
            name: "James Wilson".to_string(),
            title: "Graduate School Advisor".to_string(),
            specialization: "Graduate & Professional School Admissions".to_string(),
            availability: availability(&[(day(2025, 7, 1), &["10:00 AM", "2:30 PM"])]),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn consultation(
    n: u128,
    student_id: Uuid,
    student_name: &str,
    date: NaiveDate,
    time: &str,
    topic: &str,
    status: ConsultationStatus,
    notes: &str,
) -> Consultation {
    Consultation {
        id: Uuid::from_u128(0x9000_0000_0000_0000_0000_0000_0000_0000 + n),
        student_id,
        student_name: student_name.to_string(),
        counselor_id: "1".to_string(),
        counselor_name: "Dr. Michael Rodriguez".to_string(),
        date,
        time: time.to_string(),
        topic: topic.to_string(),
        status,
        notes: notes.to_string(),
    }
}

fn mock_consultations() -> Vec<Consultation> {
    vec![
        consultation(
            1,
            ids::STUDENT_ALEX,
            "Alex Johnson",
            day(2025, 6, 25),
            "10:30 AM",
            "Resume Review",
            ConsultationStatus::Scheduled,
            "",
        ),
        consultation(
            2,
            ids::STUDENT_EMILY,
            "Emily Davis",
            day(2025, 6, 27),
            "11:30 AM",
            "Internship Search Strategy",
            ConsultationStatus::Scheduled,
            "",
        ),
        consultation(
            3,
            ids::STUDENT_ALEX,
            "Alex Johnson",
            day(2025, 5, 14),
            "2:00 PM",
            "Mock Interview",
            ConsultationStatus::Completed,
            "Practice STAR answers for behavioral questions.",
        ),
        consultation(
            4,
            ids::STUDENT_MARCUS,
            "Marcus Lee",
            day(2025, 5, 20),
            "9:00 AM",
            "Career Exploration",
            ConsultationStatus::NoShow,
            "",
        ),
    ]
}

fn module(n: u128, title: &str, minutes: u32) -> CourseModule {
    CourseModule {
        id: Uuid::from_u128(0xA100_0000_0000_0000_0000_0000_0000_0000 + n),
        title: title.to_string(),
        duration_minutes: minutes,
    }
}

fn mock_courses() -> Vec<Course> {
    vec![
        Course {
            id: Uuid::from_u128(0xA000_0000_0000_0000_0000_0000_0000_0001),
            instructor_id: ids::COUNSELOR_MICHAEL,
            title: "Interview Fundamentals".to_string(),
            description: "Prepare for behavioral and technical interviews.".to_string(),
            category: "interviewing".to_string(),
            status: CourseStatus::Published,
            modules: vec![
                module(1, "Researching the Company", 30),
                module(2, "The STAR Method", 45),
                module(3, "Technical Screens", 60),
            ],
            created_at: at(2025, 1, 10, 9),
            updated_at: at(2025, 2, 1, 9),
        },
        Course {
            id: Uuid::from_u128(0xA000_0000_0000_0000_0000_0000_0000_0002),
            instructor_id: ids::COUNSELOR_MICHAEL,
            title: "Salary Negotiation".to_string(),
            description: "Evaluate and negotiate offers with confidence.".to_string(),
            category: "offers".to_string(),
            status: CourseStatus::Draft,
            modules: vec![module(4, "Know Your Market Rate", 25)],
            created_at: at(2025, 4, 2, 9),
            updated_at: at(2025, 4, 2, 9),
        },
    ]
}

fn content(
    n: u128,
    kind: ContentKind,
    title: &str,
    author: &str,
    excerpt: &str,
    reason: Option<&str>,
    status: ModerationStatus,
) -> ContentItem {
    ContentItem {
        id: Uuid::from_u128(0xB000_0000_0000_0000_0000_0000_0000_0000 + n),
        kind,
        title: title.to_string(),
        author: author.to_string(),
        excerpt: excerpt.to_string(),
        report_reason: reason.map(str::to_string),
        reported_at: at(2025, 6, (n as u32).clamp(1, 28), 12),
        status,
        reviewed_by: None,
        reviewed_at: None,
    }
}

fn mock_content() -> Vec<ContentItem> {
    vec![
        content(
            1,
            ContentKind::JobPosting,
            "Earn $5000/week from home",
            "QuickCash LLC",
            "No experience needed, pay a small registration fee to start.",
            Some("Suspected scam"),
            ModerationStatus::Pending,
        ),
        content(
            2,
            ContentKind::Review,
            "Review of TechCorp internship",
            "Anonymous",
            "Great mentorship but long hours during launches.",
            None,
            ModerationStatus::Approved,
        ),
        content(
            3,
            ContentKind::Comment,
            "Comment on Fall Career Fair",
            "Jordan Kim",
            "This event is a waste of time, organizers are clueless.",
            Some("Harassment"),
            ModerationStatus::Flagged,
        ),
        content(
            4,
            ContentKind::Profile,
            "Employer profile: Acme Staffing",
            "Acme Staffing",
            "We place graduates in roles across the country.",
            Some("Unverified company"),
            ModerationStatus::Pending,
        ),
    ]
}
