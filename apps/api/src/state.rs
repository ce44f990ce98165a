use std::sync::Arc;

use crate::appointments::{AppointmentPickers, CounselorDirectory};
use crate::auth::SessionStore;
use crate::candidates::selection::CandidateSelections;
use crate::config::Config;
use crate::models::appointment::Consultation;
use crate::models::candidate::Candidate;
use crate::models::course::Course;
use crate::models::event::{Event, Registration};
use crate::models::job::JobPosting;
use crate::models::moderation::ContentItem;
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::resume::builder::ResumeBuilders;
use crate::saved::SavedItems;
use crate::store::seed::SeedData;
use crate::store::{InMemoryRepository, Repository};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn Repository<User>>,
    pub resumes: Arc<dyn Repository<Resume>>,
    pub jobs: Arc<dyn Repository<JobPosting>>,
    pub candidates: Arc<dyn Repository<Candidate>>,
    pub events: Arc<dyn Repository<Event>>,
    pub registrations: Arc<dyn Repository<Registration>>,
    pub consultations: Arc<dyn Repository<Consultation>>,
    pub courses: Arc<dyn Repository<Course>>,
    pub content: Arc<dyn Repository<ContentItem>>,
    /// Static counselor availability; never mutated by bookings.
    pub counselors: Arc<CounselorDirectory>,
    /// Per-student booking flow state.
    pub pickers: Arc<AppointmentPickers>,
    pub sessions: Arc<SessionStore>,
    pub saved: Arc<SavedItems>,
    /// Open resume drafts and their auto-save timers.
    pub builders: Arc<ResumeBuilders>,
    /// Per-employer candidate selection sets for bulk actions.
    pub selections: Arc<CandidateSelections>,
}

impl AppState {
    pub fn from_seed(config: Config, seed: SeedData) -> Self {
        let resumes: Arc<dyn Repository<Resume>> = Arc::new(InMemoryRepository::new(seed.resumes));
        let builders = Arc::new(ResumeBuilders::new(
            resumes.clone(),
            std::time::Duration::from_millis(config.autosave_delay_ms),
        ));

        AppState {
            users: Arc::new(InMemoryRepository::new(seed.users)),
            resumes,
            jobs: Arc::new(InMemoryRepository::new(seed.jobs)),
            candidates: Arc::new(InMemoryRepository::new(seed.candidates)),
            events: Arc::new(InMemoryRepository::new(seed.events)),
            registrations: Arc::new(InMemoryRepository::new(seed.registrations)),
            consultations: Arc::new(InMemoryRepository::new(seed.consultations)),
            courses: Arc::new(InMemoryRepository::new(seed.courses)),
            content: Arc::new(InMemoryRepository::new(seed.content)),
            counselors: Arc::new(CounselorDirectory::new(seed.counselors)),
            pickers: Arc::new(AppointmentPickers::default()),
            sessions: Arc::new(SessionStore::default()),
            saved: Arc::new(SavedItems::default()),
            builders,
            selections: Arc::new(CandidateSelections::default()),
            config,
        }
    }
}
