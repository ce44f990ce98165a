//! Resume builder: edits land on a per-resume draft, `save` copies the draft
//! into the repository and stamps `updated_at`.
//!
//! With auto-save on, every edit (re)starts a timer; when it fires without a
//! newer edit in between, the draft is saved. A generation counter on the
//! draft invalidates superseded timers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::{self, merge};
use crate::errors::AppError;
use crate::models::resume::{Resume, Section, SectionItem};
use crate::store::Repository;

#[derive(Debug, Default, Deserialize)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub template: Option<String>,
    pub personal_info: Option<PersonalInfoPatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftView {
    pub resume: Resume,
    pub autosave: bool,
    /// True when the draft has edits not yet written to the repository.
    pub dirty: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
}

struct Draft {
    resume: Resume,
    autosave: bool,
    dirty: bool,
    generation: u64,
    last_saved_at: Option<DateTime<Utc>>,
}

impl Draft {
    fn view(&self) -> DraftView {
        DraftView {
            resume: self.resume.clone(),
            autosave: self.autosave,
            dirty: self.dirty,
            last_saved_at: self.last_saved_at,
        }
    }
}

pub struct ResumeBuilders {
    resumes: Arc<dyn Repository<Resume>>,
    autosave_delay: Duration,
    drafts: Mutex<HashMap<Uuid, Arc<Mutex<Draft>>>>,
}

impl ResumeBuilders {
    pub fn new(resumes: Arc<dyn Repository<Resume>>, autosave_delay: Duration) -> Self {
        Self {
            resumes,
            autosave_delay,
            drafts: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the open draft for `resume_id`, opening it from the repository if needed.
    async fn open(&self, resume_id: Uuid) -> Result<Arc<Mutex<Draft>>, AppError> {
        let mut drafts = self.drafts.lock().await;
        if let Some(draft) = drafts.get(&resume_id) {
            return Ok(draft.clone());
        }

        let resume = self
            .resumes
            .get(resume_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
        let last_saved_at = Some(resume.updated_at);
        let draft = Arc::new(Mutex::new(Draft {
            resume,
            autosave: false,
            dirty: false,
            generation: 0,
            last_saved_at,
        }));
        drafts.insert(resume_id, draft.clone());
        debug!("Opened draft for resume {resume_id}");
        Ok(draft)
    }

    pub async fn draft(&self, resume_id: Uuid) -> Result<DraftView, AppError> {
        let draft = self.open(resume_id).await?;
        let view = draft.lock().await.view();
        Ok(view)
    }

    /// Shallow-merges `patch` into the draft.
    pub async fn update(&self, resume_id: Uuid, patch: DraftPatch) -> Result<DraftView, AppError> {
        if matches!(&patch.title, Some(t) if t.trim().is_empty()) {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        self.edit(resume_id, move |resume| {
            merge(&mut resume.title, patch.title);
            merge(&mut resume.template, patch.template);
            if let Some(p) = patch.personal_info {
                let info = &mut resume.personal_info;
                merge(&mut info.full_name, p.full_name);
                merge(&mut info.email, p.email);
                merge(&mut info.phone, p.phone);
                merge(&mut info.location, p.location);
                merge(&mut info.website, p.website);
                merge(&mut info.linkedin, p.linkedin);
                merge(&mut info.summary, p.summary);
            }
            Ok(())
        })
        .await
    }

    /// Appends a sub-record to its section under a fresh id.
    pub async fn add_item(
        &self,
        resume_id: Uuid,
        item: SectionItem,
    ) -> Result<(Uuid, DraftView), AppError> {
        let section = item.section();
        let mut new_id = Uuid::nil();
        let view = self
            .edit(resume_id, |resume| {
                new_id = match item {
                    SectionItem::Education(e) => editor::add_item(&mut resume.education, e),
                    SectionItem::Experience(e) => editor::add_item(&mut resume.experience, e),
                    SectionItem::Skills(s) => editor::add_item(&mut resume.skills, s),
                    SectionItem::Projects(p) => editor::add_item(&mut resume.projects, p),
                };
                Ok(())
            })
            .await?;
        debug!("Added {} item {new_id} to resume {resume_id}", section.as_str());
        Ok((new_id, view))
    }

    /// Replaces the sub-record with `item_id` in the item's section.
    pub async fn replace_item(
        &self,
        resume_id: Uuid,
        item_id: Uuid,
        item: SectionItem,
    ) -> Result<DraftView, AppError> {
        self.edit(resume_id, move |resume| match item {
            SectionItem::Education(mut e) => {
                e.id = item_id;
                editor::replace_item(&mut resume.education, e)
            }
            SectionItem::Experience(mut e) => {
                e.id = item_id;
                editor::replace_item(&mut resume.experience, e)
            }
            SectionItem::Skills(mut s) => {
                s.id = item_id;
                editor::replace_item(&mut resume.skills, s)
            }
            SectionItem::Projects(mut p) => {
                p.id = item_id;
                editor::replace_item(&mut resume.projects, p)
            }
        })
        .await
    }

    /// Removes the sub-record with `item_id` from `section`.
    pub async fn remove_item(
        &self,
        resume_id: Uuid,
        section: Section,
        item_id: Uuid,
    ) -> Result<DraftView, AppError> {
        self.edit(resume_id, move |resume| {
            match section {
                Section::Education => editor::remove_item(&mut resume.education, item_id)
                    .map(|_| ()),
                Section::Experience => editor::remove_item(&mut resume.experience, item_id)
                    .map(|_| ()),
                Section::Skills => editor::remove_item(&mut resume.skills, item_id).map(|_| ()),
                Section::Projects => editor::remove_item(&mut resume.projects, item_id).map(|_| ()),
            }
        })
        .await
    }

    /// Turns auto-save on or off. Turning it on with pending edits schedules a save;
    /// turning it off cancels any scheduled one.
    pub async fn set_autosave(&self, resume_id: Uuid, enabled: bool) -> Result<DraftView, AppError> {
        let draft = self.open(resume_id).await?;
        let mut guard = draft.lock().await;
        guard.autosave = enabled;
        guard.generation += 1;
        if enabled && guard.dirty {
            self.schedule(draft.clone(), guard.generation);
        }
        info!("Auto-save for resume {resume_id} set to {enabled}");
        Ok(guard.view())
    }

    /// Writes the draft to the repository now.
    pub async fn save(&self, resume_id: Uuid) -> Result<Resume, AppError> {
        let draft = self.open(resume_id).await?;
        let mut guard = draft.lock().await;
        guard.generation += 1;
        Ok(persist(self.resumes.as_ref(), &mut guard).await)
    }

    /// Drops the open draft, discarding unsaved edits and pending auto-saves.
    pub async fn close(&self, resume_id: Uuid) {
        if let Some(draft) = self.drafts.lock().await.remove(&resume_id) {
            let mut guard = draft.lock().await;
            guard.generation += 1;
            guard.autosave = false;
        }
    }

    async fn edit<F>(&self, resume_id: Uuid, apply: F) -> Result<DraftView, AppError>
    where
        F: FnOnce(&mut Resume) -> Result<(), AppError>,
    {
        let draft = self.open(resume_id).await?;
        let mut guard = draft.lock().await;
        apply(&mut guard.resume)?;
        guard.dirty = true;
        if guard.autosave {
            guard.generation += 1;
            self.schedule(draft.clone(), guard.generation);
        }
        Ok(guard.view())
    }

    fn schedule(&self, draft: Arc<Mutex<Draft>>, generation: u64) {
        let resumes = self.resumes.clone();
        let delay = self.autosave_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut guard = draft.lock().await;
            if guard.autosave && guard.dirty && guard.generation == generation {
                let saved = persist(resumes.as_ref(), &mut guard).await;
                debug!("Auto-saved resume {}", saved.id);
            }
        });
    }
}

async fn persist(resumes: &dyn Repository<Resume>, draft: &mut Draft) -> Resume {
    let now = Utc::now();
    draft.resume.updated_at = now;
    let saved = resumes.save(draft.resume.clone()).await;
    draft.dirty = false;
    draft.last_saved_at = Some(now);
    saved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Skill, SkillLevel};
    use crate::store::seed::{ids, SeedData};
    use crate::store::InMemoryRepository;

    const DELAY: Duration = Duration::from_millis(2000);

    fn setup() -> (Arc<dyn Repository<Resume>>, ResumeBuilders) {
        let repo: Arc<dyn Repository<Resume>> =
            Arc::new(InMemoryRepository::new(SeedData::mock().resumes));
        let builders = ResumeBuilders::new(repo.clone(), DELAY);
        (repo, builders)
    }

    fn name_patch(name: &str) -> DraftPatch {
        DraftPatch {
            personal_info: Some(PersonalInfoPatch {
                full_name: Some(name.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn skill(name: &str) -> SectionItem {
        SectionItem::Skills(Skill {
            id: Uuid::nil(),
            name: name.to_string(),
            level: SkillLevel::Beginner,
        })
    }

    #[tokio::test]
    async fn test_edits_stay_in_draft_until_save() {
        let (repo, builders) = setup();
        let before = repo.get(ids::RESUME_ALEX).await.unwrap();

        let view = builders
            .update(ids::RESUME_ALEX, name_patch("Alexandra Johnson"))
            .await
            .unwrap();
        assert!(view.dirty);
        assert_eq!(view.resume.personal_info.full_name, "Alexandra Johnson");
        assert_eq!(view.resume.personal_info.email, before.personal_info.email);

        let stored = repo.get(ids::RESUME_ALEX).await.unwrap();
        assert_eq!(stored.personal_info.full_name, "Alex Johnson");

        let saved = builders.save(ids::RESUME_ALEX).await.unwrap();
        assert_eq!(saved.personal_info.full_name, "Alexandra Johnson");
        assert!(saved.updated_at > before.updated_at);
        assert!(!builders.draft(ids::RESUME_ALEX).await.unwrap().dirty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_updates_timestamp_after_delay() {
        let (repo, builders) = setup();
        let before = repo.get(ids::RESUME_ALEX).await.unwrap().updated_at;

        builders.set_autosave(ids::RESUME_ALEX, true).await.unwrap();
        builders
            .update(ids::RESUME_ALEX, name_patch("A. Johnson"))
            .await
            .unwrap();

        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(repo.get(ids::RESUME_ALEX).await.unwrap().updated_at, before);

        tokio::time::sleep(DELAY).await;
        let stored = repo.get(ids::RESUME_ALEX).await.unwrap();
        assert_ne!(stored.updated_at, before);
        assert_eq!(stored.personal_info.full_name, "A. Johnson");
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_debounces_rapid_edits() {
        let (repo, builders) = setup();
        let before = repo.get(ids::RESUME_ALEX).await.unwrap().updated_at;
        builders.set_autosave(ids::RESUME_ALEX, true).await.unwrap();

        builders.update(ids::RESUME_ALEX, name_patch("One")).await.unwrap();
        tokio::time::sleep(DELAY * 3 / 4).await;
        builders.update(ids::RESUME_ALEX, name_patch("Two")).await.unwrap();
        tokio::time::sleep(DELAY * 3 / 4).await;

        // first timer fired but was superseded by the second edit
        assert_eq!(repo.get(ids::RESUME_ALEX).await.unwrap().updated_at, before);

        tokio::time::sleep(DELAY).await;
        let stored = repo.get(ids::RESUME_ALEX).await.unwrap();
        assert_eq!(stored.personal_info.full_name, "Two");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabling_autosave_cancels_pending_save() {
        let (repo, builders) = setup();
        let before = repo.get(ids::RESUME_ALEX).await.unwrap().updated_at;
        builders.set_autosave(ids::RESUME_ALEX, true).await.unwrap();
        builders.update(ids::RESUME_ALEX, name_patch("Nope")).await.unwrap();
        builders.set_autosave(ids::RESUME_ALEX, false).await.unwrap();

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(repo.get(ids::RESUME_ALEX).await.unwrap().updated_at, before);
        assert!(builders.draft(ids::RESUME_ALEX).await.unwrap().dirty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_autosave_without_flag() {
        let (repo, builders) = setup();
        let before = repo.get(ids::RESUME_ALEX).await.unwrap().updated_at;
        builders.update(ids::RESUME_ALEX, name_patch("Manual")).await.unwrap();
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(repo.get(ids::RESUME_ALEX).await.unwrap().updated_at, before);
    }

    #[tokio::test]
    async fn test_add_and_remove_items() {
        let (_, builders) = setup();
        let start = builders.draft(ids::RESUME_ALEX).await.unwrap();
        let skills_before = start.resume.skills.len();

        let (first, _) = builders.add_item(ids::RESUME_ALEX, skill("Go")).await.unwrap();
        let (second, view) = builders.add_item(ids::RESUME_ALEX, skill("SQL")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(view.resume.skills.len(), skills_before + 2);

        let view = builders
            .remove_item(ids::RESUME_ALEX, Section::Skills, first)
            .await
            .unwrap();
        assert_eq!(view.resume.skills.len(), skills_before + 1);
        let names: Vec<_> = view.resume.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "TypeScript", "SQL"]);

        let err = builders
            .remove_item(ids::RESUME_ALEX, Section::Projects, first)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_replace_item_keeps_id() {
        let (_, builders) = setup();
        let (id, _) = builders.add_item(ids::RESUME_ALEX, skill("Go")).await.unwrap();
        let view = builders
            .replace_item(ids::RESUME_ALEX, id, skill("Golang"))
            .await
            .unwrap();
        let replaced = view.resume.skills.iter().find(|s| s.id == id).unwrap();
        assert_eq!(replaced.name, "Golang");
    }

    #[tokio::test]
    async fn test_unknown_resume() {
        let (_, builders) = setup();
        assert!(matches!(
            builders.draft(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_close_discards_edits() {
        let (_, builders) = setup();
        builders.update(ids::RESUME_ALEX, name_patch("Temp")).await.unwrap();
        builders.close(ids::RESUME_ALEX).await;
        let view = builders.draft(ids::RESUME_ALEX).await.unwrap();
        assert_eq!(view.resume.personal_info.full_name, "Alex Johnson");
        assert!(!view.dirty);
    }
}
