// Events: the organizer's event form, the registrations collection joined to
// events by `event_id`, and per-event stats.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::editor::merge;
use crate::errors::AppError;
use crate::models::event::{Event, EventStatus, EventType, Registration};
use crate::models::user::User;
use crate::store::Repository;

#[derive(Debug, Deserialize)]
pub struct EventForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_type: EventType,
    pub location: String,
    #[serde(default)]
    pub is_virtual: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub location: Option<String>,
    pub is_virtual: Option<bool>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub capacity: Option<u32>,
    pub status: Option<EventStatus>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventStats {
    pub registered: u32,
    pub capacity: u32,
    pub spots_left: u32,
    pub fill_rate: f64,
    pub attended: usize,
    pub registration_rows: usize,
}

fn check_schedule(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<(), AppError> {
    if ends_at < starts_at {
        return Err(AppError::Validation(
            "ends_at must not be before starts_at".to_string(),
        ));
    }
    Ok(())
}

pub fn new_event(organizer: &User, form: EventForm) -> Result<Event, AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    check_schedule(form.starts_at, form.ends_at)?;

    Ok(Event {
        id: Uuid::new_v4(),
        organizer_id: organizer.id,
        title: form.title.trim().to_string(),
        description: form.description,
        event_type: form.event_type,
        location: form.location,
        is_virtual: form.is_virtual,
        starts_at: form.starts_at,
        ends_at: form.ends_at,
        capacity: form.capacity,
        registered: 0,
        status: EventStatus::Upcoming,
    })
}

/// Shallow-merges `patch`. Capacity may drop below the registered count.
pub fn apply_patch(event: &mut Event, patch: EventPatch) -> Result<(), AppError> {
    if matches!(&patch.title, Some(t) if t.trim().is_empty()) {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    check_schedule(
        patch.starts_at.unwrap_or(event.starts_at),
        patch.ends_at.unwrap_or(event.ends_at),
    )?;

    merge(&mut event.title, patch.title.map(|t| t.trim().to_string()));
    merge(&mut event.description, patch.description);
    merge(&mut event.event_type, patch.event_type);
    merge(&mut event.location, patch.location);
    merge(&mut event.is_virtual, patch.is_virtual);
    merge(&mut event.starts_at, patch.starts_at);
    merge(&mut event.ends_at, patch.ends_at);
    merge(&mut event.capacity, patch.capacity);
    merge(&mut event.status, patch.status);
    Ok(())
}

/// Registrations for `event_id`, found by a linear scan of the collection.
pub async fn registrations_for(
    registrations: &dyn Repository<Registration>,
    event_id: Uuid,
) -> Vec<Registration> {
    registrations
        .find(&move |r: &Registration| r.event_id == event_id)
        .await
}

fn check_open(event: &Event) -> Result<(), AppError> {
    if matches!(event.status, EventStatus::Cancelled | EventStatus::Completed) {
        return Err(AppError::Conflict(format!(
            "Event '{}' is {}",
            event.title,
            event.status.as_str()
        )));
    }
    Ok(())
}

/// Registers `student` for the event and bumps its counter. Capacity is
/// reported through `spots_left` but not enforced here.
///
/// The counter is bumped before the row lands and dropped again if the row
/// turns out to be a duplicate, so it never runs behind the rows that
/// `unregister` may be removing concurrently.
pub async fn register(
    events: &dyn Repository<Event>,
    registrations: &dyn Repository<Registration>,
    event_id: Uuid,
    student: &User,
) -> Result<Registration, AppError> {
    let event = events
        .try_modify(event_id, &|e: &mut Event| {
            check_open(e)?;
            e.registered += 1;
            Ok(())
        })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))?;

    let student_id = student.id;
    let inserted = registrations
        .insert_unless(
            Registration {
                id: Uuid::new_v4(),
                event_id,
                student_id,
                student_name: student.name.clone(),
                email: student.email.clone(),
                registered_at: Utc::now(),
                attended: false,
            },
            &move |r: &Registration| r.event_id == event_id && r.student_id == student_id,
        )
        .await;

    let Some(registration) = inserted else {
        events
            .modify(event_id, &|e: &mut Event| {
                e.registered = e.registered.saturating_sub(1)
            })
            .await;
        return Err(AppError::Conflict(format!(
            "Already registered for '{}'",
            event.title
        )));
    };

    info!("User {student_id} registered for event {event_id}");
    Ok(registration)
}

/// Removes the student's registration and decrements the counter. Only the
/// call that actually removed the row touches the counter.
pub async fn unregister(
    events: &dyn Repository<Event>,
    registrations: &dyn Repository<Registration>,
    event_id: Uuid,
    student_id: Uuid,
) -> Result<(), AppError> {
    let not_found = || AppError::NotFound("Registration not found".to_string());
    let existing = registrations
        .find(&move |r: &Registration| r.event_id == event_id && r.student_id == student_id)
        .await;
    let registration = existing.first().ok_or_else(not_found)?;

    registrations
        .remove(registration.id)
        .await
        .ok_or_else(not_found)?;
    events
        .modify(event_id, &|e: &mut Event| {
            e.registered = e.registered.saturating_sub(1)
        })
        .await;
    info!("User {student_id} unregistered from event {event_id}");
    Ok(())
}

pub fn stats(event: &Event, registrations: &[Registration]) -> EventStats {
    EventStats {
        registered: event.registered,
        capacity: event.capacity,
        spots_left: event.spots_left(),
        fill_rate: event.fill_rate(),
        attended: registrations.iter().filter(|r| r.attended).count(),
        registration_rows: registrations.len(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::seed::{ids, SeedData};
    use crate::store::InMemoryRepository;

    struct Fixture {
        events: InMemoryRepository<Event>,
        registrations: InMemoryRepository<Registration>,
        users: Vec<User>,
    }

    fn fixture() -> Fixture {
        let seed = SeedData::mock();
        Fixture {
            events: InMemoryRepository::new(seed.events),
            registrations: InMemoryRepository::new(seed.registrations),
            users: seed.users,
        }
    }

    impl Fixture {
        fn user(&self, id: Uuid) -> &User {
            self.users.iter().find(|u| u.id == id).unwrap()
        }
    }

    #[tokio::test]
    async fn test_register_appends_and_counts() {
        let f = fixture();
        let priya = f.user(ids::STUDENT_PRIYA);

        let before = f.events.get(ids::EVENT_CAREER_FAIR).await.unwrap().registered;
        let reg = register(&f.events, &f.registrations, ids::EVENT_CAREER_FAIR, priya)
            .await
            .unwrap();

        assert_eq!(reg.student_name, "Priya Patel");
        let event = f.events.get(ids::EVENT_CAREER_FAIR).await.unwrap();
        assert_eq!(event.registered, before + 1);
        let rows = registrations_for(&f.registrations, ids::EVENT_CAREER_FAIR).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.last().unwrap().id, reg.id);
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let f = fixture();
        let alex = f.user(ids::STUDENT_ALEX);
        let err = register(&f.events, &f.registrations, ids::EVENT_CAREER_FAIR, alex)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_cancelled_event_rejects_registration() {
        let f = fixture();
        let alex = f.user(ids::STUDENT_ALEX);
        let err = register(&f.events, &f.registrations, ids::EVENT_NETWORKING, alex)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_capacity_is_not_enforced() {
        let f = fixture();
        f.events
            .modify(ids::EVENT_RESUME_WORKSHOP, &|e: &mut Event| e.capacity = 1)
            .await;

        let alex = f.user(ids::STUDENT_ALEX);
        register(&f.events, &f.registrations, ids::EVENT_RESUME_WORKSHOP, alex)
            .await
            .unwrap();

        let event = f.events.get(ids::EVENT_RESUME_WORKSHOP).await.unwrap();
        assert_eq!(event.registered, 2);
        assert_eq!(event.spots_left(), 0);
    }

    #[tokio::test]
    async fn test_unregister() {
        let f = fixture();
        unregister(&f.events, &f.registrations, ids::EVENT_CAREER_FAIR, ids::STUDENT_ALEX)
            .await
            .unwrap();
        let event = f.events.get(ids::EVENT_CAREER_FAIR).await.unwrap();
        assert_eq!(event.registered, 1);
        assert!(unregister(&f.events, &f.registrations, ids::EVENT_CAREER_FAIR, ids::STUDENT_ALEX)
            .await
            .is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_double_register_counts_once() {
        let seed = SeedData::mock();
        let events = Arc::new(InMemoryRepository::new(seed.events));
        let registrations = Arc::new(InMemoryRepository::new(seed.registrations));
        let priya = seed
            .users
            .into_iter()
            .find(|u| u.id == ids::STUDENT_PRIYA)
            .unwrap();
        let before = events.get(ids::EVENT_CAREER_FAIR).await.unwrap().registered;

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let (events, registrations, priya) =
                    (events.clone(), registrations.clone(), priya.clone());
                tokio::spawn(async move {
                    register(
                        events.as_ref(),
                        registrations.as_ref(),
                        ids::EVENT_CAREER_FAIR,
                        &priya,
                    )
                    .await
                })
            })
            .collect();

        let mut accepted = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => assert!(matches!(err, AppError::Conflict(_))),
            }
        }

        assert_eq!(accepted, 1);
        let rows = registrations
            .find(&|r: &Registration| {
                r.event_id == ids::EVENT_CAREER_FAIR && r.student_id == ids::STUDENT_PRIYA
            })
            .await;
        assert_eq!(rows.len(), 1);
        let event = events.get(ids::EVENT_CAREER_FAIR).await.unwrap();
        assert_eq!(event.registered, before + 1);
    }

    #[tokio::test]
    async fn test_rejected_registration_leaves_counter_alone() {
        let f = fixture();
        let alex = f.user(ids::STUDENT_ALEX);
        let before = f.events.get(ids::EVENT_CAREER_FAIR).await.unwrap().registered;

        assert!(register(&f.events, &f.registrations, ids::EVENT_CAREER_FAIR, alex)
            .await
            .is_err());
        let event = f.events.get(ids::EVENT_CAREER_FAIR).await.unwrap();
        assert_eq!(event.registered, before);

        f.events
            .modify(ids::EVENT_CAREER_FAIR, &|e: &mut Event| {
                e.status = EventStatus::Completed
            })
            .await;
        let priya = f.user(ids::STUDENT_PRIYA);
        assert!(register(&f.events, &f.registrations, ids::EVENT_CAREER_FAIR, priya)
            .await
            .is_err());
        let event = f.events.get(ids::EVENT_CAREER_FAIR).await.unwrap();
        assert_eq!(event.registered, before);
        let rows = registrations_for(&f.registrations, ids::EVENT_CAREER_FAIR).await;
        assert!(rows.iter().all(|r| r.student_id != ids::STUDENT_PRIYA));
    }

    #[test]
    fn test_patch_rejects_inverted_schedule() {
        let mut event = SeedData::mock().events.remove(0);
        let patch = EventPatch {
            ends_at: Some(event.starts_at - chrono::Duration::hours(1)),
            ..Default::default()
        };
        assert!(apply_patch(&mut event, patch).is_err());
    }

    #[test]
    fn test_stats() {
        let seed = SeedData::mock();
        let event = &seed.events[0];
        let mut rows: Vec<_> = seed
            .registrations
            .iter()
            .filter(|r| r.event_id == event.id)
            .cloned()
            .collect();
        rows[0].attended = true;

        let s = stats(event, &rows);
        assert_eq!(s.registered, 2);
        assert_eq!(s.spots_left, 498);
        assert_eq!(s.attended, 1);
        assert_eq!(s.registration_rows, 2);
    }
}
