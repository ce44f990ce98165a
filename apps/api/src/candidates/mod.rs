// Employer candidate pipeline: filtering, per-candidate status/rating/notes,
// multi-select with bulk status updates, and a per-status summary.

pub mod handlers;
pub mod selection;

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateStatus, InterviewNote};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StageCount {
    pub status: CandidateStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub total: usize,
    /// One entry per status, in pipeline order, zero counts included.
    pub stages: Vec<StageCount>,
    pub average_rating: Option<f64>,
}

pub fn validate_rating(rating: u8) -> Result<u8, AppError> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(AppError::Validation(format!(
            "rating must be between 1 and 5, got {rating}"
        )))
    }
}

pub fn new_note(author: &str, body: &str) -> Result<InterviewNote, AppError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(AppError::Validation("note cannot be empty".to_string()));
    }
    Ok(InterviewNote {
        id: Uuid::new_v4(),
        author: author.to_string(),
        body: body.to_string(),
        created_at: Utc::now(),
    })
}

pub fn summarize(candidates: &[Candidate]) -> PipelineSummary {
    let mut counts: HashMap<CandidateStatus, usize> = HashMap::new();
    for candidate in candidates {
        *counts.entry(candidate.status).or_default() += 1;
    }

    let ratings: Vec<f64> = candidates
        .iter()
        .filter_map(|c| c.rating)
        .map(f64::from)
        .collect();
    let average_rating = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    PipelineSummary {
        total: candidates.len(),
        stages: CandidateStatus::ALL
            .iter()
            .map(|status| StageCount {
                status: *status,
                count: counts.get(status).copied().unwrap_or(0),
            })
            .collect(),
        average_rating,
    }
}
