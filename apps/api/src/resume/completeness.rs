use serde::{Deserialize, Serialize};

use crate::models::resume::{Resume, Section};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeCompleteness {
    /// 0 – 100
    pub score: u32,
    pub missing: Vec<String>,
    pub recommendations: Vec<String>,
}

const PERSONAL_WEIGHT: u32 = 20;

const SECTION_WEIGHTS: &[(Section, u32)] = &[
    (Section::Experience, 25),
    (Section::Education, 20),
    (Section::Skills, 20),
    (Section::Projects, 15),
];

/// Scores how much of the resume is filled in. Each non-empty section earns
/// its full weight; personal info earns half for name + email and half for a summary.
pub fn compute_completeness(resume: &Resume) -> ResumeCompleteness {
    let mut score = 0;
    let mut missing = Vec::new();
    let mut recommendations = Vec::new();

    let info = &resume.personal_info;
    let has_contact = !info.full_name.trim().is_empty() && !info.email.trim().is_empty();
    let has_summary = !info.summary.trim().is_empty();
    if has_contact {
        score += PERSONAL_WEIGHT / 2;
    } else {
        missing.push("contact".to_string());
        recommendations.push("Add your full name and email address".to_string());
    }
    if has_summary {
        score += PERSONAL_WEIGHT / 2;
    } else {
        missing.push("summary".to_string());
        recommendations.push("Write a two or three sentence professional summary".to_string());
    }

    for (section, weight) in SECTION_WEIGHTS {
        if resume.section_len(*section) > 0 {
            score += weight;
        } else {
            missing.push(section.as_str().to_string());
            recommendations.push(format!("Add at least one {} entry", section.as_str()));
        }
    }

    if resume.skills.len() < 3 && resume.section_len(Section::Skills) > 0 {
        recommendations.push("List at least three skills".to_string());
    }

    ResumeCompleteness {
        score,
        missing,
        recommendations,
    }
}
