//! Request / response types for the resume generator, with field limits.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub major: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    pub achievements: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub achievements: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub start_date: String,
    pub end_date: String,
    pub role: String,
    pub achievements: Option<String>,
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub category: String,
    pub skills: String,
    /// beginner / intermediate / advanced / expert
    pub proficiency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
}

/// Request body for `POST /api/v1/resume-generator/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeGenerationRequest {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    pub target_position: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeGenerationResponse {
    pub resume_id: String,
    pub markdown_content: String,
    pub pdf_url: Option<String>,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumePreviewResponse {
    pub resume_id: String,
    pub status: String,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

impl ResumeGenerationRequest {
    /// Enforces required fields and per-field length limits (in characters).
    pub fn validate(&self) -> Result<(), AppError> {
        let p = &self.personal_info;
        required("personal_info.name", &p.name, 100)?;
        limit("personal_info.email", &p.email, 100)?;
        limit("personal_info.phone", &p.phone, 50)?;
        optional("personal_info.location", &p.location, 100)?;
        optional("personal_info.linkedin", &p.linkedin, 200)?;
        optional("personal_info.github", &p.github, 200)?;
        optional("personal_info.website", &p.website, 200)?;

        for edu in &self.education {
            limit("education.school", &edu.school, 100)?;
            limit("education.degree", &edu.degree, 100)?;
            limit("education.major", &edu.major, 100)?;
            limit("education.start_date", &edu.start_date, 20)?;
            limit("education.end_date", &edu.end_date, 20)?;
            optional("education.gpa", &edu.gpa, 10)?;
            optional("education.achievements", &edu.achievements, 500)?;
        }

        for work in &self.work_experience {
            limit("work_experience.company", &work.company, 100)?;
            limit("work_experience.position", &work.position, 100)?;
            limit("work_experience.start_date", &work.start_date, 20)?;
            limit("work_experience.end_date", &work.end_date, 20)?;
            limit("work_experience.description", &work.description, 1000)?;
            optional("work_experience.achievements", &work.achievements, 500)?;
        }

        if self.projects.is_empty() {
            return Err(AppError::Validation(
                "projects must contain at least one item".to_string(),
            ));
        }
        for project in &self.projects {
            limit("projects.name", &project.name, 100)?;
            limit("projects.description", &project.description, 500)?;
            limit("projects.technologies", &project.technologies, 200)?;
            limit("projects.start_date", &project.start_date, 20)?;
            limit("projects.end_date", &project.end_date, 20)?;
            limit("projects.role", &project.role, 100)?;
            optional("projects.achievements", &project.achievements, 500)?;
            optional("projects.github_url", &project.github_url, 200)?;
        }

        if self.skills.is_empty() {
            return Err(AppError::Validation(
                "skills must contain at least one item".to_string(),
            ));
        }
        for skill in &self.skills {
            limit("skills.category", &skill.category, 50)?;
            limit("skills.skills", &skill.skills, 200)?;
            limit("skills.proficiency", &skill.proficiency, 20)?;
        }

        for cert in &self.certificates {
            limit("certificates.name", &cert.name, 100)?;
            limit("certificates.issuer", &cert.issuer, 100)?;
            limit("certificates.date", &cert.date, 20)?;
            optional("certificates.expiry_date", &cert.expiry_date, 20)?;
            optional("certificates.credential_id", &cert.credential_id, 100)?;
        }

        optional("target_position", &self.target_position, 100)?;
        optional("additional_info", &self.additional_info, 500)?;
        Ok(())
    }
}

fn limit(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

fn required(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    limit(field, value, max)
}

fn optional(field: &str, value: &Option<String>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) => limit(field, v, max),
        None => Ok(()),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_request;
    use super::*;

    #[test]
    fn test_sample_request_is_valid() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut req = sample_request();
        req.personal_info.name = "  ".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("personal_info.name cannot be empty"));
    }

    #[test]
    fn test_projects_required() {
        let mut req = sample_request();
        req.projects.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_skills_required() {
        let mut req = sample_request();
        req.skills.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut req = sample_request();
        // 100 multi-byte characters is within the limit.
        req.personal_info.name = "李".repeat(100);
        assert!(req.validate().is_ok());
        req.personal_info.name = "李".repeat(101);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_optional_sections_default_to_empty() {
        let json = serde_json::json!({
            "personal_info": {"name": "Jane", "email": "j@x.io", "phone": "1"},
            "projects": [{
                "name": "p", "description": "d", "technologies": "t",
                "start_date": "2020", "end_date": "2021", "role": "r"
            }],
            "skills": [{"category": "c", "skills": "s", "proficiency": "expert"}]
        });
        let req: ResumeGenerationRequest = serde_json::from_value(json).unwrap();
        assert!(req.education.is_empty());
        assert!(req.work_experience.is_empty());
        assert!(req.certificates.is_empty());
        assert!(req.validate().is_ok());
    }
}
