// Prompt text for resume generation. The output is Markdown, so no JSON
// instructions here; the agent runs with the Markdown strategy.

use crate::resume_generator::models::ResumeGenerationRequest;

/// System instruction attached to the resolved provider.
pub const RESUME_SYSTEM: &str = "You are an experienced technical recruiter and resume writer. \
    You write concise, truthful, well-structured resumes in Markdown.";

const RESUME_INSTRUCTIONS: &str = "\
Generate a professional resume from the user information below. Requirements:
1. Highlight the user's skills and the strongest points of their projects
2. Let a recruiter understand the candidate at a glance
3. Use Markdown formatting
4. Stay truthful: polish the wording but never drift from the facts given
5. Keep the structure clear and the layout clean";

const RESUME_CLOSING: &str =
    "Generate a professional resume based on the information above and output it as Markdown.";

/// Renders the user's profile into the generation prompt.
pub fn build_resume_prompt(req: &ResumeGenerationRequest) -> String {
    let mut prompt = String::with_capacity(2048);
    let p = &req.personal_info;

    prompt.push_str(RESUME_INSTRUCTIONS);
    prompt.push_str("\n\nUser information:\n\n## Personal information");
    prompt.push_str(&format!(
        "\n- Name: {}\n- Email: {}\n- Phone: {}",
        p.name, p.email, p.phone
    ));
    for (label, value) in [
        ("Location", &p.location),
        ("LinkedIn", &p.linkedin),
        ("GitHub", &p.github),
        ("Website", &p.website),
    ] {
        if let Some(v) = value {
            prompt.push_str(&format!("\n- {label}: {v}"));
        }
    }

    if let Some(target) = &req.target_position {
        prompt.push_str(&format!("\n\n## Target position\n{target}"));
    }

    if !req.skills.is_empty() {
        prompt.push_str("\n\n## Skills\n");
        for skill in &req.skills {
            prompt.push_str(&format!(
                "- {}: {} ({})\n",
                skill.category, skill.skills, skill.proficiency
            ));
        }
    }

    if !req.education.is_empty() {
        prompt.push_str("\n\n## Education\n");
        for edu in &req.education {
            prompt.push_str(&format!(
                "\n### {} - {}\n- Major: {}\n- Period: {} - {}",
                edu.school, edu.degree, edu.major, edu.start_date, edu.end_date
            ));
            if let Some(gpa) = &edu.gpa {
                prompt.push_str(&format!("\n- GPA: {gpa}"));
            }
            if let Some(achievements) = &edu.achievements {
                prompt.push_str(&format!("\n- Achievements: {achievements}"));
            }
            prompt.push('\n');
        }
    }

    if !req.work_experience.is_empty() {
        prompt.push_str("\n\n## Work experience\n");
        for work in &req.work_experience {
            prompt.push_str(&format!(
                "\n### {} - {}\n- Period: {} - {}\n- Description: {}",
                work.company, work.position, work.start_date, work.end_date, work.description
            ));
            if let Some(achievements) = &work.achievements {
                prompt.push_str(&format!("\n- Key achievements: {achievements}"));
            }
            prompt.push('\n');
        }
    }

    if !req.projects.is_empty() {
        prompt.push_str("\n\n## Projects\n");
        for project in &req.projects {
            prompt.push_str(&format!(
                "\n### {}\n- Description: {}\n- Technologies: {}\n- Role: {}\n- Period: {} - {}",
                project.name,
                project.description,
                project.technologies,
                project.role,
                project.start_date,
                project.end_date
            ));
            if let Some(achievements) = &project.achievements {
                prompt.push_str(&format!("\n- Outcomes: {achievements}"));
            }
            if let Some(url) = &project.github_url {
                prompt.push_str(&format!("\n- Link: {url}"));
            }
            prompt.push('\n');
        }
    }

    if !req.certificates.is_empty() {
        prompt.push_str("\n\n## Certificates\n");
        for cert in &req.certificates {
            prompt.push_str(&format!("- {} - {} ({})\n", cert.name, cert.issuer, cert.date));
        }
    }

    if let Some(extra) = &req.additional_info {
        prompt.push_str(&format!("\n\n## Additional information\n{extra}"));
    }

    prompt.push_str("\n\n");
    prompt.push_str(RESUME_CLOSING);
    prompt
}
