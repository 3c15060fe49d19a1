//! Prompt template for CV analysis. The template is fixed: the only
//! substitutions are the CV text itself and the optional target role /
//! job-requirements context supplied by the client.

/// System instruction sent with every analysis call.
pub const ANALYSIS_SYSTEM: &str = "You are an expert CV/Resume analyzer. \
    Analyze the provided CV and give detailed feedback including ATS score, \
    strengths, weaknesses, improvements, and keyword suggestions. \
    Format your response using markdown with ## for headers, **bold** for \
    important text, and - for bullet points.";

/// Builds the user turn from the CV text and optional targeting context.
pub fn build_analysis_prompt(
    cv_text: &str,
    position: Option<&str>,
    job_requirements: Option<&str>,
) -> String {
    let mut prompt = String::from("Please analyze this CV and provide detailed insights:");

    if let Some(position) = position.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str(&format!("\n\nTarget position: {position}"));
    }
    if let Some(requirements) = job_requirements.map(str::trim).filter(|r| !r.is_empty()) {
        prompt.push_str(&format!("\n\nJob requirements to assess against:\n{requirements}"));
    }

    prompt.push_str("\n\n");
    prompt.push_str(cv_text);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_context() {
        let prompt = build_analysis_prompt("CV BODY", None, None);
        assert!(prompt.starts_with("Please analyze this CV"));
        assert!(prompt.ends_with("CV BODY"));
        assert!(!prompt.contains("Target position"));
    }

    #[test]
    fn test_prompt_with_position_and_requirements() {
        let prompt = build_analysis_prompt("CV BODY", Some("Backend Engineer"), Some("Rust, SQL"));
        assert!(prompt.contains("Target position: Backend Engineer"));
        assert!(prompt.contains("Job requirements to assess against:\nRust, SQL"));
        assert!(prompt.ends_with("CV BODY"));
    }

    #[test]
    fn test_blank_context_fields_are_ignored() {
        let prompt = build_analysis_prompt("CV BODY", Some("   "), Some(""));
        assert!(!prompt.contains("Target position"));
        assert!(!prompt.contains("Job requirements"));
    }
}
