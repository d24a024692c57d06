//! Resume analysis prompt templates.
//! All prompts for the analysis module are defined here.

use crate::analysis::models::AnalysisRequest;

/// Bump whenever ANALYSIS_SYSTEM changes so logged analyses can be traced to a prompt.
pub const ANALYSIS_PROMPT_VERSION: &str = "2024-06-v1";

pub const ANALYSIS_SYSTEM: &str = r#"You are a career advisor that analyzes resumes and suggests similar companies and job titles.

Your task:
1. Extract the work history from the resume (company names, job titles, and a brief summary of responsibilities)
2. Suggest 8-12 job titles the person should search for based on their experience
3. Suggest 8-10 companies that would be a good fit, based on similarity to where they've worked

For company suggestions, think about:
- Direct competitors in the same industry
- Companies with similar cultures or operational complexity
- Adjacent industries where their skills transfer well
- Companies of similar size/stage where they'd feel comfortable

Return your response as valid JSON with this exact structure:
{
    "workHistory": [
        {
            "company": "Company Name",
            "title": "Job Title",
            "summary": "Brief 1-2 sentence summary of what they did"
        }
    ],
    "suggestedTitles": [
        "Job Title 1",
        "Job Title 2"
    ],
    "suggestedCompanies": [
        {
            "name": "Company Name",
            "url": "https://company-careers-page-or-homepage.com",
            "reason": "Why this company is a good fit (1-2 sentences)",
            "basedOn": "Which of their previous companies this is similar to"
        }
    ]
}

Important:
- For URLs, use the company's actual careers page if you know it, otherwise use their homepage
- Be specific in your reasoning - reference actual aspects of their experience
- Include a mix of obvious fits and some stretch opportunities
- Address the user as "you" and use "you/your" tense
- Only return valid JSON, no markdown or explanation"#;

pub const ANALYSIS_USER_LEAD_IN: &str = "Here is the resume to analyze:\n\n";

/// The two messages sent to the completion service for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system_instruction: &'static str,
    pub user_message: String,
}

/// Builds the prompt for a validated request. Pure string construction.
pub fn compose_prompt(request: &AnalysisRequest) -> PromptPair {
    let mut user_message =
        String::with_capacity(ANALYSIS_USER_LEAD_IN.len() + request.resume_text.len());
    user_message.push_str(ANALYSIS_USER_LEAD_IN);
    user_message.push_str(&request.resume_text);

    PromptPair {
        system_instruction: ANALYSIS_SYSTEM,
        user_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: text.to_string(),
        }
    }

    #[test]
    fn test_user_message_embeds_resume_verbatim() {
        let resume = "Jane Doe\nStaff Engineer, Acme (2019-2024)\n{\"not\": \"a template\"}";
        let prompt = compose_prompt(&request(resume));
        assert_eq!(
            prompt.user_message,
            format!("Here is the resume to analyze:\n\n{resume}")
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose_prompt(&request("same text"));
        let b = compose_prompt(&request("same text"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_system_instruction_is_shared_constant() {
        let a = compose_prompt(&request("one"));
        let b = compose_prompt(&request("two"));
        assert_eq!(a.system_instruction, ANALYSIS_SYSTEM);
        assert_eq!(b.system_instruction, ANALYSIS_SYSTEM);
    }

    #[test]
    fn test_system_instruction_names_every_output_key() {
        for key in [
            "\"workHistory\"",
            "\"company\"",
            "\"title\"",
            "\"summary\"",
            "\"suggestedTitles\"",
            "\"suggestedCompanies\"",
            "\"name\"",
            "\"url\"",
            "\"reason\"",
            "\"basedOn\"",
        ] {
            assert!(ANALYSIS_SYSTEM.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_system_instruction_sets_counts_and_json_only() {
        assert!(ANALYSIS_SYSTEM.contains("8-12 job titles"));
        assert!(ANALYSIS_SYSTEM.contains("8-10 companies"));
        assert!(ANALYSIS_SYSTEM.contains("Direct competitors"));
        assert!(ANALYSIS_SYSTEM.contains("Adjacent industries"));
        assert!(ANALYSIS_SYSTEM.contains("Only return valid JSON, no markdown"));
    }
}
