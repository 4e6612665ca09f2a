// All provider prompt constants and builders for the Search module.
// Prompts are pure string assembly — no I/O, no failure mode.

use crate::models::job::FilterCriteria;

/// Maximum number of listings requested per search.
pub const RESULT_CAP: usize = 20;

/// Machine-parsable output shape embedded in every search prompt.
const JOB_LISTING_SHAPE: &str = r#"
A JSON array of job objects. Each object must have the following properties:
- "id": A unique string identifier for the job listing.
- "title": The string job title.
- "company": The string name of the company hiring.
- "location": The string job location (e.g., 'San Francisco, CA').
- "description": A string containing a brief summary of the job.
- "url": The direct, full, and valid string URL to the job posting found via search. This is critical. It must be a real clickable link.
- "salaryMin": An optional number for the estimated minimum annual salary.
- "salaryMax": An optional number for the estimated maximum annual salary.
- "companyWebsite": An optional string. The official website URL of the company (e.g., "https://www.google.com") if found.
"#;

/// Builds the grounded-search instruction from the filter criteria.
/// Each non-empty field becomes a constraint clause; the location triple is
/// joined into one clause, with a remote hint when it mentions remote work.
pub fn build_search_prompt(filters: &FilterCriteria) -> String {
    let mut prompt =
        String::from("Use Google Search to find real, currently active job listings based on the following criteria.");

    let keyword = filters.keyword.trim();
    if !keyword.is_empty() {
        prompt.push_str(&format!(" The job title or keyword is \"{keyword}\"."));
    }

    let location = filters.location_text();
    if !location.is_empty() {
        prompt.push_str(&format!(" The location is \"{location}\"."));
        if location.to_lowercase().contains("remote") {
            prompt.push_str(" Prioritize remote, work-from-home, or telecommute opportunities.");
        }
    }

    let company = filters.company.trim();
    if !company.is_empty() {
        prompt.push_str(&format!(" The company is \"{company}\"."));
    }

    prompt.push_str(
        " Prioritize finding direct application pages on company careers sites or major job boards (like LinkedIn, Indeed, Glassdoor).",
    );
    prompt.push_str(&format!(
        " Return up to {RESULT_CAP} of the most relevant results. For each job, provide a detailed summary in the description field."
    ));
    prompt.push_str(
        " CRITICAL: The 'url' field MUST be the actual, clickable link to the specific job posting found in the search results.",
    );
    prompt.push_str(
        " Do NOT generate fake URLs, placeholders like '#', or generic homepages. If a direct application link is not found, use the specific URL of the job board listing page.",
    );
    prompt.push_str(" The response must be ONLY the JSON array, with no other text or explanation.");
    prompt.push_str(&format!(
        " The output must be a valid JSON array of objects, structured like this: {JOB_LISTING_SHAPE}"
    ));

    prompt
}

/// Builds the trend instruction for a keyword. Callers guarantee the
/// keyword is non-empty — an empty keyword never reaches the provider.
pub fn build_trend_prompt(keyword: &str) -> String {
    format!(
        "Generate a fictional 'interest over time' score (from 0 to 100) for the job title \"{keyword}\" \
        for the last 12 months, starting from last month and going backwards. \
        The data should represent a plausible trend for such a role."
    )
}
