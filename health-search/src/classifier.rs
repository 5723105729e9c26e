//! Keyword-based scope check for incoming questions.
//!
//! Recall matters more than precision here: a false negative refuses a
//! real health question, so matching is plain substring containment with
//! no stemming and no word boundaries.

/// Keywords and short phrases that mark a query as health-related.
pub const HEALTHCARE_KEYWORDS: &[&str] = &[
    "health",
    "medical",
    "disease",
    "symptom",
    "treatment",
    "medicine",
    "doctor",
    "hospital",
    "diagnosis",
    "therapy",
    "medication",
    "drug",
    "pain",
    "fever",
    "infection",
    "cancer",
    "diabetes",
    "heart",
    "blood",
    "surgery",
    "vaccine",
    "virus",
    "bacteria",
    "wellness",
    "nutrition",
    "diet",
    "exercise",
    "mental health",
    "depression",
    "anxiety",
    "stress",
    "injury",
    "emergency",
    "first aid",
];

/// Returns `true` if any healthcare keyword appears anywhere in `text`,
/// ignoring case.
pub fn is_healthcare_query(text: &str) -> bool {
    let lowered = text.to_lowercase();
    HEALTHCARE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
