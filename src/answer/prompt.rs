use crate::storage::entity::rainfall_record::Model as RainfallModel;

/// Records embedded into the answer prompt.
pub const MAX_PROMPT_RECORDS: usize = 5;

pub const SYSTEM_PROMPT: &str = "You are a Climate and Agriculture Data Assistant.";

pub fn build_answer_prompt(user_query: &str, records: &[RainfallModel]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("User asked: \"{user_query}\""));
    lines.push(String::new());

    if records.is_empty() {
        lines.push("No matching database data found.".to_string());
        lines.push("Task:".to_string());
        lines.push("1. Politely say the data isn't available.".to_string());
        lines.push("2. Give a relevant, informative climate-related response anyway.".to_string());
        lines.push("3. Suggest how to refine the query (e.g. add region or year).".to_string());
    } else {
        let shown = &records[..records.len().min(MAX_PROMPT_RECORDS)];
        let summary = serde_json::to_string_pretty(shown).unwrap_or_else(|_| "[]".to_string());
        lines.push("Retrieved rainfall data:".to_string());
        lines.push("---".to_string());
        lines.push(summary);
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push("Task:".to_string());
        lines.push("1. Analyze the data.".to_string());
        lines.push(
            "2. Write a clear, factual, and natural response focused on climate/agriculture."
                .to_string(),
        );
        lines.push(
            "3. End with a short '--- Data Used ---' section summarizing key stats.".to_string(),
        );
    }

    lines.join("\n")
}
