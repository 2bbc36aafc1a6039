use crate::errors::AppError;
use crate::services::ai::LlmProvider;

const INTENT_PROMPT: &str = "Parse the following message for any references to \
scheduling or finding a time. Reply only with yes or no. Do not reply yes to \
requests for confirmation it is currently a good time to talk, such as 'is now \
a good time to discuss this?'. Only respond yes when it seems someone is \
suggesting or requesting to schedule a future appointment:";

/// Ask the model whether a single message expresses scheduling intent.
pub async fn detect_scheduling_intent(
    llm: &dyn LlmProvider,
    message: &str,
) -> Result<bool, AppError> {
    let prompt = format!("{INTENT_PROMPT}\n\n\"{message}\"");
    let raw = llm.classify(&prompt).await?;
    tracing::debug!(raw = %raw, "intent classification");
    Ok(indicates_scheduling(&raw))
}

/// Substring match, not equality: any classifier output containing "yes"
/// (case-insensitive) counts as intent, including "yesterday".
pub fn indicates_scheduling(raw: &str) -> bool {
    raw.to_lowercase().contains("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_yes() {
        assert!(indicates_scheduling("Yes, Tuesday works"));
        assert!(indicates_scheduling("yes"));
        assert!(indicates_scheduling("YES."));
    }

    #[test]
    fn test_plain_no() {
        assert!(!indicates_scheduling("No thanks"));
        assert!(!indicates_scheduling("no"));
        assert!(!indicates_scheduling(""));
    }

    #[test]
    fn test_substring_quirk() {
        // "yesterday" contains "yes"; the loose match treats it as intent.
        assert!(indicates_scheduling("yesterday was fine"));
    }

    #[test]
    fn test_hedged_yes_still_counts() {
        assert!(indicates_scheduling("yes, but only if she's free"));
    }
}
