use stagelink_persist::TranscriptEntry;

/// Render a transcript as `[Sender] text` lines, one per message,
/// in the order given (chronological, oldest first)
pub fn render_transcript(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("[{}] {}", e.sender, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fixed summarization prompt embedding the rendered transcript
pub fn summary_prompt(chat_text: &str) -> String {
    format!(
        r#"You are a helpful assistant that summarizes chat conversations.

Please summarize the following chat messages and respond with ONLY a JSON object in this exact format (no markdown, no code blocks):

{{"summary": "A brief 1-2 sentence summary of the conversation", "key_points": ["first key point", "second key point", "third key point"]}}

Chat messages:
{chat_text}

Remember: Respond with ONLY the JSON object, nothing else."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_transcript_format_and_order() {
        let entries = vec![
            TranscriptEntry::new("David Smith", "Hello"),
            TranscriptEntry::new("David Smith", "How are you?"),
        ];
        assert_eq!(
            render_transcript(&entries),
            "[David Smith] Hello\n[David Smith] How are you?"
        );
    }

    #[test]
    fn test_prompt_embeds_transcript() {
        let prompt = summary_prompt("[A] hi");
        assert!(prompt.contains("[A] hi"));
        assert!(prompt.contains("key_points"));
        assert!(prompt.contains("ONLY the JSON object"));
    }
}
