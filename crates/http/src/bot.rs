//! Keyword-lookup demo bot
//!
//! Stand-in for the real assistant backend: a fixed keyword table with an
//! echoing fallback. Matching is case-insensitive substring search, first
//! match wins.

const RESPONSES: &[(&str, &str)] = &[
    ("hello", "Hello! How can I help you today?"),
    (
        "who are you",
        "I'm a chat assistant built to talk with you and help with your questions.",
    ),
    (
        "what can you do",
        "I can chat with you, answer questions, help you find information, and more!",
    ),
    (
        "thank you",
        "No problem! Let me know if you need anything else.",
    ),
    ("bye", "Goodbye! See you next time!"),
];

/// Produce the bot reply for a user message
pub fn reply(input: &str) -> String {
    let lowered = input.to_lowercase();
    for (keyword, response) in RESPONSES {
        if lowered.contains(keyword) {
            return (*response).to_string();
        }
    }

    format!("That's an interesting question! Could you tell me more about \"{input}\"?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(reply("HELLO there"), "Hello! How can I help you today?");
        assert_eq!(reply("well, Thank You"), "No problem! Let me know if you need anything else.");
    }

    #[test]
    fn test_unknown_input_echoes_back() {
        let answer = reply("quantum entanglement");
        assert!(answer.contains("quantum entanglement"));
    }
}
