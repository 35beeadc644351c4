//! Few-shot conversation for the code-generation model.
//!
//! The conversation is a fixed four-turn exchange: a system contract, one
//! worked example (request + code-only answer) and the caller's request in
//! the same template as the example.

use multitask_protocol::{ChatRole, CodeConversation, Turn};

const SYSTEM_PROMPT: &str = "You are a code-generation AI. When given a prompt, \
    you must return only the Python code snippet that fulfills the request. \
    Do NOT include any explanations, JSON schemas, commentary, or special tokens.";

const REQUEST_PREAMBLE: &str = "Generate a Python code snippet that fulfills this request:\n\n";

/// Closing line of every user request turn. Models sometimes echo it back;
/// the output sanitizer strips it.
pub const IMPORTS_INSTRUCTION: &str =
    "Include any necessary imports and ensure the snippet is functional.";

const EXAMPLE_REQUEST: &str =
    "Create a Python function to calculate Fibonacci sequence with O(n) time complexity";

const EXAMPLE_ANSWER: &str = r#"def fibonacci(n):
    if n == 0:
        return 0
    elif n == 1:
        return 1
    elif n == 2:
        return 1
    else:
        a, b = 0, 1
        for i in range(2, n):
            a, b = b, a + b
        return b

n = int(input("Enter the number of the Fibonacci sequence: "))
print(fibonacci(n))"#;

/// Wrap a request in the user-turn template.
///
/// The request is inserted verbatim between `"""` delimiters; empty input is
/// accepted.
pub fn code_request_prompt(user_request: &str) -> String {
    let mut prompt = String::with_capacity(
        REQUEST_PREAMBLE.len() + user_request.len() + IMPORTS_INSTRUCTION.len() + 16,
    );
    prompt.push_str(REQUEST_PREAMBLE);
    prompt.push_str("\"\"\"\n");
    prompt.push_str(user_request);
    prompt.push_str("\n\"\"\"\n");
    prompt.push_str(IMPORTS_INSTRUCTION);
    prompt
}

/// Build the conversation sent to the code model for `user_request`.
pub fn build_code_conversation(user_request: &str) -> CodeConversation {
    CodeConversation::from_turns(vec![
        Turn::new(ChatRole::System, SYSTEM_PROMPT),
        Turn::new(ChatRole::User, code_request_prompt(EXAMPLE_REQUEST)),
        Turn::new(ChatRole::Assistant, EXAMPLE_ANSWER),
        Turn::new(ChatRole::User, code_request_prompt(user_request)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order() {
        let conversation = build_code_conversation("sort a list");
        let roles: Vec<ChatRole> = conversation.iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::System,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User
            ]
        );
    }

    #[test]
    fn test_request_is_wrapped_verbatim() {
        let request = "Write a function that\nmerges two \"sorted\" lists";
        let conversation = build_code_conversation(request);
        let last = conversation.last().unwrap().content();

        assert!(last.starts_with(REQUEST_PREAMBLE));
        assert!(last.contains(&format!("\"\"\"\n{request}\n\"\"\"")));
        assert!(last.ends_with(IMPORTS_INSTRUCTION));
    }

    #[test]
    fn test_empty_request_is_accepted() {
        let conversation = build_code_conversation("");
        assert_eq!(conversation.len(), 4);
        assert!(conversation
            .last()
            .unwrap()
            .content()
            .contains("\"\"\"\n\n\"\"\""));
    }

    #[test]
    fn test_example_turns_are_fixed() {
        let a = build_code_conversation("one");
        let b = build_code_conversation("two");
        assert_eq!(a.turns()[..3], b.turns()[..3]);
        assert!(a.turns()[1].content().contains(EXAMPLE_REQUEST));
        assert!(a.turns()[2].content().starts_with("def fibonacci(n):"));
        assert!(!a.turns()[2].content().contains("```"));
    }

    #[test]
    fn test_system_contract() {
        let conversation = build_code_conversation("x");
        let system = conversation.turns()[0].content();
        assert!(system.contains("only the Python code snippet"));
        assert!(system.contains("special tokens"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            build_code_conversation("binary search"),
            build_code_conversation("binary search")
        );
    }
}
