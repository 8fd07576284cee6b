//! Prompt templates sent to the generative-text service.

use crate::extract::Section;

/// The solution prompt for one output language.
///
/// The reply format requested here (logic, complexities, improvements,
/// article style) is what the extraction markers expect — but the service is
/// under no obligation to honor it, which is why reconciliation exists.
pub fn solution(problem: &str, language: &str) -> String {
    format!(
        "{problem}\n\
         Generate code for this problem in {language}, and include the following in your response:\n\
         Explanation of the logic, Time complexity and space complexity, any improvements or alternatives.\n\
         Respond in a concise, article-style manner without conversational phrases or further invitations for discussion."
    )
}

/// The supplementary query used to backfill one missing field.
///
/// Deliberately simpler than the solution prompt: it does not re-request a
/// format the service has already shown it may not follow.
pub fn repair(section: Section) -> String {
    format!(
        "Can you discuss a little about {} of the code? Please respond in a concise, non-conversational format.",
        section.name()
    )
}

/// Asks the conversation to regenerate one named section.
pub fn refresh(section: &str) -> String {
    format!("Can u generate the {section} section again in a more accurate way")
}

/// One-shot code analysis.
pub fn inspect(code: &str) -> String {
    format!("Analayze the code and explain in detail{code}")
}

/// One-shot code analysis with an explicit task to solve.
pub fn inspect_task(code: &str, task: &str) -> String {
    format!("Analyze the following code and solve the task requested in the comment: {task}\n\nCode:\n{code}")
}
