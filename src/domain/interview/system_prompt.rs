//! System prompt composition and control instruction wording

use super::company::{company_values, title_case};
use super::feedback_mode::FeedbackMode;
use super::session::POINTS_PER_QUESTION;

/// Interviewer persona and style, shared by every prompt
const PERSONA: &str = "Ask a mix of technical and behavioral questions, probe deeper with realistic follow-ups, and simulate an authentic FANG-style interview process.";

/// The system instruction that seeds every interview transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    content: String,
}

impl SystemPrompt {
    /// Compose the canonical (deferred feedback) prompt
    pub fn compose(role: &str, company: &str, max_questions: u32) -> Self {
        Self::compose_with_mode(role, company, max_questions, FeedbackMode::Deferred)
    }

    /// Compose a prompt for the given feedback mode
    pub fn compose_with_mode(
        role: &str,
        company: &str,
        max_questions: u32,
        mode: FeedbackMode,
    ) -> Self {
        let max_score = max_questions.saturating_mul(POINTS_PER_QUESTION);
        let feedback_rule = match mode {
            FeedbackMode::Deferred => {
                "- Do NOT give feedback or scores while the interview is in progress.".to_string()
            }
            FeedbackMode::Immediate => format!(
                "- After each answer, give a score from 1 to {} and brief feedback before asking the next question.",
                POINTS_PER_QUESTION
            ),
        };

        let content = format!(
            "You are a senior engineer at {company} conducting a mock interview for a candidate applying for a {role} role. \
Tailor your questions based on {values}. {persona}\n\n\
Interview format:\n\
- Ask exactly {max_questions} questions in total, one at a time, and wait for the candidate's answer before continuing.\n\
{feedback_rule}\n\
- When told the interview is over, score each answer from 1 to {points} and give a final score out of {max_score}, followed by detailed feedback to help the candidate improve.",
            company = title_case(company),
            role = role.trim(),
            values = company_values(company),
            persona = PERSONA,
            max_questions = max_questions,
            feedback_rule = feedback_rule,
            points = POINTS_PER_QUESTION,
            max_score = max_score,
        );

        Self { content }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// Steering text asking for question `number` of `max_questions`
pub fn question_instruction(number: u32, max_questions: u32, mode: FeedbackMode) -> String {
    let ask = format!(
        "Ask interview question #{} of {}. Ask only this one question and then wait for the candidate's answer.",
        number, max_questions
    );
    match mode {
        FeedbackMode::Immediate if number > 1 => format!(
            "First, score the candidate's previous answer from 1 to {} with brief feedback. Then: {}",
            POINTS_PER_QUESTION, ask
        ),
        _ => ask,
    }
}

/// Steering text asking for the final score and feedback
pub fn scoring_instruction(max_questions: u32) -> String {
    let max_score = max_questions.saturating_mul(POINTS_PER_QUESTION);
    format!(
        "The interview is over. Begin your reply with the line \"Final score: X/{max_score}\", \
scoring each of the {max_questions} answers from 1 to {points}. \
Then give detailed feedback: strengths, areas to improve, and concrete next steps.",
        max_score = max_score,
        max_questions = max_questions,
        points = POINTS_PER_QUESTION,
    )
}
