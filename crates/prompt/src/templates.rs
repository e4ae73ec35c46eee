//! Fixed prompt templates. Each function only interpolates; no I/O.

use super::Language;

/// Requested upper bound for generated reports. The model is asked to respect it;
/// nothing enforces it, so delivery still segments arbitrarily long output.
pub const REPORT_REQUESTED_MAX_CHARS: usize = 4000;

/// Prompt for the 24-hour analytics report.
///
/// `context` is either the raw transcript or the concatenated chunk summaries.
pub fn report_prompt(context: &str, language: Language) -> String {
    format!(
        r#"You are analyzing messages from a Telegram group chat covering the last 24 hours. Produce a MAXIMALLY DETAILED professional business report.

Messages:
{context}

IMPORTANT: Respond in {language}. Use the same language as the messages above.

Write a COMPREHENSIVE BUSINESS REPORT with the following sections. Include every significant detail.

**📊 ACTIVITY STATISTICS**
- Exact total number of messages
- Number of active participants and the full list
- TOP-5 most active participants with exact message counts
- Peak activity hours
- Average message length in words
- Longest and shortest messages
- Activity distribution by hour, if possible

**🎯 TOPICS AND PROJECTS**
- Group all messages by work topic or project
- For each topic: message count, key participants, main points and conclusions, discussion status
- Priority tasks with full details
- Completed tasks and who completed them
- Open tasks and why they are open

**👥 PARTICIPANT ANALYSIS**
- Every participant with message count, sorted descending
- For each active participant: main topics and role (initiator, executor, commentator)
- New participants, if any
- Participants who stayed silent
- When each participant was active

**📈 DECISIONS AND RESULTS**
- Every decision made, fully described
- Every assigned task: who assigned it, to whom, deadline, status
- Deadlines and important dates
- Results achieved
- Problems raised and how they were solved
- Open questions that still need an answer

**💬 COMMUNICATION**
- Style (formal or informal)
- Tone (positive, negative, neutral)
- Team engagement and response speed
- Quality of feedback
- Conflicts or disagreements, if any

**🔍 INSIGHTS AND PATTERNS**
- Recurring themes and questions
- Discussion trends and participant activity patterns
- What works in the team's communication and what does not
- Bottlenecks and improvement opportunities

**⚡ HIGHLIGHTS**
- Critical messages or decisions
- Urgent matters that need attention
- Risks and warnings
- Opportunities not to miss

**📋 NEXT STEPS**
- Scheduled meetings with time, participants and purpose
- Upcoming tasks with priorities
- Important dates
- Concrete recommendations for tomorrow and action items per participant

**📝 EXECUTIVE SUMMARY**
- Main achievements, key problems, key takeaways, overall progress

Be specific and extract all valuable information. Write everything in {language}.

FORMATTING RULES:
- Simple Markdown only
- Use *bold* with asterisks for headers and important text
- Use | for simple tables
- Never use underscores for emphasis
- Keep the formatting safe for Telegram
- Maximum {max_chars} characters"#,
        context = context,
        language = language,
        max_chars = REPORT_REQUESTED_MAX_CHARS,
    )
}

/// Prompt for answering `question` over up to 14 days of chat history.
pub fn question_prompt(context: &str, question: &str, language: Language) -> String {
    format!(
        r#"You are a helpful assistant analyzing the history of a Telegram group chat.

Chat history (last 14 days):
{context}

User question: {question}

IMPORTANT: Answer in the same language as the question and the chat history ({language}).

Give a helpful, accurate answer based only on the chat history above. If the history does not contain the answer, say so politely instead of guessing. Keep the answer concise and relevant. Write the whole answer in {language}.

FORMATTING RULES:
- Plain text only
- Use *bold* only for important words
- Do not use underscores, brackets or other special characters
- Keep the formatting simple and safe for Telegram"#,
        context = context,
        question = question,
        language = language,
    )
}

/// Prompt condensing one chunk of an oversized transcript before the final report.
pub fn chunk_summary_prompt(chunk: &str) -> String {
    format!(
        "Summarize the key topics and discussions from these messages:\n\n{}",
        chunk
    )
}
