//! Turn response codec.
//!
//! Splits a raw language-model completion into a primary answer and a
//! list of structured follow-up questions, normalizes embedded links in
//! the answer, and strips role-echo artifacts from stored human turns.
//! The same functions run on the write path (formatting a fresh
//! completion) and the read path (reconstructing a stored transcript
//! entry), so a transcript can persist only the raw text and re-derive
//! the structured form on every fetch.
//!
//! # Algorithm
//!
//! 1. Find the first occurrence of the literal delimiter phrase
//!    `"You might have the following questions:"`. Text before it is
//!    the primary content; text after it is the options block. No
//!    delimiter means the whole input is content.
//! 2. In the options block, strip all newlines, split on every `?`
//!    (whitespace after a `?` belongs to the separator), trim each
//!    fragment, discard empties, and re-append a single `?`.
//! 3. In assistant primary content, rewrite every maximal
//!    `https?://\S+` span as a `[URL](URL)` markdown link.
//! 4. In human turns, drop any line that is exactly the word `user`
//!    before splitting.
//!
//! Every function is total over strings: malformed input degrades to
//! "treat it all as content" rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Role, TurnRecord};

/// Fixed phrase separating an answer from its follow-up questions.
///
/// The upstream prompt instructs the model to emit this literal before
/// the follow-up block; it is matched as an exact, case-sensitive
/// substring, never as a pattern.
pub const OPTIONS_DELIMITER: &str = "You might have the following questions:";

/// Maximal `http(s)` URL span. Prefix match only — no validation, and
/// trailing sentence punctuation glued to the URL stays in the span.
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// Split raw text into `(primary_content, options_text)` at the first
/// occurrence of [`OPTIONS_DELIMITER`].
///
/// Both halves are trimmed. If the delimiter is absent the whole
/// trimmed input is returned as content with an empty options block,
/// which makes the split idempotent: re-splitting already-split
/// content changes nothing.
pub fn split_options(raw: &str) -> (String, String) {
    match raw.find(OPTIONS_DELIMITER) {
        Some(pos) => {
            let content = raw[..pos].trim().to_string();
            let options_text = raw[pos + OPTIONS_DELIMITER.len()..].trim().to_string();
            (content, options_text)
        }
        None => (raw.trim().to_string(), String::new()),
    }
}

/// Segment an options block into discrete trailing questions.
///
/// Newlines are removed first — the model may wrap one run of
/// concatenated questions across arbitrary line breaks. Every `?` is a
/// split point (whitespace after it is consumed by the separator);
/// surviving fragments are trimmed and get a single `?` re-appended.
///
/// A non-empty trailing fragment with no `?` of its own still receives
/// one, so text cut off mid-sentence surfaces as a (possibly
/// malformed) final question rather than being dropped.
pub fn segment_questions(options_text: &str) -> Vec<String> {
    let flat = options_text.replace('\n', "");
    flat.split('?')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| format!("{}?", fragment))
        .collect()
}

/// Rewrite every raw URL in `content` as a `[URL](URL)` markdown link.
///
/// The identical matched span is used as both label and target. Spans
/// already inside markdown brackets are not recognized as such; this
/// is only ever applied to raw transcript text, never to its own
/// output.
pub fn normalize_links(content: &str) -> String {
    URL_RE.replace_all(content, "[$0]($0)").into_owned()
}

/// Strip role-echo artifact lines from a stored human turn.
///
/// The upstream chat template echoes the speaker role inline with the
/// message body, so stored human turns often begin with a line that is
/// just `user`. Any line whose trimmed, lowercased text is exactly
/// `user` is dropped; survivors are rejoined with single spaces and
/// trimmed. Running this twice yields the same result as running it
/// once.
pub fn sanitize_human(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.to_lowercase() != "user")
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Decode one raw transcript entry into a [`TurnRecord`].
///
/// Assistant turns: split → normalize links in the content → segment
/// the options block. Human turns: sanitize first, then the same split
/// and segment steps (human turns rarely contain the delimiter, so
/// their options are typically empty, but the pipeline is uniform
/// across roles). Links are normalized only in assistant content.
///
/// `role_label` and `timestamp` are left unset; the calling layer
/// attaches them when it has them.
pub fn decode_turn(role: Role, raw_text: &str) -> TurnRecord {
    let (content, options) = match role {
        Role::Assistant => {
            let (content, options_text) = split_options(raw_text);
            (normalize_links(&content), segment_questions(&options_text))
        }
        Role::Human => {
            let sanitized = sanitize_human(raw_text);
            let (content, options_text) = split_options(&sanitized);
            (content, segment_questions(&options_text))
        }
    };

    TurnRecord {
        role,
        content,
        options,
        role_label: None,
        timestamp: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_delimiter() {
        let raw = "The strategy improves access. You might have the following questions: What is it? How does it help?";
        let (content, options_text) = split_options(raw);
        assert_eq!(content, "The strategy improves access.");
        assert_eq!(options_text, "What is it? How does it help?");
    }

    #[test]
    fn test_split_without_delimiter() {
        let (content, options_text) = split_options("  No follow-ups here.  ");
        assert_eq!(content, "No follow-ups here.");
        assert_eq!(options_text, "");
    }

    #[test]
    fn test_split_empty_input() {
        let (content, options_text) = split_options("");
        assert_eq!(content, "");
        assert_eq!(options_text, "");
    }

    #[test]
    fn test_split_delimiter_only() {
        let (content, options_text) = split_options(OPTIONS_DELIMITER);
        assert_eq!(content, "");
        assert_eq!(options_text, "");
    }

    #[test]
    fn test_split_uses_first_delimiter_occurrence() {
        let raw = format!("A {} B {} C?", OPTIONS_DELIMITER, OPTIONS_DELIMITER);
        let (content, options_text) = split_options(&raw);
        assert_eq!(content, "A");
        assert!(options_text.starts_with("B"));
    }

    #[test]
    fn test_split_is_idempotent() {
        let raw = "First part. You might have the following questions: One? Two?";
        let (content, _) = split_options(raw);
        let (again, options_text) = split_options(&content);
        assert_eq!(again, content);
        assert_eq!(options_text, "");
    }

    #[test]
    fn test_split_never_leaves_delimiter_behind() {
        let inputs = [
            "plain text",
            "You might have the following questions: A?",
            "x You might have the following questions:",
            "",
        ];
        for raw in inputs {
            let (content, _) = split_options(raw);
            assert!(
                !content.contains(OPTIONS_DELIMITER),
                "delimiter survived in {:?}",
                content
            );
        }
    }

    #[test]
    fn test_segment_two_questions() {
        let questions = segment_questions("What is it? How does it help?");
        assert_eq!(questions, vec!["What is it?", "How does it help?"]);
    }

    #[test]
    fn test_segment_strips_newlines_first() {
        let questions = segment_questions("What is\nthe plan? How does it\nwork?");
        assert_eq!(questions, vec!["What isthe plan?", "How does itwork?"]);
    }

    #[test]
    fn test_segment_round_trips_well_formed_questions() {
        let original = vec![
            "What is the strategy?".to_string(),
            "Who does it serve?".to_string(),
            "When does it start?".to_string(),
        ];
        let joined = original.join(" ");
        assert_eq!(segment_questions(&joined), original);
    }

    #[test]
    fn test_segment_empty_input() {
        assert!(segment_questions("").is_empty());
        assert!(segment_questions("   \n  ").is_empty());
    }

    #[test]
    fn test_segment_trailing_fragment_without_question_mark() {
        // Leftover text cut off mid-sentence becomes a final question.
        let questions = segment_questions("What is it? And also the");
        assert_eq!(questions, vec!["What is it?", "And also the?"]);
    }

    #[test]
    fn test_segment_no_question_mark_at_all() {
        let questions = segment_questions("just some text");
        assert_eq!(questions, vec!["just some text?"]);
    }

    #[test]
    fn test_segment_stray_question_marks() {
        let questions = segment_questions("?? A? ?");
        assert_eq!(questions, vec!["A?"]);
    }

    #[test]
    fn test_segment_preserves_order() {
        let questions = segment_questions("Third first? First second? Second third?");
        assert_eq!(
            questions,
            vec!["Third first?", "First second?", "Second third?"]
        );
    }

    #[test]
    fn test_normalize_links_wraps_url() {
        let out = normalize_links("See https://example.com/page for details");
        assert_eq!(
            out,
            "See [https://example.com/page](https://example.com/page) for details"
        );
    }

    #[test]
    fn test_normalize_links_http_scheme() {
        let out = normalize_links("at http://gov.bc.ca now");
        assert_eq!(out, "at [http://gov.bc.ca](http://gov.bc.ca) now");
    }

    #[test]
    fn test_normalize_links_trailing_punctuation_stays_in_span() {
        // Prefix match keeps the sentence period inside the URL.
        let out = normalize_links("Learn more at https://example.com/page.");
        assert_eq!(
            out,
            "Learn more at [https://example.com/page.](https://example.com/page.)"
        );
    }

    #[test]
    fn test_normalize_links_multiple_urls() {
        let out = normalize_links("https://a.example and https://b.example");
        assert_eq!(
            out,
            "[https://a.example](https://a.example) and [https://b.example](https://b.example)"
        );
    }

    #[test]
    fn test_normalize_links_leaves_other_text_untouched() {
        let text = "No links here, just punctuation: a, b; c.";
        assert_eq!(normalize_links(text), text);
    }

    #[test]
    fn test_sanitize_drops_user_line() {
        assert_eq!(sanitize_human("user\nWhat is the DLS?"), "What is the DLS?");
    }

    #[test]
    fn test_sanitize_is_case_insensitive_and_trims() {
        assert_eq!(sanitize_human("  USER  \nHello there"), "Hello there");
    }

    #[test]
    fn test_sanitize_joins_surviving_lines_with_spaces() {
        assert_eq!(sanitize_human("user\nline one\nline two"), "line one line two");
    }

    #[test]
    fn test_sanitize_keeps_user_inside_longer_line() {
        assert_eq!(sanitize_human("the user asked"), "the user asked");
    }

    #[test]
    fn test_sanitize_idempotent() {
        let inputs = ["user\nWhat is it?", "plain", "", "user\nuser\nx\nuser"];
        for raw in inputs {
            let once = sanitize_human(raw);
            assert_eq!(sanitize_human(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_decode_assistant_turn() {
        let raw = "The strategy improves access. You might have the following questions: What is it? How does it help?";
        let record = decode_turn(Role::Assistant, raw);
        assert_eq!(record.role, Role::Assistant);
        assert_eq!(record.content, "The strategy improves access.");
        assert_eq!(record.options, vec!["What is it?", "How does it help?"]);
        assert!(record.role_label.is_none());
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_decode_assistant_without_options() {
        let record = decode_turn(Role::Assistant, "No follow-ups here.");
        assert_eq!(record.content, "No follow-ups here.");
        assert!(record.options.is_empty());
    }

    #[test]
    fn test_decode_assistant_normalizes_links_in_content_only() {
        let raw = "Read https://example.com/a. You might have the following questions: Is https://example.com/b down?";
        let record = decode_turn(Role::Assistant, raw);
        assert_eq!(
            record.content,
            "Read [https://example.com/a.](https://example.com/a.)"
        );
        // Options keep raw URLs.
        assert_eq!(record.options, vec!["Is https://example.com/b down?"]);
    }

    #[test]
    fn test_decode_human_turn_sanitizes() {
        let record = decode_turn(Role::Human, "user\nWhat is the DLS?");
        assert_eq!(record.role, Role::Human);
        assert_eq!(record.content, "What is the DLS?");
        assert!(record.options.is_empty());
    }

    #[test]
    fn test_decode_human_turn_does_not_normalize_links() {
        let record = decode_turn(Role::Human, "user\nIs https://example.com up?");
        assert_eq!(record.content, "Is https://example.com up?");
    }

    #[test]
    fn test_decode_is_deterministic() {
        let raw = "A.\nYou might have the following questions:\nB? C?";
        let a = decode_turn(Role::Assistant, raw);
        let b = decode_turn(Role::Assistant, raw);
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_multiline_options_block() {
        let raw = "Answer here.\nYou might have the following questions:\nWhat about\nfunding? Who decides?\n";
        let record = decode_turn(Role::Assistant, raw);
        assert_eq!(record.content, "Answer here.");
        assert_eq!(record.options, vec!["What aboutfunding?", "Who decides?"]);
    }

    #[test]
    fn test_decode_never_fails_on_degenerate_input() {
        for raw in ["", "?", "???", "\n\n", OPTIONS_DELIMITER] {
            let record = decode_turn(Role::Assistant, raw);
            assert!(!record.content.contains(OPTIONS_DELIMITER));
            for q in &record.options {
                assert!(q.ends_with('?'));
                assert!(!q.trim_end_matches('?').trim().is_empty());
            }
        }
    }
}
