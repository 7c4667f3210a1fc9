//! Fence extraction — pull the interior of the first fenced code block out
//! of raw model output.
//!
//! Tolerant by design: some backends prepend stray whitespace or
//! commentary before the fence, and a response cut off by a token limit
//! may never close it. Neither case aborts extraction.

use tracing::warn;

const FENCE: &str = "```";

/// Extract the interior of the first triple-backtick fenced block.
///
/// A fence that does not open at position 0 is logged as a warning but
/// still honored. When no closing fence exists, the remainder of the text
/// is returned — callers must treat it as possibly truncated. Text with no
/// fence at all is returned unchanged.
pub fn extract_first_fence(text: &str) -> &str {
    let Some(first) = text.find(FENCE) else {
        warn!("No code fence found in response");
        return text;
    };

    if first != 0 {
        warn!(index = first, "First code fence is not at index 0");
    }

    // Content starts after the opening fence line (which carries the
    // language tag).
    let content_start = match text[first..].find('\n') {
        Some(newline) => first + newline + 1,
        None => return "",
    };

    match text[content_start..].find(FENCE) {
        Some(close) => &text[content_start..content_start + close],
        None => &text[content_start..],
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing::{span, Event, Level, Metadata, Subscriber};

    use super::*;

    /// Counts warning-level events emitted while a closure runs.
    struct WarnCounter(Arc<AtomicUsize>);

    impl Subscriber for WarnCounter {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            *metadata.level() == Level::WARN
        }
        fn new_span(&self, _attrs: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }
        fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}
        fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}
        fn event(&self, event: &Event<'_>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn enter(&self, _span: &span::Id) {}
        fn exit(&self, _span: &span::Id) {}
    }

    fn warnings_during(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = WarnCounter(count.clone());
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn extracts_interior_of_first_fence() {
        assert_eq!(extract_first_fence("```js\nconst x=1;\n```"), "const x=1;\n");
    }

    #[test]
    fn fence_at_index_zero_emits_no_warning() {
        let warnings = warnings_during(|| {
            extract_first_fence("```js\nconst x=1;\n```");
        });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn misplaced_fence_emits_one_warning() {
        let warnings = warnings_during(|| {
            extract_first_fence("Here is the code:\n```rs\nlet a = 2;\n```");
        });
        assert_eq!(warnings, 1);
    }

    #[test]
    fn absent_fence_emits_one_warning() {
        let warnings = warnings_during(|| {
            extract_first_fence("plain prose, no code");
        });
        assert_eq!(warnings, 1);
    }

    #[test]
    fn ignores_language_tag() {
        let text = "```python\nprint('hi')\n```\ntrailing commentary";
        assert_eq!(extract_first_fence(text), "print('hi')\n");
    }

    #[test]
    fn tolerates_leading_commentary() {
        let text = "Here is the code:\n```rs\nlet a = 2;\n```";
        assert_eq!(extract_first_fence(text), "let a = 2;\n");
    }

    #[test]
    fn missing_closing_fence_returns_remainder() {
        let text = "```py\nx = 1\ny = 2\n";
        assert_eq!(extract_first_fence(text), "x = 1\ny = 2\n");
    }

    #[test]
    fn no_fence_returns_text_unchanged() {
        let text = "plain prose, no code";
        assert_eq!(extract_first_fence(text), text);
    }

    #[test]
    fn unterminated_opening_line_yields_empty() {
        assert_eq!(extract_first_fence("```py"), "");
    }

    #[test]
    fn only_first_block_is_extracted() {
        let text = "```a\nfirst\n```\n```b\nsecond\n```";
        assert_eq!(extract_first_fence(text), "first\n");
    }

    #[test]
    fn empty_block() {
        assert_eq!(extract_first_fence("```\n```"), "");
    }
}
