/// How the extractor decides that a line or listing mentions a name.
///
/// Register mentions, jump/call detection and runtime signatures all go
/// through this trait, so a stricter tokenizer can replace the default
/// substring heuristic without changing the fingerprint layout.
pub trait MentionMatcher: Send + Sync {
    /// Whether `haystack` mentions `needle` at least once.
    fn mentions(&self, haystack: &str, needle: &str) -> bool;

    /// Number of non-overlapping mentions of `needle` in `haystack`.
    fn occurrences(&self, haystack: &str, needle: &str) -> usize;
}

/// Plain substring matching.
///
/// `rax` matches inside `[rax+8]` but also inside unrelated text such as a
/// symbol named `syntax`; those false positives are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstringMatcher;

impl MentionMatcher for SubstringMatcher {
    fn mentions(&self, haystack: &str, needle: &str) -> bool {
        haystack.contains(needle)
    }

    fn occurrences(&self, haystack: &str, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        // `matches` resumes the scan after the end of each hit.
        haystack.matches(needle).count()
    }
}
