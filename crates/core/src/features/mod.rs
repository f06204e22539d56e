//! Feature extraction: assembly text to fixed-length fingerprints.
//!
//! The extractor is a pure function of its input. Per-sample counters live in
//! an [`AsmProfile`] built fresh for every call, and the fingerprint is a fixed
//! projection of that profile whose slot order is [`FINGERPRINT_SLOTS`].

mod matcher;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Fingerprint;

pub use matcher::{MentionMatcher, SubstringMatcher};

/// Opcodes whose counts appear in the fingerprint, in slot order.
pub const TRACKED_OPCODES: [&str; 6] = ["mov", "push", "pop", "add", "sub", "call"];

/// Substrings that mark a line as a jump. Checked in this order; a line counts once.
pub const JUMP_MNEMONICS: [&str; 5] = ["jmp", "je", "jne", "jg", "jl"];

/// Library/runtime signatures counted over the raw listing, in slot order.
pub const SIGNATURE_PATTERNS: [&str; 8] =
    ["malloc", "free", "_Z", "std::", "PyObject", "Py_", "runtime.", "fmt."];

/// General-purpose register names tracked per instruction line.
pub const REGISTERS: [&str; 16] = [
    "rax", "rbx", "rcx", "rdx", "rsi", "rdi", "rbp", "rsp", "eax", "ebx", "ecx", "edx", "esi",
    "edi", "ebp", "esp",
];

/// Registers whose mention counts appear in the fingerprint, in slot order.
pub const FINGERPRINT_REGISTERS: [&str; 3] = ["rax", "rbx", "rcx"];

/// Number of slots in every fingerprint produced by this module.
pub const FINGERPRINT_LEN: usize =
    1 + TRACKED_OPCODES.len() + 2 + SIGNATURE_PATTERNS.len() + FINGERPRINT_REGISTERS.len();

/// Human-readable name of each fingerprint slot, in order.
pub const FINGERPRINT_SLOTS: [&str; FINGERPRINT_LEN] = [
    "instructions",
    "op_mov",
    "op_push",
    "op_pop",
    "op_add",
    "op_sub",
    "op_call",
    "jump_lines",
    "call_lines",
    "sig_malloc",
    "sig_free",
    "sig_cxx_mangled",
    "sig_std_namespace",
    "sig_pyobject",
    "sig_py_api",
    "sig_go_runtime",
    "sig_go_fmt",
    "reg_rax",
    "reg_rbx",
    "reg_rcx",
];

/// Whether a line carries no instruction.
///
/// Blank lines and lines whose first non-whitespace character is `#` or `.`
/// (comments, directives, local labels in assembler output) are ignored.
pub fn is_ignored_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('.')
}

/// Drop ignored lines from raw compiler output.
///
/// Every kept line is terminated with `\n`. Applying this to already-clean
/// text returns it unchanged apart from line endings.
pub fn strip_directives(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for line in raw.lines().filter(|line| !is_ignored_line(line)) {
        cleaned.push_str(line);
        cleaned.push('\n');
    }
    cleaned
}

/// Every counter collected from one assembly sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmProfile {
    /// Number of instruction (non-ignored) lines.
    pub total_instructions: usize,
    /// Lower-cased opcode mnemonic to occurrence count.
    pub opcodes: BTreeMap<String, usize>,
    /// Register name to number of instruction lines mentioning it.
    pub registers: BTreeMap<String, usize>,
    /// Lines of the raw text that look like jumps.
    pub jump_lines: usize,
    /// Lines of the raw text that mention `call`.
    pub call_lines: usize,
    /// Occurrences of each [`SIGNATURE_PATTERNS`] entry, same order.
    pub signatures: [usize; SIGNATURE_PATTERNS.len()],
}

impl AsmProfile {
    pub fn opcode_count(&self, opcode: &str) -> usize {
        self.opcodes.get(opcode).copied().unwrap_or(0)
    }

    pub fn register_count(&self, register: &str) -> usize {
        self.registers.get(register).copied().unwrap_or(0)
    }

    /// Project the profile onto the fixed fingerprint layout.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut values = Vec::with_capacity(FINGERPRINT_LEN);
        values.push(self.total_instructions as f64);
        values.extend(TRACKED_OPCODES.iter().map(|op| self.opcode_count(op) as f64));
        values.push(self.jump_lines as f64);
        values.push(self.call_lines as f64);
        values.extend(self.signatures.iter().map(|count| *count as f64));
        values.extend(FINGERPRINT_REGISTERS.iter().map(|reg| self.register_count(reg) as f64));
        debug_assert_eq!(values.len(), FINGERPRINT_LEN);
        Fingerprint::new(values)
    }
}

/// Converts assembly listings into fingerprints.
///
/// Stateless between calls; one extractor can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor<M = SubstringMatcher> {
    matcher: M,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self { matcher: SubstringMatcher }
    }
}

impl<M: MentionMatcher> FeatureExtractor<M> {
    /// Build an extractor that uses a custom mention matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Fingerprint one assembly sample. Never fails; unknown tokens are ignored.
    pub fn extract(&self, assembly: &str) -> Fingerprint {
        self.profile(assembly).fingerprint()
    }

    /// Collect the full counter set for one assembly sample.
    pub fn profile(&self, assembly: &str) -> AsmProfile {
        let mut profile = AsmProfile::default();

        for line in assembly.lines() {
            if is_ignored_line(line) {
                continue;
            }
            self.record_instruction(&mut profile, line);
        }

        profile.jump_lines = self.count_jump_lines(assembly);
        profile.call_lines = self.count_call_lines(assembly);
        for (slot, pattern) in profile.signatures.iter_mut().zip(SIGNATURE_PATTERNS) {
            *slot = self.count_library_calls(assembly, pattern);
        }

        profile
    }

    fn record_instruction(&self, profile: &mut AsmProfile, line: &str) {
        if let Some(opcode) = line.split_whitespace().next() {
            *profile.opcodes.entry(opcode.to_lowercase()).or_insert(0) += 1;
        }

        for register in REGISTERS {
            if self.matcher.mentions(line, register) {
                *profile.registers.entry(register.to_string()).or_insert(0) += 1;
            }
        }

        profile.total_instructions += 1;
    }

    /// Lines (any line, ignored or not) containing a jump mnemonic, case-insensitive.
    pub fn count_jump_lines(&self, assembly: &str) -> usize {
        assembly
            .lines()
            .map(str::to_lowercase)
            .filter(|line| JUMP_MNEMONICS.iter().any(|jump| self.matcher.mentions(line, jump)))
            .count()
    }

    /// Lines (any line, ignored or not) containing `call`, case-insensitive.
    pub fn count_call_lines(&self, assembly: &str) -> usize {
        assembly
            .lines()
            .map(str::to_lowercase)
            .filter(|line| self.matcher.mentions(line, "call"))
            .count()
    }

    /// Non-overlapping occurrences of a library/runtime pattern in the raw text.
    pub fn count_library_calls(&self, assembly: &str, pattern: &str) -> usize {
        self.matcher.occurrences(assembly, pattern)
    }
}
