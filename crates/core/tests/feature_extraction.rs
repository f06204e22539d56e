use asmid_core::demo::{CPP_SNIPPET, C_SNIPPET, GO_SNIPPET, PYTHON_SNIPPET};
use asmid_core::features::{
    strip_directives, FeatureExtractor, MentionMatcher, FINGERPRINT_LEN, FINGERPRINT_SLOTS,
};

fn slot(name: &str) -> usize {
    FINGERPRINT_SLOTS.iter().position(|s| *s == name).expect("known slot")
}

#[test]
fn fingerprint_has_fixed_length() {
    let extractor = FeatureExtractor::new();
    for text in ["", "mov rax, rbx", C_SNIPPET, GO_SNIPPET] {
        assert_eq!(extractor.extract(text).len(), FINGERPRINT_LEN);
    }
}

#[test]
fn comment_and_directive_only_text_yields_zero_fingerprint() {
    let text = "# generated by gcc\n\t.file \"x.c\"\n\n.section .text\n   # indented\n\t.globl f\n";
    let fingerprint = FeatureExtractor::new().extract(text);
    assert!(fingerprint.is_zero(), "expected all zeros, got {:?}", fingerprint);
}

#[test]
fn empty_text_yields_zero_fingerprint() {
    assert!(FeatureExtractor::new().extract("").is_zero());
}

#[test]
fn extraction_is_deterministic() {
    let extractor = FeatureExtractor::new();
    for text in [C_SNIPPET, CPP_SNIPPET, PYTHON_SNIPPET, GO_SNIPPET] {
        let first = extractor.extract(text);
        let second = FeatureExtractor::new().extract(text);
        let bits = |f: &asmid_core::Fingerprint| {
            f.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        };
        assert_eq!(bits(&first), bits(&second));
    }
}

#[test]
fn c_snippet_fills_expected_slots() {
    let f = FeatureExtractor::new().extract(C_SNIPPET);
    let v = f.as_slice();
    assert_eq!(v[slot("instructions")], 9.0);
    assert_eq!(v[slot("op_mov")], 3.0);
    assert_eq!(v[slot("op_push")], 1.0);
    assert_eq!(v[slot("op_pop")], 1.0);
    assert_eq!(v[slot("op_add")], 0.0);
    assert_eq!(v[slot("op_sub")], 1.0);
    assert_eq!(v[slot("op_call")], 2.0);
    assert_eq!(v[slot("jump_lines")], 0.0);
    assert_eq!(v[slot("call_lines")], 2.0);
    assert_eq!(v[slot("sig_malloc")], 1.0);
    assert_eq!(v[slot("sig_free")], 1.0);
    assert_eq!(v[slot("sig_cxx_mangled")], 0.0);
    assert_eq!(v[slot("reg_rax")], 1.0);
    assert_eq!(v[slot("reg_rbx")], 0.0);
    assert_eq!(v[slot("reg_rcx")], 0.0);
}

#[test]
fn runtime_signatures_land_in_their_slots() {
    let extractor = FeatureExtractor::new();

    let cpp = extractor.extract(CPP_SNIPPET);
    assert_eq!(cpp.as_slice()[slot("sig_cxx_mangled")], 2.0);

    let py = extractor.extract(PYTHON_SNIPPET);
    assert_eq!(py.as_slice()[slot("sig_pyobject")], 1.0);
    assert_eq!(py.as_slice()[slot("sig_py_api")], 2.0);

    let go = extractor.extract(GO_SNIPPET);
    assert_eq!(go.as_slice()[slot("sig_go_runtime")], 2.0);
    assert_eq!(go.as_slice()[slot("sig_go_fmt")], 1.0);

    let std = extractor.extract("call std::vector<int>::push_back\ncall std::move\n");
    assert_eq!(std.as_slice()[slot("sig_std_namespace")], 2.0);
}

#[test]
fn signatures_count_inside_ignored_lines() {
    // Signature and jump/call scans see the raw listing, not only instructions.
    let f = FeatureExtractor::new().extract("# wraps malloc\n.globl malloc_wrapper\njmp .L1\n");
    let v = f.as_slice();
    assert_eq!(v[slot("instructions")], 1.0);
    assert_eq!(v[slot("sig_malloc")], 2.0);
    assert_eq!(v[slot("jump_lines")], 1.0);
}

#[test]
fn register_mentions_are_substring_matches() {
    let f = FeatureExtractor::new().extract("lea rdi, [rip+syntax_rax]\nmov rcx, rbx\n");
    let v = f.as_slice();
    assert_eq!(v[slot("reg_rax")], 1.0);
    assert_eq!(v[slot("reg_rbx")], 1.0);
    assert_eq!(v[slot("reg_rcx")], 1.0);
}

#[test]
fn profile_tracks_all_sixteen_registers() {
    let profile = FeatureExtractor::new().profile("mov esi, edi\nxor rdx, rdx\n");
    assert_eq!(profile.register_count("esi"), 1);
    assert_eq!(profile.register_count("edi"), 1);
    assert_eq!(profile.register_count("rdx"), 1);
    assert_eq!(profile.opcode_count("xor"), 1);
    let expected = FeatureExtractor::new().extract("mov esi, edi\nxor rdx, rdx\n");
    assert_eq!(profile.fingerprint(), expected);
}

#[test]
fn stripping_directives_keeps_instruction_slots() {
    let raw = "\t.text\n\t.globl f\nf:\n\tpush rbp\n\tmov rbp, rsp\n\tpop rbp\n\tret\n\t.size f, .-f\n";
    let extractor = FeatureExtractor::new();
    let raw_print = extractor.extract(raw);
    let clean_print = extractor.extract(&strip_directives(raw));
    for name in ["instructions", "op_mov", "op_push", "op_pop", "reg_rax"] {
        assert_eq!(raw_print.as_slice()[slot(name)], clean_print.as_slice()[slot(name)], "{name}");
    }
    assert_eq!(strip_directives(&strip_directives(raw)), strip_directives(raw));
}

struct WholeWordMatcher;

impl MentionMatcher for WholeWordMatcher {
    fn mentions(&self, haystack: &str, needle: &str) -> bool {
        haystack.split(|c: char| !c.is_alphanumeric() && c != '_' && c != '.').any(|t| t == needle)
    }

    fn occurrences(&self, haystack: &str, needle: &str) -> usize {
        haystack.split(|c: char| !c.is_alphanumeric() && c != '_').filter(|t| *t == needle).count()
    }
}

#[test]
fn custom_matcher_keeps_fingerprint_layout() {
    let extractor = FeatureExtractor::with_matcher(WholeWordMatcher);
    let f = extractor.extract("lea rdi, [rip+syntax_rax]\nmov rax, 1\n");
    assert_eq!(f.len(), FINGERPRINT_LEN);
    assert_eq!(f.as_slice()[slot("reg_rax")], 1.0);
}
