//! Built-in demonstration corpus.
//!
//! Four short x86-64 function bodies, one per language, told apart only by the
//! runtime they call into. Used by the CLI `demo` command and by smoke tests.

use crate::features::FeatureExtractor;
use crate::model::TrainingData;

/// Default number of copies of each snippet in the demo training set.
pub const DEFAULT_DEMO_COPIES: usize = 50;

pub const C_SNIPPET: &str = "
        push rbp
        mov rbp, rsp
        sub rsp, 16
        call malloc
        mov [rbp-8], rax
        call free
        mov rsp, rbp
        pop rbp
        ret
";

pub const CPP_SNIPPET: &str = "
        push rbp
        mov rbp, rsp
        sub rsp, 16
        call _Znwm
        mov [rbp-8], rax
        call _ZdlPv
        mov rsp, rbp
        pop rbp
        ret
";

pub const PYTHON_SNIPPET: &str = "
        push rbp
        mov rbp, rsp
        call PyObject_CallMethod
        mov [rbp-8], rax
        call Py_INCREF
        call Py_DECREF
        mov rsp, rbp
        pop rbp
        ret
";

pub const GO_SNIPPET: &str = "
        push rbp
        mov rbp, rsp
        call runtime.newobject
        mov [rbp-8], rax
        call runtime.gcWriteBarrier
        call fmt.Println
        mov rsp, rbp
        pop rbp
        ret
";

/// `(label, assembly)` pairs of the demo corpus.
pub const DEMO_SNIPPETS: [(&str, &str); 4] =
    [("C", C_SNIPPET), ("C++", CPP_SNIPPET), ("Python", PYTHON_SNIPPET), ("Go", GO_SNIPPET)];

/// Training set holding `copies` fingerprints of each demo snippet.
pub fn demo_training_data(copies: usize) -> TrainingData {
    let extractor = FeatureExtractor::new();
    let mut data = TrainingData::new();
    for (label, assembly) in DEMO_SNIPPETS {
        let fingerprint = extractor.extract(assembly);
        for _ in 0..copies {
            data.push(fingerprint.clone(), label);
        }
    }
    data
}
