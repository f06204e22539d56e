use asmid::{format_percent, read_assembly, sha256_bytes};
use tempfile::tempdir;

#[test]
fn sha256_bytes_matches_known_digest() {
    assert_eq!(
        sha256_bytes(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn read_assembly_reports_path_on_failure() {
    let dir = tempdir().expect("tempdir");
    let err = read_assembly(&dir.path().join("gone.s")).unwrap_err();
    assert!(err.to_string().contains("gone.s"));
}

#[test]
fn format_percent_uses_two_decimals() {
    assert_eq!(format_percent(0.5), "50.00%");
    assert_eq!(format_percent(1.0), "100.00%");
    assert_eq!(format_percent(0.123456), "12.35%");
}
