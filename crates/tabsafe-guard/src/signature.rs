//! Recognition of the targeted fault class.
//!
//! Matching is a literal substring comparison against the host framework's
//! exact error texts. This is fragile on purpose: a framework version that
//! changes its message silently disables the net, and a genuine application
//! bug that happens to produce the same text is suppressed identically to a
//! cosmetic one. The source system behaves the same way and nothing here
//! tries to disambiguate.

/// Error texts the host framework emits when its table renderer invokes the
/// existence-check primitive on a non-collection value.
pub const FAULT_SIGNATURES: &[&str] = &[
    ".some is not a function",
    "Cannot read properties of null (reading 'some')",
    "Cannot read properties of undefined (reading 'some')",
];

/// True when `message` carries one of the known fault signatures.
pub fn matches_fault_signature(message: &str) -> bool {
    FAULT_SIGNATURES
        .iter()
        .any(|signature| message.contains(signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_texts() {
        assert!(matches_fault_signature(
            "TypeError: rawData.some is not a function"
        ));
        assert!(matches_fault_signature(
            "Uncaught TypeError: Cannot read properties of null (reading 'some')"
        ));
    }

    #[test]
    fn ignores_unrelated_errors() {
        assert!(!matches_fault_signature("ReferenceError: x is not defined"));
        assert!(!matches_fault_signature("TypeError: y.map is not a function"));
    }
}
