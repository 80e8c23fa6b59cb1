//! Signature and class-name helpers.

/// Name part of a callable signature: `foo(int,String)` -> `foo`.
pub fn callable_name(signature: &str) -> &str {
    match signature.find('(') {
        Some(idx) => &signature[..idx],
        None => signature,
    }
}

/// Simple name of a (possibly nested) class: `a.b.Outer$Inner` -> `Inner`.
pub fn simple_class_name(class: &str) -> &str {
    let start = class
        .rfind(|c| c == '.' || c == '$')
        .map(|i| i + 1)
        .unwrap_or(0);
    &class[start..]
}

/// Whether `signature` declares a constructor of `class`.
pub fn is_constructor(class: &str, signature: &str) -> bool {
    signature.contains('(') && callable_name(signature) == simple_class_name(class)
}
