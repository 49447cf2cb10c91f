/// Identifiers that cannot be used verbatim as generated argument or field
/// names. Covers the reserved words of the usual render targets.
pub const RESERVED_WORDS: &[&str] = &[
    "alignas", "alignof", "and", "as", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "continue", "default", "delete", "do", "double", "else",
    "enum", "explicit", "export", "extern", "false", "float", "fn", "for", "friend", "goto",
    "if", "impl", "import", "inline", "int", "let", "long", "loop", "match", "mod", "move",
    "mut", "namespace", "new", "not", "operator", "or", "private", "protected", "pub",
    "public", "register", "return", "self", "short", "signed", "sizeof", "static", "struct",
    "switch", "template", "this", "throw", "trait", "true", "try", "type", "typedef",
    "typename", "union", "unsigned", "use", "using", "virtual", "void", "volatile", "where",
    "while",
];

/// Convert PascalCase or camelCase to snake_case.
///
/// # Examples
/// ```
/// use nodegen_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FooBar"), "foo_bar");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Append `_` to identifiers that collide with a reserved word.
///
/// # Examples
/// ```
/// use nodegen_core::utils::avoid_keyword;
/// assert_eq!(avoid_keyword("float"), "float_");
/// assert_eq!(avoid_keyword("target"), "target");
/// ```
pub fn avoid_keyword(ident: &str) -> String {
    if is_reserved(ident) {
        format!("{ident}_")
    } else {
        ident.to_string()
    }
}

pub fn is_reserved(ident: &str) -> bool {
    RESERVED_WORDS.contains(&ident)
}
