/// Keywords that name a type without any declaration.
pub const PRIMITIVES: [&str; 9] = [
    "byte", "short", "int", "long", "float", "double", "char", "boolean", "void",
];

/// Implicitly imported into every compilation unit.
pub const JAVA_LANG: &str = "java.lang";

/// What an unbounded type parameter erases to.
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert!(is_primitive("void"));
        assert!(is_primitive("boolean"));
        assert!(!is_primitive("Integer"));
        assert!(!is_primitive("java.lang.int"));
    }
}
