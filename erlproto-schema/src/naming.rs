//! Name construction and Erlang identifier conversion.
//!
//! Every node of the model is named three ways: its local protobuf name, its
//! dotted full name inside the package, and its absolute name (`.pkg.Full`)
//! used as the batch-wide lookup key. Erlang identifiers are derived from the
//! full name with [`to_snake_case`].

/// Separator used in Erlang identifiers.
pub const SEPARATOR: char = '_';

/// Erlang reserved words, which must be quoted when used as atoms.
const RESERVED_WORDS: &[&str] = &[
    "after", "and", "andalso", "band", "begin", "bnot", "bor", "bsl", "bsr", "bxor", "case",
    "catch", "cond", "div", "else", "end", "fun", "if", "let", "maybe", "not", "of", "or",
    "orelse", "receive", "rem", "try", "when", "xor",
];

/// Joins the local names of a declaration chain into a dotted full name.
///
/// `leaf_first` yields the node's own name followed by each ancestor up to
/// the outermost declaration; the result is ordered root first.
#[must_use]
pub fn qualified_name<'a, I>(leaf_first: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parts: Vec<&str> = leaf_first.into_iter().collect();
    parts.reverse();
    parts.join(".")
}

/// Returns the absolute name of a declaration: `.package.FullName`.
///
/// Files without a package produce `.FullName`, matching the type names
/// protoc writes into field descriptors.
#[must_use]
pub fn absolute_name(package: &str, full_name: &str) -> String {
    if package.is_empty() {
        format!(".{full_name}")
    } else {
        format!(".{package}.{full_name}")
    }
}

/// Converts a CamelCase (possibly dotted) name to a snake_case identifier.
///
/// Dots become separators. A separator is inserted before an uppercase
/// letter when the previous character is lowercase or the next one is, so
/// runs of capitals stay together: `HTTPStatus` becomes `http_status`.
/// Digits and existing separators pass through unchanged.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name
        .chars()
        .map(|c| if c == '.' { SEPARATOR } else { c })
        .collect();
    let mut result = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            result.push(c);
            continue;
        }

        let word_start = i > 0 && chars[i - 1].is_ascii_lowercase();
        let word_end = i + 1 < chars.len() && chars[i + 1].is_ascii_lowercase();

        if i > 0 && (word_start || word_end) && chars[i - 1] != SEPARATOR {
            result.push(SEPARATOR);
        }

        result.push(c.to_ascii_lowercase());
    }

    result
}

/// Converts a protobuf package name to an Erlang module name.
#[must_use]
pub fn package_to_module_name(package: &str) -> String {
    to_snake_case(package)
}

/// Converts an enum value name to its atom: the lower-cased name.
#[must_use]
pub fn enum_value_to_atom(name: &str) -> String {
    name.to_lowercase()
}

/// Returns `name` as it must be written in Erlang source to denote an atom.
#[must_use]
pub fn quote_atom(name: &str) -> String {
    if is_bare_atom(name) {
        return name.to_string();
    }

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('\'');
    for c in name.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn is_bare_atom(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    first.is_ascii_lowercase()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
        && !RESERVED_WORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_root_first() {
        assert_eq!(qualified_name(["Inner", "Middle", "Outer"]), "Outer.Middle.Inner");
        assert_eq!(qualified_name(["Top"]), "Top");
    }

    #[test]
    fn test_absolute_name() {
        assert_eq!(absolute_name("p", "A.B"), ".p.A.B");
        assert_eq!(absolute_name("foo.bar", "Msg"), ".foo.bar.Msg");
        assert_eq!(absolute_name("", "Msg"), ".Msg");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("MyMessage.NestedOne"), "my_message_nested_one");
        assert_eq!(to_snake_case("Outer.InnerType"), "outer_inner_type");
        assert_eq!(to_snake_case("HTTPStatus"), "http_status");
        assert_eq!(to_snake_case("GetHTTPResponse"), "get_http_response");
        assert_eq!(to_snake_case("lower"), "lower");
        assert_eq!(to_snake_case("ABC"), "abc");
        assert_eq!(to_snake_case("Int32Value"), "int32_value");
    }

    #[test]
    fn test_to_snake_case_keeps_existing_separators() {
        assert_eq!(to_snake_case("Already_Snake"), "already_snake");
        assert_eq!(to_snake_case("Outer._Inner"), "outer__inner");
    }

    #[test]
    fn test_package_to_module_name() {
        assert_eq!(package_to_module_name("p"), "p");
        assert_eq!(package_to_module_name("foo.bar"), "foo_bar");
        assert_eq!(package_to_module_name("acme.MyApi.v1"), "acme_my_api_v1");
    }

    #[test]
    fn test_enum_value_to_atom() {
        assert_eq!(enum_value_to_atom("RED"), "red");
        assert_eq!(enum_value_to_atom("STATUS_OK"), "status_ok");
    }

    #[test]
    fn test_quote_atom() {
        assert_eq!(quote_atom("red"), "red");
        assert_eq!(quote_atom("a@b_1"), "a@b_1");
        assert_eq!(quote_atom("and"), "'and'");
        assert_eq!(quote_atom("Red"), "'Red'");
        assert_eq!(quote_atom("1st"), "'1st'");
        assert_eq!(quote_atom("it's"), "'it\\'s'");
        assert_eq!(quote_atom(""), "''");
    }
}
