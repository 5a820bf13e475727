use std::collections::HashSet;

use heck::ToLowerCamelCase;

/// Which characters split a token into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separators {
    /// Runs of `_` (with `-` treated as `_`).
    Underscore,
    /// Runs of any non-alphanumeric character.
    NonAlphanumeric,
}

/// Turn an arbitrary token into an exported Go identifier.
///
/// Segments are split per `separators`, empty segments are dropped, and the
/// first letter of each segment is upper-cased. The rest of a segment keeps
/// its casing, so `list_userIDs` becomes `ListUserIDs`. Separator-only input
/// yields an empty string.
///
/// Re-normalizing an already-normalized identifier is not guaranteed to be a
/// no-op for every input.
pub fn normalize_identifier(token: &str, separators: Separators) -> String {
    let is_separator = |c: char| match separators {
        Separators::Underscore => c == '_' || c == '-',
        Separators::NonAlphanumeric => !c.is_alphanumeric(),
    };

    token
        .split(is_separator)
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Final `/`-delimited segment of a reference string.
///
/// `#/components/schemas/api/v2/user/Profile` → `Profile`.
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Rewrite every `{name}` placeholder to Gin's `:name` form.
pub fn to_gin_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push(':');
        out.push_str(&rest[open + 1..open + close]);
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}

/// Placeholder names in a path template, in order of appearance.
pub fn path_placeholders(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        names.push(&rest[open + 1..open + close]);
        rest = &rest[open + close + 1..];
    }

    names
}

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Unexported Go local variable name for a parameter, e.g. `user-id` → `userId`.
pub fn go_local_name(name: &str) -> String {
    let local = name.to_lower_camel_case();
    if local.is_empty() {
        return "param".to_string();
    }
    if local.starts_with(|c: char| c.is_ascii_digit()) || GO_KEYWORDS.contains(&local.as_str()) {
        return format!("{local}Param");
    }
    local
}

/// Reduce an exported name to a legal Go identifier.
///
/// Any character other than a letter or digit splits segments as in
/// [`normalize_identifier`]. A non-empty result that does not start with a
/// letter gets `prefix`, so `2fa` with prefix `Field` becomes `Field2fa`.
pub fn go_exported_name(name: &str, prefix: &str) -> String {
    let name = normalize_identifier(name, Separators::NonAlphanumeric);
    if name.is_empty() || name.starts_with(char::is_alphabetic) {
        name
    } else {
        format!("{prefix}{name}")
    }
}

/// Return `name`, or `name` with the smallest numeric suffix not yet in
/// `seen`, and record the result.
pub fn unique_name(seen: &mut HashSet<String>, name: &str) -> String {
    if seen.insert(name.to_string()) {
        return name.to_string();
    }
    let mut i = 2;
    loop {
        let candidate = format!("{name}{i}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        i += 1;
    }
}
