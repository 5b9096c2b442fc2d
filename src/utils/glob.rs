// ABOUTME: Object key-path globbing for nested JSON mappings
// ABOUTME: Flattens mappings into slash-delimited paths and filters them with glob patterns

use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use super::error::{Result, UtilsError};

pub const PATH_SEPARATOR: char = '/';

/// A leaf value and the keys leading to it from the root
#[derive(Debug, Clone, PartialEq)]
struct Leaf<'a> {
    keys: Vec<&'a str>,
    value: &'a Value,
}

impl Leaf<'_> {
    fn path(&self) -> String {
        self.keys.join("/")
    }
}

/// Depth-first walk in per-level key order. Arrays and scalars are leaves,
/// an empty nested mapping has no leaves.
fn collect_leaves<'a>(
    map: &'a Map<String, Value>,
    prefix: &mut Vec<&'a str>,
    out: &mut Vec<Leaf<'a>>,
) {
    for (key, value) in map {
        prefix.push(key.as_str());
        match value {
            Value::Object(child) => collect_leaves(child, prefix, out),
            _ => out.push(Leaf {
                keys: prefix.clone(),
                value,
            }),
        }
        prefix.pop();
    }
}

fn leaves_of(obj: &Value) -> Result<Vec<Leaf<'_>>> {
    let map = obj
        .as_object()
        .ok_or_else(|| UtilsError::not_an_object(obj))?;
    let mut leaves = Vec::new();
    collect_leaves(map, &mut Vec::new(), &mut leaves);
    Ok(leaves)
}

/// Build one slash-delimited path per leaf of a nested mapping
pub fn build_object_paths(obj: &Value) -> Result<Vec<String>> {
    Ok(leaves_of(obj)?.iter().map(Leaf::path).collect())
}

/// Paths of the leaves matching `pattern`, in traversal order
pub fn glob_paths(obj: &Value, pattern: &str) -> Result<Vec<String>> {
    let pattern = Pattern::new(pattern)?;
    Ok(leaves_of(obj)?
        .iter()
        .filter(|leaf| pattern.matches_segments(&leaf.keys))
        .map(Leaf::path)
        .collect())
}

/// Build a new mapping holding only the leaves whose path matches `pattern`.
///
/// The original nesting is kept for matched leaves; branches without a
/// matching leaf are dropped entirely, so no empty parents remain.
pub fn glob_object(obj: &Value, pattern: &str) -> Result<Value> {
    let pattern = Pattern::new(pattern)?;
    let leaves = leaves_of(obj)?;
    let total = leaves.len();

    let mut result = Map::new();
    let mut matched = 0;
    for leaf in leaves {
        if pattern.matches_segments(&leaf.keys) {
            insert_at(&mut result, &leaf.keys, leaf.value.clone());
            matched += 1;
        }
    }

    debug!(
        "Glob '{}' matched {} of {} object paths",
        pattern, matched, total
    );
    Ok(Value::Object(result))
}

fn insert_at(map: &mut Map<String, Value>, keys: &[&str], value: Value) {
    match keys {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [first, rest @ ..] => {
            let child = map
                .entry((*first).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            // Leaf paths are unique, so an existing entry on the way down is always a mapping
            if let Value::Object(child) = child {
                insert_at(child, rest, value);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `**`: zero or more whole path segments
    AnyDepth,
    /// Segment containing `*` or `?`
    Wildcard(Vec<char>),
    Literal(String),
}

impl Segment {
    fn parse(text: &str) -> Self {
        if text == "**" {
            Segment::AnyDepth
        } else if text.contains(['*', '?']) {
            Segment::Wildcard(text.chars().collect())
        } else {
            Segment::Literal(text.to_string())
        }
    }

    fn matches(&self, key: &str) -> bool {
        match self {
            Segment::AnyDepth => true,
            Segment::Literal(literal) => literal == key,
            Segment::Wildcard(pattern) => wildcard_match(pattern, &key.chars().collect::<Vec<_>>()),
        }
    }
}

/// Single-segment wildcard match with backtracking to the last `*`
fn wildcard_match(pattern: &[char], text: &[char]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

/// A compiled glob over slash-delimited object paths.
///
/// `**` as a whole segment matches zero or more segments, so `**` alone
/// matches every path including top-level ones. Within a segment `*`
/// matches any run of characters and `?` a single character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(UtilsError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern is empty".to_string(),
            });
        }

        let mut segments: Vec<Segment> = Vec::new();
        for text in pattern.split(PATH_SEPARATOR) {
            if text.is_empty() {
                return Err(UtilsError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: "pattern contains an empty segment".to_string(),
                });
            }
            let segment = Segment::parse(text);
            // Consecutive `**` segments match the same paths as one
            if segment == Segment::AnyDepth && segments.last() == Some(&Segment::AnyDepth) {
                continue;
            }
            segments.push(segment);
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a slash-delimited path string
    pub fn matches(&self, path: &str) -> bool {
        let keys: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        self.matches_segments(&keys)
    }

    /// Match a path already split into keys
    pub fn matches_segments<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        match_from(&self.segments, keys)
    }
}

fn match_from<S: AsRef<str>>(segments: &[Segment], keys: &[S]) -> bool {
    match segments.split_first() {
        None => keys.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            (0..=keys.len()).any(|skip| match_from(rest, &keys[skip..]))
        }
        Some((segment, rest)) => match keys.split_first() {
            Some((key, remaining)) => segment.matches(key.as_ref()) && match_from(rest, remaining),
            None => false,
        },
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "foo": "bar",
            "baz": {
                "foo2": "bar2"
            }
        })
    }

    #[test]
    fn test_build_object_paths() {
        let paths = build_object_paths(&sample()).unwrap();
        assert_eq!(paths, vec!["foo", "baz/foo2"]);
    }

    #[test]
    fn test_build_object_paths_follows_insertion_order() {
        let data = json!({
            "z": { "b": 1, "a": { "deep": true } },
            "a": [1, 2, 3],
            "m": null
        });
        let paths = build_object_paths(&data).unwrap();
        assert_eq!(paths, vec!["z/b", "z/a/deep", "a", "m"]);
    }

    #[test]
    fn test_empty_nested_mapping_has_no_paths() {
        let data = json!({ "empty": {}, "leaf": 1 });
        assert_eq!(build_object_paths(&data).unwrap(), vec!["leaf"]);
        assert!(build_object_paths(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_build_object_paths_rejects_non_objects() {
        let err = build_object_paths(&json!(["foo"])).unwrap_err();
        assert_eq!(
            err,
            UtilsError::NotAnObject {
                found: "array".to_string()
            }
        );
        assert!(build_object_paths(&json!("foo")).is_err());
    }

    #[test]
    fn test_double_star_matches_every_path() {
        let result = glob_object(&sample(), "**").unwrap();
        assert_eq!(result, sample());
    }

    #[test]
    fn test_nested_only_pattern() {
        let result = glob_object(&sample(), "*/*").unwrap();
        assert_eq!(result, json!({ "baz": { "foo2": "bar2" } }));

        let result = glob_object(&sample(), "*/**").unwrap();
        assert_eq!(result, json!({ "baz": { "foo2": "bar2" } }));
        assert_eq!(glob_paths(&sample(), "*/**").unwrap(), vec!["baz/foo2"]);
    }

    #[test]
    fn test_single_star_matches_top_level_only() {
        let result = glob_object(&sample(), "*").unwrap();
        assert_eq!(result, json!({ "foo": "bar" }));
    }

    #[test]
    fn test_pruning_removes_empty_parents() {
        let data = json!({
            "server": {
                "http": { "port": 80, "host": "a" },
                "tls": { "cert": "c" }
            },
            "name": "svc"
        });
        let result = glob_object(&data, "**/port").unwrap();
        assert_eq!(result, json!({ "server": { "http": { "port": 80 } } }));

        let result = glob_object(&data, "nothing/**").unwrap();
        assert_eq!(result, json!({}));
    }

    #[test]
    fn test_segment_wildcards() {
        let data = json!({
            "foo": 1,
            "foo2": 2,
            "bar": { "foo3": 3, "baz": 4 }
        });
        assert_eq!(glob_paths(&data, "foo*").unwrap(), vec!["foo", "foo2"]);
        assert_eq!(glob_paths(&data, "**/foo?").unwrap(), vec!["foo2", "bar/foo3"]);
        assert_eq!(glob_paths(&data, "b*/b*").unwrap(), vec!["bar/baz"]);
    }

    #[test]
    fn test_glob_object_is_idempotent() {
        let data = json!({
            "a": { "b": { "c": 1, "d": [1, 2] }, "e": "x" },
            "f": { "g": {} },
            "h": null
        });
        for pattern in ["**", "*", "*/*", "a/**", "**/c", "?/b/*", "**/?"] {
            let once = glob_object(&data, pattern).unwrap();
            let twice = glob_object(&once, pattern).unwrap();
            assert_eq!(once, twice, "pattern {}", pattern);
        }
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = Pattern::new("a/**/z").unwrap();
        assert!(pattern.matches("a/z"));
        assert!(pattern.matches("a/b/c/z"));
        assert!(!pattern.matches("a/b/c"));
        assert!(!pattern.matches("b/z"));
        assert_eq!(pattern.as_str(), "a/**/z");
        assert_eq!(pattern.to_string(), "a/**/z");

        let pattern = Pattern::new("**/**/x").unwrap();
        assert!(pattern.matches("x"));
        assert!(pattern.matches("q/r/x"));
    }

    #[test]
    fn test_wildcard_match() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert!(wildcard_match(&chars("*"), &chars("")));
        assert!(wildcard_match(&chars("a*c"), &chars("abbbc")));
        assert!(wildcard_match(&chars("a*b*c"), &chars("axbyc")));
        assert!(!wildcard_match(&chars("a*c"), &chars("abcd")));
        assert!(!wildcard_match(&chars("?"), &chars("")));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            Pattern::new(""),
            Err(UtilsError::InvalidPattern { .. })
        ));
        assert!(Pattern::new("a//b").is_err());
        assert!(Pattern::new("/a").is_err());
        assert!(glob_object(&sample(), "a/").is_err());
    }

    #[test]
    fn test_glob_object_rejects_non_objects() {
        assert!(matches!(
            glob_object(&json!(3), "**"),
            Err(UtilsError::NotAnObject { .. })
        ));
    }
}
