//! Refined text descriptors
//!
//! Charsets, regex patterns, domain names, email addresses and filesystem
//! paths. All of them are checker-only except `CharsetFilter`, so casting
//! returns the value unchanged once it validates.

use std::path::MAIN_SEPARATOR;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::descriptor::{ensure_instance, Argument, Descriptor, ValidationError, ValidationResult, Value};

use super::arguments::{expect_text, text_argument};
use super::config::PatternFlags;

const LOWER_ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
const DOMAIN_LABEL_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789-";
const EMAIL_LABEL_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789+-_";
const PATH_NAME_FORBIDDEN: &str = ":\"*?<>|";

pub static CHARSET: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Charset", |value, arguments| {
        let allowed = text_argument("Charset", arguments, 0)?;
        let text = expect_text(value)?;
        match text.chars().find(|c| !allowed.contains(*c)) {
            Some(c) => Err(ValidationError::failed(format!(
                "Value contains invalid character {:?}",
                c
            ))),
            None => Ok(()),
        }
    })
});

pub static CHARSET_FILTER: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_caster("CharsetFilter", |value, arguments| {
        let allowed = text_argument("CharsetFilter", arguments, 0)?;
        let text = expect_text(value)?;
        Ok(Value::Text(
            text.chars().filter(|c| allowed.contains(*c)).collect(),
        ))
    })
});

pub static PATTERN: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Pattern", |value, arguments| {
        let source = text_argument("Pattern", arguments, 0)?;
        let flags = match arguments.get(1) {
            None => PatternFlags::default(),
            Some(Argument::Flags(flags)) => *flags,
            Some(other) => {
                return Err(ValidationError::invalid_descriptor(
                    "Pattern",
                    format!("argument 1 must be pattern flags, got {}", other),
                ))
            }
        };
        let text = expect_text(value)?;
        match_pattern(&compile_pattern(source, flags)?, source, text)
    })
});

pub static DOMAIN: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Domain", |value, _| check_domain(expect_text(value)?))
});

pub static EMAIL: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Email", |value, _| check_email(expect_text(value)?))
});

pub static PATH: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("Path", |value, _| check_path(expect_text(value)?))
});

pub static PATH_NAME: LazyLock<Descriptor> = LazyLock::new(|| {
    Descriptor::from_checker("PathName", |value, _| check_path_name(expect_text(value)?))
});

pub static ID: LazyLock<Descriptor> = LazyLock::new(|| charset(LOWER_ALPHANUMERIC));
pub static BINARY: LazyLock<Descriptor> = LazyLock::new(|| charset("01"));
pub static DECIMAL: LazyLock<Descriptor> = LazyLock::new(|| charset("0123456789"));
pub static HEXADECIMAL: LazyLock<Descriptor> =
    LazyLock::new(|| charset("0123456789ABCDEFabcdef"));

static DOMAIN_LABEL: LazyLock<Descriptor> = LazyLock::new(|| charset(DOMAIN_LABEL_CHARS));
static EMAIL_LABEL: LazyLock<Descriptor> = LazyLock::new(|| charset(EMAIL_LABEL_CHARS));

/// `Charset[allowed]`: text made only of the allowed characters
pub fn charset(allowed: impl Into<String>) -> Descriptor {
    CHARSET.bind(vec![Argument::Value(Value::Text(allowed.into()))])
}

/// `CharsetFilter[allowed]`: text with every other character dropped
pub fn charset_filter(allowed: impl Into<String>) -> Descriptor {
    CHARSET_FILTER.bind(vec![Argument::Value(Value::Text(allowed.into()))])
}

/// `Pattern[regex]` with the default flags.
///
/// # Errors
///
/// Returns `InvalidDescriptor` if the regex does not compile.
pub fn pattern(source: impl Into<String>) -> ValidationResult<Descriptor> {
    pattern_with(source, PatternFlags::default())
}

/// `Pattern[regex, flags]`
///
/// The regex is compiled here, once; the returned descriptor reuses it for
/// every check.
pub fn pattern_with(source: impl Into<String>, flags: PatternFlags) -> ValidationResult<Descriptor> {
    let source = source.into();
    let regex = compile_pattern(&source, flags)?;
    let label = source.clone();
    let compiled = Descriptor::from_checker("Pattern", move |value, _| {
        match_pattern(&regex, &label, expect_text(value)?)
    });
    Ok(compiled.bind(vec![
        Argument::Value(Value::Text(source)),
        Argument::Flags(flags),
    ]))
}

fn match_pattern(regex: &Regex, source: &str, text: &str) -> ValidationResult<()> {
    if !regex.is_match(text) {
        return Err(ValidationError::failed(format!(
            "Value did not match pattern {:?}",
            source
        )));
    }
    Ok(())
}

// Anchored so the whole value must match, not a prefix. In verbose mode a
// trailing `#` comment runs to the end of the line, so the group is closed
// on the next one.
fn compile_pattern(source: &str, flags: PatternFlags) -> ValidationResult<Regex> {
    let anchored = if flags.ignore_whitespace {
        format!("\\A(?:{}\n)\\z", source)
    } else {
        format!(r"\A(?:{})\z", source)
    };
    RegexBuilder::new(&anchored)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_matches_new_line)
        .ignore_whitespace(flags.ignore_whitespace)
        .build()
        .map_err(|e| ValidationError::invalid_descriptor("Pattern", e.to_string()))
}

fn check_domain(value: &str) -> ValidationResult<()> {
    let labels: Vec<&str> = value.split('.').collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err(ValidationError::failed("Domain labels must not be empty"));
    }
    for label in labels {
        ensure_instance(&Value::Text(label.to_lowercase()), &DOMAIN_LABEL)?;
    }
    Ok(())
}

fn check_email(value: &str) -> ValidationResult<()> {
    let (address, domain) = match value.split('@').collect::<Vec<_>>().as_slice() {
        [address, domain] => (*address, *domain),
        _ => {
            return Err(ValidationError::failed(
                "Email can't be split into address and domain",
            ))
        }
    };
    if address.is_empty() || domain.is_empty() {
        return Err(ValidationError::failed("Email address and domain must not be empty"));
    }

    ensure_instance(&Value::from(domain), &DOMAIN)?;

    for label in address.split('.') {
        if label.is_empty() {
            return Err(ValidationError::failed("Email address labels must not be empty"));
        }
        ensure_instance(&Value::Text(label.to_lowercase()), &EMAIL_LABEL)?;
    }
    Ok(())
}

fn check_path(value: &str) -> ValidationResult<()> {
    let normalized = normalize_path(value);
    let with_trailing = format!("{}{}", normalized, MAIN_SEPARATOR);
    if value != normalized && value != with_trailing {
        return Err(ValidationError::failed(format!(
            "Path is not normalized (expected {:?})",
            normalized
        )));
    }

    for segment in normalized.split(MAIN_SEPARATOR) {
        ensure_instance(&Value::from(segment), &PATH_NAME)?;
    }
    Ok(())
}

fn check_path_name(value: &str) -> ValidationResult<()> {
    let normalized = normalize_path(value);
    if normalized.contains(MAIN_SEPARATOR) {
        return Err(ValidationError::failed("Path name contains path separator"));
    }
    if let Some(c) = normalized.chars().find(|c| PATH_NAME_FORBIDDEN.contains(*c)) {
        return Err(ValidationError::failed(format!(
            "Path name contains invalid character {:?}",
            c
        )));
    }
    Ok(())
}

/// Lexically normalizes a path: collapses repeated separators, drops `.`
/// segments and resolves `..` against preceding segments.
///
/// A relative path keeps leading `..` segments, an absolute path drops them.
/// Exactly two leading separators are preserved; more collapse to one.
/// The empty path normalizes to `.`.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let leading = path.chars().take_while(|c| *c == MAIN_SEPARATOR).count();
    let prefix: String = match leading {
        0 => String::new(),
        2 => MAIN_SEPARATOR.to_string().repeat(2),
        _ => MAIN_SEPARATOR.to_string(),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(MAIN_SEPARATOR) {
        if segment.is_empty() || segment == "." {
            continue;
        }
        let keep = segment != ".."
            || (leading == 0 && segments.is_empty())
            || segments.last() == Some(&"..");
        if keep {
            segments.push(segment);
        } else {
            segments.pop();
        }
    }

    let separator = MAIN_SEPARATOR.to_string();
    let normalized = format!("{}{}", prefix, segments.join(separator.as_str()));
    if normalized.is_empty() {
        ".".to_string()
    } else {
        normalized
    }
}
