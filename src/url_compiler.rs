//! URL compiler that converts parsed filter commands into listing paths
//! and query strings, and decodes query strings back into filter text.

use crate::ast::{CompiledPair, CompiledQuery, Condition, ParsedQuery};
use crate::config::AliasStore;
use crate::token::Operator;

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// An operator the compiled-pair table has no entry for. Unreachable
    /// while the scanner and the compiler share the one [`Operator`] enum;
    /// kept so the taxonomy stays complete.
    UnsupportedOperator(String),
    /// An `in` value that does not parse as a parenthesized list.
    MalformedList(String),
    /// No `from` clause in the command and no ambient scope to fall back
    /// to. Produced by the shell layer, which owns the ambient scope.
    ScopeMissing,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::UnsupportedOperator(operator) => {
                write!(f, "Operator {} is not supported", operator)
            }
            CompileError::MalformedList(value) => write!(f, "Bad value list \"{}\"", value),
            CompileError::ScopeMissing => write!(f, "No scope specified"),
        }
    }
}

impl std::error::Error for CompileError {}

/// Compiles parsed queries against an injected alias store.
pub struct UrlCompiler<'a> {
    aliases: &'a dyn AliasStore,
}

impl<'a> UrlCompiler<'a> {
    pub fn new(aliases: &'a dyn AliasStore) -> Self {
        Self { aliases }
    }

    /// Compile a parsed query into a listing path and query string.
    ///
    /// Every condition is compiled before any error is reported, so the
    /// first failure in source order wins. No partial query string
    /// survives an error.
    pub fn encode(&self, query: &ParsedQuery) -> Result<CompiledQuery, CompileError> {
        let path = query.scope.as_deref().map(|scope| self.resolve_path(scope));

        let compiled: Vec<Result<CompiledPair, CompileError>> =
            query.conditions.iter().map(compile_condition).collect();
        if let Some(Err(error)) = compiled.iter().find(|result| result.is_err()) {
            return Err(error.clone());
        }

        let pairs: Vec<String> = compiled
            .into_iter()
            .filter_map(Result::ok)
            .map(|pair| format!("{}={}", pair.field, pair.value))
            .collect();

        Ok(CompiledQuery {
            path,
            query: pairs.join("&"),
        })
    }

    /// Resolve a dotted scope into the backend's listing path.
    ///
    /// Only the first segment is eligible for alias expansion; trailing
    /// segments are relation traversals and stay verbatim. The listing
    /// route omits underscores from resource names and ends in the fixed
    /// `-/` suffix.
    pub fn resolve_path(&self, scope: &str) -> String {
        let (head, tail) = match scope.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (scope, None),
        };
        let head = self.aliases.get(head).unwrap_or_else(|| head.to_string());
        let full = match tail {
            Some(tail) => format!("{}.{}", head, tail),
            None => head,
        };
        format!("/{}-/", full.replace('.', "/")).replace('_', "")
    }
}

/// Compile one condition into its query pair. Operators map 1:1 onto
/// compiled pairs; relation dots in the field rewrite to `__`.
pub fn compile_condition(condition: &Condition) -> Result<CompiledPair, CompileError> {
    let field = condition.field.replace('.', "__");
    let value = condition.value.as_str();

    let pair = match condition.operator {
        Operator::Eq => CompiledPair {
            field,
            value: rewrite_bool(value),
        },
        Operator::Gt => CompiledPair {
            field: format!("{}__gt", field),
            value: value.to_string(),
        },
        Operator::Gte => CompiledPair {
            field: format!("{}__gte", field),
            value: value.to_string(),
        },
        Operator::Lt => CompiledPair {
            field: format!("{}__lt", field),
            value: value.to_string(),
        },
        Operator::Lte => CompiledPair {
            field: format!("{}__lte", field),
            value: value.to_string(),
        },
        Operator::IsNull => CompiledPair {
            field: format!("{}__isnull", field),
            value: "True".to_string(),
        },
        Operator::IsNotNull => CompiledPair {
            field: format!("{}__isnull", field),
            value: "False".to_string(),
        },
        Operator::In => CompiledPair {
            field: format!("{}__in", field),
            value: parse_value_list(value)?,
        },
        Operator::Like | Operator::Ilike => {
            let (kind, value) = classify_text_search(value);
            let kind = if condition.operator == Operator::Ilike {
                format!("i{}", kind)
            } else {
                kind.to_string()
            };
            CompiledPair {
                field: format!("{}__{}", field, kind),
                value,
            }
        }
    };

    Ok(pair)
}

/// Boolean literals are capitalized on the wire.
fn rewrite_bool(value: &str) -> String {
    match value {
        "true" => "True".to_string(),
        "false" => "False".to_string(),
        _ => value.to_string(),
    }
}

/// Parse a parenthesized comma list into the wire's comma-joined form.
///
/// The first parenthesis pair is rewritten to JSON brackets and the
/// result parsed as a JSON array; anything serde_json rejects is a
/// malformed list.
fn parse_value_list(value: &str) -> Result<String, CompileError> {
    let rewritten = value.replacen('(', "[", 1).replacen(')', "]", 1);
    let items: Vec<serde_json::Value> = serde_json::from_str(&rewritten)
        .map_err(|_| CompileError::MalformedList(value.to_string()))?;

    Ok(items
        .iter()
        .map(|item| match item {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(","))
}

/// Classify a `%`-wildcard pattern into the backend's text-search kind.
///
/// Quote characters are stripped first. The two-sided pattern must be
/// tried before either one-sided pattern: `%x%` is contains, `%x` is
/// startswith, `x%` is endswith, anything else is exact.
fn classify_text_search(raw: &str) -> (&'static str, String) {
    let value: String = raw.chars().filter(|&c| c != '\'').collect();
    if value.len() > 2 && value.starts_with('%') && value.ends_with('%') {
        ("contains", value[1..value.len() - 1].to_string())
    } else if value.len() > 1 && value.starts_with('%') {
        ("startswith", value[1..].to_string())
    } else if value.len() > 1 && value.ends_with('%') {
        ("endswith", value[..value.len() - 1].to_string())
    } else {
        ("exact", value)
    }
}

/// Decode a query string back into editable filter text.
///
/// Best-effort reconstruction: unrecognized shapes degrade to a literal
/// `field = value` clause instead of failing, because the decoded text is
/// for a human to edit, not for validation.
pub fn decode(query_string: &str) -> String {
    query_string
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(decode_pair)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Decode one `field=value` pair into one condition clause.
fn decode_pair(pair: &str) -> String {
    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
    let segments: Vec<&str> = key.split("__").collect();
    if segments.len() == 1 {
        return format!("{} = {}", key, value);
    }

    // The last segment is the operator suffix; the rest is the dot-path.
    let (suffix, field_segments) = segments.split_last().unwrap();
    let field = field_segments.join(".");

    match (*suffix, value) {
        ("gt", _) => format!("{} > {}", field, value),
        ("gte", _) => format!("{} >= {}", field, value),
        ("lt", _) => format!("{} < {}", field, value),
        ("lte", _) => format!("{} <= {}", field, value),
        ("isnull", "True") => format!("{} is null", field),
        ("isnull", "False") => format!("{} is not null", field),
        ("in", _) => format!("{} in ({})", field, value),
        ("contains", _) => format!("{} like '%{}%'", field, value),
        ("icontains", _) => format!("{} ilike '%{}%'", field, value),
        ("startswith", _) => format!("{} like '%{}'", field, value),
        ("istartswith", _) => format!("{} ilike '%{}'", field, value),
        ("endswith", _) => format!("{} like '{}%'", field, value),
        ("iendswith", _) => format!("{} ilike '{}%'", field, value),
        ("exact", _) => format!("{} like '{}'", field, value),
        ("iexact", _) => format!("{} ilike '{}'", field, value),
        _ => format!("{} = {}", segments.join("."), value),
    }
}
