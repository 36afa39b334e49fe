// =============================================================================
// Report Template — minimal Jinja-flavoured renderer over serde_json values
// =============================================================================
//
// Supported syntax:
//   {{ path.to.value }}                 substitution (HTML-escaped)
//   {% for item in path %} ... {% endfor %}   loop over a JSON array (nestable)
//
// Paths resolve against the innermost loop binding first, then the root
// context. A missing path renders as nothing; `null` renders as `None`.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

/// Compiled into the binary; used when the template file is missing or broken.
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/report_template.html");

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var(String),
    For {
        binding: String,
        source: String,
        body: Vec<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Var,
    Block,
}

impl TagKind {
    fn close(self) -> &'static str {
        match self {
            Self::Var => "}}",
            Self::Block => "%}",
        }
    }
}

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

/// Which template a render used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    File(PathBuf),
    BuiltIn,
}

impl std::fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => write!(f, "built-in template"),
        }
    }
}

impl Template {
    pub fn parse(src: &str) -> Result<Self> {
        // Open loops: (binding, source, nodes collected before the loop).
        let mut open: Vec<(String, String, Vec<Node>)> = Vec::new();
        let mut current: Vec<Node> = Vec::new();
        let mut rest = src;

        while let Some((start, kind)) = next_tag(rest) {
            if start > 0 {
                current.push(Node::Text(rest[..start].to_string()));
            }

            let after = &rest[start + 2..];
            let end = after.find(kind.close()).with_context(|| {
                format!("unclosed tag starting at {:?}", snippet(&rest[start..]))
            })?;
            let inner = after[..end].trim();
            rest = &after[end + 2..];

            match kind {
                TagKind::Var => {
                    if inner.is_empty() {
                        anyhow::bail!("empty substitution tag");
                    }
                    current.push(Node::Var(inner.to_string()));
                }
                TagKind::Block => {
                    let words: Vec<&str> = inner.split_whitespace().collect();
                    match words.as_slice() {
                        ["for", binding, "in", source] => {
                            let outer = std::mem::take(&mut current);
                            open.push((binding.to_string(), source.to_string(), outer));
                        }
                        ["endfor"] => {
                            let (binding, source, outer) =
                                open.pop().context("`endfor` without a matching `for`")?;
                            let body = std::mem::replace(&mut current, outer);
                            current.push(Node::For {
                                binding,
                                source,
                                body,
                            });
                        }
                        _ => anyhow::bail!("unsupported block tag `{{% {inner} %}}`"),
                    }
                }
            }
        }

        if let Some((binding, source, _)) = open.last() {
            anyhow::bail!("unclosed loop `for {binding} in {source}`");
        }
        if !rest.is_empty() {
            current.push(Node::Text(rest.to_string()));
        }

        Ok(Self { nodes: current })
    }

    /// Parse the file at `path`; on any failure fall back to
    /// [`BUILTIN_TEMPLATE`]. The choice is logged and returned.
    pub fn load_or_builtin(path: &Path) -> Result<(Self, TemplateOrigin)> {
        let from_file = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))
            .and_then(|src| {
                Self::parse(&src)
                    .with_context(|| format!("failed to parse template {}", path.display()))
            });

        match from_file {
            Ok(template) => {
                info!(path = %path.display(), "using report template file");
                Ok((template, TemplateOrigin::File(path.to_path_buf())))
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "report template unavailable, using built-in");
                let template =
                    Self::parse(BUILTIN_TEMPLATE).context("built-in report template is invalid")?;
                Ok((template, TemplateOrigin::BuiltIn))
            }
        }
    }

    pub fn render(&self, context: &Value) -> Result<String> {
        let mut out = String::new();
        let mut scope = Vec::new();
        render_nodes(&self.nodes, context, &mut scope, &mut out)?;
        Ok(out)
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

fn next_tag(s: &str) -> Option<(usize, TagKind)> {
    match (s.find("{{"), s.find("{%")) {
        (Some(v), Some(b)) if v < b => Some((v, TagKind::Var)),
        (_, Some(b)) => Some((b, TagKind::Block)),
        (Some(v), None) => Some((v, TagKind::Var)),
        (None, None) => None,
    }
}

fn snippet(s: &str) -> String {
    s.chars().take(24).collect()
}

fn render_nodes<'a>(
    nodes: &'a [Node],
    root: &'a Value,
    scope: &mut Vec<(&'a str, &'a Value)>,
    out: &mut String,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(path) => {
                if let Some(value) = lookup(path, root, scope) {
                    out.push_str(&display(value));
                }
            }
            Node::For {
                binding,
                source,
                body,
            } => match lookup(source, root, scope) {
                None | Some(Value::Null) => {}
                Some(Value::Array(items)) => {
                    for item in items {
                        scope.push((binding.as_str(), item));
                        let rendered = render_nodes(body, root, scope, out);
                        scope.pop();
                        rendered?;
                    }
                }
                Some(_) => anyhow::bail!("cannot loop over `{source}`: not a list"),
            },
        }
    }
    Ok(())
}

fn lookup<'a>(path: &str, root: &'a Value, scope: &[(&'a str, &'a Value)]) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let head = segments.next()?;

    let mut value = scope
        .iter()
        .rev()
        .find(|(name, _)| *name == head)
        .map(|(_, v)| *v)
        .or_else(|| root.get(head))?;

    for segment in segments {
        value = match (value, segment.parse::<usize>()) {
            (Value::Array(items), Ok(index)) => items.get(index)?,
            _ => value.get(segment)?,
        };
    }
    Some(value)
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => escape_html(s),
        other => escape_html(&other.to_string()),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
