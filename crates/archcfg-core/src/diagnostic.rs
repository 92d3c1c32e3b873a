//! Diagnostic records.
//!
//! Resolvers never fail on contradictory input. They queue [`Diagnostic`]s into
//! a per-invocation [`Diagnostics`] sink and keep going; the driver decides
//! from the severities whether to continue to code generation.

use std::fmt;

use serde::Serialize;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Message template keys. Each key has a fixed severity and a `%N` template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagKey {
    /// An explicit option disagrees with the value implied by a higher-priority one.
    ConflictingImpliedValue,
    /// `-mfpu=` was given a width outside 64, 32, 0 and none.
    InvalidFpuWidth,
    /// `-march=` names no known architecture.
    InvalidArchName,
    /// `-march=native` asks for host detection, which is not performed.
    NativeArchUnsupported,
    /// An option was not consumed by any resolver.
    UnusedArgument,
}

impl DiagKey {
    pub fn severity(self) -> Severity {
        match self {
            DiagKey::ConflictingImpliedValue | DiagKey::UnusedArgument => Severity::Warning,
            DiagKey::InvalidFpuWidth | DiagKey::InvalidArchName | DiagKey::NativeArchUnsupported => {
                Severity::Error
            }
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            DiagKey::ConflictingImpliedValue => {
                "ignoring '%0' as it conflicts with that implied by '%1' (%2)"
            }
            DiagKey::InvalidFpuWidth => {
                "invalid argument '%0' to -mfpu=; must be one of: 64, 32, none, 0 (alias for none)"
            }
            DiagKey::InvalidArchName => "invalid arch name '%0'",
            DiagKey::NativeArchUnsupported => {
                "'%0': host CPU detection is not supported; name an architecture explicitly"
            }
            DiagKey::UnusedArgument => "argument unused during compilation: '%0'",
        }
    }
}

/// A single diagnostic: severity, template key, and ordered substitution arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Always the key's own severity.
    pub severity: Severity,
    /// Message template identifier.
    pub key: DiagKey,
    /// Substituted for `%0`, `%1`, ... in the template.
    pub args: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the key's own severity.
    pub fn new<I, S>(key: DiagKey, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            severity: key.severity(),
            key,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Substitute the arguments into the key's template.
    ///
    /// `%N` with no matching argument is left as written.
    pub fn render(&self) -> String {
        let template = self.key.template();
        let mut out = String::with_capacity(template.len());
        let mut chars = template.char_indices().peekable();
        while let Some((_, c)) = chars.next() {
            if c == '%' {
                if let Some(&(_, d)) = chars.peek() {
                    if let Some(n) = d.to_digit(10) {
                        chars.next();
                        match self.args.get(n as usize) {
                            Some(arg) => out.push_str(arg),
                            None => {
                                out.push('%');
                                out.push(d);
                            }
                        }
                        continue;
                    }
                }
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.render())
    }
}

/// Append-only diagnostic sink owned by a single resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        log::debug!("queued {diag}");
        self.items.push(diag);
    }

    /// Queue a diagnostic built from `key` and `args`.
    pub fn emit<I, S>(&mut self, key: DiagKey, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Diagnostic::new(key, args));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
