//! Command-line option model.
//!
//! An [`OptionSet`] holds the target-specific arguments of one compile job in
//! command-line order. Lookups follow the driver convention that a later
//! occurrence overrides an earlier one, and a family of mutually exclusive
//! options is looked up jointly so that the last member of the family wins.

use std::collections::BTreeSet;
use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{OptionError, Result};

/// The kind of a recognized option. Aliases map onto the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    /// `-mabi=<value>`
    Abi,
    /// `-mfpu=<width>`
    Fpu,
    /// `-march=<name>`
    Arch,
    /// `-mdouble-float`
    DoubleFloat,
    /// `-msingle-float`
    SingleFloat,
    /// `-msoft-float`
    SoftFloat,
    /// `-munaligned-access` (alias `-mno-strict-align`)
    UnalignedAccess,
    /// `-mno-unaligned-access` (alias `-mstrict-align`)
    NoUnalignedAccess,
}

impl OptionKind {
    /// Whether the option carries a joined `=VALUE`.
    pub fn takes_value(self) -> bool {
        matches!(self, OptionKind::Abi | OptionKind::Fpu | OptionKind::Arch)
    }

    /// The primary spelling of the option (value options end in `=`).
    pub fn spelling(self) -> &'static str {
        match self {
            OptionKind::Abi => "-mabi=",
            OptionKind::Fpu => "-mfpu=",
            OptionKind::Arch => "-march=",
            OptionKind::DoubleFloat => "-mdouble-float",
            OptionKind::SingleFloat => "-msingle-float",
            OptionKind::SoftFloat => "-msoft-float",
            OptionKind::UnalignedAccess => "-munaligned-access",
            OptionKind::NoUnalignedAccess => "-mno-unaligned-access",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Every accepted spelling, aliases included.
const OPTION_TABLE: &[(&str, OptionKind)] = &[
    ("-mabi=", OptionKind::Abi),
    ("-mfpu=", OptionKind::Fpu),
    ("-march=", OptionKind::Arch),
    ("-mdouble-float", OptionKind::DoubleFloat),
    ("-msingle-float", OptionKind::SingleFloat),
    ("-msoft-float", OptionKind::SoftFloat),
    ("-munaligned-access", OptionKind::UnalignedAccess),
    ("-mno-unaligned-access", OptionKind::NoUnalignedAccess),
    ("-mno-strict-align", OptionKind::UnalignedAccess),
    ("-mstrict-align", OptionKind::NoUnalignedAccess),
];

/// One parsed occurrence of an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arg {
    index: usize,
    kind: OptionKind,
    spelling: &'static str,
    value: Option<String>,
}

impl Arg {
    /// Position of this argument within its option set.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// The spelling as written, which may be an alias of the kind's primary spelling.
    pub fn spelling(&self) -> &'static str {
        self.spelling
    }

    /// The joined value, or `None` for flags.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Render the argument as it appeared on the command line.
    pub fn as_string(&self) -> String {
        match &self.value {
            Some(v) => format!("{}{}", self.spelling, v),
            None => self.spelling.to_string(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling)?;
        if let Some(v) = &self.value {
            f.write_str(v)?;
        }
        Ok(())
    }
}

fn parse_word(word: &str) -> Result<(&'static str, OptionKind, Option<String>)> {
    for &(spelling, kind) in OPTION_TABLE {
        if kind.takes_value() {
            if let Some(value) = word.strip_prefix(spelling) {
                return Ok((spelling, kind, Some(value.to_string())));
            }
            if word == spelling.trim_end_matches('=') {
                return Err(OptionError::MissingValue { spelling });
            }
        } else {
            if word == spelling {
                return Ok((spelling, kind, None));
            }
            if word.strip_prefix(spelling).is_some_and(|rest| rest.starts_with('=')) {
                return Err(OptionError::UnexpectedValue { spelling });
            }
        }
    }
    Err(OptionError::Unknown(word.to_string()))
}

/// The target-specific options of one compile job, in command-line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    args: Vec<Arg>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an option set from already-split argument words.
    pub fn parse<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for word in words {
            set.push(word.as_ref())?;
        }
        Ok(set)
    }

    /// Append one argument word after all existing ones.
    pub fn push(&mut self, word: &str) -> Result<&Arg> {
        let (spelling, kind, value) = parse_word(word)?;
        let index = self.args.len();
        trace!("option #{index}: {word} -> {kind:?}");
        self.args.push(Arg {
            index,
            kind,
            spelling,
            value,
        });
        Ok(&self.args[index])
    }

    /// The last argument whose kind is any of `kinds`.
    ///
    /// The kinds are treated as one family: only the single last occurrence
    /// across all of them is returned, not the last of each.
    pub fn last_of(&self, kinds: &[OptionKind]) -> Option<&Arg> {
        self.args.iter().rev().find(|a| kinds.contains(&a.kind))
    }

    /// The last argument of a single kind.
    pub fn last(&self, kind: OptionKind) -> Option<&Arg> {
        self.last_of(&[kind])
    }

    pub fn contains(&self, kind: OptionKind) -> bool {
        self.args.iter().any(|a| a.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.args.iter()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Arguments whose kind was not claimed by any resolver, in input order.
    pub fn unclaimed<'a>(&'a self, claims: &'a ClaimSet) -> impl Iterator<Item = &'a Arg> + 'a {
        self.args.iter().filter(move |a| !claims.contains(a.kind))
    }
}

/// Option kinds a resolver acknowledged, so the driver does not report them as unused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClaimSet {
    kinds: BTreeSet<OptionKind>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, kind: OptionKind) {
        self.kinds.insert(kind);
    }

    pub fn contains(&self, kind: OptionKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Add every claim held by `other`.
    pub fn merge(&mut self, other: &ClaimSet) {
        self.kinds.extend(other.kinds.iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = OptionKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
