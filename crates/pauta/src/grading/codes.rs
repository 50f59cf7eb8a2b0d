//! Canonical component codes.
//!
//! Upstream configuration refers to assessment types by loosely spelled
//! string codes ("pt", " NPT ", "Mac"). Everything past the weight index
//! compares canonical codes only; the alias table is built once per index
//! and never consulted ad hoc at comparison sites.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A component code in canonical form: trimmed, uppercased, alias-resolved.
/// Only [`CodeAliasTable::normalize`] produces these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentCode(String);

impl ComponentCode {
    /// Continuous-assessment average (média de avaliação contínua).
    pub const MAC: &'static str = "MAC";
    /// Written-test score (nota da prova do professor).
    pub const NPP: &'static str = "NPP";
    /// End-of-period test (nota da prova trimestral). "PT" aliases here.
    pub const NPT: &'static str = "NPT";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps equivalent spellings of a component code to one canonical form.
#[derive(Debug, Clone)]
pub struct CodeAliasTable {
    aliases: HashMap<String, String>,
}

impl CodeAliasTable {
    /// Table with the aliases every school shares.
    pub fn builtin() -> Self {
        let mut aliases = HashMap::new();
        aliases.insert("PT".to_string(), ComponentCode::NPT.to_string());
        Self { aliases }
    }

    /// Extend the builtin table, e.g. with school-specific synonyms.
    /// Alias keys and targets are canonicalized before insertion.
    pub fn with_aliases<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut table = Self::builtin();
        for (alias, target) in pairs {
            let alias = alias.as_ref().trim().to_ascii_uppercase();
            let target = target.as_ref().trim().to_ascii_uppercase();
            if !alias.is_empty() && !target.is_empty() {
                table.aliases.insert(alias, target);
            }
        }
        table
    }

    /// Canonicalize a raw code. Returns `None` for codes that are empty
    /// after trimming; those carry no information and are skipped upstream.
    pub fn normalize(&self, raw: &str) -> Option<ComponentCode> {
        let upper = raw.trim().to_ascii_uppercase();
        if upper.is_empty() {
            return None;
        }
        let canonical = self.aliases.get(&upper).cloned().unwrap_or(upper);
        Some(ComponentCode(canonical))
    }
}
