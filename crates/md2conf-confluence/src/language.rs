//! Language normalization for the Confluence code macro.
//!
//! Confluence's code macro only highlights a fixed set of languages, each
//! under one canonical name. Fence info strings in Markdown use whatever name
//! the author prefers, so every tag is mapped through an alias table (derived
//! from the GitHub linguist alias list) and anything unknown becomes `text`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use md2conf_renderer::CodeBlock;

use crate::error::LanguageError;

/// Canonical syntax names understood by the Confluence code macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxName {
    ActionScript3,
    AppleScript,
    Bash,
    CSharp,
    Cpp,
    Css,
    ColdFusion,
    Delphi,
    Diff,
    Erlang,
    Groovy,
    Xml,
    Java,
    JavaScript,
    Php,
    Perl,
    Text,
    PowerShell,
    Python,
    Ruby,
    Sql,
    Sass,
    Scala,
    VisualBasic,
    Yaml,
    Json,
}

impl SyntaxName {
    /// Every canonical name, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::ActionScript3,
        Self::AppleScript,
        Self::Bash,
        Self::CSharp,
        Self::Cpp,
        Self::Css,
        Self::ColdFusion,
        Self::Delphi,
        Self::Diff,
        Self::Erlang,
        Self::Groovy,
        Self::Xml,
        Self::Java,
        Self::JavaScript,
        Self::Php,
        Self::Perl,
        Self::Text,
        Self::PowerShell,
        Self::Python,
        Self::Ruby,
        Self::Sql,
        Self::Sass,
        Self::Scala,
        Self::VisualBasic,
        Self::Yaml,
        Self::Json,
    ];

    /// Parse a canonical name (e.g. `py`, `c#`, `yml`).
    ///
    /// Only canonical names are accepted; aliases go through
    /// [`normalize_language`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == s)
    }

    /// Name written into the macro's `language` parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActionScript3 => "actionscript3",
            Self::AppleScript => "applescript",
            Self::Bash => "bash",
            Self::CSharp => "c#",
            Self::Cpp => "cpp",
            Self::Css => "css",
            Self::ColdFusion => "coldfusion",
            Self::Delphi => "delphi",
            Self::Diff => "diff",
            Self::Erlang => "erl",
            Self::Groovy => "groovy",
            Self::Xml => "xml",
            Self::Java => "java",
            Self::JavaScript => "js",
            Self::Php => "php",
            Self::Perl => "perl",
            Self::Text => "text",
            Self::PowerShell => "powershell",
            Self::Python => "py",
            Self::Ruby => "ruby",
            Self::Sql => "sql",
            Self::Sass => "sass",
            Self::Scala => "scala",
            Self::VisualBasic => "vb",
            Self::Yaml => "yml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for SyntaxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in alias table. Keys are matched exactly (case-sensitive).
const ALIASES: &[(&str, SyntaxName)] = &[
    ("actionscript 3", SyntaxName::ActionScript3),
    ("actionscript3", SyntaxName::ActionScript3),
    ("as3", SyntaxName::ActionScript3),
    ("applescript", SyntaxName::AppleScript),
    ("scpt", SyntaxName::AppleScript),
    ("sh", SyntaxName::Bash),
    ("shell-script", SyntaxName::Bash),
    ("bash", SyntaxName::Bash),
    ("zsh", SyntaxName::Bash),
    ("csharp", SyntaxName::CSharp),
    ("cake", SyntaxName::CSharp),
    ("cakescript", SyntaxName::CSharp),
    ("cpp", SyntaxName::Cpp),
    ("css", SyntaxName::Css),
    ("cfm", SyntaxName::ColdFusion),
    ("cfml", SyntaxName::ColdFusion),
    ("coldfusion html", SyntaxName::ColdFusion),
    ("delphi", SyntaxName::Delphi),
    ("objectpascal", SyntaxName::Delphi),
    ("diff", SyntaxName::Diff),
    ("erlang", SyntaxName::Erlang),
    ("erl", SyntaxName::Erlang),
    ("groovy", SyntaxName::Groovy),
    ("html", SyntaxName::Xml),
    ("xhtml", SyntaxName::Xml),
    ("xml", SyntaxName::Xml),
    ("rss", SyntaxName::Xml),
    ("xsd", SyntaxName::Xml),
    ("wsdl", SyntaxName::Xml),
    ("java", SyntaxName::Java),
    ("js", SyntaxName::JavaScript),
    ("node", SyntaxName::JavaScript),
    ("php", SyntaxName::Php),
    ("perl", SyntaxName::Perl),
    ("none", SyntaxName::Text),
    ("fundamental", SyntaxName::Text),
    ("plain text", SyntaxName::Text),
    ("powershell", SyntaxName::PowerShell),
    ("posh", SyntaxName::PowerShell),
    ("pwsh", SyntaxName::PowerShell),
    ("python", SyntaxName::Python),
    ("jruby", SyntaxName::Ruby),
    ("macruby", SyntaxName::Ruby),
    ("rake", SyntaxName::Ruby),
    ("rb", SyntaxName::Ruby),
    ("rbx", SyntaxName::Ruby),
    ("sql", SyntaxName::Sql),
    ("sass", SyntaxName::Sass),
    ("scala", SyntaxName::Scala),
    ("visual basic", SyntaxName::VisualBasic),
    ("vbnet", SyntaxName::VisualBasic),
    ("vb .net", SyntaxName::VisualBasic),
    ("vb.net", SyntaxName::VisualBasic),
    ("yaml", SyntaxName::Yaml),
    ("yml", SyntaxName::Yaml),
    ("json", SyntaxName::Json),
    ("geojson", SyntaxName::Json),
    ("jsonl", SyntaxName::Json),
    ("topojson", SyntaxName::Json),
];

/// The built-in alias table as `(alias, canonical)` pairs.
#[must_use]
pub fn builtin_aliases() -> &'static [(&'static str, SyntaxName)] {
    ALIASES
}

fn builtin_lookup(tag: &str) -> Option<SyntaxName> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|&(_, name)| name)
}

/// Map a language tag to its canonical syntax name.
///
/// Exact match only: no case folding, trimming or prefix matching. Unknown
/// tags, including the empty string, map to [`SyntaxName::Text`].
#[must_use]
pub fn normalize_language(tag: &str) -> SyntaxName {
    builtin_lookup(tag).unwrap_or(SyntaxName::Text)
}

/// Alias table with user-defined additions.
///
/// User aliases take precedence over the built-in table. Targets are
/// validated when added, so lookups stay total.
#[derive(Debug, Clone, Default)]
pub struct LanguageMap {
    custom: HashMap<String, SyntaxName>,
}

impl LanguageMap {
    /// Built-in aliases only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(alias, canonical name)` string pairs.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError`] if an alias is empty or a target is not a
    /// canonical syntax name.
    pub fn with_aliases<I, K, V>(aliases: I) -> Result<Self, LanguageError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (alias, target) in aliases {
            let alias = alias.into();
            if alias.is_empty() {
                return Err(LanguageError::EmptyAlias);
            }
            let target = target.as_ref();
            let name = SyntaxName::parse(target).ok_or_else(|| LanguageError::UnknownSyntax {
                alias: alias.clone(),
                target: target.to_owned(),
            })?;
            map.insert(alias, name);
        }
        Ok(map)
    }

    /// Add or replace a user alias.
    pub fn insert(&mut self, alias: impl Into<String>, name: SyntaxName) {
        self.custom.insert(alias.into(), name);
    }

    /// Look up a tag without falling back to `text`.
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<SyntaxName> {
        self.custom
            .get(tag)
            .copied()
            .or_else(|| builtin_lookup(tag))
    }

    /// Map a language tag to its canonical syntax name.
    #[must_use]
    pub fn resolve(&self, tag: &str) -> SyntaxName {
        self.custom
            .get(tag)
            .copied()
            .unwrap_or_else(|| normalize_language(tag))
    }

    /// Resolve the language of a code block.
    ///
    /// The full info string is tried first so multi-word aliases such as
    /// `plain text` match; otherwise its first word is used.
    #[must_use]
    pub fn resolve_block(&self, block: &CodeBlock) -> SyntaxName {
        self.lookup(block.info())
            .unwrap_or_else(|| self.resolve(block.language()))
    }

    /// All aliases, built-in and custom, sorted by alias.
    #[must_use]
    pub fn aliases(&self) -> Vec<(String, SyntaxName)> {
        let mut merged: BTreeMap<String, SyntaxName> = ALIASES
            .iter()
            .map(|&(alias, name)| (alias.to_owned(), name))
            .collect();
        merged.extend(self.custom.iter().map(|(alias, &name)| (alias.clone(), name)));
        merged.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_documented_aliases() {
        assert_eq!(normalize_language("bash"), SyntaxName::Bash);
        assert_eq!(normalize_language("sh"), SyntaxName::Bash);
        assert_eq!(normalize_language("zsh"), SyntaxName::Bash);
        assert_eq!(normalize_language("python").as_str(), "py");
        assert_eq!(normalize_language("yml").as_str(), "yml");
        assert_eq!(normalize_language("yaml").as_str(), "yml");
        assert_eq!(normalize_language("erlang").as_str(), "erl");
        assert_eq!(normalize_language("csharp").as_str(), "c#");
        assert_eq!(normalize_language("html").as_str(), "xml");
        assert_eq!(normalize_language("vb.net").as_str(), "vb");
        assert_eq!(normalize_language("plain text").as_str(), "text");
    }

    #[test]
    fn test_every_alias_resolves_to_its_entry() {
        for &(alias, expected) in builtin_aliases() {
            assert_eq!(normalize_language(alias), expected, "alias {alias}");
        }
    }

    #[test]
    fn test_alias_keys_are_unique() {
        let mut keys: Vec<_> = builtin_aliases().iter().map(|(alias, _)| *alias).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_unknown_tags_fall_back_to_text() {
        for tag in ["", "rust", "PYTHON", " bash", "bash ", "py", "c#", "\u{1F980}", "<script>"] {
            assert_eq!(normalize_language(tag), SyntaxName::Text, "tag {tag:?}");
        }
    }

    #[test]
    fn test_normalize_is_deterministic() {
        for tag in ["sh", "unknown", ""] {
            assert_eq!(normalize_language(tag), normalize_language(tag));
        }
    }

    #[test]
    fn test_parse_canonical_names() {
        for name in SyntaxName::ALL {
            assert_eq!(SyntaxName::parse(name.as_str()), Some(name));
        }
        assert_eq!(SyntaxName::parse("python"), None);
        assert_eq!(SyntaxName::parse(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SyntaxName::CSharp.to_string(), "c#");
        assert_eq!(format!("{}", SyntaxName::Erlang), "erl");
    }

    #[test]
    fn test_language_map_custom_aliases() {
        let map = LanguageMap::with_aliases([("tsx", "js"), ("sh", "text")]).unwrap();
        assert_eq!(map.resolve("tsx"), SyntaxName::JavaScript);
        // Custom aliases override built-ins
        assert_eq!(map.resolve("sh"), SyntaxName::Text);
        assert_eq!(map.resolve("zsh"), SyntaxName::Bash);
        assert_eq!(map.resolve("unknown"), SyntaxName::Text);
    }

    #[test]
    fn test_language_map_rejects_unknown_target() {
        let err = LanguageMap::with_aliases([("rs", "rust")]).unwrap_err();
        assert!(matches!(
            err,
            LanguageError::UnknownSyntax { ref alias, ref target } if alias == "rs" && target == "rust"
        ));
    }

    #[test]
    fn test_language_map_rejects_empty_alias() {
        let err = LanguageMap::with_aliases([("", "js")]).unwrap_err();
        assert!(matches!(err, LanguageError::EmptyAlias));
    }

    #[test]
    fn test_resolve_block_prefers_full_info() {
        let map = LanguageMap::new();
        let block = CodeBlock::new("plain text", "x\n");
        assert_eq!(map.resolve_block(&block), SyntaxName::Text);

        let block = CodeBlock::new("visual basic", "x\n");
        assert_eq!(map.resolve_block(&block), SyntaxName::VisualBasic);

        let block = CodeBlock::new("erlang title=Demo", "x\n");
        assert_eq!(map.resolve_block(&block), SyntaxName::Erlang);

        let block = CodeBlock::new("", "x\n");
        assert_eq!(map.resolve_block(&block), SyntaxName::Text);
    }

    #[test]
    fn test_builtin_resolution_matches_normalize_language() {
        let map = LanguageMap::new();
        for tag in ["sh", "python", "erlang", "yml", "", "PYTHON", "unknown"] {
            assert_eq!(map.resolve(tag), normalize_language(tag), "tag {tag:?}");
        }
    }

    #[test]
    fn test_aliases_listing_includes_custom() {
        let map = LanguageMap::with_aliases([("tsx", "js")]).unwrap();
        let aliases = map.aliases();
        assert_eq!(aliases.len(), builtin_aliases().len() + 1);
        assert!(aliases.contains(&("tsx".to_owned(), SyntaxName::JavaScript)));
        assert!(aliases.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }
}
