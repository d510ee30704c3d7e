use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tally_core::Direction;

use crate::error::ConfigError;

pub const DEFAULT_CATEGORY: &str = "Misc";

/// Keywords that all point at one category. A rule matches when any keyword does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub match_type: MatchType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Case-insensitive substring of the description.
    #[default]
    Contains,
    /// Case-insensitive regular expression.
    Regex,
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" => Ok(MatchType::Contains),
            "regex" => Ok(MatchType::Regex),
            other => Err(format!("Unknown match type: '{other}'")),
        }
    }
}

impl CategoryRule {
    pub fn contains(category: &str, keywords: &[&str]) -> Self {
        CategoryRule {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            match_type: MatchType::Contains,
        }
    }
}

/// A dialect's rule table as written in configuration.
///
/// `credit_rules` are consulted first for credits only; `rules` apply to both
/// directions. Within each list the first matching rule wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleTable {
    #[serde(default)]
    pub credit_rules: Vec<CategoryRule>,
    #[serde(default)]
    pub rules: Vec<CategoryRule>,
    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable {
            credit_rules: Vec::new(),
            rules: Vec::new(),
            default_category: default_category(),
        }
    }
}

impl RuleTable {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }
}

/// Internal pairing of a rule with its lower-cased keywords or compiled patterns.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: CategoryRule,
    needles: Vec<String>,
    patterns: Vec<Regex>,
}

impl CompiledRule {
    fn compile(rule: CategoryRule) -> Self {
        let (needles, patterns) = match rule.match_type {
            MatchType::Contains => (
                rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                Vec::new(),
            ),
            MatchType::Regex => {
                let patterns = rule
                    .keywords
                    .iter()
                    .filter_map(|k| {
                        RegexBuilder::new(k)
                            .case_insensitive(true)
                            .build()
                            .map_err(|e| {
                                tracing::warn!(category = %rule.category, "ignoring bad pattern {k:?}: {e}")
                            })
                            .ok()
                    })
                    .collect();
                (Vec::new(), patterns)
            }
        };
        CompiledRule { rule, needles, patterns }
    }

    fn matches(&self, lowered: &str, text: &str) -> bool {
        match self.rule.match_type {
            MatchType::Contains => self.needles.iter().any(|n| lowered.contains(n.as_str())),
            MatchType::Regex => self.patterns.iter().any(|re| re.is_match(text)),
        }
    }
}

/// Maps a description (and direction) to a category label. Pure: the same
/// input always yields the same label.
#[derive(Debug, Clone)]
pub struct Categorizer {
    credit_rules: Vec<CompiledRule>,
    rules: Vec<CompiledRule>,
    default_category: String,
}

impl Categorizer {
    /// Declaration order is kept; there is no priority re-ordering.
    pub fn new(table: RuleTable) -> Self {
        Self {
            credit_rules: table.credit_rules.into_iter().map(CompiledRule::compile).collect(),
            rules: table.rules.into_iter().map(CompiledRule::compile).collect(),
            default_category: table.default_category,
        }
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(RuleTable::from_toml(toml_content)?))
    }

    pub fn find_matching_rule(&self, description: &str, direction: Direction) -> Option<&CategoryRule> {
        let lowered = description.to_lowercase();
        let credit_only: &[CompiledRule] = match direction {
            Direction::Credit => &self.credit_rules,
            Direction::Debit => &[],
        };
        credit_only
            .iter()
            .chain(self.rules.iter())
            .find(|cr| cr.matches(&lowered, description))
            .map(|cr| &cr.rule)
    }

    pub fn categorize(&self, description: &str, direction: Direction) -> &str {
        self.find_matching_rule(description, direction)
            .map(|r| r.category.as_str())
            .unwrap_or(self.default_category.as_str())
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }
}
