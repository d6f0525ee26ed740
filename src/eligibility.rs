//! Title eligibility
//!
//! Decides whether a catalog title is shown at all. The catalog mixes
//! releases from many regions; the default policy keeps titles written in
//! Latin or Arabic script (which covers Persian) and hides the rest.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Display predicate applied to every fetched item title
pub trait TitleEligibility: Send + Sync {
    fn should_display(&self, title: &str) -> bool;
}

impl<F> TitleEligibility for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn should_display(&self, title: &str) -> bool {
        self(title)
    }
}

/// Shows every title
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl TitleEligibility for AllowAll {
    fn should_display(&self, _title: &str) -> bool {
        true
    }
}

/// Rejects titles containing any character matched by `rejected`
#[derive(Debug, Clone)]
pub struct ScriptFilter {
    rejected: Option<Regex>,
}

impl ScriptFilter {
    /// Build from a pattern matching disallowed characters
    pub fn new(rejected: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            rejected: Some(Regex::new(rejected)?),
        })
    }

    /// Latin, Arabic/Persian, plus script-neutral characters (digits, punctuation, marks)
    pub fn latin_and_persian() -> Self {
        Self {
            rejected: Regex::new(r"[^\p{Latin}\p{Arabic}\p{Common}\p{Inherited}]").ok(),
        }
    }
}

impl TitleEligibility for ScriptFilter {
    fn should_display(&self, title: &str) -> bool {
        self.rejected
            .as_ref()
            .map(|re| !re.is_match(title))
            .unwrap_or(true)
    }
}

/// Configurable eligibility policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitlePolicy {
    /// No filtering
    All,
    /// Latin and Persian titles only
    #[default]
    LatinPersian,
}

impl TitlePolicy {
    pub fn build(&self) -> Box<dyn TitleEligibility> {
        match self {
            TitlePolicy::All => Box::new(AllowAll),
            TitlePolicy::LatinPersian => Box::new(ScriptFilter::latin_and_persian()),
        }
    }
}
