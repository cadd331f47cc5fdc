use std::{fmt, str::FromStr};

use crate::merge::{DEFAULT_PAGE_SIZE, MergeMode};

/// When the recommendation step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationPolicy {
    Never,
    #[default]
    IntersectionOnly,
    Always,
}

impl RecommendationPolicy {
    pub fn applies_to(&self, mode: MergeMode) -> bool {
        match self {
            RecommendationPolicy::Never => false,
            RecommendationPolicy::IntersectionOnly => mode == MergeMode::Intersection,
            RecommendationPolicy::Always => true,
        }
    }
}

impl fmt::Display for RecommendationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecommendationPolicy::Never => "never",
            RecommendationPolicy::IntersectionOnly => "intersection",
            RecommendationPolicy::Always => "always",
        };
        f.write_str(s)
    }
}

impl FromStr for RecommendationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "off" => Ok(RecommendationPolicy::Never),
            "intersection" => Ok(RecommendationPolicy::IntersectionOnly),
            "always" | "on" => Ok(RecommendationPolicy::Always),
            other => Err(format!(
                "Invalid recommendation policy: {}. Use never, intersection or always.",
                other
            )),
        }
    }
}

/// Parameters of the recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationOptions {
    /// Spotify accepts at most 5 seeds.
    pub max_seeds: usize,
    pub min_popularity: u32,
    pub limit: u32,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            max_seeds: 5,
            min_popularity: 40,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    pub page_size: u32,
    pub recommendations: RecommendationPolicy,
    pub recommendation: RecommendationOptions,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            recommendations: RecommendationPolicy::default(),
            recommendation: RecommendationOptions::default(),
        }
    }
}
