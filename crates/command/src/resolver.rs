//! Fuzzy scene resolution
//!
//! When no fixed intent matches and the transcript carries a navigation cue,
//! the remaining phrase is matched against every scene title by edit
//! distance. The decision policy is a three-tier contract: direct match at
//! distance <= direct_max, disambiguation when the two best candidates both
//! sit within ambiguous_max, otherwise no match.

use voice_tour_config::MatchingConfig;
use voice_tour_core::Scene;

/// Words removed from a navigation phrase before matching
pub const FILLER_WORDS: &[&str] = &["show", "go", "to", "the"];

/// One scored scene candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
    pub scene_index: usize,
    pub distance: usize,
}

/// Distance thresholds for the decision policy
///
/// The shipped values (3 / 6) are preserved for behavioral compatibility;
/// they are tunable, not load-bearing.
#[derive(Debug, Clone, Copy)]
pub struct ResolverThresholds {
    /// Maximum distance for a direct match
    pub direct_max: usize,
    /// Maximum distance for a disambiguation candidate
    pub ambiguous_max: usize,
}

impl Default for ResolverThresholds {
    fn default() -> Self {
        Self {
            direct_max: 3,
            ambiguous_max: 6,
        }
    }
}

impl From<&MatchingConfig> for ResolverThresholds {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            direct_max: config.direct_distance_max,
            ambiguous_max: config.ambiguous_distance_max,
        }
    }
}

/// Outcome of resolving a navigation phrase against the scene list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneResolution {
    /// Unambiguous winner
    Match { index: usize },
    /// Two plausible candidates; the user must pick
    Ambiguous { first: usize, second: usize },
    /// Nothing close enough
    NoMatch,
}

/// Classic dynamic-programming Levenshtein distance
///
/// Unit cost for insertion, deletion, and substitution; O(mn) time and space,
/// which is fine at spoken-phrase scale.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[a.len()][b.len()]
}

/// Remove filler tokens from a navigation phrase
pub fn strip_fillers(text: &str) -> String {
    text.split_whitespace()
        .filter(|w| !FILLER_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score every scene title against the query
///
/// Candidates are sorted ascending by distance; the sort is stable, so ties
/// keep original scene order.
pub fn rank_candidates(query: &str, scenes: &[Scene]) -> Vec<MatchCandidate> {
    let mut candidates: Vec<MatchCandidate> = scenes
        .iter()
        .enumerate()
        .map(|(scene_index, scene)| MatchCandidate {
            scene_index,
            distance: levenshtein(query, &scene.title.to_lowercase()),
        })
        .collect();
    candidates.sort_by_key(|c| c.distance);
    candidates
}

/// Apply the three-tier decision policy to a query phrase
pub fn resolve_scene(
    query: &str,
    scenes: &[Scene],
    thresholds: ResolverThresholds,
) -> SceneResolution {
    let candidates = rank_candidates(query, scenes);

    let best = match candidates.first() {
        Some(best) => *best,
        None => return SceneResolution::NoMatch,
    };

    if best.distance <= thresholds.direct_max {
        return SceneResolution::Match {
            index: best.scene_index,
        };
    }

    if let Some(second) = candidates.get(1) {
        if best.distance <= thresholds.ambiguous_max && second.distance <= thresholds.ambiguous_max
        {
            return SceneResolution::Ambiguous {
                first: best.scene_index,
                second: second.scene_index,
            };
        }
    }

    SceneResolution::NoMatch
}
