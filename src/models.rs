use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const UNRATED: &str = "unrated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LeetCode,
    CodeChef,
    CodeForces,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::LeetCode, Platform::CodeChef, Platform::CodeForces];

    pub fn label(self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::CodeChef => "CodeChef",
            Platform::CodeForces => "CodeForces",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Platform::LeetCode => "leetcode",
            Platform::CodeChef => "codechef",
            Platform::CodeForces => "codeforces",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Resolves an optional field to its zero value.
pub fn resolve<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Absent and empty ranks both read as `unrated`.
pub fn rank_label(rank: Option<&str>) -> &str {
    match rank {
        Some(rank) if !rank.is_empty() => rank,
        _ => UNRATED,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsPayload {
    pub total_problems_solved: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub platform_stats: PlatformStatsMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformStatsMap {
    pub leetcode: Option<LeetCodeStats>,
    pub codechef: Option<CodeChefStats>,
    pub codeforces: Option<CodeForcesStats>,
}

impl PlatformStatsMap {
    pub fn total_solved(&self, platform: Platform) -> Option<u64> {
        match platform {
            Platform::LeetCode => self.leetcode.as_ref().map(|s| resolve(s.total_solved)),
            Platform::CodeChef => self.codechef.as_ref().map(|s| resolve(s.total_solved)),
            Platform::CodeForces => self.codeforces.as_ref().map(|s| resolve(s.total_solved)),
        }
    }

    pub fn contests(&self, platform: Platform) -> Option<u64> {
        match platform {
            Platform::LeetCode => self.leetcode.as_ref().map(|s| resolve(s.contests_participated)),
            Platform::CodeChef => self.codechef.as_ref().map(|s| resolve(s.contests_participated)),
            Platform::CodeForces => self
                .codeforces
                .as_ref()
                .map(|s| resolve(s.contests_participated)),
        }
    }

    /// Primary rating of a platform, zero when the block or field is absent.
    pub fn rating(&self, platform: Platform) -> f64 {
        match platform {
            Platform::LeetCode => self.leetcode.as_ref().and_then(|s| s.contest_rating),
            Platform::CodeChef => self.codechef.as_ref().and_then(|s| s.rating),
            Platform::CodeForces => self.codeforces.as_ref().and_then(|s| s.rating),
        }
        .unwrap_or_default()
    }

    pub fn problem_tags(&self) -> Option<&BTreeMap<String, u64>> {
        self.codeforces.as_ref()?.problem_tags.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeetCodeStats {
    pub total_solved: Option<u64>,
    pub easy_solved: Option<u64>,
    pub medium_solved: Option<u64>,
    pub hard_solved: Option<u64>,
    pub contest_rating: Option<f64>,
    pub contests_participated: Option<u64>,
}

impl LeetCodeStats {
    pub fn solved(&self, difficulty: Difficulty) -> u64 {
        resolve(match difficulty {
            Difficulty::Easy => self.easy_solved,
            Difficulty::Medium => self.medium_solved,
            Difficulty::Hard => self.hard_solved,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeChefStats {
    pub total_solved: Option<u64>,
    pub rating: Option<f64>,
    pub highest_rating: Option<f64>,
    pub contests_participated: Option<u64>,
    #[serde(deserialize_with = "lenient_counts")]
    pub categories: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeForcesStats {
    pub total_solved: Option<u64>,
    pub rating: Option<f64>,
    pub rank: Option<String>,
    pub contests_participated: Option<u64>,
    pub problem_tags: Option<BTreeMap<String, u64>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps the numeric entries of an object; anything else reads as absent.
fn lenient_counts<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_object().map(|entries| {
        entries
            .iter()
            .filter_map(|(name, count)| Some((name.clone(), count.as_f64()?)))
            .collect()
    }))
}
