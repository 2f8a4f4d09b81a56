//! Grouping of roll results into displayable roll events.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::die::Die;
use crate::engine::{RollResult, Timestamp};

/// The tuple results are grouped by.
///
/// Dice are compared by face count, so `Die::Custom(6)` and `Die::D6` land
/// in the same group.
#[derive(Debug, Clone)]
pub struct GroupKey {
    /// Label shared by the group.
    pub label: String,
    /// Timestamp of the roll action.
    pub timestamp: Timestamp,
    /// Die type shared by the group.
    pub die: Die,
}

impl GroupKey {
    /// The key a single result belongs under.
    pub fn of(result: &RollResult) -> Self {
        Self {
            label: result.label.clone(),
            timestamp: result.timestamp,
            die: result.die,
        }
    }

    fn sort_tuple(&self) -> (Timestamp, &str, u32) {
        (self.timestamp, self.label.as_str(), self.die.faces())
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.sort_tuple() == other.sort_tuple()
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_tuple().cmp(&other.sort_tuple())
    }
}

/// Results partitioned by [`GroupKey`].
///
/// Every result of the source slice appears in exactly one group, and
/// members keep the order they were rolled in.
#[derive(Debug, Clone, Default)]
pub struct Grouping<'a> {
    groups: BTreeMap<GroupKey, Vec<&'a RollResult>>,
}

impl<'a> Grouping<'a> {
    /// Partition `results` by label, timestamp and die type.
    pub fn from_results(results: &'a [RollResult]) -> Self {
        let mut groups: BTreeMap<GroupKey, Vec<&'a RollResult>> = BTreeMap::new();
        for result in results {
            groups.entry(GroupKey::of(result)).or_default().push(result);
        }
        Self { groups }
    }

    /// Keys sorted newest roll action first.
    ///
    /// Groups from the same roll action are ordered by label, then by face
    /// count, so repeated calls on unchanged input agree.
    pub fn display_order(&self) -> Vec<&GroupKey> {
        let mut keys: Vec<&GroupKey> = self.groups.keys().collect();
        keys.sort_by(|a, b| display_cmp(a, b));
        keys
    }

    /// Members of the group under `key`, in roll order.
    pub fn members(&self, key: &GroupKey) -> Option<&[&'a RollResult]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// The group under `key`.
    pub fn get(&self, key: &GroupKey) -> Option<RollGroup<'a>> {
        self.groups.get_key_value(key).map(|(k, members)| RollGroup {
            key: k.clone(),
            results: members.clone(),
        })
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consume the grouping into groups in display order.
    pub fn into_display_groups(self) -> Vec<RollGroup<'a>> {
        let mut groups: Vec<RollGroup<'a>> = self
            .groups
            .into_iter()
            .map(|(key, results)| RollGroup { key, results })
            .collect();
        groups.sort_by(|a, b| display_cmp(&a.key, &b.key));
        groups
    }
}

/// Newest timestamp first, then label and face count ascending.
fn display_cmp(a: &GroupKey, b: &GroupKey) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.die.faces().cmp(&b.die.faces()))
}

/// One homogeneous-die roll within a roll action.
#[derive(Debug, Clone)]
pub struct RollGroup<'a> {
    key: GroupKey,
    results: Vec<&'a RollResult>,
}

impl<'a> RollGroup<'a> {
    /// The shared label, timestamp and die type.
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Members in roll order.
    pub fn results(&self) -> &[&'a RollResult] {
        &self.results
    }

    /// Totals for display.
    pub fn summarize(&self) -> GroupSummary {
        let per_die: Vec<u32> = self.results.iter().map(|r| r.outcome).collect();
        let total_bonus: i64 = self.results.iter().map(|r| r.bonus).sum();
        let rolled: i64 = per_die.iter().map(|&v| i64::from(v)).sum();
        GroupSummary {
            label: self.key.label.clone(),
            die: self.key.die,
            timestamp: self.key.timestamp,
            count: per_die.len(),
            total_bonus,
            total: rolled + total_bonus,
            per_die,
        }
    }
}

/// Display totals for a [`RollGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    /// Label shared by the group.
    pub label: String,
    /// Die type shared by the group.
    pub die: Die,
    /// Timestamp of the roll action.
    pub timestamp: Timestamp,
    /// Number of dice rolled.
    pub count: usize,
    /// Sum of every member's bonus.
    pub total_bonus: i64,
    /// Sum of outcomes plus `total_bonus`.
    pub total: i64,
    /// Individual outcomes in roll order.
    pub per_die: Vec<u32>,
}

impl GroupSummary {
    /// Face count of the rolled die.
    pub fn die_faces(&self) -> u32 {
        self.die.faces()
    }

    /// How many dice came up on their highest face.
    pub fn max_rolls(&self) -> usize {
        let faces = self.die_faces();
        self.per_die.iter().filter(|&&v| v == faces).count()
    }

    /// How many dice came up 1.
    pub fn min_rolls(&self) -> usize {
        self.per_die.iter().filter(|&&v| v == 1).count()
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bonus = match self.total_bonus {
            0 => String::new(),
            b if b > 0 => format!("+{b}"),
            b => format!("{b}"),
        };
        let dice: Vec<String> = self.per_die.iter().map(|v| format!("({v})")).collect();
        write!(
            f,
            "{}d{}{bonus}: {}{bonus} = {}",
            self.count,
            self.die_faces(),
            dice.join("+"),
            self.total
        )
    }
}
