use serde::{Deserialize, Serialize};

use crate::activity::{ProjectActivity, Tally};

/// Known action phrases mapped to short chart labels. Anything not listed
/// is title-cased word by word.
const ACTION_LABELS: &[(&str, &str)] = &[
    ("commented on", "Commented"),
    ("pushed to", "Pushed"),
    ("pushed new", "Pushed (new)"),
    ("accepted", "Accepted"),
    ("approved", "Approved"),
    ("closed", "Closed"),
    ("opened", "Opened"),
    ("deleted", "Deleted"),
];

/// Known target types mapped to short chart labels. An empty replacement
/// drops the target from the label; unknown types pass through unchanged.
const TARGET_LABELS: &[(&str, &str)] = &[
    ("MergeRequest", "MR"),
    ("DiscussionNote", "Discussion"),
    ("DiffNote", "Diff"),
    ("Note", ""),
    ("Issue", "Issue"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: u64,
}

/// Labeled series for one project, ready for a pie/bar widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

/// Turn a tally into a labeled series, preserving the tally's own order.
pub fn shape(tally: &Tally) -> Vec<ChartSlice> {
    tally
        .iter()
        .map(|(key, value)| ChartSlice {
            label: slice_label(key),
            value,
        })
        .collect()
}

pub fn chart_data(activity: &ProjectActivity) -> ChartData {
    ChartData {
        title: activity.project_name.clone(),
        slices: shape(&activity.tally),
    }
}

/// Chart label for one tally key of the form `"{action}_{target_type}"`.
/// The target part may be the literal `"null"`, which (like targets that
/// map to an empty label) leaves the action label on its own.
pub fn slice_label(key: &str) -> String {
    let (action, target) = match key.split_once('_') {
        Some((action, target)) => (action, Some(target)),
        None => (key, None),
    };

    let action_label = lookup(ACTION_LABELS, action)
        .map(str::to_string)
        .unwrap_or_else(|| title_case(action));

    let target = match target {
        Some(t) if !t.is_empty() && t != "null" => t,
        _ => return action_label,
    };
    let target_label = lookup(TARGET_LABELS, target).unwrap_or(target);
    if target_label.is_empty() {
        action_label
    } else {
        format!("{action_label} {target_label}")
    }
}

fn lookup<'a>(table: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, label)| *label)
}

fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
