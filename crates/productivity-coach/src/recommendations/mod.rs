//! Static tip catalog and the profile/tag filter that picks from it.

mod catalog;

pub use catalog::{RecommendationEntry, Tier, CATALOG};

use crate::analysis::BehavioralTag;
use crate::assessment::Profile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Matching tips per tier, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(rename = "Basic (Free)")]
    pub basic: Vec<String>,
    #[serde(rename = "Premium (Advanced)")]
    pub premium: Vec<String>,
}

impl Recommendations {
    pub fn tier(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Basic => &self.basic,
            Tier::Premium => &self.premium,
        }
    }
}

pub fn select(profile: Profile, tags: &BTreeSet<BehavioralTag>) -> Recommendations {
    select_from(&CATALOG, profile, tags)
}

/// Filter an arbitrary catalog; Basic entries land before Premium ones.
pub fn select_from(
    catalog: &[RecommendationEntry],
    profile: Profile,
    tags: &BTreeSet<BehavioralTag>,
) -> Recommendations {
    let mut recommendations = Recommendations::default();
    for entry in catalog
        .iter()
        .filter(|entry| entry.is_eligible(profile, tags))
    {
        match entry.tier {
            Tier::Basic => recommendations.basic.push(entry.render()),
            Tier::Premium => recommendations.premium.push(entry.render()),
        }
    }
    recommendations
}

#[cfg(test)]
impl Recommendations {
    pub(crate) fn is_empty(&self) -> bool {
        self.basic.is_empty() && self.premium.is_empty()
    }

    pub(crate) fn contains_title(&self, title: &str) -> bool {
        let prefix = format!("{title}: ");
        self.basic
            .iter()
            .chain(&self.premium)
            .any(|entry| entry.starts_with(&prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(entries: &[String]) -> Vec<&str> {
        entries
            .iter()
            .filter_map(|entry| entry.split(": ").next())
            .collect()
    }

    #[test]
    fn burnout_profile_with_burnout_tag() {
        let recs = select(Profile::BurnoutRisk, &BTreeSet::from([BehavioralTag::Burnout]));
        assert_eq!(titles(&recs.basic), vec!["Single-Task List", "Mindful Break"]);
        assert_eq!(
            titles(&recs.premium),
            vec!["Advanced Time Blocking", "Guided Calming Audio"]
        );
        assert!(!recs.contains_title("Procrastination Coach Chatbot"));
    }

    #[test]
    fn focused_achiever_without_tags_gets_nothing() {
        let recs = select(Profile::FocusedAchiever, &BTreeSet::new());
        assert!(recs.is_empty());
    }

    #[test]
    fn empty_tags_keep_every_unconstrained_entry_whose_profile_passes() {
        for profile in Profile::ALL {
            let recs = select(profile, &BTreeSet::new());
            let expected: Vec<String> = CATALOG
                .iter()
                .filter(|entry| entry.for_tags.is_none() && entry.matches_profile(profile))
                .map(RecommendationEntry::render)
                .collect();
            let actual: Vec<String> = recs.basic.iter().chain(&recs.premium).cloned().collect();
            assert_eq!(actual, expected, "profile {profile}");
        }
    }

    #[test]
    fn mindful_break_requires_both_constraints() {
        let tags = BTreeSet::from([BehavioralTag::TimeAnxiety]);
        assert!(!select(Profile::ModeratelyDistracted, &tags).contains_title("Mindful Break"));
        assert!(select(Profile::BurnoutRisk, &tags).contains_title("Mindful Break"));
    }

    #[test]
    fn output_preserves_catalog_order_and_is_repeatable() {
        let tags = BTreeSet::from(BehavioralTag::ALL);
        let first = select(Profile::BurnoutRisk, &tags);
        let second = select(Profile::BurnoutRisk, &tags);
        assert_eq!(first, second);
        assert_eq!(
            titles(&first.basic),
            vec![
                "The 5-Minute Rule",
                "Single-Task List",
                "Mindful Break",
                "Turn Off Notifications"
            ]
        );
        assert_eq!(first.premium.len(), 3);
    }

    #[test]
    fn serializes_with_tier_labels() {
        let recs = select(Profile::FocusedAchiever, &BTreeSet::from([BehavioralTag::Distraction]));
        let value = serde_json::to_value(&recs).expect("serializes");
        assert_eq!(value["Basic (Free)"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["Premium (Advanced)"], serde_json::json!([]));
    }
}
