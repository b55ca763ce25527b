use crate::analysis::BehavioralTag;
use crate::assessment::Profile;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    Basic,
    Premium,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Basic => "Basic (Free)",
            Tier::Premium => "Premium (Advanced)",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Catalog tip with optional eligibility constraints.
///
/// A missing constraint always matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub for_profiles: Option<&'static [Profile]>,
    pub for_tags: Option<&'static [BehavioralTag]>,
    pub tier: Tier,
}

impl RecommendationEntry {
    pub fn matches_profile(&self, profile: Profile) -> bool {
        self.for_profiles
            .map_or(true, |profiles| profiles.contains(&profile))
    }

    pub fn matches_tags(&self, tags: &BTreeSet<BehavioralTag>) -> bool {
        self.for_tags
            .map_or(true, |wanted| wanted.iter().any(|tag| tags.contains(tag)))
    }

    pub fn is_eligible(&self, profile: Profile, tags: &BTreeSet<BehavioralTag>) -> bool {
        self.matches_profile(profile) && self.matches_tags(tags)
    }

    pub fn render(&self) -> String {
        format!("{}: {}", self.title, self.description)
    }
}

pub static CATALOG: [RecommendationEntry; 7] = [
    RecommendationEntry {
        title: "The 5-Minute Rule",
        description: "If a task takes less than 5 minutes, do it immediately. This helps beat procrastination on small items.",
        for_profiles: None,
        for_tags: Some(&[BehavioralTag::Procrastination, BehavioralTag::Planning]),
        tier: Tier::Basic,
    },
    RecommendationEntry {
        title: "Single-Task List",
        description: "Start your day by identifying the ONE most important task. Focus on finishing only that task before moving to others.",
        for_profiles: Some(&[Profile::BurnoutRisk, Profile::ModeratelyDistracted]),
        for_tags: None,
        tier: Tier::Basic,
    },
    RecommendationEntry {
        title: "Mindful Break",
        description: "Take a 5-minute break every hour to stretch, walk, or just look away from your screen. Helps reduce mental fatigue.",
        for_profiles: Some(&[Profile::BurnoutRisk]),
        for_tags: Some(&[BehavioralTag::Burnout, BehavioralTag::TimeAnxiety]),
        tier: Tier::Basic,
    },
    RecommendationEntry {
        title: "Turn Off Notifications",
        description: "Disable non-essential notifications on your phone and computer for a 1-hour block of deep work.",
        for_profiles: None,
        for_tags: Some(&[BehavioralTag::Distraction]),
        tier: Tier::Basic,
    },
    RecommendationEntry {
        title: "Advanced Time Blocking",
        description: "Access our guided module to plan your entire week using time blocks, ensuring a balance between deep work, meetings, and breaks.",
        for_profiles: Some(&[Profile::ModeratelyDistracted, Profile::BurnoutRisk]),
        for_tags: None,
        tier: Tier::Premium,
    },
    RecommendationEntry {
        title: "Guided Calming Audio",
        description: "Listen to our 3-minute calming audio session before starting a stressful task to reduce anxiety and improve focus.",
        for_profiles: None,
        for_tags: Some(&[BehavioralTag::TimeAnxiety, BehavioralTag::Burnout]),
        tier: Tier::Premium,
    },
    RecommendationEntry {
        title: "Procrastination Coach Chatbot",
        description: "Engage with our AI coach to identify the root causes of your procrastination and get personalized strategies.",
        for_profiles: None,
        for_tags: Some(&[BehavioralTag::Procrastination]),
        tier: Tier::Premium,
    },
];
