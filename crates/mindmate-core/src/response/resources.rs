//! Fixed support resource catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::CrisisLevel;

/// Text appended to every high-risk reply.
pub const CRISIS_RESOURCES_BLOCK: &str = "\
**Please contact crisis support right now:**
• Call 988 (Suicide & Crisis Lifeline)
• Text HOME to 741741 (Crisis Text Line)
• Call 911 for immediate emergency help

You are not alone - help is available right now.";

/// Top-level resource groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Crisis,
    Therapy,
    Support,
}

impl ResourceCategory {
    /// Returns all resource categories.
    pub fn all() -> &'static [ResourceCategory] {
        &[
            ResourceCategory::Crisis,
            ResourceCategory::Therapy,
            ResourceCategory::Support,
        ]
    }

    fn entries(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ResourceCategory::Crisis => &[
                ("988 Suicide & Crisis Lifeline", "Call or text 988, available 24/7"),
                ("Crisis Text Line", "Text HOME to 741741"),
                ("Emergency Services", "Call 911 if you are in immediate danger"),
            ],
            ResourceCategory::Therapy => &[
                ("BetterHelp", "Online sessions with licensed therapists"),
                ("Psychology Today", "Therapist directory at psychologytoday.com"),
            ],
            ResourceCategory::Support => &[
                ("7 Cups", "Free chat with trained volunteer listeners"),
                ("Support Groups Central", "Online peer support groups"),
            ],
        }
    }
}

/// Resource category -> (resource name -> description/contact).
pub type ResourceMap = BTreeMap<ResourceCategory, BTreeMap<String, String>>;

/// Returns the full resource catalog.
pub fn full_catalog() -> ResourceMap {
    ResourceCategory::all()
        .iter()
        .map(|category| (*category, category_entries(*category)))
        .collect()
}

/// Returns the resources appropriate for a crisis level.
///
/// At `High` only the crisis category is returned.
pub fn resources_for(level: CrisisLevel) -> ResourceMap {
    match level {
        CrisisLevel::High => {
            BTreeMap::from([(ResourceCategory::Crisis, category_entries(ResourceCategory::Crisis))])
        }
        CrisisLevel::Low | CrisisLevel::Medium => full_catalog(),
    }
}

fn category_entries(category: ResourceCategory) -> BTreeMap<String, String> {
    category
        .entries()
        .iter()
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect()
}
