//! Feature encoding — turns a `Profile` into the positional row the classifier expects.
//!
//! The schema is resolved once at load: every column name gets an index and the
//! well-known engineered columns get typed slots. Encoding a request is then a
//! plain walk over the profile with no per-column string matching.

use std::collections::HashMap;

use crate::models::profile::Profile;
use crate::recommendation::artifacts::ArtifactError;

pub const TECHNICAL_SKILLS: &[&str] = &[
    "Python",
    "SQL",
    "Java",
    "Cloud Computing",
    "Machine Learning",
    "Statistics",
];
pub const SOFT_SKILLS: &[&str] = &["Communication", "Leadership", "Project Management"];
pub const CREATIVE_SKILLS: &[&str] = &["Creative Writing", "UI/UX"];
pub const BUSINESS_SKILLS: &[&str] = &["Business Strategy", "Data Analysis", "Excel"];

/// Column read back by the Software Engineer heuristic.
const JAVA_COLUMN: &str = "Java";

/// Positions of the engineered columns. `None` when the schema lacks the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WellKnownSlots {
    analytical: Option<usize>,
    creative: Option<usize>,
    social: Option<usize>,
    education_encoded: Option<usize>,
    experience: Option<usize>,
    tech_skill_count: Option<usize>,
    soft_skill_count: Option<usize>,
    creative_skill_count: Option<usize>,
    business_skill_count: Option<usize>,
    java: Option<usize>,
}

/// Ordered column layout of the classifier input, immutable after construction.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    slots: WellKnownSlots,
}

impl FeatureSchema {
    /// Resolves column names to positions. Duplicate names are rejected since
    /// a name would then address two positions.
    pub fn new(columns: Vec<String>) -> Result<Self, ArtifactError> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ArtifactError::DuplicateFeature(name.clone()));
            }
        }

        let slot = |name: &str| index.get(name).copied();
        let slots = WellKnownSlots {
            analytical: slot("analytical"),
            creative: slot("creative"),
            social: slot("social"),
            education_encoded: slot("education_encoded"),
            experience: slot("experience"),
            tech_skill_count: slot("tech_skill_count"),
            soft_skill_count: slot("soft_skill_count"),
            creative_skill_count: slot("creative_skill_count"),
            business_skill_count: slot("business_skill_count"),
            java: slot(JAVA_COLUMN),
        };

        Ok(Self {
            columns,
            index,
            slots,
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// Typed profile signals the blender's heuristics read.
///
/// All fields except `java_flag` come straight from the profile regardless of
/// schema membership. `java_flag` is read back from the encoded row, so it is
/// false both when the schema has no `Java` column and when the flag is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSignals {
    pub creative: f64,
    pub social: f64,
    pub education_encoded: u8,
    pub experience: u32,
    pub tech_skill_count: u32,
    pub java_flag: bool,
}

/// Output of [`encode`]: the classifier row plus the signals derived alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedProfile {
    pub features: Vec<f64>,
    pub signals: ProfileSignals,
}

/// Builds the feature row for `profile` in `schema` column order.
///
/// Skills and interests that exactly name a column set it to 1; unknown names
/// are ignored. Engineered columns missing from the schema are skipped.
pub fn encode(profile: &Profile, schema: &FeatureSchema) -> EncodedProfile {
    let mut features = vec![0.0_f64; schema.len()];

    for name in profile.skills.iter().chain(profile.interests.iter()) {
        if let Some(i) = schema.position(name) {
            features[i] = 1.0;
        }
    }

    let personality = profile.personality;
    let education_encoded = profile.education.ordinal();
    let tech_skill_count = count_in(profile, TECHNICAL_SKILLS);
    let soft_skill_count = count_in(profile, SOFT_SKILLS);
    let creative_skill_count = count_in(profile, CREATIVE_SKILLS);
    let business_skill_count = count_in(profile, BUSINESS_SKILLS);

    let slots = &schema.slots;
    let mut put = |slot: Option<usize>, value: f64| {
        if let Some(i) = slot {
            features[i] = value;
        }
    };
    put(slots.analytical, personality.analytical);
    put(slots.creative, personality.creative);
    put(slots.social, personality.social);
    put(slots.education_encoded, f64::from(education_encoded));
    put(slots.experience, f64::from(profile.experience));
    put(slots.tech_skill_count, f64::from(tech_skill_count));
    put(slots.soft_skill_count, f64::from(soft_skill_count));
    put(slots.creative_skill_count, f64::from(creative_skill_count));
    put(slots.business_skill_count, f64::from(business_skill_count));

    let java_flag = slots.java.is_some_and(|i| features[i] > 0.0);

    EncodedProfile {
        features,
        signals: ProfileSignals {
            creative: personality.creative,
            social: personality.social,
            education_encoded,
            experience: profile.experience,
            tech_skill_count,
            java_flag,
        },
    }
}

fn count_in(profile: &Profile, category: &[&str]) -> u32 {
    profile
        .skills
        .iter()
        .filter(|s| category.contains(&s.as_str()))
        .count() as u32
}
