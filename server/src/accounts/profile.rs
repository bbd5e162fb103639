//! Typed profile attributes. The REST boundary accepts only these values;
//! rows store the display strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareerGoal {
    #[serde(rename = "AI Engineer")]
    AiEngineer,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "ML Engineer")]
    MlEngineer,
}

impl CareerGoal {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AI Engineer" => Some(Self::AiEngineer),
            "Data Scientist" => Some(Self::DataScientist),
            "ML Engineer" => Some(Self::MlEngineer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiEngineer => "AI Engineer",
            Self::DataScientist => "Data Scientist",
            Self::MlEngineer => "ML Engineer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "B.Tech")]
    BTech,
    #[serde(rename = "BSc")]
    BSc,
    #[serde(rename = "Diploma")]
    Diploma,
}

impl EducationLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "B.Tech" => Some(Self::BTech),
            "BSc" => Some(Self::BSc),
            "Diploma" => Some(Self::Diploma),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BTech => "B.Tech",
            Self::BSc => "BSc",
            Self::Diploma => "Diploma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
}

impl LearningStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Visual" => Some(Self::Visual),
            "Auditory" => Some(Self::Auditory),
            "Kinesthetic" => Some(Self::Kinesthetic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visual => "Visual",
            Self::Auditory => "Auditory",
            Self::Kinesthetic => "Kinesthetic",
        }
    }
}
