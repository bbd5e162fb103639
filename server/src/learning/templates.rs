//! Static learning-path templates, one per career goal.

use crate::accounts::profile::CareerGoal;

pub struct PathTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub modules: &'static [&'static str],
}

static AI_ENGINEER_PATH: PathTemplate = PathTemplate {
    title: "AI Engineering Mastery Path",
    description: "Complete roadmap to become an AI Engineer",
    modules: &[
        "Python Programming Fundamentals",
        "Mathematics for AI",
        "Machine Learning Basics",
        "Deep Learning with Neural Networks",
        "Computer Vision",
        "Natural Language Processing",
        "AI Project Portfolio",
    ],
};

static DATA_SCIENTIST_PATH: PathTemplate = PathTemplate {
    title: "Data Science Professional Path",
    description: "Comprehensive path to master data science",
    modules: &[
        "Statistics and Probability",
        "Python for Data Science",
        "Data Manipulation with Pandas",
        "Data Visualization",
        "Machine Learning Algorithms",
        "SQL and Databases",
        "Data Science Capstone Project",
    ],
};

static ML_ENGINEER_PATH: PathTemplate = PathTemplate {
    title: "Machine Learning Engineering Path",
    description: "Technical path to deploy ML models in production",
    modules: &[
        "Programming for ML",
        "Machine Learning Fundamentals",
        "Model Training and Validation",
        "MLOps and Model Deployment",
        "Cloud Platforms for ML",
        "Production ML Systems",
    ],
};

/// Template for a career goal. An unrecognized goal (None) falls back to
/// the AI Engineer path.
pub fn template_for(goal: Option<CareerGoal>) -> &'static PathTemplate {
    match goal.unwrap_or(CareerGoal::AiEngineer) {
        CareerGoal::AiEngineer => &AI_ENGINEER_PATH,
        CareerGoal::DataScientist => &DATA_SCIENTIST_PATH,
        CareerGoal::MlEngineer => &ML_ENGINEER_PATH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_goal_resolves_to_its_own_template() {
        assert_eq!(
            template_for(Some(CareerGoal::DataScientist)).title,
            "Data Science Professional Path"
        );
        assert_eq!(
            template_for(Some(CareerGoal::MlEngineer)).modules.len(),
            6
        );
    }

    #[test]
    fn unknown_goal_falls_back_to_ai_engineer() {
        assert_eq!(template_for(None).title, "AI Engineering Mastery Path");
    }
}
