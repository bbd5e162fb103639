//! Canned mentor reply selection.
//!
//! Two fixed tables: per-career-goal lists for the REST mentor chat, and a
//! general list for the realtime channel where no profile context exists.
//! Selection is a uniform draw over an immutable list; the randomness
//! source is a parameter so tests can seed it.

use rand::Rng;

use crate::accounts::profile::CareerGoal;

const AI_ENGINEER_REPLIES: &[&str] = &[
    "For AI engineering, focus on Python and TensorFlow first.",
    "Deep learning is crucial. Start with neural network basics.",
    "Computer vision and NLP are key AI engineering skills.",
];

const DATA_SCIENTIST_REPLIES: &[&str] = &[
    "Statistics and Python are fundamental for data science.",
    "Master pandas, matplotlib, and scikit-learn.",
    "Practice with real datasets to build your portfolio.",
];

const ML_ENGINEER_REPLIES: &[&str] = &[
    "MLOps is essential for ML engineers.",
    "Learn Docker, Kubernetes for model deployment.",
    "Focus on production-ready ML systems.",
];

/// Replies for the realtime mentor channel, where the sender's profile is
/// not consulted.
pub const GENERAL_REPLIES: &[&str] = &[
    "Great question! For AI engineering, start with Python fundamentals.",
    "Based on your goals, I recommend focusing on machine learning basics first.",
    "That's a smart approach! Let's break this into smaller learning modules.",
    "Perfect! For your learning style, try hands-on projects alongside theory.",
    "Excellent question! This is fundamental to your chosen career path.",
];

/// The fixed reply list for a career goal.
pub fn replies_for(goal: CareerGoal) -> &'static [&'static str] {
    match goal {
        CareerGoal::AiEngineer => AI_ENGINEER_REPLIES,
        CareerGoal::DataScientist => DATA_SCIENTIST_REPLIES,
        CareerGoal::MlEngineer => ML_ENGINEER_REPLIES,
    }
}

/// Draw a reply for a career goal. An unrecognized goal (None) falls back
/// to the AI Engineer list.
pub fn select_for_goal<R: Rng + ?Sized>(rng: &mut R, goal: Option<CareerGoal>) -> &'static str {
    let pool = replies_for(goal.unwrap_or(CareerGoal::AiEngineer));
    pool[rng.random_range(0..pool.len())]
}

/// Draw a reply from the general list.
pub fn select_general<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GENERAL_REPLIES[rng.random_range(0..GENERAL_REPLIES.len())]
}
