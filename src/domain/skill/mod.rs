//! Skills shown on a CV and their derivation from GitHub languages.

mod classifier;
#[allow(clippy::module_inception)]
mod skill;

pub use classifier::{category_for, classify, display_order, draft_for_language, level_for};
pub use skill::{Skill, SkillCategory, SkillDraft, SkillLevel, MAX_SKILL_NAME_LEN};
