mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::db::{Category, Question};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

/// Body shared by the search and by-category listings: the questions within
/// whatever scope produced them, plus the count of that scope.
#[derive(Serialize)]
pub(crate) struct QuestionList {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

pub(crate) fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories
        .into_iter()
        .map(|category| (category.id, category.kind))
        .collect()
}
