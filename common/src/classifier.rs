//! 工事細目の判定
//!
//! 項目名・工事区分・直近の設備工事見出しから細目を1つ決める。
//! 判定は純粋関数で、同じ入力には常に同じ結果を返す。

use crate::category::Category;
use crate::rules::{first_match, Rule, RuleInput, RULES};

/// 既定値に落ちたときのルール名
pub const FALLBACK_RULE: &str = "既定（対象外）";

/// 判定結果（どのルールで決まったか付き）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub category: Category,
    pub rule: &'static str,
}

/// 判定器
///
/// ルール列は構築時に固定され、以後変更されない。
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(RULES.to_vec())
    }
}

impl Classifier {
    /// 任意の判定順で構築
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 判定してルール名も返す
    ///
    /// 項目名が空（空白のみを含む）なら `None`。それ以外は必ず `Some`。
    pub fn decide(&self, name: &str, work_category: &str, context: &str) -> Option<Decision> {
        decide_with(&self.rules, name, work_category, context)
    }

    /// 細目を判定
    pub fn classify(&self, name: &str, work_category: &str, context: &str) -> Option<Category> {
        self.decide(name, work_category, context).map(|d| d.category)
    }
}

fn decide_with(
    rules: &[Rule],
    name: &str,
    work_category: &str,
    context: &str,
) -> Option<Decision> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let input = RuleInput {
        name,
        work_category: work_category.trim(),
        context: context.trim(),
    };

    let decision = match first_match(rules, &input) {
        Some(rule) => Decision { category: rule.category, rule: rule.name },
        None => Decision { category: Category::Excluded, rule: FALLBACK_RULE },
    };
    Some(decision)
}

/// 標準ルールで細目を判定
///
/// # Arguments
/// * `name` - 項目名
/// * `work_category` - 工事区分（杭工事の施工費判定にのみ使用、空文字可）
/// * `context` - 直近の設備工事見出し（空文字可）
pub fn classify(name: &str, work_category: &str, context: &str) -> Option<Category> {
    decide_with(RULES, name, work_category, context).map(|d| d.category)
}
