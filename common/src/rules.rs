//! 判定ルール
//!
//! 判定順はこのファイルの `RULES` の並びそのもの。先に一致したルールが採用される。
//! キーワードが複数カテゴリに重なる場合は、この並びで解決する
//! （例: 「コンクリート金鏝押え」は屋根とコンクリートの両方にある）。

use crate::category::Category;
use crate::keywords::{self as kw, contains_any};

/// ルール評価の入力
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleInput<'a> {
    /// 項目名（前後空白除去済み）
    pub name: &'a str,
    /// 工事区分
    pub work_category: &'a str,
    /// 直近の設備工事見出し
    pub context: &'a str,
}

/// 名前付き判定ルール
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub category: Category,
    pub predicate: fn(&RuleInput) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

impl Rule {
    pub fn matches(&self, input: &RuleInput) -> bool {
        (self.predicate)(input)
    }
}

/// 標準の判定順
pub const RULES: &[Rule] = &[
    Rule {
        name: "電気設備見出し",
        category: Category::ElectricEquipment,
        predicate: electric_section,
    },
    Rule {
        name: "機械設備見出し",
        category: Category::MechanicalEquipment,
        predicate: mechanical_section,
    },
    Rule {
        name: "電気設備",
        category: Category::ElectricEquipment,
        predicate: electric,
    },
    Rule {
        name: "機械設備",
        category: Category::MechanicalEquipment,
        predicate: mechanical,
    },
    Rule {
        name: "屋根・屋上",
        category: Category::Roof,
        predicate: roof,
    },
    Rule {
        name: "杭・地業",
        category: Category::Pile,
        predicate: pile,
    },
    Rule {
        name: "杭工事施工費",
        category: Category::Pile,
        predicate: pile_work_cost,
    },
    Rule {
        name: "コンクリート",
        category: Category::Concrete,
        predicate: concrete,
    },
    Rule {
        name: "鉄骨",
        category: Category::SteelFrame,
        predicate: steel_frame,
    },
    Rule {
        name: "鉄筋",
        category: Category::Rebar,
        predicate: rebar,
    },
    Rule {
        name: "その他躯体",
        category: Category::OtherStructure,
        predicate: other_structure,
    },
    Rule {
        name: "外壁",
        category: Category::ExteriorWall,
        predicate: exterior_wall,
    },
    Rule {
        name: "外部開口部",
        category: Category::ExteriorOpening,
        predicate: exterior_opening,
    },
    Rule {
        name: "内部床",
        category: Category::InteriorFloor,
        predicate: interior_floor,
    },
    Rule {
        name: "内部壁",
        category: Category::InteriorWall,
        predicate: interior_wall,
    },
    Rule {
        name: "内部開口部",
        category: Category::InteriorOpening,
        predicate: interior_opening,
    },
    Rule {
        name: "天井",
        category: Category::Ceiling,
        predicate: ceiling,
    },
    Rule {
        name: "内部雑",
        category: Category::InteriorMisc,
        predicate: interior_misc,
    },
    Rule {
        name: "対象外",
        category: Category::Excluded,
        predicate: excluded,
    },
];

/// 先頭から評価して最初に一致したルールを返す
pub fn first_match<'r>(rules: &'r [Rule], input: &RuleInput) -> Option<&'r Rule> {
    rules.iter().find(|rule| rule.matches(input))
}

/// 名前でルールを探す
pub fn find_rule(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.name == name)
}

// ---------------------------------------------------------------------------
// 設備見出しによる上書き
// ---------------------------------------------------------------------------

fn in_equipment_section(context: &str) -> bool {
    context.contains(kw::EQUIPMENT_SECTION_MARKER)
}

/// 設備の語を含まず、建築部位のルールに一致する項目名
///
/// 設備工事の見出し配下でも、こうした行（例: 「屋上防水」）は見出しで上書きしない。
fn names_building_element(input: &RuleInput) -> bool {
    if contains_any(input.name, kw::ELECTRIC) || contains_any(input.name, kw::MECHANICAL) {
        return false;
    }
    BUILDING_PREDICATES.iter().any(|predicate| predicate(input))
}

const BUILDING_PREDICATES: &[fn(&RuleInput) -> bool] = &[
    roof,
    pile,
    pile_work_cost,
    concrete,
    steel_frame,
    rebar,
    other_structure,
    exterior_wall,
    exterior_opening,
    interior_floor,
    interior_wall,
    interior_opening,
    ceiling,
    interior_misc,
];

fn electric_section(input: &RuleInput) -> bool {
    in_equipment_section(input.context)
        && contains_any(input.context, kw::ELECTRIC_SECTION_MARKERS)
        && !names_building_element(input)
}

fn mechanical_section(input: &RuleInput) -> bool {
    in_equipment_section(input.context)
        && contains_any(input.context, kw::MECHANICAL_SECTION_MARKERS)
        && !names_building_element(input)
}

// ---------------------------------------------------------------------------
// 項目名によるルール
// ---------------------------------------------------------------------------

fn electric(input: &RuleInput) -> bool {
    contains_any(input.name, kw::ELECTRIC)
}

fn mechanical(input: &RuleInput) -> bool {
    contains_any(input.name, kw::MECHANICAL)
}

fn has_roof_position(name: &str) -> bool {
    contains_any(name, kw::ROOF_POSITIONS)
}

fn roof(input: &RuleInput) -> bool {
    let name = input.name;
    if contains_any(name, kw::ROOF_EXCLUDES) {
        return false;
    }

    let finished = contains_any(name, kw::ROOF_FINISHES) || contains_any(name, kw::WATERPROOFING);
    (has_roof_position(name) && finished) || contains_any(name, kw::ROOF_DETAIL_PARTS)
}

fn pile(input: &RuleInput) -> bool {
    !contains_any(input.name, kw::PILE_EXCLUDES) && contains_any(input.name, kw::PILE)
}

fn pile_work_cost(input: &RuleInput) -> bool {
    input.work_category.contains(kw::PILE_WORK_CATEGORY) && input.name.contains(kw::PILE_WORK_COST)
}

fn concrete(input: &RuleInput) -> bool {
    let name = input.name;
    if contains_any(name, kw::CONCRETE_EXCLUDES) {
        return false;
    }
    // 屋根部位の金鏝押えは屋根側
    if has_roof_position(name) && name.contains(kw::TROWEL_FINISH) {
        return false;
    }
    contains_any(name, kw::CONCRETE)
}

fn steel_frame(input: &RuleInput) -> bool {
    !contains_any(input.name, kw::STEEL_EXCLUDES) && contains_any(input.name, kw::STEEL_FRAME)
}

fn rebar(input: &RuleInput) -> bool {
    let name = input.name;
    if contains_any(name, kw::REBAR_EXCLUDES) {
        return false;
    }
    // 場所打ち杭の鉄筋は杭側
    if contains_any(name, kw::CAST_IN_PLACE) && name.contains(kw::REBAR_WORD) {
        return false;
    }
    contains_any(name, kw::REBAR)
}

fn other_structure(input: &RuleInput) -> bool {
    contains_any(input.name, kw::OTHER_STRUCTURE)
}

fn exterior_wall(input: &RuleInput) -> bool {
    contains_any(input.name, kw::EXTERIOR_WALL)
}

fn exterior_opening(input: &RuleInput) -> bool {
    let name = input.name;
    if name.contains(kw::BASEBOARD) && contains_any(name, kw::BASEBOARD_EXTERIOR_CONTEXT) {
        return true;
    }
    contains_any(name, kw::EXTERIOR_OPENING)
}

fn interior_floor(input: &RuleInput) -> bool {
    let name = input.name;
    if name.contains(kw::CEILING_WORD) || name.contains(kw::WALL_WORD) {
        return false;
    }
    if has_roof_position(name) && contains_any(name, kw::FLOOR_ROOF_CONFLICTS) {
        return false;
    }
    name.contains(kw::FLOOR_WORD)
}

fn interior_wall(input: &RuleInput) -> bool {
    !contains_any(input.name, kw::INTERIOR_WALL_EXCLUDES)
        && contains_any(input.name, kw::INTERIOR_WALL)
}

fn interior_opening(input: &RuleInput) -> bool {
    contains_any(input.name, kw::INTERIOR_OPENING)
}

fn ceiling(input: &RuleInput) -> bool {
    input.name.contains(kw::CEILING_WORD) || contains_any(input.name, kw::CEILING)
}

fn interior_misc(input: &RuleInput) -> bool {
    contains_any(input.name, kw::INTERIOR_MISC)
}

fn excluded(input: &RuleInput) -> bool {
    contains_any(input.name, kw::SCAFFOLDING_EXCLUSIONS) || contains_any(input.name, kw::EXCLUDED)
}
