//! 工事細目（分類カテゴリ）の定義
//!
//! 16種類の固定ラベル。`rank` は表示順のみに使い、判定の優先順位には使わない。
//! 判定順は `rules::RULES` が持つ。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 工事細目
///
/// 宣言順 = 表示順（`Ord` もこの順）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "1.1 杭・地業")]
    Pile,
    #[serde(rename = "1.2 コンクリート")]
    Concrete,
    #[serde(rename = "1.3 鉄骨")]
    SteelFrame,
    #[serde(rename = "1.4 鉄筋")]
    Rebar,
    #[serde(rename = "1.5 その他躯体")]
    OtherStructure,
    #[serde(rename = "2.1 屋根・屋上")]
    Roof,
    #[serde(rename = "2.2 外壁")]
    ExteriorWall,
    #[serde(rename = "2.3 外部開口部")]
    ExteriorOpening,
    #[serde(rename = "3.1 内部床")]
    InteriorFloor,
    #[serde(rename = "3.2 内部壁")]
    InteriorWall,
    #[serde(rename = "3.3 内部開口部")]
    InteriorOpening,
    #[serde(rename = "3.4 天井")]
    Ceiling,
    #[serde(rename = "3.5 内部雑")]
    InteriorMisc,
    #[serde(rename = "4.1 電気設備")]
    ElectricEquipment,
    #[serde(rename = "4.2 機械設備")]
    MechanicalEquipment,
    /// 対象外。明示ルールの判定先であり、どのルールにも該当しない場合の既定値
    #[serde(rename = "0.0 対象外")]
    Excluded,
}

impl Category {
    /// 全カテゴリ（表示順）
    pub const ALL: [Category; 16] = [
        Category::Pile,
        Category::Concrete,
        Category::SteelFrame,
        Category::Rebar,
        Category::OtherStructure,
        Category::Roof,
        Category::ExteriorWall,
        Category::ExteriorOpening,
        Category::InteriorFloor,
        Category::InteriorWall,
        Category::InteriorOpening,
        Category::Ceiling,
        Category::InteriorMisc,
        Category::ElectricEquipment,
        Category::MechanicalEquipment,
        Category::Excluded,
    ];

    /// 正式表記（Excelに書き戻す文字列）
    pub fn label(&self) -> &'static str {
        match self {
            Category::Pile => "1.1 杭・地業",
            Category::Concrete => "1.2 コンクリート",
            Category::SteelFrame => "1.3 鉄骨",
            Category::Rebar => "1.4 鉄筋",
            Category::OtherStructure => "1.5 その他躯体",
            Category::Roof => "2.1 屋根・屋上",
            Category::ExteriorWall => "2.2 外壁",
            Category::ExteriorOpening => "2.3 外部開口部",
            Category::InteriorFloor => "3.1 内部床",
            Category::InteriorWall => "3.2 内部壁",
            Category::InteriorOpening => "3.3 内部開口部",
            Category::Ceiling => "3.4 天井",
            Category::InteriorMisc => "3.5 内部雑",
            Category::ElectricEquipment => "4.1 電気設備",
            Category::MechanicalEquipment => "4.2 機械設備",
            Category::Excluded => "0.0 対象外",
        }
    }

    /// 番号部分（"2.1" など）
    pub fn code(&self) -> &'static str {
        self.label()
            .split_once(' ')
            .map(|(code, _)| code)
            .unwrap_or_default()
    }

    /// 表示順（1始まり、対象外が最後）
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    /// 正式表記・番号・名称部分のいずれでも受け付ける
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| {
                let label = c.label();
                label == s
                    || c.code() == s
                    || label.split_once(' ').map(|(_, name)| name) == Some(s)
            })
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_sixteen_unique_labels() {
        let labels: std::collections::HashSet<_> =
            Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 16);
    }

    #[test]
    fn test_rank_follows_declaration_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.rank() as usize, i + 1);
        }
        assert_eq!(Category::Excluded.rank(), 16);
        assert!(Category::Pile < Category::Excluded);
    }

    #[test]
    fn test_code() {
        assert_eq!(Category::Roof.code(), "2.1");
        assert_eq!(Category::Excluded.code(), "0.0");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("2.1 屋根・屋上".parse::<Category>().unwrap(), Category::Roof);
        assert_eq!("4.1".parse::<Category>().unwrap(), Category::ElectricEquipment);
        assert_eq!("対象外".parse::<Category>().unwrap(), Category::Excluded);
        assert_eq!(" 1.4 鉄筋 ".parse::<Category>().unwrap(), Category::Rebar);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "9.9 不明".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(_)));
    }

    #[test]
    fn test_display_is_label() {
        assert_eq!(format!("{}", Category::Ceiling), "3.4 天井");
    }
}
