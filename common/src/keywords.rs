//! 判定用キーワード辞書
//!
//! すべて部分一致で使う。見積書の入力揺れに合わせて全角・半角の両表記をそのまま持ち、
//! Unicode正規化はしない（正規化すると一致結果が変わる）。

/// 設備区分見出しの目印
pub const EQUIPMENT_SECTION_MARKER: &str = "設備工事";

// ---------------------------------------------------------------------------
// 設備区分見出し（親コンテキスト）の判定語
// ---------------------------------------------------------------------------

/// 電気系の設備見出し
pub const ELECTRIC_SECTION_MARKERS: &[&str] = &[
    "電気", "電力", "電灯", "照明", "電話", "インターネット", "テレビ", "インターホン",
    "ITV", "火災報知", "避雷",
];

/// 給排水・空調系の設備見出し
pub const MECHANICAL_SECTION_MARKERS: &[&str] = &[
    "給排水", "給水", "給湯", "排水", "衛生器具", "ガス", "消火", "空調",
];

// ---------------------------------------------------------------------------
// 設備
// ---------------------------------------------------------------------------

/// 電気設備（配線・盤・器具・弱電）
pub const ELECTRIC: &[&str] = &[
    // 盤類
    "分電盤", "動力盤", "制御盤", "端子盤", "開閉器盤", "キュービクル", "受変電",
    // 配線・配管
    "幹線", "電線管", "ケーブル", "ｹｰﾌﾞﾙ", "VVF", "VVR", "CVT", "EM-", "IV線",
    "プルボックス", "ケーブルラック", "金属管", "PF管", "CD管", "ワイヤリング",
    // 器具
    "コンセント", "ｺﾝｾﾝﾄ", "スイッチ", "ｽｲｯﾁ", "照明器具", "ダウンライト", "LED",
    "非常照明", "誘導灯", "蛍光灯", "ブラケット灯", "シーリングライト",
    // 弱電・防災
    "自動火災報知", "感知器", "発信機", "インターホン", "ｲﾝﾀｰﾎﾝ", "テレビ共聴",
    "TV共聴", "アンテナ", "放送設備", "スピーカー", "LAN", "情報配管", "電話配管",
    "防犯カメラ", "弱電", "接地", "避雷針",
];

/// 機械設備（給排水衛生・ガス・消火・空調）
pub const MECHANICAL: &[&str] = &[
    // 給排水
    "給水管", "給湯管", "排水管", "通気管", "汚水管", "雑排水", "VP管", "HIVP",
    "SGP", "ライニング鋼管", "架橋ポリ", "受水槽", "高架水槽", "揚水ポンプ",
    "加圧給水ポンプ", "排水ポンプ", "汚水桝", "雨水桝", "排水桝", "量水器", "止水栓",
    // 衛生器具
    "衛生器具", "便器", "大便器", "小便器", "洗面器", "手洗器", "水栓", "混合栓",
    "ユニットバス", "浴槽", "給湯器", "ｶﾞｽ給湯器",
    // ガス
    "ガス管", "ガス栓", "ガス配管", "ｶﾞｽ管",
    // 消火
    "消火栓", "消火器", "スプリンクラー", "連結送水管", "ｽﾌﾟﾘﾝｸﾗｰ",
    // 空調・換気
    "空調機", "エアコン", "ｴｱｺﾝ", "パッケージ", "室外機", "冷媒管", "ドレン管",
    "ダクト", "ﾀﾞｸﾄ", "換気扇", "送風機", "全熱交換", "ロスナイ", "制気口",
    "ガラリ換気", "保温", "FCU", "ファンコイル",
];

// ---------------------------------------------------------------------------
// 屋根・屋上
// ---------------------------------------------------------------------------

/// 屋根の除外語
pub const ROOF_EXCLUDES: &[&str] = &["EVピット", "消火水槽"];

/// 屋根・屋外水平面の部位
pub const ROOF_POSITIONS: &[&str] = &[
    "屋上", "屋根", "バルコニー", "ﾊﾞﾙｺﾆｰ", "ベランダ", "廊下", "開放廊下", "庇",
    "塔屋", "PH階", "パラペット", "ルーフ",
];

/// 屋根部位と組み合わせて屋根とみなす仕上げ
pub const ROOF_FINISHES: &[&str] = &["コンクリート金鏝押え", "打放し補修"];

/// 防水関連
pub const WATERPROOFING: &[&str] = &[
    "防水", "ｱｽﾌｧﾙﾄ防水", "シート防水", "ウレタン", "ｳﾚﾀﾝ", "塗膜", "FRP", "改質",
    "断熱", "押えコンクリート", "保護コンクリート", "伸縮目地", "長尺シート",
    "トップコート", "立上り",
];

/// 単独で屋根とみなす部材
pub const ROOF_DETAIL_PARTS: &[&str] = &[
    "笠木", "水切", "雪止め金具", "ルーフドレン", "ﾙｰﾌﾄﾞﾚﾝ", "竪樋", "軒樋", "脱気筒",
    "丸環", "ハト小屋", "鳩小屋", "折板", "瓦", "トップライト", "タラップ",
];

// ---------------------------------------------------------------------------
// 躯体
// ---------------------------------------------------------------------------

/// 杭の除外語
pub const PILE_EXCLUDES: &[&str] = &["クレーン基礎杭費", "ｸﾚｰﾝ基礎杭費", "杭間浚い"];

/// 杭・地業
pub const PILE: &[&str] = &[
    "杭", "場所打ち杭", "場所打杭", "場所打ち鉄筋", "場所打鉄筋", "既製杭", "PHC",
    "ＰＨＣ", "鋼管杭", "杭頭", "杭打", "地盤改良", "柱状改良", "砕石地業",
    "割栗", "地業",
];

/// 杭工事区分で杭とみなす費目
pub const PILE_WORK_CATEGORY: &str = "杭工事";
pub const PILE_WORK_COST: &str = "施工費";

/// コンクリートの除外語
pub const CONCRETE_EXCLUDES: &[&str] = &["型枠", "コンクリート足場", "ｺﾝｸﾘｰﾄ足場"];

/// 屋根と競合する金鏝押え
pub const TROWEL_FINISH: &str = "コンクリート金鏝押え";

/// コンクリート（材料・打設・圧送・仕上げ）
pub const CONCRETE: &[&str] = &[
    // 材料
    "コンクリート", "ｺﾝｸﾘｰﾄ", "生コン", "生ｺﾝ", "ﾅﾏｺﾝ", "普通コン", "軽量コン",
    "捨てコン", "捨コン", "土間コン", "ｽﾃｺﾝ", "Fc", "FC", "呼び強度",
    // 打設
    "打設", "打込", "打設手間", "打設費",
    // 圧送
    "ポンプ圧送", "ﾎﾟﾝﾌﾟ圧送", "圧送費", "ポンプ車", "ﾎﾟﾝﾌﾟ車",
    // 仕上げ
    "金鏝押え", "金ゴテ", "金ｺﾃ", "木鏝", "直均し", "ならし",
];

/// 鉄骨の除外語
pub const STEEL_EXCLUDES: &[&str] = &["軽量鉄骨", "LGS"];

/// 鉄骨
pub const STEEL_FRAME: &[&str] = &[
    "鉄骨", "ﾃｯｺﾂ", "鋼材", "H形鋼", "H鋼", "角形鋼管", "コラム", "建方", "現場溶接",
    "高力ボルト", "ﾊｲﾃﾝﾎﾞﾙﾄ", "アンカーボルト", "ｱﾝｶｰﾎﾞﾙﾄ", "デッキプレート",
    "ﾃﾞｯｷﾌﾟﾚｰﾄ", "耐火被覆", "錆止め", "スタッドボルト", "ブレース",
];

/// 鉄筋の除外語
pub const REBAR_EXCLUDES: &[&str] = &["鉄筋足場"];

/// 場所打ち杭の鉄筋は杭側
pub const CAST_IN_PLACE: &[&str] = &["場所打ち", "場所打"];
pub const REBAR_WORD: &str = "鉄筋";

/// 鉄筋
pub const REBAR: &[&str] = &[
    "鉄筋", "ﾃｯｷﾝ", "異形棒鋼", "D10", "D13", "D16", "D19", "D22", "D25", "SD295",
    "SD345", "ガス圧接", "圧接", "機械式継手", "溶接金網", "ワイヤーメッシュ",
    "ｽﾍﾟｰｻｰ", "配筋",
];

/// その他躯体
pub const OTHER_STRUCTURE: &[&str] = &[
    "型枠", "ｶﾀﾜｸ", "止水板", "打継", "スリーブ", "構造スリット", "耐震スリット",
    "ブロック積", "CB積", "ハーフPC", "PC板", "インサート", "面木", "セパレーター",
    "躯体",
];

// ---------------------------------------------------------------------------
// 外部
// ---------------------------------------------------------------------------

/// 外壁
pub const EXTERIOR_WALL: &[&str] = &[
    "外壁", "外装", "外部塗装", "外部吹付", "吹付タイル", "外壁タイル", "外部タイル",
    "磁器質タイル", "ALC", "押出成形セメント板", "ECP", "カーテンウォール",
    "サイディング", "外部シーリング", "外部モルタル", "外部打放し",
];

/// 巾木単独では外部開口部としない
pub const BASEBOARD: &str = "巾木";
pub const BASEBOARD_EXTERIOR_CONTEXT: &[&str] = &["廊下", "バルコニー", "防水"];

/// 外部開口部（窓・サッシ・シャッター・外部扉）
pub const EXTERIOR_OPENING: &[&str] = &[
    "サッシ", "ｻｯｼ", "アルミ製建具", "AW", "窓", "シャッター", "ｼｬｯﾀｰ", "玄関ドア",
    "外部建具", "ガラス", "ｶﾞﾗｽ", "網戸", "面格子", "手摺", "手すり", "ガラリ",
    "ステンレス製建具", "自動ドア",
];

// ---------------------------------------------------------------------------
// 内部
// ---------------------------------------------------------------------------

/// 内部床・内部壁の除外語
pub const CEILING_WORD: &str = "天井";
pub const WALL_WORD: &str = "壁";
pub const FLOOR_WORD: &str = "床";
pub const FLOOR_ROOF_CONFLICTS: &[&str] = &["防水", "コンクリート金鏝押え"];

/// 内部壁の除外語
pub const INTERIOR_WALL_EXCLUDES: &[&str] = &["天井", "額縁", "SD", "開口"];

/// 内部壁
pub const INTERIOR_WALL: &[&str] = &[
    "間仕切", "壁", "LGS", "軽量鉄骨壁", "石膏ボード", "せっこうボード", "PB",
    "ﾌﾟﾗｽﾀｰﾎﾞｰﾄﾞ", "GL工法", "クロス", "ｸﾛｽ", "壁紙", "胴縁", "スタッド", "ランナー",
];

/// 内部開口部（内部建具・枠・金物）
pub const INTERIOR_OPENING: &[&str] = &[
    "SD", "SSD", "LSD", "WD", "木製建具", "鋼製建具", "ドア", "ﾄﾞｱ", "扉", "引戸",
    "襖", "障子", "フラッシュ戸", "額縁", "開口", "枠", "ドアクローザー", "丁番",
    "錠", "建具金物",
];

/// 天井
pub const CEILING: &[&str] = &[
    "岩綿吸音板", "ロックウール吸音板", "化粧石膏ボード", "ジプトーン", "廻り縁",
    "回り縁", "点検口", "野縁", "吊りボルト", "ケイカル板",
];

/// 内部雑（造作・付属品）
pub const INTERIOR_MISC: &[&str] = &[
    "巾木", "ソフト巾木", "カーテンレール", "ブラインド", "造作", "カウンター", "棚",
    "下駄箱", "収納", "鏡", "内部塗装", "階段", "ノンスリップ", "タオル掛",
    "紙巻器", "流し台", "キッチン", "家具", "サイン",
];

// ---------------------------------------------------------------------------
// 対象外
// ---------------------------------------------------------------------------

/// 他ルールで除外した足場類
pub const SCAFFOLDING_EXCLUSIONS: &[&str] = &["鉄筋足場", "コンクリート足場", "ｺﾝｸﾘｰﾄ足場"];

/// 仮設・土工・経費など
pub const EXCLUDED: &[&str] = &[
    "足場", "仮囲費", "仮囲", "根切", "山留", "残土処分", "埋戻", "杭間浚い",
    "クレーン基礎", "ｸﾚｰﾝ基礎", "水替", "仮設", "養生", "清掃", "片付", "揚重",
    "運搬", "発生材", "産廃", "解体", "撤去", "墨出し", "試験", "諸経費",
    "現場管理費", "一般管理費", "共通費",
];

/// いずれかのキーワードを含むか
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
