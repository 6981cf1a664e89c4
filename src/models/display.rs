//! 显示名称表
//!
//! 学段、学科的显示名称是固定的静态配置，查不到时按统一规则回退。

use phf::phf_map;

/// 学段显示名称
static EDUCATION_LEVEL_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "vwo" => "VWO",
    "havo" => "HAVO",
    "vmbo_gl" => "VMBO-GL",
    "vmbo_tl" => "VMBO-TL",
    "vmbo_kb" => "VMBO-KB",
    "vmbo_bb" => "VMBO-BB",
};

/// 学科显示名称
static DISCIPLINE_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "biologie" => "Biologie",
    "scheikunde" => "Scheikunde",
    "natuurkunde" => "Natuurkunde",
    "wiskunde_a" => "Wiskunde A",
    "wiskunde_b" => "Wiskunde B",
    "wiskunde_c" => "Wiskunde C",
    "economie" => "Economie",
    "bedrijfseconomie" => "Bedrijfseconomie",
    "aardrijkskunde" => "Aardrijkskunde",
    "geschiedenis" => "Geschiedenis",
    "maatschappijwetenschappen" => "Maatschappijwetenschappen",
    "maatschappijkunde" => "Maatschappijkunde",
    "engels" => "Engels",
    "nederlands" => "Nederlands",
    "duits" => "Duits",
    "frans" => "Frans",
    "spaans" => "Spaans",
    "geschiedenis_en_staatsinrichting" => "Geschiedenis en Staatsinrichting",
    "natuur_en_scheikunde_1" => "Natuur- en Scheikunde 1",
    "natuur_en_scheikunde_2" => "Natuur- en Scheikunde 2",
    "wiskunde" => "Wiskunde",
};

/// 学段排序优先级，未列出的学段排在最后
pub const LEVEL_ORDER: [&str; 6] = ["vwo", "havo", "vmbo_gl", "vmbo_tl", "vmbo_kb", "vmbo_bb"];

/// 学段显示名称，未知学段转为大写
pub fn education_level_name(level: &str) -> String {
    EDUCATION_LEVEL_NAMES
        .get(level)
        .map(|name| name.to_string())
        .unwrap_or_else(|| level.to_uppercase())
}

/// 学科显示名称，未知学科首字母大写并把下划线换成空格
pub fn discipline_name(discipline: &str) -> String {
    if let Some(name) = DISCIPLINE_NAMES.get(discipline) {
        return name.to_string();
    }

    let mut chars = discipline.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}

/// 科目节点标签，如 `VWO Wiskunde B`
pub fn subject_label(level: &str, discipline: &str) -> String {
    format!("{} {}", education_level_name(level), discipline_name(discipline))
}

/// 学段的排序位置
pub fn level_rank(level: &str) -> usize {
    LEVEL_ORDER
        .iter()
        .position(|l| *l == level)
        .unwrap_or(LEVEL_ORDER.len())
}

/// 考试场次标签，如 `2023 1e tijdvak`
pub fn sitting_label(year: u32, tijdvak: u32) -> String {
    format!("{} {}e tijdvak", year, tijdvak)
}
