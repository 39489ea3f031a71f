//! Data-declared surface pattern tables for the CCUS domain.
//!
//! Both tables are ordered: extraction walks them top to bottom, so output
//! order is identical across runs for a fixed input sentence. Patterns are
//! compiled once on first use and shared for the process lifetime.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Ordered surface patterns for one entity type.
pub struct EntityPatternSet {
    /// Entity type label (schema key).
    pub entity_type: &'static str,
    /// Compiled patterns, in declaration order.
    pub patterns: Vec<Regex>,
}

/// One relation surface pattern. The first two capture groups are interpreted
/// as (subject, object).
pub struct RelationPattern {
    pub regex: Regex,
    pub label: &'static str,
}

/// Compiled pattern tables.
pub struct PatternTables {
    pub entity_sets: Vec<EntityPatternSet>,
    pub relation_patterns: Vec<RelationPattern>,
}

/// Entity-type surface patterns: lexical stems plus domain suffix classes.
const ENTITY_PATTERNS: &[(&str, &[&str])] = &[
    (
        "技术",
        &[
            r"[a-zA-Z0-9\u{4e00}-\u{9fa5}]+(?:技术|工艺|方法|装置|设备)",
            r"(?:CO2|二氧化碳)(?:捕集|封存|利用|运输|转化)",
            r"(?:CCUS|CCS|CCU|DAC|BECCS)",
        ],
    ),
    (
        "项目",
        &[
            r"[a-zA-Z0-9\u{4e00}-\u{9fa5}]+(?:项目|工程|示范|基地|园区)",
            r"(?:示范|试点|商业化|产业化)(?:项目|工程|基地)",
        ],
    ),
    (
        "机构",
        &[
            r"[a-zA-Z0-9\u{4e00}-\u{9fa5}]+(?:公司|企业|集团|研究院|大学|中心|实验室)",
            r"(?:中石油|中石化|中海油|华能|大唐|国电|华电|中核|中广核)",
        ],
    ),
    (
        "地理",
        &[
            r"[a-zA-Z0-9\u{4e00}-\u{9fa5}]+(?:省|市|县|区|盆地|油田|气田|矿区)",
            r"(?:胜利|大庆|塔里木|鄂尔多斯|渤海湾|松辽|四川)(?:盆地|油田|气田)?",
        ],
    ),
    (
        "政策",
        &[
            r"[a-zA-Z0-9\u{4e00}-\u{9fa5}]+(?:政策|法规|标准|规范|办法|条例|通知|意见)",
            r"(?:碳达峰|碳中和|双碳|减排|低碳)(?:政策|目标|战略|规划)?",
        ],
    ),
    (
        "经济",
        &[
            r"\d+(?:\.\d+)?(?:亿|万|千)?(?:元|美元|欧元)",
            r"(?:投资|成本|收益|利润|价格|费用).*?\d+",
            r"\d+(?:\.\d+)?(?:元/吨|美元/吨)",
        ],
    ),
    (
        "设备",
        &[
            r"[a-zA-Z0-9\u{4e00}-\u{9fa5}]+(?:设备|装置|机组|系统|管道|储罐|压缩机|泵)",
            r"(?:捕集|分离|净化|压缩|运输|封存|监测)(?:设备|装置|系统)",
        ],
    ),
    (
        "指标",
        &[
            r"\d+(?:\.\d+)?(?:%|％|万吨|吨|立方米|兆瓦|千瓦)",
            r"(?:效率|容量|规模|产能|处理能力).*?\d+",
            r"(?:捕集|封存|利用|减排)(?:率|量|效率).*?\d+",
        ],
    ),
];

/// Subject–predicate–object surface patterns. Group 1 is the subject, group 2
/// the object; further groups are ignored.
const RELATION_PATTERNS: &[(&str, &str)] = &[
    (
        r"([^，。；！？\s]+)(?:采用|应用|使用)([^，。；！？\s]+(?:技术|工艺|方法))",
        "技术应用",
    ),
    (
        r"([^，。；！？\s]+)(?:投资|出资|资助)([^，。；！？\s]+(?:项目|工程))",
        "投资关系",
    ),
    (
        r"([^，。；！？\s]+(?:项目|工程|基地))(?:位于|建在|坐落在)([^，。；！？\s]+(?:省|市|县|区))",
        "位于",
    ),
    (
        r"([^，。；！？\s]+(?:公司|企业|机构))(?:与|和)([^，。；！？\s]+(?:公司|企业|机构))(?:合作|联合)",
        "合作关系",
    ),
    (
        r"([^，。；！？\s]+(?:技术|工艺))(?:的)?([^，。；！？\s]*(?:效率|容量|能力))(?:达到|为|是)([^，。；！？\s]*\d+[^，。；！？\s]*)",
        "技术指标",
    ),
    (
        r"([^，。；！？\s]+(?:系统|装置))(?:包括|含有|由)([^，。；！？\s]+(?:设备|装置|部件))",
        "组成关系",
    ),
];

static TABLES: OnceLock<PatternTables> = OnceLock::new();

/// The compiled pattern tables (compiled once per process).
pub fn tables() -> &'static PatternTables {
    TABLES.get_or_init(compile_tables)
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("static pattern table compiles")
}

fn compile_tables() -> PatternTables {
    PatternTables {
        entity_sets: ENTITY_PATTERNS
            .iter()
            .map(|(entity_type, patterns)| EntityPatternSet {
                entity_type,
                patterns: patterns.iter().map(|p| compile(p)).collect(),
            })
            .collect(),
        relation_patterns: RELATION_PATTERNS
            .iter()
            .map(|(pattern, label)| RelationPattern {
                regex: compile(pattern),
                label,
            })
            .collect(),
    }
}
