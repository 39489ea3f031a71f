//! Heuristic entity-validity predicate.
//!
//! The extractor upstream is high-recall and low-precision, so this predicate
//! is the only noise gate between raw surface strings and anything
//! user-visible (resolved entities, subgraph nodes). Its thresholds are
//! load-bearing for result quality; every rule is a required check.

/// Single characters accepted as entities: directional and scale terms.
const VALID_SINGLE_CHARS: &str = "中美欧亚东西南北新老大小高低上下内外前后";

/// Function-word characters that cannot start a short entity.
const FUNCTION_WORD_CHARS: &str = "的了在与和及或";

/// Sentence punctuation characters.
const PUNCT_CHARS: &str = "。，、；：！？";

/// Connective and filler characters that cannot start a long entity.
const CONNECTIVE_CHARS: &str = "而且但是或者因为所以如果然后当时这些那些一些每个各种不同相同类似";

/// Curated short (2–3 character) domain terms: place names, institution
/// abbreviations, technical acronyms, and core domain vocabulary.
const MEANINGFUL_SHORT: &[&str] = &[
    // Place names
    "北京", "上海", "广州", "深圳", "吉林", "内蒙", "山西", "陕西", "河北", "河南", "山东",
    "江苏", "浙江", "福建", "广东", "海南", "四川", "云南", "贵州", "湖北", "湖南", "江西",
    "安徽", "辽宁", "黑龙江", "天津", "重庆", "宁夏", "新疆", "西藏", "青海", "甘肃",
    // Institutions
    "中科院", "清华", "北大", "中石油", "中石化", "中海油", "国电", "华能", "大唐",
    // Technical acronyms
    "CO2", "CCS", "CCUS", "EOR", "MEA", "MDEA", "PSA", "TSA",
    // Core domain vocabulary
    "技术", "项目", "公司", "企业", "政府", "政策", "标准", "设备", "环境", "能源",
    "工业", "研究", "开发", "建设", "管理", "服务", "系统", "方法", "过程", "材料",
    "产品", "市场", "投资", "合作", "发展", "应用", "科技", "创新", "数据", "信息",
    "碳捕集", "封存", "利用", "减排", "节能", "清洁", "绿色", "低碳", "零碳",
    "发电", "化工", "钢铁", "水泥", "石化", "煤化工", "电厂", "工厂", "装置",
    "管道", "储罐", "压缩", "输送", "注入", "监测", "安全", "成本", "效益",
];

/// Word characters in the Python `\w` sense: letters, digits, underscore.
/// CJK ideographs count as letters, so everything else is punctuation-class.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether an entity candidate is meaningful enough to surface.
pub fn is_valid_entity(entity: &str) -> bool {
    let entity = entity.trim();
    if entity.is_empty() {
        return false;
    }

    let chars: Vec<char> = entity.chars().collect();
    let len = chars.len();

    if len == 1 {
        return VALID_SINGLE_CHARS.contains(chars[0]);
    }

    // Pure punctuation or symbols.
    if chars.iter().all(|&c| !is_word_char(c)) {
        return false;
    }

    if len == 2 {
        let first = chars[0];
        if FUNCTION_WORD_CHARS.contains(first)
            || PUNCT_CHARS.contains(first)
            || first.is_whitespace()
        {
            return false;
        }
        if chars.iter().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }

    if len <= 3 {
        return MEANINGFUL_SHORT.contains(&entity);
    }

    // Longer candidates: stricter structural checks.
    let last = chars[len - 1];
    if PUNCT_CHARS.contains(last) || last.is_whitespace() {
        return false;
    }

    let punct_count = chars.iter().filter(|&&c| !is_word_char(c)).count();
    if punct_count as f64 > len as f64 * 0.3 {
        return false;
    }

    if CONNECTIVE_CHARS.contains(chars[0]) {
        return false;
    }

    // Trailing digit run on a short non-numeric stem is a truncation artifact.
    if len < 8 && chars[len - 1].is_ascii_digit() {
        let stem_end = chars.iter().rposition(|c| !c.is_ascii_digit());
        if stem_end.is_some() {
            return false;
        }
    }

    if entity.contains('\n') {
        return false;
    }

    // Function-word prefix followed by punctuation is a clipping artifact.
    if FUNCTION_WORD_CHARS.contains(chars[0]) && !is_word_char(chars[1]) {
        return false;
    }

    true
}

/// Filter a candidate list in place, keeping only valid entities.
pub fn retain_valid(entities: &mut Vec<String>) {
    entities.retain(|e| is_valid_entity(e));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(!is_valid_entity(""));
        assert!(!is_valid_entity("   "));
        assert!(!is_valid_entity("\t\n"));
    }

    #[test]
    fn single_chars_use_allow_list() {
        assert!(is_valid_entity("中"));
        assert!(is_valid_entity("北"));
        assert!(!is_valid_entity("的"));
        assert!(!is_valid_entity("是"));
    }

    #[test]
    fn short_terms_use_curated_list() {
        assert!(is_valid_entity("CCUS"));
        assert!(is_valid_entity("CO2"));
        assert!(is_valid_entity("碳捕集"));
        assert!(is_valid_entity("北京"));
        assert!(!is_valid_entity("这个"));
        assert!(!is_valid_entity("的话"));
    }

    #[test]
    fn rejects_punctuation_noise() {
        assert!(!is_valid_entity("，。"));
        assert!(!is_valid_entity("！！！"));
        assert!(!is_valid_entity("碳捕集技术。"));
        assert!(!is_valid_entity("碳，捕，集，技术"));
    }

    #[test]
    fn rejects_function_word_prefix_pairs() {
        assert!(!is_valid_entity("的话"));
        assert!(!is_valid_entity("了吗"));
        assert!(!is_valid_entity("12"));
    }

    #[test]
    fn rejects_connective_prefix() {
        assert!(!is_valid_entity("但是这个技术"));
        assert!(!is_valid_entity("因为封存成本"));
    }

    #[test]
    fn rejects_short_trailing_digit_runs() {
        assert!(!is_valid_entity("项目12"));
        // A longer string may legitimately end in digits.
        assert!(is_valid_entity("碳捕集示范工程2023"));
    }

    #[test]
    fn rejects_embedded_line_breaks() {
        assert!(!is_valid_entity("碳捕集\n封存技术"));
    }

    #[test]
    fn accepts_ordinary_domain_entities() {
        assert!(is_valid_entity("CO2封存技术"));
        assert!(is_valid_entity("大庆油田"));
        assert!(is_valid_entity("碳捕集示范项目"));
    }

    #[test]
    fn retain_valid_filters_in_place() {
        let mut entities = vec![
            "CO2封存技术".to_string(),
            "的".to_string(),
            "大庆油田".to_string(),
            "，。".to_string(),
        ];
        retain_valid(&mut entities);
        assert_eq!(entities, vec!["CO2封存技术", "大庆油田"]);
    }
}
