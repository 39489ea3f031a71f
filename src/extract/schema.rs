//! Domain schema: relation names declared per entity type.
//!
//! Drives the schema-guided synthesis pass of the extractor, which pairs
//! recognized entities with the relations their type declares even when no
//! explicit surface pattern matched. Table order is significant: synthesis
//! walks it top to bottom.

/// Maximum entities of one type used for synthesis per sentence.
pub const MAX_SCHEMA_ENTITIES: usize = 3;

/// Maximum declared relations used per entity.
pub const MAX_SCHEMA_RELATIONS: usize = 5;

/// Entity type → declared relation names, in declaration order.
pub const DOMAIN_SCHEMA: &[(&str, &[&str])] = &[
    ("技术", &["应用于", "包含", "依赖", "改进", "适用于"]),
    ("项目", &["位于", "采用技术", "投资方", "建设单位", "规模"]),
    ("机构", &["参与", "投资", "研发", "合作", "所属"]),
    ("地理", &["拥有项目", "地质条件", "封存潜力"]),
    ("政策", &["支持", "规范", "发布机构", "适用范围"]),
    ("经济", &["成本构成", "收益来源", "补贴标准"]),
    ("设备", &["用于", "组成部分", "制造商", "性能指标"]),
    ("指标", &["衡量", "达到", "目标值"]),
];

/// Relation names declared for `entity_type`, or an empty slice.
pub fn relations_for(entity_type: &str) -> &'static [&'static str] {
    DOMAIN_SCHEMA
        .iter()
        .find(|(t, _)| *t == entity_type)
        .map(|(_, relations)| *relations)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_declares_relations() {
        for (entity_type, relations) in DOMAIN_SCHEMA {
            assert!(
                !relations.is_empty(),
                "type {entity_type} declares no relations"
            );
        }
    }

    #[test]
    fn lookup_by_type() {
        assert_eq!(relations_for("技术")[0], "应用于");
        assert!(relations_for("不存在的类型").is_empty());
    }
}
