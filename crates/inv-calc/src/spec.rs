//! 隔間規格解析

use inv_core::{InventoryError, InventoryItem, SpecKind};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::DataQualityWarning;

/// 已解析的三項規格
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedSpecs {
    pub melt_index: Option<Decimal>,
    pub density: Option<Decimal>,
    pub izod_impact: Option<Decimal>,
}

/// 規格解析器
pub struct SpecResolver;

impl SpecResolver {
    /// 依項目隔間取得規格值
    ///
    /// 空白讀值返回 `None`；無法解析的文字返回錯誤。
    pub fn resolve(item: &InventoryItem, kind: SpecKind) -> inv_core::Result<Option<Decimal>> {
        let compartment = item.resolved_compartment();
        let Some(raw) = item.readings(kind).for_compartment(compartment) else {
            return Ok(None);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Some)
            .map_err(|_| InventoryError::InvalidSpecValue {
                inventory_id: item.inventory_id,
                kind,
                raw: raw.to_string(),
            })
    }

    /// 解析全部規格，無法解析者記為警告並視為缺值
    pub fn resolve_all(item: &InventoryItem) -> (ResolvedSpecs, Vec<DataQualityWarning>) {
        let mut warnings = Vec::new();
        let mut lenient = |kind| match Self::resolve(item, kind) {
            Ok(value) => value,
            Err(err) => {
                warnings.push(DataQualityWarning::unparsable_spec(
                    item.inventory_id,
                    err.to_string(),
                ));
                None
            }
        };

        let specs = ResolvedSpecs {
            melt_index: lenient(SpecKind::MeltIndex),
            density: lenient(SpecKind::Density),
            izod_impact: lenient(SpecKind::Izod),
        };
        (specs, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inv_core::Compartment;
    use rstest::rstest;

    fn item_with_all_compartments(compartment: Option<&str>) -> InventoryItem {
        let mut item = InventoryItem::new(1, 10)
            .with_spec(SpecKind::MeltIndex, Compartment::A, "1.1")
            .with_spec(SpecKind::MeltIndex, Compartment::B, "2.2")
            .with_spec(SpecKind::MeltIndex, Compartment::CA, "3.3")
            .with_spec(SpecKind::MeltIndex, Compartment::CB, "4.4");
        item.compartment = compartment.map(str::to_string);
        item
    }

    #[rstest]
    #[case(None, "1.1")]
    #[case(Some(""), "1.1")]
    #[case(Some("A"), "1.1")]
    #[case(Some("XYZ"), "1.1")]
    #[case(Some("B"), "2.2")]
    #[case(Some("CA"), "3.3")]
    #[case(Some("CB"), "4.4")]
    fn test_resolve_by_compartment(#[case] compartment: Option<&str>, #[case] expected: &str) {
        let item = item_with_all_compartments(compartment);
        let value = SpecResolver::resolve(&item, SpecKind::MeltIndex).unwrap();
        assert_eq!(value, Some(Decimal::from_str(expected).unwrap()));
    }

    #[test]
    fn test_compartment_b_never_reads_a() {
        // B 缺值時不退回 A
        let item = InventoryItem::new(1, 10)
            .with_compartment("B")
            .with_spec(SpecKind::Density, Compartment::A, "0.95");

        assert_eq!(SpecResolver::resolve(&item, SpecKind::Density).unwrap(), None);
    }

    #[test]
    fn test_blank_reading_is_none() {
        let item = InventoryItem::new(1, 10).with_spec(SpecKind::Izod, Compartment::A, "   ");
        assert_eq!(SpecResolver::resolve(&item, SpecKind::Izod).unwrap(), None);
    }

    #[test]
    fn test_trims_before_parsing() {
        let item = InventoryItem::new(1, 10).with_spec(SpecKind::Izod, Compartment::A, " 7.25 ");
        assert_eq!(
            SpecResolver::resolve(&item, SpecKind::Izod).unwrap(),
            Some(Decimal::from_str("7.25").unwrap())
        );
    }

    #[test]
    fn test_unparsable_reading_is_error() {
        let item = InventoryItem::new(5, 10).with_spec(SpecKind::MeltIndex, Compartment::A, "n/a");
        let err = SpecResolver::resolve(&item, SpecKind::MeltIndex).unwrap_err();

        assert!(matches!(
            err,
            InventoryError::InvalidSpecValue { inventory_id: 5, kind: SpecKind::MeltIndex, .. }
        ));
    }

    #[test]
    fn test_resolve_all_downgrades_errors_to_warnings() {
        let item = InventoryItem::new(5, 10)
            .with_spec(SpecKind::MeltIndex, Compartment::A, "bad")
            .with_spec(SpecKind::Density, Compartment::A, "0.91");

        let (specs, warnings) = SpecResolver::resolve_all(&item);

        assert_eq!(specs.melt_index, None);
        assert_eq!(specs.density, Some(Decimal::from_str("0.91").unwrap()));
        assert_eq!(specs.izod_impact, None);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, crate::AnomalyKind::UnparsableSpec);
    }
}
