//! Default quantity rules for the standard menu.

use crate::error::DomainResult;
use crate::ids::{CategoryId, ProductId};
use crate::quantity_rule::OrderQuantityRuleEntity;

/// Builds the house rules: one sandwich, one fries and one soft drink per
/// order.
///
/// Names are resolved through the given callbacks; a rule whose target
/// cannot be resolved is skipped.
pub fn default_rules<C, P>(
    category_by_name: C,
    product_by_name: P,
) -> DomainResult<Vec<OrderQuantityRuleEntity>>
where
    C: Fn(&str) -> Option<CategoryId>,
    P: Fn(&str) -> Option<ProductId>,
{
    let mut rules = Vec::new();

    if let Some(category_id) = category_by_name("Sandwiches") {
        rules.push(OrderQuantityRuleEntity::new(None, Some(category_id), 1, "sandwich")?);
    }

    for (product, rule_name) in [("Fries", "fries"), ("Soft Drink", "soft drink")] {
        if let Some(product_id) = product_by_name(product) {
            rules.push(OrderQuantityRuleEntity::new(Some(product_id), None, 1, rule_name)?);
        }
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_targets_resolved() {
        let sandwiches = CategoryId::new();
        let fries = ProductId::new();
        let drink = ProductId::new();

        let rules = default_rules(
            |name| (name == "Sandwiches").then_some(sandwiches),
            |name| match name {
                "Fries" => Some(fries),
                "Soft Drink" => Some(drink),
                _ => None,
            },
        )
        .unwrap();

        let names: Vec<_> = rules.iter().map(|r| r.rule_name()).collect();
        assert_eq!(names, ["sandwich", "fries", "soft drink"]);
        assert_eq!(rules[0].category_id(), Some(sandwiches));
        assert_eq!(rules[1].product_id(), Some(fries));
        assert_eq!(rules[2].product_id(), Some(drink));
        assert!(rules.iter().all(|r| r.max_quantity() == 1));
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        let fries = ProductId::new();
        let rules = default_rules(
            |_| None,
            |name| (name == "Fries").then_some(fries),
        )
        .unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].rule_name(), "fries");
    }
}
