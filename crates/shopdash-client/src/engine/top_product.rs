use std::collections::HashMap;

use serde::Serialize;

use crate::engine::ProductSale;

/// Shown in place of a product name when no product sold anything.
pub const NO_TOP_PRODUCT: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub name: String,
    pub amount: i64,
}

/// Product with the highest summed amount. Groups are visited in the order
/// their first sale appears and must strictly beat the running maximum, so
/// the earliest group wins a tie and groups summing to zero never win.
pub fn top_selling_product<T: ProductSale>(sales: &[T]) -> Option<TopProduct> {
    let mut order: Vec<(&str, i64)> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for sale in sales {
        let name = sale.product_name();
        match index_by_name.get(name) {
            Some(index) => order[*index].1 += sale.amount(),
            None => {
                index_by_name.insert(name, order.len());
                order.push((name, sale.amount()));
            }
        }
    }

    let mut best: Option<(&str, i64)> = None;
    for (name, amount) in order {
        let current_max = best.map(|(_, value)| value).unwrap_or(0);
        if amount > current_max {
            best = Some((name, amount));
        }
    }

    best.map(|(name, amount)| TopProduct {
        name: name.to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::top_selling_product;
    use crate::engine::testkit::{Line, at, product_line};

    #[test]
    fn grouped_sums_pick_the_largest_product() {
        let sales = vec![
            product_line("A", "CBD", at(2024, 3, 1, 9, 0), 100),
            product_line("B", "CBD", at(2024, 3, 1, 9, 0), 300),
            product_line("A", "CBD", at(2024, 3, 1, 9, 0), 250),
        ];
        let top = top_selling_product(&sales);
        assert!(top.is_some());
        if let Some(value) = top {
            assert_eq!(value.name, "A");
            assert_eq!(value.amount, 350);
        }
    }

    #[test]
    fn first_group_wins_a_tie() {
        let sales = vec![
            product_line("Gummy", "CBD", at(2024, 3, 1, 9, 0), 200),
            product_line("Balm", "CBG", at(2024, 3, 1, 9, 0), 500),
            product_line("Gummy", "CBD", at(2024, 3, 1, 9, 0), 300),
        ];
        let top = top_selling_product(&sales);
        assert_eq!(top.map(|value| value.name), Some("Gummy".to_string()));
    }

    #[test]
    fn empty_or_zero_sales_have_no_top_product() {
        let empty: Vec<Line> = Vec::new();
        assert!(top_selling_product(&empty).is_none());

        let zero = vec![product_line("Free sample", "CBD", at(2024, 3, 1, 9, 0), 0)];
        assert!(top_selling_product(&zero).is_none());
    }
}
