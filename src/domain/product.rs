// ==========================================
// 零售运营分析引擎 - 商品与变体实体
// ==========================================
// 职责: 商品目录快照结构
// 约束: 库存非负由商品维护层保证 (调整时截断为0),
//       引擎只需容忍 0 库存
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// 变体 (Variant / SKU)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// 变体ID
    pub variant_id: String,
    /// 当前库存数量 (非负)
    pub stock: u32,
    /// 销售单价
    pub price: f64,
}

impl Variant {
    /// 变体库存价值 = 库存 × 单价
    pub fn stock_value(&self) -> f64 {
        f64::from(self.stock) * self.price
    }
}

// ==========================================
// 商品 (Product)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 商品ID
    pub product_id: String,
    /// 商品名称
    pub name: String,
    /// 商品级低库存阈值 (可被全局覆盖策略替代)
    pub low_stock_threshold: u32,
    /// 创建时间
    pub created_at: NaiveDateTime,
    /// 变体列表
    pub variants: Vec<Variant>,
    /// 生命周期标记: 新品
    #[serde(default)]
    pub is_new_design: bool,
    /// 新品所属年份 (仅 is_new_design 时有意义)
    #[serde(default)]
    pub design_year: Option<i32>,
    /// 生命周期标记: 已停售
    #[serde(default)]
    pub is_discontinued: bool,
}

impl Product {
    /// 商品总库存 = 所有变体库存之和
    pub fn total_stock(&self) -> u32 {
        self.variants.iter().map(|v| v.stock).sum()
    }

    /// 商品库存价值 = 所有变体库存价值之和
    pub fn total_stock_value(&self) -> f64 {
        self.variants.iter().map(|v| v.stock_value()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_product(stocks_and_prices: &[(u32, f64)]) -> Product {
        Product {
            product_id: "P001".to_string(),
            name: "测试商品".to_string(),
            low_stock_threshold: 5,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            variants: stocks_and_prices
                .iter()
                .enumerate()
                .map(|(i, (stock, price))| Variant {
                    variant_id: format!("V{:03}", i + 1),
                    stock: *stock,
                    price: *price,
                })
                .collect(),
            is_new_design: false,
            design_year: None,
            is_discontinued: false,
        }
    }

    #[test]
    fn test_total_stock_and_value() {
        let product = create_test_product(&[(3, 100.0), (0, 50.0), (7, 20.0)]);
        assert_eq!(product.total_stock(), 10);
        // 3×100 + 0×50 + 7×20 = 440
        assert!((product.total_stock_value() - 440.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_stock_tolerated() {
        let product = create_test_product(&[(0, 100.0)]);
        assert_eq!(product.total_stock(), 0);
        assert_eq!(product.total_stock_value(), 0.0);
    }
}
