// ==========================================
// 零售运营分析引擎 - 库存状态聚合器
// ==========================================
// 职责: 计算当下时点的库存总量/价值/低库存/缺货统计
// 阈值解析策略: 全局覆盖开关开启时所有商品统一用全局阈值,
//               否则使用商品各自存储的阈值
// 分类规则: stock == 0 ⇒ 缺货; 0 < stock <= 阈值 ⇒ 低库存
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

// ==========================================
// 阈值解析策略 (Threshold Policy)
// ==========================================
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    /// 全局覆盖开关
    pub global_enabled: bool,
    /// 全局阈值 (仅开关开启时生效)
    pub global_value: u32,
}

impl ThresholdPolicy {
    /// 商品的生效低库存阈值
    pub fn effective_threshold(&self, product: &Product) -> u32 {
        if self.global_enabled {
            self.global_value
        } else {
            product.low_stock_threshold
        }
    }
}

// ==========================================
// 库存告警条目 (Stock Alert Item)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAlertItem {
    /// 商品ID
    pub product_id: String,
    /// 商品名称
    pub product_name: String,
    /// 变体ID
    pub variant_id: String,
    /// 当前库存
    pub stock: u32,
    /// 生效阈值
    pub threshold: u32,
}

// ==========================================
// 库存汇总 (Inventory Summary)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySummary {
    /// 商品总数
    pub total_products: u32,
    /// 变体总数
    pub total_variants: u32,
    /// 在库总件数
    pub total_units: u32,
    /// 库存总价值 (库存 × 销售单价)
    pub total_value: f64,
    /// 低库存变体数
    pub low_stock_count: u32,
    /// 缺货变体数
    pub out_of_stock_count: u32,
    /// 低库存明细 (按库存升序)
    pub low_stock_items: Vec<StockAlertItem>,
    /// 缺货明细
    pub out_of_stock_items: Vec<StockAlertItem>,
}

// ==========================================
// InventoryAggregator - 库存状态聚合器
// ==========================================
pub struct InventoryAggregator {
    // 无状态引擎, 不需要注入依赖
}

impl InventoryAggregator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 聚合全目录的当下库存状态
    pub fn aggregate(&self, products: &[Product], policy: &ThresholdPolicy) -> InventorySummary {
        let mut total_variants = 0u32;
        let mut total_units = 0u32;
        let mut total_value = 0.0f64;
        let mut low_stock_items: Vec<StockAlertItem> = Vec::new();
        let mut out_of_stock_items: Vec<StockAlertItem> = Vec::new();

        for product in products {
            let threshold = policy.effective_threshold(product);

            for variant in &product.variants {
                total_variants += 1;
                total_units += variant.stock;
                total_value += variant.stock_value();

                let item = StockAlertItem {
                    product_id: product.product_id.clone(),
                    product_name: product.name.clone(),
                    variant_id: variant.variant_id.clone(),
                    stock: variant.stock,
                    threshold,
                };

                // 缺货优先于低库存判定
                if variant.stock == 0 {
                    out_of_stock_items.push(item);
                } else if variant.stock <= threshold {
                    low_stock_items.push(item);
                }
            }
        }

        // 低库存按剩余库存升序, 同库存按商品/变体ID保证确定性
        low_stock_items.sort_by(|a, b| {
            a.stock
                .cmp(&b.stock)
                .then_with(|| a.product_id.cmp(&b.product_id))
                .then_with(|| a.variant_id.cmp(&b.variant_id))
        });

        InventorySummary {
            total_products: products.len() as u32,
            total_variants,
            total_units,
            total_value,
            low_stock_count: low_stock_items.len() as u32,
            out_of_stock_count: out_of_stock_items.len() as u32,
            low_stock_items,
            out_of_stock_items,
        }
    }
}

impl Default for InventoryAggregator {
    fn default() -> Self {
        Self::new()
    }
}
