// ==========================================
// 零售运营分析引擎 - 分类占比与排行引擎
// ==========================================
// 职责: 按分类键 (收货地区/订单来源/承运商) 对订单分组计数,
//       计算占比, 地区分类额外做 Top-5 截断 + "Others" 归并
// 规则:
// - 缺失的分类键归入 "Unknown" 桶, 绝不丢弃
// - 占比 = round(value / max(total, 1) * 100), 空集合分母回退为 1
// - "Others" 归并仅用于地区分类, 来源分类保持完整列表
//   (来源/平台取值预期很少, 这一不对称是既有产品行为)
// - 承运商分类额外计算准时率 = round(delivered / shipped * 100)
// ==========================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::types::STATUS_DELIVERED;

/// 缺失分类键的归并桶
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// 地区分类 Top-5 之外的归并桶
pub const OTHERS_BUCKET: &str = "Others";

/// 地区分类保留的头部条目数
const LOCATION_TOP_N: usize = 5;

// ==========================================
// 分类占比条目 (Breakdown Entry)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// 分类键
    pub label: String,
    /// 订单数
    pub value: u32,
    /// 占比百分数 (四舍五入取整)
    pub percentage: u32,
}

// ==========================================
// 承运商分类条目 (Carrier Breakdown Entry)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierBreakdownEntry {
    /// 承运商名称
    pub label: String,
    /// 分配到该承运商的订单数
    pub value: u32,
    /// 占比百分数
    pub percentage: u32,
    /// 已送达订单数 (配送状态 == "Delivered")
    pub delivered: u32,
    /// 准时率百分数 = round(delivered / shipped * 100)
    pub on_time_rate: u32,
}

// ==========================================
// BreakdownEngine - 分类占比引擎
// ==========================================
pub struct BreakdownEngine {
    // 无状态引擎, 不需要注入依赖
}

impl BreakdownEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 收货地区分类: 按订单数降序, 保留 Top-5,
    /// 剩余键归并为单一 "Others" 条目 (仅残差为正时生成)
    pub fn location_breakdown(&self, orders: &[&Order]) -> Vec<BreakdownEntry> {
        let counts = self.count_by_key(orders, |o| o.delivery_region.clone());
        let total = orders.len() as u32;

        let mut entries: Vec<BreakdownEntry> = counts
            .iter()
            .take(LOCATION_TOP_N)
            .map(|(label, value)| BreakdownEntry {
                label: label.clone(),
                value: *value,
                percentage: percentage(*value, total),
            })
            .collect();

        let top_sum: u32 = entries.iter().map(|e| e.value).sum();
        let residual = total.saturating_sub(top_sum);
        if residual > 0 {
            entries.push(BreakdownEntry {
                label: OTHERS_BUCKET.to_string(),
                value: residual,
                percentage: percentage(residual, total),
            });
        }

        entries
    }

    /// 订单来源/平台分类: 完整列表, 不做 "Others" 归并
    pub fn source_breakdown(&self, orders: &[&Order]) -> Vec<BreakdownEntry> {
        let counts = self.count_by_key(orders, |o| o.source.clone());
        let total = orders.len() as u32;

        counts
            .into_iter()
            .map(|(label, value)| BreakdownEntry {
                percentage: percentage(value, total),
                label,
                value,
            })
            .collect()
    }

    /// 承运商分类: 订单数 + 占比 + 准时率
    ///
    /// 分母 shipped = 分配到该承运商的订单数;
    /// 分子 delivered = 其中配送状态为 "Delivered" 的订单数
    pub fn carrier_breakdown(&self, orders: &[&Order]) -> Vec<CarrierBreakdownEntry> {
        let mut shipped: HashMap<String, u32> = HashMap::new();
        let mut delivered: HashMap<String, u32> = HashMap::new();

        for order in orders {
            let carrier = order
                .fulfillment
                .as_ref()
                .and_then(|f| f.carrier.clone())
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());

            *shipped.entry(carrier.clone()).or_insert(0) += 1;

            let is_delivered = order
                .fulfillment
                .as_ref()
                .and_then(|f| f.delivery_status.as_deref())
                == Some(STATUS_DELIVERED);
            if is_delivered {
                *delivered.entry(carrier).or_insert(0) += 1;
            }
        }

        let total = orders.len() as u32;
        let mut entries: Vec<CarrierBreakdownEntry> = shipped
            .into_iter()
            .map(|(label, count)| {
                let delivered_count = delivered.get(&label).copied().unwrap_or(0);
                CarrierBreakdownEntry {
                    percentage: percentage(count, total),
                    on_time_rate: percentage(delivered_count, count),
                    delivered: delivered_count,
                    label,
                    value: count,
                }
            })
            .collect();

        // 订单数降序, 同数按名称升序保证确定性
        entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
        entries
    }

    /// 按分类键计数, 降序排序 (同数按键名升序保证确定性)
    fn count_by_key<F>(&self, orders: &[&Order], key_of: F) -> Vec<(String, u32)>
    where
        F: Fn(&Order) -> Option<String>,
    {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for order in orders {
            let key = key_of(order)
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
            *counts.entry(key).or_insert(0) += 1;
        }

        let mut sorted: Vec<(String, u32)> = counts.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted
    }
}

impl Default for BreakdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 占比计算
// ==========================================

/// 占比百分数, 分母为 0 时回退为 1 (空集合安全)
fn percentage(value: u32, total: u32) -> u32 {
    let denominator = total.max(1);
    ((f64::from(value) / f64::from(denominator)) * 100.0).round() as u32
}
