// ==========================================
// 零售运营分析引擎 - 商品表现排行器
// ==========================================
// 职责: 窗口内的三类商品排行 + 库存覆盖天数估算
// 规则:
// - 销售聚合一律剔除状态为 "Refunded" 的订单,
//   与其他位置的窗口过滤开关无关
// - 畅销榜: 按销量降序取 Top-N (默认5), 附带库存覆盖天数
// - 营收榜: 按销售额降序取 Top-N
// - 滞销榜: 候选域为所有总库存 > 0 的商品 (零初始化后叠加销量),
//   按销量升序取 Top-N, 零销量商品排最前; 零库存商品不入榜
// - 库存覆盖天数: 以 now 为终点的近30天滚动窗口计算日均销量,
//   窗口内零销量 ⇒ 覆盖天数未定义 (None, 语义为"无限", 与 0 相反)
// ==========================================

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::snapshot::AnalyticsSnapshot;
use crate::engine::filter::RecordFilter;
use crate::engine::time_window::{TimeWindowResolver, Window};

/// 排行榜默认条目数
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// 库存覆盖天数的滚动窗口天数
const STOCK_COVER_TRAILING_DAYS: i64 = 30;

// ==========================================
// 商品表现 (Product Performance)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPerformance {
    /// 商品ID
    pub product_id: String,
    /// 商品名称
    pub name: String,
    /// 窗口内销量 (件)
    pub units_sold: u32,
    /// 窗口内销售额
    pub revenue: f64,
    /// 当前总库存
    pub stock_remaining: u32,
    /// 库存覆盖天数 (近30天无销量时为 None, 语义为"无限")
    pub stock_cover_days: Option<u32>,
}

// ==========================================
// PerformanceRanker - 商品表现排行器
// ==========================================
pub struct PerformanceRanker {
    filter: RecordFilter,
    window_resolver: TimeWindowResolver,
}

impl PerformanceRanker {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            filter: RecordFilter::new(),
            window_resolver: TimeWindowResolver::new(),
        }
    }

    /// 畅销榜: 按销量降序取 Top-N, 附带库存覆盖天数
    ///
    /// # 参数
    /// - `snapshot`: 数据快照
    /// - `window`: 分析窗口
    /// - `now`: 基准时刻 (库存覆盖天数的滚动窗口终点)
    /// - `limit`: 榜单长度
    pub fn best_sellers(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        window: &Window,
        now: NaiveDateTime,
        limit: usize,
    ) -> Vec<ProductPerformance> {
        let sales = self.sales_by_product(snapshot.orders, window);
        let mut ranked = self.to_performances(snapshot, &sales);

        ranked.sort_by(|a, b| {
            b.units_sold
                .cmp(&a.units_sold)
                .then_with(|| {
                    b.revenue
                        .partial_cmp(&a.revenue)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        ranked.truncate(limit);

        // 覆盖天数只附带在畅销榜上
        for perf in &mut ranked {
            perf.stock_cover_days =
                self.stock_cover_days(snapshot, &perf.product_id, perf.stock_remaining, now);
        }

        ranked
    }

    /// 营收榜: 按销售额降序取 Top-N
    pub fn top_revenue(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        window: &Window,
        limit: usize,
    ) -> Vec<ProductPerformance> {
        let sales = self.sales_by_product(snapshot.orders, window);
        let mut ranked = self.to_performances(snapshot, &sales);

        ranked.sort_by(|a, b| {
            b.revenue
                .partial_cmp(&a.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.units_sold.cmp(&a.units_sold))
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        ranked.truncate(limit);
        ranked
    }

    /// 滞销榜: 候选域为所有总库存 > 0 的商品, 按销量升序取 Top-N
    ///
    /// 窗口内零销量的在库商品排最前; 零库存商品不入候选域
    pub fn slow_movers(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        window: &Window,
        limit: usize,
    ) -> Vec<ProductPerformance> {
        let sales = self.sales_by_product(snapshot.orders, window);

        let mut ranked: Vec<ProductPerformance> = snapshot
            .products
            .iter()
            .filter(|p| p.total_stock() > 0)
            .map(|p| {
                let (units, revenue) = sales.get(&p.product_id).copied().unwrap_or((0, 0.0));
                ProductPerformance {
                    product_id: p.product_id.clone(),
                    name: p.name.clone(),
                    units_sold: units,
                    revenue,
                    stock_remaining: p.total_stock(),
                    stock_cover_days: None,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            a.units_sold
                .cmp(&b.units_sold)
                .then_with(|| b.stock_remaining.cmp(&a.stock_remaining))
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        ranked.truncate(limit);
        ranked
    }

    /// 库存覆盖天数估算
    ///
    /// 以 now 为终点的近30天滚动窗口 (与请求的分析区间无关)
    /// 计算日均销量; 零销量 ⇒ None ("无限", 与 0 天语义相反);
    /// 否则 round(当前总库存 / 日均销量)
    pub fn stock_cover_days(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        product_id: &str,
        total_stock: u32,
        now: NaiveDateTime,
    ) -> Option<u32> {
        let trailing = self
            .window_resolver
            .trailing_window(STOCK_COVER_TRAILING_DAYS, now);
        let sales = self.sales_by_product(snapshot.orders, &trailing);
        let (units, _) = sales.get(product_id).copied().unwrap_or((0, 0.0));

        if units == 0 {
            return None;
        }

        let daily_average = f64::from(units) / STOCK_COVER_TRAILING_DAYS as f64;
        Some((f64::from(total_stock) / daily_average).round() as u32)
    }

    /// 窗口内按商品聚合销量与销售额 (一律剔除已退款订单)
    fn sales_by_product(&self, orders: &[Order], window: &Window) -> HashMap<String, (u32, f64)> {
        let mut sales: HashMap<String, (u32, f64)> = HashMap::new();

        for order in self.filter.orders_in_window(orders, window, true) {
            for item in &order.items {
                let entry = sales.entry(item.product_id.clone()).or_insert((0, 0.0));
                entry.0 += item.quantity;
                entry.1 += item.line_revenue();
            }
        }

        sales
    }

    /// 把销量映射映射为榜单条目 (商品名称/库存从目录补全)
    fn to_performances(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        sales: &HashMap<String, (u32, f64)>,
    ) -> Vec<ProductPerformance> {
        let catalog: HashMap<&str, &Product> = snapshot
            .products
            .iter()
            .map(|p| (p.product_id.as_str(), p))
            .collect();

        sales
            .iter()
            .map(|(product_id, (units, revenue))| {
                let product = catalog.get(product_id.as_str());
                ProductPerformance {
                    product_id: product_id.clone(),
                    // 目录中已不存在的商品保留ID作为名称
                    name: product.map_or_else(|| product_id.clone(), |p| p.name.clone()),
                    units_sold: *units,
                    revenue: *revenue,
                    stock_remaining: product.map_or(0, |p| p.total_stock()),
                    stock_cover_days: None,
                }
            })
            .collect()
    }
}

impl Default for PerformanceRanker {
    fn default() -> Self {
        Self::new()
    }
}
