// ==========================================
// 零售运营分析引擎 - 生命周期分析器
// ==========================================
// 职责: 两份专项报告
// 1. 新品表现 (New Design): 指定年份的新品的全生命周期销量
//    与补货统计 (均不受分析区间限制)
// 2. 停售候选 (Discontinue Candidate): 回看期内零销量且
//    总库存达标的商品, 标记为潜在下架对象
// ==========================================

use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::snapshot::AnalyticsSnapshot;
use crate::domain::types::DiscontinueLookback;
use crate::engine::filter::RecordFilter;
use crate::engine::time_window::TimeWindowResolver;

/// 新品补货榜长度
const NEW_DESIGN_TOP_N: usize = 5;

/// 停售候选榜默认长度
pub const DEFAULT_DISCONTINUE_LIMIT: usize = 50;

// ==========================================
// 新品表现 (New Design Performance)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDesignPerformance {
    /// 商品ID
    pub product_id: String,
    /// 商品名称
    pub name: String,
    /// 全生命周期销量 (剔除已退款订单, 不受区间限制)
    pub units_sold: u32,
    /// 补货次数 (全部补货日志)
    pub restock_count: u32,
    /// 补货总件数
    pub units_restocked: u32,
}

// ==========================================
// 新品报告 (New Design Report)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDesignReport {
    /// 目标年份
    pub design_year: i32,
    /// 该年份新品总数
    pub total_new_designs: u32,
    /// 有过至少一次补货的新品数
    pub new_designs_restocked: u32,
    /// 新品补货总件数
    pub total_units_restocked: u32,
    /// 补货次数 Top-5 (同次数按补货件数多者优先)
    pub top_restocked: Vec<NewDesignPerformance>,
}

// ==========================================
// NewDesignAnalyzer - 新品表现分析器
// ==========================================
pub struct NewDesignAnalyzer {
    // 无状态引擎, 不需要注入依赖
}

impl NewDesignAnalyzer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 生成指定年份的新品报告
    pub fn analyze(&self, snapshot: &AnalyticsSnapshot<'_>, design_year: i32) -> NewDesignReport {
        // 全生命周期销量 (剔除已退款订单)
        let mut lifetime_units: HashMap<&str, u32> = HashMap::new();
        for order in snapshot.orders.iter().filter(|o| !o.is_refunded()) {
            for item in &order.items {
                *lifetime_units.entry(item.product_id.as_str()).or_insert(0) += item.quantity;
            }
        }

        // 全部补货日志的次数/件数
        let mut restocks: HashMap<&str, (u32, u32)> = HashMap::new();
        for log in snapshot.restock_logs {
            let entry = restocks.entry(log.product_id.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += log.quantity;
        }

        let mut performances: Vec<NewDesignPerformance> = snapshot
            .products
            .iter()
            .filter(|p| p.is_new_design && p.design_year == Some(design_year))
            .map(|p| {
                let (restock_count, units_restocked) = restocks
                    .get(p.product_id.as_str())
                    .copied()
                    .unwrap_or((0, 0));
                NewDesignPerformance {
                    product_id: p.product_id.clone(),
                    name: p.name.clone(),
                    units_sold: lifetime_units
                        .get(p.product_id.as_str())
                        .copied()
                        .unwrap_or(0),
                    restock_count,
                    units_restocked,
                }
            })
            .collect();

        let total_new_designs = performances.len() as u32;
        let new_designs_restocked =
            performances.iter().filter(|p| p.restock_count > 0).count() as u32;
        let total_units_restocked = performances.iter().map(|p| p.units_restocked).sum();

        // 补货次数降序, 同次数按补货件数多者优先
        performances.sort_by(|a, b| {
            b.restock_count
                .cmp(&a.restock_count)
                .then_with(|| b.units_restocked.cmp(&a.units_restocked))
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        performances.truncate(NEW_DESIGN_TOP_N);

        NewDesignReport {
            design_year,
            total_new_designs,
            new_designs_restocked,
            total_units_restocked,
            top_restocked: performances,
        }
    }
}

impl Default for NewDesignAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 停售候选 (Discontinue Candidate)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscontinueCandidate {
    /// 商品ID
    pub product_id: String,
    /// 商品名称
    pub name: String,
    /// 当前总库存
    pub stock: u32,
    /// 最后一次售出时间 (全时段, 不受回看期限制; 从未售出为 None)
    pub last_sold_at: Option<NaiveDateTime>,
    /// 当前自然年内的补货次数
    pub restocks_this_year: u32,
    /// 商品年龄 (自创建日起的天数)
    pub age_days: i64,
}

// ==========================================
// 停售候选报告 (Discontinue Report)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscontinueReport {
    /// 截断前的候选总数
    pub total_candidates: u32,
    /// 候选列表 (库存降序, 同库存按年龄降序, 截断到 limit)
    pub candidates: Vec<DiscontinueCandidate>,
}

// ==========================================
// DiscontinueAnalyzer - 停售候选分析器
// ==========================================
pub struct DiscontinueAnalyzer {
    filter: RecordFilter,
    window_resolver: TimeWindowResolver,
}

impl DiscontinueAnalyzer {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            filter: RecordFilter::new(),
            window_resolver: TimeWindowResolver::new(),
        }
    }

    /// 检测停售候选
    ///
    /// 入选条件: 总库存 >= min_stock 且回看期内零销量;
    /// 已标记停售的商品不再重复入选
    ///
    /// # 参数
    /// - `snapshot`: 数据快照
    /// - `lookback`: 回看期
    /// - `min_stock`: 最低库存阈值
    /// - `limit`: 榜单截断长度 (候选总数不受截断影响)
    /// - `now`: 基准时刻
    pub fn detect(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        lookback: DiscontinueLookback,
        min_stock: u32,
        limit: usize,
        now: NaiveDateTime,
    ) -> DiscontinueReport {
        let lookback_window = self.window_resolver.resolve_lookback(lookback, now);

        // 回看期内按商品聚合销量 (剔除已退款订单)
        let mut lookback_units: HashMap<&str, u32> = HashMap::new();
        for order in self
            .filter
            .orders_in_window(snapshot.orders, &lookback_window, true)
        {
            for item in &order.items {
                *lookback_units.entry(item.product_id.as_str()).or_insert(0) += item.quantity;
            }
        }

        // 全时段最后售出时间 (剔除已退款订单)
        let mut last_sold: HashMap<&str, NaiveDateTime> = HashMap::new();
        for order in snapshot.orders.iter().filter(|o| !o.is_refunded()) {
            let at = order.effective_date();
            for item in &order.items {
                last_sold
                    .entry(item.product_id.as_str())
                    .and_modify(|prev| {
                        if at > *prev {
                            *prev = at;
                        }
                    })
                    .or_insert(at);
            }
        }

        // 当前自然年内的补货次数
        let current_year = now.year();
        let mut restocks_this_year: HashMap<&str, u32> = HashMap::new();
        for log in snapshot
            .restock_logs
            .iter()
            .filter(|l| l.restocked_at.year() == current_year)
        {
            *restocks_this_year
                .entry(log.product_id.as_str())
                .or_insert(0) += 1;
        }

        let mut candidates: Vec<DiscontinueCandidate> = snapshot
            .products
            .iter()
            .filter(|p| !p.is_discontinued)
            .filter(|p| p.total_stock() >= min_stock)
            .filter(|p| {
                lookback_units
                    .get(p.product_id.as_str())
                    .copied()
                    .unwrap_or(0)
                    == 0
            })
            .map(|p| DiscontinueCandidate {
                product_id: p.product_id.clone(),
                name: p.name.clone(),
                stock: p.total_stock(),
                last_sold_at: last_sold.get(p.product_id.as_str()).copied(),
                restocks_this_year: restocks_this_year
                    .get(p.product_id.as_str())
                    .copied()
                    .unwrap_or(0),
                age_days: (now.date() - p.created_at.date()).num_days(),
            })
            .collect();

        let total_candidates = candidates.len() as u32;

        // 库存降序, 同库存按年龄降序
        candidates.sort_by(|a, b| {
            b.stock
                .cmp(&a.stock)
                .then_with(|| b.age_days.cmp(&a.age_days))
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        candidates.truncate(limit);

        DiscontinueReport {
            total_candidates,
            candidates,
        }
    }
}

impl Default for DiscontinueAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
