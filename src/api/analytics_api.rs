// ==========================================
// 零售运营分析引擎 - 分析 API
// ==========================================
// 职责:
// 1. 校验请求参数 (未知区间/回看期标识、越界 limit 在此拒绝)
// 2. 编排引擎层: 窗口解析 → 过滤 → 聚合 → 组装响应包
// 架构: API 层 → 引擎层 (纯计算, 无状态)
// 约束: 每次调用是快照上的一次性同步计算, 不保留任何引用
// ==========================================

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::api::dto::{
    DiscontinueRequest, InventoryDashboardRequest, InventoryDashboardResponse,
    NewDesignReportRequest, SalesDashboardRequest, SalesDashboardResponse, SalesKpiSet,
};
use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::Order;
use crate::domain::snapshot::AnalyticsSnapshot;
use crate::domain::types::{DiscontinueLookback, TimeRange};
use crate::engine::breakdown::BreakdownEngine;
use crate::engine::filter::RecordFilter;
use crate::engine::inventory::{InventoryAggregator, ThresholdPolicy};
use crate::engine::kpi::KpiCalculator;
use crate::engine::lifecycle::{
    DiscontinueAnalyzer, DiscontinueReport, NewDesignAnalyzer, NewDesignReport,
    DEFAULT_DISCONTINUE_LIMIT,
};
use crate::engine::performance::{PerformanceRanker, DEFAULT_TOP_LIMIT};
use crate::engine::refund::RefundResolver;
use crate::engine::series::SeriesBucketizer;
use crate::engine::time_window::TimeWindowResolver;

// ==========================================
// AnalyticsApi - 分析 API
// ==========================================

/// 分析API
///
/// 职责:
/// 1. 销售/订单/客户分析面 (KPI + 序列 + 分类占比)
/// 2. 库存/补货分析面 (库存汇总 + 补货 KPI + 商品排行)
/// 3. 生命周期专项报告 (新品表现 / 停售候选)
///
/// 架构说明:
/// - 所有方法都是显式快照上的纯函数, 重复/并发调用安全
/// - "now" 由调用方提供以保证可复现, 缺省取墙钟
pub struct AnalyticsApi {
    window_resolver: TimeWindowResolver,
    filter: RecordFilter,
    refund_resolver: RefundResolver,
    kpi: KpiCalculator,
    bucketizer: SeriesBucketizer,
    breakdown: BreakdownEngine,
    inventory: InventoryAggregator,
    ranker: PerformanceRanker,
    new_design: NewDesignAnalyzer,
    discontinue: DiscontinueAnalyzer,
}

impl AnalyticsApi {
    /// 创建新的AnalyticsApi实例
    pub fn new() -> Self {
        Self {
            window_resolver: TimeWindowResolver::new(),
            filter: RecordFilter::new(),
            refund_resolver: RefundResolver::new(),
            kpi: KpiCalculator::new(),
            bucketizer: SeriesBucketizer::new(),
            breakdown: BreakdownEngine::new(),
            inventory: InventoryAggregator::new(),
            ranker: PerformanceRanker::new(),
            new_design: NewDesignAnalyzer::new(),
            discontinue: DiscontinueAnalyzer::new(),
        }
    }

    // ==========================================
    // 销售/订单/客户分析面
    // ==========================================

    /// 计算销售驾驶舱指标包
    ///
    /// # 参数
    /// - `snapshot`: 订单/商品/补货快照
    /// - `request`: 时间区间 + 可选基准时刻
    ///
    /// # 返回
    /// - Ok(SalesDashboardResponse): KPI集 + 图表序列 + 分类占比
    /// - Err(ApiError): 参数契约违约
    pub fn get_sales_dashboard(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        request: SalesDashboardRequest,
    ) -> ApiResult<SalesDashboardResponse> {
        let range = parse_time_range(&request.time_range)?;
        let now = resolve_now(request.now);
        let windows = self.window_resolver.resolve(range, now);

        // 销售/订单/客户 KPI 基于剔除退款的集合
        let current = self
            .filter
            .orders_in_window(snapshot.orders, &windows.current, true);
        let previous = self
            .filter
            .orders_in_window(snapshot.orders, &windows.comparison, true);

        // 退款 KPI 必须看到已退款订单
        let current_all = self
            .filter
            .orders_in_window(snapshot.orders, &windows.current, false);
        let previous_all = self
            .filter
            .orders_in_window(snapshot.orders, &windows.comparison, false);

        let refunds_now = self.refund_resolver.refund_stats(&current_all);
        let refunds_prev = self.refund_resolver.refund_stats(&previous_all);

        let kpis = SalesKpiSet {
            sales: self.kpi.metric(sum_totals(&current), sum_totals(&previous)),
            orders: self
                .kpi
                .metric(current.len() as f64, previous.len() as f64),
            customers: self.kpi.metric(
                distinct_customers(&current) as f64,
                distinct_customers(&previous) as f64,
            ),
            refund_count: self
                .kpi
                .metric(f64::from(refunds_now.count), f64::from(refunds_prev.count)),
            refund_amount: self.kpi.metric(refunds_now.total, refunds_prev.total),
        };

        let granularity = range.granularity();
        let sales_series = self.bucketizer.bucketize(
            &current,
            &windows.current,
            granularity,
            |o| o.effective_date(),
            |o| o.total,
        );
        let orders_series = self.bucketizer.bucketize(
            &current,
            &windows.current,
            granularity,
            |o| o.effective_date(),
            |_| 1.0,
        );

        tracing::info!(
            "销售驾驶舱计算完成: range={}, 窗口内订单数={}, 退款订单数={}",
            range,
            current.len(),
            refunds_now.count
        );

        Ok(SalesDashboardResponse {
            time_range: range,
            window: windows.current,
            comparison_window: windows.comparison,
            kpis,
            sales_series,
            orders_series,
            location_breakdown: self.breakdown.location_breakdown(&current),
            source_breakdown: self.breakdown.source_breakdown(&current),
            carrier_breakdown: self.breakdown.carrier_breakdown(&current),
        })
    }

    // ==========================================
    // 库存/补货分析面
    // ==========================================

    /// 计算库存驾驶舱指标包
    ///
    /// # 参数
    /// - `snapshot`: 订单/商品/补货快照
    /// - `request`: 时间区间 + 阈值覆盖 + 榜单长度
    ///
    /// # 返回
    /// - Ok(InventoryDashboardResponse): 库存汇总 + 补货KPI + 商品排行
    /// - Err(ApiError): 参数契约违约
    pub fn get_inventory_dashboard(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        request: InventoryDashboardRequest,
    ) -> ApiResult<InventoryDashboardResponse> {
        let range = parse_time_range(&request.time_range)?;
        let now = resolve_now(request.now);
        let limit = validate_limit(request.top_limit, DEFAULT_TOP_LIMIT, 100)?;
        let windows = self.window_resolver.resolve(range, now);

        let policy = request
            .threshold_override
            .map(|o| ThresholdPolicy {
                global_enabled: o.enabled,
                global_value: o.value,
            })
            .unwrap_or_default();
        let summary = self.inventory.aggregate(snapshot.products, &policy);

        // 补货 KPI: 当前窗口 vs 对比窗口
        let restocks_now = self
            .filter
            .restocks_in_window(snapshot.restock_logs, &windows.current);
        let restocks_prev = self
            .filter
            .restocks_in_window(snapshot.restock_logs, &windows.comparison);
        let units_now: u32 = restocks_now.iter().map(|l| l.quantity).sum();
        let units_prev: u32 = restocks_prev.iter().map(|l| l.quantity).sum();

        let restock_series = self.bucketizer.bucketize(
            &restocks_now,
            &windows.current,
            range.granularity(),
            |l| l.restocked_at,
            |l| f64::from(l.quantity),
        );

        tracing::info!(
            "库存驾驶舱计算完成: range={}, 商品数={}, 低库存={}, 缺货={}, 窗口内补货={}",
            range,
            summary.total_products,
            summary.low_stock_count,
            summary.out_of_stock_count,
            restocks_now.len()
        );

        Ok(InventoryDashboardResponse {
            time_range: range,
            window: windows.current,
            summary,
            restock_count: self
                .kpi
                .metric(restocks_now.len() as f64, restocks_prev.len() as f64),
            units_restocked: self.kpi.metric(f64::from(units_now), f64::from(units_prev)),
            restock_series,
            best_sellers: self
                .ranker
                .best_sellers(snapshot, &windows.current, now, limit),
            top_revenue: self.ranker.top_revenue(snapshot, &windows.current, limit),
            slow_movers: self.ranker.slow_movers(snapshot, &windows.current, limit),
        })
    }

    // ==========================================
    // 生命周期专项报告
    // ==========================================

    /// 新品表现报告
    ///
    /// # 参数
    /// - `request.design_year`: 目标新品年份
    pub fn get_new_design_report(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        request: NewDesignReportRequest,
    ) -> ApiResult<NewDesignReport> {
        if !(2000..=2100).contains(&request.design_year) {
            return Err(ApiError::InvalidInput(format!(
                "新品年份超出合理范围: {}",
                request.design_year
            )));
        }

        let report = self.new_design.analyze(snapshot, request.design_year);

        tracing::info!(
            "新品报告计算完成: year={}, 新品数={}, 有补货新品数={}",
            request.design_year,
            report.total_new_designs,
            report.new_designs_restocked
        );

        Ok(report)
    }

    /// 停售候选检测
    ///
    /// # 参数
    /// - `request.lookback`: 回看期标识
    /// - `request.min_stock`: 最低库存阈值
    /// - `request.limit`: 榜单截断长度 (缺省 50)
    pub fn get_discontinue_candidates(
        &self,
        snapshot: &AnalyticsSnapshot<'_>,
        request: DiscontinueRequest,
    ) -> ApiResult<DiscontinueReport> {
        let lookback = DiscontinueLookback::parse(&request.lookback)
            .ok_or_else(|| ApiError::UnknownLookback(request.lookback.clone()))?;
        let now = resolve_now(request.now);
        let limit = validate_limit(request.limit, DEFAULT_DISCONTINUE_LIMIT, 1000)?;

        let report = self
            .discontinue
            .detect(snapshot, lookback, request.min_stock, limit, now);

        tracing::info!(
            "停售候选检测完成: lookback={}, min_stock={}, 候选总数={}",
            lookback,
            request.min_stock,
            report.total_candidates
        );

        Ok(report)
    }
}

impl Default for AnalyticsApi {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 参数校验与聚合辅助函数
// ==========================================

/// 解析时间区间标识, 未识别时在边界拒绝
fn parse_time_range(raw: &str) -> ApiResult<TimeRange> {
    TimeRange::parse(raw).ok_or_else(|| ApiError::UnknownTimeRange(raw.to_string()))
}

/// 基准时刻: 调用方提供优先, 缺省取墙钟本地时间
fn resolve_now(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| chrono::Local::now().naive_local())
}

/// 校验榜单长度参数
fn validate_limit(limit: Option<u32>, default: usize, max: u32) -> ApiResult<usize> {
    match limit {
        None => Ok(default),
        Some(v) if v >= 1 && v <= max => Ok(v as usize),
        Some(v) => Err(ApiError::InvalidInput(format!(
            "limit必须在1-{}之间: {}",
            max, v
        ))),
    }
}

/// 订单集合的销售总额
fn sum_totals(orders: &[&Order]) -> f64 {
    orders.iter().map(|o| o.total).sum()
}

/// 订单集合的去重客户数 (邮箱优先于姓名)
fn distinct_customers(orders: &[&Order]) -> usize {
    orders
        .iter()
        .map(|o| o.customer.dedup_key())
        .collect::<HashSet<String>>()
        .len()
}
