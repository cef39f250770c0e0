// ==========================================
// 零售运营分析引擎 - API 请求/响应 DTO
// ==========================================
// 职责: 两个分析面 (销售/订单/客户面, 库存/补货面)
//       的请求参数与只读结果包
// 约束: 结果包每次调用重建, 无独立身份, 不被引擎持有
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TimeRange;
use crate::engine::breakdown::{BreakdownEntry, CarrierBreakdownEntry};
use crate::engine::inventory::InventorySummary;
use crate::engine::kpi::KpiMetric;
use crate::engine::performance::ProductPerformance;
use crate::engine::series::ChartDataPoint;
use crate::engine::time_window::Window;

// ==========================================
// 销售驾驶舱请求 (Sales Dashboard Request)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesDashboardRequest {
    /// 时间区间标识 (last-7-days / last-30-days / year-to-date)
    pub time_range: String,
    /// 基准时刻 (缺省取墙钟本地时间)
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

// ==========================================
// 销售 KPI 集 (Sales Kpi Set)
// ==========================================
// 每项均为 {当前值, 环比百分比}, 环比基线为等长前一窗口
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesKpiSet {
    /// 销售额 (剔除已退款订单)
    pub sales: KpiMetric,
    /// 订单数 (剔除已退款订单)
    pub orders: KpiMetric,
    /// 去重客户数 (邮箱优先于姓名)
    pub customers: KpiMetric,
    /// 有退款的订单数 (含已退款订单)
    pub refund_count: KpiMetric,
    /// 退款总额 (四种遗留形态累加)
    pub refund_amount: KpiMetric,
}

// ==========================================
// 销售驾驶舱响应 (Sales Dashboard Response)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesDashboardResponse {
    /// 请求的时间区间
    pub time_range: TimeRange,
    /// 当前窗口
    pub window: Window,
    /// 对比窗口
    pub comparison_window: Window,
    /// KPI 集
    pub kpis: SalesKpiSet,
    /// 销售额序列
    pub sales_series: Vec<ChartDataPoint>,
    /// 订单量序列
    pub orders_series: Vec<ChartDataPoint>,
    /// 收货地区分类 (Top-5 + "Others")
    pub location_breakdown: Vec<BreakdownEntry>,
    /// 订单来源分类 (完整列表)
    pub source_breakdown: Vec<BreakdownEntry>,
    /// 承运商分类 (含准时率)
    pub carrier_breakdown: Vec<CarrierBreakdownEntry>,
}

// ==========================================
// 全局低库存阈值覆盖 (Global Threshold Override)
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalThresholdOverride {
    /// 覆盖开关
    pub enabled: bool,
    /// 全局阈值
    pub value: u32,
}

// ==========================================
// 库存驾驶舱请求 (Inventory Dashboard Request)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryDashboardRequest {
    /// 时间区间标识 (补货 KPI 与序列使用)
    pub time_range: String,
    /// 基准时刻 (缺省取墙钟本地时间)
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    /// 全局低库存阈值覆盖 (可选)
    #[serde(default)]
    pub threshold_override: Option<GlobalThresholdOverride>,
    /// 排行榜长度 (缺省 5, 上限 100)
    #[serde(default)]
    pub top_limit: Option<u32>,
}

// ==========================================
// 库存驾驶舱响应 (Inventory Dashboard Response)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryDashboardResponse {
    /// 请求的时间区间
    pub time_range: TimeRange,
    /// 当前窗口
    pub window: Window,
    /// 当下库存汇总
    pub summary: InventorySummary,
    /// 补货次数 KPI
    pub restock_count: KpiMetric,
    /// 补货件数 KPI
    pub units_restocked: KpiMetric,
    /// 补货量序列
    pub restock_series: Vec<ChartDataPoint>,
    /// 畅销榜 (附库存覆盖天数)
    pub best_sellers: Vec<ProductPerformance>,
    /// 营收榜
    pub top_revenue: Vec<ProductPerformance>,
    /// 滞销榜
    pub slow_movers: Vec<ProductPerformance>,
}

// ==========================================
// 新品报告请求 (New Design Report Request)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDesignReportRequest {
    /// 目标新品年份
    pub design_year: i32,
}

// ==========================================
// 停售候选请求 (Discontinue Request)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscontinueRequest {
    /// 回看期标识 (last-30-days / last-90-days / year-to-date)
    pub lookback: String,
    /// 最低库存阈值
    pub min_stock: u32,
    /// 榜单截断长度 (缺省 50, 上限 1000)
    #[serde(default)]
    pub limit: Option<u32>,
    /// 基准时刻 (缺省取墙钟本地时间)
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}
