// ==========================================
// 零售运营分析引擎 - 核心库
// ==========================================
// 系统定位: 纯计算的经营指标聚合引擎
// 输入: 订单/商品/补货记录的不可变快照 + 请求参数
// 输出: 驾驶舱指标包 (KPI、图表序列、分类占比、排行榜)
// 约束: 无 I/O、无持久化、无共享可变状态, 每次调用独立可重入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 聚合计算规则
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    DiscontinueLookback, Granularity, TimeRange, STATUS_DELIVERED, STATUS_REFUNDED,
};

// 领域实体
pub use domain::{
    AnalyticsSnapshot, CustomerInfo, FulfillmentInfo, Order, OrderItem, Product, RefundEntry,
    RefundObject, RestockLog, Variant,
};

// 引擎
pub use engine::{
    BreakdownEngine, DiscontinueAnalyzer, InventoryAggregator, KpiCalculator, NewDesignAnalyzer,
    PerformanceRanker, RecordFilter, RefundResolver, SeriesBucketizer, TimeWindowResolver,
};

// 引擎输出值类型
pub use engine::{
    BreakdownEntry, CarrierBreakdownEntry, ChartDataPoint, DiscontinueCandidate,
    DiscontinueReport, InventorySummary, KpiMetric, NewDesignPerformance, NewDesignReport,
    ProductPerformance, RefundStats, StockAlertItem, ThresholdPolicy, Window, WindowPair,
};

// API
pub use api::{AnalyticsApi, ApiError, ApiResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零售运营分析引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
