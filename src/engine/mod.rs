// ==========================================
// 零售运营分析引擎 - 引擎层
// ==========================================
// 职责: 实现指标聚合规则, 全部为纯函数式计算
// 约束: 引擎不做 I/O, 不持有状态, 对合法快照全域有定义;
//       所有可能为零的分母都有安全回退
// ==========================================

pub mod breakdown;
pub mod filter;
pub mod inventory;
pub mod kpi;
pub mod lifecycle;
pub mod performance;
pub mod refund;
pub mod series;
pub mod time_window;

// 重导出核心引擎
pub use breakdown::{BreakdownEngine, BreakdownEntry, CarrierBreakdownEntry};
pub use filter::RecordFilter;
pub use inventory::{InventoryAggregator, InventorySummary, StockAlertItem, ThresholdPolicy};
pub use kpi::{KpiCalculator, KpiMetric};
pub use lifecycle::{
    DiscontinueAnalyzer, DiscontinueCandidate, DiscontinueReport, NewDesignAnalyzer,
    NewDesignPerformance, NewDesignReport,
};
pub use performance::{PerformanceRanker, ProductPerformance};
pub use refund::{RefundResolver, RefundStats};
pub use series::{ChartDataPoint, SeriesBucketizer};
pub use time_window::{TimeWindowResolver, Window, WindowPair};
