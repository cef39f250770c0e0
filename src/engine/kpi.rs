// ==========================================
// 零售运营分析引擎 - KPI 环比计算器
// ==========================================
// 职责: 计算当前周期值与等长前一周期的环比百分比
// 规则 (零基线, 产品决策, 必须严格保持):
// - previous == 0 且 current > 0 ⇒ 100 (报满涨幅而非无穷)
// - previous == 0 且 current == 0 ⇒ 0 (中性)
// - 其余 ⇒ (current - previous) / previous * 100
// 系统内所有 KPI (销售额/订单/退款/客户/补货/补货件数)
// 统一使用这一条规则
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// KPI 指标 (Kpi Metric)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    /// 当前周期值
    pub value: f64,
    /// 相对前一等长周期的环比百分比
    pub percent_change: f64,
}

// ==========================================
// KpiCalculator - KPI 环比计算器
// ==========================================
pub struct KpiCalculator {
    // 无状态引擎, 不需要注入依赖
}

impl KpiCalculator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 环比百分比 (零基线规则见模块头)
    pub fn percent_change(&self, current: f64, previous: f64) -> f64 {
        if previous == 0.0 {
            if current > 0.0 {
                100.0
            } else {
                0.0
            }
        } else {
            (current - previous) / previous * 100.0
        }
    }

    /// 由当前值与对比值构造 KPI 指标
    pub fn metric(&self, current: f64, previous: f64) -> KpiMetric {
        KpiMetric {
            value: current,
            percent_change: self.percent_change(current, previous),
        }
    }
}

impl Default for KpiCalculator {
    fn default() -> Self {
        Self::new()
    }
}
