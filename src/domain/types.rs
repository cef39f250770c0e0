// ==========================================
// 零售运营分析引擎 - 领域类型定义
// ==========================================
// 职责: 时间区间/图表粒度/停售回看期等枚举类型
// 约束: 订单状态为自由字符串, 仅两个字面值有特殊含义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单状态特殊字面值
// ==========================================
// 状态字段为自由文本, 由订单子系统写入;
// 引擎只识别以下两个字面值

/// 已退款订单状态 (销售聚合时剔除)
pub const STATUS_REFUNDED: &str = "Refunded";

/// 已送达状态 (物流准时率分子)
pub const STATUS_DELIVERED: &str = "Delivered";

// ==========================================
// 时间区间 (Time Range)
// ==========================================
// 每种区间隐含各自的图表分桶粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRange {
    Last7Days,  // 近7天 → 按日分桶
    Last30Days, // 近30天 → 按周分桶
    YearToDate, // 年初至今 → 按月分桶
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRange::Last7Days => write!(f, "last-7-days"),
            TimeRange::Last30Days => write!(f, "last-30-days"),
            TimeRange::YearToDate => write!(f, "year-to-date"),
        }
    }
}

impl TimeRange {
    /// 从请求字符串解析时间区间
    ///
    /// 未识别的区间标识属于调用方契约违约, 在 API 边界拒绝
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "last-7-days" => Some(TimeRange::Last7Days),
            "last-30-days" => Some(TimeRange::Last30Days),
            "year-to-date" => Some(TimeRange::YearToDate),
            _ => None,
        }
    }

    /// 区间对应的图表分桶粒度
    pub fn granularity(&self) -> Granularity {
        match self {
            TimeRange::Last7Days => Granularity::Daily,
            TimeRange::Last30Days => Granularity::Weekly,
            TimeRange::YearToDate => Granularity::Monthly,
        }
    }
}

// ==========================================
// 图表分桶粒度 (Granularity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    Daily,   // 按日, 标签为星期缩写
    Weekly,  // 按周, 标签为 W1, W2, ...
    Monthly, // 按月, 固定12桶, 标签为月份缩写
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "DAILY"),
            Granularity::Weekly => write!(f, "WEEKLY"),
            Granularity::Monthly => write!(f, "MONTHLY"),
        }
    }
}

// ==========================================
// 停售候选回看期 (Discontinue Lookback)
// ==========================================
// 回看期内零销量且库存达标的商品被标记为停售候选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscontinueLookback {
    Last30Days, // 近30天
    Last90Days, // 近90天
    YearToDate, // 年初至今
}

impl fmt::Display for DiscontinueLookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscontinueLookback::Last30Days => write!(f, "last-30-days"),
            DiscontinueLookback::Last90Days => write!(f, "last-90-days"),
            DiscontinueLookback::YearToDate => write!(f, "year-to-date"),
        }
    }
}

impl DiscontinueLookback {
    /// 从请求字符串解析回看期
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "last-30-days" => Some(DiscontinueLookback::Last30Days),
            "last-90-days" => Some(DiscontinueLookback::Last90Days),
            "year-to-date" => Some(DiscontinueLookback::YearToDate),
            _ => None,
        }
    }
}
