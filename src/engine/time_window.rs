// ==========================================
// 零售运营分析引擎 - 时间窗口解析器
// ==========================================
// 职责: 把命名时间区间解析为具体 [start, end] 窗口,
//       并给出紧邻其前、等长的对比窗口
// 约束: 窗口不变量 end >= start;
//       对比窗口 end + 1秒 == 当前窗口 start, 且时长相等
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{DiscontinueLookback, TimeRange};

// ==========================================
// 窗口 (Window)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// 窗口起点 (含)
    pub start: NaiveDateTime,
    /// 窗口终点 (含)
    pub end: NaiveDateTime,
}

impl Window {
    /// 时间点是否落在窗口内 (闭区间)
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.start && t <= self.end
    }

    /// 窗口时长
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

// ==========================================
// 窗口对 (Window Pair)
// ==========================================
/// 当前窗口 + 紧邻其前的等长对比窗口
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowPair {
    /// 当前窗口
    pub current: Window,
    /// 对比窗口 (用于环比百分比基线)
    pub comparison: Window,
}

// ==========================================
// TimeWindowResolver - 时间窗口解析器
// ==========================================
pub struct TimeWindowResolver {
    // 无状态引擎, 不需要注入依赖
}

impl TimeWindowResolver {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 解析命名区间为当前窗口 + 对比窗口
    ///
    /// # 参数
    /// - `range`: 命名时间区间
    /// - `now`: 基准时刻 (调用方提供或取墙钟)
    ///
    /// # 规则
    /// - 近7天: start = 今天减6天 00:00:00, end = 今天 23:59:59
    /// - 近30天: start = 今天减29天 00:00:00, end = 今天 23:59:59
    /// - 年初至今: start = 当年1月1日 00:00:00, end = 今天 23:59:59
    /// - 对比窗口: end = 当前 start 减1秒, start = 对比 end 减当前时长
    pub fn resolve(&self, range: TimeRange, now: NaiveDateTime) -> WindowPair {
        let today = now.date();

        let start_date = match range {
            TimeRange::Last7Days => today - Duration::days(6),
            TimeRange::Last30Days => today - Duration::days(29),
            TimeRange::YearToDate => year_start(today),
        };

        let current = Window {
            start: day_start(start_date),
            end: day_end(today),
        };

        let duration = current.duration();
        let comparison_end = current.start - Duration::seconds(1);
        let comparison = Window {
            start: comparison_end - duration,
            end: comparison_end,
        };

        WindowPair {
            current,
            comparison,
        }
    }

    /// 解析停售回看期为窗口 (终点为今天 23:59:59)
    pub fn resolve_lookback(&self, lookback: DiscontinueLookback, now: NaiveDateTime) -> Window {
        let today = now.date();

        let start_date = match lookback {
            DiscontinueLookback::Last30Days => today - Duration::days(29),
            DiscontinueLookback::Last90Days => today - Duration::days(89),
            DiscontinueLookback::YearToDate => year_start(today),
        };

        Window {
            start: day_start(start_date),
            end: day_end(today),
        }
    }

    /// 以 now 为终点的滚动窗口 (用于库存覆盖天数的近30天销量)
    pub fn trailing_window(&self, days: i64, now: NaiveDateTime) -> Window {
        Window {
            start: now - Duration::days(days),
            end: now,
        }
    }
}

impl Default for TimeWindowResolver {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 日期边界辅助函数
// ==========================================

/// 当天 00:00:00
fn day_start(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

/// 当天 23:59:59
fn day_end(d: NaiveDate) -> NaiveDateTime {
    // 23:59:59 恒为合法时刻, 回退分支不可达
    d.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| d.and_time(NaiveTime::MIN))
}

/// 当年 1月1日
fn year_start(today: NaiveDate) -> NaiveDate {
    // 1月1日恒为合法日期, 回退分支不可达
    NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> NaiveDateTime {
        // 2026-03-15 是周日
        NaiveDate::from_ymd_opt(2026, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_last_7_days_window() {
        let resolver = TimeWindowResolver::new();
        let pair = resolver.resolve(TimeRange::Last7Days, fixed_now());

        assert_eq!(
            pair.current.start,
            NaiveDate::from_ymd_opt(2026, 3, 9)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(
            pair.current.end,
            NaiveDate::from_ymd_opt(2026, 3, 15)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap()
        );
    }

    #[test]
    fn test_year_to_date_window() {
        let resolver = TimeWindowResolver::new();
        let pair = resolver.resolve(TimeRange::YearToDate, fixed_now());

        assert_eq!(
            pair.current.start,
            NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_comparison_window_contiguous_and_equal_duration() {
        let resolver = TimeWindowResolver::new();
        for range in [
            TimeRange::Last7Days,
            TimeRange::Last30Days,
            TimeRange::YearToDate,
        ] {
            let pair = resolver.resolve(range, fixed_now());

            // 对比窗口紧邻当前窗口: 对比 end + 1秒 == 当前 start
            assert_eq!(
                pair.comparison.end + Duration::seconds(1),
                pair.current.start,
                "range={}",
                range
            );
            // 时长相等
            assert_eq!(
                pair.comparison.duration(),
                pair.current.duration(),
                "range={}",
                range
            );
            // 窗口不变量: end >= start
            assert!(pair.current.end >= pair.current.start);
            assert!(pair.comparison.end >= pair.comparison.start);
        }
    }

    #[test]
    fn test_window_contains_inclusive_bounds() {
        let resolver = TimeWindowResolver::new();
        let pair = resolver.resolve(TimeRange::Last7Days, fixed_now());

        assert!(pair.current.contains(pair.current.start));
        assert!(pair.current.contains(pair.current.end));
        assert!(!pair
            .current
            .contains(pair.current.start - Duration::seconds(1)));
        assert!(!pair.current.contains(pair.current.end + Duration::seconds(1)));
    }
}
