// ==========================================
// 零售运营分析引擎 - 图表序列分桶器
// ==========================================
// 职责: 把已过滤的记录集按窗口粒度聚合为有序图表序列
// 规则:
// - 按日: 窗口内每个自然日一桶, 标签为星期缩写
// - 按周: ceil(窗口天数/7) 桶, 标签 W1, W2, ...
// - 按月: 固定12桶 (Jan-Dec), 按自然月聚合, 不区分年份
// 同一分桶器复用于订单量/销售额/补货量序列, 仅累加字段不同
// ==========================================

use chrono::{Datelike, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::Granularity;
use crate::engine::time_window::Window;

// ==========================================
// 图表数据点 (Chart Data Point)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// 桶标签
    pub label: String,
    /// 累加值
    pub value: f64,
}

// 月份缩写标签 (固定12桶)
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ==========================================
// SeriesBucketizer - 图表序列分桶器
// ==========================================
pub struct SeriesBucketizer {
    // 无状态引擎, 不需要注入依赖
}

impl SeriesBucketizer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 把记录集分桶为有序图表序列
    ///
    /// # 参数
    /// - `records`: 已过滤的记录集 (应全部落在窗口内)
    /// - `window`: 时间窗口
    /// - `granularity`: 分桶粒度
    /// - `date_of`: 记录的时间取值规则
    /// - `value_of`: 记录的累加值取值规则 (计数序列取 1.0)
    ///
    /// # 返回
    /// 零初始化后累加的有序序列, 空桶保留为 0
    pub fn bucketize<T, D, V>(
        &self,
        records: &[&T],
        window: &Window,
        granularity: Granularity,
        date_of: D,
        value_of: V,
    ) -> Vec<ChartDataPoint>
    where
        D: Fn(&T) -> NaiveDateTime,
        V: Fn(&T) -> f64,
    {
        match granularity {
            Granularity::Daily => self.bucketize_daily(records, window, &date_of, &value_of),
            Granularity::Weekly => self.bucketize_weekly(records, window, &date_of, &value_of),
            Granularity::Monthly => self.bucketize_monthly(records, &date_of, &value_of),
        }
    }

    /// 按日分桶: 窗口内每个自然日一桶, 标签为星期缩写
    fn bucketize_daily<T>(
        &self,
        records: &[&T],
        window: &Window,
        date_of: &impl Fn(&T) -> NaiveDateTime,
        value_of: &impl Fn(&T) -> f64,
    ) -> Vec<ChartDataPoint> {
        let start_date = window.start.date();
        let end_date = window.end.date();
        let num_days = ((end_date - start_date).num_days() + 1).max(1) as usize;

        let mut buckets: Vec<ChartDataPoint> = (0..num_days)
            .map(|i| ChartDataPoint {
                label: (start_date + Duration::days(i as i64))
                    .format("%a")
                    .to_string(),
                value: 0.0,
            })
            .collect();

        for record in records {
            let days_since_start = (date_of(record).date() - start_date).num_days();
            if days_since_start >= 0 && (days_since_start as usize) < num_days {
                buckets[days_since_start as usize].value += value_of(record);
            }
        }

        buckets
    }

    /// 按周分桶: ceil(窗口天数/7) 桶,
    /// 记录归入桶 min(floor(距起点天数/7), 桶数-1)
    fn bucketize_weekly<T>(
        &self,
        records: &[&T],
        window: &Window,
        date_of: &impl Fn(&T) -> NaiveDateTime,
        value_of: &impl Fn(&T) -> f64,
    ) -> Vec<ChartDataPoint> {
        let start_date = window.start.date();
        let end_date = window.end.date();
        let window_days = ((end_date - start_date).num_days() + 1).max(1);
        let num_buckets = ((window_days + 6) / 7) as usize;

        let mut buckets: Vec<ChartDataPoint> = (0..num_buckets)
            .map(|i| ChartDataPoint {
                label: format!("W{}", i + 1),
                value: 0.0,
            })
            .collect();

        for record in records {
            let days_since_start = (date_of(record).date() - start_date).num_days();
            if days_since_start < 0 {
                continue;
            }
            let index = ((days_since_start / 7) as usize).min(num_buckets - 1);
            buckets[index].value += value_of(record);
        }

        buckets
    }

    /// 按月分桶: 固定12桶, 按自然月聚合, 不区分年份
    fn bucketize_monthly<T>(
        &self,
        records: &[&T],
        date_of: &impl Fn(&T) -> NaiveDateTime,
        value_of: &impl Fn(&T) -> f64,
    ) -> Vec<ChartDataPoint> {
        let mut buckets: Vec<ChartDataPoint> = MONTH_LABELS
            .iter()
            .map(|label| ChartDataPoint {
                label: (*label).to_string(),
                value: 0.0,
            })
            .collect();

        for record in records {
            let index = date_of(record).month0() as usize;
            buckets[index].value += value_of(record);
        }

        buckets
    }
}

impl Default for SeriesBucketizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Point {
        at: NaiveDateTime,
        amount: f64,
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn window(start: NaiveDateTime, end_date: NaiveDate) -> Window {
        Window {
            start,
            end: end_date.and_hms_opt(23, 59, 59).unwrap(),
        }
    }

    #[test]
    fn test_daily_buckets_cover_window_in_order() {
        let bucketizer = SeriesBucketizer::new();
        // 2026-03-09 (周一) 到 2026-03-15 (周日)
        let w = window(
            at(2026, 3, 9).date().and_hms_opt(0, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        );
        let records = vec![
            Point {
                at: at(2026, 3, 9),
                amount: 100.0,
            },
            Point {
                at: at(2026, 3, 9),
                amount: 50.0,
            },
            Point {
                at: at(2026, 3, 15),
                amount: 30.0,
            },
        ];
        let refs: Vec<&Point> = records.iter().collect();

        let series = bucketizer.bucketize(&refs, &w, Granularity::Daily, |p| p.at, |p| p.amount);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].label, "Mon");
        assert_eq!(series[6].label, "Sun");
        assert_eq!(series[0].value, 150.0);
        assert_eq!(series[6].value, 30.0);
        // 空桶保留为 0
        assert_eq!(series[3].value, 0.0);
    }

    #[test]
    fn test_weekly_bucket_assignment_formula() {
        let bucketizer = SeriesBucketizer::new();
        // 30 天窗口 ⇒ ceil(30/7) = 5 桶
        let w = window(
            NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 30).unwrap(),
        );
        let records = vec![
            // 第0天 ⇒ W1
            Point {
                at: at(2026, 3, 1),
                amount: 1.0,
            },
            // 第7天 ⇒ W2
            Point {
                at: at(2026, 3, 8),
                amount: 1.0,
            },
            // 第29天 ⇒ floor(29/7)=4 ⇒ W5 (最后一桶)
            Point {
                at: at(2026, 3, 30),
                amount: 1.0,
            },
        ];
        let refs: Vec<&Point> = records.iter().collect();

        let series = bucketizer.bucketize(&refs, &w, Granularity::Weekly, |p| p.at, |_| 1.0);

        assert_eq!(series.len(), 5);
        assert_eq!(series[0].label, "W1");
        assert_eq!(series[4].label, "W5");
        assert_eq!(series[0].value, 1.0);
        assert_eq!(series[1].value, 1.0);
        assert_eq!(series[4].value, 1.0);
    }

    #[test]
    fn test_monthly_buckets_fixed_twelve() {
        let bucketizer = SeriesBucketizer::new();
        let w = window(
            NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        );
        let records = vec![
            Point {
                at: at(2026, 1, 10),
                amount: 10.0,
            },
            Point {
                at: at(2026, 3, 5),
                amount: 20.0,
            },
        ];
        let refs: Vec<&Point> = records.iter().collect();

        let series =
            bucketizer.bucketize(&refs, &w, Granularity::Monthly, |p| p.at, |p| p.amount);

        assert_eq!(series.len(), 12);
        assert_eq!(series[0].label, "Jan");
        assert_eq!(series[11].label, "Dec");
        assert_eq!(series[0].value, 10.0);
        assert_eq!(series[2].value, 20.0);
    }
}
