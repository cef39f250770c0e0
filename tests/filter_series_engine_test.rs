// ==========================================
// RecordFilter / SeriesBucketizer 引擎集成测试
// ==========================================
// 测试目标: 窗口过滤 (含退款剔除) 与图表序列分桶
// ==========================================


use retail_ops_analytics::domain::types::{Granularity, TimeRange};
use retail_ops_analytics::engine::{RecordFilter, SeriesBucketizer, TimeWindowResolver};
use test_helpers::*;

// ==========================================
// 测试用例 1: 剔除退款的窗口过滤
// ==========================================

#[test]
fn test_filter_excludes_refunded_orders_on_request() {
    println!("\n=== 测试：近7天窗口过滤, 剔除退款 ===");

    let now = noon(2026, 3, 15);
    let orders = vec![
        // 今天, 已支付
        create_test_order("O001", noon(2026, 3, 15), 1000.0, "Paid"),
        // 昨天, 已退款
        create_test_order("O002", noon(2026, 3, 14), 500.0, "Refunded"),
    ];

    let resolver = TimeWindowResolver::new();
    let filter = RecordFilter::new();
    let windows = resolver.resolve(TimeRange::Last7Days, now);

    // 剔除退款 ⇒ 只剩 1 单, 合计 1000
    let filtered = filter.orders_in_window(&orders, &windows.current, true);
    assert_eq!(filtered.len(), 1);
    let sum: f64 = filtered.iter().map(|o| o.total).sum();
    assert_eq!(sum, 1000.0);

    // 不剔除 ⇒ 2 单
    let all = filter.orders_in_window(&orders, &windows.current, false);
    assert_eq!(all.len(), 2);
}

// ==========================================
// 测试用例 2: 生效日期回退与窗口边界
// ==========================================

#[test]
fn test_filter_uses_effective_date_with_inclusive_bounds() {
    println!("\n=== 测试：生效日期 (显式下单日期优先) 与闭区间边界 ===");

    let now = noon(2026, 3, 15);
    let resolver = TimeWindowResolver::new();
    let filter = RecordFilter::new();
    let windows = resolver.resolve(TimeRange::Last7Days, now);

    // 创建时间在窗口外, 但显式下单日期在窗口内 ⇒ 入选
    let mut backdated = create_test_order("O001", noon(2026, 2, 1), 100.0, "Paid");
    backdated.order_date = Some(noon(2026, 3, 10));

    // 恰好落在窗口起点/终点 ⇒ 入选 (闭区间)
    let at_start = create_test_order("O002", windows.current.start, 100.0, "Paid");
    let at_end = create_test_order("O003", windows.current.end, 100.0, "Paid");

    // 窗口前一天 ⇒ 出局
    let before = create_test_order("O004", noon(2026, 3, 8), 100.0, "Paid");

    let orders = vec![backdated, at_start, at_end, before];
    let filtered = filter.orders_in_window(&orders, &windows.current, false);
    let ids: Vec<&str> = filtered.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["O001", "O002", "O003"]);
}

// ==========================================
// 测试用例 3: 补货序列分桶 (同一分桶器复用)
// ==========================================

#[test]
fn test_restock_series_reuses_bucketizer() {
    println!("\n=== 测试：补货量序列按日分桶 ===");

    let now = noon(2026, 3, 15);
    let resolver = TimeWindowResolver::new();
    let filter = RecordFilter::new();
    let bucketizer = SeriesBucketizer::new();
    let windows = resolver.resolve(TimeRange::Last7Days, now);

    let logs = vec![
        create_test_restock("R001", "P001", 10, noon(2026, 3, 9)),
        create_test_restock("R002", "P001", 5, noon(2026, 3, 9)),
        create_test_restock("R003", "P002", 7, noon(2026, 3, 15)),
        // 窗口外的补货不入序列
        create_test_restock("R004", "P002", 99, noon(2026, 2, 1)),
    ];

    let in_window = filter.restocks_in_window(&logs, &windows.current);
    assert_eq!(in_window.len(), 3);

    let series = bucketizer.bucketize(
        &in_window,
        &windows.current,
        Granularity::Daily,
        |l| l.restocked_at,
        |l| f64::from(l.quantity),
    );

    assert_eq!(series.len(), 7);
    assert_eq!(series[0].value, 15.0);
    assert_eq!(series[6].value, 7.0);
    let total: f64 = series.iter().map(|p| p.value).sum();
    assert_eq!(total, 22.0);
}
