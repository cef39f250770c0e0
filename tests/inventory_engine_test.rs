// ==========================================
// InventoryAggregator 引擎集成测试
// ==========================================
// 测试目标: 库存总量/价值统计、低库存/缺货分类、
//           全局阈值覆盖策略
// ==========================================


use retail_ops_analytics::engine::{InventoryAggregator, ThresholdPolicy};
use test_helpers::*;

// ==========================================
// 测试用例 1: 低库存与缺货分类
// ==========================================

#[test]
fn test_low_stock_and_out_of_stock_classification() {
    println!("\n=== 测试：低库存/缺货分类 ===");

    let created = noon(2025, 6, 1);
    let products = vec![
        // 库存 3, 阈值 5 ⇒ 低库存, 非缺货
        create_test_product("P001", "帆布包", 5, created, &[(3, 100.0)]),
        // 库存 0 ⇒ 缺货, 与阈值无关
        create_test_product("P002", "围巾", 5, created, &[(0, 80.0)]),
        // 库存 20 ⇒ 正常
        create_test_product("P003", "水杯", 5, created, &[(20, 30.0)]),
    ];

    let aggregator = InventoryAggregator::new();
    let summary = aggregator.aggregate(&products, &ThresholdPolicy::default());

    assert_eq!(summary.total_products, 3);
    assert_eq!(summary.total_variants, 3);
    assert_eq!(summary.total_units, 23);
    // 3×100 + 0×80 + 20×30 = 900
    assert!((summary.total_value - 900.0).abs() < f64::EPSILON);

    assert_eq!(summary.low_stock_count, 1);
    assert_eq!(summary.low_stock_items[0].product_id, "P001");
    assert_eq!(summary.low_stock_items[0].stock, 3);
    assert_eq!(summary.low_stock_items[0].threshold, 5);

    assert_eq!(summary.out_of_stock_count, 1);
    assert_eq!(summary.out_of_stock_items[0].product_id, "P002");
}

// ==========================================
// 测试用例 2: 低库存明细按库存升序
// ==========================================

#[test]
fn test_low_stock_items_sorted_ascending_by_stock() {
    println!("\n=== 测试：低库存明细升序排列 ===");

    let created = noon(2025, 6, 1);
    let products = vec![
        create_test_product("P001", "A", 10, created, &[(8, 10.0)]),
        create_test_product("P002", "B", 10, created, &[(2, 10.0)]),
        create_test_product("P003", "C", 10, created, &[(5, 10.0)]),
    ];

    let aggregator = InventoryAggregator::new();
    let summary = aggregator.aggregate(&products, &ThresholdPolicy::default());

    let stocks: Vec<u32> = summary.low_stock_items.iter().map(|i| i.stock).collect();
    assert_eq!(stocks, vec![2, 5, 8]);
}

// ==========================================
// 测试用例 3: 全局阈值覆盖策略
// ==========================================

#[test]
fn test_global_threshold_override() {
    println!("\n=== 测试：全局阈值覆盖 ===");

    let created = noon(2025, 6, 1);
    // 商品自身阈值 2, 库存 4 ⇒ 默认策略下正常
    let products = vec![create_test_product("P001", "A", 2, created, &[(4, 10.0)])];

    let aggregator = InventoryAggregator::new();

    let default_summary = aggregator.aggregate(&products, &ThresholdPolicy::default());
    assert_eq!(default_summary.low_stock_count, 0);

    // 全局阈值 10 覆盖后 ⇒ 低库存
    let overridden = ThresholdPolicy {
        global_enabled: true,
        global_value: 10,
    };
    let override_summary = aggregator.aggregate(&products, &overridden);
    assert_eq!(override_summary.low_stock_count, 1);
    assert_eq!(override_summary.low_stock_items[0].threshold, 10);

    // 开关关闭时全局值不生效
    let disabled = ThresholdPolicy {
        global_enabled: false,
        global_value: 10,
    };
    assert_eq!(aggregator.aggregate(&products, &disabled).low_stock_count, 0);
}

// ==========================================
// 测试用例 4: 多变体商品
// ==========================================

#[test]
fn test_multi_variant_product_counts_each_variant() {
    println!("\n=== 测试：变体级统计 ===");

    let created = noon(2025, 6, 1);
    let products = vec![create_test_product(
        "P001",
        "T恤",
        5,
        created,
        &[(0, 50.0), (3, 50.0), (100, 50.0)],
    )];

    let aggregator = InventoryAggregator::new();
    let summary = aggregator.aggregate(&products, &ThresholdPolicy::default());

    assert_eq!(summary.total_products, 1);
    assert_eq!(summary.total_variants, 3);
    assert_eq!(summary.out_of_stock_count, 1);
    assert_eq!(summary.low_stock_count, 1);
    assert_eq!(summary.total_units, 103);
}

// ==========================================
// 测试用例 5: 空目录安全
// ==========================================

#[test]
fn test_empty_catalog_is_safe() {
    let aggregator = InventoryAggregator::new();
    let summary = aggregator.aggregate(&[], &ThresholdPolicy::default());
    assert_eq!(summary.total_products, 0);
    assert_eq!(summary.total_units, 0);
    assert_eq!(summary.total_value, 0.0);
}
