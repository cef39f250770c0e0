// ==========================================
// 零售运营分析引擎 - 数据快照
// ==========================================
// 职责: 单次分析调用的不可变输入快照
// 约束: 引擎按调用接收快照, 不跨调用保留任何引用,
//       不依赖任何模块级/进程级可变状态
// ==========================================

use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::restock::RestockLog;

// ==========================================
// 分析快照 (Analytics Snapshot)
// ==========================================
/// 一次分析调用的完整输入: 订单台账 + 商品目录 + 补货日志
///
/// 快照以借用形式传入, 引擎只读不写
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsSnapshot<'a> {
    /// 订单台账
    pub orders: &'a [Order],
    /// 商品目录 (含变体)
    pub products: &'a [Product],
    /// 补货事件日志
    pub restock_logs: &'a [RestockLog],
}

impl<'a> AnalyticsSnapshot<'a> {
    /// 构造快照
    pub fn new(
        orders: &'a [Order],
        products: &'a [Product],
        restock_logs: &'a [RestockLog],
    ) -> Self {
        Self {
            orders,
            products,
            restock_logs,
        }
    }
}
