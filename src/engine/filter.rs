// ==========================================
// 零售运营分析引擎 - 记录过滤器
// ==========================================
// 职责: 按时间窗口筛选订单/补货记录
// 规则: 订单生效日期 (显式下单日期, 缺失回退创建时间)
//       落在 [start, end] 闭区间内; 调用方可选剔除已退款订单
// ==========================================

use crate::domain::order::Order;
use crate::domain::restock::RestockLog;
use crate::engine::time_window::Window;

// ==========================================
// RecordFilter - 记录过滤器
// ==========================================
pub struct RecordFilter {
    // 无状态引擎, 不需要注入依赖
}

impl RecordFilter {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 筛选窗口内的订单
    ///
    /// # 参数
    /// - `orders`: 订单台账
    /// - `window`: 时间窗口 (闭区间)
    /// - `exclude_refunded`: 是否剔除状态为 "Refunded" 的订单
    pub fn orders_in_window<'a>(
        &self,
        orders: &'a [Order],
        window: &Window,
        exclude_refunded: bool,
    ) -> Vec<&'a Order> {
        orders
            .iter()
            .filter(|o| window.contains(o.effective_date()))
            .filter(|o| !(exclude_refunded && o.is_refunded()))
            .collect()
    }

    /// 筛选窗口内的补货记录
    pub fn restocks_in_window<'a>(
        &self,
        logs: &'a [RestockLog],
        window: &Window,
    ) -> Vec<&'a RestockLog> {
        logs.iter()
            .filter(|log| window.contains(log.restocked_at))
            .collect()
    }
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self::new()
    }
}
