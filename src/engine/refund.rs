// ==========================================
// 零售运营分析引擎 - 退款归一化解析器
// ==========================================
// 职责: 把四种历史遗留退款形态归一化为单一金额
// 约束: 四种形态全部累加, 绝不以某一种覆盖其他;
//       缺失/判型失败的字段计为 0, 绝不报错
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;

// ==========================================
// 退款统计 (Refund Stats)
// ==========================================
/// 一组订单上的退款汇总: 有退款的订单数 + 退款总额
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RefundStats {
    /// 有任意退款的订单数
    pub count: u32,
    /// 退款总额
    pub total: f64,
}

// ==========================================
// RefundResolver - 退款归一化解析器
// ==========================================
pub struct RefundResolver {
    // 无状态引擎, 不需要注入依赖
}

impl RefundResolver {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 计算单个订单的退款总额
    ///
    /// 累加四种形态 (上游维护层历史写入不一致, 任何一种都不权威):
    /// 1. 单一退款对象 amount (仅 > 0 时计入)
    /// 2. 扁平数值字段 (仅 > 0 时计入)
    /// 3. 部分退款列表的每个条目
    /// 4. 退款交易列表的每个条目
    pub fn refund_total(&self, order: &Order) -> f64 {
        let mut total = 0.0;

        if let Some(refund) = &order.refund {
            if refund.amount > 0.0 {
                total += refund.amount;
            }
        }

        if let Some(amount) = order.refunded_amount {
            if amount > 0.0 {
                total += amount;
            }
        }

        for entry in &order.partial_refunds {
            total += entry.amount();
        }

        for entry in &order.refund_transactions {
            total += entry.amount();
        }

        total
    }

    /// 订单是否有任意退款
    pub fn has_refund(&self, order: &Order) -> bool {
        self.refund_total(order) > 0.0
    }

    /// 一组订单的退款统计
    pub fn refund_stats(&self, orders: &[&Order]) -> RefundStats {
        let mut stats = RefundStats::default();
        for order in orders {
            let total = self.refund_total(order);
            if total > 0.0 {
                stats.count += 1;
                stats.total += total;
            }
        }
        stats
    }
}

impl Default for RefundResolver {
    fn default() -> Self {
        Self::new()
    }
}
