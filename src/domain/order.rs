// ==========================================
// 零售运营分析引擎 - 订单实体
// ==========================================
// 职责: 订单快照结构, 含四种历史遗留退款形态
// 约束: 退款字段可同时出现任意子集, 全部可加,
//       由 RefundResolver 统一归一化, 不在调用点重复判型
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// 订单行项目 (Order Item)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// 商品ID
    pub product_id: String,
    /// 变体(SKU)ID
    pub variant_id: String,
    /// 数量
    pub quantity: u32,
    /// 成交单价
    pub unit_price: f64,
}

impl OrderItem {
    /// 行项目销售额 = 数量 × 单价
    pub fn line_revenue(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

// ==========================================
// 客户信息 (Customer Info)
// ==========================================
// 去重键: 邮箱优先于姓名 (邮箱统一小写)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// 客户姓名
    pub name: String,
    /// 邮箱 (可选)
    pub email: Option<String>,
    /// 电话 (可选)
    pub phone: Option<String>,
}

impl CustomerInfo {
    /// 客户去重键: 邮箱(小写)优先, 无邮箱时退回姓名
    pub fn dedup_key(&self) -> String {
        match &self.email {
            Some(email) if !email.trim().is_empty() => email.trim().to_lowercase(),
            _ => self.name.clone(),
        }
    }
}

// ==========================================
// 物流信息 (Fulfillment Info)
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FulfillmentInfo {
    /// 承运商名称 (缺失时归入 "Unknown" 桶)
    pub carrier: Option<String>,
    /// 配送状态信号 (字面值 "Delivered" 计入准时率分子)
    pub delivery_status: Option<String>,
}

// ==========================================
// 退款形态 (历史遗留)
// ==========================================
// 上游订单维护层历史上写入过四种互不一致的退款表示:
// 1. 单一退款对象 {amount}
// 2. 扁平数值字段 refunded_amount
// 3. 部分退款列表 (元素为数值或 {amount} 对象)
// 4. 退款交易列表 (元素为数值或 {amount} 对象)
// 四种形态全部可加, 任何一种都不是权威来源

/// 单一退款对象形态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundObject {
    /// 退款金额
    pub amount: f64,
}

/// 列表类退款条目: 数值或 {amount} 对象
///
/// 判型失败的条目落入 Other, 归一化时计为 0, 不报错
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefundEntry {
    /// 裸数值条目
    Amount(f64),
    /// {amount} 对象条目 (其余字段忽略)
    Detail { amount: f64 },
    /// 无法识别的形态 (计为 0)
    Other(serde_json::Value),
}

impl RefundEntry {
    /// 条目贡献的退款金额
    pub fn amount(&self) -> f64 {
        match self {
            RefundEntry::Amount(v) => *v,
            RefundEntry::Detail { amount } => *amount,
            RefundEntry::Other(_) => 0.0,
        }
    }
}

// ==========================================
// 订单 (Order)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 订单ID
    pub order_id: String,
    /// 创建时间
    pub created_at: NaiveDateTime,
    /// 显式下单日期 (可选, 缺失时回退到创建时间)
    pub order_date: Option<NaiveDateTime>,
    /// 客户信息
    pub customer: CustomerInfo,
    /// 收货地区 (缺失时归入 "Unknown" 桶)
    pub delivery_region: Option<String>,
    /// 订单来源/销售平台 (缺失时归入 "Unknown" 桶)
    pub source: Option<String>,
    /// 行项目列表
    pub items: Vec<OrderItem>,
    /// 小计
    pub subtotal: f64,
    /// 总额
    pub total: f64,
    /// 生命周期状态 (自由文本, 字面值 "Refunded" 有特殊含义)
    pub status: String,
    /// 退款形态1: 单一退款对象
    #[serde(default)]
    pub refund: Option<RefundObject>,
    /// 退款形态2: 扁平数值字段
    #[serde(default)]
    pub refunded_amount: Option<f64>,
    /// 退款形态3: 部分退款列表
    #[serde(default)]
    pub partial_refunds: Vec<RefundEntry>,
    /// 退款形态4: 退款交易列表
    #[serde(default)]
    pub refund_transactions: Vec<RefundEntry>,
    /// 物流子记录 (可选)
    #[serde(default)]
    pub fulfillment: Option<FulfillmentInfo>,
}

impl Order {
    /// 订单生效日期: 显式下单日期优先, 缺失时回退到创建时间
    pub fn effective_date(&self) -> NaiveDateTime {
        self.order_date.unwrap_or(self.created_at)
    }

    /// 订单状态是否为已退款
    pub fn is_refunded(&self) -> bool {
        self.status == crate::domain::types::STATUS_REFUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_effective_date_fallback() {
        let created = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let ordered = NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let mut order = Order {
            order_id: "O001".to_string(),
            created_at: created,
            order_date: None,
            customer: CustomerInfo {
                name: "张三".to_string(),
                email: None,
                phone: None,
            },
            delivery_region: None,
            source: None,
            items: vec![],
            subtotal: 0.0,
            total: 0.0,
            status: "Paid".to_string(),
            refund: None,
            refunded_amount: None,
            partial_refunds: vec![],
            refund_transactions: vec![],
            fulfillment: None,
        };

        // 无显式下单日期时回退到创建时间
        assert_eq!(order.effective_date(), created);

        // 有显式下单日期时优先使用
        order.order_date = Some(ordered);
        assert_eq!(order.effective_date(), ordered);
    }

    #[test]
    fn test_customer_dedup_key_prefers_email() {
        let with_email = CustomerInfo {
            name: "李四".to_string(),
            email: Some(" Li.Si@Example.COM ".to_string()),
            phone: None,
        };
        assert_eq!(with_email.dedup_key(), "li.si@example.com");

        let without_email = CustomerInfo {
            name: "李四".to_string(),
            email: None,
            phone: Some("13800000000".to_string()),
        };
        assert_eq!(without_email.dedup_key(), "李四");
    }

    #[test]
    fn test_refund_entry_legacy_shapes_deserialize() {
        // 裸数值条目
        let entries: Vec<RefundEntry> =
            serde_json::from_str(r#"[100.0, {"amount": 50.0, "reason": "破损"}, "bad"]"#)
                .expect("legacy shapes should deserialize");
        assert_eq!(entries[0].amount(), 100.0);
        assert_eq!(entries[1].amount(), 50.0);
        // 判型失败的条目计为 0, 不报错
        assert_eq!(entries[2].amount(), 0.0);
    }
}
