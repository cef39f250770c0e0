// ==========================================
// 零售运营分析引擎 - 补货记录实体
// ==========================================
// 职责: 补货事件日志快照结构
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// 补货记录 (Restock Log)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockLog {
    /// 记录ID
    pub restock_id: String,
    /// 商品ID
    pub product_id: String,
    /// 变体ID
    pub variant_id: String,
    /// 补货数量
    pub quantity: u32,
    /// 补货时间
    pub restocked_at: NaiveDateTime,
}
