// ==========================================
// 零售运营分析引擎 - 领域层
// ==========================================
// 职责: 定义分析引擎的输入实体与请求类型
// 约束: 所有实体由外部系统(订单/商品/补货维护子系统)创建与修改,
//       本引擎只读快照, 不做任何变更
// ==========================================

pub mod order;
pub mod product;
pub mod restock;
pub mod snapshot;
pub mod types;

// 重导出核心实体
pub use order::{CustomerInfo, FulfillmentInfo, Order, OrderItem, RefundEntry, RefundObject};
pub use product::{Product, Variant};
pub use restock::RestockLog;
pub use snapshot::AnalyticsSnapshot;
