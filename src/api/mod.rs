// ==========================================
// 零售运营分析引擎 - API 层
// ==========================================
// 职责: 校验请求参数, 编排引擎层计算, 组装响应包
// 约束: 参数契约 (未知区间标识/越界 limit) 在此层拒绝,
//       引擎层不再防御
// ==========================================

pub mod analytics_api;
pub mod dto;
pub mod error;

pub use analytics_api::AnalyticsApi;
pub use dto::{
    DiscontinueRequest, GlobalThresholdOverride, InventoryDashboardRequest,
    InventoryDashboardResponse, NewDesignReportRequest, SalesDashboardRequest,
    SalesDashboardResponse, SalesKpiSet,
};
pub use error::{ApiError, ApiResult};
