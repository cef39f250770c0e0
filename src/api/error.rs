// ==========================================
// 零售运营分析引擎 - API层错误类型
// ==========================================
// 职责: 定义边界层错误类型, 把契约违约转换为
//       用户友好的错误消息
// 约束: 引擎层对合法快照全域有定义, 不产生错误;
//       所有错误均产生于参数校验
// ==========================================

use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 参数契约错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("未知的时间区间标识: {0}")]
    UnknownTimeRange(String),

    #[error("未知的回看期标识: {0}")]
    UnknownLookback(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
