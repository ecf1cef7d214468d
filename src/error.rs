/// 客户端错误类型

use thiserror::Error;

/// 统一错误，按失败发生的层次区分
///
/// 远端业务失败（code 非 "200"）不算错误，由请求层折叠进
/// [`crate::types::ApiResult`] 返回
#[derive(Debug, Error)]
pub enum YsError {
    /// 调用方参数非法，校验在任何 I/O 之前完成
    #[error("{0}")]
    Validation(String),

    /// 网络层失败（连接、超时、读取响应体）
    #[error("请求萤石云接口失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 响应体不是合法 JSON，或成功响应缺少必需字段
    #[error("萤石云响应解析失败: {0}")]
    InvalidResponse(String),
}
