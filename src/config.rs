/// 客户端配置模块
/// 支持环境变量和默认值

/// 接口入口网址
pub const API_ENDPOINT: &str = "https://open.ys7.com/api/lapp";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// 接口入口网址，可指向私有网关或测试服务器
    pub endpoint: String,
    /// 请求超时（毫秒）
    pub timeout_ms: u64,
    /// 是否校验 HTTPS 证书
    pub verify_cert: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: API_ENDPOINT.into(),
            timeout_ms: 10000,
            verify_cert: true,
        }
    }
}

impl ClientOptions {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("YS7_API_ENDPOINT")
                .unwrap_or_else(|_| API_ENDPOINT.into()),
            timeout_ms: std::env::var("YS7_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
            verify_cert: std::env::var("YS7_VERIFY_CERT")
                .map(|v| v != "false")
                .unwrap_or(true),
        }
    }
}
