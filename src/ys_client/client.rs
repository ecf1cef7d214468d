/// 萤石云开放平台 HTTP 客户端
/// 封装 accessToken 获取与缓存、接口请求签发和统一返回结构

use std::sync::Arc;

use dashmap::DashMap;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::TokenCache;
use crate::config::ClientOptions;
use crate::error::YsError;
use crate::types::{ApiResult, TokenData};

/// accessToken 缓存名称前缀
const ACCESS_TOKEN_CACHE_PREFIX: &str = "Ys7AccessToken_";

/// accessToken 缓存存活时间（秒）
/// 略短于官方 7 天有效期，缓存先于远端失效
const ACCESS_TOKEN_LIFETIME_SECS: u64 = 604_750;

pub struct YsClient {
    app_key: String,
    app_secret: String,
    options: ClientOptions,
    http: Client,
    cache: Arc<dyn TokenCache>,
    /// appKey 维度的取 token 并发去重锁
    token_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl YsClient {
    /// 新建客户端，appKey/appSecret 去除首尾空白后不得为空
    ///
    /// 构造阶段不发出任何请求
    pub fn new(
        app_key: &str,
        app_secret: &str,
        cache: Arc<dyn TokenCache>,
        options: ClientOptions,
    ) -> Result<Self, YsError> {
        let app_key = app_key.trim();
        let app_secret = app_secret.trim();

        if app_key.is_empty() {
            return Err(YsError::Validation("app id is empty".into()));
        }
        if app_secret.is_empty() {
            return Err(YsError::Validation("app secret is empty".into()));
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(options.timeout_ms))
            .danger_accept_invalid_certs(!options.verify_cert)
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            app_key: app_key.to_string(),
            app_secret: app_secret.to_string(),
            options,
            http,
            cache,
            token_locks: DashMap::new(),
        })
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// 获取 accessToken
    ///
    /// 先读缓存，未命中时向 /token/get 请求并写回缓存，
    /// 同一 appKey 的并发未命中只发出一次远端请求
    pub async fn get_access_token(&self) -> Result<String, YsError> {
        let cache_key = self.access_token_cache_key();

        if let Some(token) = self.cache.get(&cache_key).await {
            if !token.is_empty() {
                return Ok(token);
            }
        }

        // 并发去重
        let lock = self
            .token_locks
            .entry(cache_key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // double check
        if let Some(token) = self.cache.get(&cache_key).await {
            if !token.is_empty() {
                debug!("[YS7] accessToken 命中(double check)");
                return Ok(token);
            }
        }

        let params = vec![
            ("appKey".to_string(), self.app_key.clone()),
            ("appSecret".to_string(), self.app_secret.clone()),
        ];
        let result = self.dispatch(&self.url("/token/get"), params).await?;

        if !result.is_success() {
            return Err(YsError::InvalidResponse(format!(
                "获取 accessToken 失败: {}",
                result.msg().unwrap_or_default()
            )));
        }

        let token = result.data_as::<TokenData>()?.access_token;
        if token.is_empty() {
            return Err(YsError::InvalidResponse(
                "token 响应缺少 data.accessToken".into(),
            ));
        }

        self.cache
            .set(&cache_key, &token, ACCESS_TOKEN_LIFETIME_SECS)
            .await;

        Ok(token)
    }

    /// 获取摄像头列表
    ///
    /// page_start 分页起始页，从 0 开始；page_size 分页大小，
    /// 官方默认 10，最大 50
    pub async fn get_camera_list(
        &self,
        page_start: u32,
        page_size: u32,
    ) -> Result<ApiResult, YsError> {
        if page_size > 50 {
            return Err(YsError::Validation(
                "pageSize can't be greater than 50.".into(),
            ));
        }

        let params = vec![
            ("pageStart".to_string(), page_start.to_string()),
            ("pageSize".to_string(), page_size.to_string()),
        ];
        self.post("/live/video/list", params, true).await
    }

    /// 获取单个设备的直播地址信息
    pub async fn get_camera_info(&self, device_serial: &str) -> Result<ApiResult, YsError> {
        let params = vec![("Resource".to_string(), format!("Cam:{}:1", device_serial))];
        self.post("/live/address/get", params, true).await
    }

    /// 添加设备
    ///
    /// device_serial 中的英文字母需为大写，validate_code 为
    /// 设备机身上的六位大写验证码，格式校验交给远端
    pub async fn add_camera(
        &self,
        device_serial: &str,
        validate_code: &str,
    ) -> Result<ApiResult, YsError> {
        let params = vec![
            ("deviceSerial".to_string(), device_serial.to_string()),
            ("validateCode".to_string(), validate_code.to_string()),
        ];
        self.post("/device/add", params, true).await
    }

    /// 删除设备
    pub async fn delete_camera(&self, device_serial: &str) -> Result<ApiResult, YsError> {
        let params = vec![("deviceSerial".to_string(), device_serial.to_string())];
        self.post("/device/delete", params, true).await
    }

    /// 萤石云接口 POST 请求，auth 为 true 时自动附加 accessToken
    async fn post(
        &self,
        path: &str,
        mut params: Vec<(String, String)>,
        auth: bool,
    ) -> Result<ApiResult, YsError> {
        if auth {
            let token = self.get_access_token().await?;
            params.push(("accessToken".to_string(), token));
        }
        self.dispatch(&self.url(path), params).await
    }

    /// 发出表单 POST 并归一化返回结构
    ///
    /// 远端 code 非 "200" 时折叠为合成失败结构返回而不是报错，
    /// 网络错误和非 JSON 响应体作为错误向上传播；单次请求，不重试
    async fn dispatch(
        &self,
        url: &str,
        params: Vec<(String, String)>,
    ) -> Result<ApiResult, YsError> {
        debug!("[YS7] POST {}", url);

        let response = self.http.post(url).form(&params).send().await?;
        let body = response.text().await?;

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            let snippet: String = body.chars().take(200).collect();
            YsError::InvalidResponse(format!("JSON parse error: {} body={}", e, snippet))
        })?;

        if value["code"].as_str() != Some("200") {
            let msg = value["msg"].as_str().unwrap_or_default().to_string();
            warn!("[YS7] 业务错误 code={} msg={}", value["code"], msg);
            return Ok(ApiResult::failure(&msg));
        }

        Ok(ApiResult(value))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.options.endpoint, path)
    }

    fn access_token_cache_key(&self) -> String {
        format!("{}{}", ACCESS_TOKEN_CACHE_PREFIX, self.app_key)
    }
}

impl std::fmt::Debug for YsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YsClient")
            .field("app_key", &self.app_key)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryTokenCache;

    fn make_client(app_key: &str, app_secret: &str) -> Result<YsClient, YsError> {
        YsClient::new(
            app_key,
            app_secret,
            Arc::new(MemoryTokenCache::new()),
            ClientOptions::default(),
        )
    }

    #[test]
    fn test_new_trims_credentials() {
        let client = make_client("  key  ", "  secret  ").unwrap();
        assert_eq!(client.app_key(), "key");
    }

    #[test]
    fn test_new_rejects_empty_app_key() {
        let err = make_client("   ", "secret").unwrap_err();
        assert!(matches!(err, YsError::Validation(_)));
        assert_eq!(err.to_string(), "app id is empty");
    }

    #[test]
    fn test_new_rejects_empty_app_secret() {
        let err = make_client("key", "").unwrap_err();
        assert_eq!(err.to_string(), "app secret is empty");
    }

    #[test]
    fn test_cache_key_is_derived_from_app_key() {
        let client = make_client("myKey", "secret").unwrap();
        assert_eq!(client.access_token_cache_key(), "Ys7AccessToken_myKey");

        let other = make_client("otherKey", "secret").unwrap();
        assert_ne!(
            client.access_token_cache_key(),
            other.access_token_cache_key()
        );
    }

    #[tokio::test]
    async fn test_oversized_page_size_fails_before_io() {
        // endpoint 指向不可达地址，校验未通过时不应发出请求
        let client = YsClient::new(
            "key",
            "secret",
            Arc::new(MemoryTokenCache::new()),
            ClientOptions {
                endpoint: "http://127.0.0.1:9".into(),
                ..Default::default()
            },
        )
        .unwrap();

        let err = client.get_camera_list(0, 51).await.unwrap_err();
        assert!(matches!(err, YsError::Validation(_)));
        assert_eq!(err.to_string(), "pageSize can't be greater than 50.");
    }
}
