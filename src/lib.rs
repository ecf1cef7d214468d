//! 萤石云开放平台 API 客户端
//!
//! 封装 accessToken 获取与缓存、摄像头增删查询和 EZOpen 播放地址拼接。
//! 接口规则见官方文档：https://open.ys7.com/doc/zh/book/index/user.html

pub mod cache;
pub mod config;
pub mod error;
pub mod types;
pub mod ys_client;

pub use cache::{MemoryTokenCache, TokenCache};
pub use config::ClientOptions;
pub use error::YsError;
pub use types::{ApiResult, Camera, LiveAddress, TokenData};
pub use ys_client::client::YsClient;
pub use ys_client::ezurl::ez_url;
