/// accessToken 缓存抽象
/// 客户端只依赖 get/set 两个操作，具体存储（进程内、redis 等）
/// 由使用方注入

use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryTokenCache;

/// token 键值缓存能力
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// 读取缓存值，未命中或已过期返回 None
    async fn get(&self, key: &str) -> Option<String>;

    /// 写入缓存值，lifetime_secs 为建议存活时间（秒）
    async fn set(&self, key: &str, value: &str, lifetime_secs: u64);
}
