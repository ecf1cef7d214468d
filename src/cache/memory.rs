/// 进程内 token 缓存
/// DashMap + 写入时间戳实现 TTL，读取未命中时顺手清理过期条目

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Instant;

use super::TokenCache;

struct CachedEntry {
    value: String,
    created_at: Instant,
    lifetime_secs: u64,
}

impl CachedEntry {
    fn expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.lifetime_secs
    }
}

/// 默认的进程内缓存实现
#[derive(Default)]
pub struct MemoryTokenCache {
    entries: DashMap<String, CachedEntry>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, key: &str) -> Option<String> {
        let hit = self.entries.get(key).and_then(|entry| {
            if entry.expired() {
                None
            } else {
                Some(entry.value.clone())
            }
        });
        if hit.is_none() {
            self.entries.retain(|_, v| !v.expired());
        }
        hit
    }

    async fn set(&self, key: &str, value: &str, lifetime_secs: u64) {
        self.entries.insert(
            key.to_string(),
            CachedEntry {
                value: value.to_string(),
                created_at: Instant::now(),
                lifetime_secs,
            },
        );
    }
}
