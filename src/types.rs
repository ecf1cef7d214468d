/// 萤石云 API 类型定义

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::YsError;

/// 统一返回结构
///
/// 远端成功（code 为字符串 "200"）时原样透传响应体；
/// 远端业务失败时为合成的 `{"code":500,...}` 结构，
/// 其中 icon/time 为历史 UI 约定字段，保持兼容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResult(pub Value);

impl ApiResult {
    /// 远端业务失败时的合成返回
    pub(crate) fn failure(msg: &str) -> Self {
        Self(json!({
            "code": 500,
            "data": "",
            "msg": msg,
            "icon": 5,
            "time": 1500,
        }))
    }

    /// code 是否为成功值 "200"
    pub fn is_success(&self) -> bool {
        self.0["code"].as_str() == Some("200")
    }

    pub fn msg(&self) -> Option<&str> {
        self.0["msg"].as_str()
    }

    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// 将 data 字段反序列化为具体类型
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, YsError> {
        let data = self.0.get("data").cloned().unwrap_or(Value::Null);
        serde_json::from_value(data)
            .map_err(|e| YsError::InvalidResponse(format!("data 字段反序列化失败: {}", e)))
    }
}

/// /token/get 返回的 data 字段
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenData {
    #[serde(rename = "accessToken", default)]
    pub access_token: String,
    /// 过期时间戳（毫秒）
    #[serde(rename = "expireTime", default)]
    pub expire_time: i64,
}

/// /live/video/list 返回的单个摄像头
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Camera {
    #[serde(rename = "deviceSerial", default)]
    pub device_serial: String,
    #[serde(rename = "channelNo", default)]
    pub channel_no: i32,
    #[serde(rename = "channelName", default)]
    pub channel_name: String,
    /// 在线状态 1-在线 0-离线
    #[serde(default)]
    pub status: i32,
    #[serde(rename = "isShared", default)]
    pub is_shared: String,
    #[serde(rename = "picUrl", default)]
    pub pic_url: String,
    #[serde(rename = "isEncrypt", default)]
    pub is_encrypt: i32,
    #[serde(rename = "videoLevel", default)]
    pub video_level: i32,
}

/// /live/address/get 返回的直播地址信息
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LiveAddress {
    #[serde(rename = "deviceSerial", default)]
    pub device_serial: String,
    #[serde(rename = "channelNo", default)]
    pub channel_no: i32,
    /// 播放地址
    #[serde(default)]
    pub url: String,
    #[serde(rename = "expireTime", default)]
    pub expire_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_shape() {
        let result = ApiResult::failure("bad");
        assert!(!result.is_success());
        assert_eq!(
            result.0,
            json!({"code": 500, "data": "", "msg": "bad", "icon": 5, "time": 1500})
        );
    }

    #[test]
    fn test_data_as_extracts_token() {
        let result = ApiResult(json!({
            "code": "200",
            "data": {"accessToken": "at.abc", "expireTime": 1697830000000i64}
        }));
        assert!(result.is_success());
        let token: TokenData = result.data_as().unwrap();
        assert_eq!(token.access_token, "at.abc");
        assert_eq!(token.expire_time, 1697830000000);
    }

    #[test]
    fn test_data_as_camera_list_with_missing_fields() {
        let result = ApiResult(json!({
            "code": "200",
            "data": [
                {"deviceSerial": "427734222", "channelNo": 1, "status": 1},
                {"deviceSerial": "427734223"}
            ]
        }));
        let cameras: Vec<Camera> = result.data_as().unwrap();
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0].device_serial, "427734222");
        assert_eq!(cameras[0].status, 1);
        assert_eq!(cameras[1].channel_no, 0);
    }

    #[test]
    fn test_data_as_rejects_mismatched_shape() {
        let result = ApiResult::failure("oops");
        assert!(result.data_as::<TokenData>().is_err());
    }
}
