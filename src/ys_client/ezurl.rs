/// EZOpen 协议网址拼接
///
/// 网址格式：
///   ezopen://[password@]open.ys7.com/{deviceSn}/{channelNo}[.hd].{type}
///
/// videoLevel 0/1（流畅、均衡）不带清晰度后缀，2/3（高清、超清）
/// 及其它值统一带 .hd 后缀

use crate::error::YsError;

/// EZOpen 协议固定主机名
const EZOPEN_HOST: &str = "open.ys7.com";

/// 拼接 EZOpen 播放地址，纯计算不发请求
///
/// stream_type 仅支持 live（实时视频）和 rec（录像回放），大小写不敏感；
/// password 为设备标签上的六位验证码，为空时省略整个密码段
pub fn ez_url(
    device_sn: &str,
    channel_no: i32,
    video_level: i32,
    stream_type: &str,
    password: &str,
) -> Result<String, YsError> {
    let stream_type = stream_type.to_lowercase();
    if stream_type != "live" && stream_type != "rec" {
        return Err(YsError::Validation("Invalid type.".into()));
    }

    let level_suffix = if video_level == 0 || video_level == 1 {
        ""
    } else {
        ".hd"
    };
    let auth = if password.is_empty() {
        String::new()
    } else {
        format!("{}@", password)
    };

    Ok(format!(
        "ezopen://{}{}/{}/{}{}.{}",
        auth, EZOPEN_HOST, device_sn, channel_no, level_suffix, stream_type
    ))
}
