use crate::schedule::ScheduleTable;
use anyhow::{anyhow, Context, Result};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 告警阈值（同比跌幅超过阈值即触发）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// 互动率跌幅阈值
    pub engagement_rate_drop: f64,
    /// 流量（会话数）跌幅阈值
    pub traffic_drop: f64,
    /// 转化率跌幅阈值
    pub conversion_rate_drop: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            engagement_rate_drop: 0.2,
            traffic_drop: 0.3,
            conversion_rate_drop: 0.25,
        }
    }
}

/// SMTP 投递配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

impl SmtpConfig {
    /// 从环境变量读取（与收件人无关，只含投递凭据）
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: std::env::var("EMAIL_USER").ok(),
            password: std::env::var("EMAIL_PASSWORD").ok(),
            from: std::env::var("EMAIL_FROM").unwrap_or_else(|_| "noreply@erify.com".to_string()),
        }
    }

    /// 凭据是否齐全
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: None,
            password: None,
            from: "noreply@erify.com".to_string(),
        }
    }
}

/// 营销运营全局配置
///
/// 加载后只读；所有运行期组件持有克隆或引用，不做任何修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    /// 报表收件人
    pub recipients: Vec<String>,

    /// 跟踪的 UTM 活动
    pub campaigns: Vec<String>,

    /// 社媒账号（平台 -> 账号）
    pub social_accounts: BTreeMap<String, String>,

    /// 告警阈值
    pub thresholds: AlertThresholds,

    /// 报表计划
    pub schedule: ScheduleTable,

    /// 报表输出目录
    pub reports_dir: PathBuf,
}

impl Default for OpsConfig {
    fn default() -> Self {
        let mut social_accounts = BTreeMap::new();
        social_accounts.insert("twitter".to_string(), "@erify_official".to_string());
        social_accounts.insert("linkedin".to_string(), "company/erify".to_string());
        social_accounts.insert("facebook".to_string(), "erify.official".to_string());

        Self {
            recipients: vec!["team@erify.com".to_string(), "marketing@erify.com".to_string()],
            campaigns: vec![
                "erify-supreme4-launch".to_string(),
                "erify-vip-referral".to_string(),
                "erify-luxury-fintech".to_string(),
                "erify-neon-crown-series".to_string(),
            ],
            social_accounts,
            thresholds: AlertThresholds::default(),
            schedule: ScheduleTable::default(),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

impl OpsConfig {
    /// 从 TOML 文件加载配置
    ///
    /// 文件缺失、格式错误、字段非法均返回错误，由入口处视为致命。
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Config::builder()
            .add_source(File::new(
                path.to_str().ok_or_else(|| anyhow!("invalid config path"))?,
                FileFormat::Toml,
            ))
            .build()
            .with_context(|| format!("failed to load config {:?}", path))?;

        let parsed: Self = config
            .try_deserialize()
            .with_context(|| format!("failed to parse config {:?}", path))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// 解析运行配置
    ///
    /// `ERIFY_OPS_CONFIG` 指定了文件则必须加载成功，否则使用内置默认值。
    pub fn from_env() -> Result<Self> {
        match std::env::var("ERIFY_OPS_CONFIG") {
            Ok(path) => Self::load(path),
            Err(_) => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        self.schedule.validate()?;

        if self.recipients.is_empty() {
            return Err(anyhow!("recipients must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = OpsConfig::default();
        assert_eq!(config.recipients.len(), 2);
        assert_eq!(config.campaigns.len(), 4);
        assert_eq!(config.social_accounts.len(), 3);
        assert_eq!(config.thresholds.engagement_rate_drop, 0.2);
        assert_eq!(config.thresholds.traffic_drop, 0.3);
        assert_eq!(config.thresholds.conversion_rate_drop, 0.25);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("ops.toml");
        let config_content = r#"
recipients = ["growth@erify.com"]
reports_dir = "out/reports"

[thresholds]
traffic_drop = 0.5

[schedule.monthly]
enabled = false
time = "07:30"
day_of_month = 15
"#;
        fs::write(&config_path, config_content).unwrap();

        let config = OpsConfig::load(&config_path).unwrap();
        assert_eq!(config.recipients, vec!["growth@erify.com".to_string()]);
        assert_eq!(config.reports_dir, PathBuf::from("out/reports"));
        assert_eq!(config.thresholds.traffic_drop, 0.5);
        // 未覆盖的阈值保持默认
        assert_eq!(config.thresholds.engagement_rate_drop, 0.2);
        assert!(!config.schedule.monthly.enabled);
        assert_eq!(config.schedule.monthly.time, "07:30");
        assert_eq!(config.schedule.monthly.day_of_month, Some(15));
        // 日报保持默认
        assert!(config.schedule.daily.enabled);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(OpsConfig::load(&missing).is_err());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "recipients = [unterminated").unwrap();
        assert!(OpsConfig::load(&config_path).is_err());
    }

    #[test]
    fn test_load_invalid_schedule_fails() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("ops.toml");
        fs::write(&config_path, "[schedule.daily]\ntime = \"25:00\"\n").unwrap();
        assert!(OpsConfig::load(&config_path).is_err());
    }
}
