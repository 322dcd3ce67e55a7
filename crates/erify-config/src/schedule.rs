use anyhow::{anyhow, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 单个报表计划项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 是否启用
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// 触发时刻（本地时间，"HH:MM"）
    #[serde(default = "default_time")]
    pub time: String,

    /// 周报触发日（"monday" 等，仅周报使用）
    #[serde(default)]
    pub day: Option<String>,

    /// 月报触发日（1-31，仅月报使用）
    #[serde(default)]
    pub day_of_month: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn default_time() -> String {
    "09:00".to_string()
}

impl ScheduleEntry {
    /// 解析周报触发日
    pub fn weekday(&self) -> Option<Weekday> {
        self.day
            .as_deref()
            .and_then(|d| Weekday::from_str(d).ok())
    }

    /// 校验计划项（时间格式、周几、月日）
    pub fn validate(&self, label: &str) -> Result<()> {
        parse_hhmm(&self.time)
            .map_err(|e| anyhow!("schedule '{}': {}", label, e))?;

        if let Some(day) = self.day.as_deref() {
            Weekday::from_str(day)
                .map_err(|_| anyhow!("schedule '{}': invalid weekday '{}'", label, day))?;
        }

        if let Some(dom) = self.day_of_month {
            if !(1..=31).contains(&dom) {
                return Err(anyhow!(
                    "schedule '{}': day_of_month {} out of range 1-31",
                    label,
                    dom
                ));
            }
        }

        Ok(())
    }
}

/// 日/周/月三档报表计划
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleTable {
    pub daily: ScheduleEntry,
    pub weekly: ScheduleEntry,
    pub monthly: ScheduleEntry,
}

impl Default for ScheduleTable {
    fn default() -> Self {
        Self {
            daily: ScheduleEntry {
                enabled: true,
                time: default_time(),
                day: None,
                day_of_month: None,
            },
            weekly: ScheduleEntry {
                enabled: true,
                time: default_time(),
                day: Some("monday".to_string()),
                day_of_month: None,
            },
            monthly: ScheduleEntry {
                enabled: true,
                time: default_time(),
                day: None,
                day_of_month: Some(1),
            },
        }
    }
}

impl ScheduleTable {
    pub fn validate(&self) -> Result<()> {
        self.daily.validate("daily")?;
        self.weekly.validate("weekly")?;
        self.monthly.validate("monthly")?;
        Ok(())
    }
}

/// 解析 "HH:MM"（24 小时制）
pub fn parse_hhmm(value: &str) -> Result<(u32, u32)> {
    let (h, m) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid time '{}', expected HH:MM", value))?;

    if h.len() != 2 || m.len() != 2 {
        return Err(anyhow!("invalid time '{}', expected HH:MM", value));
    }

    let hour: u32 = h
        .parse()
        .map_err(|_| anyhow!("invalid hour in '{}'", value))?;
    let minute: u32 = m
        .parse()
        .map_err(|_| anyhow!("invalid minute in '{}'", value))?;

    if hour > 23 || minute > 59 {
        return Err(anyhow!("time '{}' out of range", value));
    }

    Ok((hour, minute))
}
