use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Weekday};
use erify_config::{parse_hhmm, ScheduleEntry};
use erify_report::ReportKind;

/// 一条报表计划任务
///
/// 调度循环每分钟查询一次 `is_due`；同一天最多触发一次。
/// 停机期间错过的触发点不补跑。
#[derive(Debug, Clone)]
pub struct Job {
    pub kind: ReportKind,
    pub entry: ScheduleEntry,
    pub last_fired: Option<NaiveDate>,
}

impl Job {
    pub fn new(kind: ReportKind, entry: ScheduleEntry) -> Self {
        Self {
            kind,
            entry,
            last_fired: None,
        }
    }

    /// 当前时刻是否应当触发
    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        if !self.entry.enabled {
            return false;
        }

        // 配置在加载时已校验；异常时间串视为不触发
        let Ok((hour, minute)) = parse_hhmm(&self.entry.time) else {
            return false;
        };

        if self.last_fired == Some(now.date_naive()) {
            return false;
        }

        match self.kind {
            ReportKind::Daily => {}
            ReportKind::Weekly => {
                let weekday = self.entry.weekday().unwrap_or(Weekday::Mon);
                if now.weekday() != weekday {
                    return false;
                }
            }
            ReportKind::Monthly => {
                // 月报在每天的触发时刻检查日历日是否匹配
                let day_of_month = self.entry.day_of_month.unwrap_or(1);
                if now.day() != day_of_month {
                    return false;
                }
            }
        }

        now.hour() * 60 + now.minute() >= hour * 60 + minute
    }

    /// 记录已触发（无论任务本身成败，不在同一天重试）
    pub fn mark_fired(&mut self, date: NaiveDate) {
        self.last_fired = Some(date);
    }
}
