use serde::{Deserialize, Serialize};
use std::fmt;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 仿真（测试渠道）
    Simulation,
    /// 生产（正式渠道）
    Production,
}

impl Mode {
    /// 从环境变量判定运行模式
    ///
    /// `ERIFY_SIMULATION_MODE=true` 优先，其次 `ERIFY_PRODUCTION_MODE=true`，
    /// 其余情况一律回落到仿真模式。
    pub fn from_env() -> Self {
        if env_flag("ERIFY_SIMULATION_MODE") {
            Mode::Simulation
        } else if env_flag("ERIFY_PRODUCTION_MODE") {
            Mode::Production
        } else {
            // 默认仿真，避免误发正式通知
            Mode::Simulation
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Simulation => "simulation",
            Mode::Production => "production",
        }
    }

    /// 标题形式（"Simulation" / "Production"）
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Simulation => "Simulation",
            Mode::Production => "Production",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mode::Simulation => "🧪",
            Mode::Production => "🚀",
        }
    }

    pub fn is_simulation(&self) -> bool {
        matches!(self, Mode::Simulation)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
