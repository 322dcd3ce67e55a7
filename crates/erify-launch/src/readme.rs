use anyhow::Result;
use chrono::Utc;
use erify_config::Mode;
use std::fs;
use std::path::Path;
use tracing::info;

const SIM_HEADING: &str = "## 🧪 ERIFY Elite Launch - Simulation Mode";
const LIVE_HEADING: &str = "## 🚀 ERIFY Elite Launch - LIVE";

/// 渲染指定模式的发布段落（不含前后空行，以 "---" 结尾）
pub fn render_section(mode: Mode, timestamp: &str) -> String {
    match mode {
        Mode::Simulation => format!(
            "{SIM_HEADING}\n\
             \n\
             **Status**: Testing Phase  \n\
             **Last Updated**: {timestamp}  \n\
             **Branch**: launch-sim-test  \n\
             \n\
             🔬 **Simulation Mode Active**\n\
             - Testing communication channels\n\
             - Validating automation pipelines\n\
             - Preparing for production launch\n\
             \n\
             ### Test Configuration\n\
             - Slack: #erify-test\n\
             - Discord: Private test server\n\
             - Email: test@erify.com\n\
             - GitHub: launch-sim-test branch\n\
             \n\
             ---"
        ),
        Mode::Production => format!(
            "{LIVE_HEADING}\n\
             \n\
             **Status**: 🎉 **OFFICIALLY LAUNCHED!**  \n\
             **Launch Date**: {timestamp}  \n\
             **Branch**: main  \n\
             \n\
             🚀 **ERIFY Elite is now live!**\n\
             - Elite verification services active\n\
             - Full stakeholder communications sent\n\
             - Production systems operational\n\
             \n\
             ### Production Configuration\n\
             - Slack: #erify-announcements\n\
             - Discord: Live community server\n\
             - Email: Full stakeholders list\n\
             - GitHub: main branch\n\
             \n\
             ---"
        ),
    }
}

/// 删除已存在的发布段落（任一模式的标题起，至 "---" 或下一个二级标题止）
fn strip_section(content: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut skipping = false;

    for line in content.lines() {
        if line.starts_with(SIM_HEADING) || line.starts_with(LIVE_HEADING) {
            skipping = true;
        } else if skipping && line.starts_with("## ") {
            skipping = false;
            out.push(line);
        } else if skipping && line.trim() == "---" {
            skipping = false;
        } else if !skipping {
            out.push(line);
        }
    }

    out.join("\n")
}

/// 将发布段落写入 Markdown 文本
///
/// 先移除旧段落再于标题块之后插入新段落，空行归一，保证幂等：
/// 相同段落重复应用不会再改变文本。
pub fn apply_section(content: &str, section: &str) -> String {
    let stripped = strip_section(content);
    let lines: Vec<&str> = stripped.lines().collect();

    let title_idx = lines.iter().position(|l| l.starts_with("# "));

    let mut out: Vec<&str> = Vec::new();
    match title_idx {
        Some(title) => {
            // 标题块：标题行及其后到第一个二级标题之前的内容
            let mut insert_pos = title + 1;
            while insert_pos < lines.len() && !lines[insert_pos].starts_with("##") {
                insert_pos += 1;
            }

            let mut head: Vec<&str> = lines[..insert_pos].to_vec();
            while head.last().is_some_and(|l| l.trim().is_empty()) {
                head.pop();
            }

            out.extend(head);
            out.push("");
            out.extend(section.lines());
            out.push("");
            out.extend(&lines[insert_pos..]);
        }
        None => {
            // 无一级标题：段落追加到末尾
            let mut head = lines;
            while head.last().is_some_and(|l| l.trim().is_empty()) {
                head.pop();
            }
            out.extend(head);
            out.push("");
            out.extend(section.lines());
        }
    }

    let mut result = out.join("\n");
    result.push('\n');
    result
}

/// 更新 README 文件，返回内容是否发生变化
pub fn update_readme(path: impl AsRef<Path>, mode: Mode) -> Result<bool> {
    let path = path.as_ref();

    let current = if path.exists() {
        fs::read_to_string(path)?
    } else {
        "# README\n\n".to_string()
    };

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    let section = render_section(mode, &timestamp);
    let updated = apply_section(&current, &section);

    let changed = updated != current;
    fs::write(path, &updated)?;

    info!("README updated for {} mode (changed: {})", mode, changed);
    Ok(changed)
}
