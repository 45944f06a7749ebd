//! One-line descriptions shown in the banner of each module group.

use std::collections::BTreeMap;

use crate::config::ModuleDescription;
use crate::i18n::Locale;

/// `(file, English, Chinese)` for well-known modules.
const BUILTIN: [(&str, &str, &str); 30] = [
    ("src/wizard/onboarding.ts", "User onboarding wizard flow", "用户首次安装引导流程"),
    ("src/wizard/onboarding.finalize.ts", "Onboarding finalization steps", "引导流程结束步骤"),
    ("src/wizard/onboarding.gateway-config.ts", "Gateway configuration in onboarding", "引导流程中的网关配置"),
    ("src/wizard/session.ts", "Wizard session management", "向导会话管理"),
    ("src/cli/config-cli.ts", "CLI configuration commands", "CLI 配置命令"),
    ("src/cli/cron-cli/register.cron-add.ts", "Register cron job command", "注册定时任务命令"),
    ("src/cli/cron-cli/register.cron-edit.ts", "Edit cron job command", "编辑定时任务命令"),
    ("src/cli/gateway-cli/discover.ts", "Gateway discovery", "网关发现"),
    ("src/cli/nodes-cli/register.canvas.ts", "Canvas node registration", "Canvas 节点注册"),
    ("src/cli/nodes-cli/register.invoke.ts", "Node invocation command", "节点调用命令"),
    ("src/cli/nodes-cli/register.notify.ts", "Notification node registration", "通知节点注册"),
    ("src/cli/nodes-cli/rpc.ts", "RPC node utilities", "RPC 节点工具"),
    ("src/tui/theme/theme.ts", "TUI Theme definitions", "TUI 主题定义"),
    ("src/cli/browser-cli-actions-input/shared.ts", "Browser CLI input actions shared utils", "浏览器 CLI 输入动作共享工具"),
    ("src/cli/browser-cli-extension.ts", "Browser CLI extension management", "浏览器 CLI 扩展管理"),
    ("src/cli/browser-cli-shared.ts", "Browser CLI shared utilities", "浏览器 CLI 共享工具"),
    ("src/cli/browser-cli-state.ts", "Browser CLI state management", "浏览器 CLI 状态管理"),
    ("src/cli/directory-cli.ts", "Directory CLI commands", "目录 CLI 命令"),
    ("src/cli/dns-cli.ts", "DNS CLI commands", "DNS CLI 命令"),
    ("src/cli/logs-cli.ts", "Logs CLI commands", "日志 CLI 命令"),
    ("src/cli/nodes-camera.ts", "Camera node implementation", "摄像头节点实现"),
    ("src/cli/nodes-canvas.ts", "Canvas node implementation", "Canvas 节点实现"),
    ("src/cli/nodes-screen.ts", "Screen recording node implementation", "屏幕录制节点实现"),
    ("src/cli/pairing-cli.ts", "Pairing CLI commands", "配对 CLI 命令"),
    ("src/cli/parse-duration.ts", "Duration parsing utility", "持续时间解析工具"),
    ("src/cli/ports.ts", "Port management utilities", "端口管理工具"),
    ("src/cli/run-main.ts", "Main CLI entry point", "主 CLI 入口点"),
    ("src/cli/system-cli.ts", "System CLI commands", "系统 CLI 命令"),
    ("src/cli/update-cli.ts", "Update CLI commands", "更新 CLI 命令"),
    ("src/cli/webhooks-cli.ts", "Webhooks CLI commands", "Webhooks CLI 命令"),
];

/// Module descriptions keyed by workspace-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptions {
    /// file → description
    entries: BTreeMap<String, ModuleDescription>,
}

impl ModuleDescriptions {
    /// Built-in descriptions with `overrides` layered on top.
    #[must_use]
    pub fn with_overrides(overrides: &BTreeMap<String, ModuleDescription>) -> Self {
        let mut entries: BTreeMap<String, ModuleDescription> = BUILTIN
            .iter()
            .map(|(file, en, zh)| {
                ((*file).to_string(), ModuleDescription { en: (*en).to_string(), zh: (*zh).to_string() })
            })
            .collect();
        entries.extend(overrides.iter().map(|(file, description)| (file.clone(), description.clone())));
        Self { entries }
    }

    /// Description of `file` in `locale`, if one is known and non-empty.
    #[must_use]
    pub fn describe(&self, file: &str, locale: Locale) -> Option<&str> {
        let description = self.entries.get(file)?;
        let text = match locale {
            Locale::EnUs => &description.en,
            Locale::ZhCn => &description.zh,
        };
        (!text.is_empty()).then_some(text.as_str())
    }
}

impl Default for ModuleDescriptions {
    fn default() -> Self {
        Self::with_overrides(&BTreeMap::new())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::english(Locale::EnUs, "Update CLI commands")]
    #[case::chinese(Locale::ZhCn, "更新 CLI 命令")]
    fn builtin_description(#[case] locale: Locale, #[case] expected: &str) {
        let descriptions = ModuleDescriptions::default();

        assert_that!(descriptions.describe("src/cli/update-cli.ts", locale), some(eq(expected)));
    }

    #[rstest]
    fn unknown_module_has_no_description() {
        let descriptions = ModuleDescriptions::default();

        assert_that!(descriptions.describe("src/cli/unknown.ts", Locale::EnUs), none());
    }

    #[rstest]
    fn overrides_replace_and_extend_builtin() {
        let overrides = BTreeMap::from([
            (
                "src/cli/ports.ts".to_string(),
                ModuleDescription { en: "Ports".to_string(), zh: String::new() },
            ),
            (
                "src/tui/app.ts".to_string(),
                ModuleDescription { en: "TUI app".to_string(), zh: "TUI 应用".to_string() },
            ),
        ]);

        let descriptions = ModuleDescriptions::with_overrides(&overrides);

        assert_that!(descriptions.describe("src/cli/ports.ts", Locale::EnUs), some(eq("Ports")));
        assert_that!(descriptions.describe("src/cli/ports.ts", Locale::ZhCn), none());
        assert_that!(descriptions.describe("src/tui/app.ts", Locale::ZhCn), some(eq("TUI 应用")));
        assert_that!(
            descriptions.describe("src/wizard/session.ts", Locale::EnUs),
            some(eq("Wizard session management"))
        );
    }
}
