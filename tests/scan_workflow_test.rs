//! スキャンからテーブル保守までの一連の流れのテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::fs;
use std::path::Path;

use googletest::prelude::*;
use openclaw_i18n::config::ConfigManager;
use openclaw_i18n::i18n::{
    EnvSource,
    LocaleContext,
    LocaleTable,
    TranslateArgs,
    TranslationSet,
    Translator,
};
use openclaw_i18n::indexer::WorkspaceScanner;
use openclaw_i18n::table::{
    KeyReferenceScanner,
    deduplicate,
    find_missing_in_workspace,
};
use openclaw_i18n::Locale;
use tempfile::TempDir;

const PORTS_TS: &str = r#"import { note } from "../terminal/note.js";

export async function ensurePort(port: number, prompts: Prompts) {
  const value = await prompts.text({ message: "Gateway port", initialValue: "18789" });
  if (busy(value)) {
    console.error("Port is already in use");
    throw new Error("Port check failed");
  }
  note(`Using ${value}`, "Gateway port");
}
"#;

const UPDATE_CLI_TS: &str = r#"#!/usr/bin/env node
export function registerUpdate(program: Command) {
  program
    .command("update")
    .description("Check for updates")
    .option("--channel <name>", "Release channel to follow")
    .action(() => runtime.log("${HOME} is used as cache dir"));
  const mode: "stable" | "beta" = "stable";
  return select({ message: "Pick a channel", options: [{ value: "beta", label: "Beta channel" }] });
}
"#;

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read_file(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "src/cli/ports.ts", PORTS_TS);
    write_file(temp_dir.path(), "src/cli/update-cli.ts", UPDATE_CLI_TS);
    write_file(temp_dir.path(), "src/gateway/server.ts", "console.log(\"Not a target dir\");\n");
    temp_dir
}

fn config(root: &Path) -> ConfigManager {
    let mut config = ConfigManager::new(root.to_path_buf());
    config.load_settings().unwrap();
    config
}

async fn scan(root: &Path) -> openclaw_i18n::indexer::ScanReport {
    WorkspaceScanner::new(config(root)).unwrap().run().await.unwrap()
}

#[tokio::test]
async fn test_scan_rewrites_user_facing_literals() {
    let temp_dir = workspace();
    let root = temp_dir.path();

    let report = scan(root).await;

    assert_that!(report.files_scanned, eq(2));
    assert_that!(report.files_failed, is_empty());

    let ports = read_file(root, "src/cli/ports.ts");
    assert_that!(
        ports,
        starts_with(
            "import { note } from \"../terminal/note.js\";\nimport { t } from \"../i18n/index.js\";\n"
        )
    );
    assert_that!(ports, contains_substring("message: t(\"Gateway port\"), initialValue: \"18789\""));
    assert_that!(ports, contains_substring("console.error(t(\"Port is already in use\"));"));
    assert_that!(ports, contains_substring("throw new Error(t(\"Port check failed\"));"));
    assert_that!(ports, contains_substring("note(`Using ${value}`, t(\"Gateway port\"));"));

    let update = read_file(root, "src/cli/update-cli.ts");
    assert_that!(
        update,
        starts_with("#!/usr/bin/env node\nimport { t } from \"../i18n/index.js\";\n")
    );
    assert_that!(update, contains_substring(".command(\"update\")"));
    assert_that!(update, contains_substring(".description(t(\"Check for updates\"))"));
    assert_that!(
        update,
        contains_substring(".option(\"--channel <name>\", t(\"Release channel to follow\"))")
    );
    assert_that!(update, contains_substring("runtime.log(\"${HOME} is used as cache dir\")"));
    assert_that!(update, contains_substring("const mode: \"stable\" | \"beta\" = \"stable\";"));
    assert_that!(update, contains_substring("{ value: \"beta\", label: t(\"Beta channel\") }"));

    assert_that!(read_file(root, "src/gateway/server.ts"), eq("console.log(\"Not a target dir\");\n"));
}

#[tokio::test]
async fn test_scan_is_idempotent() {
    let temp_dir = workspace();
    let root = temp_dir.path();

    scan(root).await;
    let ports = read_file(root, "src/cli/ports.ts");
    let update = read_file(root, "src/cli/update-cli.ts");
    let zh = read_file(root, "src/i18n/locales/zh_CN.ts");
    let en = read_file(root, "src/i18n/locales/en_US.ts");

    let second = scan(root).await;

    assert_that!(second.files_updated, is_empty());
    assert_that!(read_file(root, "src/cli/ports.ts"), eq(ports.as_str()));
    assert_that!(read_file(root, "src/cli/update-cli.ts"), eq(update.as_str()));
    assert_that!(read_file(root, "src/i18n/locales/zh_CN.ts"), eq(zh.as_str()));
    assert_that!(read_file(root, "src/i18n/locales/en_US.ts"), eq(en.as_str()));
}

#[tokio::test]
async fn test_generated_tables_group_by_primary_file() {
    let temp_dir = workspace();
    let root = temp_dir.path();

    scan(root).await;

    let en = read_file(root, "src/i18n/locales/en_US.ts");
    let ports_banner = en.find("// Module: src/cli/ports.ts").unwrap();
    let update_banner = en.find("// Module: src/cli/update-cli.ts").unwrap();
    assert!(ports_banner < update_banner);
    assert_that!(en, contains_substring("// Description: Port management utilities"));
    assert_that!(en, contains_substring("\"Gateway port\": \"Gateway port\","));
    assert_that!(en, contains_substring("\"${HOME} is used as cache dir\": \"${HOME} is used as cache dir\","));

    let zh = read_file(root, "src/i18n/locales/zh_CN.ts");
    assert_that!(zh, contains_substring("// 模块: src/cli/update-cli.ts"));
    assert_that!(zh, contains_substring("// 功能: 更新 CLI 命令"));
    assert_that!(zh, contains_substring("\"Check for updates\": \"[TODO] Check for updates\","));
    assert_that!(zh, not(contains_substring("\"18789\"")));
    assert_that!(zh, not(contains_substring("\"update\"")));
}

#[tokio::test]
async fn test_rescan_preserves_translations() {
    let temp_dir = workspace();
    let root = temp_dir.path();

    scan(root).await;
    let zh_path = "src/i18n/locales/zh_CN.ts";
    let edited = read_file(root, zh_path)
        .replace("\"[TODO] Gateway port\"", "\"网关端口\"")
        .replace("\"[TODO] Check for updates\"", "\"检查更新\"");
    write_file(root, zh_path, &edited);

    let ports = read_file(root, "src/cli/ports.ts");
    write_file(root, "src/cli/ports.ts", &format!("{ports}console.log(\"New message here\");\n"));
    scan(root).await;

    let zh = read_file(root, zh_path);
    assert_that!(zh, contains_substring("\"Gateway port\": \"网关端口\","));
    assert_that!(zh, contains_substring("\"Check for updates\": \"检查更新\","));
    assert_that!(zh, contains_substring("\"New message here\": \"[TODO] New message here\","));
}

#[tokio::test]
async fn test_generated_table_resolves_at_runtime() {
    let temp_dir = workspace();
    let root = temp_dir.path();

    scan(root).await;
    let zh_path = "src/i18n/locales/zh_CN.ts";
    write_file(
        root,
        zh_path,
        &read_file(root, zh_path).replace("\"[TODO] Gateway port\"", "\"网关端口\""),
    );

    let translations = TranslationSet::from_tables([
        (Locale::EnUs, LocaleTable::parse(&read_file(root, "src/i18n/locales/en_US.ts"))),
        (Locale::ZhCn, LocaleTable::parse(&read_file(root, zh_path))),
    ]);
    let context = LocaleContext::with_env(EnvSource::snapshot([("LANG", "zh_CN.UTF-8")]));
    let translator = Translator::new(&translations, &context);

    assert_that!(translator.translate("Gateway port", None, None).as_str(), eq("网关端口"));
    assert_that!(
        translator.translate("Gateway port", None, Some(Locale::EnUs)).as_str(),
        eq("Gateway port")
    );
    assert_that!(
        translator
            .translate("Missing {{what}}", Some(&TranslateArgs::new().with("what", 42)), None)
            .as_str(),
        eq("Missing 42")
    );
}

#[tokio::test]
async fn test_find_missing_after_scan() {
    let temp_dir = workspace();
    let root = temp_dir.path();

    scan(root).await;
    let table_path = root.join("src/i18n/locales/zh_CN.ts");
    let without_port = read_file(root, "src/i18n/locales/zh_CN.ts")
        .lines()
        .filter(|line| !line.contains("\"Port check failed\""))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&table_path, without_port).unwrap();

    let config = config(root);
    let report = find_missing_in_workspace(
        &table_path,
        &config.file_matcher().unwrap(),
        &KeyReferenceScanner::new("t").unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(report.entry_lines(), vec!["  \"Port check failed\": \"Port check failed\",".to_string()]);
}

#[tokio::test]
async fn test_dedup_on_generated_table() {
    let temp_dir = workspace();
    let root = temp_dir.path();

    scan(root).await;
    let zh = read_file(root, "src/i18n/locales/zh_CN.ts");
    let duplicated = zh.replacen(
        "  \"Gateway port\": \"[TODO] Gateway port\",\n",
        "  \"Gateway port\": \"[TODO] Gateway port\",\n  \"Gateway port\": \"网关端口\",\n",
        1,
    );

    let outcome = deduplicate(&duplicated);

    assert_eq!(outcome.removed, vec!["Gateway port".to_string()]);
    assert_that!(outcome.text.as_str(), eq(zh.as_str()));
}

#[tokio::test]
async fn test_config_file_changes_targets_and_function() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        ".openclaw-i18n.json",
        r#"{ "targetDirs": ["app"], "translationFn": "tr", "i18nModule": "app/lang/index.ts", "localesDir": "app/lang/locales", "castToAny": true }"#,
    );
    write_file(root, "app/screens/home.ts", "console.log(\"Welcome back\");\n");

    scan(root).await;

    assert_that!(
        read_file(root, "app/screens/home.ts"),
        eq("import { tr } from \"../lang/index.js\";\nconsole.log(tr(\"Welcome back\") as any);\n")
    );
    assert!(root.join("app/lang/locales/en_US.ts").exists());
}
