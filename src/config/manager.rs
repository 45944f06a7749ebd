//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    FileMatcher,
    MatcherError,
    ToolSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ToolSettings,

    /// ワークスペースのルートパス
    workspace_root: PathBuf,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { current_settings: ToolSettings::default(), workspace_root }
    }

    /// ワークスペースの設定を読み込む
    ///
    /// 設定ファイルがない場合はデフォルト値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", self.workspace_root);

        let settings =
            loader::load_from_workspace(&self.workspace_root)?.map_or_else(ToolSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            });

        self.update_settings(settings)
    }

    /// 設定を差し替える
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn update_settings(&mut self, new_settings: ToolSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ToolSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// 現在の設定から `FileMatcher` を作成
    ///
    /// # Errors
    /// 不正なパターン
    pub fn file_matcher(&self) -> Result<FileMatcher, MatcherError> {
        FileMatcher::new(self.workspace_root.clone(), &self.current_settings)
    }

    /// ロケールテーブルのパス（例: `src/i18n/locales/zh_CN.ts`）
    #[must_use]
    pub fn locale_table_path(&self, locale: crate::i18n::Locale) -> PathBuf {
        self.workspace_root
            .join(&self.current_settings.locales_dir)
            .join(format!("{}.ts", locale.as_str()))
    }

    /// i18n モジュールのあるディレクトリ
    #[must_use]
    pub fn i18n_module_dir(&self) -> PathBuf {
        let module = self.workspace_root.join(&self.current_settings.i18n_module);
        module.parent().map_or_else(|| self.workspace_root.clone(), Path::to_path_buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::i18n::Locale;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new(PathBuf::from("/workspace"));

        assert_eq!(manager.get_settings().translation_fn, "t");
        assert_eq!(manager.workspace_root(), Path::new("/workspace"));
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"localesDir": "i18n/locales"}"#;
        fs::write(temp_dir.path().join(".openclaw-i18n.json"), config_content).unwrap();

        let mut manager = ConfigManager::new(temp_dir.path().to_path_buf());
        let result = manager.load_settings();

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().locales_dir, "i18n/locales");
        assert_eq!(
            manager.locale_table_path(Locale::ZhCn),
            temp_dir.path().join("i18n/locales/zh_CN.ts")
        );
    }

    /// load_settings: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new(temp_dir.path().to_path_buf());
        let result = manager.load_settings();

        assert!(result.is_ok());
        assert_eq!(manager.get_settings(), &ToolSettings::default());
        assert_eq!(manager.i18n_module_dir(), temp_dir.path().join("src/i18n"));
    }

    /// load_settings: 無効な設定ファイルはエラー
    #[rstest]
    fn test_load_settings_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".openclaw-i18n.json"), r#"{"targetDirs": []}"#).unwrap();

        let mut manager = ConfigManager::new(temp_dir.path().to_path_buf());
        let result = manager.load_settings();

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }

    /// update_settings: 無効な設定でエラー
    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new(PathBuf::from("/workspace"));
        let new_settings = ToolSettings { translation_fn: String::new(), ..ToolSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
        assert_eq!(manager.get_settings().translation_fn, "t");
    }
}
