//! 設定管理を行うモジュール

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ExtractSettings,
    SETTINGS_FILE_NAME,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ExtractSettings,

    /// 抽出対象のベースディレクトリ
    base: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ExtractSettings::default(), base: None }
    }

    /// 設定を読み込む
    ///
    /// 設定ファイルがなければデフォルト値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, base: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for base directory: {:?}", base);

        let settings = match &base {
            Some(root) => read_settings_file(root)?.unwrap_or_default(),
            None => ExtractSettings::default(),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.base = base;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する（コマンドライン引数での上書き用）
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn update_settings(&mut self, new_settings: ExtractSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ExtractSettings {
        &self.current_settings
    }

    /// ベースディレクトリを取得
    #[must_use]
    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// 言語ファイルのパス（相対パスはベースディレクトリ基準）
    #[must_use]
    pub fn languages_path(&self) -> PathBuf {
        let file = Path::new(&self.current_settings.languages_file);
        match &self.base {
            Some(base) if file.is_relative() => base.join(file),
            _ => file.to_path_buf(),
        }
    }
}

/// ベースディレクトリ直下の設定ファイルを読む（存在しなければ `None`）
fn read_settings_file(base: &Path) -> Result<Option<ExtractSettings>, ConfigError> {
    let path = base.join(SETTINGS_FILE_NAME);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let settings = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), ?settings, "Loaded settings file");
    Ok(Some(settings))
}
