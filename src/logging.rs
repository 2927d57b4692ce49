use crate::{config::LogConfig, helper::DynError};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::{fs::OpenOptions, str::FromStr};

/// 設定に従いファイルへのロガーを登録。
/// 出力先が未指定の場合は何もしない。シェル自身の標準エラー出力とは混ぜない
pub fn init(config: &LogConfig) -> Result<(), DynError> {
    let Some(path) = &config.file else {
        return Ok(());
    };

    let level = LevelFilter::from_str(&config.level)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}
