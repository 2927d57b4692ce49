use minshell::{Shell, config::Config, helper::SHELL, logging};
use std::process::exit;

fn main() {
    // 設定ファイルの読み込みに失敗しても既定値で起動
    let config = match Config::default_path() {
        Some(path) => Config::load(&path).unwrap_or_else(|e| {
            eprintln!("{SHELL}: {}: {e}", path.display());
            Config::default()
        }),
        None => Config::default(),
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("{SHELL}: failed to initialize logging: {e}");
    }

    let sh = Shell::new(config);
    match sh.run() {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{SHELL}: {e}");
            exit(1);
        }
    }
}
