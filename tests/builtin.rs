use minshell::{Shell, Status, config::Config};
use std::{
    env,
    ffi::OsString,
    fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

/// カレントディレクトリと$HOMEはプロセス全体で共有されるため、テストを直列化
static LOCK: Mutex<()> = Mutex::new(());

/// テスト終了時にカレントディレクトリと$HOMEを元に戻す
struct Restore {
    cwd: PathBuf,
    home: Option<OsString>,
    _guard: MutexGuard<'static, ()>,
}

impl Restore {
    fn new() -> Self {
        let guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
        Restore {
            cwd: env::current_dir().unwrap(),
            home: env::var_os("HOME"),
            _guard: guard,
        }
    }
}

impl Drop for Restore {
    fn drop(&mut self) {
        env::set_current_dir(&self.cwd).unwrap();
        match &self.home {
            Some(home) => unsafe { env::set_var("HOME", home) },
            None => unsafe { env::remove_var("HOME") },
        }
    }
}

fn shell() -> Shell {
    Shell::new(Config::default())
}

fn cwd() -> PathBuf {
    env::current_dir().unwrap().canonicalize().unwrap()
}

#[test]
fn cd_without_arguments_goes_home() {
    let _restore = Restore::new();
    let home = tempfile::tempdir().unwrap();
    unsafe { env::set_var("HOME", home.path()) };

    assert_eq!(shell().run_line("cd"), Status::Success);
    assert_eq!(cwd(), home.path().canonicalize().unwrap());
}

#[test]
fn cd_tilde_goes_home() {
    let _restore = Restore::new();
    let home = tempfile::tempdir().unwrap();
    unsafe { env::set_var("HOME", home.path()) };

    assert_eq!(shell().run_line("cd ~"), Status::Success);
    assert_eq!(cwd(), home.path().canonicalize().unwrap());
}

#[test]
fn cd_with_invalid_home() {
    let _restore = Restore::new();
    let before = cwd();

    unsafe { env::set_var("HOME", "") };
    assert_eq!(shell().run_line("cd"), Status::Failure);

    unsafe { env::remove_var("HOME") };
    assert_eq!(shell().run_line("cd ~"), Status::Failure);
    assert_eq!(cwd(), before);
}

#[test]
fn cd_to_directory() {
    let _restore = Restore::new();
    let dir = tempfile::tempdir().unwrap();
    let line = format!("cd {}", dir.path().display());

    assert_eq!(shell().run_line(&line), Status::Success);
    assert_eq!(cwd(), dir.path().canonicalize().unwrap());
}

#[test]
fn cd_too_many_arguments() {
    let _restore = Restore::new();
    let before = cwd();
    assert_eq!(shell().run_line("cd a b"), Status::Failure);
    assert_eq!(cwd(), before);
}

#[test]
fn cd_missing_directory() {
    let _restore = Restore::new();
    let before = cwd();
    assert_eq!(
        shell().run_line("cd /nonexistent/minshell/dir"),
        Status::Failure
    );
    assert_eq!(cwd(), before);
}

#[test]
fn cd_ignores_redirects() {
    let _restore = Restore::new();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let line = format!("cd {} > {}", dir.path().display(), out.display());

    assert_eq!(shell().run_line(&line), Status::Success);
    assert_eq!(cwd(), dir.path().canonicalize().unwrap());
    assert!(!out.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn cd_to_non_utf8_home() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let _restore = Restore::new();
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join(OsStr::from_bytes(b"home\xff"));
    fs::create_dir(&home).unwrap();
    unsafe { env::set_var("HOME", &home) };

    assert_eq!(shell().run_line("cd"), Status::Success);
    assert_eq!(cwd(), home.canonicalize().unwrap());
}

#[test]
fn cd_in_pipeline_feeds_nothing() {
    let _restore = Restore::new();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let line = format!("cd {} | cat > {}", dir.path().display(), out.display());

    // cdは出力しないため、catは空の入力を受け取る
    assert_eq!(shell().run_line(&line), Status::Success);
    assert_eq!(cwd(), dir.path().canonicalize().unwrap());
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
}

#[test]
fn exit_stops_the_shell() {
    let _restore = Restore::new();
    assert_eq!(shell().run_line("exit"), Status::Exit);
    assert_eq!(shell().run_line("exit 3 > /dev/null"), Status::Exit);
}
