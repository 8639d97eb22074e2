use spost::domain::{BuildConfig, BuildConfigInner, Environment};
use spost::kernel::hooks::{HookError, HookRegistry};
use spost::{BuildError, BuildStep, Configurator};
use spost_logger::{LevelFilter, Logger};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn init_logging() {
    // Only the first test to get here installs the subscriber.
    let _ = Logger::builder().name("spost-tests").level(LevelFilter::DEBUG).init();
}

fn production_step(css_dir: &Path) -> BuildStep {
    Configurator::new(BuildConfig::new(BuildConfigInner {
        environment: Environment::Production,
        css_dir: css_dir.to_path_buf(),
        ..Default::default()
    }))
    .unwrap()
    .into_build_step()
}

fn write(dir: &Path, name: &str, css: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, css).unwrap();
    path
}

#[test]
fn run_processes_every_sheet_in_order() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.css", ".a {\n  color: red;\n}\n");
    let b = write(dir.path(), "b.css", ".b {\n  margin: 0px;\n}\n");

    let processed = production_step(dir.path()).run([&a, &b]).unwrap();

    assert_eq!(processed, 2);
    assert_eq!(fs::read_to_string(&a).unwrap(), ".a{color:red}");
    assert_eq!(fs::read_to_string(&b).unwrap(), ".b{margin:0}");
}

#[test]
fn first_failure_aborts_the_build() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "a.css", ".a { color: red; }");
    let broken = write(dir.path(), "b.css", "..b { color: red; }");
    let later = ".c { color: blue; }";
    let untouched = write(dir.path(), "c.css", later);

    let err = production_step(dir.path()).run([&good, &broken, &untouched]).unwrap_err();

    assert!(matches!(err, BuildError::Hook { .. }));
    assert!(err.to_string().contains("b.css"), "path missing from: {err}");
    assert_eq!(fs::read_to_string(&good).unwrap(), ".a{color:red}");
    assert_eq!(fs::read_to_string(&untouched).unwrap(), later);
}

#[test]
fn rescan_walks_css_dir_and_skips_intermediates() {
    init_logging();
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.css", ".m { color: red; }");
    write(dir.path(), "partials/nav.css", ".n { color: red; }");
    write(dir.path(), "main.css.spost.7-0.tmp", "..not css");
    write(dir.path(), "readme.txt", "..not css either");

    let processed = production_step(dir.path()).rescan(dir.path()).unwrap();

    assert_eq!(processed, 2);
    assert_eq!(fs::read_to_string(dir.path().join("partials/nav.css")).unwrap(), ".n{color:red}");
    assert_eq!(fs::read_to_string(dir.path().join("main.css.spost.7-0.tmp")).unwrap(), "..not css");
}

#[test]
fn rescan_of_missing_dir_is_a_scan_error() {
    let dir = TempDir::new().unwrap();
    let err = production_step(dir.path()).rescan(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, BuildError::Scan { .. }));
}

#[test]
fn custom_hooks_run_after_the_configurator() {
    let dir = TempDir::new().unwrap();
    let sheet = write(dir.path(), "a.css", ".a { color: red; }");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);

    let configurator = Configurator::new(BuildConfig::default()).unwrap();
    let hooks = configurator.hooks().with("record", move |path: &Path| -> Result<(), HookError> {
        let contents = fs::read_to_string(path).map_err(|e| HookError::from(e.to_string()))?;
        recorder.lock().map_err(|_| HookError::from("poisoned"))?.push(contents);
        Ok(())
    });
    let step = BuildStep::new(hooks);

    assert_eq!(step.hooks().names().collect::<Vec<_>>(), vec![spost::HOOK_NAME, "record"]);
    step.saved(&sheet).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![".a{color:red}".to_owned()]);
}

#[test]
fn empty_step_leaves_files_alone() {
    let dir = TempDir::new().unwrap();
    let sheet = write(dir.path(), "a.css", ".a { color: red; }");

    let step = BuildStep::new(HookRegistry::new());
    assert_eq!(step.run([&sheet]).unwrap(), 1);
    assert_eq!(fs::read_to_string(&sheet).unwrap(), ".a { color: red; }");
}
