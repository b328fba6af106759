//! Integration test: all twelve checks against fixture projects.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use twelve_factor_checks::{validate_all, validate_with_config, CheckResult, Config, Factor};
use twelve_factor_core::report;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (relative, content) in files {
        write(dir.path(), relative, content.as_bytes());
    }
    dir
}

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn validate(dir: &TempDir) -> CheckResult {
    validate_all(dir.path()).expect("validation should run")
}

fn messages<'a>(result: &'a CheckResult, factor: Factor) -> Vec<&'a str> {
    result
        .findings_for(factor)
        .into_iter()
        .map(|f| f.message.as_str())
        .collect()
}

#[test]
fn empty_project() {
    let dir = project(&[]);
    let result = validate(&dir);

    let violations: Vec<&str> = result.violations.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        violations,
        vec!["No Git repository found", "No dependency manifest found"]
    );
    assert_eq!(result.counts(), (0, 8, 2));
    assert_eq!(result.score(), Some(0.0));
}

#[test]
fn pinned_requirements_without_lock_file() {
    let dir = project(&[("requirements.txt", "flask==3.0.0\ngunicorn==22.0.0\n")]);
    let result = validate(&dir);

    assert_eq!(
        messages(&result, Factor::Dependencies),
        vec![
            "All Python dependencies have exact versions",
            "No lock file found - exact versions not guaranteed",
        ]
    );
}

#[test]
fn procfile_with_web_and_worker() {
    let dir = project(&[("Procfile", "web: npm start\nworker: node jobs.js\n")]);
    let result = validate(&dir);

    assert_eq!(
        messages(&result, Factor::Concurrency),
        vec!["Procfile defines process types", "Multiple process types defined"]
    );
}

#[test]
fn single_hardcoded_secret() {
    let dir = project(&[
        (".env.example", "API_KEY=\n"),
        ("app.py", "API_KEY = \"abcd1234efgh\"\n"),
    ]);
    let result = validate(&dir);

    let config_warnings: Vec<&str> = result
        .warnings
        .iter()
        .filter(|f| f.factor == Factor::Config)
        .map(|f| f.message.as_str())
        .collect();
    assert_eq!(config_warnings, vec!["Hardcoded secrets found in app.py"]);
}

#[test]
fn file_logging_in_three_languages() {
    let dir = project(&[
        ("app.py", "logging.FileHandler('app.log')\n"),
        ("server.js", "// see FileHandler docs\n"),
        ("Main.java", "Handler h = new FileHandler(\"main.log\");\n"),
    ]);
    let result = validate(&dir);

    let logs: Vec<_> = result
        .violations
        .iter()
        .filter(|f| f.factor == Factor::Logs)
        .collect();
    assert_eq!(logs.len(), 3);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = project(&[
        ("package.json", r#"{"dependencies": {"express": "^4.19.2"}}"#),
        ("index.js", "app.listen(process.env.PORT)\nconsole.log('up')\n"),
        ("Dockerfile", "FROM node:20\nCOPY . .\nRUN npm ci\n"),
    ]);

    assert_eq!(validate(&dir), validate(&dir));
}

#[test]
fn score_counts_passes_against_violations() {
    let dir = project(&[(".gitignore", "target/\n")]);
    fs::create_dir(dir.path().join(".git")).unwrap();
    let result = validate(&dir);

    assert_eq!(result.passes.len(), 2);
    assert_eq!(result.violations.len(), 1);
    let score = result.score().unwrap();
    assert!((score - 200.0 / 3.0).abs() < 1e-9);
    assert!(report::render(&result).contains("Score: 66.7%"));
}

#[test]
fn binary_files_do_not_change_outcomes() {
    let files = [
        ("requirements.txt", "flask==3.0.0\n"),
        ("app.py", "import os\nurl = os.environ['DATABASE_URL']\n"),
    ];
    let clean = project(&files);
    let noisy = project(&files);
    write(noisy.path(), "assets/logo.py", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
    write(noisy.path(), "vendor/blob.js", &[0xc3, 0x28]);

    assert_eq!(validate(&clean), validate(&noisy));
}

#[test]
fn excluded_directories_are_not_scanned() {
    let dir = project(&[("node_modules/pkg/index.js", "process.on('SIGTERM', stop)\n")]);
    let result = validate(&dir);

    assert_eq!(
        messages(&result, Factor::Disposability),
        vec!["No graceful shutdown handlers detected"]
    );
}

#[test]
fn disabled_checks_are_skipped() {
    let dir = project(&[("app.py", "logging.FileHandler('app.log')\n")]);
    let config = Config::parse("[checks.logs]\nenabled = false\n").unwrap();
    let result = validate_with_config(dir.path(), config).unwrap();

    assert!(result.findings_for(Factor::Logs).is_empty());
    assert!(!result.findings_for(Factor::Codebase).is_empty());
}

#[test]
fn configured_patterns_reach_checks() {
    let dir = project(&[("main.py", "uvicorn.run(app, port=int(os.environ['PORT']))\n")]);
    let config = Config::parse(
        r#"
[[patterns.port-binding]]
regex = 'uvicorn\.run\(.*os\.environ'
description = "Uvicorn PORT configuration"
"#,
    )
    .unwrap();
    let result = validate_with_config(dir.path(), config).unwrap();

    assert_eq!(
        messages(&result, Factor::PortBinding),
        vec!["Uvicorn PORT configuration found"]
    );
}

#[test]
fn invalid_configured_pattern_fails_before_checks_run() {
    let dir = project(&[]);
    let config = Config::parse(
        r#"
[[patterns.signal-handler]]
regex = '(?<=kill)TERM'
description = "lookbehind"
"#,
    )
    .unwrap();

    assert!(validate_with_config(dir.path(), config).is_err());
}

#[cfg(unix)]
#[test]
fn unreadable_files_do_not_change_outcomes() {
    use std::os::unix::fs::PermissionsExt;

    let files = [("requirements.txt", "flask==3.0.0\n")];
    let clean = project(&files);
    let locked = project(&files);
    let app = locked.path().join("app.py");
    write(
        locked.path(),
        "app.py",
        b"logging.FileHandler('app.log')\nAPI_KEY = \"abcd1234efgh\"\n",
    );
    fs::set_permissions(&app, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to root.
    if fs::read(&app).is_ok() {
        fs::set_permissions(&app, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let result = validate(&locked);
    fs::set_permissions(&app, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(result, validate(&clean));
}

#[cfg(unix)]
#[test]
fn named_pipe_procfile_does_not_block_validation() {
    use std::sync::mpsc;
    use std::time::Duration;

    let dir = project(&[("package.json", r#"{"dependencies": {"express": "4.19.2"}}"#)]);
    for name in ["Procfile", "Dockerfile", "docker-compose.yml"] {
        let status = std::process::Command::new("mkfifo")
            .arg(dir.path().join(name))
            .status()
            .unwrap();
        assert!(status.success());
    }

    let root = dir.path().to_path_buf();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(validate_all(&root).map(|result| result.counts()));
    });

    let counts = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("validation should finish")
        .unwrap();
    assert!(counts.0 > 0);
}
