//! Fixture trees for check unit tests.

use std::fs;
use tempfile::TempDir;
use twelve_factor_core::{Check, Finding, FindingKind, PatternTable, ProjectContext, ScanConfig};

pub struct Fixture {
    dir: TempDir,
    scan: ScanConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
            scan: ScanConfig::default(),
        }
    }

    pub fn file(self, relative: &str, content: &str) -> Self {
        self.bytes(relative, content.as_bytes())
    }

    pub fn bytes(self, relative: &str, content: &[u8]) -> Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, content).expect("write fixture");
        self
    }

    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(relative)).expect("create dir");
        self
    }

    pub fn scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn run(&self, check: &dyn Check) -> Vec<Finding> {
        let patterns = PatternTable::builtin().expect("built-in patterns compile");
        let ctx = ProjectContext::new(self.dir.path(), &self.scan, &patterns);
        check.check(&ctx)
    }
}

pub fn messages(findings: &[Finding], kind: FindingKind) -> Vec<&str> {
    findings
        .iter()
        .filter(|f| f.kind == kind)
        .map(|f| f.message.as_str())
        .collect()
}

pub fn passes(findings: &[Finding]) -> Vec<&str> {
    messages(findings, FindingKind::Pass)
}

pub fn warnings(findings: &[Finding]) -> Vec<&str> {
    messages(findings, FindingKind::Warning)
}

pub fn violations(findings: &[Finding]) -> Vec<&str> {
    messages(findings, FindingKind::Violation)
}
