//! Replays catalog examples through the registry for `oracle verify`.

use tracing::{debug, info};

use crate::core::compare::{Mismatch, first_mismatch};
use crate::core::error::GenerateError;
use crate::core::item::LevelId;
use crate::core::registry::LevelRegistry;
use crate::io::levels::LevelCatalog;

/// Why one example failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Mismatch(Mismatch),
    MalformedInput(GenerateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFailure {
    pub level: LevelId,
    /// Position of the example within the level's `examples`.
    pub example: usize,
    pub kind: FailureKind,
}

/// Aggregate result of replaying every example.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub passed: usize,
    pub failures: Vec<ExampleFailure>,
    /// Levels with examples but no transform, in ascending order.
    pub skipped: Vec<LevelId>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate every catalog example and compare with its recorded outbox.
pub fn verify_catalog(catalog: &LevelCatalog, registry: &LevelRegistry) -> VerifyReport {
    let mut report = VerifyReport::default();
    for level in catalog.levels() {
        if level.examples.is_empty() {
            continue;
        }
        if !registry.is_implemented(level.number) {
            debug!(level = level.number, "skipping examples of unimplemented level");
            report.skipped.push(level.number);
            continue;
        }
        for (example_index, example) in level.examples.iter().enumerate() {
            let kind = match registry.generate(level.number, &example.inbox) {
                Ok(outbox) => match first_mismatch(&example.outbox, &outbox) {
                    None => {
                        report.passed += 1;
                        continue;
                    }
                    Some(at) => FailureKind::Mismatch(at),
                },
                Err(err) => FailureKind::MalformedInput(err),
            };
            report.failures.push(ExampleFailure {
                level: level.number,
                example: example_index,
                kind,
            });
        }
    }
    info!(
        passed = report.passed,
        failed = report.failures.len(),
        skipped = report.skipped.len(),
        "catalog verified"
    );
    report
}
