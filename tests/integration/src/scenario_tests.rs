//! End-to-end regeneration scenarios.
//!
//! Each test runs the complete flow against a temp directory: first
//! generation stamps the target, the "developer" edits the on-disk copy,
//! and a second generation merges, blocks, or conflicts.

use pretty_assertions::assert_eq;
use regen_content::{HashedDocument, ProtectedRegionMarkers};
use regen_fs::{FileGenerator, GeneratorConfig, OutputMode, WriteOutcome, conflict_path};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const REGION_START: &str = "    // protected region execute on begin";
const REGION_END: &str = "    // protected region execute end";

/// A small generated class with one protected region, the shape the
/// original correctness scenarios used.
fn generated(target_temperature: i32) -> String {
    [
        "public class TemperatureController {".to_string(),
        String::new(),
        format!("    public int target = {target_temperature};"),
        String::new(),
        "    public int execute(int temperature) {".to_string(),
        REGION_START.to_string(),
        REGION_END.to_string(),
        "    }".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

struct Scenario {
    _dir: TempDir,
    target: PathBuf,
    generator: FileGenerator,
}

impl Scenario {
    /// Generate the initial file and hand back the harness.
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("TemperatureController.java");
        let generator = FileGenerator::new(GeneratorConfig::default());
        let outcome = generator
            .generate(&target, &generated(21), OutputMode::Merge)
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        Self {
            _dir: dir,
            target,
            generator,
        }
    }

    fn on_disk(&self) -> String {
        fs::read_to_string(&self.target).unwrap()
    }

    fn edit(&self, f: impl FnOnce(String) -> String) {
        fs::write(&self.target, f(self.on_disk())).unwrap();
    }

    fn regenerate(&self, contents: &str) -> WriteOutcome {
        self.generator
            .generate(&self.target, contents, OutputMode::Merge)
            .unwrap()
    }

    fn body(&self) -> String {
        HashedDocument::decode(&self.on_disk(), &ProtectedRegionMarkers)
            .unwrap()
            .body()
            .to_string()
    }
}

/// Scenario 1: a line added into the generated lines is preserved without
/// protected region markers.
#[test]
fn added_line_survives_regeneration() {
    let s = Scenario::new();
    s.edit(|c| c.replacen("public class", "// reviewed\npublic class", 1));

    assert_eq!(s.regenerate(&generated(21)), WriteOutcome::Written);
    assert!(s.body().starts_with("// reviewed\n"));
    assert!(s.body().contains("public class TemperatureController"));
}

/// Scenario 2: a modified generated line blocks the regeneration.
#[test]
fn modified_generated_line_blocks() {
    let s = Scenario::new();
    s.edit(|c| c.replacen("public int target = 21;", "public int target = 99;", 1));
    let before = s.on_disk();

    assert_eq!(s.regenerate(&generated(21)), WriteOutcome::BlockedModified);
    assert_eq!(s.on_disk(), before);
}

/// Scenario 3: a deleted generated line blocks the regeneration.
#[test]
fn deleted_generated_line_blocks() {
    let s = Scenario::new();
    s.edit(|c| c.replacen("    public int target = 21;\n", "", 1));
    let before = s.on_disk();

    assert_eq!(s.regenerate(&generated(21)), WriteOutcome::BlockedModified);
    assert_eq!(s.on_disk(), before);
}

/// Scenario 4: the protected region may grow freely.
#[test]
fn region_interior_grows_without_breaking_merge() {
    let s = Scenario::new();
    s.edit(|c| {
        c.replacen(
            REGION_START,
            &format!("{REGION_START}\n        return temperature - target;"),
            1,
        )
    });

    // The template meanwhile changes a generated line outside the region.
    assert_eq!(s.regenerate(&generated(25)), WriteOutcome::Written);
    let body = s.body();
    assert!(body.contains("return temperature - target;"));
    assert!(body.contains("public int target = 25;"));
}

/// Scenario 5: the same line added on both sides at the same position is
/// not a conflict.
#[test]
fn identical_additions_do_not_conflict() {
    let s = Scenario::new();
    s.edit(|c| c.replacen("}\n/*", "}\n// end of file\n/*", 1));

    let new = format!("{}\n// end of file", generated(21));
    assert_eq!(s.regenerate(&new), WriteOutcome::Written);
    assert_eq!(s.body().matches("// end of file").count(), 1);
}

/// Scenario 6: different lines added at the same position conflict.
#[test]
fn diverging_additions_conflict() {
    let s = Scenario::new();
    s.edit(|c| c.replacen("}\n/*", "}\n// edited by hand\n/*", 1));

    let new = format!("{}\n// regenerated differently", generated(21));
    let side = conflict_path(&s.target);
    assert_eq!(
        s.regenerate(&new),
        WriteOutcome::ConflictDeferred {
            conflict_path: side.clone()
        }
    );

    let conflict = fs::read_to_string(&side).unwrap();
    assert!(conflict.lines().any(|l| l == "======="));
    assert!(conflict.contains("// edited by hand"));
    assert!(conflict.contains("// regenerated differently"));
    assert!(s.on_disk().ends_with("\nconflicted"));
}

/// Scenario 7: several hand-added lines against a diverging regeneration
/// still conflict, and the sentinel round-trips to resolved.
#[test]
fn multi_line_conflict_then_manual_resolution() {
    let s = Scenario::new();
    s.edit(|c| c.replacen("}\n/*", "}\n// note one\n// note two\n/*", 1));

    let new = format!("{}\n// regenerated differently", generated(21));
    let outcome = s.regenerate(&new);
    assert!(matches!(outcome, WriteOutcome::ConflictDeferred { .. }));

    // The developer settles the conflict by hand; the trailing sentinel is
    // the signal that the next run may proceed.
    assert_eq!(s.regenerate(&new), WriteOutcome::ConflictResolved);
    assert!(!conflict_path(&s.target).exists());
    assert!(!s.on_disk().ends_with("conflicted"));
}

/// Scenario 8: a tampered anchor string blocks the regeneration.
#[test]
fn tampered_footer_blocks() {
    let s = Scenario::new();
    let anchors = {
        let doc = HashedDocument::decode(&s.on_disk(), &ProtectedRegionMarkers).unwrap();
        doc.old_hash().to_string()
    };
    let flipped: String = anchors
        .chars()
        .map(|c| if c == '0' { '1' } else { '0' })
        .collect();
    s.edit(|c| c.replacen(&anchors, &flipped, 1));

    assert_eq!(s.regenerate(&generated(21)), WriteOutcome::BlockedModified);
}

/// Unchanged regeneration is a no-op.
#[test]
fn unchanged_regeneration_is_skipped() {
    let s = Scenario::new();
    assert_eq!(s.regenerate(&generated(21)), WriteOutcome::Unchanged);
}
