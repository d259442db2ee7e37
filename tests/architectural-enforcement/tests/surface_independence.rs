//! Integration Test: Surface Independence
//!
//! **Policy**: The presenter core knows nothing about how panels are drawn.
//! Rendering goes through the `Renderer` trait, so the core MUST NOT depend
//! on or import a terminal or GUI framework.

use std::fs;

use architectural_enforcement::{all_production_lines, workspace_root};

const UI_CRATES: &[&str] = &["ratatui", "crossterm", "termion", "egui", "iced", "gtk"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest_path = workspace_root().join("presenter/core/Cargo.toml");
    let manifest = fs::read_to_string(&manifest_path).unwrap();

    let violations: Vec<&str> = manifest
        .lines()
        .map(str::trim)
        .filter(|line| {
            UI_CRATES.iter().any(|ui| {
                line.strip_prefix(*ui)
                    .is_some_and(|rest| rest.starts_with([' ', '=', '.']))
            })
        })
        .collect();

    assert!(
        violations.is_empty(),
        "UI framework dependencies in {}:\n{}",
        manifest_path.display(),
        violations.join("\n")
    );
}

#[test]
fn test_core_sources_import_no_ui_framework() {
    let violations: Vec<String> = all_production_lines()
        .into_iter()
        .filter(|line| {
            UI_CRATES
                .iter()
                .any(|ui| line.code.contains(&format!("{ui}::")))
        })
        .map(|line| line.describe())
        .collect();

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        panic!(
            "\nFound {} UI framework reference(s) in the presenter core.\n\
             Draw through a Renderer implementation instead.",
            violations.len()
        );
    }
}
