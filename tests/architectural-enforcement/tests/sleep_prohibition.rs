//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Lifecycle
//! progress is driven by animation reports and completion signals, never
//! by waiting a fixed time.
//! **Exceptions**: The animation duration timer in the `animation` module,
//! test code.

use architectural_enforcement::{all_production_lines, SourceLine};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations: Vec<String> = all_production_lines()
        .into_iter()
        .filter(|line| is_sleep_call(line) && !is_animation_timer(line))
        .map(|line| line.describe())
        .collect();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");

        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }

        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - tokio::time::sleep as an animation duration timer (animation/)");
        eprintln!("  - Test code (#[cfg(test)] modules, tests/ directories)");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - std::thread::sleep anywhere");
        eprintln!("  - Sleep to 'wait' for a signal (subscribe or await it instead)");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Blocking thread sleeps are never acceptable, timers included
#[test]
fn test_no_thread_sleep() {
    let violations: Vec<String> = all_production_lines()
        .into_iter()
        .filter(|line| line.code.contains("thread::sleep"))
        .map(|line| line.describe())
        .collect();

    assert!(
        violations.is_empty(),
        "Blocking thread sleep in production code:\n{}",
        violations.join("\n")
    );
}

fn is_sleep_call(line: &SourceLine) -> bool {
    line.code.contains("::sleep(") || line.code.contains(".sleep(")
}

/// Async timers inside the animation module, where the wait is the animation
fn is_animation_timer(line: &SourceLine) -> bool {
    let in_animation_module = line
        .path
        .components()
        .any(|c| c.as_os_str() == "animation");

    in_animation_module && line.code.contains("tokio::time::sleep(")
}
