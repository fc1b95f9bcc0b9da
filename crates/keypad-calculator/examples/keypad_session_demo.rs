//! Keypad Session Demo
//!
//! Drives two calculators on one mock page: clicks, keyboard input routed to
//! the active instance, press feedback and the shared scenario checks.
//!
//! Run with: cargo run --example keypad_session_demo
//! Set `RUST_LOG=keypad_calculator=debug` to watch the state machine.

use keypad_calculator::config::CalculatorConfig;
use keypad_calculator::core::Operator;
use keypad_calculator::driver::run_all_scenarios;
use keypad_calculator::wasm::{SessionRegistry, WasmDriver};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keypad_calculator=info".into()),
        )
        .init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Keypad Calculator - Mock DOM Session              ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut registry = SessionRegistry::new();
    let left = registry.register(WasmDriver::new());
    let config = CalculatorConfig::default().with_operator_label(Operator::Multiply, "*");
    let right = registry.register(WasmDriver::with_config(&config));

    println!("1️⃣  Clicking 2 + 3 × 4 = on the left calculator");
    for id in ["btn-2", "btn-add", "btn-3", "btn-multiply", "btn-4", "btn-equals"] {
        registry.click(left, id);
    }
    if let Some(calc) = registry.get(left) {
        println!("   history: {:?}", calc.history_text());
        println!("   display: {:?}", calc.display_text());
    }

    println!("\n2️⃣  Activating the right calculator and typing 12.5 * 2 Enter");
    registry.click(right, "display-current");
    let mut now_ms = 0;
    for key in ["1", "2", ".", "5", "*", "2", "Enter"] {
        registry.key_down(key, now_ms);
        now_ms += 40;
    }
    if let Some(calc) = registry.get(right) {
        println!("   history: {:?}", calc.history_text());
        println!("   display: {:?}", calc.display_text());
        println!("   btn-equals flashing: {}", calc.is_pressed("btn-equals"));
    }
    registry.release_feedback(now_ms + 100);
    if let Some(calc) = registry.get(right) {
        println!("   after 100 ms: {}", calc.is_pressed("btn-equals"));
    }

    println!("\n3️⃣  Dividing by zero on the right calculator");
    for key in ["Escape", "5", "/", "0", "="] {
        registry.key_down(key, now_ms);
    }
    if let Some(calc) = registry.get(right) {
        println!("   history: {:?}", calc.history_text());
        println!("   display: {:?}", calc.display_text());
    }

    println!("\n4️⃣  Running the scenario checks against a fresh driver");
    run_all_scenarios(&mut WasmDriver::new());
    println!("   ✅ all scenarios passed");
}
