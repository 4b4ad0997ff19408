//! Host simulator: wires the decode engine to scripted switch input and
//! console collaborators, mirroring the task layout of the device build

use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};

use pulsetalk_firmware::engine::pump_task;
use pulsetalk_firmware::*;

// Shared input state, written by the switch layer, read by the engine
static SWITCHES: SwitchInput = SwitchInput::new();

const SCAN_INTERVAL: Duration = Duration::from_millis(20);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    println!("pulsetalk {} starting", VERSION);

    let config = default_config();
    let mut engine = Engine::new(config);
    let mut console = Console::new();

    match engine.load_definitions(FACTORY_DEFINITIONS, &mut console) {
        Ok(report) => {
            println!(
                "definitions loaded: {} codes, {} short codes, {} parameters",
                report.morse, report.short, report.params
            );
        }
        Err(err) => {
            // bootstrap falls back to whatever did load; decode will
            // degrade to misses
            println!("definition load failed: {err}");
        }
    }

    spawner.must_spawn(demo_input_task(&SWITCHES, config.debounce_ms));

    pump_task(&mut engine, &SWITCHES, &mut console, SCAN_INTERVAL).await
}

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Stands in for the switch ISR: replays a short scripted message
#[embassy_executor::task]
async fn demo_input_task(input: &'static SwitchInput, debounce_ms: u32) {
    // dot/dash press lengths for one-switch operation
    const DOT_MS: u64 = 150;
    const DASH_MS: u64 = 650;

    // "HI :ty" then send would come from the user; here we just spell HI
    let script: [&str; 2] = ["....", ".."];

    Timer::after(Duration::from_millis(300)).await;

    for pattern in script {
        for symbol in pattern.chars() {
            let held = if symbol == '.' { DOT_MS } else { DASH_MS };
            input.update(SwitchId::Primary, true, now_ms(), debounce_ms);
            Timer::after(Duration::from_millis(held)).await;
            input.update(SwitchId::Primary, false, now_ms(), debounce_ms);
            // intra-character gap
            Timer::after(Duration::from_millis(250)).await;
        }
        // inter-character gap
        Timer::after(Duration::from_millis(1200)).await;
    }

    // inter-word gap commits the word, then idle
    Timer::after(Duration::from_millis(2500)).await;
}
