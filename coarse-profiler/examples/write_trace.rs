use coarse_profiler::profiler::{Profiler, analyze_profile, print_analysis, write_trace_file};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn simulate_frame(profiler: &mut Profiler<'static>, frame: u64) {
    let mut frame_scope = profiler.scoped("frame");
    {
        let mut update = frame_scope.scoped("update");
        {
            let _physics = update.scoped("physics");
            std::thread::sleep(Duration::from_micros(300 + frame * 10));
        }
        let _ai = update.scoped("ai");
        std::thread::sleep(Duration::from_micros(150));
    }
    let _render = frame_scope.scoped("render");
    std::thread::sleep(Duration::from_micros(500));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "coarse_profile.json".to_string());

    // Deliberately small so the pool grows a few times and shows up in the trace.
    let mut profiler = Profiler::builder().with_initial_capacity(8).build();
    for frame in 0..20 {
        simulate_frame(&mut profiler, frame);
    }

    if let Err(e) = write_trace_file(&profiler, &path) {
        eprintln!("Failed to write {path}: {e}");
        std::process::exit(1);
    }
    let analysis = analyze_profile(&profiler);
    print_analysis(&analysis);
    match analysis.to_json() {
        Ok(json) => {
            let summary = format!("{path}.summary.json");
            if let Err(e) = std::fs::write(&summary, json) {
                eprintln!("Failed to write {summary}: {e}");
            }
        }
        Err(e) => eprintln!("Failed to serialize analysis: {e}"),
    }
    println!("\nTrace written to {path}; open it in chrome://tracing or ui.perfetto.dev");
}
