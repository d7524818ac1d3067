#![allow(dead_code)]

use assert2::check;
use serde_json::Value;

/// Parse exported event strings and check the fields every Chrome trace
/// "complete" event must carry. Returns the parsed values for further checks.
pub fn validate_chrome_events(events: &[String]) -> Vec<Value> {
    events
        .iter()
        .map(|text| {
            let value: Value = serde_json::from_str(text)
                .unwrap_or_else(|e| panic!("event is not valid JSON ({e}): {text}"));
            check!(value["ph"] == "X");
            check!(value["pid"] == 1);
            check!(value["tid"] == 1);
            check!(value["name"].is_string());
            check!(value["ts"].is_f64());
            check!(value["dur"].is_f64());
            check!(value["args"]["ms"].is_f64());
            value
        })
        .collect()
}

/// Duration in microseconds of a parsed event.
pub fn dur_us(event: &Value) -> f64 {
    event["dur"].as_f64().unwrap_or(f64::NAN)
}
