use colored::*;
use palmist_common::config::Config;

use crate::mprint;
use crate::terminal::print;

const KEY_WIDTH: usize = 14;

pub fn config(config: &Config) -> anyhow::Result<()> {
    let analysis = &config.ai.analysis;
    print::aligned_line("image size", format!("{}px", analysis.max_image_size), KEY_WIDTH);
    print::aligned_line("quality", format!("{:.2}", analysis.quality), KEY_WIDTH);
    print::aligned_line(
        "label cutoff",
        format!("{:.2}", analysis.confidence_threshold),
        KEY_WIDTH,
    );
    let cache = if analysis.enable_cache {
        format!("on, {}s", analysis.cache_ttl().as_secs()).green()
    } else {
        "off".yellow()
    };
    print::aligned_line("cache", cache, KEY_WIDTH);
    mprint!();

    let reading = &config.ai.reading;
    print::aligned_line("model", reading.model.as_str(), KEY_WIDTH);
    print::aligned_line("max tokens", reading.max_tokens.to_string(), KEY_WIDTH);
    print::aligned_line("temperature", format!("{:.2}", reading.temperature), KEY_WIDTH);
    print::aligned_line("astrology", on_off(reading.astrology_enabled()), KEY_WIDTH);
    print::aligned_line("cultural", on_off(reading.cultural_enabled()), KEY_WIDTH);
    mprint!();

    print::aligned_line("vision api", config.endpoints.vision.as_str(), KEY_WIDTH);
    print::aligned_line("chat api", config.endpoints.chat.as_str(), KEY_WIDTH);
    print::aligned_line(
        "timeout",
        format!("{}s", config.endpoints.timeout_secs),
        KEY_WIDTH,
    );
    mprint!();

    let keys = &config.api_keys;
    print::aligned_line("googleVision", key_state(keys.google_vision()), KEY_WIDTH);
    print::aligned_line("openai", key_state(keys.openai()), KEY_WIDTH);
    print::aligned_line("huggingface", key_state(keys.huggingface()), KEY_WIDTH);

    let missing = config.missing_keys();
    if !missing.is_empty() {
        mprint!();
        print::print_status(format!(
            "Without {} the matching parts of a reading are generated locally",
            missing.join(" and ")
        ));
    }
    Ok(())
}

fn on_off(enabled: bool) -> ColoredString {
    if enabled { "on".green() } else { "off".normal() }
}

// The key itself is never printed.
fn key_state(key: Option<&str>) -> ColoredString {
    match key {
        Some(_) => "configured".green(),
        None => "missing".yellow(),
    }
}
