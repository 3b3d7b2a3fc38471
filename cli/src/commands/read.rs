use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use palmist_common::analysis::{AnalysisResult, FallbackReason, Origin};
use palmist_common::config::Config;
use palmist_common::image::PalmImage;
use palmist_common::random::RngSource;
use palmist_core::PalmAnalyzer;
use tracing::{info, warn};

use crate::commands::ReadArgs;
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

type Detail = (String, ColoredString);

pub async fn read(args: ReadArgs, config: Config) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("could not read {}", args.image.display()))?;

    let user = args.user_data();
    if let Err(err) = user.validate() {
        warn!("{err}; the reading will be less personal");
    }
    announce_providers(&config);

    let mut analyzer = PalmAnalyzer::new(config).with_stage_observer(spinner::report_stage);
    if let Some(seed) = args.seed {
        analyzer = analyzer.with_random_source(RngSource::seeded(seed));
    }
    let analyzer = Arc::new(analyzer);

    let canceller = Arc::clone(&analyzer);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let start_time = Instant::now();
    let outcome = analyzer.analyze(PalmImage::from_bytes(bytes), &user).await;
    ctrl_c.abort();
    spinner::get_spinner().finish_and_clear();
    let result = outcome?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    reading_ends(&result, start_time.elapsed());
    Ok(())
}

fn announce_providers(config: &Config) {
    let missing = config.missing_keys();
    if missing.is_empty() {
        info!("Remote vision and narrative providers are configured");
    } else {
        info!("No key for {}; those parts are generated locally", missing.join(", "));
    }
}

fn reading_ends(result: &AnalysisResult, total_time: Duration) {
    print::header("palm lines");
    print_lines(result);
    mprint!();

    print::header("mounts and fingers");
    print_mounts_and_fingers(result);
    mprint!();

    print::header("your reading");
    print_reading(result);

    if result.reading.astrology.is_some() || result.reading.cultural.is_some() {
        mprint!();
        print::header("personal touches");
        print_personal(result);
    }

    print_summary(result, total_time);
}

fn print_lines(result: &AnalysisResult) {
    let lines = &result.lines;
    let all = [
        &lines.heart_line,
        &lines.head_line,
        &lines.life_line,
        &lines.fate_line,
    ];
    for (idx, line) in all.into_iter().enumerate() {
        print::tree_head(idx, &format!("{} line", line.score.kind.name()));
        let details: Vec<Detail> = vec![
            ("Strength".to_string(), format::score(line.score.strength)),
            ("Clarity".to_string(), format::score(line.score.clarity)),
            ("Length".to_string(), format::score(line.score.length)),
            ("Meaning".to_string(), line.interpretation.normal()),
        ];
        print::as_tree_one_level(&details);
    }
}

fn print_mounts_and_fingers(result: &AnalysisResult) {
    const KEY_WIDTH: usize = 8;
    for mount in &result.mounts {
        print::aligned_line(mount.score.kind.name(), format::score(mount.score.influence), KEY_WIDTH);
    }
    mprint!();
    for finger in &result.fingers {
        print::aligned_line(
            finger.score.kind.name(),
            format::score(finger.score.overall_score),
            KEY_WIDTH,
        );
    }
    let shape = &result.shape;
    mprint!();
    print::aligned_line(
        "shape",
        format!("{} ({:.2})", shape.kind.name(), shape.ratio),
        KEY_WIDTH,
    );
}

fn print_reading(result: &AnalysisResult) {
    let reading = &result.reading;
    let categories = [
        ("Love", &reading.love),
        ("Career", &reading.career),
        ("Money", &reading.money),
        ("Health", &reading.health),
    ];
    for (idx, (name, category)) in categories.into_iter().enumerate() {
        print::tree_head(idx, name);
        print::as_tree_one_level(&format::category_to_details(category));
    }

    let personality = &reading.personality;
    print::tree_head(categories.len(), "Personality");
    print::as_tree_one_level(&[
        ("Score".to_string(), format::score(personality.score)),
        ("Reading".to_string(), personality.description.normal()),
        ("Traits".to_string(), format::list(&personality.traits).normal()),
        ("Strengths".to_string(), format::list(&personality.strengths).green()),
        ("Weaknesses".to_string(), format::list(&personality.weaknesses).yellow()),
    ]);

    let overall = &reading.overall;
    let numbers = overall
        .lucky_numbers
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    print::tree_head(categories.len() + 1, "Overall");
    print::as_tree_one_level(&[
        ("Score".to_string(), format::score(overall.score)),
        ("Reading".to_string(), overall.reading.normal()),
        ("Advice".to_string(), overall.advice.italic()),
        ("Numbers".to_string(), numbers.color(colors::ACCENT)),
        ("Colors".to_string(), format::list(&overall.lucky_colors).normal()),
        ("Days".to_string(), format::list(&overall.lucky_days).normal()),
    ]);
}

fn print_personal(result: &AnalysisResult) {
    if let Some(astrology) = &result.reading.astrology {
        print::print_status(format!(
            "{} / {}: {}",
            astrology.sign.color(colors::ACCENT),
            astrology.element,
            astrology.insight
        ));
    }
    if let Some(cultural) = &result.reading.cultural {
        print::print_status(&cultural.note);
    }
}

fn print_summary(result: &AnalysisResult, total_time: Duration) {
    print::fat_separator();
    print::aligned_line("vision", format::origin(&result.provenance.vision), 10);
    print::aligned_line("reading", format::origin(&result.provenance.reading), 10);
    if let Origin::Local {
        reason: FallbackReason::Failed { message, .. },
    } = &result.provenance.reading
    {
        print::aligned_line("why", message.as_str(), 10);
    }
    print::aligned_line(
        "confidence",
        format::score(result.confidence),
        10,
    );

    let total_time = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!("Reading complete in {total_time}").color(colors::TEXT_DEFAULT);
    print::fat_separator();
    print::centerln(&output.to_string());
}
