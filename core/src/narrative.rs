//! # Narrative Readings
//!
//! Builds the chat prompt from the generated features and reads the
//! numbered sections back out of the reply.
//!
//! The reply is expected to follow the six numbered topics listed in the
//! prompt. A heading is a line starting with a digit `1`–`6` (ASCII or
//! Arabic-Indic) followed by `.`, `)`, `:` or `-`, optionally behind
//! markdown `#` or `*`. Topics 1–5 are required; topic 6 is optional.

use palmist_common::palm::{FeatureScore, PalmFeatures};
use palmist_common::providers::NarrativePrompt;
use palmist_common::reading::Reading;
use palmist_common::user::UserData;

use crate::content::UNSPECIFIED;

pub const SYSTEM_PROMPT: &str = "أنت خبير في قراءة الكف بالذكاء الاصطناعي. قم بتحليل ميزات الكف المقدمة وقدم قراءة مفصلة ودقيقة باللغة العربية.";

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn describe_line(line: &FeatureScore) -> String {
    format!(
        "قوة: {}, وضوح: {}, طول: {}",
        percent(line.strength),
        percent(line.clarity),
        percent(line.length)
    )
}

pub fn build_prompt(features: &PalmFeatures, user: &UserData) -> NarrativePrompt {
    let name = user
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNSPECIFIED);
    let birth_date = user
        .birth_date
        .map(|date| date.to_string())
        .unwrap_or_else(|| UNSPECIFIED.to_string());
    let location = user.location().unwrap_or(UNSPECIFIED);

    let mounts = features
        .mounts
        .iter()
        .map(|mount| format!("{}: {}", mount.kind.name(), percent(mount.influence)))
        .collect::<Vec<_>>()
        .join(", ");
    let fingers = features
        .fingers
        .iter()
        .map(|finger| format!("{}: {}", finger.kind.name(), percent(finger.overall_score)))
        .collect::<Vec<_>>()
        .join(", ");
    let lines = &features.lines;

    let user_prompt = format!(
        "قم بتحليل قراءة الكف التالية بالذكاء الاصطناعي:

بيانات المستخدم:
- الاسم: {name}
- تاريخ الميلاد: {birth_date}
- المكان: {location}

تحليل ميزات الكف:
- خط القلب: {heart}
- خط الرأس: {head}
- خط الحياة: {life}
- خط القدر: {fate}
- المرتفعات: {mounts}
- الأصابع: {fingers}
- شكل الكف: نوع: {shape}, نسبة: {ratio}

قم بتقديم قراءة شاملة ومفصلة تشمل:
1. الحب والعلاقات
2. العمل والوظيفة
3. الصحة والحيوية
4. المال والثروة
5. الشخصية والسلوك
6. المستقبل والفرص القادمة

اجعل القراءة واقعية ومفيدة ومبنية على التحليل الفعلي للميزات.",
        heart = describe_line(&lines.heart_line),
        head = describe_line(&lines.head_line),
        life = describe_line(&lines.life_line),
        fate = describe_line(&lines.fate_line),
        shape = features.shape.kind.name(),
        ratio = features.shape.ratio,
    );

    NarrativePrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: user_prompt,
    }
}

/// The topics of a narrative reply, in prompt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeSections {
    pub love: String,
    pub career: String,
    pub health: String,
    pub money: String,
    pub personality: String,
    pub future: Option<String>,
}

fn heading_number(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_start_matches(|c: char| c == '#' || c == '*' || c.is_whitespace());
    let mut chars = line.char_indices();
    let (_, digit) = chars.next()?;
    let number = match digit {
        '1'..='6' => digit as usize - '0' as usize,
        '\u{0661}'..='\u{0666}' => digit as usize - '\u{0660}' as usize,
        _ => return None,
    };
    let (at, marker) = chars.next()?;
    if !matches!(marker, '.' | ')' | ':' | '-') {
        return None;
    }
    Some((number, &line[at + marker.len_utf8()..]))
}

fn clean(text: &str) -> String {
    text.trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
        .to_string()
}

/// Splits a reply into its numbered topics.
///
/// Returns the numbers of the missing required topics when the reply
/// cannot be used.
pub fn parse_sections(reply: &str) -> Result<NarrativeSections, Vec<usize>> {
    // (title, body lines) per topic.
    let mut sections: [Option<(String, Vec<String>)>; 6] = Default::default();
    let mut current: Option<usize> = None;
    let mut last_heading = 0;
    // Last item of a flush numbered list inside the current topic.
    let mut list_item: Option<usize> = None;

    for line in reply.lines() {
        if let Some((number, rest)) = heading_number(line) {
            let indented = line.starts_with(char::is_whitespace);
            let continues_list = list_item.is_some_and(|item| number == item + 1);
            if number > last_heading && !indented && !continues_list {
                sections[number - 1] = Some((clean(rest), Vec::new()));
                current = Some(number - 1);
                last_heading = number;
                list_item = None;
                continue;
            }
            if !indented {
                list_item = Some(number);
            }
        }
        if let Some(index) = current {
            if let Some((_, body)) = sections[index].as_mut() {
                let text = clean(line);
                if !text.is_empty() {
                    body.push(text);
                }
            }
        }
    }

    let texts: Vec<Option<String>> = sections
        .into_iter()
        .map(|section| section.and_then(|(title, body)| section_text(&title, body)))
        .collect();

    let missing: Vec<usize> = (0..5)
        .filter(|index| texts[*index].is_none())
        .map(|index| index + 1)
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    let mut texts = texts.into_iter();
    let mut next = || texts.next().flatten().unwrap_or_default();
    Ok(NarrativeSections {
        love: next(),
        career: next(),
        health: next(),
        money: next(),
        personality: next(),
        future: Some(next()).filter(|text| !text.is_empty()),
    })
}

// "Title: inline text" keeps the inline text; a bare title only counts when
// nothing follows it.
fn section_text(title: &str, body: Vec<String>) -> Option<String> {
    let inline = title
        .split_once(':')
        .map(|(_, after)| clean(after))
        .filter(|after| !after.is_empty());
    let mut parts: Vec<String> = inline.into_iter().chain(body).collect();
    if parts.is_empty() && !title.is_empty() {
        parts.push(title.to_string());
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Replaces the local texts with the narrative. Scores, advice and
/// timelines are left untouched.
pub fn apply_narrative(reading: &mut Reading, sections: NarrativeSections) {
    reading.love.reading = sections.love;
    reading.career.reading = sections.career;
    reading.health.reading = sections.health;
    reading.money.reading = sections.money;
    reading.personality.description = sections.personality;
    if let Some(future) = sections.future {
        reading.overall.reading = future;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use palmist_common::random::SequenceSource;

    use super::*;
    use crate::{compose, generator};

    const REPLY: &str = "\
مقدمة قصيرة عن الكف.

1. الحب والعلاقات
قلبك مفتوح للحب.

2) **العمل والوظيفة**: ستنجح في عملك.
### ٣. الصحة والحيوية
صحتك جيدة.
حافظ على نشاطك.
4- المال والثروة: رزق وفير.
5. الشخصية والسلوك
شخصية هادئة.
6. المستقبل والفرص القادمة
فرص كثيرة قادمة.";

    #[test]
    fn parses_all_heading_styles() {
        let sections = parse_sections(REPLY).unwrap();
        assert_eq!(sections.love, "قلبك مفتوح للحب.");
        assert_eq!(sections.career, "ستنجح في عملك.");
        assert_eq!(sections.health, "صحتك جيدة. حافظ على نشاطك.");
        assert_eq!(sections.money, "رزق وفير.");
        assert_eq!(sections.personality, "شخصية هادئة.");
        assert_eq!(sections.future.as_deref(), Some("فرص كثيرة قادمة."));
    }

    #[test]
    fn future_topic_is_optional() {
        let reply = "1. أ\nحب\n2. ب\nعمل\n3. ج\nصحة\n4. د\nمال\n5. هـ\nشخصية";
        let sections = parse_sections(reply).unwrap();
        assert_eq!(sections.future, None);
        assert_eq!(sections.money, "مال");
    }

    #[test]
    fn reports_missing_required_topics() {
        assert_eq!(parse_sections("just prose, no headings"), Err(vec![1, 2, 3, 4, 5]));
        assert_eq!(
            parse_sections("1. a\nlove\n2. b\ncareer\n5. e\nself"),
            Err(vec![3, 4])
        );
    }

    #[test]
    fn numbered_list_inside_a_topic_stays_in_it() {
        let reply = "\
1. الحب والعلاقات
علامات قلبك:
1. صبر
2. وفاء
3. حنان
2. العمل والوظيفة
  1. طموح
  2. مثابرة
3. الصحة
صحة جيدة.
4. المال
رزق.
5. الشخصية
هادئة.";
        let sections = parse_sections(reply).unwrap();
        assert_eq!(sections.love, "علامات قلبك: 1. صبر 2. وفاء 3. حنان");
        assert_eq!(sections.career, "1. طموح 2. مثابرة");
        assert_eq!(sections.health, "صحة جيدة.");
        assert_eq!(sections.personality, "هادئة.");
    }

    #[test]
    fn headings_only_move_forward() {
        let reply = "1. a\nlove\n2. b\ncareer\n1. again\nmore career\n3. c\nhealth\n4. d\nmoney\n5. e\nself";
        let sections = parse_sections(reply).unwrap();
        assert_eq!(sections.love, "love");
        assert_eq!(sections.career, "career 1. again more career");
    }

    #[test]
    fn ten_is_not_a_heading() {
        assert_eq!(heading_number("10. nope"), None);
        assert_eq!(heading_number("  **3.** title").map(|(n, _)| n), Some(3));
    }

    #[test]
    fn prompt_interpolates_user_and_features() {
        let features = generator::generate_features(None, &mut SequenceSource::constant(0.0));
        let user = UserData::default()
            .with_name("Salma")
            .with_birth_date(NaiveDate::from_ymd_opt(1991, 5, 3).unwrap());
        let prompt = build_prompt(&features, &user);

        assert_eq!(prompt.system, SYSTEM_PROMPT);
        assert!(prompt.user.contains("- الاسم: Salma"));
        assert!(prompt.user.contains("- تاريخ الميلاد: 1991-05-03"));
        assert!(prompt.user.contains("- المكان: غير محدد"));
        assert!(prompt.user.contains("- خط القلب: قوة: 50%, وضوح: 40%, طول: 60%"));
        assert!(prompt.user.contains("venus: 40%, jupiter: 40%"));
        assert!(prompt.user.contains("شكل الكف: نوع: earth, نسبة: 1"));
    }

    #[test]
    fn narrative_replaces_texts_only() {
        let mut random = SequenceSource::constant(0.5);
        let features = generator::generate_features(None, &mut random);
        let mut reading = compose::compose_reading(&features, &mut random);
        let local = reading.clone();

        apply_narrative(&mut reading, parse_sections(REPLY).unwrap());
        assert_eq!(reading.love.reading, "قلبك مفتوح للحب.");
        assert_eq!(reading.love.score, local.love.score);
        assert_eq!(reading.love.advice, local.love.advice);
        assert_eq!(reading.money.timeline, local.money.timeline);
        assert_eq!(reading.personality.traits, local.personality.traits);
        assert_eq!(reading.overall.reading, "فرص كثيرة قادمة.");
        assert_eq!(reading.overall.lucky_numbers, local.overall.lucky_numbers);
    }
}
