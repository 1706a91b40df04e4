//! Prompt text for article generation.
//!
//! The guide's language picks the template; without a guide the Korean
//! template is used with neutral defaults.

use std::fmt::Write;

use crate::api::StyleGuideDto;
use crate::domain::{ContentLength, ContentTone, GuideLanguage, ReadingLevel};

pub struct PromptInput<'a> {
    pub topic: &'a str,
    pub style_guide: Option<&'a StyleGuideDto>,
    pub keywords: &'a [String],
    pub additional_instructions: Option<&'a str>,
}

const fn tone_phrase(tone: ContentTone, language: GuideLanguage) -> &'static str {
    match (language, tone) {
        (GuideLanguage::Ko, ContentTone::Professional) => "전문적이고 신뢰감 있는",
        (GuideLanguage::Ko, ContentTone::Friendly) => "친근하고 대화하는 듯한",
        (GuideLanguage::Ko, ContentTone::Inspirational) => "영감을 주고 동기를 부여하는",
        (GuideLanguage::Ko, ContentTone::Educational) => "교육적이고 정보 전달에 충실한",
        (GuideLanguage::En, ContentTone::Professional) => "professional and trustworthy",
        (GuideLanguage::En, ContentTone::Friendly) => "friendly and conversational",
        (GuideLanguage::En, ContentTone::Inspirational) => "inspirational and motivating",
        (GuideLanguage::En, ContentTone::Educational) => "educational and informative",
    }
}

const fn length_phrase(length: ContentLength, language: GuideLanguage) -> &'static str {
    match (language, length) {
        (GuideLanguage::Ko, ContentLength::Short) => "1000-1500자",
        (GuideLanguage::Ko, ContentLength::Medium) => "2000-3000자",
        (GuideLanguage::Ko, ContentLength::Long) => "4000-6000자",
        (GuideLanguage::En, ContentLength::Short) => "500-800 words",
        (GuideLanguage::En, ContentLength::Medium) => "1000-1500 words",
        (GuideLanguage::En, ContentLength::Long) => "2000-3000 words",
    }
}

const fn level_phrase(level: ReadingLevel, language: GuideLanguage) -> &'static str {
    match (language, level) {
        (GuideLanguage::Ko, ReadingLevel::Beginner) => "초보자도 쉽게 이해할 수 있는",
        (GuideLanguage::Ko, ReadingLevel::Intermediate) => "중급 수준의",
        (GuideLanguage::Ko, ReadingLevel::Advanced) => "전문적이고 심화된",
        (GuideLanguage::En, ReadingLevel::Beginner) => "beginner-friendly",
        (GuideLanguage::En, ReadingLevel::Intermediate) => "intermediate-level",
        (GuideLanguage::En, ReadingLevel::Advanced) => "advanced and in-depth",
    }
}

struct Labels {
    intro: &'static str,
    topic: &'static str,
    brand: &'static str,
    brand_name: &'static str,
    brand_description: &'static str,
    personality: &'static str,
    formality: &'static str,
    audience: &'static str,
    pain_points: &'static str,
    no_brand: &'static str,
    style: &'static str,
    tone: &'static str,
    length: &'static str,
    level: &'static str,
    default_tone: &'static str,
    default_length: &'static str,
    default_level: &'static str,
    keywords: &'static str,
    no_keywords: &'static str,
    extra: &'static str,
    requirements: &'static str,
    rules: [&'static str; 8],
    output: &'static str,
    output_fields: [&'static str; 5],
}

const KO: Labels = Labels {
    intro: "당신은 전문 블로그 콘텐츠 작가입니다. 아래 조건에 맞춰 고품질 블로그 글을 작성하세요.",
    topic: "주제",
    brand: "브랜드 정보",
    brand_name: "브랜드명",
    brand_description: "브랜드 설명",
    personality: "브랜드 성격",
    formality: "격식 수준",
    audience: "타겟 독자",
    pain_points: "독자의 고민",
    no_brand: "일반적인 블로그 스타일로 작성",
    style: "작성 스타일",
    tone: "어조",
    length: "글 길이",
    level: "난이도",
    default_tone: "친근하고 전문적인",
    default_length: "2000-3000자",
    default_level: "중급 수준의",
    keywords: "키워드",
    no_keywords: "주제와 관련된 키워드를 자연스럽게 포함",
    extra: "추가 지시사항",
    requirements: "작성 요구사항",
    rules: [
        "SEO에 최적화되고 클릭을 유도하는 제목",
        "본문은 Markdown 형식 (소제목, 목록, 강조 활용)",
        "서론, 본론, 결론이 자연스럽게 이어지는 구조",
        "실용적이고 바로 실행할 수 있는 정보",
        "독자의 고민 해결에 집중",
        "Meta Description은 160자 이내",
        "주요 키워드를 본문에 자연스럽게 포함",
        "명확하고 구조적인 소제목",
    ],
    output: "출력 형식 (JSON 객체)",
    output_fields: [
        "title: 블로그 글 제목",
        "content: Markdown 본문 (제목 제외)",
        "metaDescription: SEO 메타 설명 (160자 이내)",
        "keywords: 관련 키워드 배열 (5-10개)",
        "headings: 본문의 주요 소제목 배열",
    ],
};

const EN: Labels = Labels {
    intro: "You are a professional blog content writer. Write a high-quality blog post that meets the requirements below.",
    topic: "Topic",
    brand: "Brand Information",
    brand_name: "Brand Name",
    brand_description: "Brand Description",
    personality: "Brand Personality",
    formality: "Formality Level",
    audience: "Target Audience",
    pain_points: "Audience Pain Points",
    no_brand: "Write in a general blog style",
    style: "Writing Style",
    tone: "Tone",
    length: "Content Length",
    level: "Reading Level",
    default_tone: "friendly and professional",
    default_length: "1000-1500 words",
    default_level: "intermediate-level",
    keywords: "Keywords",
    no_keywords: "Naturally include relevant keywords",
    extra: "Additional Instructions",
    requirements: "Writing Requirements",
    rules: [
        "An SEO-optimized title that invites clicks",
        "Body in Markdown (headings, lists, emphasis)",
        "Introduction, body and conclusion in a natural flow",
        "Practical, actionable information",
        "Focus on solving the reader's pain points",
        "Meta description of at most 160 characters",
        "Work the main keywords naturally into the text",
        "Clear, well-structured headings",
    ],
    output: "Output Format (JSON object)",
    output_fields: [
        "title: blog post title",
        "content: Markdown body (without the title)",
        "metaDescription: SEO meta description (max 160 characters)",
        "keywords: array of related keywords (5-10)",
        "headings: array of the main subheadings",
    ],
};

#[must_use]
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let language = input
        .style_guide
        .map_or(GuideLanguage::Ko, |guide| guide.language);
    let labels = match language {
        GuideLanguage::Ko => &KO,
        GuideLanguage::En => &EN,
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", labels.intro);
    let _ = writeln!(out, "**{}**: {}\n", labels.topic, input.topic.trim());

    let _ = writeln!(out, "**{}**:", labels.brand);
    match input.style_guide {
        Some(guide) => {
            let _ = writeln!(out, "- {}: {}", labels.brand_name, guide.brand_name);
            let _ = writeln!(out, "- {}: {}", labels.brand_description, guide.brand_description);
            let _ = writeln!(out, "- {}: {}", labels.personality, guide.personality.join(", "));
            let _ = writeln!(out, "- {}: {}", labels.formality, guide.formality);
            let _ = writeln!(out, "- {}: {}", labels.audience, guide.target_audience);
            let _ = writeln!(out, "- {}: {}", labels.pain_points, guide.pain_points);
            if let Some(notes) = guide.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                let _ = writeln!(out, "- Notes: {}", notes.trim());
            }
        }
        None => {
            let _ = writeln!(out, "{}", labels.no_brand);
        }
    }
    out.push('\n');

    let (tone, length, level) = input.style_guide.map_or(
        (labels.default_tone, labels.default_length, labels.default_level),
        |guide| {
            (
                tone_phrase(guide.tone, language),
                length_phrase(guide.content_length, language),
                level_phrase(guide.reading_level, language),
            )
        },
    );
    let _ = writeln!(out, "**{}**:", labels.style);
    let _ = writeln!(out, "- {}: {tone}", labels.tone);
    let _ = writeln!(out, "- {}: {length}", labels.length);
    let _ = writeln!(out, "- {}: {level}\n", labels.level);

    let keywords: Vec<&str> = input
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        let _ = writeln!(out, "**{}**: {}\n", labels.keywords, labels.no_keywords);
    } else {
        let _ = writeln!(out, "**{}**: {}\n", labels.keywords, keywords.join(", "));
    }

    if let Some(extra) = input
        .additional_instructions
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let _ = writeln!(out, "**{}**: {extra}\n", labels.extra);
    }

    let _ = writeln!(out, "**{}**:", labels.requirements);
    for (i, rule) in labels.rules.iter().enumerate() {
        let _ = writeln!(out, "{}. {rule}", i + 1);
    }
    out.push('\n');

    let _ = writeln!(out, "**{}**:", labels.output);
    for field in labels.output_fields {
        let _ = writeln!(out, "- {field}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Formality;

    fn guide(language: GuideLanguage) -> StyleGuideDto {
        StyleGuideDto {
            id: "g1".to_string(),
            owner_id: "user_1".to_string(),
            brand_name: "Acme".to_string(),
            brand_description: "Tools for builders".to_string(),
            personality: vec!["bold".to_string(), "witty".to_string()],
            formality: Formality::Neutral,
            target_audience: "Developers".to_string(),
            pain_points: "Slow builds".to_string(),
            language,
            tone: ContentTone::Educational,
            content_length: ContentLength::Long,
            reading_level: ReadingLevel::Advanced,
            notes: None,
            is_default: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn korean_defaults_without_guide() {
        let prompt = build_prompt(&PromptInput {
            topic: "SEO 기초",
            style_guide: None,
            keywords: &[],
            additional_instructions: None,
        });
        assert!(prompt.contains("**주제**: SEO 기초"));
        assert!(prompt.contains("일반적인 블로그 스타일로 작성"));
        assert!(prompt.contains("- 글 길이: 2000-3000자"));
        assert!(prompt.contains("주제와 관련된 키워드를 자연스럽게 포함"));
        assert!(!prompt.contains("추가 지시사항"));
    }

    #[test]
    fn english_guide_drives_phrasing() {
        let g = guide(GuideLanguage::En);
        let keywords = vec!["rust".to_string(), " ".to_string(), "axum".to_string()];
        let prompt = build_prompt(&PromptInput {
            topic: "Async Rust",
            style_guide: Some(&g),
            keywords: &keywords,
            additional_instructions: Some("Mention tokio"),
        });
        assert!(prompt.contains("- Brand Name: Acme"));
        assert!(prompt.contains("- Brand Personality: bold, witty"));
        assert!(prompt.contains("- Formality Level: neutral"));
        assert!(prompt.contains("- Tone: educational and informative"));
        assert!(prompt.contains("- Content Length: 2000-3000 words"));
        assert!(prompt.contains("- Reading Level: advanced and in-depth"));
        assert!(prompt.contains("**Keywords**: rust, axum"));
        assert!(prompt.contains("**Additional Instructions**: Mention tokio"));
    }

    #[test]
    fn korean_guide_uses_korean_tables() {
        let g = guide(GuideLanguage::Ko);
        let prompt = build_prompt(&PromptInput {
            topic: "빌드 속도",
            style_guide: Some(&g),
            keywords: &[],
            additional_instructions: Some("   "),
        });
        assert!(prompt.contains("- 어조: 교육적이고 정보 전달에 충실한"));
        assert!(prompt.contains("- 글 길이: 4000-6000자"));
        assert!(!prompt.contains("추가 지시사항"));
    }
}
