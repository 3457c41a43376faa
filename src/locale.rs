//! Bilingual string table for section headings and status text.
//!
//! Every user-visible string the renderers emit comes from [`resolve`], so
//! adding a language means adding a column here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Russian
    Ru,
    /// English
    #[default]
    En,
}

impl Lang {
    /// Parse a language tag. Anything that is not Russian falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.trim().to_ascii_lowercase();
        if lower == "ru" || lower.starts_with("ru-") || lower.starts_with("ru_") {
            Lang::Ru
        } else {
            Lang::En
        }
    }

    /// Two-letter tag for this language.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Identity of a document section, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    /// Short summary of the content
    Summary,
    /// Key tasks mentioned
    KeyTasks,
    /// Ordered plan of action
    ActionPlan,
    /// Closing conclusion
    Conclusion,
}

impl SectionKey {
    /// All sections in their fixed display order.
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Summary,
        SectionKey::KeyTasks,
        SectionKey::ActionPlan,
        SectionKey::Conclusion,
    ];

    /// Key of this section in the loose input record.
    pub fn record_key(&self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::KeyTasks => "key_tasks",
            SectionKey::ActionPlan => "action_plan",
            SectionKey::Conclusion => "conclusion",
        }
    }

    /// Position in display order (0-based).
    pub fn index(&self) -> usize {
        match self {
            SectionKey::Summary => 0,
            SectionKey::KeyTasks => 1,
            SectionKey::ActionPlan => 2,
            SectionKey::Conclusion => 3,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_key())
    }
}

/// Status and chrome strings shown around the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKey {
    /// Title used when the record has none
    DefaultTitle,
    /// Greeting explaining what the tool does
    Welcome,
    /// Unsupported input kind
    UnsupportedInput,
    /// Audio is being analyzed
    Analyzing,
    /// Audio exceeded the size limit
    FileTooLarge,
    /// Transcription failed
    TranscriptionFailed,
    /// Transcript came back empty
    NothingHeard,
    /// Summary is ready, asking for an output format
    ChooseFormat,
    /// Paged document is being built
    CreatingDocument,
    /// Slide deck is being built
    CreatingSlides,
    /// Paged document delivered
    DocumentReady,
    /// Slide deck delivered
    SlidesReady,
    /// Paged document failed
    DocumentFailed,
    /// Slide deck failed
    SlidesFailed,
    /// No summary is available to render
    NoRecentSummary,
}

/// Anything that can be looked up in the string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    /// Section heading
    Section(SectionKey),
    /// Status text
    Status(StatusKey),
}

impl From<SectionKey> for TextKey {
    fn from(key: SectionKey) -> Self {
        TextKey::Section(key)
    }
}

impl From<StatusKey> for TextKey {
    fn from(key: StatusKey) -> Self {
        TextKey::Status(key)
    }
}

/// Look up a localized string.
///
/// # Example
///
/// ```
/// use recap::locale::{resolve, Lang, SectionKey};
///
/// assert_eq!(resolve(Lang::En, SectionKey::KeyTasks), "Key tasks");
/// assert_eq!(resolve(Lang::Ru, SectionKey::Conclusion), "Итог");
/// ```
pub fn resolve(lang: Lang, key: impl Into<TextKey>) -> &'static str {
    let (ru, en) = match key.into() {
        TextKey::Section(section) => section_strings(section),
        TextKey::Status(status) => status_strings(status),
    };
    match lang {
        Lang::Ru => ru,
        Lang::En => en,
    }
}

fn section_strings(key: SectionKey) -> (&'static str, &'static str) {
    match key {
        SectionKey::Summary => ("Краткое содержание", "Summary"),
        SectionKey::KeyTasks => ("Ключевые задачи", "Key tasks"),
        SectionKey::ActionPlan => ("План действий", "Action plan"),
        SectionKey::Conclusion => ("Итог", "Conclusion"),
    }
}

fn status_strings(key: StatusKey) -> (&'static str, &'static str) {
    match key {
        StatusKey::DefaultTitle => ("Конспект", "Summary"),
        StatusKey::Welcome => (
            "👋 Привет! Отправьте голосовое или аудио, я сделаю аккуратную сводку и предложу варианты скачивания.",
            "👋 Hi! Send a voice message or an audio file and I will prepare a tidy summary with download options.",
        ),
        StatusKey::UnsupportedInput => (
            "Пока я работаю только с голосовыми и аудио-файлами 🎧",
            "For now I only work with voice messages and audio files 🎧",
        ),
        StatusKey::Analyzing => ("🔍 Анализирую аудио…", "🔍 Analyzing audio…"),
        StatusKey::FileTooLarge => (
            "Файл слишком большой для распознавания. Пожалуйста, отправьте более короткий фрагмент.",
            "The file is too large to transcribe. Please send a shorter fragment.",
        ),
        StatusKey::TranscriptionFailed => (
            "Не смог распознать аудио 😔 Попробуйте ещё раз, лучше в формате OGG/MP3.",
            "Could not transcribe the audio 😔 Please try again, preferably as OGG/MP3.",
        ),
        StatusKey::NothingHeard => (
            "Я ничего не услышал в этом аудио 😔",
            "I could not hear anything in this audio 😔",
        ),
        StatusKey::ChooseFormat => (
            "✨ Финальный штрих…\n\nВ каком формате хотите файл?",
            "✨ Final touch…\n\nWhich format do you want?",
        ),
        StatusKey::CreatingDocument => ("Создаю PDF…", "Creating PDF…"),
        StatusKey::CreatingSlides => ("Создаю презентацию…", "Creating slide deck…"),
        StatusKey::DocumentReady => ("Вот ваш PDF-конспект 🤓", "Here is your PDF summary 🤓"),
        StatusKey::SlidesReady => (
            "Готово! Вот ваша презентация",
            "Done! Here is your deck",
        ),
        StatusKey::DocumentFailed => (
            "Не удалось создать PDF. Попробуйте позже.",
            "Failed to create PDF. Please try again later.",
        ),
        StatusKey::SlidesFailed => (
            "Не удалось создать презентацию. Попробуйте позже.",
            "Failed to create presentation. Please try again later.",
        ),
        StatusKey::NoRecentSummary => (
            "У меня нет свежего конспекта. Сначала отправьте голосовое или аудио.",
            "I don't see a recent transcript. Please send an audio message first.",
        ),
    }
}
