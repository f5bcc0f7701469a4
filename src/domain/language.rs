#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Sinhala,
    Tamil,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Sinhala, Language::Tamil];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Sinhala => "sinhala",
            Language::Tamil => "tamil",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "english" => Some(Language::English),
            "sinhala" => Some(Language::Sinhala),
            "tamil" => Some(Language::Tamil),
            _ => None,
        }
    }
}
