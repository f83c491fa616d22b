use std::fmt;

/// Target languages of the festival export, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Spanish,
    French,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Spanish, Language::French];

    /// ISO 639-1 code passed to the translation backend
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
        }
    }

    /// Value of the `lang` column in the output file
    pub fn id(&self) -> u8 {
        match self {
            Self::English => 1,
            Self::Spanish => 2,
            Self::French => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_order_and_ids() {
        let ids: Vec<u8> = Language::ALL.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(Language::ALL[0].code(), "en");
        assert_eq!(Language::ALL[1].code(), "es");
        assert_eq!(Language::ALL[2].code(), "fr");
    }
}
