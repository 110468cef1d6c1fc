/// Value written to the document root `lang` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLanguage {
    De,
    En,
}

impl DocumentLanguage {
    /// Coarse substring match: any locale containing `de` maps to German.
    #[must_use]
    pub fn from_user_language(user_language: &str) -> Self {
        if user_language.contains("de") {
            Self::De
        } else {
            Self::En
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }
}

pub trait DocumentAdapter {
    fn set_language(&self, language: DocumentLanguage);
    fn set_title(&self, title: &str);
    /// Location path followed by its hash, read at call time.
    fn current_page_path(&self) -> String;
}

#[must_use]
pub fn join_page_path(pathname: &str, hash: &str) -> String {
    let mut path = String::with_capacity(pathname.len() + hash.len());
    path.push_str(pathname);
    path.push_str(hash);
    path
}
