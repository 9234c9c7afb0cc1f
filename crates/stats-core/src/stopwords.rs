//! Words excluded from the word-frequency view.

use std::collections::HashSet;

/// Built-in Portuguese stopwords, lowercase.
pub const PORTUGUESE: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às",
    "até", "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do",
    "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "éramos",
    "essa", "essas", "esse", "esses", "esta", "está", "estamos", "estão", "estar", "estas",
    "estava", "estavam", "este", "esteja", "estes", "esteve", "estive", "estou", "eu", "foi",
    "fomos", "for", "foram", "fosse", "fossem", "fui", "há", "isso", "isto", "já", "lhe",
    "lhes", "mais", "mas", "me", "mesmo", "meu", "meus", "minha", "minhas", "muito", "na",
    "não", "nas", "nem", "no", "nos", "nós", "nossa", "nossas", "nosso", "nossos", "num",
    "numa", "o", "os", "ou", "para", "pela", "pelas", "pelo", "pelos", "por", "pra", "pro",
    "qual", "quando", "que", "quem", "são", "se", "seja", "sejam", "sem", "ser", "será",
    "seu", "seus", "só", "somos", "sou", "sua", "suas", "também", "te", "tem", "têm", "temos",
    "tenho", "ter", "teu", "teus", "tu", "tua", "tuas", "um", "uma", "umas", "uns", "vai",
    "vão", "você", "vocês", "vos", "vou",
];

/// Case-folded set of words dropped before counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordList {
    words: HashSet<String>,
}

impl StopwordList {
    /// The built-in Portuguese list.
    pub fn portuguese() -> Self {
        Self::from_words(PORTUGUESE.iter().copied())
    }

    /// An empty list (nothing is excluded).
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Build a list from arbitrary words; entries are trimmed and lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::empty();
        list.extend(words);
        list
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let folded = word.as_ref().trim().to_lowercase();
            if !folded.is_empty() {
                self.words.insert(folded);
            }
        }
    }

    /// `token` must already be case-folded.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordList {
    fn default() -> Self {
        Self::portuguese()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_contains_common_words() {
        let list = StopwordList::portuguese();
        for word in ["que", "não", "para", "você", "é"] {
            assert!(list.contains(word), "{word} should be a stopword");
        }
        assert!(!list.contains("churrasco"));
    }

    #[test]
    fn test_builtin_entries_are_lowercase() {
        for word in PORTUGUESE {
            assert_eq!(*word, word.to_lowercase());
        }
    }

    #[test]
    fn test_from_words_case_folds_and_trims() {
        let list = StopwordList::from_words(["  KKK ", "Haha"]);
        assert!(list.contains("kkk"));
        assert!(list.contains("haha"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_extend_skips_blank_entries() {
        let mut list = StopwordList::empty();
        list.extend(["", "   ", "ok"]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_default_is_portuguese() {
        assert_eq!(StopwordList::default(), StopwordList::portuguese());
        assert!(!StopwordList::default().is_empty());
    }
}
