use serde::{Deserialize, Deserializer};

// query strings like ?page=abc fall back to the first page instead of failing
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(1))
}

pub fn default_page() -> i64 {
    1
}

/// A category reference as clients send it: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Text(String),
}

/// Which categories a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
    /// A reference that can not name any stored category.
    Nothing,
}

impl QuizScope {
    pub fn from_ref(reference: Option<&CategoryRef>) -> Self {
        match reference {
            None | Some(CategoryRef::Id(0)) => QuizScope::All,
            Some(CategoryRef::Id(id)) => QuizScope::Category(*id),
            // only plain digit strings are ids, " 2 " or "+2" name nothing
            Some(CategoryRef::Text(text)) if !text.bytes().all(|b| b.is_ascii_digit()) => {
                QuizScope::Nothing
            }
            Some(CategoryRef::Text(text)) => match text.parse::<i64>() {
                Ok(0) => QuizScope::All,
                Ok(id) => QuizScope::Category(id),
                Err(_) => QuizScope::Nothing,
            },
        }
    }

    pub fn label(&self) -> String {
        match self {
            QuizScope::All => "all".to_owned(),
            QuizScope::Category(id) => id.to_string(),
            QuizScope::Nothing => "none".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct PageQuery {
        #[serde(default = "default_page", deserialize_with = "deserialize_page")]
        page: i64,
    }

    fn page_of(json: &str) -> i64 {
        serde_json::from_str::<PageQuery>(json).unwrap().page
    }

    #[test]
    fn page_parsing() {
        assert_eq!(page_of(r#"{}"#), 1);
        assert_eq!(page_of(r#"{"page": "3"}"#), 3);
        assert_eq!(page_of(r#"{"page": "abc"}"#), 1);
        assert_eq!(page_of(r#"{"page": "-2"}"#), -2);
    }

    #[test]
    fn category_ref_accepts_numbers_and_strings() {
        let id: CategoryRef = serde_json::from_str("4").unwrap();
        assert_eq!(id, CategoryRef::Id(4));
        let text: CategoryRef = serde_json::from_str(r#""4""#).unwrap();
        assert_eq!(text, CategoryRef::Text("4".into()));
    }

    #[test]
    fn scope_resolution() {
        assert_eq!(QuizScope::from_ref(None), QuizScope::All);
        assert_eq!(QuizScope::from_ref(Some(&CategoryRef::Id(0))), QuizScope::All);
        assert_eq!(
            QuizScope::from_ref(Some(&CategoryRef::Text("0".into()))),
            QuizScope::All
        );
        assert_eq!(
            QuizScope::from_ref(Some(&CategoryRef::Id(2))),
            QuizScope::Category(2)
        );
        assert_eq!(
            QuizScope::from_ref(Some(&CategoryRef::Text("2".into()))),
            QuizScope::Category(2)
        );
        assert_eq!(
            QuizScope::from_ref(Some(&CategoryRef::Text("click".into()))),
            QuizScope::Nothing
        );
    }

    #[test]
    fn only_digit_strings_are_coerced() {
        for text in [" 2 ", "+2", "-2", "", "2.0", "99999999999999999999"] {
            assert_eq!(
                QuizScope::from_ref(Some(&CategoryRef::Text(text.into()))),
                QuizScope::Nothing,
                "{text:?}"
            );
        }
        assert_eq!(
            QuizScope::from_ref(Some(&CategoryRef::Text("007".into()))),
            QuizScope::Category(7)
        );
    }
}
