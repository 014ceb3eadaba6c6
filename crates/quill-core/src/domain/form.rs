//! Post form binding and field validation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Post, PostDraft};

/// Longest title accepted, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Language used for validation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported language code: {other}")),
        }
    }
}

/// A single problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    MaxLength { limit: usize, actual: usize },
}

impl FieldError {
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (FieldError::Required, Locale::Ja) => "このフィールドは必須です。".to_string(),
            (FieldError::Required, Locale::En) => "This field is required.".to_string(),
            (FieldError::MaxLength { limit, actual }, Locale::Ja) => {
                format!("この値は {limit} 文字以下でなければなりません( {actual} 文字になっています)。")
            }
            (FieldError::MaxLength { limit, actual }, Locale::En) => {
                format!("Ensure this value has at most {limit} characters (it has {actual}).")
            }
        }
    }
}

/// Field errors keyed by field name, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<FieldError>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.fields.entry(field).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> &[FieldError] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Render every error in `locale`, keyed by field name.
    pub fn messages(&self, locale: Locale) -> BTreeMap<&'static str, Vec<String>> {
        self.fields
            .iter()
            .map(|(field, errors)| (*field, errors.iter().map(|e| e.message(locale)).collect()))
            .collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields.keys().copied().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Raw `title`/`text` submission, as posted by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

impl PostForm {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Pre-fill the edit form from a stored post.
    pub fn from_post(post: &Post) -> Self {
        Self::new(post.title.clone(), post.text.clone())
    }

    /// Clean both fields and check them.
    ///
    /// Surrounding whitespace is stripped before the checks and is not stored.
    pub fn validate(&self) -> Result<PostDraft, FormErrors> {
        let title = self.title.trim();
        let text = self.text.trim();
        let mut errors = FormErrors::default();

        if title.is_empty() {
            errors.add("title", FieldError::Required);
        } else {
            let actual = title.chars().count();
            if actual > TITLE_MAX_CHARS {
                errors.add(
                    "title",
                    FieldError::MaxLength {
                        limit: TITLE_MAX_CHARS,
                        actual,
                    },
                );
            }
        }

        if text.is_empty() {
            errors.add("text", FieldError::Required);
        }

        if errors.is_empty() {
            Ok(PostDraft {
                title: title.to_string(),
                text: text.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAR_200: &str = "aaaaaaaaaabbbbbbbbbbccccccccccddddddddddeeeeeeeeeeffffffffffgggggggggghhhhhhhhhhiiiiiiiiiijjjjjjjjjjkkkkkkkkkkllllllllllmmmmmmmmmmnnnnnnnnnnooooooooooppppppppppqqqqqqqqqqrrrrrrrrrrsssssssssstttttttttt";

    fn messages(errors: &FormErrors) -> BTreeMap<&'static str, Vec<String>> {
        errors.messages(Locale::Ja)
    }

    #[test]
    fn test_valid_form() {
        let draft = PostForm::new("タイトル１", "内容１").validate().unwrap();
        assert_eq!(draft.title(), "タイトル１");
        assert_eq!(draft.text(), "内容１");
    }

    #[test]
    fn test_title_required() {
        let errors = PostForm::new("", "内容のみ_タイトルなし")
            .validate()
            .unwrap_err();

        let expected = BTreeMap::from([("title", vec!["このフィールドは必須です。".to_string()])]);
        assert_eq!(messages(&errors), expected);
    }

    #[test]
    fn test_text_required() {
        let errors = PostForm::new("タイトルのみ", "").validate().unwrap_err();

        let expected = BTreeMap::from([("text", vec!["このフィールドは必須です。".to_string()])]);
        assert_eq!(messages(&errors), expected);
    }

    #[test]
    fn test_title_at_limit_accepted() {
        assert_eq!(CHAR_200.chars().count(), 200);
        let draft = PostForm::new(CHAR_200, "タイトル文字数200OK")
            .validate()
            .unwrap();
        assert_eq!(draft.title(), CHAR_200);
    }

    #[test]
    fn test_title_over_limit_rejected() {
        let title = format!("{CHAR_200}z");
        let errors = PostForm::new(title, "タイトル文字数201NG")
            .validate()
            .unwrap_err();

        assert_eq!(
            errors.get("title"),
            &[FieldError::MaxLength {
                limit: 200,
                actual: 201
            }]
        );
        let expected = BTreeMap::from([(
            "title",
            vec!["この値は 200 文字以下でなければなりません( 201 文字になっています)。".to_string()],
        )]);
        assert_eq!(messages(&errors), expected);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let title = "あ".repeat(200);
        assert!(title.len() > 200);
        assert!(PostForm::new(title, "本文").validate().is_ok());
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let errors = PostForm::new("   ", "\n\t").validate().unwrap_err();
        assert_eq!(errors.get("title"), &[FieldError::Required]);
        assert_eq!(errors.get("text"), &[FieldError::Required]);
    }

    #[test]
    fn test_surrounding_whitespace_stripped() {
        let draft = PostForm::new("  title  ", " body\n").validate().unwrap();
        assert_eq!(draft.into_parts(), ("title".to_string(), "body".to_string()));
    }

    #[test]
    fn test_english_messages() {
        let title = format!("{CHAR_200}z");
        let errors = PostForm::new(title, "").validate().unwrap_err();
        let rendered = errors.messages(Locale::En);

        assert_eq!(
            rendered["title"],
            vec!["Ensure this value has at most 200 characters (it has 201).".to_string()]
        );
        assert_eq!(rendered["text"], vec!["This field is required.".to_string()]);
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("ja".parse::<Locale>(), Ok(Locale::Ja));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }
}
