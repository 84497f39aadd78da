//! # Esquema de Tags BIO
//!
//! O casamento por dicionário ([`crate::dictionary`]) produz uma tag por token no
//! esquema **BIO** (Beginning-Inside-Outside), usando a chave canônica do termo
//! encontrado como "categoria":
//!
//! - `B-<chave>`: primeiro token de um termo do dicionário
//! - `I-<chave>`: tokens seguintes do mesmo termo
//! - `O`: fora de qualquer termo
//!
//! ## Exemplo
//!
//! | Token | `Here` | `is` | `the`     | `term`    | `.` |
//! |-------|--------|------|-----------|-----------|-----|
//! | Tag   | `O`    | `O`  | `B-key`   | `I-key`   | `O` |

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Tag BIO aplicada a um token.
///
/// Serializa como o rótulo textual (`"O"`, `"B-HGNC:7762"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Tag {
    /// **Begin**: início de um termo com esta chave.
    Begin(String),
    /// **Inside**: continuação de um termo com esta chave.
    Inside(String),
    /// **Outside**: o token não faz parte de nenhum termo.
    Outside,
}

impl Tag {
    /// Representação textual da tag (ex: `"B-key"`, `"I-key"`, `"O"`).
    pub fn label(&self) -> String {
        match self {
            Tag::Begin(key) => format!("B-{key}"),
            Tag::Inside(key) => format!("I-{key}"),
            Tag::Outside => "O".to_string(),
        }
    }

    /// Chave do termo (se for B- ou I-).
    pub fn key(&self) -> Option<&str> {
        match self {
            Tag::Begin(key) | Tag::Inside(key) => Some(key),
            Tag::Outside => None,
        }
    }

    pub fn is_outside(&self) -> bool {
        matches!(self, Tag::Outside)
    }

    /// Verifica se a transição `prev → next` é válida no esquema BIO
    ///
    /// Regras:
    /// - `I-X` só pode seguir `B-X` ou `I-X` (mesma chave)
    /// - `B-X` e `O` podem seguir qualquer tag
    pub fn is_valid_transition(prev: &Tag, next: &Tag) -> bool {
        match next {
            Tag::Inside(key) => match prev {
                Tag::Begin(prev_key) | Tag::Inside(prev_key) => prev_key == key,
                Tag::Outside => false,
            },
            _ => true,
        }
    }

    /// Parseia uma tag a partir do rótulo (ex: `"B-PPARA"` → `Begin("PPARA")`).
    ///
    /// Só o primeiro `-` separa o prefixo; a chave pode conter outros.
    pub fn from_label(s: &str) -> Option<Self> {
        if s == "O" {
            return Some(Tag::Outside);
        }
        let (prefix, key) = s.split_once('-')?;
        if key.is_empty() {
            return None;
        }
        match prefix {
            "B" => Some(Tag::Begin(key.to_string())),
            "I" => Some(Tag::Inside(key.to_string())),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Begin(key) => write!(f, "B-{key}"),
            Tag::Inside(key) => write!(f, "I-{key}"),
            Tag::Outside => write!(f, "O"),
        }
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.label()
    }
}

impl TryFrom<String> for Tag {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Tag::from_label(&label).ok_or_else(|| format!("invalid BIO label {label:?}"))
    }
}

/// Um token com o seu texto e a tag atribuída pelo dicionário.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub text: String,
    pub tag: Tag,
}

/// Um termo do dicionário encontrado no texto (um ou mais tokens).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Texto coberto pelo termo, como aparece no original
    pub text: String,
    /// Chave canônica do termo
    pub key: String,
    /// Índice do primeiro token
    pub start_token: usize,
    /// Índice do último token (inclusivo)
    pub end_token: usize,
    /// Offset inicial no texto original
    pub start: usize,
    /// Offset final no texto original
    pub end: usize,
}

/// Converte uma sequência de tokens com tags BIO em spans de termos.
///
/// - Inicia um span ao encontrar `B-X`.
/// - Continua enquanto houver `I-X` com a **mesma** chave.
/// - Um `I-X` órfão (sem `B-X` antes) é ignorado.
///
/// # Exemplo
/// `[B-a, I-a, O, B-b]` → `[EntitySpan(a), EntitySpan(b)]`
pub fn tokens_to_spans(tagged: &[TaggedToken], original_text: &str) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        if let Tag::Begin(key) = &tagged[i].tag {
            let start = tagged[i].token.start;
            let mut end = tagged[i].token.end;
            let mut j = i + 1;

            while j < tagged.len() && matches!(&tagged[j].tag, Tag::Inside(next) if next == key) {
                end = tagged[j].token.end;
                j += 1;
            }

            spans.push(EntitySpan {
                text: original_text.get(start..end).unwrap_or_default().to_string(),
                key: key.clone(),
                start_token: i,
                end_token: j - 1,
                start,
                end,
            });

            i = j;
        } else {
            i += 1;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{State, Tokenizer, TokenizerMode};

    #[test]
    fn test_tag_labels() {
        assert_eq!(Tag::Outside.label(), "O");
        assert_eq!(Tag::Begin("key".into()).label(), "B-key");
        assert_eq!(Tag::Inside("NR1D1".into()).to_string(), "I-NR1D1");
    }

    #[test]
    fn test_valid_transitions() {
        let b = Tag::Begin("a".into());
        let i = Tag::Inside("a".into());
        assert!(Tag::is_valid_transition(&b, &i));
        assert!(Tag::is_valid_transition(&i, &i));
        assert!(!Tag::is_valid_transition(&Tag::Outside, &i));
        assert!(!Tag::is_valid_transition(&Tag::Begin("b".into()), &i));
        assert!(Tag::is_valid_transition(&i, &Tag::Outside));
    }

    #[test]
    fn test_tag_from_label() {
        assert_eq!(Tag::from_label("O"), Some(Tag::Outside));
        assert_eq!(Tag::from_label("B-key"), Some(Tag::Begin("key".into())));
        assert_eq!(
            Tag::from_label("I-HGNC-7762"),
            Some(Tag::Inside("HGNC-7762".into()))
        );
        assert_eq!(Tag::from_label("B-"), None);
        assert_eq!(Tag::from_label("X-key"), None);
        assert_eq!(Tag::from_label("key"), None);
    }

    #[test]
    fn test_tag_serializes_as_label() {
        let json = serde_json::to_string(&vec![Tag::Begin("k".into()), Tag::Outside]).unwrap();
        assert_eq!(json, r#"["B-k","O"]"#);

        let back: Vec<Tag> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Tag::Begin("k".into()), Tag::Outside]);
        assert!(serde_json::from_str::<Tag>(r#""Z-k""#).is_err());
    }

    #[test]
    fn test_tokens_to_spans() {
        let text = "the Rev erb gene and PPAR";
        let tokenizer = Tokenizer::new(TokenizerMode::Word).skip_states([State::Space]);
        let tags = ["O", "B-NR1D1", "I-NR1D1", "O", "O", "B-PPARA"];
        let tagged: Vec<TaggedToken> = tokenizer
            .tag(text)
            .zip(tags)
            .map(|(token, label)| TaggedToken {
                text: token.text(text).to_string(),
                token,
                tag: Tag::from_label(label).unwrap(),
            })
            .collect();

        let spans = tokens_to_spans(&tagged, text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Rev erb");
        assert_eq!(spans[0].key, "NR1D1");
        assert_eq!((spans[0].start_token, spans[0].end_token), (1, 2));
        assert_eq!(spans[1].text, "PPAR");
        assert_eq!((spans[1].start, spans[1].end), (21, 25));
    }
}
