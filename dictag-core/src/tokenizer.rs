//! # Tokenizador por Categorias Unicode
//!
//! Divide o texto em **sequências máximas** de caracteres cujas categorias
//! ([`crate::category`]) levam ao mesmo [`State`]. Cada token carrega seus offsets,
//! o estado que o gerou e a sua morfologia (um código por caractere).
//!
//! ## Modos
//!
//! | Modo    | Estados                                                        |
//! |---------|----------------------------------------------------------------|
//! | `Space` | `separator`, `not_separator`                                   |
//! | `Word`  | `letter`, `digit`, `numeral`, `space`, `breaker`, `glyph`      |
//! | `Alnum` | `alnum` (letras + dígitos + numerais), `space`, `breaker`, `glyph` |
//!
//! Um `glyph` nunca se estende: todo caractere fora das classes acima vira um
//! token de um só caractere.
//!
//! ## Garantias
//!
//! Sem filtros, os tokens **cobrem o texto exatamente**: ordenados, contíguos, sem
//! sobreposição, o primeiro começa em `0` e o último termina em `text.len()`.
//! A soma dos comprimentos das morfologias é o número de caracteres.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use dictag_core::tokenizer::{State, Tokenizer, TokenizerMode};
//!
//! let text = "Rev-erb alpha";
//! let tokenizer = Tokenizer::new(TokenizerMode::Word).skip_states([State::Space]);
//!
//! let words: Vec<&str> = tokenizer.split(text).collect();
//! assert_eq!(words, vec!["Rev", "-", "erb", "alpha"]);
//! ```

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::category::{categories, categories_utf16, general_category, Category};
use crate::error::Result;

/// Estratégias de tokenização disponíveis.
///
/// Os três modos diferem apenas na função que leva uma [`Category`] a um [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    /// Separa apenas separadores (`Z?`) de todo o resto.
    Space,
    /// **Padrão**: letras, dígitos, numerais, espaços e quebras formam sequências;
    /// qualquer outro caractere é um token isolado.
    Word,
    /// Como `Word`, mas letras, dígitos e numerais formam uma única sequência.
    Alnum,
}

impl Default for TokenizerMode {
    fn default() -> Self {
        TokenizerMode::Word
    }
}

impl TokenizerMode {
    /// Estado de uma nova sequência que começa com um caractere da categoria `cat`.
    ///
    /// O `match` é exaustivo: toda categoria tem um estado em todos os modos.
    pub fn state(self, cat: Category) -> State {
        match self {
            TokenizerMode::Space => {
                if cat.is_separator() {
                    State::Separator
                } else {
                    State::NotSeparator
                }
            }
            TokenizerMode::Word => match cat {
                c if c.is_letter() => State::Letter,
                Category::DecimalNumber => State::Digit,
                Category::LetterNumber => State::Numeral,
                Category::SpaceSeparator => State::Space,
                Category::LineSeparator | Category::ParagraphSeparator => State::Breaker,
                _ => State::Glyph,
            },
            TokenizerMode::Alnum => match cat {
                c if c.is_alnum() => State::Alnum,
                Category::SpaceSeparator => State::Space,
                Category::LineSeparator | Category::ParagraphSeparator => State::Breaker,
                _ => State::Glyph,
            },
        }
    }
}

impl std::str::FromStr for TokenizerMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "space" => Ok(TokenizerMode::Space),
            "word" => Ok(TokenizerMode::Word),
            "alnum" => Ok(TokenizerMode::Alnum),
            other => Err(format!("unknown tokenizer mode {other:?}")),
        }
    }
}

/// Estado do tokenizador; também é o rótulo dos tokens emitidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Separator,
    NotSeparator,
    Letter,
    Digit,
    Numeral,
    Space,
    Breaker,
    Alnum,
    /// Caractere isolado; nunca se estende.
    Glyph,
}

impl State {
    /// `true` se um caractere da categoria `cat` continua uma sequência neste estado.
    pub fn extends(self, cat: Category) -> bool {
        match self {
            State::Separator => cat.is_separator(),
            State::NotSeparator => !cat.is_separator(),
            State::Letter => cat.is_letter(),
            State::Digit => cat.is_digit(),
            State::Numeral => cat.is_numeral(),
            State::Space => cat.is_space(),
            State::Breaker => cat.is_breaker(),
            State::Alnum => cat.is_alnum(),
            State::Glyph => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            State::Separator => "separator",
            State::NotSeparator => "not_separator",
            State::Letter => "letter",
            State::Digit => "digit",
            State::Numeral => "numeral",
            State::Space => "space",
            State::Breaker => "breaker",
            State::Alnum => "alnum",
            State::Glyph => "glyph",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Um token extraído do texto.
///
/// Para `&str` os offsets são em bytes (fatiáveis com `&text[start..end]`);
/// para entrada UTF-16 são índices de unidades de código.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Offset inicial (inclusivo).
    pub start: usize,
    /// Offset final (exclusivo).
    pub end: usize,
    /// Estado que gerou o token.
    pub label: State,
    /// Um código de [`Category`] por caractere do token.
    pub morphology: String,
}

impl Token {
    /// O texto do token dentro do texto de origem.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Número de caracteres do token.
    pub fn char_len(&self) -> usize {
        self.morphology.len()
    }
}

/// Tokenizador configurado: um modo e, opcionalmente, filtros de tokens.
///
/// Os filtros descartam tokens pelo estado (ex: espaços) ou pela morfologia
/// exata (ex: `"e"`, um traço isolado). Com filtros ativos os tokens deixam de
/// cobrir o texto inteiro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenizer {
    pub mode: TokenizerMode,
    #[serde(default)]
    pub skip_states: Vec<State>,
    #[serde(default)]
    pub skip_morphologies: Vec<String>,
}

impl Tokenizer {
    pub fn new(mode: TokenizerMode) -> Self {
        Self {
            mode,
            skip_states: vec![],
            skip_morphologies: vec![],
        }
    }

    /// Descarta os tokens com qualquer um destes estados.
    pub fn skip_states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.skip_states.extend(states);
        self
    }

    /// Descarta os tokens cuja morfologia é exatamente uma destas strings.
    pub fn skip_morphologies<S: Into<String>>(mut self, morphologies: impl IntoIterator<Item = S>) -> Self {
        self.skip_morphologies
            .extend(morphologies.into_iter().map(Into::into));
        self
    }

    /// `true` se o token é removido pelos filtros.
    pub fn skips(&self, token: &Token) -> bool {
        self.skip_states.contains(&token.label)
            || self.skip_morphologies.iter().any(|m| *m == token.morphology)
    }

    /// Tokeniza o texto de forma preguiçosa; cada chamada é independente.
    pub fn tag<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        Segments::new(self.mode, categories(text).map(Ok::<_, Infallible>), text.len())
            .map(|result| match result {
                Ok(token) => token,
                Err(never) => match never {},
            })
            .filter(move |token| !self.skips(token))
    }

    /// Tokeniza texto UTF-16, unindo pares de *surrogates*.
    ///
    /// A iteração termina com um erro no primeiro *high surrogate* sem par.
    pub fn tag_utf16<'a>(&'a self, units: &'a [u16]) -> impl Iterator<Item = Result<Token>> + 'a {
        Segments::new(self.mode, categories_utf16(units), units.len())
            .filter(move |result| result.as_ref().map_or(true, |token| !self.skips(token)))
    }

    /// Apenas os textos dos tokens.
    pub fn split<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tag(text).map(move |token| &text[token.start..token.end])
    }

    /// Tokeniza de uma vez, devolvendo um `Vec`.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tag(text).collect()
    }
}

/// Sequência em construção.
struct Run {
    start: usize,
    state: State,
    morphology: String,
}

impl Run {
    fn finish(self, end: usize) -> Token {
        Token {
            start: self.start,
            end,
            label: self.state,
            morphology: self.morphology,
        }
    }
}

/// A máquina de estados: uma passada da esquerda para a direita.
struct Segments<S> {
    mode: TokenizerMode,
    source: S,
    len: usize,
    run: Option<Run>,
}

impl<S> Segments<S> {
    fn new(mode: TokenizerMode, source: S, len: usize) -> Self {
        Self {
            mode,
            source,
            len,
            run: None,
        }
    }
}

impl<S, E> Iterator for Segments<S>
where
    S: Iterator<Item = std::result::Result<(usize, Category), E>>,
{
    type Item = std::result::Result<Token, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.source.next() {
                Some(Ok((offset, cat))) => {
                    if let Some(run) = self.run.as_mut().filter(|run| run.state.extends(cat)) {
                        run.morphology.push(cat.as_char());
                        continue;
                    }

                    let next = Run {
                        start: offset,
                        state: self.mode.state(cat),
                        morphology: String::from(cat.as_char()),
                    };

                    if let Some(done) = self.run.replace(next) {
                        return Some(Ok(done.finish(offset)));
                    }
                }
                Some(Err(err)) => {
                    self.run = None;
                    return Some(Err(err));
                }
                None => return self.run.take().map(|run| Ok(run.finish(self.len))),
            }
        }
    }
}

/// Offsets (em bytes) de todas as fronteiras de categoria Unicode do texto,
/// incluindo `0` e `text.len()`; vazio para texto vazio.
///
/// Usa as categorias gerais sem remapeamento. Uma única maiúscula seguida de
/// minúsculas forma um só segmento (`"Hello"`), a menos que essa maiúscula venha
/// logo depois de outra maiúscula (`"ABCdef"` → `ABC|def`).
pub fn category_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut chars = text.char_indices();

    let Some((_, first)) = chars.next() else {
        return offsets;
    };

    offsets.push(0);
    let mut before: Option<Category> = None;
    let mut last = general_category(first);

    for (offset, c) in chars {
        let current = general_category(c);

        if last != current {
            let capitalized = last == Category::UppercaseLetter
                && current == Category::LowercaseLetter
                && before != Some(Category::UppercaseLetter);

            if !capitalized {
                offsets.push(offset);
            }
        }

        before = Some(last);
        last = current;
    }

    offsets.push(text.len());
    offsets
}
