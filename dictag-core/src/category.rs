//! # Categorias de Caracteres
//!
//! Cada caractere do texto é classificado em uma [`Category`]: a categoria geral
//! Unicode, com três categorias extras e alguns remapeamentos pontuais.
//!
//! ## Códigos compactos
//!
//! Toda categoria tem um código ASCII imprimível (ex: `Lu` → `A`, `Ll` → `D`).
//! A concatenação dos códigos dos caracteres de um token é a sua **morfologia**:
//! `"Rev"` vira `"ADD"`, `"p53"` vira `"DII"`.
//!
//! | Faixa   | Categorias                                   |
//! |---------|----------------------------------------------|
//! | `A`-`N` | letras, números, separadores (`No` por último) |
//! | `a`-`o` | marcas, pontuação, símbolos, terminais (`Ts`) |
//! | `[`-`` ` `` | controles e não atribuídos                |
//!
//! A ordem dos códigos é escolhida para que os agrupamentos mais usados pelo
//! tokenizador ([`Category::is_word`], [`Category::is_alnum`], [`Category::is_letter`])
//! sejam simples comparações de inteiro.
//!
//! ## Remapeamentos
//!
//! 1. **Grego**: letras maiúsculas, minúsculas e *titlecase* nos blocos gregos
//!    recebem [`Category::GreekUppercaseLetter`] / [`Category::GreekLowercaseLetter`].
//! 2. **Exceções**: terminais de sentença (`.`, `!`, `?` e equivalentes em outras
//!    escritas) viram [`Category::SentenceTerminal`]; `#`, `&`, `@` viram símbolos;
//!    `%` vira símbolo matemático; quebras de linha de controle viram separadores.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::{DictagError, Result};

/// Categoria (remapeada) de um caractere.
///
/// O discriminante é o código ASCII usado nas strings de morfologia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    /// `Lu`: letra maiúscula (não grega).
    UppercaseLetter = b'A',
    /// `LG`: letra grega maiúscula ou *titlecase*.
    GreekUppercaseLetter = b'B',
    /// `Lt`: letra *titlecase* (não grega).
    TitlecaseLetter = b'C',
    /// `Ll`: letra minúscula (não grega).
    LowercaseLetter = b'D',
    /// `Lg`: letra grega minúscula.
    GreekLowercaseLetter = b'E',
    /// `LC`: letra com caixa; nenhum caractere pertence a ela.
    CasedLetter = b'F',
    /// `Lm`: letra modificadora.
    ModifierLetter = b'G',
    /// `Lo`: outras letras (sem caixa).
    OtherLetter = b'H',
    /// `Nd`: dígito decimal.
    DecimalNumber = b'I',
    /// `Nl`: numeral em forma de letra (ex: `Ⅳ`).
    LetterNumber = b'J',
    /// `Zl`: separador de linha (inclui `\n`, `\r`, `\f`, NEL).
    LineSeparator = b'K',
    /// `Zp`: separador de parágrafo.
    ParagraphSeparator = b'L',
    /// `Zs`: espaço (inclui `\t` e `\v`).
    SpaceSeparator = b'M',
    /// `No`: outros números (sobrescritos, frações).
    OtherNumber = b'N',
    /// `Mc`: marca combinante com espaço.
    SpacingMark = b'a',
    /// `Me`: marca envolvente.
    EnclosingMark = b'b',
    /// `Mn`: marca sem espaço (acentos combinantes).
    NonspacingMark = b'c',
    /// `Pc`: pontuação conectora.
    ConnectorPunctuation = b'd',
    /// `Pd`: traços.
    DashPunctuation = b'e',
    /// `Pe`: pontuação de fechamento.
    ClosePunctuation = b'f',
    /// `Pf`: aspas finais.
    FinalPunctuation = b'g',
    /// `Pi`: aspas iniciais.
    InitialPunctuation = b'h',
    /// `Po`: outras pontuações, sem os terminais de sentença.
    OtherPunctuation = b'i',
    /// `Ps`: pontuação de abertura.
    OpenPunctuation = b'j',
    /// `Sc`: símbolo monetário.
    CurrencySymbol = b'k',
    /// `Sk`: símbolo modificador.
    ModifierSymbol = b'l',
    /// `Sm`: símbolo matemático (inclui `%`).
    MathSymbol = b'm',
    /// `So`: outros símbolos (inclui `#`, `&`, `@`).
    OtherSymbol = b'n',
    /// `Ts`: terminal de sentença; não existe no Unicode.
    SentenceTerminal = b'o',
    /// `Cs`: *surrogate* isolado.
    Surrogate = b'_',
    /// `Cc`: caractere de controle.
    Control = b'^',
    /// `Cf`: caractere de formatação.
    Format = b'`',
    /// `Cn`: não atribuído.
    Unassigned = b']',
    /// `Co`: uso privado.
    PrivateUse = b'[',
}

impl Category {
    /// Todas as categorias, na ordem dos códigos de cada faixa.
    pub const ALL: [Category; 34] = [
        Category::UppercaseLetter,
        Category::GreekUppercaseLetter,
        Category::TitlecaseLetter,
        Category::LowercaseLetter,
        Category::GreekLowercaseLetter,
        Category::CasedLetter,
        Category::ModifierLetter,
        Category::OtherLetter,
        Category::DecimalNumber,
        Category::LetterNumber,
        Category::LineSeparator,
        Category::ParagraphSeparator,
        Category::SpaceSeparator,
        Category::OtherNumber,
        Category::SpacingMark,
        Category::EnclosingMark,
        Category::NonspacingMark,
        Category::ConnectorPunctuation,
        Category::DashPunctuation,
        Category::ClosePunctuation,
        Category::FinalPunctuation,
        Category::InitialPunctuation,
        Category::OtherPunctuation,
        Category::OpenPunctuation,
        Category::CurrencySymbol,
        Category::ModifierSymbol,
        Category::MathSymbol,
        Category::OtherSymbol,
        Category::SentenceTerminal,
        Category::Surrogate,
        Category::Control,
        Category::Format,
        Category::Unassigned,
        Category::PrivateUse,
    ];

    /// Código ASCII da categoria.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Código da categoria como `char`, para montar strings de morfologia.
    pub fn as_char(self) -> char {
        char::from(self.code())
    }

    /// Categoria correspondente a um código de morfologia.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|cat| cat.code() == code)
    }

    /// Abreviação no estilo Unicode (ex: `"Lu"`, `"LG"`, `"Ts"`).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Category::UppercaseLetter => "Lu",
            Category::GreekUppercaseLetter => "LG",
            Category::TitlecaseLetter => "Lt",
            Category::LowercaseLetter => "Ll",
            Category::GreekLowercaseLetter => "Lg",
            Category::CasedLetter => "LC",
            Category::ModifierLetter => "Lm",
            Category::OtherLetter => "Lo",
            Category::DecimalNumber => "Nd",
            Category::LetterNumber => "Nl",
            Category::LineSeparator => "Zl",
            Category::ParagraphSeparator => "Zp",
            Category::SpaceSeparator => "Zs",
            Category::OtherNumber => "No",
            Category::SpacingMark => "Mc",
            Category::EnclosingMark => "Me",
            Category::NonspacingMark => "Mn",
            Category::ConnectorPunctuation => "Pc",
            Category::DashPunctuation => "Pd",
            Category::ClosePunctuation => "Pe",
            Category::FinalPunctuation => "Pf",
            Category::InitialPunctuation => "Pi",
            Category::OtherPunctuation => "Po",
            Category::OpenPunctuation => "Ps",
            Category::CurrencySymbol => "Sc",
            Category::ModifierSymbol => "Sk",
            Category::MathSymbol => "Sm",
            Category::OtherSymbol => "So",
            Category::SentenceTerminal => "Ts",
            Category::Surrogate => "Cs",
            Category::Control => "Cc",
            Category::Format => "Cf",
            Category::Unassigned => "Cn",
            Category::PrivateUse => "Co",
        }
    }

    /// Qualquer categoria de controle (`C?`).
    pub fn is_control(self) -> bool {
        (b'['..=b'`').contains(&self.code())
    }

    /// Letras, dígitos, numerais e separadores (`L?`, `Nd`, `Nl`, `Z?`).
    pub fn is_word(self) -> bool {
        self.code() < b'N'
    }

    /// Letras, dígitos e numerais (`L?`, `Nd`, `Nl`).
    pub fn is_alnum(self) -> bool {
        self.code() < b'K'
    }

    /// Qualquer letra (`L?`).
    pub fn is_letter(self) -> bool {
        self.code() < b'I'
    }

    /// Maiúsculas e *titlecase* (`Lu`, `LG`, `Lt`).
    pub fn is_uppercase(self) -> bool {
        (b'A'..=b'C').contains(&self.code())
    }

    /// Minúsculas (`Ll`, `Lg`).
    pub fn is_lowercase(self) -> bool {
        (b'D'..=b'E').contains(&self.code())
    }

    /// Letras sem caixa (`LC`, `Lm`, `Lo`).
    pub fn is_other_letter(self) -> bool {
        (b'F'..=b'H').contains(&self.code())
    }

    /// Qualquer número (`Nd`, `Nl`, `No`).
    pub fn is_number(self) -> bool {
        self.is_numeric() || self == Category::OtherNumber
    }

    /// Dígitos e numerais (`Nd`, `Nl`).
    pub fn is_numeric(self) -> bool {
        (b'I'..=b'J').contains(&self.code())
    }

    pub fn is_digit(self) -> bool {
        self == Category::DecimalNumber
    }

    pub fn is_numeral(self) -> bool {
        self == Category::LetterNumber
    }

    /// Marcas combinantes (`M?`).
    pub fn is_mark(self) -> bool {
        (b'a'..=b'c').contains(&self.code())
    }

    /// Pontuação (`P?`), incluindo os terminais de sentença.
    pub fn is_punctuation(self) -> bool {
        (b'd'..=b'j').contains(&self.code()) || self == Category::SentenceTerminal
    }

    /// Símbolos (`S?`).
    pub fn is_symbol(self) -> bool {
        (b'k'..=b'n').contains(&self.code())
    }

    /// Separadores (`Z?`).
    pub fn is_separator(self) -> bool {
        (b'K'..=b'M').contains(&self.code())
    }

    /// Quebras de linha e de parágrafo (`Zl`, `Zp`).
    pub fn is_breaker(self) -> bool {
        (b'K'..=b'L').contains(&self.code())
    }

    pub fn is_space(self) -> bool {
        self == Category::SpaceSeparator
    }

    pub fn is_terminal(self) -> bool {
        self == Category::SentenceTerminal
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Categoria remapeada de um caractere.
pub fn classify(c: char) -> Category {
    let raw = general_category(c);

    match raw {
        Category::LowercaseLetter if is_greek(c) => Category::GreekLowercaseLetter,
        Category::UppercaseLetter | Category::TitlecaseLetter if is_greek(c) => {
            Category::GreekUppercaseLetter
        }
        _ => remap(c, raw),
    }
}

/// Categoria geral Unicode de um caractere, sem nenhum remapeamento.
///
/// Nunca devolve as categorias extras (`LG`, `Lg`, `Ts`) nem `Cs`.
pub fn general_category(c: char) -> Category {
    if c.is_ascii() {
        return ascii_category(c);
    }

    Category::from(get_general_category(c))
}

impl From<GeneralCategory> for Category {
    fn from(gc: GeneralCategory) -> Self {
        match gc {
            GeneralCategory::UppercaseLetter => Category::UppercaseLetter,
            GeneralCategory::LowercaseLetter => Category::LowercaseLetter,
            GeneralCategory::TitlecaseLetter => Category::TitlecaseLetter,
            GeneralCategory::ModifierLetter => Category::ModifierLetter,
            GeneralCategory::OtherLetter => Category::OtherLetter,
            GeneralCategory::NonspacingMark => Category::NonspacingMark,
            GeneralCategory::SpacingMark => Category::SpacingMark,
            GeneralCategory::EnclosingMark => Category::EnclosingMark,
            GeneralCategory::DecimalNumber => Category::DecimalNumber,
            GeneralCategory::LetterNumber => Category::LetterNumber,
            GeneralCategory::OtherNumber => Category::OtherNumber,
            GeneralCategory::ConnectorPunctuation => Category::ConnectorPunctuation,
            GeneralCategory::DashPunctuation => Category::DashPunctuation,
            GeneralCategory::OpenPunctuation => Category::OpenPunctuation,
            GeneralCategory::ClosePunctuation => Category::ClosePunctuation,
            GeneralCategory::InitialPunctuation => Category::InitialPunctuation,
            GeneralCategory::FinalPunctuation => Category::FinalPunctuation,
            GeneralCategory::OtherPunctuation => Category::OtherPunctuation,
            GeneralCategory::MathSymbol => Category::MathSymbol,
            GeneralCategory::CurrencySymbol => Category::CurrencySymbol,
            GeneralCategory::ModifierSymbol => Category::ModifierSymbol,
            GeneralCategory::OtherSymbol => Category::OtherSymbol,
            GeneralCategory::SpaceSeparator => Category::SpaceSeparator,
            GeneralCategory::LineSeparator => Category::LineSeparator,
            GeneralCategory::ParagraphSeparator => Category::ParagraphSeparator,
            GeneralCategory::Control => Category::Control,
            GeneralCategory::Format => Category::Format,
            GeneralCategory::Surrogate => Category::Surrogate,
            GeneralCategory::PrivateUse => Category::PrivateUse,
            GeneralCategory::Unassigned => Category::Unassigned,
            #[allow(unreachable_patterns)]
            _ => Category::Unassigned,
        }
    }
}

fn ascii_category(c: char) -> Category {
    match c {
        'a'..='z' => Category::LowercaseLetter,
        'A'..='Z' => Category::UppercaseLetter,
        '0'..='9' => Category::DecimalNumber,
        ' ' => Category::SpaceSeparator,
        '\0'..='\x1F' | '\x7F' => Category::Control,
        '(' | '[' | '{' => Category::OpenPunctuation,
        ')' | ']' | '}' => Category::ClosePunctuation,
        '-' => Category::DashPunctuation,
        '_' => Category::ConnectorPunctuation,
        '$' => Category::CurrencySymbol,
        '^' | '`' => Category::ModifierSymbol,
        '+' | '<' | '=' | '>' | '|' | '~' => Category::MathSymbol,
        _ => Category::OtherPunctuation,
    }
}

/// Letras nos blocos Grego e Copta (U+0370–U+03FF) e Grego Estendido (U+1F00–U+1FFE).
pub fn is_greek(c: char) -> bool {
    ('\u{0370}'..='\u{03FF}').contains(&c) || ('\u{1F00}'..='\u{1FFE}').contains(&c)
}

/// Tabela de exceções: só remapeia quando a categoria de origem confere.
fn remap(c: char, raw: Category) -> Category {
    match raw {
        Category::Control => match c {
            '\n' | '\u{000C}' | '\r' | '\u{0085}' => Category::LineSeparator,
            '\t' | '\u{000B}' => Category::SpaceSeparator,
            '\u{0091}' | '\u{0092}' => Category::PrivateUse,
            _ => raw,
        },
        Category::OtherPunctuation => match c {
            '#' | '&' | '@' | '\u{FE5F}' | '\u{FE60}' | '\u{FE6B}' | '\u{FF03}' | '\u{FF06}'
            | '\u{FF20}' => Category::OtherSymbol,
            '%' | '\u{0609}' | '\u{060A}' | '\u{066A}' | '\u{2030}' | '\u{2031}' | '\u{FE6A}'
            | '\u{FF05}' => Category::MathSymbol,
            _ if is_sentence_terminal(c) => Category::SentenceTerminal,
            _ => raw,
        },
        Category::OpenPunctuation => match c {
            '\u{201A}' | '\u{201E}' => Category::InitialPunctuation,
            '\u{301D}' => Category::FinalPunctuation,
            _ => raw,
        },
        Category::ClosePunctuation => match c {
            '\u{301E}' | '\u{301F}' => Category::FinalPunctuation,
            _ => raw,
        },
        _ => raw,
    }
}

/// Marcas de fim de sentença de várias escritas.
///
/// Terminais em potencial (`;`, `:`, reticências) ficam de fora.
pub fn is_sentence_terminal(c: char) -> bool {
    matches!(
        c,
        // latim e grego
        '!' | '.' | '?' | '\u{037E}'
        // armênio, hebraico, árabe, siríaco
        | '\u{055C}' | '\u{055E}' | '\u{0589}' | '\u{05C3}' | '\u{061F}' | '\u{06D4}'
        | '\u{0700}' | '\u{0701}' | '\u{0702}'
        // devanágari, tibetano, birmanês
        | '\u{0964}' | '\u{0965}' | '\u{0F08}' | '\u{0F0D}'..='\u{0F12}' | '\u{104A}' | '\u{104B}'
        // etíope, silabário canadense, mongol, limbu
        | '\u{1362}' | '\u{1367}' | '\u{1368}' | '\u{166E}' | '\u{1803}' | '\u{1809}'
        | '\u{1944}' | '\u{1945}'
        // combinações (‼, ‽, ⁇, ⁈, ⁉)
        | '\u{203C}' | '\u{203D}' | '\u{2047}' | '\u{2048}' | '\u{2049}'
        // CJK, formas verticais, pequenas e de largura total
        | '\u{3002}' | '\u{FE12}' | '\u{FE15}' | '\u{FE16}' | '\u{FE52}' | '\u{FE56}'
        | '\u{FE57}' | '\u{FF01}' | '\u{FF0E}' | '\u{FF1F}' | '\u{FF61}'
    )
}

/// Sequência `(offset em bytes, categoria)` de um texto.
pub fn categories(text: &str) -> impl Iterator<Item = (usize, Category)> + '_ {
    text.char_indices().map(|(offset, c)| (offset, classify(c)))
}

/// Sequência de categorias de um texto UTF-16, com pares de *surrogates* unidos.
///
/// Os offsets são índices de unidades de código. Um *low surrogate* isolado é
/// classificado como [`Category::Surrogate`]; um *high surrogate* sem par encerra
/// a iteração com [`DictagError::UnpairedSurrogate`].
pub fn categories_utf16(units: &[u16]) -> Utf16Categories<'_> {
    Utf16Categories {
        units,
        pos: 0,
        failed: false,
    }
}

/// Iterador devolvido por [`categories_utf16`].
pub struct Utf16Categories<'a> {
    units: &'a [u16],
    pos: usize,
    failed: bool,
}

impl Iterator for Utf16Categories<'_> {
    type Item = Result<(usize, Category)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let offset = self.pos;
        let unit = *self.units.get(offset)?;
        self.pos += 1;

        let cat = match unit {
            0xD800..=0xDBFF => match self.units.get(self.pos).copied() {
                Some(low @ 0xDC00..=0xDFFF) => {
                    self.pos += 1;
                    let scalar =
                        0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    char::from_u32(scalar).map_or(Category::Unassigned, classify)
                }
                _ => {
                    self.failed = true;
                    return Some(Err(DictagError::UnpairedSurrogate { offset, unit }));
                }
            },
            0xDC00..=0xDFFF => Category::Surrogate,
            _ => char::from_u32(u32::from(unit)).map_or(Category::Unassigned, classify),
        };

        Some(Ok((offset, cat)))
    }
}

impl FusedIterator for Utf16Categories<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "UUUΘΘΘ ᾈαα\
        αˀⅣlllƻƻƻ8\
        ²88\u{0903}\u{0488}\u{0300}_-\
        )\u{00BB}\u{00AB},($^+@!\
        \n\u{2029}\u{0007}\u{00AD}\u{0092}";

    const MORPHOLOGY: &str = "AAABBBMBEE\
        EGJDDDHHHI\
        NIIabcde\
        fghijklmno\
        KL^`[";

    #[test]
    fn test_example_categories() {
        let morph: String = categories(EXAMPLE).map(|(_, cat)| cat.as_char()).collect();
        assert_eq!(morph, MORPHOLOGY);
    }

    #[test]
    fn test_codes_are_unique_and_printable() {
        let mut codes: Vec<u8> = Category::ALL.iter().map(|c| c.code()).collect();
        assert!(codes.iter().all(|c| c.is_ascii_graphic()));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), Category::ALL.len());
    }

    #[test]
    fn test_from_code_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_code(cat.code()), Some(cat));
        }
        assert_eq!(Category::from_code(b'z'), None);
    }

    #[test]
    fn test_greek_remap() {
        assert_eq!(classify('Ω'), Category::GreekUppercaseLetter);
        assert_eq!(classify('ω'), Category::GreekLowercaseLetter);
        assert_eq!(classify('ᾈ'), Category::GreekUppercaseLetter);
        // o sinal de micro fica fora dos blocos gregos
        assert_eq!(classify('µ'), Category::LowercaseLetter);
        assert_eq!(general_category('α'), Category::LowercaseLetter);
    }

    #[test]
    fn test_exception_remap() {
        assert_eq!(classify('.'), Category::SentenceTerminal);
        assert_eq!(classify('。'), Category::SentenceTerminal);
        assert_eq!(classify('؟'), Category::SentenceTerminal);
        assert_eq!(classify(','), Category::OtherPunctuation);
        assert_eq!(classify('#'), Category::OtherSymbol);
        assert_eq!(classify('＠'), Category::OtherSymbol);
        assert_eq!(classify('%'), Category::MathSymbol);
        assert_eq!(classify('‰'), Category::MathSymbol);
        assert_eq!(classify('\t'), Category::SpaceSeparator);
        assert_eq!(classify('\r'), Category::LineSeparator);
        assert_eq!(classify('\u{0085}'), Category::LineSeparator);
        assert_eq!(classify('\u{0091}'), Category::PrivateUse);
        assert_eq!(classify('\u{201E}'), Category::InitialPunctuation);
        assert_eq!(classify('\u{301F}'), Category::FinalPunctuation);
    }

    #[test]
    fn test_ascii_matches_general_tables() {
        for c in (0u8..0x80).map(char::from) {
            let expected = Category::from(get_general_category(c));
            assert_eq!(general_category(c), expected, "char {:?}", c);
        }
    }

    #[test]
    fn test_recent_unicode_letters() {
        // Unicode 10 ou posterior
        assert_eq!(classify('\u{0860}'), Category::OtherLetter);
        assert_eq!(classify('\u{10D00}'), Category::OtherLetter);
        assert_eq!(classify('\u{A7C0}'), Category::UppercaseLetter);
        assert_eq!(classify('\u{1F97A}'), Category::OtherSymbol);
        assert_eq!(classify('\u{1E900}'), Category::UppercaseLetter);
        assert_eq!(classify('\u{0378}'), Category::Unassigned);
    }

    #[test]
    fn test_groupings() {
        assert!(Category::LetterNumber.is_alnum());
        assert!(!Category::OtherNumber.is_alnum());
        assert!(Category::SpaceSeparator.is_word());
        assert!(!Category::OtherNumber.is_word());
        assert!(Category::ModifierLetter.is_letter());
        assert!(!Category::DecimalNumber.is_letter());
        assert!(Category::TitlecaseLetter.is_uppercase());
        assert!(Category::GreekLowercaseLetter.is_lowercase());
        assert!(Category::SentenceTerminal.is_punctuation());
        assert!(!Category::SentenceTerminal.is_symbol());
        assert!(Category::ParagraphSeparator.is_breaker());
        assert!(!Category::SpaceSeparator.is_breaker());
        assert!(Category::Unassigned.is_control());
        assert!(Category::OtherNumber.is_number());
    }

    #[test]
    fn test_surrogate_pair_is_merged() {
        let units = [0x61, 0x62, 0xD800, 0xDC00, 0x63, 0x64];
        let cats: Vec<Category> = categories_utf16(&units)
            .map(|r| r.map(|(_, cat)| cat))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            cats,
            vec![
                Category::LowercaseLetter,
                Category::LowercaseLetter,
                Category::OtherLetter,
                Category::LowercaseLetter,
                Category::LowercaseLetter,
            ]
        );
    }

    #[test]
    fn test_unpaired_high_surrogate_fails() {
        let units = [0x61, 0xD800, 0x62];
        let results: Vec<_> = categories_utf16(&units).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[1],
            Err(DictagError::UnpairedSurrogate { offset: 1, unit: 0xD800 })
        ));

        let trailing = [0x61, 0xDBFF];
        assert!(categories_utf16(&trailing).any(|r| r.is_err()));
    }

    #[test]
    fn test_lone_low_surrogate_is_cs() {
        let units = [0xDC00, 0x41];
        let cats: Vec<_> = categories_utf16(&units).map(|r| r.unwrap()).collect();
        assert_eq!(cats, vec![(0, Category::Surrogate), (1, Category::UppercaseLetter)]);
    }
}
