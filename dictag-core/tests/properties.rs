//! Testes de propriedade do tokenizador e do casamento por dicionário.
//!
//! Verificado sobre entradas geradas:
//! 1. Sem filtros, os tokens cobrem o texto inteiro, com um código de morfologia por caractere.
//! 2. A tokenização UTF-16 concorda com a UTF-8.
//! 3. O casamento emite exatamente uma tag por token, em ordem BIO válida.
//! 4. O casamento é determinístico e não depende de casamentos anteriores.

use dictag_core::category::categories;
use dictag_core::tokenizer::category_offsets;
use dictag_core::{Dictionary, State, Tag, Tokenizer, TokenizerMode};
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "rev", "erb", "Rev", "alpha", "α", "PPAR", "ppar", "Ppar", "A", "a", "D", "neuro", "2", "x",
];

fn mode_strategy() -> impl Strategy<Value = TokenizerMode> {
    prop_oneof![
        Just(TokenizerMode::Space),
        Just(TokenizerMode::Word),
        Just(TokenizerMode::Alnum),
    ]
}

fn word_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VOCABULARY)
}

fn term_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..4).prop_map(|words| words.join(" "))
}

fn dictionary_strategy() -> impl Strategy<Value = Vec<(String, String, i64)>> {
    prop::collection::vec((term_strategy(), 0..3i64), 0..12).prop_map(|terms| {
        terms
            .into_iter()
            .enumerate()
            .map(|(i, (term, order))| (format!("K{}", i % 4), term, order))
            .collect()
    })
}

fn build(entries: &[(String, String, i64)]) -> Dictionary {
    let tokenizer = Tokenizer::new(TokenizerMode::Space).skip_states([State::Separator]);
    Dictionary::build(
        entries
            .iter()
            .map(|(key, term, order)| (key.as_str(), term.as_str(), *order)),
        &tokenizer,
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_tokens_tile_text(text in any::<String>(), mode in mode_strategy()) {
        let tokens = Tokenizer::new(mode).tokenize(&text);

        let mut offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.start, offset);
            prop_assert!(token.end > token.start);
            prop_assert_eq!(token.morphology.chars().count(), token.text(&text).chars().count());
            offset = token.end;
        }
        prop_assert_eq!(offset, text.len());

        let codes: usize = tokens.iter().map(|token| token.morphology.len()).sum();
        prop_assert_eq!(codes, categories(&text).count());
    }

    #[test]
    fn prop_utf16_agrees_with_utf8(text in any::<String>(), mode in mode_strategy()) {
        let tokenizer = Tokenizer::new(mode);
        let units: Vec<u16> = text.encode_utf16().collect();

        let wide: Vec<_> = tokenizer.tag_utf16(&units).collect::<Result<_, _>>().unwrap();
        let narrow = tokenizer.tokenize(&text);

        prop_assert_eq!(wide.len(), narrow.len());
        for (w, n) in wide.iter().zip(&narrow) {
            prop_assert_eq!(&w.morphology, &n.morphology);
            prop_assert_eq!(w.label, n.label);
        }
    }

    #[test]
    fn prop_category_offsets_are_boundaries(text in any::<String>()) {
        let offsets = category_offsets(&text);
        if text.is_empty() {
            prop_assert!(offsets.is_empty());
        } else {
            prop_assert_eq!(offsets.first(), Some(&0));
            prop_assert_eq!(offsets.last(), Some(&text.len()));
            prop_assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(offsets.iter().all(|&offset| text.is_char_boundary(offset)));
        }
    }

    #[test]
    fn prop_one_tag_per_token(
        entries in dictionary_strategy(),
        tokens in prop::collection::vec(word_strategy(), 0..40),
    ) {
        let dictionary = build(&entries);
        let tags: Vec<Tag> = dictionary.walk(&tokens).collect();

        prop_assert_eq!(tags.len(), tokens.len());
        if let Some(first) = tags.first() {
            prop_assert!(!matches!(first, Tag::Inside(_)));
        }
        for pair in tags.windows(2) {
            prop_assert!(Tag::is_valid_transition(&pair[0], &pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn prop_walk_is_deterministic(
        entries in dictionary_strategy(),
        tokens in prop::collection::vec(word_strategy(), 0..40),
        other in prop::collection::vec(word_strategy(), 0..40),
    ) {
        let dictionary = build(&entries);
        let first: Vec<Tag> = dictionary.walk(&tokens).collect();
        let _: Vec<Tag> = dictionary.walk(&other).collect();
        let second: Vec<Tag> = dictionary.walk(&tokens).collect();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_terms_match_themselves(term in term_strategy()) {
        let dictionary = build(&[("K".to_string(), term.clone(), 0)]);
        let tokens: Vec<&str> = term.split(' ').collect();
        let tags: Vec<Tag> = dictionary.walk(&tokens).collect();

        prop_assert_eq!(&tags[0], &Tag::Begin("K".to_string()));
        prop_assert!(tags[1..].iter().all(|tag| *tag == Tag::Inside("K".to_string())));
    }
}
