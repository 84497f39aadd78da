//! # dictag-core: Etiquetagem de Entidades por Dicionário
//!
//! Este crate encontra termos de um dicionário (nomes de genes, proteínas, ...)
//! em texto corrido e os marca no esquema BIO. Não há modelo estatístico: tudo
//! é derivado das categorias Unicode e de uma trie de tokens.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em estágios, cada um consumindo o anterior de forma preguiçosa:
//!
//! 1.  **Classificação** ([`category`]): cada caractere vira um código de
//!     categoria Unicode (com os remapeamentos para gregas e pontuação final).
//! 2.  **Tokenização** ([`tokenizer`]): sequências máximas de categorias
//!     compatíveis viram tokens com offsets e morfologia.
//! 3.  **Casamento** ([`dictionary`]): a caminhada pela trie escolhe o termo
//!     mais longo (e de menor ordem) e emite uma [`Tag`] por token.
//! 4.  **Saída** ([`tagger`], [`pipeline`]): tokens etiquetados e [`EntitySpan`]s.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use dictag_core::{Dictionary, DictionaryTagger, State, Tokenizer, TokenizerMode};
//!
//! // 1. Tokenizador: palavras, sem espaços e sem hífens
//! let tokenizer = Tokenizer::new(TokenizerMode::Word)
//!     .skip_states([State::Space])
//!     .skip_morphologies(["e"]);
//!
//! // 2. Dicionário: (chave, termo, ordem)
//! let dictionary = Dictionary::build(
//!     [("NR1D1", "rev erb alpha", 1), ("PPARA", "PPAR", 1)],
//!     &tokenizer,
//! )?;
//!
//! // 3. Análise
//! let tagger = DictionaryTagger::new(tokenizer, dictionary);
//! let (_, entities) = tagger.analyze("A Rev-erb alpha responsive element.");
//!
//! assert_eq!(entities[0].key, "NR1D1");
//! assert_eq!(entities[0].text, "Rev-erb alpha");
//! # Ok::<(), dictag_core::DictagError>(())
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta tokenizador e dicionário.
//! - [`dictionary`]: Trie, construção, carga de TSV e a caminhada.
//! - [`category`]: Tabela de categorias e predicados de agrupamento.

pub mod category;
pub mod dictionary;
pub mod error;
pub mod pipeline;
pub mod tagger;
pub mod tokenizer;

pub use category::Category;
pub use dictionary::{Dictionary, Leaf, Node, NodeId, NodeStore, Walk};
pub use error::{DictagError, Result};
pub use pipeline::{Analysis, DictionaryTagger, PipelineEvent};
pub use tagger::{EntitySpan, Tag, TaggedToken};
pub use tokenizer::{State, Token, Tokenizer, TokenizerMode};
