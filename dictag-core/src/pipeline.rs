//! # Pipeline de Etiquetagem com Eventos Observáveis
//!
//! O [`DictionaryTagger`] junta o [`Tokenizer`] e o [`Dictionary`]: tokeniza o
//! texto, caminha pela trie e converte as tags BIO em [`EntitySpan`]s.
//!
//! Há três formas de uso:
//!
//! | Método               | Uso                                                     |
//! |----------------------|---------------------------------------------------------|
//! | `analyze`            | chamada direta, devolve tokens etiquetados e spans      |
//! | `analyze_batch`      | vários textos em paralelo (`rayon`), trie compartilhada |
//! | `analyze_streaming`  | emite [`PipelineEvent`]s por um canal `mpsc`            |
//!
//! O streaming envia cada `TagAssigned` assim que a caminhada libera a tag, o que
//! permite ao servidor WebSocket mostrar o progresso token a token.

use std::sync::mpsc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionary::Dictionary;
use crate::tagger::{tokens_to_spans, EntitySpan, TaggedToken};
use crate::tokenizer::{Token, Tokenizer};

/// Eventos emitidos pelo pipeline durante o processamento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: Tokenização concluída (após os filtros).
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2**: Tag definitiva de um token.
    TagAssigned {
        token_index: usize,
        token_text: String,
        tag: String,
    },
    /// **Conclusão**: tokens etiquetados, spans e tempo total.
    Done {
        entities: Vec<EntitySpan>,
        tagged_tokens: Vec<TaggedToken>,
        total_tokens: usize,
        processing_ms: u64,
    },
    /// **Falha**: a requisição não pôde ser processada.
    Error { message: String },
}

/// Resultado de uma análise: tokens etiquetados e os termos encontrados.
pub type Analysis = (Vec<TaggedToken>, Vec<EntitySpan>);

/// Tokenizador + dicionário.
///
/// Só usa `&self`: pode ser compartilhado entre threads (`Arc`) e caminhadas
/// concorrentes não interferem entre si.
#[derive(Debug, Clone, Default)]
pub struct DictionaryTagger<O = i64> {
    pub tokenizer: Tokenizer,
    pub dictionary: Dictionary<O>,
}

impl<O: Ord + Clone> DictionaryTagger<O> {
    pub fn new(tokenizer: Tokenizer, dictionary: Dictionary<O>) -> Self {
        Self {
            tokenizer,
            dictionary,
        }
    }

    /// Processa o texto de forma síncrona.
    pub fn analyze(&self, text: &str) -> Analysis {
        self.run(text, |_, _| {})
    }

    /// Executa o pipeline enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `TokenizationDone`
    /// 2. `TagAssigned` (um por token, na ordem)
    /// 3. `Done`
    ///
    /// Um receptor desconectado não interrompe a análise.
    pub fn analyze_streaming(&self, text: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = Instant::now();
        let (tagged_tokens, entities) = self.run(text, |event, tagged| match event {
            Step::Tokenized(tokens) => {
                let _ = tx.send(PipelineEvent::TokenizationDone {
                    tokens: tokens.to_vec(),
                    total: tokens.len(),
                });
            }
            Step::Tagged(index) => {
                if let Some(token) = tagged {
                    let _ = tx.send(PipelineEvent::TagAssigned {
                        token_index: index,
                        token_text: token.text.clone(),
                        tag: token.tag.label(),
                    });
                }
            }
        });

        let _ = tx.send(PipelineEvent::Done {
            total_tokens: tagged_tokens.len(),
            entities,
            tagged_tokens,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }

    /// Analisa vários textos em paralelo sobre a mesma trie.
    ///
    /// A ordem dos resultados é a ordem de `texts`.
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Vec<Analysis>
    where
        S: AsRef<str> + Sync,
        O: Send + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect()
    }

    fn run<F>(&self, text: &str, mut observe: F) -> Analysis
    where
        F: FnMut(Step<'_>, Option<&TaggedToken>),
    {
        let tokens = self.tokenizer.tokenize(text);
        observe(Step::Tokenized(&tokens), None);

        let walk = self.dictionary.walk(tokens.iter().map(|token| token.text(text)));
        let mut tagged = Vec::with_capacity(tokens.len());
        for (index, (token, tag)) in tokens.iter().zip(walk).enumerate() {
            tagged.push(TaggedToken {
                text: token.text(text).to_string(),
                token: token.clone(),
                tag,
            });
            observe(Step::Tagged(index), tagged.last());
        }

        let entities = tokens_to_spans(&tagged, text);
        debug!(
            "Análise concluída: {} tokens, {} termos",
            tagged.len(),
            entities.len()
        );
        (tagged, entities)
    }
}

enum Step<'a> {
    Tokenized(&'a [Token]),
    Tagged(usize),
}
