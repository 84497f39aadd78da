//! # Erros do Etiquetador
//!
//! Todos os erros fatais do crate passam por [`DictagError`]:
//!
//! - **Codificação**: um *high surrogate* UTF-16 sem o *low surrogate* correspondente.
//! - **Configuração**: um termo de dicionário que não produz nenhum token.
//! - **Formato**: uma linha inválida em um arquivo de dicionário TSV.
//!
//! O casamento de termos em si ([`crate::dictionary::Walk`]) não tem modo de falha:
//! tokens sem correspondência simplesmente viram `O`.

use thiserror::Error;

/// `Result` do crate, com [`DictagError`] como erro padrão.
pub type Result<T, E = DictagError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DictagError {
    /// Um *high surrogate* não foi seguido por um *low surrogate*.
    #[error("unpaired high surrogate 0x{unit:04X} at code unit {offset}")]
    UnpairedSurrogate { offset: usize, unit: u16 },

    /// O termo não gerou nenhum token com o tokenizador usado na construção.
    #[error("term {term:?} of key {key:?} yields no tokens")]
    InvalidTerm { key: String, term: String },

    /// Linha malformada em um arquivo de dicionário.
    #[error("line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
