//! Configuração do servidor via variáveis de ambiente
//!
//! | Variável            | Padrão         | Descrição                                   |
//! |---------------------|----------------|---------------------------------------------|
//! | `DICTAG_ADDR`       | `0.0.0.0:3000` | endereço de escuta                          |
//! | `DICTAG_DICTIONARY` | (nenhum)       | arquivo TSV `chave<TAB>termo[<TAB>ordem]`   |
//! | `DICTAG_TOKENIZER`  | `word`         | `space`, `word` ou `alnum`                  |
//! | `DICTAG_SKIP_SPACE` | `true`         | descarta espaços e quebras antes do casamento |

use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::PathBuf;

use dictag_core::{DictagError, Dictionary, DictionaryTagger, State, Tokenizer, TokenizerMode};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("cannot open dictionary {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("dictionary {path:?}: {source}")]
    Dictionary { path: PathBuf, source: DictagError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub dictionary: Option<PathBuf>,
    pub tokenizer: TokenizerMode,
    pub skip_space: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            dictionary: None,
            tokenizer: TokenizerMode::Word,
            skip_space: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Lê a configuração de uma função de busca qualquer (testável sem tocar no ambiente).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(value) = get("DICTAG_ADDR") {
            config.addr = value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "DICTAG_ADDR",
                value,
            })?;
        }
        if let Some(value) = get("DICTAG_DICTIONARY") {
            config.dictionary = Some(PathBuf::from(value));
        }
        if let Some(value) = get("DICTAG_TOKENIZER") {
            config.tokenizer = value.parse().map_err(|_| ConfigError::Invalid {
                var: "DICTAG_TOKENIZER",
                value,
            })?;
        }
        if let Some(value) = get("DICTAG_SKIP_SPACE") {
            config.skip_space = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "DICTAG_SKIP_SPACE",
                        value,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn tokenizer(&self) -> Tokenizer {
        let tokenizer = Tokenizer::new(self.tokenizer);
        if self.skip_space {
            tokenizer.skip_states([State::Separator, State::Space, State::Breaker])
        } else {
            tokenizer
        }
    }

    /// Monta o pipeline, carregando o dicionário configurado (se houver).
    pub fn load_tagger(&self) -> Result<DictionaryTagger, ConfigError> {
        let tokenizer = self.tokenizer();
        let dictionary = match &self.dictionary {
            Some(path) => {
                let file = File::open(path).map_err(|source| ConfigError::Open {
                    path: path.clone(),
                    source,
                })?;
                let dictionary = Dictionary::from_tsv(BufReader::new(file), &tokenizer).map_err(
                    |source| ConfigError::Dictionary {
                        path: path.clone(),
                        source,
                    },
                )?;
                info!("Dicionário {:?}: {} termos", path, dictionary.leaf_count());
                dictionary
            }
            None => {
                warn!("DICTAG_DICTIONARY não definido: usando dicionário vazio");
                Dictionary::new()
            }
        };
        Ok(DictionaryTagger::new(tokenizer, dictionary))
    }
}
