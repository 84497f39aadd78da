//! # Dicionário de Termos: Trie de Tokens
//!
//! O dicionário guarda termos (sinônimos) já tokenizados numa **trie** cujas
//! arestas são textos de token. Cada nó que encerra um termo carrega uma ou mais
//! [`Leaf`] com a chave canônica do termo e a sua ordem de preferência.
//!
//! ```text
//! raiz ──"rev"──► n1 ──"erb"──► n2 ──"α"─────► n3 [Leaf(1, NR1D1)]
//!                                  └─"alpha"─► n4 [Leaf(1, NR1D1)]
//! raiz ──"PPAR"─► n5 [Leaf(0, PPARA)]
//! ```
//!
//! ## Construção
//!
//! Cada termo passa pelo mesmo [`Tokenizer`] usado depois no texto. Tokens de um
//! único caractere que não abrem o termo são gravados em minúsculas, para que
//! "protein A" e "protein a" caiam na mesma aresta.
//!
//! ## Caminhada
//!
//! [`Dictionary::walk`] consome tokens um a um e emite uma [`Tag`] BIO por token,
//! com latência limitada ao comprimento do maior casamento ainda em aberto.
//! Por token `t` (com `last` o token anterior) o casador tenta, em ordem:
//!
//! | Variante          | Quando                                                  |
//! |-------------------|---------------------------------------------------------|
//! | exata             | `t` é aresta                                            |
//! | letra minúscula   | `t` é uma única maiúscula e `lower(t)` é aresta         |
//! | junção (`joined`) | `last` alfabético, `t` uma única maiúscula: `upper(last+t)` |
//! | maiúsculas        | `t` só tem minúsculas: `upper(t)`                       |
//! | minúsculas        | `t` é capitalizado (`Abc`): `lower(t)`                  |
//!
//! Quando duas variantes existem ao mesmo tempo os nós são **fundidos** numa
//! camada local à caminhada; o dicionário compartilhado nunca é alterado.

use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::category::{general_category, Category};
use crate::error::{DictagError, Result};
use crate::tagger::Tag;
use crate::tokenizer::Tokenizer;

/// Índice de um nó dentro de um [`NodeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Registro de término de um termo: a chave canônica e a sua ordem.
///
/// A ordenação deriva de `order` e depois `key`, de modo que o menor `Leaf`
/// de um nó é o preferido.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Leaf<O> {
    pub order: O,
    pub key: String,
}

/// Nó da trie. `leaves` fica sempre ordenado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node<O> {
    pub edges: HashMap<String, NodeId>,
    pub leaves: Vec<Leaf<O>>,
}

impl<O> Default for Node<O> {
    fn default() -> Self {
        Node {
            edges: HashMap::new(),
            leaves: Vec::new(),
        }
    }
}

impl<O: Ord> Node<O> {
    /// Chave do termo preferido que termina neste nó.
    pub fn key(&self) -> Option<&str> {
        self.leaves.first().map(|leaf| leaf.key.as_str())
    }

    /// Insere a folha mantendo a ordem. Retorna `false` se ela já existia.
    fn add_leaf(&mut self, leaf: Leaf<O>) -> bool {
        match self.leaves.binary_search(&leaf) {
            Ok(_) => false,
            Err(pos) => {
                self.leaves.insert(pos, leaf);
                true
            }
        }
    }
}

/// Armazenamento de nós endereçados por [`NodeId`].
///
/// Fusão e igualdade estrutural são definidas aqui para valerem tanto no
/// [`Dictionary`] quanto na camada local de uma [`Walk`].
pub trait NodeStore<O: Ord + Clone> {
    fn node(&self, id: NodeId) -> &Node<O>;

    fn insert(&mut self, node: Node<O>) -> NodeId;

    fn child(&self, id: NodeId, label: &str) -> Option<NodeId> {
        self.node(id).edges.get(label).copied()
    }

    /// Igualdade estrutural: mesmas folhas e arestas com filhos iguais.
    fn equal(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        let (x, y) = (self.node(a), self.node(b));
        x.leaves == y.leaves
            && x.edges.len() == y.edges.len()
            && x.edges.iter().all(|(label, &child)| {
                y.edges
                    .get(label)
                    .map_or(false, |&other| self.equal(child, other))
            })
    }

    /// Funde dois nós num **novo** nó, sem alterar os originais.
    ///
    /// - Nós estruturalmente iguais: o resultado é uma cópia de `a`.
    /// - Caso contrário: união das arestas (filhos em comum são fundidos
    ///   recursivamente) e união ordenada das folhas.
    fn merge(&mut self, a: NodeId, b: NodeId) -> NodeId {
        if self.equal(a, b) {
            let copy = self.node(a).clone();
            return self.insert(copy);
        }

        let mut edges = self.node(a).edges.clone();
        let others: Vec<(String, NodeId)> = self
            .node(b)
            .edges
            .iter()
            .map(|(label, &child)| (label.clone(), child))
            .collect();
        for (label, child) in others {
            let merged = match edges.get(&label) {
                Some(&mine) => self.merge(mine, child),
                None => child,
            };
            edges.insert(label, merged);
        }

        let mut leaves = self.node(a).leaves.clone();
        leaves.extend(self.node(b).leaves.iter().cloned());
        leaves.sort();

        self.insert(Node { edges, leaves })
    }
}

/// Trie de termos tokenizados. `O` é o tipo da ordem de preferência.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dictionary<O = i64> {
    nodes: Vec<Node<O>>,
}

impl<O> Default for Dictionary<O> {
    fn default() -> Self {
        Dictionary {
            nodes: vec![Node::default()],
        }
    }
}

impl<O: Ord + Clone> NodeStore<O> for Dictionary<O> {
    fn node(&self, id: NodeId) -> &Node<O> {
        &self.nodes[id.0]
    }

    fn insert(&mut self, node: Node<O>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

impl<O: Ord + Clone> Dictionary<O> {
    pub const ROOT: NodeId = NodeId(0);

    /// Dicionário vazio (apenas a raiz).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrói um dicionário a partir de triplas `(chave, termo, ordem)`.
    ///
    /// # Exemplo
    ///
    /// ```rust
    /// use dictag_core::{Dictionary, State, Tokenizer, TokenizerMode};
    ///
    /// let tokenizer = Tokenizer::new(TokenizerMode::Space).skip_states([State::Separator]);
    /// let dictionary = Dictionary::build([("key", "the term", 0)], &tokenizer).unwrap();
    /// let tags: Vec<String> = dictionary
    ///     .walk(["in", "the", "term"])
    ///     .map(|tag| tag.label())
    ///     .collect();
    /// assert_eq!(tags, ["O", "B-key", "I-key"]);
    /// ```
    pub fn build<I, K, T>(entries: I, tokenizer: &Tokenizer) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T, O)>,
        K: Into<String>,
        T: AsRef<str>,
    {
        let mut dictionary = Self::new();
        for (key, term, order) in entries {
            dictionary.insert_term(key, term.as_ref(), order, tokenizer)?;
        }
        info!(
            "Dicionário construído: {} nós, {} folhas",
            dictionary.node_count(),
            dictionary.leaf_count()
        );
        Ok(dictionary)
    }

    /// Tokeniza `term` e grava o caminho correspondente, anexando a folha
    /// `(order, key)` ao nó final. Retorna esse nó.
    pub fn insert_term(
        &mut self,
        key: impl Into<String>,
        term: &str,
        order: O,
        tokenizer: &Tokenizer,
    ) -> Result<NodeId> {
        let key = key.into();
        let mut node = Self::ROOT;
        let mut segments = 0;

        for (index, token) in tokenizer.tag(term).enumerate() {
            let text = token.text(term);
            let label = if index > 0 && token.char_len() == 1 {
                text.to_lowercase()
            } else {
                text.to_string()
            };
            node = self.child_or_insert(node, label);
            segments += 1;
        }

        if segments == 0 {
            return Err(DictagError::InvalidTerm {
                key,
                term: term.to_string(),
            });
        }

        if !self.nodes[node.0].add_leaf(Leaf { order, key }) {
            warn!("Termo duplicado ignorado: {:?}", term);
        }
        Ok(node)
    }

    fn child_or_insert(&mut self, parent: NodeId, label: String) -> NodeId {
        if let Some(child) = self.child(parent, &label) {
            return child;
        }
        let child = self.insert(Node::default());
        self.nodes[parent.0].edges.insert(label, child);
        child
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total de folhas (pares chave/termo distintos).
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().map(|node| node.leaves.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[0].edges.is_empty()
    }

    /// Segue uma sequência de rótulos de aresta a partir da raiz.
    pub fn lookup<S: AsRef<str>>(&self, labels: impl IntoIterator<Item = S>) -> Option<NodeId> {
        labels
            .into_iter()
            .try_fold(Self::ROOT, |node, label| self.child(node, label.as_ref()))
    }

    /// Chave preferida do nó, se algum termo termina nele.
    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.node(id).key()
    }

    /// Etiqueta uma sequência de tokens, emitindo uma [`Tag`] por token.
    ///
    /// A caminhada é preguiçosa: tags saem assim que nenhum casamento em aberto
    /// pode mais cobri-las.
    pub fn walk<I>(&self, tokens: I) -> Walk<'_, I::IntoIter, O>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Walk {
            tokens: tokens.into_iter(),
            store: Overlay {
                base: &self.nodes,
                local: Vec::new(),
            },
            queue: VecDeque::new(),
            pending: VecDeque::new(),
            last: None,
            finished: false,
        }
    }
}

impl<O> Dictionary<O>
where
    O: Ord + Clone + Default + FromStr,
    O::Err: Display,
{
    /// Carrega um dicionário TSV: `chave<TAB>termo[<TAB>ordem[<TAB>...]]`.
    ///
    /// Linhas vazias e linhas iniciadas por `#` são ignoradas. Sem a coluna de
    /// ordem, usa `O::default()`. Colunas além da terceira são ignoradas.
    pub fn from_tsv<R: BufRead>(reader: R, tokenizer: &Tokenizer) -> Result<Self> {
        let mut dictionary = Self::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let key = fields.next().unwrap_or_default().trim();
            if key.is_empty() {
                return Err(DictagError::InvalidFormat {
                    line: number,
                    message: "empty key".to_string(),
                });
            }
            let Some(term) = fields.next() else {
                return Err(DictagError::InvalidFormat {
                    line: number,
                    message: "missing term column".to_string(),
                });
            };
            let order = match fields.next().map(str::trim).filter(|field| !field.is_empty()) {
                Some(field) => field.parse::<O>().map_err(|e| DictagError::InvalidFormat {
                    line: number,
                    message: format!("invalid order {field:?}: {e}"),
                })?,
                None => O::default(),
            };

            dictionary.insert_term(key, term, order, tokenizer)?;
        }

        info!(
            "Dicionário carregado: {} folhas, {} nós",
            dictionary.leaf_count(),
            dictionary.node_count()
        );
        Ok(dictionary)
    }
}

/// Nós do dicionário mais os nós fundidos durante uma caminhada.
///
/// Ids abaixo de `base.len()` apontam para o dicionário; os demais para `local`.
struct Overlay<'d, O> {
    base: &'d [Node<O>],
    local: Vec<Node<O>>,
}

impl<O: Ord + Clone> NodeStore<O> for Overlay<'_, O> {
    fn node(&self, id: NodeId) -> &Node<O> {
        match id.0.checked_sub(self.base.len()) {
            Some(local) => &self.local[local],
            None => &self.base[id.0],
        }
    }

    fn insert(&mut self, node: Node<O>) -> NodeId {
        self.local.push(node);
        NodeId(self.base.len() + self.local.len() - 1)
    }
}

/// Um token na fila de casamento.
#[derive(Debug)]
enum Slot {
    /// Nenhum caminho começa neste token.
    Empty,
    /// Caminho ainda extensível pelo próximo token.
    Open(Vec<NodeId>),
    /// Caminho que não pode mais crescer; aguarda resolução.
    Closed(Vec<NodeId>),
}

impl Slot {
    fn has_path(&self) -> bool {
        !matches!(self, Slot::Empty)
    }
}

/// Grafias alternativas de um token.
struct Alternates {
    joined: Option<String>,
    upper: Option<String>,
    lower: Option<String>,
}

impl Alternates {
    fn new(token: &str, last: Option<&str>) -> Self {
        let joined = match last {
            Some(last) if is_alpha(last) && is_single_upper(token) => {
                Some(format!("{last}{token}").to_uppercase())
            }
            _ => None,
        };
        Alternates {
            joined,
            upper: is_lower(token).then(|| token.to_uppercase()),
            lower: is_capitalized(token).then(|| token.to_lowercase()),
        }
    }
}

fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

fn is_single_upper(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Tem ao menos uma minúscula e nenhuma maiúscula ou titlecase (`ǅ`).
fn is_lower(s: &str) -> bool {
    s.chars().any(char::is_lowercase)
        && !s
            .chars()
            .any(|c| c.is_uppercase() || general_category(c) == Category::TitlecaseLetter)
}

/// Alfabético, mais de um caractere, inicial maiúscula e resto minúsculo.
fn is_capitalized(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str();
            first.is_uppercase() && !rest.is_empty() && is_alpha(s) && is_lower(rest)
        }
        None => false,
    }
}

/// Iterador de tags produzido por [`Dictionary::walk`].
pub struct Walk<'d, I, O> {
    tokens: I,
    store: Overlay<'d, O>,
    queue: VecDeque<Slot>,
    pending: VecDeque<Tag>,
    last: Option<String>,
    finished: bool,
}

impl<'d, I, O: Ord + Clone> Walk<'d, I, O> {
    const ROOT: NodeId = NodeId(0);

    fn advance(&mut self, token: &str) {
        let alternates = Alternates::new(token, self.last.as_deref());

        let store = &mut self.store;
        for slot in self.queue.iter_mut() {
            if let Slot::Open(path) = slot {
                if !extend(store, path, token, &alternates) {
                    debug!("Caminho fechado em {:?} após {} tokens", token, path.len());
                    *slot = Slot::Closed(std::mem::take(path));
                }
            }
        }

        self.open(token, &alternates);
    }

    /// Abre (ou não) um caminho começando em `token`.
    fn open(&mut self, token: &str, alternates: &Alternates) {
        let root = Self::ROOT;
        let store = &mut self.store;
        let lookup = |alt: &Option<String>| alt.as_deref().and_then(|s| store.child(root, s));
        let (upper, lower, joined) = (
            lookup(&alternates.upper),
            lookup(&alternates.lower),
            lookup(&alternates.joined),
        );
        let exact = store.child(root, token);

        let slot = match (exact, upper, lower) {
            (Some(exact), Some(upper), _) => Slot::Open(vec![store.merge(exact, upper)]),
            (Some(exact), None, Some(lower)) => Slot::Open(vec![store.merge(exact, lower)]),
            (Some(exact), None, None) => {
                if let Some(joined) = joined {
                    self.graft(joined);
                }
                Slot::Open(vec![exact])
            }
            (None, Some(upper), _) => Slot::Open(vec![upper]),
            (None, None, Some(lower)) => Slot::Open(vec![lower]),
            (None, None, None) => {
                if let Some(joined) = joined {
                    self.graft(joined);
                }
                Slot::Empty
            }
        };
        if slot.has_path() {
            debug!("Casamento iniciado em {:?}", token);
        }
        self.queue.push_back(slot);
    }

    /// Enxerta `node` (casamento de `upper(last+token)` a partir da raiz) no
    /// caminho que começa em `last`, reabrindo-o se preciso.
    fn graft(&mut self, node: NodeId) {
        let Some(slot) = self.queue.back_mut() else {
            return;
        };
        let mut path = match std::mem::replace(slot, Slot::Empty) {
            Slot::Empty => Vec::new(),
            Slot::Open(path) | Slot::Closed(path) => path,
        };

        match path.len() {
            0 => {
                let bridge = Node {
                    edges: self.store.node(node).edges.clone(),
                    leaves: Vec::new(),
                };
                path.push(self.store.insert(bridge));
                path.push(node);
            }
            1 => path.push(node),
            n => {
                path[n - 2] = self.store.merge(path[n - 2], node);
                path[n - 1] = self.store.merge(path[n - 1], node);
            }
        }
        debug!("Grafia unida enxertada no token anterior");
        *slot = Slot::Open(path);
    }

    /// Resolve a frente da fila enquanto ela tiver mais de `keep` slots e a
    /// frente não estiver aberta.
    fn drain(&mut self, keep: usize) {
        while self.queue.len() > keep {
            match self.queue.front() {
                Some(Slot::Empty) => {
                    self.queue.pop_front();
                    self.pending.push_back(Tag::Outside);
                }
                Some(Slot::Closed(_)) => {
                    if let Some(Slot::Closed(path)) = self.queue.pop_front() {
                        self.resolve(&path);
                    }
                }
                _ => break,
            }
        }

        if !self.queue.iter().any(Slot::has_path) {
            self.store.local.clear();
        }
    }

    /// Emite as tags do caminho fechado que estava na frente da fila.
    ///
    /// O nó mais profundo com folha vence; cada `I-` consome o slot do token
    /// correspondente, descartando os caminhos que começavam nele.
    fn resolve(&mut self, path: &[NodeId]) {
        let found = path
            .iter()
            .enumerate()
            .rev()
            .find_map(|(pos, &id)| self.store.node(id).key().map(|key| (pos, key.to_string())));

        match found {
            Some((pos, key)) => {
                debug!("Termo encontrado: {} ({} tokens)", key, pos + 1);
                self.pending.push_back(Tag::Begin(key.clone()));
                for _ in 0..pos {
                    self.queue.pop_front();
                    self.pending.push_back(Tag::Inside(key.clone()));
                }
            }
            None => self.pending.push_back(Tag::Outside),
        }
    }

    fn close_all(&mut self) {
        for slot in self.queue.iter_mut() {
            if let Slot::Open(path) = slot {
                *slot = Slot::Closed(std::mem::take(path));
            }
        }
    }
}

/// Estende um caminho aberto com `token`. Retorna `false` se não houver aresta.
fn extend<O: Ord + Clone>(
    store: &mut Overlay<'_, O>,
    path: &mut Vec<NodeId>,
    token: &str,
    alternates: &Alternates,
) -> bool {
    let Some(&tail) = path.last() else {
        return false;
    };
    let anchor = if path.len() > 1 {
        path[path.len() - 2]
    } else {
        NodeId(0)
    };
    let joined = alternates
        .joined
        .as_deref()
        .and_then(|joined| store.child(anchor, joined));

    let next = if let Some(exact) = store.child(tail, token) {
        match joined {
            Some(joined) => store.merge(exact, joined),
            None => exact,
        }
    } else if let Some(swapped) = is_single_upper(token)
        .then(|| token.to_lowercase())
        .and_then(|lower| store.child(tail, &lower))
    {
        swapped
    } else if let Some(joined) = joined {
        joined
    } else if let Some(upper) = alternates.upper.as_deref().and_then(|s| store.child(tail, s)) {
        upper
    } else if let Some(lower) = alternates.lower.as_deref().and_then(|s| store.child(tail, s)) {
        lower
    } else {
        return false;
    };

    path.push(next);
    true
}

impl<I, O> Iterator for Walk<'_, I, O>
where
    I: Iterator,
    I::Item: AsRef<str>,
    O: Ord + Clone,
{
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        loop {
            if let Some(tag) = self.pending.pop_front() {
                return Some(tag);
            }
            if self.finished {
                return None;
            }
            match self.tokens.next() {
                Some(token) => {
                    let token = token.as_ref();
                    self.advance(token);
                    self.drain(1);
                    self.last = Some(token.to_string());
                }
                None => {
                    self.close_all();
                    self.drain(0);
                    self.finished = true;
                }
            }
        }
    }
}
